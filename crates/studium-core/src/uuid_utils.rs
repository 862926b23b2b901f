//! UUID helpers.
//!
//! All entity ids are UUIDv7: time-ordered, so primary-key ordering matches
//! creation order and ids remain opaque to clients.

use uuid::Uuid;

/// Generate a new UUIDv7 from the current time.
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        let id = new_v7();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_new_v7_is_unique() {
        let a = new_v7();
        let b = new_v7();
        assert_ne!(a, b);
    }
}
