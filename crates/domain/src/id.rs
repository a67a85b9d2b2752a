//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// Used as the root identifier of collections and environment containers
/// created from scratch, and as the Postman `_postman_id` / environment `id`.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Builds the identifier of the `key`-th child issued under `parent_id`.
#[must_use]
pub fn child_id(parent_id: &str, key: usize) -> String {
    format!("{parent_id}/{key}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_child_id() {
        assert_eq!(child_id("root", 3), "root/3");
        assert_eq!(child_id("/tmp/a.json/0", 1), "/tmp/a.json/0/1");
    }
}
