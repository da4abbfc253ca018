use uuid::Uuid;

/// Fresh opaque identifier for a record. Collisions are not checked.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Convert a string to a filename-safe slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Task Manager"), "task-manager");
        assert_eq!(slugify("Pay rent | Home"), "pay-rent-home");
        assert_eq!(slugify("  Lots   of   spaces  "), "lots-of-spaces");
    }

    #[test]
    fn test_slugify_truncates_long_titles() {
        let long_title = "a".repeat(100);
        assert_eq!(slugify(&long_title).len(), 50);
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(new_id(), new_id());
    }
}
