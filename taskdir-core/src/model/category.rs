use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CATEGORIES_COLLECTION;
use crate::store::Record;
use crate::utils::new_id;

/// A named group that tasks belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Category {
            id: new_id(),
            title: title.into(),
        }
    }

    /// Case-insensitive title comparison, used to resolve user input.
    /// Accented letters fold too ("Saúde" matches "SAÚDE").
    pub fn has_title(&self, title: &str) -> bool {
        titles_match(&self.title, title)
    }
}

/// Compare two titles ignoring surrounding whitespace and letter case.
pub fn titles_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Record for Category {
    const COLLECTION: &'static str = CATEGORIES_COLLECTION;

    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_title_folds_accented_letters() {
        let category = Category::new("Saúde");
        assert!(category.has_title("SAÚDE"));
        assert!(category.has_title("  saúde "));
        assert!(!category.has_title("Saude"));
    }
}
