//! Expense categories
//!
//! Categories are plain names in an open, user-extensible vocabulary.

/// Category that unknown or unrecognised names fall back to
pub const FALLBACK_CATEGORY: &str = "Other";

/// The vocabulary a new installation starts with
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Groceries",
    "Transport",
    "Entertainment",
    "Utilities",
    "Shopping",
    "Health",
    "Other",
];

/// The default vocabulary as owned strings
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Return `candidate` if it is in `known`, otherwise the fallback category
pub fn coerce_category(candidate: &str, known: &[String]) -> String {
    if known.iter().any(|c| c == candidate) {
        candidate.to_string()
    } else {
        FALLBACK_CATEGORY.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_fallback() {
        assert!(default_categories().contains(&FALLBACK_CATEGORY.to_string()));
        assert_eq!(default_categories().len(), 8);
    }

    #[test]
    fn test_coerce_category() {
        let known = default_categories();
        assert_eq!(coerce_category("Food", &known), "Food");
        assert_eq!(coerce_category("food", &known), "Other");
        assert_eq!(coerce_category("Spaceships", &known), "Other");
    }
}
