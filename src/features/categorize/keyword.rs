use async_trait::async_trait;

use crate::features::bills::Category;
use crate::features::categorize::Categorizer;

/// Fixed iteration order; the first list with a matching substring wins.
const KEYWORD_TABLE: [(Category, &[&str]); 5] = [
    (
        Category::Healthcare,
        &["health", "medical", "medicare", "medicaid"],
    ),
    (
        Category::Education,
        &["education", "school", "student", "learning"],
    ),
    (
        Category::Environment,
        &["environment", "climate", "energy", "pollution"],
    ),
    (Category::Economy, &["tax", "budget", "economic", "finance"]),
    (
        Category::Security,
        &["defense", "security", "military", "veterans"],
    ),
];

/// Deterministic title-keyword categorizer. Pure: no state, no upstream calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCategorizer;

impl KeywordCategorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn categorize_title(&self, title: &str) -> Category {
        let title_lower = title.to_lowercase();
        for (category, keywords) in KEYWORD_TABLE {
            if keywords
                .iter()
                .any(|keyword| title_lower.contains(keyword))
            {
                return category;
            }
        }

        Category::Other
    }
}

#[async_trait]
impl Categorizer for KeywordCategorizer {
    async fn categorize(&self, title: &str, _summary: Option<&str>) -> Category {
        self.categorize_title(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_titles_classify_as_environment() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(
            categorizer.categorize_title("Climate Resilience Act"),
            Category::Environment
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(
            categorizer.categorize_title("MEDICARE Improvement Act"),
            Category::Healthcare
        );
    }

    #[test]
    fn unmatched_titles_fall_back_to_other() {
        let categorizer = KeywordCategorizer::new();
        assert_eq!(
            categorizer.categorize_title("Post Office Naming Act"),
            Category::Other
        );
        assert_eq!(categorizer.categorize_title(""), Category::Other);
    }

    #[test]
    fn first_matching_category_wins() {
        let categorizer = KeywordCategorizer::new();
        // "health" (healthcare) appears in the table before "budget" (economy).
        assert_eq!(
            categorizer.categorize_title("Health Budget Reform"),
            Category::Healthcare
        );
    }

    #[tokio::test]
    async fn trait_impl_ignores_the_summary() {
        let categorizer = KeywordCategorizer::new();
        let category = categorizer
            .categorize("Student Loan Relief", Some("about military veterans"))
            .await;
        assert_eq!(category, Category::Education);
    }
}
