pub mod keyword;

use async_trait::async_trait;

use crate::features::bills::Category;

/// Shared interface over the two categorization strategies. The keyword
/// strategy runs during ingestion; the model strategy only runs through the
/// analysis endpoint.
#[async_trait]
pub trait Categorizer: Send + Sync {
    async fn categorize(&self, title: &str, summary: Option<&str>) -> Category;
}

pub use keyword::KeywordCategorizer;
