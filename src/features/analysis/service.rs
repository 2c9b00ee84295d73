use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::AppError;
use crate::features::analysis::client::ChatModel;
use crate::features::analysis::dto::BillAnalysis;
use crate::features::analysis::helpers::{
    build_categorize_prompt, build_summary_prompt, normalise_category_label, parse_analysis,
};
use crate::features::bills::Category;
use crate::features::categorize::Categorizer;

const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a legislative analyst skilled at summarising complex bills in simple terms.";
const CATEGORIZE_SYSTEM_PROMPT: &str =
    "You are a legislative analyst who categorises bills accurately.";

const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 500;
const CATEGORIZE_TEMPERATURE: f32 = 0.1;
const CATEGORIZE_MAX_TOKENS: u32 = 20;

pub struct AnalysisService {
    chat: Arc<dyn ChatModel>,
}

impl AnalysisService {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// Produces a four-section structured analysis of the given bill text.
    pub async fn summarize(&self, bill_text: &str) -> Result<BillAnalysis, AppError> {
        let text = bill_text.trim();
        if text.is_empty() {
            return Err(AppError::bad_request(
                "bill text must not be empty".to_string(),
            ));
        }

        let prompt = build_summary_prompt(text);
        let response = self
            .chat
            .complete(
                SUMMARY_SYSTEM_PROMPT,
                &prompt,
                SUMMARY_TEMPERATURE,
                SUMMARY_MAX_TOKENS,
            )
            .await?;

        Ok(parse_analysis(&response))
    }

    /// Asks the model for a single category label and collapses anything off
    /// the closed label set to `other`.
    pub async fn categorize(
        &self,
        title: &str,
        summary: Option<&str>,
    ) -> Result<Category, AppError> {
        let prompt = build_categorize_prompt(title, summary.unwrap_or_default());
        let response = self
            .chat
            .complete(
                CATEGORIZE_SYSTEM_PROMPT,
                &prompt,
                CATEGORIZE_TEMPERATURE,
                CATEGORIZE_MAX_TOKENS,
            )
            .await?;

        Ok(normalise_category_label(&response))
    }
}

/// Model-backed categorization strategy. Unlike the keyword strategy this one
/// calls upstream; a failed call degrades to `other` at this seam because the
/// trait is total over its inputs.
#[async_trait]
impl Categorizer for AnalysisService {
    async fn categorize(&self, title: &str, summary: Option<&str>) -> Category {
        match AnalysisService::categorize(self, title, summary).await {
            Ok(category) => category,
            Err(error) => {
                tracing::warn!(target: "analysis", %error, "model categorization failed");
                Category::Other
            }
        }
    }
}
