use serde::{Deserialize, Serialize};

use crate::features::bills::Category;

/// Structured analysis of one bill. A section the model did not produce is
/// simply absent; no slot is guessed from position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAnalysis {
    pub brief_summary: Option<String>,
    pub key_points: Option<String>,
    pub potential_impact: Option<String>,
    pub stakeholders: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeBillResponse {
    pub analysis: BillAnalysis,
    pub suggested_category: Category,
}
