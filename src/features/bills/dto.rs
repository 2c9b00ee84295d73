use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of subject-area labels. Every stored bill carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healthcare,
    Education,
    Environment,
    Economy,
    Security,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Environment => "environment",
            Self::Economy => "economy",
            Self::Security => "security",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "healthcare" => Ok(Self::Healthcare),
            "education" => Ok(Self::Education),
            "environment" => Ok(Self::Environment),
            "economy" => Ok(Self::Economy),
            "security" => Ok(Self::Security),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRecord {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub sponsor: Option<String>,
    pub status: Option<String>,
    pub introduced_date: Option<NaiveDate>,
    pub last_updated: DateTime<Utc>,
    pub category: Category,
}

/// Extended shape returned for single-bill upstream lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedBillRecord {
    #[serde(flatten)]
    pub bill: BillRecord,
    pub full_text_url: Option<String>,
    pub actions: Vec<Value>,
}

/// Exact-match list filters; absent fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    pub category: Option<Category>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListBillsParams {
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBillsParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshBillsParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RefreshBillsResponse {
    pub fetched: usize,
    pub bills: Vec<BillRecord>,
}
