pub mod client;
pub mod dto;
pub mod helpers;
pub mod service;

pub use client::{ChatModel, OpenAiClient};
pub use dto::{AnalyzeBillResponse, BillAnalysis};
pub use service::AnalysisService;
