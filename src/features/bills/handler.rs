use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};
use tracing::info;

use crate::core::error::AppError;
use crate::features::analysis::AnalyzeBillResponse;
use crate::features::bills::dto::{
    BillFilter, BillRecord, Category, DetailedBillRecord, ListBillsParams, RefreshBillsParams,
    RefreshBillsResponse, SearchBillsParams,
};
use crate::server::AppState;

const DEFAULT_REFRESH_LIMIT: u32 = 20;
const MAX_REFRESH_LIMIT: u32 = 250;

pub async fn handle_healthcheck() -> Result<Json<Value>, AppError> {
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn handle_list_bills(
    State(state): State<AppState>,
    Query(params): Query<ListBillsParams>,
) -> Result<Json<Vec<BillRecord>>, AppError> {
    let category = params
        .category
        .as_deref()
        .map(|value| {
            value
                .parse::<Category>()
                .map_err(|_| AppError::bad_request(format!("unknown category: {value}")))
        })
        .transpose()?;

    let filter = BillFilter {
        category,
        status: params.status,
    };

    Ok(Json(state.store.list(filter).await?))
}

pub async fn handle_search_bills(
    State(state): State<AppState>,
    Query(params): Query<SearchBillsParams>,
) -> Result<Json<Vec<BillRecord>>, AppError> {
    Ok(Json(state.store.search(&params.q).await?))
}

pub async fn handle_get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillRecord>, AppError> {
    Ok(Json(state.store.get(&id).await?))
}

/// Pulls the most recent bills from upstream and upserts each one. An
/// upstream failure surfaces as 502 rather than an empty list, so callers can
/// tell "nothing new" from "fetch failed".
pub async fn handle_refresh_bills(
    State(state): State<AppState>,
    Query(params): Query<RefreshBillsParams>,
) -> Result<Json<RefreshBillsResponse>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_REFRESH_LIMIT)
        .clamp(1, MAX_REFRESH_LIMIT);

    let bills = state.bill_source.fetch_recent(limit).await?;
    for record in &bills {
        state.store.upsert(record).await?;
    }

    info!(target: "bills", count = bills.len(), "refreshed recent bills");

    Ok(Json(RefreshBillsResponse {
        fetched: bills.len(),
        bills,
    }))
}

pub async fn handle_refresh_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailedBillRecord>, AppError> {
    let detail = state
        .bill_source
        .fetch_detail(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("no upstream bill with id {id}")))?;

    state.store.upsert(&detail.bill).await?;

    Ok(Json(detail))
}

/// Runs the model enrichment path against a stored bill: a structured
/// summary plus the model categorizer's suggested label. The stored category
/// is left untouched; choosing between the two strategies stays with the
/// caller.
pub async fn handle_analyze_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalyzeBillResponse>, AppError> {
    let record = state.store.get(&id).await?;

    let text = record.summary.as_deref().unwrap_or(record.title.as_str());
    let analysis = state.analysis.summarize(text).await?;
    let suggested_category = state
        .analysis
        .categorize(&record.title, record.summary.as_deref())
        .await?;

    Ok(Json(AnalyzeBillResponse {
        analysis,
        suggested_category,
    }))
}
