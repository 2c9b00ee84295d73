use sled::Tree;
use tokio::task;

use crate::core::error::AppError;
use crate::features::bills::dto::{BillFilter, BillRecord};

/// Keyed storage of bill records over one sled tree. Values are JSON-encoded;
/// all tree access runs on the blocking pool.
pub struct BillStore {
    tree: Tree,
}

impl BillStore {
    pub fn new(tree: Tree) -> Self {
        Self { tree }
    }

    /// Inserts or fully replaces the record at `record.id`. Last write wins;
    /// nothing from a prior record survives.
    pub async fn upsert(&self, record: &BillRecord) -> Result<(), AppError> {
        let data = serde_json::to_vec(record)
            .map_err(|err| AppError::internal(format!("failed to encode bill record: {err}")))?;
        let tree = self.tree.clone();
        let key = record.id.as_bytes().to_vec();

        task::spawn_blocking(move || -> Result<(), AppError> {
            tree.insert(key, data)
                .map_err(|err| AppError::internal(format!("failed to write bill record: {err}")))?;
            Ok(())
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))??;

        self.tree
            .flush_async()
            .await
            .map_err(|err| AppError::internal(format!("failed to flush bill store: {err}")))?;

        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<BillRecord, AppError> {
        let tree = self.tree.clone();
        let key = id.as_bytes().to_vec();
        let id_owned = id.to_string();

        task::spawn_blocking(move || -> Result<BillRecord, AppError> {
            let maybe_bytes = tree
                .get(&key)
                .map_err(|err| AppError::internal(format!("bill lookup failed: {err}")))?;

            let bytes = maybe_bytes
                .ok_or_else(|| AppError::not_found(format!("no bill with id {id_owned}")))?;

            serde_json::from_slice(&bytes)
                .map_err(|err| AppError::internal(format!("failed to decode bill record: {err}")))
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))?
    }

    /// Returns records matching the filter; both fields are exact-match and
    /// AND-combined. Ordering follows key order and is not part of the
    /// contract.
    pub async fn list(&self, filter: BillFilter) -> Result<Vec<BillRecord>, AppError> {
        self.scan(move |record| {
            if let Some(category) = filter.category {
                if record.category != category {
                    return false;
                }
            }
            if let Some(status) = &filter.status {
                if record.status.as_deref() != Some(status.as_str()) {
                    return false;
                }
            }
            true
        })
        .await
    }

    /// Case-insensitive title substring match; empty text matches everything.
    pub async fn search(&self, text: &str) -> Result<Vec<BillRecord>, AppError> {
        let needle = text.to_lowercase();
        self.scan(move |record| record.title.to_lowercase().contains(&needle))
            .await
    }

    async fn scan<F>(&self, predicate: F) -> Result<Vec<BillRecord>, AppError>
    where
        F: Fn(&BillRecord) -> bool + Send + 'static,
    {
        let tree = self.tree.clone();

        task::spawn_blocking(move || -> Result<Vec<BillRecord>, AppError> {
            let mut records = Vec::new();
            for entry in tree.iter() {
                let (_, bytes) = entry
                    .map_err(|err| AppError::internal(format!("bill scan failed: {err}")))?;
                let record: BillRecord = serde_json::from_slice(&bytes).map_err(|err| {
                    AppError::internal(format!("failed to decode bill record: {err}"))
                })?;

                if predicate(&record) {
                    records.push(record);
                }
            }

            Ok(records)
        })
        .await
        .map_err(|err| AppError::internal(format!("store task join error: {err}")))?
    }
}
