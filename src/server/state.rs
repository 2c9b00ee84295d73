use std::sync::Arc;

use crate::features::analysis::AnalysisService;
use crate::features::bills::BillStore;
use crate::features::congress::BillSource;

#[derive(Clone)]
pub struct AppState {
    pub bill_source: Arc<dyn BillSource>,
    pub store: Arc<BillStore>,
    pub analysis: Arc<AnalysisService>,
    pub admin_api_key: Option<Arc<String>>,
}

impl AppState {
    pub fn new(
        bill_source: Arc<dyn BillSource>,
        store: Arc<BillStore>,
        analysis: Arc<AnalysisService>,
        admin_api_key: Option<String>,
    ) -> Self {
        Self {
            bill_source,
            store,
            analysis,
            admin_api_key: admin_api_key.map(Arc::new),
        }
    }
}
