pub mod dto;
pub mod handler;
pub mod store;

pub use dto::{
    BillFilter, BillRecord, Category, DetailedBillRecord, ListBillsParams, RefreshBillsParams,
    RefreshBillsResponse, SearchBillsParams,
};
pub use handler::{
    handle_analyze_bill, handle_get_bill, handle_healthcheck, handle_list_bills,
    handle_refresh_bill, handle_refresh_bills, handle_search_bills,
};
pub use store::BillStore;
