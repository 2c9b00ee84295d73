pub mod auth;
pub mod state;

pub use auth::require_admin_key;
pub use state::AppState;
