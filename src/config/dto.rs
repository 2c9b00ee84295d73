use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub db_path: String,
    pub congress_api_key: String,
    pub congress_api_base: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_model: String,
    pub admin_api_key: Option<String>,
    pub disable_proxy: bool,
}
