use std::env;

use crate::config::dto::AppConfig;
use crate::core::error::AppError;

const DEFAULT_CONGRESS_BASE: &str = "https://api.congress.gov/v3";
const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();

    let port = env::var("BILL_TRACKER_PORT")
        .or_else(|_| env::var("PORT"))
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .map_err(|err| AppError::configuration(format!("invalid port: {err}")))?;

    let db_path = env::var("BILL_DB_PATH").unwrap_or_else(|_| "bills_db".to_string());

    let congress_api_key = env::var("CONGRESS_API_KEY")
        .map_err(|_| AppError::configuration("CONGRESS_API_KEY is required".to_string()))?;
    let congress_api_base = trimmed_base_env("CONGRESS_API_BASE", DEFAULT_CONGRESS_BASE);

    let openai_api_key = env::var("OPENAI_API_KEY")
        .map_err(|_| AppError::configuration("OPENAI_API_KEY is required".to_string()))?;
    let openai_api_base = trimmed_base_env("OPENAI_API_BASE", DEFAULT_OPENAI_BASE);
    let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let admin_api_key = env::var("ADMIN_API_KEY")
        .ok()
        .filter(|value| !value.trim().is_empty());

    let disable_proxy = parse_bool_env("BILL_TRACKER_DISABLE_PROXY", false);

    Ok(AppConfig {
        port,
        db_path,
        congress_api_key,
        congress_api_base,
        openai_api_key,
        openai_api_base,
        openai_model,
        admin_api_key,
        disable_proxy,
    })
}

fn trimmed_base_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|value| matches!(value.as_str(), "true" | "1" | "TRUE" | "True"))
        .unwrap_or(default)
}
