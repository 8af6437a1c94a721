use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub review_api_url: String,
    pub template_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let review_api_url = std::env::var("REVIEW_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        reqwest::Url::parse(&review_api_url)
            .map_err(|e| format!("REVIEW_API_URL is not a valid URL ({}): {}", review_api_url, e))?;

        let template_dir =
            PathBuf::from(std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()));

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5002".to_string())
            .parse()
            .unwrap_or(5002);

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Self {
            review_api_url,
            template_dir,
            host,
            port,
            max_upload_bytes,
        })
    }
}
