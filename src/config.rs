use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::path::PathBuf;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub max_file_size: usize,
    pub openai_key: String,
    pub model: String,
    pub upload_dir: PathBuf,
}

pub fn load_config() -> Result<Config> {
    // Load .env file first
    dotenv().ok();

    // Then load the OpenAI key
    let openai_key = std::env::var("OPENAI_API_KEY")
        .map_err(|e| anyhow::anyhow!("Failed to load OPENAI_API_KEY: {}", e))?;

    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let upload_dir = std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"));

    let max_file_size = std::env::var("MAX_FILE_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(default_max_file_size);

    Ok(Config {
        max_file_size,
        openai_key,
        model,
        upload_dir,
    })
}
