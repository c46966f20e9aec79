use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String, config: AppConfig) -> Result<()> {
    tracing::debug!("Starting {} with {:?}", config.app_title, config.static_path);
    api::serve(host, port, config).await
}
