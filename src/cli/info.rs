use crate::core::AppConfig;

pub fn run(config: &AppConfig) {
    println!("{} v{}", config.app_title, env!("CARGO_PKG_VERSION"));
    println!("Default year: {}", config.default_year);
    println!("Static files: {}", config.static_path);
    println!("OAuth redirect URI: {}", config.redirect_uri);
    if config.google_client_id.is_empty() {
        println!("Google client: not configured");
    } else {
        println!("Google client: {}", config.google_client_id);
    }
}
