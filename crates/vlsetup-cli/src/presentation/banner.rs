//! Welcome banner shown when a setup run starts.

use super::panels::render_panel;

pub fn render_banner() -> Vec<String> {
    render_panel(
        "vlsetup",
        &[
            "VideoLingo environment setup".to_string(),
            format!("version {}", env!("CARGO_PKG_VERSION")),
            String::new(),
            "Installs Python dependencies, writes the app config".to_string(),
            "and starts the web UI when everything is ready.".to_string(),
        ],
    )
}
