use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default backend address, matching the Flask server's bind.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

const CONFIG_FILE: &str = "solvechat.toml";

/// Canned messages offered by `/suggest`; each submits verbatim as if typed.
const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Solve 2x + 5 = 15",
    "What is the derivative of x^2?",
    "Convert 100 fahrenheit to celsius",
    "Why does the sky appear blue?",
];

/// Optional on-disk configuration (`solvechat.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub suggestions: Option<Vec<String>>,
}

/// Resolved client configuration: CLI flag / env var over the config file
/// over built-in defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub suggestions: Vec<String>,
}

impl ClientConfig {
    pub fn resolve(flag_url: Option<String>, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => load_file_config(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    load_file_config(default_path)
                        .with_context(|| format!("Failed to load {}", CONFIG_FILE))?
                } else {
                    FileConfig::default()
                }
            }
        };

        let api_url = flag_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let suggestions = file.suggestions.unwrap_or_else(|| {
            DEFAULT_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            suggestions,
        })
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// Normalize a base URL: default to http, strip trailing slashes so
/// endpoint paths join cleanly.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
