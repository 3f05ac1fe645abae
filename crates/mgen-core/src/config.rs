use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP transfer parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer (catalog or image).
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/mgen/config.toml`.
///
/// Holds every endpoint and fallback the synthesizer, loader and download agent
/// need; components receive it at construction instead of reading constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MgenConfig {
    /// Catalog endpoint returning a JSON array of template descriptors.
    pub catalog_endpoint: String,
    /// Base of the render endpoint; images live at `{render_endpoint}/{key}/{top}/{bottom}.png`.
    pub render_endpoint: String,
    /// Template key used when text is entered but no template is selected.
    pub default_template: String,
    /// Static image shown when neither a template nor any text is present.
    pub placeholder_image_url: String,
    /// Token the render service draws as an empty line.
    pub blank_sentinel: String,
    /// Filename suggested for downloaded images.
    pub download_filename: String,
    /// Template selected when a session starts (None = nothing selected).
    #[serde(default)]
    pub initial_template: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for MgenConfig {
    fn default() -> Self {
        Self {
            catalog_endpoint: "https://api.memegen.link/templates".to_string(),
            render_endpoint: "https://api.memegen.link/images".to_string(),
            default_template: "noidea".to_string(),
            placeholder_image_url:
                "https://api.memegen.link/images/noidea/highly_professional/meme_generator.jpg"
                    .to_string(),
            blank_sentinel: "_".to_string(),
            download_filename: "meme_image.png".to_string(),
            initial_template: Some("doge".to_string()),
            http: HttpConfig::default(),
        }
    }
}

impl MgenConfig {
    /// Checks that endpoints are absolute URLs and required tokens are non-empty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("catalog_endpoint", &self.catalog_endpoint),
            ("render_endpoint", &self.render_endpoint),
            ("placeholder_image_url", &self.placeholder_image_url),
        ] {
            url::Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", name, value))?;
        }
        if self.default_template.trim().is_empty() {
            anyhow::bail!("default_template must not be empty");
        }
        if self.blank_sentinel.is_empty() {
            anyhow::bail!("blank_sentinel must not be empty");
        }
        if self.download_filename.trim().is_empty() {
            anyhow::bail!("download_filename must not be empty");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MgenConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MgenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<MgenConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: MgenConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
