//! `mgen templates` – list the catalog.
//!
//! A catalog that cannot be loaded is reported and listed as empty; it never
//! fails the command.

use anyhow::Result;
use mgen_core::catalog::{self, Catalog, TemplateOption};
use mgen_core::config::MgenConfig;

/// One line per picker entry: `value  label  icon`. The "no template" entry
/// shows `-` as its value.
pub(crate) fn format_options(options: &[TemplateOption]) -> Vec<String> {
    let width = options
        .iter()
        .map(|o| o.value.len().max(1))
        .max()
        .unwrap_or(1);
    options
        .iter()
        .map(|o| {
            let value = if o.value.is_empty() { "-" } else { o.value.as_str() };
            format!("{:<width$}  {}  {}", value, o.label, o.icon)
        })
        .collect()
}

pub(crate) fn print_options(catalog: &Catalog, cfg: &MgenConfig) {
    for line in format_options(&catalog.options(cfg)) {
        println!("{}", line);
    }
}

pub async fn run_templates(cfg: &MgenConfig) -> Result<()> {
    let catalog = match catalog::load_templates(cfg).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("{}; continuing with an empty catalog", e);
            eprintln!("could not load templates from {}: {}", cfg.catalog_endpoint, e);
            Catalog::empty()
        }
    };
    if catalog.is_empty() {
        println!("No templates.");
    }
    print_options(&catalog, cfg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgen_core::config::HttpConfig;

    #[test]
    fn options_list_no_template_entry_first() {
        let cfg = MgenConfig::default();
        let catalog = Catalog::from_json(
            br#"[{"id": "doge", "name": "Doge", "blank": "https://x/doge.png"}]"#,
        )
        .unwrap();
        let lines = format_options(&catalog.options(&cfg));
        assert_eq!(
            lines,
            vec![
                format!("-     Choose meme  {}", cfg.placeholder_image_url),
                "doge  Doge  https://x/doge.png".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn unreachable_catalog_is_not_fatal() {
        let cfg = MgenConfig {
            catalog_endpoint: "http://127.0.0.1:9/templates".to_string(),
            http: HttpConfig {
                connect_timeout_secs: 2,
                timeout_secs: 2,
            },
            ..MgenConfig::default()
        };
        assert!(run_templates(&cfg).await.is_ok());
    }
}
