//! Meme URL synthesis.
//!
//! Pure mapping from (template reference, top text, bottom text) to the URL that
//! renders the composed image. Needs no catalog: callers pass an already-resolved
//! template key or an external image URL.

mod classify;
mod encode;

pub use classify::{classify_template_ref, has_uri_scheme, TemplateRef};
pub use encode::{encode_segment, normalize_line, text_segment};

use crate::config::MgenConfig;

/// Endpoints and fallbacks the synthesizer needs, borrowed from [`MgenConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SynthSettings<'a> {
    pub render_endpoint: &'a str,
    pub default_template: &'a str,
    pub placeholder_image_url: &'a str,
    pub blank_sentinel: &'a str,
}

impl<'a> From<&'a MgenConfig> for SynthSettings<'a> {
    fn from(cfg: &'a MgenConfig) -> Self {
        Self {
            render_endpoint: &cfg.render_endpoint,
            default_template: &cfg.default_template,
            placeholder_image_url: &cfg.placeholder_image_url,
            blank_sentinel: &cfg.blank_sentinel,
        }
    }
}

/// Builds the output URL.
///
/// - External refs (scheme-prefixed) are returned unchanged; text is ignored.
/// - Catalog keys give `{render_endpoint}/{key}/{top}/{bottom}.png`.
/// - No template: the default template if any line has text, else the placeholder image.
///
/// # Examples
///
/// - `synthesize(s, Some("DOGE"), "hello world", "")` → `".../images/doge/hello%20world/_.png"`
/// - `synthesize(s, None, "", " ")` → the placeholder image URL
pub fn synthesize(
    settings: SynthSettings<'_>,
    template_ref: Option<&str>,
    top: &str,
    bottom: &str,
) -> String {
    match classify_template_ref(template_ref) {
        TemplateRef::External(url) => url.to_string(),
        TemplateRef::Key(key) => render_url(settings, &key, top, bottom),
        TemplateRef::None => {
            if normalize_line(top).is_none() && normalize_line(bottom).is_none() {
                tracing::debug!("no template and no text; using placeholder image");
                return settings.placeholder_image_url.to_string();
            }
            tracing::debug!(
                "no template selected; falling back to default template {}",
                settings.default_template
            );
            let key = settings.default_template.trim().to_lowercase();
            render_url(settings, &key, top, bottom)
        }
    }
}

fn render_url(settings: SynthSettings<'_>, key: &str, top: &str, bottom: &str) -> String {
    format!(
        "{}/{}/{}/{}.png",
        settings.render_endpoint.trim_end_matches('/'),
        encode_segment(key),
        text_segment(top, settings.blank_sentinel),
        text_segment(bottom, settings.blank_sentinel),
    )
}
