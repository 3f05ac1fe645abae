//! Template reference classification.

/// What a template reference string points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRef<'a> {
    /// Nothing selected (absent or blank).
    None,
    /// Fully-qualified external image; used as-is.
    External(&'a str),
    /// Catalog key, already lowercased.
    Key(String),
}

/// Returns true when `s` begins with an RFC 3986 scheme followed by `:`.
///
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`
pub fn has_uri_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// Classifies an optional template reference.
pub fn classify_template_ref(template_ref: Option<&str>) -> TemplateRef<'_> {
    let Some(raw) = template_ref.map(str::trim).filter(|s| !s.is_empty()) else {
        return TemplateRef::None;
    };
    if has_uri_scheme(raw) {
        TemplateRef::External(raw)
    } else {
        TemplateRef::Key(raw.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_schemes() {
        assert!(has_uri_scheme("https://example.com/a.png"));
        assert!(has_uri_scheme("http://x"));
        assert!(has_uri_scheme("data:image/png;base64,AAAA"));
        assert!(has_uri_scheme("svn+ssh://host/repo"));
    }

    #[test]
    fn rejects_non_schemes() {
        assert!(!has_uri_scheme("doge"));
        assert!(!has_uri_scheme(""));
        assert!(!has_uri_scheme(":nothing"));
        assert!(!has_uri_scheme("1http://x"));
        assert!(!has_uri_scheme("two words:x"));
    }

    #[test]
    fn classify_variants() {
        assert_eq!(classify_template_ref(None), TemplateRef::None);
        assert_eq!(classify_template_ref(Some("   ")), TemplateRef::None);
        assert_eq!(
            classify_template_ref(Some("DoGe")),
            TemplateRef::Key("doge".to_string())
        );
        assert_eq!(
            classify_template_ref(Some("https://i.example.com/Cat.JPG")),
            TemplateRef::External("https://i.example.com/Cat.JPG")
        );
    }
}
