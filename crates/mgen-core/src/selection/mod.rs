//! Selection state controller.
//!
//! Owns the selected template, the two text lines and the derived output URL.
//! Every mutator applies one [`Action`] to the full prior [`SelectionState`] and
//! re-synthesizes from the resulting record before returning, so the output URL
//! never lags behind an input.

mod state;

pub use state::{Action, SelectionState};

use crate::catalog::{Catalog, TemplateDescriptor};
use crate::config::MgenConfig;
use crate::synth::{self, has_uri_scheme, SynthSettings};

#[derive(Debug, Clone)]
pub struct SelectionController {
    cfg: MgenConfig,
    catalog: Catalog,
    state: SelectionState,
    output_url: String,
}

impl SelectionController {
    /// Starts a session from the configured initial selection.
    pub fn new(cfg: MgenConfig, catalog: Catalog) -> Self {
        let state = SelectionState::initial(&cfg);
        Self::with_state(cfg, catalog, state)
    }

    pub fn with_state(cfg: MgenConfig, catalog: Catalog, state: SelectionState) -> Self {
        let mut controller = Self {
            cfg,
            catalog,
            state,
            output_url: String::new(),
        };
        controller.resynthesize();
        controller
    }

    /// Selects a template by catalog id or external image URL. A blank id clears the selection.
    pub fn set_selected_template(&mut self, id: impl Into<String>) -> &str {
        self.dispatch(Action::SelectTemplate(Some(id.into())))
    }

    pub fn clear_selected_template(&mut self) -> &str {
        self.dispatch(Action::SelectTemplate(None))
    }

    pub fn set_top_text(&mut self, text: impl Into<String>) -> &str {
        self.dispatch(Action::SetTopText(text.into()))
    }

    pub fn set_bottom_text(&mut self, text: impl Into<String>) -> &str {
        self.dispatch(Action::SetBottomText(text.into()))
    }

    /// Applies `action` and returns the new output URL.
    pub fn dispatch(&mut self, action: Action) -> &str {
        if let Action::SelectTemplate(Some(id)) = &action {
            self.warn_if_unknown(id);
        }
        self.state = self.state.apply(action);
        self.resynthesize();
        &self.output_url
    }

    /// Installs the fetched catalog. The output URL is re-derived since template
    /// resolution depends on it.
    pub fn attach_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.resynthesize();
    }

    pub fn output_url(&self) -> &str {
        &self.output_url
    }

    /// Owned copy of the current output URL, for work that outlives this borrow (downloads).
    pub fn snapshot_url(&self) -> String {
        self.output_url.clone()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MgenConfig {
        &self.cfg
    }

    /// Catalog entry for the current selection, if the catalog knows it.
    pub fn selected_template(&self) -> Option<&TemplateDescriptor> {
        self.state
            .selected_template_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    /// The template reference handed to the synthesizer: the catalog's canonical id
    /// on a hit, otherwise the raw selection (external URL, or a key the catalog
    /// does not list or has not loaded yet).
    fn resolved_template_ref(&self) -> Option<&str> {
        let raw = self.state.selected_template_id.as_deref()?;
        if has_uri_scheme(raw) {
            return Some(raw);
        }
        match self.catalog.get(raw) {
            Some(t) => Some(t.id.as_str()),
            None => Some(raw),
        }
    }

    fn resynthesize(&mut self) {
        let url = synth::synthesize(
            SynthSettings::from(&self.cfg),
            self.resolved_template_ref(),
            &self.state.top_text,
            &self.state.bottom_text,
        );
        tracing::debug!("output url: {}", url);
        self.output_url = url;
    }

    fn warn_if_unknown(&self, id: &str) {
        let id = id.trim();
        if id.is_empty() || self.catalog.is_empty() || has_uri_scheme(id) {
            return;
        }
        if self.catalog.get(id).is_none() {
            tracing::warn!("template {} is not in the catalog; using it as a raw key", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            br#"[
                {"id": "doge", "name": "Doge", "blank": "https://api.memegen.link/images/doge.png"},
                {"id": "fry", "name": "Futurama Fry", "blank": "https://api.memegen.link/images/fry.png"}
            ]"#,
        )
        .unwrap()
    }

    fn no_initial() -> MgenConfig {
        MgenConfig {
            initial_template: None,
            ..MgenConfig::default()
        }
    }

    #[test]
    fn initial_selection_renders_blank_template() {
        let c = SelectionController::new(MgenConfig::default(), catalog());
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/doge/_/_.png"
        );
        assert_eq!(c.selected_template().map(|t| t.display_name.as_str()), Some("Doge"));
    }

    #[test]
    fn nothing_selected_shows_placeholder() {
        let c = SelectionController::new(no_initial(), catalog());
        assert_eq!(c.output_url(), c.config().placeholder_image_url);
    }

    #[test]
    fn catalog_example_sequence() {
        let mut c = SelectionController::new(no_initial(), catalog());
        c.set_selected_template("doge");
        c.set_top_text("hello world");
        c.set_bottom_text("");
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/doge/hello%20world/_.png"
        );
    }

    #[test]
    fn text_then_template_keeps_text() {
        let mut c = SelectionController::new(no_initial(), catalog());
        c.set_top_text("X");
        let url = c.set_selected_template("doge").to_string();
        assert!(url.contains("/doge/"));
        assert!(url.contains("/X/"));
        assert_eq!(url, "https://api.memegen.link/images/doge/X/_.png");
    }

    #[test]
    fn template_change_keeps_both_lines() {
        let mut c = SelectionController::new(MgenConfig::default(), catalog());
        c.set_top_text("top");
        c.set_bottom_text("bottom");
        c.set_selected_template("FRY");
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/fry/top/bottom.png"
        );
        c.set_top_text("new top");
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/fry/new%20top/bottom.png"
        );
    }

    #[test]
    fn no_template_with_text_uses_default() {
        let mut c = SelectionController::new(no_initial(), Catalog::empty());
        c.set_top_text("hi");
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/noidea/hi/_.png"
        );
        c.set_top_text("   ");
        assert_eq!(c.output_url(), c.config().placeholder_image_url);
    }

    #[test]
    fn clearing_template_falls_back() {
        let mut c = SelectionController::new(MgenConfig::default(), catalog());
        c.set_bottom_text("wow");
        c.clear_selected_template();
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/noidea/_/wow.png"
        );
        c.set_selected_template("doge");
        c.set_selected_template("");
        assert!(c.state().selected_template_id.is_none());
    }

    #[test]
    fn external_selection_ignores_text() {
        let mut c = SelectionController::new(no_initial(), catalog());
        c.set_top_text("ignored");
        c.set_selected_template("https://i.example.com/cat.jpg");
        assert_eq!(c.output_url(), "https://i.example.com/cat.jpg");
        c.set_bottom_text("still ignored");
        assert_eq!(c.output_url(), "https://i.example.com/cat.jpg");
        assert!(c.selected_template().is_none());
    }

    #[test]
    fn empty_catalog_uses_raw_key() {
        let mut c = SelectionController::new(no_initial(), Catalog::empty());
        c.set_selected_template("Unknown_Key");
        c.set_top_text("a");
        assert_eq!(
            c.output_url(),
            "https://api.memegen.link/images/unknown%5Fkey/a/_.png"
        );
        assert!(c.selected_template().is_none());
    }

    #[test]
    fn attaching_catalog_rederives_url() {
        let mut c = SelectionController::new(MgenConfig::default(), Catalog::empty());
        c.set_top_text("late");
        let before = c.snapshot_url();
        c.attach_catalog(catalog());
        assert_eq!(c.output_url(), before);
        assert!(c.selected_template().is_some());
    }

    #[test]
    fn snapshot_is_independent_of_later_changes() {
        let mut c = SelectionController::new(MgenConfig::default(), catalog());
        c.set_top_text("first");
        let snapshot = c.snapshot_url();
        c.set_top_text("second");
        assert!(snapshot.contains("/first/"));
        assert!(c.output_url().contains("/second/"));
    }

    #[test]
    fn dispatch_matches_mutators() {
        let mut a = SelectionController::new(MgenConfig::default(), catalog());
        let mut b = a.clone();
        a.set_top_text("t");
        a.set_selected_template("fry");
        b.dispatch(Action::SetTopText("t".into()));
        b.dispatch(Action::SelectTemplate(Some("fry".into())));
        assert_eq!(a.output_url(), b.output_url());
        assert_eq!(a.state(), b.state());
    }
}
