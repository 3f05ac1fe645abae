//! Selection record and its transition function.

use crate::config::MgenConfig;

/// The three user inputs. Each update yields a new record built from the full
/// prior one, so a derivation always sees the latest value of every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_template_id: Option<String>,
    pub top_text: String,
    pub bottom_text: String,
}

/// A single user input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Select a template by id or external URL; `None` or blank clears the selection.
    SelectTemplate(Option<String>),
    SetTopText(String),
    SetBottomText(String),
}

impl SelectionState {
    /// Session start: the configured initial template and empty text.
    pub fn initial(cfg: &MgenConfig) -> Self {
        Self::default().apply(Action::SelectTemplate(cfg.initial_template.clone()))
    }

    /// Returns the state after `action`. Fields the action does not name are carried over.
    pub fn apply(&self, action: Action) -> Self {
        match action {
            Action::SelectTemplate(id) => Self {
                selected_template_id: id
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                ..self.clone()
            },
            Action::SetTopText(top_text) => Self {
                top_text,
                ..self.clone()
            },
            Action::SetBottomText(bottom_text) => Self {
                bottom_text,
                ..self.clone()
            },
        }
    }
}
