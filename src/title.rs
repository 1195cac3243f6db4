//! Inline-editable display title.
//!
//! Small state machine: `Viewing` → `Editing` on an edit trigger, back to
//! `Viewing` on commit or cancel. The committed value is persisted per
//! dataset by the caller; a short-lived "saved" acknowledgment is shown
//! after each commit.

/// Fixed default shown when no title was persisted for a dataset.
pub const DEFAULT_TITLE: &str = "Untitled";

/// How long the saved acknowledgment stays visible.
pub const SAVED_ACK_MS: f64 = 2000.0;

/// Edit actions available without pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAction {
    Commit,
    Cancel,
}

/// Map a key name (DOM `KeyboardEvent.key`) to a title edit action.
pub fn action_for_key(key: &str) -> Option<TitleAction> {
    match key {
        "Enter" => Some(TitleAction::Commit),
        "Escape" => Some(TitleAction::Cancel),
        _ => None,
    }
}

/// State machine for the per-dataset display title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleEditor {
    committed: String,
    draft: String,
    editing: bool,
    /// Timestamp of the last save, kept while the ack is showing.
    saved_at: Option<f64>,
}

impl Default for TitleEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleEditor {
    pub fn new() -> Self {
        Self {
            committed: DEFAULT_TITLE.to_string(),
            draft: String::new(),
            editing: false,
            saved_at: None,
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// True while the post-save acknowledgment should be visible.
    pub fn saved_ack(&self) -> bool {
        self.saved_at.is_some()
    }

    /// Load the committed title for a newly imported dataset.
    ///
    /// Always returns to `Viewing`; an empty or absent persisted value falls
    /// back to the fixed default.
    pub fn load(&mut self, persisted: Option<String>) {
        self.committed = persisted
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        self.draft.clear();
        self.editing = false;
        self.saved_at = None;
    }

    /// Reset to the blank state (no dataset loaded).
    pub fn clear(&mut self) {
        self.committed.clear();
        self.draft.clear();
        self.editing = false;
        self.saved_at = None;
    }

    /// Enter `Editing` with the draft seeded from the committed title.
    pub fn begin_edit(&mut self) {
        self.draft = self.committed.clone();
        self.editing = true;
        self.saved_at = None;
    }

    /// Mutate the draft while editing. Ignored in `Viewing`.
    pub fn set_draft(&mut self, draft: &str) {
        if self.editing {
            self.draft = draft.to_string();
        }
    }

    /// Commit the draft: trimmed draft becomes the committed title, state
    /// returns to `Viewing`, and the saved ack starts.
    ///
    /// Returns the new committed title when a commit happened (the caller
    /// notifies persistence exactly once per commit), `None` in `Viewing`.
    pub fn save(&mut self, now_ms: f64) -> Option<String> {
        if !self.editing {
            return None;
        }
        self.committed = self.draft.trim().to_string();
        self.draft.clear();
        self.editing = false;
        self.saved_at = Some(now_ms);
        Some(self.committed.clone())
    }

    /// Discard the draft and return to `Viewing`. No persistence call.
    pub fn cancel(&mut self) {
        self.draft.clear();
        self.editing = false;
        self.saved_at = None;
    }

    /// Expire the saved ack once [`SAVED_ACK_MS`] has elapsed.
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(saved_at) = self.saved_at {
            if now_ms - saved_at >= SAVED_ACK_MS {
                self.saved_at = None;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_keeps_committed() {
        let mut editor = TitleEditor::new();
        editor.load(Some("Quarterly".to_string()));
        editor.begin_edit();
        editor.set_draft("scratch");
        editor.cancel();
        assert_eq!(editor.committed(), "Quarterly");
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_save_trims_and_acks() {
        let mut editor = TitleEditor::new();
        editor.begin_edit();
        editor.set_draft("  Sales 2026  ");
        let committed = editor.save(1000.0);
        assert_eq!(committed.as_deref(), Some("Sales 2026"));
        assert!(editor.saved_ack());
        editor.tick(2999.0);
        assert!(editor.saved_ack());
        editor.tick(3000.0);
        assert!(!editor.saved_ack());
    }

    #[test]
    fn test_save_in_viewing_is_noop() {
        let mut editor = TitleEditor::new();
        assert_eq!(editor.save(0.0), None);
        assert!(!editor.saved_ack());
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(action_for_key("Enter"), Some(TitleAction::Commit));
        assert_eq!(action_for_key("Escape"), Some(TitleAction::Cancel));
        assert_eq!(action_for_key("a"), None);
    }
}
