//! Form submission state

use serde::Serialize;

/// Per-form submission state
///
/// `Idle → Submitting → (Success | Error)`. An error is never terminal:
/// the next edit or submit returns the form to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Message to show next to the form, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// A form that can be opened, submitted and closed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormPanel {
    open: bool,
    /// Record being edited; `None` on the create path
    editing: Option<String>,
    state: FormState,
}

impl FormPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Open for creating a new record
    pub fn open(&mut self) {
        self.open = true;
        self.editing = None;
        self.state = FormState::Idle;
    }

    /// Open prefilled for the record with `id`
    pub fn open_for(&mut self, id: impl Into<String>) {
        self.open = true;
        self.editing = Some(id.into());
        self.state = FormState::Idle;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.state = FormState::Idle;
    }

    /// User changed an input; clears a previous error
    pub fn edited(&mut self) {
        if matches!(self.state, FormState::Error(_)) {
            self.state = FormState::Idle;
        }
    }

    /// Enter `Submitting`; concurrent submissions are not serialized
    pub fn begin_submit(&mut self) {
        self.state = FormState::Submitting;
    }

    /// Record a failure; the panel stays open
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = FormState::Error(message.into());
    }

    /// Record a success and close the panel
    pub fn succeed(&mut self) {
        self.open = false;
        self.editing = None;
        self.state = FormState::Success;
    }
}
