// ── Confirmation dialog ──
//
// Caller-owned state machine for destructive actions:
//
//   Closed ──open──▶ Open ──confirm──▶ Confirming ──finish(true)──▶ Closed
//                     ▲                    │
//                     └────finish(false)───┘
//
// The dialog never runs the action itself; the caller confirms, performs
// the mutation and reports the outcome with `finish`.

use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogConfig {
    pub title: String,
    pub description: String,
}

impl DialogConfig {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Partial update applied with [`ConfirmDialog::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DialogState {
    Closed,
    Open,
    Confirming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("dialog is not open")]
    NotOpen,
    #[error("confirmation already in progress")]
    Busy,
    #[error("no confirmation in progress")]
    NotConfirming,
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmDialog {
    state: Option<Phase>,
    config: DialogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Open,
    Confirming,
}

impl ConfirmDialog {
    /// A closed dialog remembering `config` for the next plain `open`.
    pub fn with_config(config: DialogConfig) -> Self {
        Self {
            state: None,
            config,
        }
    }

    pub fn state(&self) -> DialogState {
        match self.state {
            None => DialogState::Closed,
            Some(Phase::Open) => DialogState::Open,
            Some(Phase::Confirming) => DialogState::Confirming,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == Some(Phase::Confirming)
    }

    /// Label of the destructive button.
    pub fn confirm_label(&self) -> &'static str {
        if self.is_loading() { "Deleting..." } else { "Confirm" }
    }

    /// Open, optionally replacing the stored config. Re-opening an open
    /// dialog only swaps the config.
    pub fn open(&mut self, config: Option<DialogConfig>) -> Result<(), DialogError> {
        if self.is_loading() {
            return Err(DialogError::Busy);
        }
        if let Some(config) = config {
            self.config = config;
        }
        self.state = Some(Phase::Open);
        Ok(())
    }

    /// Dismiss. Closing an already closed dialog is a no-op.
    pub fn close(&mut self) -> Result<(), DialogError> {
        if self.is_loading() {
            return Err(DialogError::Busy);
        }
        self.state = None;
        Ok(())
    }

    /// Merge `patch` into the current config. Allowed in every state.
    pub fn update(&mut self, patch: DialogPatch) {
        if let Some(title) = patch.title {
            self.config.title = title;
        }
        if let Some(description) = patch.description {
            self.config.description = description;
        }
    }

    /// User pressed Confirm. The caller now runs the action.
    pub fn confirm(&mut self) -> Result<&DialogConfig, DialogError> {
        match self.state {
            Some(Phase::Open) => {
                self.state = Some(Phase::Confirming);
                Ok(&self.config)
            }
            Some(Phase::Confirming) => Err(DialogError::Busy),
            None => Err(DialogError::NotOpen),
        }
    }

    /// Report the action outcome: success closes, failure reopens.
    pub fn finish(&mut self, success: bool) -> Result<DialogState, DialogError> {
        if !self.is_loading() {
            return Err(DialogError::NotConfirming);
        }
        self.state = if success { None } else { Some(Phase::Open) };
        Ok(self.state())
    }
}
