// ── Tag-list input ──
//
// A free-text buffer that turns into a unique, insertion-ordered list of
// strings. Used for domains, entity types and excluded entities.

/// Keys the field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
    Other,
}

/// What a key press did to the surrounding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Enter never submits the enclosing form.
    pub prevent_default: bool,
    pub added: Option<AddOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Already present; list unchanged, buffer cleared.
    Duplicate,
    /// Blank buffer; nothing changed.
    Empty,
}

/// A rendered list entry with its removal affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBadge {
    pub value: String,
    pub remove_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    values: Vec<String>,
    buffer: String,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing values. Duplicates in the input collapse.
    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = Self::new();
        for value in values {
            input.push(value);
        }
        input
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Whether the "Add" action is available.
    pub fn can_add(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Commit the buffer.
    pub fn add(&mut self) -> AddOutcome {
        let value = self.buffer.trim();
        if value.is_empty() {
            return AddOutcome::Empty;
        }

        let outcome = if self.values.iter().any(|v| v == value) {
            AddOutcome::Duplicate
        } else {
            self.values.push(value.to_owned());
            AddOutcome::Added
        };
        self.buffer.clear();
        outcome
    }

    /// Replace the buffer with `text` and commit it.
    pub fn push(&mut self, text: impl Into<String>) -> AddOutcome {
        self.set_buffer(text);
        self.add()
    }

    /// Remove every entry equal to `value`. Returns whether anything went.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.values.len();
        self.values.retain(|v| v != value);
        self.values.len() != before
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => KeyOutcome {
                prevent_default: true,
                added: Some(self.add()),
            },
            Key::Char(c) => {
                self.buffer.push(c);
                KeyOutcome::passthrough()
            }
            Key::Backspace => {
                self.buffer.pop();
                KeyOutcome::passthrough()
            }
            Key::Other => KeyOutcome::passthrough(),
        }
    }

    pub fn badges(&self) -> Vec<TagBadge> {
        self.values
            .iter()
            .map(|value| TagBadge {
                value: value.clone(),
                remove_label: format!("Remove {value}"),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyOutcome {
    fn passthrough() -> Self {
        Self {
            prevent_default: false,
            added: None,
        }
    }
}

impl From<Option<Vec<String>>> for TagInput {
    fn from(values: Option<Vec<String>>) -> Self {
        Self::with_values(values.unwrap_or_default())
    }
}
