//! The line the host types into before submitting it.

/// Pending input text.
///
/// Cursor movement and completion belong to the UI layer; the console only
/// needs to read the text and clear it after a submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Take the text, leaving the line empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
