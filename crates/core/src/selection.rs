//! Template selection state and keyboard navigation.

/// Navigation command mapped from the host's keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Prev,
    Next,
}

/// True for focus targets where arrow keys mean cursor movement, not
/// gallery navigation.
pub fn is_text_input_focus(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_lowercase().as_str(),
        "input" | "textarea" | "select"
    )
}

/// Holds the current template index and clamps all movement to the catalog
/// bounds. With an empty catalog there is no selection and every operation
/// is a no-op.
#[derive(Debug, Clone)]
pub struct SelectionController {
    len: usize,
    current: usize,
}

impl SelectionController {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    /// Select `index`, clamped to `[0, len - 1]`. Returns the index that is
    /// now selected, or `None` for an empty catalog.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.current = index.min(self.len - 1);
        Some(self.current)
    }

    /// Move one template back. No-op (returns `None`) at the first template.
    pub fn prev(&mut self) -> Option<usize> {
        if self.len == 0 || self.current == 0 {
            return None;
        }
        self.select(self.current - 1)
    }

    /// Move one template forward. No-op (returns `None`) at the last one.
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 || self.current + 1 >= self.len {
            return None;
        }
        self.select(self.current + 1)
    }

    /// Apply a navigation key. Suppressed entirely while focus sits in a
    /// text-input-like control, so typing is never intercepted.
    pub fn handle_key(&mut self, key: NavKey, focus_in_text_input: bool) -> Option<usize> {
        if focus_in_text_input {
            return None;
        }
        match key {
            NavKey::Prev => self.prev(),
            NavKey::Next => self.next(),
        }
    }
}
