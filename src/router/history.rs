//! Navigation history for back-navigation between views

/// Upper bound on remembered entries
const MAX_ENTRIES: usize = 64;

/// Stack of visited fragments, newest last
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visited fragment. Re-visiting the current entry is a no-op.
    pub fn push(&mut self, fragment: &str) {
        if self.current() == Some(fragment) {
            return;
        }
        if self.entries.len() == MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(fragment.to_string());
    }

    /// Drop the current entry and return the one before it
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.current()
    }

    /// Overwrite the current entry, or record it if there is none
    pub fn replace(&mut self, fragment: &str) {
        match self.entries.last_mut() {
            Some(last) => *last = fragment.to_string(),
            None => self.entries.push(fragment.to_string()),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut history = History::new();
        history.push("#");
        history.push("#post/welcome.md");
        history.push("#post/welcome.md");
        assert_eq!(history.len(), 2);

        assert_eq!(history.back(), Some("#"));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), Some("#"));
    }

    #[test]
    fn test_replace() {
        let mut history = History::new();
        history.replace("#/");
        assert_eq!(history.current(), Some("#/"));

        history.push("#/posts/welcome");
        history.replace("#/tags");
        assert_eq!(history.len(), 2);
        assert_eq!(history.back(), Some("#/"));
    }

    #[test]
    fn test_bounded() {
        let mut history = History::new();
        for i in 0..(MAX_ENTRIES + 10) {
            history.push(&format!("#page/{}", i));
        }
        assert_eq!(history.len(), MAX_ENTRIES);
        assert_eq!(history.current(), Some("#page/73"));
    }
}
