//! Todo list page state
//!
//! Items keep insertion order. Ids come from a per-list sequence, so they are
//! unique and increasing for the lifetime of the list. Operations on unknown
//! ids leave the list untouched and report `false`.

use serde::Serialize;

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    /// Label of the button that flips completion
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Undo"
        } else {
            "Complete"
        }
    }
}

/// Todo items plus the draft being typed into the input box
#[derive(Debug, Clone, Serialize)]
pub struct TodoList {
    items: Vec<Todo>,
    draft: String,
    #[serde(skip)]
    next_id: u64,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: String::new(),
            next_id: 1,
        }
    }
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input box content
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Mutable access for character-level editing
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Add the draft as a new todo and clear the input.
    ///
    /// Blank drafts are ignored and kept as typed.
    pub fn submit(&mut self) -> Option<u64> {
        if self.draft.trim().is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Todo {
            id,
            text: std::mem::take(&mut self.draft),
            completed: false,
        });
        Some(id)
    }

    /// Shorthand for `set_draft` followed by `submit`
    pub fn add(&mut self, text: impl Into<String>) -> Option<u64> {
        self.set_draft(text);
        self.submit()
    }

    /// Flip completion of a todo
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    /// Remove a todo
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|todo| todo.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of completed todos
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|todo| todo.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_adds_and_clears_draft() {
        let mut list = TodoList::new();
        list.set_draft("  buy milk ");

        let id = list.submit().unwrap();
        assert_eq!(list.draft(), "");
        assert_eq!(list.get(id).unwrap().text, "  buy milk ");
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn test_blank_draft_is_ignored() {
        let mut list = TodoList::new();
        list.set_draft("   ");

        assert_eq!(list.submit(), None);
        assert!(list.is_empty());
        assert_eq!(list.draft(), "   ");
    }

    #[test]
    fn test_ids_are_unique_after_delete() {
        let mut list = TodoList::new();
        let first = list.add("one").unwrap();
        let second = list.add("two").unwrap();
        assert!(list.delete(second));
        let third = list.add("three").unwrap();

        assert!(first < second && second < third);
        let texts: Vec<_> = list.items().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "three"]);
    }

    #[test]
    fn test_toggle_round_trip_and_labels() {
        let mut list = TodoList::new();
        let id = list.add("write tests").unwrap();
        assert_eq!(list.get(id).unwrap().toggle_label(), "Complete");

        assert!(list.toggle(id));
        assert_eq!(list.completed(), 1);
        assert_eq!(list.get(id).unwrap().toggle_label(), "Undo");

        assert!(list.toggle(id));
        assert_eq!(list.completed(), 0);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut list = TodoList::new();
        list.add("keep me");

        assert!(!list.toggle(42));
        assert!(!list.delete(42));
        assert_eq!(list.len(), 1);
        assert_eq!(list.completed(), 0);
    }
}
