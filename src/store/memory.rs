use std::collections::HashMap;
use std::sync::Mutex;

use crate::snippet::Snippet;

use super::error::Result;
use super::SnippetStore;

/// In-memory store, the fake backend for engine and service tests.
///
/// The map mutex doubles as the per-key write exclusion that `update`
/// promises, which is all the atomicity the engine relies on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Snippet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl SnippetStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Snippet>> {
        Ok(self.entries.lock().unwrap().get(id).cloned())
    }

    fn put(&self, snippet: &Snippet) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(snippet.id.clone(), snippet.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(id);
        Ok(())
    }

    fn list_unrestricted(&self) -> Result<Vec<Snippet>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|snippet| !snippet.is_restricted())
            .cloned()
            .collect())
    }

    fn update<F>(&self, id: &str, mut apply: F) -> Result<Option<Snippet>>
    where
        F: FnMut(Option<Snippet>) -> Option<Snippet>,
    {
        let mut entries = self.entries.lock().unwrap();
        match apply(entries.get(id).cloned()) {
            Some(next) => {
                entries.insert(id.to_string(), next.clone());
                Ok(Some(next))
            }
            None => {
                entries.remove(id);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete_roundtrip() {
        let store = MemoryStore::new();
        let snippet = Snippet::new("body", 0, None).unwrap();

        store.put(&snippet).unwrap();
        assert_eq!(store.get(&snippet.id).unwrap().unwrap(), snippet);

        store.delete(&snippet.id).unwrap();
        assert!(store.get(&snippet.id).unwrap().is_none());
        // Idempotent.
        store.delete(&snippet.id).unwrap();
    }

    #[test]
    fn list_unrestricted_filters_on_both_flags() {
        let store = MemoryStore::new();
        store.put(&Snippet::new("open", 0, None).unwrap()).unwrap();
        store.put(&Snippet::new("timed", 30, None).unwrap()).unwrap();
        store.put(&Snippet::new("counted", 0, Some(2)).unwrap()).unwrap();

        let listed = store.list_unrestricted().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "open");
    }

    #[test]
    fn update_none_removes() {
        let store = MemoryStore::new();
        let snippet = Snippet::new("body", 0, Some(1)).unwrap();
        store.put(&snippet).unwrap();

        assert!(store.update(&snippet.id, |_| None).unwrap().is_none());
        assert_eq!(store.len(), 0);
    }
}
