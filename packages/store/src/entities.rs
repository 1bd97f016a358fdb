//! # Entity store: id-keyed collection state
//!
//! [`EntityStore`] is the one place list state gets mutated after admin
//! actions. Views render its items in order; mutation flows patch it through
//! [`upsert`](EntityStore::upsert) / [`remove`](EntityStore::remove) instead
//! of re-fetching the whole collection, so a successful PATCH is reflected
//! immediately in an already-rendered table.
//!
//! ## Ordering
//!
//! Insertion order is preserved everywhere: `upsert` replaces a matching
//! entry in place (same position) and appends unknown entries at the end;
//! `remove` closes the gap without reordering. Two `replace_all` calls with
//! the same backend payload therefore produce identical collections.

use serde::{Deserialize, Serialize};

/// Anything addressable by a stable string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// An ordered collection of entities, keyed by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> PartialEq for EntityStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a freshly fetched one.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Insert or update by id. An existing entry is replaced in place,
    /// keeping its position; a new entry is appended. Returns `true` when an
    /// existing entry was replaced.
    pub fn upsert(&mut self, item: T) -> bool {
        match self.items.iter().position(|i| i.key() == item.key()) {
            Some(idx) => {
                self.items[idx] = item;
                true
            }
            None => {
                self.items.push(item);
                false
            }
        }
    }

    /// Remove by id, returning the removed entry if it was present.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let idx = self.items.iter().position(|i| i.key() == key)?;
        Some(self.items.remove(idx))
    }

    /// Remove every entry whose id is in `keys`. Returns how many were
    /// actually removed (a bulk delete can name ids we never held).
    pub fn remove_many<S: AsRef<str>>(&mut self, keys: &[S]) -> usize {
        let before = self.items.len();
        self.items
            .retain(|i| !keys.iter().any(|k| k.as_ref() == i.key()));
        before - self.items.len()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Keyed + Clone> EntityStore<T> {
    /// Clone the items out for rendering.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> IntoIterator for EntityStore<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        value: u32,
    }

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: u32) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let mut store = EntityStore::new();
        store.replace_all(vec![row("a", 1), row("b", 2), row("c", 3)]);

        // Replacing keeps position
        assert!(store.upsert(row("b", 20)));
        let ids: Vec<&str> = store.items().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.get("b").unwrap().value, 20);

        // Unknown id appends
        assert!(!store.upsert(row("d", 4)));
        assert_eq!(store.len(), 4);
        assert_eq!(store.items()[3].id, "d");
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut store = EntityStore::new();
        store.replace_all(vec![row("a", 1), row("b", 2), row("c", 3)]);

        let removed = store.remove("b");
        assert_eq!(removed.unwrap().value, 2);
        let ids: Vec<&str> = store.items().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(store.remove("nope").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_many_counts_only_present_ids() {
        let mut store = EntityStore::new();
        store.replace_all(vec![row("a", 1), row("b", 2), row("c", 3)]);

        let removed = store.remove_many(&["a", "c", "x", "y"]);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, "b");
    }

    #[test]
    fn replace_all_twice_is_identical() {
        let fetched = vec![row("p1", 10), row("p2", 20), row("p3", 30)];

        let mut first = EntityStore::new();
        first.replace_all(fetched.clone());
        let mut second = EntityStore::new();
        second.replace_all(fetched.clone());
        assert_eq!(first, second);

        // Reloading over an existing collection gives the same result too.
        first.replace_all(fetched);
        assert_eq!(first, second);
    }
}
