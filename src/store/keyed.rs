//! KeyedStore - Vec-backed store with a HashMap index from id to position.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::repository::{Count, Exists, Find, FindOne, Repository};
use super::{Id, Identifiable};

/// In-memory store of identifiable entities.
///
/// Entities live in a `Vec` in insertion order; `index` maps each id to its
/// position so lookups are O(1). Removal is O(n) because later positions
/// shift down by one to keep the order intact.
///
/// Serializes as a plain sequence. Deserializing goes through
/// [`KeyedStore::from_entities`], so input with repeated ids is rejected.
pub struct KeyedStore<T> {
    items: Vec<T>,
    index: HashMap<Id, usize>,
}

impl<T> KeyedStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty store with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over stored entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
        debug!("store cleared");
    }
}

impl<T: Identifiable> KeyedStore<T> {
    /// Build a store from entities in iteration order.
    ///
    /// Fails with [`StoreError::DuplicateKey`] on the first repeated id.
    pub fn from_entities<I>(entities: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let entities = entities.into_iter();
        let mut store = Self::with_capacity(entities.size_hint().0);
        for entity in entities {
            store.add(entity)?;
        }
        Ok(store)
    }

    /// Returns `true` if an entity with this id is stored.
    pub fn contains(&self, id: Id) -> bool {
        self.index.contains_key(&id)
    }

    /// Stored ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.items.iter().map(Identifiable::id)
    }

    /// Insert or overwrite.
    ///
    /// An existing entity with the same id is replaced in place (keeping its
    /// position) and returned. Otherwise the entity is appended.
    pub fn upsert(&mut self, item: T) -> Option<T> {
        let id = item.id();
        match self.index.get(&id).copied() {
            Some(pos) => {
                debug!(id, "entity replaced");
                Some(std::mem::replace(&mut self.items[pos], item))
            }
            None => {
                self.push(id, item);
                None
            }
        }
    }

    /// Apply `f` to the entity with this id.
    ///
    /// The closure runs on a copy, which is written back only if its id is
    /// unchanged; otherwise [`StoreError::IdentifierChanged`] is returned and
    /// the stored entity is left as it was. Returns `Ok(false)` if no entity
    /// has this id.
    pub fn update<F>(&mut self, id: Id, f: F) -> StoreResult<bool>
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let Some(&pos) = self.index.get(&id) else {
            return Ok(false);
        };

        let mut draft = self.items[pos].clone();
        f(&mut draft);

        let actual = draft.id();
        if actual != id {
            debug!(id, actual, "update rejected: identifier changed");
            return Err(StoreError::IdentifierChanged {
                expected: id,
                actual,
            });
        }

        self.items[pos] = draft;
        debug!(id, "entity updated");
        Ok(true)
    }

    fn push(&mut self, id: Id, item: T) {
        self.index.insert(id, self.items.len());
        self.items.push(item);
        debug!(id, len = self.items.len(), "entity added");
    }
}

impl<T: Identifiable> Repository<T> for KeyedStore<T> {
    fn get_all(&self) -> &[T] {
        &self.items
    }

    fn get_by_id(&self, id: Id) -> Option<&T> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    fn add(&mut self, item: T) -> StoreResult<()> {
        let id = item.id();
        if self.index.contains_key(&id) {
            debug!(id, "add rejected: duplicate key");
            return Err(StoreError::DuplicateKey { id });
        }
        self.push(id, item);
        Ok(())
    }

    fn remove(&mut self, id: Id) -> Option<T> {
        let pos = self.index.remove(&id)?;
        let removed = self.items.remove(pos);

        // Everything after `pos` moved down by one.
        for (offset, item) in self.items[pos..].iter().enumerate() {
            self.index.insert(item.id(), pos + offset);
        }

        debug!(id, len = self.items.len(), "entity removed");
        Some(removed)
    }
}

impl<T> Find<T> for KeyedStore<T> {
    fn find<F>(&self, predicate: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }
}

impl<T> FindOne<T> for KeyedStore<T> {
    fn find_one<F>(&self, predicate: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }
}

impl<T> Exists<T> for KeyedStore<T> {
    fn exists<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }
}

impl<T> Count<T> for KeyedStore<T> {
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).count()
    }
}

impl<T> Default for KeyedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for KeyedStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for KeyedStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for KeyedStore<T> {}

impl<T: fmt::Debug> fmt::Debug for KeyedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStore")
            .field("len", &self.items.len())
            .field("items", &self.items)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a KeyedStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for KeyedStore<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Serialize> Serialize for KeyedStore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for KeyedStore<T>
where
    T: Deserialize<'de> + Identifiable,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::from_entities(items).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: Id,
        name: String,
    }

    impl Identifiable for Item {
        fn id(&self) -> Id {
            self.id
        }
    }

    fn item(id: Id, name: &str) -> Item {
        Item {
            id,
            name: name.into(),
        }
    }

    fn names(store: &KeyedStore<Item>) -> Vec<&str> {
        store.get_all().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn new_store_is_empty() {
        let store = KeyedStore::<Item>::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn add_and_get() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();
        store.add(item(2, "b")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_id(1), Some(&item(1, "a")));
        assert_eq!(store.get_by_id(2), Some(&item(2, "b")));
        assert_eq!(names(&store), vec!["a", "b"]);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = KeyedStore::<Item>::new();
        assert!(store.get_by_id(42).is_none());
    }

    #[test]
    fn add_rejects_duplicate_and_keeps_state() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();
        store.add(item(2, "b")).unwrap();

        let err = store.add(item(2, "c")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey { id: 2 });
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_id(2).unwrap().name, "b");
        assert_eq!(names(&store), vec!["a", "b"]);
    }

    #[test]
    fn remove_from_the_middle_reindexes() {
        let mut store = KeyedStore::new();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
            store.add(item(id, name)).unwrap();
        }

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&store), vec!["a", "c", "d"]);
        assert_eq!(store.get_by_id(3).unwrap().name, "c");
        assert_eq!(store.get_by_id(4).unwrap().name, "d");
        assert_eq!(store.get_by_id(1).unwrap().name, "a");
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();

        assert!(store.remove(9).is_none());
        assert!(store.remove(1).is_some());
        assert!(store.remove(1).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();
        store.add(item(2, "b")).unwrap();
        store.add(item(3, "c")).unwrap();

        let previous = store.upsert(item(2, "z"));
        assert_eq!(previous, Some(item(2, "b")));
        assert_eq!(names(&store), vec!["a", "z", "c"]);

        assert!(store.upsert(item(4, "d")).is_none());
        assert_eq!(names(&store), vec!["a", "z", "c", "d"]);
    }

    #[test]
    fn update_applies_changes() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();

        let updated = store.update(1, |i| i.name.push('!')).unwrap();
        assert!(updated);
        assert_eq!(store.get_by_id(1).unwrap().name, "a!");
    }

    #[test]
    fn update_missing_returns_false() {
        let mut store = KeyedStore::<Item>::new();
        assert!(!store.update(1, |i| i.name.clear()).unwrap());
    }

    #[test]
    fn update_rejects_identifier_change() {
        let mut store = KeyedStore::new();
        store.add(item(1, "a")).unwrap();
        store.add(item(2, "b")).unwrap();

        let err = store
            .update(1, |i| {
                i.id = 2;
                i.name = "changed".into();
            })
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::IdentifierChanged {
                expected: 1,
                actual: 2
            }
        );
        assert_eq!(store.get_by_id(1), Some(&item(1, "a")));
        assert_eq!(store.get_by_id(2), Some(&item(2, "b")));
    }

    #[test]
    fn from_entities_rejects_duplicates() {
        let err = KeyedStore::from_entities(vec![item(1, "a"), item(1, "b")]).unwrap_err();
        assert_eq!(err, StoreError::DuplicateKey { id: 1 });

        let store = KeyedStore::from_entities(vec![item(5, "e"), item(3, "c")]).unwrap();
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![5, 3]);
    }

    #[test]
    fn query_traits() {
        let store =
            KeyedStore::from_entities(vec![item(1, "apple"), item(2, "banana"), item(3, "avocado")])
                .unwrap();

        let a_names: Vec<_> = store
            .find(|i| i.name.starts_with('a'))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(a_names, vec![1, 3]);
        assert_eq!(store.find_one(|i| i.name.starts_with('b')).unwrap().id, 2);
        assert!(store.find_one(|i| i.name.is_empty()).is_none());
        assert!(store.exists(|i| i.name == "banana"));
        assert!(!store.exists(|i| i.name == "cherry"));
        assert_eq!(store.count(|i| i.name.len() > 5), 2);
    }

    #[test]
    fn clear_removes_all() {
        let mut store = KeyedStore::from_entities(vec![item(1, "a"), item(2, "b")]).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(1));
        store.add(item(1, "again")).unwrap();
        assert_eq!(names(&store), vec!["again"]);
    }

    #[test]
    fn serializes_as_ordered_array() {
        let store = KeyedStore::from_entities(vec![item(2, "b"), item(1, "a")]).unwrap();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "id": 2, "name": "b" },
                { "id": 1, "name": "a" }
            ])
        );

        let back: KeyedStore<Item> = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
        assert_eq!(back.get_by_id(1).unwrap().name, "a");
    }

    #[test]
    fn deserialize_rejects_duplicate_ids() {
        let json = r#"[{"id":1,"name":"a"},{"id":1,"name":"b"}]"#;
        let err = serde_json::from_str::<KeyedStore<Item>>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn debug_format() {
        let store = KeyedStore::from_entities(vec![item(1, "a")]).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("KeyedStore"));
        assert!(debug.contains("len"));
    }
}
