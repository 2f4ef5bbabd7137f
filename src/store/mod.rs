mod sorted_set;
mod value;

use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error as ThisError;

pub use sorted_set::SortedSet;
pub use value::{Hash, List, Set, Value};

use value::Container;

#[derive(Debug, ThisError, PartialEq)]
pub enum StoreError {
    #[error("key not found or wrong type")]
    KeyNotFoundOrWrongType,
    #[error("list is empty")]
    EmptyList,
    #[error("field not found")]
    FieldNotFound,
}

type Key = String;

/// The key space: every key maps to exactly one typed container.
///
/// Writes to lists, sets, hashes and sorted sets never fail on a type mismatch: the key is
/// reset to an empty container of the requested type first, so the last writer decides the
/// type. Reads, and removals from a container, fail with
/// [`StoreError::KeyNotFoundOrWrongType`] instead. Containers are never dropped implicitly, an
/// emptied list is still a list until the key is removed.
///
/// The store is owned by a single thread, nothing here is synchronised.
#[derive(Debug, Default)]
pub struct Store {
    keys: HashMap<Key, Value>,
}

impl Store {
    pub fn new() -> Store {
        Store::default()
    }

    pub fn set(&mut self, key: String, data: Bytes) {
        self.keys.insert(key, Value::String(data));
    }

    pub fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        self.get_or_throw::<Bytes>(key).cloned()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.keys.remove(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn size(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub(crate) fn type_of(&self, key: &str) -> Option<&'static str> {
        self.keys.get(key).map(Value::type_name)
    }

    /// Returns the length of the list after the push.
    pub fn push_left(&mut self, key: &str, value: Bytes) -> usize {
        let list = self.get_or_create::<List>(key);
        list.push_front(value);
        list.len()
    }

    /// Returns the length of the list after the push.
    pub fn push_right(&mut self, key: &str, value: Bytes) -> usize {
        let list = self.get_or_create::<List>(key);
        list.push_back(value);
        list.len()
    }

    pub fn pop_left(&mut self, key: &str) -> Result<Bytes, StoreError> {
        self.get_or_throw_mut::<List>(key)?
            .pop_front()
            .ok_or(StoreError::EmptyList)
    }

    pub fn pop_right(&mut self, key: &str) -> Result<Bytes, StoreError> {
        self.get_or_throw_mut::<List>(key)?
            .pop_back()
            .ok_or(StoreError::EmptyList)
    }

    pub fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Bytes>, StoreError> {
        let list = self.get_or_throw::<List>(key)?;

        let values = match normalize_range(start, stop, list.len()) {
            Some((start, stop)) => list.range(start..=stop).cloned().collect(),
            None => vec![],
        };

        Ok(values)
    }

    /// Returns the number of members added, `0` when it was already there.
    pub fn set_add(&mut self, key: &str, member: Bytes) -> usize {
        usize::from(self.get_or_create::<Set>(key).insert(member))
    }

    pub fn set_remove(&mut self, key: &str, member: &[u8]) -> Result<usize, StoreError> {
        let set = self.get_or_throw_mut::<Set>(key)?;
        Ok(usize::from(set.remove(member)))
    }

    pub fn set_members(&self, key: &str) -> Result<Vec<Bytes>, StoreError> {
        let set = self.get_or_throw::<Set>(key)?;
        Ok(set.iter().cloned().collect())
    }

    /// Returns whether the field is new.
    pub fn hash_set(&mut self, key: &str, field: Bytes, value: Bytes) -> bool {
        self.get_or_create::<Hash>(key)
            .insert(field, value)
            .is_none()
    }

    pub fn hash_get(&self, key: &str, field: &[u8]) -> Result<Bytes, StoreError> {
        self.get_or_throw::<Hash>(key)?
            .get(field)
            .cloned()
            .ok_or(StoreError::FieldNotFound)
    }

    pub fn hash_del(&mut self, key: &str, field: &[u8]) -> Result<bool, StoreError> {
        let hash = self.get_or_throw_mut::<Hash>(key)?;
        Ok(hash.remove(field).is_some())
    }

    pub fn hash_get_all(&self, key: &str) -> Result<Vec<(Bytes, Bytes)>, StoreError> {
        let hash = self.get_or_throw::<Hash>(key)?;
        Ok(hash
            .iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect())
    }

    /// Returns the number of members added. Updating the score of an existing member does not
    /// count.
    pub fn sorted_set_add(&mut self, key: &str, score: f64, member: Bytes) -> usize {
        usize::from(self.get_or_create::<SortedSet>(key).add(score, member))
    }

    pub fn sorted_set_remove(&mut self, key: &str, member: &[u8]) -> Result<usize, StoreError> {
        let set = self.get_or_throw_mut::<SortedSet>(key)?;
        Ok(usize::from(set.remove(member)))
    }

    pub fn sorted_set_range(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<Bytes>, StoreError> {
        let set = self.get_or_throw::<SortedSet>(key)?;

        let members = match normalize_range(start, stop, set.len()) {
            Some((start, stop)) => set
                .iter()
                .skip(start)
                .take(stop - start + 1)
                .map(|(member, _)| member.clone())
                .collect(),
            None => vec![],
        };

        Ok(members)
    }

    fn get_or_create<T: Container>(&mut self, key: &str) -> &mut T {
        let value = self.keys.entry(key.to_string()).or_insert_with(T::empty);
        T::coerce(value)
    }

    fn get_or_throw<T: Container>(&self, key: &str) -> Result<&T, StoreError> {
        self.keys
            .get(key)
            .and_then(T::downcast)
            .ok_or(StoreError::KeyNotFoundOrWrongType)
    }

    fn get_or_throw_mut<T: Container>(&mut self, key: &str) -> Result<&mut T, StoreError> {
        self.keys
            .get_mut(key)
            .and_then(T::downcast_mut)
            .ok_or(StoreError::KeyNotFoundOrWrongType)
    }
}

/// Turns a `start`/`stop` pair of inclusive indices, where negative values count from the end,
/// into bounds within a sequence of `len` elements. `None` means the range selects nothing.
pub fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);

    let start = if start < 0 { start.saturating_add(len) } else { start }.max(0);
    let stop = if stop < 0 { stop.saturating_add(len) } else { stop }.min(len - 1);

    if start > stop || start >= len {
        return None;
    }

    Some((start as usize, stop as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(values: &[&'static str]) -> Vec<Bytes> {
        values.iter().map(|v| Bytes::from(*v)).collect()
    }

    fn list_store(key: &str, values: &[&'static str]) -> Store {
        let mut store = Store::new();
        for value in values {
            store.push_right(key, Bytes::from(*value));
        }
        store
    }

    #[test]
    fn set_and_get() {
        let mut store = Store::new();
        store.set("key".to_string(), Bytes::from("value"));

        assert_eq!(store.get("key"), Ok(Bytes::from("value")));
        assert!(store.exists("key"));
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn get_missing_or_wrong_type() {
        let mut store = list_store("list", &["a"]);

        assert_eq!(store.get("missing"), Err(StoreError::KeyNotFoundOrWrongType));
        assert_eq!(store.get("list"), Err(StoreError::KeyNotFoundOrWrongType));

        store.set("list".to_string(), Bytes::from("now a string"));
        assert_eq!(store.get("list"), Ok(Bytes::from("now a string")));
    }

    #[test]
    fn remove_key() {
        let mut store = Store::new();
        store.set("key".to_string(), Bytes::from("value"));

        assert!(store.remove("key").is_some());
        assert!(store.remove("key").is_none());
        assert!(!store.exists("key"));
    }

    #[test]
    fn push_replaces_string_with_list() {
        let mut store = Store::new();
        store.set("key".to_string(), Bytes::from("value"));

        assert_eq!(store.push_right("key", Bytes::from("a")), 1);

        assert_eq!(store.type_of("key"), Some("list"));
        assert_eq!(store.list_range("key", 0, -1), Ok(bytes(&["a"])));
    }

    #[test]
    fn push_left_and_right() {
        let mut store = Store::new();

        assert_eq!(store.push_left("key", Bytes::from("b")), 1);
        assert_eq!(store.push_left("key", Bytes::from("a")), 2);
        assert_eq!(store.push_right("key", Bytes::from("c")), 3);

        assert_eq!(store.list_range("key", 0, -1), Ok(bytes(&["a", "b", "c"])));
    }

    #[test]
    fn pop_until_empty_keeps_the_list() {
        let mut store = list_store("key", &["a", "b"]);

        assert_eq!(store.pop_left("key"), Ok(Bytes::from("a")));
        assert_eq!(store.pop_right("key"), Ok(Bytes::from("b")));
        assert_eq!(store.pop_left("key"), Err(StoreError::EmptyList));
        assert_eq!(store.pop_right("key"), Err(StoreError::EmptyList));

        assert!(store.exists("key"));
        assert_eq!(store.list_range("key", 0, -1), Ok(vec![]));
    }

    #[test]
    fn pop_missing_key() {
        let mut store = Store::new();

        assert_eq!(store.pop_left("key"), Err(StoreError::KeyNotFoundOrWrongType));
        assert!(!store.exists("key"));
    }

    #[test]
    fn list_range_normalization() {
        let store = list_store("key", &["a", "b", "c"]);

        assert_eq!(store.list_range("key", 0, -1), Ok(bytes(&["a", "b", "c"])));
        assert_eq!(store.list_range("key", -100, 100), Ok(bytes(&["a", "b", "c"])));
        assert_eq!(store.list_range("key", 2, 1), Ok(vec![]));
        assert_eq!(store.list_range("key", 1, 1), Ok(bytes(&["b"])));
        assert_eq!(store.list_range("key", -2, -1), Ok(bytes(&["b", "c"])));
        assert_eq!(store.list_range("key", 3, 10), Ok(vec![]));
    }

    #[test]
    fn set_operations() {
        let mut store = Store::new();

        assert_eq!(store.set_add("key", Bytes::from("a")), 1);
        assert_eq!(store.set_add("key", Bytes::from("b")), 1);
        assert_eq!(store.set_add("key", Bytes::from("a")), 0);

        let mut members = store.set_members("key").unwrap();
        members.sort();
        assert_eq!(members, bytes(&["a", "b"]));

        assert_eq!(store.set_remove("key", b"a"), Ok(1));
        assert_eq!(store.set_remove("key", b"a"), Ok(0));
        assert_eq!(store.set_remove("missing", b"a"), Err(StoreError::KeyNotFoundOrWrongType));
        assert_eq!(store.set_members("missing"), Err(StoreError::KeyNotFoundOrWrongType));
    }

    #[test]
    fn hash_operations() {
        let mut store = Store::new();

        assert!(store.hash_set("key", Bytes::from("f1"), Bytes::from("v1")));
        assert!(!store.hash_set("key", Bytes::from("f1"), Bytes::from("v2")));
        assert!(store.hash_set("key", Bytes::from("f2"), Bytes::from("v3")));

        assert_eq!(store.hash_get("key", b"f1"), Ok(Bytes::from("v2")));
        assert_eq!(store.hash_get("key", b"nope"), Err(StoreError::FieldNotFound));
        assert_eq!(store.hash_get("missing", b"f1"), Err(StoreError::KeyNotFoundOrWrongType));

        let mut all = store.hash_get_all("key").unwrap();
        all.sort();
        assert_eq!(
            all,
            vec![
                (Bytes::from("f1"), Bytes::from("v2")),
                (Bytes::from("f2"), Bytes::from("v3")),
            ]
        );

        assert_eq!(store.hash_del("key", b"f1"), Ok(true));
        assert_eq!(store.hash_del("key", b"f1"), Ok(false));
    }

    #[test]
    fn sorted_set_add_counts_only_new_members() {
        let mut store = Store::new();

        assert_eq!(store.sorted_set_add("key", 1.0, Bytes::from("a")), 1);
        assert_eq!(store.sorted_set_add("key", 2.0, Bytes::from("a")), 0);

        assert_eq!(store.sorted_set_range("key", 0, -1), Ok(bytes(&["a"])));
    }

    #[test]
    fn sorted_set_range_by_score() {
        let mut store = Store::new();
        store.sorted_set_add("key", 2.0, Bytes::from("member1"));
        store.sorted_set_add("key", 3.0, Bytes::from("member2"));
        store.sorted_set_add("key", 1.0, Bytes::from("member3"));

        assert_eq!(
            store.sorted_set_range("key", 0, -1),
            Ok(bytes(&["member3", "member1", "member2"]))
        );
        assert_eq!(store.sorted_set_range("key", 1, 1), Ok(bytes(&["member1"])));
        assert_eq!(store.sorted_set_range("key", -1, -1), Ok(bytes(&["member2"])));
        assert_eq!(store.sorted_set_range("key", 5, 9), Ok(vec![]));

        assert_eq!(store.sorted_set_remove("key", b"member1"), Ok(1));
        assert_eq!(store.sorted_set_remove("key", b"member1"), Ok(0));
        assert_eq!(
            store.sorted_set_range("key", 0, -1),
            Ok(bytes(&["member3", "member2"]))
        );
    }

    #[test]
    fn normalize_range_bounds() {
        assert_eq!(normalize_range(0, -1, 3), Some((0, 2)));
        assert_eq!(normalize_range(-100, 100, 3), Some((0, 2)));
        assert_eq!(normalize_range(2, 1, 3), None);
        assert_eq!(normalize_range(3, 5, 3), None);
        assert_eq!(normalize_range(0, -1, 0), None);
        assert_eq!(normalize_range(i64::MIN, i64::MAX, 2), Some((0, 1)));
    }
}
