//! Insertion-ordered entity collections with shallow-merge updates.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use fuelops_core::{DomainError, DomainResult, Entity, Timestamped};

use crate::numbering::DocumentType;

/// Fields owned by the store; a patch can never overwrite them.
const STORE_MANAGED_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// A record the store can keep in a [`Collection`].
pub trait Record: Entity + Timestamped + Clone + Serialize + DeserializeOwned {
    /// Counter advanced after each successful create, if any.
    const DOCUMENT_TYPE: Option<DocumentType> = None;

    /// Human-facing document number that must stay unique in its collection.
    fn document_no(&self) -> Option<&str> {
        None
    }

    /// Refresh fields derived from other fields (totals, variances).
    fn recompute(&mut self) {}
}

/// Shallow-merge a JSON object into a record.
///
/// Top-level fields present in `patch` replace the record's; everything else is
/// kept. Store-managed timestamps in the patch are ignored.
pub fn merge_patch<T>(current: &T, patch: &JsonValue) -> DomainResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let fields = patch
        .as_object()
        .ok_or_else(|| DomainError::validation("patch must be a JSON object"))?;

    let mut doc = serde_json::to_value(current)
        .map_err(|e| DomainError::validation(format!("record is not serializable: {e}")))?;
    let target = doc
        .as_object_mut()
        .ok_or_else(|| DomainError::validation("record does not serialize to an object"))?;

    for (key, value) in fields {
        if STORE_MANAGED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }

    serde_json::from_value(doc)
        .map_err(|e| DomainError::validation(format!("patch produced an invalid record: {e}")))
}

/// Ordered list of records of one kind.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn find_by_document_no(&self, document_no: &str) -> Option<&T> {
        self.find(|item| item.document_no() == Some(document_no))
    }

    /// Whether another record (not `except_id`) already uses `document_no`.
    pub fn document_no_taken(&self, document_no: &str, except_id: Option<&str>) -> bool {
        self.items
            .iter()
            .any(|item| item.document_no() == Some(document_no) && Some(item.id()) != except_id)
    }

    /// Append a record; ids must be unique within the collection.
    pub fn insert(&mut self, item: T) -> DomainResult<&T> {
        if self.get(item.id()).is_some() {
            return Err(DomainError::conflict(format!(
                "{} '{}' already exists",
                T::KIND,
                item.id()
            )));
        }
        self.items.push(item);
        // Just pushed, so the collection is non-empty.
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Run `change` against a copy of the record and commit only on success.
    ///
    /// On any error the stored record is left exactly as it was.
    pub fn modify<F, R>(&mut self, id: &str, change: F) -> DomainResult<R>
    where
        F: FnOnce(&mut T) -> DomainResult<R>,
    {
        let idx = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id))?;

        let mut draft = self.items[idx].clone();
        let outcome = change(&mut draft)?;
        if draft.id() != id {
            return Err(DomainError::validation(format!(
                "{} id cannot change from '{}' to '{}'",
                T::KIND,
                id,
                draft.id()
            )));
        }

        self.items[idx] = draft;
        Ok(outcome)
    }

    pub fn remove(&mut self, id: &str) -> DomainResult<T> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DomainError::not_found(T::KIND, id))?;
        Ok(self.items.remove(idx))
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
