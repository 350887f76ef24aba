//! The hash-like row adapter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{key, write, Entry, List, RowError};

/// One record of a list feed, presented as an insertion-ordered map from
/// normalized field name to optional value.
///
/// Keys are normalized on every write path (strip non-alphanumerics,
/// lowercase), so names differing only by punctuation or case share one
/// slot and the last write wins. Insertion order is preserved and drives
/// the element order of [`Row::as_insert_xml`]; update XML keeps the
/// original entry's order instead, because it is a rewrite of that entry.
///
/// A row is either backed by a parsed [`Entry`] (built from a feed, can be
/// edited and saved) or fresh (only insertable). The owning collection is
/// reached through a [`List`] handle attached with [`Row::with_list`].
#[derive(Default)]
pub struct Row {
    fields: Vec<(String, Option<String>)>,
    index: HashMap<String, usize>,
    entry: Option<Entry>,
    etag: Option<String>,
    list: Option<Arc<dyn List>>,
}

impl Row {
    /// An empty row, not backed by any feed entry.
    pub fn new() -> Row {
        Row::default()
    }

    /// Factory: a row populated from a parsed feed entry.
    pub fn build(entry: Entry) -> Row {
        let mut row = Row::new();
        row.accept_entry(entry);
        row
    }

    /// Store `value` under the normalized form of `key`, overwriting any
    /// prior value in that slot. `None` is a permitted value.
    pub fn store<'v>(&mut self, key: &str, value: impl Into<Option<&'v str>>) {
        let key = key::normalize(key);
        let value = value.into().map(str::to_owned);
        match self.index.get(&key) {
            Some(&slot) => self.fields[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.fields.len());
                self.fields.push((key, value));
            }
        }
    }

    /// [`store`](Row::store) every pair in iteration order; later pairs win
    /// when keys collide after normalization.
    pub fn update<'v, I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Option<&'v str>>,
    {
        for (key, value) in pairs {
            self.store(key.as_ref(), value);
        }
    }

    /// Populate this row from a parsed feed entry: capture its etag, store
    /// every field-namespace child in document order, then retain the entry
    /// for [`edit_url`](Row::edit_url) and [`as_update_xml`](Row::as_update_xml).
    pub fn accept_entry(&mut self, entry: Entry) -> &mut Self {
        self.etag = entry.etag().map(str::to_owned);
        for (name, text) in entry.fields() {
            self.store(name, text);
        }
        self.entry = Some(entry);
        self
    }

    /// Copy every key/value pair from `other`, re-normalizing keys.
    pub fn accept_row(&mut self, other: &Row) -> &mut Self {
        for (key, value) in other.iter() {
            self.store(key, value);
        }
        self
    }

    /// Copy only the key set from `other`, with every value `None`.
    pub fn accept_keys(&mut self, other: &Row) -> &mut Self {
        for key in other.keys() {
            self.store(key, None::<&str>);
        }
        self
    }

    /// Attach the owning collection used by [`insert`](Row::insert) and
    /// [`save`](Row::save).
    pub fn with_list(mut self, list: Arc<dyn List>) -> Self {
        self.list = Some(list);
        self
    }

    /// A copy with the same key/value pairs and list handle. The copy is
    /// not entry-backed: it can be inserted as a new record but not saved.
    pub fn dup(&self) -> Row {
        let mut row = Row::new();
        row.accept_row(self);
        row.list = self.list.clone();
        row
    }

    /// A copy with the same key set, all values `None`, sharing the list
    /// handle — a reset-for-edit template.
    pub fn clean_dup(&self) -> Row {
        let mut row = Row::new();
        row.accept_keys(self);
        row.list = self.list.clone();
        row
    }

    /// Value stored under `key` (normalized before lookup). `None` both for
    /// an absent key and for a stored `None`; use
    /// [`contains_key`](Row::contains_key) to tell them apart.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key::normalize(key);
        self.index.get(&key).and_then(|&slot| self.fields[slot].1.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(&key::normalize(key))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Version token captured from the backing entry, if any.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// The backing feed entry, if this row was built from one.
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    /// HREF of the backing entry's `rel='edit'` link.
    pub fn edit_url(&self) -> Result<&str, RowError> {
        let entry = self.entry.as_ref().ok_or(RowError::EditWithoutEntry)?;
        entry.edit_url().ok_or(RowError::MissingEditLink)
    }

    /// Request body for creating a brand-new record: a fresh `<entry>` with
    /// one field element per key in insertion order.
    pub fn as_insert_xml(&self) -> Result<String, RowError> {
        write::insert_xml(self)
    }

    /// Request body for updating the backing record: the original entry
    /// rewritten in place. Only field elements named by this row change;
    /// everything else — including fields the caller never touched — is
    /// carried through verbatim, and the outer `<entry>` tag's
    /// server-assigned attributes are replaced by the fixed namespace
    /// declaration.
    pub fn as_update_xml(&self) -> Result<String, RowError> {
        let entry = self.entry.as_ref().ok_or(RowError::UpdateWithoutEntry)?;
        write::update_xml(self, entry)
    }

    /// Send this row to the list's insert path.
    pub fn insert(&self) -> Result<(), RowError> {
        let list = self.list.as_ref().ok_or(RowError::ListNotSupplied)?;
        list.upload_insert(self).map_err(RowError::Upload)
    }

    /// Send this row to the list's update path.
    pub fn save(&self) -> Result<(), RowError> {
        let list = self.list.as_ref().ok_or(RowError::ListNotSupplied)?;
        list.upload_update(self).map_err(RowError::Upload)
    }

    /// The attached list handle, if any.
    pub fn list(&self) -> Option<&Arc<dyn List>> {
        self.list.as_ref()
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("fields", &self.fields)
            .field("etag", &self.etag)
            .field("entry", &self.entry.is_some())
            .field("list", &self.list.is_some())
            .finish()
    }
}
