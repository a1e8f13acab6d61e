//! Keeping field metadata across recompiles.
//!
//! Recompiling a struct or function rebuilds its field objects, dropping any
//! metadata attached to the old ones. The [`MetadataBridge`] snapshots the
//! owner's metadata before a change and re-applies it afterwards, matching
//! fields by name since field identity does not survive regeneration.
//!
//! Change notifications may nest. Only the outermost pre-change captures and
//! only the matching outermost post-change restores.

use indexmap::IndexMap;

use mdmeta_core::{Field, Metadata, MetadataMap};

/// Stable identity of an owner across recompiles, e.g. its object path.
pub type OwnerKey = String;

/// A struct or function whose fields carry metadata.
pub trait MetadataOwner {
    fn owner_key(&self) -> &str;

    /// False once the owner has been deleted.
    fn is_valid(&self) -> bool;

    fn metadata(&self) -> &dyn MetadataMap;

    fn metadata_mut(&mut self) -> &mut dyn MetadataMap;

    /// Names of the current fields, in declaration order.
    fn field_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn field_metadata(&self, name: &str) -> Option<&dyn MetadataMap>;

    fn field_metadata_mut(&mut self, name: &str) -> Option<&mut dyn MetadataMap>;
}

/// Compiler extension point.
pub trait CompileListener {
    fn on_pre_compile(&mut self, owner: &dyn MetadataOwner);

    fn on_post_compile(&mut self, owner: &mut dyn MetadataOwner);
}

/// Snapshot of one owner taken at the outermost pre-change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CachedFieldMetadata {
    /// Outstanding pre-change notifications.
    pub count: usize,
    pub owner: Metadata,
    /// Field name to that field's metadata. Fields without metadata are
    /// not recorded.
    pub fields: IndexMap<String, Metadata>,
}

impl CachedFieldMetadata {
    fn capture<O: MetadataOwner + ?Sized>(owner: &O) -> Self {
        let fields = owner
            .field_names()
            .filter_map(|name| {
                let metadata = owner.field_metadata(name)?;
                metadata
                    .has_any()
                    .then(|| (name.to_string(), metadata.snapshot()))
            })
            .collect();

        Self {
            count: 0,
            owner: owner.metadata().snapshot(),
            fields,
        }
    }

    /// Returns how many captured fields were found on `owner`.
    fn restore<O: MetadataOwner + ?Sized>(&self, owner: &mut O) -> usize {
        let mut restored = 0;
        for (name, metadata) in &self.fields {
            if let Some(target) = owner.field_metadata_mut(name) {
                target.append(metadata);
                restored += 1;
            }
        }
        owner.metadata_mut().append(&self.owner);
        restored
    }
}

/// Result of [`MetadataBridge::post_change`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostChange {
    /// No matching pre-change was seen.
    Untracked,
    /// The owner was deleted mid-change; its snapshot was dropped.
    Abandoned,
    /// An enclosing change is still open.
    Pending { depth: usize },
    Restored { fields: usize },
}

#[derive(Debug, Default)]
pub struct MetadataBridge {
    cache: IndexMap<OwnerKey, CachedFieldMetadata>,
}

impl MetadataBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_change<O: MetadataOwner + ?Sized>(&mut self, owner: &O) {
        if !owner.is_valid() {
            tracing::debug!(owner = owner.owner_key(), "pre-change on invalid owner ignored");
            return;
        }

        let entry = self
            .cache
            .entry(owner.owner_key().to_string())
            .or_insert_with(|| CachedFieldMetadata::capture(owner));
        entry.count += 1;

        tracing::trace!(
            owner = owner.owner_key(),
            depth = entry.count,
            fields = entry.fields.len(),
            "pre-change"
        );
    }

    pub fn post_change<O: MetadataOwner + ?Sized>(&mut self, owner: &mut O) -> PostChange {
        let key = owner.owner_key().to_string();
        if !self.cache.contains_key(&key) {
            return PostChange::Untracked;
        }

        // A later owner under the same key must start a fresh capture.
        if !owner.is_valid() {
            self.cache.shift_remove(&key);
            tracing::warn!(owner = %key, "owner invalidated mid-change, snapshot abandoned");
            return PostChange::Abandoned;
        }

        let Some(entry) = self.cache.get_mut(&key) else {
            return PostChange::Untracked;
        };

        entry.count = entry.count.saturating_sub(1);
        if entry.count > 0 {
            tracing::trace!(owner = %key, depth = entry.count, "post-change pending");
            return PostChange::Pending { depth: entry.count };
        }

        let Some(entry) = self.cache.shift_remove(&key) else {
            return PostChange::Untracked;
        };
        let fields = entry.restore(owner);
        tracing::debug!(owner = %key, fields, "restored field metadata");
        PostChange::Restored { fields }
    }

    pub fn is_tracking(&self, owner: &str) -> bool {
        self.cache.contains_key(owner)
    }

    /// Outstanding pre-change notifications for `owner`.
    pub fn depth(&self, owner: &str) -> usize {
        self.cache.get(owner).map_or(0, |entry| entry.count)
    }

    pub fn cached(&self, owner: &str) -> Option<&CachedFieldMetadata> {
        self.cache.get(owner)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops snapshots whose owner was deleted without a closing post-change.
    /// Returns how many were dropped.
    pub fn purge(&mut self, is_alive: impl Fn(&str) -> bool) -> usize {
        let before = self.cache.len();
        self.cache.retain(|owner, _| is_alive(owner));
        let purged = before - self.cache.len();
        if purged > 0 {
            tracing::debug!(purged, "purged abandoned snapshots");
        }
        purged
    }

    /// Drops every snapshot, logging those still open.
    pub fn shutdown(&mut self) {
        for (owner, entry) in self.cache.drain(..) {
            tracing::warn!(
                owner = %owner,
                depth = entry.count,
                "snapshot still open at shutdown"
            );
        }
    }
}

impl Drop for MetadataBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl CompileListener for MetadataBridge {
    fn on_pre_compile(&mut self, owner: &dyn MetadataOwner) {
        self.pre_change(owner);
    }

    fn on_post_compile(&mut self, owner: &mut dyn MetadataOwner) {
        self.post_change(owner);
    }
}

/// A local variable as persisted in the function graph, with its metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableDescription {
    pub name: String,
    pub metadata: Metadata,
}

impl VariableDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Writes persisted local variable metadata onto the compiled fields of the
/// same name. Returns how many fields received metadata.
pub fn restore_local_variables<O: MetadataOwner + ?Sized>(
    owner: &mut O,
    variables: &[VariableDescription],
) -> usize {
    let mut restored = 0;
    for variable in variables.iter().filter(|v| !v.metadata.is_empty()) {
        if let Some(target) = owner.field_metadata_mut(&variable.name) {
            target.append(&variable.metadata);
            restored += 1;
        }
    }
    restored
}

/// Copies each field's metadata from the previous compilation onto the field
/// of the same name in the new one. Used for parameters, whose metadata lives
/// only on the compiled fields.
pub fn copy_field_metadata<P, N>(previous: &P, regenerated: &mut N) -> usize
where
    P: MetadataOwner + ?Sized,
    N: MetadataOwner + ?Sized,
{
    let mut copied = 0;
    for name in previous.field_names() {
        let Some(source) = previous.field_metadata(name) else {
            continue;
        };
        if !source.has_any() {
            continue;
        }
        if let Some(target) = regenerated.field_metadata_mut(name) {
            target.append(&source.snapshot());
            copied += 1;
        }
    }
    copied
}

/// In-memory owner: a struct or function with named fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldOwner {
    key: OwnerKey,
    valid: bool,
    pub metadata: Metadata,
    pub fields: Vec<Field>,
}

impl FieldOwner {
    pub fn new(key: impl Into<OwnerKey>) -> Self {
        Self {
            key: key.into(),
            valid: true,
            metadata: Metadata::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Rebuilds every field the way the compiler does: same names and
    /// types, no metadata. The owner's own metadata is dropped too.
    pub fn regenerate(&mut self) {
        self.metadata = Metadata::new();
        self.fields = self
            .fields
            .iter()
            .map(|field| Field::new(field.name.clone(), field.ty.clone()))
            .collect();
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl MetadataOwner for FieldOwner {
    fn owner_key(&self) -> &str {
        &self.key
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn metadata(&self) -> &dyn MetadataMap {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut dyn MetadataMap {
        &mut self.metadata
    }

    fn field_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.fields.iter().map(|field| field.name.as_str()))
    }

    fn field_metadata(&self, name: &str) -> Option<&dyn MetadataMap> {
        self.field(name).map(|field| &field.metadata as &dyn MetadataMap)
    }

    fn field_metadata_mut(&mut self, name: &str) -> Option<&mut dyn MetadataMap> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .map(|field| &mut field.metadata as &mut dyn MetadataMap)
    }
}
