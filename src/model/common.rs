use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::logic::ValidationErrors;

/// Row identifier, unique within one collection only
pub type Id = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    School,
    Coach,
    Athlete,
    Group,
    Event,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::School,
        Collection::Coach,
        Collection::Athlete,
        Collection::Group,
        Collection::Event,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Collection::School => "School",
            Collection::Coach => "Coach",
            Collection::Athlete => "Athlete",
            Collection::Group => "Group",
            Collection::Event => "Event",
        }
    }

    /// Sentinel shown for a foreign key that no longer resolves
    pub fn unknown_label(&self) -> String {
        format!("Unknown {}", self.label())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row of one of the five collections
pub trait Entity: Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);
}

/// An entity that can be built from and merged with a partial draft.
///
/// `from_draft` rejects drafts that lack a required field; `apply_draft`
/// merges blindly and leaves it to `validate` to check the merged row.
pub trait Record: Entity + Sized {
    type Draft: Clone + Default;

    fn from_draft(id: Id, draft: Self::Draft) -> Result<Self, ValidationErrors>;
    fn apply_draft(&mut self, draft: Self::Draft);
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Next identifier for a collection: one past the largest id, or 1 when empty.
/// `None` once the largest id is `Id::MAX`.
pub fn next_id<I>(ids: I) -> Option<Id>
where
    I: IntoIterator<Item = Id>,
{
    ids.into_iter().max().unwrap_or(0).checked_add(1)
}

/// Overwrite `slot` when the draft carries a value
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Uploaded profile picture, held in memory only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl ImageBlob {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}
