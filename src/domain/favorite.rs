use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A user-curated annotation about an album: which one, by whom, and the
/// listener's own notes. Free-standing, not a reference into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: u64,
    pub name: String,
    pub artist: String,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub favorite_song: Option<String>,
    #[serde(default)]
    pub listen_completed: bool,
    #[serde(default)]
    pub commented: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Create input. `name` and `artist` are validated at create time; any
/// client-supplied `id` is dropped here by not having a slot for it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDraft {
    pub name: Option<String>,
    pub artist: Option<String>,
    #[serde(default)]
    pub favorite_song: Option<String>,
    #[serde(default)]
    pub listen_completed: Option<bool>,
    #[serde(default)]
    pub commented: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial update. Each slot is independently present or absent; for the
/// clearable text fields the double option distinguishes "omitted"
/// (outer `None`) from "explicitly set to null" (`Some(None)`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePatch {
    pub name: Option<String>,
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub favorite_song: Option<Option<String>>,
    pub listen_completed: Option<bool>,
    pub commented: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub comment: Option<Option<String>>,
}

/// Wraps any deserialized value in `Some`, so a field that appears in the
/// payload always yields `Some(..)` even when its value is `null`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Next unique id for the collection: one past the current maximum.
/// Ids of deleted records may be reused after a restart; callers never
/// supply ids, so allocation stays collision-free within the collection.
pub fn next_id(records: &[Favorite]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
