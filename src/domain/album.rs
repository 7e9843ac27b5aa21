use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog entry. `id` is the 1-based position in the source file at load
/// time and shifts when the source is edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u64,
    pub name: String,
    pub image_name: Vec<String>,
    pub release_date: String,
    pub track_list: Vec<Value>,
}

/// Shape of one entry in the source file, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlbum {
    #[serde(default)]
    pub name: String,
    pub image_name: Option<ImageNames>,
    #[serde(default)]
    pub release_date: String,
    pub track_list: Option<Value>,
}

/// `imageName` appears in the source either as a single string or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageNames {
    One(String),
    Many(Vec<String>),
}

impl Album {
    /// Normalizes a raw source entry: `imageName` absent → empty list,
    /// scalar → single-element list; `trackList` missing or not a list →
    /// empty list.
    pub fn from_raw(id: u64, raw: RawAlbum) -> Self {
        let image_name = match raw.image_name {
            None => vec![],
            Some(ImageNames::One(name)) => vec![name],
            Some(ImageNames::Many(names)) => names,
        };
        let track_list = match raw.track_list {
            Some(Value::Array(tracks)) => tracks,
            _ => vec![],
        };
        Self {
            id,
            name: raw.name,
            image_name,
            release_date: raw.release_date,
            track_list,
        }
    }
}
