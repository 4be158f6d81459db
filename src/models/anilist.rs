//! Raw AniList GraphQL wire types
//!
//! Field names mirror the GraphQL schema; serde renames cover the camelCase
//! payload. Normalization into `WatchedTitle` lives with the AniList
//! provider.

use serde::Deserialize;

use super::WatchStatus;

/// Top-level GraphQL envelope
///
/// AniList reports "user not found" through the `errors` array rather than
/// the transport layer, so both halves are optional.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    pub media_list_collection: Option<MediaListCollection>,
}

/// A user's anime lists, grouped by watch status
#[derive(Debug, Deserialize)]
pub struct MediaListCollection {
    #[serde(default)]
    pub lists: Vec<MediaListGroup>,
}

#[derive(Debug, Deserialize)]
pub struct MediaListGroup {
    pub status: WatchStatus,
    #[serde(default)]
    pub entries: Vec<MediaListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MediaListEntry {
    pub media: Media,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub title: MediaTitle,
    #[serde(default)]
    pub popularity: i64,
    #[serde(default)]
    pub start_date: Option<FuzzyDate>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub rankings: Vec<MediaRank>,
    #[serde(default)]
    pub is_adult: bool,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
}

/// AniList dates may be partially filled in; only the year matters here
#[derive(Debug, Deserialize)]
pub struct FuzzyDate {
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRank {
    pub rank: i32,
    #[serde(default)]
    pub all_time: bool,
}
