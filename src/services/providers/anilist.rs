/// AniList GraphQL provider
///
/// Fetches a user's complete anime list collection in one query and
/// normalizes it into `WatchedTitle` records on the way out. AniList signals
/// "no such user" through the GraphQL `errors` array, so any error payload
/// is mapped to `AppError::UserNotFound` rather than inspected further.
use reqwest::Client as HttpClient;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{
        anilist::{GraphQlResponse, Media, MediaListCollection},
        WatchStatus, WatchedTitle,
    },
    services::providers::CatalogProvider,
};

/// Media format AniList uses for music videos
const MUSIC_FORMAT: &str = "MUSIC";

/// Substrings marking sequel/part re-releases, matched case-insensitively
/// against the English title
const SEQUEL_MARKERS: [&str; 2] = ["season", "cour"];

const WATCH_HISTORY_QUERY: &str = r#"
query ($username: String) {
  MediaListCollection(userName: $username, type: ANIME) {
    lists {
      status
      entries {
        media {
          id
          title {
            romaji
            english
          }
          popularity
          startDate {
            year
          }
          averageScore
          rankings {
            rank
            allTime
          }
          isAdult
          format
        }
      }
    }
  }
}
"#;

/// Watch statuses whose entries count as watched
#[derive(Debug, Clone)]
pub struct InclusionPolicy {
    pub accepted_statuses: Vec<WatchStatus>,
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            accepted_statuses: vec![WatchStatus::Completed, WatchStatus::Current],
        }
    }
}

#[derive(Clone)]
pub struct AniListProvider {
    http_client: HttpClient,
    api_url: String,
    policy: InclusionPolicy,
}

impl AniListProvider {
    pub fn new(api_url: String, policy: InclusionPolicy) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            policy,
        }
    }

    /// Flattens the status groups into normalized records, applying the
    /// inclusion filters along the way. Group order and entry order are
    /// preserved; nothing is sorted here.
    fn normalize(&self, collection: MediaListCollection) -> Vec<WatchedTitle> {
        collection
            .lists
            .into_iter()
            .flat_map(|group| {
                let status = group.status;
                group
                    .entries
                    .into_iter()
                    .map(move |entry| (status, entry.media))
            })
            .filter_map(|(status, media)| normalize_entry(status, media))
            .filter(|title| self.includes(title))
            .collect()
    }

    fn includes(&self, title: &WatchedTitle) -> bool {
        if title.is_adult || title.media_format == MUSIC_FORMAT {
            return false;
        }

        let english = title.title_english.to_lowercase();
        if SEQUEL_MARKERS.iter().any(|marker| english.contains(marker)) {
            return false;
        }

        self.policy.accepted_statuses.contains(&title.status)
    }
}

/// Builds one record from a raw entry.
///
/// `None` drops entries no usable record can be made from: no title in
/// either language, or no release year to age the title by.
fn normalize_entry(status: WatchStatus, media: Media) -> Option<WatchedTitle> {
    let romaji = media.title.romaji.unwrap_or_default();
    let english = media.title.english.unwrap_or_default();
    if romaji.is_empty() && english.is_empty() {
        return None;
    }

    let release_year = media.start_date.and_then(|date| date.year)?;
    let rank = media
        .rankings
        .iter()
        .find(|ranking| ranking.all_time)
        .map(|ranking| ranking.rank);

    let title_romaji = if romaji.is_empty() {
        english.clone()
    } else {
        romaji.clone()
    };
    let title_english = if english.is_empty() { romaji } else { english };

    Some(WatchedTitle {
        title_romaji,
        title_english,
        id: media.id,
        rank,
        popularity: media.popularity,
        release_year,
        average_score: media.average_score.unwrap_or(0.0),
        is_adult: media.is_adult,
        status,
        media_format: media.format.unwrap_or_default(),
    })
}

#[async_trait::async_trait]
impl CatalogProvider for AniListProvider {
    async fn fetch_watch_history(&self, username: &str) -> AppResult<Vec<WatchedTitle>> {
        let body = json!({
            "query": WATCH_HISTORY_QUERY,
            "variables": { "username": username },
        });

        let response = self
            .http_client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await?;

        // AniList answers unknown users with a JSON error payload, not a bare
        // transport failure, so parse the body before judging the status.
        let payload: GraphQlResponse = response.json().await.map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse AniList response: {}", e))
        })?;

        if let Some(errors) = payload.errors {
            let message = errors
                .first()
                .map(|error| error.message.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(
                username = %username,
                error = %message,
                provider = "anilist",
                "AniList rejected the query"
            );
            return Err(AppError::UserNotFound(format!(
                "User '{}' not found",
                username
            )));
        }

        let collection = payload
            .data
            .and_then(|data| data.media_list_collection)
            .ok_or_else(|| {
                AppError::UserNotFound(format!("User '{}' not found", username))
            })?;

        let titles = self.normalize(collection);

        tracing::info!(
            username = %username,
            normalized = titles.len(),
            provider = "anilist",
            "Watch history normalized"
        );

        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "anilist"
    }
}
