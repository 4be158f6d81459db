use serde::{Deserialize, Serialize};

pub mod anilist;

/// Watch-list status on AniList
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    Completed,
    Current,
    Paused,
    Dropped,
    Planning,
    Repeating,
}

/// Display language preference supplied by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Romaji,
}

/// A normalized watch-history entry
///
/// Produced once by the normalizer and read-only afterwards. At least one of
/// the two title fields is non-empty; entries lacking both are dropped
/// upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedTitle {
    pub title_romaji: String,
    pub title_english: String,
    /// Source catalog identifier, opaque
    pub id: i64,
    /// Best all-time ranking, when the source exposes one
    pub rank: Option<i32>,
    pub popularity: i64,
    pub release_year: i32,
    /// Source rating on a 0-100 scale
    pub average_score: f64,
    pub is_adult: bool,
    pub status: WatchStatus,
    pub media_format: String,
}

impl WatchedTitle {
    /// Primary display text: romaji with English fallback
    pub fn display_title(&self) -> &str {
        if self.title_romaji.is_empty() {
            &self.title_english
        } else {
            &self.title_romaji
        }
    }

    /// Text rendered on the poster for the given language preference,
    /// falling back to the other field when the preferred one is empty.
    pub fn rendered_title(&self, language: Language) -> &str {
        let (preferred, fallback) = match language {
            Language::English => (&self.title_english, &self.title_romaji),
            Language::Romaji => (&self.title_romaji, &self.title_english),
        };
        if preferred.is_empty() {
            fallback
        } else {
            preferred
        }
    }
}

/// One of the 8 ordered obscurity tiers, shallowest to deepest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Sky,
    High,
    Surface,
    Shallow,
    Mid,
    Deep,
    Trench,
    Abyss,
}

impl Tier {
    /// All tiers in depth order
    pub const ALL: [Tier; 8] = [
        Tier::Sky,
        Tier::High,
        Tier::Surface,
        Tier::Shallow,
        Tier::Mid,
        Tier::Deep,
        Tier::Trench,
        Tier::Abyss,
    ];

    /// Position in depth order, 0 = shallowest
    pub fn index(self) -> usize {
        self as usize
    }

    /// Poster label
    pub fn label(self) -> &'static str {
        match self {
            Tier::Sky => "Tier 1 (Sky)",
            Tier::High => "Tier 2 (High)",
            Tier::Surface => "Tier 3 (Surface)",
            Tier::Shallow => "Tier 4 (Shallow)",
            Tier::Mid => "Tier 5 (Mid)",
            Tier::Deep => "Tier 6 (Deep)",
            Tier::Trench => "Tier 7 (Trench)",
            Tier::Abyss => "Tier 8 (Abyss)",
        }
    }
}

/// Horizontal anchoring of one placed line of text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Right,
    Center,
}

/// One positioned piece of text destined for the rendering surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementInstruction {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: HorizontalAlign,
}

/// Share of the classified set landing in one tier
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TierShare {
    pub tier: Tier,
    pub label: &'static str,
    pub count: usize,
    /// Rounded to two decimals; absent when the classified set is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// Per-tier counts and percentages over the full classified set
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TierBreakdown {
    pub total: usize,
    pub tiers: Vec<TierShare>,
}

impl std::fmt::Display for TierBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} titles classified", self.total)?;
        for share in &self.tiers {
            match share.percentage {
                Some(pct) => writeln!(f, "{}: {} ({:.2}%)", share.label, share.count, pct)?,
                None => writeln!(f, "{}: {}", share.label, share.count)?,
            }
        }
        Ok(())
    }
}

/// Request to build an iceberg for one user
#[derive(Debug, Deserialize)]
pub struct IcebergRequest {
    pub username: String,
    #[serde(default = "default_language")]
    pub language: Language,
}

fn default_language() -> Language {
    Language::English
}

/// Per-tier slice of the iceberg response
#[derive(Debug, Serialize)]
pub struct TierSummary {
    pub tier: Tier,
    pub label: &'static str,
    /// Titles classified into this tier before sampling
    pub classified: usize,
    /// Display titles chosen for the poster
    pub samples: Vec<String>,
}

/// Everything the rendering surface consumes for one poster
#[derive(Debug, Serialize)]
pub struct IcebergResponse {
    pub caption: String,
    pub background: String,
    /// Suggested filename when the rendered poster is exported
    pub filename: String,
    pub tiers: Vec<TierSummary>,
    pub placements: Vec<PlacementInstruction>,
    pub stats: TierBreakdown,
}
