use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// AniList GraphQL endpoint
    #[serde(default = "default_anilist_api_url")]
    pub anilist_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Background image URL handed to the rendering surface
    #[serde(default = "default_background_url")]
    pub background_url: String,

    /// Popularity ceiling used to normalize raw popularity counts
    #[serde(default = "default_max_popularity")]
    pub max_popularity: i64,

    /// Weight of inverse popularity in the obscurity score
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,

    /// Weight of the inverted average rating in the obscurity score
    #[serde(default = "default_score_weight")]
    pub score_weight: f64,

    /// Obscurity bonus per year of title age
    #[serde(default = "default_age_coefficient")]
    pub age_coefficient: f64,

    /// Titles sampled per tier for display
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Longest display title eligible for sampling, in characters
    #[serde(default = "default_title_length_cap")]
    pub title_length_cap: usize,
}

fn default_anilist_api_url() -> String {
    "https://graphql.anilist.co".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_background_url() -> String {
    "https://pbs.twimg.com/media/FWKrBD0XwAELJ_s?format=jpg&name=4096x4096".to_string()
}

fn default_max_popularity() -> i64 {
    800_000
}

fn default_popularity_weight() -> f64 {
    0.70
}

fn default_score_weight() -> f64 {
    0.30
}

fn default_age_coefficient() -> f64 {
    0.007
}

fn default_sample_size() -> usize {
    5
}

fn default_title_length_cap() -> usize {
    40
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
