use serde::{Deserialize, Serialize};
use std::fmt;

/// A single track as shown in a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub label: String,
    pub genre: String,
    pub duration: String,
    pub spotify_url: String,
    pub votes: Option<u32>,
}

/// A playlist with its tracks in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub image_url: String,
    pub genre: String,
    pub tracks: Vec<Track>,
    pub integrity_score: Option<u8>,
    pub votes: Option<u32>,
}

impl Playlist {
    /// Score used for ranking; playlists without one rank as 0
    pub fn ranking_score(&self) -> u8 {
        self.integrity_score.unwrap_or(0)
    }
}

/// Severity of a detected risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        f.write_str(s)
    }
}

/// Kind of promotional pattern a risk factor describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Nepotism,
    Payola,
    Organic,
    #[serde(rename = "Label Dominance")]
    LabelDominance,
    #[serde(other)]
    Other,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskCategory::Nepotism => "Nepotism",
            RiskCategory::Payola => "Payola",
            RiskCategory::Organic => "Organic",
            RiskCategory::LabelDominance => "Label Dominance",
            RiskCategory::Other => "Other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub severity: Severity,
    pub description: String,
}

/// Result of a playlist integrity inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: f64,
    pub summary: String,
    pub risk_factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportLink {
    pub platform: String,
    pub url: String,
}

/// Estimated earnings breakdown for an artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistFinancials {
    pub name: String,
    pub estimated_monthly_earnings: f64,
    pub platform_cut: f64,
    pub label_cut: f64,
    pub artist_take_home: f64,
    pub support_links: Vec<SupportLink>,
    pub fairness_statement: String,
}
