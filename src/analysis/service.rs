use super::prompts::{financials_prompt, financials_schema, integrity_prompt, integrity_schema};
use super::retry::{RetryPolicy, with_retry};
use crate::client::InferenceBackend;
use crate::models::{AnalysisResult, ArtistFinancials, Playlist, RiskCategory, RiskFactor, Severity};
use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

/// Phrases that mark a summary as critical of a playlist's fairness
const CRITICAL_MARKERS: [&str; 8] = [
    "industrial loop",
    "unfair",
    "dominated by",
    "lack of diversity",
    "lacks diversity",
    "corporate-only",
    "corporate only",
    "high risk",
];

/// Scores at or above this contradict a critical summary outright
const CONTRADICTION_THRESHOLD: f64 = 90.0;
/// A critical summary should come with a score below this
const CRITICAL_SCORE_CEILING: f64 = 60.0;

/// Returned when a playlist inspection cannot be completed
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        score: 0.0,
        summary: "Inspection failed due to network saturation or quota limits. Please try again in a moment.".to_string(),
        risk_factors: vec![RiskFactor {
            category: RiskCategory::LabelDominance,
            severity: Severity::High,
            description: "System currently overwhelmed by requests.".to_string(),
        }],
    }
}

/// Returned when an artist estimate cannot be completed
pub fn fallback_financials(artist_name: &str) -> ArtistFinancials {
    ArtistFinancials {
        name: artist_name.to_string(),
        estimated_monthly_earnings: 0.0,
        platform_cut: 0.0,
        label_cut: 0.0,
        artist_take_home: 0.0,
        support_links: Vec::new(),
        fairness_statement: "Unable to retrieve financial estimates at this time.".to_string(),
    }
}

/// Whether a summary reads as critical of diversity or fairness
pub fn summary_is_critical(summary: &str) -> bool {
    let summary = summary.to_lowercase();
    CRITICAL_MARKERS.iter().any(|marker| summary.contains(marker))
}

fn parse_json<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text.trim()).with_context(|| format!("Malformed {what} response"))
}

/// Reject or normalize an analysis the backend returned
fn validate_analysis(mut result: AnalysisResult) -> Result<AnalysisResult> {
    if !result.score.is_finite() {
        bail!("Analysis score is not a finite number");
    }
    result.score = result.score.clamp(0.0, 100.0);

    if summary_is_critical(&result.summary) {
        if result.score >= CONTRADICTION_THRESHOLD {
            bail!(
                "Contradictory analysis: critical summary with score {}",
                result.score
            );
        }
        if result.score >= CRITICAL_SCORE_CEILING {
            warn!(
                score = result.score,
                "Critical summary came with a score above {CRITICAL_SCORE_CEILING}"
            );
        }
    }
    Ok(result)
}

/// Playlist and artist analysis backed by an inference service.
///
/// Both operations always return a renderable value: failures that survive
/// the retry policy are replaced by a fixed fallback.
pub struct AnalysisClient<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: InferenceBackend> AnalysisClient<B> {
    pub fn new(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Inspect a playlist for payola and nepotism patterns
    pub async fn analyze_playlist_integrity(&self, playlist: &Playlist) -> AnalysisResult {
        match self.request_integrity(playlist).await {
            Ok(result) => {
                info!(playlist = %playlist.id, score = result.score, "Inspection complete");
                result
            }
            Err(e) => {
                error!(playlist = %playlist.id, error = %format!("{e:#}"), "Inspection failed after retries");
                fallback_analysis()
            }
        }
    }

    /// Estimate what an artist earns from streaming and who takes a cut
    pub async fn estimate_artist_financials(&self, artist_name: &str, label: &str) -> ArtistFinancials {
        match self.request_financials(artist_name, label).await {
            Ok(financials) => financials,
            Err(e) => {
                error!(artist = %artist_name, error = %format!("{e:#}"), "Financial estimate failed after retries");
                fallback_financials(artist_name)
            }
        }
    }

    async fn request_integrity(&self, playlist: &Playlist) -> Result<AnalysisResult> {
        let prompt = integrity_prompt(playlist);
        let schema = integrity_schema();
        let (backend, prompt, schema) = (&self.backend, &prompt, &schema);

        with_retry(self.policy, || async move {
            let text = backend.generate_json(prompt, schema).await?;
            validate_analysis(parse_json(&text, "analysis")?)
        })
        .await
    }

    async fn request_financials(&self, artist_name: &str, label: &str) -> Result<ArtistFinancials> {
        let prompt = financials_prompt(artist_name, label);
        let schema = financials_schema();
        let (backend, prompt, schema) = (&self.backend, &prompt, &schema);

        with_retry(self.policy, || async move {
            let text = backend.generate_json(prompt, schema).await?;
            parse_json(&text, "financials")
        })
        .await
    }
}
