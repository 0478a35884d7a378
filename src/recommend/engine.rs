use super::affinity::liked_genres;
use super::genres::{SessionInterests, match_genre};
use crate::catalog::Catalog;
use crate::models::Playlist;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Why a playlist was surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTag {
    BasedOnTaste,
}

impl fmt::Display for RecommendationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationTag::BasedOnTaste => f.write_str("BASED ON TASTE"),
        }
    }
}

/// A playlist chosen for display, decorated for this render only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub playlist: &'a Playlist,
    pub tag: Option<RecommendationTag>,
}

/// Selects and orders community playlists for the user
#[derive(Debug, Clone)]
pub struct Recommender {
    /// Upper bound on the returned list
    pub max_results: usize,
    /// Playlists taken from each matched or personalized genre
    pub per_genre: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            max_results: 12,
            per_genre: 3,
        }
    }
}

impl Recommender {
    #[cfg(test)]
    pub fn new(max_results: usize, per_genre: usize) -> Self {
        Self {
            max_results,
            per_genre,
        }
    }

    /// Produce the recommendation list.
    ///
    /// The list starts with the best playlists of the genre the current query
    /// names (untagged), followed by a shuffled pool drawn from the session's
    /// search interests and the user's most-liked genres (tagged
    /// [`RecommendationTag::BasedOnTaste`]), and is backfilled with the
    /// highest-scoring remaining community playlists. No playlist appears twice
    /// and the list never exceeds `max_results`.
    pub fn recommend<'c, R: Rng + ?Sized>(
        &self,
        catalog: &'c Catalog,
        search_query: &str,
        liked_track_ids: &HashSet<String>,
        session_interests: &SessionInterests,
        rng: &mut R,
    ) -> Vec<Recommendation<'c>> {
        let favorites = catalog.resolve_tracks(liked_track_ids);
        let liked = liked_genres(favorites.iter().copied());
        let active_match = match_genre(search_query);

        let mut seen: HashSet<&str> = HashSet::new();

        let top_group = match active_match {
            Some(genre) => self.select_from_genre(catalog, genre, None, &mut seen),
            None => Vec::new(),
        };

        let mut personalized = Vec::new();
        for genre in session_interests.iter() {
            if active_match != Some(genre) {
                personalized.extend(self.select_from_genre(
                    catalog,
                    genre,
                    Some(RecommendationTag::BasedOnTaste),
                    &mut seen,
                ));
            }
        }
        for genre in &liked {
            if active_match != Some(genre.as_str()) && !session_interests.contains(genre) {
                personalized.extend(self.select_from_genre(
                    catalog,
                    genre,
                    Some(RecommendationTag::BasedOnTaste),
                    &mut seen,
                ));
            }
        }
        personalized.shuffle(rng);

        debug!(
            active_match = ?active_match,
            liked_genres = ?liked,
            top = top_group.len(),
            personalized = personalized.len(),
            "Built recommendation pools"
        );

        let mut selection = top_group;
        selection.extend(personalized);

        if selection.len() < self.max_results {
            let mut fillers: Vec<&Playlist> = catalog
                .community_playlists()
                .filter(|p| !seen.contains(p.id.as_str()))
                .collect();
            fillers.sort_by(|a, b| b.ranking_score().cmp(&a.ranking_score()));

            let remaining = self.max_results - selection.len();
            selection.extend(fillers.into_iter().take(remaining).map(|playlist| {
                Recommendation {
                    playlist,
                    tag: None,
                }
            }));
        }

        selection.truncate(self.max_results);
        selection
    }

    /// Best unseen community playlists of `genre`, marked as seen
    fn select_from_genre<'c>(
        &self,
        catalog: &'c Catalog,
        genre: &str,
        tag: Option<RecommendationTag>,
        seen: &mut HashSet<&'c str>,
    ) -> Vec<Recommendation<'c>> {
        let mut candidates: Vec<&Playlist> = catalog
            .community_playlists()
            .filter(|p| p.genre == genre && !seen.contains(p.id.as_str()))
            .collect();
        candidates.sort_by(|a, b| b.ranking_score().cmp(&a.ranking_score()));
        candidates.truncate(self.per_genre);

        candidates
            .into_iter()
            .map(|playlist| {
                seen.insert(playlist.id.as_str());
                Recommendation { playlist, tag }
            })
            .collect()
    }
}
