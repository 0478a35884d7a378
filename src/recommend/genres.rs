/// The fixed set of genres the catalog is organised by, in matching priority order
pub const GENRES: [&str; 8] = [
    "Pop",
    "K-Pop",
    "Funk",
    "R&B",
    "Hip Hop",
    "Rap",
    "Jazz",
    "Classical",
];

/// Queries shorter than this never register a session interest
const MIN_INTEREST_QUERY_LEN: usize = 3;

/// Find the genre a search query refers to.
///
/// The query is trimmed and lowercased; it matches a genre when it equals the
/// genre name or contains it as a substring. The first genre in [`GENRES`]
/// order wins, so "k-pop" resolves to "Pop".
pub fn match_genre(query: &str) -> Option<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    GENRES.iter().copied().find(|genre| {
        let genre = genre.to_lowercase();
        query == genre || query.contains(&genre)
    })
}

/// The canonical spelling of a known genre
pub fn canonical_genre(genre: &str) -> Option<&'static str> {
    let genre = genre.trim();
    GENRES.iter().copied().find(|g| g.eq_ignore_ascii_case(genre))
}

/// Genres inferred from the user's searches during this session.
///
/// Append-only: genres keep the order they were first searched for and are
/// never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInterests {
    genres: Vec<String>,
}

impl SessionInterests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a search query, returning the genre it added (if any)
    pub fn record_search(&mut self, query: &str) -> Option<&'static str> {
        let normalized = query.trim().to_lowercase();
        if normalized.chars().count() < MIN_INTEREST_QUERY_LEN {
            return None;
        }

        let genre = match_genre(&normalized)?;
        if self.contains(genre) {
            return None;
        }
        self.genres.push(genre.to_string());
        Some(genre)
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SessionInterests {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut interests = SessionInterests::new();
        for genre in iter {
            let genre = genre.as_ref();
            if !interests.contains(genre) {
                interests.genres.push(genre.to_string());
            }
        }
        interests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_substring_matches() {
        assert_eq!(match_genre("jazz"), Some("Jazz"));
        assert_eq!(match_genre("  JAZZ  "), Some("Jazz"));
        assert_eq!(match_genre("late night jazz vibes"), Some("Jazz"));
        assert_eq!(match_genre("hip hop classics"), Some("Hip Hop"));
        assert_eq!(match_genre("r&b"), Some("R&B"));
        assert_eq!(match_genre("polka"), None);
        assert_eq!(match_genre(""), None);
        assert_eq!(match_genre("   "), None);
    }

    #[test]
    fn test_first_genre_in_list_order_wins() {
        // "k-pop" contains "pop", and Pop precedes K-Pop
        assert_eq!(match_genre("k-pop"), Some("Pop"));
        // "trap" contains "rap"
        assert_eq!(match_genre("trap"), Some("Rap"));
    }

    #[test]
    fn test_canonical_genre() {
        assert_eq!(canonical_genre("hip hop"), Some("Hip Hop"));
        assert_eq!(canonical_genre("Mixed"), None);
        assert_eq!(canonical_genre(" CLASSICAL "), Some("Classical"));
        assert_eq!(canonical_genre("Various"), None);
    }

    #[test]
    fn test_record_search_only_grows_without_duplicates() {
        let mut interests = SessionInterests::new();

        assert_eq!(interests.record_search("funk"), Some("Funk"));
        assert_eq!(interests.record_search("some FUNK please"), None);
        assert_eq!(interests.record_search("jazz"), Some("Jazz"));
        assert_eq!(interests.record_search("nothing here"), None);

        let genres: Vec<&str> = interests.iter().collect();
        assert_eq!(genres, vec!["Funk", "Jazz"]);
    }

    #[test]
    fn test_short_queries_are_ignored() {
        let mut interests = SessionInterests::new();
        assert_eq!(interests.record_search("po"), None);
        assert_eq!(interests.record_search(" r "), None);
        assert!(interests.is_empty());

        assert_eq!(interests.record_search("rap"), Some("Rap"));
        assert_eq!(interests.len(), 1);
    }

    #[test]
    fn test_from_iter_dedups() {
        let interests: SessionInterests = ["Jazz", "Funk", "Jazz"].into_iter().collect();
        assert_eq!(interests.iter().collect::<Vec<_>>(), vec!["Jazz", "Funk"]);
    }
}
