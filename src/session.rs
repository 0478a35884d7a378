use crate::catalog::Catalog;
use crate::recommend::{Recommendation, Recommender, SessionInterests};
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

const ARTIST_PORTRAIT_URL: &str = "https://images.unsplash.com/photo-1506794778242-f8d80eead658?auto=format&fit=crop&q=80&w=200&h=200";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please login to {0}!")]
    NotConnected(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowedArtist {
    pub name: String,
    pub image_url: String,
}

/// State of the single user session: connection, toggles and search history.
///
/// Every toggle requires a connected session and returns the new membership.
#[derive(Debug, Clone, Default)]
pub struct Session {
    connected: bool,
    search_query: String,
    interests: SessionInterests,
    liked_track_ids: HashSet<String>,
    upvoted: HashSet<String>,
    downvoted: HashSet<String>,
    saved_playlists: HashSet<String>,
    followed_artists: Vec<FollowedArtist>,
}

fn toggle(set: &mut HashSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self) {
        self.connected = true;
    }

    fn require_connection(&self, action: &'static str) -> Result<(), SessionError> {
        if self.connected {
            Ok(())
        } else {
            Err(SessionError::NotConnected(action))
        }
    }

    /// Update the current search text, recording any genre it names
    pub fn search(&mut self, query: &str) -> Option<&'static str> {
        self.search_query = query.to_string();
        self.interests.record_search(query)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn interests(&self) -> &SessionInterests {
        &self.interests
    }

    pub fn liked_track_ids(&self) -> &HashSet<String> {
        &self.liked_track_ids
    }

    pub fn toggle_like(&mut self, track_id: &str) -> Result<bool, SessionError> {
        self.require_connection("like songs")?;
        Ok(toggle(&mut self.liked_track_ids, track_id))
    }

    pub fn toggle_save(&mut self, playlist_id: &str) -> Result<bool, SessionError> {
        self.require_connection("save playlists")?;
        Ok(toggle(&mut self.saved_playlists, playlist_id))
    }

    pub fn is_saved(&self, playlist_id: &str) -> bool {
        self.saved_playlists.contains(playlist_id)
    }

    pub fn toggle_follow(&mut self, artist: &str) -> Result<bool, SessionError> {
        self.require_connection("support artists")?;
        if let Some(pos) = self.followed_artists.iter().position(|a| a.name == artist) {
            self.followed_artists.remove(pos);
            return Ok(false);
        }
        self.followed_artists.push(FollowedArtist {
            name: artist.to_string(),
            image_url: ARTIST_PORTRAIT_URL.to_string(),
        });
        Ok(true)
    }

    pub fn followed_artists(&self) -> &[FollowedArtist] {
        &self.followed_artists
    }

    /// Cast or retract a vote. Voting one way clears a vote the other way;
    /// repeating the same vote retracts it.
    pub fn vote(&mut self, playlist_id: &str, vote: Vote) -> Result<Option<Vote>, SessionError> {
        self.require_connection("vote on playlists")?;
        let (same, opposite) = match vote {
            Vote::Up => (&mut self.upvoted, &mut self.downvoted),
            Vote::Down => (&mut self.downvoted, &mut self.upvoted),
        };

        if same.remove(playlist_id) {
            return Ok(None);
        }
        same.insert(playlist_id.to_string());
        opposite.remove(playlist_id);
        Ok(Some(vote))
    }

    pub fn vote_for(&self, playlist_id: &str) -> Option<Vote> {
        if self.upvoted.contains(playlist_id) {
            Some(Vote::Up)
        } else if self.downvoted.contains(playlist_id) {
            Some(Vote::Down)
        } else {
            None
        }
    }

    /// Recommendations for the current search, likes and interests
    pub fn recommendations<'c, R: Rng + ?Sized>(
        &self,
        recommender: &Recommender,
        catalog: &'c Catalog,
        rng: &mut R,
    ) -> Vec<Recommendation<'c>> {
        recommender.recommend(
            catalog,
            &self.search_query,
            &self.liked_track_ids,
            &self.interests,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn connected() -> Session {
        let mut session = Session::new();
        session.connect();
        session
    }

    #[test]
    fn test_toggles_require_connection() {
        let mut session = Session::new();
        assert_eq!(
            session.toggle_like("t1"),
            Err(SessionError::NotConnected("like songs"))
        );
        assert_eq!(
            session.vote("p1", Vote::Up).unwrap_err().to_string(),
            "Please login to vote on playlists!"
        );
        assert!(session.toggle_save("p1").is_err());
        assert!(session.toggle_follow("Lia").is_err());
        assert!(session.liked_track_ids().is_empty());
    }

    #[test]
    fn test_like_toggles_membership() {
        let mut session = connected();
        assert_eq!(session.toggle_like("t1"), Ok(true));
        assert!(session.liked_track_ids().contains("t1"));
        assert_eq!(session.toggle_like("t1"), Ok(false));
        assert!(session.liked_track_ids().is_empty());
    }

    #[test]
    fn test_votes_are_mutually_exclusive() {
        let mut session = connected();

        assert_eq!(session.vote("p1", Vote::Up), Ok(Some(Vote::Up)));
        assert_eq!(session.vote_for("p1"), Some(Vote::Up));

        assert_eq!(session.vote("p1", Vote::Down), Ok(Some(Vote::Down)));
        assert_eq!(session.vote_for("p1"), Some(Vote::Down));

        assert_eq!(session.vote("p1", Vote::Down), Ok(None));
        assert_eq!(session.vote_for("p1"), None);
    }

    #[test]
    fn test_follow_and_save() {
        let mut session = connected();
        assert_eq!(session.toggle_follow("Soul Cat"), Ok(true));
        assert_eq!(session.followed_artists().len(), 1);
        assert_eq!(session.followed_artists()[0].image_url, ARTIST_PORTRAIT_URL);
        assert_eq!(session.toggle_follow("Soul Cat"), Ok(false));
        assert!(session.followed_artists().is_empty());

        assert_eq!(session.toggle_save("jazz-0"), Ok(true));
        assert!(session.is_saved("jazz-0"));
    }

    #[test]
    fn test_search_feeds_interests_and_recommendations() {
        let mut rng = StdRng::seed_from_u64(21);
        let catalog = Catalog::seeded(&mut rng);
        let mut session = Session::new();

        assert_eq!(session.search("funk"), Some("Funk"));
        assert_eq!(session.search("jazz"), Some("Jazz"));
        assert_eq!(session.search_query(), "jazz");

        let recs = session.recommendations(&Recommender::default(), &catalog, &mut rng);
        assert_eq!(recs.len(), 12);
        assert!(recs[..3].iter().all(|r| r.playlist.genre == "Jazz" && r.tag.is_none()));
        assert!(recs[3..6].iter().all(|r| r.playlist.genre == "Funk" && r.tag.is_some()));
    }
}
