use crate::models::{Playlist, Track};
use crate::recommend::genres::{GENRES, canonical_genre};
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

const RAP_COVER_IMAGE: &str = "https://images.unsplash.com/photo-1603048588665-791ca8aea617?auto=format&fit=crop&q=80&w=800&h=800";
const SPOTIFY_URL: &str = "https://open.spotify.com";
const TRACK_DURATION: &str = "3:45";
const COMMUNITY_TRACKS: usize = 12;
const CURATED_TRACKS: usize = 10;
const CURATED_INTEGRITY_SCORE: u8 = 100;
const TRACK_ID_SUFFIX_LEN: usize = 9;

/// Errors raised by catalog operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Please name your playlist!")]
    MissingName,

    #[error("Unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("No playlist with id '{0}'")]
    PlaylistNotFound(String),
}

/// Seed data for one genre: playlist names, artist roster and cover images
struct GenreSeed {
    genre: &'static str,
    playlist_names: [&'static str; 6],
    artists: [&'static str; 6],
    image_ids: &'static [&'static str],
}

const GENRE_SEEDS: [GenreSeed; 8] = [
    GenreSeed {
        genre: "Pop",
        playlist_names: ["Pure Pop Integrity", "Synth Pop Wave", "Indie Pop Gems", "Bedroom Pop", "Dreamy Pop", "Bubblegum Fair"],
        artists: ["Lia", "The Spark", "Melody J", "Echo", "Nova", "Sky"],
        image_ids: &["1514525253344-99637cc329df", "1496293455970-f8581aae0e3c", "1526218626217-0fc23b1649b5", "1550684848-fac1c5b4e853", "1485191306462-c5163d11f4d9", "1516062423002-793963289069"],
    },
    GenreSeed {
        genre: "K-Pop",
        playlist_names: ["K-Pop Underground", "Seoul Vibe", "Neo-Generation", "K-RnB Melodies", "Hallyu Core", "Idol Ethics"],
        artists: ["NEO", "StarDust", "Luna8", "AURA", "Zenith", "Pixel"],
        image_ids: &["1533933909048-03373cea48f3", "1492684223066-81342ee5ff30", "1530419248446-2e590176aa78", "1516450360452-9312f5e86fc7", "1594122230689-45899d9e6f69", "1526218626217-0fc23b1649b5"],
    },
    GenreSeed {
        genre: "Funk",
        playlist_names: ["Funk & Soul Fair", "Future Funk Hub", "G-Funk Classics", "Nu-Funk Grooves", "Slap Bass Logic", "Disco Fair"],
        artists: ["Funkadelic Echo", "The Bassline", "Soul Cat", "Groove Theory", "Bootsy Jr", "The One"],
        image_ids: &["1594122230689-45899d9e6f69", "1508700115892-45ecd05ae2ad", "1485191306462-c5163d11f4d9", "1501612722273-7f7229792078", "1493225255756-d9584f8606e9", "1514525253344-99637cc329df"],
    },
    GenreSeed {
        genre: "R&B",
        playlist_names: ["R&B Realness", "Velvet Sessions", "Neo-Soul Roots", "Alternative R&B", "Soul Sync", "Quiet Storm"],
        artists: ["Silky V", "The Harmony", "Amber", "Midnight", "Silk", "Lush"],
        image_ids: &["1493225255756-d9584f8606e9", "1514525253344-99637cc329df", "1470225620780-dba8ba36b745", "1533173053835-267035661414", "1530419248446-2e590176aa78", "1485191306462-c5163d11f4d9"],
    },
    GenreSeed {
        genre: "Hip Hop",
        playlist_names: ["Hip Hop Truth", "Boombap Revival", "UK Drill Vibe", "Conscious Hiphop", "Sample Integrity", "The Golden Era"],
        artists: ["Flow State", "Lyricist X", "The Beat", "Cipher", "Dusty Fingers", "Breakbeat"],
        image_ids: &["1557672172-298e090bd0f1", "1550684848-fac1c5b4e853", "1516062423002-793963289069", "1496293455970-f8581aae0e3c", "1533173053835-267035661414", "1508700115892-45ecd05ae2ad"],
    },
    GenreSeed {
        genre: "Rap",
        playlist_names: ["Rap Radical", "Grime Integrity", "Melodic Rap", "Underground Spitters", "Flow Ethics", "The Realist"],
        artists: ["Ghost Writer", "Spitfire", "Subway Poet", "Verse", "Vanguard", "Prophet"],
        image_ids: &[],
    },
    GenreSeed {
        genre: "Jazz",
        playlist_names: ["Jazz Ethics", "Modern Fusion", "Bop & Beyond", "Cool Jazz Night", "Improv Logic", "The Standard"],
        artists: ["Saxophone Soul", "The Quintet", "Dim Lights", "Miles Ahead", "Coltrane Spirit", "Blue Note"],
        image_ids: &["1511192336575-5a79af651d03", "1511671782779-c97d3d27a1d4", "1525994886773-0305df255a2f", "1516737488042-749d2173bacc", "1445346335515-b454e4c41b63", "1514525253344-99637cc329df"],
    },
    GenreSeed {
        genre: "Classical",
        playlist_names: ["Classical Clarity", "Modern Minimalism", "Romantic Era", "Strings Attached", "Opus Diversity", "Chamber Fairness"],
        artists: ["Symphony No. 5", "Virtuoso", "Strings Attached", "Composer X", "Maestro Y", "Quartet Z"],
        image_ids: &["1516280440614-37939bbacd81", "1507833423374-782c5d3a44ad", "1465847849013-1fa704936a52", "1473186578172-df10de827c66", "1441974231531-c6227db76b6e", "1492684223066-81342ee5ff30"],
    },
];

fn genre_seed(genre: &str) -> Option<&'static GenreSeed> {
    GENRE_SEEDS.iter().find(|seed| seed.genre == genre)
}

fn cover_url(seed: &GenreSeed, index: usize) -> String {
    if seed.image_ids.is_empty() {
        return RAP_COVER_IMAGE.to_string();
    }
    let photo = seed.image_ids[index % seed.image_ids.len()];
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&q=80&w=800&h=800")
}

/// Generates mock tracks with catalog-wide unique ids
struct TrackFactory<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    used_ids: &'r mut HashSet<String>,
}

impl<R: Rng + ?Sized> TrackFactory<'_, R> {
    fn unique_id(&mut self, genre: &str, index: usize) -> String {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        loop {
            let suffix: String = (0..TRACK_ID_SUFFIX_LEN)
                .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
                .collect();
            let id = format!("{}-{}-{}", genre.to_lowercase(), index, suffix);
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn tracks(&mut self, genre: &str, artists: &[&str], count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track {
                id: self.unique_id(genre, i),
                title: format!("{} Anthem #{}", genre, i + 1),
                artist: artists[i % artists.len()].to_string(),
                label: if i % 3 == 0 {
                    "Independent".to_string()
                } else {
                    "Major Distribution".to_string()
                },
                genre: genre.to_string(),
                duration: TRACK_DURATION.to_string(),
                spotify_url: SPOTIFY_URL.to_string(),
                votes: Some(self.rng.gen_range(0..500)),
            })
            .collect()
    }
}

/// Fields a user supplies when curating a playlist
#[derive(Debug, Clone, Default)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub genre: String,
}

/// All playlists known to the application.
///
/// Community playlists are the seeded set followed by user-created ones
/// (newest first). Imported playlists come from the user's streaming account
/// and are never recommended, but their tracks can be liked.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    seeded: Vec<Playlist>,
    curated: Vec<Playlist>,
    imported: Vec<Playlist>,
    track_ids: HashSet<String>,
}

impl Catalog {
    /// Build a catalog from explicit playlists
    #[cfg(test)]
    pub fn from_parts(community: Vec<Playlist>, imported: Vec<Playlist>) -> Self {
        let track_ids = community
            .iter()
            .chain(imported.iter())
            .flat_map(|p| p.tracks.iter().map(|t| t.id.clone()))
            .collect();
        Catalog {
            seeded: community,
            curated: Vec::new(),
            imported,
            track_ids,
        }
    }

    /// Generate the mock community and imported catalog
    pub fn seeded<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut track_ids = HashSet::new();
        let mut seeded = Vec::new();

        for genre in GENRES {
            let Some(seed) = genre_seed(genre) else {
                continue;
            };
            for (i, name) in seed.playlist_names.iter().enumerate() {
                let integrity_score = 68 + rng.gen_range(0..30u8);
                let votes = rng.gen_range(0..100);
                let tracks = TrackFactory {
                    rng: &mut *rng,
                    used_ids: &mut track_ids,
                }
                .tracks(genre, &seed.artists, COMMUNITY_TRACKS);

                seeded.push(Playlist {
                    id: format!("{}-{}", genre.to_lowercase(), i),
                    name: name.to_string(),
                    description: format!(
                        "Community-vetted {genre} tracks focusing on organic growth and artist fairness."
                    ),
                    owner: format!("{}Curator_{}", genre, i + 1),
                    image_url: cover_url(seed, i),
                    genre: genre.to_string(),
                    tracks,
                    integrity_score: Some(integrity_score),
                    votes: Some(votes),
                });
            }
        }

        let imported = Self::imported_playlists(rng, &mut track_ids);
        debug!(
            community = seeded.len(),
            imported = imported.len(),
            tracks = track_ids.len(),
            "Seeded catalog"
        );

        Catalog {
            seeded,
            curated: Vec::new(),
            imported,
            track_ids,
        }
    }

    fn imported_playlists<R: Rng + ?Sized>(
        rng: &mut R,
        track_ids: &mut HashSet<String>,
    ) -> Vec<Playlist> {
        let specs = [
            ("s-p1", "Liked Songs", "Your collected tracks from Spotify.", "You", "1514525253344-99637cc329df", "Various", "Mixed", "Various Artists", 50),
            ("s-p2", "Discover Weekly", "Spotify algorithms suggestion.", "Spotify", "1526218626217-0fc23b1649b5", "Mixed", "Pop", "Algo Gen", 30),
            ("s-p3", "Party Mix", "Your saved party playlist.", "You", "1493225255756-d9584f8606e9", "Hip Hop", "Hip Hop", "Party DJ", 25),
        ];

        specs
            .into_iter()
            .map(|(id, name, description, owner, photo, genre, track_genre, artist, count)| {
                let tracks = TrackFactory {
                    rng: &mut *rng,
                    used_ids: &mut *track_ids,
                }
                .tracks(track_genre, &[artist], count);
                Playlist {
                    id: id.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                    owner: owner.to_string(),
                    image_url: format!(
                        "https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&q=80&w=800&h=800"
                    ),
                    genre: genre.to_string(),
                    tracks,
                    integrity_score: None,
                    votes: None,
                }
            })
            .collect()
    }

    /// Seeded community playlists followed by user-created ones
    pub fn community_playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.seeded.iter().chain(self.curated.iter())
    }

    /// Community playlists followed by imported ones
    pub fn all_playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.community_playlists().chain(self.imported.iter())
    }

    /// Playlists the user created this session, newest first
    pub fn curated_playlists(&self) -> &[Playlist] {
        &self.curated
    }

    pub fn find_playlist(&self, id: &str) -> Result<&Playlist, CatalogError> {
        self.all_playlists()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::PlaylistNotFound(id.to_string()))
    }

    /// Resolve liked track ids to tracks in catalog order, each at most once
    pub fn resolve_tracks(&self, track_ids: &HashSet<String>) -> Vec<&Track> {
        let mut seen = HashSet::new();
        self.all_playlists()
            .flat_map(|p| p.tracks.iter())
            .filter(|t| track_ids.contains(&t.id) && seen.insert(t.id.as_str()))
            .collect()
    }

    /// Sum of community votes on an artist's unique tracks, plus one per
    /// track the user liked
    pub fn artist_total_likes(&self, artist: &str, liked_track_ids: &HashSet<String>) -> u64 {
        let mut seen = HashSet::new();
        self.all_playlists()
            .flat_map(|p| p.tracks.iter())
            .filter(|t| t.artist == artist && seen.insert(t.id.as_str()))
            .map(|t| {
                let liked = u64::from(liked_track_ids.contains(&t.id));
                u64::from(t.votes.unwrap_or(0)) + liked
            })
            .sum()
    }

    /// Add a user-curated playlist and return it
    pub fn create_playlist<R: Rng + ?Sized>(
        &mut self,
        request: NewPlaylist,
        owner: &str,
        rng: &mut R,
    ) -> Result<&Playlist, CatalogError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CatalogError::MissingName);
        }
        let genre = canonical_genre(&request.genre)
            .ok_or_else(|| CatalogError::UnknownGenre(request.genre.clone()))?;
        let seed = genre_seed(genre).ok_or_else(|| CatalogError::UnknownGenre(genre.to_string()))?;

        let mut millis = chrono::Utc::now().timestamp_millis();
        let id = loop {
            let candidate = format!("curated-{millis}");
            if self.all_playlists().all(|p| p.id != candidate) {
                break candidate;
            }
            millis += 1;
        };

        let tracks = TrackFactory {
            rng,
            used_ids: &mut self.track_ids,
        }
        .tracks(genre, &seed.artists, CURATED_TRACKS);

        let playlist = Playlist {
            id,
            name: name.to_string(),
            description: request.description,
            owner: owner.to_string(),
            image_url: cover_url(seed, 0),
            genre: genre.to_string(),
            tracks,
            integrity_score: Some(CURATED_INTEGRITY_SCORE),
            votes: Some(0),
        };
        debug!(id = %playlist.id, genre, "Created curated playlist");

        self.curated.insert(0, playlist);
        Ok(&self.curated[0])
    }
}
