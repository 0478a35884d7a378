use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod analysis;
mod catalog;
mod client;
mod config;
mod models;
mod recommend;
mod session;

use crate::analysis::{AnalysisClient, RetryPolicy, integrity_breakdown};
use crate::catalog::{Catalog, NewPlaylist};
use crate::client::GeminiClient;
use crate::config::{Config, load_config};
use crate::models::{AnalysisResult, ArtistFinancials, Playlist};
use crate::recommend::{Recommendation, Recommender};
use crate::session::{Session, Vote};

const CURATOR_NAME: &str = "John Doe";

#[derive(Parser)]
#[command(name = "echofair")]
#[command(about = "Music fairness dashboard: fair playlist discovery and integrity analysis")]
#[command(version)]
struct Args {
    /// Seed for catalog generation and shuffling (random when omitted)
    #[arg(short = 's', long = "seed", global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List community and imported playlists
    Catalog {
        /// Also print every track
        #[arg(short = 't', long = "tracks")]
        tracks: bool,
    },

    /// Show the recommendation feed for a simulated session
    Recommend {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Create a playlist, then show the feed including it
    Create {
        /// Name of the new playlist
        #[arg(short = 'n', long = "name", default_value = "")]
        name: String,

        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,

        #[arg(short = 'g', long = "genre", default_value = "Pop")]
        genre: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Run an integrity inspection on a playlist
    Analyze {
        /// Playlist id, e.g. "jazz-0" or "s-p2"
        playlist_id: String,
    },

    /// Estimate how much an artist earns from streaming
    Financials {
        artist: String,

        #[arg(short = 'l', long = "label", default_value = "Independent")]
        label: String,

        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Current search text
    #[arg(short = 'q', long = "query", default_value = "")]
    query: String,

    /// Earlier searches this session (repeatable)
    #[arg(long = "search")]
    searches: Vec<String>,

    /// Liked track ids (repeatable)
    #[arg(long = "like")]
    likes: Vec<String>,

    /// Like the first tracks of every playlist in this genre
    #[arg(long = "like-genre")]
    like_genre: Option<String>,

    /// How many tracks --like-genre likes
    #[arg(long = "count", default_value_t = 5)]
    like_count: usize,

    /// Saved playlist ids (repeatable)
    #[arg(long = "save")]
    saves: Vec<String>,

    /// Upvoted playlist ids (repeatable)
    #[arg(long = "upvote")]
    upvotes: Vec<String>,

    /// Downvoted playlist ids (repeatable)
    #[arg(long = "downvote")]
    downvotes: Vec<String>,

    /// Followed artists (repeatable)
    #[arg(long = "follow")]
    follows: Vec<String>,
}

impl SessionArgs {
    /// Replay the described activity into a fresh, connected session
    fn build_session(&self, catalog: &Catalog) -> Result<Session> {
        let mut session = Session::new();
        session.connect();

        for search in &self.searches {
            if let Some(genre) = session.search(search) {
                info!(genre, "Registered session interest");
            }
        }

        for track_id in &self.likes {
            session.toggle_like(track_id)?;
        }

        if let Some(genre) = &self.like_genre {
            let track_ids: Vec<String> = catalog
                .community_playlists()
                .filter(|p| p.genre.eq_ignore_ascii_case(genre))
                .flat_map(|p| p.tracks.iter())
                .take(self.like_count)
                .map(|t| t.id.clone())
                .collect();
            for track_id in &track_ids {
                if !session.liked_track_ids().contains(track_id) {
                    session.toggle_like(track_id)?;
                }
            }
        }

        for playlist_id in &self.saves {
            session.toggle_save(playlist_id)?;
        }
        for playlist_id in &self.upvotes {
            session.vote(playlist_id, Vote::Up)?;
        }
        for playlist_id in &self.downvotes {
            session.vote(playlist_id, Vote::Down)?;
        }
        for artist in &self.follows {
            session.toggle_follow(artist)?;
        }

        session.search(&self.query);
        Ok(session)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echofair=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Args::parse(), load_config).await
}

/// Execute one command. Configuration is only loaded by commands that call
/// the inference service.
async fn run<L>(args: Args, load_config: L) -> Result<()>
where
    L: Fn() -> Result<Config>,
{
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut catalog = Catalog::seeded(&mut rng);

    match args.command {
        Command::Catalog { tracks } => print_catalog(&catalog, tracks),
        Command::Recommend { session } => {
            let session = session.build_session(&catalog)?;
            let recs = session.recommendations(&Recommender::default(), &catalog, &mut rng);
            print_recommendations(&session, &recs);
        }
        Command::Create {
            name,
            description,
            genre,
            session,
        } => {
            let created = catalog
                .create_playlist(
                    NewPlaylist {
                        name,
                        description,
                        genre,
                    },
                    CURATOR_NAME,
                    &mut rng,
                )
                .context("Could not create playlist")?;
            println!("✓ Created playlist '{}' (ID: {})", created.name, created.id);

            println!("\nYour playlists:");
            for playlist in catalog.curated_playlists() {
                println!(
                    "   {} ({}) [{}] {} tracks",
                    playlist.name,
                    playlist.id,
                    playlist.genre,
                    playlist.tracks.len()
                );
            }

            let session = session.build_session(&catalog)?;
            let recs = session.recommendations(&Recommender::default(), &catalog, &mut rng);
            print_recommendations(&session, &recs);
        }
        Command::Analyze { playlist_id } => {
            let playlist = catalog.find_playlist(&playlist_id)?;
            let client = analysis_client(&load_config()?)?;
            println!("Inspecting '{}' ({} tracks)...", playlist.name, playlist.tracks.len());
            let result = client.analyze_playlist_integrity(playlist).await;
            print_analysis(playlist, &result);
        }
        Command::Financials {
            artist,
            label,
            session,
        } => {
            let session = session.build_session(&catalog)?;
            let likes = catalog.artist_total_likes(&artist, session.liked_track_ids());
            let client = analysis_client(&load_config()?)?;
            println!("Estimating financials for '{artist}' ({label})...");
            let financials = client.estimate_artist_financials(&artist, &label).await;
            print_financials(&financials, likes);
        }
    }

    Ok(())
}

fn analysis_client(config: &Config) -> Result<AnalysisClient<GeminiClient>> {
    let backend = GeminiClient::new(config)?;
    info!(model = backend.model(), "Using inference backend");
    let policy = RetryPolicy::new(config.max_attempts, config.initial_delay);
    Ok(AnalysisClient::new(backend, policy))
}

fn score_display(playlist: &Playlist) -> String {
    playlist
        .integrity_score
        .map(|s| format!("{s}/100"))
        .unwrap_or_else(|| "unscored".to_string())
}

fn print_catalog(catalog: &Catalog, with_tracks: bool) {
    println!("\n=== CATALOG ===");
    for playlist in catalog.all_playlists() {
        println!(
            "{:<14} {:<24} [{}] integrity {} | {} tracks | by {}",
            playlist.id,
            playlist.name,
            playlist.genre,
            score_display(playlist),
            playlist.tracks.len(),
            playlist.owner
        );
        if with_tracks {
            for track in &playlist.tracks {
                println!(
                    "     {} \"{}\" by {} ({}) {}",
                    track.id, track.title, track.artist, track.label, track.duration
                );
            }
        }
    }
}

fn print_recommendations(session: &Session, recs: &[Recommendation]) {
    println!("\n=== RECOMMENDED TO YOU ===");
    if !session.search_query().is_empty() {
        println!("Search: \"{}\"", session.search_query());
    }
    if !session.interests().is_empty() {
        let interests: Vec<&str> = session.interests().iter().collect();
        println!(
            "Session interests ({}): {}",
            session.interests().len(),
            interests.join(", ")
        );
    }
    println!("Liked tracks: {}", session.liked_track_ids().len());
    for artist in session.followed_artists() {
        println!("Following: {} {}", artist.name, artist.image_url);
    }
    println!();

    if recs.is_empty() {
        println!("No playlists to recommend.");
        return;
    }

    for (i, rec) in recs.iter().enumerate() {
        let tag = rec
            .tag
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        let vote = match session.vote_for(&rec.playlist.id) {
            Some(Vote::Up) => " ▲",
            Some(Vote::Down) => " ▼",
            None => "",
        };
        let saved = if session.is_saved(&rec.playlist.id) { " ★" } else { "" };
        println!(
            "{:>2}. {} ({}) [{}] integrity {}{}{}{}",
            i + 1,
            rec.playlist.name,
            rec.playlist.id,
            rec.playlist.genre,
            score_display(rec.playlist),
            tag,
            vote,
            saved
        );
    }
}

fn print_analysis(playlist: &Playlist, result: &AnalysisResult) {
    println!("\n=== INTEGRITY REPORT: {} ===", playlist.name);
    println!("Score: {:.0}/100", result.score);
    println!("\n{}", result.summary);

    println!("\nBreakdown:");
    for metric in integrity_breakdown(result.score) {
        println!(
            "   {:<15} {:>5.1}/{:.0}",
            metric.subject, metric.value, metric.full_mark
        );
    }

    if !result.risk_factors.is_empty() {
        println!("\nRisk factors:");
        for factor in &result.risk_factors {
            println!(
                "   [{}] {}: {}",
                factor.severity, factor.category, factor.description
            );
        }
    }
}

fn print_financials(financials: &ArtistFinancials, total_likes: u64) {
    println!("\n=== ARTIST: {} ===", financials.name);
    println!("Community likes: {total_likes}");
    println!(
        "Monthly earnings (est.): ${:.2}",
        financials.estimated_monthly_earnings
    );
    println!("   Platform cut: ${:.2}", financials.platform_cut);
    println!("   Label cut:    ${:.2}", financials.label_cut);
    println!("   Take-home:    ${:.2}", financials.artist_take_home);
    println!("\n{}", financials.fairness_statement);

    if !financials.support_links.is_empty() {
        println!("\nSupport directly:");
        for link in &financials.support_links {
            println!("   {}: {}", link.platform, link.url);
        }
    }
}
