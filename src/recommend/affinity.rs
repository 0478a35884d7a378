use crate::models::Track;

/// How many liked genres feed the personalized pool
pub const MAX_LIKED_GENRES: usize = 3;

/// Rank genres by how many liked tracks carry them.
///
/// Counts are tallied in encounter order; the sort is stable so genres with
/// equal counts keep the order they were first seen in. Returns at most
/// [`MAX_LIKED_GENRES`] genres.
pub fn liked_genres<'a, I>(liked_tracks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Track>,
{
    let mut tally: Vec<(&str, usize)> = Vec::new();

    for track in liked_tracks {
        match tally.iter_mut().find(|(genre, _)| *genre == track.genre) {
            Some((_, count)) => *count += 1,
            None => tally.push((track.genre.as_str(), 1)),
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .take(MAX_LIKED_GENRES)
        .map(|(genre, _)| genre.to_string())
        .collect()
}
