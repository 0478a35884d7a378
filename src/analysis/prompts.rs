use crate::models::Playlist;
use serde_json::{Value, json};

/// Prompt asking for a payola/nepotism inspection of a playlist
pub fn integrity_prompt(playlist: &Playlist) -> String {
    let track_data = playlist
        .tracks
        .iter()
        .map(|t| format!("{} by {} (Label: {})", t.title, t.artist, t.label))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Act as a senior Music Industry Analyst specializing in anti-trust and organic discovery.
Inspect the following playlist for promotional patterns like "Payola" (repetitive placement of specific labels) and "Nepotism" (favoring artists from same parent corporations).

Playlist Name: {name}
Owner: {owner}
Tracks:
{track_data}

SCORING RULES:
- 90-100: Excellent. High label variety, majority independent artists, no repetitive loops.
- 70-89: Good. Mostly diverse, but has some major label concentration.
- 50-69: Warning. Clearly dominated by 1 or 2 major labels; limited discovery for independent artists.
- Below 50: High Risk. Patterns suggest industrial loops, repetitive label placements, or corporate-only selections.

IMPORTANT: If your analysis/summary is critical of the playlist's diversity or mentions industrial loops, the score MUST be low (Below 60). Never give a high score (90+) to a playlist you describe as bad or unfair.

Provide a JSON response with:
- score (number 0-100)
- summary (detailed string explaining the fairness or lack thereof)
- riskFactors (array of objects with category, severity [Low/Medium/High], and description)"#,
        name = playlist.name,
        owner = playlist.owner,
    )
}

/// Response schema for [`integrity_prompt`]
pub fn integrity_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "riskFactors": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "enum": ["Nepotism", "Payola", "Organic", "Label Dominance"]
                        },
                        "severity": {
                            "type": "STRING",
                            "enum": ["Low", "Medium", "High"]
                        },
                        "description": { "type": "STRING" }
                    },
                    "required": ["category", "severity", "description"]
                }
            }
        },
        "required": ["score", "summary", "riskFactors"]
    })
}

/// Prompt asking for an artist's estimated streaming income split
pub fn financials_prompt(artist_name: &str, label: &str) -> String {
    format!(
        r#"Analyze the financial reality for the artist "{artist_name}" (Label: {label}).
Estimate:
1. Monthly earnings from ~100k streams (standard mid-tier).
2. The cut taken by streaming platforms (30%) and labels (varies).
3. Find or suggest likely donation/support platforms (Bandcamp, Patreon, Ko-fi, or Linktree).

Return a JSON response."#
    )
}

/// Response schema for [`financials_prompt`]
pub fn financials_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "estimatedMonthlyEarnings": { "type": "NUMBER" },
            "platformCut": { "type": "NUMBER" },
            "labelCut": { "type": "NUMBER" },
            "artistTakeHome": { "type": "NUMBER" },
            "supportLinks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "platform": { "type": "STRING" },
                        "url": { "type": "STRING" }
                    },
                    "required": ["platform", "url"]
                }
            },
            "fairnessStatement": { "type": "STRING" }
        },
        "required": [
            "name",
            "estimatedMonthlyEarnings",
            "platformCut",
            "labelCut",
            "artistTakeHome",
            "supportLinks",
            "fairnessStatement"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn playlist_with(tracks: Vec<Track>) -> Playlist {
        Playlist {
            id: "jazz-0".to_string(),
            name: "Jazz Ethics".to_string(),
            description: String::new(),
            owner: "JazzCurator_1".to_string(),
            image_url: String::new(),
            genre: "Jazz".to_string(),
            tracks,
            integrity_score: Some(90),
            votes: None,
        }
    }

    #[test]
    fn test_integrity_prompt_lists_tracks() {
        let track = Track {
            id: "t1".to_string(),
            title: "Jazz Anthem #1".to_string(),
            artist: "Blue Note".to_string(),
            label: "Independent".to_string(),
            genre: "Jazz".to_string(),
            duration: "3:45".to_string(),
            spotify_url: String::new(),
            votes: None,
        };
        let prompt = integrity_prompt(&playlist_with(vec![track]));

        assert!(prompt.contains("Playlist Name: Jazz Ethics"));
        assert!(prompt.contains("Owner: JazzCurator_1"));
        assert!(prompt.contains("Jazz Anthem #1 by Blue Note (Label: Independent)"));
        assert!(prompt.contains("the score MUST be low (Below 60)"));
    }

    #[test]
    fn test_integrity_prompt_with_no_tracks() {
        let prompt = integrity_prompt(&playlist_with(vec![]));
        assert!(prompt.contains("Tracks:\n\n"));
    }

    #[test]
    fn test_schemas_require_every_field() {
        let integrity = integrity_schema();
        assert_eq!(integrity["required"].as_array().unwrap().len(), 3);

        let financials = financials_schema();
        let required: Vec<&str> = financials["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        for field in financials["properties"].as_object().unwrap().keys() {
            assert!(required.contains(&field.as_str()), "{field} not required");
        }
    }

    #[test]
    fn test_financials_prompt_embeds_input() {
        let prompt = financials_prompt("Lia \"The Spark\"", "Major Distribution");
        assert!(prompt.contains("\"Lia \"The Spark\"\""));
        assert!(prompt.contains("(Label: Major Distribution)"));
    }
}
