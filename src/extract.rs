//! Video-description parsing.
//!
//! Review descriptions follow an informal convention, not a schema: one
//! line carries `Artist - Album / Label / Genre1, Genre2`, and the score
//! sits elsewhere as `<token>/10`. Non-review videos and off-format
//! descriptions are common, so everything here degrades to an empty
//! record instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ExtractedInfo;

/// Embedded URLs, removed from each line before structural matching.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .unwrap()
});

/// The info line: a `-` in the first segment, then at least two more
/// `/`-delimited segments, optionally ending with a trailing `/`.
static INFO_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)-(.+)/(.+)/(.+)/?").unwrap());

/// Reviewer score token, e.g. "7/10" or "NOT GOOD/10".
static SCORE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z0-9 ]+/10").unwrap());

/// Remove embedded URLs from a line, leaving the rest intact.
pub fn strip_urls(line: &str) -> String {
    URL_PATTERN.replace_all(line, "").to_string()
}

/// Parse the structured info line out of a raw description.
///
/// The first line matching the convention wins (the canonical line is
/// placed first by the reviewer). Segment 0 splits on its outermost
/// dashes: artist is the text before the first `-`, album the text after
/// the last one. The final segment is a comma-separated genre list.
pub fn extract_metadata(description: &str) -> ExtractedInfo {
    let info_line = description
        .split('\n')
        .map(strip_urls)
        .find(|line| INFO_LINE.is_match(line));

    let Some(line) = info_line else {
        return ExtractedInfo::default();
    };

    let segments: Vec<&str> = line.split('/').collect();
    let head = segments[0];
    let artist = head.split('-').next().map(|s| s.trim().to_string());
    let album = head.split('-').next_back().map(|s| s.trim().to_string());
    let genres = segments
        .last()
        .map(|s| s.split(',').map(|g| g.trim().to_string()).collect())
        .unwrap_or_default();

    ExtractedInfo { artist, album, genres }
}

/// Find the reviewer score in a raw description.
///
/// Returns the text preceding the first `/10`, untrimmed; `None` when no
/// score token exists. Searches the description before URL stripping.
pub fn extract_score(description: &str) -> Option<String> {
    SCORE_TOKEN
        .find(description)
        .map(|m| m.as_str().trim_end_matches("/10").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEW_DESCRIPTION: &str = "Listen: https://www.youtube.com/watch?v=abc123\n\nWeezer - OK Human / Crush Music / Rock, Pop Rock\n\n7/10\n\nY'all know this is just my opinion, right?";

    #[test]
    fn extracts_artist_album_genres() {
        let info = extract_metadata("Artist - Album / Label / Genre1, Genre2");
        assert_eq!(info.artist.as_deref(), Some("Artist"));
        assert_eq!(info.album.as_deref(), Some("Album"));
        assert_eq!(info.genres, vec!["Genre1", "Genre2"]);
    }

    #[test]
    fn full_description_parses() {
        let info = extract_metadata(REVIEW_DESCRIPTION);
        assert_eq!(info.artist.as_deref(), Some("Weezer"));
        assert_eq!(info.album.as_deref(), Some("OK Human"));
        assert_eq!(info.genres, vec!["Rock", "Pop Rock"]);
        assert_eq!(extract_score(REVIEW_DESCRIPTION).as_deref(), Some("7"));
    }

    #[test]
    fn multi_dash_head_splits_on_outermost_dashes() {
        let info = extract_metadata("Jay - Z - 4:44 / Roc Nation / Hip Hop, Rap");
        assert_eq!(info.artist.as_deref(), Some("Jay"));
        assert_eq!(info.album.as_deref(), Some("4:44"));
    }

    #[test]
    fn first_matching_line_wins() {
        let description =
            "First - Album / Label / Rock\nSecond - Other / Label / Jazz";
        let info = extract_metadata(description);
        assert_eq!(info.artist.as_deref(), Some("First"));
        assert_eq!(info.album.as_deref(), Some("Album"));
    }

    #[test]
    fn unstructured_description_yields_empty_record() {
        let info = extract_metadata("just chatting about music today\nno links");
        assert_eq!(info, ExtractedInfo::default());
    }

    #[test]
    fn empty_description_yields_empty_record() {
        assert_eq!(extract_metadata(""), ExtractedInfo::default());
    }

    #[test]
    fn urls_are_stripped_not_lines() {
        let stripped = strip_urls("buy it here https://example.com/shop?x=1 today");
        assert_eq!(stripped, "buy it here  today");
    }

    #[test]
    fn url_stripping_is_idempotent() {
        let line = "merch https://tnd.example/store and tour https://tnd.example/dates";
        let once = strip_urls(line);
        assert_eq!(strip_urls(&once), once);
    }

    #[test]
    fn url_inside_info_line_does_not_break_parsing() {
        let info = extract_metadata("Artist - Album / https://label.example / Rock");
        assert_eq!(info.artist.as_deref(), Some("Artist"));
        assert_eq!(info.genres, vec!["Rock"]);
    }

    #[test]
    fn score_token_variants() {
        assert_eq!(extract_score("CLASSIC/10").as_deref(), Some("CLASSIC"));
        assert_eq!(extract_score("solid 10/10 record").as_deref(), Some("solid 10"));
        assert_eq!(extract_score("no rating here"), None);
    }

    #[test]
    fn first_score_token_wins() {
        assert_eq!(extract_score("3/10\nbut the b-side is a 9/10").as_deref(), Some("3"));
    }
}
