//! Normalized movie records produced by the catalog client.
//!
//! Both upstream providers are mapped into these shapes; raw upstream JSON
//! never leaves the provider modules.

use serde::{Deserialize, Serialize};

/// Sentinel used wherever an upstream value is absent or unparseable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Poster shown when the upstream poster path is missing.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/150";

/// Base URL for composing TMDB poster paths into full image URLs.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Prefix applied to trending-provider ids so they cannot collide with the
/// search provider's native `tt`-style identifiers.
pub const TMDB_ID_PREFIX: &str = "tmdb_";

/// Prefix of the search/detail provider's native identifier space.
pub const IMDB_ID_PREFIX: &str = "tt";

/// A single movie as displayed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    /// Display title.
    pub title: String,
    /// Four-digit release year, or `"N/A"` when the upstream value is
    /// absent or unparseable.
    pub year: String,
    /// Full poster image URL, or exactly [`POSTER_PLACEHOLDER`].
    pub poster_url: String,
    /// Globally unique id: native `tt...` for the search provider,
    /// `tmdb_<numeric>` for the trending provider.
    pub id: String,
}

impl MovieRecord {
    /// Whether plot/rating detail can be fetched for this record.
    pub fn is_detailable(&self) -> bool {
        is_detailable_id(&self.id)
    }
}

/// Whether detail can be fetched for a catalog id.
///
/// Only the search provider's native identifier space supports detail
/// lookup; trending-provider ids never get one.
pub fn is_detailable_id(id: &str) -> bool {
    id.starts_with(IMDB_ID_PREFIX)
}

/// Best-effort plot and rating for a movie with a native `tt`-style id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// Short synopsis, `"N/A"` when unavailable.
    pub plot: String,
    /// 0-10 decimal score as text, `"N/A"` when unavailable.
    pub rating: String,
}

impl MovieDetail {
    /// The detail value returned when the lookup failed or the provider had
    /// nothing to say. Detail is best-effort and never an error.
    pub fn unavailable() -> Self {
        Self {
            plot: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Extract a four-digit year from upstream date/year text.
///
/// Accepts `"2021-09-15"` (TMDB release dates) and `"2021"` or
/// `"2010\u{2013}2012"` ranges (OMDb year fields). Anything that does not
/// start with exactly four digits becomes `"N/A"`.
pub(crate) fn normalize_year(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or("");
    let head: String = raw.chars().take(4).collect();
    let fifth_is_digit = raw.chars().nth(4).is_some_and(|c| c.is_ascii_digit());
    if head.len() == 4 && head.chars().all(|c| c.is_ascii_digit()) && !fifth_is_digit {
        head
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Compose a TMDB poster path fragment into a full URL, or fall back to the
/// placeholder when the path is absent.
pub(crate) fn tmdb_poster(path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{TMDB_IMAGE_BASE}{p}"),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

/// Pass through an OMDb poster URL, or fall back to the placeholder when the
/// field is absent or the provider's own `"N/A"` sentinel.
pub(crate) fn omdb_poster(raw: Option<&str>) -> String {
    match raw {
        Some(p) if !p.is_empty() && p != NOT_AVAILABLE => p.to_string(),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_release_date() {
        assert_eq!(normalize_year(Some("2021-09-15")), "2021");
        assert_eq!(normalize_year(Some("1999")), "1999");
        assert_eq!(normalize_year(Some(" 2010 ")), "2010");
    }

    #[test]
    fn year_from_omdb_range() {
        // En-dash range as OMDb returns for series.
        assert_eq!(normalize_year(Some("2010\u{2013}2012")), "2010");
    }

    #[test]
    fn unparseable_year_is_not_available() {
        assert_eq!(normalize_year(None), NOT_AVAILABLE);
        assert_eq!(normalize_year(Some("")), NOT_AVAILABLE);
        assert_eq!(normalize_year(Some("soon")), NOT_AVAILABLE);
        assert_eq!(normalize_year(Some("199")), NOT_AVAILABLE);
        assert_eq!(normalize_year(Some("12345")), NOT_AVAILABLE);
    }

    #[test]
    fn tmdb_poster_composition() {
        assert_eq!(
            tmdb_poster(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(tmdb_poster(None), POSTER_PLACEHOLDER);
        assert_eq!(tmdb_poster(Some("")), POSTER_PLACEHOLDER);
    }

    #[test]
    fn omdb_poster_passthrough_and_fallback() {
        assert_eq!(
            omdb_poster(Some("https://m.media-amazon.com/x.jpg")),
            "https://m.media-amazon.com/x.jpg"
        );
        assert_eq!(omdb_poster(Some("N/A")), POSTER_PLACEHOLDER);
        assert_eq!(omdb_poster(None), POSTER_PLACEHOLDER);
    }

    #[test]
    fn detail_gating_by_id_prefix() {
        assert!(is_detailable_id("tt1160419"));
        assert!(!is_detailable_id("tmdb_438631"));
        assert!(!is_detailable_id(""));

        let native = MovieRecord {
            title: "Dune".into(),
            year: "2021".into(),
            poster_url: POSTER_PLACEHOLDER.into(),
            id: "tt1160419".into(),
        };
        assert!(native.is_detailable());

        let trending = MovieRecord {
            id: "tmdb_438631".into(),
            ..native.clone()
        };
        assert!(!trending.is_detailable());
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = MovieRecord {
            title: "Dune".into(),
            year: "2021".into(),
            poster_url: "https://image.tmdb.org/t/p/w500/abc.jpg".into(),
            id: "tmdb_438631".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["posterUrl"], "https://image.tmdb.org/t/p/w500/abc.jpg");
        assert_eq!(json["id"], "tmdb_438631");
    }
}
