//! `Accept-Language` parsing and negotiation.
//!
//! # Responsibilities
//! - Split the header into language entries with quality weights
//! - Reduce each tag to its base subtag (`es-UY` → `es`)
//! - Pick the highest-weighted entry that is a supported locale
//!
//! # Design Decisions
//! - Malformed entries never fail the parse: a bad weight becomes 1.0,
//!   an empty tag is skipped
//! - `q=0` is a weight like any other: the entry sorts last but can
//!   still match when nothing better does
//! - Stable sort, so equal weights keep header order

use crate::locale::code::{LocaleCode, LocaleSet};

/// One entry of the preference list.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Base language subtag, as sent by the client.
    pub base: String,
    /// Quality weight in `[0, 1]`.
    pub quality: f32,
}

/// Parse an `Accept-Language` value into a preference list ordered by
/// descending quality.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(parse_entry)
        .collect();

    // Vec::sort_by is stable; ties keep their original order.
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

/// Resolve the first supported locale in the header, if any.
pub fn negotiate(header: &str, locales: &LocaleSet) -> Option<LocaleCode> {
    parse_accept_language(header)
        .iter()
        .find_map(|pref| locales.match_base(&pref.base))
}

fn parse_entry(entry: &str) -> Option<LanguagePreference> {
    let mut parts = entry.split(';');
    let tag = parts.next().unwrap_or_default().trim();
    let base = tag.split('-').next().unwrap_or_default().trim();
    if base.is_empty() {
        return None;
    }

    let quality = parts
        .find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim().eq_ignore_ascii_case("q").then(|| parse_quality(value))
        })
        .unwrap_or(1.0);

    Some(LanguagePreference {
        base: base.to_string(),
        quality,
    })
}

fn parse_quality(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(q) if q.is_finite() && (0.0..=1.0).contains(&q) => q,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleSet {
        LocaleSet::new(&["en".into(), "es".into()], "en").unwrap()
    }

    fn bases(header: &str) -> Vec<String> {
        parse_accept_language(header).into_iter().map(|p| p.base).collect()
    }

    #[test]
    fn test_region_subtags_reduce_to_base() {
        let resolved = negotiate("es-UY,es;q=0.9,en;q=0.8", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");
    }

    #[test]
    fn test_no_supported_language() {
        assert!(negotiate("fr;q=1.0,de;q=0.9", &locales()).is_none());
    }

    #[test]
    fn test_sorted_by_quality() {
        assert_eq!(bases("fr;q=0.2, de;q=0.9, en;q=0.5"), ["de", "en", "fr"]);
        let resolved = negotiate("es;q=0.3,en;q=0.7", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "en");
    }

    #[test]
    fn test_ties_keep_header_order() {
        assert_eq!(bases("es, en, fr"), ["es", "en", "fr"]);
        assert_eq!(bases("fr;q=0.5,es;q=0.5,en;q=0.5"), ["fr", "es", "en"]);
        let resolved = negotiate("es;q=0.8,en;q=0.8", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");
    }

    #[test]
    fn test_malformed_weight_defaults_to_one() {
        let prefs = parse_accept_language("en;q=abc,es;q=0.5");
        assert_eq!(prefs[0].base, "en");
        assert_eq!(prefs[0].quality, 1.0);

        let prefs = parse_accept_language("de;q=7,en;q=-1,es;q=");
        assert!(prefs.iter().all(|p| p.quality == 1.0));
    }

    #[test]
    fn test_zero_weight_sorts_last() {
        assert_eq!(bases("es;q=0,en;q=0.1"), ["en", "es"]);
        assert_eq!(parse_accept_language("es;q=0")[0].quality, 0.0);

        let resolved = negotiate("es;q=0", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");

        let resolved = negotiate("fr,es;q=0.0", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(bases(",, ;q=0.9, -US,es"), ["es"]);
        assert!(parse_accept_language("").is_empty());
        assert!(negotiate("   ", &locales()).is_none());
    }

    #[test]
    fn test_mixed_case_and_params() {
        let resolved = negotiate("ES-es;level=1;Q=0.9", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");
        assert_eq!(parse_accept_language("en; q = 0.4")[0].quality, 0.4);
    }

    #[test]
    fn test_wildcard_never_matches() {
        let resolved = negotiate("*,es;q=0.5", &locales()).unwrap();
        assert_eq!(resolved.as_str(), "es");
    }

    #[test]
    fn test_negotiation_is_idempotent() {
        let header = "pt-BR;q=0.9,es;q=0.9,en;q=0.9";
        let first = negotiate(header, &locales());
        let second = negotiate(header, &locales());
        assert_eq!(first, second);
        assert_eq!(first.unwrap().as_str(), "es");
    }
}
