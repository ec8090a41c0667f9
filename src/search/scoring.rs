//! Search relevance and ranking.
//!
//! Scores are small integers so ties can be broken deterministically by
//! module depth and name.

use rapidfuzz::distance::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a name to count as a typo match.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// Score a lowercase item name against a lowercase query.
///
/// - 100: Exact match
/// - 50: Name starts with query
/// - 10: Name contains query
/// - 1..=9: Name is within typo distance of the query
/// - None: No match
pub fn name_relevance(name: &str, query: &str) -> Option<u32> {
    if query.is_empty() {
        None
    } else if name == query {
        Some(100)
    } else if name.starts_with(query) {
        Some(50)
    } else if name.contains(query) {
        Some(10)
    } else {
        fuzzy_relevance(name, query)
    }
}

/// Score a lowercase summary against a lowercase query.
///
/// Summary hits rank below every name hit.
pub fn summary_relevance(summary: &str, query: &str) -> Option<u32> {
    (!query.is_empty() && summary.contains(query)).then_some(1)
}

fn fuzzy_relevance(name: &str, query: &str) -> Option<u32> {
    let similarity = jaro_winkler::similarity(name.chars(), query.chars());
    if similarity >= FUZZY_THRESHOLD {
        // Map [threshold, 1.0] onto 2..=9 so typo matches stay below substring matches.
        let scaled = (similarity - FUZZY_THRESHOLD) / (1.0 - FUZZY_THRESHOLD);
        Some(2 + (scaled * 7.0).round() as u32)
    } else {
        None
    }
}
