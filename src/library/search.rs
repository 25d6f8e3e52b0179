//! Search matching over album artist and title.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::model::AlbumRecord;

/// Albums matching `query`, in their original order.
pub fn filter_albums(albums: &[AlbumRecord], query: &str) -> Vec<AlbumRecord> {
    albums
        .iter()
        .filter(|a| a.matches_search_term(query))
        .cloned()
        .collect()
}

/// Positions in `albums` of the records matching `query`.
pub fn filter_indices(albums: &[AlbumRecord], query: &str) -> Vec<usize> {
    albums
        .iter()
        .enumerate()
        .filter(|(_, a)| a.matches_search_term(query))
        .map(|(i, _)| i)
        .collect()
}

/// Substring test that ignores case and accents and does not care whether
/// either side is stored composed or decomposed.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

fn fold(s: &str) -> String {
    s.nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        // Final sigma lowercases to 'ς' in context; fold it so it compares equal to 'σ'.
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}
