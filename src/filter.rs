//! Case-insensitive name search over the catalog list

use crate::state::PokemonSummary;

pub fn matches_name(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Entries whose name contains `query`, in source order
pub fn filter_by_name<'a>(entries: &'a [PokemonSummary], query: &str) -> Vec<&'a PokemonSummary> {
    entries
        .iter()
        .filter(|entry| matches_name(&entry.name, query))
        .collect()
}

/// Same as [`filter_by_name`] but yields positions in `entries`
pub fn matching_indices(entries: &[PokemonSummary], query: &str) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_name(&entry.name, query))
        .map(|(idx, _)| idx)
        .collect()
}
