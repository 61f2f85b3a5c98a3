use super::{SearchSnapshot, Suggestion};
use crate::domain::directory::{Business, Locale};

/// Upper bound on suggestions per entity kind
pub const MAX_SUGGESTIONS_PER_KIND: usize = 5;

/// Match a free-text query against the snapshot.
///
/// Case-insensitive substring match. Businesses match on either their default or
/// localized name, subcategories on their name. Matching businesses come first,
/// then subcategories, each in snapshot order and capped at
/// [`MAX_SUGGESTIONS_PER_KIND`]. Leading and trailing whitespace is dropped
/// before matching, so "dive " finds "Dive Shop". A blank query yields no suggestions.
pub fn match_suggestions(query: &str, snapshot: &SearchSnapshot, locale: Locale) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let businesses = snapshot
        .businesses
        .iter()
        .filter(|b| business_matches(b, &needle))
        .take(MAX_SUGGESTIONS_PER_KIND)
        .map(|b| Suggestion::Business {
            id: b.id.clone(),
            name: b.display_name(locale).to_string(),
        });

    let subcategories = snapshot
        .subcategories
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS_PER_KIND)
        .map(|s| Suggestion::Subcategory {
            id: s.id.clone(),
            name: s.name.clone(),
            category_id: s.category_id.clone(),
        });

    businesses.chain(subcategories).collect()
}

fn business_matches(business: &Business, needle: &str) -> bool {
    business.name.to_lowercase().contains(needle)
        || business
            .name_localized
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
}
