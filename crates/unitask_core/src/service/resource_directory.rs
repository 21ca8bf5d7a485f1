//! Resource directory lookups.
//!
//! Pure derivations over the resource catalog; input order is preserved.

use crate::model::resource::Resource;
use std::collections::BTreeSet;

/// Category name that matches every resource.
pub const ALL_CATEGORIES: &str = "all";

/// Resources in `category`; [`ALL_CATEGORIES`] returns the whole catalog.
pub fn filter_by_category<'a>(resources: &'a [Resource], category: &str) -> Vec<&'a Resource> {
    let category = category.trim();
    resources
        .iter()
        .filter(|resource| {
            category.eq_ignore_ascii_case(ALL_CATEGORIES)
                || resource.category.eq_ignore_ascii_case(category)
        })
        .collect()
}

/// Case-insensitive substring match on title, description or category.
pub fn search_resources<'a>(resources: &'a [Resource], term: &str) -> Vec<&'a Resource> {
    let needle = term.trim().to_lowercase();
    resources
        .iter()
        .filter(|resource| {
            resource.title.to_lowercase().contains(needle.as_str())
                || resource.description.to_lowercase().contains(needle.as_str())
                || resource.category.to_lowercase().contains(needle.as_str())
        })
        .collect()
}

/// Distinct categories, sorted.
pub fn categories(resources: &[Resource]) -> Vec<&str> {
    resources
        .iter()
        .map(|resource| resource.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
