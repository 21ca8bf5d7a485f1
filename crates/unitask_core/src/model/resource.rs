//! Static resource directory entries.
//!
//! Resources are read-mostly reference data: the core never mutates them
//! except through bulk import or a reset to the built-in catalog.

use serde::{Deserialize, Serialize};

pub type ResourceId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub icon: String,
    pub url: String,
    #[serde(default)]
    pub color: String,
}

/// Built-in catalog restored on first run and on bulk clear.
///
/// Six entries spanning the `library`, `tools` and `study` categories.
pub fn default_resources() -> Vec<Resource> {
    [
        (
            1,
            "University Library",
            "Access digital library resources",
            "library",
            "fas fa-book",
            "https://library.university.edu",
            "#007AFF",
        ),
        (
            2,
            "Learning Management System",
            "Course materials and assignments",
            "tools",
            "fas fa-graduation-cap",
            "https://lms.university.edu",
            "#34C759",
        ),
        (
            3,
            "Student Portal",
            "Grades, registration, and fees",
            "tools",
            "fas fa-user-graduate",
            "https://portal.university.edu",
            "#FF9500",
        ),
        (
            4,
            "Research Database",
            "Academic journals and papers",
            "library",
            "fas fa-search",
            "https://research.university.edu",
            "#AF52DE",
        ),
        (
            5,
            "Study Groups",
            "Collaborate with peers",
            "study",
            "fas fa-users",
            "https://groups.university.edu",
            "#FF2D55",
        ),
        (
            6,
            "Writing Center",
            "Get help with assignments",
            "study",
            "fas fa-pen-fancy",
            "https://writing.university.edu",
            "#32D74B",
        ),
    ]
    .into_iter()
    .map(
        |(id, title, description, category, icon, url, color)| Resource {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            icon: icon.to_string(),
            url: url.to_string(),
            color: color.to_string(),
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::default_resources;
    use std::collections::BTreeSet;

    #[test]
    fn default_catalog_has_six_unique_entries_in_three_categories() {
        let catalog = default_resources();
        assert_eq!(catalog.len(), 6);

        let ids: BTreeSet<_> = catalog.iter().map(|resource| resource.id).collect();
        assert_eq!(ids.len(), 6);

        let categories: BTreeSet<_> = catalog
            .iter()
            .map(|resource| resource.category.as_str())
            .collect();
        assert_eq!(
            categories.into_iter().collect::<Vec<_>>(),
            vec!["library", "study", "tools"]
        );
    }
}
