// src/domain/filters.rs

use crate::domain::property::Property;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct values available for each search facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub locations: Vec<String>,
    pub bhk_types: Vec<String>,
    pub property_types: Vec<String>,
}

impl FilterOptions {
    /// Collects every facet in one pass: values are trimmed, blanks and missing
    /// fields dropped, duplicates removed, and each facet sorted ascending.
    pub fn derive(properties: &[Property]) -> Self {
        let mut statuses = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut bhk_types = BTreeSet::new();
        let mut property_types = BTreeSet::new();

        for p in properties {
            insert_trimmed(&mut statuses, p.status.as_deref());
            insert_trimmed(&mut locations, Some(p.location.as_str()));
            insert_trimmed(&mut bhk_types, p.bhk_type.as_deref());
            insert_trimmed(&mut property_types, p.property_type.as_deref());
        }

        FilterOptions {
            statuses: statuses.into_iter().collect(),
            locations: locations.into_iter().collect(),
            bhk_types: bhk_types.into_iter().collect(),
            property_types: property_types.into_iter().collect(),
        }
    }
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        set.insert(v.to_string());
    }
}

/// The facet values a visitor picked in the search controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub status: Option<String>,
    pub location: Option<String>,
    pub bhk_type: Option<String>,
    pub property_type: Option<String>,
}

impl FilterSelection {
    /// Properties matching every chosen facet. Unset or blank choices match all.
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn matches(&self, p: &Property) -> bool {
        facet_matches(self.status.as_deref(), p.status.as_deref())
            && facet_matches(self.location.as_deref(), Some(p.location.as_str()))
            && facet_matches(self.bhk_type.as_deref(), p.bhk_type.as_deref())
            && facet_matches(self.property_type.as_deref(), p.property_type.as_deref())
    }
}

fn facet_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => actual.map(str::trim) == Some(w),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::PropertyPatch;

    fn with(id: &str, patch: PropertyPatch) -> Property {
        Property::from_patch(id.to_string(), patch)
    }

    fn status(id: &str, s: &str) -> Property {
        with(
            id,
            PropertyPatch {
                status: Some(s.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn empty_input_gives_empty_facets() {
        assert_eq!(FilterOptions::derive(&[]), FilterOptions::default());
    }

    #[test]
    fn statuses_are_deduplicated_sorted_and_blank_free() {
        let props = vec![
            status("1", "For Sale"),
            status("2", "For Rent"),
            status("3", "For Sale"),
            status("4", ""),
        ];

        let opts = FilterOptions::derive(&props);
        assert_eq!(opts.statuses, vec!["For Rent", "For Sale"]);
    }

    #[test]
    fn values_are_trimmed_before_dedup() {
        let props = vec![
            with(
                "1",
                PropertyPatch {
                    location: Some("  Worli, Mumbai ".to_string()),
                    ..Default::default()
                },
            ),
            with(
                "2",
                PropertyPatch {
                    location: Some("Worli, Mumbai".to_string()),
                    ..Default::default()
                },
            ),
        ];

        assert_eq!(FilterOptions::derive(&props).locations, vec!["Worli, Mumbai"]);
    }

    #[test]
    fn missing_bhk_type_contributes_nothing() {
        let props = vec![
            status("1", "For Sale"),
            with(
                "2",
                PropertyPatch {
                    bhk_type: Some("2 BHK".to_string()),
                    ..Default::default()
                },
            ),
        ];

        let opts = FilterOptions::derive(&props);
        assert_eq!(opts.bhk_types, vec!["2 BHK"]);
        assert!(opts.property_types.is_empty());
        // Both records have an empty location, so that facet stays empty too.
        assert!(opts.locations.is_empty());
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = vec![status("1", "Sold"), status("2", "For Rent")];
        let b = vec![status("2", "For Rent"), status("1", "Sold")];
        assert_eq!(FilterOptions::derive(&a), FilterOptions::derive(&b));
    }

    #[test]
    fn selection_narrows_by_every_chosen_facet() {
        let props = vec![
            with(
                "1",
                PropertyPatch {
                    status: Some("For Sale".to_string()),
                    bhk_type: Some("3 BHK".to_string()),
                    ..Default::default()
                },
            ),
            with(
                "2",
                PropertyPatch {
                    status: Some("For Sale".to_string()),
                    bhk_type: Some("2 BHK".to_string()),
                    ..Default::default()
                },
            ),
            status("3", "For Rent"),
        ];

        let sel = FilterSelection {
            status: Some("For Sale".to_string()),
            bhk_type: Some(" 3 BHK".to_string()),
            ..Default::default()
        };

        let ids: Vec<&str> = sel.apply(&props).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn blank_selection_matches_everything() {
        let props = vec![status("1", "For Sale"), status("2", "For Rent")];
        let sel = FilterSelection {
            status: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(sel.apply(&props).len(), 2);
    }
}
