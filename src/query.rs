//! Generic filter/sort/paginate engine for listing endpoints.
//!
//! Listing parameters arrive as raw strings from the query string. Each
//! listable type declares a closed set of recognized field tokens mapped to
//! typed accessors; an unrecognized token degrades to a no-op rather than an
//! error, so clients probing unknown fields get the unfiltered/unsorted
//! collection back.

use std::cmp::Ordering;

use crate::error::{Result, ServerError};

/// Comparison key for a sortable field.
pub enum SortKey<T> {
    Text(fn(&T) -> &str),
    Number(fn(&T) -> f64),
}

/// Listing behaviour for an entity type.
///
/// Field tokens are matched case-insensitively against a closed set; there
/// is no reflective lookup by arbitrary string.
pub trait Listable: Sized {
    /// Accessor for a filterable text field, or `None` when unrecognized.
    fn filter_field(token: &str) -> Option<fn(&Self) -> &str>;

    /// Comparison key for a sortable field, or `None` when unrecognized.
    fn sort_field(token: &str) -> Option<SortKey<Self>>;
}

/// Raw listing parameters, already decoded from the wire.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub sort_by: Option<String>,
    pub is_ascending: bool,
    pub page_number: u64,
    pub page_size: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            filter_on: None,
            filter_query: None,
            sort_by: None,
            is_ascending: true,
            page_number: 1,
            page_size: 1000,
        }
    }
}

/// Apply filter, sort, and pagination to a materialized collection.
///
/// Order of application is fixed: filter, then a stable sort (ties keep
/// their relative order from the filtered sequence), then pagination.
/// Non-positive page parameters are rejected.
pub fn apply<T: Listable>(mut items: Vec<T>, params: &ListParams) -> Result<Vec<T>> {
    if params.page_number < 1 {
        return Err(ServerError::InvalidArgument(
            "pageNumber must be at least 1".to_string(),
        ));
    }
    if params.page_size < 1 {
        return Err(ServerError::InvalidArgument(
            "pageSize must be at least 1".to_string(),
        ));
    }

    if let (Some(field), Some(query)) = (&params.filter_on, &params.filter_query) {
        if !query.is_empty() {
            if let Some(get) = T::filter_field(field) {
                let needle = query.to_lowercase();
                items.retain(|item| get(item).to_lowercase().contains(&needle));
            }
        }
    }

    if let Some(field) = &params.sort_by {
        if let Some(key) = T::sort_field(field) {
            let compare: Box<dyn Fn(&T, &T) -> Ordering> = match key {
                SortKey::Text(get) => Box::new(move |a, b| get(a).cmp(get(b))),
                SortKey::Number(get) => Box::new(move |a, b| get(a).total_cmp(&get(b))),
            };
            if params.is_ascending {
                items.sort_by(|a, b| compare(a, b));
            } else {
                // Swapped arguments keep the sort stable: ties still compare
                // equal and retain their original relative order.
                items.sort_by(|a, b| compare(b, a));
            }
        }
    }

    let skip = (params.page_number - 1).saturating_mul(params.page_size);
    Ok(items
        .into_iter()
        .skip(skip as usize)
        .take(params.page_size as usize)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        km: f64,
    }

    impl Item {
        fn new(name: &str, km: f64) -> Self {
            Self {
                name: name.to_string(),
                km,
            }
        }
    }

    impl Listable for Item {
        fn filter_field(token: &str) -> Option<fn(&Self) -> &str> {
            if token.eq_ignore_ascii_case("name") {
                Some(|item| &item.name)
            } else {
                None
            }
        }

        fn sort_field(token: &str) -> Option<SortKey<Self>> {
            if token.eq_ignore_ascii_case("name") {
                Some(SortKey::Text(|item| &item.name))
            } else if token.eq_ignore_ascii_case("lengthinkm") {
                Some(SortKey::Number(|item| item.km))
            } else {
                None
            }
        }
    }

    fn walks() -> Vec<Item> {
        vec![
            Item::new("Roys Peak Track", 16.0),
            Item::new("Hooker Valley", 10.0),
            Item::new("Abel Tasman Coast Track", 60.0),
            Item::new("Tongariro Crossing", 19.4),
            Item::new("Kepler Track", 60.0),
        ]
    }

    fn params() -> ListParams {
        ListParams::default()
    }

    #[test]
    fn filter_on_name_is_case_insensitive() {
        let out = apply(
            walks(),
            &ListParams {
                filter_on: Some("Name".to_string()),
                filter_query: Some("track".to_string()),
                ..params()
            },
        )
        .unwrap();
        let names: Vec<&str> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["Roys Peak Track", "Abel Tasman Coast Track", "Kepler Track"]
        );
    }

    #[test]
    fn filter_with_no_match_yields_empty_not_error() {
        let out = apply(
            walks(),
            &ListParams {
                filter_on: Some("Name".to_string()),
                filter_query: Some("Milford".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unrecognized_filter_field_is_a_no_op() {
        let out = apply(
            walks(),
            &ListParams {
                filter_on: Some("Description".to_string()),
                filter_query: Some("anything".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn empty_filter_query_is_a_no_op() {
        let out = apply(
            walks(),
            &ListParams {
                filter_on: Some("Name".to_string()),
                filter_query: Some(String::new()),
                ..params()
            },
        )
        .unwrap();
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn sort_by_name_ascending() {
        let out = apply(
            walks(),
            &ListParams {
                sort_by: Some("Name".to_string()),
                ..params()
            },
        )
        .unwrap();
        let names: Vec<&str> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Abel Tasman Coast Track",
                "Hooker Valley",
                "Kepler Track",
                "Roys Peak Track",
                "Tongariro Crossing"
            ]
        );
    }

    #[test]
    fn descending_equals_ascending_reversed_for_unique_keys() {
        let asc = apply(
            walks(),
            &ListParams {
                sort_by: Some("Name".to_string()),
                ..params()
            },
        )
        .unwrap();
        let desc = apply(
            walks(),
            &ListParams {
                sort_by: Some("Name".to_string()),
                is_ascending: false,
                ..params()
            },
        )
        .unwrap();
        let mut reversed = asc;
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn sort_is_stable_on_duplicate_keys() {
        // Abel Tasman and Kepler are both 60.0 km; Abel Tasman appears first
        // in insertion order and must stay first after sorting by length.
        let out = apply(
            walks(),
            &ListParams {
                sort_by: Some("LengthInKm".to_string()),
                ..params()
            },
        )
        .unwrap();
        let names: Vec<&str> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Hooker Valley",
                "Roys Peak Track",
                "Tongariro Crossing",
                "Abel Tasman Coast Track",
                "Kepler Track"
            ]
        );

        // Sorting twice yields identical output.
        let again = apply(
            out.clone(),
            &ListParams {
                sort_by: Some("LengthInKm".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn unrecognized_sort_field_preserves_order() {
        let out = apply(
            walks(),
            &ListParams {
                sort_by: Some("Popularity".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert_eq!(out, walks());
    }

    #[test]
    fn second_page_of_two_returns_third_and_fourth() {
        let items: Vec<Item> = (1..=5).map(|n| Item::new(&format!("W{n}"), n as f64)).collect();
        let out = apply(
            items,
            &ListParams {
                page_number: 2,
                page_size: 2,
                ..params()
            },
        )
        .unwrap();
        let names: Vec<&str> = out.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["W3", "W4"]);
    }

    #[test]
    fn concatenated_pages_reproduce_the_whole_sequence() {
        let items: Vec<Item> = (1..=7).map(|n| Item::new(&format!("W{n}"), n as f64)).collect();
        let mut collected = Vec::new();
        for page in 1..=4u64 {
            let chunk = apply(
                items.clone(),
                &ListParams {
                    sort_by: Some("Name".to_string()),
                    page_number: page,
                    page_size: 2,
                    ..params()
                },
            )
            .unwrap();
            collected.extend(chunk);
        }
        let expected = apply(
            items,
            &ListParams {
                sort_by: Some("Name".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert_eq!(collected, expected);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let out = apply(
            walks(),
            &ListParams {
                page_number: 99,
                page_size: 10,
                ..params()
            },
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn non_positive_page_parameters_are_rejected() {
        let err = apply(
            walks(),
            &ListParams {
                page_number: 0,
                ..params()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServerError::InvalidArgument(_)));

        let err = apply(
            walks(),
            &ListParams {
                page_size: 0,
                ..params()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServerError::InvalidArgument(_)));
    }
}
