//! Sort-field validation.
//!
//! Translates a caller's requested `(property, direction)` pairs into typed
//! ordering targets that were statically registered for an entity. A key that
//! was never registered - because the property path does not exist or because
//! its leaf type has no total ordering - is rejected at lookup time, before
//! anything reaches the query layer.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Null placement for a resolved ordering. `Database` leaves the decision to
/// the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullHandling {
    #[default]
    Database,
    NullsFirst,
    NullsLast,
}

/// One requested ordering, e.g. the query form `title,asc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    /// Parse the query-parameter form `property[,asc|desc]`. A missing
    /// direction defaults to ascending.
    pub fn parse(raw: &str) -> Result<Self, SortParseError> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or("").trim();
        if property.is_empty() {
            return Err(SortParseError(raw.to_owned()));
        }

        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => Direction::Asc,
            Some(d) if d == "asc" => Direction::Asc,
            Some(d) if d == "desc" => Direction::Desc,
            Some(_) => return Err(SortParseError(raw.to_owned())),
        };

        Ok(Self {
            property: property.to_owned(),
            direction,
        })
    }
}

/// The raw sort parameter could not be parsed. A boundary concern, distinct
/// from an unresolvable property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed sort parameter: {0}")]
pub struct SortParseError(pub String);

/// The requested property is absent from the entity's sort registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown or non-orderable sort property: {0}")]
pub struct UnknownSortProperty(pub String);

/// A resolved ordering entry handed to the query layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec<T> {
    pub target: T,
    pub direction: Direction,
    pub nulls: NullHandling,
}

/// Statically-registered mapping from allowed sort-key strings (including
/// nested paths such as `writer.id`) to typed ordering targets for one
/// entity. `T` is whatever the backing query layer orders by: a column
/// expression for a database, a comparator for an in-memory store.
pub struct SortRegistry<T> {
    entries: HashMap<&'static str, T>,
}

impl<T> Default for SortRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an orderable property. Properties whose leaf type has no
    /// total ordering are simply never registered.
    pub fn orderable(mut self, property: &'static str, target: T) -> Self {
        self.entries.insert(property, target);
        self
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }
}

impl<T: Clone> SortRegistry<T> {
    /// Resolve a requested sort into ordering specs, preserving the caller's
    /// order. An empty request resolves to an empty ordering, which is valid.
    pub fn resolve(
        &self,
        sort: &[SortOrder],
        nulls: NullHandling,
    ) -> Result<Vec<OrderSpec<T>>, UnknownSortProperty> {
        sort.iter()
            .map(|order| {
                let target = self
                    .entries
                    .get(order.property.as_str())
                    .cloned()
                    .ok_or_else(|| UnknownSortProperty(order.property.clone()))?;
                Ok(OrderSpec {
                    target,
                    direction: order.direction,
                    nulls,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Registry over string tags; the tag stands in for a query expression.
    fn registry() -> SortRegistry<&'static str> {
        SortRegistry::new()
            .orderable("username", "u.username")
            .orderable("age", "u.age")
            .orderable("writer.id", "u.writer_id")
    }

    #[test]
    fn resolves_single_order() {
        let specs = registry()
            .resolve(&[SortOrder::desc("username")], NullHandling::Database)
            .unwrap();

        assert_eq!(
            specs,
            vec![OrderSpec {
                target: "u.username",
                direction: Direction::Desc,
                nulls: NullHandling::Database,
            }]
        );
    }

    #[test]
    fn resolves_multiple_orders_preserving_request_order() {
        let specs = registry()
            .resolve(
                &[SortOrder::desc("username"), SortOrder::asc("age")],
                NullHandling::Database,
            )
            .unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].target, "u.username");
        assert_eq!(specs[0].direction, Direction::Desc);
        assert_eq!(specs[1].target, "u.age");
        assert_eq!(specs[1].direction, Direction::Asc);
    }

    #[test]
    fn applies_null_handling_when_provided() {
        let specs = registry()
            .resolve(&[SortOrder::desc("username")], NullHandling::NullsFirst)
            .unwrap();

        assert_eq!(specs[0].nulls, NullHandling::NullsFirst);
    }

    #[test]
    fn resolves_nested_property_path() {
        let specs = registry()
            .resolve(&[SortOrder::asc("writer.id")], NullHandling::Database)
            .unwrap();

        assert_eq!(specs[0].target, "u.writer_id");
    }

    #[test]
    fn rejects_missing_property() {
        let err = registry()
            .resolve(&[SortOrder::asc("nickname")], NullHandling::Database)
            .unwrap_err();

        assert_eq!(err, UnknownSortProperty("nickname".into()));
    }

    #[test]
    fn rejects_non_orderable_property() {
        // A list-valued field never gets registered, so lookup rejects it.
        let err = registry()
            .resolve(&[SortOrder::asc("roles")], NullHandling::Database)
            .unwrap_err();

        assert_eq!(err, UnknownSortProperty("roles".into()));
    }

    #[test]
    fn empty_request_resolves_to_empty_ordering() {
        let specs = registry().resolve(&[], NullHandling::Database).unwrap();
        assert!(specs.is_empty());
    }

    #[test]
    fn parses_property_with_direction() {
        assert_eq!(SortOrder::parse("title,asc").unwrap(), SortOrder::asc("title"));
        assert_eq!(SortOrder::parse("title,DESC").unwrap(), SortOrder::desc("title"));
    }

    #[test]
    fn parse_defaults_to_ascending() {
        assert_eq!(SortOrder::parse("createdAt").unwrap(), SortOrder::asc("createdAt"));
    }

    #[test]
    fn parse_rejects_bad_direction_and_empty_property() {
        assert!(SortOrder::parse("title,sideways").is_err());
        assert!(SortOrder::parse(",asc").is_err());
        assert!(SortOrder::parse("").is_err());
    }
}
