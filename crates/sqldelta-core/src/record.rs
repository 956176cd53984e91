//! Record description traits.
//!
//! [`Record`] is the capability every diffable type provides: an ordered
//! description of its public fields, plus enough runtime identity to verify
//! that two values are snapshots of the same type. It is normally
//! implemented via `#[derive(Record)]` from the `sqldelta-derive` crate.

use std::any::Any;

use crate::diff::KeyMatch;
use crate::value::SqlValue;

/// A record type whose fields can be enumerated for diffing.
///
/// Implementations describe their `pub` fields in declaration order; private
/// fields are simply absent from the description and therefore invisible to
/// the differ. Nested records are reported as [`Field::Nested`] markers and
/// expanded recursively rather than compared as one opaque unit.
pub trait Record: Any {
    /// The declared name of the record type, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Upcast used for runtime type-identity checks.
    fn as_any(&self) -> &dyn Any;

    /// The record's field descriptors, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A single field of a [`Record`].
pub enum Field<'a> {
    /// A scalar field, materialized to its column value.
    Scalar {
        /// Emitted field name.
        name: &'static str,
        /// Current value of the field.
        value: SqlValue,
    },
    /// A nested record to recurse into. `None` models an unset
    /// `Option`-wrapped nested record.
    Nested {
        /// Field name of the nested record (used as a prefix under
        /// [`crate::CollisionPolicy::PrefixParent`]).
        name: &'static str,
        /// The nested record, if set.
        record: Option<&'a dyn Record>,
    },
}

impl Field<'_> {
    /// Returns the field's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar { name, .. } | Self::Nested { name, .. } => name,
        }
    }
}

/// Resolves `name` against the flattened field view of `record`.
///
/// Walks the descriptors depth-first in pre-order, descending into set
/// nested records, and returns the value of the first scalar whose name
/// matches. This mirrors transparent promotion of embedded fields: a nested
/// leaf is addressable by its own name from the outside. Unset nested
/// records are skipped; their leaves are not visible.
pub(crate) fn find_field(
    record: &dyn Record,
    name: &str,
    matching: KeyMatch,
) -> Option<SqlValue> {
    for field in record.fields() {
        match field {
            Field::Scalar {
                name: field_name,
                value,
            } => {
                if matching.matches(field_name, name) {
                    return Some(value);
                }
            }
            Field::Nested {
                record: Some(nested),
                ..
            } => {
                if let Some(value) = find_field(nested, name, matching) {
                    return Some(value);
                }
            }
            Field::Nested { record: None, .. } => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inner {
        code: i64,
    }

    impl Record for Inner {
        fn type_name(&self) -> &'static str {
            "Inner"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::Scalar {
                name: "Code",
                value: SqlValue::Int(self.code),
            }]
        }
    }

    struct Outer {
        id: i64,
        inner: Option<Inner>,
    }

    impl Record for Outer {
        fn type_name(&self) -> &'static str {
            "Outer"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::Scalar {
                    name: "Id",
                    value: SqlValue::Int(self.id),
                },
                Field::Nested {
                    name: "Inner",
                    record: self.inner.as_ref().map(|r| r as &dyn Record),
                },
            ]
        }
    }

    #[test]
    fn test_field_name_accessor() {
        let outer = Outer { id: 1, inner: None };
        let names: Vec<_> = outer.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["Id", "Inner"]);
    }

    #[test]
    fn test_find_field_top_level() {
        let outer = Outer { id: 7, inner: None };
        assert_eq!(
            find_field(&outer, "Id", KeyMatch::Exact),
            Some(SqlValue::Int(7))
        );
        assert_eq!(find_field(&outer, "id", KeyMatch::Exact), None);
        assert_eq!(
            find_field(&outer, "id", KeyMatch::IgnoreAsciiCase),
            Some(SqlValue::Int(7))
        );
    }

    #[test]
    fn test_find_field_descends_into_set_nested() {
        let outer = Outer {
            id: 1,
            inner: Some(Inner { code: 99 }),
        };
        assert_eq!(
            find_field(&outer, "Code", KeyMatch::Exact),
            Some(SqlValue::Int(99))
        );
    }

    #[test]
    fn test_find_field_skips_unset_nested() {
        let outer = Outer { id: 1, inner: None };
        assert_eq!(find_field(&outer, "Code", KeyMatch::Exact), None);
    }
}
