//! Field differ and type reconciliation.
//!
//! Compares a "new" and an "old" snapshot of the same record type and
//! collects the ordered set of changed field names together with their new
//! values. Nested records are flattened: their leaves are compared and
//! reported individually, in depth-first pre-order, interleaved at the
//! position of the nested field.

use std::collections::HashMap;

use crate::error::{DeltaError, Result};
use crate::record::{Field, Record};
use crate::value::SqlValue;

/// How the declared key field name is matched against field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatch {
    /// Exact, case-sensitive comparison.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison.
    IgnoreAsciiCase,
}

impl KeyMatch {
    /// Returns `true` if `field` matches `key` under this mode.
    #[must_use]
    pub fn matches(self, field: &str, key: &str) -> bool {
        match self {
            Self::Exact => field == key,
            Self::IgnoreAsciiCase => field.eq_ignore_ascii_case(key),
        }
    }
}

/// How colliding leaf names across nesting levels are handled.
///
/// Flattening loses the parent field's name, so a nested leaf may be
/// emitted under the same name as another field. The policy decides what
/// happens then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep every occurrence as its own `SET` clause; the later value wins
    /// in the value map. This preserves the historical flattening
    /// semantics.
    #[default]
    LastWriteWins,
    /// A repeated emitted name fails the call with
    /// [`DeltaError::DuplicateField`].
    RequireUnique,
    /// Nested leaves are emitted as `parent_leaf` (the full nesting chain,
    /// joined with underscores), keeping names unique by construction as
    /// long as top-level names are.
    PrefixParent,
}

/// The outcome of a diff walk: ordered changed-field names and their new
/// values. The key field is never part of it.
pub(crate) struct Delta {
    pub changed: Vec<String>,
    pub values: HashMap<String, SqlValue>,
}

/// Verifies that both records are values of the same concrete type.
pub(crate) fn reconcile(new: &dyn Record, old: &dyn Record) -> Result<()> {
    if new.as_any().type_id() == old.as_any().type_id() {
        Ok(())
    } else {
        Err(DeltaError::TypeMismatch {
            new: new.type_name(),
            old: old.type_name(),
        })
    }
}

/// Walks both records in declaration order and collects changed leaves.
///
/// A leaf whose (unprefixed) name matches `key` is skipped at any depth,
/// regardless of whether its value changed.
pub(crate) fn diff_records(
    new: &dyn Record,
    old: &dyn Record,
    key: &str,
    key_match: KeyMatch,
    collision: CollisionPolicy,
) -> Result<Delta> {
    let mut delta = Delta {
        changed: Vec::new(),
        values: HashMap::new(),
    };
    collect(new, old, key, key_match, collision, None, &mut delta)?;
    Ok(delta)
}

fn collect(
    new: &dyn Record,
    old: &dyn Record,
    key: &str,
    key_match: KeyMatch,
    collision: CollisionPolicy,
    prefix: Option<&str>,
    delta: &mut Delta,
) -> Result<()> {
    for (new_field, old_field) in new.fields().into_iter().zip(old.fields()) {
        match (new_field, old_field) {
            (
                Field::Scalar {
                    name,
                    value: new_value,
                },
                Field::Scalar {
                    value: old_value, ..
                },
            ) => {
                if key_match.matches(name, key) {
                    continue;
                }
                if new_value == old_value {
                    continue;
                }
                let emitted = match (collision, prefix) {
                    (CollisionPolicy::PrefixParent, Some(parent)) => {
                        format!("{parent}_{name}")
                    }
                    _ => String::from(name),
                };
                if collision == CollisionPolicy::RequireUnique
                    && delta.values.contains_key(&emitted)
                {
                    return Err(DeltaError::DuplicateField(emitted));
                }
                delta.changed.push(emitted.clone());
                delta.values.insert(emitted, new_value);
            }
            (
                Field::Nested {
                    name,
                    record: new_nested,
                },
                Field::Nested {
                    record: old_nested, ..
                },
            ) => match (new_nested, old_nested) {
                (Some(new_rec), Some(old_rec)) => {
                    let chain = prefix.map_or_else(
                        || String::from(name),
                        |parent| format!("{parent}_{name}"),
                    );
                    collect(
                        new_rec,
                        old_rec,
                        key,
                        key_match,
                        collision,
                        Some(chain.as_str()),
                        delta,
                    )?;
                }
                (None, None) => {}
                _ => {
                    return Err(DeltaError::InvalidValue(format!(
                        "nested record '{name}' is set on only one side"
                    )));
                }
            },
            _ => {
                // Same concrete type implies identical descriptor shapes;
                // a divergence means a broken Record implementation.
                return Err(DeltaError::InvalidValue(String::from(
                    "record field descriptors diverge between snapshots",
                )));
            }
        }
    }
    Ok(())
}
