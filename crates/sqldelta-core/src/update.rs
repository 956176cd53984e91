//! Named-parameter UPDATE statement generation.
//!
//! The entry points come in two shapes: [`UpdateGenerator`] for configured
//! generation, and the free functions [`generate_diff`] /
//! [`generate_explicit`] that wrap the default configuration.

use std::collections::HashMap;

use tracing::debug;

use crate::diff::{diff_records, reconcile, CollisionPolicy, KeyMatch};
use crate::error::{DeltaError, Result};
use crate::record::{find_field, Record};
use crate::value::SqlValue;

/// Mapping from emitted field name to the value to bind for it.
pub type ValueMap = HashMap<String, SqlValue>;

/// A generated UPDATE statement with its named-parameter values.
///
/// `sql` references each changed field as `f=:f` and the key as
/// `key=:key`; `values` holds one entry per changed field plus the key.
/// The map's iteration order is unspecified; the authoritative `SET`
/// order is `fields`.
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    /// The rendered SQL string with `:name` placeholders.
    pub sql: String,
    /// Changed (or explicitly requested) field names, in `SET` order.
    pub fields: Vec<String>,
    /// Values to bind, keyed by parameter name, including the key field.
    pub values: ValueMap,
}

impl UpdateStatement {
    /// Returns `true` if the statement assigns at least one field.
    ///
    /// A statement with no assignments is still syntactically renderable
    /// but performs a vacuous update; callers should skip executing it.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Configurable generator for minimal-delta UPDATE statements.
///
/// # Example
///
/// ```rust
/// use sqldelta_core::{KeyMatch, UpdateGenerator};
///
/// let generator = UpdateGenerator::new().key_match(KeyMatch::IgnoreAsciiCase);
/// # let _ = generator;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateGenerator {
    key_match: KeyMatch,
    collision_policy: CollisionPolicy,
}

impl UpdateGenerator {
    /// Creates a generator with the default configuration: exact key
    /// matching and last-write-wins collision handling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the key field name is matched against field names.
    #[must_use]
    pub const fn key_match(mut self, key_match: KeyMatch) -> Self {
        self.key_match = key_match;
        self
    }

    /// Sets how colliding nested leaf names are handled.
    #[must_use]
    pub const fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Diffs two snapshots of the same record type and generates an UPDATE
    /// for exactly the changed fields.
    ///
    /// The static type guarantees both inputs share a record type; the key
    /// field is still validated at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::MissingKeyField`] if `key` resolves to no
    /// field, [`DeltaError::InvalidValue`] if a nested record is set on
    /// only one side, and [`DeltaError::DuplicateField`] under
    /// [`CollisionPolicy::RequireUnique`] when an emitted name repeats.
    pub fn diff<T: Record>(
        self,
        table: &str,
        key: &str,
        new: &T,
        old: &T,
    ) -> Result<UpdateStatement> {
        self.diff_dyn(table, key, new, old)
    }

    /// Type-erased variant of [`Self::diff`].
    ///
    /// # Errors
    ///
    /// As [`Self::diff`], plus [`DeltaError::TypeMismatch`] when the two
    /// records are values of different concrete types.
    pub fn diff_dyn(
        self,
        table: &str,
        key: &str,
        new: &dyn Record,
        old: &dyn Record,
    ) -> Result<UpdateStatement> {
        reconcile(new, old)?;
        let key_value = find_field(new, key, self.key_match)
            .ok_or_else(|| DeltaError::MissingKeyField(String::from(key)))?;
        let delta = diff_records(new, old, key, self.key_match, self.collision_policy)?;
        Ok(render(table, key, key_value, delta.changed, delta.values))
    }

    /// Generates an UPDATE for an explicit, ordered list of field names,
    /// without comparing against a prior snapshot.
    ///
    /// Field names resolve case-sensitively against the flattened field
    /// view (nested leaves are addressable by their own name); only the key
    /// uses the configured [`KeyMatch`]. The caller's list is taken as
    /// authoritative: no equality filtering, no collision policing.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::MissingKeyField`] if `key` resolves to no
    /// field and [`DeltaError::MissingField`] if any requested name does
    /// not resolve; a single unresolved name fails the whole call.
    pub fn explicit(
        self,
        table: &str,
        key: &str,
        record: &dyn Record,
        fields: &[&str],
    ) -> Result<UpdateStatement> {
        let key_value = find_field(record, key, self.key_match)
            .ok_or_else(|| DeltaError::MissingKeyField(String::from(key)))?;
        let mut changed = Vec::with_capacity(fields.len());
        let mut values = ValueMap::with_capacity(fields.len() + 1);
        for &name in fields {
            let value = find_field(record, name, KeyMatch::Exact)
                .ok_or_else(|| DeltaError::MissingField(String::from(name)))?;
            changed.push(String::from(name));
            values.insert(String::from(name), value);
        }
        Ok(render(table, key, key_value, changed, values))
    }
}

/// Renders the statement and finalizes the value map.
///
/// The key's value always comes from the record the caller designated as
/// current and overwrites any stray same-named entry.
fn render(
    table: &str,
    key: &str,
    key_value: SqlValue,
    fields: Vec<String>,
    mut values: ValueMap,
) -> UpdateStatement {
    let assignments = fields
        .iter()
        .map(|field| format!("{field}=:{field}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {table} SET {assignments} WHERE {key}=:{key}");
    values.insert(String::from(key), key_value);
    debug!(table, changed = fields.len(), "generated update statement");
    UpdateStatement {
        sql,
        fields,
        values,
    }
}

/// Diffs two snapshots with the default configuration and generates an
/// UPDATE for exactly the changed fields.
///
/// # Errors
///
/// See [`UpdateGenerator::diff`].
pub fn generate_diff<T: Record>(
    table: &str,
    key: &str,
    new: &T,
    old: &T,
) -> Result<UpdateStatement> {
    UpdateGenerator::new().diff(table, key, new, old)
}

/// Generates an UPDATE for an explicit field list with the default
/// configuration.
///
/// # Errors
///
/// See [`UpdateGenerator::explicit`].
pub fn generate_explicit(
    table: &str,
    key: &str,
    record: &dyn Record,
    fields: &[&str],
) -> Result<UpdateStatement> {
    UpdateGenerator::new().explicit(table, key, record, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use std::any::Any;

    struct Account {
        id: i64,
        owner: String,
        balance: i64,
    }

    impl Record for Account {
        fn type_name(&self) -> &'static str {
            "Account"
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
                Field::Scalar {
                    name: "Owner",
                    value: SqlValue::Text(self.owner.clone()),
                },
                Field::Scalar {
                    name: "Balance",
                    value: SqlValue::Int(self.balance),
                },
            ]
        }
    }

    fn account(id: i64, owner: &str, balance: i64) -> Account {
        Account {
            id,
            owner: String::from(owner),
            balance,
        }
    }

    #[test]
    fn test_diff_renders_changed_assignments() {
        let update = generate_diff(
            "accounts",
            "Id",
            &account(1, "alice", 250),
            &account(1, "alice", 100),
        )
        .unwrap();
        assert_eq!(
            update.sql,
            "UPDATE accounts SET Balance=:Balance WHERE Id=:Id"
        );
        assert_eq!(update.fields, ["Balance"]);
        assert!(update.has_changes());
    }

    #[test]
    fn test_empty_changed_set_renders_degenerate_statement() {
        let update = generate_diff(
            "accounts",
            "Id",
            &account(1, "alice", 100),
            &account(1, "alice", 100),
        )
        .unwrap();
        assert_eq!(update.sql, "UPDATE accounts SET  WHERE Id=:Id");
        assert!(!update.has_changes());
        assert_eq!(update.values.len(), 1);
        assert_eq!(update.values.get("Id"), Some(&SqlValue::Int(1)));
    }

    #[test]
    fn test_key_value_comes_from_new_record() {
        // Key values should never differ between snapshots of one row, but
        // when they do the new record wins.
        let update = generate_diff(
            "accounts",
            "Id",
            &account(2, "alice", 100),
            &account(1, "alice", 100),
        )
        .unwrap();
        assert_eq!(update.values.get("Id"), Some(&SqlValue::Int(2)));
    }

    #[test]
    fn test_missing_key_field() {
        let err = generate_diff(
            "accounts",
            "Uuid",
            &account(1, "alice", 100),
            &account(1, "alice", 100),
        )
        .unwrap_err();
        assert_eq!(err, DeltaError::MissingKeyField(String::from("Uuid")));
    }

    #[test]
    fn test_explicit_uses_requested_order() {
        let update = generate_explicit(
            "accounts",
            "Id",
            &account(1, "alice", 100),
            &["Balance", "Owner"],
        )
        .unwrap();
        assert_eq!(
            update.sql,
            "UPDATE accounts SET Balance=:Balance, Owner=:Owner WHERE Id=:Id"
        );
        assert_eq!(update.values.len(), 3);
    }

    #[test]
    fn test_explicit_missing_field_is_fatal() {
        let err = generate_explicit(
            "accounts",
            "Id",
            &account(1, "alice", 100),
            &["Owner", "Missing"],
        )
        .unwrap_err();
        assert_eq!(err, DeltaError::MissingField(String::from("Missing")));
    }
}
