//! # sqldelta-core
//!
//! Minimal-delta SQL `UPDATE` generation from typed records.
//!
//! Given two snapshots of the same record (one fetched, one mutated),
//! this crate computes the fields that actually changed and synthesizes a
//! named-parameter `UPDATE` statement plus a value map covering exactly
//! those fields, so callers persist the delta instead of the full row.
//!
//! Record types opt in with `#[derive(Record)]` from `sqldelta-derive`,
//! which describes their `pub` fields in declaration order. Values cross
//! the boundary as the tagged [`SqlValue`] type; binding them is the job
//! of an external named-parameter executor.
//!
//! ## Diffing two snapshots
//!
//! ```rust
//! use sqldelta_core::generate_diff;
//! use sqldelta_derive::Record;
//!
//! #[derive(Debug, Clone, Record)]
//! pub struct User {
//!     #[record(name = "Id")]
//!     pub id: i64,
//!     #[record(name = "FirstName")]
//!     pub first_name: String,
//!     #[record(name = "LastName")]
//!     pub last_name: String,
//!     #[record(name = "Email")]
//!     pub email: String,
//! }
//!
//! let old = User {
//!     id: 1,
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     email: "janedoe@example.com".into(),
//! };
//! let new = User {
//!     first_name: "John".into(),
//!     email: "johndoe@example.com".into(),
//!     ..old.clone()
//! };
//!
//! let update = generate_diff("users", "Id", &new, &old)?;
//! assert_eq!(
//!     update.sql,
//!     "UPDATE users SET FirstName=:FirstName, Email=:Email WHERE Id=:Id"
//! );
//! assert!(update.has_changes());
//! # Ok::<(), sqldelta_core::DeltaError>(())
//! ```
//!
//! ## Updating an explicit field list
//!
//! No prior snapshot needed; the caller names the fields to persist:
//!
//! ```rust
//! # use sqldelta_core::generate_explicit;
//! # use sqldelta_derive::Record;
//! # #[derive(Debug, Clone, Record)]
//! # pub struct User {
//! #     #[record(name = "Id")]
//! #     pub id: i64,
//! #     #[record(name = "Email")]
//! #     pub email: String,
//! # }
//! # let user = User { id: 1, email: "j@example.com".into() };
//! let update = generate_explicit("users", "Id", &user, &["Email"])?;
//! assert_eq!(update.sql, "UPDATE users SET Email=:Email WHERE Id=:Id");
//! assert_eq!(update.values.len(), 2);
//! # Ok::<(), sqldelta_core::DeltaError>(())
//! ```
//!
//! ## Configuration
//!
//! [`UpdateGenerator`] exposes the two historically ambiguous choices as
//! explicit options: [`KeyMatch`] (exact vs ASCII case-insensitive key
//! matching) and [`CollisionPolicy`] (what happens when flattened nested
//! leaves collide with other field names).

pub mod diff;
pub mod error;
pub mod record;
pub mod update;
pub mod value;

pub use diff::{CollisionPolicy, KeyMatch};
pub use error::{DeltaError, Result};
pub use record::{Field, Record};
pub use update::{
    generate_diff, generate_explicit, UpdateGenerator, UpdateStatement, ValueMap,
};
pub use value::{SqlValue, ToSqlValue};
