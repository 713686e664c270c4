//! Locating code units by their string constants and inferring the role of
//! methods and fields from instruction-level evidence.
//!
//! Nothing in this crate mutates a [`Program`](sigpatch_model::Program);
//! it produces match results and edit plans that the rewrite layer applies.

pub mod evidence;
pub mod field;
pub mod fingerprint;
pub mod role;

pub use evidence::Evidence;
pub use field::{FieldTally, Unresolved};
pub use fingerprint::{Fingerprint, MatchResult};
pub use role::{PlannedEdit, Role, classify_boolean};
