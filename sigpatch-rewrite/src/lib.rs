//! Edits committed to a [`Program`](sigpatch_model::Program).
//!
//! Two primitives exist: [`force_return`] replaces a whole body with a
//! minimal load-and-return sequence, and [`SubstitutionPlan`] replaces
//! every read of one field with a constant zero load, in place.

mod error;
mod force_return;
mod substitute;

pub use error::{Result, RewriteError};
pub use force_return::{Edit, force_return, minimal_body};
pub use substitute::{Site, SubstitutionPlan};
