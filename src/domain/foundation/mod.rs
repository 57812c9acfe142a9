//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the area comparison domain.

mod errors;
mod format;
mod ids;
mod index_score;
mod side;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use format::{format_currency, format_years};
pub use ids::{AreaId, UnitType};
pub use index_score::IndexScore;
pub use side::AreaSide;
