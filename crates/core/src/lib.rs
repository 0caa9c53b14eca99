//! Core business logic for places-rs.
//!
//! - [`attribute`]: the fixed set of rateable place attributes
//! - [`feedback`]: tri-state ratings and the submission rules they obey
//! - [`scoring`]: scorecard aggregation over the latest review of each reviewer
//! - [`services`]: persistence-backed operations used by the API layer

pub mod attribute;
pub mod feedback;
pub mod scoring;
pub mod services;

pub use attribute::Attribute;
pub use feedback::{MIN_RATED_ATTRIBUTES, Rating, Ratings};
pub use scoring::{AttributeScore, ReviewSnapshot, Scores};
pub use services::*;
