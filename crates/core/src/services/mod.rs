//! Business logic services.

#![allow(missing_docs)]

pub mod place;
pub mod review;
pub mod scorecard;
pub mod user;

pub use place::{CreatePlaceInput, PlaceService, UpdatePlaceInput};
pub use review::{ReviewService, ReviewWithFeedback, SubmitReviewInput};
pub use scorecard::{ComputedScores, ScorecardService, stored_scores};
pub use user::{CreateUserInput, UserService};
