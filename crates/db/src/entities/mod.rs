//! Database entities.

#![allow(missing_docs)]

pub mod feedback;
pub mod place;
pub mod review;
pub mod scorecard;
pub mod user;

pub use feedback::Entity as Feedback;
pub use place::Entity as Place;
pub use review::Entity as Review;
pub use scorecard::Entity as Scorecard;
pub use user::Entity as User;
