//! Database repositories.

mod feedback;
mod place;
mod review;
mod scorecard;
mod user;

pub use feedback::FeedbackRepository;
pub use place::PlaceRepository;
pub use review::ReviewRepository;
pub use scorecard::ScorecardRepository;
pub use user::UserRepository;
