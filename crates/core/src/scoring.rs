//! Scorecard aggregation.
//!
//! Scores are computed over the latest review of each distinct reviewer.
//! For every rated attribute the polarity is the floored percentage of
//! net-positive ratings and the coverage is the floored percentage of
//! reviewers who rated it.

use std::collections::BTreeMap;

use places_db::entities::{feedback, review};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::feedback::Ratings;

/// Aggregated score of one attribute.
///
/// Serialized as a `[polarity, coverage]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct AttributeScore {
    /// Net sentiment, -100..=100.
    pub polarity: i32,
    /// Share of reviewers who rated the attribute, 0..=100.
    pub coverage: i32,
}

impl From<(i32, i32)> for AttributeScore {
    fn from((polarity, coverage): (i32, i32)) -> Self {
        Self { polarity, coverage }
    }
}

impl From<AttributeScore> for (i32, i32) {
    fn from(score: AttributeScore) -> Self {
        (score.polarity, score.coverage)
    }
}

/// Scores keyed by attribute in canonical order. Unrated attributes are absent.
pub type Scores = BTreeMap<Attribute, AttributeScore>;

/// The parts of a review that aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSnapshot {
    pub review_id: String,
    pub reviewer_id: String,
    pub visit_date: DateTimeWithTimeZone,
    pub ratings: Ratings,
}

impl ReviewSnapshot {
    /// Pair a stored review with its feedback.
    ///
    /// Returns `None` for reviews whose reviewer has been removed.
    #[must_use]
    pub fn from_models(review: &review::Model, feedback: &feedback::Model) -> Option<Self> {
        let reviewer_id = review.reviewer_id.clone()?;
        Some(Self {
            review_id: review.id.clone(),
            reviewer_id,
            visit_date: review.visit_date,
            ratings: Ratings::from_model(feedback),
        })
    }
}

/// Pick each reviewer's most recent review.
///
/// The latest `visit_date` wins; equal dates fall back to the greater review
/// ID. The result is ordered by reviewer.
#[must_use]
pub fn latest_per_reviewer(reviews: &[ReviewSnapshot]) -> Vec<&ReviewSnapshot> {
    let mut latest: BTreeMap<&str, &ReviewSnapshot> = BTreeMap::new();
    for review in reviews {
        latest
            .entry(review.reviewer_id.as_str())
            .and_modify(|current| {
                if (review.visit_date, &review.review_id)
                    > (current.visit_date, &current.review_id)
                {
                    *current = review;
                }
            })
            .or_insert(review);
    }
    latest.into_values().collect()
}

/// Compute attribute scores for a set of reviews of one place.
///
/// Returns an empty map when there are no reviews.
#[must_use]
pub fn compute_scores(reviews: &[ReviewSnapshot]) -> Scores {
    let selected = latest_per_reviewer(reviews);
    let reviewer_count = i64::try_from(selected.len()).unwrap_or(i64::MAX);
    if reviewer_count == 0 {
        return Scores::new();
    }

    let mut signed = [0_i64; Attribute::COUNT];
    let mut total = [0_i64; Attribute::COUNT];
    for review in &selected {
        for (attr, rating) in review.ratings.iter() {
            signed[attr.index()] += rating.signum();
            total[attr.index()] += 1;
        }
    }

    Attribute::ALL
        .into_iter()
        .filter(|attr| total[attr.index()] > 0)
        .map(|attr| {
            let i = attr.index();
            let score = AttributeScore {
                polarity: percent_floor(signed[i], total[i]),
                coverage: percent_floor(total[i], reviewer_count),
            };
            (attr, score)
        })
        .collect()
}

/// `floor(part * 100 / whole)` in integer arithmetic.
#[allow(clippy::cast_possible_truncation)]
fn percent_floor(part: i64, whole: i64) -> i32 {
    // Bounded to -100..=100 by construction.
    (part * 100).div_euclid(whole) as i32
}
