//! Feedback ratings and validation.
//!
//! A review's feedback rates each [`Attribute`] as good, poor or not at all.
//! Feedback is only persisted when it passes [`Ratings::validate`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use places_common::{AppError, AppResult};
use places_db::entities::feedback;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// Minimum number of attributes a feedback must rate.
pub const MIN_RATED_ATTRIBUTES: usize = 3;

const TOO_FEW_RATINGS: &str = "Minimum of 3 attribute feedbacks required.";
const CONTRADICTORY_RATING: &str = "Cannot rate an attribute BOTH negatively and positively.";

/// A single attribute rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Poor,
}

impl Rating {
    /// Wire name of the rating.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Poor => "poor",
        }
    }

    /// Storage form of a rating.
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Good)
    }

    /// Signed contribution of this rating to a polarity score.
    #[must_use]
    pub const fn signum(self) -> i64 {
        match self {
            Self::Good => 1,
            Self::Poor => -1,
        }
    }
}

impl From<bool> for Rating {
    fn from(positive: bool) -> Self {
        if positive { Self::Good } else { Self::Poor }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "poor" => Ok(Self::Poor),
            _ => Err(AppError::Validation(format!("Unknown rating: {s}"))),
        }
    }
}

/// Ratings for every attribute of one review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratings([Option<Rating>; Attribute::COUNT]);

impl Ratings {
    /// Empty ratings.
    #[must_use]
    pub const fn new() -> Self {
        Self([None; Attribute::COUNT])
    }

    /// Rating given to `attr`, if any.
    #[must_use]
    pub const fn get(&self, attr: Attribute) -> Option<Rating> {
        self.0[attr.index()]
    }

    /// Set or clear the rating of `attr`.
    pub const fn set(&mut self, attr: Attribute, rating: Option<Rating>) {
        self.0[attr.index()] = rating;
    }

    /// Builder form of [`Ratings::set`].
    #[must_use]
    pub const fn with(mut self, attr: Attribute, rating: Rating) -> Self {
        self.set(attr, Some(rating));
        self
    }

    /// Iterate over rated attributes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Rating)> + '_ {
        Attribute::ALL
            .into_iter()
            .filter_map(|attr| self.get(attr).map(|rating| (attr, rating)))
    }

    /// Parse a mapping of attribute name to rating word.
    ///
    /// Blank rating words leave the attribute unrated. Keys naming the same
    /// attribute (`"food"`, `"Food"`, `"FO"`) must agree.
    pub fn from_map(map: &BTreeMap<String, String>) -> AppResult<Self> {
        let mut ratings = Self::new();
        for (name, word) in map {
            let attr = parse_attribute(name)?;
            if word.trim().is_empty() {
                continue;
            }
            let rating: Rating = word.parse()?;
            match ratings.get(attr) {
                Some(existing) if existing != rating => {
                    return Err(AppError::Validation(CONTRADICTORY_RATING.to_string()));
                }
                _ => ratings.set(attr, Some(rating)),
            }
        }
        Ok(ratings)
    }

    /// Build ratings from separate lists of good and poor attributes.
    ///
    /// Fails when an attribute appears in both lists.
    pub fn from_lists<S: AsRef<str>>(good: &[S], poor: &[S]) -> AppResult<Self> {
        let mut ratings = Self::new();
        for name in good {
            ratings.set(parse_attribute(name.as_ref())?, Some(Rating::Good));
        }
        for name in poor {
            let attr = parse_attribute(name.as_ref())?;
            if ratings.get(attr) == Some(Rating::Good) {
                return Err(AppError::Validation(CONTRADICTORY_RATING.to_string()));
            }
            ratings.set(attr, Some(Rating::Poor));
        }
        Ok(ratings)
    }

    /// Read ratings from a stored feedback row.
    #[must_use]
    pub fn from_model(model: &feedback::Model) -> Self {
        let columns = [
            model.atmosphere,
            model.cleanliness,
            model.decor,
            model.drink,
            model.entertainment,
            model.food,
            model.quality,
            model.service,
            model.speed,
            model.value,
        ];
        Self(columns.map(|column| column.map(Rating::from)))
    }

    /// Build the feedback row for `review_id`.
    #[must_use]
    pub fn into_active_model(self, review_id: &str) -> feedback::ActiveModel {
        let column = |attr: Attribute| Set(self.get(attr).map(Rating::as_bool));
        feedback::ActiveModel {
            review_id: Set(review_id.to_string()),
            atmosphere: column(Attribute::Atmosphere),
            cleanliness: column(Attribute::Cleanliness),
            decor: column(Attribute::Decor),
            drink: column(Attribute::Drink),
            entertainment: column(Attribute::Entertainment),
            food: column(Attribute::Food),
            quality: column(Attribute::Quality),
            service: column(Attribute::Service),
            speed: column(Attribute::Speed),
            value: column(Attribute::Value),
        }
    }

    /// Attributes rated with `rating`, in canonical order.
    #[must_use]
    pub fn get_feedback(&self, rating: Rating) -> Vec<Attribute> {
        self.iter()
            .filter(|&(_, r)| r == rating)
            .map(|(attr, _)| attr)
            .collect()
    }

    /// Names of the rateable fields, in canonical order.
    #[must_use]
    pub fn field_names() -> Vec<&'static str> {
        Attribute::ALL.iter().map(|attr| attr.name()).collect()
    }

    /// `(good, poor)` rating counts.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        self.iter().fold((0, 0), |(good, poor), (_, rating)| match rating {
            Rating::Good => (good + 1, poor),
            Rating::Poor => (good, poor + 1),
        })
    }

    /// Number of rated attributes.
    #[must_use]
    pub fn rated_count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Rated attributes as a name to rating map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<Attribute, Rating> {
        self.iter().collect()
    }

    /// Check that enough attributes are rated to persist this feedback.
    ///
    /// Each attribute holds at most one rating, so a good/poor overlap can
    /// only arise while parsing; [`Ratings::from_map`] and
    /// [`Ratings::from_lists`] reject it there.
    pub fn validate(&self) -> AppResult<()> {
        if self.rated_count() < MIN_RATED_ATTRIBUTES {
            return Err(AppError::Validation(TOO_FEW_RATINGS.to_string()));
        }
        Ok(())
    }
}

impl Serialize for Ratings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

fn parse_attribute(name: &str) -> AppResult<Attribute> {
    name.parse()
        .map_err(|e: crate::attribute::UnknownAttribute| AppError::Validation(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn empty_model() -> feedback::Model {
        feedback::Model {
            review_id: "r1".to_string(),
            atmosphere: None,
            cleanliness: None,
            decor: None,
            drink: None,
            entertainment: None,
            food: None,
            quality: None,
            service: None,
            speed: None,
            value: None,
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_feedback() {
        let ratings = Ratings::from_model(&empty_model());
        assert!(ratings.get_feedback(Rating::Good).is_empty());
        assert!(ratings.get_feedback(Rating::Poor).is_empty());
        assert_eq!(ratings.counts(), (0, 0));
    }

    #[test]
    fn test_get_feedback_positive_and_negative() {
        let model = feedback::Model {
            food: Some(true),
            decor: Some(true),
            value: Some(false),
            ..empty_model()
        };
        let ratings = Ratings::from_model(&model);

        assert_eq!(
            ratings.get_feedback(Rating::Good),
            vec![Attribute::Decor, Attribute::Food]
        );
        assert_eq!(ratings.get_feedback(Rating::Poor), vec![Attribute::Value]);
    }

    #[test]
    fn test_field_names_all_attributes_unique() {
        let names = Ratings::field_names();
        assert_eq!(names.len(), Attribute::COUNT);
        assert_eq!(names.first(), Some(&"atmosphere"));
        assert_eq!(names.last(), Some(&"value"));
        assert!(!names.contains(&"review_id"));
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_counts() {
        let mut ratings = Ratings::new();
        assert_eq!(ratings.counts(), (0, 0));

        for attr in Attribute::ALL {
            ratings.set(attr, Some(Rating::Good));
        }
        assert_eq!(ratings.counts(), (10, 0));

        for attr in Attribute::ALL {
            ratings.set(attr, Some(Rating::Poor));
        }
        assert_eq!(ratings.counts(), (0, 10));

        ratings.set(Attribute::Food, Some(Rating::Good));
        ratings.set(Attribute::Speed, None);
        assert_eq!(ratings.counts(), (1, 8));
    }

    #[test]
    fn test_good_poor_and_unrated_partition_attributes() {
        let ratings = Ratings::new()
            .with(Attribute::Atmosphere, Rating::Good)
            .with(Attribute::Drink, Rating::Poor)
            .with(Attribute::Service, Rating::Good);

        let good: HashSet<_> = ratings.get_feedback(Rating::Good).into_iter().collect();
        let poor: HashSet<_> = ratings.get_feedback(Rating::Poor).into_iter().collect();
        let unrated: HashSet<_> = Attribute::ALL
            .into_iter()
            .filter(|&a| ratings.get(a).is_none())
            .collect();

        assert!(good.is_disjoint(&poor));
        assert!(good.is_disjoint(&unrated));
        assert!(poor.is_disjoint(&unrated));
        assert_eq!(good.len() + poor.len() + unrated.len(), Attribute::COUNT);
    }

    #[test]
    fn test_two_ratings_rejected() {
        let ratings = Ratings::new()
            .with(Attribute::Food, Rating::Good)
            .with(Attribute::Value, Rating::Poor);

        let err = ratings.validate().unwrap_err();
        assert_eq!(
            validation_message(err),
            "Minimum of 3 attribute feedbacks required."
        );
    }

    #[test]
    fn test_three_ratings_accepted() {
        let ratings = Ratings::new()
            .with(Attribute::Food, Rating::Good)
            .with(Attribute::Service, Rating::Good)
            .with(Attribute::Value, Rating::Poor);

        assert!(ratings.validate().is_ok());
    }

    #[test]
    fn test_from_map() {
        let map = BTreeMap::from([
            ("food".to_string(), "good".to_string()),
            ("service".to_string(), "Poor".to_string()),
            ("decor".to_string(), String::new()),
        ]);
        let ratings = Ratings::from_map(&map).unwrap();

        assert_eq!(ratings.get(Attribute::Food), Some(Rating::Good));
        assert_eq!(ratings.get(Attribute::Service), Some(Rating::Poor));
        assert_eq!(ratings.get(Attribute::Decor), None);
        assert_eq!(ratings.rated_count(), 2);
    }

    #[test]
    fn test_from_map_rejects_unknown_names() {
        let map = BTreeMap::from([("ambience".to_string(), "good".to_string())]);
        assert!(matches!(
            Ratings::from_map(&map),
            Err(AppError::Validation(_))
        ));

        let map = BTreeMap::from([("food".to_string(), "meh".to_string())]);
        assert!(matches!(
            Ratings::from_map(&map),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_from_lists_rejects_contradiction() {
        let err = Ratings::from_lists(&["food", "service"], &["value", "food"]).unwrap_err();
        assert_eq!(
            validation_message(err),
            "Cannot rate an attribute BOTH negatively and positively."
        );
    }

    #[test]
    fn test_from_map_rejects_contradiction_across_aliases() {
        let map = BTreeMap::from([
            ("food".to_string(), "good".to_string()),
            ("FO".to_string(), "poor".to_string()),
            ("service".to_string(), "good".to_string()),
            ("value".to_string(), "good".to_string()),
        ]);

        let err = Ratings::from_map(&map).unwrap_err();
        assert_eq!(
            validation_message(err),
            "Cannot rate an attribute BOTH negatively and positively."
        );
    }

    #[test]
    fn test_from_map_accepts_agreeing_aliases() {
        let map = BTreeMap::from([
            ("food".to_string(), "good".to_string()),
            ("Food".to_string(), "good".to_string()),
            ("service".to_string(), "poor".to_string()),
        ]);

        let ratings = Ratings::from_map(&map).unwrap();
        assert_eq!(ratings.get(Attribute::Food), Some(Rating::Good));
        assert_eq!(ratings.rated_count(), 2);
    }

    #[test]
    fn test_from_lists() {
        let ratings = Ratings::from_lists(&["food", "service"], &["value"]).unwrap();
        assert_eq!(ratings.counts(), (2, 1));
        assert!(ratings.validate().is_ok());
    }

    #[test]
    fn test_model_conversion_preserves_ratings() {
        let ratings = Ratings::new()
            .with(Attribute::Cleanliness, Rating::Poor)
            .with(Attribute::Quality, Rating::Good);
        let active = ratings.into_active_model("r9");

        assert_eq!(active.review_id.unwrap(), "r9");
        assert_eq!(active.cleanliness.unwrap(), Some(false));
        assert_eq!(active.quality.unwrap(), Some(true));
        assert_eq!(active.food.unwrap(), None);
    }

    #[test]
    fn test_serialize_as_map() {
        let ratings = Ratings::new()
            .with(Attribute::Value, Rating::Poor)
            .with(Attribute::Food, Rating::Good);
        let json = serde_json::to_string(&ratings).unwrap();
        assert_eq!(json, r#"{"food":"good","value":"poor"}"#);
    }
}
