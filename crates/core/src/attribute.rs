//! Rateable place attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A place attribute that reviewers can rate.
///
/// The declaration order is the canonical order used everywhere attributes
/// are listed or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Atmosphere,
    Cleanliness,
    Decor,
    Drink,
    Entertainment,
    Food,
    Quality,
    Service,
    Speed,
    Value,
}

impl Attribute {
    /// Every attribute, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Atmosphere,
        Self::Cleanliness,
        Self::Decor,
        Self::Drink,
        Self::Entertainment,
        Self::Food,
        Self::Quality,
        Self::Service,
        Self::Speed,
        Self::Value,
    ];

    /// Number of attributes.
    pub const COUNT: usize = Self::ALL.len();

    /// Field name used in requests, responses and storage.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Atmosphere => "atmosphere",
            Self::Cleanliness => "cleanliness",
            Self::Decor => "decor",
            Self::Drink => "drink",
            Self::Entertainment => "entertainment",
            Self::Food => "food",
            Self::Quality => "quality",
            Self::Service => "service",
            Self::Speed => "speed",
            Self::Value => "value",
        }
    }

    /// Two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Atmosphere => "AT",
            Self::Cleanliness => "CL",
            Self::Decor => "DE",
            Self::Drink => "DR",
            Self::Entertainment => "EN",
            Self::Food => "FO",
            Self::Quality => "QU",
            Self::Service => "SE",
            Self::Speed => "SP",
            Self::Value => "VA",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Atmosphere => "Atmosphere",
            Self::Cleanliness => "Cleanliness",
            Self::Decor => "Decor",
            Self::Drink => "Drink",
            Self::Entertainment => "Entertainment",
            Self::Food => "Food",
            Self::Quality => "Quality",
            Self::Service => "Service",
            Self::Speed => "Speed",
            Self::Value => "Value",
        }
    }

    /// Position in [`Attribute::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown attribute: {}", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    /// Accepts the field name or the two-letter code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|attr| {
                attr.name().eq_ignore_ascii_case(needle) || attr.code().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
        let mut sorted = Attribute::ALL;
        sorted.sort();
        assert_eq!(sorted, Attribute::ALL);
    }

    #[test]
    fn test_names_and_codes_are_unique() {
        let names: HashSet<_> = Attribute::ALL.iter().map(|a| a.name()).collect();
        let codes: HashSet<_> = Attribute::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(names.len(), Attribute::COUNT);
        assert_eq!(codes.len(), Attribute::COUNT);
    }

    #[test]
    fn test_parse_name_and_code() {
        assert_eq!("food".parse::<Attribute>().unwrap(), Attribute::Food);
        assert_eq!("Service".parse::<Attribute>().unwrap(), Attribute::Service);
        assert_eq!("VA".parse::<Attribute>().unwrap(), Attribute::Value);
        assert_eq!(
            "ambience".parse::<Attribute>(),
            Err(UnknownAttribute("ambience".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_field_name() {
        assert_eq!(serde_json::to_string(&Attribute::Decor).unwrap(), "\"decor\"");
        let parsed: Attribute = serde_json::from_str("\"entertainment\"").unwrap();
        assert_eq!(parsed, Attribute::Entertainment);
    }
}
