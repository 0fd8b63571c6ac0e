//! Review rating type.

use serde::{Deserialize, Serialize};

/// Error returned when a rating falls outside `1..=5`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub i64);

/// A review rating between 1 and 5 stars inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Rating(u8);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: u8 = 1;
    /// Highest allowed rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if `stars` is not within `1..=5`.
    pub fn new(stars: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(RatingError(i64::from(stars)))
        }
    }

    /// Create a rating, clamping `stars` into `1..=5`.
    #[must_use]
    pub fn saturating(stars: u8) -> Self {
        Self(stars.clamp(Self::MIN, Self::MAX))
    }

    /// Number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| RatingError(value))
            .and_then(Self::new)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(Rating::new(6), Err(RatingError(6)));
        assert_eq!(Rating::try_from(-3), Err(RatingError(-3)));
        assert_eq!(Rating::try_from(300), Err(RatingError(300)));
    }

    #[test]
    fn test_saturating() {
        assert_eq!(Rating::saturating(0).stars(), 1);
        assert_eq!(Rating::saturating(4).stars(), 4);
        assert_eq!(Rating::saturating(u8::MAX).stars(), 5);
    }

    #[test]
    fn test_serde() {
        let rating = Rating::new(4).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Rating>("5").unwrap().stars(), 5);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::new(3).unwrap().to_string(), "3/5");
    }
}
