use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Percentage at or above which a quiz earns three stars.
pub const THREE_STAR_PERCENT: u8 = 90;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StarThresholdsError {
    #[error("two-star threshold {two_stars}% must not exceed the three-star threshold of 90%")]
    TwoStarsAboveThree { two_stars: u8 },

    #[error("one-star threshold {one_star}% must not exceed two-star threshold {two_stars}%")]
    OneStarAboveTwo { one_star: u8, two_stars: u8 },

    #[error("expected thresholds as `<two>,<one>` percentages, got {raw:?}")]
    Parse { raw: String },
}

//
// ─── THRESHOLDS ────────────────────────────────────────────────────────────────
//

/// Percentage bands used to turn a score into stars.
///
/// The three-star band is fixed at [`THREE_STAR_PERCENT`]; the two lower
/// bands are tuning knobs that differ between apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarThresholds {
    two_stars: u8,
    one_star: u8,
}

impl StarThresholds {
    /// 70% for two stars, 50% for one.
    pub const STRICT: Self = Self {
        two_stars: 70,
        one_star: 50,
    };

    /// 60% for two stars, 30% for one.
    pub const LENIENT: Self = Self {
        two_stars: 60,
        one_star: 30,
    };

    /// # Errors
    ///
    /// Returns `StarThresholdsError` unless `one_star <= two_stars <= 90`.
    pub fn new(two_stars: u8, one_star: u8) -> Result<Self, StarThresholdsError> {
        if two_stars > THREE_STAR_PERCENT {
            return Err(StarThresholdsError::TwoStarsAboveThree { two_stars });
        }
        if one_star > two_stars {
            return Err(StarThresholdsError::OneStarAboveTwo {
                one_star,
                two_stars,
            });
        }
        Ok(Self {
            two_stars,
            one_star,
        })
    }

    #[must_use]
    pub fn two_stars(&self) -> u8 {
        self.two_stars
    }

    #[must_use]
    pub fn one_star(&self) -> u8 {
        self.one_star
    }

    /// Rates `correct` out of `total`; bands are checked highest first.
    ///
    /// Comparison is done in integers (`100 * correct >= band * total`) so a
    /// score sitting exactly on a band edge always reaches it.
    #[must_use]
    pub fn rate(&self, correct: usize, total: usize) -> StarRating {
        if total == 0 {
            return StarRating::Zero;
        }
        let scaled = 100_u128 * correct.min(total) as u128;
        let reaches = |band: u8| scaled >= u128::from(band) * total as u128;

        if reaches(THREE_STAR_PERCENT) {
            StarRating::Three
        } else if reaches(self.two_stars) {
            StarRating::Two
        } else if reaches(self.one_star) {
            StarRating::One
        } else {
            StarRating::Zero
        }
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self::LENIENT
    }
}

impl FromStr for StarThresholds {
    type Err = StarThresholdsError;

    /// Parses `"<two>,<one>"`, e.g. `"70,50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || StarThresholdsError::Parse { raw: s.to_string() };
        let (two, one) = s.split_once(',').ok_or_else(parse_err)?;
        let two = two.trim().parse::<u8>().map_err(|_| parse_err())?;
        let one = one.trim().parse::<u8>().map_err(|_| parse_err())?;
        Self::new(two, one)
    }
}

//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// 0–3 star tier earned by a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StarRating {
    Zero,
    One,
    Two,
    Three,
}

impl StarRating {
    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            StarRating::Zero => 0,
            StarRating::One => 1,
            StarRating::Two => 2,
            StarRating::Three => 3,
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stars = self.stars();
        let filled = usize::from(stars);
        write!(f, "{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
    }
}

/// Percentage of `correct` out of `total`, for display only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
