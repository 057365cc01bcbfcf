//! Password strength scoring.
//!
//! A password earns one point for each satisfied [`StrengthCriterion`];
//! the sum is its [`StrengthLevel`]. Each level maps to a fixed
//! [`MeterStyle`] used to draw the strength meter.

use serde::Serialize;

/// Highest attainable strength level.
pub const MAX_STRENGTH: u8 = 5;

/// One independent property contributing a point to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthCriterion {
    /// At least 8 characters.
    MinLength,
    /// Contains an ASCII lowercase letter.
    Lowercase,
    /// Contains an ASCII uppercase letter.
    Uppercase,
    /// Contains an ASCII digit.
    Digit,
    /// Contains anything that is not an ASCII letter or digit.
    Symbol,
}

impl StrengthCriterion {
    /// All criteria, in scoring order.
    pub const ALL: [Self; 5] = [
        Self::MinLength,
        Self::Lowercase,
        Self::Uppercase,
        Self::Digit,
        Self::Symbol,
    ];

    /// Returns whether `password` satisfies this criterion.
    #[must_use]
    pub fn is_met(self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= 8,
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Symbol => password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }
}

/// Discrete password strength in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct StrengthLevel(u8);

impl StrengthLevel {
    /// Creates a level, clamping to [`MAX_STRENGTH`].
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.min(MAX_STRENGTH))
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the meter style for this level.
    #[must_use]
    pub fn style(self) -> &'static MeterStyle {
        &METER_STYLES[usize::from(self.0)]
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{MAX_STRENGTH}", self.0)
    }
}

/// Visual state of the strength meter for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeterStyle {
    /// Width of the fill bar, in percent.
    pub fill_percentage: u8,
    /// CSS color of the fill bar and label.
    pub color: &'static str,
    /// Label text; empty for level 0.
    pub label: &'static str,
}

/// Meter styles indexed by level.
pub const METER_STYLES: [MeterStyle; 6] = [
    MeterStyle {
        fill_percentage: 0,
        color: "#e74c3c",
        label: "",
    },
    MeterStyle {
        fill_percentage: 20,
        color: "#e67e22",
        label: "Very Weak",
    },
    MeterStyle {
        fill_percentage: 40,
        color: "#f39c12",
        label: "Weak",
    },
    MeterStyle {
        fill_percentage: 60,
        color: "#f1c40f",
        label: "Fair",
    },
    MeterStyle {
        fill_percentage: 80,
        color: "#2ecc71",
        label: "Good",
    },
    MeterStyle {
        fill_percentage: 100,
        color: "#27ae60",
        label: "Strong",
    },
];

/// Returns the criteria `password` satisfies.
#[must_use]
pub fn criteria_met(password: &str) -> Vec<StrengthCriterion> {
    StrengthCriterion::ALL
        .into_iter()
        .filter(|c| c.is_met(password))
        .collect()
}

/// Scores a password.
#[must_use]
pub fn score(password: &str) -> StrengthLevel {
    let points = StrengthCriterion::ALL
        .into_iter()
        .filter(|c| c.is_met(password))
        .count();
    StrengthLevel::new(u8::try_from(points).unwrap_or(MAX_STRENGTH))
}
