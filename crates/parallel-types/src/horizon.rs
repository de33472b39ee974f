//! The validated number of years a simulation covers.

use crate::error::TypesError;

/// How many yearly events each timeline holds.
///
/// Only a small fixed set of horizons is offered. The fallback archetype
/// pools hold at least [`Horizon::MAX`] templates each, so every allowed
/// horizon can be served offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Horizon(u32);

impl Horizon {
    /// Supported horizons, in years.
    pub const ALLOWED: [u32; 4] = [3, 5, 7, 10];

    /// The longest supported horizon.
    pub const MAX: u32 = 10;

    /// The horizon offered when the user does not pick one.
    pub const DEFAULT: Self = Self(5);

    /// Validate a requested number of years.
    pub fn new(years: u32) -> Result<Self, TypesError> {
        if Self::ALLOWED.contains(&years) {
            Ok(Self(years))
        } else {
            Err(TypesError::UnsupportedHorizon(years))
        }
    }

    /// Number of years as a plain integer.
    pub const fn years(self) -> u32 {
        self.0
    }

    /// Number of events each timeline must contain.
    pub fn event_count(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Horizon {
    type Error = TypesError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> Self {
        horizon.0
    }
}

impl core::fmt::Display for Horizon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} years", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_allowed_values() {
        for years in Horizon::ALLOWED {
            assert_eq!(Horizon::new(years).map(Horizon::years), Ok(years));
        }
        assert_eq!(Horizon::new(4), Err(TypesError::UnsupportedHorizon(4)));
        assert_eq!(Horizon::new(0), Err(TypesError::UnsupportedHorizon(0)));
        assert_eq!(Horizon::new(11), Err(TypesError::UnsupportedHorizon(11)));
    }

    #[test]
    fn max_is_the_largest_allowed() {
        assert_eq!(Horizon::ALLOWED.iter().max().copied(), Some(Horizon::MAX));
    }

    #[test]
    fn default_is_five_years() {
        assert_eq!(Horizon::default().event_count(), 5);
    }
}
