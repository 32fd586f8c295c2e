//! Great-circle distance and air-quality grading.

use haversine::{distance, Location, Units};
use std::fmt;

/// Great-circle distance between two coordinates in kilometers.
///
/// Commutative and side-effect free; `distance_km(a, a)` is 0.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        Location {
            latitude: lat1,
            longitude: lon1,
        },
        Location {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

/// Four-tier ordinal classification of the integrated air-quality index.
///
/// Ordering follows severity: `Good < Moderate < Warning < Caution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Good,
    Moderate,
    Warning,
    Caution,
}

impl Grade {
    /// Maps an integrated index value to a grade. Total step function with
    /// boundaries at exactly 50, 100 and 250.
    ///
    /// Callers must only feed this *valid* index values: a missing or
    /// malformed reading is represented as `None` upstream and never graded,
    /// so "no data" cannot masquerade as clean air.
    pub fn from_khai(value: i64) -> Self {
        if value <= 50 {
            Grade::Good
        } else if value <= 100 {
            Grade::Moderate
        } else if value <= 250 {
            Grade::Warning
        } else {
            Grade::Caution
        }
    }

    /// Ordinal rank, 1 (best) through 4 (worst).
    pub fn rank(self) -> u8 {
        match self {
            Grade::Good => 1,
            Grade::Moderate => 2,
            Grade::Warning => 3,
            Grade::Caution => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Good => "good",
            Grade::Moderate => "moderate",
            Grade::Warning => "warning",
            Grade::Caution => "caution",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_commutative() {
        let d1 = distance_km(37.5665, 126.9780, 35.1796, 129.0756);
        let d2 = distance_km(35.1796, 129.0756, 37.5665, 126.9780);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(37.5665, 126.9780, 37.5665, 126.9780), 0.0);
    }

    #[test]
    fn distance_known_values() {
        // Half a degree of longitude at the equator is roughly 55.6 km.
        let d = distance_km(0.0, 0.0, 0.0, 0.5);
        assert!((55.0..56.5).contains(&d), "got {d}");

        // One degree of both at the equator is roughly 157 km.
        let d = distance_km(0.0, 0.0, 1.0, 1.0);
        assert!((156.0..158.5).contains(&d), "got {d}");
    }

    #[test]
    fn grade_steps_at_thresholds() {
        assert_eq!(Grade::from_khai(45), Grade::Good);
        assert_eq!(Grade::from_khai(50), Grade::Good);
        assert_eq!(Grade::from_khai(51), Grade::Moderate);
        assert_eq!(Grade::from_khai(100), Grade::Moderate);
        assert_eq!(Grade::from_khai(101), Grade::Warning);
        assert_eq!(Grade::from_khai(250), Grade::Warning);
        assert_eq!(Grade::from_khai(251), Grade::Caution);
        assert_eq!(Grade::from_khai(300), Grade::Caution);
    }

    #[test]
    fn grade_is_monotonic() {
        let mut prev = Grade::from_khai(-10);
        for value in -10..400 {
            let g = Grade::from_khai(value);
            assert!(g >= prev);
            prev = g;
        }
    }

    // The upstream sentinel -1 classifies as Good; production code never
    // grades a sentinel (absent readings are Option::None), but the mapping
    // itself stays total.
    #[test]
    fn grade_of_negative_sentinel_is_good() {
        assert_eq!(Grade::from_khai(-1), Grade::Good);
    }

    #[test]
    fn grade_display() {
        assert_eq!(Grade::Warning.to_string(), "3 (warning)");
    }
}
