//! Degree-minute-second formatting.
//!
//! The decimal-degree value is always the source of truth; [`Dms`] is a derived
//! display form and is never parsed back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hemisphere suffix of a DMS value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn suffix(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

/// Sexagesimal decomposition of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Decompose `decimal_degrees`. Zero takes the positive hemisphere.
    ///
    /// Seconds that would print as `60.0000` are carried into the minutes (and
    /// minutes into degrees), so the text never shows an out-of-range field.
    pub fn from_decimal(decimal_degrees: f64, is_latitude: bool) -> Self {
        let hemisphere = match (is_latitude, decimal_degrees < 0.0) {
            (true, false) => Hemisphere::North,
            (true, true) => Hemisphere::South,
            (false, false) => Hemisphere::East,
            (false, true) => Hemisphere::West,
        };

        let abs = decimal_degrees.abs();
        let mut degrees = abs.floor();
        let total_minutes = (abs - degrees) * 60.0;
        let mut minutes = total_minutes.floor();
        let mut seconds = (total_minutes - minutes) * 60.0;

        if (seconds * 10_000.0).round() >= 600_000.0 {
            seconds = 0.0;
            minutes += 1.0;
        }
        if minutes >= 60.0 {
            minutes = 0.0;
            degrees += 1.0;
        }

        Self {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
            hemisphere,
        }
    }

    /// Signed decimal degrees this value was derived from (to display precision).
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        match self.hemisphere {
            Hemisphere::South | Hemisphere::West => -magnitude,
            Hemisphere::North | Hemisphere::East => magnitude,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}°{:02}′{:07.4}″{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.hemisphere.suffix()
        )
    }
}

/// Format decimal degrees as text, e.g. `113°30′06.2313″E`.
pub fn to_dms(decimal_degrees: f64, is_latitude: bool) -> String {
    Dms::from_decimal(decimal_degrees, is_latitude).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_positive_hemisphere() {
        assert!(to_dms(0.0, true).ends_with('N'));
        assert!(to_dms(0.0, false).ends_with('E'));
        assert_eq!(to_dms(0.0, true), "00°00′00.0000″N");
    }

    #[test]
    fn test_southern_latitude() {
        assert_eq!(to_dms(-22.5017, true), "22°30′06.1200″S");
    }

    #[test]
    fn test_western_longitude() {
        let dms = Dms::from_decimal(-113.5, false);
        assert_eq!(dms.hemisphere, Hemisphere::West);
        assert_eq!(dms.degrees, 113);
        assert_eq!(dms.minutes, 30);
        assert!(dms.seconds.abs() < 1e-9);
    }

    #[test]
    fn test_three_digit_degrees() {
        assert_eq!(to_dms(113.501_731, false), "113°30′06.2316″E");
    }

    #[test]
    fn test_seconds_carry() {
        // 59.99999... seconds rounds to 60 at four decimals
        let text = to_dms(10.999_999_999, true);
        assert_eq!(text, "11°00′00.0000″N");
    }

    #[test]
    fn test_to_decimal() {
        let dms = Dms::from_decimal(-22.5017, true);
        assert!((dms.to_decimal() + 22.5017).abs() < 1e-9);
    }
}
