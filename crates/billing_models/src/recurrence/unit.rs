//! Interval unit enumeration.

use billing_core::types::DateShift;
use std::fmt;
use std::str::FromStr;

use super::error::RecurrenceError;

/// Unit of an interval recurrence ("every N days/weeks/months/years").
///
/// # Examples
///
/// ```
/// use billing_core::types::DateShift;
/// use billing_models::recurrence::IntervalUnit;
///
/// assert_eq!(IntervalUnit::Week.step(2), DateShift::days(14));
/// assert_eq!(IntervalUnit::Month.step(3), DateShift::months(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    /// Exact day steps.
    Day,
    /// Exact seven-day steps.
    Week,
    /// Calendar month steps with end-of-month clamping.
    Month,
    /// Calendar year steps with end-of-month clamping.
    Year,
}

impl IntervalUnit {
    /// Returns the date shift for `count` units.
    ///
    /// Day and week units are flat day counts; month and year units are
    /// calendar-relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_core::types::DateShift;
    /// use billing_models::recurrence::IntervalUnit;
    ///
    /// assert_eq!(IntervalUnit::Day.step(10), DateShift::days(10));
    /// assert_eq!(IntervalUnit::Year.step(1), DateShift::years(1));
    /// assert_eq!(IntervalUnit::Week.step(-1), DateShift::days(-7));
    /// ```
    #[inline]
    pub fn step(&self, count: i32) -> DateShift {
        match self {
            IntervalUnit::Day => DateShift::days(i64::from(count)),
            IntervalUnit::Week => DateShift::days(7 * i64::from(count)),
            IntervalUnit::Month => DateShift::months(count),
            IntervalUnit::Year => DateShift::years(count),
        }
    }

    /// Returns the lowercase unit name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
            IntervalUnit::Month => "month",
            IntervalUnit::Year => "year",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IntervalUnit {
    type Err = RecurrenceError;

    /// Parses an interval unit (case-insensitive).
    ///
    /// Supported formats:
    /// - Day: "day", "days", "d", "daily"
    /// - Week: "week", "weeks", "w", "weekly"
    /// - Month: "month", "months", "m", "monthly"
    /// - Year: "year", "years", "y", "yearly", "annual"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" | "d" | "daily" => Ok(IntervalUnit::Day),
            "week" | "weeks" | "w" | "weekly" => Ok(IntervalUnit::Week),
            "month" | "months" | "m" | "monthly" => Ok(IntervalUnit::Month),
            "year" | "years" | "y" | "yearly" | "annual" => Ok(IntervalUnit::Year),
            _ => Err(RecurrenceError::UnknownKind {
                what: "interval unit",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::IntervalUnit;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for IntervalUnit {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for IntervalUnit {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            IntervalUnit::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        assert_eq!(IntervalUnit::Day.step(3), DateShift::days(3));
        assert_eq!(IntervalUnit::Week.step(2), DateShift::days(14));
        assert_eq!(IntervalUnit::Month.step(6), DateShift::months(6));
        assert_eq!(IntervalUnit::Year.step(2), DateShift::years(2));
    }

    #[test]
    fn test_step_negative_is_negated() {
        for unit in [
            IntervalUnit::Day,
            IntervalUnit::Week,
            IntervalUnit::Month,
            IntervalUnit::Year,
        ] {
            assert_eq!(unit.step(-4), unit.step(4).negated());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", IntervalUnit::Week), "week");
        assert_eq!(format!("{}", IntervalUnit::Year), "year");
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!("day".parse::<IntervalUnit>().unwrap(), IntervalUnit::Day);
        assert_eq!("D".parse::<IntervalUnit>().unwrap(), IntervalUnit::Day);
        assert_eq!("Weeks".parse::<IntervalUnit>().unwrap(), IntervalUnit::Week);
        assert_eq!("monthly".parse::<IntervalUnit>().unwrap(), IntervalUnit::Month);
        assert_eq!(" y ".parse::<IntervalUnit>().unwrap(), IntervalUnit::Year);
        assert_eq!("annual".parse::<IntervalUnit>().unwrap(), IntervalUnit::Year);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!(
            "fortnight".parse::<IntervalUnit>(),
            Err(RecurrenceError::UnknownKind { .. })
        ));
        assert!("".parse::<IntervalUnit>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&IntervalUnit::Month).unwrap();
        assert_eq!(json, "\"month\"");
        let parsed: IntervalUnit = serde_json::from_str("\"Weekly\"").unwrap();
        assert_eq!(parsed, IntervalUnit::Week);
        assert!(serde_json::from_str::<IntervalUnit>("\"hour\"").is_err());
    }
}
