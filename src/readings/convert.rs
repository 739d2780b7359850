// src/readings/convert.rs
//
// Cell converters for the export tables.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::config::consts::TIMESTAMP_FORMAT;

use super::ParseError;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("static regex"));

/// `"152.4 lbs"` → 152.4. Exactly one number and one unit token are required.
pub fn no_units(s: &str) -> Result<f64, ParseError> {
    let mut parts = s.split_whitespace();
    let (Some(value), Some(_units), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::BadValue(s!(s)));
    };
    value.parse::<f64>().map_err(|_| ParseError::BadValue(s!(s)))
}

/// `"Jan 02, 2017 7:05:00 AM"` → naive local timestamp.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::BadTimestamp(s!(s)))
}

/// `"BeforeMeal"` → `"Before Meal"`: a space between a lowercase letter or
/// digit and a following uppercase letter.
pub fn add_space(value: &str) -> String {
    CAMEL_BOUNDARY.replace_all(value, "$1 $2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_units_keeps_number_ignores_unit() {
        assert_eq!(no_units("152.4 lbs").unwrap(), 152.4);
        assert_eq!(no_units("98 mg/dL").unwrap(), 98.0);
        assert_eq!(no_units(" 7  kg ").unwrap(), 7.0);
        assert_eq!(no_units("-1.5e1 x").unwrap(), -15.0);
    }

    #[test]
    fn no_units_rejects_other_shapes() {
        for bad in ["152.4", "152.4 lbs extra", "", "abc lbs", "lbs 152"] {
            assert!(matches!(no_units(bad), Err(ParseError::BadValue(_))), "{bad:?}");
        }
    }

    #[test]
    fn timestamp_format_am_pm() {
        let t = parse_timestamp("Jan 02, 2017 7:05:09 PM").unwrap();
        let want = NaiveDate::from_ymd_opt(2017, 1, 2).unwrap().and_hms_opt(19, 5, 9).unwrap();
        assert_eq!(t, want);

        let t = parse_timestamp("Dec 31, 2016 12:00:00 AM").unwrap();
        let want = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(t, want);
    }

    #[test]
    fn timestamp_rejects_other_formats() {
        for bad in ["2017-01-02 07:05:09", "Jan 02, 2017", "Foo 02, 2017 7:05:09 AM"] {
            assert!(matches!(parse_timestamp(bad), Err(ParseError::BadTimestamp(_))), "{bad:?}");
        }
    }

    #[test]
    fn add_space_splits_camel_case() {
        assert_eq!(add_space("BeforeMeal"), "Before Meal");
        assert_eq!(add_space("AfterMeal"), "After Meal");
        assert_eq!(add_space("Before2Hours"), "Before2 Hours");
        assert_eq!(add_space("bedTimeSnack"), "bed Time Snack");
    }

    #[test]
    fn add_space_no_boundary_is_noop() {
        for s in ["Meal", "", "ABC", "after meal", "Fasting"] {
            assert_eq!(add_space(s), s);
        }
    }

    #[test]
    fn add_space_is_idempotent() {
        for s in ["BeforeMeal", "Before Meal", "bedTimeSnack", "X1Y2Z"] {
            let once = add_space(s);
            assert_eq!(add_space(&once), once);
        }
    }
}
