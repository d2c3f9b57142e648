use chrono::NaiveDate;
use itertools::{iproduct, Itertools};
use partialdate::prelude::*;
use rstest::{fixture, rstest};

const YEARS: [i32; 7] = [0, 2, 1900, 1992, 2000, 2021, 9998];

/// Every valid complete date in a sample of years, as (year, month, day).
#[fixture]
fn complete_dates() -> impl Iterator<Item = (i32, i32, i32)> {
    iproduct!(YEARS, 1..=12, 1..=31).filter(|&(y, m, d)| Date::new(y, m, d).is_ok())
}

/// Every valid partial date in a sample of years.
#[fixture]
fn partial_dates() -> impl Iterator<Item = Date> {
    let years = YEARS.into_iter().map(|y| Date::new(y, None, None));
    let year_months = iproduct!(YEARS, 1..=12).map(|(y, m)| Date::new(y, m, None));
    let month_days = iproduct!(1..=12, 1..=31).map(|(m, d)| Date::new(None, m, d));
    let days = (1..=31).map(|d| Date::new(None, None, d));
    years
        .chain(year_months)
        .chain(month_days)
        .chain(days)
        .filter_map(Result::ok)
}

#[rstest]
fn test_complete_round_trip(complete_dates: impl Iterator<Item = (i32, i32, i32)>) {
    let mut count = 0;
    for (y, m, d) in complete_dates {
        let date = Date::new(y, m, d).unwrap();
        assert!(!date.is_partial());
        for extended in [true, false] {
            let text = date.isoformat(extended);
            assert_eq!(Date::isoparse(&text), Ok(date), "{text}");
        }
        count += 1;
    }
    // 7 years, of which 0, 1900, 1992 and 2000 have a 29th of February
    assert_eq!(count, 7 * 365 + 4);
}

#[rstest]
fn test_partial_round_trip(partial_dates: impl Iterator<Item = Date>) {
    for date in partial_dates {
        assert!(date.is_partial());
        for extended in [true, false] {
            let text = date.isoformat(extended);
            assert_eq!(Date::isoparse(&text), Ok(date), "{text}");
            assert_eq!(text.parse::<Date>(), Ok(date));
        }
    }
}

#[test]
fn test_ordinal_matches_calendar() {
    for year in YEARS {
        let days = if year % 4 == 0 { 366 } else { 365 };
        let dates = (1..=days)
            .map(|ordinal| Date::isoparse(&format!("{year:04}-{ordinal:03}")).unwrap())
            .collect_vec();
        assert_eq!(dates.first(), Date::new(year, 1, 1).ok().as_ref());
        assert_eq!(dates.last(), Date::new(year, 12, 31).ok().as_ref());
        assert!(dates.iter().tuple_windows().all(|(a, b)| a < b));
    }
}

#[rstest]
#[case(Date::new(2021, 12, 6), "2021-12-06")]
#[case(Date::new(None, None, 8), "--08")]
#[case(Date::new(None, 12, 8), "-1208")]
fn test_documented_formats(#[case] date: Result<Date, Error>, #[case] expected: &str) {
    assert_eq!(date.unwrap().isoformat(true), expected);
}

#[test]
fn test_non_leap_february() {
    let err = Date::new(2021, 2, 29).unwrap_err();
    let err = err.as_range().unwrap();
    assert_eq!((err.field, err.value, err.min, err.max), ("day", 29, 1, 28));
}

#[test]
fn test_leap_ordinal() {
    let date = Date::isoparse("2000-060").unwrap();
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (Some(2000), Some(2), Some(29))
    );
}

#[rstest]
#[case("-----")]
#[case("---")]
fn test_all_placeholders_rejected(#[case] text: &str) {
    let err = Date::isoparse(text).unwrap_err();
    let err = err.as_parse().unwrap();
    assert_eq!(err.what, "ISO 8601 date");
    assert_eq!(err.value, text);
}

#[test]
fn test_contiguity_messages() {
    assert_eq!(
        Date::new(None, 6, None).unwrap_err().to_string(),
        "must specify year or day along with month"
    );
    assert_eq!(
        Date::new(None, None, None).unwrap_err().to_string(),
        "must specify year or day"
    );
    assert_eq!(
        Date::new(2021, None, 6).unwrap_err().to_string(),
        "cannot specify year and day without month"
    );
}

#[test]
fn test_incompatible_ordering() {
    let year = Date::new(2021, None, None).unwrap();
    let month_day = Date::new(None, 12, 8).unwrap();
    let err = year.compare(&month_day).unwrap_err();
    assert!(!err.is_type_error());
    assert_eq!(
        err.to_string(),
        "ordering not supported between incompatible partial dates"
    );
    let err = month_day.compare(&year).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ordering not supported between incompatible partial dates"
    );
}

#[test]
fn test_ordering_matches_chrono() {
    let dates = iproduct!([1992, 2021], [1, 2, 12], [1, 28])
        .map(|(y, m, d)| {
            (
                Date::new(y, m, d).unwrap(),
                NaiveDate::from_ymd_opt(y, m as u32, d as u32).unwrap(),
            )
        })
        .collect_vec();
    for ((lhs, lhs_chrono), (rhs, rhs_chrono)) in dates.iter().cartesian_product(&dates) {
        assert_eq!(lhs.partial_cmp(rhs), Some(lhs_chrono.cmp(rhs_chrono)));
        assert_eq!(lhs.partial_cmp(rhs_chrono), Some(lhs_chrono.cmp(rhs_chrono)));
        assert_eq!(lhs == rhs_chrono, lhs_chrono == rhs_chrono);
    }
}

#[test]
fn test_same_precision_partials_order() {
    let mut days = (1..=31)
        .rev()
        .map(|d| Date::new(None, None, d).unwrap())
        .collect_vec();
    days.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(days.first().and_then(Date::day), Some(1));
    assert_eq!(days.last().and_then(Date::day), Some(31));
}
