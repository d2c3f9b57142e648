use chrono::{Duration, NaiveDate, TimeZone, Utc};
use itertools::{iproduct, Itertools};
use partialdate::prelude::*;
use rstest::{fixture, rstest};
use std::cmp::Ordering;

fn offset(seconds: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(seconds)
}

#[fixture]
fn dates() -> Vec<Date> {
    [
        Date::new(2021, 12, 8),
        Date::new(0, 1, 1),
        Date::new(1992, 2, 29),
        Date::new(9998, 12, 31),
        Date::new(2021, 12, None),
        Date::new(2021, None, None),
        Date::new(None, 12, 8),
        Date::new(None, None, 8),
    ]
    .into_iter()
    .map(Result::unwrap)
    .collect_vec()
}

#[fixture]
fn times() -> Vec<Time> {
    let clocks = [
        Time::new(21, 12, 8, None),
        Time::new(0, 0, 0, None),
        Time::new(21, 12, None, None),
        Time::new(21, None, None, None),
        Time::new(None, 12, 8, None),
        Time::new(None, None, 8, None),
    ]
    .into_iter()
    .map(Result::unwrap);
    iproduct!(clocks, [None, offset(0), offset(3600), offset(-34200)])
        .map(|(time, offset)| time.with_offset(offset).unwrap())
        .collect_vec()
}

#[rstest]
fn test_round_trip(dates: Vec<Date>, times: Vec<Time>) {
    for (date, time, sep, extended) in iproduct!(dates, times, ["T", "t", " "], [true, false]) {
        let dt = Datetime::from_parts(date, time);
        assert_eq!(dt.is_partial(), date.is_partial() || time.is_partial());
        let text = dt.isoformat(sep, extended);
        let parsed = Datetime::isoparse(&text).unwrap();
        assert_eq!(parsed.date(), date, "{text}");
        assert_eq!(
            (parsed.hour(), parsed.minute(), parsed.second(), parsed.offset()),
            (time.hour(), time.minute(), time.second(), time.offset()),
            "{text}"
        );
        assert_eq!(parsed, dt, "{text}");
    }
}

#[rstest]
#[case("2021-12-08T21:12:08", "20211208T211208")]
#[case("2021-12-08T21:12", "20211208T2112")]
#[case("2021-12-08T21:12:08Z", "20211208T211208Z")]
#[case("2021-12-08T21:12:08-09:30", "20211208T211208-0930")]
#[case("2021-342T21:12:08", "2021342T211208")]
fn test_extended_and_basic_agree(#[case] extended: &str, #[case] basic: &str) {
    let lhs = Datetime::isoparse(extended).unwrap();
    let rhs = Datetime::isoparse(basic).unwrap();
    assert_eq!(lhs, rhs);
    assert_eq!(lhs.compare(&rhs), Ok(Ordering::Equal));
    assert_eq!(lhs.isoformat("T", false), rhs.isoformat("T", false));
}

#[rstest]
#[case("2021-12-08T21:12:08+2112")]
#[case("2021-12-08T211208")]
#[case("20211208T21:12:08")]
#[case("2021-12-08X21:12:08")]
#[case("2021-12-08")]
#[case("21:12:08")]
fn test_mixed_formats_rejected(#[case] text: &str) {
    let err = Datetime::isoparse(text).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("text cannot be parsed as an ISO 8601 datetime: {text:?}")
    );
}

#[test]
fn test_ordering_matches_chrono() {
    let start = NaiveDate::from_ymd_opt(2020, 2, 28)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap();
    let naive = (0..48)
        .map(|i| start + Duration::minutes(i * 45))
        .collect_vec();
    for (lhs, rhs) in naive.iter().tuple_combinations() {
        let dt = Datetime::try_from(*lhs).unwrap();
        assert_eq!(dt.partial_cmp(rhs), Some(lhs.cmp(rhs)));
        assert_eq!(
            dt.partial_cmp(&Datetime::try_from(*rhs).unwrap()),
            Some(lhs.cmp(rhs))
        );
        assert_eq!(*rhs > dt, rhs > lhs);
    }
}

#[test]
fn test_instants_across_midnight() {
    let utc = Datetime::isoparse("2021-12-31T23:30:00Z").unwrap();
    let paris = Datetime::isoparse("2022-01-01T00:30:00+01:00").unwrap();
    let honolulu = Datetime::isoparse("2021-12-31T13:30:00-10:00").unwrap();
    assert_eq!(utc, paris);
    assert_eq!(paris, honolulu);
    assert_eq!(utc.compare(&honolulu), Ok(Ordering::Equal));

    let instant = Utc.with_ymd_and_hms(2021, 12, 31, 23, 30, 0).unwrap();
    assert!(paris == instant);
    assert!(instant == honolulu);
    assert!(instant < Datetime::isoparse("2022-01-01T00:30:01+01:00").unwrap());
}

#[test]
fn test_leap_day_instants() {
    let lhs = Datetime::isoparse("1900-02-29T23:00:00-02:00").unwrap();
    let rhs = Datetime::isoparse("1900-03-01T01:00:00Z").unwrap();
    assert_eq!(lhs, rhs);
}

#[test]
fn test_date_breaks_ties_first() {
    let earlier = Datetime::new(None, 12, 8, 23, None, None, None).unwrap();
    let later = Datetime::new(None, 12, 9, 0, None, None, None).unwrap();
    assert!(earlier < later);

    let year = Datetime::new(2021, None, None, 12, None, None, None).unwrap();
    let month_day = Datetime::new(None, 12, 9, 12, None, None, None).unwrap();
    assert_eq!(year.partial_cmp(&month_day), None);
    assert_ne!(year, month_day);
}

#[test]
fn test_naive_and_aware() {
    let naive = Datetime::isoparse("2021-12-08T12:00:00").unwrap();
    let aware = Datetime::isoparse("2021-12-08T12:00:00Z").unwrap();
    assert_eq!(naive.equals(&aware), Ok(false));
    assert_eq!(
        naive.compare(&aware).unwrap_err().to_string(),
        "can't order offset-naive and offset-aware datetime values"
    );

    let partial = Datetime::isoparse("20211208T12Z").unwrap();
    let other = Datetime::isoparse("20211208T13+01").unwrap();
    assert_eq!(
        partial.equals(&other).unwrap_err().to_string(),
        "can't compare partial datetime values with different time zones"
    );
}

#[test]
fn test_other_kinds() {
    let dt = Datetime::isoparse("2021-12-08T12:00:00").unwrap();
    let date = Date::new(2021, 12, 8).unwrap();
    let time = Time::new(12, 0, 0, None).unwrap();
    assert_eq!(dt.equals(&date), Ok(false));
    assert_eq!(dt.equals(&time), Ok(false));
    assert_eq!(
        dt.compare(&date).unwrap_err().to_string(),
        "ordering not supported between instances of 'Datetime' and 'Date'"
    );
    assert_eq!(date.equals(&dt), Ok(false));
    assert_eq!(time.equals(&dt), Ok(false));
}

#[test]
fn test_equality_across_kinds_is_symmetric() {
    let dt = Datetime::isoparse("2021-12-08T00:00:00").unwrap();
    let date = Date::new(2021, 12, 8).unwrap();
    let time = Time::new(0, 0, 0, None).unwrap();
    assert_eq!(date.equals(&dt), dt.equals(&date));
    assert_eq!(date.equals(&dt), Ok(false));
    assert_eq!(time.equals(&dt), dt.equals(&time));
    assert_eq!(time.equals(&dt), Ok(false));
}

#[test]
fn test_chrono_conversions() {
    let aware = Datetime::isoparse("2021-12-08T12:00:00+05:30").unwrap();
    let fixed = chrono::DateTime::<FixedOffset>::try_from(aware).unwrap();
    assert_eq!(fixed.to_rfc3339(), "2021-12-08T12:00:00+05:30");
    assert_eq!(Datetime::try_from(fixed).unwrap(), aware);
    assert!(chrono::NaiveDateTime::try_from(aware).is_ok());

    let naive = Datetime::isoparse("2021-12-08T12:00:00").unwrap();
    assert!(chrono::DateTime::<FixedOffset>::try_from(naive).is_err());
    let partial = Datetime::isoparse("2021-12-08T12:00").unwrap();
    assert!(chrono::NaiveDateTime::try_from(partial).is_err());
}

#[test]
fn test_offset_with_seconds_rejected() {
    let lmt = FixedOffset::east_opt(561).unwrap();
    let local = lmt.with_ymd_and_hms(1900, 1, 1, 12, 0, 0).unwrap();
    let err = Datetime::try_from(local).unwrap_err();
    assert_eq!(err.as_range().map(|e| (e.field, e.value)), Some(("offset second", 21)));
    assert!(Datetime::new(2021, 12, 8, 12, 0, 0, FixedOffset::east_opt(3605)).is_err());
}

#[test]
fn test_constants() {
    assert_eq!(Datetime::MIN.isoformat("T", true), "0001-01-01T00:00:00");
    assert_eq!(Datetime::MAX.isoformat("T", true), "9999-12-31T23:59:59");
    assert!(Datetime::MIN < Datetime::MAX);
}
