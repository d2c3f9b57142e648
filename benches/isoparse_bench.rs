use criterion::{black_box, criterion_group, criterion_main, Criterion};
use partialdate::prelude::*;

fn date_inputs() -> Vec<&'static str> {
    vec![
        "2021-12-08",
        "20211208",
        "2021-12",
        "2021",
        "2021-342",
        "-1208",
        "--08",
    ]
}

fn parse_dates(inputs: &[&str]) {
    for input in inputs {
        let res = Date::isoparse(input);
        assert!(res.is_ok());
    }
}

fn time_inputs() -> Vec<&'static str> {
    vec![
        "21:12:08",
        "211208",
        "21:12",
        "21",
        "-1208",
        "--08",
        "21:12:08Z",
        "211208+0530",
        "21:12:08-09:30",
    ]
}

fn parse_times(inputs: &[&str]) {
    for input in inputs {
        let res = Time::isoparse(input);
        assert!(res.is_ok());
    }
}

fn datetime_inputs() -> Vec<&'static str> {
    vec![
        "2021-12-08T21:12:08",
        "20211208T211208Z",
        "2021-12-08 21:12:08+01:00",
        "2021-12T2112",
        "-1208T1211",
        "2021T--08",
    ]
}

fn parse_datetimes(inputs: &[&str]) {
    for input in inputs {
        let res = Datetime::isoparse(input);
        assert!(res.is_ok());
    }
}

fn compare_datetimes(pairs: &[(Datetime, Datetime)]) {
    for (lhs, rhs) in pairs {
        let res = lhs.compare(rhs);
        assert!(res.is_ok());
    }
}

fn datetime_pairs() -> Vec<(Datetime, Datetime)> {
    let parse = |text: &str| Datetime::isoparse(text).unwrap();
    vec![
        (parse("2021-12-08T21:12:08Z"), parse("2021-12-08T22:12:08+01:00")),
        (parse("2021-12-08T21:12:08"), parse("2021-12-09T00:00:00")),
        (parse("-1208T1211"), parse("-1209T0000")),
    ]
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_dates", |b| b.iter(|| parse_dates(black_box(&date_inputs()))));
    c.bench_function("parse_times", |b| b.iter(|| parse_times(black_box(&time_inputs()))));
    c.bench_function("parse_datetimes", |b| {
        b.iter(|| parse_datetimes(black_box(&datetime_inputs())))
    });
    let pairs = datetime_pairs();
    c.bench_function("compare_datetimes", |b| b.iter(|| compare_datetimes(black_box(&pairs))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
