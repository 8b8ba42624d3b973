use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::batch::{ForecastRecord, RecordOrigin};
use sales_forecast::metrics::{evaluate, evaluate_records, AccuracyEvaluator};
use sales_forecast::{ForecastError, StrategyKind, TimeSeries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(barcode: u64, value: f64, origin: RecordOrigin) -> ForecastRecord {
    ForecastRecord {
        store_id: 1,
        barcode,
        period_date: date(2020, 2, 15),
        period_days: 5,
        value,
        origin,
    }
}

#[test]
fn test_evaluate_series() {
    let real = TimeSeries::from_points(vec![(date(2020, 1, 1), 100.0), (date(2020, 1, 2), 0.0)]);
    let forecast = TimeSeries::from_points(vec![(date(2020, 1, 1), 90.0), (date(2020, 1, 2), 5.0)]);

    let report = evaluate(&real, &forecast).unwrap();

    assert_eq!(report.median_percentage_error, 7.5);
    assert_eq!(report.residual_std_dev, 10.61);
    assert_eq!(report.observations, 2);
}

#[test]
fn test_evaluate_uses_common_dates_only() {
    let real = TimeSeries::from_points(vec![
        (date(2020, 1, 1), 50.0),
        (date(2020, 1, 2), 40.0),
        (date(2020, 1, 3), 1000.0),
    ]);
    let forecast = TimeSeries::from_points(vec![
        (date(2020, 1, 2), 30.0),
        (date(2020, 1, 4), 0.0),
    ]);

    let report = evaluate(&real, &forecast).unwrap();

    assert_eq!(report.observations, 1);
    assert_eq!(report.median_percentage_error, 25.0);

    let errors = AccuracyEvaluator::default().percent_errors(&real, &forecast);
    assert_eq!(errors.dates(), vec![date(2020, 1, 2)]);
}

#[test]
fn test_disjoint_series() {
    let real = TimeSeries::from_points(vec![(date(2020, 1, 1), 1.0)]);
    let forecast = TimeSeries::from_points(vec![(date(2020, 1, 2), 1.0)]);

    assert_eq!(evaluate(&real, &forecast).unwrap_err(), ForecastError::NoCommonDates);
}

#[test]
fn test_custom_rounding() {
    let pairs = [(3.0, 2.0), (3.0, 1.0)];

    let coarse = AccuracyEvaluator::new(0).evaluate_pairs(&pairs).unwrap();
    let fine = AccuracyEvaluator::new(4).evaluate_pairs(&pairs).unwrap();

    assert_eq!(coarse.median_percentage_error, 50.0);
    assert_eq!(fine.median_percentage_error, 50.0);
    assert_eq!(coarse.residual_std_dev, 1.0);
    assert_eq!(fine.residual_std_dev, 0.7071);
}

#[test]
fn test_evaluate_records_by_key() {
    let real = vec![
        record(100, 60.0, RecordOrigin::Realized),
        record(200, 0.0, RecordOrigin::Realized),
        record(300, 8.0, RecordOrigin::Realized),
    ];
    let forecast = vec![
        record(200, 10.0, RecordOrigin::Strategy(StrategyKind::Mean)),
        record(100, 60.0, RecordOrigin::Strategy(StrategyKind::Barcode)),
    ];

    let report = evaluate_records(&real, &forecast).unwrap();

    assert_eq!(report.observations, 2);
    assert_eq!(report.median_percentage_error, 5.0);
    assert_eq!(report.residual_std_dev, 7.07);
}

#[test]
fn test_report_display() {
    let report = AccuracyEvaluator::default()
        .evaluate_pairs(&[(100.0, 90.0), (0.0, 5.0)])
        .unwrap();
    let text = report.to_string();

    assert!(text.contains("2 observations"));
    assert!(text.contains("7.50%"));
    assert!(text.contains("10.61"));
}
