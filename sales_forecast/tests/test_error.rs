use chrono::NaiveDate;
use sales_forecast::strategies::UnavailableReason;
use sales_forecast::ForecastError;
use series_math::MathError;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
}

#[test]
fn test_error_messages() {
    let err = ForecastError::DegenerateWindow {
        begin: date(5),
        end: date(1),
    };
    assert_eq!(
        err.to_string(),
        "Degenerate window: begin 2020-01-05 is after end 2020-01-01"
    );

    let err = ForecastError::UndefinedDrift {
        begin: date(1),
        end: date(7),
    };
    assert!(err.to_string().contains("2020-01-01..=2020-01-07"));
}

#[test]
fn test_math_error_conversion() {
    let err: ForecastError = MathError::InsufficientData("no values".to_string()).into();

    assert!(matches!(err, ForecastError::Math(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_recoverable_errors() {
    assert!(ForecastError::EmptyHistory.is_recoverable());
    assert!(ForecastError::UndefinedDrift {
        begin: date(1),
        end: date(2)
    }
    .is_recoverable());
    assert!(!ForecastError::NoCommonDates.is_recoverable());
    assert!(!ForecastError::InvalidParameter("x".to_string()).is_recoverable());
    assert!(!ForecastError::Source("offline".to_string()).is_recoverable());
}

#[test]
fn test_unavailable_reason_matches_recoverable() {
    let errors = vec![
        ForecastError::EmptyHistory,
        ForecastError::UndefinedDrift {
            begin: date(1),
            end: date(2),
        },
        ForecastError::DegenerateWindow {
            begin: date(2),
            end: date(1),
        },
        ForecastError::DateOutOfRange {
            date: date(1),
            shift: "-1 days".to_string(),
        },
        ForecastError::NoCommonDates,
    ];

    for err in &errors {
        assert_eq!(err.unavailable_reason().is_some(), err.is_recoverable());
    }
    assert_eq!(
        ForecastError::EmptyHistory.unavailable_reason(),
        Some(UnavailableReason::EmptyHistory)
    );
    assert_eq!(
        errors[1].unavailable_reason(),
        Some(UnavailableReason::UndefinedDrift)
    );
}
