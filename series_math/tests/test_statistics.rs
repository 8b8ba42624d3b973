use approx::assert_abs_diff_eq;
use rstest::rstest;
use series_math::{pearson_correlation, MathError};

#[test]
fn test_identical_series_correlate_perfectly() {
    let values = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let r = pearson_correlation(&values, &values).unwrap();
    assert_eq!(r, 1.0);
}

#[test]
fn test_inverse_series_correlate_negatively() {
    let up = vec![1.0, 2.0, 3.0, 4.0];
    let down = vec![8.0, 6.0, 4.0, 2.0];
    assert_abs_diff_eq!(pearson_correlation(&up, &down).unwrap(), -1.0, epsilon = 1e-12);
}

#[test]
fn test_uncorrelated_series() {
    // Symmetric around the mean of x, so the covariance cancels out.
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![4.0, 1.0, 0.0, 1.0, 4.0];
    assert_eq!(pearson_correlation(&x, &y).unwrap(), 0.0);
}

#[test]
fn test_scaled_series_keep_correlation() {
    let x = vec![10.0, 12.0, 9.0, 15.0, 11.0];
    let y: Vec<f64> = x.iter().map(|v| v * 40.0 + 3.0).collect();
    assert_abs_diff_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
}

#[rstest]
#[case(vec![1.0, 2.0], vec![1.0])]
#[case(vec![], vec![])]
#[case(vec![1.0], vec![2.0])]
#[case(vec![5.0, 5.0, 5.0], vec![1.0, 2.0, 3.0])]
fn test_undefined_correlation(#[case] first: Vec<f64>, #[case] second: Vec<f64>) {
    assert!(pearson_correlation(&first, &second).is_err());
}

#[test]
fn test_length_mismatch_reports_sizes() {
    let err = pearson_correlation(&[1.0, 2.0, 3.0], &[1.0]).unwrap_err();
    assert_eq!(err, MathError::LengthMismatch { left: 3, right: 1 });
}
