//! Descriptive statistics over return samples.
//!
//! Standard deviations use the sample (n − 1) denominator throughout, so
//! figures line up with the usual spreadsheet and dataframe conventions.

use crate::error::{RiskError, RiskResult};

/// Arithmetic mean.
///
/// # Errors
///
/// [`RiskError::InsufficientData`] for an empty sample.
pub fn mean(values: &[f64]) -> RiskResult<f64> {
    if values.is_empty() {
        return Err(RiskError::insufficient_data("mean of an empty sample"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator).
///
/// # Errors
///
/// [`RiskError::InsufficientData`] for fewer than 2 observations.
pub fn sample_std(values: &[f64]) -> RiskResult<f64> {
    if values.len() < 2 {
        return Err(RiskError::insufficient_data(format!(
            "standard deviation needs at least 2 observations, got {}",
            values.len()
        )));
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

/// Scales a per-period volatility to an annual figure.
#[must_use]
pub fn annualize(period_std: f64, periods_per_year: u32) -> f64 {
    period_std * f64::from(periods_per_year).sqrt()
}

/// Pearson correlation of two equally long samples.
///
/// # Errors
///
/// - [`RiskError::InvalidInput`] if the lengths differ.
/// - [`RiskError::InsufficientData`] for fewer than 2 observations or a
///   zero-variance sample (the coefficient is undefined).
pub fn pearson(x: &[f64], y: &[f64]) -> RiskResult<f64> {
    if x.len() != y.len() {
        return Err(RiskError::invalid_input(format!(
            "correlation samples differ in length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(RiskError::insufficient_data(format!(
            "correlation needs at least 2 observations, got {}",
            x.len()
        )));
    }

    let mx = mean(x)?;
    let my = mean(y)?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(RiskError::insufficient_data(
            "correlation undefined for a zero-variance sample",
        ));
    }

    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_sample_std() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_std(&v).unwrap(), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert!(sample_std(&[1.0]).is_err());
    }

    #[test]
    fn test_annualize() {
        assert_relative_eq!(annualize(0.01, 252), 0.01 * 252.0_f64.sqrt());
    }

    #[test]
    fn test_pearson() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &z).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_degenerate() {
        assert!(matches!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(RiskError::InsufficientData { .. })
        ));
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(RiskError::InvalidInput { .. })
        ));
    }
}
