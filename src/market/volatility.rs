// src/market/volatility.rs

//! Turns an already-fetched closing price series into the scalars the
//! engines need. Fetching the series is someone else's job.

use crate::errors::{PricingError, PricingResult};
use crate::pricing::config::TRADING_DAYS_PER_YEAR;

/// Last available price in the series.
pub fn last_price(prices: &[f64]) -> PricingResult<f64> {
    prices
        .last()
        .copied()
        .ok_or_else(|| PricingError::degenerate("prices", "price series is empty"))
}

/// Historical annualized volatility: the sample standard deviation of daily
/// percentage changes, scaled by sqrt(252).
pub fn annualized_volatility(prices: &[f64]) -> PricingResult<f64> {
    if prices.iter().any(|p| !(p.is_finite() && *p > 0.0)) {
        return Err(PricingError::degenerate(
            "prices",
            "every price must be positive and finite",
        ));
    }

    let returns: Vec<f64> = prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    // Sample std-dev needs two returns, i.e. three prices.
    if returns.len() < 2 {
        return Err(PricingError::degenerate(
            "prices",
            format!("need at least 3 prices, got {}", prices.len()),
        ));
    }

    let num_returns = returns.len() as f64;
    let mean_return = returns.iter().sum::<f64>() / num_returns;
    let variance = returns
        .iter()
        .map(|r| (r - mean_return).powi(2))
        .sum::<f64>()
        / (num_returns - 1.0);

    Ok(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_price() {
        assert_eq!(last_price(&[101.0, 102.5, 99.0]).unwrap(), 99.0);
        assert!(last_price(&[]).is_err(), "An empty series has no last price.");
    }

    #[test]
    fn test_flat_series_has_zero_volatility() {
        let vol = annualized_volatility(&[50.0; 10]).unwrap();
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_known_volatility() {
        // Returns alternate +10% / -10%-ish; compute the expectation by hand.
        let prices = [100.0, 110.0, 99.0, 108.9];
        let returns = [0.1, -0.1, 0.1];
        let mean = returns.iter().sum::<f64>() / 3.0;
        let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 2.0;
        let expected = var.sqrt() * 252f64.sqrt();

        let vol = annualized_volatility(&prices).unwrap();
        assert!((vol - expected).abs() < 1e-12, "Expected {expected}, got {vol}");
    }

    #[test]
    fn test_short_or_bad_series_is_rejected() {
        assert!(annualized_volatility(&[100.0, 101.0]).is_err());
        assert!(annualized_volatility(&[100.0, 0.0, 101.0]).is_err());
    }
}
