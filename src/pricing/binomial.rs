// src/pricing/binomial.rs

use super::OptionPricingModel;
use crate::errors::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::shared_types::OptionType;

/// A recombining Cox-Ross-Rubinstein lattice over `steps` time slices.
///
/// Only the terminal layer is stored: node `j` is the price after `j` up-moves
/// and `steps - j` down-moves. Because `up * down == 1` the tree recombines and
/// the terminal layer has `steps + 1` nodes.
#[derive(Debug, Clone)]
pub struct BinomialLattice {
    steps: usize,
    dt: f64,
    up: f64,
    down: f64,
    up_probability: f64,
    step_discount: f64,
    terminal_prices: Vec<f64>,
}

impl BinomialLattice {
    pub fn new(params: &MarketParameters, steps: usize) -> PricingResult<Self> {
        if steps == 0 {
            return Err(PricingError::degenerate(
                "steps",
                "a binomial tree needs at least one time step",
            ));
        }

        let dt = params.time_to_maturity() / steps as f64;
        let up = (params.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;

        // Risk free compounded return over one step.
        let growth = (params.risk_free_rate() * dt).exp();
        let up_probability = (growth - down) / (up - down);

        // With u > e^(r dt) > d this is always inside [0, 1]. Outside it (or NaN
        // when sigma = 0 collapses u and d) the lattice admits arbitrage.
        if !(0.0..=1.0).contains(&up_probability) {
            tracing::warn!(
                steps,
                up,
                down,
                growth,
                up_probability,
                "rejecting lattice with risk-neutral probability outside [0, 1]"
            );
            return Err(PricingError::degenerate(
                "volatility",
                format!(
                    "risk-neutral up probability {up_probability} is outside [0, 1] \
                     (u = {up}, d = {down}, e^(r dt) = {growth})"
                ),
            ));
        }

        let spot = params.spot();
        let terminal_prices: Vec<f64> = (0..=steps)
            .map(|j| spot * up.powi(j as i32) * down.powi((steps - j) as i32))
            .collect();

        // sigma * sqrt(T * steps) beyond ~709 overflows the top node.
        if terminal_prices.iter().any(|s| !s.is_finite()) {
            tracing::warn!(steps, up, "rejecting lattice whose terminal prices overflow");
            return Err(PricingError::degenerate(
                "volatility",
                format!("terminal prices overflow with u = {up} over {steps} steps"),
            ));
        }

        tracing::debug!(steps, dt, up, down, up_probability, "built binomial lattice");

        Ok(Self {
            steps,
            dt,
            up,
            down,
            up_probability,
            step_discount: (-params.risk_free_rate() * dt).exp(),
            terminal_prices,
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn up(&self) -> f64 {
        self.up
    }

    pub fn down(&self) -> f64 {
        self.down
    }

    pub fn up_probability(&self) -> f64 {
        self.up_probability
    }

    pub fn down_probability(&self) -> f64 {
        1.0 - self.up_probability
    }

    pub fn terminal_prices(&self) -> &[f64] {
        &self.terminal_prices
    }

    /// Backward induction of the discounted risk-neutral expectation.
    /// O(steps^2) time, O(steps) space.
    pub fn price(&self, option_type: OptionType, strike_price: f64) -> f64 {
        let p = self.up_probability;
        let q = self.down_probability();

        let mut values: Vec<f64> = self
            .terminal_prices
            .iter()
            .map(|&s| option_type.payoff(s, strike_price))
            .collect();

        // Each pass collapses the live prefix by one node. Updating in place
        // from the left is safe because values[k + 1] is still unread.
        for i in (0..self.steps).rev() {
            for k in 0..=i {
                values[k] = self.step_discount * (p * values[k + 1] + q * values[k]);
            }
        }

        values[0]
    }
}

/// European option priced on a binomial lattice.
#[derive(Debug, Clone)]
pub struct BinomialTreeModel {
    params: MarketParameters,
    number_of_time_steps: usize,
}

impl BinomialTreeModel {
    pub fn new(params: MarketParameters, number_of_time_steps: usize) -> Self {
        Self {
            params,
            number_of_time_steps,
        }
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn number_of_time_steps(&self) -> usize {
        self.number_of_time_steps
    }

    // The lattice is rebuilt for every request; calls and puts share nothing.
    fn price(&self, option_type: OptionType) -> PricingResult<f64> {
        let lattice = BinomialLattice::new(&self.params, self.number_of_time_steps)?;
        Ok(lattice.price(option_type, self.params.strike()))
    }
}

impl OptionPricingModel for BinomialTreeModel {
    fn name(&self) -> &'static str {
        "Binomial Model"
    }

    fn call_price(&self) -> PricingResult<f64> {
        self.price(OptionType::Call)
    }

    fn put_price(&self) -> PricingResult<f64> {
        self.price(OptionType::Put)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_params() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 365, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_lattice_recombines_for_every_step_count() {
        let params = atm_params();
        for steps in [1, 2, 3, 7, 10, 50, 365, 1_000, 10_000] {
            let lattice = BinomialLattice::new(&params, steps).unwrap();
            assert!(
                (lattice.up() * lattice.down() - 1.0).abs() < 1e-12,
                "u * d should be 1 for {steps} steps."
            );
            assert_eq!(lattice.terminal_prices().len(), steps + 1, "There should be n + 1 terminal nodes.");
        }
    }

    #[test]
    fn test_terminal_prices_are_increasing_and_centered() {
        let lattice = BinomialLattice::new(&atm_params(), 4).unwrap();
        let prices = lattice.terminal_prices();
        assert!(prices.windows(2).all(|w| w[0] < w[1]), "More up-moves must mean a higher price.");
        // Two ups and two downs land back on spot.
        assert!((prices[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_are_well_posed() {
        let lattice = BinomialLattice::new(&atm_params(), 100).unwrap();
        let p = lattice.up_probability();
        assert!(p > 0.0 && p < 1.0, "p = {p} should be a probability.");
        assert!((p + lattice.down_probability() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_one_step_tree_matches_hand_calculation() {
        let params = atm_params();
        let u = 0.2f64.exp();
        let d = 1.0 / u;
        let p = (0.05f64.exp() - d) / (u - d);
        let expected_call = (-0.05f64).exp() * p * (100.0 * u - 100.0);
        let expected_put = (-0.05f64).exp() * (1.0 - p) * (100.0 - 100.0 * d);

        let model = BinomialTreeModel::new(params, 1);
        let call = model.call_price().unwrap();
        let put = model.put_price().unwrap();

        assert!((call - expected_call).abs() < 1e-10, "call {call} vs {expected_call}");
        assert!((put - expected_put).abs() < 1e-10, "put {put} vs {expected_put}");
    }

    #[test]
    fn test_lattice_satisfies_put_call_parity() {
        // Backward induction under the risk-neutral measure is linear, so parity
        // holds on the lattice itself, not just in the limit.
        let params = MarketParameters::new(120.0, 100.0, 200, 0.03, 0.35).unwrap();
        let model = BinomialTreeModel::new(params, 250);
        let call = model.call_price().unwrap();
        let put = model.put_price().unwrap();
        assert!((call - put - params.parity_spread()).abs() < 1e-8);
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let model = BinomialTreeModel::new(atm_params(), 500);
        let first = model.call_price().unwrap();
        let second = model.call_price().unwrap();
        assert_eq!(first.to_bits(), second.to_bits(), "Identical inputs must give identical output.");
    }

    #[test]
    fn test_zero_steps_is_rejected() {
        let model = BinomialTreeModel::new(atm_params(), 0);
        assert!(matches!(
            model.call_price(),
            Err(PricingError::DegenerateMarketInput { parameter: "steps", .. })
        ));
    }

    #[test]
    fn test_zero_volatility_is_rejected() {
        let params = MarketParameters::new(100.0, 100.0, 365, 0.05, 0.0).unwrap();
        let model = BinomialTreeModel::new(params, 100);
        assert!(model.put_price().is_err(), "u == d leaves the lattice undefined.");
    }

    #[test]
    fn test_rate_too_high_for_volatility_is_rejected() {
        // e^(r dt) above u: the up probability exceeds one.
        let params = MarketParameters::new(100.0, 100.0, 365, 0.5, 0.01).unwrap();
        let model = BinomialTreeModel::new(params, 10);
        assert!(model.call_price().is_err());
    }

    #[test]
    fn test_overflowing_lattice_is_rejected() {
        // Arrange: sigma = 1000% over 20k steps pushes u^n past f64::MAX.
        let params = MarketParameters::new(100.0, 100.0, 365, 0.05, 10.0).unwrap();
        let model = BinomialTreeModel::new(params, 20_000);

        // Act
        let call = model.call_price();
        let put = model.put_price();

        // Assert
        assert!(
            matches!(call, Err(PricingError::DegenerateMarketInput { parameter: "volatility", .. })),
            "An infinite node must not produce a price, got {call:?}"
        );
        assert!(put.is_err(), "The put shares the same broken lattice, got {put:?}");
    }

    #[test]
    fn test_high_volatility_within_range_still_prices() {
        let params = MarketParameters::new(100.0, 100.0, 365, 0.05, 10.0).unwrap();
        let model = BinomialTreeModel::new(params, 200);
        let call = model.call_price().unwrap();
        let put = model.put_price().unwrap();
        assert!(call.is_finite() && put.is_finite());
        assert!((call - put - params.parity_spread()).abs() < 1e-6, "Parity must hold on the lattice.");
    }

    #[test]
    fn test_dispatch_routes_to_distinct_payoffs() {
        let model = BinomialTreeModel::new(atm_params(), 200);
        let call = model.calculate_option_price_for("Call Option").unwrap();
        let put = model.calculate_option_price_for("Put Option").unwrap();
        assert!(call > put, "With r > 0 an ATM call is worth more than the put.");
        assert!(model.calculate_option_price_for("Butterfly").is_err());
    }
}
