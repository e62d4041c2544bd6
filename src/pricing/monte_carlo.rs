// src/pricing/monte_carlo.rs

use super::OptionPricingModel;
use super::config::{MC_DEFAULT_SEED, MC_DISPLAY_PATH_DIVISOR};
use crate::errors::{PricingError, PricingResult};
use crate::market::MarketParameters;
use crate::shared_types::OptionType;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

/// Simulated price trajectories, one row per calendar day.
///
/// Stored row-major: `steps` rows of `paths` prices each. Row 0 is the spot
/// for every path.
#[derive(Debug, Clone)]
pub struct SimulationPaths {
    steps: usize,
    paths: usize,
    prices: Vec<f64>,
}

impl SimulationPaths {
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Prices of every path at time step `t`, or `None` past the last step.
    pub fn row(&self, t: usize) -> Option<&[f64]> {
        let start = t.checked_mul(self.paths)?;
        let end = start.checked_add(self.paths)?;
        self.prices.get(start..end)
    }

    /// The last row; the only one pricing needs.
    pub fn terminal_prices(&self) -> &[f64] {
        &self.prices[(self.steps - 1) * self.paths..]
    }

    /// One trajectory through time, or `None` if `index` is not a simulated path.
    pub fn path(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.paths {
            return None;
        }
        Some(
            self.prices
                .chunks_exact(self.paths)
                .map(|row| row[index])
                .collect(),
        )
    }
}

/// European option priced by simulating geometric Brownian motion.
///
/// Time is stepped once per calendar day to maturity. [`simulate`] must run
/// before a price is asked for; until then every price is `NotSimulatedYet`.
///
/// [`simulate`]: MonteCarloPricing::simulate
pub struct MonteCarloPricing {
    params: MarketParameters,
    number_of_simulations: usize,
    num_of_steps: usize,
    dt: f64,
    seed: u64,
    simulation_results: Option<SimulationPaths>,
}

impl MonteCarloPricing {
    pub fn new(params: MarketParameters, number_of_simulations: usize) -> PricingResult<Self> {
        if number_of_simulations == 0 {
            return Err(PricingError::degenerate(
                "number_of_simulations",
                "at least one path must be simulated",
            ));
        }
        let num_of_steps = params.days_to_maturity() as usize;

        Ok(Self {
            params,
            number_of_simulations,
            num_of_steps,
            dt: params.time_to_maturity() / num_of_steps as f64,
            seed: MC_DEFAULT_SEED,
            simulation_results: None,
        })
    }

    /// Replaces the default seed. Drops any previous simulation, since its
    /// paths no longer belong to this seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.simulation_results = None;
        self
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn number_of_simulations(&self) -> usize {
        self.number_of_simulations
    }

    pub fn num_of_steps(&self) -> usize {
        self.num_of_steps
    }

    /// Simulates every path from a freshly seeded generator, so repeated calls
    /// reproduce the same matrix.
    pub fn simulate(&mut self) {
        let n = self.number_of_simulations;
        let p = &self.params;
        let drift = (p.risk_free_rate() - 0.5 * p.volatility().powi(2)) * self.dt;
        let diffusion = p.volatility() * self.dt.sqrt();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut prices = vec![0.0; self.num_of_steps * n];
        prices[..n].fill(p.spot());

        for t in 1..self.num_of_steps {
            let (done, rest) = prices.split_at_mut(t * n);
            let previous = &done[(t - 1) * n..];
            for (next, &prev) in rest[..n].iter_mut().zip(previous) {
                let z: f64 = StandardNormal.sample(&mut rng);
                *next = prev * (drift + diffusion * z).exp();
            }
        }

        tracing::info!(
            paths = n,
            steps = self.num_of_steps,
            seed = self.seed,
            "monte carlo simulation finished"
        );

        self.simulation_results = Some(SimulationPaths {
            steps: self.num_of_steps,
            paths: n,
            prices,
        });
    }

    /// The full path matrix, if [`MonteCarloPricing::simulate`] has run.
    pub fn simulation_results(&self) -> Option<&SimulationPaths> {
        self.simulation_results.as_ref()
    }

    /// The first `count` trajectories, for whoever draws them. Clamped to the
    /// number of simulated paths.
    pub fn sample_paths(&self, count: usize) -> PricingResult<Vec<Vec<f64>>> {
        let results = self
            .simulation_results
            .as_ref()
            .ok_or(PricingError::NotSimulatedYet)?;
        Ok((0..count.min(results.paths))
            .filter_map(|i| results.path(i))
            .collect())
    }

    /// How many paths are worth displaying.
    pub fn recommended_display_paths(&self) -> usize {
        self.number_of_simulations / MC_DISPLAY_PATH_DIVISOR
    }

    // Discounted sample mean of the terminal payoffs.
    fn price(&self, option_type: OptionType) -> PricingResult<f64> {
        let results = self
            .simulation_results
            .as_ref()
            .ok_or(PricingError::NotSimulatedYet)?;
        let strike = self.params.strike();
        let payoff_sum: f64 = results
            .terminal_prices()
            .iter()
            .map(|&s| option_type.payoff(s, strike))
            .sum();

        Ok(self.params.discount_factor() * payoff_sum / results.paths as f64)
    }
}

impl OptionPricingModel for MonteCarloPricing {
    fn name(&self) -> &'static str {
        "Monte Carlo Simulation"
    }

    fn call_price(&self) -> PricingResult<f64> {
        self.price(OptionType::Call)
    }

    fn put_price(&self) -> PricingResult<f64> {
        self.price(OptionType::Put)
    }
}
