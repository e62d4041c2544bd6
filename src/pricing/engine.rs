// src/pricing/engine.rs

use super::config::{BINOMIAL_DEFAULT_STEPS, MC_DEFAULT_SEED, MC_DEFAULT_SIMULATIONS};
use super::{BinomialTreeModel, BlackScholesModel, MonteCarloPricing, OptionPricingModel};
use crate::errors::PricingResult;
use crate::market::MarketParameters;
use crate::shared_types::{OptionType, PricingMethod};
use serde::{Deserialize, Serialize};

/// Everything needed to price one contract with one method.
///
/// ```json
/// {
///   "method": "Monte Carlo Simulation",
///   "market": { "spot_price": 100.0, "strike_price": 100.0, "days_to_maturity": 365,
///               "risk_free_rate": 0.05, "volatility": 0.2 },
///   "simulations": 10000,
///   "option_type": "Put Option"
/// }
/// ```
///
/// Without `option_type` both the call and the put are priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub method: PricingMethod,
    pub market: MarketParameters,
    #[serde(default)]
    pub option_type: Option<OptionType>,
    /// Binomial time steps. Ignored by the other methods.
    #[serde(default)]
    pub steps: Option<usize>,
    /// Monte Carlo path count. Ignored by the other methods.
    #[serde(default)]
    pub simulations: Option<usize>,
    /// Monte Carlo seed. Ignored by the other methods.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PricingRequest {
    pub fn new(method: PricingMethod, market: MarketParameters) -> Self {
        Self {
            method,
            market,
            option_type: None,
            steps: None,
            simulations: None,
            seed: None,
        }
    }

    pub fn from_json(json: &str) -> PricingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the engine and prices what the request asks for.
    pub fn price(&self) -> PricingResult<PricingQuote> {
        PricingEngine::from_request(self)?.quote(self.option_type)
    }
}

/// Prices produced for one request. A side that was not asked for is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingQuote {
    pub method: PricingMethod,
    pub call: Option<f64>,
    pub put: Option<f64>,
}

/// One of the three engines, picked at runtime.
pub enum PricingEngine {
    Binomial(BinomialTreeModel),
    BlackScholes(BlackScholesModel),
    MonteCarlo(MonteCarloPricing),
}

impl PricingEngine {
    /// Builds the requested engine, filling unset resolution with the defaults.
    /// A Monte Carlo engine comes back already simulated.
    pub fn from_request(request: &PricingRequest) -> PricingResult<Self> {
        let engine = match request.method {
            PricingMethod::Binomial => {
                let steps = request.steps.unwrap_or(BINOMIAL_DEFAULT_STEPS);
                PricingEngine::Binomial(BinomialTreeModel::new(request.market, steps))
            }
            PricingMethod::BlackScholes => {
                PricingEngine::BlackScholes(BlackScholesModel::new(request.market))
            }
            PricingMethod::MonteCarlo => {
                let simulations = request.simulations.unwrap_or(MC_DEFAULT_SIMULATIONS);
                let mut mc = MonteCarloPricing::new(request.market, simulations)?
                    .with_seed(request.seed.unwrap_or(MC_DEFAULT_SEED));
                mc.simulate();
                PricingEngine::MonteCarlo(mc)
            }
        };
        tracing::debug!(method = %request.method, "pricing engine ready");
        Ok(engine)
    }

    pub fn method(&self) -> PricingMethod {
        match self {
            PricingEngine::Binomial(_) => PricingMethod::Binomial,
            PricingEngine::BlackScholes(_) => PricingMethod::BlackScholes,
            PricingEngine::MonteCarlo(_) => PricingMethod::MonteCarlo,
        }
    }

    /// Prices one side when `option_type` is set, otherwise both.
    pub fn quote(&self, option_type: Option<OptionType>) -> PricingResult<PricingQuote> {
        let (call, put) = match option_type {
            Some(OptionType::Call) => (Some(self.call_price()?), None),
            Some(OptionType::Put) => (None, Some(self.put_price()?)),
            None => {
                let (call, put) = self.price_both()?;
                (Some(call), Some(put))
            }
        };
        Ok(PricingQuote {
            method: self.method(),
            call,
            put,
        })
    }

    /// `(call, put)`, the pair the pricing screens show together.
    pub fn price_both(&self) -> PricingResult<(f64, f64)> {
        Ok((self.call_price()?, self.put_price()?))
    }

    fn model(&self) -> &dyn OptionPricingModel {
        match self {
            PricingEngine::Binomial(model) => model,
            PricingEngine::BlackScholes(model) => model,
            PricingEngine::MonteCarlo(model) => model,
        }
    }
}

impl OptionPricingModel for PricingEngine {
    fn name(&self) -> &'static str {
        self.model().name()
    }

    fn call_price(&self) -> PricingResult<f64> {
        self.model().call_price()
    }

    fn put_price(&self) -> PricingResult<f64> {
        self.model().put_price()
    }
}
