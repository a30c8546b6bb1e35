use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::prob::ParameterSample;

/// Random-walk Metropolis-Hastings posterior sampler.
pub mod metropolis;

pub use metropolis::*;

/// A non-parametric representation of the posterior in terms of the sampling
/// trajectory of a random-walk algorithm. Draw order reflects chain order and
/// is significant only for burn-in trimming; the analysis downstream treats
/// the trimmed draws as exchangeable.
#[derive(Debug, Clone)]
pub struct Trace {

    samples : Vec<ParameterSample>,

    /// Fraction of proposals accepted while building this chain.
    pub accept_rate : f64

}

impl Trace {

    pub fn new(samples : Vec<ParameterSample>, accept_rate : f64) -> Self {
        Self { samples, accept_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[ParameterSample] {
        &self.samples
    }

    /// Discards the initial burn-in prefix, which is biased by the chain's
    /// starting state. The prefix size is a plain tunable, not derived
    /// adaptively. Trimming everything (or more) is a precondition error:
    /// every downstream computation divides by the trace length.
    pub fn burn(mut self, burn : usize) -> Result<Trace> {
        if burn >= self.samples.len() {
            return Err(Error::EmptyTrace { draws : self.samples.len(), burn });
        }
        self.samples.drain(..burn);
        Ok(self)
    }

    pub fn intercepts(&self) -> Vec<f64> {
        self.samples.iter().map(|p| p.intercept ).collect()
    }

    pub fn slopes(&self) -> Vec<f64> {
        self.samples.iter().map(|p| p.slope ).collect()
    }

    pub fn sigmas(&self) -> Vec<f64> {
        self.samples.iter().map(|p| p.sigma ).collect()
    }

    pub fn summary(&self) -> Result<TraceSummary> {
        if self.samples.is_empty() {
            return Err(Error::EmptyTrace { draws : 0, burn : 0 });
        }
        Ok(TraceSummary {
            intercept : ParameterSummary::from_draws(&self.intercepts()),
            slope : ParameterSummary::from_draws(&self.slopes()),
            sigma : ParameterSummary::from_draws(&self.sigmas()),
            accept_rate : self.accept_rate
        })
    }

}

/// Marginal posterior summary for a single parameter: mean, standard
/// deviation, central 95% credible interval and a lag-1 autocorrelation
/// estimate of the effective sample size.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSummary {

    pub mean : f64,

    pub sd : f64,

    pub lower : f64,

    pub upper : f64,

    pub ess : f64

}

impl ParameterSummary {

    pub fn from_draws(draws : &[f64]) -> Self {
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let var = if draws.len() > 1 {
            draws.iter().map(|x| (x - mean) * (x - mean) ).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };
        let mut sorted = draws.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap() );
        let lo_ix = (0.025 * n) as usize;
        let hi_ix = ((0.975 * n) as usize).min(sorted.len() - 1);
        Self {
            mean,
            sd : var.sqrt(),
            lower : sorted[lo_ix],
            upper : sorted[hi_ix],
            ess : effective_sample_size(draws)
        }
    }

}

/// Effective sample size from the lag-1 autocorrelation of the chain, the
/// crude n / (1 + 2 rho_1) estimate. Correlated MCMC draws carry less
/// information than independent draws; this quantifies roughly how much less.
pub fn effective_sample_size(draws : &[f64]) -> f64 {
    let n = draws.len();
    if n < 10 {
        return n as f64;
    }
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|x| (x - mean) * (x - mean) ).sum::<f64>() / n as f64;
    if var == 0.0 {
        return n as f64;
    }
    let mut rho = 0.0;
    for i in 0..(n - 1) {
        rho += (draws[i] - mean) * (draws[i + 1] - mean);
    }
    rho /= (n - 1) as f64 * var;
    (n as f64 / (1.0 + 2.0 * rho.abs())).max(1.0)
}

/// Posterior summary table over the three model parameters.
#[derive(Debug, Clone, Copy)]
pub struct TraceSummary {

    pub intercept : ParameterSummary,

    pub slope : ParameterSummary,

    pub sigma : ParameterSummary,

    pub accept_rate : f64

}

impl Display for TraceSummary {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>10} {:>12} {:>12} {:>24} {:>10}", "parameter", "mean", "sd", "95% interval", "ess")?;
        for (name, s) in [
            ("intercept", &self.intercept),
            ("slope", &self.slope),
            ("sigma", &self.sigma)
        ].iter() {
            writeln!(
                f,
                "{:>10} {:>12.5} {:>12.5} [{:>10.5}, {:>10.5}] {:>10.0}",
                name, s.mean, s.sd, s.lower, s.upper, s.ess
            )?;
        }
        write!(f, "acceptance rate: {:.3}", self.accept_rate)
    }

}
