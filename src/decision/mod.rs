use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;
use log::warn;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{Error, Result};
use crate::prob::ParameterSample;
use crate::sim::Trace;

/// Asymmetric sign loss, in scalar, vectorized and population-mean form.
pub mod loss;

pub use loss::*;

/// One predictive noise draw per posterior sample, each scaled by that
/// sample's own noise parameter. Heteroscedastic across draws: uncertainty
/// about sigma itself flows into the predictive population.
pub fn draw_predictive_noise<R : Rng>(trace : &Trace, rng : &mut R) -> Vec<f64> {
    trace.samples().iter()
        .map(|p| p.sigma * rng.sample::<f64, _>(StandardNormal) )
        .collect()
}

/// The population of simulated outcomes at a fixed signal: one outcome per
/// posterior draw, r_i = a_i + b_i * signal + noise_i. The noise vector must
/// be paired index-wise with the trace.
pub fn predictive_population(signal : f64, trace : &Trace, noise : &[f64]) -> Vec<f64> {
    assert!(noise.len() == trace.len());
    trace.samples().iter().zip(noise.iter())
        .map(|(p, eps)| predictive_outcome(p, signal, *eps) )
        .collect()
}

fn predictive_outcome(p : &ParameterSample, signal : f64, eps : f64) -> f64 {
    p.intercept + p.slope * signal + eps
}

struct ExpectedLoss<'a> {

    outcomes : &'a [f64],

    alpha : f64

}

impl<'a> CostFunction for ExpectedLoss<'a> {

    type Param = Vec<f64>;

    type Output = f64;

    fn cost(&self, p : &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        Ok(expected_sign_loss(self.outcomes, p[0], self.alpha))
    }

}

/// Finds the prediction minimizing the empirical mean of the sign loss over
/// the informed outcome population, via a derivative-free Nelder-Mead search
/// started from zero. The objective is continuous and piecewise smooth but
/// not globally convex (each outcome contributes its own sign-crossing
/// point), so the result is an approximate numerical optimum. Hitting the
/// iteration cap degrades to a warning plus the best value found so far.
pub fn optimal_prediction(outcomes : &[f64], alpha : f64) -> Result<f64> {
    if outcomes.is_empty() {
        return Err(Error::EmptyPopulation);
    }
    if alpha <= 0.0 {
        return Err(Error::NonPositiveAlpha(alpha));
    }
    let cost = ExpectedLoss { outcomes, alpha };
    let solver : NelderMead<Vec<f64>, f64> = NelderMead::new(vec![vec![0.0], vec![0.01]])
        .with_sd_tolerance(1e-9)
        .map_err(|e| Error::Minimize(e.to_string()) )?;
    let res = Executor::new(cost, solver)
        .configure(|state| state.max_iters(500) )
        .run()
        .map_err(|e| Error::Minimize(e.to_string()) )?;
    let state = res.state();
    if let Some(TerminationReason::MaxItersReached) = state.get_termination_reason() {
        warn!("expected-loss minimizer hit the iteration cap; keeping the best value found");
    }
    state.get_best_param()
        .map(|p| p[0] )
        .ok_or_else(|| Error::Minimize("no parameter visited by the simplex".to_string()) )
}

/// Bayes-optimal prediction at every entry of the signal grid: for each
/// signal, simulate the outcome population from the posterior trace and
/// minimize the expected sign loss over it. Output order is one-to-one with
/// the grid.
///
/// The predictive noise is drawn once, index-paired with the trace, and the
/// same vector is reused at every grid point: each noise value is treated as
/// a fixed realization attached to its posterior draw. Note this correlates
/// the populations across signals instead of redrawing noise per signal.
pub fn optimal_predictions<R : Rng>(
    trace : &Trace,
    grid : &[f64],
    alpha : f64,
    rng : &mut R
) -> Result<Vec<f64>> {
    if trace.is_empty() {
        return Err(Error::EmptyTrace { draws : 0, burn : 0 });
    }
    let noise = draw_predictive_noise(trace, rng);
    grid.iter()
        .map(|signal| {
            let outcomes = predictive_population(*signal, trace, &noise);
            optimal_prediction(&outcomes, alpha)
        })
        .collect()
}
