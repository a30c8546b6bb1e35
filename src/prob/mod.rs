use serde::{Deserialize, Serialize};

use crate::data::Dataset;

const LN_2PI : f64 = 1.8378770664093453;

/// Gaussian prior over an unconstrained coefficient, held as a plain
/// configuration struct so the model specification does not depend on any
/// particular sampler's model-building API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalPrior {

    pub mean : f64,

    pub scale : f64

}

impl NormalPrior {

    pub fn log_prob(&self, x : f64) -> f64 {
        let z = (x - self.mean) / self.scale;
        -0.5 * z * z - self.scale.ln() - 0.5 * LN_2PI
    }

}

/// Uniform prior over a bounded support. Evaluating outside the support
/// yields negative infinity, which the Metropolis step treats as a certain
/// rejection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UniformPrior {

    pub low : f64,

    pub high : f64

}

impl UniformPrior {

    pub fn log_prob(&self, x : f64) -> f64 {
        if x > self.low && x < self.high {
            -(self.high - self.low).ln()
        } else {
            f64::NEG_INFINITY
        }
    }

}

/// Priors of the linear return model y ~ N(a + b x, sigma): independent
/// Gaussians over intercept and slope and a uniform over the noise scale.
/// The default is the weakly-informative a ~ N(0, 100), b ~ N(0, 100),
/// sigma ~ U(0, 100).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionPriors {

    pub intercept : NormalPrior,

    pub slope : NormalPrior,

    pub noise : UniformPrior

}

impl Default for RegressionPriors {

    fn default() -> Self {
        Self {
            intercept : NormalPrior { mean : 0.0, scale : 100.0 },
            slope : NormalPrior { mean : 0.0, scale : 100.0 },
            noise : UniformPrior { low : 0.0, high : 100.0 }
        }
    }

}

/// One point in parameter space: a single posterior draw of
/// (intercept, slope, noise scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSample {

    pub intercept : f64,

    pub slope : f64,

    pub sigma : f64

}

/// The linear return model conditioned on an observed dataset. Owns its data,
/// so the unnormalized posterior is a pure function of the parameter point;
/// there is no ambient state shared with the sampler.
#[derive(Debug, Clone)]
pub struct LinearModel {

    pub priors : RegressionPriors,

    data : Dataset

}

impl LinearModel {

    pub fn new(priors : RegressionPriors, data : Dataset) -> Self {
        Self { priors, data }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Unnormalized log-posterior at the informed point: prior log-density
    /// plus the Gaussian likelihood sum_i log N(y_i | a + b x_i, sigma).
    /// Points excluded by the priors (sigma outside its support in
    /// particular) evaluate to negative infinity.
    pub fn log_posterior(&self, p : &ParameterSample) -> f64 {
        let lp = self.priors.intercept.log_prob(p.intercept)
            + self.priors.slope.log_prob(p.slope)
            + self.priors.noise.log_prob(p.sigma);
        if !lp.is_finite() {
            return f64::NEG_INFINITY;
        }
        let inv_two_var = 0.5 / (p.sigma * p.sigma);
        let lik_const = -p.sigma.ln() - 0.5 * LN_2PI;
        let mut ll = 0.0;
        for (x, y) in self.data.x.iter().zip(self.data.y.iter()) {
            let resid = y - (p.intercept + p.slope * x);
            ll += lik_const - resid * resid * inv_two_var;
        }
        lp + ll
    }

}
