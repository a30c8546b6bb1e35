use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{Error, Result};
use crate::prob::{LinearModel, ParameterSample};
use crate::sim::Trace;

/// Metropolis-Hastings settings.
#[derive(Debug, Clone)]
pub struct Settings {

    /// Total chain length, including any prefix the caller later burns.
    pub draws : usize,

    /// Random-walk step scale per parameter (intercept, slope, sigma).
    pub proposal_scale : [f64; 3],

    /// Length of the initial adaptation window during which the proposal
    /// scales are retuned toward target_accept. Usually covered by the
    /// burn-in prefix the caller discards.
    pub adapt : usize,

    /// Acceptance rate the adaptation steers toward; 0.234 is the usual
    /// random-walk target.
    pub target_accept : f64,

    /// Chain starting point. When absent, the chain starts at
    /// (0, 0, sd(y)), which lies inside the noise prior's support.
    pub init : Option<ParameterSample>,

    /// Render an indicatif progress bar over the chain loop.
    pub progress : bool

}

impl Default for Settings {

    fn default() -> Self {
        Self {
            draws : 100_000,
            proposal_scale : [0.01, 0.05, 0.005],
            adapt : 20_000,
            target_accept : 0.234,
            init : None,
            progress : false
        }
    }

}

/// The Metropolis-Hastings posterior sampler. Proposals increment the last
/// accepted point by independent zero-centered Gaussian steps; a proposal is
/// accepted with probability min(1, exp(lp_new - lp_old)) where lp is the
/// unnormalized log-posterior of the model. Points excluded by the priors
/// evaluate to negative infinity and are always rejected, which keeps the
/// noise scale inside its support without any reparameterization. The
/// sampler is deterministic given the caller's generator, so a seeded StdRng
/// makes runs bit-identical.
#[derive(Debug)]
pub struct Metropolis {

    model : LinearModel,

    settings : Settings

}

impl Metropolis {

    pub fn new(model : LinearModel, settings : Settings) -> Self {
        Self { model, settings }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    fn initial_point(&self) -> ParameterSample {
        self.settings.init.unwrap_or_else(|| {
            let y = &self.model.data().y;
            let n = y.nrows() as f64;
            let mean = y.iter().sum::<f64>() / n;
            let var = y.iter().map(|y| (y - mean) * (y - mean) ).sum::<f64>() / n;
            ParameterSample {
                intercept : 0.0,
                slope : 0.0,
                sigma : var.sqrt().max(1e-3)
            }
        })
    }

    /// Runs the chain, returning the full trace (burn-in trimming is the
    /// caller's responsibility, via Trace::burn).
    pub fn sample<R : Rng>(&self, rng : &mut R) -> Result<Trace> {
        if self.settings.draws == 0 {
            return Err(Error::NoDraws);
        }
        let mut scales = self.settings.proposal_scale;
        let mut current = self.initial_point();
        let mut lp_current = self.model.log_posterior(&current);
        let mut samples = Vec::with_capacity(self.settings.draws);
        let mut accepted = 0usize;

        // Proposal scales are retuned every window during the adaptation
        // prefix; afterwards they stay fixed so the kernel is homogeneous.
        let window = 100usize;
        let mut window_accepted = 0usize;

        let bar = if self.settings.progress {
            let bar = ProgressBar::new(self.settings.draws as u64);
            bar.set_style(ProgressStyle::default_bar().template("sampling {bar:40} {pos}/{len}"));
            Some(bar)
        } else {
            None
        };

        for t in 0..self.settings.draws {
            let proposal = ParameterSample {
                intercept : current.intercept + scales[0] * rng.sample::<f64, _>(StandardNormal),
                slope : current.slope + scales[1] * rng.sample::<f64, _>(StandardNormal),
                sigma : current.sigma + scales[2] * rng.sample::<f64, _>(StandardNormal)
            };
            let lp_proposal = self.model.log_posterior(&proposal);
            let log_ratio = lp_proposal - lp_current;
            let u : f64 = rng.gen();
            if log_ratio > 0.0 || u.ln() < log_ratio {
                current = proposal;
                lp_current = lp_proposal;
                accepted += 1;
                window_accepted += 1;
            }
            if t < self.settings.adapt && (t + 1) % window == 0 {
                let rate = window_accepted as f64 / window as f64;
                let factor = if rate > self.settings.target_accept { 1.1 } else { 0.9 };
                for s in scales.iter_mut() {
                    *s = (*s * factor).clamp(1e-8, 1e3);
                }
                window_accepted = 0;
            }
            samples.push(current);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }
        let accept_rate = accepted as f64 / self.settings.draws as f64;
        debug!(
            "chain finished: {} draws, acceptance {:.3}, adapted scales {:?}",
            self.settings.draws, accept_rate, scales
        );
        Ok(Trace::new(samples, accept_rate))
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::data::{generate, SynthSettings};
    use crate::prob::RegressionPriors;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_draws_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = generate(&SynthSettings::default(), &mut rng).unwrap();
        let model = LinearModel::new(RegressionPriors::default(), data);
        let sampler = Metropolis::new(model, Settings { draws : 0, ..Default::default() });
        assert!(sampler.sample(&mut rng).is_err());
    }

    #[test]
    fn chain_concentrates_near_the_generating_parameters() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = generate(&SynthSettings::default(), &mut rng).unwrap();
        let model = LinearModel::new(RegressionPriors::default(), data);
        let settings = Settings { draws : 20_000, adapt : 4_000, ..Default::default() };
        let trace = Metropolis::new(model, settings)
            .sample(&mut rng)
            .unwrap()
            .burn(4_000)
            .unwrap();
        let summary = trace.summary().unwrap();
        assert!((summary.slope.mean - 0.5).abs() < 0.3, "slope mean {}", summary.slope.mean);
        assert!(summary.intercept.mean.abs() < 0.05, "intercept mean {}", summary.intercept.mean);
        assert!(summary.sigma.mean > 0.0 && summary.sigma.mean < 0.1, "sigma mean {}", summary.sigma.mean);
        assert!(trace.accept_rate > 0.05 && trace.accept_rate < 0.9);
    }

}
