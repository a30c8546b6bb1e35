use nalgebra::*;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

use crate::error::{Error, Result};

/// A fixed collection of N paired observations (signal, outcome), immutable
/// once generated. The signal is the explanatory variable (here, a feature
/// used to predict a financial return) and the outcome is the realized return.
#[derive(Debug, Clone)]
pub struct Dataset {

    pub x : DVector<f64>,

    pub y : DVector<f64>

}

impl Dataset {

    pub fn new(x : DVector<f64>, y : DVector<f64>) -> Result<Self> {
        if x.nrows() == 0 || x.nrows() != y.nrows() {
            return Err(Error::EmptyData);
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    /// Observed (min, max) of the signal, the natural span for a prediction grid.
    pub fn signal_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for x in self.x.iter() {
            lo = lo.min(*x);
            hi = hi.max(*x);
        }
        (lo, hi)
    }

}

/// Settings for the synthetic linear dataset: outcomes are
/// slope*x + intercept + eps with eps ~ N(0, noise_scale), and signals are
/// uniform over the symmetric interval [-signal_bound, signal_bound].
#[derive(Debug, Clone)]
pub struct SynthSettings {

    pub n : usize,

    pub slope : f64,

    pub intercept : f64,

    pub noise_scale : f64,

    pub signal_bound : f64

}

impl Default for SynthSettings {

    fn default() -> Self {
        Self {
            n : 100,
            slope : 0.5,
            intercept : 0.0,
            noise_scale : 0.01,
            signal_bound : 0.05
        }
    }

}

/// Generates a noisy linearly-related dataset from the informed settings.
/// All randomness comes from the caller's generator, so a seeded StdRng
/// makes the dataset reproducible.
pub fn generate<R : Rng>(settings : &SynthSettings, rng : &mut R) -> Result<Dataset> {
    if settings.n == 0 {
        return Err(Error::EmptyData);
    }
    let unif = Uniform::new_inclusive(-settings.signal_bound, settings.signal_bound);
    let x = DVector::from_iterator(settings.n, (0..settings.n).map(|_| unif.sample(rng) ));
    let y = DVector::from_iterator(settings.n, x.iter().map(|x| {
        let eps : f64 = rng.sample(StandardNormal);
        settings.slope * x + settings.intercept + settings.noise_scale * eps
    }));
    Dataset::new(x, y)
}

/// Evenly-spaced grid of len signal values spanning [lo, hi], endpoints
/// included. A single-point grid collapses to lo.
pub fn signal_grid(lo : f64, hi : f64, len : usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (len - 1) as f64;
            (0..len).map(|i| lo + step * i as f64 ).collect()
        }
    }
}
