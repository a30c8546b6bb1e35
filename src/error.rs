use thiserror::Error;

/// Precondition violations fail fast with one of these variants rather than
/// letting NaNs propagate through the pipeline. The only tolerated numerical
/// degradation is minimizer non-convergence, which is reported as a warning
/// with the best value found (see decision::optimal_prediction).
#[derive(Debug, Error)]
pub enum Error {

    #[error("empty observation set: at least one (signal, outcome) pair is required")]
    EmptyData,

    #[error("posterior trace is empty after burn-in (draws = {draws}, burn = {burn})")]
    EmptyTrace { draws : usize, burn : usize },

    #[error("predictive outcome population is empty")]
    EmptyPopulation,

    #[error("loss coefficient alpha must be positive (got {0})")]
    NonPositiveAlpha(f64),

    #[error("number of posterior draws must be positive")]
    NoDraws,

    #[error("least-squares system is singular")]
    SingularDesign,

    #[error("expected-loss minimization failed: {0}")]
    Minimize(String),

}

pub type Result<T> = std::result::Result<T, Error>;
