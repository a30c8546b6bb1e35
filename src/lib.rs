/// Synthetic linear return datasets and the evenly-spaced signal grid over
/// which predictions are evaluated.
pub mod data;

/// Prior specification (explicit configuration structs, independent of any
/// sampler API) and the unnormalized log-posterior of the linear return model.
pub mod prob;

/// Estimator that yields the full posterior via simulation
/// (random-walk Metropolis-Hastings), plus trace summaries.
pub mod sim;

/// Evaluating the cost of decisions over the posterior-predictive
/// distribution: the asymmetric sign loss and the expected-loss minimizer
/// that derives Bayes-optimal point predictions.
pub mod decision;

/// Ordinary least-squares baseline, used as the classical reference
/// prediction against the Bayes-optimal one.
pub mod fit;

mod error;

pub use error::{Error, Result};
