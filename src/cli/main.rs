use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use structopt::StructOpt;

use bayes_decision::data::{self, SynthSettings};
use bayes_decision::decision;
use bayes_decision::fit::Ols;
use bayes_decision::prob::{LinearModel, RegressionPriors};
use bayes_decision::sim::{Metropolis, Settings};

/// Runs the whole pipeline over a synthetic dataset: draw observations,
/// sample the posterior, burn the chain prefix, derive the Bayes-optimal
/// prediction at each grid signal and compare against the OLS baseline.
/// Output is a CSV table (signal, bayes, ols); the posterior summary goes
/// to stderr.
#[derive(Debug, StructOpt)]
#[structopt(name = "bayes-decision")]
struct Opt {

    /// Number of synthetic observations
    #[structopt(long, default_value = "100")]
    n : usize,

    /// True slope of the generating line
    #[structopt(long, default_value = "0.5")]
    slope : f64,

    /// True intercept of the generating line
    #[structopt(long, default_value = "0.0")]
    intercept : f64,

    /// Scale of the generating observation noise
    #[structopt(long, default_value = "0.01")]
    noise_scale : f64,

    /// Total Metropolis-Hastings draws
    #[structopt(long, default_value = "100000")]
    draws : usize,

    /// Fraction of the chain discarded as burn-in
    #[structopt(long, default_value = "0.2")]
    burn_frac : f64,

    /// Loss coefficient of the sign-mismatch penalty
    #[structopt(long, default_value = "100.0")]
    alpha : f64,

    /// Number of signal grid points spanning the observed range
    #[structopt(long, default_value = "50")]
    grid : usize,

    /// Seed shared by data generation, sampling and predictive noise
    #[structopt(long, default_value = "42")]
    seed : u64,

    /// JSON file with the prior configuration (defaults to the
    /// weakly-informative reference priors)
    #[structopt(long, parse(from_os_str))]
    priors : Option<PathBuf>,

    /// CSV output path (stdout when absent)
    #[structopt(long, parse(from_os_str))]
    out : Option<PathBuf>

}

#[derive(Debug, Serialize)]
struct Row {

    signal : f64,

    bayes : f64,

    ols : f64

}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let priors : RegressionPriors = match &opt.priors {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening prior configuration {}", path.display()) )?;
            serde_json::from_reader(file).context("parsing prior configuration")?
        },
        None => RegressionPriors::default()
    };

    let mut rng = StdRng::seed_from_u64(opt.seed);
    let synth = SynthSettings {
        n : opt.n,
        slope : opt.slope,
        intercept : opt.intercept,
        noise_scale : opt.noise_scale,
        ..Default::default()
    };
    let dataset = data::generate(&synth, &mut rng)?;
    let (lo, hi) = dataset.signal_range();
    let grid = data::signal_grid(lo, hi, opt.grid);

    let ols = Ols::estimate(&dataset)?;
    info!("ols baseline: intercept {:.5}, slope {:.5}", ols.intercept(), ols.slope());

    let burn = (opt.draws as f64 * opt.burn_frac) as usize;
    let model = LinearModel::new(priors, dataset);
    let sampler = Metropolis::new(model, Settings {
        draws : opt.draws,
        adapt : burn,
        progress : true,
        ..Default::default()
    });
    let trace = sampler.sample(&mut rng)?.burn(burn)?;
    eprintln!("{}", trace.summary()?);

    let bayes = decision::optimal_predictions(&trace, &grid, opt.alpha, &mut rng)?;
    let baseline = ols.predict(&grid);

    let out : Box<dyn io::Write> = match &opt.out {
        Some(path) => Box::new(File::create(path)
            .with_context(|| format!("creating {}", path.display()) )?),
        None => Box::new(io::stdout())
    };
    let mut wtr = csv::Writer::from_writer(out);
    for ((signal, bayes), ols) in grid.iter().zip(bayes.iter()).zip(baseline.iter()) {
        wtr.serialize(Row { signal : *signal, bayes : *bayes, ols : *ols })?;
    }
    wtr.flush()?;
    Ok(())
}
