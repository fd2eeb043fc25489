use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sortplot::app::show_beta;
use sortplot::cli::Args;
use sortplot::pipeline::run_session;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every selected pipeline succeeded.
fn run() -> Result<bool> {
    let args = Args::parse();
    let cfg = args.load_config().context("loading configuration")?;
    log::debug!("base directory: {}", cfg.base_dir.display());

    let report = run_session(&args.request(), &cfg);
    for path in &report.outputs {
        println!("{}", path.display());
    }

    if let Some(points) = report.display {
        show_beta(points, cfg.beta.clone(), Some(cfg.beta_input())).context("opening the β viewer")?;
    }

    Ok(report.failures.is_empty())
}
