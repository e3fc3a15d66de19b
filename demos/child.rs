//! Compare exact and approximate answers to one query on a network definition directory.
//!
//! ```text
//! cargo run --example child -- --network child --query Disease \
//!     --evidence CO2Report=1 --evidence XrayReport=0 --evidence Age=0
//! ```
//!
//! Set `RUST_LOG=pearl=debug` to follow the elimination steps.

use clap::Parser;
use pearl::config::InferenceConfig;
use pearl::evaluation::{Experiment, MethodSummary};
use pearl::inference::{EliminationOrder, Posterior};
use pearl::model::{DirectedModel, NetworkDefinition};
use pearl::{Assignment, PearlError, Result, Variable};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process;


#[derive(Parser, Debug)]
#[command(name = "child")]
#[command(about = "Exact and rejection sampling posteriors on a discrete Bayesian network")]
struct Cli {
    /// Directory holding variables.json and tables.json
    #[arg(long, default_value = "child")]
    network: PathBuf,

    /// Name of the query variable
    #[arg(long, default_value = "Disease")]
    query: String,

    /// Observation as NAME=VALUE, where VALUE is an index or a value name
    #[arg(long = "evidence", value_name = "NAME=VALUE")]
    evidence: Vec<String>,

    /// TOML file with the PAC bound, sample tiers, trials and seed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of trials per method
    #[arg(long)]
    trials: Option<usize>,
}


fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pearl=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => InferenceConfig::load(path)?,
        None => InferenceConfig::default(),
    };
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }

    let model = NetworkDefinition::from_dir(&cli.network)?.build()?;

    let query = *model.lookup_variable(&cli.query)
                      .ok_or_else(|| PearlError::UnknownVariable(cli.query.clone()))?;

    let evidence = if cli.evidence.is_empty() {
        model.evidence_by_name(&[("CO2Report", 1), ("XrayReport", 0), ("Age", 0)])?
    } else {
        parse_evidence(&model, &cli.evidence)?
    };

    println!("P({} | {})", cli.query, describe(&model, &evidence));

    let experiment = Experiment::from_config(&model, query, evidence, &config)
                         .with_orders(vec![EliminationOrder::ByName, EliminationOrder::MinWeight]);

    let results = experiment.run()?;
    for result in results.iter() {
        report(&model, query, result);
    }

    Ok(())
}

fn parse_evidence(model: &DirectedModel, pairs: &[String]) -> Result<Assignment> {
    let mut evidence = Assignment::new();

    for pair in pairs {
        let (name, value) = pair.split_once('=')
                                .ok_or_else(|| PearlError::UnknownVariable(pair.clone()))?;

        let var = *model.lookup_variable(name)
                        .ok_or_else(|| PearlError::UnknownVariable(String::from(name)))?;

        let value = match value.parse::<usize>() {
            Ok(v) => v,
            Err(_) => var.domain()
                         .find(|&v| model.label(&var, v) == Some(value))
                         .ok_or_else(|| PearlError::UnknownVariable(format!("{}={}", name, value)))?,
        };

        evidence.set(&var, value);
    }

    model.check_evidence(&evidence)?;
    Ok(evidence)
}

fn describe(model: &DirectedModel, evidence: &Assignment) -> String {
    evidence.iter()
            .map(|(var, &value)| format!("{}={}", model.name(var), value_name(model, var, value)))
            .collect::<Vec<_>>()
            .join(", ")
}

fn value_name(model: &DirectedModel, var: &Variable, value: usize) -> String {
    model.label(var, value).map_or_else(|| value.to_string(), String::from)
}

fn report(model: &DirectedModel, query: Variable, result: &MethodSummary) {
    let summary = &result.summary;

    println!();
    println!("{}", result.method);
    println!(
        "  trials: {}  failures: {}  mean time: {:?}",
        summary.trials,
        summary.failures,
        summary.mean_elapsed
    );
    match summary.mean_error {
        Some(mse) => println!("  mean squared error: {:.3e}", mse),
        None => println!("  mean squared error: n/a (no accepted samples)"),
    }

    if let Some(posterior) = &result.posterior {
        print_posterior(model, query, posterior);
    }
}

fn print_posterior(model: &DirectedModel, query: Variable, posterior: &Posterior) {
    for (value, p) in posterior.iter() {
        println!("    {:>16}  {:.6}", value_name(model, &query, value), p);
    }
}
