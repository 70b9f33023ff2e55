//! Simulator Binary Entry Point
//!
//! Wires the layers together for one simulation run: parse and validate the
//! arguments, generate a block table for the selected partition scheme, run
//! exactly one deallocation policy over it, and print the resulting table,
//! latency trace summary, and statistics. With `--json` the final state is
//! emitted as JSON instead of text.
//!
//! The engine's per-event narration is logged at debug level; run with
//! `RUST_LOG=debug` to watch each merge as it happens.

use std::process;

mod args;
mod render;

use adapters_statistics::SimulationReport;
use adapters_table_generation::{generate_dynamic_table, generate_fixed_table, CasePreset};
use args::{SchemeArg, SimulatorArgs};
use clap::Parser;
use entities_block_table::BlockTable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use usecases_deallocation::{
    Case1Coalescer, Case2Coalescer, Case3Coalescer, DeallocationOutcome, DeallocationStrategy,
    FixedDeallocator, LatencyModel, SimulationConfig,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate(
    args: &SimulatorArgs,
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<BlockTable, usecases_deallocation::ConfigError> {
    match args.scheme {
        SchemeArg::Fixed => generate_fixed_table(config, rng),
        SchemeArg::Case1 => generate_dynamic_table(config, CasePreset::Case1, rng),
        SchemeArg::Case2 => generate_dynamic_table(config, CasePreset::Case2, rng),
        SchemeArg::Case3 => generate_dynamic_table(config, CasePreset::Case3, rng),
    }
}

fn run_policy(
    args: &SimulatorArgs,
    table: &mut BlockTable,
    model: &LatencyModel,
) -> DeallocationOutcome {
    let strategy: Box<dyn DeallocationStrategy> = match args.scheme {
        SchemeArg::Fixed => Box::new(FixedDeallocator::new()),
        SchemeArg::Case1 => Box::new(Case1Coalescer::new(args.one_iter)),
        SchemeArg::Case2 => Box::new(Case2Coalescer::new(args.remove_null)),
        SchemeArg::Case3 => Box::new(Case3Coalescer::new(
            args.confirm,
            args.freeing_latency
                .unwrap_or(Case3Coalescer::DEFAULT_FREEING_LATENCY),
        )),
    };
    strategy.run(table, model)
}

fn main() {
    init_tracing();

    let args = SimulatorArgs::parse();
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let config = args.config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    let model = match config.latency_model() {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut table = match generate(&args, &config, &mut rng) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(
        scheme = args.scheme().name(),
        num_jobs = config.num_jobs,
        max_memory = config.max_memory,
        "starting simulation"
    );

    if !args.json {
        println!("Initial table:");
        print!("{}", render::render_table(&table));
        println!();
    }

    let outcome = run_policy(&args, &mut table, &model);
    let report = SimulationReport::new(&table, &outcome.trace);

    if args.json {
        let value = serde_json::json!({
            "scheme": args.scheme().name(),
            "table": table.blocks(),
            "trace": outcome.trace.samples(),
            "blocks_deallocated": outcome.blocks_deallocated,
            "report": report,
        });
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Final table:");
        print!("{}", render::render_table(&table));
        println!();
        print!("{}", render::render_report(&report, outcome.blocks_deallocated));
    }
}
