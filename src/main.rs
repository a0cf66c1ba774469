use odem::{bench_contact_step, bench_run};
use odem::{CsvRecorder, DimensionConfig, Scenario, ScenarioConfig};
use clap::Parser;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Run a spring-contact particle scenario and write CSV telemetry")]
struct Args {
    /// Scenario file; looked up in the crate's scenarios/ directory if not found as given
    #[arg(short, long, default_value = "two_particles.yaml")]
    file_name: String,

    /// Write telemetry here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log collisions for every iteration
    #[arg(short, long)]
    verbose: bool,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let given = PathBuf::from(file_name);
    if given.exists() {
        return given;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn run_scenario<const D: usize>(cfg: &ScenarioConfig, out: Box<dyn Write>) -> Result<()> {
    let mut sim = Scenario::<D>::build_scenario(cfg)?.into_simulation();
    let mut sink = CsvRecorder::new(out);
    let summary = sim.run(&mut sink)?;
    sink.into_inner()?;
    log::info!(
        "{} iterations, final time {}, {} collisions",
        summary.iterations,
        summary.final_time,
        summary.collisions
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.bench {
        bench_contact_step()?;
        bench_run()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match scenario_cfg.engine.dimension {
        DimensionConfig::Two => run_scenario::<2>(&scenario_cfg, out),
        DimensionConfig::Three => run_scenario::<3>(&scenario_cfg, out),
    }
}
