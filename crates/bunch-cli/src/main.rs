//! bunch-cli — load a route configuration and CSV fixtures, run the
//! simulation, and emit a headway-deviation report.

mod cli;

use std::fs::File;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use bunch_config::RunConfig;
use bunch_core::SimRng;
use bunch_report::{CsvReportWriter, NullReportWriter, ReportObserver, Summary};
use bunch_schedule::{build_route, load_signals_reader, load_stops_reader, seed_fleet};
use bunch_sim::{SchemeParams, SimBuilder};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();
}

fn run(cli: Cli) -> Result<()> {
    // 1. Load and validate the run configuration.
    let config_text = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading configuration file {:?}", cli.config))?;
    let mut config = RunConfig::parse(&config_text)
        .with_context(|| format!("parsing configuration file {:?}", cli.config))?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    log::info!("loaded config for route {:?}, seed {}", config.route_name, config.seed);

    // 2. Ingest the stop/signal CSV fixtures.
    let stops_file = File::open(&cli.stops).with_context(|| format!("opening stops file {:?}", cli.stops))?;
    let stops = load_stops_reader(stops_file).with_context(|| format!("parsing stops file {:?}", cli.stops))?;
    let signals_file =
        File::open(&cli.signals).with_context(|| format!("opening signals file {:?}", cli.signals))?;
    let signals =
        load_signals_reader(signals_file).with_context(|| format!("parsing signals file {:?}", cli.signals))?;
    log::info!("ingested {} stops, {} signals", stops.len(), signals.len());

    // 3. Build the route and seed the fleet from the configuration.
    let mut rng = SimRng::new(config.seed);
    let route = build_route(stops, signals, &config, &mut rng).context("building route")?;
    let (fleet, initial_arrivals) = seed_fleet(&config, &mut rng);
    log::info!("seeded fleet of {} buses", fleet.len());

    let scheme = SchemeParams {
        velocity_avg: config.velocity_avg,
        velocity_sd: config.velocity_sd,
        velocity_limit: config.velocity_limit,
        velocity_low: config.velocity_low,
        dwell_cap: config.time_tmax,
        scheme_threshold: config.time_scheme_threshold,
    };

    // 4. Build the simulator.
    let mut sim = SimBuilder::new(route, fleet, initial_arrivals, scheme, config.seed)
        .peaks(config.peaks.clone())
        .build()
        .context("building simulator")?;

    // 5. Run, reporting through the requested backend.
    let t0 = Instant::now();
    let summary = match &cli.output {
        Some(path) => {
            let writer = CsvReportWriter::new(path)
                .with_context(|| format!("creating report file {path:?}"))?;
            let mut obs = ReportObserver::new(writer);
            sim.run(&mut obs).context("running simulation")?;
            if let Some(e) = obs.take_error() {
                log::warn!("report write error: {e}");
            }
            Summary::new(&sim, obs.bunching_episodes_started(), obs.bunching_episodes_recovered())
        }
        None => {
            let mut obs = ReportObserver::new(NullReportWriter);
            sim.run(&mut obs).context("running simulation")?;
            Summary::new(&sim, obs.bunching_episodes_started(), obs.bunching_episodes_recovered())
        }
    };
    let elapsed = t0.elapsed();

    // 6. Summary.
    summary.log_summary();
    println!("route: {}", config.route_name);
    println!("events processed : {}", summary.events_processed);
    println!("headway deviation: {:.4}", summary.headway_deviation);
    println!(
        "bunching episodes: {} started, {} recovered",
        summary.bunching_episodes_started, summary.bunching_episodes_recovered
    );
    println!("elapsed          : {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
