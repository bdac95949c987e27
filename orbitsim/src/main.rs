use orbitsim::{ScenarioConfig, Scenario};
use orbitsim::{run_2d, run_headless};

use clap::Parser;
use anyhow::{Context, Result};
use tracing::Level;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orbitsim", about = "2D satellite orbits around a central body")]
struct Args {
    /// Scenario file, looked up in scenarios/ first, then as a plain path
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Step without a window and log to the console
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Log every frame's satellite positions (headless)
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let config_path = if bundled.exists() { bundled } else { PathBuf::from(file_name) };

    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        // the viewer's LogPlugin installs its own subscriber
        let level = if args.verbose { Level::DEBUG } else { Level::INFO };
        tracing_subscriber::fmt().with_max_level(level).init();

        let report = run_headless(scenario, args.frames)?;
        println!(
            "{} frames, t = {:.0} s, {} satellites left ({} pruned)",
            report.frames,
            report.last.t,
            report.last.satellites.len(),
            report.pruned
        );
    } else {
        run_2d(scenario);
    }

    Ok(())
}
