//! Zen Fishing Headless Reeling Simulator
//!
//! Plays reeling encounters with a bot angler, without any UI, and reports
//! win rates and pacing for balance analysis. Uses the same
//! `ReelingEncounter` as the real game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N         Encounters to simulate (default: 1000)
//!   --seed N         RNG seed (default: random)
//!   --rod ID         Rod id 0-3 (default: 0, Bamboo)
//!   --profile NAME   precision | touch (default: precision)
//!   --bot NAME       tracking | idle | hold (default: tracking)
//!   --weight W       Fix the fish weight instead of rolling fish
//!   --calm           Fish never leaves its starting spot
//!   --max-ticks N    Tick budget per encounter (default: 20000)
//!   --json           Print the report as JSON
//!   --verbose        Per-run lines and debug logging
//!   --quiet          Report only

use std::process;
use std::str::FromStr;

use zen_fishing::build_info;
use zen_fishing::reeling::InputProfile;
use zen_fishing::simulator::{run_simulation, BotPolicy, SimConfig};

struct CliOptions {
    sim: SimConfig,
    json: bool,
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("{flag} requires a valid value");
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions {
        sim: SimConfig::default(),
        json: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                options.sim.num_runs = parse_value(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                options.sim.seed = Some(parse_value(&args, i, "--seed"));
            }
            "--rod" => {
                i += 1;
                options.sim.rod_id = parse_value(&args, i, "--rod");
            }
            "--profile" => {
                i += 1;
                let name: String = parse_value(&args, i, "--profile");
                options.sim.input_profile = InputProfile::from_name(&name).unwrap_or_else(|| {
                    eprintln!("Unknown input profile: {name}");
                    process::exit(1);
                });
            }
            "--bot" => {
                i += 1;
                let name: String = parse_value(&args, i, "--bot");
                options.sim.policy = match name.as_str() {
                    "tracking" => BotPolicy::default(),
                    "idle" => BotPolicy::Idle,
                    "hold" => BotPolicy::HoldAlways,
                    other => {
                        eprintln!("Unknown bot: {other}");
                        process::exit(1);
                    }
                };
            }
            "--weight" => {
                i += 1;
                options.sim.fish_weight = Some(parse_value(&args, i, "--weight"));
            }
            "--calm" => options.sim.calm_fish = true,
            "--max-ticks" => {
                i += 1;
                options.sim.max_ticks_per_run = parse_value(&args, i, "--max-ticks");
            }
            "--json" => options.json = true,
            "--verbose" => options.sim.verbosity = 2,
            "--quiet" => options.sim.verbosity = 0,
            "--version" | "-V" => {
                println!("{}", build_info::version_line());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn print_usage() {
    eprintln!(
        "Zen Fishing Headless Reeling Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N         Encounters to simulate (default: 1000)\n\
         \x20 --seed N         RNG seed (default: random)\n\
         \x20 --rod ID         Rod id 0-3 (default: 0)\n\
         \x20 --profile NAME   precision | touch (default: precision)\n\
         \x20 --bot NAME       tracking | idle | hold (default: tracking)\n\
         \x20 --weight W       Fix the fish weight instead of rolling fish\n\
         \x20 --calm           Fish never leaves its starting spot\n\
         \x20 --max-ticks N    Tick budget per encounter (default: 20000)\n\
         \x20 --json           Print the report as JSON\n\
         \x20 --verbose        Per-run lines and debug logging\n\
         \x20 --quiet          Report only\n\
         \x20 --version, -V    Show build information\n\
         \x20 --help, -h       Show this help"
    );
}

fn main() {
    let options = parse_args();

    let default_filter = match options.sim.verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let report = run_simulation(&options.sim);

    if options.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}
