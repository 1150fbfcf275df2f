//! Command-line configuration for the `blockfall` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::Level;

/// Environment variable naming a log file when `--log` is not given.
pub const LOG_ENV: &str = "BLOCKFALL_LOG";

pub const USAGE: &str = "\
Usage: blockfall [OPTIONS]

Options:
  --seed <u32>         Seed for the piece sequence (default: random)
  --log <path>         Write logs to this file (default: $BLOCKFALL_LOG, else no logging)
  --log-level <level>  trace, debug, info, warn or error (default: info)
  --help               Print this help

Keys: Left/Right move, Down soft drop, Space rotate, P pause, Enter start, R reset, Q quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed seed, or `None` to pick one at startup.
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            log_level: Level::INFO,
            help: false,
        }
    }
}

impl Config {
    /// Parse the process arguments, falling back to [`LOG_ENV`] for the log path.
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let log_env = std::env::var_os(LOG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        parse_args(&args, log_env)
    }
}

/// Parse flags (without the program name). `log_env` is used when `--log` is absent.
pub fn parse_args(args: &[String], log_env: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("blockfall: missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("blockfall: invalid --seed value: {}", v))?;
                config.seed = Some(seed);
            }
            "--log" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("blockfall: missing value for --log"))?;
                config.log_path = Some(PathBuf::from(v));
            }
            "--log-level" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("blockfall: missing value for --log-level"))?;
                config.log_level = parse_level(v)
                    .ok_or_else(|| anyhow!("blockfall: invalid --log-level value: {}", v))?;
            }
            "-h" | "--help" => config.help = true,
            other => {
                return Err(anyhow!("blockfall: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    if config.log_path.is_none() {
        config.log_path = log_env;
    }
    Ok(config)
}

fn parse_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}
