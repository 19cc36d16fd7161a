//! Configuration and CLI argument handling for the host process

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timer-keeper")]
#[command(about = "A persisted countdown timer store with a one-second tick scheduler")]
#[command(version)]
pub struct Config {
    /// Directory holding the stored timer collection
    #[arg(short, long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Shell command run when a timer completes (e.g. plays a sound)
    #[arg(long)]
    pub on_complete: Option<String>,

    /// Scheduler period in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Restart the scheduler for timers stored as running
    #[arg(long)]
    pub resume: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Scheduler period, never below one millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["timer-keeper"]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert!(config.on_complete.is_none());
        assert!(!config.resume);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "timer-keeper",
            "--data-dir",
            "/tmp/timers",
            "--on-complete",
            "paplay done.oga",
            "--tick-ms",
            "0",
            "--resume",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.on_complete.as_deref(), Some("paplay done.oga"));
        assert_eq!(config.tick_period(), Duration::from_millis(1));
        assert!(config.resume);
        assert_eq!(config.log_level(), "debug");
    }
}
