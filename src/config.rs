//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "study-timer")]
#[command(about = "A study timer that only runs while your face is in front of the camera")]
#[command(version)]
pub struct Config {
    /// Port to bind the status server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Face detector program (`<program> check`, `<program> detect ...`)
    #[arg(short, long, default_value = "face-detector")]
    pub detector: String,

    /// Capture device handed to the detector
    #[arg(long, default_value = "/dev/video0")]
    pub device: PathBuf,

    /// Tick period in milliseconds
    #[arg(short, long, default_value = "33", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Minimum spacing between detector initialization attempts, in milliseconds
    #[arg(long, default_value = "2000")]
    pub init_retry_ms: u64,

    /// Log detection geometry through the overlay hook
    #[arg(long)]
    pub overlay: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn init_retry(&self) -> Duration {
        Duration::from_millis(self.init_retry_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["study-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.device, PathBuf::from("/dev/video0"));
        assert_eq!(config.tick_interval(), Duration::from_millis(33));
        assert_eq!(config.init_retry(), Duration::from_secs(2));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Config::try_parse_from(["study-timer", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "study-timer", "-v", "--detector", "/opt/bin/faces", "--device", "/dev/video2", "-i", "100",
        ])
        .unwrap();
        assert_eq!(config.detector, "/opt/bin/faces");
        assert_eq!(config.device, PathBuf::from("/dev/video2"));
        assert_eq!(config.interval_ms, 100);
        assert_eq!(config.log_level(), "debug");
    }
}
