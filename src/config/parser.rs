//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::threshold::Threshold,
    models::RunConfig,
};
use std::time::Duration;

/// Configuration parser that combines CLI arguments with environment variables
///
/// Precedence: built-in defaults < environment variables < CLI flags.
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<RunConfig> {
        // Start with defaults; the target URL has no default and must come
        // from SERVICE_URL or --url
        let mut config = RunConfig::new("");

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config)?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut RunConfig) -> Result<()> {
        if let Some(ref url) = self.cli.url {
            config.base_url = url.clone();
        }

        if let Some(virtual_users) = self.cli.virtual_users {
            config.virtual_users = virtual_users;
        }

        if let Some(duration) = self.cli.duration {
            config.duration = duration;
        }

        if let Some(think_time) = self.cli.think_time {
            config.think_time = think_time;
        }

        if let Some(timeout) = self.cli.timeout {
            config.request_timeout = Duration::from_secs(timeout);
        }

        if !self.cli.thresholds.is_empty() {
            config.thresholds = self
                .cli
                .thresholds
                .iter()
                .map(|raw| raw.parse::<Threshold>())
                .collect::<Result<Vec<_>>>()?;
        }

        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // Verbose, debug, and JSON output are CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.json_output = self.cli.json;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: vus={}, duration={}, think_time={}, timeout={}s",
                config.virtual_users,
                humantime::format_duration(config.duration),
                humantime::format_duration(config.think_time),
                config.request_timeout.as_secs()
            );
        }

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<RunConfig> {
    ConfigParser::new(cli).parse()
}

/// Human-readable one-screen summary of a configuration
pub fn display_config_summary(config: &RunConfig) -> String {
    let thresholds: Vec<String> = config.thresholds.iter().map(|t| t.to_string()).collect();
    format!(
        "  Target:        {}\n  Virtual users: {}\n  Duration:      {}\n  Think-time:    {}\n  Timeout:       {}s\n  Thresholds:    {}",
        config.base_url,
        config.virtual_users,
        humantime::format_duration(config.duration),
        humantime::format_duration(config.think_time),
        config.request_timeout.as_secs(),
        thresholds.join(", "),
    )
}
