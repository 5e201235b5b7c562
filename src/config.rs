//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::registry::{DEFAULT_BRANCH, NewSource};

/// Command line configuration for docsview.
#[derive(Debug, Clone, Parser)]
#[command(name = "docsview", version, about, long_about = None)]
pub struct Config {
    /// Source registry file
    #[arg(
        long,
        global = true,
        env = "DOCSVIEW_REGISTRY",
        default_value = "docs_sources.json"
    )]
    pub registry: PathBuf,

    /// GitHub API base URL
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: u64,

    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Viewer commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render one address to an HTML file
    Open {
        /// Address to open, e.g. /s/docs/guide/setup
        #[arg(default_value = "/")]
        address: String,

        /// Output HTML file
        #[arg(short, long, default_value = "docsview.html")]
        output: PathBuf,

        /// Open the written page in the default browser
        #[arg(long)]
        launch: bool,
    },

    /// Navigate interactively, following links by number
    Browse {
        /// Address to start at
        #[arg(default_value = "/")]
        address: String,

        /// HTML file rewritten on every navigation
        #[arg(short, long, default_value = "docsview.html")]
        output: PathBuf,
    },

    /// Manage registered sources
    #[command(subcommand)]
    Sources(SourcesCommand),
}

/// Source registry commands.
#[derive(Debug, Clone, Subcommand)]
pub enum SourcesCommand {
    /// List registered sources
    List,
    /// Register a GitHub repository as source
    Add(AddSource),
}

/// Registration arguments.
#[derive(Debug, Clone, Args)]
pub struct AddSource {
    /// Display name (defaults to owner/repo)
    #[arg(long, default_value = "")]
    pub name: String,

    /// GitHub repository URL, e.g. https://github.com/owner/repo
    #[arg(long)]
    pub url: String,

    /// Branch to read documents from
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Directory inside the repository holding the documents
    #[arg(long, default_value = "")]
    pub subdir: String,

    /// Access token for private repositories
    #[arg(long, env = "DOCSVIEW_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,
}

impl AddSource {
    /// Converts arguments into registration form input.
    pub fn to_form(&self) -> NewSource {
        NewSource {
            name: self.name.clone(),
            repo_url: self.url.clone(),
            branch: self.branch.clone(),
            subdir: self.subdir.clone(),
            token: self.token.clone(),
        }
    }
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API URL is not an http(s) URL or the timeout is
    /// zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("API URL must start with http:// or https://: {}", self.api_url);
        }

        if self.timeout == 0 {
            bail!("Timeout must be at least one second");
        }

        Ok(())
    }

    /// Request timeout as duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        Config::try_parse_from(args).expect("Should parse arguments")
    }

    #[test]
    fn test_config_defaults() {
        // Arrange & Act
        let config = config(&["docsview", "open"]);

        // Assert
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT));
        assert!(!config.verbose);
        match config.command {
            Command::Open {
                address,
                output,
                launch,
            } => {
                assert_eq!(address, "/");
                assert_eq!(output, PathBuf::from("docsview.html"));
                assert!(!launch);
            }
            other => panic!("Expected open command, got {:?}", other),
        }
    }

    #[test]
    fn test_config_global_flags_after_subcommand() {
        let config = config(&[
            "docsview",
            "browse",
            "/s/docs/",
            "--registry",
            "my.json",
            "-v",
        ]);

        assert_eq!(config.registry, PathBuf::from("my.json"));
        assert!(config.verbose);
        assert!(matches!(config.command, Command::Browse { ref address, .. } if address == "/s/docs/"));
    }

    #[test]
    fn test_config_sources_add() {
        // Act
        let config = config(&[
            "docsview",
            "sources",
            "add",
            "--url",
            "https://github.com/acme/handbook",
            "--subdir",
            "docs",
        ]);

        // Assert
        let Command::Sources(SourcesCommand::Add(args)) = config.command else {
            panic!("Expected sources add command");
        };
        let form = args.to_form();
        assert_eq!(form.repo_url, "https://github.com/acme/handbook");
        assert_eq!(form.branch, DEFAULT_BRANCH);
        assert_eq!(form.subdir, "docs");
        assert_eq!(form.name, "");
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = config(&["docsview", "sources", "list"]);
        config.api_url = "ftp://example.com".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = config(&["docsview", "open", "--timeout", "0"]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults_ok() {
        assert!(config(&["docsview", "open"]).validate().is_ok());
    }
}
