//! # CLI Interface
//!
//! Defines the command-line argument structure for `starledger-node` using
//! `clap` derive. Supports four subcommands: `run`, `keygen`, `sign`, and
//! `version`.

use clap::{Parser, Subcommand};

use starledger_protocol::config::{DEFAULT_API_PORT, DEFAULT_METRICS_PORT, VERIFICATION_WINDOW};

/// Starledger registry node.
///
/// Serves the star registry REST API over an in-memory hash-linked ledger
/// and exposes Prometheus metrics.
#[derive(Parser, Debug)]
#[command(
    name = "starledger-node",
    about = "Starledger star registry node",
    version,
    propagate_version = true
)]
pub struct StarledgerCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the registry node.
    Run(RunArgs),
    /// Generate a fresh wallet keypair and print its address.
    Keygen,
    /// Sign a challenge message with a wallet secret key.
    Sign(SignArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Address the API and metrics listeners bind to.
    #[arg(long, env = "STARLEDGER_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port for the REST API.
    #[arg(long, env = "STARLEDGER_API_PORT", default_value_t = DEFAULT_API_PORT)]
    pub api_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "STARLEDGER_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// How long a challenge message stays valid, in seconds.
    #[arg(
        long,
        env = "STARLEDGER_VERIFICATION_WINDOW_SECS",
        default_value_t = VERIFICATION_WINDOW.as_secs()
    )]
    pub verification_window_secs: u64,

    /// Log output format: `pretty` or `json`.
    #[arg(long, env = "STARLEDGER_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Hex-encoded Ed25519 secret key (32 bytes).
    ///
    /// Prefer the environment variable over the flag so the key stays out of
    /// shell history.
    #[arg(long, env = "STARLEDGER_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Challenge message returned by `POST /requestValidation`.
    #[arg(long)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        StarledgerCli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = StarledgerCli::try_parse_from(["starledger-node", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.api_port, DEFAULT_API_PORT);
        assert_eq!(args.metrics_port, DEFAULT_METRICS_PORT);
        assert_eq!(args.verification_window_secs, 300);
        assert_eq!(args.log_format, "pretty");
    }

    #[test]
    fn sign_requires_message() {
        let res = StarledgerCli::try_parse_from([
            "starledger-node",
            "sign",
            "--secret-key",
            "00",
        ]);
        assert!(res.is_err());
    }
}
