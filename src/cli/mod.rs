//! CLI entry point for Attache.

pub mod commands;

use clap::{Parser, Subcommand};

/// Attache CLI
#[derive(Parser, Debug)]
#[command(name = "attache", version, about = "Attache — Zoom assistant delegation manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate via the device-authorization flow
    Login,
    /// Show cached session status
    Status,
    /// Clear the cached session
    Logout,
    /// List a user's assistants
    Assistants(AssistantsArgs),
    /// Grant symmetric assistant relationships
    Grant(GrantArgs),
}

/// Arguments for `attache assistants`.
#[derive(Parser, Debug)]
pub struct AssistantsArgs {
    /// Email of the user whose assistants to list
    pub email: String,
}

/// Arguments for `attache grant`.
#[derive(Parser, Debug)]
pub struct GrantArgs {
    /// Target user email
    #[arg(short, long)]
    pub target: String,

    /// Assistant candidate emails, in grant order
    #[arg(required = true)]
    pub assistants: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_login() {
        let cli = Cli::try_parse_from(["attache", "login"]).unwrap();
        assert!(matches!(cli.command, Commands::Login));
    }

    #[test]
    fn parse_status_and_logout() {
        let cli = Cli::try_parse_from(["attache", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
        let cli = Cli::try_parse_from(["attache", "logout"]).unwrap();
        assert!(matches!(cli.command, Commands::Logout));
    }

    #[test]
    fn parse_assistants_requires_email() {
        let cli = Cli::try_parse_from(["attache", "assistants", "boss@x.com"]).unwrap();
        match cli.command {
            Commands::Assistants(args) => assert_eq!(args.email, "boss@x.com"),
            other => panic!("expected Assistants, got {other:?}"),
        }
        assert!(Cli::try_parse_from(["attache", "assistants"]).is_err());
    }

    #[test]
    fn parse_grant_with_candidates() {
        let cli = Cli::try_parse_from([
            "attache",
            "grant",
            "--target",
            "boss@x.com",
            "a@x.com",
            "b@x.com",
        ])
        .unwrap();
        match cli.command {
            Commands::Grant(args) => {
                assert_eq!(args.target, "boss@x.com");
                assert_eq!(args.assistants, vec!["a@x.com", "b@x.com"]);
            }
            other => panic!("expected Grant, got {other:?}"),
        }
    }

    #[test]
    fn parse_grant_requires_at_least_one_assistant() {
        assert!(Cli::try_parse_from(["attache", "grant", "--target", "boss@x.com"]).is_err());
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["attache"]).is_err());
    }
}
