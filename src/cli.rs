use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CompletionsCommand, RotateCommand},
    constants::{MAX_SESSION_DURATION_SECS, MIN_SESSION_DURATION_SECS},
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "awsmfa",
    version,
    about = "Rotate MFA-gated temporary AWS credentials into a profile",
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[arg(
        required = true,
        help = "AWS profile to rotate credentials for",
        long_help = "AWS profile to rotate credentials for.\n\n\
            A profile that shares a subcommand's name must follow `--`, as in `awsmfa -- completions`."
    )]
    pub profile: Option<String>,

    #[arg(
        long,
        env = "AWS_SHARED_CREDENTIALS_FILE",
        value_name = "PATH",
        help = "AWS shared credentials file (default: ~/.aws/credentials)"
    )]
    pub credentials_file: Option<PathBuf>,

    #[arg(
        long,
        env = "AWS_CONFIG_FILE",
        value_name = "PATH",
        help = "AWS config file (default: ~/.aws/config)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long,
        env = "AWS_REGION",
        help = "Region to call STS in (default: from config file, then us-east-1)"
    )]
    pub region: Option<String>,

    #[arg(
        short = 'd',
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(i32).range(MIN_SESSION_DURATION_SECS as i64..=MAX_SESSION_DURATION_SECS as i64),
        help = "Requested session duration in seconds"
    )]
    pub duration: Option<i32>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Generate shell completion scripts for awsmfa")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if let Some(Commands::Completions(cmd)) = self.command {
            cmd.execute();
            return Ok(());
        }

        let profile = self.profile.context("No profile given")?;

        RotateCommand {
            profile,
            credentials_file: self.credentials_file,
            config_file: self.config_file,
            region: self.region,
            duration: self.duration,
        }
        .execute()
        .await
    }
}
