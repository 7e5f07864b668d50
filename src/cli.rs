// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Task inputs are flattened in; output and logging flags sit beside them.

use asc_deploy::config::InputArgs;
use asc_deploy::output::OutputMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asc-deploy")]
#[command(about = "Blue/green deployments for Azure Spring Cloud apps")]
pub struct Cli {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Parameter file (defaults to asc-deploy.yml in the working directory, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level, including request and response bodies
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
