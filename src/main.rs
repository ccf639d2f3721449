use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod context;
mod prover;
mod switches;
mod utils;

use cmd::{DetectArgs, ProveArgs, RegistryArgs};

/// prove-dispatch - maps IDE proof actions onto gnatprove invocations
///
/// Command layout:
///   prove-dispatch prove <all|root|file|line|subp> [-P proj.gpr] [--file F] [--line N] ...
///   prove-dispatch detect   [-P proj.gpr]
///   prove-dispatch registry [--json|--yaml]
///
/// Notes:
///   - prove subp : only dispatches when the selection classifies as a
///     subprogram declaration or body; injects --limit-subp=<decl> itself
///   - registry   : dumps the startup registration surface (templates,
///     switch panels, menu); empty when gnatprove is not on PATH
///
/// Global flags / env:
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///   PROVE_PROJECT   Project file fallback when -P/--project is omitted
///
/// Examples:
///   prove-dispatch prove all -P demo.gpr
///   prove-dispatch prove line -P demo.gpr --file pkg.adb --line 10
///   prove-dispatch prove subp -P demo.gpr --file foo.ads --line 42 \
///       --category subprogram --decl foo.ads:42
///   prove-dispatch prove subp -P demo.gpr --context-file selection.json
///   prove-dispatch registry --json
#[derive(Parser, Debug)]
#[command(
    name = "prove-dispatch",
    version,
    about = "prove-dispatch - gnatprove action dispatcher for IDE integration",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a proof action at the given scope
    Prove(ProveArgs),

    /// Detect code the prover cannot handle
    Detect(DetectArgs),

    /// Dump the registration surface (templates, panels, menu)
    Registry(RegistryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    match cli.command {
        Commands::Prove(args) => cmd::execute_prove(args),
        Commands::Detect(args) => cmd::execute_detect(args),
        Commands::Registry(args) => cmd::execute_registry(args),
    }
}
