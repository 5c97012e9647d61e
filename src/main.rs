use clap::Parser;
use std::env;
use tape_bf::commands::run::{self, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(long = "verbose")]
    verbose: bool,

    /// Show version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::SetTrue)]
    version: bool,

    #[command(flatten)]
    run: RunArgs,
}

fn setup_logging(verbose: bool) {
    // RUST_LOG wins; otherwise warnings only unless --verbose
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();
    if cli.version {
        println!("bf v{}", env!("CARGO_PKG_VERSION"));
        return;
    }
    setup_logging(cli.verbose);

    let code = run::run(&program, cli.run);
    std::process::exit(code);
}
