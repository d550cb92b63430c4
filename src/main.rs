use anyhow::Result;
use clap::{CommandFactory, Parser};

use devsetup_cli::cli::{self, Cli};
use devsetup_cli::commands;
use devsetup_cli::logging::Logger;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.command {
        cli::Command::Apply => {
            let log = Logger::new(args.verbose, "apply");
            commands::apply::run(&args.global, &log)
        }
        cli::Command::Check => {
            let log = Logger::new(args.verbose, "check");
            commands::check::run(&args.global, &log)
        }
        cli::Command::Completions(opts) => {
            clap_complete::generate(
                opts.shell,
                &mut Cli::command(),
                "devsetup",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        cli::Command::Version => {
            let version = option_env!("DEVSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("devsetup {version}");
            Ok(())
        }
    }
}
