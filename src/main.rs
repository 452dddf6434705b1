mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // 初始化日志系统
    rutest::logger::init_logger();

    let cli = Cli::parse();
    let registry = rutest::samples::builtin_registry();

    match cli.command {
        Commands::Run {
            suite,
            verbose,
            no_color,
            strict_roles,
        } => {
            let stats = cli::run_suite(
                registry,
                cli.config.as_ref(),
                &suite,
                verbose,
                no_color,
                strict_roles,
            )?;
            Ok(match stats {
                Some(stats) if stats.failed == 0 => ExitCode::SUCCESS,
                Some(_) => ExitCode::from(1),
                None => ExitCode::from(2),
            })
        }
        Commands::List => {
            cli::list_suites(&registry);
            Ok(ExitCode::SUCCESS)
        }
    }
}
