use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Table};
use rutest::config::{ConfigLoader, RutestConfig};
use rutest::runner::ConsoleReporter;
use rutest::suite::{Role, RoleClassifier, SuiteDefinition};
use rutest::{Launcher, Statistics, SuiteRegistry};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径（默认自动查找 rutest.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 运行一个已注册的测试套件
    Run {
        /// 套件名称
        suite: String,

        /// 显示每个测试的耗时
        #[arg(short, long)]
        verbose: bool,

        /// 关闭颜色输出
        #[arg(long)]
        no_color: bool,

        /// 拒绝带有多个角色标记的方法
        #[arg(long)]
        strict_roles: bool,
    },
    /// 列出所有已注册的套件及其方法
    List,
}

fn load_config(path: Option<&PathBuf>) -> Result<RutestConfig> {
    let config = match path {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load()?,
    };
    Ok(config)
}

/// 运行套件；返回 `None` 表示套件无法运行
pub fn run_suite(
    registry: SuiteRegistry,
    config_path: Option<&PathBuf>,
    suite: &str,
    verbose: bool,
    no_color: bool,
    strict_roles: bool,
) -> Result<Option<Statistics>> {
    let config = load_config(config_path)?;

    // CLI 参数优先于配置文件
    let verbose = verbose || config.report.verbose;
    let color = config.report.color && !no_color;
    let strict_roles = strict_roles || config.discovery.strict_roles;

    ConsoleReporter::set_color(color);
    let launcher =
        Launcher::new(registry, ConsoleReporter::new(verbose)).with_strict_roles(strict_roles);

    match launcher.launch(suite) {
        Ok(stats) => Ok(Some(stats)),
        Err(e) => {
            eprintln!("{}: {}", "The suite could not be run".red().bold(), e);
            Ok(None)
        }
    }
}

/// 以表格形式列出套件
pub fn list_suites(registry: &SuiteRegistry) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Suite", "Setup", "Test", "Teardown"]);

    for suite in registry.iter() {
        table.add_row(suite_row(suite));
    }

    println!("{}", table);
}

fn suite_row(suite: &dyn SuiteDefinition) -> Vec<Cell> {
    let roles = RoleClassifier::classify(suite);
    let mut row = vec![Cell::new(suite.name()).add_attribute(Attribute::Bold)];
    for role in Role::ALL {
        row.push(Cell::new(roles.for_role(role).join("\n")));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use rutest::samples::builtin_registry;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from(["rutest", "run", "calculator", "--verbose", "--strict-roles"]);
        match cli.command {
            Commands::Run {
                suite,
                verbose,
                no_color,
                strict_roles,
            } => {
                assert_eq!(suite, "calculator");
                assert!(verbose);
                assert!(!no_color);
                assert!(strict_roles);
            }
            Commands::List => panic!("Expected run command"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_list_with_config() {
        let cli = Cli::parse_from(["rutest", "list", "--config", "custom.toml"]);
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_suite_row() {
        let registry = builtin_registry();
        let row = suite_row(registry.resolve("calculator").unwrap());
        assert_eq!(row.len(), 4);
        assert_eq!(row[2].content(), "adds\ndivides\nstarts_fresh");
    }
}
