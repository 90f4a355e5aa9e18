use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::process::Command;

use tierlog::config::{load_config, LoggingConfig};
use tierlog::process::spawn_logged;
use tierlog::{LogLevel, Logger};

#[derive(Parser)]
#[command(name = "tierlog-cli")]
#[command(about = "Run commands with their output routed through tierlog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command, logging stdout as INFO and stderr as WARN
    Run {
        /// Console threshold (debug, info, warn, error, panic)
        #[arg(short, long)]
        level: Option<String>,

        /// Append log lines to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Load settings from a TOML or JSON file; flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name used to tag forwarded lines (defaults to the program name)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        argv: Vec<String>,
    },
    /// Validate a configuration file
    CheckConfig { path: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            level,
            log_file,
            config,
            name,
            argv,
        } => run(level, log_file, config, name, argv).await,
        Commands::CheckConfig { path } => check_config(path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    level: Option<String>,
    log_file: Option<PathBuf>,
    config: Option<PathBuf>,
    name: Option<String>,
    argv: Vec<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut settings = match config {
        Some(path) => load_config(&path)?,
        None => LoggingConfig::default(),
    };
    if let Some(level) = level {
        settings.level = level.parse::<LogLevel>()?;
    }
    if log_file.is_some() {
        settings.file = log_file;
    }

    let logger = Arc::new(Logger::from_config(&settings)?);

    let (program, args) = argv.split_first().ok_or("no command given")?;
    let name = name.unwrap_or_else(|| program.clone());
    let mut command = Command::new(program);
    command.args(args);

    logger.debug(format_args!("Running {}", argv.join(" ")));
    let (mut child, pipe) = spawn_logged(logger.clone(), command, &name)?;
    let status = child.wait().await?;
    pipe.wait().await;

    let code = status.code().unwrap_or(1);
    if status.success() {
        logger.info(format_args!("[{name}] exited successfully"));
    } else {
        logger.error(format_args!("[{name}] exited with {status}"));
    }
    logger.close_file();

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

fn check_config(path: PathBuf) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(&path)?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}
