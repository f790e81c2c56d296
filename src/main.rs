use clap::Parser;
use colored::Colorize;

use pomotrack::cli::args::{Cli, Commands};
use pomotrack::cli::commands::{self, Context};
use pomotrack::error::PomoError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomoError> {
    let cli = Cli::parse();
    let format = cli.output;

    if let Commands::Completions { shell, install } = &cli.command {
        println!("{}", commands::completions(shell, *install)?);
        return Ok(());
    }

    let mut ctx = Context::load(cli.home)?;

    let output = match cli.command {
        Commands::Start {
            mode,
            work,
            break_minutes,
        } => commands::start(
            &ctx,
            &mode,
            work.as_deref(),
            break_minutes.as_deref(),
            format,
        )?,
        Commands::Status => commands::status(&ctx, format)?,
        Commands::History { days } => commands::history(&ctx, days, format)?,
        Commands::Stats => commands::stats(&ctx, format)?,
        Commands::Log { mode, minutes } => commands::log_session(&ctx, &mode, minutes, format)?,
        Commands::Goal { hours } => commands::goal(&mut ctx, &hours, format)?,
        Commands::ResetProgress => commands::reset_progress(&ctx, format)?,
        Commands::Config => commands::config(&ctx, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
