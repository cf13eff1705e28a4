use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use sessrec::cli::commands;
use sessrec::cli::{Cli, Commands};
use sessrec::config::{Config, Paths};
use sessrec::report::ReportGenerator;
use sessrec::shell;
use sessrec::shell::StdinPrompter;
use sessrec::storage::SessionStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // `completions` needs no config or data directories.
    if let Some(Commands::Completions { shell }) = &cli.command {
        println!("{}", commands::completions(*shell)?);
        return Ok(());
    }

    let config = Config::load()?;
    config.apply_color();

    let paths = Paths::new()?;
    let sessions_dir = cli
        .sessions_dir
        .or_else(|| config.session.sessions_dir.clone())
        .unwrap_or_else(|| paths.sessions.clone());
    let reports_dir = cli
        .reports_dir
        .or_else(|| config.session.reports_dir.clone())
        .unwrap_or_else(|| paths.reports.clone());

    let store = SessionStore::with_dir(sessions_dir);
    let generator = ReportGenerator::with_dir(reports_dir)?;

    match cli.command {
        Some(Commands::List) => println!("{}", commands::list(&store, cli.output)?),
        Some(Commands::Show { name }) => println!("{}", commands::show(&store, &name, cli.output)?),
        Some(Commands::Report { name, file }) => {
            println!(
                "{}",
                commands::report(&store, &generator, &name, file.as_deref())?
            );
        }
        Some(Commands::Delete { name, force }) => {
            let message = commands::delete(&store, &mut StdinPrompter, &name, force)?;
            if !message.is_empty() {
                println!("{message}");
            }
        }
        Some(Commands::Completions { .. }) => {}
        None => shell::run(store, generator, &config)?,
    }

    Ok(())
}
