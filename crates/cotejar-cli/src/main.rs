//! Cotejador: CLI for Cotejar visual-regression baseline management

use clap::Parser;
use cotejador::output::{
    render_comparison, render_list_json, render_list_text, render_matrix_json, render_matrix_text,
    render_validation_json, render_validation_text,
};
use cotejador::{
    Cli, CliError, CliResult, Commands, CompareArgs, ListArgs, MatrixArgs, OutputFormat,
    UpdateArgs, ValidateArgs,
};
use cotejar::{standard_baselines, BaselineConfig, BaselineManager, BaselineStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let store = BaselineStore::new(&cli.root)?;
    let manager = BaselineManager::new(store);

    match cli.command {
        Commands::Update(ref args) => run_update(&manager, args, cli.quiet),
        Commands::Compare(ref args) => run_compare(&manager, args, cli.quiet),
        Commands::Validate(ref args) => run_validate(&manager, args),
        Commands::List(ref args) => run_list(&manager, args),
        Commands::Matrix(ref args) => run_matrix(&manager, args),
        Commands::Cleanup => run_cleanup(&manager, cli.quiet),
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve a configuration name against the standard matrix
fn resolve_config(name: &str) -> CliResult<BaselineConfig> {
    standard_baselines()
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| {
            CliError::invalid_argument(format!(
                "unknown configuration '{name}'; run `cotejador matrix` to see the standard set"
            ))
        })
}

fn run_update(manager: &BaselineManager, args: &UpdateArgs, quiet: bool) -> CliResult<()> {
    let config = resolve_config(&args.name)?;
    let metadata = manager.update_baseline(&config, &args.image)?;
    if !quiet {
        let hash_prefix: String = metadata.hash.chars().take(12).collect();
        println!("Baseline updated: {} ({hash_prefix})", config.name);
    }
    Ok(())
}

fn run_compare(manager: &BaselineManager, args: &CompareArgs, quiet: bool) -> CliResult<()> {
    let config = resolve_config(&args.name)?;
    let result = manager.compare_with_baseline(&config, &args.image)?;
    if !quiet {
        println!("{}", render_comparison(&result));
    }
    if result.matches {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "visual drift detected for '{}'",
            config.name
        )))
    }
}

fn run_validate(manager: &BaselineManager, args: &ValidateArgs) -> CliResult<()> {
    let report = manager.validate_baselines();
    match args.format {
        OutputFormat::Text => println!("{}", render_validation_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            render_validation_json(&report).map_err(cotejar::CotejarError::from)?
        ),
    }

    // Policy per the error-handling contract: fail only on invalid
    // baselines, warn on missing ones.
    if !report.missing.is_empty() {
        tracing::warn!(count = report.missing.len(), "baseline files missing");
    }
    if report.invalid.is_empty() {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{} baseline(s) modified outside the managed update path",
            report.invalid.len()
        )))
    }
}

fn run_list(manager: &BaselineManager, args: &ListArgs) -> CliResult<()> {
    let entries = manager.list_baselines();
    match args.format {
        OutputFormat::Text => println!("{}", render_list_text(&entries)),
        OutputFormat::Json => println!(
            "{}",
            render_list_json(&entries).map_err(cotejar::CotejarError::from)?
        ),
    }
    Ok(())
}

fn run_matrix(manager: &BaselineManager, args: &MatrixArgs) -> CliResult<()> {
    let configs = standard_baselines();
    match args.format {
        OutputFormat::Text => {
            println!("{}", render_matrix_text(manager, &args.base_url, &configs));
        }
        OutputFormat::Json => println!(
            "{}",
            render_matrix_json(manager, &args.base_url, &configs)
                .map_err(cotejar::CotejarError::from)?
        ),
    }
    Ok(())
}

fn run_cleanup(manager: &BaselineManager, quiet: bool) -> CliResult<()> {
    let removed = manager.cleanup_comparisons()?;
    if !quiet {
        println!("Removed {removed} comparison artifact(s)");
    }
    Ok(())
}
