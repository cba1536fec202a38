//! Entry point for scour, a section-based, pluggable static-analysis
//! runner for the terminal.
//!
//! The binary resolves configuration from built-in defaults, the user
//! `.scourrc`, and the command line, collects the analyzers each section
//! enables, completes missing required settings interactively, and writes
//! the merged configuration back if asked to.

mod analyzers;
mod config;
mod constants;
mod filler;
mod log;

use anyhow::Result;
use colored::Colorize;

use analyzers::AnalyzerKind;
use config::resolve::ResolveError;
use config::writer::ConfWriter;
use config::{Resolver, SavePlan};
use log::LogPrinter;

fn main() {
    // The token list is passed down explicitly; nothing below reaches
    // for the process arguments itself.
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&tokens) {
        if let Some(ResolveError::Cli(cli_err)) = err.downcast_ref::<ResolveError>() {
            eprintln!("{} {}", "error:".red().bold(), cli_err);
            eprintln!("{}", config::cli::usage().dimmed());
            std::process::exit(constants::EXIT_USAGE);
        }
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(tokens: &[String]) -> Result<()> {
    let resolver = Resolver::load()?;
    let mut resolution = resolver.resolve(tokens)?;

    let mut printer: Box<dyn LogPrinter> = match resolution.sections.get(constants::DEFAULT_SECTION)
    {
        Some(section) => log::from_section(section)?,
        None => Box::new(log::ConsolePrinter::new(log::LogLevel::Warn)),
    };

    let registry = analyzers::AnalyzerRegistry::with_builtins();
    let mut summary: Vec<(String, usize, usize, usize)> = Vec::new();

    for (name, section) in resolution.sections.iter_mut() {
        let local = registry.collect_for_section(section, AnalyzerKind::Local)?;
        let global = registry.collect_for_section(section, AnalyzerKind::Global)?;
        let mut enabled = local.clone();
        enabled.extend(global.iter().cloned());

        if !filler::missing_settings(section, &enabled).is_empty() {
            let mut section_filler = filler::SectionFiller::new()?;
            let added = section_filler.fill_section(section, &enabled)?;
            printer.debug(&format!(
                "section [{}]: {} setting(s) completed interactively",
                name, added
            ));
        }

        for analyzer in &enabled {
            printer.debug(&format!(
                "[{}] {}: {}",
                name,
                analyzer.name(),
                analyzer.description()
            ));
        }
        for setting in section.iter() {
            printer.debug(&format!(
                "[{}] {} = {} ({})",
                name, setting.key, setting.value, setting.origin
            ));
        }
        summary.push((name.clone(), section.len(), local.len(), global.len()));
    }

    match resolution.save_plan() {
        SavePlan::Write(target) => {
            ConfWriter::new(&target).write_sections(&resolution.sections)?;
            println!(
                "{} configuration written to {}",
                "saved:".green().bold(),
                target.display()
            );
        }
        SavePlan::Skip => {}
    }

    println!(
        "{} resolved {} section(s) from {}",
        constants::APP_NAME.bold().cyan(),
        summary.len(),
        resolution.config_path.display()
    );
    for (name, settings, local, global) in &summary {
        println!(
            "  {} {} setting(s), {} local + {} global analyzer(s)",
            format!("[{}]", name).bold(),
            settings,
            local,
            global
        );
    }
    Ok(())
}
