//! openapi-fix: clean an OpenAPI document before running the generator.
//!
//! Usage:
//!   openapi-fix <input> <output> [--check]
//!
//! Folds dotted duplicate schemas into their dot-free twins and collapses
//! `type` arrays. Input may be JSON or YAML (by extension); output is JSON.

use anyhow::{bail, Context};
use cloud_api_sdk::openapi::{fix_document, load_document, write_document, FixReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("openapi-fix {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let check_only = args.iter().any(|a| a == "--check");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if positional.len() != 2 {
        print_usage();
        std::process::exit(2);
    }
    let input = PathBuf::from(positional[0]);
    let output = PathBuf::from(positional[1]);

    let mut doc = load_document(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let report = fix_document(&mut doc);
    print_report(&report);

    if !report.is_clean() {
        bail!(
            "{} duplicate schema pair(s) remain after fixing",
            report.remaining_duplicates.len()
        );
    }
    if check_only {
        return Ok(());
    }

    write_document(&output, &doc)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

const USAGE: &str = r#"openapi-fix: normalize an OpenAPI document for code generation

USAGE:
    openapi-fix <INPUT> <OUTPUT> [--check]

OPTIONS:
    --check       Report only, do not write OUTPUT
    -h, --help    Show this help message
    -V, --version Show version information

ENVIRONMENT:
    RUST_LOG      Log filter (default: info)"#;

fn print_usage() {
    println!("{USAGE}");
}

fn print_report(report: &FixReport) {
    println!("schemas: {} -> {}", report.schemas_before, report.schemas_after);
    for folded in &report.folded {
        println!(
            "  folded {} into {} ({} refs rewritten, {} already canonical)",
            folded.dotted, folded.canonical, folded.refs_rewritten, folded.canonical_refs
        );
    }
    println!("type arrays collapsed: {}", report.type_arrays_collapsed);
    for (dotted, canonical) in &report.remaining_duplicates {
        println!("  still duplicated: {dotted} / {canonical}");
    }
}
