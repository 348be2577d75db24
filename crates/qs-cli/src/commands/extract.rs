//! Extract command implementation

use anyhow::{Context, Result};
use qs_sql::{Diagnostic, ExtractedStatement, ExtractionResult};
use serde::Serialize;
use std::io::Read;

use crate::cli::{ExtractArgs, ExtractOutput, GlobalArgs};
use crate::commands::common::build_extractor;

/// Execute the extract command
pub(crate) fn execute(args: &ExtractArgs, global: &GlobalArgs) -> Result<()> {
    let extractor = build_extractor(global)?;
    let sql = read_input(args)?;

    if global.verbose {
        eprintln!("[verbose] Extracting {} bytes of SQL", sql.len());
    }

    let result = extractor
        .extract(&sql)
        .context("Failed to extract SQL templates")?;
    let fingerprints = args.fingerprint.then(|| result.fingerprints());

    match args.output {
        ExtractOutput::Json => {
            let report = build_report(&result, fingerprints.as_deref());
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
        ExtractOutput::Pretty => print_pretty(&result, fingerprints.as_deref()),
        ExtractOutput::Template => {
            for (i, template) in result.templates().iter().enumerate() {
                match fingerprints.as_deref() {
                    Some(fps) => println!("{}\t{}", fps[i], template),
                    None => println!("{}", template),
                }
            }
        }
    }

    if !result.diagnostics().is_empty() {
        log::warn!(
            "{} node(s) had no canonicalization rule; templates may be coarser than usual",
            result.diagnostics().len()
        );
    }

    Ok(())
}

fn read_input(args: &ExtractArgs) -> Result<String> {
    if let Some(sql) = &args.sql {
        return Ok(sql.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read SQL file: {}", path));
    }
    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .context("Failed to read SQL from stdin")?;
    Ok(sql)
}

fn build_report<'a>(
    result: &'a ExtractionResult,
    fingerprints: Option<&'a [String]>,
) -> ExtractReport<'a> {
    let statements = result
        .statements()
        .iter()
        .enumerate()
        .map(|(i, statement)| StatementReport {
            statement,
            fingerprint: fingerprints.map(|fps| fps[i].as_str()),
        })
        .collect();
    ExtractReport {
        statements,
        has_param_marker: result.has_param_marker(),
        diagnostics: result.diagnostics(),
    }
}

fn print_pretty(result: &ExtractionResult, fingerprints: Option<&[String]>) {
    for (i, statement) in result.statements().iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("Statement {} ({})", i, statement.operation);
        println!("Template: {}", statement.template);
        if let Some(fps) = fingerprints {
            println!("Fingerprint: {}", fps[i]);
        }
        println!();
        println!("Params:");
        if statement.params.is_empty() {
            println!("  (none)");
        } else {
            for param in &statement.params {
                println!("  - {}", param);
            }
        }
        println!();
        println!("Tables:");
        if statement.tables.is_empty() {
            println!("  (none)");
        } else {
            for table in &statement.tables {
                println!(
                    "  - {} -> {}",
                    table.qualified_name(),
                    table.templatized_qualified_name()
                );
            }
        }
    }

    if !result.diagnostics().is_empty() {
        println!();
        println!("Diagnostics:");
        for diagnostic in result.diagnostics() {
            println!(
                "  - statement {}: {} ({})",
                diagnostic.statement, diagnostic.kind, diagnostic.text
            );
        }
    }
}

/// JSON output document
#[derive(Debug, Serialize)]
struct ExtractReport<'a> {
    statements: Vec<StatementReport<'a>>,
    has_param_marker: bool,
    diagnostics: &'a [Diagnostic],
}

#[derive(Debug, Serialize)]
struct StatementReport<'a> {
    #[serde(flatten)]
    statement: &'a ExtractedStatement,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<&'a str>,
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
