//! Strata CLI
//!
//! Compiles one element's attribute JSON into CSS.
//!
//! - strata attrs.json --selector .et_pb_section_0
//! - strata attrs.json --selector .x --format json
//! - strata attrs.json --selector .x --classnames

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde_json::json;
use strata_common::warning::warning_count;
use strata_style::{
    ElementAttrs, EngineConfig, Important, OutputFormat, StyleEngine, StyleOutput, StyleRequest,
};

/// Output shape on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// CSS text
    Css,
    /// Statements, class names, and parallax containers as JSON
    Json,
}

/// Strata: compile responsive element attributes into minimal CSS
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # CSS for a section
    strata section.json --selector .et_pb_section_0

    # Everything as JSON, hover state only
    strata section.json --selector .et_pb_section_0 --format json --states hover

    # Custom breakpoints
    strata section.json --selector .x --config breakpoints.json
"#)]
struct Cli {
    /// Element attribute JSON (`namespace → breakpoint → state → value`)
    #[arg(value_name = "ATTRS")]
    attrs: PathBuf,

    /// Element selector
    #[arg(short, long)]
    selector: String,

    /// Engine configuration JSON (breakpoints and states)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Css)]
    format: Format,

    /// Wrap CSS output in a <style> element
    #[arg(long)]
    as_style: bool,

    /// Mark every declaration !important
    #[arg(long)]
    important: bool,

    /// Print class names instead of CSS
    #[arg(long)]
    classnames: bool,

    /// Compile for the designer preview
    #[arg(long)]
    preview: bool,

    /// Background layers are managed by presets
    #[arg(long)]
    layer_presets: bool,

    /// Hover transforms apply without transition
    #[arg(long)]
    instant_hover: bool,

    /// Interaction states to compile besides the base state (comma-separated)
    #[arg(long, value_delimiter = ',')]
    states: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = read(path)?;
            EngineConfig::from_json(&text)
                .with_context(|| format!("invalid engine configuration in {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    let engine = StyleEngine::new(config).context("invalid engine configuration")?;

    let attrs = ElementAttrs::from_json(&read(&cli.attrs)?)
        .with_context(|| format!("invalid attributes in {}", cli.attrs.display()))?;

    let request = StyleRequest {
        important: Important::Flag(cli.important),
        enabled_states: cli.states.clone(),
        has_layer_presets: cli.layer_presets,
        is_preview: cli.preview,
        instant_hover_transform: cli.instant_hover,
        output: match cli.format {
            Format::Css => OutputFormat::Text,
            Format::Json => OutputFormat::Statements,
        },
        as_style: cli.as_style,
        ..StyleRequest::new(&cli.selector)
    };
    let compiled = engine.compile(&attrs, &request).context("compilation failed")?;

    match (cli.format, compiled.render(&request)) {
        (Format::Json, StyleOutput::Statements(statements)) => {
            let output = json!({
                "statements": statements,
                "classnames": compiled.classnames,
                "parallax": compiled.parallax,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ if cli.classnames => println!("{}", compiled.classnames),
        (_, StyleOutput::Text(css)) => println!("{css}"),
        (_, StyleOutput::Statements(statements)) => {
            println!("{}", serde_json::to_string_pretty(&statements)?);
        }
    }

    let warnings = warning_count();
    if warnings > 0 {
        eprintln!("{}", format!("{warnings} attribute warning(s)").dimmed());
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
