//! discoverygen CLI
//!
//! Command-line interface for compiling Google Discovery documents into
//! generated TypeScript client modules.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use discoverygen_codegen::{is_conversion_required_for_ref, Generator};
use discoverygen_parser::discovery::DiscoveryParser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "discoverygen")]
#[command(version, about = "Compile Google Discovery documents into TypeScript client modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a Discovery document into a generated TypeScript module
    #[command(after_help = "EXAMPLES:\n  \
        # Write to stdout\n  \
        discoverygen generate --spec storage-v1.json --self-url https://deno.land/x/storage@v1/mod.ts\n\n  \
        # Write to a file\n  \
        discoverygen generate --spec storage-v1.json --self-url https://deno.land/x/storage@v1/mod.ts --output storage.ts")]
    Generate {
        /// Path to the Discovery document (JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Absolute URL this generated module will be published under
        #[arg(long)]
        self_url: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a Discovery document and print its flattened method records
    #[command(after_help = "EXAMPLES:\n  \
        discoverygen inspect --spec storage-v1.json")]
    Inspect {
        /// Path to the Discovery document (JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Generate { spec, self_url, output } => {
            generate_command(spec.as_path(), &self_url, output.as_deref(), cli.verbose)?;
        }
        Commands::Inspect { spec } => {
            inspect_command(spec.as_path(), cli.verbose)?;
        }
    }

    Ok(())
}

fn generate_command(spec_path: &Path, self_url: &str, output: Option<&Path>, verbose: bool) -> Result<()> {
    println!("{} Loading Discovery document: {}", "→".cyan(), spec_path.display());

    let parser = DiscoveryParser::from_file(spec_path, self_url).context("Failed to load Discovery document")?;

    if verbose {
        println!("  Name: {}", parser.doc().name);
        println!("  Primary class: {}", parser.primary_name().yellow());
        println!("  Schemas: {}", parser.doc().schemas.len());
    }

    println!("{} Compiling module...", "→".cyan());
    let generator = Generator::new(parser.doc().clone(), parser.primary_name().to_string(), parser.self_url().to_string());
    let module = generator.generate().context("Failed to generate client module")?;

    match output {
        Some(path) => {
            std::fs::write(path, &module).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("\n{} Wrote {}", "✓".green().bold(), path.display());
        }
        None => {
            print!("{}", module);
        }
    }

    Ok(())
}

fn inspect_command(spec_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Loading Discovery document: {}", "→".cyan(), spec_path.display());

    // self-url is irrelevant to inspection; any value satisfies the parser.
    let parser = DiscoveryParser::from_file(spec_path, "https://inspect.local/mod.ts").context("Failed to load Discovery document")?;
    let doc = parser.doc();

    println!("\n{}", "Document:".bold());
    println!("  Name: {}", doc.name.yellow());
    println!("  Primary class: {}", parser.primary_name().yellow());
    println!("  Root URL: {}", doc.root_url);

    let records = parser.flatten().context("Failed to flatten resource tree")?;
    println!("\n{} ({} total)", "Methods:".bold(), records.len());
    for record in &records {
        let params = record.path_params.len() + record.query_params.len();
        println!(
            "  {} {} {} ({} param{})",
            record.http_method.cyan(),
            record.path,
            record.camel_case_name.yellow(),
            params,
            if params == 1 { "" } else { "s" }
        );
        if verbose {
            if let Some(req) = &record.request {
                println!("    request: {}", req);
            }
            if let Some(resp) = &record.response {
                println!("    response: {}", resp);
            }
        }
    }

    let mut names: Vec<&String> = doc.schemas.keys().collect();
    names.sort();
    println!("\n{} ({} total)", "Schemas:".bold(), names.len());
    for name in names {
        match is_conversion_required_for_ref(doc, name) {
            Ok(true) => println!("  {} {}", name, "requires conversion".yellow()),
            Ok(false) => println!("  {}", name),
            Err(e) => println!("  {} {} {}", name, "error:".red(), e),
        }
    }

    Ok(())
}
