//! # Labelforge CLI
//!
//! Command-line front end for designing and compiling labels.
//!
//! ## Usage
//!
//! ```bash
//! # List built-in templates
//! labelforge templates
//!
//! # Start a design from a template
//! labelforge new location-2x1 -o bin.json
//!
//! # Validate a design and list fields outside the catalog
//! labelforge check bin.json
//!
//! # Bind data and compile for a 300 DPI printer
//! labelforge compile bin.json --printer thermal-300 --data bin-data.json
//!
//! # Preview with the catalog's example values
//! labelforge compile bin.json --sample --dpi 96
//! ```

use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use labelforge::{
    LabelError, PrinterConfig,
    binding::{DataContext, default_catalog, resolve_document, sample_context, unknown_bindings},
    compile::compile_for_print,
    document::{LabelDocument, export_label_design, import_label_design},
    preflight::preflight,
    templates::TemplateLibrary,
};

/// Labelforge - warehouse label designer and print compiler
#[derive(Parser, Debug)]
#[command(name = "labelforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in templates
    Templates,

    /// Write a new design file from a template
    New {
        /// Template id (see `labelforge templates`)
        template: String,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate a design file
    Check {
        /// Design file to check
        file: PathBuf,
    },

    /// Bind data and compile a design for a printer
    Compile {
        /// Design file to compile
        file: PathBuf,

        /// Output resolution in dots per inch
        #[arg(long, conflicts_with = "printer", value_parser = clap::value_parser!(u32).range(1..))]
        dpi: Option<u32>,

        /// Printer preset (see `labelforge printers`)
        #[arg(long)]
        printer: Option<String>,

        /// JSON data context for `{{field}}` bindings
        #[arg(long, value_name = "FILE", conflicts_with = "sample")]
        data: Option<PathBuf>,

        /// Bind the catalog's example values
        #[arg(long)]
        sample: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List printer presets
    Printers,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => {
            println!("Available templates:");
            for template in TemplateLibrary::built_in().templates() {
                println!(
                    "  {:<14} {:<28} {}x{}in",
                    template.id, template.name, template.size.width, template.size.height
                );
            }
        }

        Commands::New { template, output } => {
            let library = TemplateLibrary::built_in();
            let document = LabelDocument::from_template(library.get(&template)?);
            write_output(output.as_deref(), &export_label_design(&document))?;
        }

        Commands::Check { file } => {
            let document = load_design(&file)?;
            let units = document.settings.units;
            println!(
                "{}: {} element(s) on {}x{}{}",
                file.display(),
                document.elements.len(),
                units.from_inches(document.size.width),
                units.from_inches(document.size.height),
                units.suffix()
            );
            let unknown = unknown_bindings(&document, &default_catalog());
            if unknown.is_empty() {
                println!("All bindings are catalog fields.");
            } else {
                println!("Fields not in the catalog:");
                for key in unknown {
                    println!("  {}", key);
                }
            }
        }

        Commands::Compile {
            file,
            dpi,
            printer,
            data,
            sample,
            output,
        } => {
            let document = load_design(&file)?;
            let dpi = match (dpi, printer) {
                (Some(dpi), _) => dpi,
                (None, Some(name)) => PrinterConfig::parse(&name)?.dpi,
                (None, None) => PrinterConfig::default().dpi,
            };

            let context = if let Some(path) = data {
                DataContext::from_json(&fs::read_to_string(path)?)?
            } else if sample {
                sample_context(&default_catalog())
            } else {
                DataContext::new()
            };
            let context = context.with_system_fields(chrono::Local::now().naive_local());

            let resolved = resolve_document(&document, &context);
            for issue in preflight(&resolved) {
                eprintln!("warning: {}", issue);
            }

            info!("compiling {} at {} DPI", file.display(), dpi);
            let print = compile_for_print(&resolved, dpi);
            write_output(output.as_deref(), &print.to_json()?)?;
        }

        Commands::Printers => {
            println!("Printer presets:");
            for preset in PrinterConfig::presets() {
                println!("  {:<12} {:>4} DPI  {}", preset.name, preset.dpi, preset.description);
            }
        }
    }

    Ok(())
}

fn load_design(path: &Path) -> Result<LabelDocument, LabelError> {
    let json = fs::read_to_string(path)?;
    import_label_design(&json)
        .ok_or_else(|| LabelError::InvalidDesign(format!("{} is not a valid design file", path.display())))
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), LabelError> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
