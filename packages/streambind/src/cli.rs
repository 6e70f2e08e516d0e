//! Command-line interface for the binder.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::{normalize_name, validate_element_name, DEFAULT_MAX_DEPTH};
use crate::error::Result;
use crate::registry::{BoundObject, ParseEngine};
use crate::snapshot::{create_snapshot_registry, NodeSnapshot};
use crate::xml::{EventSource, StreamSource, XmlEvent};

/// Streambind - bind XML documents element by element.
#[derive(Parser)]
#[command(name = "streambind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bind the given elements generically and print the root object.
    Dump {
        /// XML file to read
        file: PathBuf,

        /// Element to bind (repeatable); unbound elements only contribute text
        #[arg(short = 'e', long = "element", required = true)]
        elements: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Maximum number of nested bound elements
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Parse the whole file into a tree first instead of streaming it
        #[arg(long)]
        tree: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the element names in a file with their occurrence counts.
    Scan {
        /// XML file to read
        file: PathBuf,
    },
}

/// Output format of the `dump` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Element statistics of one document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ElementScan {
    /// Occurrences per lower-cased element name.
    pub counts: BTreeMap<String, usize>,
    /// Deepest element nesting seen.
    pub max_depth: usize,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            file,
            elements,
            format,
            max_depth,
            tree,
            output,
        } => dump_command(&file, &elements, format, max_depth, tree, output.as_deref()),
        Commands::Scan { file } => scan_command(&file),
    }
}

/// Execute the dump command.
fn dump_command(
    file: &Path,
    elements: &[String],
    format: OutputFormat,
    max_depth: usize,
    tree: bool,
    output: Option<&Path>,
) -> Result<()> {
    for element in elements {
        validate_element_name(element)?;
    }

    let registry = create_snapshot_registry(elements.iter().map(String::as_str));
    let engine = ParseEngine::new(registry).with_max_depth(max_depth);

    let root = if tree {
        let xml = fs::read_to_string(file)?;
        let document = roxmltree::Document::parse(&xml)?;
        engine.parse_document(&document)?
    } else {
        engine.parse_reader(BufReader::new(File::open(file)?))?
    };

    let rendered = render(root, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Render a bound snapshot as `{root-element: snapshot}`.
pub fn render(root: BoundObject, format: OutputFormat) -> Result<String> {
    let element = root.element().to_string();
    let snapshot = root.downcast::<Rc<NodeSnapshot>>()?;
    let document = BTreeMap::from([(element, snapshot)]);

    Ok(match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(&document)?,
        OutputFormat::Json => serde_json::to_string_pretty(&document)? + "\n",
    })
}

/// Execute the scan command.
fn scan_command(file: &Path) -> Result<()> {
    let scan = scan_elements(StreamSource::new(BufReader::new(File::open(file)?)))?;

    println!(
        "{} {}",
        style("Elements in").bold(),
        style(file.display()).cyan()
    );
    let width = scan.counts.keys().map(String::len).max().unwrap_or(0);
    for (name, count) in &scan.counts {
        println!("  {:<width$}  {}", style(name).cyan(), count);
    }
    println!();
    println!("  Max depth: {}", style(scan.max_depth).green());
    Ok(())
}

/// Count element names and nesting depth of a document.
pub fn scan_elements(mut source: impl EventSource) -> Result<ElementScan> {
    let mut scan = ElementScan::default();
    let mut depth = 0_usize;

    while let Some(event) = source.next_event()? {
        match event {
            XmlEvent::Start { name, .. } => {
                *scan.counts.entry(normalize_name(&name)).or_default() += 1;
                depth += 1;
                scan.max_depth = scan.max_depth.max(depth);
            }
            XmlEvent::End { .. } => depth = depth.saturating_sub(1),
            XmlEvent::Characters(_) => {}
        }
    }
    Ok(scan)
}
