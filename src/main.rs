//! shortcodeless - rewrite editor column tables into div layouts

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shortcodeless::columns::{
    CollectedAssets, DEFAULT_MAX_CONTAINERS, MARKER_CLASS, STYLE_ELEMENT_ID,
};
use shortcodeless::{ColumnTransformer, ColumnsConfig};

#[derive(Parser)]
#[command(name = "shortcodeless")]
#[command(version, about = "Rewrite editor column tables into div layouts", long_about = None)]
#[command(after_help = "EXAMPLES:
    shortcodeless post.html -o post.out.html    Rewrite a file
    cat post.html | shortcodeless               Rewrite stdin to stdout
    shortcodeless --start-id 5 --report post.html")]
struct Cli {
    /// Input file, or `-` for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Identifier of the first generated container
    #[arg(long, default_value_t = 1)]
    start_id: u64,

    /// Class marking column tables
    #[arg(long, default_value = MARKER_CLASS)]
    marker_class: String,

    /// id attribute of the generated <style> block
    #[arg(long, default_value = STYLE_ELEMENT_ID)]
    style_id: String,

    /// Give up after this many containers
    #[arg(long, default_value_t = DEFAULT_MAX_CONTAINERS)]
    max_containers: usize,

    /// Inline the base column stylesheet ahead of the output
    #[arg(long)]
    with_base_css: bool,

    /// Print a JSON report of rewritten containers to stderr
    #[arg(long)]
    report: bool,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ColumnsConfig::default()
        .with_marker_class(cli.marker_class.as_str())
        .with_style_id(cli.style_id.as_str())
        .with_initial_id(cli.start_id)
        .with_max_containers(cli.max_containers);
    let transformer = ColumnTransformer::new(config)?;

    let content = read_input(&cli.input)?;
    let mut assets = CollectedAssets::new();
    let result = transformer.transform_with_report(&content, &mut assets)?;

    tracing::info!(
        containers = result.report.containers.len(),
        rules = result.report.rules,
        "transform finished"
    );

    let mut output = String::new();
    if cli.with_base_css {
        output.push_str(&assets.inline_styles(&cli.marker_class));
    }
    output.push_str(&result.output);

    match &cli.output {
        Some(path) => fs::write(path, output)?,
        None => io::stdout().write_all(output.as_bytes())?,
    }

    if cli.report {
        eprintln!("{}", serde_json::to_string_pretty(&result.report)?);
    }

    Ok(())
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input)
    }
}
