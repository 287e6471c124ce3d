//! RETS Command-Line Tool
//!
//! Translates query documents to DMQL and runs them against fixture data.

mod document;
mod formatter;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use formatter::OutputFormat;
use rets_adapter::{AdapterConfig, RetsAdapter};
use rets_dmql::{ConditionPolicy, Translator};
use tracing::info;

/// RETS Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "rets")]
#[command(version, about = "Translate and test RETS DMQL searches")]
pub struct Args {
    /// Output format
    #[arg(long, global = true, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Which condition kinds are translated
    #[arg(long, global = true, default_value = "comparisons", value_enum)]
    pub policy: PolicyArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the search request a query document translates to
    Translate {
        /// Query document (JSON)
        document: PathBuf,
    },
    /// Run a query document against a fixture through the simulated server
    Search {
        /// Query document (JSON)
        document: PathBuf,

        /// Fixture tables (JSON)
        #[arg(short, long)]
        fixture: PathBuf,
    },
}

/// Condition policy as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Equality, inclusion range and less-than
    Comparisons,
    /// Inclusion range only
    RangeOnly,
}

impl From<PolicyArg> for ConditionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Comparisons => ConditionPolicy::Comparisons,
            PolicyArg::RangeOnly => ConditionPolicy::RangeOnly,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rets_cli=info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = formatter::create_formatter(args.format);
    let policy = ConditionPolicy::from(args.policy);

    match &args.command {
        Command::Translate { document } => {
            let output = translate(document, policy, &*formatter)?;
            println!("{}", output);
        }
        Command::Search { document, fixture } => {
            let output = search(document, fixture, policy, &*formatter)?;
            println!("{}", output);
        }
    }

    Ok(())
}

/// Translate a query document and format the resulting request.
fn translate(
    document: &Path,
    policy: ConditionPolicy,
    formatter: &dyn formatter::Formatter,
) -> Result<String, Box<dyn std::error::Error>> {
    let doc = document::load_query(document)?;
    let request = Translator::new(policy).translate(&doc.storage, &doc.query)?;
    Ok(formatter.format_request(&request))
}

/// Run a query document against fixture data and format the rows.
fn search(
    document: &Path,
    fixture: &Path,
    policy: ConditionPolicy,
    formatter: &dyn formatter::Formatter,
) -> Result<String, Box<dyn std::error::Error>> {
    let doc = document::load_query(document)?;
    let server = document::load_server(fixture)?;

    let config = AdapterConfig::default().with_name("fixture").with_policy(policy);
    let adapter = RetsAdapter::new(config, doc.storage, server);
    let rows = adapter.read(&doc.query)?;

    info!(entity = %doc.query.entity, rows = rows.len(), "search finished");
    Ok(formatter.format_rows(&rows, &doc.query.fields))
}
