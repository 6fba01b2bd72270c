//! jfr-flame CLI
//!
//! Converts Java Flight Recorder event dumps into flame graph data:
//! folded stacks for flamegraph.pl or nested JSON for d3-flame-graph.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use jfr_flame::aggregator::OutputKind;
use jfr_flame::commands::{
    execute_convert, execute_details, ConvertArgs, DetailsArgs,
};
use jfr_flame::commands::convert::validate_args;
use jfr_flame::events::{EventKind, SizeUnit};
use jfr_flame::frames::FrameFormat;

/// jfr-flame - flame graph data from Flight Recorder event dumps
#[derive(Parser, Debug)]
#[command(name = "jfr-flame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create folded output for flamegraph.pl
    Folded {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Create JSON output for d3-flame-graph
    Json {
        #[command(flatten)]
        common: CommonArgs,

        /// Split the tree into one bucket per event start second
        #[arg(short, long)]
        live: bool,
    },

    /// Print recording details and exit
    Details {
        /// Recording event dump
        #[arg(short = 'f', long)]
        input: PathBuf,

        /// Decompress the recording (gzip)
        #[arg(short, long)]
        decompress: bool,

        /// Event kind the event-span lines are computed for
        #[arg(short, long, default_value = "cpu")]
        event: String,

        /// Print raw epoch seconds instead of formatted datetimes
        #[arg(short, long)]
        timestamp: bool,
    },
}

/// Options shared by the folded and json subcommands
#[derive(Args, Debug)]
struct CommonArgs {
    /// Recording event dump
    #[arg(short = 'f', long)]
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decompress the recording (gzip)
    #[arg(short, long)]
    decompress: bool,

    /// Event kind used to generate the flame graph
    /// (cpu, allocation-tlab, allocation-outside-tlab, exceptions, monitor-blocked, io)
    #[arg(short, long, default_value = "cpu")]
    event: String,

    /// Unit for allocation weights (bytes, kilobytes)
    #[arg(long, default_value = "kilobytes")]
    size_unit: String,

    /// Start timestamp in seconds for filtering
    #[arg(long)]
    start_timestamp: Option<i64>,

    /// End timestamp in seconds for filtering
    #[arg(long)]
    end_timestamp: Option<i64>,

    /// Ignore line numbers in stack frames
    #[arg(short, long)]
    ignore_line_numbers: bool,

    /// Show return values for methods in the stack
    #[arg(long)]
    show_return_value: bool,

    /// Use simple names instead of qualified names in the stack
    #[arg(long)]
    use_simple_names: bool,

    /// Hide arguments in methods
    #[arg(long)]
    hide_arguments: bool,

    /// Reverse call stacks for bottom-up graphs
    #[arg(long)]
    reverse: bool,

    /// Abort on events missing an expected field instead of skipping them
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Folded { common } => {
            let args = convert_args(common, OutputKind::Folded, false)?;
            validate_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Json { common, live } => {
            let args = convert_args(common, OutputKind::Json, live)?;
            validate_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Details {
            input,
            decompress,
            event,
            timestamp,
        } => {
            execute_details(DetailsArgs {
                input,
                decompress,
                event_kind: parse_event_kind(&event)?,
                print_timestamp: timestamp,
            })?;
        }
    }

    Ok(())
}

/// Build convert arguments from the shared CLI options
///
/// **Private** - internal command plumbing
fn convert_args(common: CommonArgs, output_kind: OutputKind, live: bool) -> Result<ConvertArgs> {
    Ok(ConvertArgs {
        input: common.input,
        output: common.output,
        decompress: common.decompress,
        event_kind: parse_event_kind(&common.event)?,
        output_kind,
        live,
        size_unit: parse_size_unit(&common.size_unit)?,
        frame_format: FrameFormat {
            show_return_value: common.show_return_value,
            use_simple_names: common.use_simple_names,
            hide_arguments: common.hide_arguments,
            ignore_line_numbers: common.ignore_line_numbers,
        },
        reverse_stacks: common.reverse,
        start_timestamp: common.start_timestamp,
        end_timestamp: common.end_timestamp,
        strict: common.strict,
    })
}

fn parse_event_kind(name: &str) -> Result<EventKind> {
    EventKind::from_option_name(name).ok_or_else(|| {
        let valid: Vec<&str> = EventKind::ALL.iter().map(|k| k.option_name()).collect();
        anyhow::anyhow!(
            "Event type [{}] does not exist. Valid types: {}",
            name,
            valid.join(", ")
        )
    })
}

fn parse_size_unit(name: &str) -> Result<SizeUnit> {
    SizeUnit::from_option_name(name)
        .ok_or_else(|| anyhow::anyhow!("Size unit [{}] does not exist. Valid units: bytes, kilobytes", name))
}
