use std::path::PathBuf;

use clap::Parser;

use crate::errors::TelemetryError;
use crate::parsers::SourceFormat;
use crate::pipeline::Source;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize two telemetry JSON schemas into one", long_about = None)]
pub struct Args {
    /// Format-A document (`telemetry` list, ISO timestamps)
    #[arg(long, value_name = "FILE", default_value = "data-1.json")]
    pub format_a: PathBuf,

    /// Format-B document (`sensors` list, millisecond timestamps)
    #[arg(long, value_name = "FILE", default_value = "data-2.json")]
    pub format_b: PathBuf,

    /// stdout, or a .json/.jsonl/.csv path
    #[arg(short, long, default_value = "output-unified.json")]
    pub output: String,

    /// Fixture holding the expected `unified_telemetry` records
    #[arg(short, long, value_name = "FILE", default_value = "data-result.json")]
    pub expected: PathBuf,

    #[arg(long)]
    pub no_validate: bool,

    /// Order in which source batches are concatenated
    #[arg(long, value_enum, value_delimiter = ',', default_values = ["a", "b"])]
    pub order: Vec<SourceFormat>,

    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Merge order is the order of this list.
    pub sources: Vec<Source>,
    pub output: String,
    pub expected: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, TelemetryError> {
        let mut sources: Vec<Source> = Vec::with_capacity(args.order.len());
        for &format in &args.order {
            if sources.iter().any(|s| s.format == format) {
                return Err(TelemetryError::InvalidConfig(format!(
                    "{} listed more than once in --order",
                    format
                )));
            }
            let path = match format {
                SourceFormat::A => &args.format_a,
                SourceFormat::B => &args.format_b,
            };
            sources.push(Source::new(format, path.clone()));
        }

        if sources.is_empty() {
            return Err(TelemetryError::InvalidConfig(
                "--order must name at least one format".to_string(),
            ));
        }

        Ok(Self {
            sources,
            output: args.output.clone(),
            expected: (!args.no_validate).then(|| args.expected.clone()),
        })
    }
}
