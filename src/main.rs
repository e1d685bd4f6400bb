mod config;
mod errors;
mod input;
mod model;
mod normalizer;
mod output;
mod parsers;
mod pipeline;
mod validate;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{Args, Config};

const EXIT_FAILURE: u8 = 1;
const EXIT_VALIDATION_FAILED: u8 = 2;

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Written,
    Validated,
    Mismatch,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json_logs);

    let result = run(&args);
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Written) | Ok(Outcome::Validated) => 0,
        Ok(Outcome::Mismatch) => EXIT_VALIDATION_FAILED,
        Err(_) => EXIT_FAILURE,
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let start_time = Instant::now();
    let config = Config::from_args(args)?;

    info!(sources = config.sources.len(), "loading telemetry data files");
    let records = pipeline::run(&config.sources).context("transforming telemetry")?;
    info!(records = records.len(), "transformed all sources");

    output::write(&config.output, &records)
        .with_context(|| format!("writing unified data to {}", config.output))?;
    info!(
        output = %config.output,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "unified data saved"
    );

    let Some(expected_path) = &config.expected else {
        return Ok(Outcome::Written);
    };

    let expected = validate::load_expected(expected_path).context("loading validation fixture")?;
    match validate::compare(&records, &expected) {
        Ok(()) => {
            info!(records = records.len(), "output matches validation fixture");
            Ok(Outcome::Validated)
        }
        Err(mismatch) => {
            warn!(fixture = %expected_path.display(), "validation failed: {}", mismatch);
            Ok(Outcome::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const DATA_A: &str = r#"{"telemetry":[{"device_id":"sensor_001","timestamp":"2023-10-15T14:30:25.123Z","temperature":23.5,"humidity":65.2,"pressure":1013.25}]}"#;
    const DATA_B: &str = r#"{"sensors":[{"id":"sensor_002","ts":1697372225123,"temp":20.0,"hum":50.0,"press":1000.0}]}"#;
    const EXPECTED: &str = r#"{"unified_telemetry":[{"device_id":"sensor_001","timestamp":1697380225123,"temperature":23.5,"humidity":65.2,"pressure":1013.25},{"device_id":"sensor_002","timestamp":1697372225123,"temperature":20.0,"humidity":50.0,"pressure":1000.0}]}"#;

    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("data-1.json"), DATA_A).unwrap();
            fs::write(dir.path().join("data-2.json"), DATA_B).unwrap();
            fs::write(dir.path().join("data-result.json"), EXPECTED).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn args(&self, extra: &[&str]) -> Args {
            let arg = |name: &str| self.path(name).to_str().unwrap().to_string();
            let mut argv = vec![
                "telenorm".to_string(),
                "--format-a".to_string(),
                arg("data-1.json"),
                "--format-b".to_string(),
                arg("data-2.json"),
                "--output".to_string(),
                arg("output-unified.json"),
                "--expected".to_string(),
                arg("data-result.json"),
            ];
            argv.extend(extra.iter().map(|s| s.to_string()));
            Args::try_parse_from(argv).unwrap()
        }
    }

    fn output_exists(workspace: &Workspace) -> bool {
        workspace.path("output-unified.json").exists()
    }

    #[test]
    fn matching_fixture_validates() {
        let workspace = Workspace::new();
        let result = run(&workspace.args(&[]));
        assert_eq!(result.as_ref().unwrap(), &Outcome::Validated);
        assert_eq!(exit_status(&result), 0);
        assert!(output_exists(&workspace));
    }

    #[test]
    fn differing_fixture_is_a_mismatch() {
        let workspace = Workspace::new();
        fs::write(
            workspace.path("data-result.json"),
            EXPECTED.replace("\"temperature\":20.0", "\"temperature\":21.0"),
        )
        .unwrap();

        let result = run(&workspace.args(&[]));
        assert_eq!(result.as_ref().unwrap(), &Outcome::Mismatch);
        assert_eq!(exit_status(&result), 2);
    }

    #[test]
    fn reordered_sources_fail_validation() {
        let workspace = Workspace::new();
        let result = run(&workspace.args(&["--order", "b,a"]));
        assert_eq!(exit_status(&result), 2);
    }

    #[test]
    fn skipping_validation_only_writes() {
        let workspace = Workspace::new();
        fs::remove_file(workspace.path("data-result.json")).unwrap();
        let result = run(&workspace.args(&["--no-validate"]));
        assert_eq!(result.as_ref().unwrap(), &Outcome::Written);
        assert_eq!(exit_status(&result), 0);
    }

    #[test]
    fn missing_input_fails_without_output() {
        let workspace = Workspace::new();
        fs::remove_file(workspace.path("data-2.json")).unwrap();
        let result = run(&workspace.args(&[]));
        assert!(result.is_err());
        assert_eq!(exit_status(&result), 1);
        assert!(!output_exists(&workspace));
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let workspace = Workspace::new();
        fs::remove_file(workspace.path("data-result.json")).unwrap();
        let result = run(&workspace.args(&[]));
        assert_eq!(exit_status(&result), 1);
    }
}
