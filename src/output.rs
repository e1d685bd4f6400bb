use crate::model::{UnifiedDocumentRef, UnifiedRecord};
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub enum Writer {
    Stdout(Box<dyn Write>),
    JsonFile(BufWriter<File>),
    JsonlFile(BufWriter<File>),
    CsvFile(BufWriter<File>),
}

impl Writer {
    pub fn write_records(&mut self, records: &[UnifiedRecord]) -> Result<()> {
        match self {
            Writer::Stdout(writer) => write_document(writer, records)?,
            Writer::JsonFile(writer) => write_document(writer, records)?,
            Writer::JsonlFile(writer) => {
                for record in records {
                    let serialized = serde_json::to_string(record)?;
                    writeln!(writer, "{}", serialized)?;
                }
            }
            Writer::CsvFile(writer) => {
                writeln!(writer, "device_id,timestamp,temperature,humidity,pressure")?;
                for record in records {
                    writeln!(
                        writer,
                        "{},{},{},{},{}",
                        escape_csv_field(&record.device_id),
                        record.timestamp,
                        record.temperature,
                        record.humidity,
                        record.pressure
                    )?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        match self {
            Writer::JsonFile(ref mut writer)
            | Writer::JsonlFile(ref mut writer)
            | Writer::CsvFile(ref mut writer) => {
                writer.flush()?;
            }
            Writer::Stdout(ref mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

// `{"unified_telemetry": [...]}` with serde_json's 2-space pretty printer.
fn write_document<W: Write + ?Sized>(writer: &mut W, records: &[UnifiedRecord]) -> Result<()> {
    let document = UnifiedDocumentRef {
        unified_telemetry: records,
    };
    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writeln!(writer)?;
    Ok(())
}

pub fn create_writer(output_arg: &str) -> Result<Writer> {
    match output_arg {
        "stdout" | "-" => Ok(Writer::Stdout(Box::new(io::stdout()))),
        path if path.ends_with(".json") => Ok(Writer::JsonFile(open_file(path)?)),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::JsonlFile(open_file(path)?))
        }
        path if path.ends_with(".csv") => Ok(Writer::CsvFile(open_file(path)?)),
        path => {
            // Default to a JSON document if it looks like a path
            if path.contains('/') || path.contains('\\') || path.contains('.') {
                Ok(Writer::JsonFile(open_file(path)?))
            } else {
                Err(anyhow!(
                    "Unknown output target: {}. Use 'stdout' or a .json/.jsonl/.csv path",
                    output_arg
                ))
            }
        }
    }
}

fn open_file(path: &str) -> Result<BufWriter<File>> {
    create_parent_dirs(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path))?;
    Ok(BufWriter::new(file))
}

fn create_parent_dirs(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write(output_arg: &str, records: &[UnifiedRecord]) -> Result<()> {
    let mut writer = create_writer(output_arg)?;
    writer.write_records(records)?;
    writer.finish()
}
