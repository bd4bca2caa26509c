use std::io::{self, Write};

use ecm_version_engine::sync::Expected;
use ecm_version_engine::{Applied, TargetUpdate, UpdateReporter, VersionRecord};
use serde::Serialize;

use crate::options::OutputFormat;

/// Prints one confirmation line per written target.
pub struct ConsoleReporter;

impl UpdateReporter for ConsoleReporter {
    fn target_updated(&mut self, update: &TargetUpdate) {
        println!("✓ Updated {}", update.path.display());
    }
}

#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    firmware: String,
    protocol: u64,
    targets: &'a [Expected],
}

/// Current record plus the per-target values it implies.
pub fn print_show(
    record: &VersionRecord,
    expected: &[Expected],
    format: OutputFormat,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_show_text(&mut out, record, expected),
        OutputFormat::Json => {
            let report = ShowReport {
                firmware: record.firmware.to_string(),
                protocol: record.protocol,
                targets: expected,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)
        }
    }
}

fn write_show_text(
    out: &mut impl Write,
    record: &VersionRecord,
    expected: &[Expected],
) -> io::Result<()> {
    writeln!(out, "Firmware Version: {}", record.firmware)?;
    writeln!(out, "Protocol Version: {}", record.protocol)?;
    writeln!(out)?;
    writeln!(out, "Current version definitions:")?;
    for e in expected {
        let label = format!("{}:", e.target);
        writeln!(out, "  {label:<10}{}", e.value)?;
    }
    Ok(())
}

pub fn print_applied(applied: &[Applied]) {
    for change in applied {
        match change {
            Applied::Set(version) => tracing::debug!(%version, "firmware version set"),
            Applied::Bumped { kind, to } => println!("Bumped {kind} version to {to}"),
            Applied::Protocol(n) => println!("Setting protocol version to {n}"),
        }
    }
}

pub fn print_updating(record: &VersionRecord) {
    println!(
        "Updating versions: firmware={}, protocol={}",
        record.firmware, record.protocol
    );
    println!();
}

pub fn print_done() {
    println!();
    println!("✓ All versions updated successfully!");
}
