//! CSV and JSON export of check-run results.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::ExportError;
use crate::schedule::types::{AddressResult, ThawSchedule};

/// Write one CSV row per thaw across all fetched addresses.
///
/// Header: `Label,Address,Claim #,Amount,Thaw Date,Status`. `Claim #` is
/// the thaw's 1-based position within its address schedule.
pub fn write_csv<W: Write>(results: &[AddressResult], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Label", "Address", "Claim #", "Amount", "Thaw Date", "Status"])?;

    for result in results {
        let Some(schedule) = result.schedule() else {
            continue;
        };
        for (i, thaw) in schedule.thaws.iter().enumerate() {
            csv_writer.write_record([
                result.label.as_str(),
                result.address.as_str(),
                &(i + 1).to_string(),
                &thaw.amount.to_string(),
                &thaw.thaw_start.to_rfc3339(),
                &thaw.status.to_string(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv(results: &[AddressResult], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(results, file)?;
    log::info!("Exported CSV to {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct ExportRecord<'a> {
    label: &'a str,
    address: &'a str,
    schedule: Option<&'a ThawSchedule>,
}

/// JSON export: one `{label, address, schedule}` object per address, in
/// result order; `schedule` is null for addresses never fetched.
pub fn to_json(results: &[AddressResult]) -> Result<String, ExportError> {
    let records: Vec<ExportRecord<'_>> = results
        .iter()
        .map(|r| ExportRecord {
            label: &r.label,
            address: &r.address,
            schedule: r.schedule(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

pub fn export_json(results: &[AddressResult], path: &Path) -> Result<(), ExportError> {
    let json = to_json(results)?;
    std::fs::write(path, json)?;
    log::info!("Exported JSON to {}", path.display());
    Ok(())
}
