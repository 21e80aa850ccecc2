use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use crate::errors::{LoanError, Result};
use crate::payments::ScheduleRow;

const HEADER: [&str; 8] = [
    "Period", "Date", "Payment", "Interest", "Principal", "Extra", "Escrow", "Balance",
];

/// write schedule rows as CSV, one record per period
pub fn write_schedule_csv<W: io::Write>(rows: &[ScheduleRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for row in rows {
        wtr.write_record([
            row.period.to_string(),
            row.due_date.format("%Y-%m-%d").to_string(),
            row.payment.to_string(),
            row.interest.to_string(),
            row.principal.to_string(),
            row.extra.to_string(),
            row.escrow.to_string(),
            row.end_balance.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// write schedule rows to a CSV file, replacing it if present
pub fn export_schedule_csv(rows: &[ScheduleRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_schedule_csv(rows, file)?;
    debug!("exported {} schedule rows to {}", rows.len(), path.display());
    Ok(())
}

/// schedule rows as a CSV string
pub fn schedule_to_csv_string(rows: &[ScheduleRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_schedule_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LoanError::Calculation {
        message: format!("csv output was not utf-8: {}", e),
    })
}
