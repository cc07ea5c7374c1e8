use crate::models::FlightQuote;
use csv::{ReaderBuilder, WriterBuilder};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["Distance (km)", "Destination", "Lowest Price"];

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv error on {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `rows` to `path` in the given order. The header is written even
/// when there are no rows.
pub fn write_csv(rows: &[FlightQuote], path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    let csv_err = |source| ReportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    wtr.write_record(CSV_HEADER).map_err(csv_err)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<FlightQuote>, ReportError> {
    let path = path.as_ref();
    let csv_err = |source| ReportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut rdr = ReaderBuilder::new().from_path(path).map_err(csv_err)?;
    rdr.deserialize()
        .collect::<Result<Vec<FlightQuote>, _>>()
        .map_err(csv_err)
}

/// Fixed-width console table.
pub fn format_table(rows: &[FlightQuote]) -> String {
    let mut out = String::new();
    out.push_str("Distance (km) | Destination | Price\n");
    out.push_str(&"-".repeat(40));
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "{:11.2} | {:11.11} | {:5.2}",
            row.distance_km, row.destination, row.lowest_price
        );
    }
    out
}

pub fn print_table(rows: &[FlightQuote]) {
    println!("Flights found:");
    print!("{}", format_table(rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Vec<FlightQuote> {
        vec![
            FlightQuote::new(307.82, "CDG", 120.0),
            FlightQuote::new(1109.59, "BCN", 80.5),
        ]
    }

    #[test]
    fn csv_layout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flights.csv");
        write_csv(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Distance (km),Destination,Lowest Price\n307.82,CDG,120.0\n1109.59,BCN,80.5\n"
        );
    }

    #[test]
    fn empty_report_has_only_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flights.csv");
        write_csv(&[], &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Distance (km),Destination,Lowest Price\n"
        );
    }

    #[test]
    fn csv_reads_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flights.csv");
        let mut rows = sample();
        rows.push(FlightQuote::new(0.0, "Somewhere, Far", f64::INFINITY));
        write_csv(&rows, &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), rows);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("flights.csv");
        assert!(matches!(
            write_csv(&sample(), &path),
            Err(ReportError::Csv { .. })
        ));
    }

    #[test]
    fn table_is_fixed_width() {
        let rows = vec![
            FlightQuote::new(307.82, "CDG", 120.0),
            FlightQuote::new(12.3456, "A-VERY-LONG-NAME", 9.999),
        ];
        let table = format_table(&rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Distance (km) | Destination | Price");
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines[2], "     307.82 | CDG         | 120.00");
        assert_eq!(lines[3], "      12.35 | A-VERY-LONG | 10.00");
    }
}
