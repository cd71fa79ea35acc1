//! Flat-file vehicle store
//!
//! CSV-backed storage with full-rewrite mutation mirrors.
//!
//! Fields containing the delimiter, a quote, or a newline are written
//! quoted with doubled inner quotes, and unquoted again on load, so any
//! payload text round-trips through the file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Vehicle;

/// Header line written to every store file
const HEADER: &str = "plate,brand,color,model,price";

/// Number of comma-separated fields per row
const FIELD_COUNT: usize = 5;

/// Flat-file store for vehicle records
pub struct VehicleStore {
    /// Path to the CSV file
    filepath: PathBuf,
}

impl VehicleStore {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directory and an empty file with a header line
    /// if either does not exist yet.
    pub fn open(filepath: &Path) -> Result<Self> {
        if let Some(dir) = filepath.parent() {
            fs::create_dir_all(dir)?;
        }

        if !filepath.exists() {
            let mut file = File::create(filepath)?;
            writeln!(file, "{}", HEADER)?;
        }

        Ok(Self {
            filepath: filepath.to_path_buf(),
        })
    }

    /// Load every record from the file.
    ///
    /// A missing file yields an empty set. Malformed rows (wrong field
    /// count, non-numeric price, unterminated quote) are skipped and
    /// logged rather than propagated; the caller never sees them.
    pub fn load_all(&self) -> Result<Vec<Vehicle>> {
        if !self.filepath.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.filepath)?;
        let reader = BufReader::new(file);

        let mut vehicles = Vec::new();
        let mut skipped = 0usize;
        let mut first = true;

        // A row spans lines when a quoted field holds a newline; keep
        // accumulating until its quotes balance out.
        let mut pending: Option<String> = None;

        for line in reader.lines() {
            let line = line?;

            let row = match pending.take() {
                Some(mut partial) => {
                    partial.push('\n');
                    partial.push_str(&line);
                    partial
                }
                None => {
                    // Header and blank lines are not records
                    if first {
                        first = false;
                        if line == HEADER {
                            continue;
                        }
                    }
                    if line.trim().is_empty() {
                        continue;
                    }
                    line
                }
            };

            if has_open_quote(&row) {
                pending = Some(row);
                continue;
            }

            match Self::parse_row(&row) {
                Some(vehicle) => vehicles.push(vehicle),
                None => {
                    skipped += 1;
                    tracing::warn!("skipping malformed row in {}", self.filepath.display());
                }
            }
        }

        if pending.is_some() {
            skipped += 1;
            tracing::warn!(
                "skipping unterminated row at end of {}",
                self.filepath.display()
            );
        }

        if skipped > 0 {
            tracing::warn!(
                "loaded {} vehicles from {}, skipped {} malformed rows",
                vehicles.len(),
                self.filepath.display(),
                skipped
            );
        }

        Ok(vehicles)
    }

    /// Rewrite the whole file with the given record set
    pub fn save_all(&self, vehicles: &[Vehicle]) -> Result<()> {
        let file = File::create(&self.filepath)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", HEADER)?;
        for vehicle in vehicles {
            writeln!(writer, "{}", Self::format_row(vehicle))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Append a single record to the end of the file
    pub fn append(&self, vehicle: &Vehicle) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.filepath)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", Self::format_row(vehicle))?;

        writer.flush()?;
        Ok(())
    }

    /// Remove the record with the given plate (load, filter, write back)
    pub fn remove(&self, plate: &str) -> Result<()> {
        let mut vehicles = self.load_all()?;
        vehicles.retain(|v| v.plate != plate);
        self.save_all(&vehicles)
    }

    /// Replace the record with the given plate (load, replace, write back)
    pub fn rewrite(&self, plate: &str, updated: &Vehicle) -> Result<()> {
        let mut vehicles = self.load_all()?;
        for vehicle in vehicles.iter_mut() {
            if vehicle.plate == plate {
                *vehicle = updated.clone();
                break;
            }
        }
        self.save_all(&vehicles)
    }

    /// Get the store file path
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Format one record as a CSV row in stable field order
    fn format_row(vehicle: &Vehicle) -> String {
        [
            escape_field(&vehicle.plate),
            escape_field(&vehicle.brand),
            escape_field(&vehicle.color),
            escape_field(&vehicle.model),
            vehicle.price.to_string(),
        ]
        .join(",")
    }

    /// Parse one CSV row; `None` if the row is malformed
    fn parse_row(row: &str) -> Option<Vehicle> {
        let fields = split_row(row)?;
        if fields.len() != FIELD_COUNT {
            return None;
        }

        let price: f64 = fields[FIELD_COUNT - 1].trim().parse().ok()?;

        let mut fields = fields.into_iter();
        Some(Vehicle {
            plate: fields.next()?,
            brand: fields.next()?,
            color: fields.next()?,
            model: fields.next()?,
            price,
        })
    }
}

/// Quote a field that contains a delimiter, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split a row into fields, honoring quoted sections.
///
/// A doubled quote inside a quoted field is a literal quote. `None` if a
/// quoted field never closes.
fn split_row(row: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return None;
    }

    fields.push(field);
    Some(fields)
}

/// An odd number of quotes means the row continues on the next line
fn has_open_quote(row: &str) -> bool {
    row.matches('"').count() % 2 == 1
}
