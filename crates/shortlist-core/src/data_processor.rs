//! Record normalizer: dataset rows in, self-describing text units out.
//!
//! The header is validated once, up front; every row is then turned into a
//! fixed-field [`PortfolioRow`] so formatting never looks columns up by name.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Meta, PortfolioRow, TextUnit, SOURCE_KEY};

pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "skills", "experience", "location"];

/// Column positions of the required fields in one particular header.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    name: usize,
    skills: usize,
    experience: usize,
    location: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |column: &str| headers.iter().position(|h| h.trim() == column);
        let missing: Vec<&str> =
            REQUIRED_COLUMNS.iter().copied().filter(|c| position(*c).is_none()).collect();
        if !missing.is_empty() {
            return Err(Error::Schema(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }
        let at = |column: &str| position(column).unwrap_or_default();
        Ok(Self {
            name: at("name"),
            skills: at("skills"),
            experience: at("experience"),
            location: at("location"),
        })
    }

    fn row(&self, record: &csv::StringRecord) -> PortfolioRow {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        PortfolioRow {
            name: field(self.name),
            skills: field(self.skills),
            experience: field(self.experience),
            location: field(self.location),
        }
    }
}

pub struct DataProcessor {
    delimiter: u8,
}

impl Default for DataProcessor {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl DataProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse and validate every row, in file order.
    pub fn read_rows<R: Read>(&self, reader: R) -> Result<Vec<PortfolioRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(columns.row(&record?));
        }
        debug!(rows = rows.len(), "parsed portfolio dataset");
        Ok(rows)
    }

    pub fn read_rows_from_path(&self, path: &Path) -> Result<Vec<PortfolioRow>> {
        info!(path = %path.display(), "reading portfolio dataset");
        self.read_rows(File::open(path)?)
    }

    /// One text unit per row; the provenance index is the zero-based row position.
    pub fn to_text_units(&self, rows: &[PortfolioRow]) -> Vec<TextUnit> {
        rows.iter().enumerate().map(|(idx, row)| to_text_unit(idx, row)).collect()
    }

    pub fn process_path(&self, path: &Path) -> Result<Vec<TextUnit>> {
        let rows = self.read_rows_from_path(path)?;
        Ok(self.to_text_units(&rows))
    }
}

pub fn to_text_unit(idx: usize, row: &PortfolioRow) -> TextUnit {
    let mut metadata = Meta::new();
    metadata.insert(SOURCE_KEY.to_string(), format!("portfolio_{idx}"));
    TextUnit {
        text: format!(
            "Portfolio: {}, Skills: {}, Experience: {}, Location: {}",
            row.name, row.skills, row.experience, row.location
        ),
        metadata,
    }
}
