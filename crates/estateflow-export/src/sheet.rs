use csv::Writer;

use crate::ExportError;

/// One report table: a header row and string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Sheet title, e.g. `"Master Report"`.
    pub title: &'static str,
    /// File stem without the date suffix.
    pub stem: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    #[must_use]
    pub fn new(title: &'static str, stem: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            title,
            stem: stem.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width in {}", self.title);
        self.rows.push(row);
    }

    /// Render as CSV with a header line.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if a record cannot be written.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut wtr = Writer::from_writer(vec![]);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        let data = wtr
            .into_inner()
            .map_err(|e| ExportError::Flush(e.to_string()))?;
        Ok(String::from_utf8(data)?)
    }
}

/// Two decimal places.
pub(crate) fn amount(v: f64) -> String {
    format!("{v:.2}")
}

/// Whole number, rounded half away from zero.
pub(crate) fn rounded(v: f64) -> String {
    format!("{:.0}", v.round())
}

/// Counts entered by hand print without a fraction when they have none.
pub(crate) fn count(v: f64) -> String {
    if v.fract().abs() < f64::EPSILON {
        format!("{v:.0}")
    } else {
        amount(v)
    }
}

/// Percentage with one decimal place.
pub(crate) fn percent(v: f64) -> String {
    format!("{v:.1}")
}
