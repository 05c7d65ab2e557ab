//! Dense CSV dataset implementation
//!
//! Supports loading datasets from CSV files where:
//! - The last column is an integer class label in [0, C)
//! - All other columns are features
//! - First row can be headers (automatically detected)

use crate::core::{Dataset, LabeledDataset, LossError, Matrix, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for dense CSV files
#[derive(Debug, Clone)]
pub struct CsvDataset {
    inner: LabeledDataset,
}

impl CsvDataset {
    /// Load a dataset from a CSV file
    ///
    /// The last column is assumed to be the label.
    /// Headers are automatically detected if present.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader, detecting a header line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load a dataset from a reader with explicit header option
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut rows = Vec::new();
        let mut labels = Vec::new();

        for (line_num, fields) in data_lines(reader, auto_detect_header)? {
            if fields.len() < 2 {
                return Err(LossError::Parse(format!(
                    "Line {} has too few fields",
                    line_num + 1
                )));
            }

            let (feature_fields, label_field) = fields.split_at(fields.len() - 1);
            let label = label_field[0].parse::<usize>().map_err(|_| {
                LossError::Parse(format!(
                    "Invalid label on line {}: {}",
                    line_num + 1,
                    label_field[0]
                ))
            })?;

            rows.push(parse_values(feature_fields, line_num)?);
            labels.push(label);
        }

        if rows.is_empty() {
            return Err(LossError::EmptyDataset);
        }

        let features = Matrix::from_rows(rows)?;
        info!(
            "Loaded CSV dataset: {} examples, {} features",
            features.rows(),
            features.cols()
        );

        Ok(Self {
            inner: LabeledDataset::new(features, labels)?,
        })
    }

    /// Unwrap into the underlying labelled dataset
    pub fn into_inner(self) -> LabeledDataset {
        self.inner
    }
}

impl Dataset for CsvDataset {
    fn features(&self) -> &Matrix {
        &self.inner.features
    }

    fn labels(&self) -> &[usize] {
        &self.inner.labels
    }
}

/// Read an unlabelled matrix from CSV, e.g. a weight matrix with one class per row
pub fn read_matrix_csv<R: BufRead>(reader: R) -> Result<Matrix> {
    let mut rows = Vec::new();
    for (line_num, fields) in data_lines(reader, true)? {
        rows.push(parse_values(&fields, line_num)?);
    }

    if rows.is_empty() {
        return Err(LossError::EmptyDataset);
    }
    Matrix::from_rows(rows)
}

/// Read an unlabelled matrix from a CSV file
pub fn read_matrix_csv_file<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let file = File::open(path)?;
    read_matrix_csv(BufReader::new(file))
}

/// Split the non-empty, non-comment lines into trimmed fields
///
/// The header, when detected, may only be the first data line.
fn data_lines<R: BufRead>(
    reader: R,
    auto_detect_header: bool,
) -> Result<Vec<(usize, Vec<String>)>> {
    let mut lines = Vec::new();
    let mut seen_data = false;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !seen_data {
            seen_data = true;
            if auto_detect_header && is_header_line(line) {
                continue;
            }
        }

        let fields = line.split(',').map(|f| f.trim().to_string()).collect();
        lines.push((line_num, fields));
    }

    Ok(lines)
}

/// Check if a line appears to be a header
fn is_header_line(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').collect();

    let non_numeric_count = fields
        .iter()
        .filter(|field| field.trim().parse::<f64>().is_err())
        .count();

    non_numeric_count * 2 > fields.len()
}

fn parse_values(fields: &[String], line_num: usize) -> Result<Vec<f64>> {
    fields
        .iter()
        .enumerate()
        .map(|(col, field)| {
            field.parse::<f64>().map_err(|_| {
                LossError::Parse(format!(
                    "Invalid value on line {} at column {}: {}",
                    line_num + 1,
                    col + 1,
                    field
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_csv_basic() {
        let data = "1.0,2.0,1\n3.0,4.0,0\n";
        let dataset = CsvDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dim(), 2);
        assert_eq!(dataset.labels(), &[1, 0]);
        assert_eq!(dataset.features().row(1), &[3.0, 4.0]);
        assert_eq!(dataset.n_classes(), 2);
    }

    #[test]
    fn test_csv_label_is_last_column() {
        let data = "0.25,-1.5,3.75,2\n1.0,0.5,-0.125,0\n";
        let dataset = CsvDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.labels(), &[2, 0]);
        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.features().row(0), &[0.25, -1.5, 3.75]);
        assert_eq!(dataset.features().row(1), &[1.0, 0.5, -0.125]);
    }

    #[test]
    fn test_csv_with_headers() {
        let data = "feature1,feature2,label\n1.0,2.0,2\n3.0,4.0,0\n";
        let dataset = CsvDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels(), &[2, 0]);
    }

    #[test]
    fn test_csv_empty_lines_and_comments() {
        let data = "# Comment\n1.0,2.0,1\n\n3.0,4.0,0\n";
        let dataset = CsvDataset::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_csv_keeps_zero_features() {
        let data = "0.0,0.0,1\n";
        let dataset = CsvDataset::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.features().row(0), &[0.0, 0.0]);
    }

    #[test]
    fn test_csv_invalid_format() {
        // Too few fields
        assert!(CsvDataset::from_reader(Cursor::new("1.0\n")).is_err());

        // Invalid number
        assert!(matches!(
            CsvDataset::from_reader(Cursor::new("1.0,2.0,1\n1.0,abc,1\n")),
            Err(LossError::Parse(_))
        ));

        // Labels must be class indices
        assert!(CsvDataset::from_reader(Cursor::new("1.0,2.0,-1\n")).is_err());
        assert!(CsvDataset::from_reader(Cursor::new("1.0,2.0,0.5\n")).is_err());
    }

    #[test]
    fn test_csv_ragged_rows() {
        let data = "1.0,2.0,1\n3.0,0\n";
        assert!(matches!(
            CsvDataset::from_reader(Cursor::new(data)),
            Err(LossError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_csv_empty() {
        assert!(matches!(
            CsvDataset::from_reader(Cursor::new("# only a comment\n")),
            Err(LossError::EmptyDataset)
        ));
    }

    #[test]
    fn test_csv_manual_header_control() {
        let data = "a,b,c\n1.0,2.0,1\n";
        assert!(CsvDataset::from_reader_with_options(Cursor::new(data), false).is_err());
        assert_eq!(
            CsvDataset::from_reader_with_options(Cursor::new(data), true)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_is_header_line() {
        assert!(is_header_line("feature1,feature2,label"));
        assert!(is_header_line("x1,x2,x3,y"));
        assert!(!is_header_line("1.0,2.0,3.0,1"));
    }

    #[test]
    fn test_read_matrix_csv() {
        let data = "w0,w1,bias\n0.5,-1.0,0.0\n1.0,2.0,3.0\n";
        let w = read_matrix_csv(Cursor::new(data)).unwrap();
        assert_eq!(w.shape(), (2, 3));
        assert_eq!(w.row(1), &[1.0, 2.0, 3.0]);
    }
}
