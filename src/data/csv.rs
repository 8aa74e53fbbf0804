use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use ndarray::Array2;

use crate::common::{Error, FType};

/// Reads a rectangular numeric matrix from CSV, one sample per record.
///
/// Every record must have the same field count and every field must parse
/// as a number; ragged or non-numeric input is reported as
/// [`Error::InvalidInput`].
pub fn read_matrix<F, R>(reader: R, has_headers: bool) -> Result<Array2<F>, Error>
where
    F: FType + FromStr,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .from_reader(reader);

    let mut values: Vec<F> = Vec::new();
    let mut num_columns: Option<usize> = None;
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::InvalidInput(format!("csv: {e}")))?;
        match num_columns {
            None => num_columns = Some(record.len()),
            Some(expected) if record.len() != expected => {
                return Err(Error::InvalidInput(format!(
                    "record {line} has {} fields, expected {expected}",
                    record.len()
                )));
            }
            Some(_) => {}
        }
        for field in record.iter() {
            let value = field.trim().parse::<F>().map_err(|_| {
                Error::InvalidInput(format!("record {line}: cannot parse {field:?} as a number"))
            })?;
            values.push(value);
        }
    }

    let num_columns = num_columns.unwrap_or(0);
    if values.is_empty() {
        return Err(Error::InvalidInput("empty csv input".to_string()));
    }
    let num_rows = values.len() / num_columns;
    Array2::from_shape_vec((num_rows, num_columns), values)
        .map_err(|e| Error::InvalidInput(e.to_string()))
}

pub fn read_matrix_from_path<F, P>(path: P, has_headers: bool) -> Result<Array2<F>, Error>
where
    F: FType + FromStr,
    P: AsRef<Path>,
{
    let file =
        File::open(path).map_err(|e| Error::InvalidInput(format!("cannot open csv file: {e}")))?;
    read_matrix(BufReader::new(file), has_headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_matrix() {
        let content = "x,y,z\n1.0,2.0,3.0\n4.0,5.0,6.0\n";
        let matrix: Array2<f64> = read_matrix(Cursor::new(content), true).unwrap();

        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 3);
        assert_eq!(matrix[(1, 2)], 6.0);
    }

    #[test]
    fn test_read_matrix_without_headers() {
        let content = "1.5,-2.5\n0.0,3.0\n";
        let matrix: Array2<f32> = read_matrix(Cursor::new(content), false).unwrap();

        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix[(0, 1)], -2.5);
    }

    #[test]
    fn test_ragged_rows_are_invalid() {
        let content = "1.0,2.0\n3.0,4.0,5.0\n";
        let result: Result<Array2<f64>, Error> = read_matrix(Cursor::new(content), false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_non_numeric_field_is_invalid() {
        let content = "1.0,2.0\n3.0,oops\n";
        let result: Result<Array2<f64>, Error> = read_matrix(Cursor::new(content), false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let result: Result<Array2<f64>, Error> = read_matrix(Cursor::new(""), false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_read_matrix_from_path() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("points.csv");
        std::fs::write(&path, "0.0,0.1\n1.0,1.1\n2.0,2.1\n").expect("failed to write temp file");

        let matrix: Array2<f64> = read_matrix_from_path(&path, false).unwrap();
        assert_eq!(matrix.nrows(), 3);
        assert_eq!(matrix[(2, 1)], 2.1);
    }
}
