use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Column, Dataset, RawRow, TrainingRecord};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the trainee table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`              – comma-separated, header row first (default)
/// * `.tsv` / `.tab`     – tab-separated
/// * `.json`             – `[{ "رقم المتدرب": 445210, ... }, ...]`
/// * `.parquet` / `.pq`  – one column per header, any scalar type
///
/// A missing or unreadable file is reported as [`DataError::Unavailable`];
/// callers treat it as an ordinary "no data" state.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    if !path.is_file() {
        log::error!("Data file not found: {}", path.display());
        return Err(DataError::unavailable(path, "file not found"));
    }

    match read_dataset(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows from {} with columns {:?}",
                dataset.len(),
                path.display(),
                dataset.columns
            );
            Ok(dataset)
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            Err(DataError::unavailable(path, format!("{e:#}")))
        }
    }
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, rows) = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path)?,
        "json" => read_json(path)?,
        "tsv" | "tab" => read_delimited(path, b'\t')?,
        _ => read_delimited(path, b',')?,
    };

    build_dataset(path, columns, rows)
}

/// Check the header set and type every row.
fn build_dataset(path: &Path, columns: Vec<Column>, rows: Vec<RawRow>) -> Result<Dataset> {
    for required in Column::ALL.into_iter().filter(|c| c.is_required()) {
        if !columns.contains(&required) {
            bail!(
                "missing required column '{}' ({})",
                required.header(),
                required.alias()
            );
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (row_no, cells) in rows.iter().enumerate() {
        if cells.values().all(CellValue::is_null) {
            skipped += 1;
            continue;
        }
        records.push(TrainingRecord::from_cells(row_no, cells)?);
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} blank rows in {}", path.display());
    }

    Ok(Dataset::new(path.to_path_buf(), columns, records))
}

/// Map source headers to known columns. Unknown headers map to `None`;
/// a repeated header keeps its first position.
fn map_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<Option<Column>> {
    let mut seen = Vec::new();
    headers
        .into_iter()
        .map(|h| {
            let column = Column::from_header(h).filter(|c| !seen.contains(c));
            match column {
                Some(c) => seen.push(c),
                None => log::debug!("Ignoring column '{h}'"),
            }
            column
        })
        .collect()
}

fn present_columns(mapping: &[Option<Column>]) -> Vec<Column> {
    mapping.iter().flatten().copied().collect()
}

// ---------------------------------------------------------------------------
// CSV / TSV reader
// ---------------------------------------------------------------------------

/// Header row with column names, one course enrolment per line.
/// Every cell is kept as text; typing happens in [`TrainingRecord::from_cells`].
fn read_delimited(path: &Path, delimiter: u8) -> Result<(Vec<Column>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("opening delimited file")?;

    let mapping = map_headers(reader.headers().context("reading headers")?.iter());

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        let mut cells = RawRow::new();
        for (value, column) in record.iter().zip(&mapping) {
            if let Some(column) = column {
                cells.insert(*column, CellValue::from_text(value));
            }
        }
        rows.push(cells);
    }

    Ok((present_columns(&mapping), rows))
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "رقم المتدرب": 445210, "اسم المتدرب": "Ahmad", "الوحدات المعتمدة": 3, ... },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<(Vec<Column>, Vec<RawRow>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("expected top-level JSON array")?;

    let mut columns: Vec<Column> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;

        let mut cells = RawRow::new();
        for (key, val) in obj {
            let Some(column) = Column::from_header(key) else {
                continue;
            };
            if !columns.contains(&column) {
                columns.push(column);
            }
            cells.insert(column, json_to_cell(val));
        }
        rows.push(cells);
    }

    Ok((columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::from_text(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Identifier columns often arrive as Float64 here, which is why
/// [`CellValue::as_identifier`] exists.
fn read_parquet(path: &Path) -> Result<(Vec<Column>, Vec<RawRow>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let mapping = map_headers(builder.schema().fields().iter().map(|f| f.name().as_str()));
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let mut cells = RawRow::new();
            for (col_idx, column) in mapping.iter().enumerate() {
                let Some(column) = column else { continue };
                let value = extract_cell(batch.column(col_idx), row)
                    .with_context(|| format!("row {row}, column '{}'", column.header()))?;
                cells.insert(*column, value);
            }
            rows.push(cells);
        }
    }

    Ok((present_columns(&mapping), rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::from_text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => CellValue::from_text(col.as_string::<i64>().value(row)),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => {
            CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => CellValue::String(
            array_value_to_string(col, row).context("formatting parquet value")?,
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::grouping::group;
    use crate::report::render;

    const HEADER: &str = "رقم المتدرب,اسم المتدرب,رقم الجوال,التخصص,القسم,المعدل التراكمي,حالة المتدرب,رمز المقرر,اسم المقرر,الوحدات المعتمدة";

    fn write_temp(ext: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .expect("create temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_load_csv_normalizes_identifiers() {
        let csv = format!(
            "{HEADER}\n445210.0,Ahmad,0551234567,Networks,Computer,3.5,Active,CS101,Intro,3\n"
        );
        let file = write_temp(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].trainee_id, "445210");
        assert_eq!(ds.rows[0].phone, "0551234567");
        assert_eq!(ds.rows[0].average, Some(3.5));
        assert_eq!(ds.rows[0].credit_units, Some(3.0));
        assert!(!ds.has_column(Column::Unit));
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_missing_required_column() {
        let file = write_temp(".csv", "trainee_id,name\n1,Ahmad\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn test_load_tsv_with_aliases_and_unit() {
        let tsv = "trainee_id\tname\tphone\tspecialization\tdepartment\taverage\tstatus\tunit\tcourse_code\tcourse_name\tcredit_units\textra\n\
                   7\tSara\t0500\tNet\tIT\t\tActive\tU1\tC1\tCourse\t2\tignored\n";
        let file = write_temp(".tsv", tsv);

        let ds = load_file(file.path()).unwrap();
        assert!(ds.has_column(Column::Unit));
        assert_eq!(ds.rows[0].unit.as_deref(), Some("U1"));
        assert_eq!(ds.rows[0].average, None);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let csv = format!("{HEADER}\n,,,,,,,,,\n1,A,1,S,D,1,X,C,N,1\n");
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_load_json_records() {
        let json = r#"[
            {"trainee_id": 445210.0, "name": "Ahmad", "phone": 551234567, "specialization": "Net",
             "department": "IT", "average": 4.1, "status": "Active", "course_code": "C1",
             "course_name": "Intro", "credit_units": 3},
            {"trainee_id": "998111", "name": null, "phone": "0500", "specialization": "Net",
             "department": "IT", "average": null, "status": "Active", "course_code": "C2",
             "course_name": "Nets", "credit_units": 2}
        ]"#;
        let file = write_temp(".json", json);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.rows[0].trainee_id, "445210");
        assert_eq!(ds.rows[0].phone, "551234567");
        assert_eq!(ds.rows[1].name, None);
    }

    #[test]
    fn test_missing_value_markers_load_as_none() {
        let csv = format!(
            "{HEADER}\n1,Ali,05,S,D,4,A,C1,N1,3\n1,Ali,05,S,D,4,A,C2,N2,N/A\n2,Huda,06,S,D,NULL,A,C1,N1,NA\n"
        );
        let file = write_temp(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[1].credit_units, None);
        assert_eq!(ds.rows[1].field(Column::CreditUnits), "-");
        assert_eq!(ds.rows[2].average, None);

        let ali = group(&ds, "1").unwrap();
        assert_eq!(ali.total_units(), 3.0);
        assert_eq!(render(&ali).courses.rows[1][2], "-");
    }

    #[test]
    fn test_nan_cells_do_not_poison_totals_or_flag_conflicts() {
        let csv = format!("{HEADER}\n1,Ali,05,S,D,NaN,A,C1,N1,3\n1,Ali,05,S,D,NaN,A,C2,N2,NaN\n");
        let file = write_temp(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        let ali = group(&ds, "1").unwrap();
        assert_eq!(ali.average, None);
        assert_eq!(ali.total_units(), 3.0);
        assert!(ali.conflicting_fields.is_empty());
        assert_eq!(render(&ali).total_units_text(), "3");
    }

    #[test]
    fn test_unparsable_units_is_unavailable() {
        let csv = format!("{HEADER}\n1,A,1,S,D,1,X,C,N,three\n");
        let file = write_temp(".csv", &csv);
        let err = load_file(file.path()).unwrap_err();
        assert!(err.is_unavailable());
    }
}
