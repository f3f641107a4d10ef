use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    TimeUnit, TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, Date32Type, Date64Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::temporal_conversions::{
    date32_to_datetime, date64_to_datetime, timestamp_ms_to_datetime, timestamp_ns_to_datetime,
    timestamp_s_to_datetime, timestamp_us_to_datetime,
};
use chrono::NaiveDateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::frame::{parse_timestamp, Cell, Frame, TableError};
use super::model::{
    CounterId, CounterMetadata, CounterTable, Dataset, Granularity, RidershipRecord,
    RidershipTable,
};

/// Extensions tried for each table, most preferred first.
pub const EXTENSIONS: [&str; 4] = ["parquet", "pq", "json", "csv"];

pub const COUNTERS_STEM: &str = "counters";
pub const RETRIEVAL_STEM: &str = "retrieval_date";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every table of a data directory.
pub fn load_dir(dir: &Path) -> Result<Dataset> {
    let load = |g: Granularity| -> Result<RidershipTable> {
        let path = find_table(dir, g.file_stem())?;
        log::debug!("Reading {g} table from {}", path.display());
        let frame = load_file(&path).with_context(|| format!("loading {}", path.display()))?;
        Ok(ridership_from_frame(&frame, g)?)
    };
    let hourly = load(Granularity::Hourly)?;
    let weekly = load(Granularity::Weekly)?;
    let historical = load(Granularity::HistoricalWeekly)?;

    let counters_path = find_table(dir, COUNTERS_STEM)?;
    let counters_frame = load_file(&counters_path)
        .with_context(|| format!("loading {}", counters_path.display()))?;
    let counters = counters_from_frame(&counters_frame)?;

    let retrieved_at = load_retrieval_date(dir)?;

    log::info!(
        "Loaded {} counters; {} hourly, {} weekly, {} historical rows from {}",
        counters.len(),
        hourly.len(),
        weekly.len(),
        historical.len(),
        dir.display()
    );

    Ok(Dataset {
        hourly,
        weekly,
        historical,
        counters,
        retrieved_at,
    })
}

/// Load a single table file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – as written by `df.to_parquet()` (recommended)
/// * `.json`            – `[{ "id": ..., "date": ..., ... }, ...]`
/// * `.csv`             – header row with column names
pub fn load_file(path: &Path) -> Result<Frame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Locate `<stem>.<ext>` in `dir`, preferring [`EXTENSIONS`] order.
pub fn find_table(dir: &Path, stem: &str) -> Result<PathBuf, TableError> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| TableError::MissingTable {
            stem: stem.to_string(),
            dir: dir.display().to_string(),
        })
}

/// Read the retrieval timestamp from `retrieval_date.txt` or
/// `retrieval_date.json`. A missing file is not an error.
pub fn load_retrieval_date(dir: &Path) -> Result<Option<NaiveDateTime>> {
    let txt = dir.join(format!("{RETRIEVAL_STEM}.txt"));
    if txt.is_file() {
        let text = std::fs::read_to_string(&txt).context("reading retrieval date")?;
        let ts = parse_timestamp(&text)
            .with_context(|| format!("{}: '{}' is not a timestamp", txt.display(), text.trim()))?;
        return Ok(Some(ts));
    }

    let json = dir.join(format!("{RETRIEVAL_STEM}.json"));
    if json.is_file() {
        let text = std::fs::read_to_string(&json).context("reading retrieval date")?;
        let value: JsonValue = serde_json::from_str(&text).context("parsing retrieval date JSON")?;
        let ts = json_to_cell(&value)
            .as_timestamp()
            .with_context(|| format!("{}: {value} is not a timestamp", json.display()))?;
        return Ok(Some(ts));
    }

    log::warn!("No retrieval date in {}", dir.display());
    Ok(None)
}

// ---------------------------------------------------------------------------
// Typing frames into domain tables
// ---------------------------------------------------------------------------

/// Build a ridership table from columns `id`, `date`, `counts` and the
/// granularity's optional display column.
pub fn ridership_from_frame(frame: &Frame, granularity: Granularity) -> Result<RidershipTable, TableError> {
    let id_col = frame.column("id")?;
    let date_col = frame.column("date")?;
    let count_col = frame.column("counts")?;
    let display_col = granularity
        .display_column()
        .and_then(|c| frame.optional_column(c));

    let mut records = Vec::with_capacity(frame.rows.len());
    for row in 0..frame.rows.len() {
        let timestamp = frame.typed(row, date_col, Cell::as_timestamp)?;
        let display_time = match display_col {
            Some(col) => frame.typed(row, col, Cell::as_timestamp)?,
            None => timestamp,
        };
        records.push(RidershipRecord {
            counter_id: CounterId::new(frame.typed(row, id_col, Cell::as_text)?),
            timestamp,
            display_time,
            count: frame.typed(row, count_col, Cell::as_f64)?,
        });
    }
    Ok(RidershipTable::new(granularity, records))
}

/// Build the counter table from columns `id`, `name`, `latitude`,
/// `longitude`, `color`.
pub fn counters_from_frame(frame: &Frame) -> Result<CounterTable, TableError> {
    let id_col = frame.column("id")?;
    let name_col = frame.column("name")?;
    let lat_col = frame.column("latitude")?;
    let lon_col = frame.column("longitude")?;
    let color_col = frame.column("color")?;

    let mut counters = Vec::with_capacity(frame.rows.len());
    for row in 0..frame.rows.len() {
        counters.push(CounterMetadata {
            id: CounterId::new(frame.typed(row, id_col, Cell::as_text)?),
            name: frame.typed(row, name_col, Cell::as_text)?,
            latitude: frame.typed(row, lat_col, Cell::as_f64)?,
            longitude: frame.typed(row, lon_col, Cell::as_f64)?,
            color: frame.cell(row, color_col).as_text().unwrap_or_default(),
        });
    }
    Ok(CounterTable::new(counters))
}

fn frame_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.reset_index().to_json(orient='records')`):
///
/// ```json
/// [
///   { "id": 100009425, "date": 1672531200000, "counts": 312.0 },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys are null.
fn load_json(path: &Path) -> Result<Frame> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut frame = Frame::new(frame_name(path), columns);
    for rec in records {
        let row: Vec<Cell> = frame
            .columns
            .iter()
            .map(|col| rec.get(col).map(json_to_cell).unwrap_or(Cell::Null))
            .collect();
        frame.rows.push(row);
    }
    Ok(frame)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Frame> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut frame = Frame::new(frame_name(path), columns);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        frame.rows.push(record.iter().map(Cell::guess).collect());
    }
    Ok(frame)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Works with files written by both **Pandas**
/// (`df.to_parquet()`, including categorical columns) and **Polars**.
fn load_parquet(path: &Path) -> Result<Frame> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut frame = Frame::new(frame_name(path), columns);

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let arrays = batch
            .columns()
            .iter()
            .map(decode_dictionary)
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            let cells = arrays
                .iter()
                .zip(&frame.columns)
                .map(|(col, name)| {
                    arrow_cell(col, row).with_context(|| format!("reading column '{name}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            frame.rows.push(cells);
        }
    }
    Ok(frame)
}

// -- Parquet / Arrow helpers --

/// Categorical columns arrive dictionary-encoded; unpack them to plain values.
fn decode_dictionary(col: &Arc<dyn Array>) -> Result<Arc<dyn Array>> {
    match col.data_type() {
        DataType::Dictionary(_, value_type) => {
            arrow::compute::cast(col, value_type).context("decoding dictionary column")
        }
        _ => Ok(Arc::clone(col)),
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let timestamp = |t: Option<NaiveDateTime>| t.map(Cell::Timestamp).unwrap_or(Cell::Null);
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => Cell::Text(col.as_string_view().value(row).to_string()),
        DataType::Int8 => Cell::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Cell::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Cell::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => Cell::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => Cell::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => Cell::Float(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float16 => Cell::Float(col.as_primitive::<Float16Type>().value(row).to_f64()),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        DataType::Date32 => timestamp(date32_to_datetime(col.as_primitive::<Date32Type>().value(row))),
        DataType::Date64 => timestamp(date64_to_datetime(col.as_primitive::<Date64Type>().value(row))),
        DataType::Timestamp(TimeUnit::Second, _) => timestamp(timestamp_s_to_datetime(
            col.as_primitive::<TimestampSecondType>().value(row),
        )),
        DataType::Timestamp(TimeUnit::Millisecond, _) => timestamp(timestamp_ms_to_datetime(
            col.as_primitive::<TimestampMillisecondType>().value(row),
        )),
        DataType::Timestamp(TimeUnit::Microsecond, _) => timestamp(timestamp_us_to_datetime(
            col.as_primitive::<TimestampMicrosecondType>().value(row),
        )),
        DataType::Timestamp(TimeUnit::Nanosecond, _) => timestamp(timestamp_ns_to_datetime(
            col.as_primitive::<TimestampNanosecondType>().value(row),
        )),
        other => bail!("unsupported Arrow column type {other}"),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    const COUNTERS_CSV: &str = "\
id,name,latitude,longitude,color
100009425,Brooklyn Br,40.7046,-73.9922,#1f77b4
100010019,Manhattan Br,40.7075,-73.9908,#ff7f0e
";

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn csv_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let p = dir.path();
        write(
            p,
            "by_hr.csv",
            "id,date,display_time,counts\n\
             100009425,2023-05-01 07:00:00,1970-01-01 07:00:00,120\n\
             100010019,2023-05-01 07:00:00,1970-01-01 07:00:00,80.5\n",
        );
        write(
            p,
            "by_wk.csv",
            "id,date,display_date,counts\n100009425,2023-05-01,2000-05-01,900\n",
        );
        write(
            p,
            "hist_by_wk.csv",
            "id,date,counts\n100009425,2019-01-07,700\n100010019,2019-01-07,650\n",
        );
        write(p, "counters.csv", COUNTERS_CSV);
        write(p, "retrieval_date.txt", "2023-05-08 12:30:00\n");
        dir
    }

    #[test]
    fn loads_a_csv_directory() {
        let dir = csv_dir();
        let ds = load_dir(dir.path()).unwrap();

        assert_eq!(ds.hourly.len(), 2);
        assert_eq!(ds.weekly.len(), 1);
        assert_eq!(ds.historical.len(), 2);
        assert_eq!(ds.counters.len(), 2);

        let first = &ds.hourly.records[0];
        assert_eq!(first.counter_id, CounterId::new("100009425"));
        assert_eq!(first.count, 120.0);
        assert_eq!(
            first.display_time,
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(7, 0, 0).unwrap()
        );
        // no display column → display_time mirrors the key
        let hist = &ds.historical.records[0];
        assert_eq!(hist.display_time, hist.timestamp);

        assert_eq!(ds.counters.counters[1].name, "Manhattan Br");
        assert_eq!(ds.counters.counters[1].color, "#ff7f0e");
        assert_eq!(
            ds.retrieved_at,
            NaiveDate::from_ymd_opt(2023, 5, 8).unwrap().and_hms_opt(12, 30, 0)
        );
    }

    #[test]
    fn json_tables_use_epoch_millis_and_win_over_csv() {
        let dir = csv_dir();
        write(
            dir.path(),
            "hist_by_wk.json",
            r#"[
                {"id": 100009425, "date": 1672531200000, "counts": 1.0},
                {"id": 100010019, "date": "2023-01-08", "counts": 2}
            ]"#,
        );
        let ds = load_dir(dir.path()).unwrap();
        let dates: Vec<NaiveDate> = ds.historical.records.iter().map(|r| r.timestamp.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 8).unwrap(),
            ]
        );
        assert_eq!(find_table(dir.path(), "hist_by_wk").unwrap(), dir.path().join("hist_by_wk.json"));
    }

    #[test]
    fn parquet_tables_decode_timestamps_and_categories() {
        use arrow::array::{
            DictionaryArray, Float64Array, Int64Array, StringArray, TimestampNanosecondArray,
        };
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let dir = csv_dir();
        let jan8 = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let nanos = jan8.and_utc().timestamp_nanos_opt().unwrap();

        let ids: DictionaryArray<Int32Type> = vec!["100009425", "100010019"].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", ids.data_type().clone(), false),
            Field::new("date", DataType::Timestamp(TimeUnit::Nanosecond, None), false),
            Field::new("counts", DataType::Float64, false),
            Field::new("note", DataType::Utf8, true),
            Field::new("week_no", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(ids),
                Arc::new(TimestampNanosecondArray::from(vec![nanos, nanos])),
                Arc::new(Float64Array::from(vec![3200.0, 2800.0])),
                Arc::new(StringArray::from(vec![Some("holiday"), None])),
                Arc::new(Int64Array::from(vec![1, 1])),
            ],
        )
        .unwrap();
        let file = fs::File::create(dir.path().join("hist_by_wk.parquet")).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let frame = load_file(&dir.path().join("hist_by_wk.parquet")).unwrap();
        assert_eq!(frame.columns, vec!["id", "date", "counts", "note", "week_no"]);
        assert_eq!(frame.rows[0][3], Cell::Text("holiday".into()));
        assert_eq!(frame.rows[1][3], Cell::Null);
        assert_eq!(frame.rows[0][4], Cell::Integer(1));

        let ds = load_dir(dir.path()).unwrap();
        assert_eq!(ds.historical.len(), 2);
        assert_eq!(ds.historical.records[1].counter_id, CounterId::new("100010019"));
        assert_eq!(ds.historical.records[0].timestamp, jan8);
        assert_eq!(ds.historical.records[0].count, 3200.0);
    }

    #[test]
    fn parquet_small_unsigned_counts_are_numbers() {
        use arrow::array::{Int64Array, TimestampMicrosecondArray, UInt16Array, UInt8Array};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let dir = csv_dir();
        let jan8 = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("date", DataType::Timestamp(TimeUnit::Microsecond, None), false),
            Field::new("counts", DataType::UInt16, false),
            Field::new("lanes", DataType::UInt8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![100009425])),
                Arc::new(TimestampMicrosecondArray::from(vec![jan8.and_utc().timestamp_micros()])),
                Arc::new(UInt16Array::from(vec![42])),
                Arc::new(UInt8Array::from(vec![2])),
            ],
        )
        .unwrap();
        let file = fs::File::create(dir.path().join("hist_by_wk.parquet")).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let frame = load_file(&dir.path().join("hist_by_wk.parquet")).unwrap();
        assert_eq!(frame.rows[0][2], Cell::Integer(42));
        assert_eq!(frame.rows[0][3], Cell::Integer(2));

        let table = ridership_from_frame(&frame, Granularity::HistoricalWeekly).unwrap();
        assert_eq!(table.records[0].count, 42.0);
        assert_eq!(table.records[0].counter_id, CounterId::new("100009425"));
    }

    #[test]
    fn parquet_unsupported_column_type_is_an_error() {
        use arrow::array::{BinaryArray, Int64Array};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("by_hr.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("blob", DataType::Binary, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(BinaryArray::from(vec![b"raw".as_ref()])),
            ],
        )
        .unwrap();
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = format!("{:#}", load_file(&path).unwrap_err());
        assert!(err.contains("column 'blob'"), "{err}");
        assert!(err.contains("unsupported Arrow column type Binary"), "{err}");
    }

    #[test]
    fn missing_retrieval_date_is_tolerated() {
        let dir = csv_dir();
        fs::remove_file(dir.path().join("retrieval_date.txt")).unwrap();
        assert_eq!(load_dir(dir.path()).unwrap().retrieved_at, None);

        write(dir.path(), "retrieval_date.json", r#""2023-06-01T08:00:00""#);
        assert_eq!(
            load_retrieval_date(dir.path()).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap().and_hms_opt(8, 0, 0)
        );
    }

    #[test]
    fn missing_column_is_named() {
        let dir = csv_dir();
        write(dir.path(), "by_wk.csv", "id,week,counts\n1,2023-05-01,3\n");
        let err = load_dir(dir.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::MissingColumn {
                table: "by_wk".into(),
                column: "date".into(),
            })
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = csv_dir();
        fs::remove_file(dir.path().join("counters.csv")).unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MissingTable { stem, .. }) if stem == "counters"
        ));
    }

    #[test]
    fn bad_count_reports_row() {
        let dir = csv_dir();
        write(dir.path(), "hist_by_wk.csv", "id,date,counts\n1,2019-01-07,\n");
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::InvalidValue { row: 0, column, .. }) if column == "counts"
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("by_hr.pkl");
        write(dir.path(), "by_hr.pkl", "");
        let err = load_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .pkl");
    }
}
