use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::ArrowWriter;

/// (id, name, latitude, longitude, color, weekday riders per hour at peak)
const COUNTERS: [(i64, &str, f64, f64, &str, f64); 6] = [
    (100009425, "Brooklyn Br", 40.7046, -73.9922, "#1f77b4", 420.0),
    (100010019, "Manhattan Br", 40.7075, -73.9908, "#ff7f0e", 510.0),
    (100010020, "Williamsburg Br", 40.7134, -73.9716, "#2ca02c", 640.0),
    (100057320, "Queensboro Br", 40.7570, -73.9540, "#d62728", 380.0),
    (100062893, "Kent Ave", 40.7203, -73.9615, "#9467bd", 150.0),
    (100005020, "Pulaski Br", 40.7390, -73.9520, "#8c564b", 110.0),
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Commuter profile: morning and evening peaks over a daytime base.
fn hourly_share(hour: f64) -> f64 {
    0.08 + gaussian(hour, 8.5, 1.3, 0.9) + gaussian(hour, 17.8, 1.6, 1.0) + gaussian(hour, 13.0, 3.5, 0.25)
}

/// Seasonal factor, highest mid-summer.
fn seasonal(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    let day = date.ordinal() as f64;
    0.65 + 0.35 * (2.0 * std::f64::consts::PI * (day - 105.0) / 365.0).sin()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative noise around 1.0.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (self.next_f64() * 2.0 - 1.0)
    }
}

/// Columnar rows of one ridership table.
#[derive(Default)]
struct Columns {
    id: Vec<i64>,
    date: Vec<i64>,
    display: Vec<i64>,
    counts: Vec<f64>,
}

impl Columns {
    fn push(&mut self, id: i64, date: NaiveDateTime, display: NaiveDateTime, count: f64) {
        self.id.push(id);
        self.date.push(date.and_utc().timestamp_micros());
        self.display.push(display.and_utc().timestamp_micros());
        self.counts.push(count.round());
    }

    fn write_parquet(self, path: &Path, display_column: Option<&str>) -> Result<()> {
        let ts = DataType::Timestamp(TimeUnit::Microsecond, None);
        let mut fields = vec![
            Field::new("id", DataType::Int64, false),
            Field::new("date", ts.clone(), false),
        ];
        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(self.id)),
            Arc::new(TimestampMicrosecondArray::from(self.date)),
        ];
        if let Some(name) = display_column {
            fields.push(Field::new(name, ts, false));
            arrays.push(Arc::new(TimestampMicrosecondArray::from(self.display)));
        }
        fields.push(Field::new("counts", DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(self.counts)));

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
        writer.write(&batch).context("writing parquet batch")?;
        writer.close().context("closing parquet writer")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN);

    let retrieved = NaiveDate::from_ymd_opt(2023, 5, 8)
        .context("invalid retrieval date")?
        .and_hms_opt(6, 15, 0)
        .context("invalid retrieval time")?;
    let last_week = retrieved.date() - Duration::days(7);
    let history_start = NaiveDate::from_ymd_opt(2015, 1, 5).context("invalid history start")?;
    let display_epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid display epoch")?;

    // Average hour of day over the last week.
    let mut hourly = Columns::default();
    for &(id, _, _, _, _, peak) in &COUNTERS {
        for hour in 0..24u32 {
            let at = midnight(last_week) + Duration::hours(hour as i64);
            let display = midnight(display_epoch) + Duration::hours(hour as i64);
            let count = peak * hourly_share(hour as f64) * rng.jitter(0.1);
            hourly.push(id, at, display, count);
        }
    }

    // Weekly totals over the last year, and since 2015.
    let mut weekly = Columns::default();
    let mut historical = Columns::default();
    let weeks_since_start = (last_week - history_start).num_weeks();
    for &(id, _, _, _, _, peak) in &COUNTERS {
        let week_total = peak * (0..24).map(|h| hourly_share(h as f64)).sum::<f64>() * 6.0;
        for w in 0..=weeks_since_start {
            let week = history_start + Duration::weeks(w);
            let count = week_total * seasonal(week) * rng.jitter(0.15);
            historical.push(id, midnight(week), midnight(week), count);
            if last_week - week < Duration::weeks(52) {
                weekly.push(id, midnight(week), midnight(week), count);
            }
        }
    }

    let n_hourly = hourly.id.len();
    let n_weekly = weekly.id.len();
    let n_historical = historical.id.len();
    hourly.write_parquet(&out_dir.join("by_hr.parquet"), Some("display_time"))?;
    weekly.write_parquet(&out_dir.join("by_wk.parquet"), Some("display_date"))?;
    historical.write_parquet(&out_dir.join("hist_by_wk.parquet"), None)?;

    let counters_path = out_dir.join("counters.csv");
    let mut writer = csv::Writer::from_path(&counters_path)
        .with_context(|| format!("creating {}", counters_path.display()))?;
    writer.write_record(["id", "name", "latitude", "longitude", "color"])?;
    for &(id, name, lat, lon, color, _) in &COUNTERS {
        writer.write_record([
            id.to_string(),
            name.to_string(),
            lat.to_string(),
            lon.to_string(),
            color.to_string(),
        ])?;
    }
    writer.flush()?;

    std::fs::write(
        out_dir.join("retrieval_date.txt"),
        retrieved.format("%Y-%m-%d %H:%M:%S").to_string(),
    )?;

    println!(
        "Wrote {} counters, {n_hourly} hourly, {n_weekly} weekly and {n_historical} historical rows to {}",
        COUNTERS.len(),
        out_dir.display()
    );
    Ok(())
}
