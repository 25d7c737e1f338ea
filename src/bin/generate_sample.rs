use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use trainee_lookup::data::model::Column;

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const FIRST_NAMES: [&str; 8] = ["أحمد", "سلطان", "محمد", "سارة", "نورة", "عبدالله", "فهد", "ريم"];
const FAMILY_NAMES: [&str; 6] = ["العتيبي", "القحطاني", "الشهري", "الغامدي", "الحربي", "الزهراني"];
const STATUSES: [&str; 3] = ["منتظم", "منسحب", "مؤجل"];

/// (specialization, department, course catalogue of (code, name, units))
type Programme = (&'static str, &'static str, &'static [(&'static str, &'static str, f64)]);

const PROGRAMMES: [Programme; 2] = [
    (
        "الشبكات",
        "التقنية الحاسوبية",
        &[
            ("NET101", "مقدمة في الشبكات", 3.0),
            ("NET221", "توجيه الشبكات", 4.0),
            ("SEC110", "أمن المعلومات", 3.0),
            ("ENG101", "اللغة الإنجليزية", 2.0),
            ("MTH101", "الرياضيات", 3.0),
        ],
    ),
    (
        "البرمجيات",
        "التقنية الحاسوبية",
        &[
            ("PRG101", "أساسيات البرمجة", 4.0),
            ("DBS201", "قواعد البيانات", 3.0),
            ("WEB210", "تطوير الويب", 3.0),
            ("ENG101", "اللغة الإنجليزية", 2.0),
            ("ISL101", "الثقافة الإسلامية", 2.0),
        ],
    ),
];

struct SampleRow {
    trainee_id: f64,
    name: String,
    phone: String,
    specialization: &'static str,
    department: &'static str,
    average: f64,
    status: &'static str,
    course_code: &'static str,
    course_name: &'static str,
    units: f64,
}

fn generate_rows(rng: &mut SimpleRng, trainees: usize) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for i in 0..trainees {
        let trainee_id = 443_210_000.0 + i as f64;
        let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&FAMILY_NAMES));
        let phone = format!("05{:08}", rng.next_u64() % 100_000_000);
        let (specialization, department, catalogue) = *rng.pick(&PROGRAMMES);
        let average = ((2.0 + rng.next_f64() * 3.0) * 100.0).round() / 100.0;
        let status = *rng.pick(&STATUSES);

        let courses = 2 + rng.below(catalogue.len() - 1);
        for &(course_code, course_name, units) in catalogue.iter().take(courses) {
            rows.push(SampleRow {
                trainee_id,
                name: name.clone(),
                phone: phone.clone(),
                specialization,
                department,
                average,
                status,
                course_code,
                course_name,
                units,
            });
        }
    }
    rows
}

const COLUMNS: [Column; 10] = [
    Column::TraineeId,
    Column::Name,
    Column::Phone,
    Column::Specialization,
    Column::Department,
    Column::Average,
    Column::Status,
    Column::CourseCode,
    Column::CourseName,
    Column::CreditUnits,
];

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(COLUMNS.map(Column::header))?;
    for r in rows {
        writer.write_record([
            format!("{:.0}", r.trainee_id),
            r.name.clone(),
            r.phone.clone(),
            r.specialization.to_string(),
            r.department.to_string(),
            r.average.to_string(),
            r.status.to_string(),
            r.course_code.to_string(),
            r.course_name.to_string(),
            r.units.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Trainee numbers are written as Float64, the way a dataframe export
/// stores an integer column that once held a missing value.
fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let strings = |f: fn(&SampleRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&SampleRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|c| {
                let data_type = match c {
                    Column::TraineeId | Column::Average | Column::CreditUnits => DataType::Float64,
                    _ => DataType::Utf8,
                };
                Field::new(c.header(), data_type, false)
            })
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            floats(|r| r.trainee_id),
            strings(|r| r.name.as_str()),
            strings(|r| r.phone.as_str()),
            strings(|r| r.specialization),
            strings(|r| r.department),
            floats(|r| r.average),
            strings(|r| r.status),
            strings(|r| r.course_code),
            strings(|r| r.course_name),
            floats(|r| r.units),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic sample trainee table as CSV and Parquet", long_about = None)]
struct Args {
    /// Directory the sample files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Number of trainees to generate
    #[arg(short, long, default_value_t = 12)]
    trainees: usize,
}

fn main() -> Result<()> {
    let Args { out_dir, trainees } = Args::parse();
    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, trainees);

    let csv_path = out_dir.join("sample_trainees.csv");
    write_csv(&csv_path, &rows)?;
    let parquet_path = out_dir.join("sample_trainees.parquet");
    write_parquet(&parquet_path, &rows)?;

    println!(
        "Wrote {} course rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
