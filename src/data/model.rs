use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as read from the source file
// ---------------------------------------------------------------------------

/// A loosely-typed cell mirroring what a dataframe reader would infer.
/// CSV cells always arrive as `String`; JSON and Parquet keep their types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

/// Cell text a dataframe reader treats as a missing value.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl CellValue {
    /// Wrap raw text, mapping the empty cell and the usual missing-value
    /// markers (`NA`, `N/A`, `NULL`, `NaN`, ...) to `Null`.
    pub fn from_text(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() || MISSING_MARKERS.contains(&t) {
            CellValue::Null
        } else {
            CellValue::String(s.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Interpret the value as a number. Text is parsed after trimming.
    pub fn as_f64(&self) -> Result<Option<f64>> {
        match self {
            CellValue::Null => Ok(None),
            CellValue::Integer(i) => Ok(Some(*i as f64)),
            CellValue::Float(v) if v.is_nan() => Ok(None),
            CellValue::Float(v) => Ok(Some(*v)),
            CellValue::String(s) => s
                .trim()
                .parse::<f64>()
                .map(|v| (!v.is_nan()).then_some(v))
                .with_context(|| format!("'{s}' is not a number")),
        }
    }

    /// Plain text form; `Null` becomes `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Float(v) if v.is_nan() => None,
            other => Some(other.to_string()),
        }
    }

    /// Exact string form for identifier-like columns (trainee id, phone).
    ///
    /// A float with a zero fraction is written as an integer, so `445210.0`
    /// and `4.4521e5` both become `445210`. Any other text is returned as is,
    /// which keeps leading zeros of phone numbers.
    pub fn as_identifier(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Float(v) => format_float_identifier(*v),
            CellValue::String(s) => Some(normalize_identifier_text(s)),
        }
    }
}

fn format_float_identifier(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }
    if v.fract() == 0.0 {
        Some(format!("{v:.0}"))
    } else {
        // f64 Display never uses exponent notation.
        Some(format!("{v}"))
    }
}

/// Rewrite float-shaped text with a zero fraction as an integer string.
pub fn normalize_identifier_text(s: &str) -> String {
    let looks_like_float = s.contains(|c: char| matches!(c, '.' | 'e' | 'E'));
    if looks_like_float {
        if let Ok(v) = s.trim().parse::<f64>() {
            if v.is_finite() && v.fract() == 0.0 {
                return format!("{v:.0}");
            }
        }
    }
    s.to_string()
}

// ---------------------------------------------------------------------------
// Column – the fixed header set of the source file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Column {
    TraineeId,
    Name,
    Phone,
    Specialization,
    Department,
    Average,
    Status,
    Unit,
    CourseCode,
    CourseName,
    CreditUnits,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::TraineeId,
        Column::Name,
        Column::Phone,
        Column::Specialization,
        Column::Department,
        Column::Average,
        Column::Status,
        Column::Unit,
        Column::CourseCode,
        Column::CourseName,
        Column::CreditUnits,
    ];

    /// Header as written in the source data file.
    pub fn header(self) -> &'static str {
        match self {
            Column::TraineeId => "رقم المتدرب",
            Column::Name => "اسم المتدرب",
            Column::Phone => "رقم الجوال",
            Column::Specialization => "التخصص",
            Column::Department => "القسم",
            Column::Average => "المعدل التراكمي",
            Column::Status => "حالة المتدرب",
            Column::Unit => "الوحدة",
            Column::CourseCode => "رمز المقرر",
            Column::CourseName => "اسم المقرر",
            Column::CreditUnits => "الوحدات المعتمدة",
        }
    }

    /// ASCII alternative accepted in place of [`Column::header`].
    pub fn alias(self) -> &'static str {
        match self {
            Column::TraineeId => "trainee_id",
            Column::Name => "name",
            Column::Phone => "phone",
            Column::Specialization => "specialization",
            Column::Department => "department",
            Column::Average => "average",
            Column::Status => "status",
            Column::Unit => "unit",
            Column::CourseCode => "course_code",
            Column::CourseName => "course_name",
            Column::CreditUnits => "credit_units",
        }
    }

    /// `Unit` is the only column a file may omit.
    pub fn is_required(self) -> bool {
        !matches!(self, Column::Unit)
    }

    pub fn from_header(header: &str) -> Option<Column> {
        let h = header.trim().trim_start_matches('\u{feff}');
        Column::ALL
            .into_iter()
            .find(|c| c.header() == h || c.alias() == h)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One source row keyed by column, before typing.
pub type RawRow = BTreeMap<Column, CellValue>;

static NULL_CELL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// TrainingRecord – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecord {
    pub trainee_id: String,
    /// `None` when the cell is blank; such rows never match a name search.
    pub name: Option<String>,
    pub phone: String,
    pub specialization: String,
    pub department: String,
    pub average: Option<f64>,
    pub status: String,
    pub unit: Option<String>,
    pub course_code: String,
    pub course_name: String,
    /// Blank cells are `None` and are left out of unit totals.
    pub credit_units: Option<f64>,
}

impl TrainingRecord {
    /// Type a raw row. `row_no` is only used for error context.
    pub fn from_cells(row_no: usize, cells: &RawRow) -> Result<Self> {
        let cell = |c: Column| cells.get(&c).unwrap_or(&NULL_CELL);
        let text = |c: Column| cell(c).as_text().unwrap_or_default();
        let number = |c: Column| {
            cell(c)
                .as_f64()
                .with_context(|| format!("row {row_no}, column '{}'", c.header()))
        };

        let Some(trainee_id) = cell(Column::TraineeId).as_identifier() else {
            bail!("row {row_no}: missing trainee identifier");
        };

        Ok(TrainingRecord {
            trainee_id,
            name: cell(Column::Name).as_text(),
            phone: cell(Column::Phone).as_identifier().unwrap_or_default(),
            specialization: text(Column::Specialization),
            department: text(Column::Department),
            average: number(Column::Average)?,
            status: text(Column::Status),
            unit: cell(Column::Unit).as_text(),
            course_code: text(Column::CourseCode),
            course_name: text(Column::CourseName),
            credit_units: number(Column::CreditUnits)?,
        })
    }

    /// Column access by name, formatted for display.
    pub fn field(&self, column: Column) -> String {
        match column {
            Column::TraineeId => self.trainee_id.clone(),
            Column::Name => self.name.clone().unwrap_or_default(),
            Column::Phone => self.phone.clone(),
            Column::Specialization => self.specialization.clone(),
            Column::Department => self.department.clone(),
            Column::Average => format_optional_number(self.average),
            Column::Status => self.status.clone(),
            Column::Unit => self.unit.clone().unwrap_or_default(),
            Column::CourseCode => self.course_code.clone(),
            Column::CourseName => self.course_name.clone(),
            Column::CreditUnits => format_optional_number(self.credit_units),
        }
    }
}

/// Integral values print without a fraction; a missing value prints `-`.
pub fn format_optional_number(v: Option<f64>) -> String {
    match v {
        Some(v) => format_number(v),
        None => "-".to_string(),
    }
}

pub fn format_number(v: f64) -> String {
    // Display already drops the fraction of integral floats ("8", not "8.0").
    format!("{v}")
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// File the rows were read from.
    pub source: PathBuf,
    /// Recognised columns in header order.
    pub columns: Vec<Column>,
    pub rows: Vec<TrainingRecord>,
}

impl Dataset {
    pub fn new(source: PathBuf, columns: Vec<Column>, rows: Vec<TrainingRecord>) -> Self {
        Dataset {
            source,
            columns,
            rows,
        }
    }

    /// Number of rows (one per course enrolment).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// All values of one column in row order.
    pub fn column_values(&self, column: Column) -> Vec<String> {
        self.rows.iter().map(|r| r.field(column)).collect()
    }
}

// ---------------------------------------------------------------------------
// Trainee – rows grouped by identifier
// ---------------------------------------------------------------------------

/// Personal fields that are repeated on every row of a trainee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersonalField {
    Name,
    Phone,
    Specialization,
    Department,
    Average,
    Status,
}

impl PersonalField {
    pub const ALL: [PersonalField; 6] = [
        PersonalField::Name,
        PersonalField::Phone,
        PersonalField::Specialization,
        PersonalField::Department,
        PersonalField::Average,
        PersonalField::Status,
    ];

    pub fn column(self) -> Column {
        match self {
            PersonalField::Name => Column::Name,
            PersonalField::Phone => Column::Phone,
            PersonalField::Specialization => Column::Specialization,
            PersonalField::Department => Column::Department,
            PersonalField::Average => Column::Average,
            PersonalField::Status => Column::Status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseEntry {
    pub code: String,
    pub name: String,
    pub units: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trainee {
    pub trainee_id: String,
    pub name: Option<String>,
    pub phone: String,
    pub specialization: String,
    pub department: String,
    pub average: Option<f64>,
    pub status: String,
    /// One entry per source row, in source order.
    pub courses: Vec<CourseEntry>,
    /// Personal fields on which a later row disagrees with the first one.
    pub conflicting_fields: Vec<PersonalField>,
}

impl Trainee {
    /// Sum of the credit units of all listed courses.
    pub fn total_units(&self) -> f64 {
        self.courses.iter().filter_map(|c| c.units).sum()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("-")
    }
}
