use serde::Serialize;

use crate::data::model::{Column, Trainee, format_number, format_optional_number};

pub const TITLE: &str = "تقرير بيانات المتدرب";
pub const TOTAL_UNITS_LABEL: &str = "مجموع الوحدات المعتمدة";
pub const FOOTER: &str = "تم إنشاء هذا التقرير آلياً بواسطة نظام استعلام المتدربين";

/// Course table columns, in display order.
pub const COURSE_COLUMNS: [Column; 3] = [Column::CourseCode, Column::CourseName, Column::CreditUnits];

// ---------------------------------------------------------------------------
// Document – the format-independent report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseTable {
    pub headers: [String; 3],
    /// One row per course entry: code, name, credit units.
    pub rows: Vec<[String; 3]>,
}

/// A trainee report: title, six personal fields, course table, unit total
/// and a footer. HTML and text renderings are built from this value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub trainee_id: String,
    pub title: String,
    pub personal: Vec<LabeledField>,
    pub courses: CourseTable,
    pub total_units: f64,
    pub total_units_label: String,
    pub footer: String,
}

impl Document {
    pub fn total_units_text(&self) -> String {
        format_number(self.total_units)
    }
}

/// Build the report for one trainee. The unit total covers the listed
/// courses only.
pub fn render(trainee: &Trainee) -> Document {
    let personal = [
        ("الاسم", trainee.display_name().to_string()),
        (Column::TraineeId.header(), trainee.trainee_id.clone()),
        (Column::Specialization.header(), trainee.specialization.clone()),
        (Column::Department.header(), trainee.department.clone()),
        (Column::Average.header(), format_optional_number(trainee.average)),
        (Column::Status.header(), trainee.status.clone()),
    ]
    .into_iter()
    .map(|(label, value)| LabeledField {
        label: label.to_string(),
        value,
    })
    .collect();

    let rows = trainee
        .courses
        .iter()
        .map(|c| {
            [
                c.code.clone(),
                c.name.clone(),
                format_optional_number(c.units),
            ]
        })
        .collect();

    Document {
        trainee_id: trainee.trainee_id.clone(),
        title: TITLE.to_string(),
        personal,
        courses: CourseTable {
            headers: COURSE_COLUMNS.map(|c| c.header().to_string()),
            rows,
        },
        total_units: trainee.total_units(),
        total_units_label: TOTAL_UNITS_LABEL.to_string(),
        footer: FOOTER.to_string(),
    }
}
