//! Row builders shared by the unit tests of the data layer.

use std::path::PathBuf;

use super::model::{Column, Dataset, TrainingRecord};

pub fn row(id: &str, name: Option<&str>) -> TrainingRecord {
    TrainingRecord {
        trainee_id: id.to_string(),
        name: name.map(str::to_string),
        phone: String::new(),
        specialization: String::new(),
        department: String::new(),
        average: None,
        status: String::new(),
        unit: None,
        course_code: String::new(),
        course_name: String::new(),
        credit_units: None,
    }
}

pub fn course_row(id: &str, name: &str, code: &str, units: f64) -> TrainingRecord {
    TrainingRecord {
        phone: "0551234567".to_string(),
        specialization: "Networks".to_string(),
        department: "Computer Technology".to_string(),
        average: Some(4.25),
        status: "Active".to_string(),
        course_code: code.to_string(),
        course_name: format!("Course {code}"),
        credit_units: Some(units),
        ..row(id, Some(name))
    }
}

pub fn dataset(rows: Vec<TrainingRecord>) -> Dataset {
    Dataset::new(PathBuf::from("test.csv"), Column::ALL.to_vec(), rows)
}

/// Ahmad (445210) with three courses of 3/3/2 units, Sara (998111) with one.
pub fn two_trainees() -> Dataset {
    dataset(vec![
        course_row("445210", "Ahmad", "CS101", 3.0),
        course_row("998111", "Sara", "NET201", 2.0),
        course_row("445210", "Ahmad", "CS102", 3.0),
        course_row("445210", "Ahmad", "MATH110", 2.0),
    ])
}
