//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

pub const HEADER: [&str; 10] = [
    "رقم المتدرب",
    "اسم المتدرب",
    "رقم الجوال",
    "التخصص",
    "القسم",
    "المعدل التراكمي",
    "حالة المتدرب",
    "رمز المقرر",
    "اسم المقرر",
    "الوحدات المعتمدة",
];

/// One course row of the trainee table.
#[derive(Clone)]
pub struct RowBuilder {
    id: String,
    name: String,
    phone: String,
    specialization: String,
    department: String,
    average: String,
    status: String,
    course_code: String,
    course_name: String,
    units: String,
}

impl RowBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            phone: "0551234567".to_string(),
            specialization: "الشبكات".to_string(),
            department: "التقنية الحاسوبية".to_string(),
            average: "4.25".to_string(),
            status: "منتظم".to_string(),
            course_code: "CS101".to_string(),
            course_name: "مقدمة".to_string(),
            units: "3".to_string(),
        }
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn specialization(mut self, specialization: &str) -> Self {
        self.specialization = specialization.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn course(mut self, code: &str, name: &str, units: &str) -> Self {
        self.course_code = code.to_string();
        self.course_name = name.to_string();
        self.units = units.to_string();
        self
    }

    fn cells(&self) -> [&str; 10] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.phone.as_str(),
            self.specialization.as_str(),
            self.department.as_str(),
            self.average.as_str(),
            self.status.as_str(),
            self.course_code.as_str(),
            self.course_name.as_str(),
            self.units.as_str(),
        ]
    }
}

/// Builder for a temporary directory holding one data file.
pub struct DataFileBuilder {
    temp_dir: TempDir,
    rows: Vec<RowBuilder>,
}

impl DataFileBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: RowBuilder) -> Self {
        self.rows.push(row);
        self
    }

    /// Write `name` as CSV and return the directory and file path.
    pub fn write_csv(self, name: &str) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join(name);
        let mut writer = csv::Writer::from_path(&path).expect("Failed to create CSV");
        writer.write_record(HEADER).expect("Failed to write header");
        for row in &self.rows {
            writer.write_record(row.cells()).expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush CSV");
        (self.temp_dir, path)
    }

    /// Write `name` as Parquet with Float64 trainee numbers and units.
    pub fn write_parquet(self, name: &str) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join(name);
        let schema = Arc::new(Schema::new(
            HEADER
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let data_type = if i == 0 || i == 5 || i == 9 {
                        DataType::Float64
                    } else {
                        DataType::Utf8
                    };
                    Field::new(*h, data_type, false)
                })
                .collect::<Vec<_>>(),
        ));

        let columns: Vec<ArrayRef> = (0..HEADER.len())
            .map(|i| -> ArrayRef {
                let values = self.rows.iter().map(|r| r.cells()[i]);
                if i == 0 || i == 5 || i == 9 {
                    Arc::new(Float64Array::from(
                        values.map(|v| v.parse::<f64>().expect("numeric cell")).collect::<Vec<_>>(),
                    ))
                } else {
                    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
                }
            })
            .collect();

        let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to build batch");
        let file = fs::File::create(&path).expect("Failed to create parquet file");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
        writer.write(&batch).expect("Failed to write batch");
        writer.close().expect("Failed to close writer");
        (self.temp_dir, path)
    }
}

/// Ahmad (445210) with three courses of 3/3/2 units and Sara (998111) with
/// one course of 2 units.
pub fn scenario() -> DataFileBuilder {
    DataFileBuilder::new()
        .row(RowBuilder::new("445210", "Ahmad").course("CS101", "مقدمة في الحاسب", "3"))
        .row(RowBuilder::new("998111", "Sara").phone("0557654321").course("NET201", "الشبكات", "2"))
        .row(RowBuilder::new("445210", "Ahmad").course("CS102", "البرمجة", "3"))
        .row(RowBuilder::new("445210", "Ahmad").course("MTH101", "الرياضيات", "2"))
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}
