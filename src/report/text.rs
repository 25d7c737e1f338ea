use crate::data::model::{Column, Trainee, format_optional_number};

use super::document::{Document, render};

/// Plain-text card for terminal output: the trainee's name as a heading,
/// the personal fields, the phone number and the course table.
pub fn to_text(trainee: &Trainee) -> String {
    let doc = render(trainee);
    let mut out = String::new();

    out.push_str(&format!("## {}\n", trainee.display_name()));
    for (column, value) in [
        (Column::TraineeId, trainee.trainee_id.clone()),
        (Column::Specialization, trainee.specialization.clone()),
        (Column::Average, format_optional_number(trainee.average)),
        (Column::Status, trainee.status.clone()),
        (Column::Phone, trainee.phone.clone()),
        (Column::Department, trainee.department.clone()),
    ] {
        out.push_str(&format!("  {}: {}\n", column.header(), value));
    }
    out.push('\n');
    out.push_str(&course_table(&doc));
    out.push_str(&format!("  {}: {}\n", doc.total_units_label, doc.total_units_text()));

    out
}

fn course_table(doc: &Document) -> String {
    let mut widths = doc.courses.headers.clone().map(|h| h.chars().count());
    for row in &doc.courses.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String; 3]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        format!("  {}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&doc.courses.headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("-+-")));
    for row in &doc.courses.rows {
        out.push_str(&line(row));
    }
    out
}
