use super::filter::SearchResult;
use super::model::{CourseEntry, Dataset, PersonalField, Trainee, TrainingRecord};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Record grouper: rows sharing an identifier → one Trainee
// ---------------------------------------------------------------------------

/// Build the [`Trainee`] for `trainee_id`.
///
/// Personal fields come from the first row with that identifier; every row
/// contributes one course entry, in source order, duplicates included.
/// Later rows that disagree on a personal field are recorded in
/// `conflicting_fields` and logged; the first row still wins.
pub fn group(dataset: &Dataset, trainee_id: &str) -> Result<Trainee, DataError> {
    let mut rows = dataset.rows.iter().filter(|r| r.trainee_id == trainee_id);

    let Some(first) = rows.next() else {
        return Err(DataError::IdentifierNotFound(trainee_id.to_string()));
    };

    let mut courses = vec![course_entry(first)];
    let mut conflicting_fields = Vec::new();

    for row in rows {
        for field in PersonalField::ALL {
            if !conflicting_fields.contains(&field) && differs(first, row, field) {
                conflicting_fields.push(field);
            }
        }
        courses.push(course_entry(row));
    }

    if !conflicting_fields.is_empty() {
        let headers: Vec<&str> = conflicting_fields.iter().map(|f| f.column().header()).collect();
        log::warn!(
            "Trainee {trainee_id}: rows disagree on {}; using values from the first row",
            headers.join(", ")
        );
    }

    Ok(Trainee {
        trainee_id: first.trainee_id.clone(),
        name: first.name.clone(),
        phone: first.phone.clone(),
        specialization: first.specialization.clone(),
        department: first.department.clone(),
        average: first.average,
        status: first.status.clone(),
        courses,
        conflicting_fields,
    })
}

/// Group every identifier of a search result, keeping its order.
pub fn group_all(dataset: &Dataset, result: &SearchResult) -> Result<Vec<Trainee>, DataError> {
    result.iter().map(|id| group(dataset, id)).collect()
}

fn course_entry(row: &TrainingRecord) -> CourseEntry {
    CourseEntry {
        code: row.course_code.clone(),
        name: row.course_name.clone(),
        units: row.credit_units,
    }
}

fn differs(a: &TrainingRecord, b: &TrainingRecord, field: PersonalField) -> bool {
    match field {
        PersonalField::Name => a.name != b.name,
        PersonalField::Phone => a.phone != b.phone,
        PersonalField::Specialization => a.specialization != b.specialization,
        PersonalField::Department => a.department != b.department,
        PersonalField::Average => a.average != b.average,
        PersonalField::Status => a.status != b.status,
    }
}
