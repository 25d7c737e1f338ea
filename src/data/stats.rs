use std::collections::HashSet;

use serde::Serialize;

use super::model::Dataset;

/// Overview figures for the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    /// Unique trainee identifiers.
    pub trainees: usize,
    /// Distinct course names offered.
    pub courses: usize,
    /// Departments in order of first appearance.
    pub departments: Vec<String>,
    /// Specializations in order of first appearance, with the number of
    /// unique trainees in each.
    pub specializations: Vec<(String, usize)>,
}

impl DatasetStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let mut trainee_ids = HashSet::new();
        let mut course_names = HashSet::new();
        let mut departments: Vec<String> = Vec::new();
        let mut specializations: Vec<(String, HashSet<&str>)> = Vec::new();

        for row in &dataset.rows {
            trainee_ids.insert(row.trainee_id.as_str());
            course_names.insert(row.course_name.as_str());

            if !departments.contains(&row.department) {
                departments.push(row.department.clone());
            }

            match specializations
                .iter_mut()
                .find(|(name, _)| *name == row.specialization)
            {
                Some((_, ids)) => {
                    ids.insert(row.trainee_id.as_str());
                }
                None => specializations.push((
                    row.specialization.clone(),
                    HashSet::from([row.trainee_id.as_str()]),
                )),
            }
        }

        DatasetStats {
            trainees: trainee_ids.len(),
            courses: course_names.len(),
            departments,
            specializations: specializations
                .into_iter()
                .map(|(name, ids)| (name, ids.len()))
                .collect(),
        }
    }
}
