//! Student directory queries for the staff dashboard

use std::sync::Arc;

use nexus_providers::ProfileRepository;
use nexus_types::{Profile, Role, StudentProfile};

use crate::error::DashboardError;

/// Read side of the staff dashboard: the student roster and its batch
/// grouping.
pub struct StudentDirectory<P> {
    profiles: Arc<P>,
}

impl<P: ProfileRepository> StudentDirectory<P> {
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    /// All student profiles, filtered server-side by role.
    pub async fn list_students(&self) -> Result<Vec<StudentProfile>, DashboardError> {
        let profiles = self.profiles.list_by_role(Role::Student).await.map_err(|err| {
            tracing::error!(error = %err, "student roster query failed");
            DashboardError::QueryFailed(err.to_string())
        })?;

        Ok(profiles
            .into_iter()
            .filter_map(|profile| match profile {
                Profile::Student(student) => Some(student),
                Profile::Staff(_) => None,
            })
            .collect())
    }
}

impl<P> std::fmt::Debug for StudentDirectory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentDirectory").finish()
    }
}

/// Distinct batch labels across the roster, sorted ascending. Empty labels
/// are skipped.
pub fn batches(students: &[StudentProfile]) -> Vec<String> {
    let mut labels: Vec<String> = students
        .iter()
        .map(|s| s.batch.clone())
        .filter(|b| !b.is_empty())
        .collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Roster subset for one batch label.
pub fn in_batch<'a>(students: &'a [StudentProfile], batch: &str) -> Vec<&'a StudentProfile> {
    students.iter().filter(|s| s.batch == batch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nexus_types::Uid;

    fn student(name: &str, batch: &str) -> StudentProfile {
        StudentProfile {
            uid: Uid::generate(),
            name: name.to_string(),
            email: format!("{name}@college.edu"),
            roll_number: format!("IT-{name}"),
            batch: batch.to_string(),
            phone: "5550100".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_batches_are_distinct_and_sorted() {
        let roster = [
            student("a", "2024"),
            student("b", "2023"),
            student("c", "2024"),
        ];
        assert_eq!(batches(&roster), vec!["2023", "2024"]);
    }

    #[test]
    fn test_batches_skip_empty_labels() {
        let roster = [student("a", "2024"), student("b", "")];
        assert_eq!(batches(&roster), vec!["2024"]);
    }

    #[test]
    fn test_in_batch_filters_roster() {
        let roster = [
            student("a", "2024"),
            student("b", "2023"),
            student("c", "2024"),
        ];
        let selected = in_batch(&roster, "2024");
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|s| s.batch == "2024"));
        assert!(in_batch(&roster, "2022").is_empty());
    }
}
