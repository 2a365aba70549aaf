//! Portal profiles
//!
//! A profile extends a [`Principal`](crate::Principal) with the role and
//! role-specific attributes collected at registration. Exactly one profile
//! exists per principal, keyed by uid, and the role never changes after
//! creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, Uid};

/// Application-level user record, keyed by role.
///
/// Role-conditional fields live on the variant payloads rather than as
/// optional fields, so a staff profile cannot carry a roll number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Student(StudentProfile),
    Staff(StaffProfile),
}

/// Student profile with cohort attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub uid: Uid,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    /// Cohort label, e.g. "2024"
    pub batch: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Staff profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub uid: Uid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn uid(&self) -> &Uid {
        match self {
            Self::Student(p) => &p.uid,
            Self::Staff(p) => &p.uid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Student(p) => &p.name,
            Self::Staff(p) => &p.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Student(p) => &p.email,
            Self::Staff(p) => &p.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Staff(_) => Role::Staff,
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match self {
            Self::Student(p) => Some(p),
            Self::Staff(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Profile {
        Profile::Student(StudentProfile {
            uid: Uid::from("s-1"),
            name: "Asha Rao".to_string(),
            email: "asha@college.edu".to_string(),
            roll_number: "IT-042".to_string(),
            batch: "2024".to_string(),
            phone: "5550100".to_string(),
            created_at: Utc::now(),
        })
    }

    #[test]
    fn test_role_tag_serialization() {
        let json = serde_json::to_value(student()).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["roll_number"], "IT-042");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back.role(), Role::Student);
        assert_eq!(back.name(), "Asha Rao");
    }

    #[test]
    fn test_staff_has_no_student_fields() {
        let staff = Profile::Staff(StaffProfile {
            uid: Uid::from("t-1"),
            name: "Dr. Mehta".to_string(),
            email: "mehta@college.edu".to_string(),
            created_at: Utc::now(),
        });
        assert!(staff.as_student().is_none());
        let json = serde_json::to_value(&staff).unwrap();
        assert!(json.get("roll_number").is_none());
    }
}
