// academy-service/src/models/admissions.rs
use serde::{Deserialize, Serialize};

// Study level selected on the admissions form
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyLevel {
    #[serde(rename = "beginner")]
    Beginner,
    #[serde(rename = "intermediate")]
    Intermediate,
    #[serde(rename = "advanced")]
    Advanced,
}

// The admissions form as submitted by a prospective student. Ephemeral:
// nothing here is persisted, a confirmed application only produces a
// reference id for the acknowledgement.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdmissionsApplication {
    pub full_name: String,
    pub age: u8,
    pub email: String,
    pub phone: String,
    pub course_id: String,
    pub level: StudyLevel,
    pub preferred_time: String,
    pub notes: Option<String>,
}

// Acknowledgement returned once an application is confirmed
#[derive(Serialize, Deserialize, Debug)]
pub struct AdmissionsReceipt {
    pub reference_id: String,
    pub message: String,
}
