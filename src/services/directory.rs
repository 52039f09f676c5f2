// academy-service/src/services/directory.rs
use crate::models::{Permissions, Role, ServiceError, UserRecord, UserStatus};
use crate::utils::registry;
use chrono::{TimeZone, Utc};
use log::info;
use serde::Deserialize;
use std::sync::Mutex;

// Search/filter parameters for the directory listing
#[derive(Deserialize, Debug, Default)]
pub struct DirectoryFilter {
    pub search_term: Option<String>,
    pub role: Option<Role>,
}

// The admin user directory. An in-memory collection seeded at startup;
// edits are local to the process and lost on restart, which is the
// intended behavior rather than a gap to close.
pub struct UserDirectory {
    records: Mutex<Vec<UserRecord>>,
}

impl UserDirectory {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn with_seed_users() -> Self {
        Self::new(seed_users())
    }

    // Case-insensitive substring match on name or email, optional role
    // filter. Insertion order is preserved.
    pub fn list(&self, filter: &DirectoryFilter) -> Result<Vec<UserRecord>, ServiceError> {
        let records = self
            .records
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;

        let needle = filter
            .search_term
            .as_deref()
            .unwrap_or("")
            .to_lowercase();

        let matches = records
            .iter()
            .filter(|record| {
                let matches_term = needle.is_empty()
                    || record.name.to_lowercase().contains(&needle)
                    || record.email.to_lowercase().contains(&needle);
                let matches_role = filter.role.map_or(true, |role| record.role == role);
                matches_term && matches_role
            })
            .cloned()
            .collect();

        Ok(matches)
    }

    pub fn get(&self, id: &str) -> Result<Option<UserRecord>, ServiceError> {
        let records = self
            .records
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    // Remove a user. No undo.
    pub fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;

        let before = records.len();
        records.retain(|record| record.id != id);
        let deleted = records.len() < before;

        if deleted {
            info!("🗑️ Deleted user: {}", id);
        }
        Ok(deleted)
    }

    // Replace the permission set of exactly one record
    pub fn update_permissions(
        &self,
        id: &str,
        permissions: Permissions,
    ) -> Result<UserRecord, ServiceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;

        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(ServiceError::NotFound)?;

        record.permissions = permissions;
        info!("🔐 Updated permissions for user: {}", id);
        Ok(record.clone())
    }

    pub fn count(&self) -> Result<usize, ServiceError> {
        let records = self
            .records
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        Ok(records.len())
    }
}

fn seed_user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    joined: (i32, u32, u32),
    status: UserStatus,
) -> UserRecord {
    let (year, month, day) = joined;
    UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        joined_date: Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid seed date"),
        status,
        permissions: registry::default_permissions(role),
    }
}

// The mocked academy roster shown in the admin panel
fn seed_users() -> Vec<UserRecord> {
    vec![
        seed_user(
            "usr-001",
            "Zaid Al-Harbi",
            "zaid.alharbi@example.com",
            Role::Student,
            (2023, 1, 15),
            UserStatus::Active,
        ),
        seed_user(
            "usr-002",
            "Layla Bakri",
            "layla.bakri@example.com",
            Role::Student,
            (2023, 3, 2),
            UserStatus::Active,
        ),
        seed_user(
            "usr-003",
            "Omar Bakir",
            "omar.bakir@example.com",
            Role::Student,
            (2023, 6, 20),
            UserStatus::Inactive,
        ),
        seed_user(
            "usr-004",
            "Sheikh Ahmed Hassan",
            "ahmed.hassan@darulquran.academy",
            Role::Teacher,
            (2022, 9, 1),
            UserStatus::Active,
        ),
        seed_user(
            "usr-005",
            "Ustadha Sarah Fatima",
            "sarah.fatima@darulquran.academy",
            Role::Teacher,
            (2022, 11, 12),
            UserStatus::Active,
        ),
        seed_user(
            "usr-006",
            "Imam Yusuf Abdallah",
            "yusuf.abdallah@darulquran.academy",
            Role::Teacher,
            (2023, 2, 8),
            UserStatus::Active,
        ),
        seed_user(
            "usr-007",
            "Amira Ahmed",
            "amira.ahmed@darulquran.academy",
            Role::Admin,
            (2022, 8, 15),
            UserStatus::Active,
        ),
    ]
}
