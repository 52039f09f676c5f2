use crate::models::{NavigationEntry, Permissions, Role, ServiceError, Session};
use crate::services::form_flow::FormFlow;
use actix_web::{HttpMessage, HttpRequest};
use lazy_static::lazy_static;
use log::{error, info};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub mod session_guard;
pub use session_guard::SessionGuard;

// Fixed key under which the active session record is stored
pub const SESSION_KEY: &str = "dqa_user";

// Extract the active session placed in request extensions by the guard
pub fn get_session_from_request(req: &HttpRequest) -> Result<Session, ServiceError> {
    req.extensions()
        .get::<Session>()
        .cloned()
        .ok_or(ServiceError::Unauthorized)
}

// Key-value persistence collaborator for the session record
pub mod session_store {
    use super::*;

    pub trait KeyValueStore: Send + Sync {
        fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;
        fn set(&self, key: &str, value: &str) -> Result<(), ServiceError>;
        fn remove(&self, key: &str) -> Result<(), ServiceError>;
    }

    // A shared store handle behaves like the store itself
    impl<S> KeyValueStore for Arc<S>
    where
        S: KeyValueStore + ?Sized,
    {
        fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
            (**self).get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
            (**self).set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), ServiceError> {
            (**self).remove(key)
        }
    }

    // JSON files under the storage directory, one file per key
    pub struct FileStore {
        dir: String,
    }

    impl FileStore {
        pub fn new(storage_dir: &str) -> Self {
            Self {
                dir: format!("{}/session", storage_dir),
            }
        }

        fn key_path(&self, key: &str) -> String {
            format!("{}/{}.json", self.dir, key)
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
            let key_path = self.key_path(key);
            let path = Path::new(&key_path);

            if !path.exists() {
                return Ok(None);
            }

            let content = fs::read_to_string(path).map_err(|e| {
                error!("Failed to read session file: {:?}", e);
                ServiceError::InternalServerError
            })?;

            Ok(Some(content))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
            fs::create_dir_all(&self.dir).map_err(|e| {
                error!("Failed to create session directory: {:?}", e);
                ServiceError::InternalServerError
            })?;

            fs::write(self.key_path(key), value).map_err(|e| {
                error!("Failed to write session file: {:?}", e);
                ServiceError::InternalServerError
            })
        }

        fn remove(&self, key: &str) -> Result<(), ServiceError> {
            let key_path = self.key_path(key);
            let path = Path::new(&key_path);

            if !path.exists() {
                return Ok(());
            }

            fs::remove_file(path).map_err(|e| {
                error!("Failed to remove session file: {:?}", e);
                ServiceError::InternalServerError
            })
        }
    }

    // In-memory store used by the test suites
    #[derive(Default)]
    pub struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
            let entries = self
                .entries
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            Ok(entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), ServiceError> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            entries.remove(key);
            Ok(())
        }
    }
}

// Session lifecycle: login, logout, restore-on-reload
pub mod session {
    use super::session_store::KeyValueStore;
    use super::*;

    // Owns the single active session slot and the persistence collaborator.
    // Logout is confirmation-gated through the shared form flow.
    pub struct SessionController {
        current: Mutex<Option<Session>>,
        store: Box<dyn KeyValueStore>,
        logout_flow: Mutex<FormFlow>,
    }

    impl SessionController {
        pub fn new(store: Box<dyn KeyValueStore>) -> Self {
            Self {
                current: Mutex::new(None),
                store,
                logout_flow: Mutex::new(FormFlow::new()),
            }
        }

        // Load the persisted session record if no session is active yet.
        // Absence is the logged-out state, not an error.
        pub fn restore(&self) -> Result<Option<Session>, ServiceError> {
            let mut current = self
                .current
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;

            if current.is_some() {
                return Ok(current.clone());
            }

            if let Some(raw) = self.store.get(SESSION_KEY)? {
                match serde_json::from_str::<Session>(&raw) {
                    Ok(session) => {
                        info!("🔄 Restored session for {}: {}", session.role, session.name);
                        *current = Some(session);
                    }
                    Err(e) => {
                        // A corrupt record is treated as logged out
                        error!("Failed to parse stored session, discarding: {:?}", e);
                        self.store.remove(SESSION_KEY)?;
                    }
                }
            }

            Ok(current.clone())
        }

        // Create a session for the chosen role and persist it immediately.
        // No credential verification happens here: identity is simulated.
        pub fn login(&self, role: Role) -> Result<Session, ServiceError> {
            let session = Session::for_role(role);

            let serialized = serde_json::to_string(&session).map_err(|e| {
                error!("Failed to serialize session: {:?}", e);
                ServiceError::InternalServerError
            })?;
            self.store.set(SESSION_KEY, &serialized)?;

            let mut current = self
                .current
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            *current = Some(session.clone());

            info!("🔑 Logged in as {}: {}", session.role, session.name);
            Ok(session)
        }

        // Clear the active session and drop the persisted record
        pub fn logout(&self) -> Result<(), ServiceError> {
            let mut current = self
                .current
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            *current = None;
            self.store.remove(SESSION_KEY)?;

            info!("👋 Logged out");
            Ok(())
        }

        // Snapshot of the active session
        pub fn current(&self) -> Result<Option<Session>, ServiceError> {
            let current = self
                .current
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            Ok(current.clone())
        }

        // Sign-out asks for confirmation before anything is cleared
        pub fn request_logout(&self) -> Result<(), ServiceError> {
            if self.current()?.is_none() {
                return Err(ServiceError::Unauthorized);
            }

            let mut flow = self
                .logout_flow
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            flow.request_submit()
        }

        // Confirm the pending sign-out and clear the session
        pub fn confirm_logout(&self) -> Result<(), ServiceError> {
            let mut flow = self
                .logout_flow
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            flow.confirm()?;
            drop(flow);

            self.logout()?;

            // The dialog is reusable for the next session
            let mut flow = self
                .logout_flow
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            flow.reset();
            Ok(())
        }

        // Abandon the pending sign-out, keeping the session untouched
        pub fn cancel_logout(&self) -> Result<(), ServiceError> {
            let mut flow = self
                .logout_flow
                .lock()
                .map_err(|_| ServiceError::InternalServerError)?;
            flow.cancel()
        }
    }
}

// Login form validation
pub mod validation {
    use super::*;

    lazy_static! {
        static ref EMAIL_REGEX: Regex =
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
    }

    pub const MIN_PASSWORD_LENGTH: usize = 6;

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    // Field-level checks for the login form. Failures are user-correctable
    // and reported together as a field -> message map.
    pub fn validate_login(
        role: Option<Role>,
        email: &str,
        password: &str,
    ) -> Result<Role, ServiceError> {
        let mut errors = HashMap::new();

        if role.is_none() {
            errors.insert(
                "role".to_string(),
                "Please select a role to continue.".to_string(),
            );
        }

        if email.is_empty() {
            errors.insert(
                "email".to_string(),
                "Email address is required.".to_string(),
            );
        } else if !is_valid_email(email) {
            errors.insert(
                "email".to_string(),
                "Please enter a valid email address.".to_string(),
            );
        }

        if password.is_empty() {
            errors.insert(
                "password".to_string(),
                "Password is required.".to_string(),
            );
        } else if password.len() < MIN_PASSWORD_LENGTH {
            errors.insert(
                "password".to_string(),
                "Password must be at least 6 characters.".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        // Safe: a missing role was reported above
        role.ok_or(ServiceError::InternalServerError)
    }
}

// Static role registry: navigation menus and default permission sets.
// Pure lookups, exhaustively matched so a new role is a compile-time change.
pub mod registry {
    use super::*;

    pub fn menu_for(role: Role) -> Vec<NavigationEntry> {
        match role {
            Role::Student => vec![
                entry("Overview", "", "layout-dashboard"),
                entry("My Courses", "courses", "book-open"),
                entry("My Schedule", "schedule", "calendar"),
                entry("Profile", "profile", "user"),
            ],
            Role::Teacher => vec![
                entry("Overview", "", "layout-dashboard"),
                entry("My Students", "students", "users"),
                entry("Schedule", "schedule", "calendar"),
                entry("Performance", "performance", "pie-chart"),
            ],
            Role::Admin => vec![
                entry("Overview", "", "layout-dashboard"),
                entry("User Control", "users", "users"),
                entry("System Stats", "stats", "shield-check"),
                entry("Settings", "settings", "settings"),
            ],
        }
    }

    pub fn default_permissions(role: Role) -> Permissions {
        match role {
            Role::Student => Permissions {
                can_manage_users: false,
                can_edit_courses: false,
                can_view_revenue: false,
                can_manage_schedule: false,
                can_access_settings: false,
                can_message_all: false,
            },
            Role::Teacher => Permissions {
                can_manage_users: false,
                can_edit_courses: true,
                can_view_revenue: false,
                can_manage_schedule: true,
                can_access_settings: false,
                can_message_all: true,
            },
            Role::Admin => Permissions {
                can_manage_users: true,
                can_edit_courses: true,
                can_view_revenue: true,
                can_manage_schedule: true,
                can_access_settings: true,
                can_message_all: true,
            },
        }
    }

    // Whether a dashboard sub-path is part of a role's navigation.
    // The root and the menu endpoint itself belong to the shell and are
    // reachable for every authenticated role.
    pub fn role_can_reach(role: Role, segment: &str) -> bool {
        segment.is_empty()
            || segment == "menu"
            || menu_for(role)
                .iter()
                .any(|item| item.route_segment == segment)
    }

    fn entry(
        label: &'static str,
        route_segment: &'static str,
        icon: &'static str,
    ) -> NavigationEntry {
        NavigationEntry {
            label,
            route_segment,
            icon,
        }
    }
}
