// academy-service/src/services/admissions.rs
use crate::models::{catalog, AdmissionsApplication, AdmissionsReceipt, ServiceError};
use crate::services::form_flow::{FormFlow, FormState};
use log::info;
use std::sync::Mutex;
use uuid::Uuid;

// The admissions flow: an application draft plus the shared submission
// state machine. Submission success is simulated, nothing is persisted.
pub struct AdmissionsDesk {
    inner: Mutex<AdmissionsState>,
}

struct AdmissionsState {
    flow: FormFlow,
    draft: Option<AdmissionsApplication>,
}

impl AdmissionsDesk {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(AdmissionsState {
                flow: FormFlow::new(),
                draft: None,
            }),
        }
    }

    // Current flow state and the draft, if any
    pub fn state(&self) -> Result<(FormState, Option<AdmissionsApplication>), ServiceError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        Ok((state.flow.state(), state.draft.clone()))
    }

    // Store the filled-in form and open the confirmation step
    pub fn request_submit(
        &self,
        application: AdmissionsApplication,
    ) -> Result<FormState, ServiceError> {
        if catalog::find_course(&application.course_id).is_none() {
            return Err(ServiceError::BadRequest(format!(
                "Unknown course: {}",
                application.course_id
            )));
        }

        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        state.flow.request_submit()?;
        state.draft = Some(application);

        Ok(state.flow.state())
    }

    // Confirm the pending application and hand back a reference id
    pub fn confirm(&self) -> Result<AdmissionsReceipt, ServiceError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        state.flow.confirm()?;

        let applicant = state
            .draft
            .as_ref()
            .map(|draft| draft.full_name.clone())
            .unwrap_or_default();
        let reference_id = Uuid::new_v4().to_string();

        info!("🎓 Admissions application received: {} ({})", applicant, reference_id);

        Ok(AdmissionsReceipt {
            reference_id,
            message: "Your application has been successfully received. Our admissions team \
                      will review your details and reach out to you within 24-48 hours to \
                      schedule your free trial classes."
                .to_string(),
        })
    }

    // Back out of the confirmation dialog, keeping the draft intact
    pub fn cancel(&self) -> Result<FormState, ServiceError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        state.flow.cancel()?;
        Ok(state.flow.state())
    }

    // Start over with a blank form
    pub fn reset(&self) -> Result<FormState, ServiceError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServiceError::InternalServerError)?;
        state.flow.reset();
        state.draft = None;
        Ok(state.flow.state())
    }
}

impl Default for AdmissionsDesk {
    fn default() -> Self {
        Self::new()
    }
}
