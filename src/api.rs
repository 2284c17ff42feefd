//! Clinic REST API client.
//!
//! `ClinicApi` is the seam views are written against; `ApiClient` is the
//! reqwest implementation and `MockApi` a configurable test double. Transport
//! details (auth, persistence) belong to the backend — this layer only speaks
//! the read/write data contracts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{Appointment, Note, NoteSummary, NoteType, Patient};

/// Errors from clinic API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach clinic API at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Clinic API returned {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Payload for POST /notes/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub patient_id: i64,
    pub title: String,
    pub content: String,
    pub note_type: NoteType,
}

/// Read/write surface of the clinic backend consumed by the views.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError>;
    /// Notes come back as the read-optimized summary projection.
    async fn get_notes(&self) -> Result<Vec<NoteSummary>, ApiError>;
    async fn get_appointments(&self) -> Result<Vec<Appointment>, ApiError>;
    async fn create_note(&self, request: &CreateNoteRequest) -> Result<Note, ApiError>;
}

/// HTTP client for the clinic backend.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a new ApiClient pointing at the given backend.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client configured from `CARESCRIBE_API_URL` (or the local default).
    pub fn from_env() -> Self {
        Self::new(&config::api_base_url(), config::API_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Http(e.to_string())
        }
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ClinicApi for ApiClient {
    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get_json("/patients/").await
    }

    async fn get_notes(&self) -> Result<Vec<NoteSummary>, ApiError> {
        self.get_json("/notes/").await
    }

    async fn get_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.get_json("/appointments/").await
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<Note, ApiError> {
        let url = format!("{}/notes/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Mock clinic API for testing — configurable data and per-endpoint failures.
#[derive(Default)]
pub struct MockApi {
    patients: Vec<Patient>,
    notes: Mutex<Vec<NoteSummary>>,
    appointments: Vec<Appointment>,
    fail_patients: bool,
    fail_notes: bool,
    fail_appointments: bool,
    fail_create: Option<String>,
    pub notes_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub created: Mutex<Vec<CreateNoteRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_notes(self, notes: Vec<NoteSummary>) -> Self {
        *self.notes.lock().unwrap() = notes;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    pub fn failing_patients(mut self) -> Self {
        self.fail_patients = true;
        self
    }

    pub fn failing_notes(mut self) -> Self {
        self.fail_notes = true;
        self
    }

    pub fn failing_appointments(mut self) -> Self {
        self.fail_appointments = true;
        self
    }

    /// Make `create_note` fail with the given backend message.
    pub fn rejecting_create(mut self, message: &str) -> Self {
        self.fail_create = Some(message.to_string());
        self
    }
}

#[async_trait]
impl ClinicApi for MockApi {
    async fn get_patients(&self) -> Result<Vec<Patient>, ApiError> {
        if self.fail_patients {
            return Err(ApiError::Connection("http://mock".into()));
        }
        Ok(self.patients.clone())
    }

    async fn get_notes(&self) -> Result<Vec<NoteSummary>, ApiError> {
        self.notes_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_notes {
            return Err(ApiError::Connection("http://mock".into()));
        }
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn get_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        if self.fail_appointments {
            return Err(ApiError::Connection("http://mock".into()));
        }
        Ok(self.appointments.clone())
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<Note, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_create {
            return Err(ApiError::Backend {
                status: 422,
                body: message.clone(),
            });
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(Note {
            id: self.created.lock().unwrap().len() as i64,
            patient_id: request.patient_id,
            title: request.title.clone(),
            content: request.content.clone(),
            note_type: request.note_type,
            created_at: "2024-01-01T00:00:00".to_string(),
        })
    }
}
