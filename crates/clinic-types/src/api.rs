use serde::{Deserialize, Serialize};

// -- Patients --

/// Absent optionals are sent as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientResponse {
    pub patient_id: i64,
}

// -- Appointments --

/// `patient_id` is `None` when the form field did not hold an integer; the
/// backend is the one that rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub patient_id: Option<i64>,
    pub doctor: Option<String>,
    pub datetime: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentResponse {
    pub appointment_id: i64,
}

// -- Chat --

pub const PATIENT_SENDER: &str = "patient";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub patient_id: Option<i64>,
    pub sender: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

// -- Errors & health --

/// Body of every non-success response. `error` may be missing when the
/// failure came from something other than the application (a proxy, a
/// crashed worker).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
