/// Clinic backend client.
///
/// `ClinicApi` is the seam between the portal components and the network.
/// `HttpApi` speaks the backend's REST surface over reqwest; tests swap in
/// scripted implementations.

pub mod error;
pub mod http;

use std::future::Future;

use clinic_types::api::{
    ChatRequest, ChatResponse, HealthResponse, RegisterPatientRequest, RegisterPatientResponse,
    ScheduleAppointmentRequest, ScheduleAppointmentResponse,
};
use clinic_types::models::{Appointment, ChatRecord, Patient};

pub use error::ClientError;
pub use http::HttpApi;

pub type Result<T> = std::result::Result<T, ClientError>;

pub trait ClinicApi: Send + Sync + 'static {
    fn register_patient(
        &self,
        req: &RegisterPatientRequest,
    ) -> impl Future<Output = Result<RegisterPatientResponse>> + Send;

    fn schedule_appointment(
        &self,
        req: &ScheduleAppointmentRequest,
    ) -> impl Future<Output = Result<ScheduleAppointmentResponse>> + Send;

    fn list_patients(&self) -> impl Future<Output = Result<Vec<Patient>>> + Send;

    fn list_appointments(&self) -> impl Future<Output = Result<Vec<Appointment>>> + Send;

    fn send_chat(&self, req: &ChatRequest) -> impl Future<Output = Result<ChatResponse>> + Send;

    fn chat_history(&self, patient_id: i64)
    -> impl Future<Output = Result<Vec<ChatRecord>>> + Send;

    fn health(&self) -> impl Future<Output = Result<HealthResponse>> + Send;
}
