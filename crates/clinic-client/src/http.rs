use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use clinic_types::api::{
    ChatRequest, ChatResponse, ErrorBody, HealthResponse, RegisterPatientRequest,
    RegisterPatientResponse, ScheduleAppointmentRequest, ScheduleAppointmentResponse,
};
use clinic_types::models::{Appointment, ChatRecord, Patient};

use crate::{ClientError, ClinicApi, Result};

/// REST client for the clinic backend.
///
/// `origin` is scheme + host (+ port), e.g. `http://localhost:5000`. Every
/// API route lives under `{origin}/api`; only the health probe sits at the
/// root. Requests are issued exactly once.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    origin: String,
}

impl HttpApi {
    pub fn new(origin: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, origin))
    }

    pub fn with_client(client: Client, origin: &str) -> Self {
        Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn api_base(&self) -> String {
        format!("{}/api", self.origin)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base(), path);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_base(), path);
        debug!("POST {}", url);
        let resp = self.client.post(&url).json(body).send().await?;
        read_json(resp).await
    }
}

/// Success statuses decode into `T`; anything else becomes `Rejected`,
/// carrying the backend's `error` text when the body has one.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.json::<ErrorBody>().await.ok().and_then(|b| b.error);
        debug!("Backend rejected request ({}): {:?}", status, message);
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp.json::<T>().await?)
}

impl ClinicApi for HttpApi {
    async fn register_patient(
        &self,
        req: &RegisterPatientRequest,
    ) -> Result<RegisterPatientResponse> {
        self.post_json("/register_patient", req).await
    }

    async fn schedule_appointment(
        &self,
        req: &ScheduleAppointmentRequest,
    ) -> Result<ScheduleAppointmentResponse> {
        self.post_json("/schedule_appointment", req).await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.get_json("/patients").await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("/appointments").await
    }

    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.post_json("/chat", req).await
    }

    async fn chat_history(&self, patient_id: i64) -> Result<Vec<ChatRecord>> {
        self.get_json(&format!("/chats/{}", patient_id)).await
    }

    /// The health route answers 500 with a `{status, detail}` body when the
    /// database is down, so the body is decoded regardless of status.
    async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.origin);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        match resp.json::<HealthResponse>().await {
            Ok(health) => Ok(health),
            Err(_) if !status.is_success() => Err(ClientError::Rejected {
                status: status.as_u16(),
                message: None,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
