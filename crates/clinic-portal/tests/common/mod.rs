#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clinic_client::{ClientError, ClinicApi, Result};
use clinic_portal::config::{BackendMode, PortalConfig};
use clinic_portal::forms::{AppointmentForm, ChatForm, PatientForm};
use clinic_portal::memory::{MemoryElement, MemoryField, MemoryForm};
use clinic_portal::{BackendHandle, Portal, PortalView};
use clinic_types::api::{
    ChatRequest, ChatResponse, HealthResponse, RegisterPatientRequest, RegisterPatientResponse,
    ScheduleAppointmentRequest, ScheduleAppointmentResponse,
};
use clinic_types::models::{Appointment, ChatRecord, Patient};

type Script<T> = Mutex<VecDeque<(Duration, Result<T>)>>;

/// Scripted backend. Each endpoint pops its next `(delay, result)`; list
/// endpoints fall back to an empty list, mutations to a transport error.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<HashMap<&'static str, usize>>,
    patients: Script<Vec<Patient>>,
    appointments: Script<Vec<Appointment>>,
    history: Script<Vec<ChatRecord>>,
    register: Script<RegisterPatientResponse>,
    schedule: Script<ScheduleAppointmentResponse>,
    chat: Script<ChatResponse>,
    pub registered: Mutex<Vec<RegisterPatientRequest>>,
    pub scheduled: Mutex<Vec<ScheduleAppointmentRequest>>,
    pub chats: Mutex<Vec<ChatRequest>>,
}

fn push<T>(script: &Script<T>, delay: Duration, result: Result<T>) {
    script.lock().unwrap().push_back((delay, result));
}

fn pop<T>(script: &Script<T>, fallback: impl FnOnce() -> Result<T>) -> (Duration, Result<T>) {
    script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| (Duration::ZERO, fallback()))
}

fn unscripted<T>() -> Result<T> {
    Err(ClientError::Transport("unscripted request".into()))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn hit(&self, endpoint: &'static str) {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
    }

    pub fn patients_after(&self, delay: Duration, result: Result<Vec<Patient>>) {
        push(&self.patients, delay, result);
    }

    pub fn patients(&self, result: Result<Vec<Patient>>) {
        push(&self.patients, Duration::ZERO, result);
    }

    pub fn appointments(&self, result: Result<Vec<Appointment>>) {
        push(&self.appointments, Duration::ZERO, result);
    }

    pub fn history(&self, result: Result<Vec<ChatRecord>>) {
        push(&self.history, Duration::ZERO, result);
    }

    pub fn register(&self, result: Result<RegisterPatientResponse>) {
        push(&self.register, Duration::ZERO, result);
    }

    pub fn schedule(&self, result: Result<ScheduleAppointmentResponse>) {
        push(&self.schedule, Duration::ZERO, result);
    }

    pub fn chat(&self, result: Result<ChatResponse>) {
        push(&self.chat, Duration::ZERO, result);
    }
}

impl ClinicApi for FakeApi {
    async fn register_patient(
        &self,
        req: &RegisterPatientRequest,
    ) -> Result<RegisterPatientResponse> {
        self.hit("register_patient");
        self.registered.lock().unwrap().push(req.clone());
        let (delay, result) = pop(&self.register, unscripted);
        tokio::time::sleep(delay).await;
        result
    }

    async fn schedule_appointment(
        &self,
        req: &ScheduleAppointmentRequest,
    ) -> Result<ScheduleAppointmentResponse> {
        self.hit("schedule_appointment");
        self.scheduled.lock().unwrap().push(req.clone());
        let (delay, result) = pop(&self.schedule, unscripted);
        tokio::time::sleep(delay).await;
        result
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.hit("patients");
        let (delay, result) = pop(&self.patients, || Ok(Vec::new()));
        tokio::time::sleep(delay).await;
        result
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.hit("appointments");
        let (delay, result) = pop(&self.appointments, || Ok(Vec::new()));
        tokio::time::sleep(delay).await;
        result
    }

    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        self.hit("chat");
        self.chats.lock().unwrap().push(req.clone());
        let (delay, result) = pop(&self.chat, unscripted);
        tokio::time::sleep(delay).await;
        result
    }

    async fn chat_history(&self, _patient_id: i64) -> Result<Vec<ChatRecord>> {
        self.hit("chats");
        let (delay, result) = pop(&self.history, || Ok(Vec::new()));
        tokio::time::sleep(delay).await;
        result
    }

    async fn health(&self) -> Result<HealthResponse> {
        self.hit("health");
        Ok(HealthResponse {
            status: "ok".into(),
            detail: None,
        })
    }
}

pub fn patient(id: i64, name: &str) -> Patient {
    Patient {
        id,
        name: name.into(),
        age: Some(40),
        gender: "Other".into(),
        phone: None,
        email: None,
        created_at: "2024-10-15 10:30:00".into(),
    }
}

pub fn appointment(id: i64, patient_id: i64) -> Appointment {
    Appointment {
        id,
        patient_id,
        patient_name: Some("Ada".into()),
        patient_phone: None,
        doctor: Some("Dr. Grey".into()),
        datetime: "2024-10-20 09:00:00".into(),
        notes: None,
        status: "scheduled".into(),
        created_at: "2024-10-15 10:30:00".into(),
    }
}

pub fn rejected(message: &str) -> ClientError {
    ClientError::Rejected {
        status: 400,
        message: Some(message.into()),
    }
}

/// Every element and input of the portal page, in memory.
pub struct TestPage {
    pub patients_list: Arc<MemoryElement>,
    pub appointments_list: Arc<MemoryElement>,
    pub register_result: Arc<MemoryElement>,
    pub appointment_result: Arc<MemoryElement>,
    pub chat_result: Arc<MemoryElement>,
    pub chat_history: Arc<MemoryElement>,

    pub patient_form: Arc<MemoryForm>,
    pub name: Arc<MemoryField>,
    pub age: Arc<MemoryField>,
    pub gender: Arc<MemoryField>,
    pub phone: Arc<MemoryField>,
    pub email: Arc<MemoryField>,

    pub appointment_form: Arc<MemoryForm>,
    pub appt_patient_id: Arc<MemoryField>,
    pub doctor: Arc<MemoryField>,
    pub datetime: Arc<MemoryField>,
    pub notes: Arc<MemoryField>,

    pub chat_patient_id: Arc<MemoryField>,
    pub chat_message: Arc<MemoryField>,
}

impl TestPage {
    pub fn new() -> Self {
        let name = MemoryField::new();
        let age = MemoryField::new();
        let gender = MemoryField::with_default("Other");
        let phone = MemoryField::new();
        let email = MemoryField::new();
        let patient_form = MemoryForm::new(vec![
            name.clone(),
            age.clone(),
            gender.clone(),
            phone.clone(),
            email.clone(),
        ]);

        let appt_patient_id = MemoryField::new();
        let doctor = MemoryField::new();
        let datetime = MemoryField::new();
        let notes = MemoryField::new();
        let appointment_form = MemoryForm::new(vec![
            appt_patient_id.clone(),
            doctor.clone(),
            datetime.clone(),
            notes.clone(),
        ]);

        Self {
            patients_list: MemoryElement::new(),
            appointments_list: MemoryElement::new(),
            register_result: MemoryElement::new(),
            appointment_result: MemoryElement::new(),
            chat_result: MemoryElement::new(),
            chat_history: MemoryElement::new(),
            patient_form,
            name,
            age,
            gender,
            phone,
            email,
            appointment_form,
            appt_patient_id,
            doctor,
            datetime,
            notes,
            chat_patient_id: MemoryField::new(),
            chat_message: MemoryField::new(),
        }
    }

    pub fn view(&self) -> PortalView {
        PortalView {
            patients_list: self.patients_list.clone(),
            appointments_list: self.appointments_list.clone(),
            register_result: self.register_result.clone(),
            appointment_result: self.appointment_result.clone(),
            chat_result: self.chat_result.clone(),
            chat_history: Some(self.chat_history.clone()),
            patient_form: PatientForm {
                form: self.patient_form.clone(),
                name: self.name.clone(),
                age: self.age.clone(),
                gender: self.gender.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
            },
            appointment_form: AppointmentForm {
                form: self.appointment_form.clone(),
                patient_id: self.appt_patient_id.clone(),
                doctor: self.doctor.clone(),
                datetime: self.datetime.clone(),
                notes: self.notes.clone(),
            },
            chat_form: ChatForm {
                patient_id: self.chat_patient_id.clone(),
                message: self.chat_message.clone(),
            },
        }
    }
}

pub fn test_config() -> PortalConfig {
    PortalConfig {
        backend: BackendMode::Live {
            origin: "http://backend.test".into(),
        },
        refresh_interval: Duration::from_secs(30),
        message_timeout: Duration::from_millis(5000),
        request_timeout: Duration::from_secs(30),
    }
}

pub fn live_portal(page: &TestPage) -> (Arc<FakeApi>, Portal<FakeApi>) {
    let api = Arc::new(FakeApi::new());
    let portal = Portal::new(BackendHandle::Live(api.clone()), page.view(), &test_config());
    (api, portal)
}
