use std::time::Duration;

use chrono::Local;
use tracing::info;

use clinic_client::ClinicApi;

use crate::backend::BackendHandle;
use crate::config::PortalConfig;
use crate::feedback::FeedbackReporter;
use crate::forms::{AppointmentForm, ChatForm, PatientForm};
use crate::handlers::{ChatHandler, RegisterPatientHandler, ScheduleAppointmentHandler};
use crate::loader::{
    AppointmentLoader, Appointments, ChatHistory, ChatHistoryLoader, Loader, PatientLoader,
    Patients,
};
use crate::refresh::{RefreshHandle, spawn_refresh};
use crate::surface::ElementRef;
use crate::view::DATETIME_INPUT_FORMAT;

/// Handles to every part of the page the portal touches.
pub struct PortalView {
    pub patients_list: ElementRef,
    pub appointments_list: ElementRef,
    pub register_result: ElementRef,
    pub appointment_result: ElementRef,
    pub chat_result: ElementRef,
    pub chat_history: Option<ElementRef>,
    pub patient_form: PatientForm,
    pub appointment_form: AppointmentForm,
    pub chat_form: ChatForm,
}

/// The assembled component set, all sharing one backend handle.
pub struct Portal<A> {
    pub patients: PatientLoader<A>,
    pub appointments: AppointmentLoader<A>,
    pub register: RegisterPatientHandler<A>,
    pub schedule: ScheduleAppointmentHandler<A>,
    pub chat: ChatHandler<A>,
    backend: BackendHandle<A>,
    chat_history: Option<ElementRef>,
    refresh_interval: Duration,
}

impl<A: ClinicApi> Portal<A> {
    pub fn new(backend: BackendHandle<A>, view: PortalView, config: &PortalConfig) -> Self {
        let reporter = FeedbackReporter::new(config.message_timeout);

        let patients = Loader::new(backend.clone(), view.patients_list, Patients);
        let appointments = Loader::new(backend.clone(), view.appointments_list, Appointments);

        let register = RegisterPatientHandler::new(
            backend.clone(),
            view.patient_form,
            view.register_result,
            reporter,
            patients.clone(),
        );
        let schedule = ScheduleAppointmentHandler::new(
            backend.clone(),
            view.appointment_form,
            view.appointment_result,
            reporter,
            appointments.clone(),
        );
        let chat = ChatHandler::new(
            backend.clone(),
            view.chat_form,
            view.chat_result,
            reporter,
            view.chat_history.clone(),
        );

        Self {
            patients,
            appointments,
            register,
            schedule,
            chat,
            backend,
            chat_history: view.chat_history,
            refresh_interval: config.refresh_interval,
        }
    }

    /// Page start: pre-fill the appointment time, load both lists, then
    /// keep them fresh until the returned handle is cancelled.
    pub async fn start(&self) -> RefreshHandle {
        let now = Local::now().format(DATETIME_INPUT_FORMAT).to_string();
        self.schedule.prefill_datetime(&now);

        futures_util::future::join(self.patients.load(), self.appointments.load()).await;

        info!("Refreshing lists every {}s", self.refresh_interval.as_secs());
        spawn_refresh(
            self.patients.clone(),
            self.appointments.clone(),
            self.refresh_interval,
        )
    }

    /// Loader for one patient's conversation, if the page shows one.
    pub fn chat_history(&self, patient_id: i64) -> Option<ChatHistoryLoader<A>> {
        self.chat_history.as_ref().map(|container| {
            Loader::new(self.backend.clone(), container.clone(), ChatHistory { patient_id })
        })
    }
}
