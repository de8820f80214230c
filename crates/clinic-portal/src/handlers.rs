use std::future::Future;

use tracing::{debug, info, warn};

use clinic_client::{ClientError, ClinicApi};

use crate::backend::BackendHandle;
use crate::feedback::{FeedbackReporter, MessageKind};
use crate::forms::{AppointmentForm, ChatForm, PatientForm};
use crate::loader::{AppointmentLoader, ChatHistory, Loader, PatientLoader};
use crate::surface::{ElementRef, SubmitEvent};
use crate::view;

pub const EMPTY_CHAT_MESSAGE: &str = "Please enter a message";

/// How a submission ended. Every variant has already been reported to the
/// user by the time it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Backend accepted it; carries the id it assigned, if any.
    Accepted(Option<i64>),
    /// Backend answered with a non-success status; carries the reported text.
    Rejected(String),
    /// No usable response arrived.
    Failed(String),
    /// Refused before any request was made.
    Invalid(String),
}

/// Shared error path for every handler. Form contents are left alone and
/// nothing is refreshed.
fn report_failure(
    reporter: &FeedbackReporter,
    target: &ElementRef,
    action: &str,
    e: &ClientError,
) -> Outcome {
    if e.is_transport() {
        warn!("{} failed: {}", action, e);
        let text = format!("Network error: {}", e);
        reporter.report(target, &text, MessageKind::Error);
        Outcome::Failed(text)
    } else {
        debug!("{} rejected: {}", action, e);
        let text = e.to_string();
        reporter.report(target, &text, MessageKind::Error);
        Outcome::Rejected(text)
    }
}

fn refuse(reporter: &FeedbackReporter, target: &ElementRef, text: &str) -> Outcome {
    reporter.report(target, text, MessageKind::Error);
    Outcome::Invalid(text.to_string())
}

pub struct RegisterPatientHandler<A> {
    backend: BackendHandle<A>,
    form: PatientForm,
    result: ElementRef,
    reporter: FeedbackReporter,
    patients: PatientLoader<A>,
}

impl<A: ClinicApi> RegisterPatientHandler<A> {
    pub fn new(
        backend: BackendHandle<A>,
        form: PatientForm,
        result: ElementRef,
        reporter: FeedbackReporter,
        patients: PatientLoader<A>,
    ) -> Self {
        Self {
            backend,
            form,
            result,
            reporter,
            patients,
        }
    }

    pub fn on_submit(&self, event: &dyn SubmitEvent) -> impl Future<Output = Outcome> + Send {
        event.prevent_default();
        self.submit()
    }

    pub async fn submit(&self) -> Outcome {
        let Some(api) = self.backend.api() else {
            return refuse(&self.reporter, &self.result, view::NO_BACKEND);
        };

        let req = self.form.read();
        debug!("Registering patient {:?}", req.name);

        match api.register_patient(&req).await {
            Ok(resp) => {
                info!("Registered patient {}", resp.patient_id);
                self.reporter.report(
                    &self.result,
                    &format!("Patient registered successfully! ID: {}", resp.patient_id),
                    MessageKind::Success,
                );
                self.form.form.reset();
                self.patients.load().await;
                Outcome::Accepted(Some(resp.patient_id))
            }
            Err(e) => report_failure(&self.reporter, &self.result, "Patient registration", &e),
        }
    }
}

pub struct ScheduleAppointmentHandler<A> {
    backend: BackendHandle<A>,
    form: AppointmentForm,
    result: ElementRef,
    reporter: FeedbackReporter,
    appointments: AppointmentLoader<A>,
}

impl<A: ClinicApi> ScheduleAppointmentHandler<A> {
    pub fn new(
        backend: BackendHandle<A>,
        form: AppointmentForm,
        result: ElementRef,
        reporter: FeedbackReporter,
        appointments: AppointmentLoader<A>,
    ) -> Self {
        Self {
            backend,
            form,
            result,
            reporter,
            appointments,
        }
    }

    /// Pre-fill the datetime input, as the page does on load.
    pub fn prefill_datetime(&self, value: &str) {
        self.form.datetime.set_value(value);
    }

    pub fn on_submit(&self, event: &dyn SubmitEvent) -> impl Future<Output = Outcome> + Send {
        event.prevent_default();
        self.submit()
    }

    pub async fn submit(&self) -> Outcome {
        let Some(api) = self.backend.api() else {
            return refuse(&self.reporter, &self.result, view::NO_BACKEND);
        };

        let req = self.form.read();
        debug!("Scheduling appointment for patient {:?} at {}", req.patient_id, req.datetime);

        match api.schedule_appointment(&req).await {
            Ok(resp) => {
                info!("Scheduled appointment {}", resp.appointment_id);
                self.reporter.report(
                    &self.result,
                    &format!("Appointment scheduled successfully! ID: {}", resp.appointment_id),
                    MessageKind::Success,
                );
                self.form.form.reset();
                self.appointments.load().await;
                Outcome::Accepted(Some(resp.appointment_id))
            }
            Err(e) => report_failure(&self.reporter, &self.result, "Appointment scheduling", &e),
        }
    }
}

pub struct ChatHandler<A> {
    backend: BackendHandle<A>,
    form: ChatForm,
    result: ElementRef,
    reporter: FeedbackReporter,
    /// Where the patient's conversation is shown, if the page has one.
    history: Option<ElementRef>,
}

impl<A: ClinicApi> ChatHandler<A> {
    pub fn new(
        backend: BackendHandle<A>,
        form: ChatForm,
        result: ElementRef,
        reporter: FeedbackReporter,
        history: Option<ElementRef>,
    ) -> Self {
        Self {
            backend,
            form,
            result,
            reporter,
            history,
        }
    }

    pub async fn send(&self) -> Outcome {
        let Some(req) = self.form.read() else {
            return refuse(&self.reporter, &self.result, EMPTY_CHAT_MESSAGE);
        };
        let Some(api) = self.backend.api() else {
            return refuse(&self.reporter, &self.result, view::NO_BACKEND);
        };

        debug!("Sending chat message for patient {:?}", req.patient_id);

        match api.send_chat(&req).await {
            Ok(resp) => {
                self.reporter.report(
                    &self.result,
                    &format!("Message sent! Reply: \"{}\"", resp.reply),
                    MessageKind::Success,
                );
                self.form.message.set_value("");
                if let (Some(patient_id), Some(container)) = (req.patient_id, &self.history) {
                    Loader::new(self.backend.clone(), container.clone(), ChatHistory { patient_id })
                        .load()
                        .await;
                }
                Outcome::Accepted(None)
            }
            Err(e) => report_failure(&self.reporter, &self.result, "Chat message", &e),
        }
    }
}
