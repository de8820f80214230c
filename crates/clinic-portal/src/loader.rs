use std::future::Future;

use chrono::Local;
use tracing::{debug, warn};

use clinic_client::ClinicApi;
use clinic_types::models::{Appointment, ChatRecord, Patient};

use crate::backend::BackendHandle;
use crate::surface::ElementRef;
use crate::view;

/// A read-only collection a loader can fetch and render.
pub trait Collection: Clone + Send + Sync + 'static {
    type Item: Send;

    /// Plural noun used in the loading and error placeholders.
    fn noun(&self) -> &'static str;

    fn empty_text(&self) -> &'static str;

    fn fetch<A: ClinicApi>(
        &self,
        api: &A,
    ) -> impl Future<Output = clinic_client::Result<Vec<Self::Item>>> + Send;

    fn render_item(&self, item: &Self::Item) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct Patients;

impl Collection for Patients {
    type Item = Patient;

    fn noun(&self) -> &'static str {
        "patients"
    }

    fn empty_text(&self) -> &'static str {
        "No patients registered yet"
    }

    fn fetch<A: ClinicApi>(
        &self,
        api: &A,
    ) -> impl Future<Output = clinic_client::Result<Vec<Patient>>> + Send {
        api.list_patients()
    }

    fn render_item(&self, item: &Patient) -> String {
        view::patient_item(item, &Local)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Appointments;

impl Collection for Appointments {
    type Item = Appointment;

    fn noun(&self) -> &'static str {
        "appointments"
    }

    fn empty_text(&self) -> &'static str {
        "No appointments scheduled yet"
    }

    fn fetch<A: ClinicApi>(
        &self,
        api: &A,
    ) -> impl Future<Output = clinic_client::Result<Vec<Appointment>>> + Send {
        api.list_appointments()
    }

    fn render_item(&self, item: &Appointment) -> String {
        view::appointment_item(item, &Local)
    }
}

/// One patient's conversation, oldest first as the server returns it.
#[derive(Debug, Clone, Copy)]
pub struct ChatHistory {
    pub patient_id: i64,
}

impl Collection for ChatHistory {
    type Item = ChatRecord;

    fn noun(&self) -> &'static str {
        "messages"
    }

    fn empty_text(&self) -> &'static str {
        "No messages yet"
    }

    fn fetch<A: ClinicApi>(
        &self,
        api: &A,
    ) -> impl Future<Output = clinic_client::Result<Vec<ChatRecord>>> + Send {
        api.chat_history(self.patient_id)
    }

    fn render_item(&self, item: &ChatRecord) -> String {
        view::chat_item(item, &Local)
    }
}

/// Fetches a collection and re-renders its container.
///
/// `load` never fails: errors end up as markup inside the container. Loads
/// are not coordinated with each other; if two overlap, the one whose
/// response resolves last owns the container.
pub struct Loader<A, C> {
    backend: BackendHandle<A>,
    container: ElementRef,
    collection: C,
}

pub type PatientLoader<A> = Loader<A, Patients>;
pub type AppointmentLoader<A> = Loader<A, Appointments>;
pub type ChatHistoryLoader<A> = Loader<A, ChatHistory>;

impl<A: ClinicApi, C: Collection> Loader<A, C> {
    pub fn new(backend: BackendHandle<A>, container: ElementRef, collection: C) -> Self {
        Self {
            backend,
            container,
            collection,
        }
    }

    pub async fn load(&self) {
        let noun = self.collection.noun();

        let Some(api) = self.backend.api() else {
            self.container.set_inner_html(view::empty_state(view::NO_BACKEND));
            return;
        };

        self.container.set_inner_html(view::loading(noun));
        debug!("Loading {}", noun);

        match self.collection.fetch(api).await {
            Ok(items) if items.is_empty() => {
                self.container
                    .set_inner_html(view::empty_state(self.collection.empty_text()));
            }
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), noun);
                let html: String = items
                    .iter()
                    .map(|item| self.collection.render_item(item))
                    .collect();
                self.container.set_inner_html(html);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", noun, e);
                self.container
                    .set_inner_html(view::load_error(noun, &e.to_string()));
            }
        }
    }
}

impl<A, C: Clone> Clone for Loader<A, C> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            container: self.container.clone(),
            collection: self.collection.clone(),
        }
    }
}
