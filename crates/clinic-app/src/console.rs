use std::sync::{Arc, Mutex};

use tracing::debug;

use clinic_portal::PortalView;
use clinic_portal::forms::{AppointmentForm, ChatForm, PatientForm};
use clinic_portal::memory::{MemoryField, MemoryForm};
use clinic_portal::surface::Element;

/// Prints list renders and status messages to stdout.
pub struct ConsoleElement {
    label: &'static str,
    text: Mutex<String>,
    class: Mutex<String>,
}

impl ConsoleElement {
    pub fn new(label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            label,
            text: Mutex::new(String::new()),
            class: Mutex::new(String::new()),
        })
    }
}

impl Element for ConsoleElement {
    fn set_inner_html(&self, html: String) {
        println!("── {} ──\n{}", self.label, to_plain_text(&html));
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap_or_else(|e| e.into_inner()) = text.to_string();
    }

    fn set_class(&self, class: &str) {
        *self.class.lock().unwrap_or_else(|e| e.into_inner()) = class.to_string();
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            let text = self.text.lock().unwrap_or_else(|e| e.into_inner()).clone();
            let class = self.class.lock().unwrap_or_else(|e| e.into_inner()).clone();
            println!("[{}] {}: {}", class, self.label, text);
        } else {
            debug!("{} message hidden", self.label);
        }
    }
}

/// Flatten view markup for a terminal: each closing `div` ends a line,
/// other tags are dropped and entities decoded.
fn to_plain_text(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            rest = &rest[start..];
            break;
        };
        let tag = &rest[start + 1..start + end];
        if tag == "/div" && !out.ends_with('\n') && !out.is_empty() {
            out.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// The console's stand-in for the portal page. Inputs are in-memory fields
/// that the command loop fills before submitting.
pub struct ConsolePage {
    pub name: Arc<MemoryField>,
    pub age: Arc<MemoryField>,
    pub gender: Arc<MemoryField>,
    pub phone: Arc<MemoryField>,
    pub email: Arc<MemoryField>,
    pub appt_patient_id: Arc<MemoryField>,
    pub doctor: Arc<MemoryField>,
    pub datetime: Arc<MemoryField>,
    pub notes: Arc<MemoryField>,
    pub chat_patient_id: Arc<MemoryField>,
    pub chat_message: Arc<MemoryField>,
}

impl ConsolePage {
    pub fn new() -> Self {
        Self {
            name: MemoryField::new(),
            age: MemoryField::new(),
            gender: MemoryField::with_default("Other"),
            phone: MemoryField::new(),
            email: MemoryField::new(),
            appt_patient_id: MemoryField::new(),
            doctor: MemoryField::new(),
            datetime: MemoryField::new(),
            notes: MemoryField::new(),
            chat_patient_id: MemoryField::new(),
            chat_message: MemoryField::new(),
        }
    }

    pub fn view(&self) -> PortalView {
        let patient_form = MemoryForm::new(vec![
            self.name.clone(),
            self.age.clone(),
            self.gender.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]);
        let appointment_form = MemoryForm::new(vec![
            self.appt_patient_id.clone(),
            self.doctor.clone(),
            self.datetime.clone(),
            self.notes.clone(),
        ]);

        PortalView {
            patients_list: ConsoleElement::new("Patients"),
            appointments_list: ConsoleElement::new("Appointments"),
            register_result: ConsoleElement::new("Registration"),
            appointment_result: ConsoleElement::new("Appointment"),
            chat_result: ConsoleElement::new("Chat"),
            chat_history: Some(ConsoleElement::new("Conversation")),
            patient_form: PatientForm {
                form: patient_form,
                name: self.name.clone(),
                age: self.age.clone(),
                gender: self.gender.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
            },
            appointment_form: AppointmentForm {
                form: appointment_form,
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
