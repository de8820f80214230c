/// Form bindings and the client-side normalization applied before submit.
///
/// Normalization is deliberately thin: integers are parsed leniently,
/// empty optional text becomes `None`, required text is passed through as
/// typed. Whether a required value is acceptable is the backend's call.

use clinic_types::api::{
    ChatRequest, PATIENT_SENDER, RegisterPatientRequest, ScheduleAppointmentRequest,
};

use crate::surface::{FieldRef, FormRef};

/// Leading integer of the trimmed input, like a browser's `parseInt`:
/// `" 42"` and `"42 years"` give 42, `""` and `"abc"` give `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub fn optional_text(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}

pub struct PatientForm {
    pub form: FormRef,
    pub name: FieldRef,
    pub age: FieldRef,
    pub gender: FieldRef,
    pub phone: FieldRef,
    pub email: FieldRef,
}

impl PatientForm {
    pub fn read(&self) -> RegisterPatientRequest {
        RegisterPatientRequest {
            name: self.name.value(),
            age: parse_int(&self.age.value()),
            gender: optional_text(self.gender.value()),
            phone: optional_text(self.phone.value()),
            email: optional_text(self.email.value()),
        }
    }
}

pub struct AppointmentForm {
    pub form: FormRef,
    pub patient_id: FieldRef,
    pub doctor: FieldRef,
    pub datetime: FieldRef,
    pub notes: FieldRef,
}

impl AppointmentForm {
    pub fn read(&self) -> ScheduleAppointmentRequest {
        ScheduleAppointmentRequest {
            patient_id: parse_int(&self.patient_id.value()),
            doctor: optional_text(self.doctor.value()),
            datetime: self.datetime.value(),
            notes: optional_text(self.notes.value()),
        }
    }
}

/// The chat widget is a pair of inputs rather than a form; only the
/// message box is cleared after a send.
pub struct ChatForm {
    pub patient_id: FieldRef,
    pub message: FieldRef,
}

impl ChatForm {
    /// `None` when the message is blank after trimming.
    pub fn read(&self) -> Option<ChatRequest> {
        let message = self.message.value();
        if message.trim().is_empty() {
            return None;
        }
        Some(ChatRequest {
            patient_id: parse_int(&self.patient_id.value()),
            sender: PATIENT_SENDER.to_string(),
            message,
        })
    }
}
