use serde::{Deserialize, Serialize};

/// Timestamps stay as the server's raw text and are only parsed when a view
/// renders them. The backend is free to change its datetime encoding.
pub type Timestamp = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: Timestamp,
}

/// Appointment row as listed by the backend, joined with the patient's
/// name and phone when the patient still exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    pub datetime: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: String,
    pub created_at: Timestamp,
}

/// A stored chat line. Patient messages and assistant replies share the
/// same shape and differ only by `sender`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    pub sender: String,
    pub message: String,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_tolerates_missing_optionals_and_extra_fields() {
        let raw = r#"{
            "id": 3,
            "external_id": null,
            "name": "Ada",
            "created_at": "Tue, 15 Oct 2024 10:30:00 GMT"
        }"#;
        let patient: Patient = serde_json::from_str(raw).unwrap();
        assert_eq!(patient.id, 3);
        assert_eq!(patient.age, None);
        assert_eq!(patient.gender, "");
        assert_eq!(patient.phone, None);
    }

    #[test]
    fn appointment_keeps_joined_patient_fields() {
        let raw = r#"{
            "id": 7,
            "patient_id": 3,
            "patient_name": "Ada",
            "patient_phone": null,
            "doctor": "Dr. Grey",
            "datetime": "2024-10-20 09:00:00",
            "notes": null,
            "status": "scheduled",
            "created_at": "2024-10-15 10:30:00"
        }"#;
        let appt: Appointment = serde_json::from_str(raw).unwrap();
        assert_eq!(appt.patient_name.as_deref(), Some("Ada"));
        assert_eq!(appt.patient_phone, None);
        assert_eq!(appt.status, "scheduled");
    }
}
