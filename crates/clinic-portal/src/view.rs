/// Markup for the list views and their placeholders.
///
/// All server-supplied text is escaped before it is interpolated.

use std::fmt::{Display, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

use clinic_types::models::{Appointment, ChatRecord, Patient};

pub const NO_BACKEND: &str = "No backend configured";
pub const INVALID_DATE: &str = "Invalid Date";

/// Naive forms the backend and the datetime-local input produce. Naive
/// values are wall-clock time in the viewer's zone.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Value format of a datetime-local input.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Local wall-clock time to an instant. A time skipped by a forward DST
/// transition moves forward by the hour the clocks skipped.
fn from_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*naive + TimeDelta::hours(1))).earliest())
}

pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return from_local(&naive, tz);
        }
    }
    // A bare date means midnight UTC.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

/// Short en-US rendering, e.g. `Oct 15, 2024, 10:30 AM`.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

pub fn loading(noun: &str) -> String {
    format!(r#"<div class="loading">Loading {}...</div>"#, noun)
}

pub fn empty_state(text: &str) -> String {
    format!(r#"<div class="empty-state">{}</div>"#, escape(text))
}

pub fn load_error(noun: &str, reason: &str) -> String {
    format!(
        r#"<div class="error">Error loading {}: {}</div>"#,
        noun,
        escape(reason)
    )
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => escape(v),
        _ => placeholder.to_string(),
    }
}

pub fn patient_item<Tz>(patient: &Patient, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Zero counts as unknown.
    let age = patient
        .age
        .filter(|a| *a != 0)
        .map(|a| a.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        concat!(
            r#"<div class="data-item">"#,
            r#"<div class="data-item-header">"#,
            r#"<span class="data-item-title">{name}</span>"#,
            r#"<span class="data-item-id">ID: {id}</span>"#,
            "</div>",
            r#"<div class="data-item-details">"#,
            "<div><strong>Age:</strong> {age} | <strong>Gender:</strong> {gender}</div>",
            "<div><strong>Phone:</strong> {phone}</div>",
            "<div><strong>Email:</strong> {email}</div>",
            "</div>",
            r#"<div class="data-item-meta">Registered: {created}</div>"#,
            "</div>"
        ),
        name = escape(&patient.name),
        id = patient.id,
        age = age,
        gender = escape(&patient.gender),
        phone = or_placeholder(patient.phone.as_deref(), "N/A"),
        email = or_placeholder(patient.email.as_deref(), "N/A"),
        created = format_timestamp(&patient.created_at, tz),
    )
}

pub fn appointment_item<Tz>(appt: &Appointment, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut details = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        details,
        "<div><strong>Doctor:</strong> {}</div>",
        or_placeholder(appt.doctor.as_deref(), "Not assigned")
    );
    let _ = write!(
        details,
        "<div><strong>Date &amp; Time:</strong> {}</div>",
        format_timestamp(&appt.datetime, tz)
    );
    let _ = write!(
        details,
        "<div><strong>Patient ID:</strong> {} | <strong>Phone:</strong> {}</div>",
        appt.patient_id,
        or_placeholder(appt.patient_phone.as_deref(), "N/A")
    );
    if let Some(notes) = appt.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = write!(details, "<div><strong>Notes:</strong> {}</div>", escape(notes));
    }
    let _ = write!(
        details,
        concat!(
            "<div><strong>Status:</strong> ",
            r#"<span style="text-transform: capitalize;">{}</span></div>"#
        ),
        escape(&appt.status)
    );

    format!(
        concat!(
            r#"<div class="data-item">"#,
            r#"<div class="data-item-header">"#,
            r#"<span class="data-item-title">{title}</span>"#,
            r#"<span class="data-item-id">ID: {id}</span>"#,
            "</div>",
            r#"<div class="data-item-details">{details}</div>"#,
            r#"<div class="data-item-meta">Scheduled: {created}</div>"#,
            "</div>"
        ),
        title = or_placeholder(appt.patient_name.as_deref(), "Unknown Patient"),
        id = appt.id,
        details = details,
        created = format_timestamp(&appt.created_at, tz),
    )
}

pub fn chat_item<Tz>(record: &ChatRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let sender = escape(&record.sender);
    format!(
        concat!(
            r#"<div class="chat-message chat-{sender}">"#,
            r#"<span class="chat-sender">{sender}</span> "#,
            r#"<span class="chat-text">{message}</span>"#,
            r#"<div class="data-item-meta">{time}</div>"#,
            "</div>"
        ),
        sender = sender,
        message = escape(&record.message),
        time = format_timestamp(&record.created_at, tz),
    )
}
