use std::fmt;

use serde::{Deserialize, Serialize};

use shared_database::store::{cell, optional_cell, optional_text, SheetRecord};

/// One booking, stored as a single spreadsheet row (columns A-N).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub service_type: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub whatsapp_message_id: Option<String>,
    pub sms_message_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub owner_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Blank or unrecognized cells fall back to pending.
    pub fn parse(value: &str) -> Self {
        match value {
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Pending,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SheetRecord for Appointment {
    const KIND: &'static str = "appointment";
    const ID_PREFIX: &'static str = "apt";
    const LAST_COLUMN: char = 'N';
    const HEADER: &'static [&'static str] = &[
        "ID",
        "Patient Name",
        "Patient Phone",
        "Patient Email",
        "Appointment Date",
        "Appointment Time",
        "Service Type",
        "Status",
        "Notes",
        "WhatsApp Message ID",
        "SMS Message ID",
        "Created At",
        "Updated At",
        "Owner ID",
    ];

    fn from_row(row: &[String]) -> Self {
        Self {
            id: cell(row, 0),
            patient_name: cell(row, 1),
            patient_phone: cell(row, 2),
            patient_email: optional_cell(row, 3),
            appointment_date: cell(row, 4),
            appointment_time: cell(row, 5),
            service_type: cell(row, 6),
            status: AppointmentStatus::parse(&cell(row, 7)),
            notes: optional_cell(row, 8),
            whatsapp_message_id: optional_cell(row, 9),
            sms_message_id: optional_cell(row, 10),
            created_at: cell(row, 11),
            updated_at: cell(row, 12),
            owner_id: cell(row, 13),
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.patient_name.clone(),
            self.patient_phone.clone(),
            optional_text(&self.patient_email),
            self.appointment_date.clone(),
            self.appointment_time.clone(),
            self.service_type.clone(),
            self.status.to_string(),
            optional_text(&self.notes),
            optional_text(&self.whatsapp_message_id),
            optional_text(&self.sms_message_id),
            self.created_at.clone(),
            self.updated_at.clone(),
            self.owner_id.clone(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_name: String,
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub service_type: String,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub patient_name: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_email: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub whatsapp_message_id: Option<String>,
    pub sms_message_id: Option<String>,
}

impl Appointment {
    /// Merges the supplied fields over the record; absent fields keep their
    /// current values. Timestamps are stamped by the service.
    pub fn apply(&mut self, request: UpdateAppointmentRequest) {
        if let Some(patient_name) = request.patient_name {
            self.patient_name = patient_name;
        }
        if let Some(patient_phone) = request.patient_phone {
            self.patient_phone = patient_phone;
        }
        if let Some(patient_email) = request.patient_email {
            self.patient_email = Some(patient_email);
        }
        if let Some(appointment_date) = request.appointment_date {
            self.appointment_date = appointment_date;
        }
        if let Some(appointment_time) = request.appointment_time {
            self.appointment_time = appointment_time;
        }
        if let Some(service_type) = request.service_type {
            self.service_type = service_type;
        }
        if let Some(status) = request.status {
            self.status = status;
        }
        if let Some(notes) = request.notes {
            self.notes = Some(notes);
        }
        if let Some(whatsapp_message_id) = request.whatsapp_message_id {
            self.whatsapp_message_id = Some(whatsapp_message_id);
        }
        if let Some(sms_message_id) = request.sms_message_id {
            self.sms_message_id = Some(sms_message_id);
        }
    }
}
