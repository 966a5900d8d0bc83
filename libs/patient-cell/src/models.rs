use serde::{Deserialize, Serialize};

use shared_database::store::{cell, optional_cell, optional_text, SheetRecord};

/// One patient record, stored as a single spreadsheet row (columns A-K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub owner_id: String,
}

impl SheetRecord for Patient {
    const KIND: &'static str = "patient";
    const ID_PREFIX: &'static str = "pat";
    const LAST_COLUMN: char = 'K';
    const HEADER: &'static [&'static str] = &[
        "ID",
        "Name",
        "Phone",
        "Email",
        "Date of Birth",
        "Address",
        "Emergency Contact",
        "Medical Notes",
        "Created At",
        "Updated At",
        "Owner ID",
    ];

    fn from_row(row: &[String]) -> Self {
        Self {
            id: cell(row, 0),
            name: cell(row, 1),
            phone: cell(row, 2),
            email: optional_cell(row, 3),
            date_of_birth: optional_cell(row, 4),
            address: optional_cell(row, 5),
            emergency_contact: optional_cell(row, 6),
            medical_notes: optional_cell(row, 7),
            created_at: cell(row, 8),
            updated_at: cell(row, 9),
            owner_id: cell(row, 10),
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.phone.clone(),
            optional_text(&self.email),
            optional_text(&self.date_of_birth),
            optional_text(&self.address),
            optional_text(&self.emergency_contact),
            optional_text(&self.medical_notes),
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
pub struct CreatePatientRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub medical_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

impl Patient {
    /// Merges the supplied fields over the record; absent fields keep their
    /// current values.
    pub fn apply(&mut self, request: UpdatePatientRequest) {
        if let Some(name) = request.name {
            self.name = name;
        }
        if let Some(phone) = request.phone {
            self.phone = phone;
        }
        if let Some(email) = request.email {
            self.email = Some(email);
        }
        if let Some(date_of_birth) = request.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(address) = request.address {
            self.address = Some(address);
        }
        if let Some(emergency_contact) = request.emergency_contact {
            self.emergency_contact = Some(emergency_contact);
        }
        if let Some(medical_notes) = request.medical_notes {
            self.medical_notes = Some(medical_notes);
        }
    }
}
