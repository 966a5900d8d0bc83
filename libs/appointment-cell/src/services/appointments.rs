use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_database::sheets::{ConfigKey, SheetsClient};
use shared_database::store::{generate_record_id, now_rfc3339, SheetRecord, SheetStore};
use shared_database::StoreError;

use crate::models::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};

pub struct AppointmentService {
    store: SheetStore<Appointment>,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        let client = SheetsClient::new(config, Arc::new(ConfigKey::new(config)));
        Self {
            store: SheetStore::new(client, config.appointments_tab.clone()),
        }
    }

    pub async fn ensure_sheet(&self) -> Result<(), StoreError> {
        self.store.ensure_headers().await
    }

    pub async fn list_appointments(&self, owner_id: &str) -> Result<Vec<Appointment>, StoreError> {
        debug!("Listing appointments for owner {}", owner_id);
        self.store.list(owner_id).await
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
        owner_id: &str,
    ) -> Result<Appointment, StoreError> {
        let now = now_rfc3339();
        let appointment = Appointment {
            id: generate_record_id(Appointment::ID_PREFIX),
            patient_name: request.patient_name,
            patient_phone: request.patient_phone,
            patient_email: request.patient_email,
            appointment_date: request.appointment_date,
            appointment_time: request.appointment_time,
            service_type: request.service_type,
            status: request.status.unwrap_or_default(),
            notes: request.notes,
            whatsapp_message_id: None,
            sms_message_id: None,
            created_at: now.clone(),
            updated_at: now,
            owner_id: owner_id.to_string(),
        };

        self.store.append(&appointment).await?;
        debug!("Appointment {} created", appointment.id);

        Ok(appointment)
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        request: UpdateAppointmentRequest,
        owner_id: &str,
    ) -> Result<Appointment, StoreError> {
        debug!("Updating appointment {}", id);
        self.store
            .update_with(id, owner_id, |appointment| {
                appointment.apply(request);
                appointment.updated_at = now_rfc3339();
            })
            .await
    }

    pub async fn delete_appointment(&self, id: &str, owner_id: &str) -> Result<(), StoreError> {
        debug!("Deleting appointment {}", id);
        self.store.delete(id, owner_id).await
    }
}
