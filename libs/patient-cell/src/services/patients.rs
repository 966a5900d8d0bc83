use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_database::sheets::{ConfigKey, SheetsClient};
use shared_database::store::{generate_record_id, now_rfc3339, SheetRecord, SheetStore};
use shared_database::StoreError;

use crate::models::{CreatePatientRequest, Patient, UpdatePatientRequest};

pub struct PatientService {
    store: SheetStore<Patient>,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        let client = SheetsClient::new(config, Arc::new(ConfigKey::new(config)));
        Self {
            store: SheetStore::new(client, config.patients_tab.clone()),
        }
    }

    pub async fn ensure_sheet(&self) -> Result<(), StoreError> {
        self.store.ensure_headers().await
    }

    pub async fn list_patients(&self, owner_id: &str) -> Result<Vec<Patient>, StoreError> {
        debug!("Listing patients for owner {}", owner_id);
        self.store.list(owner_id).await
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
        owner_id: &str,
    ) -> Result<Patient, StoreError> {
        let now = now_rfc3339();
        let patient = Patient {
            id: generate_record_id(Patient::ID_PREFIX),
            name: request.name,
            phone: request.phone,
            email: request.email,
            date_of_birth: request.date_of_birth,
            address: request.address,
            emergency_contact: request.emergency_contact,
            medical_notes: request.medical_notes,
            created_at: now.clone(),
            updated_at: now,
            owner_id: owner_id.to_string(),
        };

        self.store.append(&patient).await?;
        debug!("Patient {} created", patient.id);

        Ok(patient)
    }

    pub async fn update_patient(
        &self,
        id: &str,
        request: UpdatePatientRequest,
        owner_id: &str,
    ) -> Result<Patient, StoreError> {
        debug!("Updating patient {}", id);
        self.store
            .update_with(id, owner_id, |patient| {
                patient.apply(request);
                patient.updated_at = now_rfc3339();
            })
            .await
    }

    pub async fn delete_patient(&self, id: &str, owner_id: &str) -> Result<(), StoreError> {
        debug!("Deleting patient {}", id);
        self.store.delete(id, owner_id).await
    }
}
