use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::applicant::{Applicant, ApplicantStatus, NewApplicant};
use crate::models::note::{NewNote, Note};

#[derive(Default)]
struct Tables {
    applicants: Vec<Applicant>,
    notes: Vec<Note>,
}

/// Vec-backed store mirroring the Postgres constraints: unique email,
/// note ownership, cascade on delete.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn applicant_count(&self) -> usize {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .applicants
            .len()
    }

    pub fn note_count(&self) -> usize {
        self.tables.lock().expect("store mutex poisoned").notes.len()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.applicants.clone())
    }

    async fn insert_applicant(&self, new: NewApplicant) -> Result<Applicant, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        if guard.applicants.iter().any(|a| a.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let applicant = Applicant {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone_number: new.phone_number,
            address: new.address,
            zip_code: new.zip_code,
            state: new.state,
            status: ApplicantStatus::default(),
            created_at: Utc::now(),
        };
        guard.applicants.push(applicant.clone());
        Ok(applicant)
    }

    async fn fetch_applicant(&self, id: Uuid) -> Result<Option<Applicant>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard.applicants.iter().find(|a| a.id == id).cloned())
    }

    async fn update_applicant_status(
        &self,
        id: Uuid,
        status: ApplicantStatus,
    ) -> Result<Option<Applicant>, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard
            .applicants
            .iter_mut()
            .find(|a| a.id == id)
            .map(|applicant| {
                applicant.status = status;
                applicant.clone()
            }))
    }

    async fn delete_applicant(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        let before = guard.applicants.len();
        guard.applicants.retain(|a| a.id != id);
        if guard.applicants.len() == before {
            return Ok(false);
        }
        guard.notes.retain(|n| n.applicant_id != id);
        Ok(true)
    }

    async fn list_notes(&self, applicant_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        Ok(guard
            .notes
            .iter()
            .filter(|n| n.applicant_id == applicant_id)
            .cloned()
            .collect())
    }

    async fn insert_note(&self, applicant_id: Uuid, new: NewNote) -> Result<Note, StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        if !guard.applicants.iter().any(|a| a.id == applicant_id) {
            return Err(StoreError::MissingApplicant(applicant_id));
        }

        let note = Note {
            id: Uuid::new_v4(),
            applicant_id,
            title: new.title,
            content: new.content,
            created_at: Utc::now(),
        };
        guard.notes.push(note.clone());
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike() -> NewApplicant {
        NewApplicant {
            first_name: "Spike".to_string(),
            last_name: "Spiegel".to_string(),
            email: "spike.spiegel@bebop.com".to_string(),
            phone_number: "123-456-7890".to_string(),
            address: "123 Cowboy Pl".to_string(),
            zip_code: "10000".to_string(),
            state: "New York".to_string(),
        }
    }

    fn note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "Bounty hunter.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = InMemoryStore::default();
        store.insert_applicant(spike()).await.unwrap();

        let err = store.insert_applicant(spike()).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list_applicants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_owned_notes_only() {
        let store = InMemoryStore::default();
        let spiegel = store.insert_applicant(spike()).await.unwrap();
        let mut jet = spike();
        jet.first_name = "Jet".to_string();
        jet.last_name = "Black".to_string();
        jet.email = "jet.black@bebop.com".to_string();
        let black = store.insert_applicant(jet).await.unwrap();

        store.insert_note(spiegel.id, note("first")).await.unwrap();
        store.insert_note(spiegel.id, note("second")).await.unwrap();
        store.insert_note(black.id, note("third")).await.unwrap();

        assert!(store.delete_applicant(spiegel.id).await.unwrap());
        assert!(store.list_notes(spiegel.id).await.unwrap().is_empty());
        assert_eq!(store.list_notes(black.id).await.unwrap().len(), 1);
        assert!(!store.delete_applicant(spiegel.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_note_requires_existing_owner() {
        let store = InMemoryStore::default();
        let missing = Uuid::new_v4();

        let err = store.insert_note(missing, note("orphan")).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingApplicant(id) if id == missing));
        assert_eq!(store.note_count(), 0);
    }
}
