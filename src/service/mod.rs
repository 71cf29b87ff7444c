use crate::{
    dto::NoteRequest,
    models::{NewNote, Note},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
}

impl TryFrom<NoteRequest> for NewNote {
    type Error = ValidationError;

    /// The title must contain something other than whitespace. Content
    /// that is absent or `null` becomes an empty string.
    fn try_from(request: NoteRequest) -> Result<Self, Self::Error> {
        let title = request
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or(ValidationError::TitleRequired)?;

        Ok(Self {
            title,
            content: request.content.unwrap_or_default(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn create_note(&self, request: NoteRequest) -> Result<Note, ServiceError> {
        let note = NewNote::try_from(request)?;
        let created = self.store.insert(note).await?;

        tracing::debug!("created note {}", created.id);
        Ok(created)
    }

    pub async fn update_note(&self, id: i64, request: NoteRequest) -> Result<Note, ServiceError> {
        let note = NewNote::try_from(request)?;

        self.store
            .update(id, note)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ServiceError> {
        if self.store.delete(id).await? {
            tracing::debug!("deleted note {}", id);
            Ok(())
        } else {
            Err(ServiceError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryNoteStore;

    fn request(title: Option<&str>, content: Option<&str>) -> NoteRequest {
        NoteRequest {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    fn service() -> (Arc<MemoryNoteStore>, NoteService) {
        let store = Arc::new(MemoryNoteStore::new());
        let service = NoteService::new(store.clone());
        (store, service)
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = NewNote::try_from(request(None, Some("body"))).unwrap_err();
        assert_eq!(err, ValidationError::TitleRequired);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(NewNote::try_from(request(Some(""), None)).is_err());
        assert!(NewNote::try_from(request(Some("  \t\n"), None)).is_err());
    }

    #[test]
    fn absent_content_becomes_empty() {
        let note = NewNote::try_from(request(Some("Groceries"), None)).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "");
    }

    #[test]
    fn title_is_kept_as_submitted() {
        let note = NewNote::try_from(request(Some("  padded "), Some("x"))).unwrap();
        assert_eq!(note.title, "  padded ");
        assert_eq!(note.content, "x");
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_store() {
        let (store, service) = service();

        let err = service.create_note(request(Some(" "), None)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn invalid_update_is_reported_before_not_found() {
        let (_, service) = service();

        let err = service.update_note(7, request(None, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_note_maps_to_not_found() {
        let (_, service) = service();

        assert!(matches!(
            service.get_note(1).await,
            Err(ServiceError::NotFound(1))
        ));
        assert!(matches!(
            service.update_note(1, request(Some("t"), None)).await,
            Err(ServiceError::NotFound(1))
        ));
        assert!(matches!(
            service.delete_note(1).await,
            Err(ServiceError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let (store, service) = service();
        store.set_offline(true);

        assert!(matches!(
            service.list_notes().await,
            Err(ServiceError::Store(StoreError::Unavailable(_)))
        ));
    }
}
