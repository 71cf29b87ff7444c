use super::ApiClient;
use crate::{dto::NoteRequest, models::Note};

/// Title and content being edited in the note dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

impl From<&NoteForm> for NoteRequest {
    fn from(form: &NoteForm) -> Self {
        Self::new(form.title.clone(), form.content.clone())
    }
}

/// Local mirror of the note collection plus dialog state.
///
/// Mutations are applied from the server's response rather than by
/// refetching the list. A failed request is logged and leaves the
/// collection as it was.
#[derive(Debug)]
pub struct NoteBoard {
    client: ApiClient,
    notes: Vec<Note>,
    loading: bool,
    editing: Option<i64>,
    form: NoteForm,
    modal_open: bool,
}

impl NoteBoard {
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            notes: Vec::new(),
            loading: true,
            editing: None,
            form: NoteForm {
                title: String::new(),
                content: String::new(),
            },
            modal_open: false,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub const fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub const fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    /// Fetch the whole collection. `loading` is cleared either way.
    pub async fn load(&mut self) {
        match self.client.list_notes().await {
            Ok(notes) => self.notes = notes,
            Err(e) => tracing::error!("Error fetching notes: {}", e),
        }
        self.loading = false;
    }

    pub fn open_new(&mut self) {
        self.editing = None;
        self.form = NoteForm::default();
        self.modal_open = true;
    }

    /// Open the dialog on an existing note. Returns false if the note is
    /// not in the local collection.
    pub fn open_edit(&mut self, id: i64) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };

        self.form = NoteForm {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.editing = Some(id);
        self.modal_open = true;
        true
    }

    pub fn close(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.form = NoteForm::default();
    }

    /// Create or update from the form buffer, depending on whether a note
    /// is being edited. A blank title sends nothing. The dialog only closes
    /// on success.
    pub async fn submit(&mut self) -> bool {
        if self.form.title.trim().is_empty() {
            return false;
        }

        let request = NoteRequest::from(&self.form);

        match self.editing {
            None => match self.client.create_note(&request).await {
                Ok(note) => {
                    self.notes.insert(0, note);
                }
                Err(e) => {
                    tracing::error!("Error creating note: {}", e);
                    return false;
                }
            },
            Some(id) => match self.client.update_note(id, &request).await {
                Ok(updated) => {
                    for note in &mut self.notes {
                        if note.id == id {
                            *note = updated.clone();
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Error updating note: {}", e);
                    return false;
                }
            },
        }

        self.close();
        true
    }

    /// Delete a note once `confirm` agrees. Declining sends no request.
    pub async fn delete(&mut self, id: i64, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }

        match self.client.delete_note(id).await {
            Ok(_) => {
                self.notes.retain(|note| note.id != id);
                true
            }
            Err(e) => {
                tracing::error!("Error deleting note: {}", e);
                false
            }
        }
    }
}
