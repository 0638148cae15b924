use log::warn;

use crate::form::FormData;
use crate::storage::KeyValueStore;

/// Backend key holding the serialized draft.
pub const FORM_DRAFT_KEY: &str = "deprocast_project_form_draft";
/// Backend key holding the modal-open flag, literal "true" or "false".
pub const MODAL_STATE_KEY: &str = "deprocast_project_modal_state";

/// Keeps the new-project form in sync with the backend so a half-filled form
/// survives a restart. Persistence is best-effort: backend failures are logged
/// and the in-memory state stays authoritative for the session.
pub struct FormDraftStore<S: KeyValueStore> {
    backend: S,
    form_data: FormData,
    skills_input: String,
    modal_open: bool,
}

impl<S: KeyValueStore> FormDraftStore<S> {
    pub fn new(backend: S) -> Self {
        let mut store = Self {
            backend,
            form_data: FormData::default(),
            skills_input: String::new(),
            modal_open: false,
        };
        store.restore();
        store
    }

    fn restore(&mut self) {
        match self.backend.get(FORM_DRAFT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(data) => self.form_data = data,
                Err(e) => warn!("failed to load saved draft, starting empty: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("failed to load saved draft, starting empty: {e}"),
        }

        let flag = match self.backend.get(MODAL_STATE_KEY) {
            Ok(flag) => flag,
            Err(e) => {
                warn!("failed to load modal state: {e}");
                None
            }
        };
        // Reopen only when there is a draft to come back to, whatever the
        // stored flag claims.
        self.modal_open = self.form_data.has_content() && flag.as_deref() == Some("true");
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    /// Recomputed from current state on every call.
    pub fn has_draft_data(&self) -> bool {
        self.form_data.has_content()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn skills_input(&self) -> &str {
        &self.skills_input
    }

    pub fn set_skills_input(&mut self, text: impl Into<String>) {
        self.skills_input = text.into();
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Applies an edit to the form, then saves or clears the stored draft
    /// depending on whether anything is left in it. Fields the edit does not
    /// touch keep their values.
    pub fn update_form_data(&mut self, edit: impl FnOnce(&mut FormData)) {
        edit(&mut self.form_data);
        self.persist_draft();
    }

    /// Back to defaults, buffer included. Leaves the modal flag alone.
    pub fn reset_form_data(&mut self) {
        self.form_data = FormData::default();
        self.skills_input.clear();
        if let Err(e) = self.backend.remove(FORM_DRAFT_KEY) {
            warn!("failed to clear saved draft: {e}");
        }
    }

    pub fn handle_open_form(&mut self) {
        self.modal_open = true;
        self.write_modal_flag("true");
    }

    /// Closes the modal but keeps the draft, so the form can be picked up
    /// again later.
    pub fn handle_cancel(&mut self) {
        self.modal_open = false;
        self.write_modal_flag("false");
    }

    /// Destructive cancel: close the modal and throw the draft away.
    pub fn handle_confirm_cancel(&mut self) {
        self.discard_and_close();
    }

    /// Called by the host once a submission went through elsewhere.
    pub fn handle_submit_success(&mut self) {
        self.discard_and_close();
    }

    /// Commits the skills buffer as a new entry. A whitespace-only buffer is
    /// dropped, but the buffer is cleared either way.
    pub fn commit_skill(&mut self) {
        let entry = self.skills_input.trim().to_string();
        self.skills_input.clear();
        if entry.is_empty() {
            return;
        }
        self.form_data.skills_resources_needed.push(entry);
        self.persist_draft();
    }

    pub fn remove_skill(&mut self, index: usize) {
        if index >= self.form_data.skills_resources_needed.len() {
            return;
        }
        self.form_data.skills_resources_needed.remove(index);
        self.persist_draft();
    }

    fn discard_and_close(&mut self) {
        self.modal_open = false;
        if let Err(e) = self.backend.remove(MODAL_STATE_KEY) {
            warn!("failed to clear modal state: {e}");
        }
        self.reset_form_data();
    }

    fn write_modal_flag(&mut self, value: &str) {
        if let Err(e) = self.backend.set(MODAL_STATE_KEY, value) {
            warn!("failed to save modal state: {e}");
        }
    }

    fn persist_draft(&mut self) {
        if self.form_data.has_content() {
            match serde_json::to_string(&self.form_data) {
                Ok(raw) => {
                    if let Err(e) = self.backend.set(FORM_DRAFT_KEY, &raw) {
                        warn!("failed to save draft: {e}");
                    }
                }
                Err(e) => warn!("failed to save draft: {e}"),
            }
        } else if let Err(e) = self.backend.remove(FORM_DRAFT_KEY) {
            warn!("failed to clear saved draft: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ProjectCategory;
    use crate::storage::MemoryStore;

    fn stored_draft<S: KeyValueStore>(store: &FormDraftStore<S>) -> Option<FormData> {
        store
            .backend()
            .get(FORM_DRAFT_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_update_with_content_writes_draft() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.update_form_data(|f| f.title = "Foo".to_string());

        assert!(store.has_draft_data());
        assert_eq!(stored_draft(&store).unwrap(), *store.form_data());
    }

    #[test]
    fn test_update_without_content_removes_draft() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.update_form_data(|f| f.title = "Foo".to_string());
        store.update_form_data(|f| f.title = "   ".to_string());

        assert!(!store.has_draft_data());
        assert_eq!(store.backend().get(FORM_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn test_category_only_edit_does_not_persist() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.update_form_data(|f| {
            f.category = Some(ProjectCategory::Other);
            f.perceived_difficulty = Some(2);
        });

        assert!(!store.has_draft_data());
        assert_eq!(store.backend().get(FORM_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn test_untouched_fields_keep_their_values() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.update_form_data(|f| f.title = "Foo".to_string());
        store.update_form_data(|f| f.description = "Bar".to_string());

        assert_eq!(store.form_data().title, "Foo");
        assert_eq!(store.form_data().description, "Bar");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.update_form_data(|f| f.title = "Foo".to_string());
        store.set_skills_input("sailing");

        store.reset_form_data();
        store.reset_form_data();

        assert_eq!(*store.form_data(), FormData::default());
        assert_eq!(store.skills_input(), "");
        assert_eq!(store.backend().get(FORM_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_leaves_modal_flag_alone() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.handle_open_form();
        store.reset_form_data();

        assert_eq!(
            store.backend().get(MODAL_STATE_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_commit_skill_appends_and_clears_buffer() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.set_skills_input("  knots  ");
        store.commit_skill();

        assert_eq!(store.skills_input(), "");
        assert_eq!(store.form_data().skills_resources_needed, vec!["knots"]);
        assert!(store.has_draft_data());
        assert_eq!(stored_draft(&store).unwrap(), *store.form_data());
    }

    #[test]
    fn test_commit_blank_skill_only_clears_buffer() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.set_skills_input("   ");
        store.commit_skill();

        assert_eq!(store.skills_input(), "");
        assert!(store.form_data().skills_resources_needed.is_empty());
        assert_eq!(store.backend().get(FORM_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_skill() {
        let mut store = FormDraftStore::new(MemoryStore::new());
        store.set_skills_input("a");
        store.commit_skill();
        store.set_skills_input("b");
        store.commit_skill();

        store.remove_skill(0);
        assert_eq!(store.form_data().skills_resources_needed, vec!["b"]);

        // Out of range is a no-op.
        store.remove_skill(5);
        assert_eq!(store.form_data().skills_resources_needed, vec!["b"]);

        // Removing the last entry empties the draft and clears the key.
        store.remove_skill(0);
        assert_eq!(store.backend().get(FORM_DRAFT_KEY).unwrap(), None);
    }
}
