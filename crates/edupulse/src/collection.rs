//! Ordered entity collections mirrored to the store.
//!
//! A collection is read once when opened and rewritten whole after every
//! mutation. New entities go to the front. A failed write does not roll back
//! the in-memory change; it is handed back as a warning and the two stay out
//! of sync until the next reload.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{generate_id, Draft, Entity};
use crate::storage::{self, SharedStore};

/// The result of a mutation that was applied in memory.
///
/// `warning` holds the persistence error, if the write failed.
#[derive(Debug)]
pub struct Synced<T> {
    /// The added, updated or removed entity.
    pub value: T,
    /// Set when the collection could not be written back.
    pub warning: Option<Error>,
}

impl<T> Synced<T> {
    /// Whether the store reflects the change.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }

    /// Drop the warning, keeping the value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// An ordered, newest-first collection of one entity kind.
#[derive(Debug)]
pub struct EntityCollection<T: Entity> {
    store: SharedStore,
    items: Vec<T>,
}

impl<T: Entity> EntityCollection<T> {
    /// Load the collection from its slot, or the bundled dataset.
    #[must_use]
    pub fn open(store: SharedStore) -> Self {
        let items = storage::load(store.as_ref(), T::SLOT, T::fallback());
        debug!("Opened {} collection with {} items", T::KIND, items.len());
        Self { store, items }
    }

    /// Build a collection from explicit items without touching the store.
    #[must_use]
    pub fn with_items(store: SharedStore, items: Vec<T>) -> Self {
        Self { store, items }
    }

    /// Entities in display order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The store this collection writes to.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Validate `draft`, give it a fresh id, prepend it and persist.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is blank. Nothing is
    /// added in that case.
    pub fn add<D>(&mut self, draft: D) -> Result<Synced<T>>
    where
        D: Draft<Entity = T>,
    {
        draft.validate()?;
        let id = self.fresh_id();
        let entity = draft.build(id);
        debug!("Adding {} {}", T::KIND, entity.id());

        self.items.insert(0, entity.clone());
        Ok(self.synced(entity))
    }

    /// Apply `patch` to the entity with `id`, keep its id, and persist.
    ///
    /// The patch is applied to a copy; the collection only changes if the
    /// edited entity still has every required field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entity has that id, or a validation
    /// error if the edit blanks a required field.
    pub fn update<F>(&mut self, id: &str, patch: F) -> Result<Synced<T>>
    where
        F: FnOnce(&mut T),
    {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND.as_str(), id))?;

        let mut updated = self.items[index].clone();
        patch(&mut updated);
        updated.set_id(id.to_string());
        updated.normalize();
        updated.validate()?;

        self.items[index] = updated.clone();
        debug!("Updated {} {}", T::KIND, id);
        Ok(self.synced(updated))
    }

    /// Remove the entity with `id` and persist.
    ///
    /// Views call this only after the confirm gesture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entity has that id.
    pub fn remove(&mut self, id: &str) -> Result<Synced<T>> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND.as_str(), id))?;

        let removed = self.items.remove(index);
        debug!("Removed {} {}", T::KIND, id);
        Ok(self.synced(removed))
    }

    /// Write the whole collection back to its slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the write fails.
    pub fn persist(&self) -> Result<()> {
        storage::save(self.store.as_ref(), T::SLOT, &self.items)
    }

    fn synced(&self, value: T) -> Synced<T> {
        let warning = self.persist().err();
        if let Some(e) = &warning {
            warn!("{} collection is out of sync with storage: {}", T::KIND, e);
        }
        Synced { value, warning }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id(T::KIND);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::model::{Course, Event, EventDraft, Student, StudentDraft, Teacher};
    use crate::storage::{keys, KeyValueStore, MemoryStore};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn nora() -> StudentDraft {
        StudentDraft {
            name: "Nora Lee".to_string(),
            grade: "9th".to_string(),
            email: None,
            subjects: Vec::new(),
        }
    }

    #[test]
    fn test_open_uses_fallback_without_writing() {
        let store = Arc::new(MemoryStore::new());
        let students = EntityCollection::<Student>::open(store.clone());

        assert_eq!(students.items(), defaults::students().as_slice());
        assert!(store.get(keys::STUDENTS).unwrap().is_none());
    }

    #[test]
    fn test_add_student_scenario() {
        let store = Arc::new(MemoryStore::new());
        let mut students = EntityCollection::<Student>::open(store.clone());

        let synced = students.add(nora()).unwrap();
        assert!(synced.is_persisted());

        assert_eq!(students.len(), 6);
        let first = &students.items()[0];
        assert_eq!(first.name, "Nora Lee");
        assert_eq!(first.attendance, 100);
        assert!((first.gpa - 4.0).abs() < f64::EPSILON);
        assert_eq!(first.email, "nora.lee@school.edu");
        assert!(first.id.starts_with("s-"));

        let reloaded = EntityCollection::<Student>::open(store);
        assert_eq!(reloaded.items(), students.items());
    }

    #[test]
    fn test_add_produces_unique_ids() {
        let store = MemoryStore::shared();
        let mut students = EntityCollection::<Student>::open(store);

        for _ in 0..50 {
            students.add(nora()).unwrap();
        }
        let ids: HashSet<&str> = students.items().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 55);
    }

    #[test]
    fn test_add_invalid_draft_leaves_collection() {
        let store = MemoryStore::shared();
        let mut students = EntityCollection::<Student>::open(store);

        let err = students.add(StudentDraft::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(students.len(), 5);
    }

    #[test]
    fn test_update_preserves_id() {
        let store = MemoryStore::shared();
        let mut teachers = EntityCollection::<Teacher>::open(store);

        let updated = teachers
            .update("t2", |t| {
                t.experience = 9;
                t.id = "hijacked".to_string();
            })
            .unwrap()
            .into_value();

        assert_eq!(updated.id, "t2");
        assert_eq!(teachers.get("t2").unwrap().experience, 9);
        assert!(teachers.get("hijacked").is_none());
    }

    #[test]
    fn test_update_event_reformats_date() {
        let store = MemoryStore::shared();
        let mut events = EntityCollection::<Event>::open(store);

        let updated = events
            .update("ev-2", |e| e.date = "2023-10-21".to_string())
            .unwrap();
        assert_eq!(updated.value.date, "Oct 21, 2023");
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let store = Arc::new(MemoryStore::new());
        let mut students = EntityCollection::<Student>::open(store.clone());

        let err = students
            .update("1", |s| {
                s.name = "   ".to_string();
                s.email = String::new();
            })
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name", .. }));
        assert_eq!(students.get("1").unwrap().name, "Alice Johnson");
        assert!(store.get(keys::STUDENTS).unwrap().is_none());

        let mut courses = EntityCollection::<Course>::open(store.clone());
        let err = courses
            .update("c1", |c| c.title = String::new())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { field: "title", .. }));
        assert_eq!(courses.get("c1").unwrap().code, "PHY301");
        assert!(!courses.get("c1").unwrap().title.is_empty());
        assert!(store.get(keys::COURSES).unwrap().is_none());
    }

    #[test]
    fn test_update_blank_student_email_is_derived() {
        let store = Arc::new(MemoryStore::new());
        let mut students = EntityCollection::<Student>::open(store.clone());

        let updated = students
            .update("1", |s| {
                s.name = "Alice Moreno".to_string();
                s.email = String::new();
            })
            .unwrap()
            .into_value();
        assert_eq!(updated.email, "alice.moreno@school.edu");

        let reloaded = EntityCollection::<Student>::open(store);
        assert_eq!(reloaded.get("1").unwrap().email, "alice.moreno@school.edu");
    }

    #[test]
    fn test_update_unknown_id() {
        let store = MemoryStore::shared();
        let mut courses = EntityCollection::<Course>::open(store);

        let err = courses.update("c99", |_| {}).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove() {
        let store = Arc::new(MemoryStore::new());
        let mut courses = EntityCollection::<Course>::open(store.clone());

        let removed = courses.remove("c3").unwrap().into_value();
        assert_eq!(removed.title, "World History");
        assert_eq!(courses.len(), 4);

        let reloaded = EntityCollection::<Course>::open(store);
        assert!(reloaded.get("c3").is_none());
    }

    #[test]
    fn test_failed_write_keeps_memory_change() {
        crate::logging::init_test_logging();
        let store = Arc::new(MemoryStore::new());
        let mut events = EntityCollection::<Event>::open(store.clone());
        store.set_fail_writes(true);

        let synced = events
            .add(EventDraft {
                title: "Robotics Expo".to_string(),
                date: "2023-11-02".to_string(),
                location: "Gym".to_string(),
                ..EventDraft::default()
            })
            .unwrap();

        assert!(!synced.is_persisted());
        assert!(synced.warning.as_ref().is_some_and(Error::is_storage_write));
        assert_eq!(events.len(), 4);
        assert!(store.get(keys::EVENTS).unwrap().is_none());
    }

    #[test]
    fn test_with_items_does_not_touch_store() {
        let store = Arc::new(MemoryStore::new());
        let courses = EntityCollection::<Course>::with_items(store.clone(), Vec::new());

        assert!(courses.is_empty());
        assert!(store.keys().unwrap().is_empty());
    }
}
