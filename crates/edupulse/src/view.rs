//! List-detail views.
//!
//! A view pairs a collection with a confirm gesture so removal always takes
//! two activations on the same item inside the window.

use std::time::{Duration, Instant};

use tracing::info;

use crate::collection::{EntityCollection, Synced};
use crate::confirm::{Activation, ConfirmGesture};
use crate::error::{Error, Result};
use crate::model::{AdmissionApplication, Draft, Entity, Student};
use crate::storage::SharedStore;

/// Outcome of a remove activation.
#[derive(Debug)]
pub enum Removal<T> {
    /// The item is armed; nothing was deleted.
    Armed {
        /// When the arm expires.
        deadline: Instant,
    },
    /// The item was deleted.
    Removed(Synced<T>),
}

/// A list view over one entity kind.
#[derive(Debug)]
pub struct ListView<T: Entity> {
    collection: EntityCollection<T>,
    gesture: ConfirmGesture,
}

impl<T: Entity> ListView<T> {
    /// Mount the view: load the collection from the store or the fallback.
    #[must_use]
    pub fn mount(store: SharedStore, confirm_window: Duration) -> Self {
        Self {
            collection: EntityCollection::open(store),
            gesture: ConfirmGesture::new(confirm_window),
        }
    }

    /// The backing collection.
    #[must_use]
    pub fn collection(&self) -> &EntityCollection<T> {
        &self.collection
    }

    /// Entities in display order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.collection.items()
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.collection.get(id)
    }

    /// Look up an entity by id, or fail with [`Error::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entity has that id.
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id)
            .ok_or_else(|| Error::not_found(T::KIND.as_str(), id))
    }

    /// Submit a creation form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is blank.
    pub fn add<D>(&mut self, draft: D) -> Result<Synced<T>>
    where
        D: Draft<Entity = T>,
    {
        let synced = self.collection.add(draft)?;
        info!("Added {} {}", T::KIND, synced.value.id());
        Ok(synced)
    }

    /// Submit an edit form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entity has that id.
    pub fn update<F>(&mut self, id: &str, patch: F) -> Result<Synced<T>>
    where
        F: FnOnce(&mut T),
    {
        self.collection.update(id, patch)
    }

    /// Activate the remove control on `id` at time `now`.
    ///
    /// The first activation arms; the second, on the same item before the
    /// deadline, deletes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entity has that id. The gesture is
    /// left untouched in that case.
    pub fn remove(&mut self, id: &str, now: Instant) -> Result<Removal<T>> {
        self.require(id)?;

        match self.gesture.activate(id, now) {
            Activation::Armed => Ok(Removal::Armed {
                deadline: now + self.gesture.window(),
            }),
            Activation::Confirmed => {
                let synced = self.collection.remove(id)?;
                info!("Removed {} {}", T::KIND, id);
                Ok(Removal::Removed(synced))
            }
        }
    }

    /// Whether `id` is armed for deletion at `now`.
    #[must_use]
    pub fn is_armed(&self, id: &str, now: Instant) -> bool {
        self.gesture.is_armed(id, now)
    }
}

impl ListView<Student> {
    /// Submit the admission form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the applicant's name is blank.
    pub fn admit(&mut self, application: AdmissionApplication) -> Result<Synced<Student>> {
        self.add(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::DEFAULT_WINDOW;
    use crate::model::Course;
    use crate::storage::MemoryStore;

    fn courses() -> ListView<Course> {
        ListView::mount(MemoryStore::shared(), DEFAULT_WINDOW)
    }

    #[test]
    fn test_single_activation_never_deletes() {
        let mut view = courses();
        let t0 = Instant::now();

        let outcome = view.remove("c3", t0).unwrap();
        assert!(matches!(outcome, Removal::Armed { .. }));
        assert_eq!(view.items().len(), 5);
        assert!(view.is_armed("c3", t0));
    }

    #[test]
    fn test_double_activation_deletes() {
        let mut view = courses();
        let t0 = Instant::now();

        view.remove("c3", t0).unwrap();
        let outcome = view.remove("c3", t0 + Duration::from_secs(1)).unwrap();

        match outcome {
            Removal::Removed(synced) => assert_eq!(synced.value.id, "c3"),
            Removal::Armed { .. } => panic!("expected removal"),
        }
        assert_eq!(view.items().len(), 4);
        assert!(view.get("c3").is_none());
    }

    #[test]
    fn test_expired_arm_rearms() {
        let mut view = courses();
        let t0 = Instant::now();

        view.remove("c3", t0).unwrap();
        let t4 = t0 + Duration::from_secs(4);
        let outcome = view.remove("c3", t4).unwrap();

        assert!(matches!(outcome, Removal::Armed { deadline } if deadline == t4 + DEFAULT_WINDOW));
        assert_eq!(view.items().len(), 5);
    }

    #[test]
    fn test_remove_unknown_id_keeps_arm() {
        let mut view = courses();
        let t0 = Instant::now();

        view.remove("c1", t0).unwrap();
        assert!(view.remove("c42", t0).unwrap_err().is_not_found());
        assert!(view.is_armed("c1", t0));
    }

    #[test]
    fn test_admit() {
        let mut view: ListView<Student> = ListView::mount(MemoryStore::shared(), DEFAULT_WINDOW);
        let student = view
            .admit(AdmissionApplication {
                name: "Omar Diaz".to_string(),
                grade: "10th Grade".to_string(),
                ..AdmissionApplication::default()
            })
            .unwrap()
            .into_value();

        assert_eq!(view.items()[0].id, student.id);
        assert_eq!(student.grade, "10th");
        assert_eq!(student.subjects, vec!["Orientation"]);
    }

    #[test]
    fn test_require() {
        let view = courses();
        assert_eq!(view.require("c1").unwrap().code, "PHY301");
        assert!(view.require("nope").is_err());
    }
}
