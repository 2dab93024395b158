use log::{debug, info, warn};
use std::sync::Arc;

use crate::logic::ValidationErrors;
use crate::model::{next_id, Entity, Event, Group, Id, Record};
use crate::store::{CollectionStore, Store};

/// Every create, update and delete goes through here.
///
/// Each write copies the collection, changes the copy and hands it to the
/// store with `replace_all`. Deletes never cascade: rows that referenced the
/// deleted one keep their key and resolve to "Unknown X" afterwards.
///
/// Writes are read-modify-replace without a lock around the pair; the store
/// has a single writer.
#[derive(Debug)]
pub struct Gateway<S: Store> {
    store: Arc<S>,
}

impl<S: Store> Clone for Gateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Store> Gateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Append a new row built from `draft` and return its id
    pub fn create<E>(&self, draft: E::Draft) -> Result<Id, ValidationErrors>
    where
        E: Record,
        S: CollectionStore<E>,
    {
        let rows = self.store.rows::<E>();
        let Some(id) = next_id(rows.iter().map(Entity::id)) else {
            let errors = ValidationErrors::id_exhausted(E::COLLECTION);
            warn!("rejected new {}: {}", E::COLLECTION, errors);
            return Err(errors);
        };

        let row = E::from_draft(id, draft).map_err(|errors| {
            warn!("rejected new {}: {}", E::COLLECTION, errors);
            errors
        })?;

        let mut next = Vec::with_capacity(rows.len() + 1);
        next.extend(rows.iter().cloned());
        next.push(row);
        CollectionStore::<E>::replace_all(&*self.store, next);

        info!("created {} {}", E::COLLECTION, id);
        Ok(id)
    }

    /// Merge `draft` into row `id`.
    ///
    /// Returns `Ok(false)` when no such row exists. A merge that would leave a
    /// required field blank is rejected and the store is left unchanged.
    pub fn update<E>(&self, id: Id, draft: E::Draft) -> Result<bool, ValidationErrors>
    where
        E: Record,
        S: CollectionStore<E>,
    {
        let rows = self.store.rows::<E>();
        let Some(position) = rows.iter().position(|row| row.id() == id) else {
            debug!("update skipped: no {} {}", E::COLLECTION, id);
            return Ok(false);
        };

        let mut updated = rows[position].clone();
        updated.apply_draft(draft);
        if let Err(errors) = updated.validate() {
            warn!("rejected update of {} {}: {}", E::COLLECTION, id, errors);
            return Err(errors);
        }

        let mut next = rows.to_vec();
        next[position] = updated;
        CollectionStore::<E>::replace_all(&*self.store, next);

        info!("updated {} {}", E::COLLECTION, id);
        Ok(true)
    }

    /// Remove row `id`; false when it was not there
    pub fn delete<E>(&self, id: Id) -> bool
    where
        E: Entity,
        S: CollectionStore<E>,
    {
        let rows = self.store.rows::<E>();
        if !rows.iter().any(|row| row.id() == id) {
            debug!("delete skipped: no {} {}", E::COLLECTION, id);
            return false;
        }

        let next: Vec<E> = rows.iter().filter(|row| row.id() != id).cloned().collect();
        CollectionStore::<E>::replace_all(&*self.store, next);

        info!("deleted {} {}", E::COLLECTION, id);
        true
    }

    /// Add an athlete to a group's roster. Adding an existing member is a
    /// no-op; returns false only when the group does not exist.
    pub fn add_member(&self, group_id: Id, athlete_id: Id) -> bool {
        self.modify::<Group, _, _>(group_id, |group| group.add_member(athlete_id))
            .is_some()
    }

    /// Returns false when the group does not exist
    pub fn remove_member(&self, group_id: Id, athlete_id: Id) -> bool {
        self.modify::<Group, _, _>(group_id, |group| group.remove_member(athlete_id))
            .is_some()
    }

    /// Flip membership; returns the new state, or `None` for an unknown group
    pub fn toggle_member(&self, group_id: Id, athlete_id: Id) -> Option<bool> {
        self.modify::<Group, _, _>(group_id, |group| {
            if group.remove_member(athlete_id) {
                (true, false)
            } else {
                (group.add_member(athlete_id), true)
            }
        })
    }

    /// Record an athlete as present or absent for an event.
    ///
    /// Only current members of the event's group can be marked; returns false
    /// for an unknown event or a non-member.
    pub fn mark_attendance(&self, event_id: Id, athlete_id: Id, present: bool) -> bool {
        let snapshot = self.store.snapshot();
        let is_member = snapshot
            .event(event_id)
            .and_then(|event| snapshot.group(event.group_id))
            .is_some_and(|group| group.has_member(athlete_id));
        if !is_member {
            debug!(
                "attendance skipped: athlete {} is not on the roster of event {}",
                athlete_id, event_id
            );
            return false;
        }

        self.modify::<Event, _, _>(event_id, |event| {
            let changed = event.attendance.insert(athlete_id, present) != Some(present);
            (changed, ())
        })
        .is_some()
    }

    /// Drop an athlete's mark so they show as unmarked again
    pub fn clear_attendance(&self, event_id: Id, athlete_id: Id) -> bool {
        self.modify::<Event, _, _>(event_id, |event| {
            (event.attendance.remove(&athlete_id).is_some(), ())
        })
        .is_some()
    }

    /// Apply `change` to a copy of row `id`. The closure reports whether it
    /// changed anything; unchanged rows are not written back.
    fn modify<E, T, F>(&self, id: Id, change: F) -> Option<T::Output>
    where
        E: Entity,
        S: CollectionStore<E>,
        T: Change,
        F: FnOnce(&mut E) -> T,
    {
        let rows = self.store.rows::<E>();
        let position = rows.iter().position(|row| row.id() == id)?;

        let mut row = rows[position].clone();
        let (changed, output) = change(&mut row).split();
        if changed {
            let mut next = rows.to_vec();
            next[position] = row;
            CollectionStore::<E>::replace_all(&*self.store, next);
            debug!("modified {} {}", E::COLLECTION, id);
        }
        Some(output)
    }
}

/// What a `modify` closure returns: whether the row changed, plus a value
pub trait Change {
    type Output;

    fn split(self) -> (bool, Self::Output);
}

impl Change for bool {
    type Output = ();

    fn split(self) -> (bool, ()) {
        (self, ())
    }
}

impl<T> Change for (bool, T) {
    type Output = T;

    fn split(self) -> (bool, T) {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::AttendanceStatus;
    use crate::logic::Resolver;
    use crate::model::*;
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    fn gateway() -> Gateway<MemoryStore> {
        Gateway::new(Arc::new(MemoryStore::new()))
    }

    fn event_draft(group_id: Id) -> EventDraft {
        EventDraft {
            title: Some("Practice".to_string()),
            group_id: Some(group_id),
            date: NaiveDate::from_ymd_opt(2024, 4, 2),
            start_time: NaiveTime::from_hms_opt(16, 0, 0),
            end_time: NaiveTime::from_hms_opt(17, 30, 0),
            location: Some("Gym".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_first_athlete_gets_id_one() {
        let gateway = gateway();
        let id = gateway
            .create::<Athlete>(AthleteDraft::new("Alex Lee", "alex@x.com", "Basketball"))
            .unwrap();

        assert_eq!(id, 1);
        let athletes = gateway.store().rows::<Athlete>();
        assert_eq!(athletes.len(), 1);
        assert_eq!(athletes[0].id, 1);
        assert_eq!(athletes[0].name, "Alex Lee");
    }

    #[test]
    fn test_create_uses_max_plus_one() {
        let gateway = gateway();
        for name in ["A", "B", "C"] {
            gateway
                .create::<Athlete>(AthleteDraft::new(name, "x@x.com", "Golf"))
                .unwrap();
        }
        assert!(gateway.delete::<Athlete>(2));

        let id = gateway
            .create::<Athlete>(AthleteDraft::new("D", "d@x.com", "Golf"))
            .unwrap();
        assert_eq!(id, 4);

        // Deleting the max frees its id for reuse
        assert!(gateway.delete::<Athlete>(4));
        let id = gateway
            .create::<Athlete>(AthleteDraft::new("E", "e@x.com", "Golf"))
            .unwrap();
        assert_eq!(id, 4);
    }

    #[test]
    fn test_create_after_max_id_is_rejected() {
        let gateway = gateway();
        let last =
            Athlete::from_draft(Id::MAX, AthleteDraft::new("Last", "l@x.com", "Golf")).unwrap();
        CollectionStore::<Athlete>::replace_all(&**gateway.store(), vec![last]);

        let errors = gateway
            .create::<Athlete>(AthleteDraft::new("Next", "n@x.com", "Golf"))
            .unwrap_err();
        assert!(errors.contains("id"));

        let athletes = gateway.store().rows::<Athlete>();
        assert_eq!(athletes.len(), 1);
        assert_eq!(athletes[0].id, Id::MAX);
    }

    #[test]
    fn test_ids_are_per_collection() {
        let gateway = gateway();
        gateway
            .create::<Athlete>(AthleteDraft::new("A", "a@x.com", "Golf"))
            .unwrap();
        let coach_id = gateway
            .create::<Coach>(CoachDraft {
                name: Some("C".to_string()),
                email: Some("c@x.com".to_string()),
                phone: Some("555".to_string()),
                specialty: Some("Golf".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(coach_id, 1);
    }

    #[test]
    fn test_create_invalid_leaves_store_unchanged() {
        let gateway = gateway();
        let errors = gateway
            .create::<Athlete>(AthleteDraft {
                name: Some("No Sport".to_string()),
                email: Some("n@x.com".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert!(errors.contains("sport"));
        assert!(gateway.store().rows::<Athlete>().is_empty());
        assert_eq!(gateway.store().generation(Collection::Athlete), 0);
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let gateway = gateway();
        let id = gateway
            .create::<Athlete>(AthleteDraft::new("Alex", "alex@x.com", "Tennis"))
            .unwrap();

        let updated = gateway
            .update::<Athlete>(
                id,
                AthleteDraft {
                    sport: Some("Squash".to_string()),
                    coach_id: Some(Some(5)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated);

        let athlete = gateway.store().snapshot().athlete(id).cloned().unwrap();
        assert_eq!(athlete.sport, "Squash");
        assert_eq!(athlete.coach_id, Some(5));
        assert_eq!(athlete.name, "Alex");
        assert_eq!(athlete.email, "alex@x.com");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let gateway = gateway();
        let updated = gateway
            .update::<Athlete>(9, AthleteDraft::new("Ghost", "g@x.com", "Golf"))
            .unwrap();

        assert!(!updated);
        assert!(gateway.store().rows::<Athlete>().is_empty());
    }

    #[test]
    fn test_update_rejects_blanked_required_field() {
        let gateway = gateway();
        let id = gateway
            .create::<Athlete>(AthleteDraft::new("Alex", "alex@x.com", "Tennis"))
            .unwrap();

        let errors = gateway
            .update::<Athlete>(
                id,
                AthleteDraft {
                    email: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(errors.contains("email"));
        assert_eq!(gateway.store().rows::<Athlete>()[0].email, "alex@x.com");
    }

    #[test]
    fn test_delete_unknown_returns_false() {
        let gateway = gateway();
        assert!(!gateway.delete::<School>(1));
    }

    #[test]
    fn test_delete_does_not_cascade() {
        let gateway = gateway();
        let coach_id = gateway
            .create::<Coach>(CoachDraft {
                name: Some("Pat".to_string()),
                email: Some("pat@x.com".to_string()),
                phone: Some("555".to_string()),
                specialty: Some("Swim".to_string()),
                ..Default::default()
            })
            .unwrap();
        let mut draft = AthleteDraft::new("Alex", "alex@x.com", "Swim");
        draft.coach_id = Some(Some(coach_id));
        let athlete_id = gateway.create::<Athlete>(draft).unwrap();

        assert!(gateway.delete::<Coach>(coach_id));

        let snapshot = gateway.store().snapshot();
        let athlete = snapshot.athlete(athlete_id).unwrap();
        assert_eq!(athlete.coach_id, Some(coach_id));
        assert_eq!(
            Resolver::new(&snapshot).coach_name(athlete.coach_id).to_string(),
            "Unknown Coach"
        );
    }

    #[test]
    fn test_membership_add_is_idempotent() {
        let gateway = gateway();
        let group_id = gateway
            .create::<Group>(GroupDraft {
                name: Some("Swim Team".to_string()),
                coach_id: Some(1),
                ..Default::default()
            })
            .unwrap();

        assert!(gateway.add_member(group_id, 7));
        let generation = gateway.store().generation(Collection::Group);
        assert!(gateway.add_member(group_id, 7));

        let groups = gateway.store().rows::<Group>();
        assert_eq!(groups[0].athletes, vec![7]);
        // The second add wrote nothing
        assert_eq!(gateway.store().generation(Collection::Group), generation);
        assert!(!gateway.add_member(99, 7));
    }

    #[test]
    fn test_toggle_member() {
        let gateway = gateway();
        let group_id = gateway
            .create::<Group>(GroupDraft {
                name: Some("Swim Team".to_string()),
                coach_id: Some(1),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(gateway.toggle_member(group_id, 3), Some(true));
        assert_eq!(gateway.toggle_member(group_id, 3), Some(false));
        assert_eq!(gateway.toggle_member(42, 3), None);
        assert!(gateway.store().rows::<Group>()[0].athletes.is_empty());
        assert!(gateway.remove_member(group_id, 3));
    }

    #[test]
    fn test_mark_attendance_only_for_members() {
        let gateway = gateway();
        for name in ["Ana", "Ben", "Cy"] {
            gateway
                .create::<Athlete>(AthleteDraft::new(name, "x@x.com", "Swim"))
                .unwrap();
        }
        let group_id = gateway
            .create::<Group>(GroupDraft {
                name: Some("Swim Team".to_string()),
                coach_id: Some(1),
                athletes: Some(vec![1, 2]),
                ..Default::default()
            })
            .unwrap();
        let event_id = gateway.create::<Event>(event_draft(group_id)).unwrap();

        assert!(gateway.mark_attendance(event_id, 1, true));
        assert!(gateway.mark_attendance(event_id, 2, false));
        assert!(!gateway.mark_attendance(event_id, 3, true));
        assert!(!gateway.mark_attendance(99, 1, true));

        // A later member has no historical mark until marked
        assert!(gateway.add_member(group_id, 3));
        let snapshot = gateway.store().snapshot();
        let statuses: Vec<AttendanceStatus> = Resolver::new(&snapshot)
            .event_roster(event_id)
            .iter()
            .map(|entry| entry.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                AttendanceStatus::Present,
                AttendanceStatus::Absent,
                AttendanceStatus::Unmarked,
            ]
        );

        assert!(gateway.clear_attendance(event_id, 1));
        let event = gateway.store().snapshot().event(event_id).cloned().unwrap();
        assert_eq!(event.attendance_for(1), None);
    }
}
