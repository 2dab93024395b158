use crate::model::{Athlete, Coach, Entity, Event, Group, Id, School};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only view of every collection at one instant.
///
/// Id lookups go through maps built when the snapshot is taken, so joins do
/// not rescan a collection per row.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    schools: Arc<Vec<School>>,
    coaches: Arc<Vec<Coach>>,
    athletes: Arc<Vec<Athlete>>,
    groups: Arc<Vec<Group>>,
    events: Arc<Vec<Event>>,
    school_index: HashMap<Id, usize>,
    coach_index: HashMap<Id, usize>,
    athlete_index: HashMap<Id, usize>,
    group_index: HashMap<Id, usize>,
    event_index: HashMap<Id, usize>,
}

impl StoreSnapshot {
    pub fn new(
        schools: Arc<Vec<School>>,
        coaches: Arc<Vec<Coach>>,
        athletes: Arc<Vec<Athlete>>,
        groups: Arc<Vec<Group>>,
        events: Arc<Vec<Event>>,
    ) -> Self {
        Self {
            school_index: index_by_id(&schools),
            coach_index: index_by_id(&coaches),
            athlete_index: index_by_id(&athletes),
            group_index: index_by_id(&groups),
            event_index: index_by_id(&events),
            schools,
            coaches,
            athletes,
            groups,
            events,
        }
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn coaches(&self) -> &[Coach] {
        &self.coaches
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// True when all five collections are empty
    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
            && self.coaches.is_empty()
            && self.athletes.is_empty()
            && self.groups.is_empty()
            && self.events.is_empty()
    }

    pub fn school(&self, id: Id) -> Option<&School> {
        self.school_index.get(&id).map(|i| &self.schools[*i])
    }

    pub fn coach(&self, id: Id) -> Option<&Coach> {
        self.coach_index.get(&id).map(|i| &self.coaches[*i])
    }

    pub fn athlete(&self, id: Id) -> Option<&Athlete> {
        self.athlete_index.get(&id).map(|i| &self.athletes[*i])
    }

    pub fn group(&self, id: Id) -> Option<&Group> {
        self.group_index.get(&id).map(|i| &self.groups[*i])
    }

    pub fn event(&self, id: Id) -> Option<&Event> {
        self.event_index.get(&id).map(|i| &self.events[*i])
    }
}

/// First row wins when ids repeat, matching a front-to-back scan
fn index_by_id<E: Entity>(rows: &[E]) -> HashMap<Id, usize> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        index.entry(row.id()).or_insert(position);
    }
    index
}
