use crate::model::{Athlete, Coach, Collection, Event, Group, Id, School};
use crate::store::StoreSnapshot;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Outcome of resolving a foreign key to a display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLookup<'a> {
    Found(&'a str),
    /// The key was empty
    NotAssigned,
    /// The key pointed at a row that no longer exists
    Unknown(Collection),
}

impl<'a> NameLookup<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, NameLookup::Found(_))
    }

    pub fn as_label(&self) -> Cow<'a, str> {
        match self {
            NameLookup::Found(name) => Cow::Borrowed(*name),
            NameLookup::NotAssigned => Cow::Borrowed("Not Assigned"),
            NameLookup::Unknown(collection) => Cow::Owned(collection.unknown_label()),
        }
    }
}

impl fmt::Display for NameLookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// Member with no entry in the event's attendance map
    Unmarked,
}

impl From<Option<bool>> for AttendanceStatus {
    fn from(mark: Option<bool>) -> Self {
        match mark {
            Some(true) => AttendanceStatus::Present,
            Some(false) => AttendanceStatus::Absent,
            None => AttendanceStatus::Unmarked,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry<'a> {
    pub athlete: &'a Athlete,
    pub status: AttendanceStatus,
}

/// Joins across a store snapshot.
///
/// Every lookup is total: dangling keys resolve to a sentinel or are dropped
/// from the result, never an error.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    snapshot: &'a StoreSnapshot,
}

impl<'a> Resolver<'a> {
    pub fn new(snapshot: &'a StoreSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn school_name(&self, school_id: Option<Id>) -> NameLookup<'a> {
        lookup(school_id, Collection::School, |id| {
            self.snapshot.school(id).map(|s| s.name.as_str())
        })
    }

    pub fn coach_name(&self, coach_id: Option<Id>) -> NameLookup<'a> {
        lookup(coach_id, Collection::Coach, |id| {
            self.snapshot.coach(id).map(|c| c.name.as_str())
        })
    }

    pub fn group_name(&self, group_id: Option<Id>) -> NameLookup<'a> {
        lookup(group_id, Collection::Group, |id| {
            self.snapshot.group(id).map(|g| g.name.as_str())
        })
    }

    pub fn athlete_school(&self, athlete: &Athlete) -> Option<&'a School> {
        athlete.school_id.and_then(|id| self.snapshot.school(id))
    }

    pub fn athlete_coach(&self, athlete: &Athlete) -> Option<&'a Coach> {
        athlete.coach_id.and_then(|id| self.snapshot.coach(id))
    }

    pub fn coach_school(&self, coach: &Coach) -> Option<&'a School> {
        coach.school_id.and_then(|id| self.snapshot.school(id))
    }

    pub fn group_coach(&self, group: &Group) -> Option<&'a Coach> {
        self.snapshot.coach(group.coach_id)
    }

    /// Group to coach to school
    pub fn group_school(&self, group: &Group) -> Option<&'a School> {
        self.group_coach(group)
            .and_then(|coach| self.coach_school(coach))
    }

    pub fn groups_for_athlete(&self, athlete_id: Id) -> Vec<&'a Group> {
        self.snapshot
            .groups()
            .iter()
            .filter(|group| group.has_member(athlete_id))
            .collect()
    }

    pub fn groups_for_coach(&self, coach_id: Id) -> Vec<&'a Group> {
        self.snapshot
            .groups()
            .iter()
            .filter(|group| group.coach_id == coach_id)
            .collect()
    }

    /// Members in roster order; ids that no longer resolve are skipped
    pub fn athletes_for_group(&self, group_id: Id) -> Vec<&'a Athlete> {
        let Some(group) = self.snapshot.group(group_id) else {
            return Vec::new();
        };
        group
            .athletes
            .iter()
            .filter_map(|id| self.snapshot.athlete(*id))
            .collect()
    }

    pub fn events_for_group(&self, group_id: Id) -> Vec<&'a Event> {
        self.snapshot
            .events()
            .iter()
            .filter(|event| event.group_id == group_id)
            .collect()
    }

    /// Same as `events_for_group`, ascending by date; same-day events keep insertion order
    pub fn events_for_group_by_date(&self, group_id: Id) -> Vec<&'a Event> {
        let mut events = self.events_for_group(group_id);
        events.sort_by_key(|event| event.date);
        events
    }

    pub fn school_coaches(&self, school_id: Id) -> Vec<&'a Coach> {
        self.snapshot
            .coaches()
            .iter()
            .filter(|coach| coach.school_id == Some(school_id))
            .collect()
    }

    /// Groups whose coach belongs to the school
    pub fn school_groups(&self, school_id: Id) -> Vec<&'a Group> {
        let coach_ids: HashSet<Id> = self
            .school_coaches(school_id)
            .into_iter()
            .map(|coach| coach.id)
            .collect();
        self.snapshot
            .groups()
            .iter()
            .filter(|group| coach_ids.contains(&group.coach_id))
            .collect()
    }

    /// Members of the school's groups, each once, in athlete-collection order
    pub fn school_athletes(&self, school_id: Id) -> Vec<&'a Athlete> {
        let member_ids: HashSet<Id> = self
            .school_groups(school_id)
            .into_iter()
            .flat_map(|group| group.athletes.iter().copied())
            .collect();
        self.snapshot
            .athletes()
            .iter()
            .filter(|athlete| member_ids.contains(&athlete.id))
            .collect()
    }

    /// Athletes whose own `school_id` names the school
    pub fn athletes_enrolled_at(&self, school_id: Id) -> Vec<&'a Athlete> {
        self.snapshot
            .athletes()
            .iter()
            .filter(|athlete| athlete.school_id == Some(school_id))
            .collect()
    }

    /// Current members of the event's group with their mark for this event.
    ///
    /// Athletes who joined after attendance was taken show as `Unmarked`.
    pub fn event_roster(&self, event_id: Id) -> Vec<RosterEntry<'a>> {
        let Some(event) = self.snapshot.event(event_id) else {
            return Vec::new();
        };
        self.athletes_for_group(event.group_id)
            .into_iter()
            .map(|athlete| RosterEntry {
                athlete,
                status: event.attendance_for(athlete.id).into(),
            })
            .collect()
    }
}

fn lookup<'a, F>(id: Option<Id>, collection: Collection, find: F) -> NameLookup<'a>
where
    F: FnOnce(Id) -> Option<&'a str>,
{
    match id {
        None => NameLookup::NotAssigned,
        Some(id) => find(id)
            .map(NameLookup::Found)
            .unwrap_or(NameLookup::Unknown(collection)),
    }
}
