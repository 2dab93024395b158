use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::logic::Resolver;
use crate::model::{Athlete, Event, Id};
use crate::store::StoreSnapshot;

/// Weekday labels in calendar-widget order (Sunday first)
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub id: Id,
    pub name: String,
    pub count: usize,
}

/// Number of athletes marked present
pub fn attendance_count(event: &Event) -> usize {
    event.attendance.values().filter(|present| **present).count()
}

/// Percentage of the roster present, rounded to the nearest integer.
///
/// An empty roster yields 0. Marks left over from athletes who have since
/// left the group can push the raw ratio past 1, so the result is capped at 100.
pub fn attendance_rate(event: &Event, roster_size: usize) -> u8 {
    percentage(attendance_count(event), roster_size)
}

fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rate = (part as f64 / whole as f64 * 100.0).round();
    rate.min(100.0) as u8
}

/// Athletes per sport; names are compared exactly, so "Soccer" and "soccer" differ
pub fn sport_distribution<'a, I>(athletes: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Athlete>,
{
    athletes
        .into_iter()
        .map(|athlete| athlete.sport.clone())
        .counts()
        .into_iter()
        .collect()
}

/// Events per weekday label, ordered `Sun`..`Sat`, every day present even when zero
pub fn events_by_weekday<'a, I>(events: I) -> Vec<WeekdayCount>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut counts = [0usize; 7];
    for event in events {
        counts[event.date.weekday().num_days_from_sunday() as usize] += 1;
    }
    WEEKDAY_LABELS
        .into_iter()
        .zip(counts)
        .map(|(label, count)| WeekdayCount { label, count })
        .collect()
}

/// Athletes whose own school is each school, in school order
pub fn athletes_per_school(snapshot: &StoreSnapshot) -> Vec<NamedCount> {
    let resolver = Resolver::new(snapshot);
    snapshot
        .schools()
        .iter()
        .map(|school| NamedCount {
            id: school.id,
            name: school.name.clone(),
            count: resolver.athletes_enrolled_at(school.id).len(),
        })
        .collect()
}

pub fn events_per_group(snapshot: &StoreSnapshot) -> Vec<NamedCount> {
    let resolver = Resolver::new(snapshot);
    snapshot
        .groups()
        .iter()
        .map(|group| NamedCount {
            id: group.id,
            name: group.name.clone(),
            count: resolver.events_for_group(group.id).len(),
        })
        .collect()
}

/// Roster size is the owning group's resolvable members right now
pub fn roster_size(snapshot: &StoreSnapshot, event: &Event) -> usize {
    Resolver::new(snapshot).athletes_for_group(event.group_id).len()
}

pub fn event_attendance_rate(snapshot: &StoreSnapshot, event: &Event) -> u8 {
    attendance_rate(event, roster_size(snapshot, event))
}

/// Mean of the group's per-event rates; 0 for a group without events
pub fn group_attendance_rate(snapshot: &StoreSnapshot, group_id: Id) -> u8 {
    let resolver = Resolver::new(snapshot);
    let roster = resolver.athletes_for_group(group_id).len();
    let events = resolver.events_for_group(group_id);
    if events.is_empty() || roster == 0 {
        return 0;
    }
    let total: f64 = events
        .iter()
        .map(|event| (attendance_count(event) as f64 / roster as f64 * 100.0).min(100.0))
        .sum();
    (total / events.len() as f64).round() as u8
}

/// Events on or after `today`, earliest first
pub fn upcoming_events<'a, I>(events: I, today: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| event.is_upcoming(today))
        .sorted_by_key(|event| event.date)
        .collect()
}

/// Headline numbers for the dashboard landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub schools: usize,
    pub coaches: usize,
    pub athletes: usize,
    pub groups: usize,
    pub events: usize,
    pub upcoming_events: usize,
    /// Present marks over roster seats across every event with a live group
    pub attendance_rate: u8,
}

impl DashboardSummary {
    pub fn compute(snapshot: &StoreSnapshot, today: NaiveDate) -> Self {
        let (present, seats) = snapshot
            .events()
            .iter()
            .map(|event| (attendance_count(event), roster_size(snapshot, event)))
            .filter(|(_, seats)| *seats > 0)
            .fold((0, 0), |(p, s), (present, seats)| (p + present, s + seats));

        Self {
            schools: snapshot.schools().len(),
            coaches: snapshot.coaches().len(),
            athletes: snapshot.athletes().len(),
            groups: snapshot.groups().len(),
            events: snapshot.events().len(),
            upcoming_events: upcoming_events(snapshot.events(), today).len(),
            attendance_rate: percentage(present, seats),
        }
    }
}
