use crate::logic::{RequiredFields, ValidationErrors};
use crate::model::{merge, Collection, Entity, Id, Record};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Id,
    pub title: String,
    pub group_id: Id,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Athlete id to present/absent; athletes never marked have no entry
    #[serde(default)]
    pub attendance: BTreeMap<Id, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: Option<String>,
    pub group_id: Option<Id>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub attendance: Option<BTreeMap<Id, bool>>,
}

impl Entity for Event {
    const COLLECTION: Collection = Collection::Event;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Record for Event {
    type Draft = EventDraft;

    fn from_draft(id: Id, draft: EventDraft) -> Result<Self, ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Event);
        let title = required.text("title", draft.title);
        let group_id = required.value("groupId", draft.group_id);
        let date = required.value("date", draft.date);
        let start_time = required.value("startTime", draft.start_time);
        let end_time = required.value("endTime", draft.end_time);
        let location = required.text("location", draft.location);

        match (title, group_id, date, start_time, end_time, location) {
            (
                Some(title),
                Some(group_id),
                Some(date),
                Some(start_time),
                Some(end_time),
                Some(location),
            ) => Ok(Event {
                id,
                title,
                group_id,
                date,
                start_time,
                end_time,
                location,
                description: draft.description.unwrap_or_default(),
                attendance: draft.attendance.unwrap_or_default(),
            }),
            _ => Err(required.into_errors()),
        }
    }

    fn apply_draft(&mut self, draft: EventDraft) {
        merge(&mut self.title, draft.title);
        merge(&mut self.group_id, draft.group_id);
        merge(&mut self.date, draft.date);
        merge(&mut self.start_time, draft.start_time);
        merge(&mut self.end_time, draft.end_time);
        merge(&mut self.location, draft.location);
        merge(&mut self.description, draft.description);
        merge(&mut self.attendance, draft.attendance);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Event);
        required.check_text("title", &self.title);
        required.check_text("location", &self.location);
        required.finish()
    }
}

impl Event {
    /// Events dated today still count as upcoming
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn attendance_for(&self, athlete_id: Id) -> Option<bool> {
        self.attendance.get(&athlete_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event::from_draft(
            1,
            EventDraft {
                title: Some("Practice".to_string()),
                group_id: Some(2),
                date: NaiveDate::from_ymd_opt(2024, 3, 15),
                start_time: NaiveTime::from_hms_opt(15, 30, 0),
                end_time: NaiveTime::from_hms_opt(17, 0, 0),
                location: Some("Main Gym".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_weekday() {
        assert_eq!(event().weekday(), Weekday::Fri);
    }

    #[test]
    fn test_is_upcoming_includes_today() {
        let event = event();
        assert!(event.is_upcoming(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert!(!event.is_upcoming(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
    }

    #[test]
    fn test_missing_schedule_fields() {
        let errors = Event::from_draft(
            1,
            EventDraft {
                title: Some("Meet".to_string()),
                group_id: Some(1),
                location: Some("Track".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["date", "endTime", "startTime"]
        );
    }

    #[test]
    fn test_attendance_serializes_with_string_keys() {
        let mut event = event();
        event.attendance.insert(4, true);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["attendance"]["4"], serde_json::json!(true));
        assert_eq!(json["groupId"], serde_json::json!(2));
    }
}
