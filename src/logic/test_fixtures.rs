//! Small hand-built snapshot shared by the logic tests.

use crate::model::*;
use crate::store::StoreSnapshot;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn school(id: Id, name: &str) -> School {
    School {
        id,
        name: name.to_string(),
        address: format!("{} Campus Way", id),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        phone: "555-0100".to_string(),
        email: format!("office{}@schools.org", id),
    }
}

pub fn coach(id: Id, name: &str, school_id: Option<Id>) -> Coach {
    Coach {
        id,
        name: name.to_string(),
        email: format!("coach{}@club.org", id),
        phone: "555-0101".to_string(),
        specialty: "General".to_string(),
        school_id,
        bio: String::new(),
        certifications: Vec::new(),
        achievements: Vec::new(),
        profile_image: None,
    }
}

pub fn athlete(
    id: Id,
    name: &str,
    sport: &str,
    school_id: Option<Id>,
    coach_id: Option<Id>,
) -> Athlete {
    Athlete {
        id,
        name: name.to_string(),
        email: format!("athlete{}@club.org", id),
        phone: String::new(),
        sport: sport.to_string(),
        school_id,
        coach_id,
        bio: String::new(),
        profile_image: None,
    }
}

pub fn group(id: Id, name: &str, coach_id: Id, athletes: Vec<Id>) -> Group {
    Group {
        id,
        name: name.to_string(),
        coach_id,
        athletes,
        description: String::new(),
    }
}

pub fn event(id: Id, group_id: Id, date: (i32, u32, u32), attendance: &[(Id, bool)]) -> Event {
    Event {
        id,
        title: format!("Session {}", id),
        group_id,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        start_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        location: "Field A".to_string(),
        description: String::new(),
        attendance: attendance.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

/// Two schools, three coaches, four athletes, three groups, five events.
///
/// Group 2 lists a missing athlete (77) and event 5 points at a missing group (99).
pub fn snapshot_fixture() -> StoreSnapshot {
    StoreSnapshot::new(
        Arc::new(vec![school(1, "Lincoln High"), school(2, "Roosevelt Prep")]),
        Arc::new(vec![
            coach(1, "Jordan Blake", Some(1)),
            coach(2, "Sam Rivera", Some(1)),
            coach(3, "Morgan Lee", None),
        ]),
        Arc::new(vec![
            athlete(1, "Alex Kim", "Soccer", Some(1), Some(1)),
            athlete(2, "Bailey Cruz", "soccer", Some(1), Some(1)),
            athlete(3, "Casey Park", "Basketball", Some(2), Some(2)),
            athlete(4, "Drew Fox", "Basketball", None, Some(3)),
        ]),
        Arc::new(vec![
            group(1, "Varsity Soccer", 1, vec![1, 2, 3]),
            group(2, "Hoops", 2, vec![3, 77]),
            group(3, "Rookies", 3, vec![4]),
        ]),
        Arc::new(vec![
            event(1, 1, (2024, 3, 15), &[(1, true), (2, false)]),
            event(2, 1, (2024, 3, 11), &[(1, true), (2, true), (3, true)]),
            event(3, 1, (2024, 3, 15), &[]),
            event(4, 2, (2024, 3, 12), &[(3, true)]),
            event(5, 99, (2024, 3, 17), &[]),
        ]),
    )
}
