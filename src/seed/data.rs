use crate::model::{Athlete, Coach, Event, Group, Id, School};
use crate::store::{CollectionStore, Store};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use log::{debug, info};
use std::collections::BTreeMap;

fn school(id: Id, name: &str, address: &str, city: &str, zip: &str, phone: &str) -> School {
    let domain = name.to_lowercase().replace(' ', "");
    School {
        id,
        name: name.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        state: "CA".to_string(),
        zip: zip.to_string(),
        phone: phone.to_string(),
        email: format!("office@{}.edu", domain),
    }
}

fn coach(
    id: Id,
    name: &str,
    specialty: &str,
    school_id: Option<Id>,
    certifications: &[&str],
) -> Coach {
    let handle = name.to_lowercase().replace(' ', ".");
    Coach {
        id,
        name: name.to_string(),
        email: format!("{}@sportsorg.com", handle),
        phone: format!("(555) 010-{:04}", 1000 + id),
        specialty: specialty.to_string(),
        school_id,
        bio: format!("{} coach.", specialty),
        certifications: certifications.iter().map(|c| c.to_string()).collect(),
        achievements: Vec::new(),
        profile_image: None,
    }
}

fn athlete(
    id: Id,
    name: &str,
    sport: &str,
    school_id: Option<Id>,
    coach_id: Option<Id>,
) -> Athlete {
    let handle = name.to_lowercase().replace(' ', ".");
    Athlete {
        id,
        name: name.to_string(),
        email: format!("{}@students.sportsorg.com", handle),
        phone: format!("(555) 020-{:04}", 2000 + id),
        sport: sport.to_string(),
        school_id,
        coach_id,
        bio: String::new(),
        profile_image: None,
    }
}

fn group(id: Id, name: &str, coach_id: Id, athletes: &[Id], description: &str) -> Group {
    Group {
        id,
        name: name.to_string(),
        coach_id,
        athletes: athletes.to_vec(),
        description: description.to_string(),
    }
}

fn clock(hour: i64, minute: i64) -> NaiveTime {
    NaiveTime::default() + Duration::hours(hour) + Duration::minutes(minute)
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: Id,
    title: &str,
    group_id: Id,
    date: NaiveDate,
    start: (i64, i64),
    end: (i64, i64),
    location: &str,
    attendance: &[(Id, bool)],
) -> Event {
    Event {
        id,
        title: title.to_string(),
        group_id,
        date,
        start_time: clock(start.0, start.1),
        end_time: clock(end.0, end.1),
        location: location.to_string(),
        description: String::new(),
        attendance: attendance.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

pub fn seed_schools() -> Vec<School> {
    vec![
        school(1, "Westfield High", "100 Main St", "Springfield", "90001", "(555) 100-2000"),
        school(2, "Riverside Academy", "42 River Rd", "Riverside", "92501", "(555) 100-3000"),
        school(3, "Oak Valley Prep", "7 Oak Ln", "Oakland", "94601", "(555) 100-4000"),
    ]
}

pub fn seed_coaches() -> Vec<Coach> {
    vec![
        coach(1, "Maria Santos", "Soccer", Some(1), &["USSF C License"]),
        coach(2, "James Carter", "Basketball", Some(2), &["NFHS Level 2"]),
        coach(3, "Priya Natarajan", "Track & Field", Some(1), &["USATF Level 1", "CPR"]),
        coach(4, "Tom Becker", "Swimming", None, &["ASCA Level 3"]),
    ]
}

pub fn seed_athletes() -> Vec<Athlete> {
    vec![
        athlete(1, "Alex Lee", "Soccer", Some(1), Some(1)),
        athlete(2, "Jamie Chen", "Soccer", Some(1), Some(1)),
        athlete(3, "Riley Ortiz", "Soccer", Some(3), Some(1)),
        athlete(4, "Jordan Brooks", "Basketball", Some(2), Some(2)),
        athlete(5, "Taylor Nguyen", "Basketball", Some(2), Some(2)),
        athlete(6, "Morgan Hayes", "Track & Field", Some(1), Some(3)),
        athlete(7, "Casey Patel", "Track & Field", None, Some(3)),
        athlete(8, "Avery Kim", "Swimming", Some(3), None),
    ]
}

pub fn seed_groups() -> Vec<Group> {
    vec![
        group(1, "Varsity Soccer", 1, &[1, 2, 3], "First team squad"),
        group(2, "JV Basketball", 2, &[4, 5], "Junior varsity"),
        group(3, "Sprint Squad", 3, &[6, 7, 1], "100m and 200m specialists"),
    ]
}

/// Two past events with attendance taken, one with a partial sheet, and two
/// upcoming ones relative to `anchor`
pub fn seed_events(anchor: NaiveDate) -> Vec<Event> {
    let day = |offset: i64| anchor + Duration::days(offset);
    vec![
        event(
            1,
            "Soccer Practice",
            1,
            day(-6),
            (16, 0),
            (17, 30),
            "Westfield Field",
            &[(1, true), (2, true), (3, false)],
        ),
        event(
            2,
            "Basketball Scrimmage",
            2,
            day(-3),
            (15, 30),
            (17, 0),
            "Riverside Gym",
            &[(4, true)],
        ),
        event(
            3,
            "Sprint Drills",
            3,
            day(-1),
            (7, 0),
            (8, 0),
            "Westfield Track",
            &[(6, true), (7, false)],
        ),
        event(
            4,
            "Soccer Match vs Central",
            1,
            day(2),
            (18, 0),
            (20, 0),
            "Central Stadium",
            &[],
        ),
        event(
            5,
            "Conditioning Session",
            3,
            day(5),
            (7, 0),
            (8, 30),
            "Westfield Track",
            &[],
        ),
    ]
}

/// Populate every collection with the mock fixtures, once per store.
/// Later calls return false and leave the store untouched, and so does the
/// first call when any collection already holds rows.
pub fn load_seed_data<S: Store>(store: &S) -> bool {
    load_seed_data_at(store, Local::now().date_naive())
}

/// Same as `load_seed_data` with event dates laid out around `anchor`
pub fn load_seed_data_at<S: Store>(store: &S, anchor: NaiveDate) -> bool {
    if !store.begin_seed() {
        debug!("seed data already loaded, skipping");
        return false;
    }
    if !store.snapshot().is_empty() {
        info!("store already holds rows, skipping seed data");
        return false;
    }

    let schools = seed_schools();
    let coaches = seed_coaches();
    let athletes = seed_athletes();
    let groups = seed_groups();
    let events = seed_events(anchor);

    info!(
        "seeding {} schools, {} coaches, {} athletes, {} groups, {} events",
        schools.len(),
        coaches.len(),
        athletes.len(),
        groups.len(),
        events.len()
    );

    CollectionStore::<School>::replace_all(store, schools);
    CollectionStore::<Coach>::replace_all(store, coaches);
    CollectionStore::<Athlete>::replace_all(store, athletes);
    CollectionStore::<Group>::replace_all(store, groups);
    CollectionStore::<Event>::replace_all(store, events);

    true
}
