use crate::logic::{RequiredFields, ValidationErrors};
use crate::model::{merge, Collection, Entity, Id, Record};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A team: a roster of athletes under one coach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Id,
    pub name: String,
    pub coach_id: Id,
    /// Member athlete ids; a set stored as a list, in join order
    #[serde(default)]
    pub athletes: Vec<Id>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupDraft {
    pub name: Option<String>,
    pub coach_id: Option<Id>,
    pub athletes: Option<Vec<Id>>,
    pub description: Option<String>,
}

impl Entity for Group {
    const COLLECTION: Collection = Collection::Group;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Record for Group {
    type Draft = GroupDraft;

    fn from_draft(id: Id, draft: GroupDraft) -> Result<Self, ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Group);
        let name = required.text("name", draft.name);
        let coach_id = required.value("coachId", draft.coach_id);

        match (name, coach_id) {
            (Some(name), Some(coach_id)) => Ok(Group {
                id,
                name,
                coach_id,
                athletes: dedup_members(draft.athletes.unwrap_or_default()),
                description: draft.description.unwrap_or_default(),
            }),
            _ => Err(required.into_errors()),
        }
    }

    fn apply_draft(&mut self, draft: GroupDraft) {
        merge(&mut self.name, draft.name);
        merge(&mut self.coach_id, draft.coach_id);
        merge(&mut self.athletes, draft.athletes.map(dedup_members));
        merge(&mut self.description, draft.description);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Group);
        required.check_text("name", &self.name);
        required.finish()
    }
}

impl Group {
    pub fn has_member(&self, athlete_id: Id) -> bool {
        self.athletes.contains(&athlete_id)
    }

    /// Returns false when the athlete was already a member
    pub fn add_member(&mut self, athlete_id: Id) -> bool {
        if self.has_member(athlete_id) {
            return false;
        }
        self.athletes.push(athlete_id);
        true
    }

    /// Returns false when the athlete was not a member
    pub fn remove_member(&mut self, athlete_id: Id) -> bool {
        let before = self.athletes.len();
        self.athletes.retain(|id| *id != athlete_id);
        self.athletes.len() != before
    }

    pub fn roster_size(&self) -> usize {
        self.athletes.len()
    }
}

fn dedup_members(ids: Vec<Id>) -> Vec<Id> {
    ids.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::from_draft(
            1,
            GroupDraft {
                name: Some("Varsity".to_string()),
                coach_id: Some(2),
                athletes: Some(vec![4, 5, 4]),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_draft_members_deduplicated() {
        assert_eq!(group().athletes, vec![4, 5]);
    }

    #[test]
    fn test_add_member_twice_keeps_one() {
        let mut group = group();
        assert!(group.add_member(9));
        assert!(!group.add_member(9));
        assert_eq!(group.athletes.iter().filter(|id| **id == 9).count(), 1);
    }

    #[test]
    fn test_remove_member() {
        let mut group = group();
        assert!(group.remove_member(4));
        assert!(!group.remove_member(4));
        assert_eq!(group.athletes, vec![5]);
    }

    #[test]
    fn test_coach_required() {
        let errors = Group::from_draft(
            1,
            GroupDraft {
                name: Some("JV".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(errors.contains("coachId"));
    }
}
