use crate::logic::{RequiredFields, ValidationErrors};
use crate::model::{double_option, merge, Collection, Entity, Id, ImageBlob, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub sport: String,
    pub school_id: Option<Id>,
    pub coach_id: Option<Id>,
    #[serde(default)]
    pub bio: String,
    #[serde(skip)]
    pub profile_image: Option<ImageBlob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AthleteDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sport: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Option<Id>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<Option<Id>>,
    pub bio: Option<String>,
    #[serde(skip)]
    pub profile_image: Option<ImageBlob>,
}

impl AthleteDraft {
    /// The three fields the athlete form cannot be submitted without
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        sport: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            sport: Some(sport.into()),
            ..Default::default()
        }
    }
}

impl Entity for Athlete {
    const COLLECTION: Collection = Collection::Athlete;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Record for Athlete {
    type Draft = AthleteDraft;

    fn from_draft(id: Id, draft: AthleteDraft) -> Result<Self, ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Athlete);
        let name = required.text("name", draft.name);
        let email = required.text("email", draft.email);
        let sport = required.text("sport", draft.sport);

        match (name, email, sport) {
            (Some(name), Some(email), Some(sport)) => Ok(Athlete {
                id,
                name,
                email,
                phone: draft.phone.unwrap_or_default(),
                sport,
                school_id: draft.school_id.flatten(),
                coach_id: draft.coach_id.flatten(),
                bio: draft.bio.unwrap_or_default(),
                profile_image: draft.profile_image,
            }),
            _ => Err(required.into_errors()),
        }
    }

    fn apply_draft(&mut self, draft: AthleteDraft) {
        merge(&mut self.name, draft.name);
        merge(&mut self.email, draft.email);
        merge(&mut self.phone, draft.phone);
        merge(&mut self.sport, draft.sport);
        merge(&mut self.school_id, draft.school_id);
        merge(&mut self.coach_id, draft.coach_id);
        merge(&mut self.bio, draft.bio);
        if draft.profile_image.is_some() {
            self.profile_image = draft.profile_image;
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Athlete);
        required.check_text("name", &self.name);
        required.check_text("email", &self.email);
        required.check_text("sport", &self.sport);
        required.finish()
    }
}
