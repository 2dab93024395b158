use crate::logic::{RequiredFields, ValidationErrors};
use crate::model::{double_option, merge, Collection, Entity, Id, ImageBlob, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub school_id: Option<Id>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(skip)]
    pub profile_image: Option<ImageBlob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoachDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    /// `Some(None)` clears the school back to "Not Assigned"
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Option<Id>>,
    pub bio: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    #[serde(skip)]
    pub profile_image: Option<ImageBlob>,
}

impl Entity for Coach {
    const COLLECTION: Collection = Collection::Coach;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Record for Coach {
    type Draft = CoachDraft;

    fn from_draft(id: Id, draft: CoachDraft) -> Result<Self, ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Coach);
        let name = required.text("name", draft.name);
        let email = required.text("email", draft.email);
        let phone = required.text("phone", draft.phone);
        let specialty = required.text("specialty", draft.specialty);

        match (name, email, phone, specialty) {
            (Some(name), Some(email), Some(phone), Some(specialty)) => Ok(Coach {
                id,
                name,
                email,
                phone,
                specialty,
                school_id: draft.school_id.flatten(),
                bio: draft.bio.unwrap_or_default(),
                certifications: draft.certifications.unwrap_or_default(),
                achievements: draft.achievements.unwrap_or_default(),
                profile_image: draft.profile_image,
            }),
            _ => Err(required.into_errors()),
        }
    }

    fn apply_draft(&mut self, draft: CoachDraft) {
        merge(&mut self.name, draft.name);
        merge(&mut self.email, draft.email);
        merge(&mut self.phone, draft.phone);
        merge(&mut self.specialty, draft.specialty);
        merge(&mut self.school_id, draft.school_id);
        merge(&mut self.bio, draft.bio);
        merge(&mut self.certifications, draft.certifications);
        merge(&mut self.achievements, draft.achievements);
        if draft.profile_image.is_some() {
            self.profile_image = draft.profile_image;
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut required = RequiredFields::new(Collection::Coach);
        required.check_text("name", &self.name);
        required.check_text("email", &self.email);
        required.check_text("phone", &self.phone);
        required.check_text("specialty", &self.specialty);
        required.finish()
    }
}
