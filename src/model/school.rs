use crate::logic::{RequiredFields, ValidationErrors};
use crate::model::{merge, Collection, Entity, Id, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

/// Partial school used by both create and update forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolDraft {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Entity for School {
    const COLLECTION: Collection = Collection::School;

    fn id(&self) -> Id {
        self.id
    }

    fn set_id(&mut self, id: Id) {
        self.id = id;
    }
}

impl Record for School {
    type Draft = SchoolDraft;

    fn from_draft(id: Id, draft: SchoolDraft) -> Result<Self, ValidationErrors> {
        // Every school field is required
        let mut required = RequiredFields::new(Collection::School);
        let name = required.text("name", draft.name);
        let address = required.text("address", draft.address);
        let city = required.text("city", draft.city);
        let state = required.text("state", draft.state);
        let zip = required.text("zip", draft.zip);
        let phone = required.text("phone", draft.phone);
        let email = required.text("email", draft.email);

        match (name, address, city, state, zip, phone, email) {
            (
                Some(name),
                Some(address),
                Some(city),
                Some(state),
                Some(zip),
                Some(phone),
                Some(email),
            ) => Ok(School {
                id,
                name,
                address,
                city,
                state,
                zip,
                phone,
                email,
            }),
            _ => Err(required.into_errors()),
        }
    }

    fn apply_draft(&mut self, draft: SchoolDraft) {
        merge(&mut self.name, draft.name);
        merge(&mut self.address, draft.address);
        merge(&mut self.city, draft.city);
        merge(&mut self.state, draft.state);
        merge(&mut self.zip, draft.zip);
        merge(&mut self.phone, draft.phone);
        merge(&mut self.email, draft.email);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut required = RequiredFields::new(Collection::School);
        required.check_text("name", &self.name);
        required.check_text("address", &self.address);
        required.check_text("city", &self.city);
        required.check_text("state", &self.state);
        required.check_text("zip", &self.zip);
        required.check_text("phone", &self.phone);
        required.check_text("email", &self.email);
        required.finish()
    }
}

impl School {
    /// Single-line postal address as shown on the school card
    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SchoolDraft {
        SchoolDraft {
            name: Some("Lincoln High".to_string()),
            address: Some("12 Elm St".to_string()),
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            zip: Some("62701".to_string()),
            phone: Some("555-0100".to_string()),
            email: Some("office@lincoln.edu".to_string()),
        }
    }

    #[test]
    fn test_from_draft_requires_every_field() {
        let mut partial = draft();
        partial.zip = None;
        partial.phone = Some(String::new());

        let errors = School::from_draft(1, partial).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["phone", "zip"]);
    }

    #[test]
    fn test_full_address() {
        let school = School::from_draft(1, draft()).unwrap();
        assert_eq!(school.full_address(), "12 Elm St, Springfield, IL 62701");
    }
}
