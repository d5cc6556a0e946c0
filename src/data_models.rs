use serde::{Deserialize, Serialize};

use crate::error::{FormError, NameError};

/// Raw values of the three form inputs, exactly as typed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    #[serde(default, alias = "full_name")]
    pub full_name: String,
    #[serde(default, alias = "birth_year")]
    pub birth_year: String,
    #[serde(default, alias = "birth_place")]
    pub birth_place: String,
}

impl FormInput {
    pub fn new(
        full_name: impl Into<String>,
        birth_year: impl Into<String>,
        birth_place: impl Into<String>,
    ) -> FormInput {
        FormInput {
            full_name: full_name.into(),
            birth_year: birth_year.into(),
            birth_place: birth_place.into(),
        }
    }

    /// All three inputs are `required`: an empty value blocks submission.
    /// Whitespace counts as a value here; the name split catches that case.
    pub fn check_required(&self) -> Result<(), FormError> {
        if self.full_name.is_empty() {
            return Err(FormError::MissingField("fullName"));
        }
        if self.birth_year.is_empty() {
            return Err(FormError::MissingField("birthYear"));
        }
        if self.birth_place.is_empty() {
            return Err(FormError::MissingField("birthPlace"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    pub first_name: String,
    pub last_name: String,
    pub birth_year: String,
    pub birth_place: String,
}

impl PersonQuery {
    /// First whitespace token is the first name, the rest (single-space
    /// joined) is the last name.
    pub fn from_input(input: &FormInput) -> Result<PersonQuery, NameError> {
        let mut tokens = input.full_name.split_whitespace();
        let first_name = tokens.next().ok_or(NameError::Incomplete)?;
        let last_name = tokens.collect::<Vec<&str>>().join(" ");
        if last_name.is_empty() {
            return Err(NameError::Incomplete);
        }

        Ok(PersonQuery {
            first_name: first_name.to_string(),
            last_name,
            birth_year: input.birth_year.clone(),
            birth_place: input.birth_place.clone(),
        })
    }
}

/// Body of the `findPerson` POST.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FindPersonRequest {
    pub action: String,
    #[serde(rename = "findPerson")]
    pub find_person: FindPersonParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FindPersonParams {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub birth_location: String,
}

impl From<&PersonQuery> for FindPersonRequest {
    fn from(query: &PersonQuery) -> Self {
        FindPersonRequest {
            action: "findPerson".to_string(),
            find_person: FindPersonParams {
                first_name: query.first_name.clone(),
                last_name: query.last_name.clone(),
                birth_date: query.birth_year.clone(),
                birth_location: query.birth_place.clone(),
            },
        }
    }
}

/// A person record from the lookup endpoint. Only the name is read; any other
/// fields in the entry are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonMatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl PersonMatch {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> PersonMatch {
        PersonMatch {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// Reads one `persons` entry of any shape. A string name is taken as-is,
    /// any other JSON value as its text; a missing one (or a non-object entry)
    /// stays unset.
    pub fn from_entry(entry: &serde_json::Value) -> PersonMatch {
        let field = |key: &str| {
            entry.get(key).map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        };
        PersonMatch {
            first_name: field("firstName"),
            last_name: field("lastName"),
        }
    }

    /// Missing name parts render as `undefined`, as the widget always has.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or("undefined"),
            self.last_name.as_deref().unwrap_or("undefined")
        )
    }
}

pub const PLACEHOLDER_RELATION: &str = "5th cousin, 6x removed";
pub const PLACEHOLDER_FAMOUS_PERSON: &str = "Abraham Lincoln";
pub const PLACEHOLDER_SHARED_ANCESTOR: &str = "Shared ancestor: John Doe (b. 1800)";
pub const PLACEHOLDER_CONFIDENCE: &str = "Medium";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelativeResult {
    pub relation: String,
    pub famous_person: String,
    pub path: Vec<String>,
    pub confidence: String,
}

impl RelativeResult {
    /// PLACEHOLDER: no relationship is computed. Everything except the matched
    /// person's name is a fixed value until a real path search exists.
    pub fn placeholder(matched: &PersonMatch) -> RelativeResult {
        RelativeResult {
            relation: PLACEHOLDER_RELATION.to_string(),
            famous_person: PLACEHOLDER_FAMOUS_PERSON.to_string(),
            path: vec![
                "You".to_string(),
                format!("Matched person: {}", matched.display_name()),
                PLACEHOLDER_SHARED_ANCESTOR.to_string(),
                PLACEHOLDER_FAMOUS_PERSON.to_string(),
            ],
            confidence: PLACEHOLDER_CONFIDENCE.to_string(),
        }
    }
}
