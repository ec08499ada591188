/// User domain type
use crate::age::{age_on, parse_birth_date};
use crate::types::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A user record as exchanged with the directory service.
///
/// `id` is absent only before the backend has persisted the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Full name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Nickname
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nickname: String,

    /// Birth date (ISO `YYYY-MM-DD`)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub birth_date: String,

    /// Country
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,

    /// Province
    #[serde(default, deserialize_with = "null_as_empty")]
    pub province: String,

    /// Neighborhood
    #[serde(default, deserialize_with = "null_as_empty")]
    pub neighborhood: String,

    /// Email address
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    /// Server-relative path of the stored photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    /// Create an unpersisted user with the given name, email and birth date
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            birth_date: birth_date.into(),
            ..Default::default()
        }
    }

    /// Parsed birth date, if well-formed
    pub fn birth_date(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.birth_date).ok()
    }

    /// Age in whole years on `today`, or `None` when the birth date is unusable
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date().map(|birth| age_on(birth, today))
    }

    /// All field values joined with single spaces, in wire order.
    ///
    /// This is the haystack for free-text search.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(9);
        if let Some(id) = self.id {
            parts.push(id.to_string());
        }
        parts.push(self.name.clone());
        parts.push(self.nickname.clone());
        parts.push(self.birth_date.clone());
        parts.push(self.country.clone());
        parts.push(self.province.clone());
        parts.push(self.neighborhood.clone());
        parts.push(self.email.clone());
        if let Some(url) = &self.photo_url {
            parts.push(url.clone());
        }
        parts.join(" ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
