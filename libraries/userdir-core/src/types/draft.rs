/// Draft and patch shapes used when creating or editing users
use crate::age::parse_birth_date;
use crate::error::{CoreError, Result};
use crate::types::{Photo, User};
use serde::Serialize;

/// In-progress form data for a new user.
///
/// Serializes to the JSON carried by the multipart `user` part; the photo
/// travels separately and is never part of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Full name
    pub name: String,
    /// Nickname
    pub nickname: String,
    /// Birth date (ISO `YYYY-MM-DD`)
    pub birth_date: String,
    /// Country
    pub country: String,
    /// Province
    pub province: String,
    /// Neighborhood
    pub neighborhood: String,
    /// Email address
    pub email: String,
    /// Captured photo
    #[serde(skip)]
    pub photo: Option<Photo>,
}

impl UserDraft {
    /// Start an edit draft from an existing record. No photo is attached.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            nickname: user.nickname.clone(),
            birth_date: user.birth_date.clone(),
            country: user.country.clone(),
            province: user.province.clone(),
            neighborhood: user.neighborhood.clone(),
            email: user.email.clone(),
            photo: None,
        }
    }

    /// Attach a captured photo
    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Check the draft before submission.
    ///
    /// Every profile field is required, the birth date must be an ISO date
    /// and a valid photo must be attached.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("nickname", &self.nickname),
            ("birthDate", &self.birth_date),
            ("email", &self.email),
            ("country", &self.country),
            ("province", &self.province),
            ("neighborhood", &self.neighborhood),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(field));
            }
        }

        parse_birth_date(&self.birth_date)?;

        match &self.photo {
            Some(photo) => photo.validate(),
            None => Err(CoreError::MissingField("photo")),
        }
    }

    /// JSON for the multipart `user` part
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Partial changes to an existing user.
///
/// Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nickname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Birth date (ISO `YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Province
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// Neighborhood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Captured photo
    #[serde(skip)]
    pub photo: Option<Photo>,
}

impl UserPatch {
    /// Keep only what an edited draft changed relative to `original`.
    pub fn from_changes(original: &User, draft: &UserDraft) -> Self {
        fn changed(before: &str, after: &str) -> Option<String> {
            (before != after).then(|| after.to_string())
        }

        Self {
            name: changed(&original.name, &draft.name),
            nickname: changed(&original.nickname, &draft.nickname),
            birth_date: changed(&original.birth_date, &draft.birth_date),
            country: changed(&original.country, &draft.country),
            province: changed(&original.province, &draft.province),
            neighborhood: changed(&original.neighborhood, &draft.neighborhood),
            email: changed(&original.email, &draft.email),
            photo: draft.photo.clone(),
        }
    }

    /// Whether the patch carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nickname.is_none()
            && self.birth_date.is_none()
            && self.country.is_none()
            && self.province.is_none()
            && self.neighborhood.is_none()
            && self.email.is_none()
            && self.photo.is_none()
    }

    /// Check the fields that are present.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("nickname", &self.nickname),
            ("birthDate", &self.birth_date),
            ("email", &self.email),
            ("country", &self.country),
            ("province", &self.province),
            ("neighborhood", &self.neighborhood),
        ];
        for (field, value) in fields {
            if matches!(value, Some(v) if v.trim().is_empty()) {
                return Err(CoreError::MissingField(field));
            }
        }

        if let Some(birth_date) = &self.birth_date {
            parse_birth_date(birth_date)?;
        }
        if let Some(photo) = &self.photo {
            photo.validate()?;
        }
        Ok(())
    }

    /// JSON body (or multipart `user` part) for the update request
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn photo() -> Photo {
        Photo::new(vec![0xFF, 0xD8], "webcam-photo.jpg", "image/jpeg")
    }

    fn complete_draft() -> UserDraft {
        UserDraft {
            name: "Ana".into(),
            nickname: "aninha".into(),
            birth_date: "2000-06-15".into(),
            country: "Angola".into(),
            province: "Luanda".into(),
            neighborhood: "Maianga".into(),
            email: "ana@example.com".into(),
            photo: Some(photo()),
        }
    }

    fn stored_user() -> User {
        User {
            id: Some(UserId::new(1)),
            photo_url: Some("/uploads/1_ana.jpg".into()),
            ..User::new("Ana", "ana@example.com", "2000-06-15")
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn test_missing_name_reported_first() {
        let draft = UserDraft {
            name: "  ".into(),
            email: String::new(),
            ..complete_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(CoreError::MissingField("name"))
        ));
    }

    #[test]
    fn test_missing_photo() {
        let draft = UserDraft {
            photo: None,
            ..complete_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(CoreError::MissingField("photo"))
        ));
    }

    #[test]
    fn test_bad_birth_date() {
        let draft = UserDraft {
            birth_date: "15/06/2000".into(),
            ..complete_draft()
        };
        assert!(matches!(draft.validate(), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn test_metadata_json_excludes_photo() {
        let json = complete_draft().metadata_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["birthDate"], "2000-06-15");
        assert_eq!(value["name"], "Ana");
        assert!(value.get("photo").is_none());
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_patch_from_unchanged_draft_is_empty() {
        let user = stored_user();
        let draft = UserDraft::from_user(&user);
        let patch = UserPatch::from_changes(&user, &draft);

        assert!(patch.is_empty());
        assert_eq!(patch.metadata_json().unwrap(), "{}");
    }

    #[test]
    fn test_patch_keeps_only_changed_fields() {
        let user = stored_user();
        let mut draft = UserDraft::from_user(&user);
        draft.email = "ana@new.example.com".into();
        draft.country = "Portugal".into();

        let patch = UserPatch::from_changes(&user, &draft);
        let value: serde_json::Value =
            serde_json::from_str(&patch.metadata_json().unwrap()).unwrap();

        assert_eq!(value.as_object().unwrap().len(), 2);
        assert_eq!(value["email"], "ana@new.example.com");
        assert_eq!(value["country"], "Portugal");
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_with_new_photo_only() {
        let user = stored_user();
        let draft = UserDraft::from_user(&user).with_photo(photo());
        let patch = UserPatch::from_changes(&user, &draft);

        assert!(!patch.is_empty());
        assert_eq!(patch.metadata_json().unwrap(), "{}");
    }

    #[test]
    fn test_patch_validation() {
        let patch = UserPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(CoreError::MissingField("name"))));

        let patch = UserPatch {
            birth_date: Some("2000-13-40".into()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(CoreError::InvalidDate(_))));

        let patch = UserPatch {
            email: Some("ana@example.com".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
