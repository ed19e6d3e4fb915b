//! Course application model.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Message returned when a submission lacks a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, email, consent";

/// A stored course application, as returned to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub goals: String,
    pub platforms: Vec<String>,
    pub timezone: String,
    pub preferred_times: Vec<String>,
    pub consent: bool,
    /// Store-assigned creation timestamp (`YYYY-MM-DD HH:MM:SS`, UTC)
    pub created_at: String,
}

/// Request body for `POST /api/apply`.
///
/// Every field is optional at the wire level so that missing or `null`
/// fields are reported by [`ApplyRequest::validate`] rather than by the
/// JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub preferred_times: Option<Vec<String>>,
    #[serde(default)]
    pub consent: Option<bool>,
}

/// A submission that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub goals: String,
    pub platforms: Vec<String>,
    pub timezone: String,
    pub preferred_times: Vec<String>,
}

impl ApplyRequest {
    /// Check required fields and fill optional ones with their defaults.
    ///
    /// Consent is implied by a successful result, so it is not carried on
    /// [`NewApplication`].
    pub fn validate(self) -> Result<NewApplication, AppError> {
        let name = required(self.name);
        let email = required(self.email);
        let consent = self.consent.unwrap_or(false);

        let (Some(name), Some(email), true) = (name, email, consent) else {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        };

        Ok(NewApplication {
            name,
            email,
            phone: self.phone.unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
            goals: self.goals.unwrap_or_default(),
            platforms: self.platforms.unwrap_or_default(),
            timezone: self.timezone.unwrap_or_default(),
            preferred_times: self.preferred_times.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> ApplyRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_fills_defaults() {
        let app = request(json!({
            "name": "Ada",
            "email": "a@x.com",
            "consent": true,
            "platforms": ["Meta", "Google"]
        }))
        .validate()
        .unwrap();

        assert_eq!(app.name, "Ada");
        assert_eq!(app.platforms, vec!["Meta", "Google"]);
        assert!(app.preferred_times.is_empty());
        assert_eq!(app.phone, "");
        assert_eq!(app.timezone, "");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let cases = [
            json!({ "email": "a@x.com", "consent": true }),
            json!({ "name": "", "email": "a@x.com", "consent": true }),
            json!({ "name": "   ", "email": "a@x.com", "consent": true }),
            json!({ "name": "Ada", "consent": true }),
            json!({ "name": "Ada", "email": null, "consent": true }),
            json!({ "name": "Ada", "email": "a@x.com" }),
            json!({ "name": "Ada", "email": "a@x.com", "consent": false }),
        ];

        for case in cases {
            let err = request(case.clone()).validate().unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref msg) if msg == MISSING_FIELDS_MESSAGE),
                "expected validation error for {}",
                case
            );
        }
    }

    #[test]
    fn test_null_lists_default_to_empty() {
        let app = request(json!({
            "name": "Ada",
            "email": "a@x.com",
            "consent": true,
            "platforms": null,
            "preferred_times": null
        }))
        .validate()
        .unwrap();

        assert!(app.platforms.is_empty());
        assert!(app.preferred_times.is_empty());
    }

    #[test]
    fn test_application_serializes_snake_case() {
        let app = Application {
            id: 7,
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            phone: String::new(),
            experience: String::new(),
            goals: String::new(),
            platforms: vec!["Meta".to_string()],
            timezone: "Europe/London".to_string(),
            preferred_times: Vec::new(),
            consent: true,
            created_at: "2026-01-02 03:04:05".to_string(),
        };

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["platforms"], json!(["Meta"]));
        assert_eq!(value["consent"], true);
        assert_eq!(value["preferred_times"], json!([]));
        assert_eq!(value["created_at"], "2026-01-02 03:04:05");
    }
}
