//! Account data structures and wire types.

use serde::{Deserialize, Serialize};

/// A registered company account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt digest - never serialize
    pub role: String,
    pub created_at: String,
}

/// Sign-up request body.
///
/// Fields are `Option` so that an absent field and an empty one are both
/// reported as the same validation failure instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Message-only response body, used by sign-up and by all error responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Sign-in response.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub user: AccountResponse,
}

/// Sanitized account view returned to clients.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub role: String,
}

impl AccountResponse {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            fullname: account.fullname.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: 42,
            fullname: "Acme Co".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: "industry".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_account_never_serializes_password_hash() {
        let json = serde_json::to_value(sample_account()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_account_response_is_sanitized() {
        let response = AccountResponse::from_account(&sample_account());
        assert_eq!(response.id, 42);
        assert_eq!(response.fullname, "Acme Co");
        assert_eq!(response.role, "industry");

        let json = serde_json::to_value(&response).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["id", "fullname", "email", "role"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj.contains_key("password_hash"));
    }

    #[test]
    fn test_signup_request_tolerates_missing_fields() {
        let request: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(request.email.as_deref(), Some("a@x.com"));
        assert!(request.fullname.is_none());
        assert!(request.password.is_none());
        assert!(request.role.is_none());
    }
}
