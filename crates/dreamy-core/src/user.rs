use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub email: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub contact_number: String,

    #[serde(default)]
    pub birthday: String,

    #[serde(default)]
    pub profile_image: String,

    #[serde(default)]
    pub bio: String,
}

impl User {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `/auth/login/` answers with `access`/`refresh`, `/users/signup/` with
/// `token`. Both funnel through `bearer()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub access: Option<String>,

    #[serde(default)]
    pub refresh: Option<String>,
}

impl AuthResponse {
    pub fn bearer(&self) -> Option<&str> {
        self.access.as_deref().or(self.token.as_deref())
    }
}

/// Transient profile editor state. The photo file itself never enters this
/// struct; it rides along as a browser `File` in the multipart request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub contact_number: String,
    pub birthday: String,
    pub bio: String,
}

impl ProfileDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            contact_number: user.contact_number.clone(),
            birthday: user.birthday.clone(),
            bio: user.bio.clone(),
        }
    }

    /// (wire field name, value) pairs for the multipart body. Empty values
    /// are skipped so unset fields are never overwritten server-side.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("contact_number", self.contact_number.as_str()),
            ("birthday", self.birthday.as_str()),
            ("bio", self.bio.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"ana@example.com"}"#,
        )
        .expect("parse user");
        assert_eq!(user.display_name(), "ana@example.com");
    }

    #[test]
    fn bearer_prefers_access_token() {
        let login = AuthResponse {
            access: Some("acc".to_string()),
            token: Some("tok".to_string()),
            refresh: None,
        };
        assert_eq!(login.bearer(), Some("acc"));

        let signup = AuthResponse {
            token: Some("tok".to_string()),
            ..AuthResponse::default()
        };
        assert_eq!(signup.bearer(), Some("tok"));
    }

    #[test]
    fn profile_fields_skip_empty_values() {
        let draft = ProfileDraft {
            first_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            ..ProfileDraft::default()
        };

        let fields = draft.fields();
        assert_eq!(
            fields,
            vec![("first_name", "Ana"), ("email", "ana@example.com")]
        );
    }
}
