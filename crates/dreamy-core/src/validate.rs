use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::todo::{TodoDraft, TodoPayload};
use crate::user::{LoginPayload, ProfileDraft, SignupPayload};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("name regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

pub const MIN_PASSWORD_LEN: usize = 4;

pub fn is_valid_name(raw: &str) -> bool {
    NAME_RE.is_match(raw)
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// Local gate before any todo create/update call. A failure means no network
/// request is made.
pub fn validate_todo_draft(draft: &TodoDraft) -> Result<TodoPayload, String> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err("Title is required.".to_string());
    }

    if draft.todo_date.trim().is_empty() {
        return Err("Please provide a due date.".to_string());
    }
    let todo_date = NaiveDate::parse_from_str(draft.todo_date.trim(), "%Y-%m-%d")
        .map_err(|_| "Please provide a valid due date.".to_string())?;

    Ok(TodoPayload {
        title: title.to_string(),
        description: draft.description.trim().to_string(),
        todo_date,
        priority: draft.priority,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginPayload, String> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required.".to_string());
        }
        if !is_valid_email(email) {
            return Err("Please enter a valid email.".to_string());
        }
        Ok(LoginPayload {
            email: email.to_lowercase(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field inline messages, `None` meaning the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl SignupErrors {
    pub fn is_clean(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupPayload, SignupErrors> {
        let mut errors = SignupErrors::default();

        if !is_valid_name(&self.first_name) {
            errors.first_name = Some("Please enter a valid name format.");
        }
        if !is_valid_name(&self.last_name) {
            errors.last_name = Some("Please enter a valid name format.");
        }
        if !is_valid_email(self.email.trim()) {
            errors.email = Some("Please enter a valid email.");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some("Password should be at least 4 characters.");
        }
        if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match.");
        }

        if !errors.is_clean() {
            return Err(errors);
        }

        Ok(SignupPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
        })
    }
}

/// Profile fields are individually optional, but anything present has to be
/// well-formed.
pub fn validate_profile(draft: &ProfileDraft) -> Result<(), String> {
    if !draft.first_name.is_empty() && !is_valid_name(&draft.first_name) {
        return Err("Please enter a valid name format.".to_string());
    }
    if !draft.last_name.is_empty() && !is_valid_name(&draft.last_name) {
        return Err("Please enter a valid name format.".to_string());
    }
    if !draft.email.is_empty() && !is_valid_email(draft.email.trim()) {
        return Err("Please enter a valid email.".to_string());
    }
    if !draft.birthday.is_empty()
        && NaiveDate::parse_from_str(draft.birthday.trim(), "%Y-%m-%d").is_err()
    {
        return Err("Please enter a valid birthday.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::Priority;

    #[test]
    fn todo_draft_missing_title_blocks_submission() {
        let draft = TodoDraft {
            todo_date: "2026-09-10".to_string(),
            ..TodoDraft::empty()
        };
        assert_eq!(
            validate_todo_draft(&draft),
            Err("Title is required.".to_string())
        );
    }

    #[test]
    fn todo_draft_missing_date_blocks_submission() {
        let draft = TodoDraft {
            title: "Pack bags".to_string(),
            ..TodoDraft::empty()
        };
        assert_eq!(
            validate_todo_draft(&draft),
            Err("Please provide a due date.".to_string())
        );
    }

    #[test]
    fn todo_draft_trims_and_parses() {
        let draft = TodoDraft {
            title: "  Pack bags  ".to_string(),
            description: " light ".to_string(),
            todo_date: "2026-09-10".to_string(),
            priority: Priority::Low,
            id: None,
        };
        let payload = validate_todo_draft(&draft).expect("valid draft");
        assert_eq!(payload.title, "Pack bags");
        assert_eq!(payload.description, "light");
    }

    #[test]
    fn name_class_allows_spaces_apostrophes_hyphens() {
        assert!(is_valid_name("Mary-Jane O'Neil"));
        assert!(!is_valid_name("jd42"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn signup_collects_all_field_errors() {
        let form = SignupForm {
            first_name: "1".to_string(),
            last_name: String::new(),
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
            confirm_password: "abcd".to_string(),
        };

        let errors = form.validate().expect_err("invalid form");
        assert!(errors.first_name.is_some());
        assert!(errors.last_name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.password.is_some());
        assert!(errors.confirm_password.is_some());
    }

    #[test]
    fn signup_normalizes_email() {
        let form = SignupForm {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "  Ana@Example.COM ".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        };

        let payload = form.validate().expect("valid form");
        assert_eq!(payload.email, "ana@example.com");
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "ana@example.com".to_string(),
            password: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn profile_accepts_empty_fields_rejects_bad_ones() {
        assert!(validate_profile(&ProfileDraft::default()).is_ok());

        let bad = ProfileDraft {
            birthday: "wednesday".to_string(),
            ..ProfileDraft::default()
        };
        assert!(validate_profile(&bad).is_err());
    }
}
