//! Form input and the checks that run before any request is sent.

use serde::Serialize;

use crate::error::ValidationError;

/// `POST /users/check-login` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    #[serde(rename = "usernameOrEmail")]
    pub identity: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.identity.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

/// `POST /users/Create-user` input; `confirm_password` never leaves the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        for (label, value) in [
            ("Name", &self.name),
            ("Username", &self.username),
            ("Email", &self.email),
            ("Password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(label));
            }
        }
        Ok(())
    }
}

/// Create/edit post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: String,
    /// Rich-text HTML
    pub content: String,
    /// Cover image URL from a prior upload
    #[serde(rename = "img_path")]
    pub cover_image: Option<String>,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// `POST /posts/{id}/comments` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    pub content: String,
}

impl CommentDraft {
    /// Trims the text; blank comments are rejected.
    pub fn new(content: &str) -> Result<Self, ValidationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}

/// Trimmed search keyword.
pub fn normalize_keyword(keyword: &str) -> Result<String, ValidationError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        Err(ValidationError::EmptyKeyword)
    } else {
        Ok(keyword.to_string())
    }
}

/// Trimmed entity identifier.
pub fn normalize_identifier(kind: &'static str, id: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        Err(ValidationError::EmptyIdentifier(kind))
    } else {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: "Ana".to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            LoginForm::new("", "pw").validate(),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            LoginForm::new("ana", "").validate(),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(LoginForm::new("ana", "pw").validate(), Ok(()));
    }

    #[test]
    fn login_serializes_identity_field_name() {
        let body = serde_json::to_value(LoginForm::new("ana", "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"usernameOrEmail": "ana", "password": "pw"})
        );
    }

    #[test]
    fn register_checks_mismatch_first() {
        let mut form = register("secret1", "secret2");
        form.email = String::new();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
        assert_eq!(
            register("secret", "secret").validate(),
            Ok(())
        );
    }

    #[test]
    fn register_body_omits_confirmation() {
        let body = serde_json::to_value(register("pw", "pw")).unwrap();
        assert!(body.get("confirm_password").is_none());
        assert_eq!(body["username"], "ana");
    }

    #[test]
    fn post_draft_requires_title_then_content() {
        let draft = PostDraft {
            title: " ".to_string(),
            content: String::new(),
            cover_image: None,
        };
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));

        let draft = PostDraft {
            title: "Hokkaido".to_string(),
            content: "  ".to_string(),
            cover_image: None,
        };
        assert_eq!(draft.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn comment_draft_trims_and_rejects_blank() {
        assert_eq!(CommentDraft::new("  nice  ").unwrap().content, "nice");
        assert_eq!(CommentDraft::new("\n").unwrap_err(), ValidationError::EmptyComment);
    }
}
