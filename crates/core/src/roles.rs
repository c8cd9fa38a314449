//! Account role constants and the authenticated [`Viewer`].
//!
//! Account roles (`student`, `teacher`, `admin`) come from the auth provider
//! and govern what a caller may do. They are unrelated to notification roles,
//! which describe audiences; see [`crate::notification_roles`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";

/// The account role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    Teacher,
    Admin,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Teacher => ROLE_TEACHER,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a role name as issued by the auth provider.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_STUDENT => Ok(Self::Student),
            ROLE_TEACHER => Ok(Self::Teacher),
            ROLE_ADMIN => Ok(Self::Admin),
            other => Err(CoreError::Unauthorized(format!(
                "Unknown account role '{other}'"
            ))),
        }
    }

    /// Teachers and admins may publish announcements and events.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller of an operation, as vouched for by the auth provider.
///
/// The role is trusted as-is; preventing role escalation is the auth
/// provider's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: UserId,
    pub role: AccountRole,
}

impl Viewer {
    pub fn new(user_id: impl Into<UserId>, role: AccountRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Require that the viewer may publish new content.
    pub fn ensure_can_publish(&self) -> Result<(), CoreError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only teachers and admins can publish content".into(),
            ))
        }
    }

    /// Require that the viewer may edit or delete content written by `author_id`.
    pub fn ensure_can_modify(&self, author_id: &str) -> Result<(), CoreError> {
        if self.is_admin() || self.user_id == author_id {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the author or an admin can modify this content".into(),
            ))
        }
    }

    /// Require the admin role.
    pub fn ensure_admin(&self) -> Result<(), CoreError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Admin role required".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_known_roles() {
        assert_eq!(AccountRole::parse("student").unwrap(), AccountRole::Student);
        assert_eq!(AccountRole::parse("teacher").unwrap(), AccountRole::Teacher);
        assert_eq!(AccountRole::parse("admin").unwrap(), AccountRole::Admin);
    }

    #[test]
    fn parse_unknown_role_is_unauthorized() {
        assert_matches!(
            AccountRole::parse("superuser"),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn students_cannot_publish() {
        let viewer = Viewer::new("s1", AccountRole::Student);
        assert_matches!(viewer.ensure_can_publish(), Err(CoreError::Forbidden(_)));
        assert!(Viewer::new("t1", AccountRole::Teacher)
            .ensure_can_publish()
            .is_ok());
    }

    #[test]
    fn author_or_admin_can_modify() {
        let author = Viewer::new("t1", AccountRole::Teacher);
        let other_teacher = Viewer::new("t2", AccountRole::Teacher);
        let admin = Viewer::new("a1", AccountRole::Admin);

        assert!(author.ensure_can_modify("t1").is_ok());
        assert!(admin.ensure_can_modify("t1").is_ok());
        assert_matches!(
            other_teacher.ensure_can_modify("t1"),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&AccountRole::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
    }
}
