//! Notification role seed data and field validation.
//!
//! Notification roles are audience segments ("Bachelor Degree", "Masters")
//! that announcements and events can be targeted to and that users subscribe
//! to. The default set is seeded at startup and its ids and names are fixed.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Role every new user is subscribed to on first preference access.
pub const DEFAULT_SUBSCRIBED_ROLE: &str = "general";

/// `created_by` value recorded on seeded roles.
pub const SYSTEM_CREATOR: &str = "system";

/// Maximum length of a role name, in characters.
pub const MAX_ROLE_NAME_LEN: usize = 64;

/// Maximum length of a role description, in characters.
pub const MAX_ROLE_DESCRIPTION_LEN: usize = 256;

// ---------------------------------------------------------------------------
// Default roles
// ---------------------------------------------------------------------------

/// A notification role seeded at system init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRole {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// The seeded notification roles. Ids and names must never change.
pub const DEFAULT_ROLES: &[DefaultRole] = &[
    DefaultRole {
        id: "hnd",
        name: "HND",
        description: "Higher National Diploma students",
        color: "#3B82F6",
    },
    DefaultRole {
        id: "bachelor",
        name: "Bachelor Degree",
        description: "Bachelor degree students",
        color: "#10B981",
    },
    DefaultRole {
        id: "masters",
        name: "Masters",
        description: "Masters degree students",
        color: "#8B5CF6",
    },
    DefaultRole {
        id: "polytech",
        name: "Polytech",
        description: "Polytechnic students",
        color: "#F59E0B",
    },
    DefaultRole {
        id: DEFAULT_SUBSCRIBED_ROLE,
        name: "General",
        description: "General announcements for all students",
        color: "#6B7280",
    },
];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"))
}

/// Validate a role name: non-blank and at most [`MAX_ROLE_NAME_LEN`] characters.
pub fn validate_role_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Role name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_ROLE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Role name must be at most {MAX_ROLE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a role description: non-blank and at most
/// [`MAX_ROLE_DESCRIPTION_LEN`] characters.
pub fn validate_role_description(description: &str) -> Result<(), CoreError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Role description must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_ROLE_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Role description must be at most {MAX_ROLE_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an `#RRGGBB` hex color.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if color_pattern().is_match(color) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected #RRGGBB"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_roles_have_unique_ids_and_valid_fields() {
        let ids: HashSet<_> = DEFAULT_ROLES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), DEFAULT_ROLES.len());

        for role in DEFAULT_ROLES {
            assert!(validate_role_name(role.name).is_ok(), "{}", role.id);
            assert!(validate_role_description(role.description).is_ok());
            assert!(validate_color(role.color).is_ok());
        }
    }

    #[test]
    fn general_is_a_default_role() {
        assert!(DEFAULT_ROLES.iter().any(|r| r.id == DEFAULT_SUBSCRIBED_ROLE));
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_role_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_role_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "x".repeat(MAX_ROLE_NAME_LEN + 1);
        assert_matches!(validate_role_name(&name), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_description_rejected() {
        assert_matches!(
            validate_role_description(""),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn color_format() {
        assert!(validate_color("#ABCDEF").is_ok());
        assert!(validate_color("#abc123").is_ok());
        assert!(validate_color("ABCDEF").is_err());
        assert!(validate_color("#ABC").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }
}
