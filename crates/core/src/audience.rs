//! Audience resolution: who may see a piece of content, and who should be
//! notified when it is created.
//!
//! Both decisions hinge on the same [`Targeting`] pair carried by every
//! announcement and event. Matching is OR-based: a viewer subscribed to any
//! one targeted role matches. Public content bypasses targeting entirely.
//!
//! Evaluation never fails. A non-public item with an empty role set is a
//! degenerate but valid input that simply matches nobody; rejecting it is the
//! job of [`validate_targeting`] on the write path.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::UserId;

// ---------------------------------------------------------------------------
// Targeting
// ---------------------------------------------------------------------------

/// Audience selector embedded in announcements and events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targeting {
    /// Visible to every viewer; `target_roles` is ignored when set.
    pub is_public: bool,
    /// Notification role ids the item is aimed at.
    #[serde(default)]
    pub target_roles: BTreeSet<String>,
}

impl Targeting {
    /// Targeting that reaches every viewer.
    pub fn public() -> Self {
        Self {
            is_public: true,
            target_roles: BTreeSet::new(),
        }
    }

    /// Targeting restricted to the given role ids.
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_public: false,
            target_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if a viewer holding `viewer_roles` may see the item.
    pub fn is_visible_to(&self, viewer_roles: &BTreeSet<String>) -> bool {
        if self.is_public {
            return true;
        }
        intersects(viewer_roles, &self.target_roles)
    }
}

/// Anything that carries a [`Targeting`].
pub trait Targetable {
    fn targeting(&self) -> &Targeting;
}

impl Targetable for Targeting {
    fn targeting(&self) -> &Targeting {
        self
    }
}

/// Visibility predicate applied to every item in a viewer-facing list.
pub fn is_visible<T: Targetable + ?Sized>(content: &T, viewer_roles: &BTreeSet<String>) -> bool {
    content.targeting().is_visible_to(viewer_roles)
}

// ---------------------------------------------------------------------------
// Recipients
// ---------------------------------------------------------------------------

/// A user's notification subscription, as seen by the resolver.
pub trait AudienceMember {
    fn user_id(&self) -> &str;
    /// The per-user override that bypasses role matching.
    fn allows_all(&self) -> bool;
    fn subscribed_roles(&self) -> &BTreeSet<String>;
}

/// Compute the set of users to notify about an item with `targeting`.
///
/// A member is included when any of these holds, checked in order:
/// 1. their override flag is on,
/// 2. the item is public,
/// 3. their subscriptions intersect the targeted roles.
pub fn resolve_recipients<'a, M, I>(targeting: &Targeting, members: I) -> BTreeSet<UserId>
where
    M: AudienceMember + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let mut recipients = BTreeSet::new();
    for member in members {
        if member.allows_all()
            || targeting.is_public
            || intersects(member.subscribed_roles(), &targeting.target_roles)
        {
            recipients.insert(member.user_id().to_string());
        }
    }
    recipients
}

fn intersects(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|role| large.contains(role))
}

// ---------------------------------------------------------------------------
// Write-path validation
// ---------------------------------------------------------------------------

/// Reject targeting that cannot reach anyone: non-public with no roles.
pub fn validate_targeting(targeting: &Targeting) -> Result<(), CoreError> {
    if !targeting.is_public && targeting.target_roles.is_empty() {
        return Err(CoreError::Validation(
            "Targeted content must name at least one notification role".into(),
        ));
    }
    Ok(())
}

/// Reject targeted role ids that are not present in `known_roles`.
///
/// Public content is not checked since its role set is ignored.
pub fn validate_known_roles(
    targeting: &Targeting,
    known_roles: &BTreeSet<String>,
) -> Result<(), CoreError> {
    if targeting.is_public {
        return Ok(());
    }
    ensure_known_roles(&targeting.target_roles, known_roles)
}

/// Reject any id in `roles` that is not present in `known_roles`.
pub fn ensure_known_roles(
    roles: &BTreeSet<String>,
    known_roles: &BTreeSet<String>,
) -> Result<(), CoreError> {
    let unknown: Vec<&str> = roles
        .iter()
        .filter(|r| !known_roles.contains(*r))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown notification role(s): {}",
            unknown.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct Member {
        user_id: &'static str,
        allow_all: bool,
        roles: BTreeSet<String>,
    }

    impl AudienceMember for Member {
        fn user_id(&self) -> &str {
            self.user_id
        }
        fn allows_all(&self) -> bool {
            self.allow_all
        }
        fn subscribed_roles(&self) -> &BTreeSet<String> {
            &self.roles
        }
    }

    fn member(user_id: &'static str, allow_all: bool, roles: &[&str]) -> Member {
        Member {
            user_id,
            allow_all,
            roles: set(roles),
        }
    }

    fn set(roles: &[&str]) -> BTreeSet<String> {
        roles.iter().map(|r| r.to_string()).collect()
    }

    // -- visibility --

    #[test]
    fn public_content_visible_to_everyone() {
        let targeting = Targeting::public();
        assert!(is_visible(&targeting, &set(&[])));
        assert!(is_visible(&targeting, &set(&["masters"])));

        // Roles on public content are ignored.
        let with_roles = Targeting {
            is_public: true,
            target_roles: set(&["hnd"]),
        };
        assert!(is_visible(&with_roles, &set(&["bachelor"])));
    }

    #[test]
    fn targeted_content_visible_on_any_overlap() {
        let targeting = Targeting::roles(["bachelor", "masters"]);
        assert!(is_visible(&targeting, &set(&["masters"])));
        assert!(is_visible(&targeting, &set(&["general", "bachelor"])));
        assert!(!is_visible(&targeting, &set(&["hnd"])));
        assert!(!is_visible(&targeting, &set(&[])));
    }

    #[test]
    fn empty_targeting_matches_nobody() {
        let targeting = Targeting::roles(Vec::<String>::new());
        assert!(!is_visible(&targeting, &set(&["general", "hnd"])));
    }

    // -- recipients --

    #[test]
    fn override_receives_targeted_content() {
        // A: bachelor, no override. B: general, override.
        let a = member("A", false, &["bachelor"]);
        let b = member("B", true, &["general"]);
        let targeting = Targeting::roles(["masters"]);

        let recipients = resolve_recipients(&targeting, [&a, &b]);
        assert_eq!(recipients, set(&["B"]));
    }

    #[test]
    fn public_content_reaches_every_member() {
        let a = member("A", false, &["bachelor"]);
        let b = member("B", true, &["general"]);
        let c = member("C", false, &[]);

        let recipients = resolve_recipients(&Targeting::public(), [&a, &b, &c]);
        assert_eq!(recipients, set(&["A", "B", "C"]));
    }

    #[test]
    fn subscription_overlap_is_enough() {
        let a = member("A", false, &["hnd", "masters"]);
        let targeting = Targeting::roles(["masters", "polytech"]);
        assert_eq!(resolve_recipients(&targeting, [&a]), set(&["A"]));
    }

    #[test]
    fn unsubscribed_member_without_override_gets_nothing() {
        let a = member("A", false, &[]);
        let targeting = Targeting::roles(["general"]);
        assert!(resolve_recipients(&targeting, [&a]).is_empty());
    }

    #[test]
    fn empty_targeting_only_reaches_overrides() {
        let a = member("A", false, &["general"]);
        let b = member("B", true, &[]);
        let targeting = Targeting::roles(Vec::<String>::new());
        assert_eq!(resolve_recipients(&targeting, [&a, &b]), set(&["B"]));
    }

    // -- validation --

    #[test]
    fn targeted_without_roles_is_invalid() {
        let targeting = Targeting::roles(Vec::<String>::new());
        assert_matches!(
            validate_targeting(&targeting),
            Err(CoreError::Validation(_))
        );
        assert!(validate_targeting(&Targeting::public()).is_ok());
        assert!(validate_targeting(&Targeting::roles(["hnd"])).is_ok());
    }

    #[test]
    fn unknown_roles_are_reported() {
        let known = set(&["general", "hnd"]);
        let err = validate_known_roles(&Targeting::roles(["hnd", "ghost"]), &known).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("ghost"));

        // Public targeting is never checked.
        let public = Targeting {
            is_public: true,
            target_roles: set(&["ghost"]),
        };
        assert!(validate_known_roles(&public, &known).is_ok());
    }

    #[test]
    fn targeting_deserializes_without_roles() {
        let targeting: Targeting = serde_json::from_str(r#"{"is_public": true}"#).unwrap();
        assert!(targeting.is_public);
        assert!(targeting.target_roles.is_empty());
    }
}
