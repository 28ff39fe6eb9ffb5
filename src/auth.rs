//! Who is looking at the portal, and which lists they may open.
//!
//! The context is plain data handed to whatever needs it. Nothing here
//! reads globals; callers build one `AuthContext` up front and pass it
//! down, so tests can run any role side by side.

use crate::domain::ListKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trader,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "trader" => Some(Role::Trader),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Trader => "trader",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// The tabs this role gets, in display order. Admins see the whole
    /// back office; traders only their own commercial lists.
    pub fn visible_lists(&self) -> Vec<ListKind> {
        match self.role {
            Role::Admin => ListKind::ALL.to_vec(),
            Role::Trader => vec![ListKind::Plans, ListKind::Subscriptions],
        }
    }

    pub fn can_view(&self, kind: ListKind) -> bool {
        self.visible_lists().contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_every_list() {
        let ctx = AuthContext::new("ana", Role::Admin);
        assert_eq!(ctx.visible_lists(), ListKind::ALL.to_vec());
        assert!(ctx.can_view(ListKind::Users));
    }

    #[test]
    fn test_trader_is_limited_to_commercial_lists() {
        let ctx = AuthContext::new("beto", Role::Trader);
        assert_eq!(
            ctx.visible_lists(),
            vec![ListKind::Plans, ListKind::Subscriptions]
        );
        assert!(!ctx.can_view(ListKind::Users));
        assert!(!ctx.can_view(ListKind::Traders));
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("TRADER"), Some(Role::Trader));
        assert_eq!(Role::parse("guest"), None);
    }
}
