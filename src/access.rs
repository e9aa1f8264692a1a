use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// the caller performing an operation, as resolved by the surrounding
/// auth layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub roles: Vec<String>,
}

/// capability check injected into operation surfaces, replacing per-route
/// string comparisons with a single decision point
pub trait Capability {
    fn can(&self, actor: &Actor, resource: &str, action: &str) -> bool;
}

/// role-based policy: each role grants a set of (resource, action) pairs.
/// `*` acts as a wildcard on either position; a role granted `("*", "*")`
/// is a superadmin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePolicy {
    grants: HashMap<String, HashSet<(String, String)>>,
}

impl RolePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// grant a (resource, action) pair to a role
    pub fn grant(
        mut self,
        role: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.grants
            .entry(role.into())
            .or_default()
            .insert((resource.into(), action.into()));
        self
    }

    /// grant everything to a role
    pub fn grant_all(self, role: impl Into<String>) -> Self {
        self.grant(role, "*", "*")
    }

    fn role_allows(&self, role: &str, resource: &str, action: &str) -> bool {
        let Some(granted) = self.grants.get(role) else {
            return false;
        };
        granted.iter().any(|(r, a)| {
            (r == "*" || r == resource) && (a == "*" || a == action)
        })
    }
}

impl Capability for RolePolicy {
    fn can(&self, actor: &Actor, resource: &str, action: &str) -> bool {
        actor
            .roles
            .iter()
            .any(|role| self.role_allows(role, resource, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[&str]) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn policy() -> RolePolicy {
        RolePolicy::new()
            .grant("bursar", "payments", "create")
            .grant("bursar", "payments", "read")
            .grant("dorm_staff", "leaves", "*")
            .grant_all("superadmin")
    }

    #[test]
    fn test_explicit_grant() {
        let policy = policy();
        let bursar = actor(&["bursar"]);
        assert!(policy.can(&bursar, "payments", "create"));
        assert!(!policy.can(&bursar, "payments", "delete"));
        assert!(!policy.can(&bursar, "leaves", "create"));
    }

    #[test]
    fn test_action_wildcard() {
        let policy = policy();
        let staff = actor(&["dorm_staff"]);
        assert!(policy.can(&staff, "leaves", "create"));
        assert!(policy.can(&staff, "leaves", "delete"));
        assert!(!policy.can(&staff, "payments", "read"));
    }

    #[test]
    fn test_superadmin_wildcard() {
        let policy = policy();
        let admin = actor(&["superadmin"]);
        assert!(policy.can(&admin, "payments", "delete"));
        assert!(policy.can(&admin, "anything", "whatsoever"));
    }

    #[test]
    fn test_unknown_role_denied() {
        let policy = policy();
        assert!(!policy.can(&actor(&["visitor"]), "payments", "read"));
        assert!(!policy.can(&actor(&[]), "payments", "read"));
    }

    #[test]
    fn test_any_role_suffices() {
        let policy = policy();
        let both = actor(&["visitor", "bursar"]);
        assert!(policy.can(&both, "payments", "read"));
    }
}
