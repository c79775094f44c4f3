//! Route access policies.
//!
//! An explicit, ordered pattern→policy table evaluated first-match-wins.
//! Patterns are either exact paths or a prefix followed by `/**`. Routes not
//! matched by any rule fall back to the table's default policy.

use crate::security::identity::Identity;

/// Declared access requirement for a group of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Always allowed.
    Public,
    /// Any authenticated identity.
    Authenticated,
    /// Authenticated identity holding at least one of the listed roles.
    Roles(Vec<String>),
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// No identity attached but one is required (401).
    Unauthorized,
    /// Identity attached but lacking a required role (403).
    Forbidden,
}

#[derive(Debug, Clone)]
struct PolicyRule {
    pattern: String,
    policy: AccessPolicy,
}

/// Ordered route→policy mapping.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
    default_policy: AccessPolicy,
}

impl PolicyTable {
    pub fn new(default_policy: AccessPolicy) -> Self {
        Self {
            rules: Vec::new(),
            default_policy,
        }
    }

    /// Append a rule. Rules are checked in insertion order, first match wins.
    pub fn route(mut self, pattern: &str, policy: AccessPolicy) -> Self {
        self.rules.push(PolicyRule {
            pattern: pattern.to_string(),
            policy,
        });
        self
    }

    /// The policy governing `path`.
    pub fn policy_for(&self, path: &str) -> &AccessPolicy {
        self.rules
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, path))
            .map(|rule| &rule.policy)
            .unwrap_or(&self.default_policy)
    }

    /// Decide whether `identity` may access `path`.
    ///
    /// Forbidden is only ever produced for a present-but-insufficient
    /// identity; an absent identity on a guarded route is always Unauthorized.
    pub fn decide(&self, path: &str, identity: Option<&Identity>) -> AccessDecision {
        match self.policy_for(path) {
            AccessPolicy::Public => AccessDecision::Allow,
            AccessPolicy::Authenticated => match identity {
                Some(_) => AccessDecision::Allow,
                None => AccessDecision::Unauthorized,
            },
            AccessPolicy::Roles(allowed) => match identity {
                None => AccessDecision::Unauthorized,
                Some(identity) if identity.has_any_role(allowed) => AccessDecision::Allow,
                Some(_) => AccessDecision::Forbidden,
            },
        }
    }
}

/// The route policy table for the catalog API.
pub fn catalog_policies() -> PolicyTable {
    PolicyTable::new(AccessPolicy::Authenticated)
        .route("/auth/**", AccessPolicy::Public)
        .route("/health", AccessPolicy::Public)
        .route("/api/admin/**", AccessPolicy::Roles(vec!["ADMIN".to_string()]))
        .route(
            "/api/products/**",
            AccessPolicy::Roles(vec!["USER".to_string(), "ADMIN".to_string()]),
        )
        .route(
            "/api/tags/**",
            AccessPolicy::Roles(vec!["USER".to_string(), "ADMIN".to_string()]),
        )
}

/// Match `path` against `pattern`: exact, or prefix when the pattern ends in
/// `/**` (the prefix itself also matches).
fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => path
            .strip_prefix(prefix)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('/')),
        None => path == pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Identity {
        Identity::new("user", vec!["USER".to_string()])
    }

    fn admin() -> Identity {
        Identity::new("admin", vec!["ADMIN".to_string()])
    }

    #[test]
    fn wildcard_patterns_match_the_prefix_and_below() {
        assert!(pattern_matches("/api/products/**", "/api/products"));
        assert!(pattern_matches("/api/products/**", "/api/products/42"));
        assert!(pattern_matches("/api/products/**", "/api/products/42/tags/7"));
        assert!(!pattern_matches("/api/products/**", "/api/productions"));
        assert!(!pattern_matches("/api/products/**", "/api"));
    }

    #[test]
    fn exact_patterns_match_only_the_exact_path() {
        assert!(pattern_matches("/health", "/health"));
        assert!(!pattern_matches("/health", "/health/ready"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = PolicyTable::new(AccessPolicy::Authenticated)
            .route("/api/items/special", AccessPolicy::Public)
            .route("/api/items/**", AccessPolicy::Roles(vec!["ADMIN".to_string()]));

        assert_eq!(table.policy_for("/api/items/special"), &AccessPolicy::Public);
        assert_eq!(
            table.policy_for("/api/items/other"),
            &AccessPolicy::Roles(vec!["ADMIN".to_string()])
        );
    }

    #[test]
    fn unmatched_paths_use_the_default_policy() {
        let table = catalog_policies();
        assert_eq!(table.policy_for("/something/else"), &AccessPolicy::Authenticated);
    }

    #[test]
    fn public_routes_allow_anonymous_access() {
        let table = catalog_policies();
        assert_eq!(table.decide("/auth/login", None), AccessDecision::Allow);
        assert_eq!(table.decide("/health", None), AccessDecision::Allow);
    }

    #[test]
    fn guarded_routes_reject_anonymous_access_with_unauthorized() {
        let table = catalog_policies();
        // Never Forbidden without an identity, even on role-guarded routes.
        assert_eq!(
            table.decide("/api/admin/stats", None),
            AccessDecision::Unauthorized
        );
        assert_eq!(
            table.decide("/api/products", None),
            AccessDecision::Unauthorized
        );
        assert_eq!(
            table.decide("/something/else", None),
            AccessDecision::Unauthorized
        );
    }

    #[test]
    fn role_routes_distinguish_insufficient_from_missing() {
        let table = catalog_policies();

        assert_eq!(
            table.decide("/api/admin/stats", Some(&user())),
            AccessDecision::Forbidden
        );
        assert_eq!(
            table.decide("/api/admin/stats", Some(&admin())),
            AccessDecision::Allow
        );
    }

    #[test]
    fn catalog_routes_accept_either_role() {
        let table = catalog_policies();

        assert_eq!(table.decide("/api/products/1", Some(&user())), AccessDecision::Allow);
        assert_eq!(table.decide("/api/products/1", Some(&admin())), AccessDecision::Allow);
        assert_eq!(table.decide("/api/tags", Some(&user())), AccessDecision::Allow);
    }
}
