/// The authenticated principal for the lifetime of one request.
///
/// Constructed by the authenticator at login, or rebuilt from token claims on
/// every subsequent request. Never persisted, never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// True if any of the identity's roles appears in `allowed`.
    pub fn has_any_role(&self, allowed: &[String]) -> bool {
        self.roles.iter().any(|role| allowed.contains(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_any_role_matches_on_intersection() {
        let identity = Identity::new("user", vec!["USER".to_string()]);
        assert!(identity.has_any_role(&["USER".to_string(), "ADMIN".to_string()]));
        assert!(!identity.has_any_role(&["ADMIN".to_string()]));
        assert!(!identity.has_any_role(&[]));
    }
}
