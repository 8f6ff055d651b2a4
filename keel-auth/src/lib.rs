//! # Keel Auth
//!
//! Minimal in-memory credential registry for presence/absence testing.
//!
//! This is explicitly NOT a security boundary: passwords are stored and
//! compared as plain strings, with no hashing, no sessions, and no
//! timing-safe comparison. Use it for demos and tests only.

use std::collections::HashMap;

/// In-memory username to password store.
///
/// Mutation requires `&mut self`; callers sharing one instance across
/// tasks must provide their own synchronization.
#[derive(Debug, Default)]
pub struct CredentialRegistry {
    users: HashMap<String, String>,
}

impl CredentialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user.
    ///
    /// Returns `true` and stores the mapping only if the username is not
    /// already present; returns `false` and leaves the registry unchanged
    /// otherwise. Duplicates are not an error, just a refused registration.
    pub fn register(&mut self, username: impl Into<String>, password: impl Into<String>) -> bool {
        let username = username.into();
        if self.users.contains_key(&username) {
            tracing::trace!(%username, "registration refused: username taken");
            return false;
        }
        tracing::debug!(%username, "registered user");
        self.users.insert(username, password.into());
        true
    }

    /// Checks a username/password pair.
    ///
    /// Returns `true` iff the username is present and the stored password
    /// matches exactly (case-sensitive). Unknown usernames and wrong
    /// passwords are indistinguishable in the result.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(stored) => stored == password,
            None => false,
        }
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_authenticate() {
        let mut registry = CredentialRegistry::new();
        assert!(registry.register("alice", "p1"));
        assert!(registry.authenticate("alice", "p1"));
        assert!(!registry.authenticate("alice", "p2"));
    }

    #[test]
    fn test_duplicate_registration_refused_without_mutation() {
        let mut registry = CredentialRegistry::new();
        assert!(registry.register("alice", "p1"));
        assert!(!registry.register("alice", "p2"));

        // The original password still holds.
        assert!(registry.authenticate("alice", "p1"));
        assert!(!registry.authenticate("alice", "p2"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_user_fails() {
        let registry = CredentialRegistry::new();
        assert!(!registry.authenticate("ghost", "x"));
    }

    #[test]
    fn test_passwords_case_sensitive() {
        let mut registry = CredentialRegistry::new();
        registry.register("bob", "Secret");
        assert!(!registry.authenticate("bob", "secret"));
        assert!(registry.authenticate("bob", "Secret"));
    }
}
