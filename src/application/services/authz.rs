//! Authorization - (user, channel) permission sets layered on the brain
//!
//! Bot admins come from configuration, are never stored, and hold every
//! permission everywhere. Everyone else holds exactly the permissions
//! granted to them per channel.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::StorageError;
use crate::infrastructure::store::Brain;

/// user -> channel -> granted permission names
type PermissionMap = HashMap<String, HashMap<String, Vec<String>>>;

const PERMISSIONS_KEY: &str = "permissions";

pub struct Authz {
    admins: Vec<String>,
    brain: Arc<Brain>,
}

impl Authz {
    /// Seeds an empty permission map in the brain on first run.
    pub fn new(admins: Vec<String>, brain: Arc<Brain>) -> Result<Self, StorageError> {
        if brain.get::<PermissionMap>(PERMISSIONS_KEY).is_none() {
            brain.set(PERMISSIONS_KEY, &PermissionMap::new())?;
            brain.save()?;
        }
        Ok(Self { admins, brain })
    }

    pub fn is_bot_admin(&self, nick: &str) -> bool {
        self.admins.iter().any(|a| a == nick)
    }

    pub fn is_channel_admin(&self, nick: &str, channel: &str) -> bool {
        self.is_bot_admin(nick) || self.is_authorized(nick, channel, "admin")
    }

    /// Absence of a user or channel means no permission, never an error.
    pub fn is_authorized(&self, nick: &str, channel: &str, perm: &str) -> bool {
        if self.is_bot_admin(nick) {
            return true;
        }
        self.permissions()
            .get(nick)
            .and_then(|channels| channels.get(channel))
            .map(|perms| perms.iter().any(|p| p == perm))
            .unwrap_or(false)
    }

    /// Idempotently add a permission. Persists only when the stored set
    /// actually changed; returns whether it did.
    pub fn grant(&self, nick: &str, channel: &str, perm: &str) -> Result<bool, StorageError> {
        let mut map = self.permissions();
        let perms = map
            .entry(nick.to_string())
            .or_default()
            .entry(channel.to_string())
            .or_default();

        if perms.iter().any(|p| p == perm) {
            return Ok(false);
        }
        perms.push(perm.to_string());
        self.persist(&map)?;
        Ok(true)
    }

    /// Idempotently remove a permission. Persists only when something
    /// was actually removed; returns whether it was.
    pub fn revoke(&self, nick: &str, channel: &str, perm: &str) -> Result<bool, StorageError> {
        let mut map = self.permissions();
        let Some(perms) = map.get_mut(nick).and_then(|channels| channels.get_mut(channel))
        else {
            return Ok(false);
        };

        let before = perms.len();
        perms.retain(|p| p != perm);
        if perms.len() == before {
            return Ok(false);
        }
        self.persist(&map)?;
        Ok(true)
    }

    /// The full per-channel permission map for one user, for display.
    /// Bot-admin status is reported separately, never injected here.
    pub fn permissions_for(&self, nick: &str) -> HashMap<String, Vec<String>> {
        self.permissions().remove(nick).unwrap_or_default()
    }

    fn permissions(&self) -> PermissionMap {
        self.brain.get(PERMISSIONS_KEY).unwrap_or_default()
    }

    fn persist(&self, map: &PermissionMap) -> Result<(), StorageError> {
        self.brain.set(PERMISSIONS_KEY, map)?;
        self.brain.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn authz_with(admins: &[&str]) -> (Authz, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let brain = Arc::new(Brain::load(dir.path()));
        let authz = Authz::new(admins.iter().map(|s| s.to_string()).collect(), brain).unwrap();
        (authz, dir)
    }

    #[test]
    fn grant_then_query_scopes_to_the_channel() {
        let (authz, _dir) = authz_with(&[]);
        authz.grant("alice", "#ops", "history").unwrap();

        assert!(authz.is_authorized("alice", "#ops", "history"));
        assert!(!authz.is_authorized("alice", "#other", "history"));
        assert!(!authz.is_authorized("bob", "#ops", "history"));
    }

    #[test]
    fn granting_twice_equals_granting_once() {
        let (authz, _dir) = authz_with(&[]);
        assert!(authz.grant("alice", "#ops", "history").unwrap());
        assert!(!authz.grant("alice", "#ops", "history").unwrap());

        let perms = authz.permissions_for("alice");
        assert_eq!(perms.get("#ops").map(Vec::len), Some(1));
    }

    #[test]
    fn revoking_an_ungranted_permission_is_a_no_op() {
        let (authz, _dir) = authz_with(&[]);
        assert!(!authz.revoke("alice", "#ops", "history").unwrap());

        authz.grant("alice", "#ops", "history").unwrap();
        assert!(authz.revoke("alice", "#ops", "history").unwrap());
        assert!(!authz.is_authorized("alice", "#ops", "history"));
        assert!(!authz.revoke("alice", "#ops", "history").unwrap());
    }

    #[test]
    fn queries_reflect_the_net_grant_revoke_sequence() {
        let (authz, _dir) = authz_with(&[]);
        authz.grant("alice", "#ops", "history").unwrap();
        authz.grant("alice", "#ops", "admin").unwrap();
        authz.revoke("alice", "#ops", "history").unwrap();

        assert!(!authz.is_authorized("alice", "#ops", "history"));
        assert!(authz.is_authorized("alice", "#ops", "admin"));
    }

    #[test]
    fn bot_admin_holds_every_permission_without_stored_grants() {
        let (authz, _dir) = authz_with(&["root"]);
        assert!(authz.is_authorized("root", "#anywhere", "anything"));
        assert!(authz.is_channel_admin("root", "#anywhere"));
        // and nothing was stored for them
        assert!(authz.permissions_for("root").is_empty());
    }

    #[test]
    fn channel_admin_is_admin_permission_or_bot_admin() {
        let (authz, _dir) = authz_with(&[]);
        assert!(!authz.is_channel_admin("alice", "#ops"));
        authz.grant("alice", "#ops", "admin").unwrap();
        assert!(authz.is_channel_admin("alice", "#ops"));
        assert!(!authz.is_channel_admin("alice", "#other"));
    }

    #[test]
    fn grants_survive_a_reload() {
        let dir = tempdir().unwrap();
        {
            let brain = Arc::new(Brain::load(dir.path()));
            let authz = Authz::new(vec![], brain).unwrap();
            authz.grant("alice", "#ops", "history").unwrap();
        }
        let brain = Arc::new(Brain::load(dir.path()));
        let authz = Authz::new(vec![], brain).unwrap();
        assert!(authz.is_authorized("alice", "#ops", "history"));
    }
}
