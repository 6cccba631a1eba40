//! Core domain types for the server control panel

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Server Summary
// ─────────────────────────────────────────────────────────────────────────────

/// One server process as reported by the backend's list endpoint.
///
/// Produced wholesale by each registry fetch and never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    /// Display name, unique across the registry. Used as the selection key.
    pub name: String,

    /// Backend folder identifier (not used for selection)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the server process is currently alive
    #[serde(default)]
    pub running: bool,

    /// Tail of the server log. Only sent while the server is running.
    #[serde(default)]
    pub log: Option<String>,

    /// Per-server admin override for the current user
    #[serde(default)]
    pub is_admin: bool,

    /// Whether a modpack archive can be downloaded for this server
    #[serde(default)]
    pub has_modpack: bool,
}

impl ServerSummary {
    /// A stopped server with no admin rights
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            running: false,
            log: None,
            is_admin: false,
            has_modpack: false,
        }
    }

    /// Builder: mark as running with the given log tail
    pub fn running_with_log(mut self, log: impl Into<String>) -> Self {
        self.running = true;
        self.log = Some(log.into());
        self
    }

    /// Builder: set the per-server admin flag
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Builder: set the modpack flag
    pub fn with_modpack(mut self, has_modpack: bool) -> Self {
        self.has_modpack = has_modpack;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Client-held snapshot of every server the backend listed.
///
/// Order is the backend's list order. Each refresh replaces the whole
/// collection via [`Registry::replace`]; there is no merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    servers: Vec<ServerSummary>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap in a freshly fetched snapshot
    pub fn replace(&mut self, servers: Vec<ServerSummary>) {
        self.servers = servers;
    }

    /// Drop every entry (failed fetch, sign-out)
    pub fn clear(&mut self) {
        self.servers.clear();
    }

    pub fn servers(&self) -> &[ServerSummary] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn first(&self) -> Option<&ServerSummary> {
        self.servers.first()
    }

    /// Find a server by name. Names are unique by contract; the first match wins.
    pub fn find(&self, name: &str) -> Option<&ServerSummary> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Index of a server by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.servers.iter().position(|s| s.name == name)
    }

    /// Servers whose process is alive, in registry order
    pub fn running(&self) -> impl Iterator<Item = &ServerSummary> {
        self.servers.iter().filter(|s| s.running)
    }

    /// Whether the named server exists and is running
    pub fn is_running(&self, name: &str) -> bool {
        self.find(name).map(|s| s.running).unwrap_or(false)
    }
}

impl From<Vec<ServerSummary>> for Registry {
    fn from(servers: Vec<ServerSummary>) -> Self {
        Self { servers }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of the signed-in user, fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Friendly name, `None` when not signed in
    pub name: Option<String>,
    /// Admin on every server
    pub is_global_admin: bool,
}

impl Session {
    pub fn new(name: Option<String>, is_global_admin: bool) -> Self {
        Self {
            name,
            is_global_admin,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.name.is_some()
    }

    /// Reset to the signed-out identity
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }
}

/// Whether the user may administer `server`.
///
/// Derived from two inputs that can each change between polls, so callers
/// recompute it on every render instead of storing it. Global admins are
/// admins everywhere; everyone else gets the server's own flag.
pub fn effective_admin(session: &Session, server: Option<&ServerSummary>) -> bool {
    session.is_global_admin || server.map(|s| s.is_admin).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from(vec![
            ServerSummary::new("A").running_with_log("hello").with_admin(true),
            ServerSummary::new("B"),
            ServerSummary::new("C").running_with_log(""),
        ])
    }

    #[test]
    fn test_server_summary_deserializes_backend_shape() {
        let json = r#"{"id":"survival","name":"games - survival","running":true,"is_admin":false,"log":"[INFO] Done"}"#;
        let server: ServerSummary = serde_json::from_str(json).unwrap();
        assert_eq!(server.name, "games - survival");
        assert_eq!(server.id.as_deref(), Some("survival"));
        assert!(server.running);
        assert_eq!(server.log.as_deref(), Some("[INFO] Done"));
        assert!(!server.has_modpack);
    }

    #[test]
    fn test_server_summary_missing_optional_fields() {
        let server: ServerSummary = serde_json::from_str(r#"{"name":"B","running":false}"#).unwrap();
        assert_eq!(server, ServerSummary::new("B"));
    }

    #[test]
    fn test_server_summary_null_log() {
        let server: ServerSummary =
            serde_json::from_str(r#"{"name":"A","running":true,"log":null}"#).unwrap();
        assert!(server.running);
        assert!(server.log.is_none());
    }

    #[test]
    fn test_registry_preserves_order() {
        let reg = registry();
        let names: Vec<_> = reg.servers().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(reg.first().map(|s| s.name.as_str()), Some("A"));
    }

    #[test]
    fn test_registry_replace_is_wholesale() {
        let mut reg = registry();
        reg.replace(vec![ServerSummary::new("Z")]);
        assert_eq!(reg.len(), 1);
        assert!(reg.find("A").is_none());
        assert!(reg.find("Z").is_some());
    }

    #[test]
    fn test_registry_running_filter() {
        let reg = registry();
        let running: Vec<_> = reg.running().map(|s| s.name.as_str()).collect();
        assert_eq!(running, vec!["A", "C"]);
        assert!(reg.is_running("A"));
        assert!(!reg.is_running("B"));
        assert!(!reg.is_running("missing"));
    }

    #[test]
    fn test_session_sign_out_resets() {
        let mut session = Session::new(Some("bob".into()), true);
        assert!(session.is_signed_in());
        session.sign_out();
        assert_eq!(session, Session::default());
        assert!(!session.is_signed_in());
        assert!(!session.is_global_admin);
    }

    #[test]
    fn test_effective_admin_global_overrides() {
        let session = Session::new(Some("root".into()), true);
        let plain = ServerSummary::new("B");
        assert!(effective_admin(&session, Some(&plain)));
        assert!(effective_admin(&session, None));
    }

    #[test]
    fn test_effective_admin_per_server() {
        let session = Session::new(Some("bob".into()), false);
        let admin = ServerSummary::new("A").with_admin(true);
        let plain = ServerSummary::new("B");
        assert!(effective_admin(&session, Some(&admin)));
        assert!(!effective_admin(&session, Some(&plain)));
        assert!(!effective_admin(&session, None));
    }
}
