//! Server selection and its reconciliation against registry snapshots

use serde::Serialize;

use crate::types::{effective_admin, Registry, ServerSummary, Session};

/// The single server focused in the UI.
///
/// Starts `Unselected`, becomes `Selected(first)` on the first non-empty
/// registry, then only changes on explicit user choice. A selected server
/// that disappears from the registry stays selected so the view can say
/// "not found" instead of silently jumping elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "name", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(name) => Some(name),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }

    /// Apply the implicit first-load transition after a fetch.
    ///
    /// Returns `true` when the selection changed.
    pub fn reconcile(&mut self, registry: &Registry) -> bool {
        if let Selection::Unselected = self {
            if let Some(first) = registry.first() {
                *self = Selection::Selected(first.name.clone());
                return true;
            }
        }
        false
    }

    /// Explicit user choice. Returns `true` when the selection changed.
    pub fn select(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name() == Some(name.as_str()) {
            return false;
        }
        *self = Selection::Selected(name);
        true
    }

    /// Back to the initial state (sign-out)
    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    /// Resolve the selection against the latest registry snapshot
    pub fn resolve<'a>(&'a self, registry: &'a Registry) -> ConsoleView<'a> {
        let Some(name) = self.name() else {
            return ConsoleView::NoSelection;
        };
        match registry.find(name) {
            None => ConsoleView::NotFound { name },
            Some(server) if !server.running => ConsoleView::Stopped { server },
            Some(server) => ConsoleView::Running {
                server,
                log: server.log.as_deref().unwrap_or(""),
            },
        }
    }
}

/// What the console pane shows for the current selection.
///
/// Only `Running` carries log text. Every other variant means "no log
/// pane", which is distinct from a running server with an empty log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleView<'a> {
    /// Nothing selected yet (no successful non-empty fetch)
    NoSelection,
    /// The selected name is absent from the registry
    NotFound { name: &'a str },
    /// The selected server exists but is not running
    Stopped { server: &'a ServerSummary },
    /// The selected server is running; `log` may be empty
    Running {
        server: &'a ServerSummary,
        log: &'a str,
    },
}

impl<'a> ConsoleView<'a> {
    /// Log pane text, `None` when there is no pane to show
    pub fn log(&self) -> Option<&'a str> {
        match self {
            ConsoleView::Running { log, .. } => Some(log),
            _ => None,
        }
    }

    /// The resolved server entry, if the selection matched one
    pub fn server(&self) -> Option<&'a ServerSummary> {
        match self {
            ConsoleView::Stopped { server } | ConsoleView::Running { server, .. } => Some(server),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ConsoleView::Running { .. })
    }

    /// Whether the command channel accepts input.
    ///
    /// Requires a selected, running server and effective admin rights on it.
    /// This is a UX gate only; the backend enforces the real permission.
    pub fn command_enabled(&self, session: &Session) -> bool {
        match self {
            ConsoleView::Running { server, .. } => effective_admin(session, Some(server)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_registry() -> Registry {
        Registry::from(vec![
            ServerSummary::new("A").running_with_log("hello").with_admin(true),
            ServerSummary::new("B"),
        ])
    }

    fn bob() -> Session {
        Session::new(Some("bob".into()), false)
    }

    #[test]
    fn test_first_fetch_selects_first_server() {
        let mut sel = Selection::default();
        assert!(sel.reconcile(&scenario_registry()));
        assert_eq!(sel, Selection::Selected("A".into()));
    }

    #[test]
    fn test_empty_fetch_keeps_unselected() {
        let mut sel = Selection::default();
        assert!(!sel.reconcile(&Registry::new()));
        assert_eq!(sel, Selection::Unselected);
    }

    #[test]
    fn test_reconcile_never_overrides_existing_selection() {
        let mut sel = Selection::Selected("B".into());
        assert!(!sel.reconcile(&scenario_registry()));
        assert_eq!(sel.name(), Some("B"));
    }

    #[test]
    fn test_vanished_server_keeps_selection() {
        let mut sel = Selection::Selected("A".into());
        let empty = Registry::new();
        assert!(!sel.reconcile(&empty));
        assert_eq!(sel.name(), Some("A"));
        assert_eq!(sel.resolve(&empty), ConsoleView::NotFound { name: "A" });
    }

    #[test]
    fn test_select_reports_change() {
        let mut sel = Selection::Selected("A".into());
        assert!(!sel.select("A"));
        assert!(sel.select("B"));
        assert_eq!(sel.name(), Some("B"));
    }

    #[test]
    fn test_scenario_default_selection_is_enabled() {
        let reg = scenario_registry();
        let mut sel = Selection::default();
        sel.reconcile(&reg);

        let view = sel.resolve(&reg);
        assert_eq!(view.log(), Some("hello"));
        assert!(view.command_enabled(&bob()));
    }

    #[test]
    fn test_scenario_switch_to_stopped_server() {
        let reg = scenario_registry();
        let sel = Selection::Selected("B".into());

        let view = sel.resolve(&reg);
        assert!(matches!(view, ConsoleView::Stopped { .. }));
        assert_eq!(view.log(), None);
        assert!(!view.command_enabled(&bob()));
    }

    #[test]
    fn test_unknown_selection_is_degraded_for_everyone() {
        let reg = scenario_registry();
        let sel = Selection::Selected("ghost".into());
        let view = sel.resolve(&reg);

        assert_eq!(view.log(), None);
        assert!(!view.command_enabled(&bob()));
        assert!(!view.command_enabled(&Session::new(Some("root".into()), true)));
    }

    #[test]
    fn test_running_null_log_is_empty_not_absent() {
        let mut server = ServerSummary::new("A");
        server.running = true;
        let reg = Registry::from(vec![server]);
        let sel = Selection::Selected("A".into());

        assert_eq!(sel.resolve(&reg).log(), Some(""));
    }

    #[test]
    fn test_global_admin_enables_running_server_without_flag() {
        let reg = Registry::from(vec![ServerSummary::new("C").running_with_log("x")]);
        let sel = Selection::Selected("C".into());
        let view = sel.resolve(&reg);

        assert!(!view.command_enabled(&bob()));
        assert!(view.command_enabled(&Session::new(Some("root".into()), true)));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let reg = scenario_registry();
        let refetched = reg.clone();
        let sel = Selection::Selected("A".into());
        assert_eq!(sel.resolve(&reg), sel.resolve(&refetched));
    }
}
