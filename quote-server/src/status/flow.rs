//! Status flow tables
//!
//! The allowed transitions are data: a status list with metadata and an
//! explicit adjacency list of (from, to) pairs. Nothing here is hard-coded
//! in engine logic; terminal states are simply statuses with no outgoing
//! edges.

use std::collections::HashSet;

use shared::EntityKind;

/// One status row with its display metadata
#[derive(Debug, Clone)]
pub struct StatusDef {
    pub name: &'static str,
    pub label: &'static str,
    /// Counts toward "successful" funnel metrics
    pub is_successful: bool,
    /// Counts as a placed order in reporting
    pub counts_as_order: bool,
}

/// A status list plus its transition allow-list
#[derive(Debug, Clone)]
pub struct StatusFlow {
    statuses: Vec<StatusDef>,
    allowed: HashSet<(&'static str, &'static str)>,
}

impl StatusFlow {
    pub fn new(
        statuses: Vec<StatusDef>,
        edges: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Self {
        Self {
            statuses,
            allowed: edges.into_iter().collect(),
        }
    }

    /// Whether (from, to) is in the allow-list
    pub fn can_transition(&self, from: &str, to: &str) -> bool {
        self.allowed.iter().any(|(f, t)| *f == from && *t == to)
    }

    /// A status with no outgoing edges is terminal
    pub fn is_terminal(&self, status: &str) -> bool {
        !self.allowed.iter().any(|(from, _)| *from == status)
    }

    /// Metadata row for a status
    pub fn status(&self, name: &str) -> Option<&StatusDef> {
        self.statuses.iter().find(|s| s.name == name)
    }

    pub fn statuses(&self) -> &[StatusDef] {
        &self.statuses
    }

    /// The quote lifecycle flow
    pub fn quote_flow() -> Self {
        let def = |name, label, is_successful, counts_as_order| StatusDef {
            name,
            label,
            is_successful,
            counts_as_order,
        };
        Self::new(
            vec![
                def("pending", "Pending", false, false),
                def("calculated", "Calculated", false, false),
                def("sent", "Quote Sent", false, false),
                def("approved", "Approved", true, false),
                def("paid", "Paid", true, true),
                def("rejected", "Rejected", false, false),
                def("expired", "Expired", false, false),
            ],
            [
                ("pending", "calculated"),
                ("pending", "rejected"),
                ("pending", "expired"),
                ("calculated", "sent"),
                ("calculated", "rejected"),
                ("calculated", "expired"),
                ("sent", "approved"),
                ("sent", "rejected"),
                ("sent", "expired"),
                ("approved", "paid"),
                ("approved", "rejected"),
                ("approved", "expired"),
            ],
        )
    }

    /// The order lifecycle flow
    pub fn order_flow() -> Self {
        let def = |name, label, is_successful| StatusDef {
            name,
            label,
            is_successful,
            counts_as_order: true,
        };
        Self::new(
            vec![
                def("ordered", "Ordered", false),
                def("shipped", "Shipped", false),
                def("delivered", "Delivered", true),
                def("completed", "Completed", true),
                def("cancelled", "Cancelled", false),
            ],
            [
                ("ordered", "shipped"),
                ("ordered", "cancelled"),
                ("shipped", "delivered"),
                ("delivered", "completed"),
            ],
        )
    }
}

/// All flows, keyed by entity kind
#[derive(Debug, Clone)]
pub struct StatusFlows {
    quote: StatusFlow,
    order: StatusFlow,
}

impl StatusFlows {
    pub fn standard() -> Self {
        Self {
            quote: StatusFlow::quote_flow(),
            order: StatusFlow::order_flow(),
        }
    }

    pub fn for_kind(&self, kind: EntityKind) -> &StatusFlow {
        match kind {
            EntityKind::Quote => &self.quote,
            EntityKind::Order => &self.order,
        }
    }
}

impl Default for StatusFlows {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_pair() {
        let flow = StatusFlow::quote_flow();
        assert!(flow.can_transition("pending", "calculated"));
        assert!(flow.can_transition("approved", "paid"));
    }

    #[test]
    fn test_skipping_states_is_rejected() {
        let flow = StatusFlow::quote_flow();
        assert!(!flow.can_transition("pending", "paid"));
        assert!(!flow.can_transition("pending", "sent"));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        let quote = StatusFlow::quote_flow();
        for terminal in ["paid", "rejected", "expired"] {
            assert!(quote.is_terminal(terminal), "{} should be terminal", terminal);
        }
        assert!(!quote.is_terminal("pending"));

        let order = StatusFlow::order_flow();
        for terminal in ["completed", "cancelled"] {
            assert!(order.is_terminal(terminal), "{} should be terminal", terminal);
        }
    }

    #[test]
    fn test_status_metadata() {
        let flow = StatusFlow::quote_flow();
        let paid = flow.status("paid").unwrap();
        assert!(paid.is_successful);
        assert!(paid.counts_as_order);
        assert_eq!(flow.status("sent").unwrap().label, "Quote Sent");
        assert!(flow.status("nonsense").is_none());
    }
}
