//! Named multicast group.
//!
//! A `Topic` only tracks who is subscribed. Delivery goes through
//! [`MessagePusher::publish`](super::MessagePusher::publish), so the group
//! does not depend on any transport.

use std::collections::BTreeSet;

use super::ConnectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    members: BTreeSet<ConnectionId>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `false` if the connection was already subscribed.
    pub fn subscribe(&mut self, connection_id: ConnectionId) -> bool {
        self.members.insert(connection_id)
    }

    /// Returns `false` if the connection was not subscribed.
    pub fn unsubscribe(&mut self, connection_id: &ConnectionId) -> bool {
        self.members.remove(connection_id)
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.iter().cloned().collect()
    }

    pub fn members_except(&self, excluded: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|id| *id != excluded)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
