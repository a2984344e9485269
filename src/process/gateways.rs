// SPDX-License-Identifier: MIT

//! Open-gateway table
//!
//! Split gateways that have not been joined yet, in the order they were
//! opened. The last entry is the active branching scope. Entries can still
//! leave out of order, so this is an insertion-ordered map rather than a stack.

use indexmap::IndexMap;

use super::element::ElementCategory;

/// Kind of a split gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    Exclusive,
    Parallel,
}

impl GatewayKind {
    pub fn category(self) -> ElementCategory {
        match self {
            Self::Exclusive => ElementCategory::ExclusiveGateway,
            Self::Parallel => ElementCategory::ParallelGateway,
        }
    }

    /// Identifier prefix shared by the split and its join
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Exclusive => "ExclusiveGateway",
            Self::Parallel => "ParallelGateway",
        }
    }
}

/// A split waiting for its join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenGateway {
    pub kind: GatewayKind,
    /// Terminal element of every branch completed so far
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OpenGateways {
    gateways: IndexMap<String, OpenGateway>,
}

impl OpenGateways {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.gateways.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&OpenGateway> {
        self.gateways.get(id)
    }

    /// Register a freshly opened split with no completed branches
    pub fn open(&mut self, id: impl Into<String>, kind: GatewayKind) {
        self.gateways.insert(
            id.into(),
            OpenGateway {
                kind,
                branches: Vec::new(),
            },
        );
    }

    /// The most recently opened gateway still present
    pub fn active(&self) -> Option<(&str, GatewayKind)> {
        self.gateways
            .last()
            .map(|(id, gateway)| (id.as_str(), gateway.kind))
    }

    pub fn active_id(&self) -> Option<String> {
        self.active().map(|(id, _)| id.to_string())
    }

    /// Record the terminal element of a completed branch
    pub fn push_branch(&mut self, id: &str, terminal: impl Into<String>) {
        if let Some(gateway) = self.gateways.get_mut(id) {
            gateway.branches.push(terminal.into());
        }
    }

    /// Resolve a gateway, keeping the order of the others
    pub fn remove(&mut self, id: &str) -> Option<OpenGateway> {
        self.gateways.shift_remove(id)
    }

    /// Resolve the oldest gateway
    pub fn pop_oldest(&mut self) -> Option<(String, OpenGateway)> {
        self.gateways.shift_remove_index(0)
    }

    /// Drop every gateway without completed branches, returning their ids in order
    pub fn drain_empty(&mut self) -> Vec<String> {
        let empty: Vec<String> = self
            .gateways
            .iter()
            .filter(|(_, gateway)| gateway.branches.is_empty())
            .map(|(id, _)| id.clone())
            .collect();

        for id in &empty {
            self.gateways.shift_remove(id);
        }
        empty
    }
}
