// SPDX-License-Identifier: MIT

//! Process element records
//!
//! The serialized form is what renderers consume:
//! `{category, identifier, value, actor, predecessor}` for ordinary elements
//! and `{..., predecessors}` for joins. The two keys never appear together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default actor until a text names one
pub const DEFAULT_ACTOR: &str = "Default";

/// BPMN element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementCategory {
    StartEvent,
    Task,
    IntermediateThrowEvent,
    ExclusiveGateway,
    ParallelGateway,
    EndEvent,
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartEvent => "StartEvent",
            Self::Task => "Task",
            Self::IntermediateThrowEvent => "IntermediateThrowEvent",
            Self::ExclusiveGateway => "ExclusiveGateway",
            Self::ParallelGateway => "ParallelGateway",
            Self::EndEvent => "EndEvent",
        };
        write!(f, "{}", name)
    }
}

/// Incoming sequence flow of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Incoming {
    /// Single predecessor, `None` only for the first element
    Predecessor(Option<String>),
    /// Terminal elements of every merged branch
    Predecessors(Vec<String>),
}

/// One node of the extracted process graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessElement {
    pub category: ElementCategory,
    pub identifier: String,
    pub value: String,
    pub actor: String,
    #[serde(flatten)]
    pub incoming: Incoming,
}

impl ProcessElement {
    /// Element with a single predecessor
    pub fn node(
        category: ElementCategory,
        identifier: impl Into<String>,
        value: impl Into<String>,
        actor: impl Into<String>,
        predecessor: Option<String>,
    ) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            value: value.into(),
            actor: actor.into(),
            incoming: Incoming::Predecessor(predecessor),
        }
    }

    /// Join element merging several branches
    pub fn join(
        category: ElementCategory,
        identifier: impl Into<String>,
        actor: impl Into<String>,
        predecessors: Vec<String>,
    ) -> Self {
        Self {
            category,
            identifier: identifier.into(),
            value: String::new(),
            actor: actor.into(),
            incoming: Incoming::Predecessors(predecessors),
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(self.incoming, Incoming::Predecessors(_))
    }

    /// Single predecessor of a non-join element
    pub fn predecessor(&self) -> Option<&str> {
        match &self.incoming {
            Incoming::Predecessor(p) => p.as_deref(),
            Incoming::Predecessors(_) => None,
        }
    }

    /// Every incoming identifier, regardless of element kind
    pub fn predecessors(&self) -> Vec<&str> {
        match &self.incoming {
            Incoming::Predecessor(p) => p.iter().map(|s| s.as_str()).collect(),
            Incoming::Predecessors(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }
}
