// SPDX-License-Identifier: MIT

//! Process extraction engine
//!
//! - [markers] - configurable lexical marker tables
//! - [labels] - business object, actor and label derivation
//! - [classifier] - verb to trigger classification
//! - [assembler] - trigger list to element graph
//! - [extractor] - engine and text-level entry point

pub mod assembler;
pub mod classifier;
pub mod element;
pub mod extractor;
pub mod gateways;
pub mod labels;
pub mod markers;

#[cfg(test)]
mod fixtures;

pub use assembler::GraphAssembler;
pub use classifier::{Trigger, TriggerCategory, TriggerClassifier};
pub use element::{ElementCategory, Incoming, ProcessElement};
pub use extractor::{Engine, ProcessExtractor};
pub use gateways::{GatewayKind, OpenGateways};
pub use labels::LabelExtractor;
pub use markers::MarkerTables;
