// SPDX-License-Identifier: MIT

//! Graph assembly
//!
//! Folds an ordered trigger list into process elements. The state is the
//! current actor, the predecessor (last element identifier) and the table of
//! split gateways still waiting for their join.

use std::collections::HashMap;

use crate::nlp::document::Document;
use crate::nlp::inflect::Inflector;

use super::classifier::{Trigger, TriggerCategory};
use super::element::{ElementCategory, ProcessElement, DEFAULT_ACTOR};
use super::gateways::{GatewayKind, OpenGateway, OpenGateways};
use super::labels::LabelExtractor;
use super::markers::MarkerTables;

const PROCESS_TERMINATED: &str = "Process terminated";

pub struct GraphAssembler<'a> {
    doc: &'a Document,
    labels: LabelExtractor<'a>,
    elements: Vec<ProcessElement>,
    /// Verb each start, task and intermediate element was derived from
    origins: HashMap<String, usize>,
    actor: String,
    predecessor: Option<String>,
    open_gateways: OpenGateways,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(doc: &'a Document, markers: &'a MarkerTables, inflector: &'a dyn Inflector) -> Self {
        Self {
            doc,
            labels: LabelExtractor::new(doc, markers, inflector),
            elements: Vec::new(),
            origins: HashMap::new(),
            actor: DEFAULT_ACTOR.to_string(),
            predecessor: None,
            open_gateways: OpenGateways::new(),
        }
    }

    /// Assemble a whole trigger list
    pub fn assemble(mut self, triggers: &[Trigger]) -> Vec<ProcessElement> {
        for trigger in triggers {
            self.step(trigger);
        }
        self.finish()
    }

    pub fn elements(&self) -> &[ProcessElement] {
        &self.elements
    }

    pub fn predecessor(&self) -> Option<&str> {
        self.predecessor.as_deref()
    }

    pub fn open_gateways(&self) -> &OpenGateways {
        &self.open_gateways
    }

    /// Apply one trigger
    pub fn step(&mut self, trigger: &Trigger) {
        match trigger.category {
            TriggerCategory::StartEvent
            | TriggerCategory::Task
            | TriggerCategory::IntermediateEvent => self.activity(trigger),
            TriggerCategory::SplitExclusiveGateway => {
                self.split(GatewayKind::Exclusive, trigger.verb)
            }
            TriggerCategory::SplitParallelGateway => self.split(GatewayKind::Parallel, trigger.verb),
            TriggerCategory::SequenceFlowChange => self.flow_change(trigger.verb),
            TriggerCategory::JoinGateway => self.join(trigger.verb),
            TriggerCategory::EndEvent => self.terminate(trigger.verb),
        }
    }

    /// Resolve every gateway still open and hand out the elements
    pub fn finish(mut self) -> Vec<ProcessElement> {
        let had_open = !self.open_gateways.is_empty();

        if let (Some(active), Some(predecessor)) =
            (self.open_gateways.active_id(), self.predecessor.clone())
        {
            if predecessor != active {
                self.open_gateways.push_branch(&active, predecessor);
            }
        }

        while let Some((id, gateway)) = self.open_gateways.pop_oldest() {
            match gateway.kind {
                GatewayKind::Exclusive => {
                    for terminal in &gateway.branches {
                        self.end_after(terminal);
                    }
                }
                GatewayKind::Parallel => self.close_parallel(&id, gateway),
            }
        }

        if !had_open {
            if let Some(predecessor) = self.predecessor.clone() {
                let ended = self
                    .find(&predecessor)
                    .map_or(true, |e| e.category == ElementCategory::EndEvent);
                if !ended {
                    self.end_after(&predecessor);
                }
            }
        }

        log::info!("Assembled {} process elements", self.elements.len());
        self.elements
    }

    fn activity(&mut self, trigger: &Trigger) {
        let verb = trigger.verb;

        if !trigger.implicit {
            if let Some(actor) = self.labels.actor_label(verb) {
                self.actor = actor;
            }
        }

        let (category, value) = match trigger.category {
            TriggerCategory::StartEvent if trigger.implicit => {
                (ElementCategory::StartEvent, String::new())
            }
            TriggerCategory::StartEvent => (ElementCategory::StartEvent, self.labels.event_label(verb)),
            TriggerCategory::IntermediateEvent => (
                ElementCategory::IntermediateThrowEvent,
                self.labels.event_label(verb),
            ),
            _ => (ElementCategory::Task, self.labels.task_label(verb)),
        };

        let id = format!("{}_{}", category, verb);
        if !trigger.implicit {
            self.origins.insert(id.clone(), verb);
        }
        self.push_node(category, id, value);
    }

    fn split(&mut self, kind: GatewayKind, verb: usize) {
        let id = format!("{}_{}", kind.prefix(), verb);
        let value = match kind {
            GatewayKind::Exclusive => self.labels.conditional_label(verb),
            GatewayKind::Parallel => String::new(),
        };

        self.push_node(kind.category(), id.clone(), value);
        self.open_gateways.open(id, kind);
    }

    fn flow_change(&mut self, verb: usize) {
        let Some(active) = self.open_gateways.active_id() else {
            log::debug!(
                "Ignoring flow change at '{}': no open gateway",
                self.doc.token(verb).text
            );
            return;
        };

        if let Some(predecessor) = self.predecessor.take() {
            self.open_gateways.push_branch(&active, predecessor);
        }
        self.predecessor = Some(active);
    }

    fn join(&mut self, verb: usize) {
        let Some(active) = self.open_gateways.active_id() else {
            log::debug!(
                "Ignoring join at '{}': no open gateway",
                self.doc.token(verb).text
            );
            return;
        };

        if let Some(predecessor) = self.predecessor.take() {
            self.open_gateways.push_branch(&active, predecessor);
        }
        if let Some(gateway) = self.open_gateways.remove(&active) {
            let id = format!("{}_Join_{}", gateway.kind.prefix(), verb);
            self.push_join(gateway.kind, id, gateway.branches);
        }
    }

    fn terminate(&mut self, verb: usize) {
        let value = self.labels.event_label(verb);
        let end_id = format!("EndEvent_{}", verb);

        let active = self
            .open_gateways
            .active()
            .map(|(id, kind)| (id.to_string(), kind));

        match active {
            None => {
                self.push_node(ElementCategory::EndEvent, end_id, value);
                return;
            }
            Some((gateway_id, GatewayKind::Parallel)) => {
                if let Some(predecessor) = self.predecessor.take() {
                    self.open_gateways.push_branch(&gateway_id, predecessor);
                }
                if let Some(gateway) = self.open_gateways.remove(&gateway_id) {
                    let join_id = format!("ParallelGateway_Join_{}", verb);
                    self.push_join(GatewayKind::Parallel, join_id, gateway.branches);
                }
                self.push_node(ElementCategory::EndEvent, end_id, value);
                if let Some(enclosing) = self.open_gateways.active_id() {
                    self.predecessor = Some(enclosing);
                }
            }
            Some((gateway_id, GatewayKind::Exclusive)) => {
                self.push_node(ElementCategory::EndEvent, end_id, value);
                self.predecessor = Some(gateway_id);
            }
        }

        for dropped in self.open_gateways.drain_empty() {
            log::debug!("Dropping gateway '{}' without completed branches", dropped);
            self.predecessor = Some(dropped);
        }
    }

    fn close_parallel(&mut self, id: &str, gateway: OpenGateway) {
        let first = self
            .elements
            .iter()
            .find(|e| gateway.branches.contains(&e.identifier))
            .map(|e| (e.identifier.clone(), e.actor.clone()));

        let Some((first_id, actor)) = first else {
            log::debug!("Parallel gateway '{}' closed without branches", id);
            return;
        };

        let join_id = format!("ParallelGateway_Join_{}", first_id);
        let end_id = format!("EndEvent_{}", join_id);
        self.elements.push(ProcessElement::join(
            ElementCategory::ParallelGateway,
            join_id.clone(),
            actor.clone(),
            gateway.branches,
        ));
        self.elements.push(ProcessElement::node(
            ElementCategory::EndEvent,
            end_id,
            PROCESS_TERMINATED,
            actor,
            Some(join_id),
        ));
    }

    /// Insert a synthetic end event right after `terminal`
    fn end_after(&mut self, terminal: &str) {
        let end_id = format!("EndEvent_{}", terminal);
        if self.find(&end_id).is_some() {
            return;
        }

        let Some(position) = self.elements.iter().position(|e| e.identifier == terminal) else {
            log::debug!("Branch terminal '{}' is not an element", terminal);
            return;
        };

        let element = &self.elements[position];
        if element.category == ElementCategory::EndEvent {
            return;
        }

        let value = match self.origins.get(terminal) {
            Some(&verb) => self.labels.event_label(verb),
            None => element.value.clone(),
        };
        let end = ProcessElement::node(
            ElementCategory::EndEvent,
            end_id,
            value,
            element.actor.clone(),
            Some(terminal.to_string()),
        );
        self.elements.insert(position + 1, end);
    }

    fn find(&self, id: &str) -> Option<&ProcessElement> {
        self.elements.iter().find(|e| e.identifier == id)
    }

    fn push_node(&mut self, category: ElementCategory, id: String, value: String) {
        log::debug!("{} '{}': {}", category, id, value);
        self.elements.push(ProcessElement::node(
            category,
            id.clone(),
            value,
            self.actor.clone(),
            self.predecessor.take(),
        ));
        self.predecessor = Some(id);
    }

    fn push_join(&mut self, kind: GatewayKind, id: String, branches: Vec<String>) {
        log::debug!("Join '{}' over {:?}", id, branches);
        self.elements.push(ProcessElement::join(
            kind.category(),
            id.clone(),
            self.actor.clone(),
            branches,
        ));
        self.predecessor = Some(id);
    }
}
