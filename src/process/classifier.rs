// SPDX-License-Identifier: MIT

//! Trigger classification
//!
//! Scans every verb in document order and decides which kind of process
//! element it announces. Detectors are stateless lookups against the marker
//! tables combined with the verb's local dependency relations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::nlp::document::{Document, Relation};
use crate::nlp::inflect::Inflector;

use super::labels::LabelExtractor;
use super::markers::MarkerTables;

/// Process-element category announced by a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    StartEvent,
    Task,
    IntermediateEvent,
    SplitExclusiveGateway,
    SplitParallelGateway,
    SequenceFlowChange,
    JoinGateway,
    EndEvent,
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartEvent => "start_event",
            Self::Task => "task",
            Self::IntermediateEvent => "intermediate_event",
            Self::SplitExclusiveGateway => "split_exclusive_gateway",
            Self::SplitParallelGateway => "split_parallel_gateway",
            Self::SequenceFlowChange => "sequence_flow_change",
            Self::JoinGateway => "join_gateway",
            Self::EndEvent => "end_event",
        };
        write!(f, "{}", name)
    }
}

/// A classified verb occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub category: TriggerCategory,
    /// Token index of the verb
    pub verb: usize,
    /// Synthesized start event placed in front of a leading structural trigger
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
}

impl Trigger {
    pub fn new(category: TriggerCategory, verb: usize) -> Self {
        Self {
            category,
            verb,
            implicit: false,
        }
    }

    fn implicit_start(verb: usize) -> Self {
        Self {
            category: TriggerCategory::StartEvent,
            verb,
            implicit: true,
        }
    }
}

/// Classifies the verbs of one document into triggers
pub struct TriggerClassifier<'a> {
    doc: &'a Document,
    markers: &'a MarkerTables,
    labels: LabelExtractor<'a>,
}

impl<'a> TriggerClassifier<'a> {
    pub fn new(doc: &'a Document, markers: &'a MarkerTables, inflector: &'a dyn Inflector) -> Self {
        Self {
            doc,
            markers,
            labels: LabelExtractor::new(doc, markers, inflector),
        }
    }

    /// Ordered trigger list for the whole document
    pub fn classify(&self) -> Vec<Trigger> {
        use TriggerCategory::*;

        let mut triggers: Vec<Trigger> = Vec::new();

        for token in self.doc.verbs() {
            let verb = token.index;

            if let Some(carrier) = self.exclusive_gateway(verb) {
                if carrier == verb {
                    triggers.push(Trigger::new(SplitExclusiveGateway, verb));
                } else {
                    log::debug!(
                        "'{}' belongs to the condition carried by '{}'",
                        token.text,
                        self.doc.token(carrier).text
                    );
                }
                continue;
            }

            if self.parallel_gateway(verb) {
                // The preceding activity becomes the first parallel branch
                let at = triggers.len().saturating_sub(1);
                triggers.insert(at, Trigger::new(SplitParallelGateway, verb));
                triggers.push(Trigger::new(SequenceFlowChange, verb));
            }

            if self.sequence_flow_change(verb) {
                triggers.push(Trigger::new(SequenceFlowChange, verb));
            }

            if self.join_gateway(verb) {
                triggers.push(Trigger::new(JoinGateway, verb));
                continue;
            }

            if self.process_termination(verb) {
                triggers.push(Trigger::new(EndEvent, verb));
                continue;
            }

            if self.intermediate_event(verb) {
                triggers.push(Trigger::new(IntermediateEvent, verb));
                continue;
            }

            if self.labels.is_semi_modal(verb) {
                continue;
            }

            if self.labels.business_object(verb).is_some() {
                triggers.push(Trigger::new(Task, verb));
            } else {
                log::debug!("Dropping '{}': no business object", token.text);
            }
        }

        mark_start(&mut triggers);
        triggers
    }

    /// The verb carrying an exclusive marker for `verb`, found on the verb
    /// itself, up its embedding and coordination chain, or on the sentence root
    pub fn exclusive_gateway(&self, verb: usize) -> Option<usize> {
        let mut visited = HashSet::new();
        let mut current = verb;

        while visited.insert(current) {
            if self.has_child(current, &Relation::Marker, |m| self.markers.is_exclusive(m)) {
                return Some(current);
            }

            match self
                .labels
                .parent_verb(current)
                .or_else(|| self.labels.conjunct_verb(current))
            {
                Some(next) => current = next,
                None => break,
            }
        }

        // The root's own clause is the consequence, never the condition
        if self.doc.is_sentence_root(current) {
            return None;
        }

        let root = self.doc.sentence_root(self.doc.token(current).sentence)?;
        self.marker_phrase(root.index)
            .filter(|phrase| self.markers.is_exclusive(phrase))
            .map(|_| current)
    }

    pub fn parallel_gateway(&self, verb: usize) -> bool {
        let is_parallel = |m: &str| self.markers.is_parallel(m);

        self.has_child(verb, &Relation::Marker, is_parallel)
            || self.has_child(verb, &Relation::AdverbialModifier, is_parallel)
            || self.marker_phrase(verb).is_some_and(|p| is_parallel(&p))
    }

    pub fn sequence_flow_change(&self, verb: usize) -> bool {
        let is_change = |m: &str| self.markers.is_flow_change(m);

        self.has_child(verb, &Relation::AdverbialModifier, is_change)
            || self.marker_phrase(verb).is_some_and(|p| is_change(&p))
    }

    pub fn join_gateway(&self, verb: usize) -> bool {
        let token = self.doc.token(verb);
        if !self.markers.is_join_verb(&token.lemma) {
            return false;
        }

        if self.has_child(verb, &Relation::PassiveSubject, |s| self.markers.is_join(s)) {
            return true;
        }

        // A leading phrase such as "After these activities, ..." governed by the verb
        let start = self.doc.sentence_range(token.sentence).start;
        token.children.contains(&start)
            && self.markers.mentions_join(&self.doc.span_text(start..verb))
    }

    pub fn process_termination(&self, verb: usize) -> bool {
        self.markers.is_termination_verb(&self.doc.token(verb).lemma)
            && self.has_child(verb, &Relation::NominalSubject, |s| {
                self.markers.is_termination(s)
            })
    }

    pub fn intermediate_event(&self, verb: usize) -> bool {
        self.has_child(verb, &Relation::Marker, |m| self.markers.is_intermediate(m))
    }

    /// "<preposition> <object>" of the first prepositional attachment, lowercased
    fn marker_phrase(&self, verb: usize) -> Option<String> {
        let prep = self.doc.child_with(verb, &Relation::Preposition)?;
        let object = self
            .doc
            .child_with(prep.index, &Relation::PrepositionalObject)?;
        Some(format!("{} {}", prep.text, object.text).to_lowercase())
    }

    fn has_child(&self, verb: usize, relation: &Relation, matches: impl Fn(&str) -> bool) -> bool {
        self.doc
            .children_with(verb, relation)
            .any(|child| matches(&child.text))
    }
}

/// The first trigger becomes the start event. A leading structural trigger
/// keeps its meaning and gets an implicit start event in front of it.
fn mark_start(triggers: &mut Vec<Trigger>) {
    let Some(first) = triggers.first_mut() else {
        return;
    };

    match first.category {
        TriggerCategory::StartEvent => {}
        TriggerCategory::Task | TriggerCategory::IntermediateEvent => {
            first.category = TriggerCategory::StartEvent;
        }
        _ => {
            let verb = first.verb;
            triggers.insert(0, Trigger::implicit_start(verb));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::inflect::EnglishInflector;
    use crate::process::fixtures::*;
    use super::TriggerCategory::*;

    fn classify(doc: &Document) -> Vec<(TriggerCategory, usize)> {
        let markers = MarkerTables::default();
        let inflector = EnglishInflector::new();
        TriggerClassifier::new(doc, &markers, &inflector)
            .classify()
            .into_iter()
            .map(|t| (t.category, t.verb))
            .collect()
    }

    #[test]
    fn test_sequential_tasks() {
        assert_eq!(
            classify(&order_and_ship()),
            vec![(StartEvent, 1), (Task, 5)]
        );
    }

    #[test]
    fn test_exclusive_gateway_with_alternative() {
        assert_eq!(
            classify(&payment_choice()),
            vec![
                (StartEvent, 2),
                (SplitExclusiveGateway, 2),
                (Task, 6),
                (SequenceFlowChange, 12),
                (Task, 12),
            ]
        );
    }

    #[test]
    fn test_parallel_gateway_inserted_before_previous_activity() {
        assert_eq!(
            classify(&concurrent_review()),
            vec![
                (StartEvent, 5),
                (SplitParallelGateway, 5),
                (Task, 1),
                (SequenceFlowChange, 5),
                (Task, 5),
            ]
        );
    }

    #[test]
    fn test_join_detected_from_passive_subject() {
        let triggers = classify(&concurrent_review_joined());
        assert_eq!(triggers.last(), Some(&(JoinGateway, 13)));
    }

    #[test]
    fn test_join_detected_from_leading_phrase() {
        // "After each of these activities, the clerk completes it." is not a
        // passive; the leading phrase announces the join
        let doc = doc(vec![vec![
            t("After", "after", "ADP", "prep", Some(6)),
            t("each", "each", "PRON", "pobj", Some(0)),
            t("of", "of", "ADP", "prep", Some(1)),
            tn("these activities", "these activity", "NOUN", "pobj", Some(2)),
            comma(6),
            t("the clerk", "the clerk", "NOUN", "nsubj", Some(6)),
            t("completes", "complete", "VERB", "ROOT", None),
            tn("it", "it", "PRON", "dobj", Some(6)),
            punct(6),
        ]]);
        let markers = MarkerTables::default();
        let inflector = EnglishInflector::new();
        let classifier = TriggerClassifier::new(&doc, &markers, &inflector);
        assert!(classifier.join_gateway(6));
    }

    #[test]
    fn test_termination_and_intermediate_event() {
        assert_eq!(
            classify(&payment_termination()),
            vec![
                (StartEvent, 2),
                (SplitExclusiveGateway, 2),
                (EndEvent, 5),
                (SequenceFlowChange, 11),
                (Task, 11),
            ]
        );
        assert_eq!(
            classify(&approval_event()),
            vec![(StartEvent, 1), (IntermediateEvent, 6), (Task, 10)]
        );
    }

    #[test]
    fn test_semi_modal_delegates_to_complement() {
        assert_eq!(classify(&semi_modal()), vec![(StartEvent, 3)]);
    }

    #[test]
    fn test_condition_carried_by_embedding_verb() {
        // "If the customer wants to pay by card, the clerk prints a receipt."
        let doc = doc(vec![vec![
            t("If", "if", "SCONJ", "mark", Some(2)),
            t("the customer", "the customer", "NOUN", "nsubj", Some(2)),
            t("wants", "want", "VERB", "advcl", Some(9)),
            t("to", "to", "PART", "aux", Some(4)),
            t("pay", "pay", "VERB", "xcomp", Some(2)),
            t("by", "by", "ADP", "prep", Some(4)),
            tn("card", "card", "NOUN", "pobj", Some(5)),
            comma(9),
            t("the clerk", "the clerk", "NOUN", "nsubj", Some(9)),
            t("prints", "print", "VERB", "ROOT", None),
            tn("a receipt", "a receipt", "NOUN", "dobj", Some(9)),
            punct(9),
        ]]);
        assert_eq!(
            classify(&doc),
            vec![(StartEvent, 2), (SplitExclusiveGateway, 2), (Task, 9)]
        );
    }

    #[test]
    fn test_condition_from_root_phrase() {
        // "In case the stock runs out, the manager orders goods."
        let doc = doc(vec![vec![
            t("In", "in", "ADP", "prep", Some(7)),
            t("case", "case", "NOUN", "pobj", Some(0)),
            t("the stock", "the stock", "NOUN", "nsubj", Some(3)),
            t("runs", "run", "VERB", "acl", Some(1)),
            tn("out", "out", "ADP", "prt", Some(3)),
            comma(7),
            t("the manager", "the manager", "NOUN", "nsubj", Some(7)),
            t("orders", "order", "VERB", "ROOT", None),
            tn("goods", "goods", "NOUN", "dobj", Some(7)),
            punct(7),
        ]]);
        let markers = MarkerTables::default();
        let inflector = EnglishInflector::new();
        let classifier = TriggerClassifier::new(&doc, &markers, &inflector);
        assert_eq!(classifier.exclusive_gateway(3), Some(3));
        assert_eq!(classifier.exclusive_gateway(7), None);
    }

    #[test]
    fn test_root_phrase_condition_with_coordinated_verbs() {
        // "In case the stock runs out and the supplier fails, the manager orders goods."
        let doc = doc(vec![vec![
            t("In", "in", "ADP", "prep", Some(10)),
            t("case", "case", "NOUN", "pobj", Some(0)),
            t("the stock", "the stock", "NOUN", "nsubj", Some(3)),
            t("runs", "run", "VERB", "acl", Some(1)),
            t("out", "out", "ADP", "prt", Some(3)),
            t("and", "and", "CCONJ", "cc", Some(3)),
            t("the supplier", "the supplier", "NOUN", "nsubj", Some(7)),
            tn("fails", "fail", "VERB", "conj", Some(3)),
            comma(10),
            t("the manager", "the manager", "NOUN", "nsubj", Some(10)),
            t("orders", "order", "VERB", "ROOT", None),
            tn("goods", "goods", "NOUN", "dobj", Some(10)),
            punct(10),
        ]]);

        let markers = MarkerTables::default();
        let inflector = EnglishInflector::new();
        let classifier = TriggerClassifier::new(&doc, &markers, &inflector);
        assert_eq!(classifier.exclusive_gateway(7), Some(3));

        assert_eq!(
            classify(&doc),
            vec![(StartEvent, 3), (SplitExclusiveGateway, 3), (Task, 10)]
        );
    }

    #[test]
    fn test_root_phrase_leaves_root_conjunct_alone() {
        // "In case of damage, the clerk checks the order and returns it."
        let doc = doc(vec![vec![
            t("In", "in", "ADP", "prep", Some(6)),
            t("case", "case", "NOUN", "pobj", Some(0)),
            t("of", "of", "ADP", "prep", Some(1)),
            tn("damage", "damage", "NOUN", "pobj", Some(2)),
            comma(6),
            t("the clerk", "the clerk", "NOUN", "nsubj", Some(6)),
            t("checks", "check", "VERB", "ROOT", None),
            t("the order", "the order", "NOUN", "dobj", Some(6)),
            t("and", "and", "CCONJ", "cc", Some(6)),
            t("returns", "return", "VERB", "conj", Some(6)),
            tn("it", "it", "PRON", "dobj", Some(9)),
            punct(6),
        ]]);

        let markers = MarkerTables::default();
        let inflector = EnglishInflector::new();
        let classifier = TriggerClassifier::new(&doc, &markers, &inflector);
        assert_eq!(classifier.exclusive_gateway(9), None);

        assert_eq!(classify(&doc), vec![(StartEvent, 6), (Task, 9)]);
    }

    #[test]
    fn test_verb_without_object_dropped() {
        // "The clerk waits."
        let doc = doc(vec![vec![
            t("The clerk", "the clerk", "NOUN", "nsubj", Some(1)),
            tn("waits", "wait", "VERB", "ROOT", None),
            punct(1),
        ]]);
        assert!(classify(&doc).is_empty());
    }

    #[test]
    fn test_mark_start_variants() {
        let mut empty: Vec<Trigger> = vec![];
        mark_start(&mut empty);
        assert!(empty.is_empty());

        let mut leading_join = vec![Trigger::new(JoinGateway, 4)];
        mark_start(&mut leading_join);
        assert_eq!(leading_join.len(), 2);
        assert_eq!(leading_join[0].category, StartEvent);
        assert!(leading_join[0].implicit);
        assert_eq!(leading_join[1].category, JoinGateway);
    }
}
