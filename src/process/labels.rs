// SPDX-License-Identifier: MIT

//! Label extraction
//!
//! Pure functions over a verb's syntactic neighborhood that derive the
//! business object, the actor and the human-readable labels of the element
//! the verb turns into. Fallback chains that climb coordinated or embedding
//! verbs are explicit loops guarded by a visited set.

use std::collections::HashSet;

use crate::nlp::document::{Document, Relation};
use crate::nlp::inflect::Inflector;

use super::markers::MarkerTables;

/// Derives labels for verb occurrences of one document
pub struct LabelExtractor<'a> {
    doc: &'a Document,
    markers: &'a MarkerTables,
    inflector: &'a dyn Inflector,
}

impl<'a> LabelExtractor<'a> {
    pub fn new(doc: &'a Document, markers: &'a MarkerTables, inflector: &'a dyn Inflector) -> Self {
        Self {
            doc,
            markers,
            inflector,
        }
    }

    /// Verb embedding `verb` as an infinitival complement ("needs" in "needs to ship")
    pub fn parent_verb(&self, verb: usize) -> Option<usize> {
        let token = self.doc.token(verb);
        match token.dep {
            Relation::OpenComplement => token.head,
            _ => None,
        }
    }

    /// Verb that `verb` is coordinated with
    pub fn conjunct_verb(&self, verb: usize) -> Option<usize> {
        let token = self.doc.token(verb);
        match token.dep {
            Relation::Conjunct => token.head,
            _ => None,
        }
    }

    /// Whether `verb` governs an infinitival complement
    pub fn is_semi_modal(&self, verb: usize) -> bool {
        self.doc
            .child_with(verb, &Relation::OpenComplement)
            .is_some()
    }

    /// Passive voice, evaluated on the outermost verb of an embedding chain
    pub fn is_passive(&self, verb: usize) -> bool {
        let mut visited = HashSet::from([verb]);
        let mut current = verb;
        while let Some(parent) = self.parent_verb(current) {
            if !visited.insert(parent) {
                break;
            }
            current = parent;
        }

        self.doc
            .child_with(current, &Relation::PassiveAuxiliary)
            .is_some()
            && self.doc.child_with(current, &Relation::PassiveSubject).is_some()
    }

    /// Raw text of the entity acted upon, before cleaning
    pub fn business_object(&self, verb: usize) -> Option<String> {
        let mut visited = HashSet::new();
        let mut current = verb;

        while visited.insert(current) {
            let next = if self.is_passive(current) {
                if let Some(parent) = self.parent_verb(current) {
                    Some(parent)
                } else if let Some(subject) = self.doc.child_with(current, &Relation::PassiveSubject) {
                    return Some(self.join(&[
                        Some(subject.text.clone()),
                        self.prepositional_phrase(current),
                    ]));
                } else {
                    self.conjunct_verb(current)
                }
            } else if let Some(object) = self.doc.child_with(current, &Relation::DirectObject) {
                return Some(self.join(&[
                    Some(object.text.clone()),
                    self.prepositional_phrase(object.index),
                    self.prepositional_phrase(current),
                ]));
            } else if let Some(subject) = self
                .parent_verb(current)
                .and_then(|p| self.doc.child_with(p, &Relation::NominalSubject))
            {
                // Semi-modal wrapper: the outer subject stands in for the object
                return Some(subject.text.clone());
            } else {
                self.conjunct_verb(current)
                    .or_else(|| self.parent_verb(current))
            };

            match next {
                Some(next) => current = next,
                None => break,
            }
        }

        if self.is_passive(verb) {
            None
        } else {
            self.prepositional_phrase(verb)
        }
    }

    /// Raw text of the acting party, before cleaning
    pub fn actor(&self, verb: usize) -> Option<String> {
        let mut visited = HashSet::new();
        let mut current = verb;

        while visited.insert(current) {
            let found = if self.is_passive(current) {
                self.doc
                    .child_with(current, &Relation::Agent)
                    .and_then(|agent| self.doc.child_with(agent.index, &Relation::PrepositionalObject))
            } else {
                self.doc.child_with(current, &Relation::NominalSubject)
            };

            if let Some(token) = found {
                return Some(token.text.clone());
            }

            match self.conjunct_verb(current) {
                Some(next) => current = next,
                None => break,
            }
        }

        None
    }

    /// Grammatical subject of either voice
    pub fn subject(&self, verb: usize) -> Option<String> {
        self.doc
            .child_with(verb, &Relation::NominalSubject)
            .or_else(|| self.doc.child_with(verb, &Relation::PassiveSubject))
            .map(|t| t.text.clone())
    }

    /// All prepositional attachments of `token` that carry content, nested
    /// attachments following their parent depth-first
    pub fn prepositional_phrase(&self, token: usize) -> Option<String> {
        let mut parts = Vec::new();

        for prep in self.doc.children_with(token, &Relation::Preposition) {
            let Some(object) = self.doc.child_with(prep.index, &Relation::PrepositionalObject)
            else {
                continue;
            };

            let phrase = format!("{} {}", prep.text, object.text);
            if self.markers.is_ignored_phrase(&phrase) {
                continue;
            }

            parts.push(phrase);
            if let Some(nested) = self.prepositional_phrase(object.index) {
                parts.push(nested);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Phrasal verb particle ("in" of "hand in")
    pub fn particle(&self, verb: usize) -> Option<String> {
        self.doc
            .child_with(verb, &Relation::Particle)
            .map(|t| t.text.clone())
    }

    /// "<object> <participle> <particle>", e.g. "Product ordered"
    pub fn event_label(&self, verb: usize) -> String {
        let token = self.doc.token(verb);
        let object = self.business_object(verb).or_else(|| self.subject(verb));

        self.sentence_case(&self.clean(&self.join(&[
            object,
            Some(self.inflector.past_participle(&token.lemma)),
            self.particle(verb),
        ])))
    }

    /// "<verb> <particle> <object>", e.g. "Ship product"
    pub fn task_label(&self, verb: usize) -> String {
        let token = self.doc.token(verb);

        self.sentence_case(&self.clean(&self.join(&[
            Some(token.lemma.to_lowercase()),
            self.particle(verb),
            self.business_object(verb),
        ])))
    }

    /// The clause dominated by `verb`, fillers stripped, as a question
    pub fn conditional_label(&self, verb: usize) -> String {
        let (left, right) = self.doc.subtree_bounds(verb);
        let span = self.doc.span_text(left..right + 1);
        let stripped = self.strip_fillers(&span);
        let label = self.sentence_case(&self.clean(&stripped));
        let label = label.trim_end_matches(|c: char| c.is_ascii_punctuation());

        if label.is_empty() {
            String::new()
        } else {
            format!("{}?", label)
        }
    }

    /// Cleaned, title-cased actor, `None` when nothing usable remains
    pub fn actor_label(&self, verb: usize) -> Option<String> {
        let actor = self.title_case(&self.clean(&self.actor(verb)?));
        (!actor.is_empty()).then_some(actor)
    }

    fn join(&self, parts: &[Option<String>]) -> String {
        parts
            .iter()
            .flatten()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drop stopwords and collapse whitespace
    pub fn clean(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|w| !self.markers.is_stopword(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn strip_fillers(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let fillers: Vec<Vec<String>> = self
            .markers
            .conditional_fillers
            .iter()
            .map(|f| f.split_whitespace().map(|w| w.to_lowercase()).collect())
            .filter(|f: &Vec<String>| !f.is_empty())
            .collect();

        let mut kept = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            let matched = fillers.iter().find(|filler| {
                i + filler.len() <= words.len()
                    && filler
                        .iter()
                        .zip(&words[i..])
                        .all(|(f, w)| w.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase() == *f)
            });

            match matched {
                Some(filler) => i += filler.len(),
                None => {
                    kept.push(words[i]);
                    i += 1;
                }
            }
        }

        kept.join(" ")
    }

    fn sentence_case(&self, text: &str) -> String {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Capitalize each word, leaving all-uppercase words (acronyms) alone
    fn title_case(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| {
                if word.chars().any(|c| c.is_alphabetic()) && word == word.to_uppercase() {
                    word.to_string()
                } else {
                    self.sentence_case(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
