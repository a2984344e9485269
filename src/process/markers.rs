// SPDX-License-Identifier: MIT

//! Lexical marker tables
//!
//! Fixed phrase and lemma sets that identify the linguistic cues behind each
//! process element. The tables are plain configuration injected into the
//! engine, so independent engines can run with different vocabularies.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Text2BpmnError;

/// Marker phrases and verb lemmas used by the classifier and label extractor
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerTables {
    /// Introduce an exclusive choice ("if", "in case")
    pub exclusive: Vec<String>,
    /// Introduce concurrent activities ("while", "at the same time")
    pub parallel: Vec<String>,
    /// Switch to the next alternative of the open gateway ("otherwise")
    pub flow_change: Vec<String>,
    /// Subjects announcing that branches merge ("the flow")
    pub join: Vec<String>,
    /// Verb lemmas that can carry a join
    pub join_verbs: Vec<String>,
    /// Subjects announcing termination ("the process")
    pub termination: Vec<String>,
    /// Verb lemmas that can carry a termination
    pub termination_verbs: Vec<String>,
    /// Subordinating conjunctions introducing an intermediate event ("once")
    pub intermediate: Vec<String>,
    /// Words removed from every label
    pub stopwords: Vec<String>,
    /// Prepositional phrases that are structural cues rather than content
    pub ignored_phrases: Vec<String>,
    /// Phrases stripped from conditional labels
    pub conditional_fillers: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for MarkerTables {
    fn default() -> Self {
        let exclusive = ["if", "in case", "in the case", "for the case", "whether"];

        Self {
            exclusive: strings(&exclusive),
            parallel: strings(&["while", "at the same time", "meanwhile", "in the meantime"]),
            flow_change: strings(&["otherwise", "in the other case", "else"]),
            join: strings(&[
                "the sequence flow",
                "the flow",
                "once one of these activities",
                "once these activities",
                "after each of these activities",
                "after these activities",
            ]),
            join_verbs: strings(&["merge", "perform", "complete", "execute"]),
            termination: strings(&[
                "the business process",
                "this business process",
                "the process",
                "this process",
            ]),
            termination_verbs: strings(&["end", "finish", "stop", "terminate"]),
            intermediate: strings(&["once", "after", "as soon as"]),
            stopwords: strings(&[
                "a", "an", "the", "this", "that", "these", "those", "it", "its", "they", "them",
                "their", "he", "him", "his", "she", "her", "we", "our", "you", "your",
            ]),
            ignored_phrases: strings(&[
                "in case",
                "in the case",
                "for the case",
                "at the same time",
                "in the meantime",
                "in the other case",
            ]),
            conditional_fillers: strings(&exclusive),
        }
    }
}

fn contains(set: &[String], phrase: &str) -> bool {
    let phrase = phrase.trim();
    set.iter().any(|m| m.eq_ignore_ascii_case(phrase))
}

impl MarkerTables {
    /// Parse tables from YAML; omitted tables keep their defaults
    pub fn from_yaml(content: &str) -> Result<Self, Text2BpmnError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load tables from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Text2BpmnError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn is_exclusive(&self, phrase: &str) -> bool {
        contains(&self.exclusive, phrase)
    }

    pub fn is_parallel(&self, phrase: &str) -> bool {
        contains(&self.parallel, phrase)
    }

    pub fn is_flow_change(&self, phrase: &str) -> bool {
        contains(&self.flow_change, phrase)
    }

    pub fn is_join(&self, phrase: &str) -> bool {
        contains(&self.join, phrase)
    }

    /// Whether `text` contains any join marker as a substring
    pub fn mentions_join(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.join.iter().any(|m| text.contains(&m.to_lowercase()))
    }

    pub fn is_join_verb(&self, lemma: &str) -> bool {
        contains(&self.join_verbs, lemma)
    }

    pub fn is_termination(&self, phrase: &str) -> bool {
        contains(&self.termination, phrase)
    }

    pub fn is_termination_verb(&self, lemma: &str) -> bool {
        contains(&self.termination_verbs, lemma)
    }

    pub fn is_intermediate(&self, phrase: &str) -> bool {
        contains(&self.intermediate, phrase)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        contains(&self.stopwords, word)
    }

    pub fn is_ignored_phrase(&self, phrase: &str) -> bool {
        contains(&self.ignored_phrases, phrase)
    }
}
