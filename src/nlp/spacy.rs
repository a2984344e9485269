// SPDX-License-Identifier: MIT

//! spaCy `Doc.to_json()` interchange format
//!
//! Offsets in this format are character offsets into `text`; token text and
//! trailing whitespace are recovered by slicing the original string.

use serde::{Deserialize, Serialize};

use super::document::{Document, PartOfSpeech, Relation, TokenData};
use crate::error::AnnotationError;

/// A document as serialized by spaCy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpacyDoc {
    pub text: String,
    pub tokens: Vec<SpacyToken>,
    #[serde(default)]
    pub sents: Vec<SpacySpan>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpacyToken {
    pub id: usize,
    pub start: usize,
    pub end: usize,
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub lemma: String,
    pub dep: Relation,
    pub head: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SpacySpan {
    pub start: usize,
    pub end: usize,
}

impl SpacyDoc {
    /// Parse a spaCy JSON payload
    pub fn from_json(content: &str) -> Result<Self, AnnotationError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Convert into the token arena
    pub fn into_document(self) -> Result<Document, AnnotationError> {
        if self.tokens.is_empty() {
            return Err(AnnotationError::EmptyDocument);
        }

        let chars: Vec<char> = self.text.chars().collect();
        let slice = |token: usize, start: usize, end: usize| {
            if start > end || end > chars.len() {
                return Err(AnnotationError::InvalidOffset { token, start, end });
            }
            Ok(chars[start..end].iter().collect::<String>())
        };

        let mut data = Vec::with_capacity(self.tokens.len());
        for (i, token) in self.tokens.iter().enumerate() {
            if token.id != i {
                return Err(AnnotationError::Decode(format!(
                    "token at position {} has id {}",
                    i, token.id
                )));
            }

            let text = slice(i, token.start, token.end)?;
            let gap_end = self.tokens.get(i + 1).map_or(chars.len(), |next| next.start);
            let whitespace = slice(i, token.end, gap_end.max(token.end))?;
            let lemma = if token.lemma.is_empty() {
                text.to_lowercase()
            } else {
                token.lemma.clone()
            };

            data.push(TokenData {
                text,
                whitespace,
                lemma,
                pos: token.pos.clone(),
                dep: token.dep.clone(),
                head: (token.head != token.id).then_some(token.head),
            });
        }

        let sentences = self.sentence_ranges()?;
        Document::new(data, sentences)
    }

    /// Map character-offset sentences to token ranges. Without explicit
    /// sentences, every root starts a new one.
    fn sentence_ranges(&self) -> Result<Vec<std::ops::Range<usize>>, AnnotationError> {
        if self.sents.is_empty() {
            return Ok(self.root_sentences());
        }

        let mut ranges = Vec::with_capacity(self.sents.len());
        for span in &self.sents {
            let first = self.tokens.iter().position(|t| t.start >= span.start);
            let last = self.tokens.iter().rposition(|t| t.end <= span.end);
            match (first, last) {
                (Some(first), Some(last)) if first <= last => ranges.push(first..last + 1),
                _ => {
                    return Err(AnnotationError::InvalidSentences(format!(
                        "no tokens inside characters {}..{}",
                        span.start, span.end
                    )))
                }
            }
        }
        Ok(ranges)
    }

    fn root_sentences(&self) -> Vec<std::ops::Range<usize>> {
        let mut root_of: Vec<usize> = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let mut current = token.id;
            let mut steps = 0;
            while let Some(t) = self.tokens.get(current) {
                if t.head == t.id || steps > self.tokens.len() {
                    break;
                }
                current = t.head;
                steps += 1;
            }
            root_of.push(current);
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        for i in 1..=root_of.len() {
            if i == root_of.len() || root_of[i] != root_of[start] {
                ranges.push(start..i);
                start = i;
            }
        }
        ranges
    }
}
