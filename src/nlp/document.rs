// SPDX-License-Identifier: MIT

//! Annotated document arena
//!
//! Tokens live in a flat vector addressed by their index. Each token keeps a
//! single optional head index and a precomputed list of child indices, so the
//! dependency tree can be walked in both directions without reference cycles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::AnnotationError;

/// Universal part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Verb,
    Aux,
    Noun,
    ProperNoun,
    Pronoun,
    Adposition,
    SubordinatingConjunction,
    CoordinatingConjunction,
    Adverb,
    Adjective,
    Determiner,
    Particle,
    Punctuation,
    Other(String),
}

impl From<&str> for PartOfSpeech {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "VERB" => Self::Verb,
            "AUX" => Self::Aux,
            "NOUN" => Self::Noun,
            "PROPN" => Self::ProperNoun,
            "PRON" => Self::Pronoun,
            "ADP" => Self::Adposition,
            "SCONJ" => Self::SubordinatingConjunction,
            "CCONJ" => Self::CoordinatingConjunction,
            "ADV" => Self::Adverb,
            "ADJ" => Self::Adjective,
            "DET" => Self::Determiner,
            "PART" => Self::Particle,
            "PUNCT" => Self::Punctuation,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        pos.to_string()
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verb => write!(f, "VERB"),
            Self::Aux => write!(f, "AUX"),
            Self::Noun => write!(f, "NOUN"),
            Self::ProperNoun => write!(f, "PROPN"),
            Self::Pronoun => write!(f, "PRON"),
            Self::Adposition => write!(f, "ADP"),
            Self::SubordinatingConjunction => write!(f, "SCONJ"),
            Self::CoordinatingConjunction => write!(f, "CCONJ"),
            Self::Adverb => write!(f, "ADV"),
            Self::Adjective => write!(f, "ADJ"),
            Self::Determiner => write!(f, "DET"),
            Self::Particle => write!(f, "PART"),
            Self::Punctuation => write!(f, "PUNCT"),
            Self::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Labeled dependency relation from a token to its head (ClearNLP label set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    /// nsubj
    NominalSubject,
    /// nsubjpass
    PassiveSubject,
    /// dobj
    DirectObject,
    /// auxpass
    PassiveAuxiliary,
    /// agent ("by" phrase of a passive verb)
    Agent,
    /// prep
    Preposition,
    /// pobj
    PrepositionalObject,
    /// prt (phrasal verb particle)
    Particle,
    /// xcomp (open clausal / infinitival complement)
    OpenComplement,
    /// conj
    Conjunct,
    /// mark
    Marker,
    /// advmod
    AdverbialModifier,
    /// advcl
    AdverbialClause,
    /// ROOT
    Root,
    Other(String),
}

impl From<&str> for Relation {
    fn from(label: &str) -> Self {
        match label {
            "nsubj" => Self::NominalSubject,
            "nsubjpass" => Self::PassiveSubject,
            "dobj" => Self::DirectObject,
            "auxpass" => Self::PassiveAuxiliary,
            "agent" => Self::Agent,
            "prep" => Self::Preposition,
            "pobj" => Self::PrepositionalObject,
            "prt" => Self::Particle,
            "xcomp" => Self::OpenComplement,
            "conj" => Self::Conjunct,
            "mark" => Self::Marker,
            "advmod" => Self::AdverbialModifier,
            "advcl" => Self::AdverbialClause,
            "ROOT" | "root" => Self::Root,
            _ => Self::Other(label.to_string()),
        }
    }
}

impl From<String> for Relation {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.to_string()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NominalSubject => "nsubj",
            Self::PassiveSubject => "nsubjpass",
            Self::DirectObject => "dobj",
            Self::PassiveAuxiliary => "auxpass",
            Self::Agent => "agent",
            Self::Preposition => "prep",
            Self::PrepositionalObject => "pobj",
            Self::Particle => "prt",
            Self::OpenComplement => "xcomp",
            Self::Conjunct => "conj",
            Self::Marker => "mark",
            Self::AdverbialModifier => "advmod",
            Self::AdverbialClause => "advcl",
            Self::Root => "ROOT",
            Self::Other(label) => label,
        };
        write!(f, "{}", label)
    }
}

/// Token as delivered by the annotation collaborator, before indexing
#[derive(Debug, Clone, PartialEq)]
pub struct TokenData {
    pub text: String,
    /// Whitespace following the token in the original text
    pub whitespace: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: Relation,
    /// Index of the governing token, `None` for a sentence root
    pub head: Option<usize>,
}

impl TokenData {
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<PartOfSpeech>,
        dep: impl Into<Relation>,
        head: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            whitespace: " ".to_string(),
            lemma: lemma.into(),
            pos: pos.into(),
            dep: dep.into(),
            head,
        }
    }

    /// Set the trailing whitespace
    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.whitespace = whitespace.into();
        self
    }
}

/// An indexed token inside a [`Document`]
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub whitespace: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: Relation,
    pub head: Option<usize>,
    pub children: Vec<usize>,
    pub sentence: usize,
}

impl Token {
    pub fn is_verb(&self) -> bool {
        self.pos == PartOfSpeech::Verb
    }
}

/// A sentence-segmented, dependency-parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
}

impl Document {
    /// Build a document from tokens with absolute head indices and the
    /// token ranges of its sentences
    pub fn new(data: Vec<TokenData>, sentences: Vec<Range<usize>>) -> Result<Self, AnnotationError> {
        if data.is_empty() {
            return Err(AnnotationError::EmptyDocument);
        }

        let sentence_of = Self::sentence_index(data.len(), &sentences)?;

        let mut tokens: Vec<Token> = data
            .into_iter()
            .enumerate()
            .map(|(index, d)| Token {
                index,
                text: d.text,
                whitespace: d.whitespace,
                lemma: d.lemma,
                pos: d.pos,
                dep: d.dep,
                head: d.head,
                children: Vec::new(),
                sentence: sentence_of[index],
            })
            .collect();

        for index in 0..tokens.len() {
            let Some(head) = tokens[index].head else {
                continue;
            };
            if head == index {
                return Err(AnnotationError::Cycle { token: index });
            }
            if head >= tokens.len() || tokens[head].sentence != tokens[index].sentence {
                return Err(AnnotationError::InvalidHead { token: index, head });
            }
            tokens[head].children.push(index);
        }

        let doc = Self { tokens, sentences };
        doc.check_acyclic()?;
        Ok(doc)
    }

    /// Build a document from per-sentence token lists whose head indices are
    /// relative to the start of their own sentence
    pub fn from_sentences(sentences: Vec<Vec<TokenData>>) -> Result<Self, AnnotationError> {
        let mut data = Vec::new();
        let mut ranges = Vec::new();

        for sentence in sentences {
            let offset = data.len();
            ranges.push(offset..offset + sentence.len());
            data.extend(sentence.into_iter().map(|mut token| {
                token.head = token.head.map(|h| h + offset);
                token
            }));
        }

        Self::new(data, ranges)
    }

    fn sentence_index(
        len: usize,
        sentences: &[Range<usize>],
    ) -> Result<Vec<usize>, AnnotationError> {
        let mut sentence_of = Vec::with_capacity(len);
        let mut expected = 0;

        for (i, range) in sentences.iter().enumerate() {
            if range.start != expected || range.end <= range.start {
                return Err(AnnotationError::InvalidSentences(format!(
                    "sentence {} spans {:?}, expected to start at {}",
                    i, range, expected
                )));
            }
            sentence_of.extend(std::iter::repeat(i).take(range.len()));
            expected = range.end;
        }

        if expected != len {
            return Err(AnnotationError::InvalidSentences(format!(
                "sentences cover {} of {} tokens",
                expected, len
            )));
        }

        Ok(sentence_of)
    }

    fn check_acyclic(&self) -> Result<(), AnnotationError> {
        for token in &self.tokens {
            let mut steps = 0;
            let mut current = token.head;
            while let Some(head) = current {
                steps += 1;
                if steps > self.tokens.len() {
                    return Err(AnnotationError::Cycle { token: token.index });
                }
                current = self.tokens[head].head;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn sentences(&self) -> &[Range<usize>] {
        &self.sentences
    }

    /// Verb tokens in document order
    pub fn verbs(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_verb())
    }

    pub fn head(&self, index: usize) -> Option<&Token> {
        self.tokens[index].head.map(|h| &self.tokens[h])
    }

    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> {
        self.tokens[index].children.iter().map(|&c| &self.tokens[c])
    }

    /// First child attached with the given relation
    pub fn child_with(&self, index: usize, relation: &Relation) -> Option<&Token> {
        self.children(index).find(|c| &c.dep == relation)
    }

    pub fn children_with<'a>(
        &'a self,
        index: usize,
        relation: &'a Relation,
    ) -> impl Iterator<Item = &'a Token> + 'a {
        self.children(index).filter(move |c| &c.dep == relation)
    }

    /// Tokens governing `index`, nearest first
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: self.tokens[index].head,
        }
    }

    pub fn sentence_range(&self, sentence: usize) -> Range<usize> {
        self.sentences[sentence].clone()
    }

    /// The token without a head in the given sentence
    pub fn sentence_root(&self, sentence: usize) -> Option<&Token> {
        self.sentence_range(sentence)
            .map(|i| &self.tokens[i])
            .find(|t| t.head.is_none())
    }

    pub fn is_sentence_root(&self, index: usize) -> bool {
        self.tokens[index].head.is_none()
    }

    /// Leftmost and rightmost token indices dominated by `index` (inclusive)
    pub fn subtree_bounds(&self, index: usize) -> (usize, usize) {
        let mut left = index;
        let mut right = index;
        let mut stack = vec![index];

        while let Some(current) = stack.pop() {
            left = left.min(current);
            right = right.max(current);
            stack.extend(self.tokens[current].children.iter().copied());
        }

        (left, right)
    }

    /// Verbatim text of the tokens in `range`, original spacing preserved
    pub fn span_text(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        let mut text = String::new();

        for (i, token) in self.tokens[start..end].iter().enumerate() {
            text.push_str(&token.text);
            if start + i + 1 < end {
                text.push_str(&token.whitespace);
            }
        }

        text
    }
}

/// Iterator over the governors of a token, nearest first
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let token = &self.doc.tokens[index];
        self.current = token.head;
        Some(token)
    }
}
