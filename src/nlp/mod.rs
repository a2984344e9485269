// SPDX-License-Identifier: MIT

//! Linguistic annotation layer
//!
//! This module holds everything the engine consumes from the outside world:
//! - [document] - token arena with dependency-tree navigation
//! - [spacy] - decoding of spaCy's JSON document format
//! - [annotator] - the annotation collaborator trait and an HTTP client
//! - [inflect] - verb inflection for event labels

pub mod annotator;
pub mod document;
pub mod inflect;
pub mod spacy;

pub use annotator::{Annotator, RemoteAnnotator, StaticAnnotator};
pub use document::{Document, PartOfSpeech, Relation, Token, TokenData};
pub use inflect::{EnglishInflector, Inflector};
pub use spacy::SpacyDoc;
