// SPDX-License-Identifier: MIT

//! Hand-written dependency parses shared by the engine tests
//!
//! Noun chunks are merged into single tokens, the way the annotation
//! pipeline delivers them. Heads are relative to each sentence.

use crate::nlp::document::{Document, TokenData};

pub fn t(text: &str, lemma: &str, pos: &str, dep: &str, head: Option<usize>) -> TokenData {
    TokenData::new(text, lemma, pos, dep, head)
}

/// Token followed directly by punctuation
pub fn tn(text: &str, lemma: &str, pos: &str, dep: &str, head: Option<usize>) -> TokenData {
    t(text, lemma, pos, dep, head).with_whitespace("")
}

pub fn punct(head: usize) -> TokenData {
    t(".", ".", "PUNCT", "punct", Some(head))
}

pub fn comma(head: usize) -> TokenData {
    t(",", ",", "PUNCT", "punct", Some(head))
}

pub fn doc(sentences: Vec<Vec<TokenData>>) -> Document {
    Document::from_sentences(sentences).unwrap()
}

/// "The customer orders a product. The warehouse ships the product."
pub fn order_and_ship() -> Document {
    doc(vec![
        vec![
            t("The customer", "the customer", "NOUN", "nsubj", Some(1)),
            t("orders", "order", "VERB", "ROOT", None),
            tn("a product", "a product", "NOUN", "dobj", Some(1)),
            punct(1),
        ],
        vec![
            t("The warehouse", "the warehouse", "NOUN", "nsubj", Some(1)),
            t("ships", "ship", "VERB", "ROOT", None),
            tn("the product", "the product", "NOUN", "dobj", Some(1)),
            punct(1),
        ],
    ])
}

/// "If the payment fails, the order is cancelled. Otherwise, the order is shipped."
pub fn payment_choice() -> Document {
    doc(vec![
        vec![
            t("If", "if", "SCONJ", "mark", Some(2)),
            t("the payment", "the payment", "NOUN", "nsubj", Some(2)),
            tn("fails", "fail", "VERB", "advcl", Some(6)),
            comma(6),
            t("the order", "the order", "NOUN", "nsubjpass", Some(6)),
            t("is", "be", "AUX", "auxpass", Some(6)),
            tn("cancelled", "cancel", "VERB", "ROOT", None),
            punct(6),
        ],
        vec![
            tn("Otherwise", "otherwise", "ADV", "advmod", Some(4)),
            comma(4),
            t("the order", "the order", "NOUN", "nsubjpass", Some(4)),
            t("is", "be", "AUX", "auxpass", Some(4)),
            tn("shipped", "ship", "VERB", "ROOT", None),
            punct(4),
        ],
    ])
}

fn concurrent_review_sentence() -> Vec<TokenData> {
    vec![
        t("The clerk", "the clerk", "NOUN", "nsubj", Some(1)),
        t("files", "file", "VERB", "ROOT", None),
        t("the report", "the report", "NOUN", "dobj", Some(1)),
        t("while", "while", "SCONJ", "mark", Some(5)),
        t("the manager", "the manager", "NOUN", "nsubj", Some(5)),
        t("reviews", "review", "VERB", "advcl", Some(1)),
        tn("it", "it", "PRON", "dobj", Some(5)),
        punct(1),
    ]
}

/// "The clerk files the report while the manager reviews it."
pub fn concurrent_review() -> Document {
    doc(vec![concurrent_review_sentence()])
}

/// Concurrent review followed by "After these activities, the flow is merged."
pub fn concurrent_review_joined() -> Document {
    doc(vec![
        concurrent_review_sentence(),
        vec![
            t("After", "after", "ADP", "prep", Some(5)),
            tn("these activities", "these activity", "NOUN", "pobj", Some(0)),
            comma(5),
            t("the flow", "the flow", "NOUN", "nsubjpass", Some(5)),
            t("is", "be", "AUX", "auxpass", Some(5)),
            tn("merged", "merge", "VERB", "ROOT", None),
            punct(5),
        ],
    ])
}

/// Concurrent review followed by "The process ends."
pub fn concurrent_review_terminated() -> Document {
    doc(vec![
        concurrent_review_sentence(),
        vec![
            t("The process", "the process", "NOUN", "nsubj", Some(1)),
            tn("ends", "end", "VERB", "ROOT", None),
            punct(1),
        ],
    ])
}

/// "If the payment fails, the process ends. Otherwise, the order is shipped."
pub fn payment_termination() -> Document {
    doc(vec![
        vec![
            t("If", "if", "SCONJ", "mark", Some(2)),
            t("the payment", "the payment", "NOUN", "nsubj", Some(2)),
            tn("fails", "fail", "VERB", "advcl", Some(5)),
            comma(5),
            t("the process", "the process", "NOUN", "nsubj", Some(5)),
            tn("ends", "end", "VERB", "ROOT", None),
            punct(5),
        ],
        vec![
            tn("Otherwise", "otherwise", "ADV", "advmod", Some(4)),
            comma(4),
            t("the order", "the order", "NOUN", "nsubjpass", Some(4)),
            t("is", "be", "AUX", "auxpass", Some(4)),
            tn("shipped", "ship", "VERB", "ROOT", None),
            punct(4),
        ],
    ])
}

/// "The clerk files the report. Once the manager approves the report, the clerk archives it."
pub fn approval_event() -> Document {
    doc(vec![
        vec![
            t("The clerk", "the clerk", "NOUN", "nsubj", Some(1)),
            t("files", "file", "VERB", "ROOT", None),
            tn("the report", "the report", "NOUN", "dobj", Some(1)),
            punct(1),
        ],
        vec![
            t("Once", "once", "SCONJ", "mark", Some(2)),
            t("the manager", "the manager", "NOUN", "nsubj", Some(2)),
            t("approves", "approve", "VERB", "advcl", Some(6)),
            tn("the report", "the report", "NOUN", "dobj", Some(2)),
            comma(6),
            t("the clerk", "the clerk", "NOUN", "nsubj", Some(6)),
            t("archives", "archive", "VERB", "ROOT", None),
            tn("it", "it", "PRON", "dobj", Some(6)),
            punct(6),
        ],
    ])
}

/// "The warehouse needs to ship the product."
pub fn semi_modal() -> Document {
    doc(vec![vec![
        t("The warehouse", "the warehouse", "NOUN", "nsubj", Some(1)),
        t("needs", "need", "VERB", "ROOT", None),
        t("to", "to", "PART", "aux", Some(3)),
        t("ship", "ship", "VERB", "xcomp", Some(1)),
        tn("the product", "the product", "NOUN", "dobj", Some(3)),
        punct(1),
    ]])
}

/// One bare verb per sentence ("Step0. Step1. ..."), for driving the
/// assembler with hand-made trigger lists
pub fn bare_verbs(count: usize) -> Document {
    doc((0..count)
        .map(|i| {
            let word = format!("step{}", i);
            vec![tn(&word, &word, "VERB", "ROOT", None), punct(0)]
        })
        .collect())
}
