// SPDX-License-Identifier: MIT

//! Extraction entry points
//!
//! [`Engine`] is the synchronous core: classify the verbs of an annotated
//! document, then assemble the elements. [`ProcessExtractor`] puts the
//! annotation collaborator in front of it.

use std::sync::Arc;

use crate::error::Text2BpmnError;
use crate::nlp::annotator::Annotator;
use crate::nlp::document::Document;
use crate::nlp::inflect::{EnglishInflector, Inflector};

use super::assembler::GraphAssembler;
use super::classifier::{Trigger, TriggerClassifier};
use super::element::ProcessElement;
use super::markers::MarkerTables;

/// Marker tables plus inflector; holds no per-document state
#[derive(Clone)]
pub struct Engine {
    markers: MarkerTables,
    inflector: Arc<dyn Inflector>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(MarkerTables::default(), Arc::new(EnglishInflector::new()))
    }
}

impl Engine {
    pub fn new(markers: MarkerTables, inflector: Arc<dyn Inflector>) -> Self {
        Self { markers, inflector }
    }

    pub fn markers(&self) -> &MarkerTables {
        &self.markers
    }

    pub fn classify(&self, doc: &Document) -> Vec<Trigger> {
        TriggerClassifier::new(doc, &self.markers, self.inflector.as_ref()).classify()
    }

    pub fn assemble(&self, doc: &Document, triggers: &[Trigger]) -> Vec<ProcessElement> {
        GraphAssembler::new(doc, &self.markers, self.inflector.as_ref()).assemble(triggers)
    }

    /// Classify and assemble in one go
    pub fn run(&self, doc: &Document) -> Vec<ProcessElement> {
        let triggers = self.classify(doc);
        log::debug!("Classified {} triggers", triggers.len());
        self.assemble(doc, &triggers)
    }
}

/// Text in, process elements out
pub struct ProcessExtractor {
    annotator: Arc<dyn Annotator>,
    engine: Engine,
}

impl ProcessExtractor {
    pub fn new(annotator: Arc<dyn Annotator>, engine: Engine) -> Self {
        Self { annotator, engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Annotate `text` once and run the engine over it
    pub async fn try_extract_process(
        &self,
        text: &str,
    ) -> Result<Vec<ProcessElement>, Text2BpmnError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let doc = self.annotator.annotate(text).await?;
        Ok(self.engine.run(&doc))
    }

    /// Like [`try_extract_process`](Self::try_extract_process), but any failure yields an empty list
    pub async fn extract_process(&self, text: &str) -> Vec<ProcessElement> {
        match self.try_extract_process(text).await {
            Ok(elements) => elements,
            Err(e) => {
                log::warn!("Process extraction failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnnotationError;
    use crate::nlp::annotator::StaticAnnotator;
    use crate::process::classifier::TriggerCategory;
    use crate::process::fixtures::*;
    use async_trait::async_trait;

    struct FailingAnnotator;

    #[async_trait]
    impl Annotator for FailingAnnotator {
        async fn annotate(&self, _text: &str) -> Result<Document, AnnotationError> {
            Err(AnnotationError::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn test_engine_run_matches_classify_then_assemble() {
        let engine = Engine::default();
        let doc = payment_choice();

        let triggers = engine.classify(&doc);
        assert_eq!(triggers[1].category, TriggerCategory::SplitExclusiveGateway);
        assert_eq!(engine.run(&doc), engine.assemble(&doc, &triggers));
    }

    #[test]
    fn test_engine_uses_custom_markers() {
        let mut markers = MarkerTables::default();
        markers.exclusive.clear();
        let engine = Engine::new(markers, Arc::new(EnglishInflector::new()));

        let elements = engine.run(&payment_choice());
        assert!(elements
            .iter()
            .all(|e| !e.identifier.starts_with("ExclusiveGateway")));
    }

    #[tokio::test]
    async fn test_extract_process() {
        let extractor =
            ProcessExtractor::new(Arc::new(StaticAnnotator::new(order_and_ship())), Engine::default());

        let elements = extractor
            .extract_process("The customer orders a product. The warehouse ships the product.")
            .await;
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[1].value, "Ship product");
    }

    #[tokio::test]
    async fn test_annotation_failure_yields_empty_list() {
        let extractor = ProcessExtractor::new(Arc::new(FailingAnnotator), Engine::default());

        assert!(extractor.extract_process("Anything.").await.is_empty());
        assert!(matches!(
            extractor.try_extract_process("Anything.").await,
            Err(Text2BpmnError::Annotation(AnnotationError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_blank_text_skips_annotation() {
        let extractor = ProcessExtractor::new(Arc::new(FailingAnnotator), Engine::default());
        assert!(extractor.try_extract_process("  \n").await.unwrap().is_empty());
    }
}
