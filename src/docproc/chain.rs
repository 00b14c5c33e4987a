use std::sync::Arc;

use crate::docproc::document::Document;
use crate::error::ProcessingFailure;

/// What a processor tells the chain after handling a document.
#[derive(Debug)]
pub enum Progress {
    /// Hand the document to the next processor.
    Continue,
    /// Stop the chain for this document; not an error.
    SkipRemaining,
    /// Abort the chain and report a [`ProcessingFailure`].
    Fail(Option<anyhow::Error>),
}

impl Progress {
    pub fn fail(cause: impl Into<anyhow::Error>) -> Self {
        Progress::Fail(Some(cause.into()))
    }
}

/// One transformation step over a document.
///
/// Processors hold construction-time configuration only; the same instance
/// handles many documents concurrently.
pub trait DocumentProcessor: Send + Sync {
    /// Identity reported in [`ProcessingFailure`] and logs.
    fn name(&self) -> &str;

    fn process(&self, document: &mut Document) -> Progress;
}

/// How a chain run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every processor ran.
    Completed,
    /// `processor` at `index` returned [`Progress::SkipRemaining`].
    Skipped { processor: String, index: usize },
}

/// Ordered list of processors, built once and shared.
#[derive(Clone)]
pub struct ProcessingChain {
    name: String,
    processors: Vec<Arc<dyn DocumentProcessor>>,
}

impl ProcessingChain {
    pub fn new(name: impl Into<String>, processors: Vec<Arc<dyn DocumentProcessor>>) -> Self {
        Self {
            name: name.into(),
            processors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Runs the processors in order over `document`.
    ///
    /// On failure the document keeps the mutations made so far.
    pub fn process(&self, document: &mut Document) -> Result<ChainOutcome, ProcessingFailure> {
        for (index, processor) in self.processors.iter().enumerate() {
            match processor.process(document) {
                Progress::Continue => {}
                Progress::SkipRemaining => {
                    tracing::debug!(
                        chain = %self.name,
                        processor = processor.name(),
                        index,
                        document = document.id(),
                        "Processor skipped the rest of the chain"
                    );
                    return Ok(ChainOutcome::Skipped {
                        processor: processor.name().to_string(),
                        index,
                    });
                }
                Progress::Fail(cause) => {
                    let failure = ProcessingFailure {
                        processor: processor.name().to_string(),
                        index,
                        cause,
                    };
                    tracing::warn!(
                        chain = %self.name,
                        document = document.id(),
                        error = %failure,
                        "Document processing failed"
                    );
                    return Err(failure);
                }
            }
        }

        tracing::trace!(chain = %self.name, document = document.id(), "Document processed");
        Ok(ChainOutcome::Completed)
    }
}
