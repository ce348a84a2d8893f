//! Collaborator interfaces for the question-answering side
//!
//! The scraped corpus is meant to feed a voice assistant that transcribes a
//! spoken question, retrieves relevant passages, and asks a language model
//! for an answer. None of those services ship with this crate; this module
//! only fixes their interfaces and the order in which they are chained.

use thiserror::Error;

/// Errors reported by collaborator services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Query is empty")]
    EmptyQuery,
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Speech to text
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> ServiceResult<String>;
}

/// Passage search over the indexed corpus
pub trait Retriever {
    /// Returns the passages most relevant to `query`, best first
    fn retrieve(&self, query: &str) -> ServiceResult<Vec<String>>;
}

/// Answer generation from a query and supporting passages
pub trait Generator {
    fn generate(&self, query: &str, context: &[String]) -> ServiceResult<String>;
}

/// Everything produced while answering one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub query: String,
    pub passages: Vec<String>,
    pub response: String,
}

/// Chains transcription, retrieval and generation
pub struct AnswerPipeline<T, R, G> {
    transcriber: T,
    retriever: R,
    generator: G,
}

impl<T, R, G> AnswerPipeline<T, R, G>
where
    T: Transcriber,
    R: Retriever,
    G: Generator,
{
    pub fn new(transcriber: T, retriever: R, generator: G) -> Self {
        Self {
            transcriber,
            retriever,
            generator,
        }
    }

    /// Answers a spoken question
    pub fn answer_audio(&self, audio: &[u8]) -> ServiceResult<Answer> {
        let query = self.transcriber.transcribe(audio)?;
        tracing::debug!("Transcribed query: {}", query);
        self.answer_text(&query)
    }

    /// Answers a written question
    ///
    /// Blank queries are rejected before any service is called.
    pub fn answer_text(&self, query: &str) -> ServiceResult<Answer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }

        let passages = self.retriever.retrieve(query)?;
        tracing::debug!("Retrieved {} passages", passages.len());

        let response = self.generator.generate(query, &passages)?;

        Ok(Answer {
            query: query.to_string(),
            passages,
            response,
        })
    }
}
