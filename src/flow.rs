// One pass of the pipeline: generate, publish, classify. Each step runs
// once. A generation failure stops the run before any request is sent to
// WordPress.

use thiserror::Error;
use tracing::{info, info_span};

use crate::gemini::{ContentGenerator, GenerationError};
use crate::report::Outcome;
use crate::wordpress::{PostDraft, PostPublisher, PublishError, Taxonomy};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("content generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("publishing failed: {0}")]
    Publish(#[from] PublishError),
}

/// Generate content for `sentence`, submit it as a draft titled `title`
/// and return the classified response.
pub fn run(
    generator: &dyn ContentGenerator,
    publisher: &dyn PostPublisher,
    title: &str,
    sentence: &str,
    taxonomy: &Taxonomy,
) -> Result<Outcome, FlowError> {
    let _span = info_span!("run", title).entered();

    let content = generator.generate(sentence)?;
    let draft = PostDraft::new(title, content, taxonomy);
    let result = publisher.publish(&draft)?;

    let outcome = Outcome::from_result(&result);
    info!(status = result.status, success = outcome.is_success(), "run finished");
    Ok(outcome)
}
