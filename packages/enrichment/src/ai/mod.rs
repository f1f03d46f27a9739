//! AI analysis: prompt construction and the GitHub Models analyst.

mod github;
mod prompts;

pub use github::{GitHubModelsAnalyst, DEFAULT_MODELS_URL};
pub use prompts::{
    build_analysis_prompt, extract_brief, format_event_digest, DIGEST_EVENT_LIMIT,
};
