mod mock_llm_client;
mod openai_client;

pub use mock_llm_client::{MockLlmClient, SAMPLE_PLAN};
pub use openai_client::OpenAiClient;
