//! Generation gateway adapters.
//!
//! [`openai_gateway::OpenAiCompatibleGateway`] talks to any chat
//! completions endpoint in the OpenAI wire format (Groq by default), and
//! [`retrying_gateway::RetryingGateway`] bounds each attempt with a
//! timeout and retries transient failures a fixed number of times.

pub mod openai_gateway;
pub mod retrying_gateway;
