//! Generative backend adapters

pub mod openai;

pub use openai::OpenAiCompatibleGateway;
