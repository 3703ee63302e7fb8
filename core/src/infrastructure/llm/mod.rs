pub mod groq_client;

pub use groq_client::GroqVisionClient;
