pub mod analysis;
pub mod api;
pub mod commands;
pub mod config;
pub mod document;
pub mod prompt;
pub mod providers;
pub mod retrieval;
pub mod social;

// Re-export commonly used items
pub use analysis::{AnalysisConfig, AnalysisMode};
pub use config::AppConfig;
pub use providers::gemini::GeminiProvider;
pub use retrieval::RetrievalChain;
pub use social::PostComposer;
