pub mod chain;
pub mod index;

pub use chain::RetrievalChain;
pub use index::{ChunkIndex, IndexError, ScoredChunk};
