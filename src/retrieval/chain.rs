use crate::analysis::{AnalysisConfig, AnalysisMode};
use crate::prompt::PromptTemplate;
use crate::providers::traits::CompletionProvider;
use crate::retrieval::index::ChunkIndex;
use anyhow::{Error, Result};
use indicatif::ProgressBar;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

const TOP_K: u64 = 4;
const MAX_HISTORY_TURNS: usize = 6;
const EMBEDDING_CACHE_SIZE: usize = 256;

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

/// Conversational retrieval over one document: embed the question, pull the
/// closest chunks, render the mode's template, and complete with the mode's
/// temperature. Chat history lives in-process on the chain and dies with it.
pub struct RetrievalChain {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    index: ChunkIndex,
    mode: AnalysisMode,
    config: &'static AnalysisConfig,
    template: PromptTemplate,
    history: Vec<ChatTurn>,
    chunk_count: usize,
    embedding_cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl RetrievalChain {
    /// Embed and index every chunk, then return a chain ready for questions.
    /// `progress` is ticked once per chunk when the caller wants a bar.
    pub async fn build(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        qdrant_url: &str,
        chunks: Vec<String>,
        mode: AnalysisMode,
        progress: Option<ProgressBar>,
    ) -> Result<Self> {
        let config = mode.config();
        let index = ChunkIndex::create(qdrant_url)
            .await
            .map_err(|e| Error::msg(format!("Failed to create chunk index: {}", e)))?;

        let embedding_cache = Mutex::new(LruCache::new(
            NonZeroUsize::new(EMBEDDING_CACHE_SIZE).unwrap(),
        ));

        let chunk_count = chunks.len();
        for (i, chunk) in chunks.iter().enumerate() {
            let cached = embedding_cache
                .lock()
                .ok()
                .and_then(|mut cache| cache.get(chunk).cloned());

            let embedding = match cached {
                Some(embedding) => embedding,
                None => {
                    let embedding = provider
                        .generate_embedding(chunk)
                        .await
                        .map_err(|e| Error::msg(format!("Failed to embed chunk {}: {}", i, e)))?;
                    if let Ok(mut cache) = embedding_cache.lock() {
                        cache.put(chunk.clone(), embedding.clone());
                    }
                    embedding
                }
            };

            index
                .add_chunk(chunk, i, embedding)
                .await
                .map_err(|e| Error::msg(format!("Failed to index chunk {}: {}", i, e)))?;

            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }
        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }

        log::info!(
            "Indexed {} chunks in {} ({} mode)",
            chunk_count,
            index.collection(),
            mode
        );

        Ok(Self {
            provider,
            index,
            mode,
            config,
            template: PromptTemplate::new(config.prompt_template),
            history: Vec::new(),
            chunk_count,
            embedding_cache,
        })
    }

    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let query_embedding = self
            .provider
            .generate_embedding(question)
            .await
            .map_err(|e| Error::msg(format!("Failed to embed question: {}", e)))?;

        let results = self
            .index
            .search(query_embedding, TOP_K)
            .await
            .map_err(|e| Error::msg(format!("Failed to search chunks: {}", e)))?;

        let context = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = self.template.render(&context, question);
        if !self.history.is_empty() {
            let transcript = self
                .history
                .iter()
                .map(|turn| format!("User: {}\nAssistant: {}", turn.question, turn.answer))
                .collect::<Vec<_>>()
                .join("\n");
            prompt = format!("Conversation so far:\n{}\n\n{}", transcript, prompt);
        }

        let answer = self
            .provider
            .complete_with_temperature(&prompt, self.config.temperature)
            .await
            .map_err(|e| Error::msg(format!("Failed to generate answer: {}", e)))?;

        self.history.push(ChatTurn {
            question: question.to_string(),
            answer: answer.clone(),
        });
        if self.history.len() > MAX_HISTORY_TURNS {
            let excess = self.history.len() - MAX_HISTORY_TURNS;
            self.history.drain(..excess);
        }

        Ok(answer)
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Drop the backing collection before this chain is replaced.
    pub async fn teardown(&self) {
        if let Err(e) = self.index.destroy().await {
            log::warn!("Failed to drop chunk collection: {}", e);
        }
    }
}
