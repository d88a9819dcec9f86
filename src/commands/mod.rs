use crate::analysis::AnalysisMode;
use crate::config::AppConfig;
use crate::document::{self, TextSplitter};
use crate::providers::traits::CompletionProvider;
use crate::retrieval::RetrievalChain;
use crate::social::PostComposer;
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::Path;

/// Interactive session state for the REPL: one provider, one current mode,
/// and at most one loaded document chain.
pub struct ReplSession {
    pub provider: Box<dyn CompletionProvider + Send + Sync>,
    pub config: AppConfig,
    pub mode: AnalysisMode,
    pub chain: Option<RetrievalChain>,
}

impl ReplSession {
    pub fn new(
        provider: Box<dyn CompletionProvider + Send + Sync>,
        config: AppConfig,
        mode: AnalysisMode,
    ) -> Self {
        Self {
            provider,
            config,
            mode,
            chain: None,
        }
    }

    pub async fn load_document(&mut self, path: &Path) -> Result<(), String> {
        println!("📄 Loading document: {}", path.display().to_string().bright_yellow());

        let text = document::load_document(path).map_err(|e| e.to_string())?;
        let config = self.mode.config();
        let chunks = TextSplitter::for_config(config).split(&text);
        println!(
            "✂️  Split into {} chunks ({} mode)",
            chunks.len().to_string().bright_green(),
            self.mode
        );

        let bar = ProgressBar::new(chunks.len() as u64);
        let chain = RetrievalChain::build(
            self.provider.clone_box(),
            &self.config.qdrant_url,
            chunks,
            self.mode,
            Some(bar),
        )
        .await
        .map_err(|e| format!("Failed to process document: {}", e))?;

        // The old document's index goes away with its chain.
        if let Some(old) = self.chain.take() {
            old.teardown().await;
        }
        self.chain = Some(chain);

        println!("💭 Document ready. Ask away.");
        Ok(())
    }
}

fn print_help() {
    println!("📚 Commands:");
    println!("  load <file_path>        - Load a document (txt, md or pdf)");
    println!("  mode <quick|detailed>   - Set analysis mode for the next load");
    println!("  chunks                  - Show chunk count of the loaded document");
    println!("  status                  - Show model, mode and session state");
    println!("  posts [count] <topic>   - Draft social posts about a topic");
    println!("  help                    - Show this message");
    println!("  exit                    - Quit");
    println!();
    println!("Anything else is treated as a question about the loaded document.");
}

pub async fn handle_command(input: &str, session: &mut ReplSession) -> Result<(), String> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts.first().copied() {
        Some("help") => {
            print_help();
            Ok(())
        }
        Some("load") => {
            let path = parts.get(1).ok_or("Usage: load <file_path>")?;
            session.load_document(Path::new(path)).await
        }
        Some("mode") => {
            let label = parts.get(1).ok_or("Usage: mode <quick|detailed>")?;
            let (mode, config) = crate::analysis::lookup(label).map_err(|e| e.to_string())?;
            session.mode = mode;
            println!(
                "🔧 Mode set to {} (chunk size {}, overlap {}, temperature {})",
                mode.to_string().bright_green(),
                config.chunk_size,
                config.chunk_overlap,
                config.temperature
            );
            if session.chain.is_some() {
                println!("   Reload the document for the new mode to take effect.");
            }
            Ok(())
        }
        Some("status") => {
            let model = session
                .provider
                .get_model_info()
                .await
                .map_err(|e| e.to_string())?;
            println!("🤖 Model: {}", model.bright_green());
            println!("🔧 Mode: {}", session.mode.to_string().bright_green());
            match &session.chain {
                Some(chain) => println!(
                    "📦 {} chunks indexed, {} conversation turns",
                    chain.chunk_count(),
                    chain.history().len()
                ),
                None => println!("📄 No document loaded"),
            }
            Ok(())
        }
        Some("chunks") => match &session.chain {
            Some(chain) => {
                println!(
                    "📦 {} chunks indexed ({} mode)",
                    chain.chunk_count().to_string().bright_green(),
                    chain.mode()
                );
                Ok(())
            }
            None => Err("No document loaded. Use: load <file_path>".to_string()),
        },
        Some("posts") => {
            if parts.len() < 2 {
                return Err("Usage: posts [count] <topic>".to_string());
            }
            let (count, topic_parts) = match parts[1].parse::<usize>() {
                Ok(n) if parts.len() > 2 => (n, &parts[2..]),
                _ => (3, &parts[1..]),
            };
            if count == 0 || count > 10 {
                return Err("Post count must be between 1 and 10".to_string());
            }
            let topic = topic_parts.join(" ");

            println!("✍️  Drafting {} posts about: {}", count, topic.bright_yellow());
            let posts = PostComposer::generate(session.provider.as_ref(), &topic, count)
                .await
                .map_err(|e| e.to_string())?;

            for (i, post) in posts.iter().enumerate() {
                println!("\n{}. {}", i + 1, post.bright_green());
            }
            Ok(())
        }
        Some(_) => {
            // Free-form input is a question about the loaded document.
            let chain = session
                .chain
                .as_mut()
                .ok_or("No document loaded. Use: load <file_path>")?;

            let answer = chain.ask(input).await.map_err(|e| e.to_string())?;
            println!("\n{}", answer.bright_green());
            Ok(())
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::gemini::GeminiProvider;

    fn test_session() -> ReplSession {
        let config = AppConfig {
            api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
            embed_model: "embedding-001".to_string(),
            qdrant_url: "http://127.0.0.1:9".to_string(),
        };
        let provider = Box::new(GeminiProvider::from_config(&config));
        ReplSession::new(provider, config, AnalysisMode::Quick)
    }

    #[tokio::test]
    async fn status_reports_without_a_document() {
        let mut session = test_session();
        assert!(handle_command("status", &mut session).await.is_ok());
    }

    #[tokio::test]
    async fn mode_command_rejects_unknown_labels() {
        let mut session = test_session();
        assert!(handle_command("mode exhaustive", &mut session)
            .await
            .is_err());
        assert_eq!(session.mode, AnalysisMode::Quick);

        assert!(handle_command("mode detailed", &mut session).await.is_ok());
        assert_eq!(session.mode, AnalysisMode::Detailed);
    }

    #[tokio::test]
    async fn questions_require_a_loaded_document() {
        let mut session = test_session();
        let err = handle_command("what does clause 4 say?", &mut session)
            .await
            .unwrap_err();
        assert!(err.contains("No document loaded"));
    }
}
