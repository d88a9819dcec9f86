use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How thoroughly a document gets processed. Each mode maps to one fixed
/// configuration record in [`ANALYSIS_CONFIGS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Quick,
    Detailed,
}

/// Chunking and prompting parameters for one analysis mode. Immutable,
/// resolved once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub temperature: f32,
    pub prompt_template: &'static str,
}

const QUICK_PROMPT: &str = "\
You are an assistant for analyzing legal and business documents. \
Use only the excerpts below to answer the question. If the excerpts do not \
contain the answer, say so plainly.

Document excerpts:
{context}

Question: {question}

Answer in two or three sentences, citing the relevant passage where possible.";

const DETAILED_PROMPT: &str = "\
You are an assistant for analyzing legal and business documents. \
Base your answer strictly on the excerpts below. Quote the exact wording of \
any clause you rely on, and flag ambiguities or missing information explicitly.

Document excerpts:
{context}

Question: {question}

Provide a thorough answer: summarize the relevant provisions, explain their \
implications, and note anything the excerpts leave unresolved.";

pub const QUICK_CONFIG: AnalysisConfig = AnalysisConfig {
    chunk_size: 1000,
    chunk_overlap: 100,
    temperature: 0.2,
    prompt_template: QUICK_PROMPT,
};

pub const DETAILED_CONFIG: AnalysisConfig = AnalysisConfig {
    chunk_size: 600,
    chunk_overlap: 200,
    temperature: 0.5,
    prompt_template: DETAILED_PROMPT,
};

lazy_static! {
    /// Label → (mode, config) table backing both CLI and API mode lookup.
    pub static ref ANALYSIS_CONFIGS: HashMap<&'static str, (AnalysisMode, &'static AnalysisConfig)> = {
        let mut m = HashMap::new();
        m.insert("quick", (AnalysisMode::Quick, &QUICK_CONFIG));
        m.insert("detailed", (AnalysisMode::Detailed, &DETAILED_CONFIG));
        m
    };
}

impl AnalysisMode {
    pub fn config(&self) -> &'static AnalysisConfig {
        match self {
            AnalysisMode::Quick => &QUICK_CONFIG,
            AnalysisMode::Detailed => &DETAILED_CONFIG,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Quick => "quick",
            AnalysisMode::Detailed => "detailed",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnalysisMode {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        lookup(label).map(|(mode, _)| mode)
    }
}

/// Resolve a mode label to its configuration record. Unknown labels are an
/// error; there is no fallback mode.
pub fn lookup(label: &str) -> Result<(AnalysisMode, &'static AnalysisConfig)> {
    ANALYSIS_CONFIGS
        .get(label.trim().to_lowercase().as_str())
        .copied()
        .ok_or_else(|| {
            anyhow!(
                "Unknown analysis mode '{}'. Available modes: quick, detailed",
                label
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_exact_record_for_known_label() {
        let (mode, config) = lookup("quick").unwrap();
        assert_eq!(mode, AnalysisMode::Quick);
        assert_eq!(*config, QUICK_CONFIG);

        let (mode, config) = lookup("detailed").unwrap();
        assert_eq!(mode, AnalysisMode::Detailed);
        assert_eq!(config.chunk_size, 600);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        let (mode, _) = lookup("  Detailed ").unwrap();
        assert_eq!(mode, AnalysisMode::Detailed);
    }

    #[test]
    fn lookup_fails_for_unknown_label() {
        assert!(lookup("exhaustive").is_err());
        assert!(lookup("").is_err());
        assert!("exhaustive".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn mode_config_matches_table() {
        for (mode, config) in ANALYSIS_CONFIGS.values() {
            assert_eq!(mode.config(), *config);
        }
    }

    #[test]
    fn templates_carry_both_placeholders() {
        for config in [&QUICK_CONFIG, &DETAILED_CONFIG] {
            assert!(config.prompt_template.contains("{context}"));
            assert!(config.prompt_template.contains("{question}"));
        }
    }
}
