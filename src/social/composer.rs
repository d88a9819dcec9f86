use crate::providers::traits::CompletionProvider;
use anyhow::{Error, Result};

pub const MAX_POST_LENGTH: usize = 280;
const POST_TEMPERATURE: f32 = 0.9;

/// Drafts batches of social posts from a topic and splits the raw model
/// output into individual items.
pub struct PostComposer;

impl PostComposer {
    pub async fn generate(
        provider: &(dyn CompletionProvider + Send + Sync),
        topic: &str,
        count: usize,
    ) -> Result<Vec<String>> {
        let prompt = Self::build_prompt(topic, count);

        let raw = provider
            .complete_with_temperature(&prompt, POST_TEMPERATURE)
            .await
            .map_err(|e| Error::msg(format!("Failed to generate posts: {}", e)))?;

        let posts = split_posts(&raw, count);
        if posts.is_empty() {
            return Err(Error::msg("Model returned no usable posts"));
        }
        Ok(posts)
    }

    fn build_prompt(topic: &str, count: usize) -> String {
        format!(
            "Write {} distinct social media posts about this topic: \"{}\"\n\n\
             Requirements:\n\
             1. Each post must stand on its own and stay under {} characters\n\
             2. Include one or two relevant hashtags per post\n\
             3. Vary the angle and tone between posts\n\
             4. Separate the posts with a blank line\n\
             5. Do not add commentary before or after the posts\n\n\
             Posts:",
            count, topic, MAX_POST_LENGTH
        )
    }
}

/// Split raw generated text into individual post strings.
///
/// Convention: posts are separated by blank lines. Only when that produces a
/// single segment whose non-empty lines all carry ordinal labels ("1.", "2)")
/// do we fall back to splitting on single newlines. Ordinal prefixes and
/// leading bullets are stripped, items are trimmed, empty items dropped, and
/// anything over [`MAX_POST_LENGTH`] characters is cut off. At most
/// `expected` items are returned (zero means no cap), so an over-generating
/// model cannot exceed what the caller asked for.
pub fn split_posts(raw: &str, expected: usize) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = trimmed
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() <= 1 {
        let lines: Vec<&str> = trimmed
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() > 1 && lines.iter().all(|l| has_ordinal(l)) {
            segments = lines;
        }
    }

    let mut posts: Vec<String> = segments
        .into_iter()
        .map(|s| truncate_post(strip_ordinal(s).trim()))
        .filter(|s| !s.is_empty())
        .collect();
    if expected > 0 {
        posts.truncate(expected);
    }
    posts
}

fn has_ordinal(line: &str) -> bool {
    let digits = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits == 0 {
        return false;
    }
    matches!(line[digits..].chars().next(), Some('.') | Some(')'))
}

fn strip_ordinal(item: &str) -> &str {
    let stripped = item
        .trim_start_matches(|c: char| c == '-' || c == '•')
        .trim_start();

    let digits = stripped
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(stripped.len());
    if digits > 0 {
        let rest = &stripped[digits..];
        if let Some(body) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return body.trim_start();
        }
    }

    stripped
}

fn truncate_post(content: &str) -> String {
    content.chars().take(MAX_POST_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines_and_strips_ordinals() {
        let raw = "1. Hello #world\n\n2. Goodbye #world";
        assert_eq!(
            split_posts(raw, 2),
            vec!["Hello #world".to_string(), "Goodbye #world".to_string()]
        );
    }

    #[test]
    fn single_post_without_separators() {
        let raw = "Just one tweet, no separators";
        assert_eq!(split_posts(raw, 3), vec![raw.to_string()]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(split_posts("", 3).is_empty());
        assert!(split_posts("   \n\n   ", 3).is_empty());
    }

    #[test]
    fn falls_back_to_newlines_for_ordinal_lists() {
        let raw = "1. First post #a\n2. Second post #b\n3. Third post #c";
        assert_eq!(
            split_posts(raw, 3),
            vec![
                "First post #a".to_string(),
                "Second post #b".to_string(),
                "Third post #c".to_string()
            ]
        );
    }

    #[test]
    fn keeps_multiline_posts_together() {
        let raw = "First line\nstill the first post\n\nSecond post";
        let posts = split_posts(raw, 2);
        assert_eq!(posts.len(), 2);
        assert!(posts[0].contains("still the first post"));
    }

    #[test]
    fn does_not_split_plain_lines_without_ordinals() {
        // Single-newline lines without ordinal labels stay one post.
        let raw = "A thought\nthat continues here";
        assert_eq!(split_posts(raw, 3), vec![raw.to_string()]);
    }

    #[test]
    fn strips_bullets_and_parenthesized_ordinals() {
        let raw = "- 1) Bulleted post #x\n\n• 2. Dotted post #y";
        assert_eq!(
            split_posts(raw, 2),
            vec!["Bulleted post #x".to_string(), "Dotted post #y".to_string()]
        );
    }

    #[test]
    fn leaves_leading_years_alone() {
        let raw = "2024 was a big year for #rustlang\n\n2025 will be bigger";
        assert_eq!(
            split_posts(raw, 2),
            vec![
                "2024 was a big year for #rustlang".to_string(),
                "2025 will be bigger".to_string()
            ]
        );
    }

    #[test]
    fn truncates_overlong_posts() {
        let raw = "x".repeat(400);
        let posts = split_posts(&raw, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].chars().count(), MAX_POST_LENGTH);
    }

    #[test]
    fn caps_items_at_expected_count() {
        let raw = "First #a\n\nSecond #b\n\nThird #c\n\nFourth #d";
        let posts = split_posts(raw, 2);
        assert_eq!(posts, vec!["First #a".to_string(), "Second #b".to_string()]);
        // Zero means no cap.
        assert_eq!(split_posts(raw, 0).len(), 4);
    }
}
