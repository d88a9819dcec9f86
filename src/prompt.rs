/// Parameterized prompt with `{context}` and `{question}` placeholders.
/// Rendering is plain substitution; templates come from the analysis
/// configuration table.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{question}", question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_both_placeholders() {
        let template = PromptTemplate::new("C: {context}\nQ: {question}");
        let rendered = template.render("some excerpts", "what is clause 4?");
        assert_eq!(rendered, "C: some excerpts\nQ: what is clause 4?");
    }

    #[test]
    fn render_leaves_other_braces_alone() {
        let template = PromptTemplate::new("{context} {untouched} {question}");
        let rendered = template.render("a", "b");
        assert_eq!(rendered, "a {untouched} b");
    }

    #[test]
    fn mode_templates_render_cleanly() {
        let config = crate::analysis::AnalysisMode::Quick.config();
        let rendered = PromptTemplate::new(config.prompt_template).render("CTX", "QST");
        assert!(rendered.contains("CTX"));
        assert!(rendered.contains("QST"));
        assert!(!rendered.contains("{context}"));
        assert!(!rendered.contains("{question}"));
    }
}
