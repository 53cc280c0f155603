//! Prompt templates for code optimization.
//!
//! Templates are plain text with two placeholders, `{language}` and `{code}`.
//! Substitution is a single pass over the template, so placeholder text that
//! happens to appear inside the submitted code is left alone.

/// System prompt: who the model should act as.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior {language} engineer. \
You review code for performance, readability and idiomatic style, and you answer \
with improved code that keeps the original behavior.";

/// User prompt: the request, with the code in a fenced block.
pub const DEFAULT_USER_PROMPT: &str = r#"Optimize the following {language} code. Keep its behavior identical, improve performance and readability where possible, and reply with the rewritten code.

```{language}
{code}
```"#;

const LANGUAGE_PLACEHOLDER: &str = "{language}";
const CODE_PLACEHOLDER: &str = "{code}";

/// A prompt template with `{language}` and `{code}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute the placeholders.
    pub fn render(&self, language: &str, code: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + code.len());
        let mut rest = self.template.as_str();

        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix(LANGUAGE_PLACEHOLDER) {
                out.push_str(language);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(CODE_PLACEHOLDER) {
                out.push_str(code);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }

        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_USER_PROMPT)
    }
}

/// A rendered two-part prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// System-role instruction
    pub system: String,
    /// User-role instruction with the embedded code
    pub user: String,
}

impl Prompt {
    /// Render both templates for the given code.
    pub fn build(
        system: &PromptTemplate,
        user: &PromptTemplate,
        language: &str,
        code: &str,
    ) -> Self {
        Self {
            system: system.render(language, code),
            user: user.render(language, code),
        }
    }
}
