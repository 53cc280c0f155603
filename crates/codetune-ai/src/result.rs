//! Optimization request and result types.

use serde::{Deserialize, Serialize};

/// Source code submitted for optimization. Treated as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub source_code: String,
}

impl OptimizationRequest {
    pub fn new(source_code: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
        }
    }
}

impl From<&str> for OptimizationRequest {
    fn from(source_code: &str) -> Self {
        Self::new(source_code)
    }
}

impl From<String> for OptimizationRequest {
    fn from(source_code: String) -> Self {
        Self::new(source_code)
    }
}

/// Outcome of an optimization request.
///
/// Always usable: on failure `optimized_code` is the original code, so a
/// caller can take [`optimized_code`](Self::optimized_code) without checking
/// [`succeeded`](Self::succeeded) first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    optimized_code: String,
    original_code: String,
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl OptimizationResult {
    /// The model answered with `optimized_code`.
    pub fn success(original_code: impl Into<String>, optimized_code: impl Into<String>) -> Self {
        Self {
            optimized_code: optimized_code.into(),
            original_code: original_code.into(),
            succeeded: true,
            error_message: None,
        }
    }

    /// The request failed; the original code passes through.
    pub fn failure(original_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        let original_code = original_code.into();
        let mut error_message = error_message.into();
        if error_message.is_empty() {
            error_message = "unknown inference endpoint error".to_string();
        }

        Self {
            optimized_code: original_code.clone(),
            original_code,
            succeeded: false,
            error_message: Some(error_message),
        }
    }

    pub fn optimized_code(&self) -> &str {
        &self.optimized_code
    }

    pub fn original_code(&self) -> &str {
        &self.original_code
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The code inside the first fenced block of the answer, or the whole
    /// answer when the model did not fence it.
    pub fn code_block(&self) -> &str {
        extract_fenced(&self.optimized_code).unwrap_or(&self.optimized_code)
    }

    /// Consume the result, keeping only the usable code.
    pub fn into_code(self) -> String {
        self.optimized_code
    }
}

fn extract_fenced(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string (e.g. "javascript") up to the end of the line.
    let line_end = after_fence.find('\n')?;
    if after_fence[..line_end].contains("```") {
        return None;
    }
    let body = &after_fence[line_end + 1..];
    let close = body.find("```")?;
    let code = &body[..close];
    Some(
        code.strip_suffix("\r\n")
            .or_else(|| code.strip_suffix('\n'))
            .unwrap_or(code),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_invariants() {
        let result = OptimizationResult::success("a", "b");
        assert!(result.succeeded());
        assert_eq!(result.original_code(), "a");
        assert_eq!(result.optimized_code(), "b");
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_failure_passes_original_through() {
        let result = OptimizationResult::failure("let x = 1;", "connection refused");
        assert!(!result.succeeded());
        assert_eq!(result.optimized_code(), "let x = 1;");
        assert_eq!(result.original_code(), "let x = 1;");
        assert_eq!(result.error_message(), Some("connection refused"));
    }

    #[test]
    fn test_failure_message_never_empty() {
        let result = OptimizationResult::failure("x", "");
        assert!(!result.error_message().unwrap().is_empty());
    }

    #[test]
    fn test_code_block() {
        let result = OptimizationResult::success(
            "x",
            "Here you go:\n\n```javascript\nconst add = (a, b) => a + b;\n```\n\nDone.",
        );
        assert_eq!(result.code_block(), "const add = (a, b) => a + b;");

        let plain = OptimizationResult::success("x", "const y = 2;");
        assert_eq!(plain.code_block(), "const y = 2;");

        let unterminated = OptimizationResult::success("x", "```js\nconst y = 2;");
        assert_eq!(unterminated.code_block(), "```js\nconst y = 2;");
    }

    #[test]
    fn test_code_block_crlf() {
        let result = OptimizationResult::success("x", "```js\r\nconst y = 2;\r\n```\r\n");
        assert_eq!(result.code_block(), "const y = 2;");
    }

    #[test]
    fn test_code_block_inline_fence() {
        let result = OptimizationResult::success("x", "Use ```x``` here.\nthen more\n");
        assert_eq!(result.code_block(), "Use ```x``` here.\nthen more\n");
    }

    #[test]
    fn test_json_shape() {
        let ok = serde_json::to_value(OptimizationResult::success("a", "b")).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({
                "optimized_code": "b",
                "original_code": "a",
                "succeeded": true
            })
        );

        let failed = serde_json::to_value(OptimizationResult::failure("a", "boom")).unwrap();
        assert_eq!(failed["error_message"], "boom");
        assert_eq!(failed["optimized_code"], "a");
    }

    #[test]
    fn test_request_from() {
        let request: OptimizationRequest = "code".into();
        assert_eq!(request.source_code, "code");
    }
}
