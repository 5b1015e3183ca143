pub trait StripCodeBlock {
    fn strip_code_block(&self) -> &str;
}

impl StripCodeBlock for str {
    /// Drops a surrounding markdown fence. The opening line goes even when
    /// the closing fence is missing; model output often truncates there.
    fn strip_code_block(&self) -> &str {
        let trimmed = self.trim();
        if trimmed.starts_with("```")
            && let Some(pos) = trimmed.find('\n')
        {
            let inner = &trimmed[pos + 1..];
            if let Some(inner) = inner.strip_suffix("```") {
                return inner.trim();
            }
            return inner.trim();
        }
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fence_with_language_tag() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(text.strip_code_block(), "{\"a\": 1}");
    }

    #[test]
    fn strips_opening_fence_without_closing() {
        let text = "```\n{\"a\": 1}";
        assert_eq!(text.strip_code_block(), "{\"a\": 1}");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!("  {\"a\": 1}  ".strip_code_block(), "{\"a\": 1}");
    }
}
