//! Boundary to an external translation service.
//!
//! The engine never talks to a service itself. A host plugs one in by
//! implementing [`Translator`]; the default [`Translator::translate_all`]
//! keeps every request under the service's length limit.

use anyhow::{Context, bail};
use markdown_navigator_config::LabeledRegistry;

pub trait Translator: Send + Sync {
    /// Translate `text`, returning the translated segments in order.
    fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
        auto_detect: bool,
    ) -> anyhow::Result<Vec<String>>;

    /// Longest text accepted by a single [`Translator::translate`] call, in bytes.
    fn max_text_length(&self) -> usize;

    /// Language codes the service offers, in the service's order.
    fn languages(&self) -> anyhow::Result<Vec<String>>;

    /// Translate each text, splitting those over the length limit at
    /// whitespace. Returns one joined translation per input text.
    fn translate_all(
        &self,
        texts: &[String],
        from: &str,
        to: &str,
        auto_detect: bool,
    ) -> anyhow::Result<Vec<String>> {
        let limit = self.max_text_length();
        if limit == 0 {
            bail!("translator accepts no text");
        }

        let mut translations = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let mut translated = String::new();
            for chunk in split_at_limit(text, limit) {
                let segments = self
                    .translate(chunk, from, to, auto_detect)
                    .with_context(|| format!("translating text {index} from {from} to {to}"))?;
                translated.extend(segments);
            }
            translations.push(translated);
        }
        Ok(translations)
    }
}

/// Pieces of `text` no longer than `limit` bytes, cut after whitespace where
/// possible. Joined back together they give `text` unchanged.
pub fn split_at_limit(text: &str, limit: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let head = &rest[..cut];
        let at = match head.rfind(char::is_whitespace) {
            Some(ws) => ws + head[ws..].chars().next().map_or(1, char::len_utf8),
            None => cut,
        };
        // A single character wider than the limit still has to go somewhere.
        let at = if at == 0 {
            rest.chars().next().map_or(rest.len(), char::len_utf8)
        } else {
            at
        };
        chunks.push(&rest[..at]);
        rest = &rest[at..];
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// The service's languages as a registry for a picker, with an empty
/// "auto" entry first.
pub fn language_registry(translator: &dyn Translator) -> anyhow::Result<LabeledRegistry> {
    let languages = translator
        .languages()
        .context("fetching translation languages")?;
    let mut registry = LabeledRegistry::new();
    registry.update_values(languages, true);
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Uppercase {
        limit: usize,
        calls: Mutex<Vec<String>>,
    }

    impl Uppercase {
        fn new(limit: usize) -> Self {
            Self {
                limit,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl Translator for Uppercase {
        fn translate(&self, text: &str, _: &str, _: &str, _: bool) -> anyhow::Result<Vec<String>> {
            if text.len() > self.limit {
                bail!("text too long");
            }
            self.calls.lock().push(text.to_string());
            Ok(vec![text.to_uppercase()])
        }

        fn max_text_length(&self) -> usize {
            self.limit
        }

        fn languages(&self) -> anyhow::Result<Vec<String>> {
            Ok(vec!["en".into(), "de".into()])
        }
    }

    #[rstest]
    #[case("short", 10, vec!["short"])]
    #[case("one two three", 8, vec!["one two ", "three"])]
    #[case("abcdefghij", 4, vec!["abcd", "efgh", "ij"])]
    #[case("ää ää", 3, vec!["ä", "ä ", "ä", "ä"])]
    #[case("", 3, vec![])]
    fn splits_at_whitespace_under_limit(
        #[case] text: &str,
        #[case] limit: usize,
        #[case] expected: Vec<&str>,
    ) {
        let chunks = split_at_limit(text, limit);
        assert_eq!(chunks, expected);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.len() <= limit));
    }

    #[test]
    fn translate_all_respects_the_limit() {
        let translator = Uppercase::new(8);
        let texts = vec!["one two three".to_string(), "hi".to_string()];

        let result = translator.translate_all(&texts, "en", "de", false).unwrap();

        assert_eq!(result, vec!["ONE TWO THREE", "HI"]);
        assert_eq!(*translator.calls.lock(), vec!["one two ", "three", "hi"]);
    }

    #[test]
    fn zero_limit_is_an_error() {
        let translator = Uppercase::new(0);
        assert!(translator.translate_all(&["x".into()], "en", "de", true).is_err());
    }

    #[test]
    fn registry_lists_languages_after_auto() {
        let registry = language_registry(&Uppercase::new(8)).unwrap();
        assert_eq!(registry.labels(), vec!["", "en", "de"]);
        assert_eq!(registry.by_label("de").map(|v| v.value), Some(2));
    }
}
