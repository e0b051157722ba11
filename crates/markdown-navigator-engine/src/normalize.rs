//! Identifier normalisation.
//!
//! References match their targets by equality of the normalised forms
//! produced here. Lowercasing is Unicode-aware but per character
//! (`char::to_lowercase`), not full case folding: `ß` stays `ß` and does not
//! match `ss`, and the Greek final sigma is not special-cased.

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Join the whitespace-separated words of `s` with `sep`, lowercased.
fn join_words(s: &str, sep: &str) -> String {
    let words: Vec<String> = s.split_whitespace().map(|w| lowercase(w).collect()).collect();
    words.join(sep)
}

/// Reference labels (`[Foo  Bar]` and `[foo bar]` are the same definition):
/// trimmed, internal whitespace runs collapsed to one space, lowercased.
pub fn reference_label(label: &str) -> String {
    join_words(label, " ")
}

/// Explicit anchor ids (`{#id}`, `<a id="id">`, `#id` in a link): trimmed,
/// lowercased, whitespace runs replaced by a single `-`.
pub fn anchor_id(id: &str) -> String {
    join_words(id, "-")
}

/// The id generated for a heading without an explicit one, GitHub style:
/// lowercased, punctuation other than `-` and `_` dropped, each space a `-`.
pub fn heading_id(text: &str) -> String {
    lowercase(text.trim())
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect()
}

/// Page names for wiki links: trimmed, lowercased, and runs of whitespace
/// and `-` treated alike (`Page Two`, `page-two`). An extension is kept, so
/// `[[Page-Two.md]]` names a page called `Page-Two.md`, not the file.
pub fn page_name(name: &str) -> String {
    name.trim()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| lowercase(part).collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Foo Bar", "foo bar")]
    #[case("  foo\t\n bar  ", "foo bar")]
    #[case("ÄÖÜ", "äöü")]
    #[case("1", "1")]
    #[case("Straße", "straße")]
    fn reference_labels(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(reference_label(input), expected);
    }

    #[test]
    fn sharp_s_is_not_folded_to_ss() {
        assert_ne!(reference_label("STRASSE"), reference_label("Straße"));
    }

    #[rstest]
    #[case("intro", "intro")]
    #[case(" My  Anchor ", "my-anchor")]
    #[case("Already-Dashed", "already-dashed")]
    fn anchor_ids(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(anchor_id(input), expected);
    }

    #[rstest]
    #[case("Intro", "intro")]
    #[case("Hello, World!", "hello-world")]
    #[case("snake_case and dash-ed", "snake_case-and-dash-ed")]
    #[case("Überschrift Eins", "überschrift-eins")]
    #[case("  Trimmed  ", "trimmed")]
    fn heading_ids(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(heading_id(input), expected);
    }

    #[rstest]
    #[case("Page Two")]
    #[case("page-two")]
    #[case("  PAGE   TWO ")]
    fn page_names_match(#[case] input: &str) {
        assert_eq!(page_name(input), "page-two");
    }

    #[test]
    fn page_name_keeps_extension() {
        assert_eq!(page_name("Page-Two.md"), "page-two.md");
    }

    #[test]
    fn heading_and_link_anchor_agree() {
        assert_eq!(heading_id("My Intro"), anchor_id("My Intro"));
    }
}
