// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section {#section}\n\nParagraph with [[Other Page]] and [a link](other.md#intro).\n\n- [ ] Task with [ref][def]\n- Another <a id=\"spot\"></a> item\n\n| a | b |\n|---|---|\n| [x](#section) | ~~y~~ |\n\n```rust\nfn example() {}\n```\n\n[def]: https://example.com\n\n";
    base.repeat(size)
}

/// `count` documents linking to each other by wiki link and path.
#[allow(dead_code)]
pub fn generate_linked_pages(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            let next = (i + 1) % count;
            let text = format!(
                "# Page {i}\n\n## Intro\n\nSee [[Page {next}#intro]] and [next](page-{next}.md).\n\n[[Missing {i}]]\n"
            );
            (format!("page-{i}.md"), text)
        })
        .collect()
}
