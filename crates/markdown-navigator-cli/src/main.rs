use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use markdown_navigator_config::Config;
use markdown_navigator_engine::{
    Capabilities, DocumentId, ParseCache, RenameReason, Workspace, io,
};
use rowan::TextSize;
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Debug, Parser)]
#[command(name = "markdown-navigator", version, about)]
struct Cli {
    /// Notes folder, overriding the one in the config file
    #[arg(long, global = true)]
    notes: Option<PathBuf>,

    /// Rendering profile whose parser options are used
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the notes path and profile to the config file
    Init,

    /// Print the syntax tree of a document
    Tree { file: String },

    /// List the references and anchors of a document
    Elements { file: String },

    /// Report every reference that resolves to nothing
    Check,

    /// Show what the reference at a position points to
    Resolve {
        file: String,
        /// Byte offset, or 1-based LINE:COLUMN
        position: String,
    },

    /// Rename the element at a position and every reference to it
    Rename {
        file: String,
        /// Byte offset, or 1-based LINE:COLUMN
        position: String,
        new_name: String,
        /// Print the edits without writing any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        bail!(
            "Notes path '{}' is invalid: {e}",
            config.notes_path.display()
        );
    }

    if let Command::Init = cli.command {
        config.save()?;
        println!(
            "Saved notes path '{}' and profile '{}' to {}",
            config.notes_path.display(),
            config.profile,
            Config::config_path().display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let mut store = config.profile_store();
    let options = store
        .parser_options(&config.profile)
        .with_context(|| format!("selecting profile '{}'", config.profile))?;
    let cache = Arc::new(ParseCache::for_profile(
        config.profile.clone(),
        options,
        config.cache_capacity,
    ));
    store.register_listener(cache.clone());

    let mut workspace = Workspace::load_with_cache(&config.notes_path, cache)?;

    match cli.command {
        // Saved above, before the workspace was loaded.
        Command::Init => {}
        Command::Tree { file } => {
            let parsed = workspace.parsed(&DocumentId::from_relative_str(&file))?;
            print!("{:#?}", parsed.syntax());
        }
        Command::Elements { file } => {
            let parsed = workspace.parsed(&DocumentId::from_relative_str(&file))?;
            for element in parsed
                .elements()
                .filter(|e| e.has(Capabilities::REFERENCE | Capabilities::ANCHOR_TARGET))
            {
                let (line, column) = line_col(parsed.text(), element.text_range().start());
                println!(
                    "{line}:{column} {} {:?} {} {:?}",
                    element.icon_key().as_str(),
                    element.kind(),
                    element.display_name(),
                    element.capabilities()
                );
            }
        }
        Command::Check => {
            let unresolved = workspace.unresolved()?;
            for (id, element) in &unresolved {
                let (line, column) =
                    line_col(workspace.document(id)?.text(), element.text_range().start());
                println!(
                    "{id}:{line}:{column}: unresolved {:?} {}",
                    element.kind(),
                    element.display_name()
                );
            }
            if !unresolved.is_empty() {
                log::warn!("{} unresolved references", unresolved.len());
                return Ok(ExitCode::FAILURE);
            }
            log::info!("all references resolve");
        }
        Command::Resolve { file, position } => {
            let id = DocumentId::from_relative_str(&file);
            let offset = parse_position(workspace.document(&id)?.text(), &position)?;
            let Some((element, targets)) = workspace.resolve_at(&id, offset)? else {
                println!("nothing to resolve at {position}");
                return Ok(ExitCode::FAILURE);
            };

            println!("{:?} {}", element.kind(), element.display_name());
            if targets.is_empty() {
                println!("  unresolved");
                return Ok(ExitCode::FAILURE);
            }
            for target in &targets {
                let (line, column) = line_col(
                    workspace.document(&target.document)?.text(),
                    target.node.range().start(),
                );
                println!("  {}:{line}:{column} {:?}", target.document, target.kind);
            }
        }
        Command::Rename {
            file,
            position,
            new_name,
            dry_run,
        } => {
            let id = DocumentId::from_relative_str(&file);
            let offset = parse_position(workspace.document(&id)?.text(), &position)?;
            let edits = workspace.rename_at(&id, offset, &new_name, RenameReason::UserRename)?;

            for edit in &edits {
                let text = workspace.document(&edit.document)?.text();
                let (line, column) = line_col(text, edit.range.start());
                let old = text
                    .get(std::ops::Range::<usize>::from(edit.range))
                    .unwrap_or_default();
                println!(
                    "{}:{line}:{column}: {old} -> {}",
                    edit.document, edit.replacement
                );
            }
            if dry_run {
                return Ok(ExitCode::SUCCESS);
            }

            let touched = workspace.apply_renames(&edits)?;
            for id in &touched {
                workspace.save(id)?;
            }
            log::info!("updated {} documents", touched.len());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// The config file merged with command-line overrides. A notes path on the
/// command line is enough on its own.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match (Config::load(), &cli.notes) {
        (Ok(Some(config)), _) => config,
        (Ok(None), Some(notes)) => Config::new(notes),
        (Ok(None), None) => bail!(
            "No notes path provided and no config file found at {}",
            Config::config_path().display()
        ),
        (Err(e), Some(notes)) => {
            log::warn!("Ignoring config file: {e}");
            Config::new(notes)
        }
        (Err(e), None) => return Err(e.into()),
    };

    if let Some(notes) = &cli.notes {
        config.notes_path = notes.clone();
    }
    if let Some(profile) = &cli.profile {
        config.profile = profile.clone();
    }
    Ok(config)
}

/// A byte offset, or a 1-based `LINE:COLUMN` counted in characters.
fn parse_position(text: &str, position: &str) -> Result<TextSize> {
    let offset = match position.split_once(':') {
        None => position
            .parse::<usize>()
            .with_context(|| format!("invalid offset '{position}'"))?,
        Some((line, column)) => {
            let line: usize = line.parse().with_context(|| format!("invalid line '{line}'"))?;
            let column: usize = column
                .parse()
                .with_context(|| format!("invalid column '{column}'"))?;
            if line == 0 || column == 0 {
                bail!("lines and columns start at 1");
            }
            let Some(start) = line_start(text, line) else {
                bail!("line {line} is past the end of the document");
            };
            let end = text[start..].find('\n').map_or(text.len(), |i| start + i);
            text[start..end]
                .char_indices()
                .map(|(i, _)| start + i)
                .chain(std::iter::once(end))
                .nth(column - 1)
                .with_context(|| format!("column {column} is past the end of line {line}"))?
        }
    };

    if offset > text.len() || !text.is_char_boundary(offset) {
        bail!("offset {offset} is not a position in the document");
    }
    let offset = u32::try_from(offset).context("document too large")?;
    Ok(TextSize::from(offset))
}

fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 1 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 2).map(|(i, _)| i + 1)
}

/// 1-based line and character column of `offset`.
fn line_col(text: &str, offset: TextSize) -> (usize, usize) {
    let offset = usize::from(offset).min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const TEXT: &str = "# Title\n\nSee [[Page]]\näb [x]\n";

    #[rstest]
    #[case("0", 0)]
    #[case("13", 13)]
    #[case("1:1", 0)]
    #[case("3:5", 13)]
    #[case("4:2", 24)]
    #[case("4:3", 25)]
    fn positions_map_to_offsets(#[case] position: &str, #[case] expected: u32) {
        assert_eq!(
            parse_position(TEXT, position).unwrap(),
            TextSize::from(expected)
        );
    }

    #[rstest]
    #[case("x")]
    #[case("0:1")]
    #[case("9:1")]
    #[case("1:99")]
    #[case("1:10")]
    #[case("500")]
    #[case("23")]
    fn bad_positions_are_rejected(#[case] position: &str) {
        assert!(parse_position(TEXT, position).is_err(), "{position}");
    }

    #[test]
    fn line_col_counts_characters() {
        assert_eq!(line_col(TEXT, TextSize::from(0)), (1, 1));
        assert_eq!(line_col(TEXT, TextSize::from(13)), (3, 5));
        assert_eq!(line_col(TEXT, TextSize::from(26)), (4, 4));
    }

    #[test]
    fn notes_flag_is_enough_without_config() {
        let cli = Cli::parse_from(["markdown-navigator", "--notes", "/tmp/notes", "check"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.notes_path, PathBuf::from("/tmp/notes"));
    }

    #[test]
    fn init_stores_command_line_overrides() {
        let cli = Cli::parse_from([
            "markdown-navigator",
            "--notes",
            "/tmp/notes",
            "--profile",
            "gitlab",
            "init",
        ]);
        assert!(matches!(cli.command, Command::Init));
        let config = load_config(&cli).unwrap();
        assert_eq!(config.notes_path, PathBuf::from("/tmp/notes"));
        assert_eq!(config.profile, "gitlab");
    }
}
