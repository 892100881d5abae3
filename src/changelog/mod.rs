use crate::error::CliError;
use std::path::Path;

/// A changelog split into an immutable title block and the release entries.
///
/// The title block is everything up to and including the first blank-line
/// separator (`\n\n`). New entries are prepended right after it, so the
/// newest release always comes first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changelog {
    title_block: String,
    entries: String,
}

impl Changelog {
    pub fn parse(content: &str) -> Result<Self, CliError> {
        let separator = content.find("\n\n").ok_or(CliError::ChangelogFormat)?;
        let boundary = separator + 2;
        Ok(Changelog {
            title_block: content[..boundary].to_string(),
            entries: content[boundary..].to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<(Self, String), CliError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| CliError::ChangelogFileRead {
                path: path.display().to_string(),
                source,
            })?;
        let changelog = Changelog::parse(&content)?;
        Ok((changelog, content))
    }

    /// Prepend a release note before all existing entries.
    pub fn insert_entry(&mut self, note: &str) {
        self.entries = format!("{}\n{}", note, self.entries);
    }

    pub fn title_block(&self) -> &str {
        &self.title_block
    }

    pub fn render(&self) -> String {
        format!("{}{}", self.title_block, self.entries)
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        std::fs::write(path, self.render()).map_err(CliError::IoError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_first_blank_line() {
        let changelog = Changelog::parse("# Title\n\nOld entry\n").unwrap();
        assert_eq!(changelog.title_block(), "# Title\n\n");
        assert_eq!(changelog.render(), "# Title\n\nOld entry\n");
    }

    #[test]
    fn test_parse_without_separator_fails() {
        assert!(matches!(
            Changelog::parse("# Title\nno blank line"),
            Err(CliError::ChangelogFormat)
        ));
    }

    #[test]
    fn test_insert_prepends_before_existing_entries() {
        let mut changelog = Changelog::parse("# Title\n\nOld entry\n").unwrap();
        changelog.insert_entry("- 1.2.4 [ 2024-01-01 – 2024-01-02 ]\n    -fix bug");
        assert_eq!(
            changelog.render(),
            "# Title\n\n- 1.2.4 [ 2024-01-01 – 2024-01-02 ]\n    -fix bug\nOld entry\n"
        );
    }

    #[test]
    fn test_title_block_is_byte_identical_after_merge() {
        let original = "# My Project changes\n\n- 1.0.0 [ 2023-05-01 – 2023-06-01 ]\n    -init\n";
        let mut changelog = Changelog::parse(original).unwrap();
        let title_before = changelog.title_block().to_string();
        changelog.insert_entry("- 1.1.0 [ 2024-01-01 – 2024-01-02 ]\n    -more");
        assert_eq!(changelog.title_block(), title_before);
        assert!(changelog
            .render()
            .ends_with("- 1.0.0 [ 2023-05-01 – 2023-06-01 ]\n    -init\n"));
    }

    #[test]
    fn test_later_blank_lines_stay_in_entries() {
        let mut changelog = Changelog::parse("# Title\n\nA\n\nB\n").unwrap();
        changelog.insert_entry("- 2.0.0 [ 2024-02-02 – 2024-02-02 ]");
        assert_eq!(
            changelog.render(),
            "# Title\n\n- 2.0.0 [ 2024-02-02 – 2024-02-02 ]\nA\n\nB\n"
        );
    }
}
