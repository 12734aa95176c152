#![doc = include_str!("../README.md")]

use librei18n::Message;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod error;
mod visitor;

use error::ScParserError;
pub use visitor::MessageVisitor;

/// Extracts every `Message` literal from Rust source text, in source order.
///
/// Duplicate ids are all returned.
///
/// # Errors
///
/// Returns [`ScParserError::Parse`] when `source` is not valid Rust.
pub fn parse_source(source: &str) -> Result<Vec<Message>, ScParserError> {
    extract(source).map_err(|source| {
        let (line, column) = error::position(&source);
        ScParserError::Parse {
            line,
            column,
            source,
        }
    })
}

/// Extracts every `Message` literal from a Rust file.
pub fn parse_file(file_path: &Path) -> Result<Vec<Message>, ScParserError> {
    tracing::trace!("Parsing file: {}", file_path.display());

    let content = fs::read_to_string(file_path)
        .map_err(|e| ScParserError::Io(file_path.to_path_buf(), e))?;

    extract(&content).map_err(|source| {
        let (line, column) = error::position(&source);
        ScParserError::Syn {
            path: file_path.to_path_buf(),
            line,
            column,
            source,
        }
    })
}

/// Extracts messages from every `.rs` file under `dir_path`.
///
/// Files are visited in path order so the result is stable between runs.
///
/// # Errors
///
/// This function will return an error if the directory cannot be read, or if
/// any of the files in the directory cannot be parsed.
pub fn parse_directory(dir_path: &Path) -> Result<Vec<Message>, ScParserError> {
    tracing::info!(
        "Starting message extraction in directory: {}",
        dir_path.display()
    );

    let rust_files: Vec<PathBuf> = WalkDir::new(dir_path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file()
                    && let Some(ext) = path.extension()
                    && ext == "rs"
                {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            },
            Err(e) => Some(Err(ScParserError::WalkDir(dir_path.to_path_buf(), e))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Found {} Rust files to parse.", rust_files.len());

    let mut messages = Vec::new();
    for file_path in &rust_files {
        messages.extend(parse_file(file_path)?);
    }

    tracing::info!(
        "Finished extraction. Found {} message literal(s).",
        messages.len()
    );
    Ok(messages)
}

/// Extracts from a single file or, for a directory, from every Rust file in it.
pub fn parse_path(path: &Path) -> Result<Vec<Message>, ScParserError> {
    if path.is_dir() {
        parse_directory(path)
    } else {
        parse_file(path)
    }
}

fn extract(source: &str) -> Result<Vec<Message>, syn::Error> {
    let syntax_tree = syn::parse_file(source)?;
    let mut visitor = MessageVisitor::default();
    syn::visit::visit_file(&mut visitor, &syntax_tree);
    tracing::trace!(count = visitor.messages().len(), "Visited syntax tree");
    Ok(visitor.into_messages())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_directory_empty() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_directory(temp_dir.path());
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_parse_directory_with_nonexistent_path() {
        let non_existent_path = Path::new("/non/existent/path");
        let result = parse_directory(non_existent_path);
        assert!(matches!(result, Err(ScParserError::WalkDir(..))));
    }

    #[test]
    fn test_parse_directory_with_multiple_rust_files() {
        let temp_dir = TempDir::new().unwrap();

        let rust_content_b = r#"
fn b() {
    let _ = Message { id: "FromB", other: "B" };
}
"#;
        fs::write(temp_dir.path().join("b.rs"), rust_content_b).unwrap();

        let nested = temp_dir.path().join("a");
        fs::create_dir(&nested).unwrap();
        let rust_content_a = r#"
fn a() {
    let _ = i18n::Message { id: "FromA", other: "A" };
}
"#;
        fs::write(nested.join("mod.rs"), rust_content_a).unwrap();

        let messages = parse_directory(temp_dir.path()).unwrap();

        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["FromA", "FromB"]);
    }

    #[test]
    fn test_parse_directory_with_non_rust_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("notes.txt"),
            "Message { id: \"Hidden\" }",
        )
        .unwrap();

        let result = parse_directory(temp_dir.path());
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_parse_file_reports_path_and_position() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.rs");
        fs::write(&file_path, "fn main() {\n    let x = ;\n}\n").unwrap();

        match parse_file(&file_path) {
            Err(ScParserError::Syn { path, line, .. }) => {
                assert_eq!(path, file_path);
                assert_eq!(line, 2);
            },
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_path_dispatches_on_kind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("lib.rs");
        fs::write(&file_path, "const M: Message = Message { id: \"K\" };").unwrap();

        assert_eq!(parse_path(&file_path).unwrap().len(), 1);
        assert_eq!(parse_path(temp_dir.path()).unwrap().len(), 1);
    }
}
