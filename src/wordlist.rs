use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Create or truncate `path` and write one token per line, `\n`-terminated.
pub fn write(path: &Path, tokens: &[String]) -> Result<()> {
    let wrap = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(wrap)?);
    for token in tokens {
        out.write_all(token.as_bytes()).map_err(wrap)?;
        out.write_all(b"\n").map_err(wrap)?;
    }
    out.flush().map_err(wrap)?;

    info!("Wrote {} lines to {}", tokens.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_token_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlist.txt");
        let tokens: Vec<String> = ["Alpha", "1", "Pokémon Red"].map(String::from).to_vec();
        write(&path, &tokens).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Alpha\n1\nPokémon Red\n");
    }

    #[test]
    fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlist.txt");
        std::fs::write(&path, "old\nlonger\ncontent\n").unwrap();
        write(&path, &["new".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn empty_token_list_gives_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlist.txt");
        write(&path, &[]).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn unwritable_path_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("wordlist.txt");
        let err = write(&path, &["x".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("no_such_dir"));
    }
}
