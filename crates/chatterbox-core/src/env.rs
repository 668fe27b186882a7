//! `KEY=VALUE` environment files and the per-run [`Environment`].
//!
//! Format rules:
//! - lines starting with `#` and blank lines are skipped
//! - every other line is trimmed and split on the first `=`
//! - the value is taken verbatim (no quoting, no escapes, no interpolation)
//! - a line without `=` sets the key to an empty value
//! - later lines win over earlier ones
//!
//! Loaded pairs never touch the process environment. They live in an
//! [`Environment`] that is handed to every later step and applied to child
//! processes explicitly.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

/// Parser for `KEY=VALUE` files.
pub struct EnvFile;

impl EnvFile {
    pub fn parse(content: &str) -> Result<Vec<EnvEntry>, ParseError> {
        let mut entries = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            if raw.starts_with('#') || raw.trim().is_empty() {
                continue;
            }

            let line = raw.trim();
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            if key.is_empty() {
                return Err(ParseError::EmptyKey { line: idx + 1 });
            }

            entries.push(EnvEntry {
                key: key.to_owned(),
                value: value.to_owned(),
            });
        }

        Ok(entries)
    }

    pub fn read(path: &Path) -> Result<Vec<EnvEntry>, EnvFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnvFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| EnvFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Variables visible to the current run.
///
/// Lookups check pairs loaded from env files first, then (when inheriting)
/// the process environment.
#[derive(Clone, Default)]
pub struct Environment {
    loaded: BTreeMap<String, String>,
    inherit: bool,
}

impl Environment {
    /// Overlay on top of the current process environment.
    pub fn inherited() -> Self {
        Self {
            loaded: BTreeMap::new(),
            inherit: true,
        }
    }

    /// Overlay with nothing underneath. Lookups only see loaded pairs.
    pub fn isolated() -> Self {
        Self::default()
    }

    /// Set a variable for the rest of this run, returning the previous loaded value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.loaded.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.loaded.get(key) {
            return Some(value.clone());
        }
        if self.inherit {
            // arch-lint: allow(no-silent-result-drop) reason="unset and non-UTF-8 variables are both treated as absent"
            return std::env::var(key).ok();
        }
        None
    }

    /// Pairs loaded during this run, for applying to child processes.
    pub fn loaded(&self) -> impl Iterator<Item = (&str, &str)> {
        self.loaded.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded.len()
    }

    /// Read an env file and set every pair it contains.
    ///
    /// Returns the number of lines applied (duplicates counted).
    pub fn load_file(&mut self, path: &Path) -> Result<usize, EnvFileError> {
        let entries = EnvFile::read(path)?;
        let count = entries.len();

        for entry in entries {
            tracing::debug!(key = %entry.key, file = %path.display(), "set environment variable");
            self.set(entry.key, entry.value);
        }

        tracing::info!(file = %path.display(), count, "loaded env file");
        Ok(count)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("loaded_keys", &self.loaded.keys().collect::<Vec<_>>())
            .field("inherit", &self.inherit)
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: empty variable name")]
    EmptyKey { line: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum EnvFileError {
    #[error("failed to read env file {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid env file {path}")]
    Parse { path: PathBuf, source: ParseError },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(content: &str) -> Vec<(String, String)> {
        EnvFile::parse(content)
            .unwrap()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# comment\n\n   \nAPP_ID=abc123\n#SEVALLA_API_KEY=nope\n";
        assert_eq!(pairs(content), vec![("APP_ID".into(), "abc123".into())]);
    }

    #[test]
    fn splits_on_first_equals_only() {
        let content = "DATABASE_URL=postgres://u:p@host/db?sslmode=require\n";
        assert_eq!(
            pairs(content),
            vec![(
                "DATABASE_URL".into(),
                "postgres://u:p@host/db?sslmode=require".into()
            )]
        );
    }

    #[test]
    fn value_is_verbatim_including_quotes() {
        assert_eq!(
            pairs("GREETING=\"hello world\"\n"),
            vec![("GREETING".into(), "\"hello world\"".into())]
        );
    }

    #[test]
    fn line_is_trimmed_before_split() {
        assert_eq!(
            pairs("  PORT=8080  \r\n"),
            vec![("PORT".into(), "8080".into())]
        );
    }

    #[test]
    fn missing_equals_gives_empty_value() {
        assert_eq!(pairs("FLAG\n"), vec![("FLAG".into(), String::new())]);
    }

    #[test]
    fn indented_hash_is_not_a_comment() {
        assert_eq!(pairs("  #X=1\n"), vec![("#X".into(), "1".into())]);
    }

    #[test]
    fn empty_key_is_rejected_with_line_number() {
        let err = EnvFile::parse("A=1\n=oops\n").unwrap_err();
        assert_eq!(err, ParseError::EmptyKey { line: 2 });
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let mut env = Environment::isolated();
        for entry in EnvFile::parse("KEY=first\nKEY=second\n").unwrap() {
            env.set(entry.key, entry.value);
        }
        assert_eq!(env.get("KEY").as_deref(), Some("second"));
        assert_eq!(env.loaded_len(), 1);
    }

    #[test]
    fn isolated_environment_ignores_process_env() {
        let env = Environment::isolated();
        assert!(env.get("PATH").is_none());
    }

    #[test]
    fn loaded_value_shadows_process_env() {
        let mut env = Environment::inherited();
        env.set("PATH", "/shadowed");
        assert_eq!(env.get("PATH").as_deref(), Some("/shadowed"));
    }

    #[test]
    fn debug_output_hides_values() {
        let mut env = Environment::isolated();
        env.set("SEVALLA_API_KEY", "super-secret");
        let rendered = format!("{env:?}");
        assert!(rendered.contains("SEVALLA_API_KEY"));
        assert!(!rendered.contains("super-secret"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn key() -> impl Strategy<Value = String> {
            "[A-Z_][A-Z0-9_]{0,15}"
        }

        fn value() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9_./:=@-]{0,24}"
        }

        proptest! {
            #[test]
            fn parse_never_panics(s in "\\PC*") {
                let _ = EnvFile::parse(&s);
            }

            #[test]
            fn well_formed_line_sets_exactly_that_pair(k in key(), v in value()) {
                let parsed = pairs(&format!("{k}={v}\n"));
                prop_assert_eq!(parsed, vec![(k, v)]);
            }

            #[test]
            fn comment_lines_set_nothing(body in "[^\r\n]*") {
                let parsed = pairs(&format!("#{body}\n"));
                prop_assert!(parsed.is_empty());
            }

            #[test]
            fn blank_lines_set_nothing(blank in "[ \t]{0,8}") {
                let parsed = pairs(&format!("{blank}\n"));
                prop_assert!(parsed.is_empty());
            }
        }
    }
}
