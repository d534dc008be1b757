//! YAML-backed configuration store.
//!
//! Reads and writes the downstream application's `config.yaml`. Dotted keys
//! address nested mappings, so `whisper.language` reads
//! `whisper: { language: ... }`.
//!
//! Writes edit the file line by line so the operator's comments and quoting
//! survive. When the layout is beyond what the line editor handles, the whole
//! document is re-serialized instead.

mod edit;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::ports::{ConfigStore, ConfigStoreError};

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// [`ConfigStore`] over a single YAML file.
///
/// The file is re-read on every call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, or `None` when the file does not exist.
    fn read_raw(&self) -> Result<Option<String>, ConfigStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigStoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parse(&self, raw: &str) -> Result<Value, ConfigStoreError> {
        if raw.trim().is_empty() {
            return Ok(Value::Mapping(Mapping::new()));
        }
        serde_yaml::from_str(raw).map_err(|source| ConfigStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the document, or `None` when the file does not exist.
    fn load(&self) -> Result<Option<Value>, ConfigStoreError> {
        self.read_raw()?.map(|raw| self.parse(&raw)).transpose()
    }

    fn save(&self, contents: &str) -> Result<(), ConfigStoreError> {
        let io_err = |source| ConfigStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, contents).map_err(io_err)
    }

    /// Text for `document`, preferring a line edit of `raw` that parses back
    /// to exactly the same document.
    fn render(
        &self,
        raw: &str,
        document: &Value,
        edited: Option<String>,
    ) -> Result<String, ConfigStoreError> {
        if let Some(text) = edited
            && serde_yaml::from_str::<Value>(&text).is_ok_and(|parsed| parsed == *document)
        {
            return Ok(text);
        }
        if !raw.trim().is_empty() {
            debug!(path = %self.path.display(), "config layout not editable in place, rewriting");
        }
        serde_yaml::to_string(document).map_err(|source| ConfigStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

fn split_key(key: &str) -> Result<Vec<&str>, ConfigStoreError> {
    let segments: Vec<&str> = key.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigStoreError::InvalidKey(key.to_string()));
    }
    Ok(segments)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

impl ConfigStore for YamlConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        let segments = split_key(key)?;
        let Some(document) = self.load()? else {
            debug!(path = %self.path.display(), "config file not found");
            return Ok(None);
        };

        let mut current = &document;
        for segment in segments {
            match current.get(segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(scalar_to_string(current))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigStoreError> {
        let segments = split_key(key)?;
        let raw = self.read_raw()?.unwrap_or_default();
        let mut document = match self.parse(&raw)? {
            Value::Null => Value::Mapping(Mapping::new()),
            doc => doc,
        };
        let exists = segments
            .iter()
            .try_fold(&document, |current, segment| current.get(segment))
            .is_some();

        let Some((last, parents)) = segments.split_last() else {
            return Err(ConfigStoreError::InvalidKey(key.to_string()));
        };

        let mut current = &mut document;
        for segment in parents {
            let Value::Mapping(map) = current else {
                return Err(ConfigStoreError::NotAMapping {
                    key: key.to_string(),
                    segment: (*segment).to_string(),
                });
            };
            let entry = map
                .entry(Value::String((*segment).to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if entry.is_null() {
                *entry = Value::Mapping(Mapping::new());
            }
            current = entry;
        }

        let Value::Mapping(map) = current else {
            return Err(ConfigStoreError::NotAMapping {
                key: key.to_string(),
                segment: (*last).to_string(),
            });
        };
        map.insert(
            Value::String((*last).to_string()),
            Value::String(value.to_string()),
        );

        let edited = if exists {
            edit::replace_scalar(&raw, &segments, value)
        } else {
            edit::insert_key(&raw, &segments, value)
        };
        let text = self.render(&raw, &document, edited)?;
        self.save(&text)?;
        debug!(path = %self.path.display(), key, "config value written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file_is_none() {
        let temp = tempdir().unwrap();
        let store = YamlConfigStore::new(temp.path().join("config.yaml"));
        assert_eq!(store.read("display_language").unwrap(), None);
    }

    #[test]
    fn test_write_creates_file_and_reads_back() {
        let temp = tempdir().unwrap();
        let store = YamlConfigStore::new(temp.path().join("nested/config.yaml"));

        store.write("display_language", "ja").unwrap();
        assert_eq!(store.read("display_language").unwrap().as_deref(), Some("ja"));
    }

    #[test]
    fn test_write_preserves_other_keys() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "api:\n  key: sk-123\n  model: gpt\nmax_workers: 4\ndisplay_language: en\n",
        )
        .unwrap();

        let store = YamlConfigStore::new(&path);
        store.write("display_language", "zh-CN").unwrap();

        assert_eq!(store.read("api.key").unwrap().as_deref(), Some("sk-123"));
        assert_eq!(store.read("max_workers").unwrap().as_deref(), Some("4"));
        assert_eq!(
            store.read("display_language").unwrap().as_deref(),
            Some("zh-CN")
        );
    }

    #[test]
    fn test_dotted_write_creates_intermediate_mappings() {
        let temp = tempdir().unwrap();
        let store = YamlConfigStore::new(temp.path().join("config.yaml"));

        store.write("whisper.language", "en").unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("whisper:"));
        assert_eq!(store.read("whisper.language").unwrap().as_deref(), Some("en"));
    }

    const COMMENTED: &str = "# VideoLingo settings\n\
        # display language for the UI\n\
        display_language: en\n\
        api:\n  \
        key: 'your-api-key' # get one at example.com\n  \
        flag: 'yes'\n";

    #[test]
    fn test_write_keeps_comments_and_quoting() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, COMMENTED).unwrap();

        let store = YamlConfigStore::new(&path);
        store.write("display_language", "en").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), COMMENTED);

        store.write("display_language", "zh-CN").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, COMMENTED.replace("display_language: en", "display_language: zh-CN"));
        assert_eq!(store.read("api.flag").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn test_new_keys_keep_existing_comments() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, COMMENTED).unwrap();

        let store = YamlConfigStore::new(&path);
        store.write("api.model", "gpt-4o").unwrap();
        store.write("whisper.language", "ja").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("# VideoLingo settings\n# display language for the UI\n"));
        assert!(raw.contains("  key: 'your-api-key' # get one at example.com\n"));
        assert!(raw.contains("  flag: 'yes'\n  model: gpt-4o\n"));
        assert!(raw.ends_with("whisper:\n  language: ja\n"));
        assert_eq!(store.read("api.model").unwrap().as_deref(), Some("gpt-4o"));
        assert_eq!(store.read("whisper.language").unwrap().as_deref(), Some("ja"));
    }

    #[test]
    fn test_values_that_look_typed_stay_strings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "# workers\nmax_workers: 4\n").unwrap();

        let store = YamlConfigStore::new(&path);
        store.write("max_workers", "8").unwrap();
        store.write("enabled", "no").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("# workers\n"));
        let document: Value = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(document.get("max_workers"), Some(&Value::String("8".into())));
        assert_eq!(document.get("enabled"), Some(&Value::String("no".into())));
    }

    #[test]
    fn test_flow_mapping_falls_back_to_rewrite() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "api: {key: abc}\n").unwrap();

        let store = YamlConfigStore::new(&path);
        store.write("api.model", "gpt").unwrap();
        assert_eq!(store.read("api.key").unwrap().as_deref(), Some("abc"));
        assert_eq!(store.read("api.model").unwrap().as_deref(), Some("gpt"));
    }

    #[test]
    fn test_write_through_scalar_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "whisper: large\n").unwrap();

        let store = YamlConfigStore::new(&path);
        let err = store.write("whisper.language", "en").unwrap_err();
        assert!(matches!(err, ConfigStoreError::NotAMapping { .. }));
    }

    #[test]
    fn test_missing_nested_key_is_none() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "api:\n  key: abc\n").unwrap();

        let store = YamlConfigStore::new(&path);
        assert_eq!(store.read("api.base_url").unwrap(), None);
        assert_eq!(store.read("nope.deeper").unwrap(), None);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let store = YamlConfigStore::new(&path);
        assert!(matches!(
            store.read("key").unwrap_err(),
            ConfigStoreError::Parse { .. }
        ));
    }

    #[test]
    fn test_empty_key_segment_is_invalid() {
        let temp = tempdir().unwrap();
        let store = YamlConfigStore::new(temp.path().join("config.yaml"));
        assert!(matches!(
            store.write("a..b", "x").unwrap_err(),
            ConfigStoreError::InvalidKey(_)
        ));
    }
}
