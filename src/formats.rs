use camino::Utf8Path;
use serde::Serialize;

use crate::error::SaveError;

/// Serialization formats understood by `save_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
    /// Opaque binary encoding of the value (`bincode`).
    Binary,
}

/// Extension routing table. Lookups are case-sensitive.
pub const FORMATS: &[(&str, DataFormat)] = &[
    ("json", DataFormat::Json),
    ("yml", DataFormat::Yaml),
    ("yaml", DataFormat::Yaml),
    ("toml", DataFormat::Toml),
    ("pkl", DataFormat::Binary),
    ("pickle", DataFormat::Binary),
];

impl DataFormat {
    pub fn from_extension(extension: &str) -> Result<Self, SaveError> {
        FORMATS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
            .ok_or_else(|| SaveError::UnsupportedFormat {
                extension: extension.to_owned(),
                supported: supported_extensions(),
            })
    }

    /// Pick a format from the text after the last dot of the file name.
    pub fn from_path(path: &Utf8Path) -> Result<Self, SaveError> {
        let extension = path
            .file_name()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Yaml => "yaml",
            DataFormat::Toml => "toml",
            DataFormat::Binary => "binary",
        }
    }

    /// Encode `value` in this format. Nothing touches the disk until this succeeds.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SaveError> {
        let fail = |message: String| SaveError::Serialize {
            format: self.as_str(),
            message,
        };
        match self {
            DataFormat::Json => {
                let mut text = serde_json::to_string_pretty(value).map_err(|e| fail(e.to_string()))?;
                text.push('\n');
                Ok(text.into_bytes())
            }
            DataFormat::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| fail(e.to_string())),
            DataFormat::Toml => toml::to_string_pretty(value)
                .map(String::into_bytes)
                .map_err(|e| fail(e.to_string())),
            DataFormat::Binary => bincode::serialize(value).map_err(|e| fail(e.to_string())),
        }
    }
}

fn supported_extensions() -> String {
    FORMATS
        .iter()
        .map(|(ext, _)| *ext)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn routes_known_extensions() {
        assert_eq!(DataFormat::from_extension("json").unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_extension("yml").unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_extension("yaml").unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::from_extension("toml").unwrap(), DataFormat::Toml);
        assert_eq!(DataFormat::from_extension("pkl").unwrap(), DataFormat::Binary);
        assert_eq!(DataFormat::from_extension("pickle").unwrap(), DataFormat::Binary);
    }

    #[test]
    fn extension_lookup_is_case_sensitive() {
        let err = DataFormat::from_extension("JSON").unwrap_err();
        assert!(matches!(err, SaveError::UnsupportedFormat { ref extension, .. } if extension == "JSON"));
    }

    #[test]
    fn from_path_uses_last_dot() {
        let path = Utf8Path::new("nested.dir/config.backup.yaml");
        assert_eq!(DataFormat::from_path(path).unwrap(), DataFormat::Yaml);
        assert!(DataFormat::from_path(Utf8Path::new("nested.json/Makefile")).is_err());
    }

    #[test]
    fn json_output_is_pretty_with_newline() {
        let data: BTreeMap<&str, i32> = [("a", 1)].into_iter().collect();
        let out = DataFormat::Json.encode(&data).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn toml_rejects_non_table_values() {
        let err = DataFormat::Toml.encode(&42).unwrap_err();
        assert!(matches!(err, SaveError::Serialize { format: "toml", .. }));
    }
}
