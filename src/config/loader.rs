use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::config::types::{ConfigInput, DocumentShape, Options, OptionsInput, SlugFunc};
use crate::utils::error::{DoctocError, Result};

/// Keys recognised in a structured options mapping
const OPTION_KEYS: [&str; 11] = [
    "hRange",
    "hMin",
    "hMax",
    "hSelector",
    "hContext",
    "slugFunc",
    "idPrefix",
    "idLengthLimit",
    "makeIdsUnique",
    "alwaysUpdate",
    "documentShapeHint",
];

/// Configuration file for the `doctoc` binary
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DoctocConfig {
    /// Invocation defaults: a range/selector string or an options mapping
    #[serde(default)]
    pub options: Value,

    /// Single-use overrides keyed by file name
    #[serde(default)]
    pub files: HashMap<String, Value>,
}

/// Load a YAML configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DoctocConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path)?;
    parse_config(&content).map_err(|e| match e {
        DoctocError::Generic(msg) => {
            DoctocError::Generic(format!("Failed to parse YAML configuration ({}): {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse YAML configuration text
pub fn parse_config(content: &str) -> Result<DoctocConfig> {
    let config: DoctocConfig = serde_yaml::from_str(content).map_err(|e| DoctocError::Generic(e.to_string()))?;

    // resolve every layer so bad values surface before any file is processed
    let base = Options::default().derive(ConfigInput::from_yaml(&config.options)?)?;
    for (file, value) in &config.files {
        debug!("Checking options for {}", file);
        base.derive(ConfigInput::from_yaml(value)?)?;
    }

    Ok(config)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

fn read_string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DoctocError::validation(key, describe(value), "is not a string"))
}

fn read_integer(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| DoctocError::validation(key, describe(value), "is not a finite integer"))
}

fn read_bool(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| DoctocError::validation(key, describe(value), "is not a boolean"))
}

fn read_fields(map: &Mapping) -> Result<OptionsInput> {
    let mut input = OptionsInput::new();

    for (key, value) in map {
        let key = match key.as_str() {
            Some(key) => key,
            None => {
                warn!("Ignoring non-string options key: {}", describe(key));
                continue;
            }
        };

        match key {
            "hRange" => input.h_range = Some(read_string(key, value)?),
            "hMin" => input.h_min = Some(read_integer(key, value)?),
            "hMax" => input.h_max = Some(read_integer(key, value)?),
            "hSelector" => input.h_selector = Some(read_string(key, value)?),
            "hContext" => input.h_context = Some(read_string(key, value)?),
            "slugFunc" => {
                let name = read_string(key, value)?;
                let func = SlugFunc::named(&name).ok_or_else(|| {
                    DoctocError::validation(
                        key,
                        &name,
                        &format!("is not a function (expected one of: {})", SlugFunc::builtin_names().join(", ")),
                    )
                })?;
                input.slug_func = Some(func);
            }
            "idPrefix" => input.id_prefix = Some(read_string(key, value)?),
            "idLengthLimit" => input.id_length_limit = Some(read_integer(key, value)?),
            "makeIdsUnique" => input.make_ids_unique = Some(read_bool(key, value)?),
            "alwaysUpdate" => input.always_update = Some(read_bool(key, value)?),
            "documentShapeHint" => {
                let name = read_string(key, value)?;
                let shape = DocumentShape::from_name(&name).ok_or_else(|| {
                    DoctocError::validation(key, &name, "is not a document shape (expected auto, fragment or full-document)")
                })?;
                input.document_shape_hint = Some(shape);
            }
            _ => warn!("Ignoring unknown option '{}' (known options: {})", key, OPTION_KEYS.join(", ")),
        }
    }

    Ok(input)
}

impl ConfigInput {
    /// Read an options layer from YAML: null, a range/selector string, or a mapping
    pub fn from_yaml(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(ConfigInput::Empty),
            Value::String(text) => Ok(ConfigInput::Text(text.clone())),
            Value::Mapping(map) => Ok(ConfigInput::Fields(read_fields(map)?)),
            other => Err(DoctocError::Generic(format!(
                "invalid options argument: {}",
                describe(other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_from_yaml_forms() {
        assert!(matches!(ConfigInput::from_yaml(&Value::Null).unwrap(), ConfigInput::Empty));
        assert!(matches!(ConfigInput::from_yaml(&yaml("h1-3")).unwrap(), ConfigInput::Text(_)));

        let input = ConfigInput::from_yaml(&yaml(
            "hRange: h2-3\nidPrefix: ''\nmakeIdsUnique: true\nslugFunc: jekyll\ndocumentShapeHint: complete",
        ))
        .unwrap();
        let options = Options::from_input(input).unwrap();
        assert_eq!(options.selector(), "h2, h3");
        assert_eq!(options.id_prefix(), "");
        assert!(options.make_ids_unique());
        assert_eq!(options.slug_func().name(), "jekyll");
        assert_eq!(options.document_shape(), DocumentShape::FullDocument);
    }

    #[test]
    fn test_wrong_types_are_validation_errors() {
        let err = ConfigInput::from_yaml(&yaml("makeIdsUnique: 'yes'")).unwrap_err();
        assert!(matches!(err, DoctocError::ConfigValidation { ref field, .. } if field == "makeIdsUnique"));

        let err = ConfigInput::from_yaml(&yaml("idLengthLimit: 2.5")).unwrap_err();
        assert!(matches!(err, DoctocError::ConfigValidation { ref field, .. } if field == "idLengthLimit"));

        let err = ConfigInput::from_yaml(&yaml("idPrefix: 12")).unwrap_err();
        assert!(err.to_string().contains("idPrefix"));

        let err = ConfigInput::from_yaml(&yaml("slugFunc: nope")).unwrap_err();
        assert!(err.to_string().contains("slugFunc"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let input = ConfigInput::from_yaml(&yaml("jsdomOptions: {}\nhMin: 2")).unwrap();
        let options = Options::from_input(input).unwrap();
        assert_eq!(options.selector(), "h2, h3, h4, h5, h6");
    }

    #[test]
    fn test_sequence_is_not_an_options_argument() {
        assert!(ConfigInput::from_yaml(&yaml("[h1, h2]")).is_err());
    }

    #[test]
    fn test_parse_config_file() {
        let config = parse_config(
            "options: h1-4\nfiles:\n  guide.html:\n    idPrefix: g-\n    makeIdsUnique: true\n",
        )
        .unwrap();
        assert_eq!(config.options, Value::String("h1-4".to_string()));
        assert!(config.files.contains_key("guide.html"));
    }

    #[test]
    fn test_parse_config_reports_bad_file_layer() {
        assert!(parse_config("files:\n  a.html:\n    hMin: six\n").is_err());
    }

    #[test]
    fn test_parse_config_resolves_every_layer() {
        let err = parse_config("files:\n  b.html:\n    hMin: 3\n    hMax: 2\n").unwrap_err();
        assert!(matches!(err, DoctocError::ConfigValidation { ref field, .. } if field == "hMin,hMax"));

        assert!(matches!(parse_config("options: h9\n"), Err(DoctocError::InvalidConfigValue(_))));
        assert!(parse_config("files:\n  a.html: {idLengthLimit: 0}\n").is_err());
    }
}
