use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};

/// Envelope of a command document handed off to the host agent.
///
/// Only the envelope is modeled. Runtime config entries and step payloads
/// stay as raw JSON values: the consuming agent owns their interpretation,
/// and the submitter must hand them over untouched.
///
/// Two schema generations are accepted:
/// - `1.2` carries its work in `runtimeConfig`
/// - `2.0` carries its work in `mainSteps`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDocument {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_steps: Option<Vec<Value>>,
}

impl CommandDocument {
    /// Checks the schema invariant: the section that carries the work for
    /// the declared schema version must be present and non-empty.
    pub fn validate(&self) -> ModelResult<()> {
        match self.schema_version.as_str() {
            "1.2" => match &self.runtime_config {
                Some(config) if !config.is_empty() => Ok(()),
                _ => Err(ModelError::EmptyRuntimeConfig),
            },
            "2.0" => match &self.main_steps {
                Some(steps) if !steps.is_empty() => Ok(()),
                _ => Err(ModelError::EmptyMainSteps),
            },
            other => Err(ModelError::UnsupportedSchemaVersion(other.to_string())),
        }
    }

    /// Renders the canonical wire form: compact JSON with absent sections
    /// omitted. This exact string is what the mailbox persists.
    pub fn to_canonical_json(&self) -> ModelResult<String> {
        serde_json::to_string(self).map_err(|e| ModelError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::CommandDocument;
    use crate::error::ModelError;

    fn runtime_config() -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("runScript".to_string(), json!({"properties": []}));
        config
    }

    #[test]
    fn v12_with_runtime_config_is_valid() {
        let doc = CommandDocument {
            schema_version: "1.2".to_string(),
            runtime_config: Some(runtime_config()),
            main_steps: None,
        };

        assert!(doc.validate().is_ok());
    }

    #[test]
    fn v12_without_runtime_config_is_rejected() {
        for runtime_config in [None, Some(Map::new())] {
            let doc = CommandDocument {
                schema_version: "1.2".to_string(),
                runtime_config,
                main_steps: None,
            };

            assert!(matches!(
                doc.validate(),
                Err(ModelError::EmptyRuntimeConfig)
            ));
        }
    }

    #[test]
    fn v20_with_main_steps_is_valid() {
        let doc = CommandDocument {
            schema_version: "2.0".to_string(),
            runtime_config: None,
            main_steps: Some(vec![json!({"action": "runShellScript"})]),
        };

        assert!(doc.validate().is_ok());
    }

    #[test]
    fn v20_without_main_steps_is_rejected() {
        for main_steps in [None, Some(Vec::new())] {
            let doc = CommandDocument {
                schema_version: "2.0".to_string(),
                runtime_config: None,
                main_steps,
            };

            assert!(matches!(doc.validate(), Err(ModelError::EmptyMainSteps)));
        }
    }

    #[test]
    fn unknown_version_names_the_version() {
        let doc = CommandDocument {
            schema_version: "3.1".to_string(),
            runtime_config: Some(runtime_config()),
            main_steps: None,
        };

        let err = doc.validate().unwrap_err();
        assert_eq!(err.to_string(), "unsupported schema version 3.1");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let doc = CommandDocument {
            schema_version: "2.0".to_string(),
            runtime_config: None,
            main_steps: Some(vec![json!("step")]),
        };

        let wire = doc.to_canonical_json().unwrap();
        assert_eq!(wire, r#"{"schemaVersion":"2.0","mainSteps":["step"]}"#);
    }

    #[test]
    fn canonical_form_omits_absent_sections() {
        let doc = CommandDocument {
            schema_version: "1.2".to_string(),
            runtime_config: Some(runtime_config()),
            main_steps: None,
        };

        let wire = doc.to_canonical_json().unwrap();
        assert!(!wire.contains("mainSteps"));

        let restored: CommandDocument = serde_json::from_str(&wire).unwrap();
        assert_eq!(restored.to_canonical_json().unwrap(), wire);
    }
}
