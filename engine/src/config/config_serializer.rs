use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to write settings as YAML: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to parse settings YAML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_malformed_yaml_is_reported() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<BTreeMap<String, u64>, String> = serializer.deserialize("grid_size: [1, 2");
        let err = result.unwrap_err();
        assert!(err.starts_with("Failed to parse settings YAML"), "{}", err);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        #[derive(Debug, Deserialize, Serialize)]
        struct Sample {
            grid_size: usize,
        }
        let serializer = YamlConfigSerializer::new();
        let result: Result<Sample, String> = serializer.deserialize("other: 1\n");
        assert!(result.is_err());
        assert_eq!(serializer.serialize(&Sample { grid_size: 4 }).unwrap(), "grid_size: 4\n");
    }
}
