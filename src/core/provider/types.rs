//! Provider data types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Nested configuration read from a provider
pub type ConfigTree = BTreeMap<String, ConfigValue>;

/// A value in a [`ConfigTree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    List(Vec<String>),
    Map(ConfigTree),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the nested map, replacing any other value with an empty map first
    pub(crate) fn make_map(&mut self) -> &mut ConfigTree {
        if !matches!(self, ConfigValue::Map(_)) {
            *self = ConfigValue::Map(ConfigTree::new());
        }
        match self {
            ConfigValue::Map(map) => map,
            _ => unreachable!("value was just replaced by a map"),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        match self {
            ConfigValue::String(value) => serde_json::Value::String(value.clone()),
            ConfigValue::List(values) => serde_json::Value::Array(
                values.iter().cloned().map(serde_json::Value::String).collect(),
            ),
            ConfigValue::Map(map) => tree_to_value(map),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

fn tree_to_value(tree: &ConfigTree) -> serde_json::Value {
    serde_json::Value::Object(
        tree.iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect(),
    )
}

/// Source of a configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Docker,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Docker => f.write_str("docker"),
        }
    }
}

/// One complete configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderData {
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub config: ConfigTree,
}

impl ProviderData {
    pub fn new(provider_type: ProviderType, config: ConfigTree) -> Self {
        Self {
            provider_type,
            config,
        }
    }

    pub fn empty(provider_type: ProviderType) -> Self {
        Self::new(provider_type, ConfigTree::new())
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    /// The snapshot as an untyped tree for the host's config decoder
    pub fn to_value(&self) -> serde_json::Value {
        tree_to_value(&self.config)
    }
}
