//! JSON and YAML output, straight from the serde derives of the node types

use super::{FormatError, TreeFormat};
use crate::paxter::ast::FragmentSeq;

pub fn to_json(tree: &FragmentSeq) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tree).map_err(|err| FormatError::Serialization(err.to_string()))
}

pub fn to_yaml(tree: &FragmentSeq) -> Result<String, FormatError> {
    serde_yaml::to_string(tree).map_err(|err| FormatError::Serialization(err.to_string()))
}

pub struct JsonFormat;

impl TreeFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full tree as pretty-printed JSON"
    }

    fn serialize(&self, tree: &FragmentSeq) -> Result<String, FormatError> {
        to_json(tree)
    }
}

pub struct YamlFormat;

impl TreeFormat for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Full tree as YAML"
    }

    fn serialize(&self, tree: &FragmentSeq) -> Result<String, FormatError> {
        to_yaml(tree)
    }
}
