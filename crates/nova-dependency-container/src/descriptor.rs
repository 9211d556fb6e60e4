use std::fs;
use std::path::{Path, PathBuf};

use dependency_rules::DependencyRuleSet;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::DependencyContainer;
use crate::dependencies::HasDependencies;
use crate::field::{BasicField, Field};

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid toml descriptor: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported descriptor format for {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
}

/// Child field declared in a descriptor file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl FieldDescriptor {
    pub fn into_field(self) -> BasicField {
        let mut field = BasicField::new(self.name);
        if let Some(attribute) = self.attribute {
            field = field.with_attribute(attribute);
        }
        if let Some(component) = self.component {
            field = field.with_component(component);
        }
        field
    }
}

/// File format describing a dependency container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub dependencies: DependencyRuleSet,
    #[serde(default)]
    pub apply_to_fields: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
}

impl ContainerDescriptor {
    /// Loads a descriptor, picking the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let raw = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw)?,
            Some("toml") => Self::from_toml_str(&raw)?,
            _ => {
                return Err(DescriptorError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        tracing::debug!(
            path = %path.display(),
            fields = descriptor.fields.len(),
            rules = descriptor.dependencies.len(),
            "loaded container descriptor"
        );
        Ok(descriptor)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DescriptorError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn into_container(self) -> DependencyContainer {
        let fields = self
            .fields
            .into_iter()
            .map(|field| Box::new(field.into_field()) as Box<dyn Field>);
        let mut container = DependencyContainer::new(fields);
        for rule in self.dependencies {
            container.add_dependency(rule);
        }
        if self.apply_to_fields {
            container = container.apply_to_fields();
        }
        if let Some(panel) = self.panel {
            container = container.with_panel(panel);
        }
        container
    }

    pub fn schema() -> Schema {
        schema_for!(ContainerDescriptor)
    }
}
