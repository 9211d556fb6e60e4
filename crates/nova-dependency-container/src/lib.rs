#![allow(missing_docs)]

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod cmd;
pub mod container;
pub mod dependencies;
pub mod descriptor;
pub mod field;
pub mod visibility;

pub use container::{COMPONENT, DependencyContainer};
pub use dependencies::{Dependencies, HasDependencies};
pub use descriptor::{ContainerDescriptor, DescriptorError, FieldDescriptor};
pub use field::{Attributes, BasicField, Field, FillCallback, Meta};
pub use visibility::{VisibilityMap, resolve_visibility};

pub use dependency_rules::{
    DependencyRule, DependencyRuleSet, FieldValueSource, RuleError, RuleKind, RuleOutcome,
    evaluate, explain,
};
