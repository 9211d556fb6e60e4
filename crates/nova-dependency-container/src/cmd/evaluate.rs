use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use dependency_rules::{DependencyRule, DependencyRuleSet, evaluate, explain};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dependencies::HasDependencies;
use crate::visibility::{VisibilityMap, resolve_visibility};

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Container descriptor (.json or .toml) whose dependencies are evaluated
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with = "rules",
        required_unless_present = "rules"
    )]
    pub descriptor: Option<PathBuf>,
    /// JSON file holding a bare list of dependency rules
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,
    /// JSON object file with the current field values
    #[arg(long, value_name = "PATH")]
    pub values: Option<PathBuf>,
    /// Set a field value; parsed as JSON, otherwise taken as a string
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, Value)>,
    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
    /// Fail when the rules are not satisfied
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateReport {
    pub satisfied: bool,
    pub rules: Vec<RuleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityMap>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub rule: DependencyRule,
    pub satisfied: bool,
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    let report = build_report(&args)?;
    if args.json {
        super::print_json(&report)?;
    } else {
        println!(
            "{}",
            if report.satisfied {
                "satisfied"
            } else {
                "not satisfied"
            }
        );
        for outcome in report.rules.iter().filter(|outcome| !outcome.satisfied) {
            println!("  blocked by {}", outcome.rule.to_value());
        }
    }

    if args.check && !report.satisfied {
        bail!("dependency rules are not satisfied");
    }
    Ok(())
}

pub fn build_report(args: &EvaluateArgs) -> Result<EvaluateReport> {
    let values = load_values(args)?;

    let (rules, visibility) = match (&args.descriptor, &args.rules) {
        (Some(path), _) => {
            let container = super::load_descriptor(path)?.into_container();
            let visibility = resolve_visibility(&container, &values);
            let rules = container.dependency_rules().clone();
            (rules, Some(visibility))
        }
        (None, Some(path)) => (load_rules(path)?, None),
        (None, None) => bail!("either --descriptor or --rules is required"),
    };

    let satisfied = evaluate(&rules, &values);
    let outcomes = explain(&rules, &values)
        .into_iter()
        .map(|outcome| RuleReport {
            rule: outcome.rule.clone(),
            satisfied: outcome.satisfied,
        })
        .collect();

    Ok(EvaluateReport {
        satisfied,
        rules: outcomes,
        visibility,
    })
}

fn load_rules(path: &Path) -> Result<DependencyRuleSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    DependencyRuleSet::from_json_str(&raw)
        .with_context(|| format!("invalid dependency rules in {}", path.display()))
}

fn load_values(args: &EvaluateArgs) -> Result<Map<String, Value>> {
    let mut values = match &args.values {
        Some(path) => super::read_json_object(path)?,
        None => Map::new(),
    };
    for (field, value) in &args.set {
        values.insert(field.clone(), value.clone());
    }
    Ok(values)
}

fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}
