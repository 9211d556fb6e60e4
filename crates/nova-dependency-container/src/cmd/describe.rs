use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    /// Container descriptor (.json or .toml)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,
    /// JSON object with resource attributes to resolve child values from
    #[arg(long, value_name = "PATH")]
    pub resource: Option<PathBuf>,
}

pub fn run(args: DescribeArgs) -> Result<()> {
    super::print_json(&describe(&args)?)
}

pub fn describe(args: &DescribeArgs) -> Result<Value> {
    let mut container = super::load_descriptor(&args.descriptor)?.into_container();
    if let Some(path) = &args.resource {
        let resource = super::read_json_object(path)?;
        container.resolve_for_display(&resource);
    }
    Ok(container.json_serialize())
}
