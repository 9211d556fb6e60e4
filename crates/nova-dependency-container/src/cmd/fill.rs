use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value};

#[derive(Args, Debug, Clone)]
pub struct FillArgs {
    /// Container descriptor (.json or .toml)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,
    /// JSON object with the submitted request values
    #[arg(long, value_name = "PATH")]
    pub request: PathBuf,
    /// JSON object with the existing model attributes
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,
}

pub fn run(args: FillArgs) -> Result<()> {
    super::print_json(&fill(&args)?)
}

pub fn fill(args: &FillArgs) -> Result<Map<String, Value>> {
    let container = super::load_descriptor(&args.descriptor)?.into_container();
    let request = super::read_json_object(&args.request)?;
    let mut model = match &args.model {
        Some(path) => super::read_json_object(path)?,
        None => Map::new(),
    };
    container.fill(&request, &mut model);
    Ok(model)
}
