use anyhow::Result;
use clap::Args;

use crate::descriptor::ContainerDescriptor;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Print the schema of a bare rule list instead of a full descriptor
    #[arg(long)]
    pub rules: bool,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    if args.rules {
        super::print_json(&dependency_rules::rule_set_schema())
    } else {
        super::print_json(&ContainerDescriptor::schema())
    }
}
