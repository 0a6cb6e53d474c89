//! Select command
//!
//! Usage: logihash select --property <NAME>... [--inherited <NAME>]... [--include <NAME>]... [--exclude <NAME>]...
//!
//! Prints one `position<TAB>property` line per selected property.

use clap::Args;
use logihash_core::{LogicalType, SelectionConfig, TypeDecl};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Type name
    #[arg(long = "type", default_value = "Type")]
    pub type_name: String,

    /// Properties declared on the type, in declaration order
    #[arg(short, long = "property", value_name = "NAME")]
    pub properties: Vec<String>,

    /// Properties declared on the parent type, in declaration order
    #[arg(long = "inherited", value_name = "NAME")]
    pub inherited: Vec<String>,

    /// Properties to include
    #[arg(long = "include", value_name = "NAME")]
    pub includes: Vec<String>,

    /// Properties to exclude
    #[arg(long = "exclude", value_name = "NAME")]
    pub excludes: Vec<String>,

    /// Treat includes and excludes as one declaration site, which may not carry both
    #[arg(long)]
    pub single_site: bool,
}

/// Execute select command
pub fn execute(args: SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut decl = TypeDecl::new(args.type_name.as_str(), args.properties);
    if !args.inherited.is_empty() {
        let parent = TypeDecl::new(format!("{}Parent", args.type_name), args.inherited);
        decl = decl.extends(Arc::new(parent));
    }

    let mut builder = LogicalType::builder(decl);
    if args.single_site {
        builder = builder.declare(SelectionConfig {
            includes: args.includes,
            excludes: args.excludes,
        });
    } else {
        builder = builder.includes(args.includes).excludes(args.excludes);
    }
    let ty = builder.build()?;

    if ty.properties().is_empty() {
        println!("(no properties selected; {} hashes to its type name)", ty.name());
    }
    for (position, name) in ty.properties().iter().enumerate() {
        println!("{}\t{}", position, name);
    }
    Ok(())
}
