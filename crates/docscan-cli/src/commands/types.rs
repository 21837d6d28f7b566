//! Types command - list supported document types.

use clap::Args;
use console::style;
use serde::Serialize;

use docscan_core::{registry, DocumentType};

/// Arguments for the types command.
#[derive(Args)]
pub struct TypesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TypeInfo {
    tag: &'static str,
    label: &'static str,
    fields: Vec<&'static str>,
}

pub fn run(args: TypesArgs) -> anyhow::Result<()> {
    let types: Vec<TypeInfo> = DocumentType::ALL
        .into_iter()
        .filter_map(|t| {
            registry().get_type(t).map(|extractor| TypeInfo {
                tag: t.tag(),
                label: t.label(),
                fields: extractor.field_names(),
            })
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    for info in &types {
        println!("{} {}", style(info.tag).bold().cyan(), style(info.label).dim());
        println!("    {}", info.fields.join(", "));
    }

    Ok(())
}
