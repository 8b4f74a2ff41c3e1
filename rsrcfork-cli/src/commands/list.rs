use serde::Serialize;

use crate::{
    app::{ForkArgs, GlobalOptions},
    commands::common::{attribute_names, load_fork, select, type_filter},
    output::{plain_table, print_output, print_table},
};

#[derive(Debug, Serialize)]
struct ResourceEntry {
    type_code: String,
    id: i16,
    name: Option<String>,
    attributes: u8,
    flags: Vec<String>,
    offset: usize,
    size: usize,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    resources: Vec<ResourceEntry>,
    count: usize,
}

pub fn run(args: &ForkArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let fork = load_fork(args)?;
    let type_code = type_filter(args)?;

    let resources: Vec<ResourceEntry> = select(&fork, type_code)
        .map(|resource| ResourceEntry {
            type_code: resource.type_code().printable_form(),
            id: resource.id(),
            name: resource.name().map(str::to_string),
            attributes: resource.attributes(),
            flags: attribute_names(resource),
            offset: resource.data_offset(),
            size: resource.data().len(),
        })
        .collect();

    let count = resources.len();
    let output = ListOutput { resources, count };

    print_output(&output, opts, |out| {
        if out.resources.is_empty() {
            println!("No resources found.");
            return;
        }

        let mut table = plain_table(
            &["Type", "ID", "Name", "Attributes", "Offset", "Size"],
            &[1, 4, 5],
        );
        for e in &out.resources {
            table.add_row(vec![
                e.type_code.clone(),
                e.id.to_string(),
                e.name.clone().unwrap_or_else(|| "-".to_string()),
                if e.flags.is_empty() {
                    "-".to_string()
                } else {
                    e.flags.join(",")
                },
                format!("0x{:06X}", e.offset),
                e.size.to_string(),
            ]);
        }
        print_table(&table);
        println!("\n{} resource(s) listed.", out.count);
    })
}
