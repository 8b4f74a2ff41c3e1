use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rsrcfork::Resource;
use serde::Serialize;

use crate::{
    app::{ForkArgs, GlobalOptions},
    commands::common::{load_fork, select, type_filter},
    output::print_output,
};

#[derive(Debug, Serialize)]
struct ExtractedEntry {
    type_code: String,
    id: i16,
    size: usize,
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ExtractOutput {
    extracted: Vec<ExtractedEntry>,
    count: usize,
}

pub fn run(
    args: &ForkArgs,
    id: Option<i16>,
    output_dir: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let fork = load_fork(args)?;
    let type_code = type_filter(args)?;
    let out = output_dir.unwrap_or_else(|| Path::new("."));

    let selected: Vec<&Resource> = select(&fork, type_code)
        .filter(|resource| id.map_or(true, |id| resource.id() == id))
        .collect();

    if selected.is_empty() && (type_code.is_some() || id.is_some()) {
        bail!("no matching resource found in {}", args.path.display());
    }

    if !out.exists() {
        std::fs::create_dir_all(out)
            .with_context(|| format!("failed to create output directory: {}", out.display()))?;
    }

    let mut extracted = Vec::with_capacity(selected.len());
    for resource in selected {
        let dest = out.join(output_file_name(resource));
        std::fs::write(&dest, resource.data())
            .with_context(|| format!("failed to write resource to {}", dest.display()))?;

        log::debug!(
            "Wrote {} #{} ({} bytes) to {}",
            resource.type_code(),
            resource.id(),
            resource.data().len(),
            dest.display()
        );

        extracted.push(ExtractedEntry {
            type_code: resource.type_code().printable_form(),
            id: resource.id(),
            size: resource.data().len(),
            path: dest,
        });
    }

    let count = extracted.len();
    let output = ExtractOutput { extracted, count };

    print_output(&output, opts, |out| {
        for e in &out.extracted {
            println!(
                "  extracted: {} #{} ({} bytes) -> {}",
                e.type_code,
                e.id,
                e.size,
                e.path.display()
            );
        }
        println!("\n{} extracted.", out.count);
    })
}

/// `<type>_<id>.bin`, with path separators in the type replaced.
fn output_file_name(resource: &Resource) -> String {
    let type_name = resource.type_code().printable_form().replace(['/', '\\'], "_");
    format!("{}_{}.bin", type_name, resource.id())
}
