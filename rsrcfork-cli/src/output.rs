use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::app::GlobalOptions;

/// Print `data` as pretty JSON under `--json`, otherwise hand it to `display_fn`.
pub fn print_output<T: Serialize>(
    data: &T,
    opts: &GlobalOptions,
    display_fn: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        display_fn(data);
    }
    Ok(())
}

/// Borderless table with the given headers; columns listed in `numeric` are right-aligned.
pub fn plain_table(headers: &[&str], numeric: &[usize]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().copied());

    let last = headers.len().saturating_sub(1);
    for (i, column) in table.column_iter_mut().enumerate() {
        if numeric.contains(&i) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        column.set_padding((u16::from(i != 0), u16::from(i != last)));
    }
    table
}

/// Lines of `table` without the trailing whitespace `comfy-table` pads rows with.
fn render_table(table: &Table) -> Vec<String> {
    table
        .to_string()
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Print a table rendered by [`render_table`].
pub fn print_table(table: &Table) {
    for line in render_table(table) {
        println!("{line}");
    }
}
