use crate::data::list_view::ListView;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

/// Print the current page of a list view to stdout.
///
/// The sorted column carries its direction arrow in the header, and the
/// footer line shows where the page sits in the filtered set.
pub fn print_page(view: &ListView) {
    let page = view.page_view();

    if page.rows.is_empty() {
        println!("{}", "No matching records.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers: Vec<Cell> = view
        .records()
        .fields
        .iter()
        .map(|field| {
            let title = match view.sort_spec() {
                Some(spec) if spec.field == field.name => {
                    format!("{} {}", field.name, spec.order.indicator())
                }
                _ => field.name.clone(),
            };
            Cell::new(title).add_attribute(Attribute::Bold)
        })
        .collect();
    table.set_header(headers);

    for record in &page.rows {
        let row: Vec<String> = record.values.iter().map(|v| v.to_string()).collect();
        table.add_row(row);
    }

    println!("{table}");
    println!(
        "\n{}",
        format!(
            "Page {}/{} | {} matching records",
            page.current_page, page.total_pages, page.total_count
        )
        .green()
    );
}

/// Export the full filtered-and-sorted set to a CSV file. Pagination does
/// not apply here; an export is never cut off at the page boundary.
pub fn export_to_csv(view: &ListView, filename: &str) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(filename)?;

    wtr.write_record(view.records().field_names())?;

    for record in view.filtered_records() {
        let row: Vec<String> = record.values.iter().map(|v| v.to_string()).collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    println!(
        "{}",
        format!("Exported {} records to {}", view.filtered_count(), filename).green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListKind;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_filtered_sorted_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plans.csv");

        let mut view = ListView::new(ListKind::Plans.sample());
        view.set_search("pro");
        view.toggle_sort("price");
        export_to_csv(&view, path.to_str().unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "name,description,price,duration_days,active"
        );
        // Header plus every match, not just the visible page.
        assert_eq!(lines.len(), 1 + view.filtered_count());
        // Ascending by price: Pro (10) before Anual Pro (290).
        assert!(lines[1].starts_with("Pro,"));
    }
}
