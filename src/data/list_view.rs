//! The list-view pipeline: one collection in, one page of rows out.
//!
//! `ListView` owns a `RecordSet` and a pile of presentation state (search
//! query, sort column, page size, current page). Mutators keep a cached
//! index of matching rows up to date; `page_view` is a pure read that
//! slices the current page out of that index.

use crate::data::field_compare::compare_slots;
use crate::data::records::{Record, RecordSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Page sizes the pager exposes. `set_page_size` rejects anything else.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Argument outside the operation's contract. Mutators that can fail
/// return this instead of panicking or silently ignoring the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, SortOrder::Ascending)
    }

    /// Arrow glyph for column headers.
    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

/// The single active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Snapshot of one page, plus the counters a pager widget needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub rows: Vec<Record>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub sort: Option<SortSpec>,
}

/// Sortable, searchable, paginated view over a `RecordSet`.
pub struct ListView {
    records: RecordSet,
    query: String,
    sort: Option<SortSpec>,
    fold_case_sort: bool,
    page_size: usize,
    current_page: usize,
    /// Indices into `records`, filtered and sorted. Rebuilt by `refresh`.
    visible: Vec<usize>,
}

impl ListView {
    pub fn new(records: RecordSet) -> Self {
        let mut view = Self {
            records,
            query: String::new(),
            sort: None,
            fold_case_sort: true,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    /// Compare text columns bytewise instead of case-folded.
    pub fn with_case_sensitive_sort(mut self, sensitive: bool) -> Self {
        self.fold_case_sort = !sensitive;
        self.refresh();
        self
    }

    // --- mutators ---

    /// Update the free-text query and jump back to page 1.
    ///
    /// The query is kept verbatim; matching trims it and compares
    /// case-insensitively against the searchable text columns. A query
    /// that is empty after trimming matches everything.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
        self.refresh();
        debug!(
            "Search '{}' on '{}' matches {} of {} records",
            self.query.trim(),
            self.records.name,
            self.visible.len(),
            self.records.record_count()
        );
    }

    /// Sort by `field`, cycling the direction.
    ///
    /// A new field starts ascending; repeating the current field flips it.
    /// There is no unsorted third state. Unknown field names are accepted
    /// and every row compares as null, which leaves the filtered order
    /// unchanged (the sort is stable). The current page is kept; the rows
    /// under it change, not the pager position.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        let order = match &self.sort {
            Some(spec) if spec.field == field => spec.order.flipped(),
            _ => SortOrder::Ascending,
        };
        debug!("Sorting '{}' by '{}' {:?}", self.records.name, field, order);
        self.sort = Some(SortSpec { field, order });
        self.refresh();
    }

    /// Change the page size, keeping the first row of the current page
    /// visible. The new page is the one containing that row.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), InvalidArgument> {
        if !PAGE_SIZES.contains(&size) {
            return Err(InvalidArgument(format!(
                "page size {} not in {:?}",
                size, PAGE_SIZES
            )));
        }
        if size != self.page_size {
            let anchor = (self.current_page - 1) * self.page_size;
            self.page_size = size;
            self.current_page = anchor / size + 1;
            self.clamp_page();
        }
        Ok(())
    }

    /// Jump to a page. Pages start at 1; a target past the end clamps to
    /// the last page.
    pub fn set_page(&mut self, page: usize) -> Result<(), InvalidArgument> {
        if page == 0 {
            return Err(InvalidArgument("page numbers start at 1".to_string()));
        }
        self.current_page = page.min(self.total_pages());
        Ok(())
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Swap in a new collection wholesale. Search and sort settings are
    /// kept and re-applied; the page resets to 1 so the view never points
    /// past the end of the new data.
    pub fn replace_records(&mut self, records: RecordSet) {
        debug!(
            "Replacing '{}' ({} records) with {} records",
            self.records.name,
            self.records.record_count(),
            records.record_count()
        );
        self.records = records;
        self.current_page = 1;
        self.refresh();
    }

    // --- reads ---

    /// Project the current page. Pure: no internal state moves, and two
    /// calls without an intervening mutation return the same view.
    pub fn page_view(&self) -> PageView {
        let start = (self.current_page - 1) * self.page_size;
        let rows = self
            .visible
            .iter()
            .skip(start)
            .take(self.page_size)
            .filter_map(|&idx| self.records.records.get(idx).cloned())
            .collect();

        PageView {
            rows,
            total_count: self.visible.len(),
            total_pages: self.total_pages(),
            current_page: self.current_page,
            page_size: self.page_size,
            sort: self.sort.clone(),
        }
    }

    /// The full filtered-and-sorted sequence, ignoring pagination. Export
    /// paths use this so a CSV dump is not cut off at the page boundary.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
        self.visible
            .iter()
            .filter_map(|&idx| self.records.records.get(idx))
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn search_query(&self) -> &str {
        &self.query
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// `max(1, ceil(count / size))`: an empty result set still has one
    /// (empty) page so the pager always has somewhere to stand.
    pub fn total_pages(&self) -> usize {
        let count = self.visible.len();
        if count == 0 {
            1
        } else {
            count.div_ceil(self.page_size)
        }
    }

    // --- internals ---

    /// Rebuild the visible index: filter, then stable sort.
    fn refresh(&mut self) {
        let needle = self.query.trim().to_lowercase();
        let searchable = self.records.searchable_indices();

        let mut visible: Vec<usize> = (0..self.records.record_count())
            .filter(|&row| {
                if needle.is_empty() {
                    return true;
                }
                searchable.iter().any(|&col| {
                    self.records
                        .value(row, col)
                        .and_then(|v| v.as_text())
                        .map(|text| text.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            })
            .collect();

        if let Some(spec) = &self.sort {
            let records = &self.records;
            let column = records.field_index(&spec.field);
            let ascending = spec.order.is_ascending();
            let fold_case = self.fold_case_sort;
            visible.sort_by(|&a, &b| {
                compare_slots(
                    column.and_then(|col| records.value(a, col)),
                    column.and_then(|col| records.value(b, col)),
                    ascending,
                    fold_case,
                )
            });
        }

        self.visible = visible;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let pages = self.total_pages();
        if self.current_page > pages {
            self.current_page = pages;
        }
        if self.current_page == 0 {
            self.current_page = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{FieldDef, FieldValue};

    fn plans() -> RecordSet {
        let mut set = RecordSet::new(
            "plans",
            vec![
                FieldDef::text("name").searchable(),
                FieldDef::float("price"),
            ],
        );
        for (name, price) in [
            ("Basico", Some(50.0)),
            ("Pro", Some(10.0)),
            ("Empresa", Some(30.0)),
        ] {
            set.add_record(Record::new(vec![
                FieldValue::Text(name.to_string()),
                price.map(FieldValue::Float).unwrap_or(FieldValue::Null),
            ]))
            .unwrap();
        }
        set
    }

    fn names(view: &ListView) -> Vec<String> {
        view.page_view()
            .rows
            .iter()
            .map(|r| r.get(0).map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_toggle_cycles_ascending_then_descending() {
        let mut view = ListView::new(plans());

        view.toggle_sort("price");
        assert_eq!(names(&view), vec!["Pro", "Empresa", "Basico"]);
        assert_eq!(
            view.sort_spec().map(|s| s.order),
            Some(SortOrder::Ascending)
        );

        view.toggle_sort("price");
        assert_eq!(names(&view), vec!["Basico", "Empresa", "Pro"]);
        assert_eq!(
            view.sort_spec().map(|s| s.order),
            Some(SortOrder::Descending)
        );

        // Third press goes back to ascending, never to unsorted.
        view.toggle_sort("price");
        assert_eq!(
            view.sort_spec().map(|s| s.order),
            Some(SortOrder::Ascending)
        );
    }

    #[test]
    fn test_switching_field_starts_ascending() {
        let mut view = ListView::new(plans());
        view.toggle_sort("price");
        view.toggle_sort("price");
        view.toggle_sort("name");
        assert_eq!(
            view.sort_spec(),
            Some(&SortSpec {
                field: "name".to_string(),
                order: SortOrder::Ascending
            })
        );
    }

    #[test]
    fn test_unknown_sort_field_is_accepted_and_order_kept() {
        let mut view = ListView::new(plans());
        view.toggle_sort("no_such_field");
        // Every row compares as null; the stable sort keeps insertion order.
        assert_eq!(names(&view), vec!["Basico", "Pro", "Empresa"]);
        assert_eq!(view.sort_spec().map(|s| s.field.as_str()), Some("no_such_field"));
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let mut view = ListView::new(plans());
        view.set_search("  BAS  ");
        assert_eq!(names(&view), vec!["Basico"]);
        assert_eq!(view.search_query(), "  BAS  ");

        view.set_search("   ");
        assert_eq!(view.filtered_count(), 3);
    }

    #[test]
    fn test_page_size_must_be_on_the_menu() {
        let mut view = ListView::new(plans());
        let err = view.set_page_size(7).unwrap_err();
        assert!(err.to_string().contains("7"));
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        view.set_page_size(50).unwrap();
        assert_eq!(view.page_size(), 50);
    }

    #[test]
    fn test_page_zero_rejected_high_page_clamped() {
        let mut view = ListView::new(plans());
        assert!(view.set_page(0).is_err());
        view.set_page(99).unwrap();
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_replace_records_resets_page() {
        let mut view = ListView::new(plans());
        view.set_search("empresa");
        view.replace_records(RecordSet::new(
            "plans",
            vec![
                FieldDef::text("name").searchable(),
                FieldDef::float("price"),
            ],
        ));
        let page = view.page_view();
        assert_eq!(page.current_page, 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 1);
        // The query survives the swap.
        assert_eq!(view.search_query(), "empresa");
    }

    #[test]
    fn test_page_view_is_idempotent() {
        let mut view = ListView::new(plans());
        view.set_search("o");
        view.toggle_sort("price");
        assert_eq!(view.page_view(), view.page_view());
    }

    #[test]
    fn test_nulls_sort_last_in_both_directions() {
        let mut set = plans();
        set.add_record(Record::new(vec![
            FieldValue::Text("Gratis".to_string()),
            FieldValue::Null,
        ]))
        .unwrap();

        let mut view = ListView::new(set);
        view.toggle_sort("price");
        assert_eq!(names(&view), vec!["Pro", "Empresa", "Basico", "Gratis"]);
        view.toggle_sort("price");
        assert_eq!(names(&view), vec!["Basico", "Empresa", "Pro", "Gratis"]);
    }
}
