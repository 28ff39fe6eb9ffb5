#[cfg(test)]
mod pagination_tests {
    use boletin_cli::data::list_view::{ListView, DEFAULT_PAGE_SIZE, PAGE_SIZES};
    use boletin_cli::data::records::{FieldDef, FieldValue, Record, RecordSet};

    fn table_with(count: usize) -> RecordSet {
        let mut set = RecordSet::new(
            "items",
            vec![
                FieldDef::text("label").searchable(),
                FieldDef::integer("n"),
            ],
        );
        for i in 0..count {
            set.add_record(Record::new(vec![
                FieldValue::Text(format!("item {:02}", i)),
                FieldValue::Integer(i as i64),
            ]))
            .unwrap();
        }
        set
    }

    fn first_label(view: &ListView) -> String {
        view.page_view()
            .rows
            .first()
            .and_then(|r| r.get(0))
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_only_menu_page_sizes_are_accepted() {
        let mut view = ListView::new(table_with(30));

        for size in PAGE_SIZES {
            assert!(view.set_page_size(size).is_ok(), "size {} rejected", size);
        }
        for size in [0, 3, 7, 15, 100] {
            let err = view.set_page_size(size).unwrap_err();
            assert!(
                err.to_string().contains(&size.to_string()),
                "error for {} does not name the value: {}",
                size,
                err
            );
        }
        // A rejected size leaves the previous one in place.
        assert_eq!(view.page_size(), 50);
    }

    #[test]
    fn test_new_view_opens_on_page_one_with_default_size() {
        let view = ListView::new(table_with(25));
        let page = view.page_view();
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_change_keeps_first_visible_row() {
        let mut view = ListView::new(table_with(50));
        view.set_page(4).unwrap();
        // Page 4 at size 10 starts with item 30.
        assert_eq!(first_label(&view), "item 30");

        view.set_page_size(5).unwrap();
        assert_eq!(view.current_page(), 7);
        assert_eq!(first_label(&view), "item 30");

        // Growing the size lands on the page that contains the old anchor.
        view.set_page_size(20).unwrap();
        assert_eq!(view.current_page(), 2);
        let labels: Vec<String> = view
            .page_view()
            .rows
            .iter()
            .filter_map(|r| r.get(0).map(|v| v.to_string()))
            .collect();
        assert!(labels.contains(&"item 30".to_string()));
    }

    #[test]
    fn test_setting_the_same_size_is_a_no_op() {
        let mut view = ListView::new(table_with(50));
        view.set_page(3).unwrap();
        view.set_page_size(DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let mut view = ListView::new(table_with(10));
        let err = view.set_page(0).unwrap_err();
        assert!(err.to_string().contains("start at 1"));
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_page_past_the_end_clamps_to_last() {
        let mut view = ListView::new(table_with(23));
        view.set_page(99).unwrap();
        assert_eq!(view.current_page(), 3);
        assert_eq!(view.page_view().rows.len(), 3);
    }

    #[test]
    fn test_empty_collection_still_has_one_page() {
        let view = ListView::new(table_with(0));
        let page = view.page_view();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_phantom_page() {
        let mut view = ListView::new(table_with(20));
        assert_eq!(view.total_pages(), 2);
        view.set_page(2).unwrap();
        assert_eq!(view.page_view().rows.len(), 10);
    }

    #[test]
    fn test_last_page_holds_the_remainder() {
        let mut view = ListView::new(table_with(23));
        view.set_page_size(5).unwrap();
        assert_eq!(view.total_pages(), 5);
        view.set_page(5).unwrap();
        assert_eq!(view.page_view().rows.len(), 3);
    }

    #[test]
    fn test_next_and_previous_stop_at_the_edges() {
        let mut view = ListView::new(table_with(12));
        view.set_page_size(5).unwrap();

        view.previous_page();
        assert_eq!(view.current_page(), 1);

        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);
        view.next_page();
        assert_eq!(view.current_page(), 3);
    }
}
