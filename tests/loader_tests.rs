#[cfg(test)]
mod loader_tests {
    use boletin_cli::data::list_view::ListView;
    use boletin_cli::data::loaders::{load_csv_records, load_json_records};
    use boletin_cli::data::records::FieldValue;
    use boletin_cli::domain::ListKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_json_export_flows_into_a_searchable_view() {
        let file = write_temp(
            r#"[
                {"name": "Plan Norte", "description": "Cobertura en Trujillo", "price": 45.0, "duration_days": 30, "active": true},
                {"name": "Plan Sur", "description": "Cobertura en Arequipa", "price": 35.5, "duration_days": 30, "active": true},
                {"name": "Plan Callao", "description": null, "price": 25.0, "duration_days": 15, "active": false, "legacy_id": 99}
            ]"#,
        );

        let set = load_json_records(file.path(), "plans", ListKind::Plans.schema()).unwrap();
        assert_eq!(set.record_count(), 3);
        // The unknown legacy_id key was dropped, null came through as Null.
        assert_eq!(set.field_count(), 5);
        assert_eq!(set.value_by_name(2, "description"), Some(&FieldValue::Null));

        let mut view = ListView::new(set);
        view.set_search("cobertura");
        assert_eq!(view.filtered_count(), 2);

        view.set_search("");
        view.toggle_sort("price");
        let first = view.page_view().rows[0].get(0).map(|v| v.to_string());
        assert_eq!(first.as_deref(), Some("Plan Callao"));
    }

    #[test]
    fn test_csv_export_with_shuffled_headers() {
        let file = write_temp(
            "email,active,name,role,registered\n\
             rosa@tcboletin.pe,true,Rosa Nunez,admin,2024-01-05\n\
             tito@gmail.com,false,Tito Blas,trader,2024-02-10\n",
        );

        let set = load_csv_records(file.path(), "users", ListKind::Users.schema()).unwrap();
        assert_eq!(set.record_count(), 2);
        assert_eq!(
            set.value_by_name(0, "name"),
            Some(&FieldValue::Text("Rosa Nunez".to_string()))
        );
        assert_eq!(
            set.value_by_name(1, "active"),
            Some(&FieldValue::Boolean(false))
        );
    }

    #[test]
    fn test_csv_numbers_and_blanks_follow_the_schema() {
        let file = write_temp(
            "name,district,ruc,rating,branches,active\n\
             Cambios Andinos,Cusco,20123456789,4.5,3,yes\n\
             Casa Sol,Piura,20987654321,,1,no\n",
        );

        let set = load_csv_records(file.path(), "traders", ListKind::Traders.schema()).unwrap();
        assert_eq!(
            set.value_by_name(0, "rating"),
            Some(&FieldValue::Float(4.5))
        );
        assert_eq!(set.value_by_name(1, "rating"), Some(&FieldValue::Null));
        assert_eq!(
            set.value_by_name(0, "branches"),
            Some(&FieldValue::Integer(3))
        );

        // Null ratings sort to the bottom either way.
        let mut view = ListView::new(set);
        view.toggle_sort("rating");
        let last = view.page_view().rows[1].get(0).map(|v| v.to_string());
        assert_eq!(last.as_deref(), Some("Casa Sol"));
        view.toggle_sort("rating");
        let last = view.page_view().rows[1].get(0).map(|v| v.to_string());
        assert_eq!(last.as_deref(), Some("Casa Sol"));
    }

    #[test]
    fn test_malformed_json_reports_a_parse_error() {
        let file = write_temp("{ not json ]");
        let err = load_json_records(file.path(), "plans", ListKind::Plans.schema()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_json_must_be_an_array_of_objects() {
        let file = write_temp(r#"[1, 2, 3]"#);
        let err = load_json_records(file.path(), "plans", ListKind::Plans.schema()).unwrap_err();
        assert!(err.to_string().contains("array of objects"));
    }
}
