use boletin_cli::data::list_view::ListView;
use boletin_cli::data::records::{FieldDef, FieldValue, Record, RecordSet};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_test_data(rows: usize) -> RecordSet {
    let mut set = RecordSet::new(
        "traders",
        vec![
            FieldDef::text("name").searchable(),
            FieldDef::text("district").searchable(),
            FieldDef::float("rating"),
            FieldDef::integer("branches"),
        ],
    );

    let names = [
        "Cambios Lima Centro",
        "Miraflores Exchange",
        "Dolar Seguro",
        "Casa Wilson",
        "InkaCambio",
        "Cambistas del Norte",
        "El Trebol Money",
        "Soles y Dolares",
    ];
    let districts = [
        "Cercado de Lima",
        "Miraflores",
        "San Isidro",
        "Surco",
        "Los Olivos",
    ];

    for i in 0..rows {
        let rating = if i % 7 == 0 {
            FieldValue::Null
        } else {
            FieldValue::Float((i % 50) as f64 / 10.0)
        };
        set.add_record(Record::new(vec![
            FieldValue::Text(format!("{} {}", names[i % names.len()], i)),
            FieldValue::Text(districts[i % districts.len()].to_string()),
            rating,
            FieldValue::Integer((i % 6) as i64),
        ]))
        .unwrap();
    }

    set
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_refresh");

    group.bench_function("10k_rows", |b| {
        let mut view = ListView::new(create_test_data(10_000));
        b.iter(|| {
            view.set_search(black_box("miraflores"));
            assert!(view.filtered_count() > 0);
        });
    });

    group.bench_function("50k_rows", |b| {
        let mut view = ListView::new(create_test_data(50_000));
        b.iter(|| {
            view.set_search(black_box("miraflores"));
            assert!(view.filtered_count() > 0);
        });
    });

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_refresh");

    // Each iteration flips the direction, so every pass re-sorts.
    group.bench_function("text_50k", |b| {
        let mut view = ListView::new(create_test_data(50_000));
        b.iter(|| {
            view.toggle_sort(black_box("name"));
        });
    });

    group.bench_function("numeric_with_nulls_50k", |b| {
        let mut view = ListView::new(create_test_data(50_000));
        b.iter(|| {
            view.toggle_sort(black_box("rating"));
        });
    });

    group.finish();
}

fn benchmark_page_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_view");

    group.bench_function("100k_rows", |b| {
        let mut view = ListView::new(create_test_data(100_000));
        view.set_search("norte");
        view.toggle_sort("rating");
        b.iter(|| {
            let page = view.page_view();
            assert!(black_box(page).rows.len() <= 10);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_search, benchmark_sort, benchmark_page_view);
criterion_main!(benches);
