use boletin_cli::auth::{AuthContext, Role};
use boletin_cli::config::config::Config;
use boletin_cli::data::list_view::ListView;
use boletin_cli::data::loaders::{load_csv_records, load_json_records};
use boletin_cli::data::records::RecordSet;
use boletin_cli::domain::{featured_rates, ListKind};
use boletin_cli::table_display::{export_to_csv, print_page};
use boletin_cli::ui::app::run_tui;
use crossterm::style::Stylize;

fn print_help() {
    println!("{}", "TC Boletin CLI - Exchange portal browser".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  boletin-cli [OPTIONS] [LIST=FILE ...]");
    println!("  boletin-cli print <list> [PRINT OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {}    - Sign in as admin or trader",
        "--role <name>".green()
    );
    println!(
        "  {} - Generate config file with defaults",
        "--generate-config".green()
    );
    println!("  {}           - Show this help", "--help".green());
    println!();
    println!("{}", "Lists:".yellow());
    println!("  users, traders, plans, subscriptions");
    println!(
        "  Replace the built-in demo data with {} or {},",
        "users=path.json".green(),
        "plans=path.csv".green()
    );
    println!("  e.g. boletin-cli plans=./exports/plans.csv");
    println!();
    println!("{}", "Print options:".yellow());
    println!(
        "  {}   - Filter rows before printing",
        "--search <text>".green()
    );
    println!(
        "  {} - Sort by a column, e.g. price or price:desc",
        "--sort <field[:dir]>".green()
    );
    println!("  {}     - Page to print (default 1)", "--page <n>".green());
    println!(
        "  {} - Rows per page: 5, 10, 20 or 50",
        "--page-size <n>".green()
    );
    println!(
        "  {}  - Write the filtered set to CSV instead",
        "--export <file>".green()
    );
    println!();
    println!("{}", "Interactive mode:".yellow());
    println!("  Run without 'print' to open the TUI. F1 inside shows the keys.");
    println!();
}

/// `--flag value` lookup over raw args.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

/// `list=path` overrides for the built-in demo data. Values belonging to
/// a `--flag` are skipped, so `--search a=b` is not read as an override.
fn data_overrides(args: &[String]) -> Vec<(String, String)> {
    const VALUE_FLAGS: [&str; 6] = [
        "--role",
        "--search",
        "--sort",
        "--page",
        "--page-size",
        "--export",
    ];

    let mut overrides = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        if let Some((name, path)) = arg.split_once('=') {
            if ListKind::from_slug(name).is_none() {
                eprintln!(
                    "Unknown list '{}' in '{}'. Lists: users, traders, plans, subscriptions",
                    name, arg
                );
                std::process::exit(1);
            }
            overrides.push((name.to_lowercase(), path.to_string()));
        }
    }
    overrides
}

fn load_records(kind: ListKind, overrides: &[(String, String)]) -> RecordSet {
    for (name, path) in overrides {
        if name == kind.slug() {
            let result = if path.ends_with(".json") {
                load_json_records(path, kind.slug(), kind.schema())
            } else {
                load_csv_records(path, kind.slug(), kind.schema())
            };
            match result {
                Ok(set) => return set,
                Err(e) => {
                    eprintln!("Error loading {} from {}: {:#}", kind.slug(), path, e);
                    std::process::exit(1);
                }
            }
        }
    }
    kind.sample()
}

fn build_view(kind: ListKind, config: &Config, overrides: &[(String, String)]) -> ListView {
    let mut view = ListView::new(load_records(kind, overrides))
        .with_case_sensitive_sort(!config.behavior.case_insensitive_sort);
    if let Err(e) = view.set_page_size(config.behavior.default_page_size) {
        eprintln!("Ignoring configured page size: {}", e);
    }
    view
}

fn run_print_mode(
    args: &[String],
    auth: &AuthContext,
    config: &Config,
    overrides: &[(String, String)],
    print_pos: usize,
) {
    let slug = match args.get(print_pos + 1) {
        Some(slug) if !slug.starts_with("--") => slug.clone(),
        _ => {
            eprintln!("Usage: boletin-cli print <list> [--search ...] [--sort ...]");
            std::process::exit(1);
        }
    };
    let kind = match ListKind::from_slug(&slug) {
        Some(kind) => kind,
        None => {
            eprintln!(
                "Unknown list '{}'. Lists: users, traders, plans, subscriptions",
                slug
            );
            std::process::exit(1);
        }
    };
    if !auth.can_view(kind) {
        eprintln!(
            "The {} list is not available to role '{}'",
            kind.slug(),
            auth.role.label()
        );
        std::process::exit(1);
    }

    let mut view = build_view(kind, config, overrides);

    if let Some(query) = flag_value(args, "--search") {
        view.set_search(query);
    }
    if let Some(sort) = flag_value(args, "--sort") {
        let (field, direction) = match sort.split_once(':') {
            Some((field, dir)) => (field.to_string(), dir.to_lowercase()),
            None => (sort.clone(), "asc".to_string()),
        };
        view.toggle_sort(field.clone());
        match direction.as_str() {
            "asc" => {}
            "desc" => view.toggle_sort(field),
            other => {
                eprintln!("Unknown sort direction '{}'. Use asc or desc.", other);
                std::process::exit(1);
            }
        }
    }
    if let Some(size) = flag_value(args, "--page-size") {
        let parsed = match size.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("--page-size expects a number, got '{}'", size);
                std::process::exit(1);
            }
        };
        if let Err(e) = view.set_page_size(parsed) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
    if let Some(page) = flag_value(args, "--page") {
        let parsed = match page.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("--page expects a number, got '{}'", page);
                std::process::exit(1);
            }
        };
        if let Err(e) = view.set_page(parsed) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    if let Some(file) = flag_value(args, "--export") {
        if let Err(e) = export_to_csv(&view, &file) {
            eprintln!("Export error: {:#}", e);
            std::process::exit(1);
        }
    } else {
        print_page(&view);
    }
}

fn main() {
    let log_buffer = boletin_cli::logging::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return;
    }

    // Check for config file generation
    if args.contains(&"--generate-config".to_string()) {
        match Config::get_config_path() {
            Ok(path) => {
                let config_content = Config::create_default_with_comments();
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Error creating config directory: {}", e);
                        std::process::exit(1);
                    }
                }
                if let Err(e) = std::fs::write(&path, config_content) {
                    eprintln!("Error writing config file: {}", e);
                    std::process::exit(1);
                }
                println!("Configuration file created at: {:?}", path);
                println!("Edit this file to customize the portal.");
                return;
            }
            Err(e) => {
                eprintln!("Error determining config path: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let role = match flag_value(&args, "--role") {
        Some(value) => match Role::parse(&value) {
            Some(role) => role,
            None => {
                eprintln!("Unknown role '{}'. Use admin or trader.", value);
                std::process::exit(1);
            }
        },
        None => Role::parse(&config.behavior.default_role).unwrap_or(Role::Admin),
    };
    let username = std::env::var("USER").unwrap_or_else(|_| "operator".to_string());
    let auth = AuthContext::new(username, role);

    let overrides = data_overrides(&args);

    // One-shot print mode, no terminal takeover
    if let Some(pos) = args.iter().position(|arg| arg == "print") {
        run_print_mode(&args, &auth, &config, &overrides, pos);
        return;
    }

    let records: Vec<(ListKind, RecordSet)> = auth
        .visible_lists()
        .into_iter()
        .map(|kind| (kind, load_records(kind, &overrides)))
        .collect();

    if let Err(e) = run_tui(auth, config, records, featured_rates(), log_buffer) {
        eprintln!("TUI Error: {}", e);
        std::process::exit(1);
    }
}
