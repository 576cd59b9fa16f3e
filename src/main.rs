use std::process;

use kindred::config::{self, Invocation};

fn main() {
    let invocation = match config::parse_args(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let config = match invocation {
        Invocation::Help => {
            println!("{}", config::USAGE);
            return;
        }
        Invocation::Shell(ref config) | Invocation::Import { ref config, .. } => config.clone(),
    };

    kindred::logging::init(&config.log_filter);

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: cannot create {}: {}", dir.display(), e);
            process::exit(1);
        }
    }

    if let Invocation::Import { json_path, .. } = invocation {
        println!("Importing from {}...", json_path.display());
        if config.db_path.exists() {
            eprintln!("Error: Database file {} already exists.", config.db_path.display());
            eprintln!("Remove it first or use --file to specify a different path.");
            process::exit(1);
        }
        match kindred::migrate::import_json(&json_path, &config.db_path) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Identities: {}", stats.identities);
                println!("  Privacy policies: {}", stats.policies);
                println!("  Families: {}", stats.families);
                println!("  Relationships: {}", stats.relationships);
                println!("  Posts: {}", stats.posts);
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    kindred::cli::run(&config.db_path);
}
