//! Console front end for the biblio catalog.

use anyhow::{Context, Result};
use biblio_catalog::{AuthorRegistry, CatalogConfig, CatalogFacade, RenderLine, SharedCatalog, User};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("biblio")
        .version(biblio_catalog::VERSION)
        .about("Shared library catalog")
        .subcommand_required(true)
        .subcommand(
            Command::new("demo")
                .about("Replay the library scenario against a fresh catalog")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML catalog configuration"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print catalog snapshots as JSON"),
                ),
        )
        .subcommand(
            Command::new("authors")
                .about("Canonicalize author names")
                .arg(
                    Arg::new("names")
                        .required(true)
                        .num_args(1..)
                        .help("Author names, repeated names share one record"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("demo", args)) => demo(args),
        Some(("authors", args)) => authors(args),
        _ => unreachable!("subcommand_required"),
    }
}

fn demo(args: &ArgMatches) -> Result<()> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => CatalogConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    tracing::info!(root = %config.root_name, lookup = ?config.lookup, "catalog config loaded");
    let json = args.get_flag("json");
    let catalog = SharedCatalog::new(config);

    let admin = CatalogFacade::new(User::admin("Admin")?, catalog.clone());
    let bob = CatalogFacade::new(User::member("Bob")?, catalog.clone());
    let alice = CatalogFacade::new(User::member("Alice")?, catalog);

    section("1. Regular user adds a book");
    report(bob.add_book("Fantasy", "The Hobbit", "J.R.R. Tolkien"));

    section("2. Admin adds books");
    for (category, title, author) in [
        ("Fantasy", "The Name of the Wind", "Patrick Rothfuss"),
        ("Science Fiction", "Dune", "Frank Herbert"),
        ("Fantasy", "The Way of Kings", "Brandon Sanderson"),
        ("Fantasy", "The Wise Man's Fear", "Patrick Rothfuss"),
        ("Mystery", "The Girl with the Dragon Tattoo", "Stieg Larsson"),
    ] {
        report(admin.add_book(category, title, author).map(|_| format!("added '{title}'")));
    }
    println!("Distinct authors: {}", admin.author_count());

    section("3. Search");
    report(admin.search("fantasy books"));

    section("4. Catalog");
    print_catalog(&admin.show_catalog(), json)?;

    section("5. Ratings");
    report(admin.rate_book("The Name of the Wind", 4.8).map(|_| "rated 4.8".to_string()));
    report(admin.rate_book("Dune", 4.9).map(|_| "rated 4.9".to_string()));
    report(admin.rate_book("Dune", 7.0).map(|_| "rated 7.0".to_string()));

    section("6. Lending");
    report(bob.checkout("Dune").map(|_| "Bob checked out 'Dune'".to_string()));
    report(alice.checkout("Dune").map(|_| "Alice checked out 'Dune'".to_string()));
    print_catalog(&admin.show_catalog(), json)?;
    report(bob.return_book("Dune").map(|who| format!("'Dune' returned by {who}")));

    section("7. Final catalog");
    print_catalog(&admin.show_catalog(), json)?;
    Ok(())
}

fn authors(args: &ArgMatches) -> Result<()> {
    let registry = AuthorRegistry::new();
    let mut seen = Vec::new();
    for name in args.get_many::<String>("names").into_iter().flatten() {
        let author = registry.get_or_create(name)?;
        let reused = seen.iter().any(|prev| Arc::ptr_eq(prev, &author));
        println!("{name}: {}", if reused { "reused" } else { "new" });
        seen.push(author);
    }
    tracing::debug!(unique = registry.count(), "authors canonicalized");
    println!("Total unique authors: {}", registry.count());
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
}

fn report<T: std::fmt::Display>(result: biblio_catalog::Result<T>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(e) => println!("error: {e}"),
    }
}

fn print_catalog(lines: &[RenderLine], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(lines)?);
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}
