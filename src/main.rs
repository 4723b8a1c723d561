use std::path::PathBuf;

use bibdex::{
    SearchIndex,
    cli::{Cli, Command, ListArgs, SearchArgs, ShowArgs},
    dataset::load_records,
    error::{Error, Result},
    search, shell,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("BIBDEX_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Search(args) => {
            let index = load_index(cli.dataset)?;
            cmd_search(&index, &args)?;
        }
        Command::List(args) => {
            let index = load_index(cli.dataset)?;
            cmd_list(&index, &args)?;
        }
        Command::Show(args) => {
            let index = load_index(cli.dataset)?;
            cmd_show(&index, &args)?;
        }
        Command::Shell => {
            let index = load_index(cli.dataset)?;
            shell::run(&index)?;
        }
        Command::Completions(args) => args.generate(),
    }

    Ok(())
}

/// Resolve the dataset path, load it, and build the index.
fn load_index(dataset: Option<PathBuf>) -> Result<SearchIndex> {
    let path = resolve_dataset(dataset)?;
    let records = load_records(&path)?;
    Ok(SearchIndex::build(records))
}

/// The --dataset flag wins; BIBDEX_DATASET is the fallback.
fn resolve_dataset(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("BIBDEX_DATASET") {
        return Ok(PathBuf::from(path));
    }
    Err(Error::Config(
        "no dataset given; pass --dataset or set BIBDEX_DATASET".to_string(),
    ))
}

fn cmd_search(index: &SearchIndex, args: &SearchArgs) -> Result<()> {
    let limit = if args.all { None } else { Some(args.count) };
    let results = search::search(index, &args.query, limit);

    if args.json {
        println!("{}", search::format_json(&results, &args.query)?);
    } else {
        println!("{}", search::format_human(&results));
    }
    Ok(())
}

fn cmd_list(index: &SearchIndex, args: &ListArgs) -> Result<()> {
    let records =
        search::browse(index, args.year, args.offset, args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{}", search::format_human(&records));
    }
    Ok(())
}

fn cmd_show(index: &SearchIndex, args: &ShowArgs) -> Result<()> {
    let record = index.resolve(&args.id).ok_or_else(|| Error::NotFound {
        kind: "record",
        name: args.id.clone(),
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", search::format_record(record));
    }
    Ok(())
}
