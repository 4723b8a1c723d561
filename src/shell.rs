use std::io::{BufRead, Write};

use crate::{
    collections::{AddOutcome, CollectionStore, CreateOutcome, RemoveOutcome},
    error::Result,
    index::SearchIndex,
    record::Record,
    record_id::RecordId,
    search,
};

/// Results shown per search inside the shell.
const SHELL_RESULT_LIMIT: usize = 10;

const NO_ACTIVE: &str =
    "No active collection. Use `new <name>` or `use <name>` first.";

const HELP: &str = "\
Commands:
  search <query>    ranked search; result numbers address later commands
  list              browse all records, newest first
  show <n | id>     show one record in full
  new <name>        create a collection and make it active
  use <name>        switch the active collection
  drop <name>       delete a collection
  add <n | id>      add a record to the active collection
  remove <n | id>   remove a record from the active collection
  collections       list collections
  items             list the active collection's records
  quit              leave the shell";

/// What the loop should do after a command.
pub enum Reply {
    Text(String),
    Quit,
}

/// One interactive session over a built index.
///
/// Collections created here live exactly as long as the session. Command
/// handling is separate from terminal I/O so tests can drive it directly.
pub struct Session<'a> {
    index: &'a SearchIndex,
    store: CollectionStore,
    active: Option<String>,
    last_results: Vec<RecordId>,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self {
            index,
            store: CollectionStore::new(),
            active: None,
            last_results: Vec::new(),
        }
    }

    /// Execute one command line and produce the reply to print.
    pub fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => Reply::Text(String::new()),
            "search" => Reply::Text(self.cmd_search(rest)),
            "list" => Reply::Text(self.cmd_list()),
            "show" => Reply::Text(self.cmd_show(rest)),
            "new" => Reply::Text(self.cmd_new(rest)),
            "use" => Reply::Text(self.cmd_use(rest)),
            "drop" => Reply::Text(self.cmd_drop(rest)),
            "add" => Reply::Text(self.cmd_add(rest)),
            "remove" => Reply::Text(self.cmd_remove(rest)),
            "collections" => Reply::Text(self.cmd_collections()),
            "items" => Reply::Text(self.cmd_items()),
            "help" => Reply::Text(HELP.to_string()),
            "quit" | "exit" => Reply::Quit,
            other => {
                Reply::Text(format!("Unknown command: {other}. Try `help`."))
            }
        }
    }

    fn cmd_search(&mut self, query: &str) -> String {
        if query.is_empty() {
            return "Usage: search <query>".to_string();
        }
        let results =
            search::search(self.index, query, Some(SHELL_RESULT_LIMIT));
        self.last_results = results.iter().map(|r| r.id.clone()).collect();
        search::format_human(&results)
    }

    fn cmd_list(&mut self) -> String {
        let results = search::search(self.index, "", None);
        self.last_results = results.iter().map(|r| r.id.clone()).collect();
        search::format_human(&results)
    }

    fn cmd_show(&self, reference: &str) -> String {
        match self.resolve_target(reference) {
            Ok(record) => search::format_record(record),
            Err(message) => message,
        }
    }

    fn cmd_new(&mut self, name: &str) -> String {
        if name.is_empty() {
            return "Usage: new <name>".to_string();
        }
        match self.store.create(name) {
            CreateOutcome::Created => {
                self.active =
                    self.store.find_by_name(name).map(|c| c.id.clone());
                format!("Created collection '{name}'.")
            }
            CreateOutcome::AlreadyExists => {
                "Collection already exists.".to_string()
            }
        }
    }

    fn cmd_use(&mut self, name: &str) -> String {
        let Some(collection) = self.store.find_by_name(name) else {
            return format!("No collection named '{name}'.");
        };
        self.active = Some(collection.id.clone());
        format!("Using collection '{name}'.")
    }

    fn cmd_drop(&mut self, name: &str) -> String {
        let Some(collection) = self.store.find_by_name(name) else {
            return format!("No collection named '{name}'.");
        };
        let id = collection.id.clone();
        self.store.remove(&id);
        if self.active.as_deref() == Some(id.as_str()) {
            self.active = None;
        }
        format!("Dropped collection '{name}'.")
    }

    fn cmd_add(&mut self, reference: &str) -> String {
        let Some(collection_id) = self.active.clone() else {
            return NO_ACTIVE.to_string();
        };
        let record = match self.resolve_target(reference) {
            Ok(record) => record,
            Err(message) => return message,
        };
        match self.store.add_record(&collection_id, &record.id) {
            AddOutcome::Added => "Added to collection.".to_string(),
            AddOutcome::AlreadyPresent => {
                "Already in collection.".to_string()
            }
            AddOutcome::NoSuchCollection => NO_ACTIVE.to_string(),
        }
    }

    fn cmd_remove(&mut self, reference: &str) -> String {
        let Some(collection_id) = self.active.clone() else {
            return NO_ACTIVE.to_string();
        };
        let record = match self.resolve_target(reference) {
            Ok(record) => record,
            Err(message) => return message,
        };
        match self.store.remove_record(&collection_id, &record.id) {
            RemoveOutcome::Removed => "Removed from collection.".to_string(),
            RemoveOutcome::NotFound => "Not in collection.".to_string(),
            RemoveOutcome::NoSuchCollection => NO_ACTIVE.to_string(),
        }
    }

    fn cmd_collections(&self) -> String {
        if self.store.collections().is_empty() {
            return "No collections yet.".to_string();
        }
        let lines: Vec<String> = self
            .store
            .collections()
            .iter()
            .map(|collection| {
                let marker = if self.active.as_deref()
                    == Some(collection.id.as_str())
                {
                    "*"
                } else {
                    " "
                };
                format!(
                    "{marker} {} ({} item(s))",
                    collection.name,
                    collection.record_ids.len()
                )
            })
            .collect();
        lines.join("\n")
    }

    fn cmd_items(&self) -> String {
        let Some(collection) =
            self.active.as_deref().and_then(|id| self.store.get(id))
        else {
            return NO_ACTIVE.to_string();
        };
        if collection.record_ids.is_empty() {
            return "Collection is empty.".to_string();
        }
        let lines: Vec<String> = collection
            .record_ids
            .iter()
            .map(|id| match self.index.resolve(id.as_str()) {
                Some(record) => format!("{} {}", record.id, record.title),
                None => format!("{id} (not in dataset)"),
            })
            .collect();
        lines.join("\n")
    }

    /// Resolve `<n | id>`: a number addresses the last printed results,
    /// anything else is treated as a record id or prefix.
    fn resolve_target(
        &self,
        reference: &str,
    ) -> std::result::Result<&'a Record, String> {
        if reference.is_empty() {
            return Err("Give a result number or record id.".to_string());
        }
        if let Ok(position) = reference.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| self.last_results.get(i))
                .and_then(|id| self.index.resolve(id.as_str()))
                .ok_or_else(|| {
                    format!(
                        "No result #{position}. Run `search` or `list` first."
                    )
                });
        }
        self.index
            .resolve(reference)
            .ok_or_else(|| format!("No record matches '{reference}'."))
    }
}

/// Run the interactive loop on stdin/stdout.
pub fn run(index: &SearchIndex) -> Result<()> {
    let mut session = Session::new(index);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!(
        "{} records loaded. Type `help` for commands, `quit` to leave.",
        index.len()
    );
    loop {
        print!("bibdex> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match session.execute(&line) {
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => println!("{text}"),
            Reply::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn setup_index() -> SearchIndex {
        let records = [
            json!({"title": "Graph Neural Networks", "year": 2019,
                   "authors": ["Kipf"]}),
            json!({"title": "Convolutional Networks", "year": 2021,
                   "authors": ["LeCun"]}),
            json!({"title": "Attention Is All You Need", "year": 2017,
                   "authors": ["Vaswani"]}),
        ];
        SearchIndex::build(
            records.iter().map(Record::from_value).collect(),
        )
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("expected text reply"),
        }
    }

    #[test]
    fn search_numbers_results_for_later_commands() {
        let index = setup_index();
        let mut session = Session::new(&index);

        let reply = text(session.execute("search neural"));
        assert!(reply.starts_with("  1. #"));

        let shown = text(session.execute("show 1"));
        assert!(shown.contains("Graph Neural Networks"));
    }

    #[test]
    fn add_requires_an_active_collection() {
        let index = setup_index();
        let mut session = Session::new(&index);

        session.execute("search neural");
        assert_eq!(text(session.execute("add 1")), NO_ACTIVE);
    }

    #[test]
    fn collection_round_trip() {
        let index = setup_index();
        let mut session = Session::new(&index);

        assert_eq!(
            text(session.execute("new reading list")),
            "Created collection 'reading list'."
        );
        session.execute("search neural");
        assert_eq!(text(session.execute("add 1")), "Added to collection.");
        assert_eq!(text(session.execute("add 1")), "Already in collection.");

        let items = text(session.execute("items"));
        assert!(items.contains("Graph Neural Networks"));

        assert_eq!(
            text(session.execute("remove 1")),
            "Removed from collection."
        );
        assert_eq!(text(session.execute("remove 1")), "Not in collection.");
        assert_eq!(text(session.execute("items")), "Collection is empty.");
    }

    #[test]
    fn duplicate_collection_name_warns() {
        let index = setup_index();
        let mut session = Session::new(&index);

        session.execute("new favorites");
        assert_eq!(
            text(session.execute("new favorites")),
            "Collection already exists."
        );
    }

    #[test]
    fn use_switches_and_drop_clears_the_active_collection() {
        let index = setup_index();
        let mut session = Session::new(&index);

        session.execute("new a");
        session.execute("new b");
        assert_eq!(
            text(session.execute("use a")),
            "Using collection 'a'."
        );

        let listing = text(session.execute("collections"));
        assert!(listing.contains("* a"));
        assert!(listing.contains("  b"));

        session.execute("drop a");
        assert_eq!(text(session.execute("items")), NO_ACTIVE);
    }

    #[test]
    fn add_accepts_record_id_prefixes() {
        let index = setup_index();
        let mut session = Session::new(&index);
        let short = index.records()[1].id.short().to_string();

        session.execute("new favorites");
        assert_eq!(
            text(session.execute(&format!("add #{short}"))),
            "Added to collection."
        );

        let items = text(session.execute("items"));
        assert!(items.contains("Convolutional Networks"));
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let index = setup_index();
        let mut session = Session::new(&index);

        session.execute("new favorites");
        session.execute("search neural");
        assert!(text(session.execute("add 99")).starts_with("No result #99"));
        assert!(text(session.execute("add 0")).starts_with("No result #0"));
    }

    #[test]
    fn unknown_commands_point_at_help() {
        let index = setup_index();
        let mut session = Session::new(&index);
        assert!(text(session.execute("frobnicate")).contains("help"));
    }

    #[test]
    fn quit_and_exit_end_the_session() {
        let index = setup_index();
        let mut session = Session::new(&index);
        assert!(matches!(session.execute("quit"), Reply::Quit));
        assert!(matches!(session.execute("exit"), Reply::Quit));
    }

    #[test]
    fn blank_lines_produce_no_output() {
        let index = setup_index();
        let mut session = Session::new(&index);
        assert_eq!(text(session.execute("   ")), "");
    }
}
