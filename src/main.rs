//! TodoFlow entry point
//!
//! The browser build is driven through `todoflow::web`; natively this is a
//! small command-line front end over a directory of JSON slots.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use todoflow::{
        FileStorage, Filter, IdGenerator, Settings, SystemClock, Task, TaskPatch, TaskPersistence,
        TaskStore, stats,
    };

    const DEFAULT_DATA_DIR: &str = ".todoflow";

    const USAGE: &str = "usage: todoflow [--data-dir DIR] <command>

commands:
  list [all|active|completed]   show tasks (newest first)
  add TEXT...                   add a task
  done ID | undo ID | toggle ID set completion
  edit ID TEXT...               replace a task's text
  rm ID                         delete a task
  clear                         delete all completed tasks
  reset                         delete every task
  filter all|active|completed   set the default view for `list`
  stats                         show counts";

    /// Parsed command line
    #[derive(Debug, PartialEq)]
    enum Command {
        List(Option<Filter>),
        Add(String),
        SetCompleted(String, bool),
        Toggle(String),
        Edit(String, String),
        Remove(String),
        Clear,
        Reset,
        SetFilter(Filter),
        Stats,
    }

    fn parse(args: &[String]) -> Result<(PathBuf, Command), String> {
        let mut data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        let mut rest = args;
        if let [flag, dir, tail @ ..] = rest {
            if flag == "--data-dir" {
                data_dir = PathBuf::from(dir);
                rest = tail;
            }
        }

        let id = |args: &[String]| -> Result<String, String> {
            args.first().cloned().ok_or_else(|| "missing task id".to_string())
        };

        let command = match rest {
            [] => Command::List(None),
            [cmd, args @ ..] => match cmd.as_str() {
                "list" | "ls" => match args.first() {
                    Some(name) => Command::List(Some(name.parse().map_err(|e| format!("{e}"))?)),
                    None => Command::List(None),
                },
                "add" => Command::Add(args.join(" ")),
                "done" => Command::SetCompleted(id(args)?, true),
                "undo" => Command::SetCompleted(id(args)?, false),
                "toggle" => Command::Toggle(id(args)?),
                "edit" => {
                    let text = args.get(1..).unwrap_or_default().join(" ");
                    let text = text.trim();
                    if text.is_empty() {
                        return Err("edit needs new text".to_string());
                    }
                    Command::Edit(id(args)?, text.to_string())
                }
                "rm" | "delete" => Command::Remove(id(args)?),
                "clear" => Command::Clear,
                "reset" => Command::Reset,
                "filter" => match args.first() {
                    Some(name) => Command::SetFilter(name.parse().map_err(|e| format!("{e}"))?),
                    None => return Err("filter needs a view name".to_string()),
                },
                "stats" => Command::Stats,
                other => return Err(format!("unknown command `{other}`")),
            },
        };
        Ok((data_dir, command))
    }

    fn print_tasks(tasks: &[&Task], filter: Filter) {
        if tasks.is_empty() {
            println!("{}", stats::empty_message(filter));
            return;
        }
        for task in tasks {
            let mark = if task.completed { "x" } else { " " };
            println!("[{}] {}  {}", mark, task.id, task.text);
        }
    }

    pub fn run(args: &[String]) -> i32 {
        if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
            println!("{USAGE}");
            return 0;
        }

        let (data_dir, command) = match parse(args) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("error: {e}\n\n{USAGE}");
                return 2;
            }
        };

        let storage = match FileStorage::open(&data_dir) {
            Ok(storage) => storage,
            Err(e) => {
                eprintln!("error: cannot open {}: {e}", data_dir.display());
                return 1;
            }
        };
        let mut settings = Settings::load(&storage);
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
        )
        .try_init()
        .ok();
        log::debug!("Using data dir {}", data_dir.display());

        // Commands that only touch the slots, not the loaded list
        match command {
            Command::SetFilter(filter) => {
                let mut storage = storage;
                settings.initial_filter = filter;
                settings.save(&mut storage);
                println!("Default view: {filter}");
                return 0;
            }
            Command::Reset => {
                let mut persistence = TaskPersistence::with_key(storage, settings.storage_key.clone());
                persistence.clear();
                println!("All tasks deleted");
                return 0;
            }
            _ => {}
        }

        let persistence = TaskPersistence::with_key(storage, settings.storage_key.clone());
        let mut store = TaskStore::open_with(persistence, IdGenerator::new(), Box::new(SystemClock));

        let known = |store: &TaskStore<FileStorage>, id: &str| {
            if store.get(id).is_none() {
                eprintln!("error: no task with id {id}");
                false
            } else {
                true
            }
        };

        match command {
            Command::List(filter) => {
                let filter = filter.unwrap_or(settings.initial_filter);
                print_tasks(&store.filtered_view(filter), filter);
            }
            Command::Add(text) => {
                let before = store.len();
                store.add(&text);
                if store.len() == before {
                    eprintln!("error: task text is empty");
                    return 2;
                }
                println!("{}", store.tasks()[0].id);
            }
            Command::SetCompleted(id, completed) => {
                if !known(&store, &id) {
                    return 1;
                }
                store.update(&id, TaskPatch::completed(completed));
            }
            Command::Toggle(id) => {
                if !known(&store, &id) {
                    return 1;
                }
                store.toggle(&id);
            }
            Command::Edit(id, text) => {
                if !known(&store, &id) {
                    return 1;
                }
                store.update(&id, TaskPatch::text(text));
            }
            Command::Remove(id) => {
                if !known(&store, &id) {
                    return 1;
                }
                store.delete(&id);
            }
            Command::Clear => {
                let removed = store.counts().completed;
                store.clear_completed();
                println!("Removed {removed} completed tasks");
            }
            Command::SetFilter(_) | Command::Reset => unreachable!("handled before loading"),
            Command::Stats => {
                let counts = store.counts();
                println!(
                    "all: {}  active: {}  completed: {}  ({}% done)",
                    counts.all,
                    counts.active,
                    counts.completed,
                    stats::completion_rate(&counts)
                );
                if counts.all > 0 {
                    println!("{}", stats::remaining_summary(&counts));
                }
            }
        }
        0
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(cli::run(&args));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is todoflow::web::start, this is just to satisfy the compiler
}
