use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use todo_client::TodoApiClient;
use todo_core::{Config, Priority, PrioritySummary, Task, TodoList};
use todo_state::{ColorMode, FileSessionStorage, SessionManager, TodoStore};

mod render;

type Sessions = SessionManager<FileSessionStorage>;

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "Terminal client for the todo list backend")]
#[command(version)]
struct Cli {
    /// Override the API base URL from config
    #[arg(long)]
    api_base: Option<String>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all todo lists
    Lists,
    /// Create a new todo list
    Create {
        /// Name of the new list
        name: String,
    },
    /// Rename a todo list
    Rename {
        /// List name or position
        list: String,
        /// New name
        name: String,
    },
    /// Delete a todo list
    Delete {
        /// List name or position
        list: String,
    },
    /// Select the active todo list
    Use {
        /// List name or position
        list: String,
    },
    /// Show the tasks of a todo list
    Show {
        /// List name or position; the active list when omitted
        list: Option<String>,
    },
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Target list; the active list when omitted
        #[arg(long)]
        list: Option<String>,
        /// Task priority (low, medium, high)
        #[arg(long, short)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a task
    Edit {
        /// Task position as printed by `show`
        position: usize,
        /// Target list; the active list when omitted
        #[arg(long)]
        list: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Task priority (low, medium, high)
        #[arg(long, short)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle a task's completion flag
    Toggle {
        /// Task position as printed by `show`
        position: usize,
        /// Target list; the active list when omitted
        #[arg(long)]
        list: Option<String>,
    },
    /// Remove a task
    Remove {
        /// Task position as printed by `show`
        position: usize,
        /// Target list; the active list when omitted
        #[arg(long)]
        list: Option<String>,
    },
    /// Show task counts by priority
    Stats,
    /// Show or change display preferences
    Prefs {
        /// Render the completed-tasks section (true/false)
        #[arg(long)]
        show_completed: Option<bool>,
        /// Color handling (auto, always, never)
        #[arg(long)]
        color: Option<ColorMode>,
    },
    /// Start an interactive session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if cli.debug {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    let mut config = Config::load();
    if let Some(api_base) = cli.api_base.clone() {
        config.api_base = api_base;
    }

    let api = TodoApiClient::new(&config)?;
    let store = TodoStore::new(Arc::new(api));
    let storage = FileSessionStorage::new(config.resolved_session_dir());
    let sessions = SessionManager::new(storage, "default").await?;

    apply_color_mode(sessions.session().await.preferences.color_mode);

    match cli.command {
        Commands::Interactive => run_interactive(&store, &sessions).await,
        command => {
            let mut rx = store.notifications().subscribe();
            let result = run_command(command, &store, &sessions).await;
            render::drain_notifications(&mut rx);
            result
        }
    }
}

async fn run_command(command: Commands, store: &TodoStore, sessions: &Sessions) -> Result<()> {
    match command {
        Commands::Lists => {
            let lists = store.lists().await?;
            sessions.ensure_active(&lists).await?;
            let session = sessions.session().await;
            render::print_lists(&lists, session.active_list_id.as_deref());
        }
        Commands::Create { name } => {
            if store.create_list(&name).await?.is_none() {
                println!("{}", "Todo list name cannot be empty".yellow());
            }
        }
        Commands::Rename { list, name } => {
            let lists = store.lists().await?;
            let target_id = require_list_id(resolve_list(&lists, &list)?)?.to_string();
            if store.rename_list(&target_id, &name).await?.is_none() {
                println!("{}", "Todo list name cannot be empty".yellow());
            }
        }
        Commands::Delete { list } => {
            let lists = store.lists().await?;
            let target_id = require_list_id(resolve_list(&lists, &list)?)?.to_string();
            store.delete_list(&target_id).await?;
            let remaining = store.lists().await?;
            sessions.handle_list_removed(&target_id, &remaining).await?;
        }
        Commands::Use { list } => {
            let lists = store.lists().await?;
            let target = resolve_list(&lists, &list)?;
            let target_id = require_list_id(target)?.to_string();
            let name = target.name.clone();
            sessions.set_active_list(Some(target_id)).await?;
            println!("Active list: {}", name.cyan().bold());
        }
        Commands::Show { list } => {
            let target = target_list(store, sessions, list.as_deref()).await?;
            let preferences = sessions.session().await.preferences;
            render::print_list(&target, preferences.show_completed);
        }
        Commands::Add {
            title,
            list,
            priority,
            due,
            description,
        } => {
            let target = target_list(store, sessions, list.as_deref()).await?;
            let target_id = require_list_id(&target)?.to_string();

            let mut task = Task::new(title);
            if let Some(priority) = priority {
                task.priority = priority;
            }
            task.due_date = due;
            task.description = description;

            match store.add_task(&target_id, task).await? {
                Some(updated) => {
                    let preferences = sessions.session().await.preferences;
                    render::print_list(&updated, preferences.show_completed);
                }
                None => println!("{}", "Task title cannot be empty".yellow()),
            }
        }
        Commands::Edit {
            position,
            list,
            title,
            priority,
            due,
            description,
        } => {
            let target = target_list(store, sessions, list.as_deref()).await?;
            let target_id = require_list_id(&target)?.to_string();
            let task = task_at_position(&target, position)?;
            let task_id = task
                .id
                .clone()
                .ok_or_else(|| anyhow!("task has no server id"))?;

            let mut updated = task.clone();
            if let Some(title) = title {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    println!("{}", "Task title cannot be empty; keeping the old title".yellow());
                } else {
                    updated.title = trimmed.to_string();
                }
            }
            if let Some(priority) = priority {
                updated.priority = priority;
            }
            if let Some(due) = due {
                updated.due_date = Some(due);
            }
            if let Some(description) = description {
                updated.description = Some(description);
            }

            let result = store.update_task(&target_id, &task_id, updated).await?;
            let preferences = sessions.session().await.preferences;
            render::print_list(&result, preferences.show_completed);
        }
        Commands::Toggle { position, list } => {
            let target = target_list(store, sessions, list.as_deref()).await?;
            let target_id = require_list_id(&target)?.to_string();
            let task = task_at_position(&target, position)?;
            let task_id = task
                .id
                .clone()
                .ok_or_else(|| anyhow!("task has no server id"))?;

            let result = store.toggle_task(&target_id, &task_id).await?;
            let preferences = sessions.session().await.preferences;
            render::print_list(&result, preferences.show_completed);
        }
        Commands::Remove { position, list } => {
            let target = target_list(store, sessions, list.as_deref()).await?;
            let target_id = require_list_id(&target)?.to_string();
            let task = task_at_position(&target, position)?;
            let task_id = task
                .id
                .clone()
                .ok_or_else(|| anyhow!("task has no server id"))?;

            let result = store.delete_task(&target_id, &task_id).await?;
            let preferences = sessions.session().await.preferences;
            render::print_list(&result, preferences.show_completed);
        }
        Commands::Stats => {
            let stats = store.refresh_stats().await?;
            let summary = PrioritySummary::from_stats(&stats);
            render::print_stats(&summary);
        }
        Commands::Prefs {
            show_completed,
            color,
        } => {
            if let Some(value) = show_completed {
                sessions.set_show_completed(value).await?;
            }
            if let Some(mode) = color {
                sessions.set_color_mode(mode).await?;
                apply_color_mode(mode);
            }
            let preferences = sessions.session().await.preferences;
            println!("show_completed: {}", preferences.show_completed);
            println!("color: {}", preferences.color_mode);
        }
        Commands::Interactive => unreachable!("interactive is dispatched in main"),
    }
    Ok(())
}

async fn run_interactive(store: &TodoStore, sessions: &Sessions) -> Result<()> {
    println!("{}", "Todo Lists Interactive Session".cyan().bold());
    println!("{}", "Type 'help' for commands, 'quit' to leave".dimmed());
    println!();

    let mut rx = store.notifications().subscribe();

    loop {
        print!("{} ", "todo>".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!("{}", "Goodbye!".cyan());
            break;
        }
        if input.eq_ignore_ascii_case("refresh") {
            if let Err(e) = store.refresh_lists().await {
                eprintln!("{} {}", "✗".red(), e.to_string().red());
            }
            render::drain_notifications(&mut rx);
            continue;
        }

        match parse_interactive(input) {
            Some(command) => {
                if let Err(e) = run_command(command, store, sessions).await {
                    eprintln!("{} {}", "✗".red(), e.to_string().red());
                }
            }
            None => print_interactive_help(),
        }
        render::drain_notifications(&mut rx);
        println!();
    }

    Ok(())
}

fn parse_interactive(input: &str) -> Option<Commands> {
    let (head, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let rest = rest.trim();

    match head.to_ascii_lowercase().as_str() {
        "lists" => Some(Commands::Lists),
        "show" => Some(Commands::Show {
            list: none_if_empty(rest),
        }),
        "use" if !rest.is_empty() => Some(Commands::Use {
            list: rest.to_string(),
        }),
        "create" => Some(Commands::Create {
            name: rest.to_string(),
        }),
        "delete" if !rest.is_empty() => Some(Commands::Delete {
            list: rest.to_string(),
        }),
        "add" => Some(Commands::Add {
            title: rest.to_string(),
            list: None,
            priority: None,
            due: None,
            description: None,
        }),
        "toggle" => rest.parse().ok().map(|position| Commands::Toggle {
            position,
            list: None,
        }),
        "rm" | "remove" => rest.parse().ok().map(|position| Commands::Remove {
            position,
            list: None,
        }),
        "stats" => Some(Commands::Stats),
        _ => None,
    }
}

fn print_interactive_help() {
    println!("{}", "Commands:".cyan());
    println!("  lists                 show all todo lists");
    println!("  use <list>            select the active list");
    println!("  show [list]           show tasks of a list");
    println!("  create <name>         create a todo list");
    println!("  delete <list>         delete a todo list");
    println!("  add <title>           add a task to the active list");
    println!("  toggle <position>     flip a task's completion flag");
    println!("  rm <position>         remove a task");
    println!("  stats                 task counts by priority");
    println!("  refresh               refetch lists from the backend");
    println!("  quit                  leave the session");
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolve a list selector: exact name first, then 1-based position.
fn resolve_list<'a>(lists: &'a [TodoList], selector: &str) -> Result<&'a TodoList> {
    if let Some(list) = lists.iter().find(|l| l.name == selector) {
        return Ok(list);
    }
    if let Ok(position) = selector.parse::<usize>() {
        if (1..=lists.len()).contains(&position) {
            return Ok(&lists[position - 1]);
        }
    }
    Err(anyhow!("no todo list matches '{selector}'"))
}

/// The list a command targets: an explicit selector, or the active list.
async fn target_list(
    store: &TodoStore,
    sessions: &Sessions,
    selector: Option<&str>,
) -> Result<TodoList> {
    let lists = store.lists().await?;
    sessions.ensure_active(&lists).await?;

    match selector {
        Some(selector) => Ok(resolve_list(&lists, selector)?.clone()),
        None => {
            let session = sessions.session().await;
            session
                .active_list(&lists)
                .cloned()
                .ok_or_else(|| anyhow!("no active todo list; create one first"))
        }
    }
}

fn require_list_id(list: &TodoList) -> Result<&str> {
    list.id
        .as_deref()
        .ok_or_else(|| anyhow!("todo list has no server id"))
}

fn task_at_position(list: &TodoList, position: usize) -> Result<&Task> {
    render::task_at(list, position)
        .ok_or_else(|| anyhow!("no task at position {position} in '{}'", list.name))
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}
