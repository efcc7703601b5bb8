//! Terminal presentation layer for the kanban board.
//!
//! # Responsibility
//! - Drive every core operation from subcommands.
//! - Render boards as status columns; re-render from a fresh read after
//!   every mutation.
//!
//! Rendering and argument wiring live here; all task/board semantics stay
//! in `kanban_core`.

use clap::{Parser, Subcommand, ValueEnum};
use kanban_core::{
    default_log_level, init_logging, initialize_store, open_store, BoardService, BoardView,
    PrefsRepository, Status, StorePrefsRepository, StoreTaskRepository, TaskDraft, TaskId,
    TaskPatch, TaskRepository, Theme,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "kanban",
    version,
    about = "Kanban task board in the terminal",
    propagate_version = true
)]
struct Cli {
    /// Store database file.
    #[arg(long, global = true, default_value = "kanban.db")]
    store: PathBuf,

    /// Directory for rolling log files (absolute). Logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List board names; the active board is marked.
    Boards,
    /// Render a board as status columns (defaults to the active board).
    Show { board: Option<String> },
    /// Add a task and re-render its board.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value_t = StatusArg::Todo)]
        status: StatusArg,
        /// Board name; defaults to the active board.
        #[arg(long)]
        board: Option<String>,
    },
    /// Edit a task's fields and re-render its board.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        board: Option<String>,
    },
    /// Remove a task. Removing an already-removed id is not an error.
    Rm { id: String },
    /// Switch the active board.
    Use { board: String },
    /// Show or hide the sidebar (board list) when rendering.
    Sidebar {
        #[arg(value_enum)]
        state: SidebarArg,
    },
    /// Show or set the display theme preference.
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StatusArg {
    Todo,
    Doing,
    Done,
}

impl From<StatusArg> for Status {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Todo => Status::Todo,
            StatusArg::Doing => Status::Doing,
            StatusArg::Done => Status::Done,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SidebarArg {
    Show,
    Hide,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ThemeArg {
    Light,
    Dark,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let store = open_store(&cli.store)?;
    initialize_store(&store)?;

    let service = BoardService::new(
        StoreTaskRepository::new(&store),
        StorePrefsRepository::new(&store),
    );

    match &cli.command {
        Commands::Boards => {
            let active = service.active_board()?;
            let boards = service.boards()?;
            if boards.is_empty() {
                println!("no boards yet");
                return Ok(());
            }
            for board in boards {
                let marker = if Some(&board) == active.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {board}");
            }
        }
        Commands::Show { board } => {
            let board = resolve_board(&service, board.clone())?;
            render_board(&service, &service.board_view(&board)?)?;
        }
        Commands::Add {
            title,
            description,
            status,
            board,
        } => {
            let board = match board {
                Some(name) => name.clone(),
                None => resolve_board(&service, None)?,
            };
            let task = service.add_task(&TaskDraft {
                title: title.clone(),
                description: description.clone(),
                status: (*status).into(),
                board: board.clone(),
            })?;
            println!("added {} to {board}", task.id);
            render_board(&service, &service.board_view(&board)?)?;
        }
        Commands::Edit {
            id,
            title,
            description,
            status,
            board,
        } => {
            let id = parse_task_id(id)?;
            let patch = TaskPatch {
                title: title.clone(),
                description: description.clone(),
                status: status.map(Into::into),
                board: board.clone(),
            };
            let task = service.edit_task(id, &patch)?;
            println!("updated {}", task.id);
            render_board(&service, &service.board_view(&task.board)?)?;
        }
        Commands::Rm { id } => {
            let id = parse_task_id(id)?;
            service.delete_task(id)?;
            println!("removed {id}");
        }
        Commands::Use { board } => {
            service.switch_board(board)?;
            println!("active board: {board}");
        }
        Commands::Sidebar { state } => {
            service.set_sidebar_visible(matches!(state, SidebarArg::Show))?;
        }
        Commands::Theme { theme } => match theme {
            Some(arg) => {
                let theme = match arg {
                    ThemeArg::Light => Theme::Light,
                    ThemeArg::Dark => Theme::Dark,
                };
                service.set_theme(theme)?;
            }
            None => {
                let current = match service.theme()? {
                    Theme::Light => "light",
                    Theme::Dark => "dark",
                };
                println!("{current}");
            }
        },
    }

    Ok(())
}

fn parse_task_id(raw: &str) -> Result<TaskId, Box<dyn Error>> {
    TaskId::parse_str(raw).map_err(|_| format!("invalid task id `{raw}`").into())
}

fn resolve_board<R, P>(
    service: &BoardService<R, P>,
    requested: Option<String>,
) -> Result<String, Box<dyn Error>>
where
    R: TaskRepository,
    P: PrefsRepository,
{
    if let Some(board) = requested {
        return Ok(board);
    }
    service
        .active_board()?
        .ok_or_else(|| "no boards yet; add a task with --board first".into())
}

fn render_board<R, P>(service: &BoardService<R, P>, view: &BoardView) -> Result<(), Box<dyn Error>>
where
    R: TaskRepository,
    P: PrefsRepository,
{
    println!("== {} ==", view.board);
    if service.sidebar_visible()? {
        let boards = service.boards()?;
        println!("boards: {}", boards.join(" | "));
    }

    for column in &view.columns {
        println!();
        println!(
            "{} ({})",
            column.status.as_str().to_uppercase(),
            column.tasks.len()
        );
        for task in &column.tasks {
            println!("  - {}  [{}]", task.title, task.id);
            if !task.description.is_empty() {
                println!("      {}", task.description);
            }
        }
    }

    Ok(())
}
