mod console;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use console::Console;
use swiftmsg_db::Database;
use swiftmsg_lang::ProcessEnv;

#[derive(Parser, Debug)]
#[command(name = "swiftmsg-admin")]
#[command(version)]
#[command(about = "Administer the localized message database")]
#[command(long_about = "Administer the localized message database.\n\n\
    With no command flag an interactive menu is started.")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "SWIFTMSG_DB_PATH", default_value = "messages.db")]
    db: PathBuf,

    /// List all messages in the database
    #[arg(long)]
    listall: bool,

    /// List all messages for the given language
    #[arg(long, value_name = "LANG")]
    list: Option<String>,

    /// Add a new message (prompts for id, language and content)
    #[arg(long)]
    add: bool,

    /// Delete a message (prompts, asks for confirmation)
    #[arg(long)]
    delete: bool,

    /// Get a message by language and id
    #[arg(long)]
    get: bool,

    /// Get a message using the system language
    #[arg(long)]
    sysget: bool,

    /// Show message counts per language
    #[arg(long)]
    stats: bool,

    /// Print listings and stats as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    ListAll,
    List(String),
    Add,
    Delete,
    Get,
    SysGet,
    Stats,
    Interactive,
}

impl Cli {
    /// The first command flag set, in precedence order.
    fn command(&self) -> Command {
        if self.listall {
            Command::ListAll
        } else if let Some(lang) = self.list.as_ref().filter(|l| !l.is_empty()) {
            Command::List(lang.clone())
        } else if self.add {
            Command::Add
        } else if self.delete {
            Command::Delete
        } else if self.get {
            Command::Get
        } else if self.sysget {
            Command::SysGet
        } else if self.stats {
            Command::Stats
        } else {
            Command::Interactive
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swiftmsg_admin=info,swiftmsg_db=warn,swiftmsg_lang=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command();
    debug!(?command, db = %cli.db.display(), "Starting");

    let db = Database::open(&cli.db)
        .with_context(|| format!("Error opening database {}", cli.db.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let locale = ProcessEnv;
    let mut console = Console::new(&db, stdin.lock(), stdout.lock(), &locale).json(cli.json);

    match command {
        Command::ListAll => console.list_all()?,
        Command::List(lang) => console.list_for_language(&lang)?,
        Command::Add => console.add()?,
        Command::Delete => console.delete()?,
        Command::Get => console.get()?,
        Command::SysGet => console.get_system()?,
        Command::Stats => console.stats()?,
        Command::Interactive => console.interactive()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("swiftmsg-admin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_is_interactive() {
        assert_eq!(parse(&["--db", "x.db"]).command(), Command::Interactive);
    }

    #[test]
    fn flags_select_commands() {
        assert_eq!(parse(&["--listall"]).command(), Command::ListAll);
        assert_eq!(parse(&["--list", "es"]).command(), Command::List("es".into()));
        assert_eq!(parse(&["--add"]).command(), Command::Add);
        assert_eq!(parse(&["--delete"]).command(), Command::Delete);
        assert_eq!(parse(&["--get"]).command(), Command::Get);
        assert_eq!(parse(&["--sysget"]).command(), Command::SysGet);
        assert_eq!(parse(&["--stats", "--json"]).command(), Command::Stats);
    }

    #[test]
    fn listall_takes_precedence() {
        assert_eq!(parse(&["--add", "--listall"]).command(), Command::ListAll);
        assert_eq!(parse(&["--list", "", "--add"]).command(), Command::Add);
    }

    #[test]
    fn db_path_flag() {
        assert_eq!(parse(&["--db", "/tmp/m.db"]).db, PathBuf::from("/tmp/m.db"));
    }
}
