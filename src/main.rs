use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use faiv_console::config::DEFAULT_CONFIG_PATH;
use faiv_console::console::{commands::HELP, parse_command, render_bar, Command};
use faiv_console::session::{SessionStore, CONFIRMATION_WORD};
use faiv_console::{Config, Console, FileStore, HttpBackend, Pillar, SubmitOutcome};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

#[derive(Parser)]
#[command(name = "faiv-console", version, about = "Chat console for the FAIV decision service")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Override the session data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Interactive chat (default)
    Chat {
        #[arg(long, value_parser = str::parse::<Pillar>)]
        pillar: Option<Pillar>,
    },
    /// Send one query to the active session and print the reply
    Ask {
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long, value_parser = str::parse::<Pillar>)]
        pillar: Option<Pillar>,
    },
    /// List sessions
    List,
    /// Create a session and make it active
    New,
    /// Make a session active
    Select { id: String },
    /// Rename a session
    Rename {
        id: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Delete a session
    Delete {
        id: String,
        /// Confirmation word; prompted for when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Print a transcript (active session by default)
    Show { id: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let data_dir = cli.data_dir.unwrap_or_else(|| cfg.storage.data_dir.clone());
    info!("Session data: {}", data_dir.display());

    let store = SessionStore::load(Box::new(FileStore::new(&data_dir)?));
    let backend = HttpBackend::new(&cfg.backend.base_url, cfg.backend.timeout())?;
    let mut console = Console::new(store, Arc::new(backend))
        .with_pillar(cfg.backend.default_pillar)
        .with_loader(cfg.loader.clone());

    match cli.command.unwrap_or(CliCommand::Chat { pillar: None }) {
        CliCommand::Chat { pillar } => {
            if let Some(pillar) = pillar {
                console.set_pillar(pillar);
            }
            run_chat(&mut console).await?;
        }
        CliCommand::Ask { text, pillar } => {
            if let Some(pillar) = pillar {
                console.set_pillar(pillar);
            }
            let outcome = ask(&mut console, &text.join(" ")).await;
            if let SubmitOutcome::Failed { .. } = outcome {
                std::process::exit(1);
            }
        }
        CliCommand::List => list_sessions(&console),
        CliCommand::New => {
            let id = console.store_mut().create_session();
            println!("{}", id);
        }
        CliCommand::Select { id } => {
            console.store_mut().select_session(&id)?;
            println!("Active session: {}", id);
        }
        CliCommand::Rename { id, title } => {
            console.store_mut().rename_session(&id, &title.join(" "))?;
        }
        CliCommand::Delete { id, confirm } => {
            let pending = console.store().request_deletion(&id)?;
            let typed = match confirm {
                Some(typed) => typed,
                None => prompt_line(&format!("Type \"{}\" to confirm: ", CONFIRMATION_WORD))?,
            };
            if console.store_mut().confirm_deletion(pending, &typed) {
                println!("Deleted {}", id);
            } else {
                bail!("Deletion not confirmed; session {} kept", id);
            }
        }
        CliCommand::Show { id } => {
            if let Some(id) = id {
                console.store_mut().select_session(&id)?;
            }
            show_active(&console);
        }
    }

    Ok(())
}

async fn run_chat(console: &mut Console) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("FAIV console ({}). /help for commands.", console.pillar());
    show_active(console);

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Ask(text) => {
                ask(console, &text).await;
            }
            Command::New => {
                let id = console.store_mut().create_session();
                println!("New session {}", id);
            }
            Command::List => list_sessions(console),
            Command::Select(id) => match console.store_mut().select_session(&id) {
                Ok(()) => show_active(console),
                Err(e) => println!("{}", e),
            },
            Command::Rename { id, title } => {
                if let Err(e) = console.store_mut().rename_session(&id, &title) {
                    println!("{}", e);
                }
            }
            Command::Delete(id) => delete_interactive(console, &mut lines, &id).await?,
            Command::Pillar(name) => match name.parse::<Pillar>() {
                Ok(pillar) => console.set_pillar(pillar),
                Err(e) => println!("{}", e),
            },
            Command::Show => show_active(console),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Invalid(input) => println!("Unrecognized command: {} (try /help)", input),
        }
    }

    Ok(())
}

async fn ask(console: &mut Console, text: &str) -> SubmitOutcome {
    let outcome = console
        .submit_with_progress(text, |percent| {
            print!("\r{} {:>3}%", render_bar(percent), percent);
            std::io::stdout().flush().ok();
        })
        .await;
    println!();

    match &outcome {
        SubmitOutcome::Answered { .. } | SubmitOutcome::Failed { .. } => {
            if let Some(entry) = console.store().active_session().and_then(|s| s.entries().last()) {
                for line in faiv_console::console::render_entry(entry) {
                    println!("{}", line);
                }
            }
        }
        SubmitOutcome::Dropped { session_id } => {
            println!("Session {} was deleted before the reply arrived", session_id)
        }
        SubmitOutcome::Ignored => {}
    }

    outcome
}

async fn delete_interactive(
    console: &mut Console,
    lines: &mut Lines<BufReader<Stdin>>,
    id: &str,
) -> Result<()> {
    let pending = match console.store().request_deletion(id) {
        Ok(pending) => pending,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    print!("This permanently deletes the chat. Type \"{}\" to confirm: ", CONFIRMATION_WORD);
    std::io::stdout().flush().ok();
    let typed = lines.next_line().await?.unwrap_or_default();

    if console.store_mut().confirm_deletion(pending, &typed) {
        println!("Deleted {}; active session is {}", id, console.store().active_id());
    } else {
        println!("Not deleted");
    }
    Ok(())
}

fn list_sessions(console: &Console) {
    let store = console.store();
    for (id, session) in store.sessions() {
        let marker = if id == store.active_id() { "*" } else { " " };
        println!(
            "{} {}  {}  ({} entries)",
            marker,
            id,
            session.title(),
            session.entries().len()
        );
    }
}

fn show_active(console: &Console) {
    if let Some(session) = console.store().active_session() {
        println!("== {} ==", session.title());
    }
    for line in console.render_active() {
        println!("{}", line);
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pillar_flag_accepts_any_case() {
        for (flag, expected) in [
            ("FAIV", Pillar::Faiv),
            ("Wisdom", Pillar::Wisdom),
            ("strategy", Pillar::Strategy),
        ] {
            let cli = Cli::try_parse_from(["faiv-console", "ask", "--pillar", flag, "Hire?"])
                .unwrap();
            match cli.command {
                Some(CliCommand::Ask { pillar, .. }) => assert_eq!(pillar, Some(expected)),
                _ => panic!("expected ask command"),
            }
        }
    }

    #[test]
    fn test_unknown_pillar_flag_is_rejected() {
        assert!(Cli::try_parse_from(["faiv-console", "chat", "--pillar", "Finance"]).is_err());
    }
}
