use anyhow::{Context, Result};
use beekay_chat::{ChatMessage, Session};
use beekay_core::{Entry, Report};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

const BANNER: &str = "Beekay bookkeeping assistant. Describe a transaction, ask for a report, or type /help.";

/// What a slash command asks the loop to do
#[derive(Debug, PartialEq)]
enum Slash {
    Print(String),
    Quit,
}

pub async fn run_chat(session: Session, export_dir: PathBuf) -> Result<()> {
    println!("{BANNER}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush().context("flush stdout")?;

        let Some(line) = lines.next_line().await.context("read stdin")? else {
            break;
        };

        match handle_slash(&session, &line, &export_dir) {
            Some(Slash::Quit) => break,
            Some(Slash::Print(text)) => println!("{text}"),
            None => {
                if let Some(reply) = session.submit_and_wait(&line).await {
                    println!("{}", format_reply(&reply));
                }
            }
        }
    }

    Ok(())
}

fn handle_slash(session: &Session, input: &str, export_dir: &Path) -> Option<Slash> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    let (cmd, arg) = match s.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (s, ""),
    };

    let out = match (cmd, arg) {
        ("/help", _) => "Commands:\n\
- /entries            list recorded entries, newest first\n\
- /reports            list generated reports\n\
- /export <report-id> write a report as text\n\
- /remove <report-id> delete a report\n\
- /clear              delete all entries and reports\n\
- /reset              clear the conversation (entries stay)\n\
- /quit"
            .to_string(),
        ("/quit" | "/exit", _) => return Some(Slash::Quit),
        ("/entries", _) => {
            let entries = session.entries();
            if entries.is_empty() {
                "No entries yet.".to_string()
            } else {
                entries.iter().map(format_entry).collect::<Vec<_>>().join("\n")
            }
        }
        ("/reports", _) => {
            let reports = session.reports();
            if reports.is_empty() {
                "No reports yet.".to_string()
            } else {
                reports.iter().map(format_report).collect::<Vec<_>>().join("\n")
            }
        }
        ("/export", "") | ("/remove", "") => format!("Usage: {cmd} <report-id>"),
        ("/export", id) => match export(session, id, export_dir) {
            Ok(Some(path)) => format!("Saved {}", path.display()),
            Ok(None) => format!("No report with id {id}"),
            Err(e) => format!("Export failed: {e:#}"),
        },
        ("/remove", id) => {
            if session.remove_report(id) {
                format!("Removed report {id}")
            } else {
                format!("No report with id {id}")
            }
        }
        ("/clear", _) => {
            session.clear_all();
            "All entries and reports cleared.".to_string()
        }
        ("/reset", _) => {
            session.reset();
            "Conversation cleared.".to_string()
        }
        _ => "Unknown command. Try /help".to_string(),
    };
    Some(Slash::Print(out))
}

/// Write a stored report into `dir`. `None` when the id is unknown.
pub fn export(session: &Session, id: &str, dir: &Path) -> Result<Option<PathBuf>> {
    let Some((file_name, text)) = session.export_report(id) else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(id, path = %path.display(), "report exported");
    Ok(Some(path))
}

pub fn format_reply(reply: &ChatMessage) -> String {
    let mut out = format!("beekay> {}", reply.text);
    if let Some(entry) = &reply.entry {
        out.push_str(&format!("\n        {}", format_entry(entry)));
    }
    if let Some(report) = &reply.report {
        out.push_str(&format!("\n        {}", format_report(report)));
    }
    out
}

fn format_entry(e: &Entry) -> String {
    format!(
        "{} | {:<7} | {:>12} | {} | {}",
        e.date,
        e.entry_type,
        format!("{:.2}", e.amount),
        e.category,
        e.description
    )
}

fn format_report(r: &Report) -> String {
    format!(
        "[{}] {} | entries={} | income=${:.2} | expenses=${:.2} | net=${:.2}",
        r.id,
        r.title,
        r.entries.len(),
        r.summary.total_income,
        r.summary.total_expenses,
        r.summary.net_amount
    )
}
