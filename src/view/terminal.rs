//! Terminal rendering for the `docdesk` subcommands.

use colored::Colorize;
use url::Url;

use super::render::{DocumentRow, EntryBody, Role, TranscriptEntry};
use super::{Action, AdminView, ChatView, Notice, NoticeKind, ViewRenderer};

/// Renders to stdout/stderr and prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalView {
    /// Answer every confirmation with "yes" (the `--yes` flag).
    assume_yes: bool,
    /// Print document URLs instead of launching a browser.
    no_browser: bool,
    input: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    #[must_use]
    pub fn no_browser(mut self, no_browser: bool) -> Self {
        self.no_browser = no_browser;
        self
    }

    /// Load the next line the operator typed into the chat input.
    pub fn set_input(&mut self, line: impl Into<String>) {
        self.input = line.into();
    }
}

impl ViewRenderer for TerminalView {
    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => println!("{} {}", "✓".green(), notice.text),
            NoticeKind::Validation => eprintln!("{} {}", "!".yellow(), notice.text.yellow()),
            NoticeKind::Failure => eprintln!("{} {}", "✗".red(), notice.text.red()),
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn set_pending(&mut self, action: Option<Action>) {
        if let Some(action) = action {
            eprintln!("{}", format!("{action}...").dimmed());
        }
    }
}

impl AdminView for TerminalView {
    fn render_rows(&mut self, rows: &[DocumentRow]) {
        if rows.is_empty() {
            println!("{}", "No documents.".dimmed());
            return;
        }
        let name_width = rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());
        println!(
            "{:<name_width$}  {:>12}  {}",
            "Name".bold(),
            "Size".bold(),
            "Modified".bold()
        );
        for row in rows {
            println!(
                "{:<name_width$}  {:>12}  {}",
                row.name, row.size_label, row.modified_label
            );
        }
    }

    fn show_replace_panel(&mut self, status_line: &str) {
        println!("{}", status_line.cyan());
    }

    fn hide_replace_panel(&mut self) {}

    fn reset_upload_input(&mut self) {}

    fn reset_replace_input(&mut self) {}

    fn open_url(&mut self, url: &Url) {
        if self.no_browser || webbrowser::open(url.as_str()).is_err() {
            println!("{url}");
        }
    }
}

impl ChatView for TerminalView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_entry(&mut self, entry: &TranscriptEntry) {
        match (&entry.role, &entry.body) {
            (Role::User, _) => println!("{} {}", "you>".bold(), entry.plain_text()),
            (Role::Bot, EntryBody::Answer(card)) => {
                println!("{}", card.article.bold());
                println!("{}", card.metadata_line().dimmed());
                if let Some(summary) = &card.summary {
                    println!("{summary}");
                }
                for line in card.excerpt.lines() {
                    println!("  │ {line}");
                }
                if let Some(score) = &card.score {
                    println!("{}", format!("Score: {score}").dimmed());
                }
            }
            (Role::Bot, EntryBody::Text(text)) => println!("{text}"),
        }
    }

    fn scroll_to_end(&mut self) {
        println!();
    }
}
