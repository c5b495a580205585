pub mod chat;
pub mod coach;
pub mod dashboard;
pub mod enrich;
pub mod knowledge;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crm_insights::{Action, App, SessionContext, View};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::{output, ux_error};

#[derive(Parser)]
#[command(
    name = "crm-demo",
    author,
    version,
    about = "Sales assistant demos on top of your Attio CRM",
    long_about = "Notes dashboard, sales coach, CRM chat and company research.\n\nSet \
                  ATTIO_ACCESS_TOKEN for CRM data and OPENAI_API_KEY for chat features.\nProduct \
                  knowledge is read from *.md files under ./knowledge (KNOWLEDGE_DIR)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Count notes created in a date range and the companies they mention")]
    Dashboard(dashboard::DashboardArgs),

    #[command(about = "Ask the sales coach, grounded in knowledge files and meeting notes")]
    Coach(coach::CoachArgs),

    #[command(about = "Chat with the assistant")]
    Chat(chat::ChatArgs),

    #[command(about = "Research a prospect company before a first meeting")]
    Enrich(enrich::EnrichArgs),

    #[command(about = "Print the knowledge base used as system context")]
    Knowledge(knowledge::KnowledgeArgs)
}

/// Runs one action and prints its outcome. Returns the session to carry on with.
pub async fn step(app: &App, ctx: SessionContext, action: Action) -> SessionContext {
    let transition = app.dispatch(ctx, action).await;
    match &transition.outcome {
        Ok(view) => output::view(view),
        Err(e) => ux_error::from_insights(e).display()
    }
    transition.context
}

/// Reads one line from the terminal; `None` once the user types an exit word.
pub fn prompt(label: &str) -> Result<Option<String>> {
    let line: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;

    let line = line.trim().to_string();
    if matches!(line.as_str(), "exit" | "quit" | "/exit") {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Ends the session so cached notes and transcripts are dropped.
pub async fn finish(app: &App, ctx: SessionContext) {
    let transition = app.dispatch(ctx, Action::EndSession).await;
    if matches!(transition.outcome, Ok(View::SessionEnded)) {
        tracing::debug!(session = %transition.context.id, "Session ended");
    }
}
