//! Coach command - sales coaching grounded in knowledge files and meeting notes.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use crm_insights::pages::sales_coach::STARTER_QUESTIONS;
use crm_insights::{Action, App, SessionContext};

use super::{finish, prompt, step};
use crate::output;

#[derive(Args)]
pub struct CoachArgs {
    /// Question to start with; without it a starter question is offered
    pub question: Option<String>,

    /// Ask a single question and exit
    #[arg(long)]
    pub once: bool,

    /// List the CRM notes the coach reads and exit
    #[arg(long, conflicts_with_all = ["question", "once"])]
    pub show_notes: bool
}

pub async fn run(app: &App, args: CoachArgs) -> Result<()> {
    output::header("Sales Coach");
    let mut ctx = SessionContext::new();

    if args.show_notes {
        ctx = step(app, ctx, Action::ShowCoachNotes).await;
        finish(app, ctx).await;
        return Ok(());
    }

    let first = match args.question {
        Some(question) => Some(question),
        None => {
            output::subheader("Starting questions");
            for (i, question) in STARTER_QUESTIONS.iter().enumerate() {
                println!("  {} {}", format!("{}.", i + 1).cyan(), question);
            }
            output::hint("Type a number to pick a starter question, or ask your own");
            prompt("You")?
                .filter(|line| !line.is_empty())
                .map(|line| pick_starter(&line))
        }
    };

    let Some(first) = first else {
        finish(app, ctx).await;
        return Ok(());
    };
    ctx = step(app, ctx, Action::AskCoach(first)).await;

    if !args.once {
        while let Some(line) = prompt("You")? {
            if line.is_empty() {
                continue;
            }
            ctx = step(app, ctx, Action::AskCoach(line)).await;
        }
    }

    finish(app, ctx).await;
    Ok(())
}

fn pick_starter(line: &str) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| STARTER_QUESTIONS.get(i))
        .map_or_else(|| line.to_string(), |q| (*q).to_string())
}
