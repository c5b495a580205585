//! Enrich command - research a prospect company before the first meeting.
//!
//! After the initial research reply, follow-up questions continue the same
//! conversation; `/summary` produces the final report.

use anyhow::Result;
use clap::Args;
use crm_insights::{Action, App, SessionContext};

use super::{finish, prompt, step};
use crate::output;

const SUMMARY_COMMAND: &str = "/summary";

#[derive(Args)]
pub struct EnrichArgs {
    /// Company to research
    #[arg(long, short)]
    pub company: String,

    /// Print the summarized report right after the first reply and exit
    #[arg(long)]
    pub summarize: bool
}

pub async fn run(app: &App, args: EnrichArgs) -> Result<()> {
    output::header(&format!("Data Enrichment: {}", args.company.trim()));
    let mut ctx = SessionContext::new();

    ctx = step(
        app,
        ctx,
        Action::StartResearch {
            company: args.company
        }
    )
    .await;

    if args.summarize {
        ctx = step(app, ctx, Action::SummarizeResearch).await;
        finish(app, ctx).await;
        return Ok(());
    }

    output::hint(&format!(
        "Ask follow-up questions, '{SUMMARY_COMMAND}' for the final report, 'exit' to leave"
    ));
    while let Some(line) = prompt("Follow-up")? {
        ctx = match line.as_str() {
            "" => continue,
            SUMMARY_COMMAND => step(app, ctx, Action::SummarizeResearch).await,
            _ => step(app, ctx, Action::FollowUpResearch(line.clone())).await
        };
    }

    finish(app, ctx).await;
    Ok(())
}
