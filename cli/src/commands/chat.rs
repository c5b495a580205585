use anyhow::Result;
use clap::Args;
use crm_insights::{Action, App, SessionContext};

use super::{finish, prompt, step};
use crate::output;

#[derive(Args)]
pub struct ChatArgs {
    /// Send a single message and exit
    #[arg(long)]
    pub message: Option<String>
}

pub async fn run(app: &App, args: ChatArgs) -> Result<()> {
    let mut ctx = SessionContext::new();

    if let Some(message) = args.message {
        ctx = step(app, ctx, Action::SendChat(message)).await;
        finish(app, ctx).await;
        return Ok(());
    }

    output::header("CRM Chat");
    output::hint("Type 'exit' to leave");
    while let Some(line) = prompt("You")? {
        if line.is_empty() {
            continue;
        }
        ctx = step(app, ctx, Action::SendChat(line)).await;
    }

    finish(app, ctx).await;
    Ok(())
}
