//! Pre-meeting research on a prospect company.
//!
//! `start` sends the research brief, `follow_up` continues the same
//! conversation and `summarize` condenses it into a markdown report.

use crate::app::{App, View};
use crate::chat::ChatMessage;
use crate::error::InsightsResult;
use crate::session::SessionContext;

pub const SUMMARY_PROMPT: &str =
    "Please summarize the conversation history and create a final research report.";
pub const NEEDS_COMPANY: &str = "Submit a company name before asking follow-up questions.";
pub const NOTHING_TO_SUMMARIZE: &str = "There is no research conversation to summarize yet.";

pub fn initial_prompt(company: &str, knowledge: &str) -> String {
    format!(
        "You are a sales team assistant.
We have an initial sales meeting scheduled with {company}, and I need your help in preparing for it.
Please conduct the necessary research for the initial sales meeting, using the product information as a reference.

### Research Overview
Target Company: {company}

- Are they using Streamlit for building internal applications?
- How are they building their internal applications? Please investigate in detail, especially if they are using Streamlit or Next.js.
- What initiatives are they taking regarding data utilization and AI implementation within their company?

### Reference Information: About Our Product
{knowledge}
"
    )
}

async fn research(app: &App, ctx: &mut SessionContext, prompt: String) -> InsightsResult<String> {
    let model = app.chat_model()?;

    ctx.enrichment.messages.push(ChatMessage::user(prompt));
    let reply = model
        .search(&app.config().models.research, &ctx.enrichment.messages)
        .await?;
    ctx.enrichment.messages.push(ChatMessage::assistant(reply.clone()));
    Ok(reply)
}

/// Starts a fresh research conversation; the first reply becomes the report.
pub async fn start(app: &App, ctx: &mut SessionContext, company: &str) -> InsightsResult<String> {
    app.chat_model()?;

    let company = company.trim();
    ctx.enrichment.messages.clear();
    ctx.enrichment.company = Some(company.to_string());

    let prompt = initial_prompt(company, app.knowledge().as_str());
    let reply = research(app, ctx, prompt).await?;
    ctx.enrichment.report = Some(reply.clone());
    Ok(reply)
}

pub async fn follow_up(app: &App, ctx: &mut SessionContext, prompt: &str) -> InsightsResult<View> {
    if !ctx.enrichment.accepts_follow_up() {
        return Ok(View::Notice(NEEDS_COMPANY.to_string()));
    }
    research(app, ctx, prompt.to_string()).await.map(View::Reply)
}

pub fn render_report(summary: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
    let details = serde_json::to_string_pretty(messages)?;
    Ok(format!(
        "\n{summary}\n\n<details>\n<summary>Details</summary>\n\n```json\n{details}\n```\n</details>\n"
    ))
}

/// Asks for a final report. The summary request is not added to the
/// research conversation.
pub async fn summarize(app: &App, ctx: &mut SessionContext) -> InsightsResult<View> {
    if ctx.enrichment.messages.is_empty() {
        return Ok(View::Notice(NOTHING_TO_SUMMARIZE.to_string()));
    }
    let model = app.chat_model()?;

    let mut messages = ctx.enrichment.messages.clone();
    messages.push(ChatMessage::user(SUMMARY_PROMPT));

    let summary = model.complete(&app.config().models.summary, &messages).await?;
    let report = render_report(&summary, &ctx.enrichment.messages)?;
    ctx.enrichment.report = Some(report.clone());
    Ok(View::Report(report))
}
