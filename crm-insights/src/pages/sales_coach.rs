use crate::app::App;
use crate::chat::ChatMessage;
use crate::error::InsightsResult;
use crate::notes::NoteRow;
use crate::pages::dashboard::DashboardRow;
use crate::resolver::CompanyResolver;
use crate::session::SessionContext;
use tracing::info;

pub const STARTER_QUESTIONS: [&str; 3] = [
    "Which industry / company should we approach next?",
    "What is the ideal proposal storyline to sell to Squadbase?",
    "Based on meeting logs, what are the characteristics of a successful business meeting?"
];

pub fn meeting_logs(notes: &[NoteRow]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(i, note)| format!("## note {}\n{}", i + 1, note.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Knowledge base, then the meeting logs, then the coaching conversation.
pub fn build_messages(
    knowledge: &str,
    notes: &[NoteRow],
    history: &[ChatMessage]
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(knowledge));
    messages.push(ChatMessage::system(format!(
        "# Recent meeting logs\n\n{}",
        meeting_logs(notes)
    )));
    messages.extend_from_slice(history);
    messages
}

pub async fn ask(app: &App, ctx: &mut SessionContext, question: &str) -> InsightsResult<String> {
    let model = app.chat_model()?;
    let notes = app.notes(ctx, app.config().coach_page_size).await?;

    ctx.coach_chat.push(ChatMessage::user(question));
    let messages = build_messages(app.knowledge().as_str(), &notes, &ctx.coach_chat);

    let reply = model.complete(&app.config().models.coach, &messages).await?;
    ctx.coach_chat.push(ChatMessage::assistant(reply.clone()));
    Ok(reply)
}

/// The meeting notes the coach is grounded on, with company names resolved.
/// Shares the session notes cache with [`ask`].
pub async fn data_connections(
    app: &App,
    ctx: &mut SessionContext
) -> InsightsResult<Vec<DashboardRow>> {
    let crm = app.crm()?;
    let notes = app.notes(ctx, app.config().coach_page_size).await?;

    let mut resolver = CompanyResolver::new(crm);
    let companies = resolver.resolve(&notes).await;
    info!(notes = notes.len(), companies = companies.len(), "Listed coach data connections");

    Ok(notes
        .iter()
        .map(|note| DashboardRow::from_note(note, &companies))
        .collect())
}
