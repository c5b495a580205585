use crate::app::App;
use crate::chat::ChatMessage;
use crate::error::InsightsResult;
use crate::session::SessionContext;

pub async fn send(app: &App, ctx: &mut SessionContext, prompt: &str) -> InsightsResult<String> {
    let model = app.chat_model()?;

    ctx.crm_chat.push(ChatMessage::user(prompt));
    let reply = model.complete(&app.config().models.chat, &ctx.crm_chat).await?;
    ctx.crm_chat.push(ChatMessage::assistant(reply.clone()));
    Ok(reply)
}
