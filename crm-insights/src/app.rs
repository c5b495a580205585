use crate::attio::{create_attio_client, CrmClient, PageSize};
use crate::chat::{create_openai_chat, ChatModel};
use crate::config::AppConfig;
use crate::error::{InsightsError, InsightsResult};
use crate::filter::DateRange;
use crate::knowledge::KnowledgeBase;
use crate::notes::{flatten_notes, NoteRow};
use crate::pages::{crm_chat, dashboard, enrichment, sales_coach};
use crate::pagination::fetch_all_notes;
use crate::session::{CachedNotes, SessionContext};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MISSING_CRM_TOKEN: &str = "Please add your Attio access token to continue.";
pub const MISSING_CHAT_KEY: &str = "Please add your OpenAI API key to continue.";

/// One user action. Each maps to exactly one state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowDashboard(DateRange),
    AskCoach(String),
    ShowCoachNotes,
    SendChat(String),
    StartResearch { company: String },
    FollowUpResearch(String),
    SummarizeResearch,
    EndSession
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard(dashboard::DashboardView),
    Notes(Vec<dashboard::DashboardRow>),
    Reply(String),
    Report(String),
    Notice(String),
    SessionEnded
}

/// Result of dispatching an action: the context to keep plus what to draw.
#[derive(Debug)]
pub struct Transition {
    pub context: SessionContext,
    pub outcome: InsightsResult<View>
}

pub struct App {
    config: AppConfig,
    crm: Option<Arc<dyn CrmClient>>,
    chat: Option<Arc<dyn ChatModel>>,
    knowledge: Arc<KnowledgeBase>
}

impl App {
    pub fn new(
        config: AppConfig,
        crm: Option<Arc<dyn CrmClient>>,
        chat: Option<Arc<dyn ChatModel>>,
        knowledge: KnowledgeBase
    ) -> Self {
        Self {
            config,
            crm,
            chat,
            knowledge: Arc::new(knowledge)
        }
    }

    /// Builds the HTTP clients and reads the knowledge base once. Missing
    /// tokens leave the matching features disabled.
    pub fn from_config(config: AppConfig) -> InsightsResult<Self> {
        let knowledge = KnowledgeBase::load(&config.knowledge_dir)?;

        let crm = match create_attio_client(&config.attio) {
            Ok(client) => Some(client),
            Err(InsightsError::Configuration(reason)) => {
                warn!(%reason, "CRM features disabled");
                None
            }
            Err(e) => return Err(e)
        };

        let chat = match create_openai_chat(&config.openai) {
            Ok(client) => Some(client),
            Err(InsightsError::Configuration(reason)) => {
                warn!(%reason, "Chat features disabled");
                None
            }
            Err(e) => return Err(e)
        };

        info!(
            crm_enabled = crm.is_some(),
            chat_enabled = chat.is_some(),
            knowledge_documents = knowledge.documents().len(),
            "Application initialised"
        );

        Ok(Self::new(config, crm, chat, knowledge))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn crm(&self) -> InsightsResult<&dyn CrmClient> {
        self.crm
            .as_deref()
            .ok_or_else(|| InsightsError::Configuration(MISSING_CRM_TOKEN.to_string()))
    }

    pub fn chat_model(&self) -> InsightsResult<&dyn ChatModel> {
        self.chat
            .as_deref()
            .ok_or_else(|| InsightsError::Configuration(MISSING_CHAT_KEY.to_string()))
    }

    /// Flattened notes for this session, refetched once the cache has expired.
    pub async fn notes(
        &self,
        ctx: &mut SessionContext,
        page_size: usize
    ) -> InsightsResult<Arc<Vec<NoteRow>>> {
        let now = Utc::now();
        if let Some(rows) = ctx.fresh_notes(now, self.config.notes_cache_ttl()) {
            debug!(count = rows.len(), "Using cached notes");
            return Ok(rows);
        }

        let crm = self.crm()?;
        let raw = fetch_all_notes(crm, PageSize::new(page_size)?).await?;
        let cached = CachedNotes::new(flatten_notes(&raw), now);
        let rows = Arc::clone(&cached.rows);
        ctx.notes = Some(cached);
        Ok(rows)
    }

    /// Applies one action to the session. A failed action hands back the
    /// context unchanged; a missing secret becomes a notice.
    pub async fn dispatch(&self, ctx: SessionContext, action: Action) -> Transition {
        let mut next = ctx.clone();

        let outcome = match action {
            Action::ShowDashboard(range) => dashboard::render(self, &mut next, range)
                .await
                .map(View::Dashboard),
            Action::AskCoach(question) => sales_coach::ask(self, &mut next, &question)
                .await
                .map(View::Reply),
            Action::ShowCoachNotes => sales_coach::data_connections(self, &mut next)
                .await
                .map(View::Notes),
            Action::SendChat(prompt) => crm_chat::send(self, &mut next, &prompt)
                .await
                .map(View::Reply),
            Action::StartResearch { company } => enrichment::start(self, &mut next, &company)
                .await
                .map(View::Reply),
            Action::FollowUpResearch(prompt) => enrichment::follow_up(self, &mut next, &prompt).await,
            Action::SummarizeResearch => enrichment::summarize(self, &mut next).await,
            Action::EndSession => {
                next.clear();
                Ok(View::SessionEnded)
            }
        };

        match outcome {
            Ok(view) => Transition {
                context: next,
                outcome: Ok(view)
            },
            Err(InsightsError::Configuration(notice)) => Transition {
                context: ctx,
                outcome: Ok(View::Notice(notice))
            },
            Err(e) => {
                warn!(session = %ctx.id, error = %e, "Action failed");
                Transition {
                    context: ctx,
                    outcome: Err(e)
                }
            }
        }
    }
}
