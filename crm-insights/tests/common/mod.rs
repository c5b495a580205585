#![allow(dead_code)]

use async_trait::async_trait;
use crm_insights::config::{AppConfig, AttioConfig};
use crm_insights::{
    App, AttioClient, ChatMessage, ChatModel, InsightsError, InsightsResult, KnowledgeBase
};
use std::sync::{Arc, Mutex};
use testing::TEST_CRM_TOKEN;

/// Chat model double that records every request and replies from a script.
#[derive(Default)]
pub struct RecordingChat {
    pub requests: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    pub fail_with: Mutex<Option<String>>,
    /// Indexes into `requests` that were sent with web search enabled.
    pub searched: Mutex<Vec<usize>>
}

impl RecordingChat {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Mutex::new(Some(message.to_string())),
            ..Default::default()
        }
    }

    pub fn request(&self, index: usize) -> (String, Vec<ChatMessage>) {
        self.requests.lock().unwrap()[index].clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn searched(&self) -> Vec<usize> {
        self.searched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingChat {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
        let mut requests = self.requests.lock().unwrap();
        requests.push((model.to_string(), messages.to_vec()));
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(InsightsError::Chat(message));
        }
        Ok(format!("reply {}", requests.len()))
    }

    async fn search(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
        let index = self.request_count();
        self.searched.lock().unwrap().push(index);
        self.complete(model, messages).await
    }
}

pub fn attio_config(base: &str) -> AttioConfig {
    AttioConfig {
        api_base: base.to_string(),
        access_token: Some(TEST_CRM_TOKEN.to_string()),
        timeout_seconds: 5
    }
}

pub fn attio_client(base: &str) -> AttioClient {
    AttioClient::new(&attio_config(base)).unwrap()
}

pub fn app(base: Option<&str>, chat: Option<Arc<RecordingChat>>, knowledge: KnowledgeBase) -> App {
    let config = AppConfig {
        attio: base.map(attio_config).unwrap_or_default(),
        ..AppConfig::default()
    };
    let crm = base.map(|b| Arc::new(attio_client(b)) as Arc<dyn crm_insights::CrmClient>);
    let chat = chat.map(|c| c as Arc<dyn ChatModel>);
    App::new(config, crm, chat, knowledge)
}
