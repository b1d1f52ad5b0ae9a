//! Fashion advice: a hosted language model when one is configured, with a
//! static knowledge base as the fallback.

pub mod knowledge;
mod llm;

pub use llm::{DEFAULT_SYSTEM_PROMPT, LlmClient, OpenAiClient};

use crate::config::AdvisorConfig;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    Llm,
    KnowledgeBase,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub answer: String,
    pub source: AdviceSource,
}

pub struct Advisor {
    llm: Option<Arc<dyn LlmClient>>,
    system_prompt: String,
}

impl Advisor {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self {
            llm,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn knowledge_only() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: Option<&AdvisorConfig>) -> Self {
        match config.filter(|c| c.is_enabled()) {
            Some(config) => {
                info!("Fashion advisor using model {}", config.model);
                let client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config));
                let mut advisor = Self::new(Some(client));
                if let Some(prompt) = &config.system_prompt {
                    advisor.system_prompt = prompt.clone();
                }
                advisor
            }
            None => {
                info!("No advisor API key configured, using knowledge base only");
                Self::knowledge_only()
            }
        }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn advise(&self, question: &str) -> Advice {
        if question.trim().is_empty() {
            return Advice {
                answer: knowledge::EMPTY_QUESTION_REPLY.to_string(),
                source: AdviceSource::KnowledgeBase,
            };
        }

        if let Some(llm) = &self.llm {
            match llm.complete(&self.system_prompt, &consultant_prompt(question)).await {
                Ok(text) if !text.trim().is_empty() => {
                    return Advice {
                        answer: format!("🤖 **AI Fashion Consultant:**\n\n{}", text.trim()),
                        source: AdviceSource::Llm,
                    };
                }
                Ok(_) => warn!("Advisor model returned an empty answer, using knowledge base"),
                Err(e) => warn!("Advisor model error: {}. Falling back to knowledge base", e),
            }
        }

        let answer = {
            let mut rng = rand::thread_rng();
            knowledge::answer(question, &mut rng)
        };
        Advice {
            answer,
            source: AdviceSource::KnowledgeBase,
        }
    }
}

fn consultant_prompt(question: &str) -> String {
    format!(
        "Provide helpful, detailed fashion advice for the following question.\n\n\
         Keep your response:\n\
         - Practical and actionable\n\
         - Professional yet friendly\n\
         - Specific to the situation\n\
         - Include styling tips and color suggestions\n\
         - Keep it under 200 words\n\n\
         Question: {question}\n\n\
         Fashion Advice:"
    )
}
