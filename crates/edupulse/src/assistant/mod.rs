//! Generative text assistant.
//!
//! The panel sends one request at a time to a [`TextGenerator`] and always
//! produces displayable text: either what the service generated or the
//! configured fallback for that kind of request.

mod conversation;
mod gemini;
pub mod prompts;

use std::fmt::{self, Debug, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::{AssistantConfig, PromptProfile};
use crate::error::{Error, Result};
use crate::model::{Course, Student};

pub use conversation::Conversation;
pub use gemini::GeminiClient;

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human user.
    User,
    /// The assistant.
    Model,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub text: String,
}

impl ChatMessage {
    /// A user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// An assistant turn.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A fully specified call to the text service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// Standing instruction for the model, if any.
    pub system_instruction: Option<String>,
    /// The turns to send, oldest first. Single prompts are one user turn.
    pub contents: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Nucleus-sampling threshold.
    pub top_p: Option<f32>,
}

/// Something that turns a [`GenerationRequest`] into text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Run one generation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternalService`] if the service cannot be reached or
    /// answers with an error.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// The kinds of request the panel issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Student performance summary.
    Report,
    /// Course syllabus.
    Syllabus,
    /// Assistant chat turn.
    Chat,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::Syllabus => write!(f, "syllabus"),
            Self::Chat => write!(f, "chat"),
        }
    }
}

/// Text to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The service produced this text.
    Generated(String),
    /// The service failed; this is the configured fallback.
    Fallback(String),
}

impl Reply {
    /// The text to display.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }

    /// Whether this is the fallback text.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Take the text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) | Self::Fallback(text) => text,
        }
    }
}

/// A panel that issues at most one text request at a time.
#[derive(Debug)]
pub struct AssistantPanel {
    generator: Arc<dyn TextGenerator>,
    report: PromptProfile,
    syllabus: PromptProfile,
    chat: PromptProfile,
    busy: AtomicBool,
}

/// Clears the busy flag when dropped, including when the request future is
/// dropped mid-flight.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AssistantPanel {
    /// Create a panel using the prompt profiles from `config`.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, config: &AssistantConfig) -> Self {
        Self {
            generator,
            report: config.report.clone(),
            syllabus: config.syllabus.clone(),
            chat: config.chat.clone(),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The profile used for `kind`.
    #[must_use]
    pub fn profile(&self, kind: RequestKind) -> &PromptProfile {
        match kind {
            RequestKind::Report => &self.report,
            RequestKind::Syllabus => &self.syllabus,
            RequestKind::Chat => &self.chat,
        }
    }

    /// Send `request` with the generation parameters for `kind`.
    ///
    /// Any service failure, and an empty answer, yields the fallback text for
    /// `kind`. Parameters already set on `request` are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestInFlight`] if another request is outstanding.
    pub async fn request_text(
        &self,
        kind: RequestKind,
        mut request: GenerationRequest,
    ) -> Result<Reply> {
        let _guard = self.acquire()?;
        let profile = self.profile(kind);
        request.temperature = request.temperature.or(profile.temperature);
        request.top_p = request.top_p.or(profile.top_p);

        debug!("Requesting {} text ({} turns)", kind, request.contents.len());
        match self.generator.generate(request).await {
            Ok(text) if !text.trim().is_empty() => Ok(Reply::Generated(text)),
            Ok(_) => {
                error!("Text service returned no {} text", kind);
                Ok(Reply::Fallback(profile.fallback.clone()))
            }
            Err(e) => {
                error!("Text service failed for {}: {}", kind, e);
                Ok(Reply::Fallback(profile.fallback.clone()))
            }
        }
    }

    /// Generate a performance summary for `student`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestInFlight`] if another request is outstanding.
    pub async fn student_report(&self, student: &Student) -> Result<Reply> {
        let prompt = prompts::student_report(&student.name, &student.report_context());
        self.request_text(RequestKind::Report, single_turn(prompt))
            .await
    }

    /// Generate a syllabus for `course`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestInFlight`] if another request is outstanding.
    pub async fn course_syllabus(&self, course: &Course) -> Result<Reply> {
        let prompt = prompts::course_syllabus(&course.title, &course.description);
        self.request_text(RequestKind::Syllabus, single_turn(prompt))
            .await
    }

    /// Answer `message` given the prior `history`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestInFlight`] if another request is outstanding.
    pub async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<Reply> {
        let mut contents = history.to_vec();
        contents.push(ChatMessage::user(message));
        let request = GenerationRequest {
            system_instruction: Some(prompts::ASSISTANT_INSTRUCTION.to_string()),
            contents,
            ..GenerationRequest::default()
        };
        self.request_text(RequestKind::Chat, request).await
    }

    fn acquire(&self) -> Result<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::RequestInFlight)?;
        Ok(BusyGuard(&self.busy))
    }
}

fn single_turn(prompt: String) -> GenerationRequest {
    GenerationRequest {
        contents: vec![ChatMessage::user(prompt)],
        ..GenerationRequest::default()
    }
}
