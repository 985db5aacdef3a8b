// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Valet workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Role of a message in a conversation transcript.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// How the user delivered an utterance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Voice,
    Text,
}

/// The three specialized responders an utterance can be routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponderVariant {
    Logistics,
    Affect,
    Prioritization,
}

/// Identifies which component authored a response.
///
/// One tag per responder variant, plus `Coordinator` for synthesized
/// and direct responses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentTag {
    Logistics,
    Affect,
    Prioritization,
    Coordinator,
}

impl From<ResponderVariant> for AgentTag {
    fn from(variant: ResponderVariant) -> Self {
        match variant {
            ResponderVariant::Logistics => AgentTag::Logistics,
            ResponderVariant::Affect => AgentTag::Affect,
            ResponderVariant::Prioritization => AgentTag::Prioritization,
        }
    }
}

/// Detected emotional state of the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Frustrated,
    Sad,
    Excited,
    Stressed,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Which component authored an assistant turn, if known.
    #[serde(default)]
    pub agent: Option<AgentTag>,
}

impl Message {
    /// A user turn timestamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            agent: None,
        }
    }

    /// An assistant turn timestamped now, attributed to the given component.
    pub fn assistant(content: impl Into<String>, agent: AgentTag) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            agent: Some(agent),
        }
    }
}

/// A role/content pair as sent to completion backends.
///
/// Distinct from [`Message`]: this is the wire shape, with no timestamp
/// or attribution metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Life area a goal belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GoalCategory {
    Career,
    Personal,
    Health,
    Family,
}

/// A user goal tracked in the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 1 (lowest) through 10 (highest).
    pub priority: u8,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Completion fraction in [0, 1].
    #[serde(default)]
    pub progress: f32,
    pub category: GoalCategory,
}

/// A completed milestone recorded in the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
}

/// Kind of personal relationship.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelationKind {
    Family,
    Friend,
    Colleague,
    Mentor,
}

/// A person in the user's life, tracked for contact suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub name: String,
    pub kind: RelationKind,
    #[serde(default)]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    /// 1 (lowest) through 10 (highest).
    pub importance: u8,
}

/// Daily working-hours window, 24h clock strings ("09:00").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "18:00".to_string(),
        }
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub wake_word: String,
    pub voice_id: String,
    pub timezone: String,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            wake_word: "valet".to_string(),
            voice_id: "default".to_string(),
            timezone: "UTC".to_string(),
            working_hours: WorkingHours::default(),
        }
    }
}

/// Most recently detected mood, with the classifier's confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodState {
    pub mood: Mood,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl Default for MoodState {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            confidence: 0.5,
            timestamp: Utc::now(),
        }
    }
}

/// Everything the assistant knows about a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub mood_state: MoodState,
}

impl UserProfile {
    /// A fresh profile with default preferences and no history.
    pub fn default_for(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            preferences: UserPreferences::default(),
            goals: Vec::new(),
            relationships: Vec::new(),
            achievements: Vec::new(),
            mood_state: MoodState::default(),
        }
    }
}

/// Conversation state threaded through a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub session_id: String,
    pub history: Vec<Message>,
    pub user_profile: UserProfile,
    /// Coarse label like "morning" or "evening", derived from the clock.
    pub time_of_day: String,
}

/// A single user utterance plus everything needed to answer it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub id: String,
    pub user_id: String,
    pub modality: Modality,
    pub input: String,
    pub context: ConversationContext,
    pub timestamp: DateTime<Utc>,
}

/// What a suggested action would do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Email,
    Calendar,
    Reminder,
    Research,
    Contact,
}

/// Execution state of a suggested action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Executing,
    Completed,
    Failed,
}

/// A structured follow-up a responder suggests alongside its reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub status: ActionStatus,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl Action {
    /// A pending action with the given detail map.
    pub fn pending(kind: ActionKind, details: Map<String, Value>) -> Self {
        Self {
            kind,
            status: ActionStatus::Pending,
            details,
        }
    }
}

/// A responder's (or the coordinator's) answer to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub id: String,
    pub tag: AgentTag,
    pub content: String,
    #[serde(default)]
    pub actions: Vec<Action>,
    pub should_vocalize: bool,
    pub confidence: f32,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// A fact stored in the user's semantic memory, with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeNode {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub category: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// A memory hit returned from semantic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub similarity: f32,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A condensed inbox item from a mail feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSummary {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub snippet: String,
    /// 1 (lowest) through 10 (highest).
    pub importance: u8,
    pub action_required: bool,
    pub timestamp: DateTime<Utc>,
}

/// An upcoming event from a calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}
