// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logistics responder: email, calendar, scheduling, and task coordination.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use valet_core::types::{
    AgentRequest, AgentResponse, AgentTag, CalendarEvent, ChatMessage, EmailSummary,
    ResponderVariant, Role,
};
use valet_core::{CalendarFeed, MailFeed, ValetError};
use valet_llm::FallbackClient;

use crate::actions::{extract_actions, LOGISTICS_ACTION_RULES};
use crate::context::{conversation_messages, user_context_block};
use crate::Responder;

const SYSTEM_PROMPT: &str = "\
You are the logistics component of Valet, a personal assistant.

Your responsibilities:
- Manage email: summarize, prioritize, draft responses in the user's style
- Handle the calendar: create, modify, and reschedule appointments
- Coordinate tasks: track deadlines and follow up on action items

Communication style:
- Friendly, direct, and efficient
- Proactive and anticipatory
- Natural language, never robotic

When handling requests, analyze what logistical actions are needed, give a
clear summary and recommendation, and stay one step ahead.";

const FALLBACK_REPLY: &str =
    "I encountered an issue processing your request. Let me get that sorted.";

/// Handles inbox and calendar requests.
pub struct LogisticsResponder {
    client: Arc<FallbackClient>,
    mail: Arc<dyn MailFeed>,
    calendar: Arc<dyn CalendarFeed>,
}

impl LogisticsResponder {
    pub fn new(
        client: Arc<FallbackClient>,
        mail: Arc<dyn MailFeed>,
        calendar: Arc<dyn CalendarFeed>,
    ) -> Self {
        Self {
            client,
            mail,
            calendar,
        }
    }

    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse, ValetError> {
        let recent_emails = self.mail.recent_emails(10).await;
        let upcoming_events = self.calendar.upcoming_events(5).await;
        debug!(
            emails = recent_emails.len(),
            events = upcoming_events.len(),
            "gathered logistics context"
        );

        let mut messages = conversation_messages(&request.context.history);
        messages.push(ChatMessage::new(
            Role::User,
            format!(
                "Context:\n{}\n\nRecent Emails:\n{}\n\nUpcoming Calendar:\n{}\n\n\
                 User Request: {}\n\n\
                 Analyze this request and provide a friendly, direct response, \
                 any actions you recommend (email, calendar, reminders), and \
                 your reasoning for the recommendations.",
                user_context_block(request),
                format_email_summary(&recent_emails),
                format_calendar_summary(&upcoming_events),
                request.input
            ),
        ));

        let reply = self
            .client
            .complete(&messages, Some(SYSTEM_PROMPT), 2000, 0.7)
            .await?;
        let actions = extract_actions(LOGISTICS_ACTION_RULES, &reply);

        Ok(AgentResponse {
            id: uuid::Uuid::new_v4().to_string(),
            tag: AgentTag::Logistics,
            content: reply,
            actions,
            should_vocalize: true,
            confidence: 0.9,
            reasoning: Some("Logistics analysis of inbox and calendar".to_string()),
        })
    }
}

#[async_trait]
impl Responder for LogisticsResponder {
    fn variant(&self) -> ResponderVariant {
        ResponderVariant::Logistics
    }

    async fn process(&self, request: &AgentRequest) -> AgentResponse {
        match self.run(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "logistics responder failed");
                AgentResponse {
                    id: uuid::Uuid::new_v4().to_string(),
                    tag: AgentTag::Logistics,
                    content: FALLBACK_REPLY.to_string(),
                    actions: Vec::new(),
                    should_vocalize: true,
                    confidence: 0.3,
                    reasoning: None,
                }
            }
        }
    }
}

fn format_email_summary(emails: &[EmailSummary]) -> String {
    if emails.is_empty() {
        return "No recent emails".to_string();
    }

    emails
        .iter()
        .take(5)
        .map(|email| {
            let marker = if email.importance >= 8 {
                "[high]"
            } else if email.importance >= 5 {
                "[med]"
            } else {
                "[low]"
            };
            let action = if email.action_required {
                " [ACTION REQUIRED]"
            } else {
                ""
            };
            let preview: String = email.snippet.chars().take(80).collect();
            format!(
                "{marker} From: {}\n   Subject: {}{action}\n   Preview: {preview}",
                email.from, email.subject
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_calendar_summary(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No upcoming events".to_string();
    }

    events
        .iter()
        .take(5)
        .map(|event| {
            format!(
                "{}: {}\n   Location: {}",
                event.start.format("%b %d, %H:%M"),
                event.title,
                event.location.as_deref().unwrap_or("Not specified")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
