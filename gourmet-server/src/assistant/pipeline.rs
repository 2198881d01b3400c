//! Per-turn assistant state machine
//!
//! ```text
//! LocalExtract ──commands──▶ Apply ──▶ reply = confirmation
//!      │
//!      └─none──▶ Delegate ──ok──▶ DirectiveParse ──gate──▶ Apply ──▶ reply = cleaned text
//!                   │
//!                   └─err──▶ reply = apology (cart untouched)
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use shared::chat::ConversationMessage;
use shared::models::CartSnapshot;
use shared::preferences::Preferences;

use super::completion::{AssistantContext, CompletionProvider, CompletionRequest};
use crate::advisor::allergen_summary;
use crate::applicator::{AppliedChange, ApplyReport, SkippedItem, apply};
use crate::catalog::Catalog;
use crate::directive::{Directive, parse_directives, strip_directives, to_commands};
use crate::intent::extract;
use crate::preferences::extract_preferences;
use crate::session::Session;
use crate::utils::money::{format_money, to_decimal};

pub const APOLOGY: &str = "I encountered an error processing your request. Please try again.";

const ACKNOWLEDGEMENT: &str = "Got it! Is there anything else I can help you with?";

/// Whole-word modification verbs that authorize directive mutations
static MODIFICATION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:add|remove|delete|replace|change|update)\b").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Local phrase extraction handled the turn
    Local,
    /// Reply came from the completion provider
    Assistant,
    /// Provider failed; fixed apology shown
    Fallback,
}

/// Result of one chat turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub source: ReplySource,
    pub applied: Vec<AppliedChange>,
    pub skipped: Vec<SkippedItem>,
    /// Directives the model emitted without a modification request
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocked_directives: Vec<Directive>,
    #[serde(skip_serializing_if = "Preferences::is_empty")]
    pub preferences: Preferences,
    pub cart: CartSnapshot,
}

pub struct AssistantPipeline {
    catalog: Arc<Catalog>,
    provider: Arc<dyn CompletionProvider>,
    max_transcript_messages: usize,
}

impl AssistantPipeline {
    pub fn new(
        catalog: Arc<Catalog>,
        provider: Arc<dyn CompletionProvider>,
        max_transcript_messages: usize,
    ) -> Self {
        Self {
            catalog,
            provider,
            max_transcript_messages: max_transcript_messages.max(1),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Run one turn against a locked session.
    ///
    /// The user message and the displayed reply are both appended to the transcript.
    /// A stated party size is kept only if the turn does not fall back to the apology.
    pub async fn handle_turn(&self, session: &mut Session, utterance: &str) -> TurnOutcome {
        let utterance = utterance.trim();
        let preferences = extract_preferences(utterance);
        // (previous party size, index of the hidden note)
        let mut stated = None;
        if let Some(people) = preferences.people_count
            && session.party_size != Some(people)
        {
            stated = Some((session.party_size, session.transcript.len()));
            session.party_size = Some(people);
            session.transcript.push(ConversationMessage::system_note(format!(
                "The customer said the order is for {people} {}.",
                if people == 1 { "person" } else { "people" }
            )));
        }
        session.transcript.push(ConversationMessage::user(utterance));
        session.touch();

        let commands = extract(utterance);
        let outcome = if commands.is_empty() {
            let outcome = self.delegate(session, utterance, preferences).await;
            if outcome.source == ReplySource::Fallback
                && let Some((previous, note_index)) = stated
            {
                session.party_size = previous;
                session.transcript.remove(note_index);
            }
            outcome
        } else {
            let report = apply(&commands, &mut session.cart, &self.catalog);
            tracing::info!(
                target: "assistant",
                session_id = %session.id,
                applied = report.applied.len(),
                skipped = report.skipped.len(),
                "Handled turn locally"
            );
            self.outcome(
                session,
                report.reply_text(),
                ReplySource::Local,
                report,
                Vec::new(),
                preferences,
            )
        };

        session
            .transcript
            .push(ConversationMessage::assistant(outcome.reply.clone()));
        outcome
    }

    async fn delegate(
        &self,
        session: &mut Session,
        utterance: &str,
        preferences: Preferences,
    ) -> TurnOutcome {
        let request = self.request(session, preferences.clone());

        let text = match self.provider.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    target: "assistant",
                    session_id = %session.id,
                    provider = self.provider.name(),
                    error = %e,
                    "Completion failed"
                );
                return self.outcome(
                    session,
                    APOLOGY.to_string(),
                    ReplySource::Fallback,
                    ApplyReport::default(),
                    Vec::new(),
                    preferences,
                );
            }
        };

        let directives = parse_directives(&text);
        let display = strip_directives(&text);
        let mut report = ApplyReport::default();
        let mut blocked = Vec::new();

        if !directives.is_empty() {
            if MODIFICATION_VERB.is_match(utterance) {
                let commands = to_commands(&directives, &self.catalog);
                report = apply(&commands, &mut session.cart, &self.catalog);
            } else {
                tracing::info!(
                    target: "assistant",
                    session_id = %session.id,
                    count = directives.len(),
                    "Blocked directives without a modification request"
                );
                blocked = directives;
            }
        }

        let reply = compose_reply(&display, &report);
        self.outcome(
            session,
            reply,
            ReplySource::Assistant,
            report,
            blocked,
            preferences,
        )
    }

    fn request(&self, session: &Session, preferences: Preferences) -> CompletionRequest {
        let cart = session.cart.snapshot();
        let start = session
            .transcript
            .len()
            .saturating_sub(self.max_transcript_messages);

        CompletionRequest {
            messages: session.transcript[start..].to_vec(),
            context: AssistantContext {
                allergens: allergen_summary(&cart, &self.catalog),
                cart,
                catalog: self.catalog.clone(),
                preferences,
                party_size: session.party_size,
            },
        }
    }

    fn outcome(
        &self,
        session: &Session,
        reply: String,
        source: ReplySource,
        report: ApplyReport,
        blocked_directives: Vec<Directive>,
        preferences: Preferences,
    ) -> TurnOutcome {
        TurnOutcome {
            reply,
            source,
            applied: report.applied,
            skipped: report.skipped,
            blocked_directives,
            preferences,
            cart: session.cart.snapshot(),
        }
    }
}

/// Cleaned model text, then the confirmation, then a neutral acknowledgement.
/// Skipped items are always mentioned.
fn compose_reply(display: &str, report: &ApplyReport) -> String {
    let base = if !display.trim().is_empty() {
        Some(display.to_string())
    } else {
        report.confirmation()
    };

    match (base, report.skip_notice()) {
        (Some(text), Some(notice)) => format!("{text}\n\n{notice}"),
        (Some(text), None) => text,
        (None, Some(notice)) => notice,
        (None, None) => ACKNOWLEDGEMENT.to_string(),
    }
}

/// Opening message when the assistant panel is first shown
pub fn greeting(cart: &CartSnapshot) -> String {
    if cart.is_empty() {
        return "Hi there! Your order is empty right now. Would you like some recommendations \
                from our menu?"
            .to_string();
    }
    format!(
        "Hi there! I see you have {} items in your order totaling {}. To help you better, \
         could you tell me how many people this order is for?",
        cart.lines.len(),
        format_money(to_decimal(cart.subtotal))
    )
}
