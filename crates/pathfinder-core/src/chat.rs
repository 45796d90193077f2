//! Chat state shared by the roadmap generator and the floating assistant
//!
//! Messages live only as long as the view that shows them. Answers arrive
//! after a simulated delay on a timer nobody cancels, so each reply carries
//! the generation of the conversation that asked for it and a conversation
//! that has since been reset simply ignores it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::responder::Responder;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    User,
    System,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: ChatAuthor,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(author: ChatAuthor, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text: text.into(),
            timestamp: Local::now(),
        }
    }
}

/// A reply on its way back to a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub generation: u64,
    pub text: &'static str,
}

/// A reply that has been decided but not yet delivered
#[derive(Debug)]
pub struct PendingReply {
    pub reply: ChatReply,
    pub delay: Duration,
}

impl PendingReply {
    /// Fire-and-forget timer. If the receiving side is gone by then the
    /// send fails and the reply is dropped.
    pub fn spawn(self, tx: mpsc::UnboundedSender<ChatReply>) {
        tokio::spawn(async move {
            tokio::time::sleep(self.delay).await;
            if tx.send(self.reply).is_err() {
                debug!("reply receiver gone, dropping reply");
            }
        });
    }
}

pub struct Conversation {
    greeting: &'static str,
    messages: Vec<ChatMessage>,
    responder: Arc<dyn Responder>,
    delay: Duration,
    generation: u64,
    pending: bool,
}

impl Conversation {
    pub fn new(responder: Arc<dyn Responder>, greeting: &'static str, delay: Duration) -> Self {
        Self {
            greeting,
            messages: vec![ChatMessage::new(ChatAuthor::System, greeting)],
            responder,
            delay,
            generation: next_generation(),
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Append the user's message and decide the answer. Blank input, or a
    /// submission while an answer is still pending, is refused.
    pub fn submit(&mut self, input: &str) -> Option<PendingReply> {
        if input.trim().is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage::new(ChatAuthor::User, input));
        self.pending = true;

        Some(PendingReply {
            reply: ChatReply {
                generation: self.generation,
                text: self.responder.respond(input),
            },
            delay: self.delay,
        })
    }

    /// Accept a reply addressed to this conversation. Replies meant for an
    /// earlier generation are ignored.
    pub fn deliver(&mut self, reply: &ChatReply) -> bool {
        if reply.generation != self.generation || !self.pending {
            return false;
        }
        self.messages
            .push(ChatMessage::new(ChatAuthor::System, reply.text));
        self.pending = false;
        true
    }

    /// Throw the conversation away (the view was left)
    pub fn reset(&mut self) {
        self.messages = vec![ChatMessage::new(ChatAuthor::System, self.greeting)];
        self.generation = next_generation();
        self.pending = false;
    }
}
