//! Domain entities: `Room`, `Participant` and `ChatMessage`.

use std::collections::{HashMap, VecDeque};

use tokio::task::AbortHandle;

use super::{
    ConnectionId, MessageContent, RoomError, RoomId, RoomPassword, RoomSecret, Timestamp, Topic,
    Username,
};

/// Maximum number of concurrent participants per room
pub const DEFAULT_PARTICIPANT_CAPACITY: usize = 10;
/// Number of chat messages retained per room
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
/// Sender name used for coordinator-generated notices
pub const SYSTEM_SENDER: &str = "system";

/// One connected user's presence and self-reported media status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub is_muted: bool,
    pub is_video_on: bool,
    pub is_screen_sharing: bool,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, username: Username, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            username,
            is_muted: false,
            is_video_on: false,
            is_screen_sharing: false,
            joined_at,
        }
    }

    pub fn apply(&mut self, patch: &StatusPatch) {
        if let Some(is_muted) = patch.is_muted {
            self.is_muted = is_muted;
        }
        if let Some(is_video_on) = patch.is_video_on {
            self.is_video_on = is_video_on;
        }
        if let Some(is_screen_sharing) = patch.is_screen_sharing {
            self.is_screen_sharing = is_screen_sharing;
        }
    }
}

/// Partial media status update; absent fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPatch {
    pub is_muted: Option<bool>,
    pub is_video_on: Option<bool>,
    pub is_screen_sharing: Option<bool>,
}

impl StatusPatch {
    pub fn is_empty(&self) -> bool {
        self.is_muted.is_none() && self.is_video_on.is_none() && self.is_screen_sharing.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    System,
}

/// Who a message is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAuthor {
    Participant {
        connection_id: ConnectionId,
        username: Username,
    },
    System,
}

/// Chat history entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: String,
    pub sender_id: Option<ConnectionId>,
    pub content: MessageContent,
    pub kind: MessageKind,
    pub timestamp: Timestamp,
}

/// Room aggregate: participants, bounded chat history and eviction state.
///
/// A room lives behind its own lock (see [`SharedRoom`](super::SharedRoom));
/// every method here assumes the caller holds it.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    secret: RoomSecret,
    participants: HashMap<ConnectionId, Participant>,
    messages: VecDeque<ChatMessage>,
    topic: Topic,
    pub created_at: Timestamp,
    pub last_activity_at: Timestamp,
    pending_eviction: Option<AbortHandle>,
    next_message_id: u64,
    participant_capacity: usize,
    history_limit: usize,
    evicted: bool,
}

impl Room {
    pub fn new(id: RoomId, password: &RoomPassword, created_at: Timestamp) -> Self {
        Self::with_capacity(
            id,
            password,
            created_at,
            DEFAULT_PARTICIPANT_CAPACITY,
            DEFAULT_HISTORY_LIMIT,
        )
    }

    pub fn with_capacity(
        id: RoomId,
        password: &RoomPassword,
        created_at: Timestamp,
        participant_capacity: usize,
        history_limit: usize,
    ) -> Self {
        let secret = RoomSecret::derive(&id, password);
        let topic = Topic::new(id.as_str());
        Self {
            id,
            secret,
            participants: HashMap::new(),
            messages: VecDeque::with_capacity(history_limit),
            topic,
            created_at,
            last_activity_at: created_at,
            pending_eviction: None,
            next_message_id: 1,
            participant_capacity,
            history_limit,
            evicted: false,
        }
    }

    /// Check a join password against the secret fixed at creation.
    pub fn authenticate(&self, password: &RoomPassword) -> bool {
        self.secret.verify(&self.id, password)
    }

    /// Admit a participant and return the updated roster.
    pub fn admit(
        &mut self,
        participant: Participant,
        now: Timestamp,
    ) -> Result<Vec<Participant>, RoomError> {
        if self.participants.contains_key(&participant.connection_id) {
            return Err(RoomError::ParticipantAlreadyJoined(
                participant.connection_id.into_string(),
            ));
        }
        if self.participants.len() >= self.participant_capacity {
            return Err(RoomError::RoomFull {
                capacity: self.participant_capacity,
            });
        }

        self.topic.subscribe(participant.connection_id.clone());
        self.participants
            .insert(participant.connection_id.clone(), participant);
        self.touch(now);
        Ok(self.roster())
    }

    /// Remove a participant. Calling it again for the same connection is a no-op.
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        self.topic.unsubscribe(connection_id);
        self.participants.remove(connection_id)
    }

    /// Apply a status patch; `None` if the connection is not a participant.
    pub fn update_status(
        &mut self,
        connection_id: &ConnectionId,
        patch: &StatusPatch,
        now: Timestamp,
    ) -> Option<Participant> {
        let participant = self.participants.get_mut(connection_id)?;
        participant.apply(patch);
        let updated = participant.clone();
        self.touch(now);
        Some(updated)
    }

    /// Append to the history, dropping the oldest entries beyond the limit.
    pub fn append_message(
        &mut self,
        author: MessageAuthor,
        content: MessageContent,
        now: Timestamp,
    ) -> ChatMessage {
        let (sender, sender_id, kind) = match author {
            MessageAuthor::Participant {
                connection_id,
                username,
            } => (username.into_string(), Some(connection_id), MessageKind::Text),
            MessageAuthor::System => (SYSTEM_SENDER.to_string(), None, MessageKind::System),
        };

        let message = ChatMessage {
            id: self.next_message_id,
            sender,
            sender_id,
            content,
            kind,
            timestamp: now,
        };
        self.next_message_id += 1;

        self.messages.push_back(message.clone());
        while self.messages.len() > self.history_limit {
            self.messages.pop_front();
        }
        self.touch(now);
        message
    }

    /// Participants ordered by join time.
    pub fn roster(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self.participants.values().cloned().collect();
        participants.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.connection_id.cmp(&b.connection_id))
        });
        participants
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn participant(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants.get(connection_id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_activity_at {
            self.last_activity_at = now;
        }
    }

    /// Store the handle of a newly armed eviction task, aborting any earlier one.
    pub fn arm_eviction(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.pending_eviction.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the armed eviction task. Returns whether one was pending.
    pub fn cancel_eviction(&mut self) -> bool {
        match self.pending_eviction.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn has_pending_eviction(&self) -> bool {
        self.pending_eviction.is_some()
    }

    /// Called by the registry when the room is dropped from the map.
    pub fn mark_evicted(&mut self) {
        self.pending_eviction = None;
        self.evicted = true;
    }

    /// A joiner that raced an eviction sees this and retries on a fresh room.
    pub fn is_evicted(&self) -> bool {
        self.evicted
    }
}
