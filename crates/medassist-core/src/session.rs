//! Per-user session state.
//!
//! A `Session` is owned by the caller and passed into every assistant call.
//! The assistant itself holds no per-user state.

use medassist_contracts::{
    profile::UserProfile,
    session::{BackendKind, ChatTurn, SessionId},
};

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    pub profile: UserProfile,
    transcript: Vec<ChatTurn>,
    backend: Option<BackendKind>,
    turns: u64,
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            id: SessionId::new(),
            profile,
            transcript: Vec::new(),
            backend: None,
            turns: 0,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The full transcript, oldest turn first.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// The backend explicitly selected for this session, if any.
    pub fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    pub fn select_backend(&mut self, backend: BackendKind) {
        self.backend = Some(backend);
    }

    /// Number of user messages handled so far.
    pub fn turn_count(&self) -> u64 {
        self.turns
    }

    /// Claim the index for a new user message.
    pub(crate) fn begin_turn(&mut self) -> u64 {
        let turn = self.turns;
        self.turns += 1;
        turn
    }

    pub(crate) fn push(&mut self, turn: ChatTurn) {
        self.transcript.push(turn);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(UserProfile::default())
    }
}
