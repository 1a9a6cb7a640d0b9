use std::sync::Arc;

use relay_core::prelude::{Brain, MemoryBrain, User};

/// Whether `name` is a channel rather than a nick.
pub fn looks_like_channel(name: &str) -> bool {
    name.starts_with(['#', '&', '!'])
}

/// Maps nicks onto user records, keeping track of which channel each was last seen in.
#[derive(Clone)]
pub struct Identities {
    brain: Arc<dyn Brain>,
}

impl Identities {
    /// Uses the framework's store when it has one, otherwise keeps users in memory.
    pub fn new(brain: Option<Arc<dyn Brain>>) -> Self {
        let brain = brain.unwrap_or_else(|| {
            log::debug!("no brain provided, keeping users in memory");
            Arc::new(MemoryBrain::default())
        });
        Self { brain }
    }

    /// Looks up (or creates) the user for `nick`. The room is only set when `channel` is a channel.
    pub fn resolve(&self, channel: &str, nick: &str) -> User {
        let room = looks_like_channel(channel).then(|| channel.to_string());
        self.update(nick, room)
    }

    /// Like [`Self::resolve`], but always associates the user with `channel`.
    pub fn resolve_in(&self, channel: &str, nick: &str) -> User {
        self.update(nick, Some(channel.to_string()))
    }

    pub fn by_name(&self, name: &str) -> User {
        self.brain
            .user_for_name(name)
            .unwrap_or_else(|| self.brain.user_for_id(name))
    }

    fn update(&self, nick: &str, room: Option<String>) -> User {
        let mut user = self.brain.user_for_id(nick);
        user.name = nick.to_string();
        user.room = room;
        self.brain.save_user(user.clone());
        user
    }
}

impl std::fmt::Debug for Identities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identities").finish_non_exhaustive()
    }
}
