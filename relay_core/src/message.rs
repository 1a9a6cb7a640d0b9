use crate::user::User;

/// Something that happened on the chat network, in the bot's terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundMessage {
    Text { user: User, body: String },
    Enter { user: User },
    Leave { user: User, reason: Option<String> },
}

impl InboundMessage {
    pub fn text(user: User, body: impl Into<String>) -> Self {
        Self::Text {
            user,
            body: body.into(),
        }
    }

    pub const fn enter(user: User) -> Self {
        Self::Enter { user }
    }

    pub const fn leave(user: User, reason: Option<String>) -> Self {
        Self::Leave { user, reason }
    }

    pub const fn user(&self) -> &User {
        match self {
            Self::Text { user, .. } | Self::Enter { user } | Self::Leave { user, .. } => user,
        }
    }

    /// The message text: the body of a `Text`, or the reason of a `Leave`.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Text { body, .. } => Some(body),
            Self::Leave { reason, .. } => reason.as_deref(),
            Self::Enter { .. } => None,
        }
    }
}
