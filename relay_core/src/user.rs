/// A chat participant, as known to the bot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// The channel this user was last seen in, `None` in a private context.
    pub room: Option<String>,
    /// Where private replies go, for users that only exist in a private conversation.
    pub reply_to: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            room: None,
            reply_to: None,
        }
    }

    pub fn private(nick: impl Into<String>) -> Self {
        let nick = nick.into();
        Self {
            reply_to: Some(nick.clone()),
            ..Self::new(nick)
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }
}

/// Where an outbound message should go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    pub room: Option<String>,
    pub user: Option<User>,
}

impl Envelope {
    pub fn room(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
            user: None,
        }
    }

    pub fn user(user: User) -> Self {
        Self {
            room: None,
            user: Some(user),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_user_replies_to_itself() {
        let user = User::private("alice");
        assert_eq!(user.id, "alice");
        assert_eq!(user.name, "alice");
        assert_eq!(user.reply_to.as_deref(), Some("alice"));
        assert_eq!(user.room, None);
    }

    #[test]
    fn envelope_builders() {
        let env = Envelope::room("#test").with_user(User::new("bob").with_room("#other"));
        assert_eq!(env.room.as_deref(), Some("#test"));
        assert_eq!(env.user.unwrap().room.as_deref(), Some("#other"));
    }
}
