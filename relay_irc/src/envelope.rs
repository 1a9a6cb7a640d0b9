use relay_core::prelude::Envelope;

/// Where a message actually goes on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    Room(&'a str),
    Private(&'a str),
}

impl<'a> Target<'a> {
    pub const fn as_str(&self) -> &'a str {
        match *self {
            Self::Room(s) | Self::Private(s) => s,
        }
    }
}

impl std::fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the envelope's room, then its user's room, then its user's private reply target.
pub fn target_of(envelope: &Envelope) -> Option<Target<'_>> {
    if let Some(room) = &envelope.room {
        return Some(Target::Room(room));
    }
    let user = envelope.user.as_ref()?;
    user.room
        .as_deref()
        .map(Target::Room)
        .or_else(|| user.reply_to.as_deref().map(Target::Private))
}

/// Removes every room association so the envelope can only be delivered privately.
pub fn strip_rooms(envelope: &mut Envelope) {
    envelope.room = None;
    if let Some(user) = &mut envelope.user {
        user.room = None;
        if user.reply_to.is_none() {
            user.reply_to = Some(user.name.clone());
        }
    }
}
