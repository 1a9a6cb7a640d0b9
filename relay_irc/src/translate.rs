use std::sync::Arc;

use relay_core::prelude::{InboundMessage, User};

use crate::{
    config::Config,
    handshake::{Handshake, Step, NICKSERV},
    identity::Identities,
    wire::WireEvent,
};

/// Something the adapter should do on the wire in response to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Say { target: String, text: String },
    Join(String),
    Raw { command: String, args: Vec<String> },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Translation {
    pub actions: Vec<Action>,
    pub messages: Vec<InboundMessage>,
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.messages.is_empty()
    }

    fn message(msg: InboundMessage) -> Self {
        Self {
            messages: vec![msg],
            ..Self::default()
        }
    }

    fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            ..Self::default()
        }
    }
}

/// Turns wire events into bot messages and follow-up wire actions.
///
/// Owns the per-connection state: the user cache and the NickServ handshake.
#[derive(Debug)]
pub struct Translator {
    config: Arc<Config>,
    identities: Identities,
    handshake: Option<Handshake>,
}

impl Translator {
    pub fn new(config: Arc<Config>, identities: Identities) -> Self {
        let handshake = Handshake::new(&config);
        Self {
            config,
            identities,
            handshake,
        }
    }

    pub const fn handshake(&self) -> Option<&Handshake> {
        self.handshake.as_ref()
    }

    pub fn translate(&mut self, event: WireEvent) -> Translation {
        match event {
            WireEvent::Registered => self.registered(),
            WireEvent::Names { channel, nicks } => {
                for nick in &nicks {
                    self.identities.resolve(&channel, nick);
                }
                Translation::default()
            }
            WireEvent::Notice { from, to, text } => self.notice(from, &to, text),
            WireEvent::Message { from, to, text } => self.message(from, &to, text),
            WireEvent::Action { from, to, text } => {
                log::debug!(" * from {from} to {to}: {text}");
                if self.ignoring(&from) {
                    return Translation::default();
                }
                let user = self.identities.resolve(&to, &from);
                Translation::message(InboundMessage::text(user, text))
            }
            WireEvent::Pm { nick, text } => self.private_message(nick, text),
            WireEvent::Join { channel, who } => {
                log::info!("{who} has joined {channel}");
                if self.ignoring(&who) {
                    return Translation::default();
                }
                let user = self.identities.resolve_in(&channel, &who);
                Translation::message(InboundMessage::enter(user))
            }
            WireEvent::Part {
                channel,
                who,
                reason,
            } => {
                log::info!("{who} has left {channel}: {}", reason.as_deref().unwrap_or_default());
                if self.ignoring(&who) {
                    return Translation::default();
                }
                let user = self.identities.resolve_in(&channel, &who);
                Translation::message(InboundMessage::leave(user, reason))
            }
            WireEvent::Quit {
                who,
                reason,
                channels,
            } => {
                log::info!(
                    "{who} has quit: {} ({})",
                    channels.join(", "),
                    reason.as_deref().unwrap_or_default()
                );
                if self.ignoring(&who) {
                    return Translation::default();
                }
                let messages = channels
                    .iter()
                    .map(|ch| {
                        let user = self.identities.resolve_in(ch, &who);
                        InboundMessage::leave(user, reason.clone())
                    })
                    .collect();
                Translation {
                    messages,
                    ..Translation::default()
                }
            }
            WireEvent::Kick {
                channel,
                who,
                by,
                reason,
            } => {
                log::info!(
                    "{who} was kicked from {channel} by {by}: {}",
                    reason.as_deref().unwrap_or_default()
                );
                Translation::default()
            }
            WireEvent::Invite { channel, from } => {
                log::info!("{from} invited you to join {channel}");
                if self.ignoring(&from) {
                    return Translation::default();
                }
                if self.config.is_private && self.config.should_ignore_invite {
                    return Translation::default();
                }
                Translation::action(Action::Join(channel))
            }
            WireEvent::Error { command, args } => {
                log::error!("ERROR: {command}: {}", args.join(" "));
                Translation::default()
            }
        }
    }

    fn registered(&mut self) -> Translation {
        let mut out = Translation::default();

        if let Some(command) = &self.config.connect_command {
            let mut parts = command.split_whitespace().map(ToString::to_string);
            if let Some(head) = parts.next() {
                out.actions.push(Action::Raw {
                    command: head,
                    args: parts.collect(),
                });
            }
        }

        match &mut self.handshake {
            Some(handshake) => handshake.on_registered(),
            None => out
                .actions
                .extend(self.config.rooms.iter().cloned().map(Action::Join)),
        }

        out
    }

    fn notice(&mut self, from: Option<String>, to: &str, text: String) -> Translation {
        let from = match from.filter(|s| !s.is_empty()) {
            Some(from) => from,
            None => return Translation::default(),
        };
        if self.ignoring(&from) {
            return Translation::default();
        }

        log::info!("NOTICE from {from} to {to}: {text}");

        let mut out = Translation::default();
        if let Some(handshake) = &mut self.handshake {
            match handshake.on_notice(&from, &text) {
                Step::Identify(line) => out.actions.push(Action::Say {
                    target: NICKSERV.to_string(),
                    text: line,
                }),
                Step::JoinRooms => out
                    .actions
                    .extend(self.config.rooms.iter().cloned().map(Action::Join)),
                Step::Ignore => {}
            }
        }

        let user = self.identities.resolve(to, &from);
        out.messages.push(InboundMessage::text(user, text));
        out
    }

    fn message(&mut self, from: Option<String>, to: &str, mut text: String) -> Translation {
        let from = match from.filter(|s| !s.is_empty()) {
            Some(from) => from,
            None => return Translation::default(),
        };

        // private messages arrive through `pm`
        if self.config.is_own_nick(to) {
            return Translation::default();
        }
        if self.ignoring(&from) {
            return Translation::default();
        }

        log::debug!("from {from} to {to}: {text}");

        let user = self.identities.resolve(to, &from);
        if user.room.is_none() && !text.starts_with(to) {
            text = format!("{to}: {text}");
        }
        Translation::message(InboundMessage::text(user, text))
    }

    fn private_message(&mut self, nick: String, text: String) -> Translation {
        log::info!("got private message from {nick}: {text}");
        if self.config.is_private {
            return Translation::default();
        }
        if self.ignoring(&nick) {
            return Translation::default();
        }

        let own = &self.config.nick;
        let addressed = text
            .get(..own.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(own));
        let text = if addressed { text } else { format!("{own} {text}") };

        Translation::message(InboundMessage::text(User::private(nick), text))
    }

    fn ignoring(&self, nick: &str) -> bool {
        let ignored = self.config.is_ignored(nick);
        if ignored {
            log::info!("ignoring user: {nick}");
        }
        ignored
    }
}
