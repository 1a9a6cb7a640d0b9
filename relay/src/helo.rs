use relay_core::prelude::{Envelope, InboundMessage, Robot, User};
use tokio::sync::mpsc;

/// A reply the script wants sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub envelope: Envelope,
    pub text: String,
}

/// Greets anyone who says `helo` to the bot.
pub struct Helo {
    nick: String,
    replies: mpsc::UnboundedSender<Reply>,
}

impl Helo {
    pub fn new(nick: &str) -> (Self, mpsc::UnboundedReceiver<Reply>) {
        let (replies, rx) = mpsc::unbounded_channel();
        let this = Self {
            nick: nick.to_string(),
            replies,
        };
        (this, rx)
    }

    pub fn respond(&self, user: &User, body: &str) -> Option<Reply> {
        let rest = self.addressed(body)?;
        if !rest.get(..4)?.eq_ignore_ascii_case("helo") {
            return None;
        }

        Some(Reply {
            envelope: Envelope {
                room: user.room.clone(),
                user: Some(user.clone()),
            },
            text: format!("Helo {}. I'm {}", user.name, self.nick),
        })
    }

    // `nick`, `@nick`, `nick:` and `nick,` all address the bot
    fn addressed<'a>(&self, body: &'a str) -> Option<&'a str> {
        let body = body.trim_start();
        let body = body.strip_prefix('@').unwrap_or(body);
        let head = body.get(..self.nick.len())?;
        if !head.eq_ignore_ascii_case(&self.nick) {
            return None;
        }
        let rest = &body[self.nick.len()..];
        let rest = rest.strip_prefix([':', ',']).unwrap_or(rest);
        Some(rest.trim_start())
    }
}

#[async_trait::async_trait]
impl Robot for Helo {
    async fn receive(&self, msg: InboundMessage) -> anyhow::Result<()> {
        match msg {
            InboundMessage::Text { user, body } => {
                log::debug!("[{}] {}: {body}", user.room.as_deref().unwrap_or("private"), user.name);
                if let Some(reply) = self.respond(&user, &body) {
                    self.replies.send(reply)?;
                }
            }
            InboundMessage::Enter { user } => {
                log::info!("{} entered {}", user.name, user.room.as_deref().unwrap_or("?"));
            }
            InboundMessage::Leave { user, reason } => {
                log::info!(
                    "{} left {}: {}",
                    user.name,
                    user.room.as_deref().unwrap_or("?"),
                    reason.as_deref().unwrap_or_default()
                );
            }
        }
        Ok(())
    }
}
