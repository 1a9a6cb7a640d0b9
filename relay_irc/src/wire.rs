use std::sync::Arc;

/// The IRC connection, as far as the adapter needs it.
#[async_trait::async_trait]
pub trait WireClient
where
    Self: Send + Sync + 'static,
{
    /// Sends a PRIVMSG.
    async fn say(&self, target: &str, text: &str) -> anyhow::Result<()>;
    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()>;
    /// Sends a CTCP ACTION (an emote).
    async fn action(&self, target: &str, text: &str) -> anyhow::Result<()>;
    /// Sends a raw command.
    async fn send(&self, command: &str, args: &[&str]) -> anyhow::Result<()>;
    /// Resolves once the server has confirmed the join.
    async fn join(&self, channel: &str) -> anyhow::Result<()>;
    /// Resolves once the server has confirmed the part.
    async fn part(&self, channel: &str) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<W> WireClient for Arc<W>
where
    W: WireClient + ?Sized,
{
    async fn say(&self, target: &str, text: &str) -> anyhow::Result<()> {
        (**self).say(target, text).await
    }

    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()> {
        (**self).notice(target, text).await
    }

    async fn action(&self, target: &str, text: &str) -> anyhow::Result<()> {
        (**self).action(target, text).await
    }

    async fn send(&self, command: &str, args: &[&str]) -> anyhow::Result<()> {
        (**self).send(command, args).await
    }

    async fn join(&self, channel: &str) -> anyhow::Result<()> {
        (**self).join(channel).await
    }

    async fn part(&self, channel: &str) -> anyhow::Result<()> {
        (**self).part(channel).await
    }
}

/// A protocol event reported by the wire client.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum WireEvent {
    /// Connection registration finished.
    Registered,
    Names {
        channel: String,
        #[serde(default)]
        nicks: Vec<String>,
    },
    Notice {
        from: Option<String>,
        to: String,
        text: String,
    },
    Message {
        from: Option<String>,
        to: String,
        text: String,
    },
    Action {
        from: String,
        to: String,
        text: String,
    },
    /// A PRIVMSG addressed to us.
    Pm {
        nick: String,
        text: String,
    },
    Join {
        channel: String,
        who: String,
    },
    Part {
        channel: String,
        who: String,
        reason: Option<String>,
    },
    Quit {
        who: String,
        reason: Option<String>,
        #[serde(default)]
        channels: Vec<String>,
    },
    Kick {
        channel: String,
        who: String,
        by: String,
        reason: Option<String>,
    },
    Invite {
        channel: String,
        from: String,
    },
    Error {
        command: String,
        #[serde(default)]
        args: Vec<String>,
    },
}
