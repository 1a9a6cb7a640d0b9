use std::sync::{Arc, Mutex};

use relay_core::prelude::{Brain, InboundMessage, Robot};
use tokio::sync::mpsc;

use crate::{config::Config, wire::WireClient};

pub fn config() -> Config {
    Config {
        nick: "test".into(),
        rooms: vec!["#test".into()],
        server: "test.irc.net".into(),
        port: Some(6667),
        ..Config::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Say(String, String),
    Notice(String, String),
    Action(String, String),
    Send(String, Vec<String>),
    Join(String),
    Part(String),
}

impl Call {
    pub fn say(target: &str, text: &str) -> Self {
        Self::Say(target.into(), text.into())
    }

    pub fn notice(target: &str, text: &str) -> Self {
        Self::Notice(target.into(), text.into())
    }

    pub fn send(command: &str, args: &[&str]) -> Self {
        Self::Send(command.into(), args.iter().map(|s| s.to_string()).collect())
    }
}

/// Records every wire action.
#[derive(Default)]
pub struct MockWire {
    calls: Mutex<Vec<Call>>,
}

impl MockWire {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call)
    }
}

#[async_trait::async_trait]
impl WireClient for MockWire {
    async fn say(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.push(Call::say(target, text));
        Ok(())
    }

    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.push(Call::notice(target, text));
        Ok(())
    }

    async fn action(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.push(Call::Action(target.into(), text.into()));
        Ok(())
    }

    async fn send(&self, command: &str, args: &[&str]) -> anyhow::Result<()> {
        self.push(Call::send(command, args));
        Ok(())
    }

    async fn join(&self, channel: &str) -> anyhow::Result<()> {
        self.push(Call::Join(channel.into()));
        Ok(())
    }

    async fn part(&self, channel: &str) -> anyhow::Result<()> {
        self.push(Call::Part(channel.into()));
        Ok(())
    }
}

/// Forwards everything it receives to a channel.
pub struct Inbox {
    tx: mpsc::UnboundedSender<InboundMessage>,
    brain: Option<Arc<dyn Brain>>,
}

impl Inbox {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, brain: None }, rx)
    }

    pub fn with_brain(mut self, brain: Arc<dyn Brain>) -> Self {
        self.brain = Some(brain);
        self
    }
}

#[async_trait::async_trait]
impl Robot for Inbox {
    async fn receive(&self, msg: InboundMessage) -> anyhow::Result<()> {
        self.tx.send(msg)?;
        Ok(())
    }

    fn brain(&self) -> Option<Arc<dyn Brain>> {
        self.brain.clone()
    }
}
