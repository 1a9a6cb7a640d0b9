use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use futures::future::{join_all, try_join_all};
use relay_core::prelude::{Envelope, InboundMessage, Robot, User};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    config::Config,
    envelope::{strip_rooms, target_of, Target},
    format::{addressed, flatten_lines, topic_line, Mode},
    identity::Identities,
    translate::{Action, Translation, Translator},
    wire::{WireClient, WireEvent},
};

/// The outcome of an outbound operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// This many wire actions were issued.
    Sent(usize),
    /// The envelope had nowhere to go. Nothing was sent.
    Undeliverable,
}

/// Bridges a [`Robot`] to an IRC connection.
pub struct IrcAdapter<W, R> {
    inner: Arc<Inner<W, R>>,
}

impl<W, R> Clone for IrcAdapter<W, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<W, R> {
    config: Arc<Config>,
    wire: W,
    robot: R,
    identities: Identities,
    events: Mutex<Option<mpsc::Receiver<WireEvent>>>,
    task: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl<W, R> IrcAdapter<W, R>
where
    W: WireClient,
    R: Robot,
{
    pub fn new(config: Config, wire: W, robot: R, events: mpsc::Receiver<WireEvent>) -> Self {
        let identities = Identities::new(robot.brain());
        Self {
            inner: Arc::new(Inner {
                config: Arc::new(config),
                wire,
                robot,
                identities,
                events: Mutex::new(Some(events)),
                task: Mutex::new(None),
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn robot(&self) -> &R {
        &self.inner.robot
    }

    /// Checks the configuration and starts translating wire events.
    ///
    /// Must be called from within a tokio runtime. Calling it again once started does nothing,
    /// calling it after [`Self::close`] is an error.
    pub fn run(&self) -> anyhow::Result<()> {
        if self.inner.closed.load(Ordering::Acquire) {
            anyhow::bail!("adapter was closed")
        }
        self.inner.config.check()?;

        let mut events = match lock(&self.inner.events).take() {
            Some(events) => events,
            None => {
                log::debug!("adapter is already running");
                return Ok(());
            }
        };

        let mut translator = Translator::new(
            Arc::clone(&self.inner.config),
            self.inner.identities.clone(),
        );

        let this = self.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let translation = translator.translate(event);
                if !translation.is_empty() {
                    tokio::spawn(this.clone().dispatch(translation));
                }
            }
            log::debug!("wire event stream ended");
        });
        *lock(&self.inner.task) = Some(task);

        log::info!("connected");
        Ok(())
    }

    /// Stops translating wire events. Safe to call more than once.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
        lock(&self.inner.events).take();
        if let Some(task) = lock(&self.inner.task).take() {
            log::debug!("closing adapter");
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.task)
            .as_ref()
            .map_or(false, |task| !task.is_finished())
    }

    pub async fn send<S>(&self, envelope: &Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        if Mode::of(&self.inner.config) == Mode::Notice {
            return self.notice(envelope, texts).await;
        }

        let target = match target_of(envelope) {
            Some(target) => target,
            None => {
                log::error!("not sure who to send to. envelope={envelope:?}");
                return Ok(Delivery::Undeliverable);
            }
        };

        try_join_all(texts.iter().map(|text| {
            let text = text.as_ref();
            log::debug!("{target} {text}");
            self.inner.wire.say(target.as_str(), text)
        }))
        .await?;

        Ok(Delivery::Sent(texts.len()))
    }

    /// Sends to the envelope's user directly, ignoring any room.
    pub async fn send_private<S>(&self, mut envelope: Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        strip_rooms(&mut envelope);
        self.send(&envelope, texts).await
    }

    /// Sends each text to the envelope's user, prefixed with their name.
    pub async fn reply<S>(&self, envelope: &Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        let user = match &envelope.user {
            Some(user) => user,
            None => {
                log::error!("not sure who to reply to. envelope={envelope:?}");
                return Ok(Delivery::Undeliverable);
            }
        };

        let lines = texts
            .iter()
            .map(|text| addressed(&user.name, text.as_ref()))
            .collect::<Vec<_>>();

        self.send(&Envelope::user(user.clone()), &lines).await
    }

    pub async fn notice<S>(&self, envelope: &Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        let target = match target_of(envelope) {
            Some(target) => target,
            None => {
                log::warn!("notice: no target found. envelope={envelope:?}");
                return Ok(Delivery::Undeliverable);
            }
        };

        let lines = flatten_lines(texts.iter().map(|s| Some(s.as_ref())));
        try_join_all(
            lines
                .iter()
                .map(|line| self.inner.wire.notice(target.as_str(), line)),
        )
        .await?;

        Ok(Delivery::Sent(lines.len()))
    }

    pub async fn emote<S>(&self, envelope: &Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        if Mode::of(&self.inner.config) == Mode::Notice {
            return self.notice(envelope, texts).await;
        }

        let target = match target_of(envelope) {
            Some(target) => target,
            None => {
                log::error!("not sure who to emote to. envelope={envelope:?}");
                return Ok(Delivery::Undeliverable);
            }
        };

        try_join_all(
            texts
                .iter()
                .map(|text| self.inner.wire.action(target.as_str(), text.as_ref())),
        )
        .await?;

        Ok(Delivery::Sent(texts.len()))
    }

    /// Sets the topic of the envelope's room to the texts, joined with `" / "`.
    pub async fn topic<S>(&self, envelope: &Envelope, texts: &[S]) -> anyhow::Result<Delivery>
    where
        S: AsRef<str> + Sync,
    {
        let channel = match target_of(envelope) {
            Some(Target::Room(channel)) => channel,
            _ => {
                log::error!("not sure which room to set the topic of. envelope={envelope:?}");
                return Ok(Delivery::Undeliverable);
            }
        };

        let topic = topic_line(texts);
        self.inner.wire.send("TOPIC", &[channel, topic.as_str()]).await?;
        Ok(Delivery::Sent(1))
    }

    /// Joins `channel`, then tells the robot that we entered it.
    pub async fn join(&self, channel: &str) -> anyhow::Result<()> {
        self.inner.wire.join(channel).await?;
        log::info!("joined {channel}");

        let user = self.own_user(channel);
        self.inner.robot.receive(InboundMessage::enter(user)).await
    }

    /// Leaves `channel`, then tells the robot that we left it.
    pub async fn part(&self, channel: &str) -> anyhow::Result<()> {
        self.inner.wire.part(channel).await?;
        log::info!("left {channel}");

        let user = self.own_user(channel);
        self.inner.robot.receive(InboundMessage::leave(user, None)).await
    }

    pub async fn kick(&self, channel: &str, nick: &str, reason: &str) -> anyhow::Result<()> {
        self.inner.wire.send("KICK", &[channel, nick, reason]).await
    }

    /// Sends an arbitrary command.
    pub async fn command<S>(&self, command: &str, args: &[S]) -> anyhow::Result<()>
    where
        S: AsRef<str> + Sync,
    {
        let args = args.iter().map(AsRef::as_ref).collect::<Vec<_>>();
        self.inner.wire.send(command, &args).await
    }

    fn own_user(&self, channel: &str) -> User {
        let mut user = self.inner.identities.by_name(&self.inner.config.nick);
        user.room = Some(channel.to_string());
        user
    }

    async fn dispatch(self, Translation { actions, messages }: Translation) {
        for action in actions {
            if let Err(err) = self.perform(&action).await {
                log::error!("could not perform {action:?}: {err:#}");
            }
        }

        let received = messages
            .into_iter()
            .map(|msg| self.inner.robot.receive(msg));
        for res in join_all(received).await {
            if let Err(err) = res {
                log::error!("robot could not receive message: {err:#}");
            }
        }
    }

    async fn perform(&self, action: &Action) -> anyhow::Result<()> {
        match action {
            Action::Say { target, text } => self.inner.wire.say(target, text).await,
            Action::Join(channel) => self.join(channel).await,
            Action::Raw { command, args } => self.command(command, args).await,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
