use std::sync::Arc;

use crate::{brain::Brain, message::InboundMessage};

/// The bot framework, as seen by a chat adapter.
#[async_trait::async_trait]
pub trait Robot
where
    Self: Send + Sync + 'static,
{
    /// Hands a translated event over for routing and command matching.
    async fn receive(&self, msg: InboundMessage) -> anyhow::Result<()>;

    /// A persistent user store, if the framework has one.
    fn brain(&self) -> Option<Arc<dyn Brain>> {
        None
    }
}

#[async_trait::async_trait]
impl<R> Robot for Arc<R>
where
    R: Robot + ?Sized,
{
    async fn receive(&self, msg: InboundMessage) -> anyhow::Result<()> {
        (**self).receive(msg).await
    }

    fn brain(&self) -> Option<Arc<dyn Brain>> {
        (**self).brain()
    }
}
