pub mod config;
pub mod format;
pub mod options;

mod adapter;
mod envelope;
mod error;
mod handshake;
mod identity;
mod translate;
mod wire;

#[cfg(test)]
mod testing;

pub use adapter::{Delivery, IrcAdapter};
pub use config::Config;
pub use envelope::{strip_rooms, target_of, Target};
pub use error::ConfigError;
pub use handshake::{Handshake, HandshakeState, Step, NICKSERV};
pub use identity::{looks_like_channel, Identities};
pub use options::ConnectOptions;
pub use translate::{Action, Translation, Translator};
pub use wire::{WireClient, WireEvent};
