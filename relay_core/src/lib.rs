pub mod brain;
pub mod message;
pub mod robot;
pub mod user;

pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::brain::{Brain, MemoryBrain};
    pub use crate::message::InboundMessage;
    pub use crate::robot::Robot;
    pub use crate::user::{Envelope, User};
}
