mod helo;
pub use helo::{Helo, Reply};
