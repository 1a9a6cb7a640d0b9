mod secret;
pub use secret::Secret;

mod env;
pub use env::{list, load_from_env, Assign, LoadFromEnv};
