use anyhow::Context;

/// Applies the value of an environment variable to the thing being loaded.
pub type Assign<T> = fn(&mut T, String) -> anyhow::Result<()>;

/// Builds a `T` from its default by applying every key that is present in the environment.
///
/// Absent keys are skipped, so any required-field checks belong to the caller.
pub fn load_from_env<T: Default + std::fmt::Debug>(keys: &[(&str, Assign<T>)]) -> anyhow::Result<T> {
    log::trace!("loading env vars for: {}", std::any::type_name::<T>());

    let this = keys.iter().try_fold(T::default(), |mut this, (key, func)| -> anyhow::Result<T> {
        log::trace!("looking up {key}");
        match std::env::var(key) {
            Ok(val) => {
                func(&mut this, val).with_context(|| anyhow::anyhow!("invalid value for '{key}'"))?
            }
            Err(std::env::VarError::NotPresent) => {}
            Err(err) => return Err(err).with_context(|| anyhow::anyhow!("key '{key}' is unreadable")),
        }
        Ok(this)
    });

    if let Ok(this) = &this {
        log::debug!("created: {:?}", this);
    }
    this
}

/// Splits a comma-separated list, dropping blank entries.
pub fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub trait LoadFromEnv
where
    Self: Sized,
{
    fn load_from_env() -> anyhow::Result<Self>;
}
