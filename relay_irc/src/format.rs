use crate::config::Config;

/// How normal outbound text is delivered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Say,
    Notice,
}

impl Mode {
    pub const fn of(config: &Config) -> Self {
        if config.is_send_notice_mode_on {
            Self::Notice
        } else {
            Self::Say
        }
    }
}

/// Splits `text` on `\n` or `\r\n`, keeping empty lines.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut lines = text.split('\n').peekable();
    std::iter::from_fn(move || {
        let line = lines.next()?;
        if lines.peek().is_some() {
            return Some(line.strip_suffix('\r').unwrap_or(line));
        }
        Some(line)
    })
}

/// Splits every text into lines and flattens them in order. Missing texts are dropped.
pub fn flatten_lines<'a>(texts: impl IntoIterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    texts.into_iter().flatten().flat_map(split_lines).collect()
}

pub fn topic_line<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn addressed(name: &str, text: &str) -> String {
    format!("{name}: {text}")
}
