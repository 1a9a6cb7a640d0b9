//! Connection options handed to the wire client.

use relay_config::Secret;

use crate::config::Config;

const DEFAULT_FLOOD_DELAY_MS: u64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectOptions {
    pub server: String,
    pub nick: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub realname: Option<String>,
    pub password: Option<Secret<String>>,
    pub secure: bool,
    pub sasl: bool,
    pub self_signed: bool,
    pub cert_expired: bool,
    pub debug: bool,
    pub strip_colors: bool,
    pub auto_rejoin: bool,
    /// `None` retries forever.
    pub retry_count: Option<u32>,
    pub flood_protection: bool,
    /// Milliseconds between outbound lines.
    pub flood_protection_delay: u64,
    /// Channels the wire client joins by itself. Always empty: the adapter joins explicitly.
    pub channels: Vec<String>,
}

impl ConnectOptions {
    pub fn from_config(config: &Config) -> Self {
        let unflood = config.unflood.as_deref();
        Self {
            server: config.server.clone(),
            nick: config.nick.clone(),
            port: config.port,
            username: config.username.clone(),
            realname: config.realname.clone(),
            password: config.password.clone(),
            secure: config.use_ssl,
            sasl: config.use_sasl,
            self_signed: config.fake_ssl,
            cert_expired: config.cert_expired,
            debug: config.debug,
            strip_colors: true,
            auto_rejoin: true,
            retry_count: None,
            flood_protection: unflood_protection(unflood),
            flood_protection_delay: unflood_protection_delay(unflood),
            channels: Vec::new(),
        }
    }
}

/// Flood protection is on for `"true"` or anything that starts with a number.
pub fn unflood_protection(value: Option<&str>) -> bool {
    value.map_or(false, |value| value == "true" || parse_leading_int(value).is_some())
}

/// The flood protection delay in milliseconds, or `0` when it is off.
pub fn unflood_protection_delay(value: Option<&str>) -> u64 {
    if !unflood_protection(value) {
        return 0;
    }

    match value.and_then(parse_leading_int) {
        None | Some(0) => DEFAULT_FLOOD_DELAY_MS,
        Some(n) => u64::try_from(n).unwrap_or_default(),
    }
}

/// Reads a decimal integer prefix: leading whitespace, an optional sign, then digits.
/// Whatever follows the digits is ignored, so `"500ms"` is `500`. Digits past `u64::MAX` saturate.
fn parse_leading_int(input: &str) -> Option<i128> {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // only digits remain, so overflow is the one way this parse can fail
    let n = i128::from(rest[..end].parse::<u64>().unwrap_or(u64::MAX));
    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protection() {
        assert!(unflood_protection(Some("true")));
        assert!(unflood_protection(Some("500")));
        assert!(unflood_protection(Some("0")));
        assert!(unflood_protection(Some(" 250ms")));
        assert!(!unflood_protection(Some("false")));
        assert!(!unflood_protection(Some("yes")));
        assert!(!unflood_protection(Some("")));
        assert!(!unflood_protection(None));
    }

    #[test]
    fn delay() {
        assert_eq!(unflood_protection_delay(Some("500")), 500);
        assert_eq!(unflood_protection_delay(Some("250ms")), 250);
        assert_eq!(unflood_protection_delay(Some("true")), 1000);
        assert_eq!(unflood_protection_delay(Some("0")), 1000);
        assert_eq!(unflood_protection_delay(Some("-5")), 0);
        assert_eq!(unflood_protection_delay(Some("false")), 0);
        assert_eq!(unflood_protection_delay(None), 0);
    }

    #[test]
    fn leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("+42abc"), Some(42));
        assert_eq!(parse_leading_int("-1"), Some(-1));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("abc"), None);
    }

    #[test]
    fn huge_values_saturate() {
        let huge = Some("99999999999999999999");
        assert!(unflood_protection(huge));
        assert_eq!(unflood_protection_delay(huge), u64::MAX);
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(-i128::from(u64::MAX)));
        assert_eq!(unflood_protection_delay(Some("-99999999999999999999")), 0);
    }

    #[test]
    fn options_from_config() {
        let config = Config {
            nick: "test".into(),
            rooms: vec!["#test".into()],
            server: "test.irc.net".into(),
            port: Some(6697),
            use_ssl: true,
            unflood: Some("750".into()),
            ..Config::default()
        };

        let opts = ConnectOptions::from_config(&config);
        assert_eq!(opts.server, "test.irc.net");
        assert_eq!(opts.port, Some(6697));
        assert!(opts.secure);
        assert!(opts.flood_protection);
        assert_eq!(opts.flood_protection_delay, 750);
        assert!(opts.auto_rejoin);
        assert_eq!(opts.retry_count, None);
        assert!(opts.channels.is_empty());
    }
}
