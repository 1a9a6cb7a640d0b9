use relay_config::{list, load_from_env, LoadFromEnv, Secret};

use crate::error::ConfigError;

/// Adapter settings, read once at startup.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub nick: String,
    pub rooms: Vec<String>,
    pub server: String,
    pub port: Option<u16>,
    pub ignore_users: Vec<String>,

    pub nickpass: Option<Secret<String>>,
    pub nickusername: Option<String>,
    pub connect_command: Option<String>,

    pub is_private: bool,
    pub should_ignore_invite: bool,
    pub is_send_notice_mode_on: bool,
    pub unflood: Option<String>,

    pub realname: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub use_ssl: bool,
    pub use_sasl: bool,
    pub fake_ssl: bool,
    pub cert_expired: bool,
    pub debug: bool,
}

impl Config {
    /// Ensures the settings needed to connect are present. The first missing one is reported.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.nick.is_empty() {
            return Err(ConfigError::MissingNick);
        }
        if self.rooms.is_empty() {
            return Err(ConfigError::MissingRooms);
        }
        if self.server.is_empty() {
            return Err(ConfigError::MissingServer);
        }
        Ok(())
    }

    pub fn is_ignored(&self, nick: &str) -> bool {
        self.ignore_users.iter().any(|user| user == nick)
    }

    pub fn is_own_nick(&self, nick: &str) -> bool {
        self.nick.eq_ignore_ascii_case(nick)
    }
}

impl LoadFromEnv for Config {
    fn load_from_env() -> anyhow::Result<Self> {
        load_from_env(&[
            ("RELAY_IRC_NICK", |t, v| {
                t.nick = v;
                Ok(())
            }),
            ("RELAY_IRC_ROOMS", |t, v| {
                t.rooms = list(&v);
                Ok(())
            }),
            ("RELAY_IRC_SERVER", |t, v| {
                t.server = v;
                Ok(())
            }),
            ("RELAY_IRC_PORT", |t, v| {
                t.port = Some(v.trim().parse()?);
                Ok(())
            }),
            ("RELAY_IRC_IGNORE_USERS", |t, v| {
                t.ignore_users = list(&v);
                Ok(())
            }),
            ("RELAY_IRC_NICKSERV_PASSWORD", |t, v| {
                t.nickpass = Some(Secret(v));
                Ok(())
            }),
            ("RELAY_IRC_NICKSERV_USERNAME", |t, v| {
                t.nickusername = Some(v);
                Ok(())
            }),
            ("RELAY_IRC_CONNECT_COMMAND", |t, v| {
                t.connect_command = Some(v);
                Ok(())
            }),
            ("RELAY_IRC_PRIVATE", |t, _| {
                t.is_private = true;
                Ok(())
            }),
            ("RELAY_IRC_IGNOREINVITE", |t, _| {
                t.should_ignore_invite = true;
                Ok(())
            }),
            ("RELAY_IRC_SEND_NOTICE_MODE", |t, _| {
                t.is_send_notice_mode_on = true;
                Ok(())
            }),
            ("RELAY_IRC_UNFLOOD", |t, v| {
                t.unflood = Some(v);
                Ok(())
            }),
            ("RELAY_IRC_REALNAME", |t, v| {
                t.realname = Some(v);
                Ok(())
            }),
            ("RELAY_IRC_USERNAME", |t, v| {
                t.username = Some(v);
                Ok(())
            }),
            ("RELAY_IRC_PASSWORD", |t, v| {
                t.password = Some(Secret(v));
                Ok(())
            }),
            ("RELAY_IRC_USESSL", |t, _| {
                t.use_ssl = true;
                Ok(())
            }),
            ("RELAY_IRC_USESASL", |t, _| {
                t.use_sasl = true;
                Ok(())
            }),
            ("RELAY_IRC_SERVER_FAKE_SSL", |t, _| {
                t.fake_ssl = true;
                Ok(())
            }),
            ("RELAY_IRC_SERVER_CERT_EXPIRED", |t, _| {
                t.cert_expired = true;
                Ok(())
            }),
            ("RELAY_IRC_DEBUG", |t, _| {
                t.debug = true;
                Ok(())
            }),
        ])
    }
}
