/// A required setting was not provided at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingNick,
    MissingRooms,
    MissingServer,
}

impl ConfigError {
    pub const fn env_key(&self) -> &'static str {
        match self {
            Self::MissingNick => "RELAY_IRC_NICK",
            Self::MissingRooms => "RELAY_IRC_ROOMS",
            Self::MissingServer => "RELAY_IRC_SERVER",
        }
    }

    const fn example(&self) -> &'static str {
        match self {
            Self::MissingNick => "mybot",
            Self::MissingRooms => "#myroom",
            Self::MissingServer => "irc.myserver.com",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = self.env_key();
        write!(f, "{key} is not defined, try: export {key}='{}'", self.example())
    }
}

impl std::error::Error for ConfigError {}
