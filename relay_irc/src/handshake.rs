use relay_config::Secret;

use crate::config::Config;

pub const NICKSERV: &str = "NickServ";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HandshakeState {
    /// Not yet registered with the server.
    #[default]
    Idle,
    /// Registered, waiting for NickServ to ask us to identify.
    AwaitingIdentifyPrompt,
    /// The identify command was sent.
    Identifying,
    Identified,
}

/// What the adapter should do in response to a NickServ notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Ignore,
    /// Send this text to NickServ.
    Identify(String),
    JoinRooms,
}

/// NickServ identification, active only when a NickServ password is configured.
#[derive(Clone, Debug)]
pub struct Handshake {
    state: HandshakeState,
    command: Secret<String>,
}

impl Handshake {
    pub fn new(config: &Config) -> Option<Self> {
        let pass = config.nickpass.as_ref()?;
        let command = match &config.nickusername {
            Some(user) => format!("identify {user} {}", &**pass),
            None => format!("identify {}", &**pass),
        };
        Some(Self {
            state: HandshakeState::default(),
            command: Secret(command),
        })
    }

    pub const fn state(&self) -> HandshakeState {
        self.state
    }

    pub fn on_registered(&mut self) {
        if self.state == HandshakeState::Idle {
            self.state = HandshakeState::AwaitingIdentifyPrompt;
        }
    }

    pub fn on_notice(&mut self, from: &str, text: &str) -> Step {
        use HandshakeState::*;
        if from != NICKSERV {
            return Step::Ignore;
        }

        match self.state {
            // the prompt can race the registration event
            Idle | AwaitingIdentifyPrompt if text.to_lowercase().contains("identify") => {
                log::info!("identifying with {NICKSERV}");
                self.state = Identifying;
                Step::Identify(self.command.0.clone())
            }
            Identifying if text.contains("Password accepted") || text.contains("identified") => {
                log::info!("identified with {NICKSERV}");
                self.state = Identified;
                Step::JoinRooms
            }
            _ => Step::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(user: Option<&str>) -> Config {
        Config {
            nick: "test".into(),
            nickpass: Some(Secret::from("hunter2")),
            nickusername: user.map(Into::into),
            ..Config::default()
        }
    }

    #[test]
    fn inactive_without_password() {
        assert!(Handshake::new(&Config::default()).is_none());
    }

    #[test]
    fn identify_then_join() {
        let mut hs = Handshake::new(&config(None)).unwrap();
        hs.on_registered();
        assert_eq!(hs.state(), HandshakeState::AwaitingIdentifyPrompt);

        assert_eq!(
            hs.on_notice(NICKSERV, "This nickname is registered, please IDENTIFY"),
            Step::Identify("identify hunter2".into())
        );
        assert_eq!(hs.state(), HandshakeState::Identifying);

        // NickServ tends to repeat itself
        assert_eq!(
            hs.on_notice(NICKSERV, "use /msg NickServ identify <password>"),
            Step::Ignore
        );

        assert_eq!(
            hs.on_notice(NICKSERV, "You are now identified for test."),
            Step::JoinRooms
        );
        assert_eq!(hs.state(), HandshakeState::Identified);

        assert_eq!(hs.on_notice(NICKSERV, "please identify"), Step::Ignore);
        assert_eq!(hs.on_notice(NICKSERV, "Password accepted"), Step::Ignore);
    }

    #[test]
    fn username_is_included() {
        let mut hs = Handshake::new(&config(Some("account"))).unwrap();
        assert_eq!(
            hs.on_notice(NICKSERV, "please identify"),
            Step::Identify("identify account hunter2".into())
        );
    }

    #[test]
    fn prompt_before_registration_is_accepted() {
        let mut hs = Handshake::new(&config(None)).unwrap();
        assert!(matches!(hs.on_notice(NICKSERV, "identify!"), Step::Identify(..)));
        hs.on_registered();
        assert_eq!(hs.state(), HandshakeState::Identifying);
    }

    #[test]
    fn success_text_is_case_sensitive() {
        let mut hs = Handshake::new(&config(None)).unwrap();
        hs.on_notice(NICKSERV, "identify");
        assert_eq!(hs.on_notice(NICKSERV, "PASSWORD ACCEPTED"), Step::Ignore);
        assert_eq!(hs.on_notice(NICKSERV, "Password accepted"), Step::JoinRooms);
    }

    #[test]
    fn success_before_prompt_is_ignored() {
        let mut hs = Handshake::new(&config(None)).unwrap();
        assert_eq!(hs.on_notice(NICKSERV, "Password accepted"), Step::Ignore);
        assert_eq!(hs.state(), HandshakeState::Idle);
    }

    #[test]
    fn other_senders_are_ignored() {
        let mut hs = Handshake::new(&config(None)).unwrap();
        assert_eq!(hs.on_notice("nickserv", "please identify"), Step::Ignore);
        assert_eq!(hs.on_notice("ChanServ", "please identify"), Step::Ignore);
        assert_eq!(hs.state(), HandshakeState::Idle);
    }

    #[test]
    fn password_is_not_in_debug_output() {
        let hs = Handshake::new(&config(None)).unwrap();
        assert!(!format!("{hs:?}").contains("hunter2"));
    }
}
