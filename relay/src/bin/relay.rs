use gumdrop::Options as _;
use relay::{Helo, Reply};
use relay_config::LoadFromEnv as _;
use relay_irc::{Config, ConnectOptions, IrcAdapter};

#[derive(Debug, gumdrop::Options)]
struct Args {
    /// prints the help message
    help: bool,

    /// overrides the configured nick
    #[options(meta = "<NICK>")]
    nick: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args_default_or_exit();

    simple_env_load::load_env_from([".dev.env", ".env"]);
    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    log::info!("loading configuration");
    let mut config = Config::load_from_env()?;
    if let Some(nick) = args.nick {
        config.nick = nick;
    }

    let options = ConnectOptions::from_config(&config);
    log::debug!("connection options: {options:?}");

    let (robot, mut replies) = Helo::new(&config.nick);
    let (wire, events, mut reader) = relay_local::stdio(64);

    let adapter = IrcAdapter::new(config, wire, robot, events);
    adapter.run()?;
    log::info!("relaying {} as {}", options.server, options.nick);

    loop {
        tokio::select! {
            Some(Reply { envelope, text }) = replies.recv() => {
                if let Err(err) = adapter.reply(&envelope, &[text]).await {
                    log::warn!("could not reply: {err:#}");
                }
            }
            res = &mut reader => {
                match res {
                    Ok(Ok(())) => log::info!("input closed"),
                    Ok(Err(err)) => log::error!("could not read events: {err:#}"),
                    Err(err) => log::error!("event reader failed: {err}"),
                }
                break;
            }
        }
    }

    adapter.close();
    Ok(())
}
