use jukebox::{
    adapters::{sonos::SonosDevice, spotify::SpotifyCatalog},
    command::{Dispatcher, Jukebox},
    config::AppConfig,
    ports::InboundMessage,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::{
    cli::ChatArgs,
    reporter::TerminalReporter,
    transport::{ConsoleTransport, parse_line},
};

type ConsoleDispatcher = Dispatcher<SpotifyCatalog, SonosDevice, ConsoleTransport>;

fn build_dispatcher(
    config: AppConfig,
    reporter: TerminalReporter,
) -> anyhow::Result<ConsoleDispatcher> {
    let catalog = SpotifyCatalog::new(&config)?;
    let device = SonosDevice::new(&config)?;
    debug!(speaker = config.sonos().address(), "adapters ready");

    Ok(Dispatcher::new(
        Jukebox::new(catalog, device, config),
        ConsoleTransport::stdout(reporter.use_colors()),
    ))
}

fn channel_for(args: &ChatArgs, config: &AppConfig) -> String {
    args.channel
        .clone()
        .unwrap_or_else(|| config.standard_channel().to_string())
}

/// Feed stdin to the jukebox line by line until EOF
pub(crate) async fn handle_run(
    args: &ChatArgs,
    config: AppConfig,
    reporter: TerminalReporter,
) -> i32 {
    let channel = channel_for(args, &config);
    let dispatcher = match build_dispatcher(config, reporter) {
        Ok(dispatcher) => dispatcher,
        Err(error) => {
            reporter.report_error(format!("Could not start the jukebox: {error:#}"));
            return 1;
        }
    };

    reporter.report_info(format!(
        "Listening on stdin as `{}` in #{channel}. Prefix a line with #channel to post elsewhere.",
        args.sender
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(message) = parse_line(&line, &channel, &args.sender) {
                    dispatcher.handle_message(&message).await;
                }
            }
            Ok(None) => break,
            Err(error) => {
                reporter.report_error(format!("Could not read from stdin: {error}"));
                return 1;
            }
        }
    }

    info!("stdin closed, shutting down");
    0
}

/// Post one message and exit once it has been handled
pub(crate) async fn handle_send(
    args: &ChatArgs,
    text: &str,
    config: AppConfig,
    reporter: TerminalReporter,
) -> i32 {
    let channel = channel_for(args, &config);
    let dispatcher = match build_dispatcher(config, reporter) {
        Ok(dispatcher) => dispatcher,
        Err(error) => {
            reporter.report_error(format!("Could not start the jukebox: {error:#}"));
            return 1;
        }
    };

    dispatcher
        .handle_message(&InboundMessage::new(text, args.sender.as_str(), channel))
        .await;
    0
}
