use std::{error::Error as StdError, fs, sync::Arc};

use clap::{Arg as ClapArg, ArgMatches, Command};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use sylvia_iot_sdk::util::logger;
use tokio::signal;

use lora_ddr::libs::{
    config::{self, Config},
    data_handler::{DdrHandler, Options as HandlerOptions},
    ddr_client::DdrClient,
    mqtt::{MqttClient, Options as MqttOptions, Subscriber},
};

#[derive(Deserialize)]
struct AppConfig {
    #[serde(default)]
    log: logger::Config,
    #[serde(rename = "loraDdr", default)]
    lora_ddr: Config,
}

#[derive(Serialize)]
struct PrintConfig<'a> {
    #[serde(rename = "loraDdr")]
    lora_ddr: &'a Config,
}

const PROJ_NAME: &'static str = env!("CARGO_PKG_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> std::io::Result<()> {
    const FN_NAME: &'static str = "main";

    let args = reg_args().get_matches();
    let conf = match init_config(&args) {
        Err(e) => {
            let conf = &logger::Config {
                ..Default::default()
            };
            logger::init(PROJ_NAME, &conf);
            error!("[{}] read config error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(conf) => conf,
    };

    if let Some(("config", _)) = args.subcommand() {
        let print = PrintConfig {
            lora_ddr: &conf.lora_ddr,
        };
        match serde_json::to_string_pretty(&print) {
            Err(e) => eprintln!("print config error: {}", e),
            Ok(s) => println!("{}", s),
        }
        return Ok(());
    }

    logger::init(PROJ_NAME, &conf.log);

    let conf = conf.lora_ddr;
    let ddr_client = match DdrClient::new(conf.ddr_url.as_ref().unwrap()) {
        Err(e) => {
            error!("[{}] invalid DDR URL: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(client) => client,
    };
    let opts = MqttOptions {
        uri: conf.mq_uri.as_ref().unwrap().clone(),
        client_id: conf.client_id.as_ref().unwrap().clone(),
        qos: conf.qos.unwrap(),
        debug: conf.debug.unwrap(),
    };
    let mqtt = match MqttClient::connect(opts).await {
        Err(e) => {
            error!("[{}] cannot connect to mqtt: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(client) => Arc::new(client),
    };

    let handler = Arc::new(DdrHandler::new(HandlerOptions {
        publisher: mqtt.clone(),
        ddr_client,
        publish_on_route_error: conf.publish_on_route_error.unwrap(),
    }));
    let topic = conf.topic.as_ref().unwrap();
    if let Err(e) = mqtt.subscribe(topic.as_str(), handler).await {
        error!("[{}] cannot subscribe to topic {}: {}", FN_NAME, topic, e);
        return Ok(());
    }
    info!("[{}] {} {} started", FN_NAME, PROJ_NAME, PROJ_VER);

    let sig = wait_for_signal().await?;
    warn!("[{}] exiting on {}", FN_NAME, sig);
    if let Err(e) = mqtt.disconnect().await {
        error!("[{}] disconnect error: {}", FN_NAME, e);
    }
    Ok(())
}

fn reg_args() -> Command {
    let mut args = Command::new(PROJ_NAME)
        .version(PROJ_VER)
        .arg(
            ClapArg::new("file")
                .short('f')
                .long("file")
                .help("config file")
                .num_args(1),
        )
        .subcommand(Command::new("config").about("Print the lora-ddr configuration"));
    args = logger::reg_args(args);
    config::reg_args(args)
}

fn init_config(args: &ArgMatches) -> Result<AppConfig, Box<dyn StdError>> {
    if let Some(v) = args.get_one::<String>("file") {
        let conf_str = fs::read_to_string(v)?;
        let conf: AppConfig = json5::from_str(conf_str.as_str())?;
        return Ok(AppConfig {
            log: conf.log,
            lora_ddr: config::apply_default(&conf.lora_ddr),
        });
    }

    Ok(AppConfig {
        log: logger::read_args(args),
        lora_ddr: config::read_args(args),
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result.map(|_| "SIGINT"),
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    signal::ctrl_c().await.map(|_| "Ctrl-C")
}
