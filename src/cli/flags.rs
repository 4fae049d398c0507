//! Command-line flag binding
//!
//! Flags are declared with the current configuration values as their
//! defaults, so the precedence is: zero defaults < file < flags. A
//! [`FlagSet`] is consumed by [`bind_flags`] and cannot be parsed twice.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgMatches, Command};

use crate::domain::error::FlagError;
use crate::domain::models::{Config, Environment, ServerConfig};

const ENV: &str = "env";
const ADDRESS: &str = "address";
const HTTPS: &str = "https";
const HTTPS_PORT: &str = "httpsPort";
const HTTPS_KEY: &str = "httpsKey";
const HTTPS_CHAIN: &str = "httpsChain";
const MONITORING_PORT: &str = "monitoring.port";
const COORDINATOR_HOST: &str = "coordinatorhost";
const ZONE: &str = "zone";
const CONF: &str = "conf";

/// Configuration sections that own command-line flags
pub trait WithFlags {
    /// Declare this section's flags, defaulting to the current values
    fn register(&self, command: Command) -> Command;

    /// Copy parsed flag values back into this section
    fn apply(&mut self, matches: &ArgMatches);
}

/// Caller-owned set of flag declarations
#[derive(Debug, Clone)]
pub struct FlagSet {
    command: Command,
    config_path: Option<PathBuf>,
}

impl FlagSet {
    /// Empty flag set for the binary called `name`
    pub fn new(name: &'static str) -> Self {
        Self {
            command: Command::new(name).about("Cloud game worker"),
            config_path: None,
        }
    }

    /// Default for `-c/--conf`, usually the file the configuration was resolved from
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Values parsed from flags that are not part of [`Config`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    /// Custom configuration file path from `-c/--conf`
    pub config_path: Option<PathBuf>,
}

/// Declare the worker flags on `flags`, parse `args` and apply them to `config`.
///
/// `args` includes the binary name as its first element. Defaults are
/// snapshotted from `config` at the time of this call.
pub fn bind_flags<I, T>(
    config: &mut Config,
    flags: FlagSet,
    args: I,
) -> Result<ParsedFlags, FlagError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = build_command(config, flags);
    let matches = command.try_get_matches_from(args)?;

    config.apply(&matches);

    Ok(ParsedFlags {
        config_path: matches.get_one::<PathBuf>(CONF).cloned(),
    })
}

fn build_command(config: &Config, flags: FlagSet) -> Command {
    let conf = Arg::new(CONF)
        .short('c')
        .long(CONF)
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Set custom configuration file path");
    let conf = match flags.config_path {
        Some(path) => conf.default_value(path.into_os_string()),
        None => conf,
    };

    config.register(flags.command).arg(conf)
}

fn string_arg(id: &'static str, current: &str, help: &'static str) -> Arg {
    let arg = Arg::new(id).long(id).help(help);
    if current.is_empty() {
        arg
    } else {
        arg.default_value(current.to_owned())
    }
}

fn port_arg(id: &'static str, current: u16, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("PORT")
        .value_parser(value_parser!(u16))
        .default_value(current.to_string())
        .help(help)
}

fn apply_string(target: &mut String, matches: &ArgMatches, id: &str) {
    if let Some(value) = matches.get_one::<String>(id) {
        target.clone_from(value);
    }
}

fn apply_port(target: &mut u16, matches: &ArgMatches, id: &str) {
    if let Some(port) = matches.get_one::<u16>(id) {
        *target = *port;
    }
}

impl WithFlags for Environment {
    fn register(&self, command: Command) -> Command {
        command.arg(
            Arg::new(ENV)
                .short('e')
                .long(ENV)
                .value_parser(value_parser!(Environment))
                .default_value(self.to_string())
                .help("Specify environment type"),
        )
    }

    fn apply(&mut self, matches: &ArgMatches) {
        if let Some(env) = matches.get_one::<Self>(ENV) {
            *self = *env;
        }
    }
}

impl WithFlags for ServerConfig {
    fn register(&self, command: Command) -> Command {
        command
            .arg(string_arg(
                ADDRESS,
                &self.address,
                "HTTP server address (host:port)",
            ))
            .arg(
                Arg::new(HTTPS)
                    .long(HTTPS)
                    .value_parser(value_parser!(bool))
                    .num_args(0..=1)
                    .default_missing_value("true")
                    .default_value(if self.https { "true" } else { "false" })
                    .help("Use HTTPS server"),
            )
            .arg(port_arg(
                HTTPS_PORT,
                self.https_port,
                "HTTPS server port (just port)",
            ))
            .arg(string_arg(HTTPS_KEY, &self.https_key, "HTTPS key"))
            .arg(string_arg(HTTPS_CHAIN, &self.https_chain, "HTTPS chain"))
    }

    fn apply(&mut self, matches: &ArgMatches) {
        apply_string(&mut self.address, matches, ADDRESS);
        if let Some(https) = matches.get_one::<bool>(HTTPS) {
            self.https = *https;
        }
        apply_port(&mut self.https_port, matches, HTTPS_PORT);
        apply_string(&mut self.https_key, matches, HTTPS_KEY);
        apply_string(&mut self.https_chain, matches, HTTPS_CHAIN);
    }
}

impl WithFlags for Config {
    fn register(&self, command: Command) -> Command {
        let command = self.worker.server.register(self.environment.register(command));
        let network = &self.worker.network;

        command
            .arg(port_arg(
                MONITORING_PORT,
                self.worker.monitoring.port,
                "Monitoring server port",
            ))
            .arg(string_arg(
                COORDINATOR_HOST,
                &network.coordinator_address,
                "Worker URL to connect",
            ))
            .arg(string_arg(
                ZONE,
                &network.zone,
                "Worker network zone (us, eu, etc.)",
            ))
    }

    fn apply(&mut self, matches: &ArgMatches) {
        self.environment.apply(matches);
        self.worker.server.apply(matches);
        apply_port(&mut self.worker.monitoring.port, matches, MONITORING_PORT);
        apply_string(
            &mut self.worker.network.coordinator_address,
            matches,
            COORDINATOR_HOST,
        );
        apply_string(&mut self.worker.network.zone, matches, ZONE);
    }
}
