use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        PossibleValuesParser, ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_DSN: &str = "dsn";
pub const ARG_DB_PASSWORD: &str = "db-password";
pub const ARG_STORE: &str = "store";
pub const ARG_SESSION_TTL: &str = "session-ttl-seconds";
pub const ARG_RESET_TTL: &str = "reset-ttl-seconds";
pub const ARG_VERBOSITY: &str = "verbosity";

pub const STORE_POSTGRES: &str = "postgres";
pub const STORE_MEMORY: &str = "memory";

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

// TTLs must be positive, a zero TTL would expire every token on issue
fn validator_ttl() -> ValueParser {
    ValueParser::from(move |ttl: &str| -> std::result::Result<i64, String> {
        match ttl.parse::<i64>() {
            Ok(seconds) if seconds > 0 => Ok(seconds),
            _ => Err("TTL must be a positive number of seconds".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("keyward")
        .about("Account registration, sign-in and password recovery")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("KEYWARD_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string, example: postgres://user@localhost:5432/keyward")
                .env("KEYWARD_DSN")
                .required_unless_present(ARG_STORE),
        )
        .arg(
            Arg::new(ARG_DB_PASSWORD)
                .long("db-password")
                .help("Database password, replaces the password in the DSN")
                .env("KEYWARD_DB_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_STORE)
                .long("store")
                .help("Account store backend")
                .env("KEYWARD_STORE")
                .value_parser(PossibleValuesParser::new([STORE_POSTGRES, STORE_MEMORY])),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long("session-ttl-seconds")
                .help("Lifetime of bearer session tokens")
                .default_value("86400")
                .env("KEYWARD_SESSION_TTL_SECONDS")
                .value_parser(validator_ttl()),
        )
        .arg(
            Arg::new(ARG_RESET_TTL)
                .long("reset-ttl-seconds")
                .help("Lifetime of password reset tokens")
                .default_value("86400")
                .env("KEYWARD_RESET_TTL_SECONDS")
                .value_parser(validator_ttl()),
        )
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("KEYWARD_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
