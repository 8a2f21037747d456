use crate::cli::{
    actions::{
        server::{Args, StoreKind},
        Action,
    },
    commands::{
        ARG_DB_PASSWORD, ARG_DSN, ARG_PORT, ARG_RESET_TTL, ARG_SESSION_TTL, ARG_STORE,
        STORE_MEMORY,
    },
};
use crate::auth::{reset::DEFAULT_RESET_TTL_SECONDS, token::DEFAULT_SESSION_TTL_SECONDS};
use anyhow::{bail, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let store = match matches.get_one::<String>(ARG_STORE).map(String::as_str) {
        Some(STORE_MEMORY) => StoreKind::Memory,
        _ => StoreKind::Postgres,
    };

    let dsn = matches.get_one::<String>(ARG_DSN).cloned();
    if store == StoreKind::Postgres && dsn.is_none() {
        bail!("missing required argument: --dsn");
    }

    let db_password = matches
        .get_one::<String>(ARG_DB_PASSWORD)
        .map(|password| SecretString::from(password.clone()));

    let session_ttl_seconds = matches
        .get_one::<i64>(ARG_SESSION_TTL)
        .copied()
        .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);
    let reset_ttl_seconds = matches
        .get_one::<i64>(ARG_RESET_TTL)
        .copied()
        .unwrap_or(DEFAULT_RESET_TTL_SECONDS);

    Ok(Action::Server(Args {
        port,
        store,
        dsn,
        db_password,
        session_ttl_seconds,
        reset_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    fn clean_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(
            [
                ("KEYWARD_PORT", None::<&str>),
                ("KEYWARD_DSN", None),
                ("KEYWARD_DB_PASSWORD", None),
                ("KEYWARD_STORE", None),
                ("KEYWARD_SESSION_TTL_SECONDS", None),
                ("KEYWARD_RESET_TTL_SECONDS", None),
            ],
            f,
        );
    }

    #[test]
    fn test_handler_postgres() {
        clean_env(|| {
            let matches = commands::new().get_matches_from(vec![
                "keyward",
                "--dsn",
                "postgres://keyward@localhost/keyward",
                "--db-password",
                "pw",
                "--session-ttl-seconds",
                "120",
            ]);
            let Action::Server(args) = handler(&matches).unwrap();
            assert_eq!(args.port, 8080);
            assert_eq!(args.store, StoreKind::Postgres);
            assert_eq!(
                args.dsn.as_deref(),
                Some("postgres://keyward@localhost/keyward")
            );
            assert_eq!(
                args.db_password.as_ref().map(|p| p.expose_secret().to_string()),
                Some("pw".to_string())
            );
            assert_eq!(args.session_ttl_seconds, 120);
            assert_eq!(args.reset_ttl_seconds, DEFAULT_RESET_TTL_SECONDS);
        });
    }

    #[test]
    fn test_handler_memory_without_dsn() {
        clean_env(|| {
            let matches =
                commands::new().get_matches_from(vec!["keyward", "--store", "memory", "-p", "9000"]);
            let Action::Server(args) = handler(&matches).unwrap();
            assert_eq!(args.port, 9000);
            assert_eq!(args.store, StoreKind::Memory);
            assert!(args.dsn.is_none());
        });
    }

    #[test]
    fn test_handler_postgres_store_needs_dsn() {
        clean_env(|| {
            let matches =
                commands::new().get_matches_from(vec!["keyward", "--store", "postgres"]);
            assert!(handler(&matches).is_err());
        });
    }
}
