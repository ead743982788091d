//! Server configuration from command line and environment.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use clap::Parser;
use tracing::warn;

/// Command-line and environment configuration for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Bucket-list API server")]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    pub bind_address: SocketAddr,

    /// PostgreSQL connection URL. When absent the server runs on the
    /// in-memory store, which loses all data on restart.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// File holding the session signing key material.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    pub session_key_file: PathBuf,

    /// Permit generating a throwaway session key when the key file is
    /// unreadable. Sessions then die with the process.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL")]
    pub session_allow_ephemeral: bool,

    /// Send session cookies without the `Secure` attribute, for plain-HTTP
    /// local development.
    #[arg(long, env = "SESSION_COOKIE_INSECURE")]
    pub session_cookie_insecure: bool,
}

impl ServerConfig {
    /// Load the session signing key.
    ///
    /// Reads the configured key file; on failure falls back to a generated
    /// key in debug builds or when ephemeral keys are explicitly allowed,
    /// and errors otherwise so production never runs with a random key.
    pub fn session_key(&self) -> io::Result<Key> {
        match std::fs::read(&self.session_key_file) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(err) => {
                if cfg!(debug_assertions) || self.session_allow_ephemeral {
                    warn!(
                        path = %self.session_key_file.display(),
                        error = %err,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(io::Error::other(format!(
                        "failed to read session key at {}: {err}",
                        self.session_key_file.display()
                    )))
                }
            }
        }
    }
}
