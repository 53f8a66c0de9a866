use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};

/// How a password is written to the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PasswordStorage {
    /// Stored exactly as received.
    #[default]
    Plaintext,
    /// Hashed with bcrypt at the default cost.
    Bcrypt,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "user-register", version, about = "User registration API")]
pub struct Config {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "REGISTER_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "REGISTER_PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database location. The file is created if it does not exist.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:users.db")]
    pub database_url: String,

    #[arg(long, env = "REGISTER_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Single origin allowed to call the API. All origins are allowed when unset.
    #[arg(long, env = "REGISTER_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    #[arg(long, env = "REGISTER_PASSWORD_STORAGE", value_enum, default_value_t = PasswordStorage::Plaintext)]
    pub password_storage: PasswordStorage,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
