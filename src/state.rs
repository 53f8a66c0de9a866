use crate::config::{Config, PasswordStorage};
use hyper::header::{HeaderValue, InvalidHeaderValue};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, reported as `*`.
    Any,
    /// Only this origin, with methods GET and POST.
    Origin(HeaderValue),
}

impl CorsPolicy {
    pub fn from_origin(origin: Option<&str>) -> Result<Self, InvalidHeaderValue> {
        match origin {
            None => Ok(Self::Any),
            Some(origin) => HeaderValue::from_str(origin).map(Self::Origin),
        }
    }

    pub fn allow_origin(&self) -> HeaderValue {
        match self {
            Self::Any => HeaderValue::from_static("*"),
            Self::Origin(origin) => origin.clone(),
        }
    }

    pub fn allow_methods(&self) -> HeaderValue {
        match self {
            Self::Any => HeaderValue::from_static("GET,HEAD,PUT,PATCH,POST,DELETE"),
            Self::Origin(_) => HeaderValue::from_static("GET,POST"),
        }
    }
}

pub struct ServerStateData {
    pub db_pool: SqlitePool,
    pub cors: CorsPolicy,
    pub password_storage: PasswordStorage,
}

impl ServerStateData {
    pub fn new(db_pool: SqlitePool, cors: CorsPolicy, password_storage: PasswordStorage) -> ServerState {
        Arc::new(Self { db_pool, cors, password_storage })
    }

    pub fn from_config(db_pool: SqlitePool, config: &Config) -> Result<ServerState, InvalidHeaderValue> {
        let cors = CorsPolicy::from_origin(config.cors_origin.as_deref())?;
        Ok(Self::new(db_pool, cors, config.password_storage))
    }
}

pub type ServerState = Arc<ServerStateData>;
