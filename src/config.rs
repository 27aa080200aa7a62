// src/config.rs
//! Process configuration read from the environment (and `.env`, if present).
use crate::error::{AppError, AppResult};
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite";
pub const DEFAULT_LOG_FILTER: &str = "mind_assessment=debug,tower_http=info,sqlx=warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
    pub seed_demo_users: bool,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: PathBuf::from("frontend"),
            log_dir: PathBuf::from("logs"),
            seed_demo_users: false,
            bcrypt_cost: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds the config from an explicit variable map; unset keys keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> AppResult<Self> {
        let mut c = Self::default();

        if let Some(url) = vars.get("DATABASE_URL") {
            c.database_url = url.clone();
        }

        let host: IpAddr = match vars.get("BIND_ADDR") {
            Some(h) => h
                .parse()
                .map_err(|e| AppError::Config(format!("BIND_ADDR {:?}: {}", h, e)))?,
            None => c.addr.ip(),
        };
        let port: u16 = match vars.get("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| AppError::Config(format!("PORT {:?}: {}", p, e)))?,
            None => c.addr.port(),
        };
        c.addr = SocketAddr::new(host, port);

        if let Some(dir) = vars.get("STATIC_DIR") {
            c.static_dir = PathBuf::from(dir);
        }
        if let Some(dir) = vars.get("LOG_DIR") {
            c.log_dir = PathBuf::from(dir);
        }

        if let Some(flag) = vars.get("SEED_DEMO_USERS") {
            c.seed_demo_users = parse_bool(flag)
                .ok_or_else(|| AppError::Config(format!("SEED_DEMO_USERS {:?} is not a boolean", flag)))?;
        }

        if let Some(cost) = vars.get("BCRYPT_COST") {
            let cost: u32 = cost
                .parse()
                .map_err(|e| AppError::Config(format!("BCRYPT_COST {:?}: {}", cost, e)))?;
            if !(4..=31).contains(&cost) {
                return Err(AppError::Config(format!("BCRYPT_COST {} outside 4..=31", cost)));
            }
            c.bcrypt_cost = cost;
        }

        Ok(c)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
