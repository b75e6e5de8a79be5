use std::env;

use crate::services::journal::{JournalOptions, LabelGrouping, STORAGE_KEY, TOP_ITEMS_LIMIT};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    // Journal
    pub storage_key: String,
    pub normalize_labels: bool,
    pub top_items_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://breakfast_journal.db".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            frontend_url: "http://localhost:8081".into(),
            cors_extra_origins: Vec::new(),
            storage_key: STORAGE_KEY.into(),
            normalize_labels: false,
            top_items_limit: TOP_ITEMS_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            storage_key: env::var("STORAGE_KEY")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.storage_key),
            normalize_labels: env::var("NORMALIZE_LABELS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.normalize_labels),
            top_items_limit: env::var("TOP_ITEMS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.top_items_limit),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn journal_options(&self) -> JournalOptions {
        JournalOptions {
            storage_key: self.storage_key.clone(),
            label_grouping: if self.normalize_labels {
                LabelGrouping::Normalized
            } else {
                LabelGrouping::Exact
            },
            top_items_limit: self.top_items_limit,
        }
    }
}
