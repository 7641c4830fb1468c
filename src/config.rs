// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ingest: IngestConfig,
    pub reports: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub csv_path: String,
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub top_n: usize,
    pub engagement_weight: f64,
    pub watch_time_weight: f64,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file if present
        let _ = dotenv::dotenv();

        Config {
            ingest: IngestConfig {
                csv_path: env::var("INTERACTIONS_CSV")
                    .unwrap_or_else(|_| "interactions.csv".to_string()),
                delimiter: env::var("CSV_DELIMITER")
                    .ok()
                    .and_then(|raw| raw.chars().next())
                    .unwrap_or(';'),
            },
            reports: ReportConfig {
                top_n: env::var("REPORT_TOP_N")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("REPORT_TOP_N must be a number"),
                engagement_weight: env::var("RECOMMENDATION_ENGAGEMENT_WEIGHT")
                    .unwrap_or_else(|_| "0.6".to_string())
                    .parse()
                    .expect("RECOMMENDATION_ENGAGEMENT_WEIGHT must be a number"),
                watch_time_weight: env::var("RECOMMENDATION_WATCH_TIME_WEIGHT")
                    .unwrap_or_else(|_| "0.4".to_string())
                    .parse()
                    .expect("RECOMMENDATION_WATCH_TIME_WEIGHT must be a number"),
            },
        }
    }
}
