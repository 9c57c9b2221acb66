//! Page Configuration
//!
//! Which board to show and where the task service lives, read from the
//! page query string: `?board=<id>&api=<base url>&delay=<ms>`.
//! `delay` switches drags to press-and-hold activation.

use leptos_dragdrop::{ActivationConstraint, DRAG_THRESHOLD_PX};
use percent_encoding::percent_decode_str;

/// Service base used when the page does not name one
pub const DEFAULT_API_BASE: &str = match option_env!("KANBAN_API_BASE") {
    Some(base) => base,
    None => "http://127.0.0.1:8787",
};

pub const DEFAULT_BOARD_ID: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub board_id: String,
    pub api_base: String,
    pub activation: ActivationConstraint,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board_id: DEFAULT_BOARD_ID.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            activation: ActivationConstraint::default(),
        }
    }
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().trim().to_string()
}

impl AppConfig {
    /// Parse a query string, with or without the leading `?`.
    /// Unknown keys are ignored; blank values keep the default.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);
            if value.is_empty() {
                continue;
            }
            match key {
                "board" => config.board_id = value,
                "api" => config.api_base = value,
                "delay" => match value.parse::<f64>() {
                    Ok(ms) if ms > 0.0 && ms.is_finite() => {
                        config.activation = ActivationConstraint::Delay {
                            ms,
                            tolerance_px: DRAG_THRESHOLD_PX,
                        }
                    }
                    _ => log::warn!("ignoring drag delay '{}'", value),
                },
                _ => {}
            }
        }
        config
    }

    /// Read from the current page location
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }
}
