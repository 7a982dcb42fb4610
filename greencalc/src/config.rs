//! User configuration
//!
//! Read once at startup from `<config dir>/greencalc/config.json`, then
//! overridden by environment variables.

use greencore::storage::{self, config_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "greencalc";

/// `WxH`, e.g. `420x720`
const ENV_WINDOW_SIZE: &str = "GREENCALC_WINDOW_SIZE";
/// An `EnvFilter` directive used when `RUST_LOG` is unset.
const ENV_LOG: &str = "GREENCALC_LOG";

/// Smallest main window that still fits the keypad.
pub const MIN_WINDOW_SIZE: [f32; 2] = [260.0, 420.0];
const MIN_ABOUT_SIZE: [f32; 2] = [240.0, 240.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub about_width: f32,
    pub about_height: f32,
    /// Use the OS title bar instead of the drawn one.
    pub decorated: bool,
    pub always_on_top: bool,
    pub log_filter: Option<String>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            window_width: 400.0,
            window_height: 700.0,
            about_width: 380.0,
            about_height: 500.0,
            decorated: false,
            always_on_top: false,
            log_filter: None,
        }
    }
}

impl CalcConfig {
    pub fn path() -> PathBuf {
        config_dir(APP_NAME).join("config.json")
    }

    /// Read the config file. `Ok(None)` when there is none.
    pub fn try_load(path: &Path) -> storage::Result<Option<Self>> {
        storage::load_json(path)
    }

    /// Apply environment overrides; `var` is `std::env::var` outside tests.
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some((w, h)) = var(ENV_WINDOW_SIZE).as_deref().and_then(parse_size) {
            self.window_width = w;
            self.window_height = h;
        }
        if let Some(filter) = var(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            self.log_filter = Some(filter);
        }
        self.clamped()
    }

    /// Keep window sizes finite and at least the minimum. Non-finite values
    /// fall back to the defaults.
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();
        self.window_width = clamp_dim(self.window_width, defaults.window_width, MIN_WINDOW_SIZE[0]);
        self.window_height =
            clamp_dim(self.window_height, defaults.window_height, MIN_WINDOW_SIZE[1]);
        self.about_width = clamp_dim(self.about_width, defaults.about_width, MIN_ABOUT_SIZE[0]);
        self.about_height = clamp_dim(self.about_height, defaults.about_height, MIN_ABOUT_SIZE[1]);
        self
    }
}

fn clamp_dim(value: f32, default: f32, min: f32) -> f32 {
    if value.is_finite() {
        value.max(min)
    } else {
        default
    }
}

/// Parse `WxH` into a finite, positive width and height.
fn parse_size(value: &str) -> Option<(f32, f32)> {
    let (w, h) = value.trim().split_once(['x', 'X'])?;
    let w: f32 = w.trim().parse().ok()?;
    let h: f32 = h.trim().parse().ok()?;
    let valid = |v: f32| v.is_finite() && v > 0.0;
    (valid(w) && valid(h)).then_some((w, h))
}
