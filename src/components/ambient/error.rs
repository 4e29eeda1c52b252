//! Setup and configuration errors.
//!
//! None of these reach the user: a failed mount leaves the surface blank and a
//! bad config falls back to defaults.

use thiserror::Error;

/// Why a surface could not be mounted.
#[derive(Debug, Error)]
pub enum MountError {
	#[error("no browser window available")]
	NoWindow,
	#[error("canvas has no 2d rendering context")]
	NoContext,
	#[error("failed to attach resize listener")]
	Listener,
}

/// Why the JSON configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid ambient config: {0}")]
	Json(#[from] serde_json::Error),
}
