//! User-adjustable display settings and their URL overrides.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::graph::lifecycle::MAX_SPEED;

/// Which textual view the data panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
	/// Adjacency list.
	#[default]
	List,
	/// Adjacency matrix.
	Matrix,
	/// Degree table.
	Degree,
}

impl ViewMode {
	/// Tabs in display order.
	pub const ALL: [ViewMode; 3] = [ViewMode::List, ViewMode::Matrix, ViewMode::Degree];

	/// Short tab caption.
	pub fn label(self) -> &'static str {
		match self {
			ViewMode::List => "List",
			ViewMode::Matrix => "Matrix",
			ViewMode::Degree => "Degree",
		}
	}

	/// Tooltip / heading.
	pub fn title(self) -> &'static str {
		match self {
			ViewMode::List => "Adjacency List",
			ViewMode::Matrix => "Adjacency Matrix",
			ViewMode::Degree => "Vertex Degrees",
		}
	}
}

impl fmt::Display for ViewMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ViewMode::List => "list",
			ViewMode::Matrix => "matrix",
			ViewMode::Degree => "degree",
		};
		f.write_str(name)
	}
}

impl FromStr for ViewMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"list" => Ok(ViewMode::List),
			"matrix" => Ok(ViewMode::Matrix),
			"degree" | "degrees" => Ok(ViewMode::Degree),
			other => Err(format!("unknown view mode '{other}'")),
		}
	}
}

/// Startup values for the sidebar toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Whether edges carry user-entered weights.
	pub weighted: bool,
	/// Animation speed slider, `0..=100`.
	pub animation_speed: u8,
	/// Tab selected in the data panel.
	pub view_mode: ViewMode,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			weighted: true,
			animation_speed: 50,
			view_mode: ViewMode::List,
		}
	}
}

impl Settings {
	/// Defaults overridden by `weighted`, `speed` and `view` query parameters.
	///
	/// Unparseable values are logged and ignored.
	pub fn from_query(get: impl Fn(&str) -> Option<String>) -> Self {
		let mut settings = Self::default();

		if let Some(raw) = get("weighted") {
			match raw.parse::<bool>() {
				Ok(weighted) => settings.weighted = weighted,
				Err(e) => warn!("ignoring weighted={raw}: {e}"),
			}
		}
		if let Some(raw) = get("speed") {
			match raw.parse::<u8>() {
				Ok(speed) if speed <= MAX_SPEED => settings.animation_speed = speed,
				Ok(speed) => warn!("ignoring speed={speed}: must be at most {MAX_SPEED}"),
				Err(e) => warn!("ignoring speed={raw}: {e}"),
			}
		}
		if let Some(raw) = get("view") {
			match raw.parse::<ViewMode>() {
				Ok(mode) => settings.view_mode = mode,
				Err(e) => warn!("ignoring view={raw}: {e}"),
			}
		}
		settings
	}
}
