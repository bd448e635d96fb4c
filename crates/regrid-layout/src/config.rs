#![forbid(unsafe_code)]

//! Grid configuration.
//!
//! [`GridConfig`] is validated once, when it is built or deserialized; every
//! other component can then rely on `columns >= 1` and finite, non-negative
//! spacing without re-checking.

use std::fmt;
use std::time::Duration;

use regrid_core::gesture::PressConfig;
use serde::{Deserialize, Serialize};

/// Default column count.
pub const DEFAULT_COLUMNS: u16 = 3;
/// Default horizontal and vertical gap.
pub const DEFAULT_GAP: f32 = 8.0;
/// Default press duration before a drag is recognized.
pub const DEFAULT_PRESS_DURATION: Duration = Duration::from_millis(500);
/// Default travel allowed while the press is pending.
pub const DEFAULT_PRESS_SLOP: f32 = 10.0;

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum GridConfigError {
    /// Column count must be at least one.
    ZeroColumns,
    /// Gaps must be finite and non-negative.
    InvalidGap { horizontal: f32, vertical: f32 },
    /// Aspect ratio must be finite and positive.
    InvalidAspectRatio(f32),
    /// Press slop must be finite and non-negative.
    InvalidSlop(f32),
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => write!(f, "grid needs at least one column"),
            Self::InvalidGap {
                horizontal,
                vertical,
            } => write!(
                f,
                "gaps must be finite and non-negative (horizontal={horizontal}, vertical={vertical})"
            ),
            Self::InvalidAspectRatio(ratio) => {
                write!(f, "aspect ratio must be finite and positive, got {ratio}")
            }
            Self::InvalidSlop(slop) => {
                write!(f, "press slop must be finite and non-negative, got {slop}")
            }
        }
    }
}

impl std::error::Error for GridConfigError {}

/// Immutable, validated grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridConfigRepr", into = "GridConfigRepr")]
pub struct GridConfig {
    columns: u16,
    horizontal_gap: f32,
    vertical_gap: f32,
    aspect_ratio: f32,
    drag_enabled: bool,
    press_duration: Duration,
    press_slop: f32,
}

impl GridConfig {
    /// Default configuration with `columns` columns.
    pub fn new(columns: u16) -> Result<Self, GridConfigError> {
        Self::builder().columns(columns).build()
    }

    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }

    /// Number of columns (always at least one).
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Horizontal gap between columns.
    #[inline]
    #[must_use]
    pub const fn horizontal_gap(&self) -> f32 {
        self.horizontal_gap
    }

    /// Vertical gap between rows.
    #[inline]
    #[must_use]
    pub const fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    /// Cell height divided by cell width.
    #[inline]
    #[must_use]
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Whether items can be dragged at all.
    #[inline]
    #[must_use]
    pub const fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    /// Hold time before a press turns into a drag.
    #[inline]
    #[must_use]
    pub const fn press_duration(&self) -> Duration {
        self.press_duration
    }

    /// Travel allowed while the press is pending.
    #[inline]
    #[must_use]
    pub const fn press_slop(&self) -> f32 {
        self.press_slop
    }

    /// Recognizer thresholds derived from this configuration.
    #[must_use]
    pub fn press_config(&self) -> PressConfig {
        PressConfig {
            press_duration: self.press_duration,
            slop: self.press_slop,
        }
    }

    /// Same configuration with dragging toggled. Cannot invalidate.
    #[must_use]
    pub const fn with_drag_enabled(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    fn validate(self) -> Result<Self, GridConfigError> {
        if self.columns == 0 {
            return Err(GridConfigError::ZeroColumns);
        }
        let gap_ok = |gap: f32| gap.is_finite() && gap >= 0.0;
        if !gap_ok(self.horizontal_gap) || !gap_ok(self.vertical_gap) {
            return Err(GridConfigError::InvalidGap {
                horizontal: self.horizontal_gap,
                vertical: self.vertical_gap,
            });
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(GridConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.press_slop.is_finite() && self.press_slop >= 0.0) {
            return Err(GridConfigError::InvalidSlop(self.press_slop));
        }
        Ok(self)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            horizontal_gap: DEFAULT_GAP,
            vertical_gap: DEFAULT_GAP,
            aspect_ratio: 1.0,
            drag_enabled: true,
            press_duration: DEFAULT_PRESS_DURATION,
            press_slop: DEFAULT_PRESS_SLOP,
        }
    }
}

/// Builder for [`GridConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GridConfigBuilder {
    config: GridConfig,
}

impl GridConfigBuilder {
    /// Set the column count.
    #[must_use]
    pub fn columns(mut self, columns: u16) -> Self {
        self.config.columns = columns;
        self
    }

    /// Set both gaps.
    #[must_use]
    pub fn gaps(mut self, horizontal: f32, vertical: f32) -> Self {
        self.config.horizontal_gap = horizontal;
        self.config.vertical_gap = vertical;
        self
    }

    /// Set the cell aspect ratio (height / width).
    #[must_use]
    pub fn aspect_ratio(mut self, ratio: f32) -> Self {
        self.config.aspect_ratio = ratio;
        self
    }

    /// Enable or disable dragging.
    #[must_use]
    pub fn drag_enabled(mut self, enabled: bool) -> Self {
        self.config.drag_enabled = enabled;
        self
    }

    /// Set the press duration.
    #[must_use]
    pub fn press_duration(mut self, duration: Duration) -> Self {
        self.config.press_duration = duration;
        self
    }

    /// Set the press slop.
    #[must_use]
    pub fn press_slop(mut self, slop: f32) -> Self {
        self.config.press_slop = slop;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<GridConfig, GridConfigError> {
        self.config.validate()
    }
}

/// Wire form: flat fields, every one optional, press duration in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct GridConfigRepr {
    columns: u16,
    horizontal_gap: f32,
    vertical_gap: f32,
    aspect_ratio: f32,
    drag_enabled: bool,
    press_duration_ms: u64,
    press_slop: f32,
}

impl Default for GridConfigRepr {
    fn default() -> Self {
        GridConfig::default().into()
    }
}

impl From<GridConfig> for GridConfigRepr {
    fn from(config: GridConfig) -> Self {
        Self {
            columns: config.columns,
            horizontal_gap: config.horizontal_gap,
            vertical_gap: config.vertical_gap,
            aspect_ratio: config.aspect_ratio,
            drag_enabled: config.drag_enabled,
            press_duration_ms: u64::try_from(config.press_duration.as_millis())
                .unwrap_or(u64::MAX),
            press_slop: config.press_slop,
        }
    }
}

impl TryFrom<GridConfigRepr> for GridConfig {
    type Error = GridConfigError;

    fn try_from(repr: GridConfigRepr) -> Result<Self, Self::Error> {
        GridConfig::builder()
            .columns(repr.columns)
            .gaps(repr.horizontal_gap, repr.vertical_gap)
            .aspect_ratio(repr.aspect_ratio)
            .drag_enabled(repr.drag_enabled)
            .press_duration(Duration::from_millis(repr.press_duration_ms))
            .press_slop(repr.press_slop)
            .build()
    }
}
