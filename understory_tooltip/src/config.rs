// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.
//!
//! [`TooltipConfig`] is supplied once at mount and only read afterwards.
//! [`IntentConfig`] carries the hover-intent sampling policy; its defaults are
//! [`DEFAULT_SAMPLE_INTERVAL`] and [`DEFAULT_SENSITIVITY`].

use alloc::string::String;
use core::time::Duration;

use crate::types::{Mode, Placement};

/// Default cadence of the hover-intent sampler.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Default settle threshold, in pixels per millisecond.
pub const DEFAULT_SENSITIVITY: f64 = 0.1;

/// Rejected sampling policy.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The sampling interval was zero.
    #[error("hover sampling interval must be non-zero")]
    ZeroInterval,
    /// The sensitivity was zero, negative, or not finite.
    #[error("hover sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f64),
}

/// Hover-intent sampling policy.
///
/// The sampler compares pointer positions every `interval` and reports the
/// pointer as settled once its speed drops below `sensitivity` (px/ms).
///
/// ```
/// use core::time::Duration;
/// use understory_tooltip::config::{ConfigError, IntentConfig};
///
/// let slow = IntentConfig::new(Duration::from_millis(50), 0.05).unwrap();
/// assert_eq!(slow.interval(), Duration::from_millis(50));
/// assert_eq!(
///     IntentConfig::new(Duration::ZERO, 0.1),
///     Err(ConfigError::ZeroInterval)
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntentConfig {
    interval: Duration,
    sensitivity: f64,
}

impl IntentConfig {
    /// Validate and build a sampling policy.
    pub fn new(interval: Duration, sensitivity: f64) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(sensitivity));
        }
        Ok(Self {
            interval,
            sensitivity,
        })
    }

    /// Cadence of the periodic speed check.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Settle threshold in pixels per millisecond.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SAMPLE_INTERVAL,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Configuration of a single tooltip instance.
///
/// `C` is the opaque content the rendering layer paints inside the panel.
///
/// ```
/// use understory_tooltip::config::TooltipConfig;
/// use understory_tooltip::types::{Mode, Placement};
///
/// let cfg = TooltipConfig::new("info", "Saved automatically")
///     .sticky(true)
///     .placement(Placement::Right);
/// assert_eq!(cfg.mode(), Mode::Sticky);
/// assert_eq!(cfg.preferred_placement(), Placement::Right);
/// assert_eq!(cfg.icon_id(), "info");
/// ```
#[derive(Clone, Debug)]
pub struct TooltipConfig<C> {
    icon_id: String,
    content: C,
    mode: Mode,
    placement: Placement,
    intent: IntentConfig,
}

impl<C> TooltipConfig<C> {
    /// Transient tooltip above the trigger with the default sampling policy.
    pub fn new(icon_id: impl Into<String>, content: C) -> Self {
        Self {
            icon_id: icon_id.into(),
            content,
            mode: Mode::Transient,
            placement: Placement::Top,
            intent: IntentConfig::default(),
        }
    }

    /// Set whether the tooltip is sticky.
    pub fn sticky(mut self, sticky: bool) -> Self {
        self.mode = Mode::from_sticky(sticky);
        self
    }

    /// Set the preferred placement.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Replace the sampling policy.
    pub fn intent(mut self, intent: IntentConfig) -> Self {
        self.intent = intent;
        self
    }

    /// Identifier of the icon resource shown in the trigger.
    pub fn icon_id(&self) -> &str {
        &self.icon_id
    }

    /// Panel content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Dismissal policy.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Placement used whenever no clipping correction applies.
    pub fn preferred_placement(&self) -> Placement {
        self.placement
    }

    /// Sampling policy.
    pub fn intent_config(&self) -> IntentConfig {
        self.intent
    }
}
