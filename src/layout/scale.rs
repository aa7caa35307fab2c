//! Scale policy: the multiplier applied to every declared size and offset

use super::component::Scalable;
use super::error::LayoutError;
use super::types::Size;

/// Smallest supported scale factor
pub const MIN_SCALE: f64 = 0.5;

/// Largest supported scale factor
pub const MAX_SCALE: f64 = 2.0;

/// Process scale context, passed to containers when they resolve
///
/// Scaled values are always `original * factor`; successive changes never compose,
/// so rescaling back and forth cannot drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePolicy {
    factor: f64,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl ScalePolicy {
    /// Create a policy with the default factor of 1.0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with a validated factor
    pub fn with_factor(factor: f64) -> Result<Self, LayoutError> {
        let mut policy = Self::default();
        policy.set_scale(factor)?;
        Ok(policy)
    }

    /// Change the factor; out-of-range values leave the policy untouched
    pub fn set_scale(&mut self, factor: f64) -> Result<(), LayoutError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&factor) {
            return Err(LayoutError::ScaleOutOfRange {
                factor,
                min: MIN_SCALE,
                max: MAX_SCALE,
            });
        }
        tracing::debug!(factor, "scale factor changed");
        self.factor = factor;
        Ok(())
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Scale an unscaled value
    pub fn scale(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Scale an unscaled size
    pub fn scale_size(&self, size: Size) -> Size {
        Size::new(self.scale(size.width), self.scale(size.height))
    }

    /// Set the factor and re-resolve every given root
    ///
    /// Targets are re-resolved in order; the first failure is returned.
    pub fn apply(
        &mut self,
        factor: f64,
        targets: &mut [&mut dyn Scalable],
    ) -> Result<(), LayoutError> {
        self.set_scale(factor)?;
        for target in targets.iter_mut() {
            target.on_scale_changed(self)?;
        }
        Ok(())
    }
}
