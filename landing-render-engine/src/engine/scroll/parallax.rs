use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::progress::ScrollProgress;

/// Unit of a mapped output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    None,
    Px,
    /// Percent of the element's own height, like a CSS translate.
    Percent,
}

/// Curve applied to the normalised input before interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingRange {
    pub domain: [f32; 2],
    pub output: [f32; 2],
    pub unit: OutputUnit,
    pub easing: Easing,
}

/// Unit interval onto itself, linear and unitless.
impl Default for MappingRange {
    fn default() -> Self {
        Self::new([0.0, 1.0], OutputUnit::None)
    }
}

impl MappingRange {
    pub fn new(output: [f32; 2], unit: OutputUnit) -> Self {
        Self {
            domain: [0.0, 1.0],
            output,
            unit,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> OutputValue {
        OutputValue {
            value: self.output[0],
            unit: self.unit,
        }
    }
}

/// A mapped value with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputValue {
    pub value: f32,
    pub unit: OutputUnit,
}

impl OutputValue {
    /// Resolve to a `Val` for an element of the given logical height.
    pub fn to_val(self, element_height: f32) -> Val {
        match self.unit {
            OutputUnit::None | OutputUnit::Px => Val::Px(self.value),
            OutputUnit::Percent => Val::Px(self.value / 100.0 * element_height),
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            OutputUnit::None => write!(f, "{}", self.value),
            OutputUnit::Px => write!(f, "{}px", self.value),
            OutputUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

/// Maps progress onto an output range. Pure, allocation free.
pub struct ParallaxMapper;

impl ParallaxMapper {
    /// Linear interpolation of `progress` from `domain` onto `range`.
    /// A collapsed domain is a caller error and yields `range[0]`.
    pub fn map(progress: f32, domain: [f32; 2], range: [f32; 2]) -> f32 {
        Self::map_eased(progress, domain, range, Easing::Linear)
    }

    pub fn map_eased(progress: f32, domain: [f32; 2], range: [f32; 2], easing: Easing) -> f32 {
        let span = domain[1] - domain[0];
        if span.abs() <= f32::EPSILON || !span.is_finite() {
            return range[0];
        }
        let t = easing.apply((progress - domain[0]) / span);
        range[0] + (range[1] - range[0]) * t
    }

    pub fn map_range(progress: f32, mapping: &MappingRange) -> OutputValue {
        OutputValue {
            value: Self::map_eased(progress, mapping.domain, mapping.output, mapping.easing),
            unit: mapping.unit,
        }
    }
}

/// Vertical offset of a node driven by the progress of another entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct ParallaxOffset {
    pub source: Entity,
    pub mapping: MappingRange,
}

/// Write mapped offsets into `Node::top`. Missing progress falls back to the
/// range start.
pub fn apply_parallax_offsets(
    sources: Query<&ScrollProgress>,
    mut targets: Query<(&ParallaxOffset, &mut Node, Option<&ComputedNode>)>,
) {
    for (parallax, mut node, computed) in &mut targets {
        let output = sources
            .get(parallax.source)
            .ok()
            .and_then(|progress| progress.current)
            .map(|progress| ParallaxMapper::map_range(progress.value(), &parallax.mapping))
            .unwrap_or_else(|| parallax.mapping.start());

        let height = computed
            .map(|c| c.size().y * c.inverse_scale_factor())
            .unwrap_or(0.0);
        let top = output.to_val(height);
        if node.top != top {
            node.top = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_range_ends() {
        for domain in [[0.0, 1.0], [0.2, 0.8], [1.0, 0.0]] {
            let range = [-30.0, 120.0];
            assert_eq!(ParallaxMapper::map(domain[0], domain, range), range[0]);
            assert_eq!(ParallaxMapper::map(domain[1], domain, range), range[1]);
        }
    }

    #[test]
    fn half_progress_onto_zero_to_fifty_percent() {
        let mapping = MappingRange::new([0.0, 50.0], OutputUnit::Percent);
        let value = ParallaxMapper::map_range(0.5, &mapping);
        assert_eq!(value.to_string(), "25%");
        assert_eq!(value.to_val(400.0), Val::Px(100.0));
    }

    #[test]
    fn collapsed_domain_returns_lower_bound() {
        assert_eq!(ParallaxMapper::map(0.7, [0.5, 0.5], [3.0, 9.0]), 3.0);
    }

    #[test]
    fn input_is_clamped_to_the_domain() {
        assert_eq!(ParallaxMapper::map(-1.0, [0.0, 1.0], [0.0, 10.0]), 0.0);
        assert_eq!(ParallaxMapper::map(2.0, [0.0, 1.0], [0.0, 10.0]), 10.0);
    }

    #[test]
    fn easing_keeps_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }
}
