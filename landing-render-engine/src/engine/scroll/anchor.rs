use bevy::prelude::*;
use std::str::FromStr;
use thiserror::Error;

/// Position along an element or the viewport, as a fraction of its height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    Fraction(f32),
}

impl Edge {
    pub fn fraction(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(f) => f,
        }
    }
}

impl FromStr for Edge {
    type Err = EdgeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => {
                let value = other
                    .parse::<f32>()
                    .map_err(|_| EdgeParseError::UnknownEdge(other.to_string()))?;
                if (0.0..=1.0).contains(&value) {
                    Ok(Self::Fraction(value))
                } else {
                    Err(EdgeParseError::FractionOutOfRange(value))
                }
            }
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EdgeParseError {
    #[error("unknown edge '{0}', expected start, center, end or a fraction")]
    UnknownEdge(String),
    #[error("edge fraction {0} is outside [0, 1]")]
    FractionOutOfRange(f32),
    #[error("expected '<target edge> <viewport edge>', got '{0}'")]
    MalformedPair(String),
}

/// The point where a target edge meets a viewport edge, e.g. `"end start"`:
/// the bottom of the container reaches the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePair {
    pub target: Edge,
    pub viewport: Edge,
}

impl EdgePair {
    pub const START_START: Self = Self::new(Edge::Start, Edge::Start);
    pub const END_START: Self = Self::new(Edge::End, Edge::Start);
    pub const START_END: Self = Self::new(Edge::Start, Edge::End);
    pub const END_END: Self = Self::new(Edge::End, Edge::End);

    pub const fn new(target: Edge, viewport: Edge) -> Self {
        Self { target, viewport }
    }

    /// Scroll offset at which this pair lines up for the given container.
    pub fn scroll_offset(&self, container: ContainerExtent, viewport_height: f32) -> f32 {
        container.top + self.target.fraction() * container.height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for EdgePair {
    type Err = EdgeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(target), Some(viewport), None) => {
                Ok(Self::new(target.parse()?, viewport.parse()?))
            }
            _ => Err(EdgeParseError::MalformedPair(s.to_string())),
        }
    }
}

/// Page-space vertical extent of a container, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerExtent {
    pub top: f32,
    pub height: f32,
}

/// Scroll range over which progress is measured for one container.
/// Bound once when the section spawns; there is no way to rebind it.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScrollAnchor {
    container: Entity,
    start: EdgePair,
    end: EdgePair,
}

impl ScrollAnchor {
    pub fn bind(container: Entity, start: EdgePair, end: EdgePair) -> Self {
        Self {
            container,
            start,
            end,
        }
    }

    pub fn container(&self) -> Entity {
        self.container
    }

    pub fn start(&self) -> EdgePair {
        self.start
    }

    pub fn end(&self) -> EdgePair {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_fractional_pairs() {
        assert_eq!("end start".parse::<EdgePair>(), Ok(EdgePair::END_START));
        assert_eq!(
            "0.25 center".parse::<EdgePair>(),
            Ok(EdgePair::new(Edge::Fraction(0.25), Edge::Center))
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(matches!(
            "start".parse::<EdgePair>(),
            Err(EdgeParseError::MalformedPair(_))
        ));
        assert!(matches!(
            "top start".parse::<EdgePair>(),
            Err(EdgeParseError::UnknownEdge(_))
        ));
        assert_eq!(
            "1.5 start".parse::<EdgePair>(),
            Err(EdgeParseError::FractionOutOfRange(1.5))
        );
    }

    #[test]
    fn scroll_offset_aligns_edges() {
        let container = ContainerExtent {
            top: 200.0,
            height: 800.0,
        };
        assert_eq!(EdgePair::START_START.scroll_offset(container, 600.0), 200.0);
        assert_eq!(EdgePair::END_START.scroll_offset(container, 600.0), 1000.0);
        assert_eq!(EdgePair::START_END.scroll_offset(container, 600.0), -400.0);
    }
}
