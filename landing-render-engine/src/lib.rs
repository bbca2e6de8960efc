//! Motion and 3D orchestration for a two-section landing page.
//!
//! The engine turns page scroll, viewport visibility and the frame clock into
//! motion: parallax offsets, one-shot entrance reveals, a floating 3D model
//! and an ambient particle field. The page sections compose these from a
//! JSON config.

pub mod engine;
pub mod rpc;
pub mod sections;
