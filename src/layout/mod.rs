//! Anchor-constraint layout engine
//!
//! Components are positioned relative to each other through directional anchors
//! rather than absolute coordinates. A [`LayoutContainer`] stores one
//! [`Constraint`] per component and resolves absolute [`Bounds`] on demand at the
//! current [`ScalePolicy`] factor.

pub mod anchor;
pub mod component;
pub mod constraint;
pub mod container;
pub mod error;
pub mod scale;
pub mod types;

pub use anchor::{Anchor, Axis};
pub use component::{Anchorable, Paintable, Scalable, Style};
pub use constraint::{AxisConstraint, Constraint, ConstraintRecord, Reference};
pub use container::LayoutContainer;
pub use error::LayoutError;
pub use scale::{ScalePolicy, MAX_SCALE, MIN_SCALE};
pub use types::{Bounds, ComponentId, Extent, Point, Size};
