//! Constraint records binding a component's anchors to a reference's anchors

use super::anchor::{Anchor, Axis};
use super::error::LayoutError;
use super::types::ComponentId;

/// What an axis constraint aligns against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    /// The owning container's own edges
    Container,
    /// Another component registered in the same container
    Component(ComponentId),
}

impl Reference {
    pub fn component(self) -> Option<ComponentId> {
        match self {
            Reference::Container => None,
            Reference::Component(id) => Some(id),
        }
    }
}

impl From<ComponentId> for Reference {
    fn from(id: ComponentId) -> Self {
        Reference::Component(id)
    }
}

/// "Align `side` of the subject with `reference_side` of `reference`, offset by `offset`"
///
/// `offset` is stored unscaled; the container multiplies it by the current scale
/// factor each time it resolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConstraint {
    pub reference: Reference,
    pub side: Anchor,
    pub reference_side: Anchor,
    pub offset: f64,
}

impl AxisConstraint {
    pub fn new(
        side: Anchor,
        reference: impl Into<Reference>,
        reference_side: Anchor,
        offset: f64,
    ) -> Self {
        Self {
            reference: reference.into(),
            side,
            reference_side,
            offset,
        }
    }

    /// Both anchors must lie on `axis`
    pub fn validate(&self, axis: Axis) -> Result<(), LayoutError> {
        for anchor in [self.side, self.reference_side] {
            if anchor.axis() != axis {
                return Err(LayoutError::invalid_anchor(anchor, axis));
            }
        }
        Ok(())
    }
}

/// Horizontal and vertical placement of one component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub x: AxisConstraint,
    pub y: AxisConstraint,
}

impl Constraint {
    pub fn new(x: AxisConstraint, y: AxisConstraint) -> Self {
        Self { x, y }
    }

    /// Constrain both axes against the same reference
    pub fn to(
        reference: impl Into<Reference>,
        (side_x, reference_side_x, offset_x): (Anchor, Anchor, f64),
        (side_y, reference_side_y, offset_y): (Anchor, Anchor, f64),
    ) -> Self {
        let reference = reference.into();
        Self {
            x: AxisConstraint::new(side_x, reference, reference_side_x, offset_x),
            y: AxisConstraint::new(side_y, reference, reference_side_y, offset_y),
        }
    }

    /// Center the subject on the reference
    pub fn centered_on(reference: impl Into<Reference>) -> Self {
        Self::to(
            reference,
            (Anchor::HorizontalCenter, Anchor::HorizontalCenter, 0.0),
            (Anchor::VerticalCenter, Anchor::VerticalCenter, 0.0),
        )
    }

    pub fn axis(&self, axis: Axis) -> &AxisConstraint {
        match axis {
            Axis::Horizontal => &self.x,
            Axis::Vertical => &self.y,
        }
    }

    /// Components referenced by either axis
    pub fn references(&self) -> impl Iterator<Item = ComponentId> {
        let x = self.x.reference.component();
        let y = self.y.reference.component();
        x.into_iter().chain(y.filter(|id| Some(*id) != x))
    }

    /// Check anchors against their axes
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.x.validate(Axis::Horizontal)?;
        self.y.validate(Axis::Vertical)
    }
}

/// A stored rule: the subject component plus its constraint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintRecord {
    pub component: ComponentId,
    pub constraint: Constraint,
}
