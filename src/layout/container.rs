//! Layout container: owns components and their constraint records
//!
//! Resolution is anchor-directed. Each axis of each component says "align side S1
//! of C with side S2 of R, offset by O", so resolving C first resolves R on demand.
//! Re-entering a component whose axis is still being resolved means the
//! constraints form a cycle, which is reported as a configuration error.
//!
//! Positions are cached per component: painting reads the cache and never
//! re-resolves.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use super::anchor::Axis;
use super::component::Scalable;
use super::constraint::{Constraint, ConstraintRecord, Reference};
use super::error::LayoutError;
use super::scale::ScalePolicy;
use super::types::{Bounds, ComponentId, Extent, Point, Size};

#[derive(Debug, Clone)]
struct Node {
    declared: Size,
    constraint: Option<Constraint>,
    resolved: Option<Bounds>,
    displacement: Point,
}

impl Node {
    fn new(declared: Size) -> Self {
        Self {
            declared,
            constraint: None,
            resolved: None,
            displacement: Point::default(),
        }
    }
}

/// Shared by every container so an id from one container never matches another's
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A set of anchored components resolved against one another and the container's edges
#[derive(Debug, Clone)]
pub struct LayoutContainer {
    size: Size,
    nodes: IndexMap<ComponentId, Node>,
    bounds: Bounds,
    resolved_factor: Option<f64>,
}

impl Default for LayoutContainer {
    fn default() -> Self {
        Self::new(Size::zero())
    }
}

impl LayoutContainer {
    /// Create an empty container with a declared (unscaled) size
    pub fn new(size: Size) -> Self {
        Self {
            size,
            nodes: IndexMap::new(),
            bounds: Bounds::zero(),
            resolved_factor: None,
        }
    }

    /// Declared size of the container itself
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Register an unconstrained component
    pub fn create(&mut self, size: Size) -> ComponentId {
        let id = ComponentId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        self.nodes.insert(id, Node::new(size));
        id
    }

    /// Register a component and constrain it in one step
    pub fn add(&mut self, size: Size, constraint: Constraint) -> Result<ComponentId, LayoutError> {
        self.check_constraint(None, &constraint)?;
        let id = self.create(size);
        self.add_constrained(id, constraint)?;
        Ok(id)
    }

    /// Set the constraint of a registered component, replacing any previous one
    pub fn add_constrained(
        &mut self,
        id: ComponentId,
        constraint: Constraint,
    ) -> Result<(), LayoutError> {
        self.check_constraint(Some(id), &constraint)?;
        let node = self.node_mut(id)?;
        node.constraint = Some(constraint);
        Ok(())
    }

    /// Re-point both axes of a component's constraint, keeping sides and offsets
    pub fn update_reference(
        &mut self,
        id: ComponentId,
        reference_x: Reference,
        reference_y: Reference,
    ) -> Result<(), LayoutError> {
        let mut constraint = self.require_constraint(id)?;
        constraint.x.reference = reference_x;
        constraint.y.reference = reference_y;
        self.add_constrained(id, constraint)
    }

    /// Change both offsets of a component's constraint, keeping references and sides
    pub fn update_offsets(
        &mut self,
        id: ComponentId,
        offset_x: f64,
        offset_y: f64,
    ) -> Result<(), LayoutError> {
        let mut constraint = self.require_constraint(id)?;
        constraint.x.offset = offset_x;
        constraint.y.offset = offset_y;
        self.node_mut(id)?.constraint = Some(constraint);
        Ok(())
    }

    /// Remove a component and its constraint record
    ///
    /// Records of other components that still reference it are left in place and
    /// fail the next [`resolve`](Self::resolve).
    pub fn remove(&mut self, id: ComponentId) -> Result<(), LayoutError> {
        self.nodes
            .swap_remove(&id)
            .map(|_| ())
            .ok_or(LayoutError::UnknownComponent { id })
    }

    pub fn declared_size(&self, id: ComponentId) -> Option<Size> {
        self.nodes.get(&id).map(|n| n.declared)
    }

    pub fn set_declared_size(&mut self, id: ComponentId, size: Size) -> Result<(), LayoutError> {
        self.node_mut(id)?.declared = size;
        Ok(())
    }

    pub fn constraint(&self, id: ComponentId) -> Option<&Constraint> {
        self.nodes.get(&id).and_then(|n| n.constraint.as_ref())
    }

    /// All constraint records in insertion order
    pub fn records(&self) -> impl Iterator<Item = ConstraintRecord> + '_ {
        self.nodes.iter().filter_map(|(id, node)| {
            node.constraint.map(|constraint| ConstraintRecord {
                component: *id,
                constraint,
            })
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.nodes.keys().copied()
    }

    /// Components whose constraint references `id` on either axis
    pub fn dependents(&self, id: ComponentId) -> Vec<ComponentId> {
        self.records()
            .filter(|r| r.constraint.references().any(|reference| reference == id))
            .map(|r| r.component)
            .collect()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve every component's absolute bounds at the policy's scale
    ///
    /// All positions are computed before any cached bounds are replaced, so a
    /// failing resolution leaves the previous cache intact.
    pub fn resolve(&mut self, scale: &ScalePolicy) -> Result<(), LayoutError> {
        let factor = scale.factor();
        let container = scale.scale_size(self.size);
        let mut resolver = Resolver::new(&self.nodes, container, factor);

        let mut results = Vec::with_capacity(self.nodes.len());
        for id in self.nodes.keys() {
            let horizontal = resolver.resolve(*id, Axis::Horizontal)?;
            let vertical = resolver.resolve(*id, Axis::Vertical)?;
            results.push((*id, Bounds::from_extents(horizontal, vertical)));
        }

        for (id, bounds) in results {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.resolved = Some(bounds);
            }
        }
        self.bounds = Bounds::new(0.0, 0.0, container.width, container.height);
        self.resolved_factor = Some(factor);
        tracing::trace!(components = self.nodes.len(), factor, "layout resolved");
        Ok(())
    }

    /// Scale factor of the last successful resolution
    pub fn resolved_factor(&self) -> Option<f64> {
        self.resolved_factor
    }

    /// Resolved container bounds (origin plus scaled size)
    pub fn container_bounds(&self) -> Bounds {
        self.bounds
    }

    /// Cached anchor-resolved bounds
    pub fn resolved_bounds(&self, id: ComponentId) -> Option<Bounds> {
        self.nodes.get(&id).and_then(|n| n.resolved)
    }

    /// Cached bounds as painted: resolved position plus any drag displacement
    pub fn bounds(&self, id: ComponentId) -> Option<Bounds> {
        self.nodes
            .get(&id)
            .and_then(|n| n.resolved.map(|b| b.translate(n.displacement)))
    }

    /// Offset where a component is painted without touching its constraint
    pub fn displace(&mut self, id: ComponentId, delta: Point) -> Result<(), LayoutError> {
        self.node_mut(id)?.displacement = delta;
        Ok(())
    }

    pub fn clear_displacement(&mut self, id: ComponentId) -> Result<(), LayoutError> {
        self.displace(id, Point::default())
    }

    pub fn displacement(&self, id: ComponentId) -> Option<Point> {
        self.nodes.get(&id).map(|n| n.displacement)
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node, LayoutError> {
        self.nodes
            .get_mut(&id)
            .ok_or(LayoutError::UnknownComponent { id })
    }

    fn require_constraint(&self, id: ComponentId) -> Result<Constraint, LayoutError> {
        let node = self
            .nodes
            .get(&id)
            .ok_or(LayoutError::UnknownComponent { id })?;
        node.constraint
            .ok_or_else(|| LayoutError::invalid_grid(format!("component {} has no constraint", id)))
    }

    fn check_constraint(
        &self,
        subject: Option<ComponentId>,
        constraint: &Constraint,
    ) -> Result<(), LayoutError> {
        constraint.validate()?;
        for (axis, rule) in [
            (Axis::Horizontal, &constraint.x),
            (Axis::Vertical, &constraint.y),
        ] {
            if let Reference::Component(reference) = rule.reference {
                if Some(reference) == subject {
                    return Err(LayoutError::circular(axis, vec![reference, reference]));
                }
                if !self.contains(reference) {
                    return Err(LayoutError::unknown(reference));
                }
            }
        }
        Ok(())
    }
}

impl Scalable for LayoutContainer {
    fn on_scale_changed(&mut self, policy: &ScalePolicy) -> Result<(), LayoutError> {
        self.resolve(policy)
    }
}

impl fmt::Display for LayoutContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "container {}", self.bounds)?;
        for (id, node) in &self.nodes {
            match node.resolved {
                Some(bounds) => writeln!(f, "{} {}", id, bounds.translate(node.displacement))?,
                None => writeln!(f, "{} unresolved", id)?,
            }
        }
        Ok(())
    }
}

/// Recursive on-demand resolution state for one pass
struct Resolver<'a> {
    nodes: &'a IndexMap<ComponentId, Node>,
    container: Size,
    factor: f64,
    resolved: HashMap<(ComponentId, Axis), Extent>,
    in_progress: Vec<ComponentId>,
}

impl<'a> Resolver<'a> {
    fn new(nodes: &'a IndexMap<ComponentId, Node>, container: Size, factor: f64) -> Self {
        Self {
            nodes,
            container,
            factor,
            resolved: HashMap::with_capacity(nodes.len() * 2),
            in_progress: Vec::new(),
        }
    }

    fn resolve(&mut self, id: ComponentId, axis: Axis) -> Result<Extent, LayoutError> {
        if let Some(extent) = self.resolved.get(&(id, axis)) {
            return Ok(*extent);
        }
        if let Some(pos) = self.in_progress.iter().position(|p| *p == id) {
            let mut cycle = self.in_progress[pos..].to_vec();
            cycle.push(id);
            return Err(LayoutError::circular(axis, cycle));
        }

        let node = self
            .nodes
            .get(&id)
            .ok_or(LayoutError::UnknownComponent { id })?;
        let length = node.declared.along(axis) * self.factor;

        let extent = match &node.constraint {
            None => Extent::new(0.0, length),
            Some(constraint) => {
                let rule = *constraint.axis(axis);
                self.in_progress.push(id);
                let reference = self.reference_extent(rule.reference, axis);
                self.in_progress.pop();
                let reference = reference?;

                let target = reference.start
                    + rule.reference_side.fraction() * reference.length
                    + rule.offset * self.factor;
                Extent::new(target - rule.side.fraction() * length, length)
            }
        };

        self.resolved.insert((id, axis), extent);
        Ok(extent)
    }

    fn reference_extent(
        &mut self,
        reference: Reference,
        axis: Axis,
    ) -> Result<Extent, LayoutError> {
        match reference {
            Reference::Container => Ok(Extent::new(0.0, self.container.along(axis))),
            Reference::Component(id) => self.resolve(id, axis),
        }
    }
}
