//! Resolution of anchor constraints inside a layout container

use anchor_grid::layout::{
    Anchor, AxisConstraint, Bounds, Constraint, LayoutContainer, LayoutError, Reference,
    ScalePolicy, Size,
};
use pretty_assertions::assert_eq;

fn chain(container: &mut LayoutContainer, count: usize, gap: f64) -> Vec<anchor_grid::layout::ComponentId> {
    let mut ids = Vec::new();
    let mut previous = Reference::Container;
    for i in 0..count {
        let x = if i == 0 {
            AxisConstraint::new(Anchor::West, previous, Anchor::West, gap)
        } else {
            AxisConstraint::new(Anchor::West, previous, Anchor::East, gap)
        };
        let y = AxisConstraint::new(Anchor::VerticalCenter, Reference::Container, Anchor::VerticalCenter, 0.0);
        let id = container
            .add(Size::new(20.0, 10.0), Constraint::new(x, y))
            .unwrap();
        previous = Reference::Component(id);
        ids.push(id);
    }
    ids
}

#[test]
fn test_chain_resolves_left_to_right() {
    let mut container = LayoutContainer::new(Size::new(200.0, 40.0));
    let ids = chain(&mut container, 3, 5.0);
    container.resolve(&ScalePolicy::default()).unwrap();

    let xs: Vec<f64> = ids
        .iter()
        .map(|id| container.bounds(*id).unwrap().x)
        .collect();
    assert_eq!(xs, vec![5.0, 30.0, 55.0]);
    assert_eq!(container.bounds(ids[1]).unwrap().y, 15.0);
}

#[test]
fn test_resolution_is_idempotent() {
    let mut container = LayoutContainer::new(Size::new(200.0, 40.0));
    let ids = chain(&mut container, 4, 3.0);
    let policy = ScalePolicy::with_factor(1.5).unwrap();

    container.resolve(&policy).unwrap();
    let first: Vec<Bounds> = ids.iter().map(|id| container.bounds(*id).unwrap()).collect();
    container.resolve(&policy).unwrap();
    let second: Vec<Bounds> = ids.iter().map(|id| container.bounds(*id).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_update_reference_moves_dependents() {
    let mut container = LayoutContainer::new(Size::new(200.0, 40.0));
    let ids = chain(&mut container, 3, 5.0);
    // drop the middle link: the last component follows the first
    container
        .update_reference(ids[2], Reference::Component(ids[0]), Reference::Container)
        .unwrap();
    container.resolve(&ScalePolicy::default()).unwrap();
    assert_eq!(container.bounds(ids[2]).unwrap().x, 30.0);
    assert_eq!(container.dependents(ids[0]), vec![ids[1], ids[2]]);
}

#[test]
fn test_cycle_is_reported_and_cache_kept() {
    let mut container = LayoutContainer::new(Size::new(100.0, 100.0));
    let ids = chain(&mut container, 2, 0.0);
    container.resolve(&ScalePolicy::default()).unwrap();
    let before = container.bounds(ids[1]);

    container
        .update_reference(ids[0], Reference::Component(ids[1]), Reference::Container)
        .unwrap();
    let err = container.resolve(&ScalePolicy::default()).unwrap_err();
    assert!(matches!(err, LayoutError::CircularConstraint { .. }));
    assert_eq!(container.bounds(ids[1]), before);
}

#[test]
fn test_anchor_on_wrong_axis_rejected() {
    let mut container = LayoutContainer::new(Size::new(100.0, 100.0));
    let bad = Constraint::to(
        Reference::Container,
        (Anchor::North, Anchor::West, 0.0),
        (Anchor::North, Anchor::North, 0.0),
    );
    let err = container.add(Size::new(1.0, 1.0), bad).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidAnchor { .. }));
    assert!(container.is_empty());
}

#[test]
fn test_removed_reference_fails_next_resolve() {
    let mut container = LayoutContainer::new(Size::new(100.0, 100.0));
    let ids = chain(&mut container, 2, 0.0);
    container.remove(ids[0]).unwrap();
    assert!(matches!(
        container.resolve(&ScalePolicy::default()),
        Err(LayoutError::UnknownComponent { .. })
    ));
}

#[test]
fn test_centered_on_component() {
    let mut container = LayoutContainer::new(Size::new(100.0, 100.0));
    let frame = container
        .add(
            Size::new(40.0, 40.0),
            Constraint::to(
                Reference::Container,
                (Anchor::East, Anchor::East, 0.0),
                (Anchor::South, Anchor::South, 0.0),
            ),
        )
        .unwrap();
    let dot = container
        .add(Size::new(4.0, 2.0), Constraint::centered_on(frame))
        .unwrap();
    container.resolve(&ScalePolicy::default()).unwrap();
    assert_eq!(container.bounds(dot), Some(Bounds::new(78.0, 79.0, 4.0, 2.0)));
}
