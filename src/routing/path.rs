//! Pfadberechnung zwischen zwei Endpunkten.

use glam::Vec3;

use crate::core::Axis;

/// Gerades Teilstück eines Pfads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl RouteSegment {
    /// Richtung vom Start zum Ende (nicht normiert).
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    /// Länge des Segments.
    pub fn length(&self) -> f32 {
        self.direction().length()
    }
}

/// Ergebnis des Routings: Segmente in Reihenfolge und Knickpunkte.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub segments: Vec<RouteSegment>,
    pub joints: Vec<Vec3>,
}

impl Route {
    /// Leerer Pfad (z.B. bei fehlendem Endpunkt).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gibt `true` zurück, wenn der Pfad kein Segment enthält.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Gesamtlänge aller Segmente.
    pub fn length(&self) -> f32 {
        self.segments.iter().map(RouteSegment::length).sum()
    }

    /// Endpunkt des letzten Segments.
    pub fn end(&self) -> Option<Vec3> {
        self.segments.last().map(|s| s.end)
    }

    fn push_segment(&mut self, start: Vec3, end: Vec3) {
        self.segments.push(RouteSegment { start, end });
    }

    /// Segment anhängen; schließt es an ein vorheriges an, wird der Knick
    /// zum Joint.
    fn push_bend(&mut self, start: Vec3, end: Vec3) {
        if !self.segments.is_empty() {
            self.joints.push(start);
        }
        self.push_segment(start, end);
    }
}

/// Freies Routing: Polylinie P1 → Joints → P2.
///
/// N Joints ergeben N+1 Segmente.
pub fn route_free(p1: Vec3, p2: Vec3, joints: &[Vec3]) -> Route {
    let mut route = Route::empty();
    let mut current = p1;
    for point in joints {
        route.push_segment(current, *point);
        route.joints.push(*point);
        current = *point;
    }
    route.push_segment(current, p2);
    route
}

/// Orthogonales Routing entlang der Achsen in `order`.
///
/// Achsen, in denen der aktuelle Punkt bereits mit P2 übereinstimmt, werden
/// übersprungen. Joints entstehen nur an Knicken zwischen zwei Segmenten.
/// Mit `catch_up` wird ein abschließendes Segment zu P2 gezogen, falls nicht
/// gelistete Achsen noch abweichen; ohne endet der Pfad nach der letzten
/// gelisteten Achse. Liefern die gelisteten Achsen kein Segment, obwohl
/// P1 ≠ P2, verbindet ein einzelnes Segment direkt mit P2.
pub fn route_orthogonal(p1: Vec3, p2: Vec3, order: &[Axis], catch_up: bool) -> Route {
    let mut route = Route::empty();
    let mut current = p1;
    for axis in order {
        let target = axis.component(p2);
        if axis.component(current) == target {
            continue;
        }
        let next = axis.with_component(current, target);
        route.push_bend(current, next);
        current = next;
    }
    if current != p2 && (catch_up || route.is_empty()) {
        route.push_bend(current, p2);
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn free_route_passes_all_joints() {
        let joints = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)];
        let route = route_free(Vec3::ZERO, Vec3::new(2.0, 0.0, 1.0), &joints);
        assert_eq!(route.segments.len(), 3);
        assert_eq!(route.joints, joints.to_vec());
        assert_eq!(route.segments[0].start, Vec3::ZERO);
        assert_eq!(route.end(), Some(Vec3::new(2.0, 0.0, 1.0)));
        assert_relative_eq!(route.length(), 3.0);
    }

    #[test]
    fn free_route_without_joints_is_straight() {
        let route = route_free(Vec3::ZERO, Vec3::ONE, &[]);
        assert_eq!(route.segments.len(), 1);
        assert!(route.joints.is_empty());
    }

    #[test]
    fn orthogonal_route_bends_per_axis() {
        let p2 = Vec3::new(2.0, 1.0, 3.0);
        let route = route_orthogonal(Vec3::ZERO, p2, &[Axis::X, Axis::Y, Axis::Z], true);
        assert_eq!(route.segments.len(), 3);
        assert_eq!(
            route.joints,
            vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.0)]
        );
        for segment in &route.segments {
            let d = segment.direction();
            let nonzero = [d.x, d.y, d.z].iter().filter(|c| **c != 0.0).count();
            assert_eq!(nonzero, 1, "Segment {segment:?} nicht achsparallel");
        }
        assert_eq!(route.end(), Some(p2));
    }

    #[test]
    fn aligned_axes_are_skipped() {
        let route = route_orthogonal(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 2.0),
            &[Axis::X, Axis::Y, Axis::Z],
            true,
        );
        assert_eq!(route.segments.len(), 1);
        assert!(route.joints.is_empty());
    }

    #[test]
    fn unlisted_axis_gets_catch_up_segment() {
        let p1 = Vec3::new(0.0, 0.25, 0.0);
        let p2 = Vec3::new(2.0, 0.25, 2.0);
        let route = route_orthogonal(p1, p2, &[Axis::X, Axis::Y], true);
        assert_eq!(route.segments.len(), 2);
        assert_eq!(route.joints, vec![Vec3::new(2.0, 0.25, 0.0)]);
        assert_relative_eq!(route.segments[0].length(), 2.0);
        assert_eq!(route.end(), Some(p2));

        let strict = route_orthogonal(p1, p2, &[Axis::X, Axis::Y], false);
        assert_eq!(strict.segments.len(), 1);
        assert!(strict.joints.is_empty());
        assert_eq!(strict.end(), Some(Vec3::new(2.0, 0.25, 0.0)));
    }

    #[test]
    fn routing_is_idempotent() {
        let p1 = Vec3::new(-1.0, 0.5, 3.0);
        let p2 = Vec3::new(4.0, 0.5, -2.0);
        let order = [Axis::Z, Axis::X];
        assert_eq!(
            route_orthogonal(p1, p2, &order, true),
            route_orthogonal(p1, p2, &order, true)
        );
    }

    #[test]
    fn unmatched_order_still_connects_endpoints() {
        let p2 = Vec3::new(0.0, 0.0, 3.0);
        let route = route_orthogonal(Vec3::ZERO, p2, &[Axis::X], false);
        assert_eq!(route.segments.len(), 1);
        assert!(route.joints.is_empty());
        assert_eq!(route.end(), Some(p2));
    }

    #[test]
    fn identical_endpoints_give_no_orthogonal_segment() {
        let route = route_orthogonal(Vec3::ONE, Vec3::ONE, &[Axis::X], true);
        assert!(route.is_empty());
    }
}
