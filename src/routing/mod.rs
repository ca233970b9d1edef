//! Routing von Kanten zwischen zwei Endpunkten.
//!
//! Zustandslos: gleiche Eingaben ergeben den gleichen Pfad. Die Szene
//! berechnet P1/P2 aus den Weltpositionen der Endpunkte plus Kantenhöhe.

mod meshes;
mod path;

pub use meshes::{joint_mesh, line_group, route_groups, segment_mesh};
pub use path::{route_free, route_orthogonal, Route, RouteSegment};

use glam::Vec3;

use crate::core::{EdgeRecord, RouteStyle};
use crate::shared::RoutingOptions;

/// Pfad einer Kante gemäß Routing-Modus.
pub fn route_edge(record: &EdgeRecord, p1: Vec3, p2: Vec3, options: &RoutingOptions) -> Route {
    match record.routing {
        RouteStyle::Free => route_free(p1, p2, &record.linedata.points),
        RouteStyle::Orthogonal => {
            route_orthogonal(p1, p2, &record.order, options.catch_up_unlisted_axes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Axis;

    #[test]
    fn edge_mode_selects_router() {
        let mut record = EdgeRecord::between(1, 2);
        record.linedata.points = vec![Vec3::new(0.0, 1.0, 0.0)];
        let options = RoutingOptions::default();
        let free = route_edge(&record, Vec3::ZERO, Vec3::X, &options);
        assert_eq!(free.segments.len(), 2);

        let record = record.orthogonal(&[Axis::X]);
        let ortho = route_edge(&record, Vec3::ZERO, Vec3::X, &options);
        assert_eq!(ortho.segments.len(), 1);
        assert!(ortho.joints.is_empty());
    }
}
