//! Spatial-Index (KD-Tree) für schnelle Endpunkt-Abfragen im 3D-Raum.

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};

use super::EntityKey;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Schlüssel der gefundenen Entity
    pub key: EntityKey,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über den Weltpositionen aller Endpunkte eines Layers.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 3>,
    keys: Vec<EntityKey>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            keys: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus (Schlüssel, Weltposition)-Paaren.
    pub fn from_points(mut points: Vec<(EntityKey, Vec3)>) -> Self {
        points.sort_unstable_by_key(|(key, _)| *key);

        let entries: Vec<[f64; 3]> = points
            .iter()
            .map(|(_, p)| [p.x as f64, p.y as f64, p.z as f64])
            .collect();
        let tree: KdTree<f64, 3> = (&entries).into();
        let keys = points.into_iter().map(|(key, _)| key).collect();

        Self { tree, keys }
    }

    /// Gibt die Anzahl indexierter Entities zurück.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Gibt `true` zurück, wenn keine Entities im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Findet die nächste Entity zur gegebenen Weltposition.
    pub fn nearest(&self, query: Vec3) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[
            query.x as f64,
            query.y as f64,
            query.z as f64,
        ]);
        let key = *self.keys.get(result.item as usize)?;

        Some(SpatialMatch {
            key,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Entities innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(
                &[query.x as f64, query.y as f64, query.z as f64],
                (radius * radius) as f64,
            )
            .into_iter()
            .filter_map(|entry| {
                let key = *self.keys.get(entry.item as usize)?;
                Some(SpatialMatch {
                    key,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}
