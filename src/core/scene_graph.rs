//! Szenen-Wald eines Layers mit Besitz- und Inzidenz-Index.
//!
//! Kinder einer Base liegen in deren Oberflächen-Frame: Ursprung ist der
//! lokale Punkt `(0, sy, 0)` der Base. Eine Entity bei `(0,0,0)` steht damit
//! auf der Bodenplatte, auch wenn sich deren Höhe ändert.

use std::collections::HashMap;

use glam::{EulerRot, Mat4, Quat, Vec3};
use indexmap::{IndexMap, IndexSet};

use super::render_parts::RenderParts;
use super::{EntityKey, EntityKind, EntityRecord, Layer, SpatialIndex, SpatialMatch};

/// Euler-Reihenfolge der Rotation eines Entity-Typs.
pub fn euler_order(kind: EntityKind) -> EulerRot {
    match kind {
        EntityKind::Text => EulerRot::YXZ,
        _ => EulerRot::XYZ,
    }
}

/// Quaternion aus einem Rotationsvektor (Radiant je Achse).
pub fn rotation_quat(kind: EntityKind, rotation: Vec3) -> Quat {
    match euler_order(kind) {
        EulerRot::YXZ => Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z),
        order => Quat::from_euler(order, rotation.x, rotation.y, rotation.z),
    }
}

/// Rotationsvektor (Radiant je Achse) aus einem Quaternion.
pub fn rotation_vector(kind: EntityKind, quat: Quat) -> Vec3 {
    match euler_order(kind) {
        EulerRot::YXZ => {
            let (y, x, z) = quat.to_euler(EulerRot::YXZ);
            Vec3::new(x, y, z)
        }
        order => {
            let (x, y, z) = quat.to_euler(order);
            Vec3::new(x, y, z)
        }
    }
}

/// Ein Knoten des Szenengraphen.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Unveränderlicher Schlüssel
    pub key: EntityKey,
    /// Attribut-Record (Quelle der Wahrheit für Transform und Styling)
    pub record: EntityRecord,
    /// Abgeleitete Geometrie
    pub render: RenderParts,
}

impl SceneNode {
    /// Erstellt einen Knoten ohne Geometrie.
    pub fn new(key: EntityKey, record: EntityRecord) -> Self {
        Self {
            key,
            record,
            render: RenderParts::default(),
        }
    }

    /// ID der besitzenden Base.
    pub fn parent(&self) -> Option<u64> {
        self.record.base_id()
    }

    /// Lokale Matrix relativ zum Eltern-Frame.
    pub fn local_matrix(&self) -> Mat4 {
        match self.record.placement() {
            Some(p) => Mat4::from_rotation_translation(
                rotation_quat(self.key.kind, p.rotation),
                p.position,
            ),
            None => Mat4::IDENTITY,
        }
    }
}

/// Alle Knoten eines Layers.
#[derive(Debug, Clone)]
pub struct LayerGraph {
    layer: Layer,
    nodes: IndexMap<EntityKey, SceneNode>,
    /// Base-ID → besessene Entities
    owned: HashMap<u64, IndexSet<EntityKey>>,
    /// Endpunkt → Kanten, die ihn referenzieren
    incidence: HashMap<EntityKey, IndexSet<EntityKey>>,
    spatial_index: SpatialIndex,
    spatial_dirty: bool,
}

impl LayerGraph {
    /// Erstellt einen leeren Layer.
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            nodes: IndexMap::new(),
            owned: HashMap::new(),
            incidence: HashMap::new(),
            spatial_index: SpatialIndex::empty(),
            spatial_dirty: false,
        }
    }

    /// Layer dieses Graphen.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Anzahl der Knoten.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt `true` zurück, wenn der Layer leer ist.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Prüft, ob ein Knoten existiert.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Sucht einen Knoten in O(1).
    pub fn find(&self, key: EntityKey) -> Option<&SceneNode> {
        self.nodes.get(&key)
    }

    /// Veränderbarer Zugriff; invalidiert den Spatial-Index.
    pub fn find_mut(&mut self, key: EntityKey) -> Option<&mut SceneNode> {
        let node = self.nodes.get_mut(&key)?;
        self.spatial_dirty = true;
        Some(node)
    }

    /// Ersetzt die abgeleitete Geometrie, ohne den Spatial-Index zu invalidieren.
    pub fn set_render(&mut self, key: EntityKey, render: RenderParts) -> bool {
        match self.nodes.get_mut(&key) {
            Some(node) => {
                node.render = render;
                true
            }
            None => false,
        }
    }

    /// Veränderbare Geometrie eines Knotens (Labels, Sichtbarkeit).
    pub fn render_mut(&mut self, key: EntityKey) -> Option<&mut RenderParts> {
        self.nodes.get_mut(&key).map(|node| &mut node.render)
    }

    /// Iterator über alle Knoten in Einfüge-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Alle Schlüssel in Einfüge-Reihenfolge.
    pub fn keys(&self) -> Vec<EntityKey> {
        self.nodes.keys().copied().collect()
    }

    /// Fügt einen Knoten ein.
    ///
    /// Lehnt ab (mit `false`), wenn der Typ nicht in diesen Layer gehört, der
    /// Record nicht zum Typ passt, der Schlüssel schon existiert oder die
    /// besitzende Base fehlt.
    pub fn insert(&mut self, node: SceneNode) -> bool {
        let key = node.key;
        if !key.kind.allowed_in(self.layer) || !node.record.matches_kind(key.kind) {
            log::warn!("{} gehört nicht in Layer {:?}", key, self.layer);
            return false;
        }
        if self.nodes.contains_key(&key) {
            log::warn!("{} existiert bereits in Layer {:?}", key, self.layer);
            return false;
        }
        if let Some(base) = node.parent() {
            if !self.nodes.contains_key(&EntityKey::base(base)) {
                log::warn!("{}: Base {} nicht gefunden", key, base);
                return false;
            }
            self.owned.entry(base).or_default().insert(key);
        }
        if let Some(ends) = self.resolve_ends(key, &node.record) {
            for end in ends {
                self.incidence.entry(end).or_default().insert(key);
            }
        }
        self.nodes.insert(key, node);
        self.spatial_dirty = true;
        true
    }

    /// Entfernt einen Knoten inklusive seiner Index-Einträge.
    ///
    /// Besessene Kinder und anhängende Kanten bleiben unberührt.
    pub fn remove(&mut self, key: EntityKey) -> Option<SceneNode> {
        let node = self.nodes.shift_remove(&key)?;
        if let Some(base) = node.parent() {
            if let Some(children) = self.owned.get_mut(&base) {
                children.shift_remove(&key);
            }
        }
        if let Some(ends) = self.resolve_ends(key, &node.record) {
            for end in ends {
                self.unlink_incidence(end, key);
            }
        }
        if key.kind == EntityKind::Base {
            self.owned.remove(&key.id);
        }
        self.spatial_dirty = true;
        Some(node)
    }

    fn unlink_incidence(&mut self, end: EntityKey, edge: EntityKey) {
        if let Some(edges) = self.incidence.get_mut(&end) {
            edges.shift_remove(&edge);
            if edges.is_empty() {
                self.incidence.remove(&end);
            }
        }
    }

    fn resolve_ends(&self, key: EntityKey, record: &EntityRecord) -> Option<[EntityKey; 2]> {
        let (a_kind, b_kind) = key.kind.endpoint_kinds()?;
        let edge = record.as_edge()?;
        Some([
            EntityKey::new(a_kind, edge.ends[0]),
            EntityKey::new(b_kind, edge.ends[1]),
        ])
    }

    /// Endpunkt-Schlüssel einer Kante (Quelle, Ziel).
    pub fn edge_endpoints(&self, edge: EntityKey) -> Option<[EntityKey; 2]> {
        let node = self.find(edge)?;
        self.resolve_ends(edge, &node.record)
    }

    /// Setzt neue Endpunkte einer Kante und pflegt den Inzidenz-Index.
    pub fn set_edge_ends(&mut self, edge: EntityKey, ends: [u64; 2]) -> bool {
        let Some(old) = self.edge_endpoints(edge) else {
            return false;
        };
        for end in old {
            self.unlink_incidence(end, edge);
        }
        let Some(node) = self.nodes.get_mut(&edge) else {
            return false;
        };
        let Some(record) = node.record.as_edge_mut() else {
            return false;
        };
        record.ends = ends;
        if let Some(new) = self.edge_endpoints(edge) {
            for end in new {
                self.incidence.entry(end).or_default().insert(edge);
            }
        }
        true
    }

    /// Kinder einer Base in Einfüge-Reihenfolge.
    pub fn children(&self, base: u64) -> Vec<EntityKey> {
        self.owned
            .get(&base)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Kanten, die die Entity als Endpunkt referenzieren.
    pub fn incident_edges(&self, key: EntityKey) -> Vec<EntityKey> {
        self.incidence
            .get(&key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Kanten, bei denen mindestens ein Endpunkt fehlt.
    pub fn dangling_edges(&self) -> Vec<EntityKey> {
        self.nodes
            .keys()
            .filter(|key| key.kind.is_edge())
            .filter(|key| {
                self.edge_endpoints(**key)
                    .map(|ends| ends.iter().any(|end| !self.contains(*end)))
                    .unwrap_or(false)
            })
            .copied()
            .collect()
    }

    /// Oberflächen-Frame einer Base in Weltkoordinaten.
    pub fn surface_frame(&self, base: u64) -> Option<Mat4> {
        let node = self.find(EntityKey::base(base))?;
        let height = node.record.size().map(|s| s.y).unwrap_or(0.0);
        Some(node.local_matrix() * Mat4::from_translation(Vec3::new(0.0, height, 0.0)))
    }

    /// Welt-Matrix einer Entity. `None`, wenn sie oder ihre Base fehlt.
    pub fn world_matrix(&self, key: EntityKey) -> Option<Mat4> {
        let node = self.find(key)?;
        match node.parent() {
            Some(base) => Some(self.surface_frame(base)? * node.local_matrix()),
            None => Some(node.local_matrix()),
        }
    }

    /// Weltposition des Entity-Ursprungs.
    pub fn world_position(&self, key: EntityKey) -> Option<Vec3> {
        self.world_matrix(key)
            .map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Hängt eine Entity an eine andere Base.
    ///
    /// Ohne `world` bleibt die Weltlage (Position und Rotation) erhalten.
    /// Mit `world` wird diese Weltposition in den Frame der neuen Base
    /// umgerechnet; die lokale Rotation bleibt dann unverändert.
    pub fn reparent(&mut self, key: EntityKey, new_base: u64, world: Option<Vec3>) -> bool {
        if !key.kind.is_owned() {
            return false;
        }
        let Some(frame) = self.surface_frame(new_base) else {
            log::debug!("{}: Ziel-Base {} nicht gefunden", key, new_base);
            return false;
        };
        let Some(current_world) = self.world_matrix(key) else {
            return false;
        };
        let inverse = frame.inverse();

        let Some(node) = self.nodes.get_mut(&key) else {
            return false;
        };
        let old_base = node.parent();
        node.record.set_base_id(new_base);
        if let Some(placement) = node.record.placement_mut() {
            match world {
                Some(position) => placement.position = inverse.transform_point3(position),
                None => {
                    let (_, rotation, translation) =
                        (inverse * current_world).to_scale_rotation_translation();
                    placement.position = translation;
                    placement.rotation = rotation_vector(key.kind, rotation);
                }
            }
        }

        if let Some(old) = old_base {
            if let Some(children) = self.owned.get_mut(&old) {
                children.shift_remove(&key);
            }
        }
        self.owned.entry(new_base).or_default().insert(key);
        self.spatial_dirty = true;
        true
    }

    /// Baut den Spatial-Index neu auf, falls Knoten verändert wurden.
    pub fn ensure_spatial_index(&mut self) {
        if !self.spatial_dirty {
            return;
        }
        let points = self
            .nodes
            .keys()
            .filter(|key| key.kind.is_endpoint())
            .filter_map(|key| self.world_position(*key).map(|p| (*key, p)))
            .collect();
        self.spatial_index = SpatialIndex::from_points(points);
        self.spatial_dirty = false;
    }

    /// Nächster Endpunkt (Gerät, VRF, Segment) zu einer Weltposition.
    pub fn nearest_endpoint(&mut self, query: Vec3) -> Option<SpatialMatch> {
        self.ensure_spatial_index();
        self.spatial_index.nearest(query)
    }

    /// Alle Endpunkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn endpoints_within_radius(&mut self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        self.ensure_spatial_index();
        self.spatial_index.within_radius(query, radius)
    }
}
