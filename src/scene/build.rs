//! Neuaufbau der abgeleiteten Geometrie einer Entity aus ihrem Record.

use glam::Vec3;

use super::Scene;
use crate::core::{
    EdgeRecord, EntityKey, EntityKind, EntityRecord, Layer, Material, Mesh, MeshGroup, MeshRole,
    RenderParts,
};
use crate::geometry::{
    background_meshes, device_geometry, floor_meshes, floor_textures, segment_mesh,
    symbol_colors, symbol_geometry, text_mesh, SEGMENT_TEXTURE,
};
use crate::routing::{line_group, route_edge, route_groups, Route};

const FILL_ROLES: [MeshRole; 2] = [MeshRole::Primary, MeshRole::Secondary];

fn non_empty(role: MeshRole, mesh: Mesh, material: Material) -> Option<MeshGroup> {
    (!mesh.is_empty()).then(|| MeshGroup::new(role, mesh, material))
}

impl Scene {
    /// Baut Meshes, Materialien, Pfad und Namens-Label einer Entity neu auf.
    ///
    /// Gibt `false` zurück, wenn die Entity nicht existiert.
    pub(super) fn rebuild(&mut self, layer: Layer, key: EntityKey) -> bool {
        let Some(record) = self.graph(layer).find(key).map(|n| n.record.clone()) else {
            log::debug!("Rebuild: {} in {:?} nicht gefunden", key, layer);
            return false;
        };
        let mut parts = match &record {
            EntityRecord::Base(r) => {
                let meshes = floor_meshes(r);
                let textures = floor_textures(r);
                let colors = [r.color1, r.color2];
                let opacity = r.effective_opacity();
                let mut groups = Vec::with_capacity(2);
                for (i, mesh) in meshes.into_iter().enumerate() {
                    let map = self.texture(&textures[i]);
                    let material = Material::standard(colors[i], Some(map), opacity, r.size.y);
                    groups.extend(non_empty(FILL_ROLES[i], mesh, material));
                }
                RenderParts {
                    groups,
                    ..RenderParts::default()
                }
            }
            EntityRecord::Device(r) | EntityRecord::Vrf(r) => {
                let geometry = device_geometry(r, &self.templates);
                let colors = [r.color1, r.color2];
                self.textured_groups(geometry.meshes, &geometry.textures, colors)
            }
            EntityRecord::L2Segment(r) => {
                let map = self.texture(SEGMENT_TEXTURE);
                let groups = non_empty(MeshRole::Primary, segment_mesh(r), Material::device(r.color1, map))
                    .into_iter()
                    .collect();
                RenderParts {
                    groups,
                    ..RenderParts::default()
                }
            }
            EntityRecord::Symbol(r) => {
                let (meshes, textures) = symbol_geometry(r, &self.templates);
                self.textured_groups(meshes, &textures, symbol_colors(r))
            }
            EntityRecord::Text(r) => {
                let text = text_mesh(self.font.as_ref(), &r.text, r.height, r.align, r.rotation_x);
                let (background, border) = background_meshes(&text, r);
                let groups = [
                    non_empty(
                        MeshRole::Text,
                        text,
                        Material::phong(r.color).with_double_sided(),
                    ),
                    non_empty(MeshRole::Background, background, Material::phong(r.bg_color)),
                    non_empty(MeshRole::Border, border, Material::phong(r.border_color)),
                ]
                .into_iter()
                .flatten()
                .collect();
                RenderParts {
                    groups,
                    ..RenderParts::default()
                }
            }
            EntityRecord::Line(r) => RenderParts {
                groups: vec![line_group(
                    r.start,
                    r.end,
                    r.radius,
                    Material::standard(r.color, None, 1.0, 0.0),
                )],
                ..RenderParts::default()
            },
            EntityRecord::Edge(r) => self.edge_parts(layer, key, r),
        };
        if key.kind.has_name_label() {
            parts.label = self.name_label(layer, key, &record, parts.max_height());
        }
        self.graph_mut(layer).set_render(key, parts)
    }

    /// Baut alle Entities neu, deren Geometrie aus der Schrift entsteht.
    pub(super) fn rebuild_glyphs(&mut self) {
        for layer in Layer::ALL {
            let keys: Vec<EntityKey> = self
                .graph(layer)
                .iter()
                .filter(|n| n.key.kind == EntityKind::Text || n.render.label.is_some())
                .map(|n| n.key)
                .collect();
            log::debug!("{:?}: {} Texte/Labels neu geformt", layer, keys.len());
            for key in keys {
                self.rebuild(layer, key);
            }
        }
    }

    fn textured_groups(
        &mut self,
        meshes: [Mesh; 2],
        textures: &[String; 2],
        colors: [u32; 2],
    ) -> RenderParts {
        let mut groups = Vec::with_capacity(2);
        for (i, mesh) in meshes.into_iter().enumerate() {
            let map = self.texture(&textures[i]);
            groups.extend(non_empty(FILL_ROLES[i], mesh, Material::device(colors[i], map)));
        }
        RenderParts {
            groups,
            ..RenderParts::default()
        }
    }

    /// Pfad und Meshes einer Kante aus den aktuellen Endpunkt-Positionen.
    ///
    /// Fehlt ein Endpunkt, bleibt die Kante leer.
    fn edge_parts(&self, layer: Layer, key: EntityKey, record: &EdgeRecord) -> RenderParts {
        let graph = self.graph(layer);
        let lift = Vec3::new(0.0, record.linedata.height, 0.0);
        let ends = graph
            .edge_endpoints(key)
            .and_then(|[a, b]| Some((graph.world_position(a)?, graph.world_position(b)?)));
        let route = match ends {
            Some((p1, p2)) => route_edge(record, p1 + lift, p2 + lift, &self.settings.routing),
            None => {
                log::debug!("{}: Endpunkt fehlt, Kante bleibt leer", key);
                Route::empty()
            }
        };
        let material = Material::phong(record.linedata.color);
        RenderParts {
            groups: route_groups(&route, record.linedata.weight, &material),
            label: None,
            route: Some(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_devices;
    use super::*;
    use crate::core::{BaseSubtype, MaterialKind, TextRecord};

    #[test]
    fn rebuild_is_idempotent() {
        let mut scene = two_devices();
        let d10 = EntityKey::new(EntityKind::Device, 10);
        let before = scene.graph(Layer::Physical).find(d10).map(|n| n.render.clone());
        assert!(scene.rebuild(Layer::Physical, d10));
        let after = scene.graph(Layer::Physical).find(d10).map(|n| n.render.clone());
        assert_eq!(before, after);
    }

    #[test]
    fn devices_get_two_colored_groups_and_a_label() {
        let scene = two_devices();
        let node = scene
            .graph(Layer::Physical)
            .find(EntityKey::new(EntityKind::Device, 10))
            .expect("Gerät erwartet");
        let primary = node.render.group(MeshRole::Primary).expect("Oberseite erwartet");
        assert_eq!(primary.material.kind, MaterialKind::Device);
        assert!(primary.material.map.is_some());
        assert!(node.render.group(MeshRole::Secondary).is_some());
        assert!(node.render.label.is_some());
    }

    #[test]
    fn surface_only_base_has_no_side_group() {
        let mut scene = Scene::default();
        let record = crate::core::BaseRecord {
            subtype: BaseSubtype::None,
            opacity: Some(0.5),
            ..Default::default()
        };
        assert!(scene.add_base(Layer::Logical, 3, record));
        let node = scene
            .graph(Layer::Logical)
            .find(EntityKey::base(3))
            .expect("Base erwartet");
        let top = node.render.group(MeshRole::Primary).expect("Oberfläche erwartet");
        assert_eq!(top.material.opacity, 0.5);
        assert!(node.render.group(MeshRole::Secondary).is_none());
    }

    #[test]
    fn text_without_background_has_only_glyphs() {
        let mut scene = two_devices();
        let record = TextRecord {
            text: "rack".into(),
            base: 1,
            ..TextRecord::default()
        };
        assert!(scene.add_text(Layer::Physical, 40, record, false));
        let node = scene
            .graph(Layer::Physical)
            .find(EntityKey::new(EntityKind::Text, 40))
            .expect("Text erwartet");
        assert_eq!(node.render.groups.len(), 1);
        assert!(node.render.group(MeshRole::Text).map(|g| g.material.double_sided).unwrap_or(false));
    }
}
