//! Entity-Schlüssel, Layer und Typ-Tags des Szenengraphen.

use serde::{Deserialize, Serialize};

/// Eine der beiden parallelen Topologien mit eigenem Szenen-Wald.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layer {
    /// Racks, Bases, Geräte und Verkabelung
    #[default]
    Physical,
    /// VRFs, L2-Segmente und logische Interfaces
    Logical,
}

impl Layer {
    /// Beide Layer in fester Reihenfolge.
    pub const ALL: [Layer; 2] = [Layer::Physical, Layer::Logical];
}

/// Geschlossene Menge aller Entity-Typen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Base,
    Device,
    Vrf,
    L2Segment,
    Link,
    L2Link,
    Interface,
    SviInterface,
    P2PInterface,
    Text,
    Symbol,
    Line,
}

impl EntityKind {
    /// Alle Kanten-Typen, deren Geometrie aus zwei Endpunkten abgeleitet wird.
    pub const EDGES: [EntityKind; 5] = [
        EntityKind::Link,
        EntityKind::L2Link,
        EntityKind::Interface,
        EntityKind::SviInterface,
        EntityKind::P2PInterface,
    ];

    /// Gibt `true` zurück für Link, L2Link und alle Interface-Typen.
    pub fn is_edge(self) -> bool {
        Self::EDGES.contains(&self)
    }

    /// Gibt `true` zurück, wenn die Entity genau einer Base gehört.
    pub fn is_owned(self) -> bool {
        matches!(
            self,
            EntityKind::Device
                | EntityKind::Vrf
                | EntityKind::L2Segment
                | EntityKind::Text
                | EntityKind::Symbol
        )
    }

    /// Gibt `true` zurück, wenn die Entity als Kanten-Endpunkt dienen kann.
    pub fn is_endpoint(self) -> bool {
        matches!(
            self,
            EntityKind::Device | EntityKind::Vrf | EntityKind::L2Segment
        )
    }

    /// Entities mit Namens-Label über der Geometrie.
    pub fn has_name_label(self) -> bool {
        self.is_endpoint()
    }

    /// Endpunkt-Typen einer Kante (Quelle, Ziel).
    pub fn endpoint_kinds(self) -> Option<(EntityKind, EntityKind)> {
        match self {
            EntityKind::Link => Some((EntityKind::Device, EntityKind::Device)),
            EntityKind::L2Link => Some((EntityKind::L2Segment, EntityKind::L2Segment)),
            EntityKind::Interface | EntityKind::SviInterface => {
                Some((EntityKind::Vrf, EntityKind::L2Segment))
            }
            EntityKind::P2PInterface => Some((EntityKind::Vrf, EntityKind::Vrf)),
            _ => None,
        }
    }

    /// Prüft, ob der Typ in dem angegebenen Layer existieren darf.
    pub fn allowed_in(self, layer: Layer) -> bool {
        match self {
            EntityKind::Device | EntityKind::Link => layer == Layer::Physical,
            EntityKind::Vrf
            | EntityKind::L2Segment
            | EntityKind::L2Link
            | EntityKind::Interface
            | EntityKind::SviInterface
            | EntityKind::P2PInterface => layer == Layer::Logical,
            EntityKind::Base | EntityKind::Text | EntityKind::Symbol | EntityKind::Line => true,
        }
    }
}

/// Eindeutiger Schlüssel einer Entity innerhalb ihres Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    /// Unveränderlicher Typ-Tag
    pub kind: EntityKind,
    /// Vom Aufrufer vergebene ID
    pub id: u64,
}

impl EntityKey {
    /// Erstellt einen neuen Schlüssel.
    pub const fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }

    /// Schlüssel einer Base.
    pub const fn base(id: u64) -> Self {
        Self::new(EntityKind::Base, id)
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.id)
    }
}
