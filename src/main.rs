//! netdiagram3d: headless Command-Runner.
//!
//! Liest SceneCommands als JSON-Zeilen aus einer Datei (oder stdin mit `-`)
//! und protokolliert das Ergebnis. Ohne Argument läuft ein kleines
//! Beispiel-Diagramm mit zwei Geräten und einem orthogonalen Link.
//! Ein optionales zweites Argument nennt eine TTF/OTF-Datei für Texte.

use std::io::BufRead;

use anyhow::Context;
use glam::Vec3;
use netdiagram3d::{
    Axis, BaseRecord, DeviceRecord, EdgeRecord, EntityKey, EntityKind, Layer, Placement, Scene,
    SceneCommand, SceneController, SceneSettings,
};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("netdiagram3d v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte)
    let settings = SceneSettings::load_from_file(&SceneSettings::config_path());
    let mut controller = SceneController::new(Scene::new(settings));
    if let Some(font) = std::env::args().nth(2) {
        load_font(controller.scene_mut(), &font);
    }

    match std::env::args().nth(1) {
        Some(path) => run_script(&mut controller, &path)?,
        None => run_demo(&mut controller),
    }

    report(controller.scene());
    Ok(())
}

/// Lädt eine Schrift über den Ressourcen-Pfad der Szene.
fn load_font(scene: &mut Scene, path: &str) {
    let handle = scene.load_font(path);
    handle.resolve(std::fs::read(path).map_err(|e| e.to_string()));
    let outcome = scene.poll_resources();
    if !outcome.failed.is_empty() {
        log::warn!("Schrift {} nicht geladen, Platzhalter bleibt", path);
    }
}

/// Führt eine JSON-Lines-Datei mit Commands aus.
fn run_script(controller: &mut SceneController, path: &str) -> anyhow::Result<()> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Command-Datei nicht lesbar: {}", path))?;
        Box::new(std::io::BufReader::new(file))
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let applied = controller
            .handle_json(line)
            .with_context(|| format!("Zeile {}: ungültiger Command", number + 1))?;
        if !applied {
            log::warn!("Zeile {}: Command ohne Wirkung", number + 1);
        }
    }
    Ok(())
}

fn run_demo(controller: &mut SceneController) {
    let commands = [
        SceneCommand::AddBase {
            layer: Layer::Physical,
            id: 1,
            record: BaseRecord {
                name: "b1".to_string(),
                ..BaseRecord::default()
            },
        },
        SceneCommand::AddDevice {
            id: 10,
            record: DeviceRecord {
                name: "d1".to_string(),
                base: 1,
                placement: Placement::at(Vec3::ZERO),
                ..DeviceRecord::default()
            },
            align: false,
        },
        SceneCommand::AddDevice {
            id: 11,
            record: DeviceRecord {
                name: "d2".to_string(),
                base: 1,
                placement: Placement::at(Vec3::new(2.0, 0.0, 0.0)),
                ..DeviceRecord::default()
            },
            align: false,
        },
        SceneCommand::AddEdge {
            layer: Layer::Physical,
            kind: EntityKind::Link,
            id: 20,
            record: EdgeRecord::between(10, 11).orthogonal(&[Axis::X]),
        },
        SceneCommand::Move {
            layer: Layer::Physical,
            key: EntityKey::new(EntityKind::Device, 11),
            position: Vec3::new(2.0, 0.0, 2.0),
            base: None,
            align: false,
        },
    ];
    for command in commands {
        controller.handle_command(command);
    }
}

fn report(scene: &Scene) {
    for layer in Layer::ALL {
        let graph = scene.graph(layer);
        log::info!("{:?}: {} Entities", layer, graph.len());
        for node in graph.iter().filter(|n| n.key.kind.is_edge()) {
            let Some(route) = &node.render.route else {
                continue;
            };
            log::info!(
                "{}: {} Segmente, Länge {:.2}, offen: {}",
                node.key,
                route.segments.len(),
                route.length(),
                route.is_empty()
            );
            for segment in &route.segments {
                log::info!("  {} -> {}", segment.start, segment.end);
            }
        }
    }
    match scene.dangling_edges(Layer::Physical).len() + scene.dangling_edges(Layer::Logical).len() {
        0 => {}
        n => log::warn!("{} Kanten ohne Endpunkt", n),
    }
}
