//! Dekorative Symbole aus der Template-Tabelle.

use super::templates::TemplateTable;
use crate::core::{Mesh, SymbolRecord};

/// Typ-Code der Flagge, der als einziger eine eigene Tuchfarbe hat.
pub const FLAG_TYPE: &str = "F";

/// Meshes und Texturen eines Symbols.
pub fn symbol_geometry(record: &SymbolRecord, templates: &TemplateTable) -> ([Mesh; 2], [String; 2]) {
    let template = templates.symbol.get(&record.symbol_type);
    (template.build(record.size), template.texture.clone())
}

/// Farben der beiden Gruppen: Mast und Tuch.
pub fn symbol_colors(record: &SymbolRecord) -> [u32; 2] {
    let secondary = if record.symbol_type == FLAG_TYPE {
        record.flag_color
    } else {
        record.color
    };
    [record.color, secondary]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flag_has_pole_and_cloth() {
        let record = SymbolRecord::default();
        let ([pole, cloth], textures) = symbol_geometry(&record, &TemplateTable::builtin());
        assert_relative_eq!(pole.bounds().expect("Bounds erwartet").max.y, 1.2);
        assert_relative_eq!(cloth.bounds().expect("Bounds erwartet").max.x, 1.0);
        assert_eq!(textures[0], "basic.png");
        assert_eq!(symbol_colors(&record), [record.color, record.flag_color]);
    }

    #[test]
    fn non_flag_symbols_ignore_flag_color() {
        let record = SymbolRecord {
            symbol_type: "X".into(),
            ..SymbolRecord::default()
        };
        let ([cross, second], _) = symbol_geometry(&record, &TemplateTable::builtin());
        assert_eq!(cross.faces.len(), 24);
        assert!(second.is_empty());
        assert_eq!(symbol_colors(&record), [record.color; 2]);
    }

    #[test]
    fn unknown_symbol_is_small_box() {
        let record = SymbolRecord {
            symbol_type: "?".into(),
            ..SymbolRecord::default()
        };
        let ([mesh, _], _) = symbol_geometry(&record, &TemplateTable::builtin());
        let bounds = mesh.bounds().expect("Bounds erwartet");
        assert_relative_eq!(bounds.max.y, 0.5);
        assert_relative_eq!(bounds.max.x, 0.25);
    }
}
