//! Catalogue module - shape templates and block skins
//!
//! The catalogue is loaded once at startup and lent to the engine. Templates
//! are ordered lists of relative offsets; the template at `SQUARE_KIND` is the
//! square, which never rotates. Skins are opaque to the core: it only picks
//! one per spawned object and hands its id to the renderer.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{GridPos, Offset, SkinId, SPAWN_COLUMN, SPAWN_ROW};

/// One piece shape as relative cell offsets.
pub type Template = Vec<Offset>;

/// A visual skin for blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub name: String,
    pub rgb: [u8; 3],
}

impl Skin {
    pub fn new(name: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }
}

/// The nine `pastel1_*` colours of the Pastel1 colour map.
const PASTEL1: [[u8; 3]; 9] = [
    [251, 180, 174],
    [179, 205, 227],
    [204, 235, 197],
    [222, 203, 228],
    [254, 217, 166],
    [255, 255, 204],
    [229, 216, 189],
    [253, 218, 236],
    [242, 242, 242],
];

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    templates: Vec<Template>,
    #[serde(default)]
    skins: Option<Vec<Skin>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    templates: Vec<Template>,
    skins: Vec<Skin>,
}

impl Catalogue {
    /// Build a catalogue, rejecting ones the engine cannot spawn from.
    pub fn new(templates: Vec<Template>, skins: Vec<Skin>) -> Result<Self> {
        ensure!(!templates.is_empty(), "catalogue has no templates");
        for (i, template) in templates.iter().enumerate() {
            ensure!(!template.is_empty(), "template {} is empty", i);
            let unique: HashSet<_> = template.iter().collect();
            ensure!(
                unique.len() == template.len(),
                "template {} repeats an offset",
                i
            );
            ensure!(
                template
                    .iter()
                    .all(|offset| spawn_cell(offset).is_some_and(|pos| pos.in_bounds())),
                "template {} does not fit the field at the spawn anchor",
                i
            );
        }
        ensure!(!skins.is_empty(), "catalogue has no skins");
        Ok(Self { templates, skins })
    }

    /// The classic seven tetrominoes (square first) with the pastel skins.
    pub fn builtin() -> Self {
        let shape = |cells: [(i32, i32); 4]| -> Template {
            cells.iter().map(|&(x, y)| Offset::new(x, y)).collect()
        };
        Self {
            templates: vec![
                shape([(0, 1), (1, 1), (0, 0), (1, 0)]),
                shape([(0, 2), (0, 1), (0, 0), (0, -1)]),
                shape([(-1, 0), (0, 0), (1, 0), (0, 1)]),
                shape([(0, 0), (1, 0), (-1, 1), (0, 1)]),
                shape([(-1, 0), (0, 0), (0, 1), (1, 1)]),
                shape([(0, -1), (0, 0), (0, 1), (1, 1)]),
                shape([(0, -1), (0, 0), (0, 1), (-1, 1)]),
            ],
            skins: Self::pastel_skins(),
        }
    }

    pub fn pastel_skins() -> Vec<Skin> {
        PASTEL1
            .iter()
            .enumerate()
            .map(|(i, &rgb)| Skin::new(format!("pastel1_{}", i), rgb))
            .collect()
    }

    /// Parse a JSON catalogue. `skins` may be omitted for the pastel set.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogueFile =
            serde_json::from_str(json).context("invalid catalogue JSON")?;
        let skins = file.skins.unwrap_or_else(Self::pastel_skins);
        Self::new(file.templates, skins)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalogue {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, kind: usize) -> Option<&Template> {
        self.templates.get(kind)
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn skin(&self, id: SkinId) -> Option<&Skin> {
        self.skins.get(id.0)
    }
}

/// Where `offset` lands when spawned, or `None` if the sum overflows.
fn spawn_cell(offset: &Offset) -> Option<GridPos> {
    Some(GridPos::new(
        offset.x.checked_add(SPAWN_COLUMN)?,
        offset.y.checked_add(SPAWN_ROW)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.templates().len(), 7);
        assert!(catalogue.templates().iter().all(|t| t.len() == 4));
        assert_eq!(catalogue.skins().len(), 9);
        assert_eq!(catalogue.skin(SkinId(0)).unwrap().name, "pastel1_0");

        // Builtin passes the same validation as loaded catalogues.
        let checked = Catalogue::new(
            catalogue.templates().to_vec(),
            catalogue.skins().to_vec(),
        );
        assert!(checked.is_ok());
    }

    #[test]
    fn test_from_json_without_skins() {
        let json = r#"{"templates": [[{"x": 0, "y": 1}, {"x": 1, "y": 1}, {"x": 0, "y": 0}, {"x": 1, "y": 0}]]}"#;
        let catalogue = Catalogue::from_json_str(json).unwrap();
        assert_eq!(catalogue.templates().len(), 1);
        assert_eq!(catalogue.template(0).unwrap()[1], Offset::new(1, 1));
        assert_eq!(catalogue.skins(), Catalogue::pastel_skins().as_slice());
    }

    #[test]
    fn test_from_json_with_skins() {
        let json = r#"{
            "templates": [[{"x": 0, "y": 0}]],
            "skins": [{"name": "red", "rgb": [255, 0, 0]}]
        }"#;
        let catalogue = Catalogue::from_json_str(json).unwrap();
        assert_eq!(catalogue.skins(), &[Skin::new("red", [255, 0, 0])]);
    }

    #[test]
    fn test_rejects_invalid_catalogues() {
        assert!(Catalogue::from_json_str("not json").is_err());
        assert!(Catalogue::from_json_str(r#"{"templates": []}"#).is_err());
        assert!(Catalogue::from_json_str(r#"{"templates": [[]]}"#).is_err());
        assert!(Catalogue::from_json_str(
            r#"{"templates": [[{"x": 0, "y": 0}, {"x": 0, "y": 0}]]}"#
        )
        .is_err());
        assert!(Catalogue::from_json_str(
            r#"{"templates": [[{"x": 0, "y": 0}]], "skins": []}"#
        )
        .is_err());
    }

    #[test]
    fn test_rejects_offsets_outside_the_field() {
        let at = |x, y| vec![vec![Offset::new(x, y)]];
        let skins = Catalogue::pastel_skins;

        assert!(Catalogue::new(at(i32::MAX, 0), skins()).is_err());
        assert!(Catalogue::new(at(0, i32::MAX), skins()).is_err());
        assert!(Catalogue::new(at(-7, 0), skins()).is_err());
        assert!(Catalogue::new(at(6, 0), skins()).is_err());
        assert!(Catalogue::new(at(0, -2), skins()).is_err());
        assert!(Catalogue::new(at(0, 24), skins()).is_err());

        // Field corners are still fine.
        assert!(Catalogue::new(at(-6, -1), skins()).is_ok());
        assert!(Catalogue::new(at(5, 23), skins()).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalogue::load("/nonexistent/figgy/templates.json").unwrap_err();
        assert!(err.to_string().contains("failed to read catalogue"));
    }
}
