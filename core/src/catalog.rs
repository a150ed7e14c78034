use serde::{Deserialize, Serialize};

use crate::arc::CircleParams;
use crate::builder::{BuildError, PuzzleBuilder};
use crate::color::Color;
use crate::puzzle::PuzzleData;

include!(concat!(env!("OUT_DIR"), "/puzzle_catalog.rs"));

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse puzzle catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("puzzle catalog has no entries")]
    Empty,
    #[error("default puzzle '{0}' is not in the catalog")]
    UnknownDefault(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    pub color: Color,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationDefinition {
    pub color: Color,
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDefinition {
    pub color: Color,
    pub node: String,
    pub radius: f32,
    #[serde(default)]
    pub plus_side: bool,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub reflected: bool,
}

impl ArcDefinition {
    pub fn params(&self) -> CircleParams {
        CircleParams {
            radius: self.radius,
            plus_side: self.plus_side,
            reversed: self.reversed,
            reflected: self.reflected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboDefinition {
    pub color: Color,
    pub parts: Vec<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub name: String,
    pub slug: String,
    pub nodes: Vec<NodeDefinition>,
    #[serde(default)]
    pub permutations: Vec<PermutationDefinition>,
    #[serde(default)]
    pub combos: Vec<ComboDefinition>,
    #[serde(default)]
    pub arcs: Vec<ArcDefinition>,
}

impl PuzzleDefinition {
    pub fn build(&self) -> Result<PuzzleData, BuildError> {
        let mut builder = PuzzleBuilder::new(&self.name);
        for node in &self.nodes {
            builder.node(&node.name, node.color, node.x, node.y)?;
        }
        for permutation in &self.permutations {
            builder.named_permutation(permutation.color, &permutation.cycles)?;
        }
        for combo in &self.combos {
            builder.combo(combo.color, &combo.parts)?;
        }
        for arc in &self.arcs {
            builder.arc(arc.color, &arc.node, arc.params())?;
        }
        builder.recenter().normalize();
        Ok(builder.finish())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    default_slug: Option<String>,
    puzzles: Vec<PuzzleDefinition>,
}

/// Ordered list of puzzle definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_index: usize,
    puzzles: Vec<PuzzleDefinition>,
}

impl Catalog {
    /// The catalog embedded at build time.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(PUZZLE_CATALOG_TOML)
    }

    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        if file.puzzles.is_empty() {
            return Err(CatalogError::Empty);
        }
        let default_index = match file.default_slug.as_deref() {
            Some(slug) => file
                .puzzles
                .iter()
                .position(|entry| entry.slug == slug)
                .ok_or_else(|| CatalogError::UnknownDefault(slug.to_string()))?,
            None => 0,
        };
        Ok(Self {
            default_index,
            puzzles: file.puzzles,
        })
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    pub fn get(&self, index: usize) -> Option<&PuzzleDefinition> {
        self.puzzles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuzzleDefinition> {
        self.puzzles.iter()
    }

    pub fn index_by_slug(&self, slug: &str) -> Option<usize> {
        let trimmed = slug.trim();
        self.puzzles
            .iter()
            .position(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
    }

    pub fn by_slug(&self, slug: &str) -> Option<&PuzzleDefinition> {
        self.index_by_slug(slug).and_then(|index| self.get(index))
    }

    pub fn by_name(&self, name: &str) -> Option<&PuzzleDefinition> {
        let trimmed = name.trim();
        self.puzzles
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_and_builds() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(
            catalog.get(catalog.default_index()).map(|p| p.slug.as_str()),
            Some(DEFAULT_PUZZLE_SLUG)
        );
        for definition in catalog.iter() {
            let puzzle = definition.build().unwrap();
            assert_eq!(puzzle.slots().len(), definition.nodes.len());
            assert!(puzzle.is_solved());
        }
    }

    #[test]
    fn lookups_ignore_case_and_whitespace() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.by_slug(" TWO-SWAP ").is_some());
        assert!(catalog.by_name("triangle").is_some());
        assert!(catalog.by_slug("missing").is_none());
    }

    #[test]
    fn parses_minimal_catalog() {
        let text = r##"
            [[puzzles]]
            name = "Pair"
            slug = "pair"
            nodes = [
                { name = "a", color = "red", x = 0.0, y = 0.0 },
                { name = "b", color = "#00ff00", x = 2.0, y = 0.0 },
            ]

            [[puzzles.permutations]]
            color = "red"
            cycles = [["a", "b"]]

            [[puzzles.arcs]]
            color = "red"
            node = "b"
            radius = 1.5
            plus_side = true
        "##;
        let catalog = Catalog::from_toml(text).unwrap();
        assert_eq!(catalog.default_index(), 0);
        let definition = catalog.get(0).unwrap();
        assert!(definition.arcs[0].plus_side);
        assert!(!definition.arcs[0].reversed);
        let puzzle = definition.build().unwrap();
        assert_eq!(puzzle.permutations().len(), 1);
        assert_eq!(puzzle.slots()[1].home_color(), Color::rgb(0, 0xff, 0));
    }

    #[test]
    fn rejects_bad_catalogs() {
        assert!(matches!(
            Catalog::from_toml("puzzles = []"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            Catalog::from_toml("default_slug = \"x\"\n[[puzzles]]\nname = \"A\"\nslug = \"a\"\nnodes = []\n"),
            Err(CatalogError::UnknownDefault(slug)) if slug == "x"
        ));
        assert!(matches!(
            Catalog::from_toml("puzzles = 3"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn unknown_node_in_definition_fails_to_build() {
        let text = r#"
            [[puzzles]]
            name = "Broken"
            slug = "broken"
            nodes = [{ name = "a", color = "red", x = 0.0, y = 0.0 }]

            [[puzzles.permutations]]
            color = "red"
            cycles = [["a", "ghost"]]
        "#;
        let catalog = Catalog::from_toml(text).unwrap();
        let err = catalog.get(0).unwrap().build().unwrap_err();
        assert_eq!(err, BuildError::UnknownNode("ghost".to_string()));
    }
}
