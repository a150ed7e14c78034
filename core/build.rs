use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct CatalogFile {
    default_slug: Option<String>,
    puzzles: Vec<PuzzleEntry>,
}

#[derive(Deserialize)]
struct PuzzleEntry {
    name: String,
    slug: String,
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    permutations: Vec<PermutationEntry>,
    #[serde(default)]
    arcs: Vec<ArcEntry>,
    #[serde(default)]
    combos: Vec<ComboEntry>,
}

#[derive(Deserialize)]
struct NodeEntry {
    name: String,
}

#[derive(Deserialize)]
struct PermutationEntry {
    color: String,
    cycles: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct ArcEntry {
    color: String,
    node: String,
    radius: f32,
}

#[derive(Deserialize)]
struct ComboEntry {
    color: String,
    parts: Vec<String>,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=PUZZLE_CATALOG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let catalog_path = resolve_catalog_path(workspace_root);
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let contents = fs::read_to_string(&catalog_path).unwrap_or_else(|err| {
        panic!(
            "failed to read puzzle catalog at {}: {err}",
            catalog_path.display()
        )
    });

    let catalog: CatalogFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse puzzle catalog at {}: {err}",
            catalog_path.display()
        )
    });

    if catalog.puzzles.is_empty() {
        panic!("puzzle catalog {} has no entries", catalog_path.display());
    }

    validate_entries(&catalog.puzzles, &catalog_path);

    let default_slug = catalog
        .default_slug
        .as_deref()
        .unwrap_or(catalog.puzzles[0].slug.as_str());
    if !catalog.puzzles.iter().any(|entry| entry.slug == default_slug) {
        panic!(
            "default_slug '{}' not found in {}",
            default_slug,
            catalog_path.display()
        );
    }

    let absolute = fs::canonicalize(&catalog_path).unwrap_or(catalog_path.clone());
    let mut output = String::new();
    writeln!(
        &mut output,
        "pub const DEFAULT_PUZZLE_SLUG: &str = {};",
        rust_string(default_slug)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const PUZZLE_CATALOG_TOML: &str = include_str!({});",
        rust_string(&absolute.display().to_string())
    )
    .unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("puzzle_catalog.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_catalog_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("PUZZLE_CATALOG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("puzzles/catalog.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

// Colors parse case-insensitively at runtime, so compare them the same way.
fn color_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn validate_entries(entries: &[PuzzleEntry], catalog_path: &Path) {
    let mut slugs = HashSet::new();

    for entry in entries {
        if entry.slug.trim().is_empty() {
            panic!("puzzle slug cannot be empty in {}", catalog_path.display());
        }
        if entry.name.trim().is_empty() {
            panic!(
                "puzzle '{}' has an empty name in {}",
                entry.slug,
                catalog_path.display()
            );
        }
        if !slugs.insert(entry.slug.clone()) {
            panic!(
                "duplicate puzzle slug '{}' in {}",
                entry.slug,
                catalog_path.display()
            );
        }
        if entry.nodes.is_empty() {
            panic!(
                "puzzle '{}' has no nodes in {}",
                entry.slug,
                catalog_path.display()
            );
        }

        let mut nodes = HashSet::new();
        for node in &entry.nodes {
            if !nodes.insert(node.name.as_str()) {
                panic!(
                    "puzzle '{}' declares node '{}' twice in {}",
                    entry.slug,
                    node.name,
                    catalog_path.display()
                );
            }
        }

        let mut colors = HashSet::new();
        for permutation in &entry.permutations {
            if !colors.insert(color_key(&permutation.color)) {
                panic!(
                    "puzzle '{}' has two permutations colored '{}' in {}",
                    entry.slug,
                    permutation.color,
                    catalog_path.display()
                );
            }
            let mut used = HashSet::new();
            for name in permutation.cycles.iter().flatten() {
                if !nodes.contains(name.as_str()) {
                    panic!(
                        "puzzle '{}' permutation '{}' references unknown node '{}' in {}",
                        entry.slug,
                        permutation.color,
                        name,
                        catalog_path.display()
                    );
                }
                if !used.insert(name.as_str()) {
                    panic!(
                        "puzzle '{}' permutation '{}' lists node '{}' twice in {}",
                        entry.slug,
                        permutation.color,
                        name,
                        catalog_path.display()
                    );
                }
            }
        }

        for combo in &entry.combos {
            if combo.parts.is_empty() {
                panic!(
                    "puzzle '{}' combo '{}' has no parts in {}",
                    entry.slug,
                    combo.color,
                    catalog_path.display()
                );
            }
            for part in &combo.parts {
                if !colors.contains(&color_key(part)) {
                    panic!(
                        "puzzle '{}' combo '{}' references unknown permutation '{}' in {}",
                        entry.slug,
                        combo.color,
                        part,
                        catalog_path.display()
                    );
                }
            }
            if !colors.insert(color_key(&combo.color)) {
                panic!(
                    "puzzle '{}' combo color '{}' is already used in {}",
                    entry.slug,
                    combo.color,
                    catalog_path.display()
                );
            }
        }

        for arc in &entry.arcs {
            if !colors.contains(&color_key(&arc.color)) {
                panic!(
                    "puzzle '{}' arc references unknown permutation '{}' in {}",
                    entry.slug,
                    arc.color,
                    catalog_path.display()
                );
            }
            if !nodes.contains(arc.node.as_str()) {
                panic!(
                    "puzzle '{}' arc references unknown node '{}' in {}",
                    entry.slug,
                    arc.node,
                    catalog_path.display()
                );
            }
            if !(arc.radius.is_finite() && arc.radius > 0.0) {
                panic!(
                    "puzzle '{}' arc at '{}' has invalid radius {} in {}",
                    entry.slug,
                    arc.node,
                    arc.radius,
                    catalog_path.display()
                );
            }
        }
    }
}
