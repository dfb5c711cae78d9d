//! Property-based tests for the normalizer
//!
//! Uses proptest to check idempotence, content preservation and badge
//! removal over generated notebooks.

use std::path::Path;

use nbrebase::adapters::BuiltinProjector;
use nbrebase::core::models::Notebook;
use nbrebase::core::services::normalizer::DEFAULT_HOSTING_URL;
use nbrebase::core::services::{NormalizeOptions, drop_badge, normalize, normalize_file, to_canonical_json};
use proptest::prelude::*;
use serde_json::{Value, json};

fn source_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9 =()+ü]{0,12}", 0..4).prop_map(|lines| {
        let last = lines.len().saturating_sub(1);
        lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| if i == last { l } else { format!("{l}\n") })
            .collect()
    })
}

fn cell_strategy() -> impl Strategy<Value = Value> {
    (
        0..3u8,
        source_strategy(),
        prop::option::of("[a-zA-Z0-9]{4,8}"),
        prop::option::of("[a-zA-Z0-9-]{4,14}"),
        any::<bool>(),
    )
        .prop_map(|(kind, source, id, meta_id, hosted)| {
            let mut metadata = serde_json::Map::new();
            if let Some(meta_id) = meta_id {
                metadata.insert("id".to_string(), json!(meta_id));
            }
            if hosted {
                metadata.insert("outputId".to_string(), json!("0f1e"));
                metadata.insert("colab".to_string(), json!({"height": 35}));
            }
            let mut cell = json!({"metadata": metadata, "source": source});
            match kind {
                0 => {
                    cell["cell_type"] = json!("markdown");
                },
                1 => {
                    cell["cell_type"] = json!("code");
                    cell["outputs"] = json!([]);
                    cell["execution_count"] = Value::Null;
                },
                _ => {
                    cell["cell_type"] = json!("raw");
                },
            }
            if let Some(id) = id {
                cell["id"] = json!(id);
            }
            cell
        })
}

fn notebook_strategy() -> impl Strategy<Value = Notebook> {
    (any::<bool>(), prop::collection::vec(cell_strategy(), 0..6)).prop_map(|(badge, mut cells)| {
        if badge {
            cells.insert(
                0,
                json!({
                    "cell_type": "markdown",
                    "metadata": {"id": "view-in-github"},
                    "source": [format!("<a href=\"{DEFAULT_HOSTING_URL}o/r\">Open</a>")]
                }),
            );
        }
        let doc = json!({"cells": cells, "metadata": {}, "nbformat": 4, "nbformat_minor": 5});
        Notebook::parse(&doc.to_string(), Path::new("gen.ipynb")).unwrap()
    })
}

proptest! {
    /// Normalizing a normalized document changes nothing
    #[test]
    fn normalization_is_idempotent(nb in notebook_strategy()) {
        let options = NormalizeOptions::default();
        let once = to_canonical_json(&normalize(&nb, &options).unwrap(), options.indent).unwrap();
        let reparsed = Notebook::parse(&once, Path::new("gen.ipynb")).unwrap();
        let twice = to_canonical_json(&normalize(&reparsed, &options).unwrap(), options.indent).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Normalization never changes the script projection
    #[test]
    fn normalization_preserves_projection(nb in notebook_strategy()) {
        let normalized = normalize(&nb, &NormalizeOptions::default()).unwrap();
        prop_assert_eq!(BuiltinProjector::render(&nb), BuiltinProjector::render(&normalized));
    }

    /// No cell keeps a cell-level id after normalization
    #[test]
    fn normalization_strips_all_cell_ids(nb in notebook_strategy()) {
        let normalized = normalize(&nb, &NormalizeOptions::default()).unwrap();
        prop_assert!(normalized.cells.iter().all(|c| c.id().is_none()));
        prop_assert!(normalized.cells.iter().all(|c| !c.metadata().contains_key("outputId")));
    }

    /// A leading badge loses exactly one cell; otherwise the document is unchanged
    #[test]
    fn badge_removal_is_exact(nb in notebook_strategy()) {
        let dropped = drop_badge(&nb, DEFAULT_HOSTING_URL);
        let has_badge = nb
            .cells
            .first()
            .and_then(|c| c.source().first_line())
            .is_some_and(|l| l.contains(DEFAULT_HOSTING_URL));
        if has_badge {
            prop_assert_eq!(dropped.len() + 1, nb.len());
            prop_assert_eq!(BuiltinProjector::render(&dropped), BuiltinProjector::render(&nb));
        } else {
            prop_assert_eq!(dropped, nb);
        }
    }

    /// Normalizing a file twice writes it once
    #[test]
    fn normalize_file_second_pass_is_noop(nb in notebook_strategy()) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gen.ipynb");
        std::fs::write(&path, serde_json::to_string_pretty(&nb).unwrap()).unwrap();
        let options = NormalizeOptions::default();
        normalize_file(&path, &options).unwrap();
        prop_assert!(!normalize_file(&path, &options).unwrap());
    }
}
