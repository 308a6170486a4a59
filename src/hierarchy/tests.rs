use itertools::Itertools;
use rstest::rstest;

use super::*;
use crate::data_structs::{Block, BlockId, BlockStore, Span};

fn store_with(
    length: usize,
    features: &[(&str, usize, usize)],
) -> BlockStore {
    let sequence = "ACGT".repeat(length / 4 + 1)[..length].to_string();
    let root = Block::new("root".into(), Span::new(0, length - 1), "record")
        .with_sequence(sequence.clone());
    let mut store = BlockStore::new(root);
    for (id, start, end) in features {
        let span = Span::new(*start, *end);
        store
            .try_insert(
                Block::new((*id).into(), span, "misc_feature")
                    .with_sequence(sequence[span.range()].to_string()),
            )
            .unwrap();
    }
    store
}

/// Renders the subtree below `id`: real blocks by id, fillers by span.
fn shape(
    store: &BlockStore,
    id: &BlockId,
) -> String {
    let block = store.get(id).unwrap();
    let label = if block.kind() == FILLER_KIND {
        format!("~{}", block.span())
    }
    else {
        block.id().to_string()
    };
    if block.is_leaf() {
        label
    }
    else {
        format!(
            "{}[{}]",
            label,
            block
                .children()
                .iter()
                .map(|child| shape(store, child))
                .join(", ")
        )
    }
}

fn children_of(
    store: &BlockStore,
    id: &str,
) -> Vec<String> {
    store
        .get(&BlockId::from(id))
        .unwrap()
        .children()
        .iter()
        .map(|id| id.to_string())
        .collect()
}

fn annotation_sources(
    store: &BlockStore,
    id: &str,
) -> Vec<String> {
    store
        .get(&BlockId::from(id))
        .unwrap()
        .annotations()
        .iter()
        .map(|a| a.source_id.to_string())
        .collect()
}

#[test]
fn test_nested_features_with_whole_sequence_duplicate() {
    let store = store_with(100, &[
        ("A", 0, 99),
        ("B", 10, 29),
        ("C", 10, 19),
        ("D", 50, 59),
    ]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    assert_eq!(
        shape(&store, store.root_id()),
        "root[~0-9, B[C, ~20-29], ~30-49, D, ~60-99]"
    );
    assert_eq!(annotation_sources(&store, "root"), vec!["A"]);
    assert!(!store.contains(&BlockId::from("A")));
}

#[test]
fn test_build_hierarchy_orders_children() {
    let mut store = store_with(100, &[
        ("D", 50, 59),
        ("B", 10, 29),
        ("E", 70, 79),
        ("C", 10, 19),
    ]);
    let demotions = build_hierarchy(&mut store).unwrap();

    assert!(demotions.is_empty());
    assert_eq!(children_of(&store, "root"), vec!["B", "D", "E"]);
    assert_eq!(children_of(&store, "B"), vec!["C"]);
}

#[test]
fn test_identical_spans_demote_one_into_the_other() {
    let store = store_with(30, &[("X", 5, 15), ("Y", 5, 15)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    assert_eq!(children_of(&store, "root").len(), 3);
    assert!(store.contains(&BlockId::from("Y")));
    assert!(!store.contains(&BlockId::from("X")));
    assert_eq!(annotation_sources(&store, "Y"), vec!["X"]);
    assert_eq!(shape(&store, store.root_id()), "root[~0-4, Y, ~16-29]");
}

#[test]
fn test_partial_sibling_overlap_demotes_into_parent() {
    let store = store_with(50, &[("P", 0, 30), ("E", 3, 12), ("F", 8, 20)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    assert_eq!(annotation_sources(&store, "P"), vec!["F"]);
    assert_eq!(
        shape(&store, store.root_id()),
        "root[P[~0-2, E, ~13-30], ~31-49]"
    );
}

#[test]
fn test_demotion_flattens_subtree_and_nested_annotations() {
    let store = store_with(50, &[
        ("P", 0, 30),
        ("E", 3, 12),
        ("F", 8, 20),
        ("H", 14, 15),
        ("G", 14, 15),
    ]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    // H is folded into G, then F (holding G) collides with E.
    assert_eq!(annotation_sources(&store, "P"), vec!["F", "G", "H"]);
    for id in ["F", "G", "H"] {
        assert!(!store.contains(&BlockId::from(id)));
    }

    let annotation = &store.get(&BlockId::from("P")).unwrap().annotations()[1];
    assert_eq!((annotation.start, annotation.end), (14, 15));
    assert_eq!(annotation.sequence, "GT");
}

#[test]
fn test_demote_returns_purged_subtree() {
    let mut store = store_with(50, &[("P", 0, 30), ("Q", 2, 20), ("R", 4, 6)]);
    build_hierarchy(&mut store).unwrap();
    assert_eq!(children_of(&store, "Q"), vec!["R"]);

    let removed = demote(&mut store, &"Q".into(), &"P".into()).unwrap();
    assert_eq!(removed, vec![BlockId::from("Q"), BlockId::from("R")]);
    assert_eq!(annotation_sources(&store, "P"), vec!["Q", "R"]);
    // Purging is left to the caller.
    assert!(store.contains(&BlockId::from("Q")));
}

#[test]
fn test_root_can_not_be_demoted() {
    let mut store = store_with(10, &[("A", 2, 4)]);
    assert!(demote(&mut store, &"root".into(), &"A".into()).is_err());
    assert!(demote(&mut store, &"A".into(), &"A".into()).is_err());
}

#[test]
fn test_leaf_blocks_get_no_filler() {
    let store = store_with(20, &[("A", 2, 5)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    let leaf = store.get(&BlockId::from("A")).unwrap();
    assert!(leaf.children().is_empty());
    assert_eq!(
        store
            .iter()
            .filter(|(_, block)| block.kind() == FILLER_KIND)
            .count(),
        2
    );
}

#[test]
fn test_store_without_features_stays_flat() {
    let store = resolve(store_with(20, &[]), DEFAULT_FILLER_PREFIX_LEN).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.root().is_leaf());
}

#[test]
fn test_single_child_gets_trailing_filler() {
    let store = store_with(20, &[("A", 0, 9)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();
    assert_eq!(shape(&store, store.root_id()), "root[A, ~10-19]");
}

#[test]
fn test_single_base_trailing_gap_is_filled() {
    let store = store_with(10, &[("A", 0, 8)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();
    assert_eq!(shape(&store, store.root_id()), "root[A, ~9-9]");

    let filler_id = &store.root().children()[1];
    let filler = store.get(filler_id).unwrap();
    assert_eq!(filler.name().as_deref(), Some("C..."));
    assert_eq!(filler.length(), 0);
}

#[rstest]
#[case(&[("X", 4, 4)], "root[~0-3, X, ~5-9]")]
#[case(&[("X", 9, 9)], "root[~0-8, X]")]
#[case(&[("X", 0, 0), ("Y", 1, 1)], "root[X, Y, ~2-9]")]
#[case(&[("P", 2, 6), ("X", 4, 4)], "root[~0-1, P[~2-3, X, ~5-6], ~7-9]")]
#[case(&[("X", 4, 4), ("Y", 4, 4)], "root[~0-3, Y, ~5-9]")]
#[case(&[("P", 4, 5), ("X", 5, 5)], "root[~0-3, P[~4-4, X], ~6-9]")]
fn test_single_base_features(
    #[case] features: &[(&str, usize, usize)],
    #[case] expected: &str,
) {
    let store = resolve(store_with(10, features), DEFAULT_FILLER_PREFIX_LEN).unwrap();
    assert_eq!(shape(&store, store.root_id()), expected);
}

#[test]
fn test_filler_names_and_sequences() {
    let store = store_with(100, &[("B", 10, 29), ("D", 50, 59)]);
    let store = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap();

    let fillers = store
        .root()
        .children()
        .iter()
        .map(|id| store.get(id).unwrap())
        .filter(|block| block.kind() == FILLER_KIND)
        .collect_vec();

    assert_eq!(
        fillers
            .iter()
            .map(|f| f.name().clone().unwrap())
            .collect_vec(),
        vec!["ACG...", "GTA...", "ACG..."]
    );
    assert_eq!(fillers[0].sequence(), "ACGTACGTAC");
    assert_eq!(fillers[0].length(), 9);
    assert!(fillers.iter().all(|f| f.is_leaf()));
}

#[test]
fn test_filler_prefix_len_is_configurable() {
    let store = resolve(store_with(20, &[("A", 10, 19)]), 5).unwrap();
    let filler = store.get(&store.root().children()[0]).unwrap();
    assert_eq!(filler.name().as_deref(), Some("ACGTA..."));
}

#[test]
fn test_block_outside_root_is_fatal() {
    let mut store = store_with(100, &[("A", 10, 20)]);
    store
        .try_insert(Block::new("Z".into(), Span::new(90, 120), "misc_feature"))
        .unwrap();

    let err = resolve(store, DEFAULT_FILLER_PREFIX_LEN).unwrap_err();
    assert!(err.to_string().contains("Z"), "{}", err);
}

#[test]
fn test_resolve_is_deterministic() {
    let features = [
        ("A", 0, 99),
        ("B", 10, 29),
        ("C", 10, 19),
        ("C2", 10, 19),
        ("D", 50, 59),
        ("E", 55, 70),
        ("F", 80, 80),
    ];
    let first = resolve(store_with(100, &features), 3).unwrap();
    let second = resolve(store_with(100, &features), 3).unwrap();

    assert_eq!(
        shape(&first, first.root_id()),
        shape(&second, second.root_id())
    );
    assert_eq!(
        annotation_sources(&first, "root"),
        annotation_sources(&second, "root")
    );
}
