//! Property-based tests for the colorimetry, path and graph primitives.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;
use proptest::sample::Index;
use serde_json::{json, Map, Value};

use tokencheck::core::color::{contrast_ratio, hex_to_rgb, relative_luminance, Rgb};
use tokencheck::core::graph::ReferenceGraph;
use tokencheck::core::types::TokenPath;
use tokencheck::validate::contrast::{check_contrast, ContrastOptions};
use tokencheck::{validate, IssueKind, Schema, ValidateOptions};

fn rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

/// Strategy for generating valid path segments.
fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}"
}

fn token_path() -> impl Strategy<Value = TokenPath> {
    prop::collection::vec(segment(), 1..4)
        .prop_map(|segments| TokenPath::new(segments.join(".")).unwrap())
}

proptest! {
    /// Contrast is symmetric and bounded by [1, 21].
    #[test]
    fn contrast_symmetric_and_bounded(a in rgb(), b in rgb()) {
        let ab = contrast_ratio(a, b);
        let ba = contrast_ratio(b, a);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 1.0);
        prop_assert!(ab <= 21.0 + 1e-9);
    }

    /// A color against itself is exactly 1.
    #[test]
    fn contrast_with_self_is_one(c in rgb()) {
        prop_assert_eq!(contrast_ratio(c, c), 1.0);
    }

    /// Luminance stays in [0, 1].
    #[test]
    fn luminance_in_unit_range(c in rgb()) {
        let l = relative_luminance(c.r, c.g, c.b);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&l));
    }

    /// Every color survives hex formatting and parsing, with or without '#'
    /// and in any case.
    #[test]
    fn hex_roundtrip(c in rgb(), upper in any::<bool>()) {
        let hex = c.to_hex();
        let hex = if upper { hex.to_uppercase() } else { hex };
        prop_assert_eq!(hex_to_rgb(&hex), Some(c));
        prop_assert_eq!(hex_to_rgb(&hex[1..]), Some(c));
    }

    /// Short hex expands each digit.
    #[test]
    fn short_hex_expands(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
        let short = format!("#{r:x}{g:x}{b:x}");
        prop_assert_eq!(hex_to_rgb(&short), Some(Rgb::new(r * 17, g * 17, b * 17)));
    }

    /// Arbitrary strings never panic the parser; lengths other than 3 and 6
    /// never parse.
    #[test]
    fn hex_parser_total(s in "#?[0-9a-zA-Z]{0,10}") {
        let digits = s.trim_start_matches('#');
        let parsed = hex_to_rgb(&s);
        if digits.len() != 3 && digits.len() != 6 {
            prop_assert!(parsed.is_none());
        }
    }

    /// Valid paths survive the reference-brace form.
    #[test]
    fn braced_path_equals_bare_path(path in token_path()) {
        let braced = TokenPath::new(format!("{{{}}}", path.as_str())).unwrap();
        prop_assert_eq!(braced, path);
    }

    /// Cycle detection terminates on any graph and every cycle is a closed
    /// walk along existing edges.
    #[test]
    fn cycles_follow_edges(edges in prop::collection::vec((0usize..8, 0usize..8), 0..24)) {
        let node = |i: usize| TokenPath::new(format!("n{i}")).unwrap();
        let mut graph = ReferenceGraph::new();
        for (from, to) in &edges {
            graph.add_edge(node(*from), node(*to));
        }

        for cycle in graph.find_cycles() {
            let paths = cycle.paths();
            prop_assert!(!paths.is_empty());
            for (i, from) in paths.iter().enumerate() {
                let to = &paths[(i + 1) % paths.len()];
                prop_assert!(graph.targets(from).contains(to));
            }
        }
    }

    /// A graph built from a strict chain has no cycles.
    #[test]
    fn chains_are_acyclic(len in 1usize..20) {
        let mut graph = ReferenceGraph::new();
        for i in 0..len {
            graph.add_edge(
                TokenPath::new(format!("n{i}")).unwrap(),
                TokenPath::new(format!("n{}", i + 1)).unwrap(),
            );
        }
        prop_assert!(graph.find_cycles().is_empty());
    }

    /// Contrast report counts always add up.
    #[test]
    fn contrast_counts_add_up(colors in prop::collection::vec(rgb(), 1..6), bg in rgb()) {
        let mut fg = Map::new();
        for (i, c) in colors.iter().enumerate() {
            fg.insert(format!("t{i}"), json!({ "$type": "color", "$value": c.to_hex() }));
        }
        let doc = json!({
            "foreground": Value::Object(fg),
            "background": { "primary": { "$type": "color", "$value": bg.to_hex() } }
        });

        let report = check_contrast(&doc, &ContrastOptions::default());
        prop_assert_eq!(report.total_pairs, colors.len());
        prop_assert_eq!(report.valid_pairs + report.invalid_pairs, report.total_pairs);
        for r in &report.results {
            prop_assert_eq!(r.passed, r.suggestion.is_none());
        }
    }

    /// Warnings never decide validity: a document of well-formed hex colors
    /// with arbitrary extra types is valid under the permissive profile.
    #[test]
    fn warnings_never_invalidate(types in prop::collection::vec("[a-z]{1,10}", 1..6)) {
        let mut root = Map::new();
        for (i, ty) in types.iter().enumerate() {
            root.insert(format!("t{i}"), json!({ "$type": ty, "$value": "#ffffff" }));
        }
        let options = ValidateOptions::default().with_schema(Schema::permissive());
        let result = validate(&Value::Object(root), &options);
        prop_assert!(result.is_valid);
        prop_assert!(result.errors.iter().all(|e| e.kind != IssueKind::Custom));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Cycle detection finishes on chains far longer than a thread stack
    /// could recurse through, with a few random back edges, and every
    /// cycle it reports follows real edges.
    #[test]
    fn deep_graphs_terminate(
        len in 20_000usize..60_000,
        back_edges in prop::collection::vec((any::<Index>(), any::<Index>()), 0..4),
    ) {
        let node = |i: usize| TokenPath::new(format!("n{i}")).unwrap();
        let mut graph = ReferenceGraph::new();
        for i in 0..len {
            graph.add_edge(node(i), node(i + 1));
        }
        for (from, to) in &back_edges {
            let from = from.index(len + 1);
            let to = to.index(from + 1);
            graph.add_edge(node(from), node(to));
        }

        let cycles = graph.find_cycles();
        if back_edges.is_empty() {
            prop_assert!(cycles.is_empty());
        }
        for cycle in &cycles {
            let paths = cycle.paths();
            for (i, from) in paths.iter().enumerate() {
                let to = &paths[(i + 1) % paths.len()];
                prop_assert!(graph.targets(from).contains(to));
            }
        }
    }
}

/// A long but acyclic alias chain validates without issues.
#[test]
fn deep_alias_chain_document_validates() {
    let mut root = Map::new();
    root.insert("t0".to_string(), json!({ "$type": "color", "$value": "#000000" }));
    for i in 1..50_000 {
        root.insert(
            format!("t{i}"),
            json!({ "$type": "color", "$value": format!("{{t{}}}", i - 1) }),
        );
    }

    let result = validate(&Value::Object(root), &ValidateOptions::default());
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

/// Closing a long alias chain reports exactly one cycle.
#[test]
fn deep_alias_loop_document_reports_one_cycle() {
    let mut root = Map::new();
    for i in 0..50_000 {
        let target = if i == 0 { 49_999 } else { i - 1 };
        root.insert(
            format!("t{i}"),
            json!({ "$type": "color", "$value": format!("{{t{target}}}") }),
        );
    }

    let result = validate(&Value::Object(root), &ValidateOptions::default());
    assert!(!result.is_valid);
    let cycles: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.kind == IssueKind::CircularReference)
        .collect();
    assert_eq!(cycles.len(), 1);
}
