mod common;

use buckle_core::project::Project;
use buckle_resolver::registry::Registry;
use buckle_resolver::resolve;

use common::{publish, req, root, v, RecordingFetcher};

#[test]
fn test_picks_greatest_satisfying_version() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0", "2.0.0"], &[]);

    let resolution = resolve(&root(&[("a", ">=1.0")]), &registry).unwrap();
    assert_eq!(resolution.len(), 1);
    assert_eq!(resolution.get(&Project::leaf("a")), Some(&v("2.0.0")));
}

#[test]
fn test_greatest_within_upper_bound() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0", "1.4.2", "2.0.0"], &[]);

    let resolution = resolve(&root(&[("a", ">=1.0, <2.0")]), &registry).unwrap();
    assert_eq!(resolution.version_of("a"), Some(&v("1.4.2")));
}

#[test]
fn test_unsatisfiable_requirement_is_reported() {
    let mut registry = Registry::new();
    publish(&mut registry, "b", &["1.0.0", "2.9.0"], &[]);

    let failure = resolve(&root(&[("b", ">=3.0")]), &registry).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.failures()[0].identifier.as_str(), "b");
    assert_eq!(failure.failures()[0].requirement, req(">=3.0"));
}

#[test]
fn test_cycle_back_to_visited_package_is_skipped() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("a", ">=2.0")]);
    publish(&mut registry, "c", &["1.0.0"], &[]);
    let fetcher = RecordingFetcher::new(registry);

    let resolution = resolve(&root(&[("a", ">=1.0"), ("c", ">=1.0")]), &fetcher).unwrap();
    assert_eq!(resolution.len(), 2);
    assert_eq!(resolution.version_of("a"), Some(&v("1.0.0")));
    assert_eq!(fetcher.fetched_names(), vec!["a", "c"]);
    assert_eq!(resolution.skipped().len(), 1);
}

#[test]
fn test_mixed_branches_never_partially_succeed() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[]);

    let failure = resolve(&root(&[("a", ">=1.0"), ("d", ">=1.0")]), &registry).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.failures()[0].identifier.as_str(), "d");
    assert_eq!(failure.failures()[0].requirement, req(">=1.0"));
}

#[test]
fn test_all_failures_collected_in_discovery_order() {
    // root -> a, x ; a -> y, b ; b -> z. Missing: x (level 1), y (level 2), z (level 3).
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("y", "^1"), ("b", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[("z", "^1")]);

    let failure = resolve(&root(&[("a", "^1"), ("x", "^1")]), &registry).unwrap_err();
    let names: Vec<&str> = failure.iter().map(|f| f.identifier.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "z"]);
}

#[test]
fn test_failed_identifier_is_not_fetched_again() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("missing", "^2")]);
    let fetcher = RecordingFetcher::new(registry);

    let failure = resolve(&root(&[("missing", "^1"), ("a", "^1")]), &fetcher).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.failures()[0].requirement, req("^1"));
    assert_eq!(fetcher.fetched_names(), vec!["missing", "a"]);
}

#[test]
fn test_each_identifier_fetched_at_most_once() {
    // diamond: root -> a, b ; a -> c ; b -> c
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("c", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[("c", "^1.1")]);
    publish(&mut registry, "c", &["1.0.0", "1.2.0"], &[]);
    let fetcher = RecordingFetcher::new(registry);

    let resolution = resolve(&root(&[("a", "^1"), ("b", "^1")]), &fetcher).unwrap();
    let mut names = fetcher.fetched_names();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), fetcher.calls.borrow().len());
    assert_eq!(resolution.len(), 3);
}

#[test]
fn test_first_seen_requirement_wins_in_diamond() {
    // a reaches c first with ^1; b's stricter ^2 is ignored
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("c", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[("c", "^2")]);
    publish(&mut registry, "c", &["1.5.0", "2.0.0"], &[]);
    let fetcher = RecordingFetcher::new(registry);

    let resolution = resolve(&root(&[("a", "^1"), ("b", "^1")]), &fetcher).unwrap();
    assert_eq!(resolution.version_of("c"), Some(&v("1.5.0")));

    let c_calls: Vec<_> = fetcher
        .calls
        .borrow()
        .iter()
        .filter(|(id, _)| id.as_str() == "c")
        .map(|(_, r)| r.clone())
        .collect();
    assert_eq!(c_calls, vec![req("^1")]);

    let incompatible = resolution.incompatible_skips();
    assert_eq!(incompatible.len(), 1);
    assert_eq!(incompatible[0].dependent.as_str(), "b");
    assert_eq!(incompatible[0].requirement, req("^2"));
}

#[test]
fn test_edges_follow_declaration_order() {
    // root declares z before a, so c is first reached through z
    let mut registry = Registry::new();
    publish(&mut registry, "z", &["1.0.0"], &[("c", "^1")]);
    publish(&mut registry, "a", &["1.0.0"], &[("c", "^2")]);
    publish(&mut registry, "c", &["1.5.0", "2.0.0"], &[]);
    let fetcher = RecordingFetcher::new(registry);

    let resolution = resolve(&root(&[("z", "^1"), ("a", "^1")]), &fetcher).unwrap();
    assert_eq!(fetcher.fetched_names(), vec!["z", "a", "c"]);
    assert_eq!(resolution.version_of("c"), Some(&v("1.5.0")));
    assert_eq!(resolution.incompatible_skips()[0].dependent.as_str(), "a");
}

#[test]
fn test_compatible_skips_are_not_flagged() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("c", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[("c", ">=1.0")]);
    publish(&mut registry, "c", &["1.5.0"], &[]);

    let resolution = resolve(&root(&[("a", "^1"), ("b", "^1")]), &registry).unwrap();
    assert_eq!(resolution.skipped().len(), 1);
    assert!(resolution.incompatible_skips().is_empty());
}

#[test]
fn test_resolution_is_deterministic() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0", "1.1.0"], &[("c", "^1"), ("d", "*")]);
    publish(&mut registry, "b", &["0.3.0"], &[("c", "^1.2")]);
    publish(&mut registry, "c", &["1.0.0", "1.3.0"], &[("a", "*")]);
    publish(&mut registry, "d", &["4.0.0"], &[]);
    let project = root(&[("a", "^1"), ("b", "0.3")]);

    let first = resolve(&project, &registry).unwrap();
    let second = resolve(&project, &registry).unwrap();
    assert_eq!(first.to_map(), second.to_map());
    assert_eq!(first.skipped(), second.skipped());
}

#[test]
fn test_root_is_not_in_the_mapping() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("root", "*")]);

    let resolution = resolve(&root(&[("a", "*")]), &registry).unwrap();
    assert!(!resolution.contains("root"));
    assert_eq!(resolution.root().as_str(), "root");
    assert!(resolution.incompatible_skips().is_empty());
}

#[test]
fn test_mapping_keys_are_full_projects() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("b", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[]);

    let map = resolve(&root(&[("a", "^1")]), &registry)
        .unwrap()
        .into_map();
    let a = Project::builder("a").dependency("b", req("^1")).build();
    assert_eq!(map.get(&a), Some(&v("1.0.0")));
    assert_eq!(map.get(&Project::leaf("a")), None);
}

#[test]
fn test_chosen_release_dependencies_are_followed() {
    // only the newest release of a depends on b
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[]);
    publish(&mut registry, "a", &["1.1.0"], &[("b", "^1")]);
    publish(&mut registry, "b", &["1.0.0"], &[]);

    let resolution = resolve(&root(&[("a", "^1")]), &registry).unwrap();
    assert_eq!(resolution.version_of("b"), Some(&v("1.0.0")));
    assert_eq!(
        resolution.project("a").and_then(|p| p.requirement_on("b")),
        Some(&req("^1"))
    );
}

#[test]
fn test_graph_records_who_pulled_in_whom() {
    let mut registry = Registry::new();
    publish(&mut registry, "a", &["1.0.0"], &[("c", "^1")]);
    publish(&mut registry, "b", &["2.0.0"], &[("c", "^1")]);
    publish(&mut registry, "c", &["1.0.0"], &[]);

    let resolution = resolve(&root(&[("a", "^1"), ("b", "^2")]), &registry).unwrap();
    let graph = resolution.graph();
    assert_eq!(graph.len(), 3);

    let path: Vec<&str> = graph
        .find_path("c")
        .unwrap()
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(path, vec!["root", "a", "c"]);
    assert_eq!(
        graph.print_tree(None),
        "root\n├── a v1.0.0\n│   └── c v1.0.0\n└── b v2.0.0\n"
    );
}

#[test]
fn test_failure_converts_to_miette_report() {
    let registry = Registry::new();
    let result: miette::Result<_> =
        resolve(&root(&[("ghost", "^1")]), &registry).map_err(miette::Report::new);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "1 version requirement could not be satisfied");
}
