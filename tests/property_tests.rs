//! Property-based tests using proptest
//!
//! These tests generate random operation sequences and verify that the
//! structural invariants hold after every operation: AVL balance and
//! ordering, heap drain order, and graph weight symmetry.

use proptest::prelude::*;
use rust_classic_collections::avl::AvlTree;
use rust_classic_collections::graph::AdjacencyList;
use rust_classic_collections::heap::{Heap, HeapKind};
use rust_classic_collections::priority_queue::PriorityQueue;

/// The AVL height bound: a balanced tree over n values is never taller
/// than 1.4405 * log2(n + 2).
fn avl_height_ok(height: u32, len: usize) -> bool {
    height as f64 <= 1.4405 * ((len + 2) as f64).log2() + 1.0
}

/// Insert-only churn: the tree stays sorted and within the AVL height
/// bound after every single insert.
fn check_avl_inserts(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut tree = AvlTree::new();
    for (count, value) in values.iter().enumerate() {
        tree.insert(*value);
        prop_assert!(avl_height_ok(tree.height(), count + 1));
    }

    let mut sorted = values;
    sorted.sort_unstable();
    let walked: Vec<i32> = tree.iter().copied().collect();
    prop_assert_eq!(walked, sorted);
    Ok(())
}

/// Mixed insert/remove churn against a shadow multiset.
fn check_avl_churn(ops: Vec<(bool, i32)>) -> Result<(), TestCaseError> {
    let mut tree = AvlTree::new();
    let mut shadow: Vec<i32> = Vec::new();

    for (is_insert, value) in ops {
        if is_insert {
            tree.insert(value);
            shadow.push(value);
        } else {
            tree.remove(&value);
            if let Some(at) = shadow.iter().position(|&v| v == value) {
                shadow.remove(at);
            }
        }
        prop_assert!(avl_height_ok(tree.height(), shadow.len()));
    }

    shadow.sort_unstable();
    let walked: Vec<i32> = tree.iter().copied().collect();
    prop_assert_eq!(walked, shadow);
    Ok(())
}

/// Removing values that were never inserted must leave the tree's
/// observable sequence identical.
fn check_remove_absent(values: Vec<i32>, absent: Vec<i32>) -> Result<(), TestCaseError> {
    let mut tree: AvlTree<i32> = values.iter().copied().collect();
    let before: Vec<i32> = tree.iter().copied().collect();
    let height_before = tree.height();

    for value in absent {
        if !values.contains(&value) {
            tree.remove(&value);
        }
    }

    let after: Vec<i32> = tree.iter().copied().collect();
    prop_assert_eq!(before, after);
    prop_assert_eq!(height_before, tree.height());
    Ok(())
}

/// Heapify then drain: the heap must hand elements back fully sorted.
fn check_heap_drain(values: Vec<i32>, kind: HeapKind) -> Result<(), TestCaseError> {
    let mut expected = values.clone();
    expected.sort_unstable();
    if kind == HeapKind::Max {
        expected.reverse();
    }

    let mut heap = Heap::from_vec(values, kind);
    if let (Some(front), Some(first)) = (heap.peek(), expected.first()) {
        prop_assert_eq!(front, first);
    }

    let mut drained = Vec::new();
    while let Some(value) = heap.pop() {
        drained.push(value);
    }
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// The lazy iterator yields the same sorted sequence a drain would,
/// without consuming anything.
fn check_heap_iter(values: Vec<i32>) -> Result<(), TestCaseError> {
    let len = values.len();
    let heap = Heap::from_vec(values, HeapKind::Min);

    let walked: Vec<i32> = heap.iter().copied().collect();
    let mut expected = walked.clone();
    expected.sort_unstable();

    prop_assert_eq!(&walked, &expected);
    prop_assert_eq!(heap.len(), len);
    Ok(())
}

/// Queue drain order under the default rule is ascending.
fn check_queue_order(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut queue = PriorityQueue::from_vec(values);
    let mut last = i32::MIN;
    while let Some(value) = queue.dequeue() {
        prop_assert!(value >= last, "dequeued {} after {}", value, last);
        last = value;
    }
    Ok(())
}

/// weight(u, v) == weight(v, u) over every pair in an undirected graph.
fn check_weight_symmetry(edges: Vec<(u8, u8, u32)>) -> Result<(), TestCaseError> {
    let mut graph = AdjacencyList::new(false);
    for (u, v, w) in &edges {
        let source = graph.create_vertex(*u);
        let destination = graph.create_vertex(*v);
        graph.add(&source, &destination, f64::from(*w));
    }

    let vertices: Vec<_> = graph.vertices().cloned().collect();
    for u in &vertices {
        for v in &vertices {
            prop_assert_eq!(graph.weight(u, v), graph.weight(v, u));
        }
    }
    Ok(())
}

/// A Dijkstra path starts at (start, 0) and its running costs never
/// decrease (weights are non-negative).
fn check_dijkstra_path_shape(edges: Vec<(u8, u8, u32)>) -> Result<(), TestCaseError> {
    let mut graph = AdjacencyList::new(false);
    for (u, v, w) in &edges {
        let source = graph.create_vertex(*u % 16);
        let destination = graph.create_vertex(*v % 16);
        graph.add(&source, &destination, f64::from(*w));
    }

    let vertices: Vec<_> = graph.vertices().cloned().collect();
    if vertices.len() < 2 {
        return Ok(());
    }
    let start = &vertices[0];
    let end = &vertices[vertices.len() - 1];

    if let Ok(path) = graph.dijkstra(start, end) {
        prop_assert_eq!(path[0], (*start.data(), 0.0));
        prop_assert_eq!(path[path.len() - 1].0, *end.data());
        for window in path.windows(2) {
            prop_assert!(window[0].1 <= window[1].1);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn avl_insert_invariants(values in prop::collection::vec(-1000i32..1000, 0..200)) {
        check_avl_inserts(values)?;
    }

    #[test]
    fn avl_churn_invariants(ops in prop::collection::vec((any::<bool>(), -100i32..100), 0..200)) {
        check_avl_churn(ops)?;
    }

    #[test]
    fn avl_remove_absent_is_noop(
        values in prop::collection::vec(-100i32..100, 0..50),
        absent in prop::collection::vec(-1000i32..1000, 0..20)
    ) {
        check_remove_absent(values, absent)?;
    }

    #[test]
    fn min_heap_drains_sorted(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        check_heap_drain(values, HeapKind::Min)?;
    }

    #[test]
    fn max_heap_drains_sorted(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        check_heap_drain(values, HeapKind::Max)?;
    }

    #[test]
    fn heap_iter_is_sorted_and_lazy(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        check_heap_iter(values)?;
    }

    #[test]
    fn queue_dequeues_ascending(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        check_queue_order(values)?;
    }

    #[test]
    fn undirected_weights_are_symmetric(edges in prop::collection::vec((any::<u8>(), any::<u8>(), 0u32..100), 0..30)) {
        check_weight_symmetry(edges)?;
    }

    #[test]
    fn dijkstra_paths_are_well_formed(edges in prop::collection::vec((any::<u8>(), any::<u8>(), 0u32..100), 0..40)) {
        check_dijkstra_path_shape(edges)?;
    }
}
