use map_route::data_structures::{Distance, IndexedMinHeap};
use rand::prelude::*;
use rand::rngs::StdRng;

#[test]
fn test_infinite_sorts_after_every_finite_distance() {
    assert!(Distance::Finite(u64::MAX) < Distance::Infinite);
    assert!(Distance::Finite(0) < Distance::Finite(1));
    assert_eq!(Distance::Finite(3).finite(), Some(3));
    assert_eq!(Distance::Infinite.finite(), None);
    assert!(Distance::Infinite.is_infinite());
}

#[test]
fn test_with_source_puts_source_at_root() {
    let heap = IndexedMinHeap::with_source(6, 4);
    assert_eq!(heap.len(), 6);
    assert!(heap.is_consistent());

    let root = heap.peek().unwrap();
    assert_eq!(root.vertex, 4);
    assert_eq!(root.distance, Distance::Finite(0));
    assert_eq!(root.predecessor, None);

    for v in (0..6).filter(|&v| v != 4) {
        assert_eq!(heap.distance(v), Some(Distance::Infinite));
    }
}

#[test]
fn test_extract_min_removes_vertex_from_position_table() {
    let mut heap = IndexedMinHeap::with_source(3, 1);
    let first = heap.extract_min().unwrap();

    assert_eq!(first.vertex, 1);
    assert!(!heap.contains(1));
    assert_eq!(heap.distance(1), None);
    assert_eq!(heap.len(), 2);
    assert!(heap.is_consistent());
}

#[test]
fn test_decrease_key_reorders_and_records_predecessor() {
    let mut heap = IndexedMinHeap::with_source(5, 0);
    heap.extract_min();

    assert!(heap.decrease_key(3, 10, 0));
    assert!(heap.decrease_key(2, 4, 0));
    assert!(heap.is_consistent());

    // Not an improvement
    assert!(!heap.decrease_key(3, 10, 2));
    assert!(!heap.decrease_key(3, 11, 2));
    // Improvement through another vertex
    assert!(heap.decrease_key(3, 6, 2));
    assert!(heap.is_consistent());

    let a = heap.extract_min().unwrap();
    assert_eq!((a.vertex, a.distance, a.predecessor), (2, Distance::Finite(4), Some(0)));
    let b = heap.extract_min().unwrap();
    assert_eq!((b.vertex, b.distance, b.predecessor), (3, Distance::Finite(6), Some(2)));

    let rest = heap.extract_min().unwrap();
    assert!(rest.distance.is_infinite());
}

#[test]
fn test_decrease_key_ignores_absent_vertices() {
    let mut heap = IndexedMinHeap::with_source(2, 0);
    heap.extract_min();

    assert!(!heap.decrease_key(0, 0, 1));
    assert!(!heap.decrease_key(7, 0, 1));
    assert!(heap.is_consistent());
}

#[test]
fn test_insert_builds_heap_incrementally() {
    let mut heap = IndexedMinHeap::new(4);
    assert!(heap.is_empty());
    assert!(heap.insert(2, Distance::Finite(5)));
    assert!(heap.insert(0, Distance::Infinite));
    assert!(heap.insert(3, Distance::Finite(1)));
    assert!(!heap.insert(3, Distance::Finite(0)), "duplicate insert must be rejected");
    assert!(!heap.insert(9, Distance::Finite(0)), "out of range insert must be rejected");
    assert!(heap.is_consistent());

    let order: Vec<usize> = std::iter::from_fn(|| heap.extract_min()).map(|e| e.vertex).collect();
    assert_eq!(order, vec![3, 2, 0]);
    assert_eq!(heap.capacity(), 4);
}

#[test]
fn test_random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let n = 200;
    let mut heap = IndexedMinHeap::with_source(n, 17);
    let mut last = 0u64;
    let mut extracted = vec![false; n];

    while !heap.is_empty() {
        for _ in 0..rng.gen_range(0..8) {
            let v = rng.gen_range(0..n);
            // Never below the last extracted key so the drained order stays sorted
            let key = last + rng.gen_range(0..1_000);
            let before = heap.distance(v);
            let applied = heap.decrease_key(v, key, 17);
            match before {
                Some(current) => assert_eq!(applied, Distance::Finite(key) < current),
                None => assert!(!applied),
            }
            assert!(heap.is_consistent());
        }

        let entry = heap.extract_min().unwrap();
        assert!(heap.is_consistent());
        assert!(!extracted[entry.vertex]);
        extracted[entry.vertex] = true;

        if let Distance::Finite(d) = entry.distance {
            assert!(d >= last, "extracted keys must be non-decreasing");
            last = d;
        }
        if let Some(next) = heap.peek() {
            assert!(next.distance >= entry.distance);
        }
    }

    assert!(extracted.iter().all(|&e| e));
}
