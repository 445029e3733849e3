#[cfg(test)]
mod tests {
    use super::super::transposition::*;

    fn entry(score: i64, depth: u32, bound: Bound) -> TTEntry<u32> {
        TTEntry {
            score,
            depth,
            bound,
            best_move: Some(depth),
        }
    }

    #[test]
    fn store_then_probe_returns_entry() {
        let table = TranspositionTable::new();
        table.store(42, entry(17, 3, Bound::Exact));

        let found = table.probe(42).expect("entry should exist");
        assert_eq!(found.score, 17);
        assert_eq!(found.depth, 3);
        assert_eq!(found.bound, Bound::Exact);
        assert_eq!(found.best_move, Some(3));
    }

    #[test]
    fn shallower_entry_does_not_replace_deeper() {
        let table = TranspositionTable::new();
        table.store(7, entry(100, 5, Bound::Exact));
        table.store(7, entry(-3, 2, Bound::Lower));

        let found = table.probe(7).unwrap();
        assert_eq!(found.score, 100);
        assert_eq!(found.depth, 5);
    }

    #[test]
    fn equal_or_deeper_entry_replaces() {
        let table = TranspositionTable::new();
        table.store(7, entry(100, 5, Bound::Exact));
        table.store(7, entry(50, 5, Bound::Upper));
        assert_eq!(table.probe(7).unwrap().score, 50);

        table.store(7, entry(9, 8, Bound::Lower));
        let found = table.probe(7).unwrap();
        assert_eq!(found.score, 9);
        assert_eq!(found.bound, Bound::Lower);
    }

    #[test]
    fn hit_and_miss_counters() {
        let table = TranspositionTable::new();
        table.store(1, entry(0, 1, Bound::Exact));

        assert!(table.probe(1).is_some());
        assert!(table.probe(2).is_none());
        assert!(table.probe(3).is_none());

        assert_eq!(table.hits(), 1);
        assert_eq!(table.misses(), 2);
    }

    #[test]
    fn clear_empties_table_and_counters() {
        let table = TranspositionTable::with_size_bytes(1 << 20);
        for hash in 0..100u64 {
            table.store(hash, entry(hash as i64, 1, Bound::Exact));
        }
        table.probe(5);
        assert_eq!(table.len(), 100);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.hits(), 0);
        assert_eq!(table.misses(), 0);
        assert!(table.probe(5).is_none());
    }

    #[test]
    fn tiny_budget_still_accepts_entries() {
        let table = TranspositionTable::with_size_bytes(0);
        for hash in 0..10u64 {
            table.store(hash, entry(0, 1, Bound::Exact));
        }
        assert_eq!(table.len(), 10);
    }
}
