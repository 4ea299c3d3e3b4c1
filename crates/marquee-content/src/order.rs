//! Sidebar ordering.
//!
//! Entries with a `sidebar_position` sort by it. Entries without one keep
//! their declaration slot: the n-th declared entry sorts as if it had
//! position n, after any positioned entry sharing that slot.

/// Order `(item, position)` pairs given in declaration order.
pub fn order_by_position<T>(items: Vec<(T, Option<f64>)>) -> Vec<T> {
    let mut keyed: Vec<(f64, bool, usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(index, (item, position))| {
            let slot = position.unwrap_or((index + 1) as f64);
            (slot, position.is_none(), index, item)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    keyed.into_iter().map(|(_, _, _, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn positioned_entries_sort_by_position() {
        let ordered = order_by_position(vec![
            ("c", Some(3.0)),
            ("a", Some(1.0)),
            ("b", Some(2.0)),
        ]);
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn unpositioned_entries_keep_declaration_order() {
        let ordered = order_by_position(vec![("x", None), ("y", None), ("z", None)]);
        assert_eq!(ordered, vec!["x", "y", "z"]);
    }

    #[test]
    fn unpositioned_entries_take_their_natural_slot() {
        // slots: intro=1 (declared first), setup=1 (explicit), faq=3, api=10
        let ordered = order_by_position(vec![
            ("intro", None),
            ("setup", Some(1.0)),
            ("faq", None),
            ("api", Some(10.0)),
            ("roadmap", Some(0.5)),
        ]);
        assert_eq!(ordered, vec!["roadmap", "setup", "intro", "faq", "api"]);
    }

    #[test]
    fn mixed_lists_obey_the_ordering_law() {
        let input = vec![
            ("u1", None),
            ("p3", Some(7.0)),
            ("u2", None),
            ("p1", Some(-1.0)),
            ("u3", None),
            ("p2", Some(2.5)),
            ("u4", None),
        ];
        let ordered = order_by_position(input.clone());

        let positioned: Vec<_> = ordered.iter().filter(|n| n.starts_with('p')).collect();
        assert_eq!(positioned, vec![&"p1", &"p2", &"p3"]);

        let unpositioned: Vec<_> = ordered.iter().filter(|n| n.starts_with('u')).collect();
        assert_eq!(unpositioned, vec![&"u1", &"u2", &"u3", &"u4"]);

        assert_eq!(ordered.len(), input.len());
    }
}
