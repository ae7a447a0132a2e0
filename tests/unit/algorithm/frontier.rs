//! Tests for the entropy-keyed frontier heap

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::frontier::{Frontier, PriorityUpdate};

    // Tests cells come out in ascending entropy order
    // Verified by flipping the comparison in sift_down
    #[test]
    fn test_extract_min_order() {
        let mut frontier = Frontier::new(8);
        for (handle, entropy) in [(0, 3.0), (1, 0.5), (2, 2.0), (3, 1.0), (4, 4.0)] {
            frontier.insert(handle, entropy);
        }

        let mut order = Vec::new();
        while let Some(handle) = frontier.extract_min() {
            order.push(handle);
        }
        assert_eq!(order, vec![1, 3, 2, 0, 4]);
        assert!(frontier.is_empty());
        assert_eq!(frontier.extract_min(), None);
    }

    // Tests lowering and raising a priority repositions the entry
    // Verified by skipping sift_up on a decreased key
    #[test]
    fn test_update_priority() {
        let mut frontier = Frontier::new(4);
        frontier.insert(0, 1.0);
        frontier.insert(1, 2.0);
        frontier.insert(2, 3.0);

        assert_eq!(frontier.update_priority(2, 0.1), PriorityUpdate::Updated);
        assert_eq!(frontier.peek(), Some(2));

        assert_eq!(frontier.update_priority(2, 9.0), PriorityUpdate::Updated);
        assert_eq!(frontier.peek(), Some(0));
        assert_eq!(frontier.priority_of(2), Some(9.0));
    }

    // Tests updating an absent cell reports NotFound and changes nothing
    // Verified by inserting the cell on a failed update
    #[test]
    fn test_update_missing() {
        let mut frontier = Frontier::new(4);
        frontier.insert(1, 1.0);

        assert_eq!(frontier.update_priority(3, 0.0), PriorityUpdate::NotFound);
        assert_eq!(frontier.update_priority(99, 0.0), PriorityUpdate::NotFound);
        assert_eq!(frontier.size(), 1);
        assert!(!frontier.contains(3));
    }

    // Tests inserting a queued handle again moves it instead of duplicating it
    // Verified by removing the update check at the top of insert
    #[test]
    fn test_insert_is_unique() {
        let mut frontier = Frontier::new(4);
        frontier.insert(1, 5.0);
        frontier.insert(2, 3.0);
        frontier.insert(1, 1.0);

        assert_eq!(frontier.size(), 2);
        assert_eq!(frontier.extract_min(), Some(1));
        assert_eq!(frontier.extract_min(), Some(2));
        assert_eq!(frontier.extract_min(), None);
    }

    // Tests handles beyond the initial capacity are accepted
    // Verified by dropping the positions resize in insert
    #[test]
    fn test_grows_past_capacity() {
        let mut frontier = Frontier::default();
        frontier.insert(10, 2.0);
        frontier.insert(3, 1.0);

        assert!(frontier.contains(10));
        assert_eq!(frontier.extract_min(), Some(3));
        assert_eq!(frontier.extract_min(), Some(10));
        assert!(!frontier.contains(10));
    }
}
