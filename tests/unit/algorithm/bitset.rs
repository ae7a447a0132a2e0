//! Tests for `TileBitset` operations over catalog slots

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 10);
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = TileBitset::new(10);
        bitset.insert(5);
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.count(), 1);
    }

    // Tests out-of-range slots are ignored rather than growing the set
    // Verified by removing the capacity check in insert
    #[test]
    fn test_insert_out_of_range() {
        let mut bitset = TileBitset::new(4);
        bitset.insert(4);
        bitset.insert(100);
        assert!(bitset.is_empty());
        assert!(!bitset.contains(100));
    }

    // Tests intersection of two bitsets returns correct elements
    // Verified by changing intersection operation to union operation
    #[test]
    fn test_intersection() {
        let mut set1 = TileBitset::new(10);
        set1.insert(1);
        set1.insert(3);
        set1.insert(5);

        let mut set2 = TileBitset::new(10);
        set2.insert(3);
        set2.insert(5);
        set2.insert(7);

        assert_eq!(set1.intersection(&set2).to_vec(), vec![3, 5]);

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 3, 5, 7]);
    }

    // Tests slot 0 is a real slot and the full set covers 0..capacity
    // Verified by starting the all-ones range at 1
    #[test]
    fn test_all_bits_set() {
        let mut bitset = TileBitset::all(5);
        assert_eq!(bitset.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(!bitset.contains(5));

        bitset.clear();
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 5);
    }
}
