//! Offset/limit pagination shared by the read-only queries

/// Items `offset..offset + limit`. `limit == 0` reads to the end and an
/// offset past the end yields an empty page.
pub fn page<T>(items: impl Iterator<Item = T>, offset: usize, limit: usize) -> Vec<T> {
    let take = if limit == 0 { usize::MAX } else { limit };
    items.skip(offset).take(take).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_requests() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(page(items.iter().copied(), 0, 0), vec![1, 2, 3, 4, 5]);
        assert_eq!(page(items.iter().copied(), 1, 2), vec![2, 3]);
        assert_eq!(page(items.iter().copied(), 3, 99), vec![4, 5]);
        assert!(page(items.iter().copied(), 5, 1).is_empty());
        assert!(page(items.iter().copied(), usize::MAX, 0).is_empty());
    }
}
