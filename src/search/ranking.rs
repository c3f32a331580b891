//! Ordering, competition ranks and pagination

use std::cmp::Ordering;

use uuid::Uuid;

/// Values closer than this share a rank
pub const RANK_TOLERANCE: f64 = 1e-9;

/// Standard competition ranks ("1224") with the highest value ranked 1
pub fn competition_ranks(values: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0u32; values.len()];
    let mut current_rank = 1u32;
    // First (highest) value of the current tie group
    let mut group_value = order.first().map(|&idx| values[idx]);
    for (position, &idx) in order.iter().enumerate() {
        if let Some(leader) = group_value {
            if (leader - values[idx]).abs() > RANK_TOLERANCE {
                current_rank = position as u32 + 1;
                group_value = Some(values[idx]);
            }
        }
        ranks[idx] = current_rank;
    }
    ranks
}

/// Score descending, product id ascending on ties
pub fn compare_ranked(a: (f64, &Uuid), b: (f64, &Uuid)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// The `top_k` items starting at `offset`; empty once `offset` passes the end
pub fn paginate<T>(items: Vec<T>, offset: usize, top_k: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(top_k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_ranking_with_ties() {
        let ranks = competition_ranks(&[3.0, 4.0, 3.0, 1.0]);
        assert_eq!(ranks, vec![2, 1, 2, 4]);
    }

    #[test]
    fn test_ranks_within_tolerance_tie() {
        let ranks = competition_ranks(&[2.0, 2.0 + 1e-12, 1.5]);
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn test_near_ties_do_not_chain() {
        // Each step is within tolerance of its neighbour but not of the group leader
        let values = [1.0, 1.0 - 0.6e-9, 1.0 - 1.2e-9, 1.0 - 1.8e-9];
        assert_eq!(competition_ranks(&values), vec![1, 1, 3, 3]);
    }

    #[test]
    fn test_rank_monotonicity() {
        let values = [0.5, 2.75, 2.75, 3.1, 0.0, 1.2, 3.1];
        let ranks = competition_ranks(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] > values[j] + RANK_TOLERANCE {
                    assert!(ranks[i] < ranks[j]);
                }
            }
        }
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn test_ties_ordered_by_id() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        assert_eq!(compare_ranked((0.5, &a), (0.5, &b)), Ordering::Less);
        assert_eq!(compare_ranked((0.4, &a), (0.5, &b)), Ordering::Greater);
    }

    #[test]
    fn test_pagination_covers_every_item_once() {
        let items: Vec<u32> = (0..23).collect();
        for top_k in 1..=7 {
            let mut seen = Vec::new();
            let mut offset = 0;
            while offset < items.len() {
                seen.extend(paginate(items.clone(), offset, top_k));
                offset += top_k;
            }
            assert_eq!(seen, items);
        }
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        assert!(paginate(vec![1, 2, 3], 3, 5).is_empty());
        assert!(paginate(vec![1, 2, 3], 10, 5).is_empty());
        assert_eq!(paginate(vec![1, 2, 3], 1, 5), vec![2, 3]);
    }
}
