//! Main-axis space distribution.
//!
//! Splits a container's main-axis extent between fixed-size and proportional
//! items:
//!
//! 1. Fixed items keep their size.
//! 2. The remaining free space is shared by proportional items by weight,
//!    rounding each share down.
//! 3. The rounding remainder goes to proportional items in order, one cell
//!    each, so the shares always add up to the free space exactly.
//!
//! Malformed rules never fail: a negative fixed size or a proportion below 1
//! yields a zero-length item, and negative free space gives proportional
//! items zero length.

/// Sizing rule of one item along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemSize {
    /// Fixed length in cells, 0 for proportional sizing.
    pub fixed: i32,
    /// Relative weight among proportional items; ignored for fixed items.
    pub proportion: i32,
}

impl ItemSize {
    pub const fn fixed(size: i32) -> Self {
        Self {
            fixed: size,
            proportion: 0,
        }
    }

    pub const fn proportional(proportion: i32) -> Self {
        Self {
            fixed: 0,
            proportion,
        }
    }

    #[inline]
    pub const fn is_proportional(&self) -> bool {
        self.fixed == 0
    }

    /// Weight used for distribution (0 for fixed or malformed items).
    #[inline]
    const fn weight(&self) -> i64 {
        if self.fixed == 0 && self.proportion > 0 {
            self.proportion as i64
        } else {
            0
        }
    }
}

/// Compute the main-axis length of every item.
pub fn distribute(extent: i32, items: &[ItemSize]) -> Vec<i32> {
    let fixed_total: i64 = items.iter().map(|item| item.fixed.max(0) as i64).sum();
    let proportion_total: i64 = items.iter().map(ItemSize::weight).sum();
    let free = (extent as i64 - fixed_total).max(0);

    let mut sizes: Vec<i32> = items
        .iter()
        .map(|item| {
            if item.fixed != 0 {
                item.fixed.max(0)
            } else if proportion_total > 0 {
                (free * item.weight() / proportion_total) as i32
            } else {
                0
            }
        })
        .collect();

    if proportion_total > 0 {
        let shared: i64 = items
            .iter()
            .zip(&sizes)
            .filter(|(item, _)| item.weight() > 0)
            .map(|(_, size)| *size as i64)
            .sum();
        let mut remainder = free - shared;

        for (item, size) in items.iter().zip(sizes.iter_mut()) {
            if remainder <= 0 {
                break;
            }
            if item.weight() > 0 {
                *size += 1;
                remainder -= 1;
            }
        }
    }

    sizes
}

/// Start offsets along the main axis for consecutive `sizes`, beginning at `origin`.
pub fn offsets(origin: i32, sizes: &[i32]) -> Vec<i32> {
    sizes
        .iter()
        .scan(origin, |pos, size| {
            let start = *pos;
            *pos = pos.saturating_add(*size);
            Some(start)
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_and_proportional() {
        let sizes = distribute(
            100,
            &[ItemSize::fixed(10), ItemSize::proportional(1), ItemSize::proportional(3)],
        );
        assert_eq!(sizes, vec![10, 23, 67]);
        assert_eq!(sizes.iter().sum::<i32>(), 100);
    }

    #[test]
    fn test_remainder_goes_to_first_items() {
        let sizes = distribute(10, &[ItemSize::proportional(1); 3]);
        assert_eq!(sizes, vec![4, 3, 3]);

        let sizes = distribute(11, &[ItemSize::proportional(1); 3]);
        assert_eq!(sizes, vec![4, 4, 3]);
    }

    #[test]
    fn test_negative_free_space_gives_zero() {
        let sizes = distribute(5, &[ItemSize::fixed(8), ItemSize::proportional(2)]);
        assert_eq!(sizes, vec![8, 0]);
    }

    #[test]
    fn test_malformed_items_degrade_to_zero() {
        let sizes = distribute(
            12,
            &[
                ItemSize::fixed(-4),
                ItemSize::proportional(0),
                ItemSize::proportional(-2),
                ItemSize::proportional(1),
            ],
        );
        assert_eq!(sizes, vec![0, 0, 0, 12]);
    }

    #[test]
    fn test_no_proportional_items() {
        let sizes = distribute(50, &[ItemSize::fixed(10), ItemSize::fixed(5)]);
        assert_eq!(sizes, vec![10, 5]);
        assert!(distribute(50, &[]).is_empty());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let items = [ItemSize::proportional(2), ItemSize::fixed(3), ItemSize::proportional(5)];
        let first = distribute(77, &items);
        for _ in 0..10 {
            assert_eq!(distribute(77, &items), first);
        }
    }

    #[test]
    fn test_offsets() {
        assert_eq!(offsets(4, &[3, 0, 5]), vec![4, 7, 7]);
        assert!(offsets(0, &[]).is_empty());
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let sizes = distribute(
            20,
            &[ItemSize::fixed(i32::MAX), ItemSize::fixed(5), ItemSize::proportional(1)],
        );
        assert_eq!(sizes, vec![i32::MAX, 5, 0]);
        assert_eq!(offsets(3, &sizes), vec![3, i32::MAX, i32::MAX]);
    }
}
