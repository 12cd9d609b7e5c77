use std::cmp::Ordering;

use super::identifier::parse_card_id;

/// Within-block sort direction. Block ordering itself (numeric suffixes
/// before lettered ones) is fixed and never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// Canonical "set position" comparison of two card ids.
///
/// Cards with a purely numeric suffix form the first block, cards with a
/// lettered suffix the second, for both directions. Within the numeric
/// block: numeric value, then the full id lexically. Within the lettered
/// block: prefix, then numeric value, then the full id lexically. Every view
/// that shows cards in set order goes through this function so the relative
/// order is identical everywhere.
pub fn compare_ids(a: &str, b: &str, direction: Direction) -> Ordering {
    let key_a = parse_card_id(a);
    let key_b = parse_card_id(b);

    if key_a.has_alpha_prefix != key_b.has_alpha_prefix {
        return if key_a.has_alpha_prefix {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let within_block = if !key_a.has_alpha_prefix {
        key_a
            .numeric_value
            .total_cmp(&key_b.numeric_value)
            .then_with(|| a.cmp(b))
    } else {
        key_a
            .prefix
            .cmp(&key_b.prefix)
            .then_with(|| key_a.numeric_value.total_cmp(&key_b.numeric_value))
            .then_with(|| a.cmp(b))
    };

    direction.apply(within_block)
}
