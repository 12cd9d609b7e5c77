pub mod comparator;
pub mod identifier;

pub use comparator::{compare_ids, Direction};
pub use identifier::{parse_card_id, OrderingKey};
