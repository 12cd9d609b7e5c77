pub mod view;

pub use view::{CatalogView, SortMode};
