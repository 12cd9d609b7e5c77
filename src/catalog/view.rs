use crate::domain::Card;
use crate::ordering::{compare_ids, Direction};

/// The four catalog orderings users can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    EloDesc,
    EloAsc,
    IdAsc,
    IdDesc,
}

impl SortMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "elo_desc" => Some(SortMode::EloDesc),
            "elo_asc" => Some(SortMode::EloAsc),
            "id_asc" => Some(SortMode::IdAsc),
            "id_desc" => Some(SortMode::IdDesc),
            _ => None,
        }
    }

    /// Wire name, also used as the advisory `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::EloDesc => "elo_desc",
            SortMode::EloAsc => "elo_asc",
            SortMode::IdAsc => "id_asc",
            SortMode::IdDesc => "id_desc",
        }
    }
}

/// Client-local window over a catalog listing.
///
/// Pages fetched from the service are appended raw; every ordering is
/// derived from that cached window, so switching sort modes never requires
/// a refetch. The server-reported total decides when loading more stops.
#[derive(Debug, Clone)]
pub struct CatalogView {
    raw: Vec<Card>,
    total: Option<usize>,
    sort: SortMode,
    page_size: usize,
}

impl CatalogView {
    pub fn new(sort: SortMode, page_size: usize) -> Self {
        Self {
            raw: Vec::new(),
            total: None,
            sort,
            page_size,
        }
    }

    /// Append one fetched page and record the authoritative total.
    pub fn append_page(&mut self, items: Vec<Card>, total: usize) {
        self.raw.extend(items);
        self.total = Some(total);
    }

    /// Drop the fetched window, e.g. when the backing facet changes.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.total = None;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next_offset(&self) -> usize {
        self.raw.len()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn total(&self) -> usize {
        self.total.unwrap_or(0)
    }

    /// Whether the server has confirmed there is nothing left to load.
    pub fn is_exhausted(&self) -> bool {
        match self.total {
            Some(total) => self.raw.len() >= total,
            None => false,
        }
    }

    /// The fetched window in the requested order. Stable: cards comparing
    /// equal keep their fetched relative order.
    pub fn items(&self) -> Vec<Card> {
        let mut items = self.raw.clone();
        match self.sort {
            SortMode::EloDesc => items.sort_by(|a, b| b.elo.total_cmp(&a.elo)),
            SortMode::EloAsc => items.sort_by(|a, b| a.elo.total_cmp(&b.elo)),
            SortMode::IdAsc => items.sort_by(|a, b| compare_ids(&a.id, &b.id, Direction::Asc)),
            SortMode::IdDesc => items.sort_by(|a, b| compare_ids(&a.id, &b.id, Direction::Desc)),
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn card(id: &str, elo: f64) -> Card {
        Card {
            id: id.to_string(),
            name: format!("Card {id}"),
            image: String::new(),
            set_name: "Base".to_string(),
            series: "Original".to_string(),
            artist: None,
            elo,
            games_played: 0,
            wins: 0,
            losses: 0,
            elo_history: None,
        }
    }

    fn ids(items: &[Card]) -> Vec<&str> {
        items.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn id_ascending_keeps_numeric_block_first() {
        let mut view = CatalogView::new(SortMode::IdAsc, 25);
        view.append_page(
            vec![
                card("set-5", 1000.0),
                card("set-RC1", 1200.0),
                card("set-10", 900.0),
                card("set-RC2", 1100.0),
            ],
            4,
        );

        assert_eq!(ids(&view.items()), ["set-5", "set-10", "set-RC1", "set-RC2"]);
    }

    #[test]
    fn id_descending_reverses_within_blocks_only() {
        let mut view = CatalogView::new(SortMode::IdDesc, 25);
        view.append_page(
            vec![
                card("set-5", 1000.0),
                card("set-RC1", 1200.0),
                card("set-10", 900.0),
                card("set-RC2", 1100.0),
            ],
            4,
        );

        assert_eq!(ids(&view.items()), ["set-10", "set-5", "set-RC2", "set-RC1"]);
    }

    #[test]
    fn elo_sorts_order_by_rating() {
        let mut view = CatalogView::new(SortMode::EloDesc, 25);
        view.append_page(
            vec![card("a-1", 950.0), card("a-2", 1200.0), card("a-3", 1000.0)],
            3,
        );

        assert_eq!(ids(&view.items()), ["a-2", "a-3", "a-1"]);

        view.set_sort(SortMode::EloAsc);
        assert_eq!(ids(&view.items()), ["a-1", "a-3", "a-2"]);
    }

    #[test]
    fn changing_sort_mode_preserves_the_fetched_set() {
        let mut view = CatalogView::new(SortMode::EloDesc, 25);
        view.append_page(
            vec![card("b-1", 900.0), card("b-RC4", 1300.0), card("b-12", 1010.0)],
            3,
        );

        let before: BTreeSet<String> =
            view.items().into_iter().map(|c| c.id).collect();
        view.set_sort(SortMode::IdAsc);
        let after: BTreeSet<String> =
            view.items().into_iter().map(|c| c.id).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn load_more_appends_and_total_gates_exhaustion() {
        let mut view = CatalogView::new(SortMode::EloDesc, 2);
        assert!(!view.is_exhausted());

        view.append_page(vec![card("a-1", 1000.0), card("a-2", 990.0)], 3);
        assert_eq!(view.next_offset(), 2);
        assert!(!view.is_exhausted());

        view.append_page(vec![card("a-3", 980.0)], 3);
        assert_eq!(view.len(), 3);
        assert!(view.is_exhausted());
    }

    #[test]
    fn empty_listing_is_exhausted_after_first_page() {
        let mut view = CatalogView::new(SortMode::EloDesc, 25);
        view.append_page(Vec::new(), 0);
        assert!(view.is_exhausted());
        assert!(view.items().is_empty());
    }
}
