use crate::selector::Selector;
use crate::types::GapCell;

/// Orders cells by descending gap score, optionally keeping the top K.
#[derive(Default)]
pub struct GapScoreSelector {
    pub limit: Option<usize>,
}

impl<'a> Selector<&'a GapCell> for GapScoreSelector {
    fn score(&self, candidate: &&'a GapCell) -> f64 {
        candidate.gap_score
    }

    fn size(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_input_order() {
        let cells = [
            GapCell::new("Snacks", "A", "200+", "none", 0.5),
            GapCell::new("Snacks", "B", "200+", "none", 0.9),
            GapCell::new("Snacks", "C", "200+", "none", 0.5),
            GapCell::new("Snacks", "D", "200+", "none", 0.9),
        ];
        let selected = GapScoreSelector::default().select(cells.iter().collect());
        let order: Vec<_> = selected.iter().map(|c| c.sub_category.as_str()).collect();
        assert_eq!(order, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn top_k_truncates() {
        let cells = [
            GapCell::new("Snacks", "A", "200+", "none", 0.1),
            GapCell::new("Snacks", "B", "200+", "none", 0.2),
            GapCell::new("Snacks", "C", "200+", "none", 0.3),
        ];
        let selected = GapScoreSelector { limit: Some(2) }.select(cells.iter().collect());
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].sub_category, "C");
        assert_eq!(selected[1].sub_category, "B");
    }

    #[test]
    fn name_is_short_type_name() {
        let selector = GapScoreSelector::default();
        assert_eq!(Selector::<&GapCell>::name(&selector), "GapScoreSelector");
    }
}
