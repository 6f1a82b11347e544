use snb_shared::format_minor_units;

use crate::option::OptionSet;
use crate::selection::SelectionState;

/// Derived price total for the current selection. Never stored;
/// recomputed on every selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    total_cents: i64,
}

impl Quote {
    /// Sum of all required options plus the toggleable options that
    /// are currently selected. Inactive options never reach here (the
    /// `OptionSet` drops them at construction).
    pub fn for_selection(options: &OptionSet, selection: &SelectionState) -> Self {
        let total_cents = options
            .options()
            .iter()
            .filter(|o| o.required || (o.is_toggleable() && selection.is_selected(o.id)))
            .map(|o| i64::from(o.price_cents))
            .sum();
        Self { total_cents }
    }

    pub fn total_cents(&self) -> i64 {
        self.total_cents
    }

    pub fn display(&self, currency: &str) -> String {
        format_minor_units(self.total_cents, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{EventOption, OptionKind};

    fn option_set() -> OptionSet {
        OptionSet::from_backend(vec![
            EventOption {
                id: 1,
                kind: OptionKind::ClubFee,
                label: "Club Fee".to_string(),
                price_cents: 2000,
                required: true,
                selectable: false,
                active: true,
            },
            EventOption {
                id: 2,
                kind: OptionKind::Travel,
                label: "Travel".to_string(),
                price_cents: 500,
                required: false,
                selectable: true,
                active: true,
            },
        ])
    }

    #[test]
    fn required_fee_plus_selected_travel() {
        let options = option_set();
        let selection = options.default_selection();
        let quote = Quote::for_selection(&options, &selection);
        assert_eq!(quote.total_cents(), 2500);
        assert_eq!(quote.display("CHF"), "25.00 CHF");
    }

    #[test]
    fn deselecting_travel_leaves_only_the_fee() {
        let options = option_set();
        let mut selection = options.default_selection();
        selection.toggle(&options, 2).unwrap();
        let quote = Quote::for_selection(&options, &selection);
        assert_eq!(quote.total_cents(), 2000);
    }

    #[test]
    fn double_toggle_restores_the_total() {
        let options = option_set();
        let mut selection = options.default_selection();
        let before = Quote::for_selection(&options, &selection);

        selection.toggle(&options, 2).unwrap();
        selection.toggle(&options, 2).unwrap();

        let after = Quote::for_selection(&options, &selection);
        assert_eq!(before, after);
    }

    #[test]
    fn inactive_option_never_contributes() {
        let travel = EventOption {
            id: 3,
            kind: OptionKind::Travel,
            label: "Bus".to_string(),
            price_cents: 900,
            required: false,
            selectable: true,
            active: false,
        };
        let options = OptionSet::from_backend(vec![travel]);
        let selection = SelectionState::from_ids([3]);
        assert_eq!(Quote::for_selection(&options, &selection).total_cents(), 0);
    }

    #[test]
    fn empty_set_quotes_a_dash() {
        let options = OptionSet::from_backend(vec![]);
        let quote = Quote::for_selection(&options, &SelectionState::default());
        assert_eq!(quote.display("CHF"), "–");
    }
}
