use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::option::OptionSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown option id: {0}")]
    UnknownOption(i64),

    #[error("Option {0} is not user-toggleable")]
    NotToggleable(i64),
}

/// The set of currently chosen optional option ids for one event.
///
/// Only explicit toggles mutate it; loading options replaces it
/// wholesale with the option set's default selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<i64>,
}

impl SelectionState {
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    pub fn is_selected(&self, option_id: i64) -> bool {
        self.selected.contains(&option_id)
    }

    /// Selected ids in stable order, the shape the booking request
    /// body wants.
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Flip membership of one toggleable option. Returns whether the
    /// option is selected after the toggle. Required or unknown
    /// options are rejected rather than silently ignored.
    pub fn toggle(&mut self, options: &OptionSet, option_id: i64) -> Result<bool, SelectionError> {
        let option = options
            .get(option_id)
            .ok_or(SelectionError::UnknownOption(option_id))?;
        if !option.is_toggleable() {
            return Err(SelectionError::NotToggleable(option_id));
        }

        if self.selected.remove(&option_id) {
            Ok(false)
        } else {
            self.selected.insert(option_id);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{EventOption, OptionKind};

    fn options() -> OptionSet {
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
    fn toggle_flips_membership_both_ways() {
        let options = options();
        let mut selection = options.default_selection();

        assert!(selection.is_selected(2));
        assert_eq!(selection.toggle(&options, 2), Ok(false));
        assert!(!selection.is_selected(2));
        assert_eq!(selection.toggle(&options, 2), Ok(true));
        assert!(selection.is_selected(2));
    }

    #[test]
    fn required_option_cannot_be_toggled() {
        let options = options();
        let mut selection = options.default_selection();
        assert_eq!(
            selection.toggle(&options, 1),
            Err(SelectionError::NotToggleable(1))
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let options = options();
        let mut selection = options.default_selection();
        assert_eq!(
            selection.toggle(&options, 99),
            Err(SelectionError::UnknownOption(99))
        );
    }
}
