use serde::{Deserialize, Serialize};

use crate::selection::SelectionState;

/// Kinds of purchasable line items attached to an event.
///
/// The backend is free to introduce new kinds; anything unrecognized
/// deserializes to `Other` and is treated purely by its flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionKind {
    ClubFee,
    Travel,
    Ticket,
    #[serde(other)]
    Other,
}

/// A purchasable line item for an event, priced in minor currency
/// units (cents).
///
/// Flags: `required` items are always included and never
/// user-toggleable; `selectable` items may be toggled; inactive items
/// are excluded from display and totals entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOption {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub label: String,
    pub price_cents: i32,
    #[serde(rename = "is_required")]
    pub required: bool,
    #[serde(rename = "is_selectable")]
    pub selectable: bool,
    // Missing on older backends, which means active.
    #[serde(rename = "is_active", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl EventOption {
    /// Whether the user may flip this option on and off. Required
    /// items are included unconditionally and never toggleable, even
    /// if the backend marks them selectable by mistake.
    pub fn is_toggleable(&self) -> bool {
        self.selectable && !self.required
    }
}

/// The active option set for one event, as loaded from the backend.
///
/// Construction drops inactive options, so everything downstream
/// (display, selection, totals) only ever sees bookable items.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<EventOption>,
}

impl OptionSet {
    pub fn from_backend(raw: Vec<EventOption>) -> Self {
        Self {
            options: raw.into_iter().filter(|o| o.active).collect(),
        }
    }

    pub fn options(&self) -> &[EventOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, option_id: i64) -> Option<&EventOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// True when the set carries the mandatory club fee. Booking must
    /// not proceed without one; its absence is an event configuration
    /// error on the backend side.
    pub fn has_required_club_fee(&self) -> bool {
        self.options
            .iter()
            .any(|o| o.kind == OptionKind::ClubFee && o.required)
    }

    /// Default selection after a (re)load: every toggleable option is
    /// opted in.
    pub fn default_selection(&self) -> SelectionState {
        SelectionState::from_ids(
            self.options
                .iter()
                .filter(|o| o.is_toggleable())
                .map(|o| o.id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club_fee(id: i64, price_cents: i32) -> EventOption {
        EventOption {
            id,
            kind: OptionKind::ClubFee,
            label: "Club Fee".to_string(),
            price_cents,
            required: true,
            selectable: false,
            active: true,
        }
    }

    fn travel(id: i64, price_cents: i32) -> EventOption {
        EventOption {
            id,
            kind: OptionKind::Travel,
            label: "Travel".to_string(),
            price_cents,
            required: false,
            selectable: true,
            active: true,
        }
    }

    #[test]
    fn inactive_options_are_dropped_at_construction() {
        let mut ticket = travel(3, 1500);
        ticket.kind = OptionKind::Ticket;
        ticket.active = false;

        let set = OptionSet::from_backend(vec![club_fee(1, 2000), travel(2, 500), ticket]);
        assert_eq!(set.options().len(), 2);
        assert!(set.get(3).is_none());
    }

    #[test]
    fn default_selection_opts_into_all_toggleable_options() {
        let set = OptionSet::from_backend(vec![club_fee(1, 2000), travel(2, 500), travel(4, 800)]);
        let selection = set.default_selection();
        assert!(selection.is_selected(2));
        assert!(selection.is_selected(4));
        assert!(!selection.is_selected(1));
    }

    #[test]
    fn club_fee_detection_requires_the_required_flag() {
        let mut fee = club_fee(1, 2000);
        fee.required = false;
        let set = OptionSet::from_backend(vec![fee, travel(2, 500)]);
        assert!(!set.has_required_club_fee());

        let set = OptionSet::from_backend(vec![club_fee(1, 2000)]);
        assert!(set.has_required_club_fee());
    }

    #[test]
    fn unknown_kind_and_missing_active_flag_parse_leniently() {
        let json = r#"[
            {"id": 1, "type": "CLUB_FEE", "label": "Club Fee", "price_cents": 2000,
             "is_required": true, "is_selectable": false},
            {"id": 2, "type": "SPA_UPGRADE", "label": "Spa", "price_cents": 900,
             "is_required": false, "is_selectable": true, "is_active": true}
        ]"#;
        let raw: Vec<EventOption> = serde_json::from_str(json).unwrap();
        let set = OptionSet::from_backend(raw);

        assert!(set.get(1).unwrap().active);
        assert_eq!(set.get(2).unwrap().kind, OptionKind::Other);
        assert!(set.get(2).unwrap().is_toggleable());
    }
}
