//! Option pricing and selection validation
//!
//! Pure computation over in-memory data; no side effects.

use super::CartError;
use crate::models::{MenuItem, MenuOption, SelectionMode};

/// Effective unit price: base price plus the sum of selected option deltas.
///
/// Deltas are validated non-negative when a group is authored, not here;
/// a negative delta that slipped past authoring would reduce the price.
pub fn effective_price(base_price: i64, selections: &[MenuOption]) -> i64 {
    base_price + selections.iter().map(|o| o.price).sum::<i64>()
}

/// Validate an option selection against the item's option groups.
///
/// - a selection is a set: no option name may appear twice
/// - every selected option must belong to one of the item's groups
/// - required single group: exactly one option from the group
/// - optional single group: at most one
/// - required multiple group: at least one
///
/// Violations surface the offending group by name so the message can be
/// shown to the customer as-is.
pub fn validate_selection(item: &MenuItem, selections: &[MenuOption]) -> Result<(), CartError> {
    for (i, selected) in selections.iter().enumerate() {
        // A duplicate would also be counted twice below, pricing its
        // delta twice and forming a line distinct from the equal set.
        if selections[..i].iter().any(|o| o.name == selected.name) {
            return Err(CartError::DuplicateOption(selected.name.clone()));
        }
        if !item.option_groups.iter().any(|g| g.contains(&selected.name)) {
            return Err(CartError::UnknownOption {
                option: selected.name.clone(),
                item: item.name.clone(),
            });
        }
    }

    for group in &item.option_groups {
        let chosen = selections.iter().filter(|s| group.contains(&s.name)).count();
        match group.mode {
            SelectionMode::Single => {
                if chosen > 1 {
                    return Err(CartError::SingleChoiceExceeded {
                        group: group.name.clone(),
                    });
                }
                if group.required && chosen != 1 {
                    return Err(CartError::RequiredGroup {
                        group: group.name.clone(),
                    });
                }
            }
            SelectionMode::Multiple => {
                if group.required && chosen == 0 {
                    return Err(CartError::RequiredGroup {
                        group: group.name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionGroup;

    fn opt(name: &str, price: i64) -> MenuOption {
        MenuOption {
            name: name.to_string(),
            price,
        }
    }

    fn item_with_groups(groups: Vec<OptionGroup>) -> MenuItem {
        MenuItem {
            id: Some("1".to_string()),
            name: "Fried Rice".to_string(),
            description: None,
            price: 120,
            category: "rice-noodles".to_string(),
            image_url: String::new(),
            available: true,
            option_groups: groups,
        }
    }

    fn group(name: &str, mode: SelectionMode, required: bool, options: Vec<MenuOption>) -> OptionGroup {
        OptionGroup {
            id: format!("grp_{name}"),
            name: name.to_string(),
            mode,
            required,
            options,
        }
    }

    #[test]
    fn effective_price_adds_deltas() {
        let opts = vec![opt("large", 20), opt("egg", 15)];
        assert_eq!(effective_price(100, &opts), 135);
        assert_eq!(effective_price(100, &[]), 100);
    }

    #[test]
    fn required_single_needs_exactly_one() {
        let item = item_with_groups(vec![group(
            "size",
            SelectionMode::Single,
            true,
            vec![opt("small", 0), opt("large", 20)],
        )]);

        assert_eq!(
            validate_selection(&item, &[]),
            Err(CartError::RequiredGroup {
                group: "size".to_string()
            })
        );
        assert!(validate_selection(&item, &[opt("large", 20)]).is_ok());
        assert_eq!(
            validate_selection(&item, &[opt("small", 0), opt("large", 20)]),
            Err(CartError::SingleChoiceExceeded {
                group: "size".to_string()
            })
        );
    }

    #[test]
    fn required_multiple_needs_at_least_one() {
        let item = item_with_groups(vec![group(
            "toppings",
            SelectionMode::Multiple,
            true,
            vec![opt("egg", 15), opt("pork", 30)],
        )]);

        assert!(validate_selection(&item, &[]).is_err());
        assert!(validate_selection(&item, &[opt("egg", 15)]).is_ok());
        assert!(validate_selection(&item, &[opt("egg", 15), opt("pork", 30)]).is_ok());
    }

    #[test]
    fn optional_groups_may_contribute_nothing() {
        let item = item_with_groups(vec![group(
            "extras",
            SelectionMode::Multiple,
            false,
            vec![opt("basil", 10)],
        )]);
        assert!(validate_selection(&item, &[]).is_ok());
    }

    #[test]
    fn duplicate_option_names_are_rejected() {
        let item = item_with_groups(vec![group(
            "toppings",
            SelectionMode::Multiple,
            false,
            vec![opt("egg", 15), opt("pork", 30)],
        )]);

        assert_eq!(
            validate_selection(&item, &[opt("egg", 15), opt("egg", 15)]),
            Err(CartError::DuplicateOption("egg".to_string()))
        );
        assert!(validate_selection(&item, &[opt("egg", 15), opt("pork", 30)]).is_ok());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let item = item_with_groups(vec![]);
        assert_eq!(
            validate_selection(&item, &[opt("mystery", 5)]),
            Err(CartError::UnknownOption {
                option: "mystery".to_string(),
                item: "Fried Rice".to_string()
            })
        );
    }
}
