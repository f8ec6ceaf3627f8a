//! Menu Item Model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::category::Category;

/// Option group selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one option may be chosen
    Single,
    /// Any number of options may be chosen
    Multiple,
}

/// Customization option (embedded in OptionGroup)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub name: String,
    /// Price delta in minor currency units, >= 0 (validated at authoring time)
    pub price: i64,
}

/// Option group (embedded in MenuItem, not shared across items)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: String,
    pub name: String,
    pub mode: SelectionMode,
    /// single + required: exactly one option must be chosen;
    /// multiple + required: at least one
    pub required: bool,
    pub options: Vec<MenuOption>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Base price in minor currency units
    pub price: i64,
    /// Category reference (by category name, checked by the application layer)
    pub category: String,
    pub image_url: String,
    /// Visible but not orderable when false
    pub available: bool,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(min = 1))]
    pub category: String,
    pub image_url: Option<String>,
    pub available: Option<bool>,
    pub option_groups: Option<Vec<OptionGroup>>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
    pub option_groups: Option<Vec<OptionGroup>>,
}

impl OptionGroup {
    /// Whether `option_name` belongs to this group
    pub fn contains(&self, option_name: &str) -> bool {
        self.options.iter().any(|o| o.name == option_name)
    }
}

/// Option deltas must be non-negative; enforced when staff author a group,
/// not re-validated at price-compute time.
pub fn validate_option_groups(groups: &[OptionGroup]) -> Result<(), String> {
    for group in groups {
        if group.options.is_empty() {
            return Err(format!("option group '{}' has no options", group.name));
        }
        for option in &group.options {
            if option.price < 0 {
                return Err(format!(
                    "option '{}' in group '{}' has a negative price delta",
                    option.name, group.name
                ));
            }
        }
    }
    Ok(())
}

/// Order menu items for display: category display order first, then item
/// name. Items whose category is unknown sort last, grouped by the raw
/// category string.
pub fn sorted_for_display(mut items: Vec<MenuItem>, categories: &[Category]) -> Vec<MenuItem> {
    let rank: HashMap<&str, i32> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.display_order))
        .collect();
    items.sort_by(|a, b| {
        let ra = rank.get(a.category.as_str()).copied().unwrap_or(i32::MAX);
        let rb = rank.get(b.category.as_str()).copied().unwrap_or(i32::MAX);
        ra.cmp(&rb)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.name.cmp(&b.name))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, options: Vec<(&str, i64)>) -> OptionGroup {
        OptionGroup {
            id: format!("grp_{name}"),
            name: name.to_string(),
            mode: SelectionMode::Single,
            required: false,
            options: options
                .into_iter()
                .map(|(n, p)| MenuOption {
                    name: n.to_string(),
                    price: p,
                })
                .collect(),
        }
    }

    #[test]
    fn negative_delta_rejected_at_authoring() {
        let groups = vec![group("size", vec![("large", 20), ("small", -10)])];
        let err = validate_option_groups(&groups).unwrap_err();
        assert!(err.contains("small"));
        assert!(err.contains("size"));
    }

    #[test]
    fn empty_group_rejected() {
        let groups = vec![group("spice", vec![])];
        assert!(validate_option_groups(&groups).is_err());
    }

    #[test]
    fn zero_delta_is_legal() {
        let groups = vec![group("spice", vec![("mild", 0), ("hot", 0)])];
        assert!(validate_option_groups(&groups).is_ok());
    }

    fn menu_item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            id: Some(format!("item_{name}")),
            name: name.to_string(),
            description: None,
            price: 100,
            category: category.to_string(),
            image_url: String::new(),
            available: true,
            option_groups: vec![],
        }
    }

    fn category(name: &str, display_order: i32) -> Category {
        Category {
            id: Some(format!("cat_{name}")),
            name: name.to_string(),
            display_order,
            created_at: None,
        }
    }

    #[test]
    fn display_sort_uses_category_display_order_not_name() {
        // "soups" outranks "appetizers" despite sorting after it lexically
        let categories = vec![category("soups", 1), category("appetizers", 2)];
        let items = vec![
            menu_item("Spring Rolls", "appetizers"),
            menu_item("Wonton Soup", "soups"),
            menu_item("Hot and Sour Soup", "soups"),
        ];

        let sorted = sorted_for_display(items, &categories);
        let names: Vec<&str> = sorted.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["Hot and Sour Soup", "Wonton Soup", "Spring Rolls"]
        );
    }

    #[test]
    fn unknown_categories_sort_last() {
        let categories = vec![category("soups", 1)];
        let items = vec![
            menu_item("Mystery Dish", "specials"),
            menu_item("Wonton Soup", "soups"),
        ];

        let sorted = sorted_for_display(items, &categories);
        assert_eq!(sorted[0].name, "Wonton Soup");
        assert_eq!(sorted[1].name, "Mystery Dish");
    }
}
