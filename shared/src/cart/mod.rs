//! Cart aggregation
//!
//! A cart is a list of lines, each line one distinct item+customization
//! combination with a quantity. Adding an item whose option selection set
//! matches an existing line (same item id, same options compared as a set
//! by name) increments that line instead of appending a new one.
//!
//! Line removal is always by line index: with duplicate item ids carrying
//! different customizations, removal by item id could decrement the wrong
//! line, so the caller must identify the exact line.

pub mod pricing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MenuItem, MenuOption};

/// Cart errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("'{0}' is currently unavailable")]
    ItemUnavailable(String),

    #[error("item '{0}' has no id")]
    MissingItemId(String),

    #[error("please choose an option for '{group}'")]
    RequiredGroup { group: String },

    #[error("'{group}' allows only one choice")]
    SingleChoiceExceeded { group: String },

    #[error("option '{option}' does not belong to '{item}'")]
    UnknownOption { option: String, item: String },

    #[error("option '{0}' selected more than once")]
    DuplicateOption(String),

    #[error("no cart line at index {0}")]
    LineIndex(usize),
}

/// Point-in-time copy of a menu item, immune to later menu edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: String,
    pub name: String,
    /// Base price in minor currency units at snapshot time
    pub price: i64,
    pub category: String,
    pub image_url: String,
}

impl ItemSnapshot {
    pub fn of(item: &MenuItem) -> Result<Self, CartError> {
        let item_id = item
            .id
            .clone()
            .ok_or_else(|| CartError::MissingItemId(item.name.clone()))?;
        Ok(Self {
            item_id,
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            image_url: item.image_url.clone(),
        })
    }
}

/// One distinct item+customization combination with a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: ItemSnapshot,
    pub quantity: u32,
    /// Normalized: sorted by option name, so set comparison is
    /// order-independent
    pub selected_options: Vec<MenuOption>,
}

impl CartLine {
    /// Effective unit price: base price plus the sum of option deltas
    pub fn unit_price(&self) -> i64 {
        pricing::effective_price(self.item.price, &self.selected_options)
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> i64 {
        self.unit_price() * i64::from(self.quantity)
    }
}

/// Client-local cart, pre-order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item` with the given option selection.
    ///
    /// Validates availability and required option groups, then either
    /// increments the matching line's quantity or appends a new line
    /// carrying a snapshot of the item.
    pub fn add(&mut self, item: &MenuItem, selections: Vec<MenuOption>) -> Result<(), CartError> {
        if !item.available {
            return Err(CartError::ItemUnavailable(item.name.clone()));
        }
        pricing::validate_selection(item, &selections)?;

        let snapshot = ItemSnapshot::of(item)?;
        let normalized = normalize_options(selections);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.item.item_id == snapshot.item_id && l.selected_options == normalized)
        {
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine {
            item: snapshot,
            quantity: 1,
            selected_options: normalized,
        });
        Ok(())
    }

    /// Decrement the line at `index` by one unit; the line is dropped when
    /// its quantity reaches zero.
    pub fn decrement_line(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.lines.get_mut(index).ok_or(CartError::LineIndex(index))?;
        if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.lines.remove(index);
        }
        Ok(())
    }

    /// Drop the entire line at `index` regardless of quantity
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineIndex(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Sum over lines of effective unit price x quantity
    pub fn total(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of line quantities
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sort a selection by option name so equal sets serialize identically
fn normalize_options(mut selections: Vec<MenuOption>) -> Vec<MenuOption> {
    selections.sort_by(|a, b| a.name.cmp(&b.name));
    selections
}
