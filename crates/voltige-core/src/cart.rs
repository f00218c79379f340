//! Server-side cart state.
//!
//! Lines are keyed by a generated id; adding the same variant twice merges
//! quantities instead of duplicating the line. Prices are captured as
//! [`Decimal`] at add time so the subtotal stays exact.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Input for [`Cart::add`].
#[derive(Debug, Clone)]
pub struct NewCartLine {
    pub variant_id: String,
    pub product_handle: String,
    pub product_title: String,
    pub variant_title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub variant_id: String,
    pub product_handle: String,
    pub product_title: String,
    pub variant_title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds a line, merging into an existing line for the same variant.
    /// A zero quantity is bumped to one. Returns the id of the affected
    /// line.
    pub fn add(&mut self, new_line: NewCartLine) -> Uuid {
        let quantity = new_line.quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.variant_id == new_line.variant_id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return line.id;
        }

        let line = CartLine {
            id: Uuid::new_v4(),
            variant_id: new_line.variant_id,
            product_handle: new_line.product_handle,
            product_title: new_line.product_title,
            variant_title: new_line.variant_title,
            unit_price: new_line.unit_price,
            quantity,
            image_url: new_line.image_url,
        };
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Sets a line's quantity; zero removes the line. Returns false when
    /// the id is unknown.
    pub fn update_quantity(&mut self, line_id: Uuid, quantity: u32) -> bool {
        let Some(pos) = self.lines.iter().position(|line| line.id == line_id) else {
            return false;
        };
        if quantity == 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = quantity;
        }
        true
    }

    /// Removes a line outright. Returns false when the id is unknown.
    pub fn remove(&mut self, line_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != line_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
