//! # Receipt
//!
//! Read-only receipt snapshot built from a finalized sale, plus a
//! fixed-width plain-text rendering for the print/export surface.
//!
//! The session only builds strings here; actually printing them is the
//! collaborator layer's job.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use till_core::{Money, PaymentMethod, Sale};

use crate::config::RegisterConfig;

/// One item line on the receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// Everything the print surface needs to show one receipt.
///
/// Built from an immutable [`Sale`]; building never touches the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store_name: String,
    pub store_address: Vec<String>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal_cents: i64,
    /// The VAT rate printed next to the tax line, in basis points.
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub cash_received_cents: Option<i64>,
    pub change_given_cents: Option<i64>,
    pub timestamp: DateTime<Utc>,
    /// Paper width in characters.
    pub width: usize,
}

impl Receipt {
    /// Builds a receipt snapshot from a finalized sale.
    pub fn build(sale: &Sale, config: &RegisterConfig) -> Self {
        Receipt {
            store_name: config.store_name.clone(),
            store_address: config.store_address.clone(),
            lines: sale
                .items
                .iter()
                .map(|i| ReceiptLine {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    unit_price_cents: i.unit_price_cents,
                    line_total_cents: i.line_total_cents,
                })
                .collect(),
            subtotal_cents: sale.subtotal_cents,
            tax_rate_bps: config.tax_rate_bps,
            tax_cents: sale.tax_cents,
            discount_cents: sale.discount_cents,
            total_cents: sale.total_cents,
            payment_method: sale.payment_method,
            cash_received_cents: sale.cash_received_cents,
            change_given_cents: sale.change_given_cents,
            timestamp: sale.created_at,
            width: config.receipt_width,
        }
    }

    /// Renders the receipt as fixed-width plain text.
    ///
    /// ## Layout
    /// ```text
    ///          Till Dev Store
    ///         12 rue du Marché
    ///           75011 Paris
    /// --------------------------------
    /// Café
    ///   2 x 2,50 €             5,00 €
    /// Muffin
    ///   1 x 3,00 €             3,00 €
    /// --------------------------------
    /// Sous-total:              8,00 €
    /// TVA (20 %):              1,60 €
    /// Remise:                 -0,80 €
    /// TOTAL:                   8,80 €
    /// --------------------------------
    /// Paiement:               Espèces
    /// Reçu:                   10,00 €
    /// Rendu:                   1,20 €
    ///
    ///         04/08/2026 12:34
    ///     Merci de votre visite !
    /// ```
    pub fn render(&self) -> String {
        let w = self.width;
        let rule = "-".repeat(w);
        let mut out = String::new();

        out.push_str(&center(&self.store_name, w));
        out.push('\n');
        for line in &self.store_address {
            out.push_str(&center(line, w));
            out.push('\n');
        }

        out.push_str(&rule);
        out.push('\n');

        for line in &self.lines {
            out.push_str(&line.name);
            out.push('\n');
            let qty_price = format!(
                "  {} x {}",
                line.quantity,
                Money::from_cents(line.unit_price_cents)
            );
            let total = Money::from_cents(line.line_total_cents).to_string();
            out.push_str(&two_col(&qty_price, &total, w));
            out.push('\n');
        }

        out.push_str(&rule);
        out.push('\n');

        out.push_str(&two_col(
            "Sous-total:",
            &Money::from_cents(self.subtotal_cents).to_string(),
            w,
        ));
        out.push('\n');
        out.push_str(&two_col(
            &format!("TVA ({}):", format_vat_rate(self.tax_rate_bps)),
            &Money::from_cents(self.tax_cents).to_string(),
            w,
        ));
        out.push('\n');

        // Discount line only when a discount was taken
        if self.discount_cents > 0 {
            out.push_str(&two_col(
                "Remise:",
                &format!("-{}", Money::from_cents(self.discount_cents)),
                w,
            ));
            out.push('\n');
        }

        out.push_str(&two_col(
            "TOTAL:",
            &Money::from_cents(self.total_cents).to_string(),
            w,
        ));
        out.push('\n');

        out.push_str(&rule);
        out.push('\n');

        out.push_str(&two_col("Paiement:", self.payment_method.label(), w));
        out.push('\n');
        if let Some(received) = self.cash_received_cents {
            out.push_str(&two_col(
                "Reçu:",
                &Money::from_cents(received).to_string(),
                w,
            ));
            out.push('\n');
        }
        if let Some(change) = self.change_given_cents {
            out.push_str(&two_col(
                "Rendu:",
                &Money::from_cents(change).to_string(),
                w,
            ));
            out.push('\n');
        }

        out.push('\n');
        let local_time = self.timestamp.with_timezone(&Local);
        out.push_str(&center(&local_time.format("%d/%m/%Y %H:%M").to_string(), w));
        out.push('\n');
        out.push_str(&center("Merci de votre visite !", w));
        out.push('\n');

        out
    }
}

/// Centers text within the paper width (left-aligned if it overflows).
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Left and right columns separated by padding to the paper width.
fn two_col(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let pad = if used >= width { 1 } else { width - used };
    format!("{}{}{}", left, " ".repeat(pad), right)
}

/// Formats a VAT rate for display: whole rates without decimals
/// ("20 %"), fractional rates with one, comma-separated ("5,5 %").
fn format_vat_rate(bps: u32) -> String {
    if bps % 100 == 0 {
        format!("{} %", bps / 100)
    } else {
        format!("{:.1} %", bps as f64 / 100.0).replace('.', ",")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Cart, PaymentReconciler};

    fn scenario_sale() -> Sale {
        let mut cart = Cart::new();
        cart.add_item("Café", Money::from_cents(250), 2).unwrap();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();
        cart.apply_percent_discount(10.0).unwrap();

        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Cash, Some(Money::from_cents(1000)))
            .unwrap();
        reconciler.confirm(&cart).unwrap()
    }

    #[test]
    fn test_build_snapshots_the_sale() {
        let sale = scenario_sale();
        let receipt = Receipt::build(&sale, &RegisterConfig::default());

        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].name, "Café");
        assert_eq!(receipt.subtotal_cents, 800);
        assert_eq!(receipt.tax_cents, 160);
        assert_eq!(receipt.discount_cents, 80);
        assert_eq!(receipt.total_cents, 880);
        assert_eq!(receipt.cash_received_cents, Some(1000));
        assert_eq!(receipt.change_given_cents, Some(120));
    }

    #[test]
    fn test_render_cash_sale_with_discount() {
        let sale = scenario_sale();
        let text = Receipt::build(&sale, &RegisterConfig::default()).render();

        assert!(text.contains("Till Dev Store"));
        assert!(text.contains("Café"));
        assert!(text.contains("2 x 2,50 €"));
        assert!(text.contains("Sous-total:"));
        assert!(text.contains("8,00 €"));
        assert!(text.contains("TVA (20 %):"));
        assert!(text.contains("Remise:"));
        assert!(text.contains("-0,80 €"));
        assert!(text.contains("TOTAL:"));
        assert!(text.contains("8,80 €"));
        assert!(text.contains("Espèces"));
        assert!(text.contains("Reçu:"));
        assert!(text.contains("10,00 €"));
        assert!(text.contains("Rendu:"));
        assert!(text.contains("1,20 €"));
        assert!(text.contains("Merci de votre visite !"));
    }

    #[test]
    fn test_render_card_sale_omits_cash_and_discount_lines() {
        let mut cart = Cart::new();
        cart.add_item("Muffin", Money::from_cents(300), 1).unwrap();

        let mut reconciler = PaymentReconciler::new();
        reconciler
            .process_payment(&cart, PaymentMethod::Card, None)
            .unwrap();
        let sale = reconciler.confirm(&cart).unwrap();

        let text = Receipt::build(&sale, &RegisterConfig::default()).render();

        assert!(text.contains("Carte"));
        assert!(!text.contains("Remise:"));
        assert!(!text.contains("Reçu:"));
        assert!(!text.contains("Rendu:"));
    }

    #[test]
    fn test_vat_rate_formatting() {
        assert_eq!(format_vat_rate(2000), "20 %");
        assert_eq!(format_vat_rate(550), "5,5 %");
        assert_eq!(format_vat_rate(0), "0 %");
    }

    #[test]
    fn test_columns_respect_paper_width() {
        let line = two_col("TOTAL:", "8,80 €", 32);
        assert_eq!(line.chars().count(), 32);
        assert!(line.starts_with("TOTAL:"));
        assert!(line.ends_with("8,80 €"));
    }
}
