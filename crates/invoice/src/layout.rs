//! Pure invoice layout: fixed page geometry, field truncation limits and
//! row pagination. Nothing here touches the PDF surface, so the pagination
//! and banding behavior is testable without parsing document bytes.

use ruchi_common::types::Order;

/// US letter, in PDF points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// Vertical distance between dish rows.
pub const ROW_PITCH: f32 = 18.0;

/// First dish row on page one, below the header, info box and table header.
pub const FIRST_ROW_Y: f32 = 392.0;

/// Row cursor after a page break.
pub const CONTINUATION_ROW_Y: f32 = PAGE_HEIGHT - 50.0;

/// Once the cursor drops below this, the page is finalized and a new one
/// starts.
pub const MIN_ROW_Y: f32 = 150.0;

/// Per-field truncation limits, in characters. Declared once; every value
/// drawn into the fixed-width layout goes through [`fit`] with one of these.
pub mod limits {
    pub const CUSTOMER_NAME: usize = 40;
    pub const DATE: usize = 15;
    pub const MOBILE: usize = 20;
    pub const EMAIL: usize = 30;
    pub const LOCATION: usize = 40;
    pub const EVENT_TIME: usize = 20;
    pub const MEAL_TYPE: usize = 20;
    pub const DISH_NAME: usize = 35;
}

/// Placeholder for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Truncate `value` to at most `limit` characters.
///
/// Silent by design: no ellipsis, the fixed-width layout wins over the
/// oversized input. Cuts on a char boundary, never mid-codepoint.
pub fn fit(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Placement of one dish row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    /// Zero-based page index.
    pub page: usize,
    /// Baseline y of the row, in points.
    pub y: f32,
    /// Whether the row gets the alternating background band.
    pub banded: bool,
}

/// The full row plan for an order plus where the cursor lands afterwards.
#[derive(Debug, Clone)]
pub struct RowPlan {
    pub slots: Vec<RowSlot>,
    /// Page the cursor is on after the last row (where totals are drawn).
    pub cursor_page: usize,
    /// Cursor y after the last row.
    pub cursor_y: f32,
}

impl RowPlan {
    /// Total page count of the document.
    pub fn pages(&self) -> usize {
        self.cursor_page + 1
    }
}

/// Compute row placement for `count` dishes.
///
/// The cursor starts at [`FIRST_ROW_Y`] and steps down by [`ROW_PITCH`].
/// After each row, if the cursor has entered the bottom danger zone the
/// page breaks, the cursor resets to [`CONTINUATION_ROW_Y`] and the banding
/// parity resets to the first color. Banding therefore restarts at the top
/// of every page rather than continuing the global row count.
pub fn plan_rows(count: usize) -> RowPlan {
    let mut slots = Vec::with_capacity(count);
    let mut page = 0usize;
    let mut y = FIRST_ROW_Y;
    let mut parity = 0usize;

    for _ in 0..count {
        slots.push(RowSlot {
            page,
            y,
            banded: parity % 2 == 0,
        });
        y -= ROW_PITCH;
        parity += 1;

        if y < MIN_ROW_Y {
            page += 1;
            y = CONTINUATION_ROW_Y;
            parity = 0;
        }
    }

    RowPlan {
        slots,
        cursor_page: page,
        cursor_y: y,
    }
}

/// Format a rupee amount the way the invoice displays it: whole amounts
/// without a fraction, everything else as-is.
pub fn rupees(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("Rs. {:.0}", amount)
    } else {
        format!("Rs. {}", amount)
    }
}

/// The totals-band text: `final_amount` is authoritative when present,
/// the computed dish sum is the fallback.
pub fn totals_text(order: &Order) -> String {
    rupees(order.display_total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruchi_common::types::{Dish, Order};

    #[test]
    fn test_fit_truncates_to_exact_limit_without_ellipsis() {
        let long = "x".repeat(50);
        let fitted = fit(&long, limits::CUSTOMER_NAME);
        assert_eq!(fitted.chars().count(), 40);
        assert!(!fitted.ends_with('…'));
        assert!(!fitted.ends_with("..."));
    }

    #[test]
    fn test_fit_leaves_short_values_alone() {
        assert_eq!(fit("Asha", 40), "Asha");
        assert_eq!(fit("", 40), "");
    }

    #[test]
    fn test_fit_respects_char_boundaries() {
        let value = "पनीर टिक्का मसाला स्पेशल प्लेट";
        let fitted = fit(value, 10);
        assert_eq!(fitted.chars().count(), 10);
        assert!(value.starts_with(fitted));
    }

    #[test]
    fn test_plan_rows_empty_order_is_single_page() {
        let plan = plan_rows(0);
        assert!(plan.slots.is_empty());
        assert_eq!(plan.pages(), 1);
        assert_eq!(plan.cursor_y, FIRST_ROW_Y);
    }

    #[test]
    fn test_plan_rows_page_one_holds_fourteen_rows() {
        let plan = plan_rows(15);
        assert!(plan.slots[..14].iter().all(|s| s.page == 0));
        assert_eq!(plan.slots[14].page, 1);
        assert_eq!(plan.slots[14].y, CONTINUATION_ROW_Y);
        assert_eq!(plan.pages(), 2);
    }

    #[test]
    fn test_banding_restarts_at_top_of_each_page() {
        // Three pages: 14 rows on page one, 33 per continuation page.
        let plan = plan_rows(50);
        assert_eq!(plan.pages(), 3);

        for page in 0..3 {
            let first = plan.slots.iter().find(|s| s.page == page).unwrap();
            assert!(first.banded, "first row of page {page} must be banded");
        }

        // Global index 47 is odd, but it opens page three: per-page parity
        // wins over the global row count.
        assert_eq!(plan.slots[47].page, 2);
        assert!(plan.slots[47].banded);
    }

    #[test]
    fn test_banding_alternates_within_a_page() {
        let plan = plan_rows(6);
        let banded: Vec<bool> = plan.slots.iter().map(|s| s.banded).collect();
        assert_eq!(banded, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_totals_text_prefers_final_amount() {
        let order = Order {
            final_amount: Some(500.0),
            dishes: vec![Dish {
                cost: 450.0,
                ..Dish::default()
            }],
            ..Order::default()
        };
        assert_eq!(totals_text(&order), "Rs. 500");
    }

    #[test]
    fn test_totals_text_falls_back_to_dish_sum() {
        let order = Order {
            dishes: vec![
                Dish {
                    cost: 200.0,
                    ..Dish::default()
                },
                Dish {
                    cost: 250.5,
                    ..Dish::default()
                },
            ],
            ..Order::default()
        };
        assert_eq!(totals_text(&order), "Rs. 450.5");
    }

    #[test]
    fn test_totals_text_zero_for_empty_order() {
        assert_eq!(totals_text(&Order::default()), "Rs. 0");
    }
}
