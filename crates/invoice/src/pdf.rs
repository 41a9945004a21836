//! PDF backend for the invoice layout.
//!
//! Walks an [`Order`] and its [`RowPlan`] and draws the fixed-geometry
//! document with `printpdf`. Pure: the only output is the returned byte
//! buffer, finalized exactly once.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};
use thiserror::Error;

use ruchi_common::types::{Dish, Order};

use crate::layout::{
    self, FIRST_ROW_Y, NOT_AVAILABLE, PAGE_HEIGHT, PAGE_WIDTH, RowSlot, fit, limits, rupees,
};

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Brand colors.
const BLUE: u32 = 0x1976D2;
const LIGHT_BLUE: u32 = 0xE3F2FD;
const GREEN: u32 = 0x4CAF50;
const LIGHT_GRAY: u32 = 0xF5F5F5;
const LIGHT_GREEN: u32 = 0xE8F5E9;
const DARK_GREEN: u32 = 0x2E7D32;
const WHITE: u32 = 0xFFFFFF;
const BLACK: u32 = 0x000000;

/// Unrecoverable output-surface failure. Missing order fields never end up
/// here; they render as placeholders instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf output failure: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// A rendered invoice: the artifact bytes plus its addressable name.
/// Ephemeral, scoped to the processing of one order.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the invoice for one order.
pub fn render(order: &Order) -> Result<RenderedInvoice, RenderError> {
    let plan = layout::plan_rows(order.dishes.len());

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Order Confirmation #{}", order.id),
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut current_page = 0usize;

    draw_header_band(&layer, &fonts);
    draw_info_box(&layer, order, &fonts);
    draw_table_header(&layer, &fonts);

    for (dish, slot) in order.dishes.iter().zip(&plan.slots) {
        if slot.page != current_page {
            let (page, page_layer) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            current_page = slot.page;
        }
        draw_dish_row(&layer, dish, slot, &fonts);
    }

    // The last row can trip the page break, which moves the totals band
    // onto a fresh page.
    if plan.cursor_page != current_page {
        let (page, page_layer) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), "Layer 1");
        layer = doc.get_page(page).get_layer(page_layer);
    }

    draw_totals(&layer, order, plan.cursor_y, &fonts);
    draw_footer_band(&layer, order, &fonts);

    let pages = plan.pages();
    let bytes = doc.save_to_bytes()?;

    Ok(RenderedInvoice {
        file_name: format!("order_{}.pdf", order.id),
        bytes,
        pages,
    })
}

/// Blue brand band anchored to the top of page one.
fn draw_header_band(layer: &PdfLayerReference, fonts: &Fonts) {
    fill_rect(layer, 0.0, PAGE_HEIGHT - 80.0, PAGE_WIDTH, 80.0, BLUE);

    text(layer, &fonts.bold, 32.0, 50.0, PAGE_HEIGHT - 50.0, WHITE, "RuchiServ");
    text(
        layer,
        &fonts.regular,
        12.0,
        50.0,
        PAGE_HEIGHT - 68.0,
        WHITE,
        "Professional Catering & Kitchen Management",
    );
}

/// Bordered info box with the order confirmation title and the two-column
/// customer grid. Absent optionals show the placeholder; the email cell is
/// the one field omitted entirely when absent.
fn draw_info_box(layer: &PdfLayerReference, order: &Order, fonts: &Fonts) {
    let mut y = PAGE_HEIGHT - 110.0;

    let box_height = 160.0;
    let box_bottom = y - 170.0;
    fill_rect(layer, 40.0, box_bottom, PAGE_WIDTH - 80.0, box_height, LIGHT_BLUE);
    stroke_rect(layer, 40.0, box_bottom, PAGE_WIDTH - 80.0, box_height, BLUE, 2.0);

    y -= 25.0;
    text(
        layer,
        &fonts.bold,
        16.0,
        50.0,
        y,
        BLUE,
        &format!("Order Confirmation #{}", order.id),
    );

    y -= 30.0;
    label_value(
        layer,
        fonts,
        50.0,
        130.0,
        y,
        "Customer:",
        fit(&order.customer_name, limits::CUSTOMER_NAME),
        10.0,
    );
    label_value(
        layer,
        fonts,
        350.0,
        400.0,
        y,
        "Date:",
        fit(&order.date, limits::DATE),
        10.0,
    );

    y -= 25.0;
    label_value(
        layer,
        fonts,
        50.0,
        130.0,
        y,
        "Mobile:",
        fit(order.mobile.as_deref().unwrap_or(NOT_AVAILABLE), limits::MOBILE),
        10.0,
    );
    if let Some(email) = &order.email {
        label_value(
            layer,
            fonts,
            350.0,
            400.0,
            y,
            "Email:",
            fit(email, limits::EMAIL),
            9.0,
        );
    }

    y -= 25.0;
    label_value(
        layer,
        fonts,
        50.0,
        130.0,
        y,
        "Location:",
        fit(order.location.as_deref().unwrap_or(NOT_AVAILABLE), limits::LOCATION),
        10.0,
    );

    y -= 25.0;
    label_value(
        layer,
        fonts,
        50.0,
        130.0,
        y,
        "Event Time:",
        fit(
            order.event_time.as_deref().unwrap_or(NOT_AVAILABLE),
            limits::EVENT_TIME,
        ),
        10.0,
    );
    label_value(
        layer,
        fonts,
        350.0,
        420.0,
        y,
        "Meal Type:",
        fit(
            order.meal_type.as_deref().unwrap_or(NOT_AVAILABLE),
            limits::MEAL_TYPE,
        ),
        10.0,
    );

    y -= 25.0;
    let total_pax = order
        .total_pax
        .map(|p| p.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    label_value(layer, fonts, 50.0, 130.0, y, "Total Pax:", &total_pax, 10.0);
}

/// "Order Details" heading, green column-header band and separator rule.
fn draw_table_header(layer: &PdfLayerReference, fonts: &Fonts) {
    let mut y = FIRST_ROW_Y + 75.0;
    text(layer, &fonts.bold, 14.0, 50.0, y, BLUE, "Order Details");

    y -= 30.0;
    fill_rect(layer, 40.0, y - 5.0, PAGE_WIDTH - 80.0, 25.0, GREEN);
    text(layer, &fonts.bold, 11.0, 50.0, y + 5.0, WHITE, "Dish Name");
    text(layer, &fonts.bold, 11.0, 300.0, y + 5.0, WHITE, "Pax");
    text(layer, &fonts.bold, 11.0, 380.0, y + 5.0, WHITE, "Rate");
    text(layer, &fonts.bold, 11.0, 480.0, y + 5.0, WHITE, "Amount");

    y -= 25.0;
    rule(layer, 40.0, PAGE_WIDTH - 40.0, y, GREEN, 1.0);
}

fn draw_dish_row(layer: &PdfLayerReference, dish: &Dish, slot: &RowSlot, fonts: &Fonts) {
    if slot.banded {
        fill_rect(layer, 40.0, slot.y - 5.0, PAGE_WIDTH - 80.0, 18.0, LIGHT_GRAY);
    }

    text(
        layer,
        &fonts.regular,
        10.0,
        50.0,
        slot.y,
        BLACK,
        fit(&dish.name, limits::DISH_NAME),
    );
    text(
        layer,
        &fonts.regular,
        10.0,
        300.0,
        slot.y,
        BLACK,
        &dish.pax.to_string(),
    );
    text(
        layer,
        &fonts.regular,
        10.0,
        380.0,
        slot.y,
        BLACK,
        &rupees(dish.rate),
    );
    text(
        layer,
        &fonts.regular,
        10.0,
        480.0,
        slot.y,
        BLACK,
        &format!("Rs. {:.2}", dish.cost),
    );
}

fn draw_totals(layer: &PdfLayerReference, order: &Order, cursor_y: f32, fonts: &Fonts) {
    let mut y = cursor_y - 10.0;
    rule(layer, 40.0, PAGE_WIDTH - 40.0, y, GREEN, 2.0);

    y -= 30.0;
    fill_rect(layer, 350.0, y - 5.0, PAGE_WIDTH - 390.0, 30.0, LIGHT_GREEN);
    text(layer, &fonts.bold, 14.0, 370.0, y + 5.0, DARK_GREEN, "TOTAL:");
    text(
        layer,
        &fonts.bold,
        16.0,
        480.0,
        y + 5.0,
        DARK_GREEN,
        &layout::totals_text(order),
    );
}

/// Blue footer band on the final page.
fn draw_footer_band(layer: &PdfLayerReference, order: &Order, fonts: &Fonts) {
    fill_rect(layer, 0.0, 0.0, PAGE_WIDTH, 40.0, BLUE);

    text(
        layer,
        &fonts.bold,
        11.0,
        50.0,
        20.0,
        WHITE,
        "Thank you for choosing RuchiServ!",
    );
    text(
        layer,
        &fonts.regular,
        9.0,
        PAGE_WIDTH - 180.0,
        20.0,
        WHITE,
        &format!(
            "Firm ID: {}",
            order.firm_id.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
    );
}

// ---- drawing primitives ----

fn pt(points: f32) -> Mm {
    Mm(points * MM_PER_PT)
}

fn color(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f32,
    x: f32,
    y: f32,
    hex: u32,
    content: &str,
) {
    layer.set_fill_color(color(hex));
    layer.use_text(content, size, pt(x), pt(y), font);
}

fn label_value(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    label_x: f32,
    value_x: f32,
    y: f32,
    label: &str,
    value: &str,
    value_size: f32,
) {
    text(layer, &fonts.bold, 11.0, label_x, y, BLACK, label);
    text(layer, &fonts.regular, value_size, value_x, y, BLACK, value);
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32, hex: u32) {
    layer.set_fill_color(color(hex));
    layer.add_rect(
        Rect::new(pt(x), pt(y), pt(x + width), pt(y + height)).with_mode(PaintMode::Fill),
    );
}

fn stroke_rect(
    layer: &PdfLayerReference,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    hex: u32,
    thickness: f32,
) {
    layer.set_outline_color(color(hex));
    layer.set_outline_thickness(thickness);
    layer.add_rect(
        Rect::new(pt(x), pt(y), pt(x + width), pt(y + height)).with_mode(PaintMode::Stroke),
    );
}

fn rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, hex: u32, thickness: f32) {
    layer.set_outline_color(color(hex));
    layer.set_outline_thickness(thickness);
    layer.add_line(Line {
        points: vec![
            (Point::new(pt(x1), pt(y)), false),
            (Point::new(pt(x2), pt(y)), false),
        ],
        is_closed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruchi_common::types::{Dish, Order};

    fn dish(name: &str, cost: f64) -> Dish {
        Dish {
            name: name.to_string(),
            pax: 10,
            rate: 50.0,
            cost,
        }
    }

    fn base_order() -> Order {
        Order {
            id: "ORD-7".to_string(),
            customer_name: "Asha Rao".to_string(),
            date: "2024-11-02".to_string(),
            mobile: Some("9876543210".to_string()),
            ..Order::default()
        }
    }

    #[test]
    fn test_empty_order_renders_single_page() {
        let order = base_order();
        let invoice = render(&order).unwrap();
        assert_eq!(invoice.pages, 1);
        assert_eq!(invoice.file_name, "order_ORD-7.pdf");
        assert!(!invoice.bytes.is_empty());
    }

    #[test]
    fn test_large_order_paginates() {
        let mut order = base_order();
        order.dishes = (0..50).map(|i| dish(&format!("Dish {i}"), 100.0)).collect();
        let invoice = render(&order).unwrap();
        assert_eq!(invoice.pages, 3);
    }

    #[test]
    fn test_missing_optionals_do_not_fail() {
        let order = Order {
            id: "ORD-8".to_string(),
            dishes: vec![dish("Veg Biryani", 400.0)],
            ..Order::default()
        };
        let invoice = render(&order).unwrap();
        assert_eq!(invoice.pages, 1);
    }

    #[test]
    fn test_oversized_fields_do_not_fail() {
        let mut order = base_order();
        order.customer_name = "c".repeat(200);
        order.location = Some("l".repeat(200));
        order.dishes = vec![dish(&"d".repeat(200), 100.0)];
        assert!(render(&order).is_ok());
    }
}
