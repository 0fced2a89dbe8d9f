use std::fmt::Write as _;

use super::pagination::{page_links, render_page_links};
use crate::controller::{Notice, NoticeLevel, OrderForm};
use crate::domain::{Order, Product, User};

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(headers.iter().copied(), &widths));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn footer(out: &mut String, page: u32, page_count: u32) {
    let _ = writeln!(out, "Pages: {}", render_page_links(&page_links(page, page_count)));
}

pub fn render_users(rows: &[User], page: u32, page_count: u32) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|u| vec![u.id.clone(), u.user_name.clone(), u.first_name.clone(), u.last_name.clone()])
        .collect();
    let mut out = String::from("User List\n");
    out.push_str(&table(&["User ID", "User Name", "First Name", "Last Name"], &cells));
    footer(&mut out, page, page_count);
    out
}

pub fn render_products(rows: &[Product]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|p| vec![p.id.to_string(), p.name.clone(), p.price.to_string(), p.stock.to_string()])
        .collect();
    let mut out = String::from("Product List\n");
    out.push_str(&table(&["ID", "Name", "Price", "Stock"], &cells));
    out
}

/// Order table; rows for which `expanded` holds get an indented detail block.
pub fn render_orders(rows: &[Order], expanded: impl Fn(i64) -> bool, page: u32, page_count: u32) -> String {
    let headers = ["Order ID", "User Name", "Product", "Quantity", "Total Price"];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                non_empty(o.user_name.as_deref()).unwrap_or("Unknown User").to_string(),
                non_empty(o.product_name.as_deref()).unwrap_or("Unknown Product").to_string(),
                o.quantity.to_string(),
                format!("{:.2}", o.total),
            ]
        })
        .collect();

    let rendered = table(&headers, &cells);
    let mut lines = rendered.lines();
    let mut out = String::from("All Orders\n");
    // Header and separator, then one line per order.
    for _ in 0..2 {
        if let Some(line) = lines.next() {
            let _ = writeln!(out, "{line}");
        }
    }
    for (order, line) in rows.iter().zip(lines) {
        let _ = writeln!(out, "{line}");
        if expanded(order.id) {
            out.push_str(&render_order_details(order));
        }
    }
    footer(&mut out, page, page_count);
    out
}

pub fn render_order_details(order: &Order) -> String {
    format!(
        "    Product Description: {}\n    Order Date: {}\n    Description: {}\n",
        non_empty(order.product_description.as_deref()).unwrap_or("N/A"),
        order.order_date,
        non_empty(order.description.as_deref()).unwrap_or("N/A"),
    )
}

pub fn render_order_form(form: &OrderForm) -> String {
    let product = form
        .selected_product()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "User: {}\nProduct: {}\nQuantity: {}\nTotal with VAT: {:.2}\nOrder Date: {}\nDescription: {}\n",
        form.user_label().or(form.user_id()).unwrap_or("-"),
        product,
        form.quantity(),
        form.total(),
        form.order_date(),
        form.description(),
    )
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    format!("[{}] {}: {}", marker, notice.title, notice.message)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_table_lists_rows_and_pages() {
        let out = render_users(&[User::new("u1", "alice", "Alice", "Liddell")], 1, 3);
        assert!(out.starts_with("User List\n"));
        assert!(out.contains("u1      | alice"));
        assert!(out.ends_with("Pages: [1] 2 3\n"));
    }

    #[test]
    fn products_table_shows_stock() {
        let out = render_products(&[Product::new(4, "Lamp", 19.5, 3)]);
        assert!(out.contains("4  | Lamp | 19.5  | 3"));
    }

    #[test]
    fn orders_fall_back_for_missing_names() {
        let order = Order::new(7, "u1", 3, 2, 48.0);
        let out = render_orders(&[order], |_| false, 1, 1);
        assert!(out.contains("Unknown User"));
        assert!(out.contains("Unknown Product"));
        assert!(out.contains("48.00"));
        assert!(!out.contains("Order Date:"));
    }

    #[test]
    fn expanded_orders_show_details() {
        let mut order = Order::new(7, "u1", 3, 2, 48.0);
        order.order_date = "2024-05-01".into();
        order.product_description = Some("Desk lamp".into());
        let out = render_orders(&[order], |id| id == 7, 1, 1);
        assert!(out.contains("    Product Description: Desk lamp\n"));
        assert!(out.contains("    Order Date: 2024-05-01\n"));
        assert!(out.contains("    Description: N/A\n"));
    }

    #[test]
    fn notice_shows_title_and_level() {
        let notice = Notice::error("Order Status", "Error adding order");
        assert_eq!(render_notice(&notice), "[error] Order Status: Error adding order");
    }
}
