//! # Text Rendering
//!
//! Turns page state into plain text for the terminal.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ● Pilih Produk ── ○ Pembayaran ── ○ Selesai      step_indicator        │
//! │                                                                         │
//! │  ID  Nama        Harga    Stok  Kategori           product_grid         │
//! │  1   Teh Botol   Rp8.000  1     minuman                                 │
//! │                                                                         │
//! │  Harga:            Rp8.000                          pay_screen          │
//! │  Uang Dimasukkan:  Rp5.000                                              │
//! │  Kurang Rp3.000                                                         │
//! │                                                                         │
//! │  Produk  Harga  Uang Masuk  Kembalian  Waktu        history_table       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function returns a `String`; nothing here writes to stdout.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::fmt::Display;

use vending_core::{Denomination, Money, Product, PurchaseSession, Step, Transaction};

use crate::messages;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Indonesian long date with time, e.g. `20 Januari 2026 10.05`.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(tz);
    format!(
        "{} {} {} {:02}.{:02}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// Left-aligned text table with one space of padding between columns.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

fn labelled(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}", label, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Purchase Wizard
// =============================================================================

/// Three-step progress bar; reached steps are filled.
pub fn step_indicator(step: Step) -> String {
    [
        (Step::Select, "Pilih Produk"),
        (Step::Pay, "Pembayaran"),
        (Step::Done, "Selesai"),
    ]
    .iter()
    .map(|(s, label)| {
        let mark = if s.number() <= step.number() { "●" } else { "○" };
        format!("{} {}", mark, label)
    })
    .collect::<Vec<_>>()
    .join(" ── ")
}

/// Product list for the storefront.
pub fn product_grid(products: &[Product]) -> String {
    if products.is_empty() {
        return messages::NO_PRODUCTS.to_string();
    }

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            let stock = if p.is_available() {
                p.stock.to_string()
            } else {
                format!("{} (habis)", p.stock)
            };
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.price.to_string(),
                stock,
                p.category.to_string(),
            ]
        })
        .collect();

    table(&["ID", "Nama", "Harga", "Stok", "Kategori"], &rows)
}

/// Payment step: price, money so far, and either change or shortfall.
pub fn pay_screen(session: &PurchaseSession) -> String {
    let Some(product) = session.selected() else {
        return String::new();
    };

    let mut rows = vec![
        ("Produk:", product.name.clone()),
        ("Harga:", product.price.to_string()),
        ("Uang Dimasukkan:", session.money_inserted().to_string()),
    ];

    if let Some(change) = session.change_preview() {
        rows.push(("Kembalian:", change.to_string()));
    }

    let mut out = labelled(&rows);

    out.push_str("\n\n");
    match session.shortfall() {
        Some(shortfall) => out.push_str(&format!("Kurang {}", shortfall)),
        None => out.push_str("Konfirmasi Pembayaran ✓"),
    }

    if let Some(pending) = session.pending() {
        out.push_str(&format!("\nNominal Uang: {} (menunggu konfirmasi)", pending));
    }

    out.push_str("\n\nMasukkan Nominal Uang Kamu: ");
    out.push_str(&denomination_list());
    out
}

pub fn denomination_list() -> String {
    Denomination::ALL
        .iter()
        .map(|d| format!("+ {}", d))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Final step summary.
pub fn receipt(session: &PurchaseSession) -> String {
    let Some(product) = session.selected() else {
        return String::new();
    };

    let change = session.change().unwrap_or_else(Money::zero);

    format!(
        "Transaksi berhasil!\n\n{}",
        labelled(&[
            ("Produk:", product.name.clone()),
            ("Harga:", product.price.to_string()),
            ("Uang Dibayar:", session.money_inserted().to_string()),
            ("Kembalian:", change.to_string()),
        ])
    )
}

// =============================================================================
// Admin
// =============================================================================

/// Product list for the admin page, image URLs included.
pub fn admin_table(products: &[Product]) -> String {
    if products.is_empty() {
        return messages::NO_PRODUCTS.to_string();
    }

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.price.to_string(),
                p.stock.to_string(),
                p.category.to_string(),
                p.image.clone(),
            ]
        })
        .collect();

    format!(
        "📦 Daftar Produk\n\n{}",
        table(&["ID", "Nama", "Harga", "Stok", "Kategori", "Gambar"], &rows)
    )
}

// =============================================================================
// History
// =============================================================================

/// Transaction log, rendered in the order given.
pub fn history_table<Tz>(transactions: &[Transaction], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if transactions.is_empty() {
        return format!(
            "{}\n{}",
            messages::NO_TRANSACTIONS,
            messages::NO_TRANSACTIONS_HINT
        );
    }

    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            vec![
                t.product_name.clone(),
                t.price.to_string(),
                t.money_inserted.to_string(),
                t.change.to_string(),
                format_timestamp(&t.timestamp, tz),
            ]
        })
        .collect();

    format!(
        "Daftar Transaksi\n\n{}",
        table(&["Produk", "Harga", "Uang Masuk", "Kembalian", "Waktu"], &rows)
    )
}
