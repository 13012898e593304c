//! Plan Receipt
//!
//! Terminal rendering of a [`PlanResult`]: one table row per order followed by a short
//! summary. Rendering is read-only; every figure comes straight from the plan.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::plan::{OrderRow, PlanResult};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Printable view of a plan in a given currency.
#[derive(Debug, Clone, Copy)]
pub struct PlanReceipt<'a> {
    result: &'a PlanResult,
    currency: &'static Currency,
}

impl<'a> PlanReceipt<'a> {
    /// Create a receipt for `result`, formatting amounts in `currency` minor units.
    pub fn new(result: &'a PlanResult, currency: &'static Currency) -> Self {
        Self { result, currency }
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Cash saved relative to the gross total, as a fraction of the gross total.
    pub fn savings_percent(&self) -> Percentage {
        let gross = self.result.summary.gross_total;

        if gross == 0 {
            return Percentage::from(0.0);
        }

        Percentage::from(Decimal::from(self.result.savings()) / Decimal::from(gross))
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();
        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = smallvec![];

        builder.push_record([
            "#",
            "Qty",
            "Order Total",
            "Points Used",
            "Cash Paid",
            "Points Earned",
            "Balance",
        ]);

        for (row_idx, order) in self.result.orders.iter().enumerate() {
            builder.push_record(self.order_cells(order));

            // header is row 0
            let row = row_idx + 1;

            if order.points_used > 0 {
                color_ops.push((row, 3, Color::FG_GREEN));
            }

            if !order.eligible {
                color_ops.push((row, 5, dimmed()));
            }
        }

        write_plan_table(&mut out, builder, color_ops)?;

        self.write_summary(&mut out)
    }

    fn order_cells(&self, order: &OrderRow) -> [String; 7] {
        let earned = if order.eligible {
            format!("+{}", order.points_earned)
        } else {
            "-".to_string()
        };

        [
            format!("#{:<3}", order.index),
            order.quantity.to_string(),
            self.money(order.order_total),
            order.points_used.to_string(),
            self.money(order.cash_paid),
            earned,
            order.points_balance.to_string(),
        ]
    }

    fn money(&self, minor_units: i64) -> String {
        Money::from_minor(minor_units, self.currency).to_string()
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let summary = &self.result.summary;

        let search = if self.result.meta.exact {
            "exact".to_string()
        } else {
            format!("{YELLOW}approximate (time budget reached){RESET}")
        };

        let mut block = SummaryBlock::default();

        block.line("Gross:", self.money(summary.gross_total));
        block.line(
            &format!("{BOLD}Cash:{RESET}"),
            format!("{BOLD}{}{RESET}", self.money(summary.cash_total)),
        );
        block.line(
            "Savings:",
            format!(
                "({:.2}%) {}",
                self.savings_percent_points(),
                self.money(self.result.savings())
            ),
        );
        block.line("Orders:", summary.order_count.to_string());
        block.line("Leftover points:", summary.leftover_points.to_string());
        block.line("Search:", search);

        block.write_to(out)
    }

    /// Savings as percent points rounded to two places, e.g. `15.15`.
    fn savings_percent_points(&self) -> Decimal {
        (self.savings_percent() * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Label/value pairs printed under the table, labels and values each right-aligned.
#[derive(Debug, Default)]
struct SummaryBlock {
    lines: Vec<(String, String)>,
}

impl SummaryBlock {
    fn line(&mut self, label: &str, value: String) {
        self.lines.push((label.to_string(), value));
    }

    fn write_to(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let label_width = self
            .lines
            .iter()
            .map(|(label, _)| display_width(label))
            .max()
            .unwrap_or(0);

        let value_width = self
            .lines
            .iter()
            .map(|(_, value)| display_width(value))
            .max()
            .unwrap_or(0);

        for (label, value) in &self.lines {
            let label_pad = " ".repeat(label_width.saturating_sub(display_width(label)));
            let value_pad = " ".repeat(value_width.saturating_sub(display_width(value)));

            writeln!(out, " {label_pad}{label}  {value_pad}{value}  ")
                .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

fn write_plan_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..7), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    writeln!(out, "\n{}", dim_box_drawing(&table.to_string())).map_err(|_err| ReceiptError::IO)
}

fn is_box_drawing(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Greys out the table frame, leaving cell contents untouched.
fn dim_box_drawing(table: &str) -> String {
    let chars: Vec<char> = table.chars().collect();

    chars
        .chunk_by(|a, b| is_box_drawing(*a) == is_box_drawing(*b))
        .map(|run| {
            let text: String = run.iter().collect();

            if run.first().copied().is_some_and(is_box_drawing) {
                format!("{DIM}{text}{RESET}")
            } else {
                text
            }
        })
        .collect()
}

/// Terminal width of `s`, skipping `ESC ... <letter>` sequences.
fn display_width(s: &str) -> usize {
    let mut segments = s.split('\x1b');
    let plain = segments.next().map_or(0, |head| head.chars().count());

    plain
        + segments
            .map(|segment| {
                segment
                    .chars()
                    .skip_while(|ch| !ch.is_ascii_alphabetic())
                    .skip(1)
                    .count()
            })
            .sum::<usize>()
}

fn dimmed() -> Color {
    Color::new(DIM, RESET)
}
