//! Plain-text rendering of a [`LedgerView`].

use engine::LedgerView;

const HEADERS: [&str; 4] = ["#", "Description", "Amount", "Kind"];

/// One line per transaction, numbered from 1, under a header line.
pub fn format_table(view: &LedgerView) -> String {
    let cells: Vec<[String; 4]> = view
        .rows
        .iter()
        .map(|row| {
            [
                (row.position + 1).to_string(),
                row.description.clone(),
                row.amount.clone(),
                row.kind.label().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    if cells.is_empty() {
        out.push_str("(no transactions)\n");
    }
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let [number, description, amount, kind] = cells;
    // Numbers and amounts are right aligned.
    out.push_str(&format!(
        "{number:>w0$}  {description:<w1$}  {amount:>w2$}  {kind}\n",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    ));
}

pub fn format_totals(view: &LedgerView) -> String {
    let totals = &view.totals;
    format!(
        "Total income:  {}\nTotal expense: {}\nNet:           {}\n",
        totals.income, totals.expense, totals.net
    )
}

#[cfg(test)]
mod tests {
    use engine::{Currency, Ledger, Money, Transaction, TransactionKind, render};

    use super::*;

    #[test]
    fn empty_view_prints_header_and_zero_totals() {
        let view = render(&Ledger::new(), Currency::Brl);

        assert_eq!(
            format_table(&view),
            "#  Description  Amount  Kind\n(no transactions)\n"
        );
        assert_eq!(
            format_totals(&view),
            "Total income:  R$ 0,00\nTotal expense: R$ 0,00\nNet:           R$ 0,00\n"
        );
    }

    #[test]
    fn columns_are_aligned() {
        let ledger = Ledger::from(vec![
            Transaction::new("Salary", Money::new(250_000), TransactionKind::Income).unwrap(),
            Transaction::new("Bus", Money::new(440), TransactionKind::Expense).unwrap(),
        ]);
        let view = render(&ledger, Currency::Brl);

        let expected = concat!(
            "#  Description       Amount  Kind\n",
            "1  Salary       R$ 2.500,00  Income\n",
            "2  Bus              R$ 4,40  Expense\n",
        );
        assert_eq!(format_table(&view), expected);
        assert!(format_totals(&view).ends_with("Net:           R$ 2.495,60\n"));
    }
}
