use almacen_inventory::{Article, Movement, MovementKind};
use almacen_ledger::{CardRow, StockSummaryRow};
use rust_decimal::Decimal;

use crate::format::{currency, spanish_date};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv writer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub(crate) const CARD_HEADERS: [&str; 11] = [
    "Fecha",
    "Descripción",
    "Entrada Cant.",
    "Entrada Costo",
    "Entrada Total",
    "Salida Cant.",
    "Salida Costo",
    "Salida Total",
    "Existencia",
    "Costo Unit.",
    "Total",
];

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new().flexible(true).from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Article catalog with current stock and valuation.
pub fn articles_csv(rows: &[StockSummaryRow]) -> Result<String, ExportError> {
    let mut wtr = writer();
    wtr.write_record(["ID", "Artículo", "Costo Unitario", "Stock Actual", "Valor Total"])?;
    for row in rows {
        wtr.write_record([
            row.article_id.to_string(),
            row.name.clone(),
            currency(row.unit_cost),
            format!("{} unidades", row.stock),
            currency(row.total_value),
        ])?;
    }
    finish(wtr)
}

/// Movement journal. Article names are resolved from the catalog snapshot;
/// movements whose article disappeared render an empty name.
pub fn movements_csv(movements: &[Movement], articles: &[Article]) -> Result<String, ExportError> {
    let mut wtr = writer();
    wtr.write_record([
        "Fecha",
        "Artículo",
        "Tipo",
        "Cantidad",
        "Costo",
        "Descripción",
        "Valor Total",
    ])?;
    for movement in movements {
        let name = articles
            .iter()
            .find(|a| a.id == movement.article_id)
            .map(|a| a.name.as_str())
            .unwrap_or_default();
        wtr.write_record([
            spanish_date(movement.date),
            name.to_string(),
            movement.kind.to_string(),
            movement.quantity.to_string(),
            currency(movement.unit_cost),
            movement.description.clone(),
            currency(Decimal::from(movement.quantity) * movement.unit_cost),
        ])?;
    }
    finish(wtr)
}

/// Existencias report with stock status per article.
pub fn stock_csv(rows: &[StockSummaryRow]) -> Result<String, ExportError> {
    let mut wtr = writer();
    wtr.write_record(["Artículo", "Stock", "Costo Unitario", "Valor Total", "Estado"])?;
    for row in rows {
        wtr.write_record([
            row.name.clone(),
            format!("{} unidades", row.stock),
            currency(row.unit_cost),
            currency(row.total_value),
            row.status.as_str().to_string(),
        ])?;
    }
    finish(wtr)
}

/// One control-card line as the eleven printed columns. Entry figures land
/// in the entrada columns, exit figures in the salida columns, the other
/// side shows zeros. The opening row fills only the running columns.
pub fn card_record(row: &CardRow) -> Vec<String> {
    match row {
        CardRow::Opening(r) => vec![
            String::new(),
            "Saldo Inicial".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            r.balance.to_string(),
            currency(r.last_cost),
            currency(r.balance_value),
        ],
        CardRow::Movement(r) => {
            let is_entry = r.kind == MovementKind::Entrada;
            let zero = currency(Decimal::ZERO);
            vec![
                spanish_date(r.date),
                r.description.clone(),
                if is_entry { r.quantity.to_string() } else { "0".to_string() },
                if is_entry { currency(r.unit_cost) } else { zero.clone() },
                if is_entry { currency(r.total_value) } else { zero.clone() },
                if is_entry { "0".to_string() } else { r.quantity.to_string() },
                if is_entry { zero.clone() } else { currency(r.unit_cost) },
                if is_entry { zero } else { currency(r.total_value) },
                r.balance.to_string(),
                currency(r.last_cost),
                currency(r.balance_value),
            ]
        }
    }
}

/// Control card export.
///
/// With `grouped` set (the all-articles card), rows are emitted in
/// per-article sections: an `Artículo: NAME` line, the headers, that
/// article's rows, then a blank line. Otherwise a single header + rows
/// table is produced.
pub fn control_card_csv(rows: &[CardRow], grouped: bool) -> Result<String, ExportError> {
    let mut wtr = writer();

    if !grouped {
        wtr.write_record(CARD_HEADERS)?;
        for row in rows {
            wtr.write_record(card_record(row))?;
        }
        return finish(wtr);
    }

    let mut current_article = None;
    for row in rows {
        let name = match row {
            CardRow::Opening(r) => &r.article_name,
            CardRow::Movement(r) => &r.article_name,
        };
        if current_article != Some(row.article_id()) {
            if current_article.is_some() {
                wtr.write_record([""])?;
            }
            wtr.write_record([format!("Artículo: {name}")])?;
            wtr.write_record(CARD_HEADERS)?;
            current_article = Some(row.article_id());
        }
        wtr.write_record(card_record(row))?;
    }
    if current_article.is_some() {
        wtr.write_record([""])?;
    }
    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use almacen_core::{ArticleId, MovementId};
    use almacen_ledger::{MovementRow, OpeningRow, StockStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn summary_row() -> StockSummaryRow {
        StockSummaryRow {
            article_id: ArticleId::new(1),
            name: "PAPEL BOND".to_string(),
            stock: 7,
            unit_cost: dec!(3.00),
            total_value: dec!(21.00),
            status: StockStatus::StockNormal,
        }
    }

    fn movement_row(article: i64, name: &str, kind: MovementKind) -> CardRow {
        CardRow::Movement(MovementRow {
            movement_id: MovementId::new(1),
            article_id: ArticleId::new(article),
            article_name: name.to_string(),
            date: "2024-03-05".parse::<NaiveDate>().unwrap(),
            kind,
            quantity: 10,
            description: "COMPRA".to_string(),
            unit_cost: dec!(3.00),
            balance: 10,
            last_cost: dec!(3.00),
            total_value: dec!(30.00),
            balance_value: dec!(30.00),
            author: None,
        })
    }

    #[test]
    fn articles_csv_has_header_and_units() {
        let csv = articles_csv(&[summary_row()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Artículo,Costo Unitario,Stock Actual,Valor Total"
        );
        assert_eq!(lines.next().unwrap(), "1,PAPEL BOND,$3.00,7 unidades,$21.00");
    }

    #[test]
    fn stock_csv_includes_status() {
        let csv = stock_csv(&[summary_row()]).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("Stock Normal"));
    }

    #[test]
    fn entry_figures_land_in_entrada_columns() {
        let record = card_record(&movement_row(1, "PAPEL", MovementKind::Entrada));
        assert_eq!(record[0], "05/03/2024");
        assert_eq!(record[2], "10");
        assert_eq!(record[3], "$3.00");
        assert_eq!(record[5], "0");
        assert_eq!(record[7], "$0.00");
        assert_eq!(record[8], "10");
    }

    #[test]
    fn exit_figures_land_in_salida_columns() {
        let record = card_record(&movement_row(1, "PAPEL", MovementKind::Salida));
        assert_eq!(record[2], "0");
        assert_eq!(record[4], "$0.00");
        assert_eq!(record[5], "10");
        assert_eq!(record[7], "$30.00");
    }

    #[test]
    fn opening_row_fills_only_running_columns() {
        let record = card_record(&CardRow::Opening(OpeningRow {
            article_id: ArticleId::new(1),
            article_name: "PAPEL".to_string(),
            balance: 5,
            last_cost: dec!(2.00),
            balance_value: dec!(10.00),
        }));
        assert_eq!(record[1], "Saldo Inicial");
        assert_eq!(record[2], "");
        assert_eq!(record[8], "5");
        assert_eq!(record[10], "$10.00");
    }

    #[test]
    fn grouped_card_emits_one_section_per_article() {
        let rows = vec![
            movement_row(1, "PAPEL", MovementKind::Entrada),
            movement_row(2, "TINTA", MovementKind::Entrada),
        ];
        let csv = control_card_csv(&rows, true).unwrap();
        assert!(csv.contains("Artículo: PAPEL"));
        assert!(csv.contains("Artículo: TINTA"));
        assert_eq!(csv.matches("Fecha,Descripción").count(), 2);
    }

    #[test]
    fn flat_card_has_single_header() {
        let rows = vec![movement_row(1, "PAPEL", MovementKind::Entrada)];
        let csv = control_card_csv(&rows, false).unwrap();
        assert_eq!(csv.matches("Fecha,Descripción").count(), 1);
        assert!(!csv.contains("Artículo:"));
    }
}
