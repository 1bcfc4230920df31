use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Dollar amount with two decimals, `$3.50` style.
pub fn currency(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// `dd/mm/yyyy`, the format the printed cards use.
pub fn spanish_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
