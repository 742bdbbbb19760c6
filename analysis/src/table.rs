use arealens_dataset::Columns;
use arealens_dataset::Record;
use serde::Serialize;

/// One filtered record reshaped for tabular display. The three
/// source-backed columns are omitted from the payload entirely when the
/// snapshot never had them; a missing cell in a present column renders as
/// zero instead. `Avg_Size_SqFt` and `Demand_Score` are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Transactions", skip_serializing_if = "Option::is_none")]
    pub transactions: Option<i64>,
    #[serde(rename = "Price_Per_SqFt", skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<f64>,
    #[serde(rename = "Total_Sales", skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<f64>,
    #[serde(rename = "Avg_Size_SqFt")]
    pub avg_size_sqft: f64,
    #[serde(rename = "Demand_Score")]
    pub demand_score: i64,
}

/// One output row per input record, order preserved. No row is dropped for
/// missing data.
pub fn build_table(records: &[Record], columns: Columns) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| table_row(record, columns))
        .collect()
}

fn table_row(record: &Record, columns: Columns) -> TableRow {
    TableRow {
        area: record.area.clone(),
        year: record.year,
        transactions: columns.total_sold.then(|| record.total_sold.unwrap_or(0)),
        price_per_sqft: columns
            .price_per_sqft
            .then(|| record.price_per_sqft.unwrap_or(0.0)),
        total_sales: columns
            .total_sales_value
            .then(|| record.total_sales_value.unwrap_or(0.0)),
        avg_size_sqft: avg_size_sqft(record),
        demand_score: record.total_sold.unwrap_or(0),
    }
}

/// Average unit size: (total sales value / rate per sqft) / units sold,
/// rounded to a whole number. Any missing operand, division blowup, or
/// negative outcome yields exactly 0.
fn avg_size_sqft(record: &Record) -> f64 {
    let (Some(sales), Some(price), Some(sold)) = (
        record.total_sales_value,
        record.price_per_sqft,
        record.total_sold,
    ) else {
        return 0.0;
    };
    let size = (sales / price / sold as f64).round();
    if size.is_finite() { size.max(0.0) } else { 0.0 }
}
