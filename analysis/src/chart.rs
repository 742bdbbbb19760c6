use arealens_dataset::Record;
use indexmap::IndexMap;
use serde::Serialize;

/// One charted year: the `year` itself plus a sparse `<area>_<metric>` map.
/// Keys exist only where a matching row carried a value; nothing is
/// zero-filled. Key order is insertion order so series stay stable between
/// requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub year: i32,
    #[serde(flatten)]
    pub metrics: IndexMap<String, MetricValue>,
}

/// Chart values keep their source width: demand counts serialize as JSON
/// integers, prices and sales values as decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

struct MetricSelection {
    price: bool,
    demand: bool,
    sales: bool,
}

impl MetricSelection {
    fn from_query(query_lower: &str) -> Self {
        let price = query_lower.contains("price") || query_lower.contains("rate");
        let demand = query_lower.contains("demand") || query_lower.contains("sold");
        let sales = query_lower.contains("transaction") || query_lower.contains("sales");
        if price || demand || sales {
            Self {
                price,
                demand,
                sales,
            }
        } else {
            // No metric keyword in the query: show price and demand.
            Self {
                price: true,
                demand: true,
                sales: false,
            }
        }
    }
}

/// One entry per distinct year in `records`, ascending. Within an entry,
/// areas appear in first-seen row order; for duplicate (year, area) pairs
/// the first row wins.
pub fn build_chart(records: &[Record], query: &str) -> Vec<ChartEntry> {
    let selection = MetricSelection::from_query(&query.to_lowercase());

    let mut years: Vec<i32> = records.iter().map(|record| record.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut areas: Vec<&str> = Vec::new();
    for record in records {
        if !areas.contains(&record.area.as_str()) {
            areas.push(&record.area);
        }
    }

    years
        .into_iter()
        .map(|year| {
            let mut metrics = IndexMap::new();
            for area in &areas {
                let Some(row) = records
                    .iter()
                    .find(|record| record.year == year && record.area == *area)
                else {
                    continue;
                };
                if selection.price && let Some(price) = row.price_per_sqft {
                    metrics.insert(format!("{area}_price"), MetricValue::Float(price));
                }
                if selection.demand && let Some(sold) = row.total_sold {
                    metrics.insert(format!("{area}_demand"), MetricValue::Int(sold));
                }
                if selection.sales && let Some(sales) = row.total_sales_value {
                    metrics.insert(format!("{area}_sales"), MetricValue::Float(sales));
                }
            }
            ChartEntry { year, metrics }
        })
        .collect()
}
