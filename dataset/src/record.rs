/// One snapshot row: a single area+year observation.
///
/// The numeric fields are `None` when the snapshot lacks the column entirely
/// or the cell is empty/unparseable; downstream projections decide how each
/// gap is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Location label, matched case-insensitively against queries.
    pub area: String,
    pub year: i32,
    /// Flat weighted-average rate per square foot.
    pub price_per_sqft: Option<f64>,
    /// Transaction count; doubles as the demand proxy.
    pub total_sold: Option<i64>,
    pub total_sales_value: Option<f64>,
}

/// Which optional snapshot columns were present at load time.
///
/// The table projection only emits output columns whose source column
/// exists; a missing cell in a present column is a different case (rendered
/// as zero, not omitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Columns {
    pub price_per_sqft: bool,
    pub total_sold: bool,
    pub total_sales_value: bool,
}

impl Columns {
    pub fn all() -> Self {
        Self {
            price_per_sqft: true,
            total_sold: true,
            total_sales_value: true,
        }
    }
}

/// An in-memory snapshot: ordered rows plus column presence. Loaded fresh
/// per request, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    columns: Columns,
}

impl Dataset {
    pub fn new(records: Vec<Record>, columns: Columns) -> Self {
        Self { records, columns }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct area labels in first-seen row order. Query interpretation
    /// depends on this order: matched areas are reported in enumeration
    /// order, not in the order they appear in the query.
    pub fn areas(&self) -> Vec<String> {
        let mut areas: Vec<String> = Vec::new();
        for record in &self.records {
            if !areas.contains(&record.area) {
                areas.push(record.area.clone());
            }
        }
        areas
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|record| record.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|record| record.year).max()
    }

    /// Rows whose `area` is in `areas` and, when a year constraint is given,
    /// whose `year` is in it. Row order is preserved.
    pub fn filter(&self, areas: &[String], years: Option<&[i32]>) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| areas.contains(&record.area))
            .filter(|record| years.is_none_or(|set| set.contains(&record.year)))
            .cloned()
            .collect()
    }
}
