use crate::chart::ChartEntry;
use crate::chart::build_chart;
use crate::intent::QueryIntent;
use crate::summary::Summarizer;
use crate::table::TableRow;
use crate::table::build_table;
use arealens_dataset::DatasetStore;
use log::debug;
use serde::Serialize;

/// Everything one query run produces. `areas` echoes the matched areas even
/// when filtering left no rows for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub summary: String,
    pub chart_data: Vec<ChartEntry>,
    pub table_data: Vec<TableRow>,
    pub areas: Vec<String>,
}

impl QueryResponse {
    fn without_data(summary: String, areas: Vec<String>) -> Self {
        Self {
            summary,
            chart_data: Vec::new(),
            table_data: Vec::new(),
            areas,
        }
    }
}

/// Sequences one request end to end: load snapshot, extract intent, filter,
/// then fan out into summary and projections. Stateless across requests;
/// the snapshot is re-read every run.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    store: DatasetStore,
    summarizer: Summarizer,
}

impl AnalysisPipeline {
    pub fn new(store: DatasetStore, summarizer: Summarizer) -> Self {
        Self { store, summarizer }
    }

    /// Answer one query. Always produces a response: a missing snapshot, a
    /// query naming no known area, and a filter that leaves no rows all
    /// degrade to guidance text with empty projections.
    pub async fn run(&self, query: &str) -> QueryResponse {
        let Some(dataset) = self.store.load() else {
            // An unloadable snapshot degrades exactly like a query that
            // names no known area.
            debug!("snapshot unavailable, responding with guidance");
            return QueryResponse::without_data(guidance_message(&[]), Vec::new());
        };
        let intent = QueryIntent::extract(query, &dataset);
        if intent.areas.is_empty() {
            return QueryResponse::without_data(guidance_message(&dataset.areas()), Vec::new());
        }
        let records = dataset.filter(&intent.areas, intent.years.as_deref());
        debug!(
            "query matched {} area(s) and {} row(s)",
            intent.areas.len(),
            records.len()
        );
        if records.is_empty() {
            let summary = format!(
                "No data found for {} in the specified time period.",
                intent.areas.join(", ")
            );
            return QueryResponse::without_data(summary, intent.areas);
        }
        let summary = self
            .summarizer
            .summarize(query, &intent.areas, &records)
            .await;
        QueryResponse {
            summary,
            chart_data: build_chart(&records, query),
            table_data: build_table(&records, dataset.columns()),
            areas: intent.areas,
        }
    }
}

/// Guidance for queries that name no known area, listing up to five
/// snapshot areas as examples when any are available.
fn guidance_message(areas: &[String]) -> String {
    if areas.is_empty() {
        return "I couldn't identify any areas in your query. \
                Please try again with valid area names."
            .to_string();
    }
    let examples: Vec<&str> = areas.iter().take(5).map(String::as_str).collect();
    format!(
        "I couldn't identify any areas in your query. Please mention specific areas like {}.",
        example_list(&examples)
    )
}

fn example_list(examples: &[&str]) -> String {
    match examples {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{}, or {last}", head.join(", ")),
    }
}
