use arealens_dataset::Record;
use arealens_gemini::GeminiClient;
use log::warn;

/// Returned when no areas matched or filtering left nothing to analyze.
pub const NO_DATA_MESSAGE: &str =
    "I couldn't find any data for the specified areas. Please try again with valid area names.";

/// Returned for any Gemini failure; the underlying error is only logged.
pub const SUMMARY_ERROR_MESSAGE: &str = "An error occurred while generating summary.";

/// Returned when the deployment has no API key.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Gemini API not configured. Please set GEMINI_API_KEY.";

/// Rows rendered into the prompt before eliding the middle of the set.
const MAX_PROMPT_ROWS: usize = 50;

/// Turns a query plus its filtered rows into summary text, best-effort.
/// Every failure mode has a fixed fallback string; calling this can never
/// fail a request.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: GeminiClient,
}

impl Summarizer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub async fn summarize(&self, query: &str, areas: &[String], records: &[Record]) -> String {
        if areas.is_empty() || records.is_empty() {
            return NO_DATA_MESSAGE.to_string();
        }
        if !self.client.is_configured() {
            return NOT_CONFIGURED_MESSAGE.to_string();
        }
        let prompt = build_prompt(query, areas, records);
        match self.client.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!("summary generation failed: {err}");
                SUMMARY_ERROR_MESSAGE.to_string()
            }
        }
    }
}

fn build_prompt(query: &str, areas: &[String], records: &[Record]) -> String {
    let area_list = areas.join(", ");
    let data = render_records(records);
    format!(
        "You are a real estate analyst. Analyze the following real estate data and provide \
         insights based on the user's query.\n\
         \n\
         User Query: \"{query}\"\n\
         Areas of Interest: {area_list}\n\
         \n\
         Real Estate Data:\n\
         {data}\n\
         \n\
         Provide:\n\
         1. Clear summary\n\
         2. Price trends & demand patterns\n\
         3. Comparison if multiple areas are mentioned\n\
         4. Actionable insights\n\
         \n\
         Format in clean Markdown.\n"
    )
}

/// Plain-text rendering of the rows, bounded at [`MAX_PROMPT_ROWS`]: larger
/// sets keep their head and tail with an elision marker in between.
fn render_records(records: &[Record]) -> String {
    let mut lines = vec![
        "area | year | price_per_sqft | total_sold | total_sales_value".to_string(),
    ];
    if records.len() <= MAX_PROMPT_ROWS {
        lines.extend(records.iter().map(render_record));
    } else {
        let half = MAX_PROMPT_ROWS / 2;
        lines.extend(records[..half].iter().map(render_record));
        lines.push(format!("... ({} rows elided) ...", records.len() - MAX_PROMPT_ROWS));
        lines.extend(records[records.len() - half..].iter().map(render_record));
    }
    lines.join("\n")
}

fn render_record(record: &Record) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        record.area,
        record.year,
        render_float(record.price_per_sqft),
        render_int(record.total_sold),
        render_float(record.total_sales_value),
    )
}

fn render_float(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn render_int(value: Option<i64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arealens_gemini::GeminiConfig;
    use pretty_assertions::assert_eq;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;
    use wiremock::matchers::body_string_contains;
    use wiremock::matchers::method;

    fn record(area: &str, year: i32) -> Record {
        Record {
            area: area.to_string(),
            year,
            price_per_sqft: Some(5500.0),
            total_sold: Some(120),
            total_sales_value: Some(660_000.0),
        }
    }

    fn unconfigured() -> Summarizer {
        let client = GeminiClient::new(GeminiConfig::default()).expect("client");
        Summarizer::new(client)
    }

    fn configured(server: &MockServer) -> Summarizer {
        let config = GeminiConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            ..GeminiConfig::default()
        };
        Summarizer::new(GeminiClient::new(config).expect("client"))
    }

    fn completion_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [ { "content": { "parts": [ { "text": text } ] } } ]
        })
    }

    #[test_log::test(tokio::test)]
    async fn empty_areas_short_circuit_to_no_data_text() {
        let summary = unconfigured()
            .summarize("anything", &[], &[record("Wakad", 2022)])
            .await;
        assert_eq!(summary, NO_DATA_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn empty_records_short_circuit_to_no_data_text() {
        let summary = unconfigured()
            .summarize("anything", &["Wakad".to_string()], &[])
            .await;
        assert_eq!(summary, NO_DATA_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn missing_key_returns_setup_hint() {
        let summary = unconfigured()
            .summarize(
                "wakad prices",
                &["Wakad".to_string()],
                &[record("Wakad", 2022)],
            )
            .await;
        assert_eq!(summary, NOT_CONFIGURED_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn generated_text_is_returned_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("real estate analyst"))
            .and(body_string_contains("Wakad prices please"))
            .and(body_string_contains("Areas of Interest: Wakad, Aundh"))
            .and(body_string_contains("Format in clean Markdown."))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("## Market Summary")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let areas = vec!["Wakad".to_string(), "Aundh".to_string()];
        let records = vec![record("Wakad", 2022), record("Aundh", 2022)];
        let summary = configured(&server)
            .summarize("Wakad prices please", &areas, &records)
            .await;
        assert_eq!(summary, "## Market Summary");
    }

    #[test_log::test(tokio::test)]
    async fn service_failure_returns_fixed_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let summary = configured(&server)
            .summarize(
                "wakad prices",
                &["Wakad".to_string()],
                &[record("Wakad", 2022)],
            )
            .await;
        assert_eq!(summary, SUMMARY_ERROR_MESSAGE);
    }

    #[test]
    fn prompt_embeds_query_areas_and_rows() {
        let prompt = build_prompt(
            "compare wakad and aundh",
            &["Wakad".to_string(), "Aundh".to_string()],
            &[record("Wakad", 2022)],
        );
        assert!(prompt.contains("User Query: \"compare wakad and aundh\""));
        assert!(prompt.contains("Areas of Interest: Wakad, Aundh"));
        assert!(prompt.contains("Wakad | 2022 | 5500 | 120 | 660000"));
        assert!(prompt.contains("1. Clear summary"));
        assert!(prompt.contains("4. Actionable insights"));
    }

    #[test]
    fn prompt_renders_missing_values_as_dashes() {
        let rows = vec![Record {
            area: "Wakad".to_string(),
            year: 2022,
            price_per_sqft: None,
            total_sold: None,
            total_sales_value: None,
        }];
        let prompt = build_prompt("wakad", &["Wakad".to_string()], &rows);
        assert!(prompt.contains("Wakad | 2022 | - | - | -"));
    }

    #[test]
    fn oversized_row_sets_are_elided_in_the_middle() {
        let records: Vec<Record> = (0..60).map(|idx| record("Wakad", 2000 + idx)).collect();
        let rendered = render_records(&records);
        let lines: Vec<&str> = rendered.lines().collect();
        // Header + 25 head rows + marker + 25 tail rows.
        assert_eq!(lines.len(), 52);
        assert!(rendered.contains("... (10 rows elided) ..."));
        assert!(rendered.contains("Wakad | 2000 |"));
        assert!(rendered.contains("Wakad | 2059 |"));
        assert!(!rendered.contains("Wakad | 2030 |"));
    }
}
