use arealens_dataset::Dataset;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static LAST_N_YEARS: Lazy<Regex> = Lazy::new(|| compile_regex(r"last\s+(\d+)\s+years?"));
static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| compile_regex(r"\b20\d{2}\b"));

/// Longest "last N years" span worth materializing; years before the
/// snapshot's own range cannot match a row anyway.
const MAX_YEAR_SPAN: u32 = 1000;

fn compile_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid regex literal {pattern}: {err}"))
}

/// What a free-text query asks for: the snapshot areas it mentions and the
/// year constraint it implies. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryIntent {
    /// Matched areas in snapshot enumeration order (not query order).
    pub areas: Vec<String>,
    /// `None` means no year filter: every year passes.
    pub years: Option<Vec<i32>>,
}

impl QueryIntent {
    pub fn extract(query: &str, dataset: &Dataset) -> Self {
        Self {
            areas: extract_areas(query, dataset),
            years: extract_years(query, dataset),
        }
    }
}

/// Areas whose label occurs, case-insensitively, as a substring of the
/// query. No word-boundary requirement: a short label inside a longer word
/// is a known false positive and stays one.
pub fn extract_areas(query: &str, dataset: &Dataset) -> Vec<String> {
    let query_lower = query.to_lowercase();
    dataset
        .areas()
        .into_iter()
        .filter(|area| query_lower.contains(&area.to_lowercase()))
        .collect()
}

/// Year constraint of the query, first match wins:
///
/// 1. "last N years" resolves against the snapshot's max year to the closed
///    range `[max - N + 1, max]`. "last 0 years" is an empty range and
///    means no constraint.
/// 2. Otherwise every standalone `20xx` token, in the order found,
///    duplicates kept.
/// 3. Otherwise no constraint.
pub fn extract_years(query: &str, dataset: &Dataset) -> Option<Vec<i32>> {
    let query_lower = query.to_lowercase();
    if let Some(digits) = LAST_N_YEARS
        .captures(&query_lower)
        .and_then(|captures| captures.get(1))
    {
        return last_years_range(digits.as_str(), dataset);
    }
    let years: Vec<i32> = YEAR_TOKEN
        .find_iter(query)
        .filter_map(|token| token.as_str().parse().ok())
        .collect();
    if years.is_empty() { None } else { Some(years) }
}

fn last_years_range(digits: &str, dataset: &Dataset) -> Option<Vec<i32>> {
    let max_year = dataset.max_year()?;
    let span = digits.parse::<u32>().unwrap_or(u32::MAX).min(MAX_YEAR_SPAN);
    if span == 0 {
        return None;
    }
    let start = i64::from(max_year) - i64::from(span) + 1;
    let years: Vec<i32> = (start..=i64::from(max_year))
        .filter_map(|year| i32::try_from(year).ok())
        .collect();
    Some(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arealens_dataset::Columns;
    use arealens_dataset::Record;
    use pretty_assertions::assert_eq;

    fn dataset_with_years(years: &[i32]) -> Dataset {
        let records = years
            .iter()
            .flat_map(|year| {
                ["Wakad", "Aundh", "Baner"].map(|area| Record {
                    area: area.to_string(),
                    year: *year,
                    price_per_sqft: Some(5000.0),
                    total_sold: Some(100),
                    total_sales_value: Some(1_000_000.0),
                })
            })
            .collect();
        Dataset::new(records, Columns::all())
    }

    fn dataset() -> Dataset {
        dataset_with_years(&[2020, 2021, 2022, 2023, 2024])
    }

    #[test]
    fn areas_match_case_insensitive_substrings_in_snapshot_order() {
        let areas = extract_areas("I like wakad and Aundh", &dataset());
        assert_eq!(areas, vec!["Wakad", "Aundh"]);
    }

    #[test]
    fn areas_match_inside_longer_words() {
        // Substring matching is deliberate; "wakadewadi" still hits Wakad.
        let areas = extract_areas("prices in wakadewadi", &dataset());
        assert_eq!(areas, vec!["Wakad"]);
    }

    #[test]
    fn no_mentioned_area_yields_empty_list() {
        assert!(extract_areas("tell me something", &dataset()).is_empty());
    }

    #[test]
    fn last_n_years_resolves_against_max_year() {
        let years = extract_years("show me the LAST 3 Years", &dataset());
        assert_eq!(years, Some(vec![2022, 2023, 2024]));
    }

    #[test]
    fn last_one_year_is_just_the_max_year() {
        let years = extract_years("price change over the last 1 year", &dataset());
        assert_eq!(years, Some(vec![2024]));
    }

    #[test]
    fn last_zero_years_means_no_constraint() {
        assert_eq!(extract_years("last 0 years in 2023", &dataset()), None);
    }

    #[test]
    fn last_n_years_takes_priority_over_explicit_tokens() {
        let years = extract_years("since 2020, say the last 2 years", &dataset());
        assert_eq!(years, Some(vec![2023, 2024]));
    }

    #[test]
    fn explicit_year_tokens_are_collected_in_found_order() {
        let years = extract_years("compare 2023 against 2021", &dataset());
        assert_eq!(years, Some(vec![2023, 2021]));
    }

    #[test]
    fn duplicate_year_tokens_are_kept() {
        let years = extract_years("2022 vs 2022", &dataset());
        assert_eq!(years, Some(vec![2022, 2022]));
    }

    #[test]
    fn embedded_digit_runs_are_not_years() {
        assert_eq!(extract_years("flat 120221 sq ft", &dataset()), None);
        assert_eq!(extract_years("in 1999 and 3024", &dataset()), None);
    }

    #[test]
    fn plain_queries_have_no_year_constraint() {
        assert_eq!(extract_years("how is the market", &dataset()), None);
    }

    #[test]
    fn empty_snapshot_disables_last_n_years() {
        let empty = Dataset::new(Vec::new(), Columns::default());
        assert_eq!(extract_years("last 3 years", &empty), None);
    }

    #[test]
    fn oversized_spans_are_capped_not_exploded() {
        let years =
            extract_years("last 99999999999999999999 years", &dataset()).expect("year range");
        assert_eq!(years.len(), 1000);
        assert_eq!(years.last(), Some(&2024));
    }

    #[test]
    fn intent_combines_both_extractions() {
        let intent = QueryIntent::extract("wakad demand in 2023", &dataset());
        assert_eq!(intent.areas, vec!["Wakad"]);
        assert_eq!(intent.years, Some(vec![2023]));
    }
}
