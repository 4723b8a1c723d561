use std::cmp::Ordering;

use crate::{
    error::Result,
    index::SearchIndex,
    record::Record,
    text::{self, ABSTRACT_PREVIEW_CHARS},
};

/// Run a query against the index.
///
/// An empty (or whitespace-only) query lists every record, newest first.
/// A non-empty query ranks records by cosine similarity over the TF-IDF
/// vectors and keeps only strictly positive scores, so a record sharing no
/// term with the query never appears. `limit` truncates the ordered result
/// in both modes.
pub fn search<'a>(
    index: &'a SearchIndex,
    query: &str,
    limit: Option<usize>,
) -> Vec<&'a Record> {
    let query = query.trim();

    let mut results: Vec<&Record> = if query.is_empty() {
        let mut all: Vec<&Record> = index.records().iter().collect();
        all.sort_by(|a, b| browse_ordering(a, b));
        all
    } else {
        let scores = index.scores(query);
        let mut hits: Vec<(f32, &Record)> = index
            .records()
            .iter()
            .zip(scores)
            .filter(|&(_, score)| score > 0.0)
            .map(|(record, score)| (score, record))
            .collect();
        hits.sort_by(score_ordering);
        hits.into_iter().map(|(_, record)| record).collect()
    };

    if let Some(limit) = limit {
        results.truncate(limit);
    }
    results
}

/// Browse records with an optional exact-year filter and pagination.
///
/// Ordering is the empty-query ordering of [`search`]. The filter applies
/// first; `offset` then skips and `limit` truncates.
pub fn browse<'a>(
    index: &'a SearchIndex,
    year: Option<i32>,
    offset: usize,
    limit: Option<usize>,
) -> Vec<&'a Record> {
    let mut records = search(index, "", None);
    if let Some(year) = year {
        records.retain(|record| record.year == Some(year));
    }
    records
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Newest first, then title alphabetically. Records without a year sort as
/// year 0, i.e. beneath every dated record.
fn browse_ordering(a: &Record, b: &Record) -> Ordering {
    b.year
        .unwrap_or(0)
        .cmp(&a.year.unwrap_or(0))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

/// Score descending, exact ties broken by the browse ordering.
fn score_ordering(a: &(f32, &Record), b: &(f32, &Record)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| browse_ordering(a.1, b.1))
}

/// Render results for human-readable terminal output.
pub fn format_human(results: &[&Record]) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    let mut out = String::new();
    for (i, record) in results.iter().enumerate() {
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "n.d.".to_string());
        out.push_str(&format!(
            "{:>3}. {} {} ({year})\n",
            i + 1,
            record.id,
            record.title
        ));

        let mut byline = record.authors.join(", ");
        if let Some(ref journal) = record.journal {
            if byline.is_empty() {
                byline = journal.clone();
            } else {
                byline = format!("{byline} | {journal}");
            }
        }
        if !byline.is_empty() {
            out.push_str(&format!("     {byline}\n"));
        }

        if let Some(ref abstract_text) = record.abstract_text {
            out.push_str(&format!(
                "     {}\n",
                text::abstract_preview(abstract_text, ABSTRACT_PREVIEW_CHARS)
            ));
        }
    }
    out.push_str(&format!("\n{} result(s)", results.len()));
    out
}

/// Render results as a JSON document.
pub fn format_json(results: &[&Record], query: &str) -> Result<String> {
    let payload = serde_json::json!({
        "query": query,
        "result_count": results.len(),
        "results": results,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Render one record in full.
pub fn format_record(record: &Record) -> String {
    let mut out = format!("{} {}\n", record.id, record.title);
    if !record.authors.is_empty() {
        out.push_str(&format!("Authors:  {}\n", record.authors.join(", ")));
    }
    if let Some(year) = record.year {
        out.push_str(&format!("Year:     {year}\n"));
    }
    if let Some(ref journal) = record.journal {
        out.push_str(&format!("Journal:  {journal}\n"));
    }
    if let Some(ref doi) = record.doi {
        out.push_str(&format!("DOI:      {doi}\n"));
    }
    if !record.keywords.is_empty() {
        out.push_str(&format!("Keywords: {}\n", record.keywords.join(", ")));
    }
    if let Some(ref abstract_text) = record.abstract_text {
        out.push_str(&format!("\n{abstract_text}\n"));
    }
    out.push_str(&format!("\nid: {}", record.id.as_str()));
    out
}
