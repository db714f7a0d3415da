//! Turns raw search hits into [`DisplayResult`]s.
//!
//! Records arrive as provider-defined JSON. Extraction distinguishes a missing
//! container (`document`, `derivedStructData`, `snippets`, `snippets[0]`), which
//! drops the record, from a missing leaf (`htmlTitle`, `htmlSnippet`,
//! `formattedUrl`), which keeps it with a default value.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{DisplayResult, ResultList, NO_SNIPPET, NO_TITLE, NO_URL};

/// A single entry of `SearchResponse.results`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawResult(pub Value);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingContainer(&'static str),
    EmptySnippets,
    NotAString(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingContainer(field) => write!(f, "missing or malformed `{}`", field),
            SkipReason::EmptySnippets => write!(f, "`snippets` is empty"),
            SkipReason::NotAString(field) => write!(f, "`{}` is not a string", field),
        }
    }
}

/// Typed view over `document.derivedStructData`.
pub struct DerivedData<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> DerivedData<'a> {
    pub fn from_result(raw: &'a RawResult) -> Result<Self, SkipReason> {
        let fields = raw
            .0
            .get("document")
            .and_then(Value::as_object)
            .ok_or(SkipReason::MissingContainer("document"))?
            .get("derivedStructData")
            .and_then(Value::as_object)
            .ok_or(SkipReason::MissingContainer("derivedStructData"))?;
        Ok(Self { fields })
    }

    /// `Ok(None)` when the key is absent, an error when it holds a non-string.
    fn leaf(map: &'a Map<String, Value>, key: &'static str) -> Result<Option<&'a str>, SkipReason> {
        match map.get(key) {
            None => Ok(None),
            Some(value) => value.as_str().map(Some).ok_or(SkipReason::NotAString(key)),
        }
    }

    pub fn html_title(&self) -> Result<Option<&'a str>, SkipReason> {
        Self::leaf(self.fields, "htmlTitle")
    }

    pub fn formatted_url(&self) -> Result<Option<&'a str>, SkipReason> {
        Self::leaf(self.fields, "formattedUrl")
    }

    pub fn first_snippet(&self) -> Result<Option<&'a str>, SkipReason> {
        let snippets = self
            .fields
            .get("snippets")
            .and_then(Value::as_array)
            .ok_or(SkipReason::MissingContainer("snippets"))?;
        let first = snippets
            .first()
            .ok_or(SkipReason::EmptySnippets)?
            .as_object()
            .ok_or(SkipReason::MissingContainer("snippets[0]"))?;
        Self::leaf(first, "htmlSnippet")
    }
}

pub fn extract_display_result(raw: &RawResult) -> Result<DisplayResult, SkipReason> {
    let data = DerivedData::from_result(raw)?;

    let title = data.html_title()?.unwrap_or(NO_TITLE);
    let snippet = data.first_snippet()?.unwrap_or(NO_SNIPPET);
    let url = data.formatted_url()?.unwrap_or(NO_URL);

    Ok(DisplayResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        url: url.to_string(),
    })
}

/// Never fails: records that cannot be read are logged and left out.
pub fn format_response<I>(results: I) -> ResultList
where
    I: IntoIterator<Item = RawResult>,
{
    results
        .into_iter()
        .enumerate()
        .filter_map(|(position, raw)| match extract_display_result(&raw) {
            Ok(display) => Some(display),
            Err(reason) => {
                tracing::debug!("Skipping search result {}: {}", position, reason);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(derived: Value) -> RawResult {
        RawResult(json!({
            "id": "doc-1",
            "document": { "name": "doc-1", "derivedStructData": derived }
        }))
    }

    fn well_formed(title: &str) -> RawResult {
        record(json!({
            "htmlTitle": title,
            "snippets": [{ "htmlSnippet": format!("snippet for {}", title) }],
            "formattedUrl": format!("https://example.com/{}", title),
        }))
    }

    #[test]
    fn keeps_intact_fields_verbatim() {
        let raw = record(json!({
            "htmlTitle": "<b>Foo</b> Page",
            "snippets": [{ "htmlSnippet": "A <b>snippet</b>" }, { "htmlSnippet": "second" }],
            "formattedUrl": "http://example.com",
            "link": "http://example.com/ignored"
        }));

        assert_eq!(
            format_response(vec![raw]),
            vec![DisplayResult {
                title: "<b>Foo</b> Page".to_string(),
                snippet: "A <b>snippet</b>".to_string(),
                url: "http://example.com".to_string(),
            }]
        );
    }

    #[rstest]
    #[case::no_snippets(json!({ "htmlTitle": "t", "formattedUrl": "u" }))]
    #[case::empty_snippets(json!({ "htmlTitle": "t", "snippets": [], "formattedUrl": "u" }))]
    #[case::snippets_not_a_list(json!({ "htmlTitle": "t", "snippets": "x", "formattedUrl": "u" }))]
    #[case::first_snippet_not_a_map(json!({ "htmlTitle": "t", "snippets": ["x"], "formattedUrl": "u" }))]
    #[case::title_not_a_string(json!({ "htmlTitle": 7, "snippets": [{}], "formattedUrl": "u" }))]
    #[case::snippet_not_a_string(json!({ "snippets": [{ "htmlSnippet": null }] }))]
    #[case::url_not_a_string(json!({ "snippets": [{}], "formattedUrl": ["u"] }))]
    fn drops_records_with_broken_structure(#[case] derived: Value) {
        let input = vec![well_formed("a"), record(derived), well_formed("b")];
        let output = format_response(input);

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].title, "a");
        assert_eq!(output[1].title, "b");
    }

    #[rstest]
    #[case::no_document(json!({ "id": "x" }))]
    #[case::no_derived_data(json!({ "document": { "name": "x" } }))]
    #[case::derived_data_not_a_map(json!({ "document": { "derivedStructData": [] } }))]
    #[case::not_an_object(json!("just a string"))]
    fn drops_records_without_derived_data(#[case] raw: Value) {
        assert!(format_response(vec![RawResult(raw)]).is_empty());
    }

    #[rstest]
    #[case::missing_title(
        json!({ "snippets": [{ "htmlSnippet": "s" }], "formattedUrl": "u" }),
        ("No Title", "s", "u")
    )]
    #[case::missing_snippet_leaf(
        json!({ "htmlTitle": "t", "snippets": [{ "other": 1 }], "formattedUrl": "u" }),
        ("t", "No Snippet", "u")
    )]
    #[case::missing_url(
        json!({ "htmlTitle": "t", "snippets": [{ "htmlSnippet": "s" }] }),
        ("t", "s", "#")
    )]
    #[case::only_containers(json!({ "snippets": [{}] }), ("No Title", "No Snippet", "#"))]
    fn missing_leaves_get_defaults(#[case] derived: Value, #[case] expected: (&str, &str, &str)) {
        let output = format_response(vec![record(derived)]);

        assert_eq!(
            output,
            vec![DisplayResult {
                title: expected.0.to_string(),
                snippet: expected.1.to_string(),
                url: expected.2.to_string(),
            }]
        );
    }

    #[test]
    fn preserves_order_of_kept_records() {
        let input = vec![
            well_formed("first"),
            record(json!({})),
            well_formed("second"),
            RawResult(json!(null)),
            well_formed("third"),
        ];

        let titles: Vec<String> = format_response(input).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input_gives_empty_list() {
        assert!(format_response(Vec::<RawResult>::new()).is_empty());
    }

    #[test]
    fn accepts_lazy_iterators() {
        let output = format_response((0..3).map(|i| well_formed(&i.to_string())));
        assert_eq!(output.len(), 3);
        assert_eq!(output[2].url, "https://example.com/2");
    }

    #[test]
    fn reports_why_a_record_was_skipped() {
        let raw = record(json!({ "htmlTitle": "t", "snippets": [] }));
        assert_eq!(extract_display_result(&raw), Err(SkipReason::EmptySnippets));

        let raw = RawResult(json!({ "document": {} }));
        assert_eq!(
            extract_display_result(&raw),
            Err(SkipReason::MissingContainer("derivedStructData"))
        );
    }
}
