//! Output formatting utilities

use kinship_core::{GenePool, Person, PersonSet, Query};
use serde::{Deserialize, Serialize};

/// Output format, shared by `--format` and the `format` config key
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One person as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct PersonRow {
    pub name: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
}

impl PersonRow {
    pub fn new(pool: &GenePool, person: &Person) -> Self {
        let name_of = |id| pool.get(id).map(|p: &Person| p.name().to_string());
        Self {
            name: person.name().to_string(),
            gender: person.gender().to_string(),
            mother: person.mother().and_then(name_of),
            father: person.father().and_then(name_of),
        }
    }

    /// Rows for a result set, sorted by name
    pub fn from_set(pool: &GenePool, ids: &PersonSet) -> Vec<Self> {
        let mut rows: Vec<Self> = ids
            .iter()
            .filter_map(|id| pool.get(*id))
            .map(|p| Self::new(pool, p))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: String,
    #[serde(flatten)]
    fields: &'a Query,
    count: usize,
    people: Vec<&'a str>,
}

/// Format data as pretty JSON
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Format a list of people
pub fn format_people(rows: &[PersonRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_output(&rows),
        OutputFormat::Csv => format_csv(rows),
        OutputFormat::Table => {
            if rows.is_empty() {
                "(no one)".to_string()
            } else {
                rows.iter()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

/// Format the result of running a query
pub fn format_query_result(query: &Query, rows: &[PersonRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_output(&QueryOutput {
            query: query.to_string(),
            fields: query,
            count: rows.len(),
            people: rows.iter().map(|r| r.name.as_str()).collect(),
        }),
        _ => format_people(rows, format),
    }
}

fn format_csv(rows: &[PersonRow]) -> String {
    let mut out = String::from("name,gender,mother,father");
    for row in rows {
        out.push('\n');
        out.push_str(&csv_field(&row.name));
        out.push(',');
        out.push_str(&row.gender);
        out.push(',');
        out.push_str(&csv_field(row.mother.as_deref().unwrap_or("")));
        out.push(',');
        out.push_str(&csv_field(row.father.as_deref().unwrap_or("")));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
