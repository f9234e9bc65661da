//! Heuristic bank statement parsing.
//!
//! Accepts the common export shapes: an optional header row naming the
//! columns, a single signed amount column or split debit/credit
//! columns, and a handful of date formats. Anything it cannot read it
//! refuses with a reason instead of guessing.

use chrono::NaiveDate;

use crate::advisor::{AdvisorError, CSV_SCAN_LIMIT};
use crate::categories::INCOME_CATEGORY;
use crate::domain::transaction::{EntryKind, TransactionDraft};

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"];

struct ColumnMap {
    date: usize,
    description: usize,
    amount: Option<usize>,
    debit: Option<usize>,
    credit: Option<usize>,
    kind: Option<usize>,
    category: Option<usize>,
}

impl ColumnMap {
    /// Headerless statements are assumed to be date, description,
    /// amount in the first three columns.
    fn positional() -> Self {
        Self {
            date: 0,
            description: 1,
            amount: Some(2),
            debit: None,
            credit: None,
            kind: None,
            category: None,
        }
    }

    fn from_headers(headers: &[String]) -> Result<Self, AdvisorError> {
        let lower: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();
        let date = find_column(&lower, &["date"]).ok_or_else(|| {
            AdvisorError::CsvUnusable("header row has no date column".into())
        })?;
        let description = find_column(
            &lower,
            &["description", "payee", "merchant", "memo", "details", "name"],
        )
        .unwrap_or(1);
        Ok(Self {
            date,
            description,
            amount: find_column(&lower, &["amount", "value"]),
            debit: find_column(&lower, &["debit", "withdrawal"]),
            credit: find_column(&lower, &["credit", "deposit"]),
            kind: find_column(&lower, &["type"]),
            category: find_column(&lower, &["category"]),
        })
    }
}

pub(crate) fn parse_statement(
    raw: &str,
    candidates: &[String],
    categorize: impl Fn(&str) -> String,
) -> Result<Vec<TransactionDraft>, AdvisorError> {
    let clipped = clip_to_scan_limit(raw);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(clipped.as_bytes());

    let mut rows: Vec<(u64, Vec<String>)> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| AdvisorError::CsvUnusable(err.to_string()))?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let fields: Vec<String> = record.iter().map(|field| field.trim().to_string()).collect();
        if fields.iter().all(String::is_empty) {
            continue;
        }
        rows.push((line, fields));
    }
    if rows.is_empty() {
        return Err(AdvisorError::CsvUnusable("statement contains no rows".into()));
    }

    let map = if looks_like_header(&rows[0].1) {
        let (_, headers) = rows.remove(0);
        ColumnMap::from_headers(&headers)?
    } else {
        ColumnMap::positional()
    };

    let mut drafts = Vec::new();
    for (line, row) in &rows {
        let Some(date_raw) = row.get(map.date).filter(|value| !value.is_empty()) else {
            continue;
        };
        let date = parse_date(date_raw).ok_or_else(|| {
            AdvisorError::CsvUnusable(format!("line {}: unrecognized date `{}`", line, date_raw))
        })?;

        let Some((amount, sign_kind)) = read_amount(row, &map)
            .map_err(|reason| AdvisorError::CsvUnusable(format!("line {}: {}", line, reason)))?
        else {
            continue;
        };
        // Zero-amount rows are pending or informational; drop them.
        if amount < f64::EPSILON {
            continue;
        }

        let description = row.get(map.description).cloned().unwrap_or_default();
        let kind = map
            .kind
            .and_then(|col| row.get(col))
            .and_then(|value| parse_kind(value))
            .unwrap_or(sign_kind);

        let category = if kind.is_income() {
            INCOME_CATEGORY.to_string()
        } else {
            map.category
                .and_then(|col| row.get(col))
                .filter(|value| {
                    !value.is_empty() && !value.eq_ignore_ascii_case(INCOME_CATEGORY)
                })
                .map(|value| {
                    // Statements may name categories we have not seen
                    // yet; keep them so the import can register them.
                    candidates
                        .iter()
                        .find(|candidate| candidate.eq_ignore_ascii_case(value))
                        .cloned()
                        .unwrap_or_else(|| value.clone())
                })
                .unwrap_or_else(|| categorize(&description))
        };

        drafts.push(TransactionDraft {
            date,
            description,
            amount,
            category,
            kind,
        });
    }

    if drafts.is_empty() {
        return Err(AdvisorError::CsvUnusable(
            "no usable transactions found in statement".into(),
        ));
    }
    Ok(drafts)
}

/// A header is a row where no field reads as a date or an amount.
fn looks_like_header(row: &[String]) -> bool {
    row.iter().all(|field| {
        let trimmed = field.trim();
        parse_amount_field(trimmed).is_none() && parse_date(trimmed).is_none()
    })
}

fn find_column(headers: &[String], needles: &[&str]) -> Option<usize> {
    needles
        .iter()
        .find_map(|needle| headers.iter().position(|header| header.contains(needle)))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_kind(value: &str) -> Option<EntryKind> {
    let lower = value.to_lowercase();
    if ["income", "credit", "deposit"].iter().any(|word| lower.contains(word)) {
        Some(EntryKind::Income)
    } else if ["expense", "debit", "withdrawal", "purchase"]
        .iter()
        .any(|word| lower.contains(word))
    {
        Some(EntryKind::Expense)
    } else {
        None
    }
}

/// Magnitude plus the direction implied by where the number sits: a
/// signed amount column, or split debit/credit columns.
fn read_amount(row: &[String], map: &ColumnMap) -> Result<Option<(f64, EntryKind)>, String> {
    if let Some(value) = map
        .amount
        .and_then(|col| row.get(col))
        .filter(|value| !value.is_empty())
    {
        let signed = parse_amount_field(value)
            .ok_or_else(|| format!("unreadable amount `{}`", value))?;
        let kind = if signed < 0.0 {
            EntryKind::Expense
        } else {
            EntryKind::Income
        };
        return Ok(Some((signed.abs(), kind)));
    }
    if let Some(value) = map
        .debit
        .and_then(|col| row.get(col))
        .filter(|value| !value.is_empty())
    {
        let amount = parse_amount_field(value)
            .ok_or_else(|| format!("unreadable debit amount `{}`", value))?;
        return Ok(Some((amount.abs(), EntryKind::Expense)));
    }
    if let Some(value) = map
        .credit
        .and_then(|col| row.get(col))
        .filter(|value| !value.is_empty())
    {
        let amount = parse_amount_field(value)
            .ok_or_else(|| format!("unreadable credit amount `{}`", value))?;
        return Ok(Some((amount.abs(), EntryKind::Income)));
    }
    Ok(None)
}

fn parse_amount_field(value: &str) -> Option<f64> {
    let cleaned = value
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn clip_to_scan_limit(raw: &str) -> &str {
    if raw.len() <= CSV_SCAN_LIMIT {
        return raw;
    }
    let mut end = CSV_SCAN_LIMIT;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}
