//! Built-in category registry and discovery of custom names.
//!
//! Categories are plain strings compared case-insensitively. The
//! built-ins are always present; custom names live on the book and are
//! appended through `BudgetBook::register_categories`.

use std::collections::HashMap;

/// Reserved for income entries; never budgeted.
pub const INCOME_CATEGORY: &str = "Income";
/// Assigned when no better category can be determined.
pub const FALLBACK_CATEGORY: &str = "Other";

pub const BUILTIN_CATEGORIES: &[&str] = &[
    "Housing",
    "Groceries",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Dining Out",
    "Healthcare",
    "Shopping",
    "Subscriptions",
    "Education",
    "Savings",
    FALLBACK_CATEGORY,
];

/// Seed planned amount for a built-in category when a month is created.
fn builtin_planned(category: &str) -> Option<f64> {
    let amount = match category {
        "Housing" => 1500.0,
        "Groceries" => 600.0,
        "Transportation" => 300.0,
        "Utilities" => 250.0,
        "Entertainment" => 150.0,
        "Dining Out" => 200.0,
        "Healthcare" => 150.0,
        "Shopping" => 200.0,
        "Subscriptions" => 80.0,
        "Education" => 100.0,
        "Savings" => 400.0,
        FALLBACK_CATEGORY => 0.0,
        _ => return None,
    };
    Some(amount)
}

/// Full expense category list: built-ins first, then custom names in
/// their registration order.
pub fn all_categories(custom: &[String]) -> Vec<String> {
    let mut names: Vec<String> = BUILTIN_CATEGORIES
        .iter()
        .map(|name| name.to_string())
        .collect();
    for name in custom {
        if !contains_ignore_case(&names, name) {
            names.push(name.clone());
        }
    }
    names
}

pub fn is_known(name: &str, custom: &[String]) -> bool {
    BUILTIN_CATEGORIES
        .iter()
        .any(|builtin| builtin.eq_ignore_ascii_case(name))
        || custom.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

/// Names from a batch that are not yet in the registry, first spelling
/// wins, reserved and blank names excluded. Pure; callers decide
/// whether to register the result.
pub fn discover<'a, I>(names: I, custom: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<String> = Vec::new();
    for raw in names {
        let name = raw.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(INCOME_CATEGORY) {
            continue;
        }
        if is_known(name, custom) || contains_ignore_case(&found, name) {
            continue;
        }
        found.push(name.to_string());
    }
    found
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack
        .iter()
        .any(|entry| entry.eq_ignore_ascii_case(needle))
}

/// Planned amounts used when seeding budget lines, with per-user
/// overrides layered over the built-in seeds.
#[derive(Debug, Clone, Default)]
pub struct PlannedDefaults {
    overrides: HashMap<String, f64>,
}

impl PlannedDefaults {
    pub fn new(overrides: &HashMap<String, f64>) -> Self {
        let overrides = overrides
            .iter()
            .map(|(name, amount)| (name.trim().to_lowercase(), *amount))
            .collect();
        Self { overrides }
    }

    /// Override first, then built-in seed, then zero for custom names.
    pub fn for_category(&self, category: &str) -> f64 {
        if let Some(amount) = self.overrides.get(&category.trim().to_lowercase()) {
            return *amount;
        }
        builtin_planned(category).unwrap_or(0.0)
    }
}
