use crate::advisor::{csv, Advisor, AdvisorError, FALLBACK_INSIGHT};
use crate::categories::FALLBACK_CATEGORY;
use crate::domain::budget::MonthlyBudget;
use crate::domain::transaction::{Transaction, TransactionDraft};

/// Keyword fragments matched against lowercased descriptions, first
/// hit wins. Order puts the more specific merchants before generic
/// words like "store".
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("rent", "Housing"),
    ("mortgage", "Housing"),
    ("landlord", "Housing"),
    ("grocer", "Groceries"),
    ("supermarket", "Groceries"),
    ("market", "Groceries"),
    ("uber", "Transportation"),
    ("lyft", "Transportation"),
    ("fuel", "Transportation"),
    ("gas station", "Transportation"),
    ("parking", "Transportation"),
    ("transit", "Transportation"),
    ("electric", "Utilities"),
    ("water bill", "Utilities"),
    ("internet", "Utilities"),
    ("broadband", "Utilities"),
    ("phone", "Utilities"),
    ("netflix", "Subscriptions"),
    ("spotify", "Subscriptions"),
    ("subscription", "Subscriptions"),
    ("membership", "Subscriptions"),
    ("cinema", "Entertainment"),
    ("movie", "Entertainment"),
    ("concert", "Entertainment"),
    ("theatre", "Entertainment"),
    ("restaurant", "Dining Out"),
    ("cafe", "Dining Out"),
    ("coffee", "Dining Out"),
    ("pizza", "Dining Out"),
    ("takeout", "Dining Out"),
    ("diner", "Dining Out"),
    ("pharmacy", "Healthcare"),
    ("doctor", "Healthcare"),
    ("dental", "Healthcare"),
    ("clinic", "Healthcare"),
    ("hospital", "Healthcare"),
    ("tuition", "Education"),
    ("course", "Education"),
    ("bookstore", "Education"),
    ("savings transfer", "Savings"),
    ("amazon", "Shopping"),
    ("mall", "Shopping"),
    ("store", "Shopping"),
];

/// Local keyword-and-arithmetic advisor. No network, deterministic,
/// always available.
#[derive(Debug, Default)]
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl Advisor for HeuristicAdvisor {
    fn categorize(&self, description: &str, candidates: &[String]) -> String {
        let haystack = description.to_lowercase();

        for (keyword, category) in KEYWORD_RULES {
            if !haystack.contains(keyword) {
                continue;
            }
            if let Some(found) = candidates
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(category))
            {
                return found.clone();
            }
        }

        // A description naming a known category verbatim beats the fallback.
        for candidate in candidates {
            if haystack.contains(&candidate.to_lowercase()) {
                return candidate.clone();
            }
        }

        FALLBACK_CATEGORY.to_string()
    }

    fn parse_csv(
        &self,
        raw: &str,
        candidates: &[String],
    ) -> Result<Vec<TransactionDraft>, AdvisorError> {
        csv::parse_statement(raw, candidates, |description| {
            self.categorize(description, candidates)
        })
    }

    fn insights(&self, transactions: &[Transaction], budget: Option<&MonthlyBudget>) -> String {
        if transactions.is_empty() {
            return FALLBACK_INSIGHT.to_string();
        }

        let mut tips: Vec<String> = Vec::new();

        if let Some(budget) = budget {
            let mut overruns: Vec<(String, f64, f64)> = budget
                .lines
                .iter()
                .filter(|line| line.planned > 0.0)
                .filter_map(|line| {
                    let actual = line.manual_actual.unwrap_or_else(|| {
                        transactions
                            .iter()
                            .filter(|txn| {
                                txn.kind.is_expense()
                                    && txn.category.eq_ignore_ascii_case(&line.category)
                            })
                            .map(|txn| txn.amount)
                            .sum()
                    });
                    (actual > line.planned)
                        .then(|| (line.category.clone(), actual, line.planned))
                })
                .collect();
            overruns.sort_by(|a, b| {
                let over_a = a.1 - a.2;
                let over_b = b.1 - b.2;
                over_b.partial_cmp(&over_a).unwrap_or(std::cmp::Ordering::Equal)
            });
            for (category, actual, planned) in overruns.into_iter().take(2) {
                let pct = (actual / planned - 1.0) * 100.0;
                tips.push(format!(
                    "{} is {:.0}% over plan ({:.2} spent vs {:.2} planned). Worth a look before month end.",
                    category, pct, actual, planned
                ));
            }
        }

        let income: f64 = transactions
            .iter()
            .filter(|txn| txn.kind.is_income())
            .map(|txn| txn.amount)
            .sum();
        let expenses: f64 = transactions
            .iter()
            .filter(|txn| txn.kind.is_expense())
            .map(|txn| txn.amount)
            .sum();
        if income > 0.0 {
            let rate = (income - expenses) / income * 100.0;
            if rate < 0.0 {
                tips.push(
                    "Spending exceeded income this month. Review the biggest expense categories first."
                        .to_string(),
                );
            } else if rate >= 20.0 {
                tips.push(format!(
                    "You kept {:.0}% of income this month. Moving the surplus into a savings goal locks it in.",
                    rate
                ));
            } else {
                tips.push(format!(
                    "Savings rate is {:.0}% of income; nudging it toward 20% builds a buffer faster.",
                    rate
                ));
            }
        }

        if tips.is_empty() {
            return FALLBACK_INSIGHT.to_string();
        }
        tips.truncate(3);
        tips.join("\n")
    }
}
