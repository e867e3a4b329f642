//! Name search over the ledger's transactions.

use std::cmp::Ordering;

use crate::ledger::{ordering::compare_names, Transaction};

/// A transaction matched by [`search`] along with how many query tokens its name contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub transaction: &'a Transaction,
    pub hits: usize,
}

/// Splits `query` on runs of non-alphanumeric (Unicode) characters into distinct
/// lowercase tokens, keeping first-seen order.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for raw in query.split(|c: char| !c.is_alphanumeric()) {
        if raw.is_empty() {
            continue;
        }
        let token = raw.to_lowercase();
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Ranks transactions whose lowercased name contains at least one query token: most hits
/// first, then earliest date, then name.
pub fn search<'a>(transactions: &'a [Transaction], query: &str) -> Vec<SearchHit<'a>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = transactions
        .iter()
        .filter_map(|transaction| {
            let name = transaction.name.to_lowercase();
            let hits = tokens.iter().filter(|token| name.contains(token.as_str())).count();
            (hits > 0).then_some(SearchHit { transaction, hits })
        })
        .collect();
    hits.sort_by(rank);
    hits
}

fn rank(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    b.hits
        .cmp(&a.hits)
        .then_with(|| a.transaction.date.cmp(&b.transaction.date))
        .then_with(|| compare_names(&a.transaction.name, &b.transaction.name))
}
