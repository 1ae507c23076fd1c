//! @acp:module "Stack Selector"
//! @acp:summary "Budget-constrained greedy stack selection with alternates"
//! @acp:domain recommend
//! @acp:layer logic

use std::cmp::Ordering;

use super::scoring::round_to;
use super::types::RankedTool;

/// Maximum number of alternates returned
pub const MAX_ALTERNATES: usize = 2;

/// Slack for float comparisons against the budget
const BUDGET_EPSILON: f64 = 1e-9;

/// Result of stack selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub stack: Vec<RankedTool>,
    pub alternates: Vec<RankedTool>,
    pub total_cost: f64,
    /// No tool fit the budget; the stack is the single best tool
    pub fallback_used: bool,
}

/// Select a stack using greedy utility-per-dollar ordering:
/// 1. Sort by score / max(price, 1) descending, ties on raw score
/// 2. Walk the order, taking each tool that keeps count and cost in bounds;
///    tools that would overshoot the budget are skipped, not a cutoff
/// 3. If nothing fit, take the single highest-scoring tool (cheapest on
///    ties) regardless of budget
/// 4. Alternates are the top two remaining tools by raw score
///
/// `max_count` below 1 is treated as 1.
pub fn select(scored: Vec<RankedTool>, budget_monthly: Option<f64>, max_count: usize) -> Selection {
    if scored.is_empty() {
        return Selection::default();
    }
    let max_count = max_count.max(1);

    let mut order: Vec<usize> = (0..scored.len()).collect();
    order.sort_by(|&a, &b| by_value_per_dollar(&scored[a], &scored[b]));

    let mut picked: Vec<usize> = Vec::new();
    let mut spent = 0.0;
    for idx in order {
        if picked.len() >= max_count {
            break;
        }
        let price = scored[idx].price();
        if fits_budget(spent, price, budget_monthly) {
            picked.push(idx);
            spent += price;
        } else {
            tracing::debug!(
                "Skipping {} (${:.2}): over budget at ${:.2} spent",
                scored[idx].id(),
                price,
                spent
            );
        }
    }

    let fallback_used = picked.is_empty();
    if fallback_used {
        let best = best_single(&scored);
        tracing::warn!(
            "No tool fits budget {:?}; falling back to {}",
            budget_monthly,
            scored[best].id()
        );
        picked.push(best);
    }

    let mut remaining: Vec<usize> = (0..scored.len()).filter(|i| !picked.contains(i)).collect();
    remaining.sort_by(|&a, &b| by_score(&scored[a], &scored[b]));
    remaining.truncate(MAX_ALTERNATES);

    let mut slots: Vec<Option<RankedTool>> = scored.into_iter().map(Some).collect();
    let stack: Vec<RankedTool> = picked.iter().filter_map(|&i| slots[i].take()).collect();
    let alternates: Vec<RankedTool> = remaining.iter().filter_map(|&i| slots[i].take()).collect();

    let total_cost = round_to(stack.iter().map(RankedTool::price).sum(), 2);

    Selection {
        stack,
        alternates,
        total_cost,
        fallback_used,
    }
}

fn fits_budget(spent: f64, price: f64, budget: Option<f64>) -> bool {
    match budget {
        Some(limit) => spent + price <= limit + BUDGET_EPSILON,
        None => true,
    }
}

/// Highest score first, cheapest on ties
fn best_single(scored: &[RankedTool]) -> usize {
    let mut best = 0;
    for (idx, candidate) in scored.iter().enumerate().skip(1) {
        let current = &scored[best];
        let better = match candidate.score.partial_cmp(&current.score) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => candidate.price() < current.price(),
            _ => false,
        };
        if better {
            best = idx;
        }
    }
    best
}

fn by_value_per_dollar(a: &RankedTool, b: &RankedTool) -> Ordering {
    b.utility_per_dollar
        .partial_cmp(&a.utility_per_dollar)
        .unwrap_or(Ordering::Equal)
        .then_with(|| by_score(a, b))
}

fn by_score(a: &RankedTool, b: &RankedTool) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id().cmp(b.id()))
}
