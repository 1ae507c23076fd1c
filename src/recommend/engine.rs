//! @acp:module "Recommendation Engine"
//! @acp:summary "Filter, boost, score and select a tool stack for one request"
//! @acp:domain recommend
//! @acp:layer logic
//!
//! Pure over its inputs: the same catalog, request and weights always give
//! the same recommendation. Safe to call from many threads at once.

use super::categories::{category_boost, preferred_categories};
use super::filter::filter_catalog;
use super::scoring::{boosted_score, utility_per_dollar};
use super::selector::{select, Selection};
use super::types::*;

/// Number of preferred categories named in the rationale
const RATIONALE_CATEGORIES: usize = 3;

/// Recommend a stack from `catalog` for `request`.
///
/// The request is expected to satisfy `max_tool_count >= 1` and a
/// non-negative budget; see [`RecommendRequest::sanitized`].
pub fn recommend(
    catalog: &[Tool],
    request: &RecommendRequest,
    weights: &WeightMapping,
) -> Recommendation {
    let available = filter_catalog(
        catalog,
        &request.must_integrate_with,
        request.prefer_self_hostable,
    );
    if available.is_empty() {
        tracing::debug!("Catalog of {} tools empty after filtering", catalog.len());
        return Recommendation::no_match();
    }

    let preferred = preferred_categories(&request.answers);
    let scored: Vec<RankedTool> = available
        .into_iter()
        .map(|tool| rank_tool(tool, weights, &preferred))
        .collect();
    tracing::debug!(
        "Scored {} tools against {} preferred categories",
        scored.len(),
        preferred.len()
    );

    let selection = select(scored, request.budget_monthly, request.max_tool_count);
    let rationale = build_rationale(&selection, request, &preferred);

    Recommendation {
        stack: selection.stack,
        alternates: selection.alternates,
        total_monthly_cost: selection.total_cost,
        rationale,
        fallback_used: selection.fallback_used,
    }
}

/// Score one tool with its category boost
pub fn rank_tool(tool: &Tool, weights: &WeightMapping, preferred: &[String]) -> RankedTool {
    let boost = category_boost(&tool.category, preferred);
    let score = boosted_score(tool, weights, boost);
    RankedTool {
        utility_per_dollar: utility_per_dollar(score, tool.price()),
        tool: tool.clone(),
        score,
        boost,
    }
}

fn build_rationale(
    selection: &Selection,
    request: &RecommendRequest,
    preferred: &[String],
) -> String {
    let mut parts = vec![
        "Ranked by weighted utility per dollar (score / max(price, $1)) with channel-based category boosts"
            .to_string(),
    ];

    let focus: Vec<&str> = preferred
        .iter()
        .take(RATIONALE_CATEGORIES)
        .map(String::as_str)
        .collect();
    if !focus.is_empty() {
        parts.push(format!("favoring {}", focus.join(", ")));
    }

    match request.budget_monthly {
        Some(budget) if selection.fallback_used => parts.push(format!(
            "no tool fit the ${:.2}/mo budget, so the single highest-scoring tool was chosen",
            budget
        )),
        Some(budget) => parts.push(format!(
            "greedy selection of up to {} tools within ${:.2}/mo",
            request.max_tool_count, budget
        )),
        None => parts.push(format!(
            "greedy selection of up to {} tools, no budget limit",
            request.max_tool_count
        )),
    }

    if request.prefer_self_hostable {
        parts.push("self-hostable approximated by n8n or webhook support".to_string());
    }

    format!("{}.", parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: &str, category: &str, price: f64, accuracy: f64) -> Tool {
        Tool {
            tool_id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            price_low_usd: Some(price),
            accuracy_score: Some(accuracy),
            ..Default::default()
        }
    }

    fn accuracy_only() -> WeightMapping {
        let mut weights = WeightMapping::new();
        weights.insert("accuracy_score", 1.0);
        weights
    }

    #[test]
    fn test_boost_applied_from_channels() {
        let catalog = vec![
            tool("seo", "SEO", 10.0, 10.0),
            tool("other", "Uncategorized", 10.0, 10.0),
        ];
        let request = RecommendRequest {
            answers: Answers::with_channels(["SEO"]),
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());
        assert_eq!(result.stack_ids(), vec!["seo", "other"]);
        assert_eq!(result.stack[0].score, 13.0);
        assert_eq!(result.stack[0].boost, 1.30);
        assert_eq!(result.stack[1].boost, 1.0);
    }

    #[test]
    fn test_rationale_mentions_fallback() {
        let catalog = vec![tool("a", "SEO", 100.0, 5.0)];
        let request = RecommendRequest {
            budget_monthly: Some(10.0),
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());
        assert!(result.fallback_used);
        assert!(result.rationale.contains("single highest-scoring tool"));
    }

    #[test]
    fn test_no_match_when_filters_empty_catalog() {
        let catalog = vec![tool("a", "SEO", 10.0, 5.0)];
        let request = RecommendRequest {
            prefer_self_hostable: true,
            ..Default::default()
        };
        assert_eq!(
            recommend(&catalog, &request, &accuracy_only()),
            Recommendation::no_match()
        );
    }
}
