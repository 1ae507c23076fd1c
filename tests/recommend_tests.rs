//! Recommendation engine integration tests
//!
//! Exercises filtering, boosting, scoring and selection through the
//! public `recommend` entry point.

use pretty_assertions::assert_eq;
use toolstack::recommend::NO_MATCH_RATIONALE;
use toolstack::{recommend, Answers, RecommendRequest, Recommendation, Tool, WeightMapping};

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

fn budget_catalog() -> Vec<Tool> {
    vec![
        tool("A", "Misc", 50.0, 80.0),
        tool("B", "Misc", 20.0, 60.0),
        tool("C", "Misc", 200.0, 95.0),
    ]
}

// =============================================================================
// Budget-aware selection
// =============================================================================

mod selection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_over_budget_tools_are_skipped() {
        let request = RecommendRequest {
            budget_monthly: Some(60.0),
            max_tool_count: 2,
            ..Default::default()
        };
        let result = recommend(&budget_catalog(), &request, &accuracy_only());

        assert_eq!(result.stack_ids(), vec!["B"]);
        assert_eq!(result.total_monthly_cost, 20.0);
        assert!(!result.fallback_used);
        assert_eq!(result.alternate_ids(), vec!["C", "A"]);
    }

    #[test]
    fn test_unbounded_budget_fills_to_max() {
        let request = RecommendRequest {
            max_tool_count: 2,
            ..Default::default()
        };
        let result = recommend(&budget_catalog(), &request, &accuracy_only());

        // B 3.0/$, A 1.6/$, C 0.475/$
        assert_eq!(result.stack_ids(), vec!["B", "A"]);
        assert_eq!(result.total_monthly_cost, 70.0);
        assert_eq!(result.alternate_ids(), vec!["C"]);
    }

    #[test]
    fn test_fallback_when_nothing_fits() {
        let request = RecommendRequest {
            budget_monthly: Some(5.0),
            ..Default::default()
        };
        let result = recommend(&budget_catalog(), &request, &accuracy_only());

        assert!(result.fallback_used);
        assert_eq!(result.stack_ids(), vec!["C"]);
        assert_eq!(result.total_monthly_cost, 200.0);
        assert_eq!(result.alternate_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_zero_budget_keeps_free_tools() {
        let mut catalog = budget_catalog();
        let mut free = tool("free", "Misc", 0.0, 10.0);
        free.price_low_usd = None;
        catalog.push(free);

        let request = RecommendRequest {
            budget_monthly: Some(0.0),
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());

        assert_eq!(result.stack_ids(), vec!["free"]);
        assert_eq!(result.total_monthly_cost, 0.0);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_cost_rounded_to_cents() {
        let catalog = vec![
            tool("x", "Misc", 10.005, 50.0),
            tool("y", "Misc", 0.1, 1.0),
            tool("z", "Misc", 0.2, 1.0),
        ];
        let result = recommend(&catalog, &RecommendRequest::default(), &accuracy_only());
        assert_eq!(result.stack.len(), 3);
        let cents = result.total_monthly_cost * 100.0;
        assert!((cents - cents.round()).abs() < 1e-9);
    }
}

// =============================================================================
// Channel preferences
// =============================================================================

mod preference_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_earlier_channel_categories_boosted_more() {
        let catalog = vec![
            tool("seo", "SEO", 10.0, 10.0),
            tool("ads", "Ads & Creatives", 10.0, 10.0),
        ];
        let request = RecommendRequest {
            answers: Answers::with_channels(["Paid Ads", "SEO"]),
            max_tool_count: 1,
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());

        assert_eq!(result.stack_ids(), vec!["ads"]);
        assert_eq!(result.stack[0].boost, 1.30);
        assert!((result.alternates[0].boost - 1.24).abs() < 1e-9);
    }

    #[test]
    fn test_general_categories_boosted_without_channels() {
        let catalog = vec![
            tool("research", "Research & Strategy", 10.0, 10.0),
            tool("misc", "Misc", 10.0, 10.0),
        ];
        let result = recommend(&catalog, &RecommendRequest::default(), &accuracy_only());

        assert_eq!(result.stack_ids(), vec!["research", "misc"]);
        assert_eq!(result.stack[0].score, 13.0);
        assert_eq!(result.stack[1].score, 10.0);
    }

    #[test]
    fn test_unknown_channels_ignored() {
        let catalog = vec![tool("misc", "Misc", 10.0, 10.0)];
        let request = RecommendRequest {
            answers: Answers::with_channels(["Carrier Pigeon"]),
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());
        assert_eq!(result.stack[0].boost, 1.0);
    }
}

// =============================================================================
// Hard constraints
// =============================================================================

mod constraint_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_integrations(mut tool: Tool, integrations: &str) -> Tool {
        tool.integrations_csv = Some(integrations.to_string());
        tool
    }

    #[test]
    fn test_integration_filter_keeps_matching_tools() {
        let catalog = vec![
            with_integrations(tool("a", "Misc", 10.0, 50.0), "Slack, Notion"),
            with_integrations(tool("b", "Misc", 10.0, 90.0), "Discord"),
        ];
        let request = RecommendRequest {
            must_integrate_with: vec!["SLACK".to_string()],
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());

        assert_eq!(result.stack_ids(), vec!["a"]);
        assert!(result.alternates.is_empty());
    }

    #[test]
    fn test_unmatched_integration_falls_back_to_catalog() {
        let request = RecommendRequest {
            must_integrate_with: vec!["zapier".to_string()],
            max_tool_count: 3,
            ..Default::default()
        };
        let result = recommend(&budget_catalog(), &request, &accuracy_only());
        assert_eq!(result.stack.len(), 3);
    }

    #[test]
    fn test_self_host_filter_can_empty_catalog() {
        let request = RecommendRequest {
            prefer_self_hostable: true,
            ..Default::default()
        };
        let result = recommend(&budget_catalog(), &request, &accuracy_only());

        assert_eq!(result, Recommendation::no_match());
        assert_eq!(result.rationale, NO_MATCH_RATIONALE);
        assert_eq!(result.total_monthly_cost, 0.0);
    }

    #[test]
    fn test_self_host_accepts_webhooks_or_n8n() {
        let mut hooks = tool("hooks", "Misc", 10.0, 10.0);
        hooks.webhooks = true;
        let mut n8n = tool("n8n", "Misc", 10.0, 20.0);
        n8n.n8n = true;
        let catalog = vec![hooks, n8n, tool("plain", "Misc", 1.0, 99.0)];

        let request = RecommendRequest {
            prefer_self_hostable: true,
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());
        assert_eq!(result.stack_ids(), vec!["n8n", "hooks"]);
    }

    #[test]
    fn test_empty_catalog_is_no_match() {
        let result = recommend(&[], &RecommendRequest::default(), &accuracy_only());
        assert_eq!(result, Recommendation::no_match());
    }
}

// =============================================================================
// Output invariants
// =============================================================================

mod invariant_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn requests() -> Vec<RecommendRequest> {
        let budgets = [None, Some(0.0), Some(25.0), Some(60.0), Some(1000.0)];
        let maxes = [1, 2, 8];
        let mut out = Vec::new();
        for budget in budgets {
            for max in maxes {
                out.push(RecommendRequest {
                    answers: Answers::with_channels(["SEO"]),
                    budget_monthly: budget,
                    max_tool_count: max,
                    ..Default::default()
                });
            }
        }
        out
    }

    fn catalog() -> Vec<Tool> {
        let mut tools = budget_catalog();
        tools.push(tool("D", "SEO", 35.0, 70.0));
        tools.push(tool("E", "Copy & Content", 5.0, 20.0));
        tools
    }

    #[test]
    fn test_stack_bounds_and_budget() {
        let catalog = catalog();
        for request in requests() {
            let result = recommend(&catalog, &request, &WeightMapping::builtin());

            assert!(!result.stack.is_empty());
            assert!(result.stack.len() <= request.max_tool_count);
            assert!(result.alternates.len() <= 2);
            if let (Some(budget), false) = (request.budget_monthly, result.fallback_used) {
                assert!(result.total_monthly_cost <= budget + 1e-9);
            }
            if result.fallback_used {
                assert_eq!(result.stack.len(), 1);
            }
        }
    }

    #[test]
    fn test_alternates_disjoint_from_stack() {
        let catalog = catalog();
        for request in requests() {
            let result = recommend(&catalog, &request, &WeightMapping::builtin());
            let stack = result.stack_ids();
            for alt in result.alternate_ids() {
                assert!(!stack.contains(&alt), "{} is both picked and alternate", alt);
            }
        }
    }

    #[test]
    fn test_same_inputs_same_output() {
        let catalog = catalog();
        for request in requests() {
            let first = recommend(&catalog, &request, &WeightMapping::builtin());
            let second = recommend(&catalog, &request, &WeightMapping::builtin());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_tied_tools_ordered_by_id() {
        let catalog = vec![
            tool("zeta", "Misc", 10.0, 10.0),
            tool("alpha", "Misc", 10.0, 10.0),
            tool("mid", "Misc", 10.0, 10.0),
        ];
        let request = RecommendRequest {
            max_tool_count: 1,
            ..Default::default()
        };
        let result = recommend(&catalog, &request, &accuracy_only());
        assert_eq!(result.stack_ids(), vec!["alpha"]);
        assert_eq!(result.alternate_ids(), vec!["mid", "zeta"]);
    }
}
