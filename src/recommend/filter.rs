//! @acp:module "Constraint Filter"
//! @acp:summary "Hard catalog filters applied before scoring"
//! @acp:domain recommend
//! @acp:layer logic

use super::types::Tool;

/// Narrow the catalog by self-host preference and required integrations.
///
/// 1. `prefer_self_hostable` keeps tools passing [`Tool::is_self_hostable`]
///    (a heuristic, see there)
/// 2. Non-blank `must_integrate_with` names keep tools whose integrations
///    text contains any of them, case-insensitive substring. If no tool
///    matches, the step is skipped rather than emptying the set.
///
/// Returns an empty set only when the catalog (or the self-host subset) is
/// empty.
pub fn filter_catalog<'a>(
    catalog: &'a [Tool],
    must_integrate_with: &[String],
    prefer_self_hostable: bool,
) -> Vec<&'a Tool> {
    let mut available: Vec<&Tool> = catalog.iter().collect();

    if prefer_self_hostable {
        available.retain(|t| t.is_self_hostable());
        tracing::debug!("Self-host filter kept {} of {} tools", available.len(), catalog.len());
    }

    let required = normalize_integrations(must_integrate_with);
    if !required.is_empty() {
        let matching: Vec<&Tool> = available
            .iter()
            .copied()
            .filter(|t| matches_integrations(t, &required))
            .collect();

        if matching.is_empty() {
            tracing::warn!(
                "No tool integrates with any of {:?}; ignoring integration filter",
                required
            );
        } else {
            available = matching;
        }
    }

    available
}

/// Lowercased, trimmed, non-blank integration names
fn normalize_integrations(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

fn matches_integrations(tool: &Tool, required: &[String]) -> bool {
    required.iter().any(|name| tool.mentions_integration(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: &str, integrations: Option<&str>, n8n: bool, webhooks: bool) -> Tool {
        Tool {
            tool_id: id.to_string(),
            name: id.to_string(),
            integrations_csv: integrations.map(str::to_string),
            n8n,
            webhooks,
            ..Default::default()
        }
    }

    fn ids(tools: &[&Tool]) -> Vec<String> {
        tools.iter().map(|t| t.tool_id.clone()).collect()
    }

    #[test]
    fn test_no_constraints_keeps_everything() {
        let catalog = vec![tool("a", None, false, false), tool("b", None, true, false)];
        assert_eq!(ids(&filter_catalog(&catalog, &[], false)), vec!["a", "b"]);
    }

    #[test]
    fn test_self_host_heuristic_accepts_n8n_or_webhooks() {
        let catalog = vec![
            tool("plain", None, false, false),
            tool("n8n", None, true, false),
            tool("hooks", None, false, true),
        ];
        assert_eq!(
            ids(&filter_catalog(&catalog, &[], true)),
            vec!["n8n", "hooks"]
        );
    }

    #[test]
    fn test_integration_substring_case_insensitive() {
        let catalog = vec![
            tool("a", Some("Slack, HubSpot CRM"), false, false),
            tool("b", Some("Notion"), false, false),
            tool("c", None, false, false),
        ];
        let required = vec!["hubspot".to_string(), "  ".to_string()];
        assert_eq!(ids(&filter_catalog(&catalog, &required, false)), vec!["a"]);
    }

    #[test]
    fn test_integration_filter_falls_back_when_nothing_matches() {
        let catalog = vec![
            tool("a", Some("Slack"), false, false),
            tool("b", Some("Notion"), false, false),
        ];
        let required = vec!["zapier".to_string()];
        assert_eq!(
            ids(&filter_catalog(&catalog, &required, false)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_fallback_is_to_self_host_subset() {
        let catalog = vec![
            tool("a", Some("Slack"), true, false),
            tool("b", Some("Notion"), false, false),
        ];
        let required = vec!["zapier".to_string()];
        assert_eq!(ids(&filter_catalog(&catalog, &required, true)), vec!["a"]);
    }

    #[test]
    fn test_empty_after_self_host_stays_empty() {
        let catalog = vec![tool("a", Some("Zapier"), false, false)];
        let required = vec!["zapier".to_string()];
        assert!(filter_catalog(&catalog, &required, true).is_empty());
    }
}
