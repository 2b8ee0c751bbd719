//! Structural analysis and text matching over graph documents

use sophia_domain::{
    GraphDocument, OrganizationAction, OrganizationDetails, SearchHit, StructureAnalysis,
    Suggestion,
};
use std::collections::BTreeMap;

/// Isolated node ids listed in a `connect_isolated` suggestion
pub const ISOLATED_PREVIEW: usize = 5;

/// Related concepts returned for one subject
pub const MAX_RELATED: usize = 5;

/// Largest category may hold at most this many times the smallest
pub const CATEGORY_IMBALANCE_RATIO: usize = 3;

/// Count nodes, links, categories, and per-id degree
///
/// Degree counts every link endpoint, so ids that appear only in links are
/// counted too. The average runs over ids with at least one endpoint.
pub fn analyze_structure(graph: &GraphDocument) -> StructureAnalysis {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *categories
            .entry(node.category_or_unknown().to_string())
            .or_insert(0) += 1;
    }

    let mut degrees: BTreeMap<String, usize> = BTreeMap::new();
    for link in &graph.links {
        *degrees.entry(link.source.clone()).or_insert(0) += 1;
        *degrees.entry(link.target.clone()).or_insert(0) += 1;
    }

    let avg_connections = if degrees.is_empty() {
        0.0
    } else {
        degrees.values().sum::<usize>() as f64 / degrees.len() as f64
    };

    let isolated_nodes = graph
        .nodes
        .iter()
        .filter(|node| !degrees.contains_key(&node.id))
        .map(|node| node.id.clone())
        .collect();

    StructureAnalysis {
        node_count: graph.nodes.len(),
        edge_count: graph.links.len(),
        categories,
        degrees,
        avg_connections,
        isolated_nodes,
    }
}

/// Reorganization proposals derived from a structure analysis
pub fn organization_suggestions(analysis: &StructureAnalysis) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if !analysis.isolated_nodes.is_empty() {
        let count = analysis.isolated_nodes.len();
        suggestions.push(Suggestion::Organization {
            action: OrganizationAction::ConnectIsolated,
            description: format!(
                "Connect {} isolated nodes to improve graph coherence",
                count
            ),
            details: OrganizationDetails::Isolated {
                isolated_count: count,
                nodes: analysis
                    .isolated_nodes
                    .iter()
                    .take(ISOLATED_PREVIEW)
                    .cloned()
                    .collect(),
            },
        });
    }

    let largest = analysis.categories.values().max();
    let smallest = analysis.categories.values().min();
    if let (Some(&largest), Some(&smallest)) = (largest, smallest) {
        if largest > smallest * CATEGORY_IMBALANCE_RATIO {
            suggestions.push(Suggestion::Organization {
                action: OrganizationAction::BalanceCategories,
                description: "Balance node distribution across categories for better structure"
                    .to_string(),
                details: OrganizationDetails::Categories {
                    categories: analysis.categories.clone(),
                },
            });
        }
    }

    suggestions
}

/// Labels of nodes related to `subject`, in document order
///
/// A node is related when either lowercase string contains the other.
/// Empty labels never match.
pub fn related_concepts(subject: &str, graph: Option<&GraphDocument>) -> Vec<String> {
    let subject = subject.to_lowercase();
    graph
        .into_iter()
        .flat_map(|graph| graph.nodes.iter())
        .filter(|node| {
            let label = node.label.to_lowercase();
            !label.is_empty() && (label.contains(&subject) || subject.contains(&label))
        })
        .take(MAX_RELATED)
        .map(|node| node.label.clone())
        .collect()
}

/// Nodes whose label or description contains `query`, case-insensitively
pub fn search_nodes(query: &str, graph: Option<&GraphDocument>) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    graph
        .into_iter()
        .flat_map(|graph| graph.nodes.iter())
        .filter(|node| {
            node.label.to_lowercase().contains(&query)
                || node.description_or_empty().to_lowercase().contains(&query)
        })
        .map(|node| SearchHit {
            id: node.id.clone(),
            label: node.label.clone(),
            description: node.description_or_empty().to_string(),
            category: node.category.clone().unwrap_or_default(),
        })
        .collect()
}
