// Copyright (c) 2022 Ubique Innovation AG <https://www.ubique.ch>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use petgraph::{
    dot::Dot,
    graph::{DiGraph, NodeIndex},
};

use super::{PrcsChain, SensitiveApi};

/// A node in the per-API call graph. Edges point in call direction, from
/// caller towards the sensitive API.
#[derive(Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub enum PrivacyNode {
    /// The sensitive API the graph is rooted at
    ApiNode(String),
    /// An application method on some path towards the API
    MethodNode(String),
}

/// Debug implementation for displaying in the graph
impl Debug for PrivacyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut df = f.debug_struct("PrivacyNode");
        match self {
            PrivacyNode::ApiNode(id) => df.field("api", id).finish(),
            PrivacyNode::MethodNode(id) => df.field("method", id).finish(),
        }
    }
}

#[derive(Debug, Clone)]
/// Call graph of all code segments ending at one sensitive API, with a label
/// to `NodeIndex` mapping for lookups.
pub struct ApiCallGraph {
    /// Normalized id of the API at the root
    pub api_id: String,
    pub node_mapping: HashMap<String, NodeIndex>,
    pub graph: DiGraph<PrivacyNode, i32>,
}

impl ApiCallGraph {
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::new(&self.graph))
    }
}

/// Fold the chains belonging to `api` into one graph. Hops sharing an
/// identity across chains become a single node.
pub fn chain_graph(api: &Arc<SensitiveApi>, chains: &[PrcsChain]) -> ApiCallGraph {
    let mut graph: DiGraph<PrivacyNode, i32> = DiGraph::new();
    let mut node_mapping = HashMap::new();

    let api_label = api.method.method.full_id();
    let api_node = graph.add_node(PrivacyNode::ApiNode(api.method.method.to_string()));
    node_mapping.insert(api_label, api_node);

    for chain in chains.iter().filter(|c| c.api.index == api.index) {
        let mut callee = api_node;
        for hop in &chain.hops {
            let label = hop.method.method.full_id();
            let node = match node_mapping.get(&label) {
                Some(&n) => n,
                None => {
                    let n = graph.add_node(PrivacyNode::MethodNode(hop.method.method.to_string()));
                    node_mapping.insert(label, n);
                    n
                }
            };
            if !graph.contains_edge(node, callee) {
                graph.add_edge(node, callee, 1);
            }
            callee = node;
        }
    }

    ApiCallGraph {
        api_id: api.id(),
        node_mapping,
        graph,
    }
}

/// One graph per sensitive API.
pub fn chain_graphs(apis: &[Arc<SensitiveApi>], chains: &[PrcsChain]) -> Vec<ApiCallGraph> {
    apis.iter().map(|api| chain_graph(api, chains)).collect()
}
