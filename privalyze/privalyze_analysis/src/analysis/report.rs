// Copyright (c) 2022 Ubique Innovation AG <https://www.ubique.ch>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Report assembly. Every chain hop serializes the same record shape, source
//! text is only attached on request and is `N/A` for external methods.

use std::sync::Arc;

use anyhow::Context;

use privalyze_models::models::AppAnalysis;

use super::{privacy::personal_information_used, CallerMethod, PrcsChain, SensitiveApi};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiRecord {
    pub id: String,
    pub class_name: String,
    pub method_name: String,
    pub permissions_required: Vec<String>,
    pub personal_information_collected: Vec<String>,
    pub api_description: String,
}

impl From<&Arc<SensitiveApi>> for ApiRecord {
    fn from(api: &Arc<SensitiveApi>) -> Self {
        Self {
            id: api.id(),
            class_name: api.method.method.dotted_class_name(),
            method_name: api.method.method.method_name.clone(),
            permissions_required: api.metadata.permissions_required.clone(),
            personal_information_collected: api
                .metadata
                .personal_information_collected
                .clone(),
            api_description: api.metadata.api_description.clone(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MethodRecord {
    pub id: String,
    pub class_name: String,
    pub method_name: String,
    pub permissions_required: Vec<String>,
    pub personal_information_collected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
}

impl MethodRecord {
    fn from_hop(hop: &CallerMethod, include_source: bool) -> Self {
        Self {
            id: hop.method.method.full_id(),
            class_name: hop.method.method.dotted_class_name(),
            method_name: hop.method.method.method_name.clone(),
            permissions_required: hop.permissions_required(),
            personal_information_collected: hop.personal_information_collected(),
            source_code: if include_source {
                Some(hop.method.source_text().to_string())
            } else {
                None
            },
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChainRecord {
    pub api: ApiRecord,
    pub hops: Vec<MethodRecord>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// The full audit report of one application.
pub struct Report {
    pub app_id: String,
    pub title: String,
    pub permissions_in_xml: Vec<String>,
    pub personal_information_processed: Vec<String>,
    pub sensitive_apis: Vec<ApiRecord>,
    pub prcs: Vec<ChainRecord>,
}

impl Report {
    pub fn assemble(
        app: &AppAnalysis,
        apis: &[Arc<SensitiveApi>],
        chains: &[PrcsChain],
        include_source: bool,
    ) -> Self {
        Self {
            app_id: app.package_name.clone(),
            title: app.app_name.clone(),
            permissions_in_xml: app.permissions.clone(),
            personal_information_processed: personal_information_used(apis),
            sensitive_apis: apis.iter().map(ApiRecord::from).collect(),
            prcs: chains
                .iter()
                .map(|chain| ChainRecord {
                    api: ApiRecord::from(&chain.api),
                    hops: chain
                        .hops
                        .iter()
                        .map(|hop| MethodRecord::from_hop(hop, include_source))
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("could not serialize report")
    }
}
