use std::sync::Arc;

use privalyze_models::models::{ApiMetadata, MethodEntry};

pub mod callgraph;
pub mod permissions;
pub mod privacy;
pub mod report;

#[cfg(test)]
pub(crate) mod testdata;

/// Callers are followed over at most this many reverse-call hops when
/// enumerating code segments.
pub const DEFAULT_HOP_LIMIT: usize = 3;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A method of the application whose identity matched the sensitive-API
/// table, together with the matched metadata.
pub struct SensitiveApi {
    /// Index into the method table of the analysis export
    pub index: u32,
    pub method: Arc<MethodEntry>,
    pub metadata: ApiMetadata,
}

impl SensitiveApi {
    /// The normalized id the metadata table matched on.
    pub fn id(&self) -> String {
        self.method.method.metadata_key()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One hop of a code segment: a method on some reverse-call path towards a
/// sensitive API, and the APIs it reaches over that path.
pub struct CallerMethod {
    /// Index into the method table of the analysis export
    pub index: u32,
    pub method: Arc<MethodEntry>,
    /// Sensitive APIs reachable from this method along the walked path
    pub reaches: Vec<Arc<SensitiveApi>>,
}

impl CallerMethod {
    /// Union of the permissions required by all reached APIs, first-seen
    /// order, duplicate-free.
    pub fn permissions_required(&self) -> Vec<String> {
        dedup_preserving_order(
            self.reaches
                .iter()
                .flat_map(|api| api.metadata.permissions_required.iter()),
        )
    }

    /// Union of the personal-information categories of all reached APIs.
    pub fn personal_information_collected(&self) -> Vec<String> {
        dedup_preserving_order(
            self.reaches
                .iter()
                .flat_map(|api| api.metadata.personal_information_collected.iter()),
        )
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A permission-requiring code segment: a maximal chain of callers ending at
/// a sensitive API. `hops[0]` invokes the API directly, every further hop
/// invokes its predecessor.
pub struct PrcsChain {
    pub api: Arc<SensitiveApi>,
    pub hops: Vec<CallerMethod>,
}

pub(crate) fn dedup_preserving_order<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = vec![];
    for value in values {
        if seen.insert(value.as_str()) {
            out.push(value.clone());
        }
    }
    out
}
