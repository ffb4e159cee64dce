use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rayon::prelude::*;

use privalyze_models::models::{ApiTable, AppAnalysis};

use super::{dedup_preserving_order, CallerMethod, PrcsChain, SensitiveApi};

/// Join the method table of the analysis export against the sensitive-API
/// table. A method matches if its normalized id is a key of the table;
/// everything else is ignored.
pub fn find_sensitive_apis(app: &AppAnalysis, table: &ApiTable) -> Vec<Arc<SensitiveApi>> {
    let methods = app.methods_enumerated();
    let matches: Vec<Arc<SensitiveApi>> = methods
        .par_iter()
        .filter_map(|(idx, method)| {
            table.get(&method.method.metadata_key()).map(|metadata| {
                Arc::new(SensitiveApi {
                    index: *idx,
                    method: method.clone(),
                    metadata: metadata.clone(),
                })
            })
        })
        .collect();
    log::debug!(
        "{} of {} methods matched the sensitive api table",
        matches.len(),
        methods.len()
    );
    matches
}

/// The methods invoking any of the given APIs directly. A caller invoking
/// several sensitive APIs yields a single record whose `reaches` set holds
/// all of them; deduplication is by full identity (class, name, descriptor).
pub fn direct_callers(app: &AppAnalysis, apis: &[Arc<SensitiveApi>]) -> Vec<CallerMethod> {
    let mut order = vec![];
    let mut merged: HashMap<String, CallerMethod> = HashMap::new();
    for api in apis {
        for (idx, method) in app.callers_of(api.index) {
            let key = method.method.full_id();
            match merged.get_mut(&key) {
                Some(existing) => {
                    if !existing.reaches.iter().any(|r| r.index == api.index) {
                        existing.reaches.push(api.clone());
                    }
                }
                None => {
                    order.push(key.clone());
                    merged.insert(
                        key,
                        CallerMethod {
                            index: idx,
                            method,
                            reaches: vec![api.clone()],
                        },
                    );
                }
            }
        }
    }
    order.into_iter().filter_map(|k| merged.remove(&k)).collect()
}

/// Enumerate all permission-requiring code segments: for every sensitive API,
/// walk the reverse call edges up to `hop_limit` hops. A chain is emitted
/// when it reaches the hop limit or when its last hop has no further callers.
/// Within one expansion level each identity appears at most once, and a
/// method already on the path is not expanded again.
pub fn collect_prcs(
    app: &AppAnalysis,
    apis: &[Arc<SensitiveApi>],
    hop_limit: usize,
) -> Vec<PrcsChain> {
    if hop_limit == 0 {
        return vec![];
    }
    let direct = direct_callers(app, apis);
    let mut chains = vec![];
    for api in apis {
        let roots = direct
            .iter()
            .filter(|c| c.reaches.iter().any(|r| r.index == api.index));
        for root in roots {
            expand_chains(app, api, root.clone(), hop_limit, &mut chains);
        }
    }
    log::debug!("collected {} code segments", chains.len());
    chains
}

// Explicit worklist: the hop limit is user supplied and must never become
// recursion depth.
fn expand_chains(
    app: &AppAnalysis,
    api: &Arc<SensitiveApi>,
    root: CallerMethod,
    hop_limit: usize,
    out: &mut Vec<PrcsChain>,
) {
    let mut work = vec![vec![root]];
    while let Some(chain) = work.pop() {
        let last = match chain.last() {
            Some(l) => l.clone(),
            None => continue,
        };
        if chain.len() >= hop_limit {
            out.push(PrcsChain {
                api: api.clone(),
                hops: chain,
            });
            continue;
        }
        let mut on_path: HashSet<String> =
            chain.iter().map(|h| h.method.method.full_id()).collect();
        on_path.insert(api.method.method.full_id());

        let mut next = vec![];
        for (idx, method) in app.callers_of(last.index) {
            if on_path.insert(method.method.full_id()) {
                next.push(CallerMethod {
                    index: idx,
                    method,
                    reaches: last.reaches.clone(),
                });
            }
        }
        if next.is_empty() {
            out.push(PrcsChain {
                api: api.clone(),
                hops: chain,
            });
            continue;
        }
        for hop in next {
            let mut longer = chain.clone();
            longer.push(hop);
            work.push(longer);
        }
    }
}

/// Union of the personal-information categories collected by the matched
/// APIs, first-seen order, duplicate-free.
pub fn personal_information_used(apis: &[Arc<SensitiveApi>]) -> Vec<String> {
    dedup_preserving_order(
        apis.iter()
            .flat_map(|api| api.metadata.personal_information_collected.iter()),
    )
}
