// Copyright (c) 2022 Ubique Innovation AG <https://www.ubique.ch>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Manifest-driven view: resolve the declared permissions to the framework
//! classes guarded by them and report which application classes call into
//! those classes.

use std::collections::HashSet;

use privalyze_models::models::{AppAnalysis, PermissionClassMap};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
/// One use of a permission-guarded framework class: which application method
/// calls which method of the guarded class.
pub struct GuardedClassUsage {
    /// Dotted name of the permission-guarded framework class
    pub api_class: String,
    /// Method of the guarded class being invoked
    pub api_method: String,
    /// Dotted name of the calling application class (inner classes collapsed)
    pub calling_class: String,
    pub calling_method: String,
}

/// For every method of a permission-guarded class present in the index,
/// collect the application methods calling it. Pairs are deduplicated.
pub fn guarded_class_usage(
    app: &AppAnalysis,
    map: &PermissionClassMap,
) -> Vec<GuardedClassUsage> {
    let guarded: HashSet<String> = map.api_classes_for(&app.permissions).into_iter().collect();
    if guarded.is_empty() {
        log::debug!("no manifest permission maps to a known framework class");
        return vec![];
    }

    let mut seen = HashSet::new();
    let mut usages = vec![];
    for (idx, entry) in app.methods_enumerated() {
        if !guarded.contains(&entry.method.class_name) {
            continue;
        }
        for (_, caller) in app.callers_of(idx) {
            let usage = GuardedClassUsage {
                api_class: entry.method.dotted_class_name(),
                api_method: entry.method.method_name.clone(),
                calling_class: caller.method.simple_class_name(),
                calling_method: caller.method.method_name.clone(),
            };
            if seen.insert(usage.clone()) {
                usages.push(usage);
            }
        }
    }
    usages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testdata::{sample_app, sample_permission_map};

    #[test]
    fn guarded_usage_pairs_are_deduplicated() {
        let app = sample_app();
        let usages = guarded_class_usage(&app, &sample_permission_map());

        // LocationManager is called by LocationHelper and Beacon,
        // TelephonyManager by Beacon only
        assert_eq!(usages.len(), 3);
        assert!(usages.contains(&GuardedClassUsage {
            api_class: "android.location.LocationManager".to_string(),
            api_method: "getLastKnownLocation".to_string(),
            calling_class: "com.example.app.LocationHelper".to_string(),
            calling_method: "lastFix".to_string(),
        }));
        assert!(usages.contains(&GuardedClassUsage {
            api_class: "android.telephony.TelephonyManager".to_string(),
            api_method: "getDeviceId".to_string(),
            calling_class: "com.example.app.Beacon".to_string(),
            calling_method: "collect".to_string(),
        }));
    }

    #[test]
    fn unmapped_permissions_yield_nothing() {
        let app = sample_app();
        let usages = guarded_class_usage(&app, &Default::default());
        assert!(usages.is_empty());
    }
}
