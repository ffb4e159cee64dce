//! Shared fixture for the analysis tests: a small analysis export with two
//! sensitive APIs and a handful of application methods calling them.

use privalyze_models::models::{ApiTable, AppAnalysis, PermissionClassMap};

const EXPORT: &str = r#"{
    "package_name": "com.example.app",
    "app_name": "Example App",
    "permissions": [
        "android.permission.ACCESS_FINE_LOCATION",
        "android.permission.READ_PHONE_STATE",
        "android.permission.INTERNET"
    ],
    "methods": [
        {"class_name": "Landroid/location/LocationManager;",
         "method_name": "getLastKnownLocation",
         "descriptor": "(Ljava/lang/String;)Landroid/location/Location;",
         "external": true,
         "callers": [2, 3]},
        {"class_name": "Landroid/telephony/TelephonyManager;",
         "method_name": "getDeviceId",
         "descriptor": "()Ljava/lang/String;",
         "external": true,
         "callers": [3]},
        {"class_name": "Lcom/example/app/LocationHelper;",
         "method_name": "lastFix",
         "descriptor": "()Landroid/location/Location;",
         "source": "Location lastFix() { return manager.getLastKnownLocation(\"gps\"); }",
         "callers": [4],
         "callees": [0]},
        {"class_name": "Lcom/example/app/Beacon;",
         "method_name": "collect",
         "descriptor": "()V",
         "source": "void collect() { ... }",
         "callers": [4, 5],
         "callees": [0, 1]},
        {"class_name": "Lcom/example/app/MainActivity;",
         "method_name": "onResume",
         "descriptor": "()V",
         "source": "void onResume() { ... }",
         "callers": [5],
         "callees": [2, 3]},
        {"class_name": "Lcom/example/app/MainActivity$1;",
         "method_name": "run",
         "descriptor": "()V",
         "source": "void run() { ... }",
         "callers": [],
         "callees": [3, 4]},
        {"class_name": "Lcom/example/app/Unrelated;",
         "method_name": "helper",
         "descriptor": "()V",
         "source": "void helper() { }",
         "callers": [],
         "callees": []}
    ]
}"#;

const TABLE: &str = r#"{
    "android.location.LocationManager;getLastKnownLocation": {
        "permissions_required": ["android.permission.ACCESS_FINE_LOCATION"],
        "personal_information_collected": ["location"],
        "api_description": "Returns the last known location fix"
    },
    "android.telephony.TelephonyManager;getDeviceId": {
        "permissions_required": ["android.permission.READ_PHONE_STATE"],
        "personal_information_collected": ["device identifier"],
        "api_description": "Returns the unique device id (IMEI/MEID)"
    }
}"#;

const PERMISSION_MAP: &str = r#"{
    "ACCESS_FINE_LOCATION": "android.location.LocationManager",
    "READ_PHONE_STATE": "android.telephony.TelephonyManager"
}"#;

pub fn sample_app() -> AppAnalysis {
    AppAnalysis::from_str(EXPORT).unwrap()
}

pub fn sample_table() -> ApiTable {
    serde_json::from_str(TABLE).unwrap()
}

pub fn sample_permission_map() -> PermissionClassMap {
    serde_json::from_str(PERMISSION_MAP).unwrap()
}
