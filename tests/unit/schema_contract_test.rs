// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishscan::domain::models::feature::{FeatureName, FeatureVector, FEATURE_COUNT};
use phishscan::utils::errors::SchemaMismatch;

/// Column order the downstream classifier was trained with
const TRAINED_COLUMNS: [&str; FEATURE_COUNT] = [
    "having_IP_Address",
    "URL_Length",
    "Shortining_Service",
    "having_At_Symbol",
    "double_slash_redirecting",
    "Prefix_Suffix",
    "having_Sub_Domain",
    "SSLfinal_State",
    "Domain_registeration_length",
    "Favicon",
    "port",
    "HTTPS_token",
    "Request_URL",
    "URL_of_Anchor",
    "Links_in_tags",
    "SFH",
    "Submitting_to_email",
    "Abnormal_URL",
    "Redirect",
    "on_mouseover",
    "RightClick",
    "popUpWidnow",
    "Iframe",
    "age_of_domain",
    "DNSRecord",
    "web_traffic",
    "Page_Rank",
    "Google_Index",
    "Links_pointing_to_page",
    "Statistical_report",
];

#[test]
fn trained_columns_match_exactly() {
    assert_eq!(FeatureVector::columns(), TRAINED_COLUMNS.to_vec());
    assert!(FeatureVector::ensure_columns(&TRAINED_COLUMNS).is_ok());
}

#[test]
fn swapped_columns_are_rejected() {
    let mut columns = TRAINED_COLUMNS;
    columns.swap(0, 1);

    let err = FeatureVector::ensure_columns(&columns).unwrap_err();
    assert_eq!(
        err,
        SchemaMismatch::ColumnMismatch {
            position: 0,
            expected: "URL_Length".to_string(),
            actual: "having_IP_Address".to_string(),
        }
    );
}

#[test]
fn missing_column_is_rejected() {
    let err = FeatureVector::ensure_columns(&TRAINED_COLUMNS[..FEATURE_COUNT - 1]).unwrap_err();
    assert!(matches!(err, SchemaMismatch::LengthMismatch { .. }));
}

#[test]
fn every_column_maps_back_to_a_feature() {
    for (index, column) in TRAINED_COLUMNS.iter().enumerate() {
        let name = FeatureName::from_column(column).unwrap();
        assert_eq!(name as usize, index);
    }
}
