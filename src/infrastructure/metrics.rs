// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

pub const PROBE_OUTCOMES_TOTAL: &str = "probe_outcomes_total";
pub const FEATURE_EXTRACTIONS_TOTAL: &str = "feature_extractions_total";
pub const FEATURE_EXTRACTION_DURATION_SECONDS: &str = "feature_extraction_duration_seconds";

/// 初始化指标系统
///
/// 启动Prometheus导出器并注册提取相关指标；未启用时不做任何事
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        PROBE_OUTCOMES_TOTAL,
        "Probe results by probe name and outcome (success, timeout, failed, skipped)"
    );
    describe_counter!(
        FEATURE_EXTRACTIONS_TOTAL,
        "Total number of feature extraction calls by result"
    );
    describe_histogram!(
        FEATURE_EXTRACTION_DURATION_SECONDS,
        "Duration of feature extraction calls in seconds"
    );
}

pub fn record_probe_outcome(probe: &'static str, outcome: &'static str) {
    counter!(PROBE_OUTCOMES_TOTAL, "probe" => probe, "outcome" => outcome).increment(1);
}

pub fn record_extraction(result: &'static str, elapsed: Duration) {
    counter!(FEATURE_EXTRACTIONS_TOTAL, "result" => result).increment(1);
    histogram!(FEATURE_EXTRACTION_DURATION_SECONDS).record(elapsed.as_secs_f64());
}
