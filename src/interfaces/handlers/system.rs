use actix_web::{web, get, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};
use sysinfo::System;

use crate::{constants::START_TIME, use_cases::extractors::AdminClaims, AppState};

const CACHE_SECS: i64 = 5;
const UNKNOWN: &str = "Unknown";

#[derive(Serialize, Clone, Default)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
    process_memory: String,
}

impl HostInfo {
    fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let process_memory = sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| sys.process(pid))
            .map(|p| format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0))
            .unwrap_or_else(|| UNKNOWN.to_string());

        HostInfo {
            os: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            kernel: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            cpu_count: sys.cpus().len(),
            memory_total: format!("{:.2} GB", sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0),
            process_memory,
        }
    }
}

#[derive(Serialize, Clone, Default)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    uptime: String,
    started_at: String,
    checked_at: String,
    database: &'static str,
    storage_backend: &'static str,
    host: HostInfo,
}

impl HealthReport {
    fn database_up(&self) -> bool {
        self.database == "OK"
    }
}

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_REPORT: Lazy<RwLock<HealthReport>> = Lazy::new(|| RwLock::new(HealthReport::default()));

async fn build_report(state: &AppState) -> HealthReport {
    let now = Utc::now();
    let uptime_secs = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;
    let database_up = state.dashboard_handler.database_reachable().await;

    HealthReport {
        status: if database_up { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        started_at: START_TIME.to_rfc3339(),
        checked_at: now.to_rfc3339(),
        database: if database_up { "OK" } else { "Unavailable" },
        storage_backend: state.upload_handler.storage.backend_name(),
        host: HostInfo::collect(),
    }
}

fn respond(report: HealthReport) -> HttpResponse {
    if report.database_up() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}

/// Reports are rebuilt at most every few seconds; in between the cached one is served.
#[get("/health")]
pub async fn admin_health_check(_claims: AdminClaims, state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();

    if now - LAST_CHECK.load(Ordering::Relaxed) <= CACHE_SECS {
        return respond(CACHED_REPORT.read().clone());
    }

    let report = build_report(&state).await;
    *CACHED_REPORT.write() = report.clone();
    LAST_CHECK.store(now, Ordering::Relaxed);
    respond(report)
}
