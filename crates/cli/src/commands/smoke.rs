use std::time::Instant;

use serde::Serialize;
use shelf_core::config::{AppConfig, LoadOptions};
use shelf_core::{Catalog, FilterParams, ProductFilter, ProductId, DEFAULT_LIMIT};

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

pub fn run() -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    match timed_check(|| AppConfig::load(LoadOptions::default())) {
        Ok((elapsed_ms, _config)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Pass,
                elapsed_ms,
                message: "configuration loaded and validated".to_string(),
            });
        }
        Err((elapsed_ms, error)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("catalog_load"));
            checks.push(skipped("query_engine"));
            checks.push(skipped("id_lookup"));
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    }

    let catalog = match timed_check(Catalog::builtin) {
        Ok((elapsed_ms, catalog)) => {
            checks.push(SmokeCheck {
                name: "catalog_load",
                status: SmokeStatus::Pass,
                elapsed_ms,
                message: format!("catalog loaded with {} products", catalog.len()),
            });
            catalog
        }
        Err((elapsed_ms, error)) => {
            checks.push(SmokeCheck {
                name: "catalog_load",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("query_engine"));
            checks.push(skipped("id_lookup"));
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    };

    let query_started = Instant::now();
    let probe = ProductFilter::from_params(&FilterParams {
        q: Some("coding".to_string()),
        category: Some("laptop".to_string()),
        price_max: Some("60000".to_string()),
        ..FilterParams::default()
    });
    let matches = probe.apply(&catalog);
    let probe_ok = !matches.is_empty()
        && matches.len() <= DEFAULT_LIMIT
        && matches.iter().all(|product| product.category.eq_ignore_ascii_case("laptop"));
    checks.push(SmokeCheck {
        name: "query_engine",
        status: if probe_ok { SmokeStatus::Pass } else { SmokeStatus::Fail },
        elapsed_ms: query_started.elapsed().as_millis() as u64,
        message: if probe_ok {
            format!("probe filter matched {} products within the result cap", matches.len())
        } else {
            "probe filter returned an unexpected result set".to_string()
        },
    });

    let lookup_started = Instant::now();
    let known = catalog.products().first().map(|product| product.id.clone());
    let hit = known.as_ref().is_some_and(|id| catalog.get(id).is_some());
    let miss = catalog.get(&ProductId("does-not-exist".to_string())).is_none();
    checks.push(SmokeCheck {
        name: "id_lookup",
        status: if hit && miss { SmokeStatus::Pass } else { SmokeStatus::Fail },
        elapsed_ms: lookup_started.elapsed().as_millis() as u64,
        message: if hit && miss {
            "id index resolves known ids and rejects unknown ids".to_string()
        } else {
            "id index did not behave as expected".to_string()
        },
    });

    finalize_report(checks, started.elapsed().as_millis() as u64)
}

fn timed_check<T, E>(check: impl FnOnce() -> Result<T, E>) -> Result<(u64, T), (u64, E)> {
    let started = Instant::now();
    match check() {
        Ok(value) => Ok((started.elapsed().as_millis() as u64, value)),
        Err(error) => Err((started.elapsed().as_millis() as u64, error)),
    }
}

fn skipped(name: &'static str) -> SmokeCheck {
    SmokeCheck {
        name,
        status: SmokeStatus::Skipped,
        elapsed_ms: 0,
        message: "skipped due to previous failure".to_string(),
    }
}

fn finalize_report(checks: Vec<SmokeCheck>, total_elapsed_ms: u64) -> CommandResult {
    let passed = checks.iter().filter(|check| check.status == SmokeStatus::Pass).count();
    let total = checks.len();
    let failed = checks.iter().any(|check| check.status == SmokeStatus::Fail);

    let report = SmokeReport {
        command: "smoke",
        status: if failed { SmokeStatus::Fail } else { SmokeStatus::Pass },
        summary: format!("smoke: {passed}/{total} checks passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        checks,
    };

    let human = report.summary.clone();
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"smoke\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: if failed { 6 } else { 0 }, output: format!("{human}\n{machine}") }
}
