use std::net::SocketAddr;

use serde::Serialize;
use shelf_core::config::{AppConfig, LoadOptions};
use shelf_core::Catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_bind_address(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "server_bind_address",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    checks.push(check_catalog());

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_bind_address(config: &AppConfig) -> DoctorCheck {
    let address = format!("{}:{}", config.server.bind_address, config.server.port);

    match address.parse::<SocketAddr>() {
        Ok(_) => DoctorCheck {
            name: "server_bind_address",
            status: CheckStatus::Pass,
            details: format!("`{address}` parses as a socket address"),
        },
        Err(error) => DoctorCheck {
            name: "server_bind_address",
            status: CheckStatus::Fail,
            details: format!("`{address}` is not a usable socket address: {error}"),
        },
    }
}

fn check_catalog() -> DoctorCheck {
    match Catalog::builtin() {
        Ok(catalog) => {
            let indexed = catalog.products().iter().all(|product| {
                catalog.get(&product.id).is_some_and(|found| found.id == product.id)
            });

            if indexed {
                DoctorCheck {
                    name: "catalog_integrity",
                    status: CheckStatus::Pass,
                    details: format!(
                        "catalog holds {} products and the id index covers all of them",
                        catalog.len()
                    ),
                }
            } else {
                DoctorCheck {
                    name: "catalog_integrity",
                    status: CheckStatus::Fail,
                    details: "id index does not cover every catalog product".to_string(),
                }
            }
        }
        Err(error) => DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
