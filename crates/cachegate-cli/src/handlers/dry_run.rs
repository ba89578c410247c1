//! Bootstrap command handler: a full pass against the in-memory engine.

use std::fmt::Write as _;

use cachegate_core::{BootstrapReport, IndexHandle};
use serde::Serialize;
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    integration_present: bool,
    realms_configured: bool,
    security_enforced: bool,
    realms: Vec<&'a str>,
    properties: Vec<(&'a str, &'a str)>,
    indexes: &'a [IndexHandle],
}

fn summary<'a>(report: &'a BootstrapReport, security_enforced: bool) -> Summary<'a> {
    Summary {
        integration_present: report.gates.integration_present,
        realms_configured: report.gates.realms_configured,
        security_enforced,
        realms: report
            .security_manager
            .as_ref()
            .map(|manager| manager.realms().names())
            .unwrap_or_default(),
        properties: report.properties.iter().collect(),
        indexes: &report.indexes,
    }
}

pub fn render(report: &BootstrapReport, security_enforced: bool, json: bool) -> Result<String, CliError> {
    let summary = summary(report, security_enforced);
    if json {
        return Ok(serde_json::to_string_pretty(&summary)? + "\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "security: {}",
        if summary.security_enforced {
            format!("enforced ({})", summary.realms.join(", "))
        } else {
            "inactive".to_string()
        }
    );
    let _ = writeln!(out, "properties: {}", summary.properties.len());
    for (key, value) in &summary.properties {
        let _ = writeln!(out, "  {key} = {value}");
    }
    let _ = writeln!(out, "indexes: {}", summary.indexes.len());
    for index in summary.indexes {
        let _ = writeln!(
            out,
            "  {} on {} [{}]",
            index.name,
            index.region_path,
            index.fields.field_names().join(", ")
        );
    }
    Ok(out)
}

/// Run the bootstrap, print the report, then shut down.
///
/// Shutdown runs even when the bootstrap or printing fails; the first error
/// wins.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let report = match ctx.bootstrap.run().await {
        Ok(report) => report,
        Err(err) => {
            if let Err(teardown) = ctx.bootstrap.shutdown().await {
                warn!(error = %teardown, "Shutdown after failed bootstrap incomplete");
            }
            return Err(err.into());
        }
    };
    let rendered = render(&report, ctx.security_flag.is_enabled(), json);
    if let Ok(out) = &rendered {
        print!("{out}");
    }
    ctx.bootstrap.shutdown().await?;
    info!(
        remaining = ctx.cache.search().map_or(0, |search| search.indexes().len()),
        "Dry run finished"
    );
    rendered.map(|_| ())
}
