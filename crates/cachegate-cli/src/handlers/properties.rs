//! Properties command handler.

use cachegate_core::PropertySet;

use crate::bootstrap::CliContext;
use crate::commands::OutputFormat;
use crate::error::CliError;

pub fn render(properties: &PropertySet, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Properties => Ok(properties.to_properties_string()),
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = properties
                .iter()
                .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
                .collect();
            Ok(serde_json::to_string_pretty(&map)? + "\n")
        }
    }
}

/// Print the properties the configuration produces, without activating
/// security or touching indexes.
pub fn execute(ctx: &CliContext, format: OutputFormat) -> Result<(), CliError> {
    print!("{}", render(&ctx.bootstrap.properties(), format)?);
    Ok(())
}
