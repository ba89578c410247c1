//! Gates command handler.

use cachegate_core::GateDecision;

use crate::bootstrap::CliContext;

fn state(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

pub fn render(capability: &str, realm_names: &[&str], gates: GateDecision) -> String {
    let realms = if realm_names.is_empty() {
        "none".to_string()
    } else {
        realm_names.join(", ")
    };
    format!(
        "integration ({capability}): {}\n  realm lifecycle hooks: {}\nrealms: {realms}\n  security manager: {}\n",
        if gates.integration_present { "present" } else { "absent" },
        state(gates.integration_present),
        state(gates.realms_configured),
    )
}

pub fn execute(ctx: &CliContext) {
    let bootstrap = &ctx.bootstrap;
    print!(
        "{}",
        render(
            cachegate_core::SECURITY_INTEGRATION,
            &bootstrap.realms().names(),
            bootstrap.gates()
        )
    );
}
