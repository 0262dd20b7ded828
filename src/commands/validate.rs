//! `validate`: build everything the service builds at startup.

use promptvault_auth::{Authorizer, PolicyRuleSet};
use promptvault_core::config::AppConfig;
use promptvault_core::error::AppError;

use crate::output;

/// Execute the validate command
pub fn execute(config: &AppConfig, config_path: &str) -> Result<(), AppError> {
    let rules = match PolicyRuleSet::standard(&config.authz) {
        Ok(rules) => rules,
        Err(e) => {
            output::print_error(&format!("Policy configuration invalid: {}", e.message));
            return Err(e);
        }
    };

    let needs_resolvers: Vec<String> = rules
        .kinds_requiring_resources()
        .into_iter()
        .map(|k| k.to_string())
        .collect();

    // Resolvers are registered by the service, so only the rules are checked here.
    Authorizer::builder(config.authz.clone())
        .rules(rules.clone())
        .snapshot_only()
        .build()?;

    output::print_success(&format!("Configuration '{config_path}' is valid"));
    output::print_kv("Rules", &rules.len().to_string());
    output::print_kv("Configured grants", &config.authz.grants.len().to_string());
    output::print_kv(
        "Moderator admin content",
        &format!("{:?}", config.authz.moderator_admin_content).to_lowercase(),
    );
    output::print_kv("Sensitive tags", &config.authz.sensitive_tags.join(", "));
    output::print_kv("Resolvers required for", &needs_resolvers.join(", "));
    Ok(())
}
