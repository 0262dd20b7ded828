//! `rules`: dump the effective rule table.

use clap::Args;
use tabled::Tabled;

use promptvault_auth::{PolicyRule, PolicyRuleSet};
use promptvault_core::config::AppConfig;
use promptvault_core::error::AppError;
use promptvault_entity::permission::ResourceKind;

use crate::output::{self, OutputFormat};

/// Arguments for the rules command
#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Only show rules for this resource kind
    #[arg(short, long)]
    pub kind: Option<String>,
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Resource")]
    resource_kind: String,
    #[tabled(rename = "Condition")]
    condition: String,
}

impl From<&PolicyRule> for RuleRow {
    fn from(rule: &PolicyRule) -> Self {
        Self {
            role: rule.role.to_string(),
            action: rule.action.to_string(),
            resource_kind: rule.resource_kind.to_string(),
            condition: rule
                .condition
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute the rules command
pub fn execute(args: &RulesArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let rules = PolicyRuleSet::standard(&config.authz)?;
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<ResourceKind>)
        .transpose()?;

    let selected: Vec<&PolicyRule> = rules
        .iter()
        .filter(|r| kind.is_none_or(|k| r.resource_kind == k))
        .collect();
    let rows: Vec<RuleRow> = selected.iter().map(|r| RuleRow::from(*r)).collect();

    output::print_rows(&rows, &selected, format);
    Ok(())
}
