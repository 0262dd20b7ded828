//! `check`: evaluate one request and print the rule trace.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use promptvault_auth::{Authorizer, Decision, RuleEvaluation};
use promptvault_core::config::AppConfig;
use promptvault_core::error::AppError;
use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::resource::Resource;
use promptvault_entity::user::{Principal, Role};

use crate::output::{self, OutputFormat};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Principal role (viewer, contributor, moderator, admin)
    #[arg(long)]
    pub role: String,

    /// Principal id
    #[arg(long, default_value = "cli-user")]
    pub principal: String,

    /// Action, e.g. `update` or `edit`
    #[arg(long)]
    pub action: String,

    /// Resource kind, e.g. `Prompt`
    #[arg(long)]
    pub kind: String,

    /// Resource snapshot as JSON, e.g. '{"kind":"Prompt","id":"p1","owner_id":"u1",...}'
    #[arg(long)]
    pub resource: Option<String>,

    /// Prompt tag names; when given, `is_sensitive` is derived from `authz.sensitive_tags`
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Target id; defaults to the snapshot's id. An id with no snapshot is "not found".
    #[arg(long)]
    pub resource_id: Option<String>,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    decision: &'a Decision,
    trace: &'a [RuleEvaluation],
}

#[derive(Tabled)]
struct TraceRow {
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Role matched")]
    role_matched: bool,
    #[tabled(rename = "Condition")]
    condition: String,
}

impl From<&RuleEvaluation> for TraceRow {
    fn from(eval: &RuleEvaluation) -> Self {
        Self {
            rule: eval.rule.to_string(),
            role_matched: eval.role_matched,
            condition: match eval.condition_held {
                Some(true) => "held".to_string(),
                Some(false) => "failed".to_string(),
                None => "-".to_string(),
            },
        }
    }
}

/// Execute the check command
pub async fn execute(
    args: &CheckArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let role: Role = args.role.parse()?;
    let action: Action = args.action.parse()?;
    let kind: ResourceKind = args.kind.parse()?;
    let principal = Principal::new(args.principal.as_str(), role);

    let authorizer = Authorizer::builder(config.authz.clone())
        .snapshot_only()
        .build()?;

    let mut resource: Option<Resource> = args
        .resource
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;
    if !args.tags.is_empty() {
        let is_sensitive = authorizer.classifier().classify(&args.tags);
        resource = resource.map(|r| r.with_sensitive(is_sensitive));
    }

    // A --resource-id that names a different snapshot than the one given
    // behaves like a lookup miss.
    let target = match (&args.resource_id, resource) {
        (Some(id), Some(r)) if r.id().as_str() != id.as_str() => None,
        (_, r) => r,
    };

    let decision = authorizer.authorize_snapshot(&principal, action, kind, target.as_ref());
    let explanation = authorizer.explain(&principal, action, kind, target.as_ref());

    match format {
        OutputFormat::Json => output::print_json(&CheckOutput {
            decision: &decision,
            trace: &explanation.evaluations,
        }),
        OutputFormat::Table => {
            output::print_kv("Allowed", &decision.allowed.to_string());
            if let Some(reason) = decision.reason {
                output::print_kv("Reason", reason.as_str());
            }
            if let Some(rule) = &decision.matched_rule {
                output::print_kv("Matched rule", &rule.to_string());
            }
            println!();
            let rows: Vec<TraceRow> = explanation.evaluations.iter().map(TraceRow::from).collect();
            output::print_rows(&rows, &explanation.evaluations, format);
        }
    }

    Ok(())
}
