//! Attribute conditions attached to policy rules.
//!
//! A condition is a closed, tagged predicate over (principal, resource).
//! Evaluation is pure and total: a predicate asked about a resource kind
//! it does not describe returns `false`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use promptvault_core::error::AppError;
use promptvault_entity::permission::ResourceKind;
use promptvault_entity::resource::{ReviewStatus, Resource};
use promptvault_entity::user::{Principal, Role};

/// A guard on a policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The principal created the resource.
    Owner,
    /// The principal did not create the resource.
    NotOwner,
    /// The prompt is published.
    Published,
    /// The prompt carries no sensitive tag.
    NotSensitive,
    /// The principal owns the prompt and it carries no sensitive tag.
    OwnerNotSensitive,
    /// The prompt is published, or the principal owns it.
    PublishedOrOwner,
    /// The resource's owner is known and is not an administrator.
    NotAdminOwned,
    /// The suggestion or approval request is in the given review state.
    StatusIs(ReviewStatus),
    /// Every inner condition holds.
    AllOf(Vec<Condition>),
    /// At least one inner condition holds.
    AnyOf(Vec<Condition>),
}

impl Condition {
    /// Evaluates the condition.
    pub fn evaluate(&self, principal: &Principal, resource: &Resource) -> bool {
        match self {
            Self::Owner => principal.is(resource.owner_id()),
            Self::NotOwner => !principal.is(resource.owner_id()),
            Self::Published => resource.as_prompt().is_some_and(|p| p.is_published),
            Self::NotSensitive => resource.as_prompt().is_some_and(|p| !p.is_sensitive),
            Self::OwnerNotSensitive => resource
                .as_prompt()
                .is_some_and(|p| !p.is_sensitive && principal.is(resource.owner_id())),
            Self::PublishedOrOwner => resource
                .as_prompt()
                .is_some_and(|p| p.is_published || principal.is(resource.owner_id())),
            // Unknown owner role fails closed.
            Self::NotAdminOwned => resource
                .meta()
                .owner_role
                .is_some_and(|role| role != Role::Admin),
            Self::StatusIs(status) => resource.review_status() == Some(*status),
            Self::AllOf(inner) => inner.iter().all(|c| c.evaluate(principal, resource)),
            Self::AnyOf(inner) => inner.iter().any(|c| c.evaluate(principal, resource)),
        }
    }

    /// Whether this condition can ever hold for resources of `kind`.
    pub fn applies_to(&self, kind: ResourceKind) -> bool {
        match self {
            Self::Owner | Self::NotOwner | Self::NotAdminOwned => true,
            Self::Published
            | Self::NotSensitive
            | Self::OwnerNotSensitive
            | Self::PublishedOrOwner => kind == ResourceKind::Prompt,
            Self::StatusIs(_) => matches!(
                kind,
                ResourceKind::TagSuggestion | ResourceKind::ApprovalRequest
            ),
            Self::AllOf(inner) => inner.iter().all(|c| c.applies_to(kind)),
            Self::AnyOf(inner) => inner.iter().any(|c| c.applies_to(kind)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::NotOwner => write!(f, "not_owner"),
            Self::Published => write!(f, "published"),
            Self::NotSensitive => write!(f, "not_sensitive"),
            Self::OwnerNotSensitive => write!(f, "owner_not_sensitive"),
            Self::PublishedOrOwner => write!(f, "published_or_owner"),
            Self::NotAdminOwned => write!(f, "not_admin_owned"),
            Self::StatusIs(status) => write!(f, "status_is:{}", status.as_str().to_lowercase()),
            Self::AllOf(inner) => write_list(f, "all_of", inner),
            Self::AnyOf(inner) => write_list(f, "any_of", inner),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, inner: &[Condition]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, c) in inner.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{c}")?;
    }
    write!(f, ")")
}

impl FromStr for Condition {
    type Err = AppError;

    /// Parses the names used in configuration grants.
    ///
    /// Accepts a single name, `status_is:<status>`, `all_of(a, b, ..)`,
    /// `any_of(a, b, ..)`, or several conditions joined with `&&` (all must
    /// hold). The `Display` form parses back to the same condition.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts = split_top_level(trimmed, "&&", s)?;
        if parts.len() > 1 {
            let inner = parts
                .into_iter()
                .map(str::parse::<Condition>)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::AllOf(inner));
        }

        let name = trimmed.to_lowercase();
        for (prefix, all) in [("all_of(", true), ("any_of(", false)] {
            let Some(rest) = name.strip_prefix(prefix) else {
                continue;
            };
            let body = rest.strip_suffix(')').ok_or_else(|| {
                AppError::configuration(format!("Invalid condition '{s}': missing ')'"))
            })?;
            let inner = if body.trim().is_empty() {
                Vec::new()
            } else {
                split_top_level(body, ",", s)?
                    .into_iter()
                    .map(str::parse::<Condition>)
                    .collect::<Result<Vec<_>, _>>()?
            };
            return Ok(if all {
                Self::AllOf(inner)
            } else {
                Self::AnyOf(inner)
            });
        }

        if let Some(status) = name.strip_prefix("status_is:") {
            let status = status.trim().parse::<ReviewStatus>().map_err(|e| {
                AppError::configuration(format!("Invalid condition '{s}': {}", e.message))
            })?;
            return Ok(Self::StatusIs(status));
        }

        match name.as_str() {
            "owner" => Ok(Self::Owner),
            "not_owner" => Ok(Self::NotOwner),
            "published" => Ok(Self::Published),
            "not_sensitive" => Ok(Self::NotSensitive),
            "owner_not_sensitive" => Ok(Self::OwnerNotSensitive),
            "published_or_owner" => Ok(Self::PublishedOrOwner),
            "not_admin_owned" => Ok(Self::NotAdminOwned),
            _ => Err(AppError::configuration(format!("Unknown condition '{s}'"))),
        }
    }
}

/// Splits `input` on `separator` outside parentheses.
fn split_top_level<'a>(
    input: &'a str,
    separator: &str,
    original: &str,
) -> Result<Vec<&'a str>, AppError> {
    let unbalanced = || {
        AppError::configuration(format!(
            "Invalid condition '{original}': unbalanced parentheses"
        ))
    };

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < input.len() {
        let rest = &input[i..];
        if rest.starts_with('(') {
            depth += 1;
        } else if rest.starts_with(')') {
            depth = depth.checked_sub(1).ok_or_else(unbalanced)?;
        } else if depth == 0 && rest.starts_with(separator) {
            parts.push(&input[start..i]);
            i += separator.len();
            start = i;
            continue;
        }
        i += rest.chars().next().map_or(1, char::len_utf8);
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    parts.push(&input[start..]);
    Ok(parts)
}
