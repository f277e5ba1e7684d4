//! Built-in notice templates and the context they render from.
//!
//! Four notice kinds cover the governance mail flow:
//! - `initial` when a search owner is first put on notice
//! - `reminder` while the remediation window is running down
//! - `disabled` after the deadline sweep turns a search off
//! - `extended` when an administrator moves the deadline
//!
//! Delivery is out of scope here; [`Notice::build`] produces the final
//! `{to, subject, body}` triple and callers hand it to whatever transport
//! they have.

use searchgov_core::GovernanceConfig;
use serde::Serialize;

use crate::render::{NoticeError, TemplateRenderer};

/// The kind of governance notice to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Initial,
    Reminder,
    Disabled,
    Extended,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Initial => "initial",
            NoticeKind::Reminder => "reminder",
            NoticeKind::Disabled => "disabled",
            NoticeKind::Extended => "extended",
        }
    }

    /// Subject line template for this notice kind.
    pub fn subject_template(&self) -> &'static str {
        match self {
            NoticeKind::Initial => {
                "Action Required: Scheduled Search '{{ search_name }}' Flagged for Review"
            }
            NoticeKind::Reminder => {
                "REMINDER: Scheduled Search '{{ search_name }}' Requires Remediation"
            }
            NoticeKind::Disabled => {
                "Notice: Your Scheduled Search '{{ search_name }}' Has Been Disabled"
            }
            NoticeKind::Extended => {
                "Notice: Deadline Extended for Scheduled Search '{{ search_name }}'"
            }
        }
    }

    /// Body template for this notice kind.
    pub fn body_template(&self) -> &'static str {
        match self {
            NoticeKind::Initial => INITIAL_BODY,
            NoticeKind::Reminder => REMINDER_BODY,
            NoticeKind::Disabled => DISABLED_BODY,
            NoticeKind::Extended => EXTENDED_BODY,
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const INITIAL_BODY: &str = "\
Hello {{ owner }},

Your scheduled search has been flagged by the search governance team for the following reason(s):

{{ reason }}

Search Details:
- Name: {{ search_name }}
- App: {{ app }}
- Schedule: {{ schedule }}
- Average Runtime: {{ avg_runtime }}

You have {{ remediation_days }} days to remediate this issue. If no action is taken by {{ deadline | datetime }}, the search will be automatically disabled.

Recommended Actions:
1. Review your search for efficiency improvements
2. Consider reducing the search frequency if possible
3. Optimize the search query to reduce runtime
4. Contact the governance team if you need assistance

Please review and optimize your search, or contact the governance team if you believe this is in error.

Best regards,
Search Governance Team
";

const REMINDER_BODY: &str = "\
Hello {{ owner }},

This is a reminder that your scheduled search '{{ search_name }}' has been flagged and requires remediation.

IMPORTANT: You have {{ days_remaining }} days remaining before your search is automatically disabled.

Original Reason for Flagging:
{{ reason }}

Search Details:
- Name: {{ search_name }}
- App: {{ app }}
- Deadline: {{ deadline | datetime }}

Please address this issue as soon as possible to avoid service disruption.

If you have already fixed the issue, please contact the governance team to have the flag removed.

Best regards,
Search Governance Team
";

const DISABLED_BODY: &str = "\
Hello {{ owner }},

Your scheduled search '{{ search_name }}' has been automatically disabled by the search governance system.

This action was taken because the remediation deadline ({{ deadline | datetime }}) has passed without the identified issues being addressed.

Original Reason for Flagging:
{{ reason }}

To restore this search, please:
1. Review and address the issues that were identified
2. Contact the governance team with proof of remediation
3. Request re-enablement of your search

Search Details:
- Name: {{ search_name }}
- App: {{ app }}
- Original Deadline: {{ deadline | datetime }}
- Disabled On: {{ disabled_date | datetime }}

If you have questions or believe this was done in error, please contact the governance team immediately.

Best regards,
Search Governance Team
";

const EXTENDED_BODY: &str = "\
Hello {{ owner }},

The remediation deadline for your flagged scheduled search '{{ search_name }}' has been extended.

New Deadline: {{ new_deadline | datetime }}

Please use this additional time to address the identified issues:
{{ reason }}

This extension was granted by {{ extended_by }}.

Best regards,
Search Governance Team
";

/// Template variables for a notice. Epoch fields use the lookup
/// convention of `0` for "unset"; the `datetime` filter renders those
/// as `n/a`.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeContext {
    pub owner: String,
    pub search_name: String,
    pub app: String,
    pub reason: String,
    pub schedule: String,
    pub avg_runtime: String,
    pub remediation_days: i64,
    pub days_remaining: i64,
    pub deadline: i64,
    pub new_deadline: i64,
    pub disabled_date: i64,
    pub extended_by: String,
}

impl NoticeContext {
    /// Context with the standing defaults for every optional field.
    pub fn new(
        owner: impl Into<String>,
        search_name: impl Into<String>,
        app: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            search_name: search_name.into(),
            app: app.into(),
            reason: "No reason specified".to_string(),
            schedule: "unknown".to_string(),
            avg_runtime: "unknown".to_string(),
            remediation_days: 7,
            days_remaining: 0,
            deadline: 0,
            new_deadline: 0,
            disabled_date: 0,
            extended_by: "governance team".to_string(),
        }
    }
}

/// A rendered notice, ready for whatever transport the caller uses.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: &'static str,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notice {
    /// Render the subject and body for `kind` and resolve the recipient
    /// address from the owner via [`GovernanceConfig::email_address_for`].
    ///
    /// # Errors
    ///
    /// Returns [`NoticeError::Template`] if either template fails to render.
    pub fn build(
        kind: NoticeKind,
        ctx: &NoticeContext,
        config: &GovernanceConfig,
    ) -> Result<Notice, NoticeError> {
        let renderer = TemplateRenderer::new();
        let subject = renderer.render(kind.subject_template(), ctx)?;
        let body = renderer.render(kind.body_template(), ctx)?;
        let to = config.email_address_for(&ctx.owner);
        tracing::debug!(
            kind = kind.as_str(),
            search_name = %ctx.search_name,
            to = %to,
            "notice rendered"
        );
        Ok(Notice {
            kind: kind.as_str(),
            to,
            subject,
            body,
        })
    }
}
