//! Remediation suggestions keyed off the flag reason.

const RUNTIME_ADVICE: &[&str] = &[
    "Replace stats scans with tstats: `| tstats count WHERE index=* BY host` is 10-100x faster",
    "Add early filters: move WHERE clauses before stats, filter first and aggregate second",
    "Use summary indexing: pre-aggregate with collect or mcollect for repeated queries",
    "Limit fields early with `| fields` to reduce memory usage",
    "Reduce the time range if fresher data works for the use case",
];

const FREQUENCY_ADVICE: &[&str] = &[
    "Batch it: change */5 to */15 or hourly, most alerts do not need 5-minute granularity",
    "Use a real-time alert instead of a frequent scheduled search for true urgency",
    "Stagger execution: `3,8,13,18 * * * *` spreads load better than `*/5 * * * *`",
    "Enable report acceleration for scheduled reports",
];

const WILDCARD_ADVICE: &[&str] = &[
    "Target specific indexes instead of index=*",
    "Use index prefixes: index=prod_* is faster than index=*",
    "Add a sourcetype filter to reduce search scope",
    "Create an accelerated data model for repeated queries",
];

const COST_ADVICE: &[&str] = &[
    "Simplify subsearches: replace `[search ...]` with lookups or append where possible",
    "Pre-calculate eval fields before stats",
    "Use dedup with a count: `dedup 10 host` is faster than `dedup host`",
    "Move rarely accessed data to the frozen tier",
];

const OWNERSHIP_ADVICE: &[&str] = &[
    "Transfer ownership to an active user or the system account",
    "Document the search purpose in its description field",
    "Configure failure alerts so someone hears about breakage",
    "Consider disabling if no one claims it after 30 days",
];

const JOIN_ADVICE: &[&str] = &[
    "Replace transaction with `stats values() BY`, typically 5-10x faster",
    "Replace join with append plus stats, or a lookup",
    "Limit transaction scope with maxspan and maxevents",
    "Pre-aggregate the grouped data into a summary index",
];

const GENERIC_ADVICE: &[&str] = &[
    "Confirm with stakeholders that the search is still required",
    "Schedule off-peak, when the cluster is less busy",
    "Add job monitoring for runtimes exceeding 5 minutes",
    "Document purpose, owner contact, and SLA requirements",
];

/// Suggested remediation steps for a flag reason, chosen by keyword bucket.
/// Unknown reasons get generic guidance; there is always something to show.
pub fn advice_for_reason(reason: &str) -> &'static [&'static str] {
    let reason = reason.to_lowercase();
    let matches_any = |needles: &[&str]| needles.iter().any(|n| reason.contains(n));

    if matches_any(&["high runtime", "runtime ratio", "excessive runtime"]) {
        RUNTIME_ADVICE
    } else if matches_any(&["frequent", "runs every", "schedule"]) {
        FREQUENCY_ADVICE
    } else if matches_any(&["wildcard", "all index", "index=*"]) {
        WILDCARD_ADVICE
    } else if matches_any(&["expensive", "cost", "resource"]) {
        COST_ADVICE
    } else if matches_any(&["owner", "orphan", "unknown"]) {
        OWNERSHIP_ADVICE
    } else if matches_any(&["transaction", "join"]) {
        JOIN_ADVICE
    } else {
        GENERIC_ADVICE
    }
}
