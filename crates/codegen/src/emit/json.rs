//! JSON rule documents
//!
//! `{ "class": ..., "table": ..., "rules": { column: [tokens] } }`, keys in
//! rule-set order, pretty-printed with a trailing newline.

use rulegen_core::RulegenResult;
use serde::Serialize;

use crate::context::RequestContext;
use crate::rules::RuleSet;

#[derive(Serialize)]
struct RuleDocument<'a> {
    class: String,
    table: &'a str,
    rules: &'a RuleSet,
}

/// Render the JSON document for one table.
pub fn render_rule_document(ctx: &RequestContext) -> RulegenResult<String> {
    let document = RuleDocument {
        class: ctx.request_class(),
        table: &ctx.table,
        rules: &ctx.rules,
    };
    let mut content = serde_json::to_string_pretty(&document)?;
    content.push('\n');
    Ok(content)
}
