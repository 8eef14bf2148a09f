//! Output emitters
//!
//! Each emitter renders a [`RequestContext`] into the content of one file.

pub mod json;
pub mod php;

use rulegen_core::RulegenResult;

use crate::context::RequestContext;
use crate::{GeneratedFile, OutputFormat};

/// Render the file for one table in the context's output format.
pub fn render(ctx: &RequestContext) -> RulegenResult<GeneratedFile> {
    let content = match ctx.format {
        OutputFormat::Php => php::render_form_request(ctx)?,
        OutputFormat::Json => json::render_rule_document(ctx)?,
    };

    Ok(GeneratedFile::new(
        ctx.relative_path(),
        content,
        ctx.format.file_type(),
        &ctx.table,
    ))
}
