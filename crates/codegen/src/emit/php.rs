//! # Form Request Emitter (PHP)
//!
//! Generates one form-request class per table:
//!
//! ```php
//! <?php
//!
//! namespace App\Http\Requests\Example;
//!
//! use Illuminate\Foundation\Http\FormRequest;
//!
//! class ExampleRequest extends FormRequest
//! {
//!     public function authorize()
//!     {
//!         return true;
//!     }
//!
//!     public function rules()
//!     {
//!         return [
//!             'name' => ['string', 'max:50', 'required'],
//!         ];
//!     }
//! }
//! ```

use rulegen_core::{CodeGenContext, CodeGenerable, RulegenResult};

use crate::context::RequestContext;
use crate::rules::RuleSet;

/// Base class every generated request extends
pub const FORM_REQUEST_BASE: &str = "Illuminate\\Foundation\\Http\\FormRequest";

/// Quote a value as a single-quoted PHP string literal.
pub fn php_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Renders the rule set as a PHP array literal. The opening bracket is not
/// indented; entries sit one level deeper than `ctx`, the closing bracket at
/// `ctx`.
impl CodeGenerable for RuleSet {
    fn generate(&self, ctx: &CodeGenContext) -> RulegenResult<String> {
        if self.is_empty() {
            return Ok("[]".to_string());
        }

        let inner = ctx.indented();
        let lines: Vec<String> = self
            .entries()
            .iter()
            .map(|(column, rules)| {
                let tokens: Vec<String> = rules.iter().map(|r| php_quote(&r.to_string())).collect();
                format!("{}{} => [{}]", inner.indent(), php_quote(column), tokens.join(", "))
            })
            .collect();

        let mut out = String::from("[\n");
        out.push_str(&lines.join(",\n"));
        if ctx.trailing_commas {
            out.push(',');
        }
        out.push('\n');
        out.push_str(&ctx.indent());
        out.push(']');
        Ok(out)
    }
}

/// Render the complete PHP class for one table.
pub fn render_form_request(ctx: &RequestContext) -> RulegenResult<String> {
    let body = CodeGenContext::at_level(2);
    let method = CodeGenContext::at_level(1);
    let rules = ctx.rules.generate(&body)?;

    let mut content = String::with_capacity(512);
    content.push_str("<?php\n\n");
    content.push_str(&format!("namespace {};\n\n", ctx.namespace()));
    content.push_str(&format!("use {};\n\n", FORM_REQUEST_BASE));
    content.push_str(&format!("class {} extends FormRequest\n{{\n", ctx.request_class()));

    content.push_str(&format!("{}public function authorize()\n", method.indent()));
    content.push_str(&format!("{}{{\n", method.indent()));
    content.push_str(&format!("{}return true;\n", body.indent()));
    content.push_str(&format!("{}}}\n\n", method.indent()));

    content.push_str(&format!("{}public function rules()\n", method.indent()));
    content.push_str(&format!("{}{{\n", method.indent()));
    content.push_str(&format!("{}return {};\n", body.indent(), rules));
    content.push_str(&format!("{}}}\n", method.indent()));

    content.push_str("}\n");
    Ok(content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratorConfig;
    use pretty_assertions::assert_eq;
    use rulegen_core::{ColumnType, ForeignRef, RuleToken};
    use rulegen_ir::{ColumnSpec, TableSpec};

    fn examples_table() -> TableSpec {
        TableSpec::new("examples")
            .with_column(ColumnSpec::new("name", ColumnType::String).with_length(50))
            .with_column(
                ColumnSpec::new("category_id", ColumnType::Integer)
                    .with_foreign(ForeignRef::new("categories", "id")),
            )
    }

    #[test]
    fn test_php_quote_escapes() {
        assert_eq!(php_quote("name"), "'name'");
        assert_eq!(php_quote("o'brien"), r"'o\'brien'");
        assert_eq!(php_quote(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_render_examples_class() {
        let ctx = RequestContext::from_table(&examples_table(), &GeneratorConfig::default());
        let expected = r"<?php

namespace App\Http\Requests\Example;

use Illuminate\Foundation\Http\FormRequest;

class ExampleRequest extends FormRequest
{
    public function authorize()
    {
        return true;
    }

    public function rules()
    {
        return [
            'name' => ['string', 'max:50', 'required'],
            'category_id' => ['integer', 'required', 'exists:categories,id'],
        ];
    }
}
";
        assert_eq!(render_form_request(&ctx).unwrap(), expected);
    }

    #[test]
    fn test_empty_rule_set_renders_empty_array() {
        let ctx = RequestContext::from_table(&TableSpec::new("tags"), &GeneratorConfig::default());
        let content = render_form_request(&ctx).unwrap();
        assert!(content.contains("        return [];\n"));
        assert!(content.contains("class TagRequest extends FormRequest"));
    }

    #[test]
    fn test_rule_set_without_trailing_commas() {
        let mut set = RuleSet::new("t");
        set.push("a", vec![RuleToken::Boolean]);
        set.push("b", vec![RuleToken::Date, RuleToken::Required]);

        let mut ctx = CodeGenContext::new();
        ctx.trailing_commas = false;
        assert_eq!(
            set.generate(&ctx).unwrap(),
            "[\n    'a' => ['boolean'],\n    'b' => ['date', 'required']\n]"
        );
    }

    #[test]
    fn test_custom_namespace_prefix() {
        let config = GeneratorConfig::new().with_namespace("Domain\\Validation");
        let ctx = RequestContext::from_table(&examples_table(), &config);
        assert!(
            render_form_request(&ctx)
                .unwrap()
                .contains("namespace Domain\\Validation\\Example;\n")
        );
    }
}
