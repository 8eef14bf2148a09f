//! # Request Context
//!
//! The `RequestContext` holds everything an emitter needs to render one
//! table: the rule set, the derived class name, the namespace and the
//! output path. It also hosts the naming helpers:
//!
//! - Case conversion (snake_case, PascalCase)
//! - Singularisation of table names
//! - Class, namespace and path derivation
//!

use heck::{ToPascalCase, ToSnakeCase};
use rulegen_ir::TableSpec;
use std::path::PathBuf;

use crate::rules::{RuleSet, build_rule_set};
use crate::{GeneratorConfig, OutputFormat};

/// Words whose singular and plural forms are the same
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// Plural → singular for whole words the suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("criteria", "criterion"),
    ("indices", "index"),
    ("vertices", "vertex"),
    ("matrices", "matrix"),
    ("quizzes", "quiz"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("shoes", "shoe"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
];

/// Ordered suffix rewrites, first match wins. Identity entries pin words
/// that already end in `s` and are singular.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("statuses", "status"),
    ("campuses", "campus"),
    ("aliases", "alias"),
    ("viruses", "virus"),
    ("buses", "bus"),
    ("status", "status"),
    ("campus", "campus"),
    ("alias", "alias"),
    ("virus", "virus"),
    ("bus", "bus"),
    ("ius", "ius"),
    ("yses", "ysis"),
    ("sis", "sis"),
    ("xis", "xis"),
    ("oes", "o"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("xes", "x"),
    ("ss", "ss"),
];

// ============================================================================
// RequestContext
// ============================================================================

/// Everything needed to render the form request for one table.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Table name as written in the migration
    pub table: String,

    /// Singular PascalCase name (`blog_posts` → `BlogPost`)
    pub class_name: String,

    /// Namespace prefix from configuration
    pub namespace_prefix: String,

    /// Rules in column order
    pub rules: RuleSet,

    /// Output rendering
    pub format: OutputFormat,
}

impl RequestContext {
    /// Build the context for a table using the generator configuration.
    pub fn from_table(table: &TableSpec, config: &GeneratorConfig) -> Self {
        Self {
            table: table.name.clone(),
            class_name: Self::class_name(&table.name),
            namespace_prefix: config.namespace.clone(),
            rules: build_rule_set(table, config.drop_unmapped),
            format: config.format,
        }
    }

    /// Name of the generated class (`UserRequest`)
    pub fn request_class(&self) -> String {
        Self::request_class_name(&self.table)
    }

    /// Namespace the class lives in (`App\Http\Requests\User`)
    pub fn namespace(&self) -> String {
        if self.namespace_prefix.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}\\{}", self.namespace_prefix, self.class_name)
        }
    }

    /// Path relative to the output root (`User/UserRequest.php`)
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.class_name).join(format!(
            "{}.{}",
            self.request_class(),
            self.format.file_type().extension()
        ))
    }

    // ====================================================================
    // Naming helpers
    // ====================================================================

    /// Convert a name to `snake_case` (e.g. "BlogPosts" → "blog_posts").
    pub fn snake(name: &str) -> String {
        name.to_snake_case()
    }

    /// Convert a name to `PascalCase` (e.g. "blog_post" → "BlogPost").
    pub fn pascal(name: &str) -> String {
        name.to_pascal_case()
    }

    /// Singularise a snake_case name with simple English heuristics.
    ///
    /// Only the last word changes: `blog_posts` → `blog_post`.
    pub fn singularize(name: &str) -> String {
        let s = Self::snake(name);
        let (head, last) = match s.rfind('_') {
            Some(i) => s.split_at(i + 1),
            None => ("", s.as_str()),
        };
        format!("{}{}", head, singular_word(last))
    }

    /// Table name → class name (`categories` → `Category`).
    pub fn class_name(table: &str) -> String {
        Self::pascal(&Self::singularize(table))
    }

    /// Table name → request class name (`users` → `UserRequest`).
    pub fn request_class_name(table: &str) -> String {
        format!("{}Request", Self::class_name(table))
    }
}

fn singular_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }

    let replace = |suffix: &str, replacement: &str| {
        format!("{}{}", &word[..word.len() - suffix.len()], replacement)
    };

    if let Some(&(suffix, replacement)) = SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| word.ends_with(*suffix))
    {
        return replace(suffix, replacement);
    }

    // `-ies` only becomes `-y` after a consonant (categories, but not ties)
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 && stem.ends_with(|c: char| !"aeiouy".contains(c)) {
            return replace("ies", "y");
        }
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
