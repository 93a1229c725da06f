//! Template types for typed variable injection.
//!
//! Templates mark slots as `__NAME__`. Substitution is single-pass, so
//! placeholder-looking text inside a value is never expanded again.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// `(NAME, value)` pairs for every `__NAME__` slot.
    fn vars(&self) -> Vec<(&'static str, String)>;

    fn apply(&self, content: &str) -> String {
        fill(content, &self.vars())
    }
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace `__NAME__` slots in one pass. Unknown slots are left as-is.
pub fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find("__") {
        let after = &rest[start + 2..];
        let hit = vars.iter().find(|(name, _)| {
            after.starts_with(name) && after[name.len()..].starts_with("__")
        });
        match hit {
            Some((name, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after[name.len() + 2..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
