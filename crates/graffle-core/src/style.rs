//! Scoped style properties.
//!
//! Rendering a page walks a tree of graphics. Every graphic and every nested
//! layer opens a scope, sets the CSS-like properties it resolves (`fill`,
//! `stroke`, `marker-end`, ...), and closes the scope again on exit, so a
//! property set on a group is inherited by its children until the group ends.
//!
//! [`CascadingStyles`] is owned by a single render target. It is never shared
//! between renders.

use std::fmt;

use indexmap::IndexMap;

/// A map of style property names to values, in insertion order.
pub type StyleMap = IndexMap<String, String>;

/// A stack of style scopes with an optional set of default values.
///
/// Lookups search the innermost scope first. When serialized, properties
/// whose effective value equals the declared default are omitted.
///
/// # Examples
///
/// ```
/// use graffle_core::style::CascadingStyles;
///
/// let mut styles = CascadingStyles::new();
/// styles.push_scope();
/// styles.set("fill", "#fff");
///
/// styles.push_scope();
/// styles.set("stroke", "none");
/// assert_eq!(styles.get("fill"), Some("#fff"));
/// assert_eq!(styles.to_string(), "fill:#fff;stroke:none");
///
/// styles.pop_scope();
/// assert_eq!(styles.get("stroke"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CascadingStyles {
    defaults: StyleMap,
    scopes: Vec<StyleMap>,
}

impl CascadingStyles {
    /// Creates an empty style stack without defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty style stack with the given default values.
    pub fn with_defaults(defaults: StyleMap) -> Self {
        Self {
            defaults,
            scopes: Vec::new(),
        }
    }

    /// Opens a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(StyleMap::new());
    }

    /// Closes the innermost scope, returning the properties it held.
    pub fn pop_scope(&mut self) -> Option<StyleMap> {
        self.scopes.pop()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns the effective value of `key`, falling back to the defaults.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(key))
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
    }

    /// Sets `key` in the innermost scope.
    ///
    /// Setting a property with no open scope opens one first.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    /// Returns every property in effect, outermost scope first, without the
    /// ones that match a default.
    pub fn current_style(&self) -> StyleMap {
        let mut merged = StyleMap::new();
        for scope in &self.scopes {
            for (key, value) in scope {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged.retain(|key, value| self.defaults.get(key) != Some(value));
        merged
    }

    /// Returns a stack holding only the innermost scope.
    ///
    /// Emitted elements carry just the properties their own graphic set. The
    /// rest is inherited from the enclosing SVG group.
    pub fn scope_style(&self) -> CascadingStyles {
        Self {
            defaults: self.defaults.clone(),
            scopes: self.scopes.last().cloned().into_iter().collect(),
        }
    }
}

impl fmt::Display for CascadingStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.current_style();
        for (i, (key, value)) in style.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}:{value}")?;
        }
        Ok(())
    }
}
