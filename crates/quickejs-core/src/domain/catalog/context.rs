use std::collections::BTreeMap;

/// Copyright year stamped into generated footers.
///
/// Fixed so that output is reproducible across runs.
pub const COPYRIGHT_YEAR: &str = "2026";

/// Context for fragment rendering.
///
/// A value object holding the `{{SLOT}}` values for one render. Slots are
/// `SCREAMING_SNAKE_CASE`.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "my-app" | User input |
/// | `TITLE` | "my-app" | Page title, defaults to the project name |
/// | `YEAR` | "2026" | [`COPYRIGHT_YEAR`] |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    // Sorted so substitution order never depends on hashing.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Context seeded with the built-in variables for `project_name`.
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        Self::empty()
            .with_variable("TITLE", name.clone())
            .with_variable("PROJECT_NAME", name)
            .with_variable("YEAR", COPYRIGHT_YEAR)
    }

    /// Context with no variables at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or override a variable, consuming self.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` with its value.
    ///
    /// - `{{UNKNOWN}}` is left as the literal `{{UNKNOWN}}`
    /// - values are inserted verbatim and never re-scanned for their own slots
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// First `{{SLOT}}` left in `text`, if any.
pub fn unresolved_placeholder(text: &str) -> Option<&str> {
    let start = text.find("{{")?;
    let after = &text[start..];
    let end = after.find("}}").map_or(after.len(), |i| i + 2);
    Some(&after[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_variables() {
        let ctx = RenderContext::new("my-app");
        assert_eq!(ctx.get("PROJECT_NAME"), Some("my-app"));
        assert_eq!(ctx.get("TITLE"), Some("my-app"));
        assert_eq!(ctx.get("YEAR"), Some(COPYRIGHT_YEAR));
    }

    #[test]
    fn renders_known_and_keeps_unknown() {
        let ctx = RenderContext::new("shop").with_variable("PAGE", "index");
        assert_eq!(
            ctx.render("{{TITLE}}/{{PAGE}} {{MISSING}} © {{YEAR}}"),
            "shop/index {{MISSING}} © 2026"
        );
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let ctx = RenderContext::empty()
            .with_variable("A", "{{B}}")
            .with_variable("B", "b");
        assert_eq!(ctx.render("{{A}}{{B}}"), "{{B}}b");
    }

    #[test]
    fn unterminated_slot_is_kept() {
        let ctx = RenderContext::new("x");
        assert_eq!(ctx.render("a {{TITLE"), "a {{TITLE");
    }

    #[test]
    fn finds_unresolved_placeholder() {
        assert_eq!(unresolved_placeholder("ok {{SLOT}} rest"), Some("{{SLOT}}"));
        assert_eq!(unresolved_placeholder("fine"), None);
    }
}
