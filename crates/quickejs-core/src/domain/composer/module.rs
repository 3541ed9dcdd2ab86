//! Helpers shared by the JavaScript file builders.

use crate::domain::{
    catalog::{Fragment, RenderContext},
    value_objects::TemplateKind,
};

/// Where a generated module sits relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Location {
    /// `server.js`
    Root,
    /// `routes/`, `controllers/`, `models/`, `middleware/`, `config/`
    Nested,
}

impl Location {
    /// Prefix for relative imports of other project modules.
    pub(super) const fn import_prefix(self) -> &'static str {
        match self {
            Self::Root => "./",
            Self::Nested => "../",
        }
    }

    /// `public/` as seen from this module's `__dirname`.
    pub(super) const fn public_dir(self) -> &'static str {
        match self {
            Self::Root => "public",
            Self::Nested => "../public",
        }
    }
}

/// Import block of an ES module.
#[derive(Debug, Default)]
pub(super) struct JsModule {
    imports: Vec<String>,
    dirname: bool,
}

impl JsModule {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn import(mut self, line: impl Into<String>) -> Self {
        self.imports.push(line.into());
        self
    }

    /// Import a project module, e.g. `("connectDB", "config/db.js")`.
    pub(super) fn import_local(self, binding: &str, target: &str, at: Location) -> Self {
        let prefix = at.import_prefix();
        self.import(format!("import {binding} from '{prefix}{target}';"))
    }

    /// Pull in `path` and `url` and define `__dirname` after the imports.
    pub(super) fn with_dirname(mut self) -> Self {
        if !self.dirname {
            self.dirname = true;
            self.imports.push("import path from 'path';".into());
            self.imports.push("import { fileURLToPath } from 'url';".into());
        }
        self
    }

    /// Rendered header, ready to prepend to a module body.
    pub(super) fn header(&self) -> String {
        if self.imports.is_empty() {
            return String::new();
        }
        let mut out = self.imports.join("\n");
        out.push_str("\n\n");
        if self.dirname {
            out.push_str(&Fragment::DirnameShim.render(&RenderContext::empty()));
            out.push('\n');
        }
        out
    }

    pub(super) fn finish(&self, body: &str) -> String {
        let mut out = self.header();
        out.push_str(body);
        out
    }
}

/// A page the generated server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Page {
    Home,
    Login,
    Register,
}

impl Page {
    const fn view(self) -> &'static str {
        match self {
            Self::Home => "index",
            Self::Login => "auth/login",
            Self::Register => "auth/register",
        }
    }

    const fn html(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Login => "auth/login.html",
            Self::Register => "auth/register.html",
        }
    }

    /// One statement sending this page from a handler at `at`.
    pub(super) fn response(self, template: TemplateKind, title: &str, at: Location) -> String {
        match template {
            TemplateKind::DynamicView => {
                let title = match self {
                    Self::Home => title,
                    Self::Login => "Login",
                    Self::Register => "Register",
                };
                let ctx = RenderContext::empty()
                    .with_variable("VIEW", self.view())
                    .with_variable("TITLE", title);
                Fragment::RenderView.snippet(&ctx)
            }
            TemplateKind::StaticHtml => {
                let ctx = RenderContext::empty()
                    .with_variable("PUBLIC_DIR", at.public_dir())
                    .with_variable("PAGE", self.html());
                Fragment::SendPage.snippet(&ctx)
            }
        }
    }

    /// Whether the response needs `__dirname` in scope.
    pub(super) const fn needs_dirname(template: TemplateKind) -> bool {
        matches!(template, TemplateKind::StaticHtml)
    }
}
