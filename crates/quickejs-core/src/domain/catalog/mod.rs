//! Fragment catalog: every piece of text the generator can emit.
//!
//! Fragment sources live under `templates/` in this crate and are embedded
//! at compile time, so rendering never touches the filesystem. A fragment is
//! keyed by feature and variant; slots use the `{{SLOT}}` syntax understood
//! by [`RenderContext`].

mod context;

pub use context::{COPYRIGHT_YEAR, RenderContext, unresolved_placeholder};

macro_rules! template {
    ($path:literal) => {
        include_str!(concat!("../../../templates/", $path))
    };
}

/// A named text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    // ── static assets ────────────────────────────────────────────────────
    Stylesheet,
    ClientScript,

    // ── pages ────────────────────────────────────────────────────────────
    /// Slots: none (uses the EJS `title` local).
    IndexView,
    ErrorView,
    HeaderPartial,
    /// Slots: `YEAR`.
    FooterPartial,
    /// Slots: `TITLE`.
    StaticIndex,
    LoginPage,
    RegisterPage,

    // ── responses ────────────────────────────────────────────────────────
    /// Slots: `VIEW`, `TITLE`.
    RenderView,
    /// Slots: `PUBLIC_DIR`, `PAGE`.
    SendPage,
    NotFoundView,
    NotFoundHtml,

    // ── entry file ───────────────────────────────────────────────────────
    /// Slots: `HEADER`, `SETUP`, `ROUTES`, `NOT_FOUND`.
    ServerEntry,
    DirnameShim,
    ConnectDatabase,
    ViewEngineSetup,
    /// Slots: `PAGE`.
    InlineHome,

    // ── routing and controllers ──────────────────────────────────────────
    /// Slots: `HANDLER`.
    HomeRouter,
    /// Slots: `PAGE`.
    PageHandler,
    /// Slots: `PAGE`.
    HomeController,
    /// Slots: `HANDLERS`, `ENDPOINTS`.
    AuthRouter,
    /// Slots: `TARGET`, `PREFIX`, `LOGIN_PAGE`, `REGISTER_PAGE`.
    AuthEndpoints,
    /// Slots: `EXPORT`.
    AuthHandlers,

    // ── persistence ──────────────────────────────────────────────────────
    DatabaseConnector,
    AuthMiddleware,
    /// Slots: `FIELDS`, `METHODS`.
    UserModel,
    UserFields,
    UserAuthFields,
    UserAuthMethods,

    // ── docs ─────────────────────────────────────────────────────────────
    /// Slots: `PROJECT_NAME`, `FEATURES`, `STEPS`, `STRUCTURE`, `LINKS`.
    Readme,
}

impl Fragment {
    pub const ALL: &'static [Fragment] = &[
        Self::Stylesheet,
        Self::ClientScript,
        Self::IndexView,
        Self::ErrorView,
        Self::HeaderPartial,
        Self::FooterPartial,
        Self::StaticIndex,
        Self::LoginPage,
        Self::RegisterPage,
        Self::RenderView,
        Self::SendPage,
        Self::NotFoundView,
        Self::NotFoundHtml,
        Self::ServerEntry,
        Self::DirnameShim,
        Self::ConnectDatabase,
        Self::ViewEngineSetup,
        Self::InlineHome,
        Self::HomeRouter,
        Self::PageHandler,
        Self::HomeController,
        Self::AuthRouter,
        Self::AuthEndpoints,
        Self::AuthHandlers,
        Self::DatabaseConnector,
        Self::AuthMiddleware,
        Self::UserModel,
        Self::UserFields,
        Self::UserAuthFields,
        Self::UserAuthMethods,
        Self::Readme,
    ];

    /// Raw fragment source, slots unexpanded.
    pub const fn source(self) -> &'static str {
        match self {
            Self::Stylesheet => template!("public/style.css"),
            Self::ClientScript => template!("public/app.js"),
            Self::IndexView => template!("views/index.ejs"),
            Self::ErrorView => template!("views/error.ejs"),
            Self::HeaderPartial => template!("views/partials/header.ejs"),
            Self::FooterPartial => template!("views/partials/footer.ejs"),
            Self::StaticIndex => template!("static/index.html"),
            Self::LoginPage => template!("pages/login.html"),
            Self::RegisterPage => template!("pages/register.html"),
            Self::RenderView => "res.render('{{VIEW}}', { title: '{{TITLE}}' });",
            Self::SendPage => "res.sendFile(path.join(__dirname, '{{PUBLIC_DIR}}', '{{PAGE}}'));",
            Self::NotFoundView => {
                "res.status(404).render('error', { title: 'Not Found', message: 'Page not found' });"
            }
            Self::NotFoundHtml => {
                "res.status(404).send('<h1>404 - Page Not Found</h1><p>The page you are looking for does not exist.</p><a href=\"/\">Go Home</a>');"
            }
            Self::ServerEntry => template!("server/server.js"),
            Self::DirnameShim => template!("server/dirname.js"),
            Self::ConnectDatabase => template!("server/connect_db.js"),
            Self::ViewEngineSetup => template!("server/view_engine.js"),
            Self::InlineHome => template!("server/inline_home.js"),
            Self::HomeRouter => template!("routes/index.js"),
            Self::PageHandler => template!("routes/page_handler.js"),
            Self::HomeController => template!("controllers/home.js"),
            Self::AuthRouter => template!("routes/auth.js"),
            Self::AuthEndpoints => template!("routes/auth_endpoints.js"),
            Self::AuthHandlers => template!("auth/handlers.js"),
            Self::DatabaseConnector => template!("persistence/db.js"),
            Self::AuthMiddleware => template!("auth/middleware.js"),
            Self::UserModel => template!("persistence/user.js"),
            Self::UserFields => template!("persistence/user_fields.js"),
            Self::UserAuthFields => template!("persistence/user_auth_fields.js"),
            Self::UserAuthMethods => template!("persistence/user_auth_methods.js"),
            Self::Readme => template!("docs/README.md"),
        }
    }

    /// Render the whole fragment, keeping its trailing newline.
    pub fn render(self, ctx: &RenderContext) -> String {
        ctx.render(self.source())
    }

    /// Render for insertion into another fragment's slot: trailing
    /// whitespace is dropped so the host controls line breaks.
    pub fn snippet(self, ctx: &RenderContext) -> String {
        let mut text = self.render(ctx);
        text.truncate(text.trim_end().len());
        text
    }

    /// Slot names this fragment references, in order of first use.
    pub fn slots(self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        let mut rest = self.source();
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else { break };
            let name = &after[..end];
            if !slots.contains(&name) {
                slots.push(name);
            }
            rest = &after[end + 2..];
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fragment_has_content() {
        for fragment in Fragment::ALL {
            assert!(!fragment.source().trim().is_empty(), "{fragment:?} is empty");
        }
    }

    #[test]
    fn declared_slots() {
        assert_eq!(
            Fragment::ServerEntry.slots(),
            vec!["HEADER", "SETUP", "ROUTES", "NOT_FOUND"]
        );
        assert_eq!(
            Fragment::AuthEndpoints.slots(),
            vec!["TARGET", "PREFIX", "LOGIN_PAGE", "REGISTER_PAGE"]
        );
        assert_eq!(Fragment::FooterPartial.slots(), vec!["YEAR"]);
        assert!(Fragment::Stylesheet.slots().is_empty());
    }

    #[test]
    fn snippet_drops_trailing_newline() {
        let ctx = RenderContext::empty().with_variable("PAGE", "res.end();");
        assert_eq!(
            Fragment::PageHandler.snippet(&ctx),
            "(req, res) => {\n  res.end();\n}"
        );
        assert!(Fragment::HomeRouter.render(&ctx).ends_with('\n'));
    }

    #[test]
    fn footer_carries_fixed_year() {
        let footer = Fragment::FooterPartial.render(&RenderContext::new("app"));
        assert!(footer.contains("&copy; 2026 <%= title %>"));
    }
}
