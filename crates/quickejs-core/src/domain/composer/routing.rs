//! `routes/` and `controllers/`, plus the auth endpoint block shared with
//! the entry file.

use crate::domain::{
    catalog::{Fragment, RenderContext},
    entities::{ProjectConfig, ProjectTree},
    error::DomainError,
    resolver::{AuthHandlersHome, DerivedFacts},
};

use super::module::{JsModule, Location, Page};

/// Add the imports the `/auth` endpoints need in a module at `at`.
pub(super) fn import_auth(module: JsModule, home: AuthHandlersHome, at: Location) -> JsModule {
    let module = match home {
        AuthHandlersHome::Controller => module.import_local(
            "{ register, login, getMe }",
            "controllers/authController.js",
            at,
        ),
        AuthHandlersHome::Router | AuthHandlersHome::Entry => {
            module.import_local("User", "models/User.js", at)
        }
    };
    module.import_local("{ protect }", "middleware/auth.js", at)
}

/// Handler definitions, present only when they live in the mounting file.
pub(super) fn inline_handlers(home: AuthHandlersHome) -> Option<String> {
    match home {
        AuthHandlersHome::Controller => None,
        AuthHandlersHome::Router | AuthHandlersHome::Entry => {
            let ctx = RenderContext::empty().with_variable("EXPORT", "");
            Some(Fragment::AuthHandlers.snippet(&ctx))
        }
    }
}

/// The five `/auth` endpoints registered on `target` (`router` or `app`).
pub(super) fn auth_endpoints(
    config: &ProjectConfig,
    target: &str,
    prefix: &str,
    at: Location,
) -> String {
    let title = config.project_name().as_str();
    let ctx = RenderContext::empty()
        .with_variable("TARGET", target)
        .with_variable("PREFIX", prefix)
        .with_variable(
            "LOGIN_PAGE",
            Page::Login.response(config.template(), title, at),
        )
        .with_variable(
            "REGISTER_PAGE",
            Page::Register.response(config.template(), title, at),
        );
    Fragment::AuthEndpoints.snippet(&ctx)
}

/// `routes/index.js` and, with auth, `routes/auth.js`.
pub(super) fn add_routes(
    tree: &mut ProjectTree,
    config: &ProjectConfig,
    facts: &DerivedFacts,
) -> Result<(), DomainError> {
    if !facts.layout.routes {
        return Ok(());
    }
    let at = Location::Nested;
    let template = config.template();

    let mut home = JsModule::new().import("import express from 'express';");
    let handler = if facts.layout.controllers {
        home = home.import_local("{ getHome }", "controllers/homeController.js", at);
        "getHome".to_string()
    } else {
        if Page::needs_dirname(template) {
            home = home.with_dirname();
        }
        let page = Page::Home.response(template, config.project_name().as_str(), at);
        Fragment::PageHandler.snippet(&RenderContext::empty().with_variable("PAGE", page))
    };
    let body = Fragment::HomeRouter.render(&RenderContext::empty().with_variable("HANDLER", handler));
    tree.add_file("routes/index.js", home.finish(&body))?;

    if let Some(home_of_handlers) = facts.auth_handlers {
        let mut module = import_auth(
            JsModule::new().import("import express from 'express';"),
            home_of_handlers,
            at,
        );
        if Page::needs_dirname(template) {
            module = module.with_dirname();
        }
        let handlers = inline_handlers(home_of_handlers)
            .map(|text| format!("{text}\n\n"))
            .unwrap_or_default();
        let ctx = RenderContext::empty()
            .with_variable("HANDLERS", handlers)
            .with_variable("ENDPOINTS", auth_endpoints(config, "router", "", at));
        tree.add_file("routes/auth.js", module.finish(&Fragment::AuthRouter.render(&ctx)))?;
    }
    Ok(())
}

/// `controllers/homeController.js` and, when it is their home, the auth
/// controller.
pub(super) fn add_controllers(
    tree: &mut ProjectTree,
    config: &ProjectConfig,
    facts: &DerivedFacts,
) -> Result<(), DomainError> {
    if !facts.layout.controllers {
        return Ok(());
    }
    let at = Location::Nested;
    let template = config.template();

    let mut home = JsModule::new();
    if Page::needs_dirname(template) {
        home = home.with_dirname();
    }
    let page = Page::Home.response(template, config.project_name().as_str(), at);
    let body = Fragment::HomeController.render(&RenderContext::empty().with_variable("PAGE", page));
    tree.add_file("controllers/homeController.js", home.finish(&body))?;

    if facts.auth_handlers == Some(AuthHandlersHome::Controller) {
        let module = JsModule::new().import_local("User", "models/User.js", at);
        let body =
            Fragment::AuthHandlers.render(&RenderContext::empty().with_variable("EXPORT", "export "));
        tree.add_file("controllers/authController.js", module.finish(&body))?;
    }
    Ok(())
}
