//! The entry file.

use crate::domain::{
    catalog::{Fragment, RenderContext},
    entities::ProjectConfig,
    resolver::{DerivedFacts, RouteWiring},
};

use super::module::{JsModule, Location, Page};
use super::routing::{auth_endpoints, import_auth, inline_handlers};

pub(super) fn render(config: &ProjectConfig, facts: &DerivedFacts) -> String {
    let at = Location::Root;
    let empty = RenderContext::empty();

    let mut module = JsModule::new()
        .import("import express from 'express';")
        .with_dirname()
        .import("import 'dotenv/config';");
    if config.use_database() {
        module = module.import_local("connectDB", "config/db.js", at);
    }

    let routes = match facts.routing {
        RouteWiring::Routers => {
            module = module.import_local("indexRouter", "routes/index.js", at);
            let mut lines = vec!["app.use('/', indexRouter);".to_string()];
            if facts.auth_handlers.is_some() {
                module = module.import_local("authRouter", "routes/auth.js", at);
                lines.push("app.use('/auth', authRouter);".into());
            }
            lines.join("\n")
        }
        RouteWiring::Inline => {
            let mut blocks = Vec::new();
            if facts.layout.controllers {
                module = module.import_local("{ getHome }", "controllers/homeController.js", at);
                blocks.push("app.get('/', getHome);".to_string());
            } else {
                let page = Page::Home.response(config.template(), config.project_name().as_str(), at);
                blocks.push(Fragment::InlineHome.snippet(&empty.clone().with_variable("PAGE", page)));
            }
            if let Some(home) = facts.auth_handlers {
                module = import_auth(module, home, at);
                blocks.extend(inline_handlers(home));
                blocks.push(auth_endpoints(config, "app", "/auth", at));
            }
            blocks.join("\n\n")
        }
    };

    let mut setup = String::new();
    if config.use_database() {
        setup.push_str(&Fragment::ConnectDatabase.render(&empty));
        setup.push('\n');
    }
    if config.template().is_dynamic() {
        setup.push_str(&Fragment::ViewEngineSetup.render(&empty));
        setup.push('\n');
    }

    let not_found = if config.template().is_dynamic() {
        Fragment::NotFoundView
    } else {
        Fragment::NotFoundHtml
    };

    let ctx = RenderContext::empty()
        .with_variable("HEADER", module.header())
        .with_variable("SETUP", setup)
        .with_variable("ROUTES", routes)
        .with_variable("NOT_FOUND", not_found.snippet(&empty));
    Fragment::ServerEntry.render(&ctx)
}
