//! Feature resolver: turns a [`ProjectConfig`] into the facts every other
//! part of generation agrees on.
//!
//! Packages are described once in [`PACKAGE_REGISTRY`]. The dependency lists
//! are the registry filtered by the active features, so list order is the
//! registry order.

use serde::Serialize;

use crate::domain::entities::ProjectConfig;

// ── Package registry ─────────────────────────────────────────────────────────

/// Which feature pulls a package in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    DynamicView,
    Database,
    Auth,
}

impl Requirement {
    fn is_met_by(self, config: &ProjectConfig) -> bool {
        match self {
            Self::Always => true,
            Self::DynamicView => config.template().is_dynamic(),
            Self::Database => config.use_database(),
            Self::Auth => config.use_auth(),
        }
    }
}

/// One npm package the generated project may depend on.
#[derive(Debug, Clone, Copy)]
pub struct PackageDef {
    pub name: &'static str,
    /// Semver range written to the manifest.
    pub version: &'static str,
    pub dev: bool,
    pub requires: Requirement,
}

/// Every package the generator knows about, in manifest order.
pub static PACKAGE_REGISTRY: &[PackageDef] = &[
    PackageDef {
        name: "express",
        version: "^4.18.2",
        dev: false,
        requires: Requirement::Always,
    },
    PackageDef {
        name: "dotenv",
        version: "^16.3.1",
        dev: false,
        requires: Requirement::Always,
    },
    PackageDef {
        name: "ejs",
        version: "^3.1.9",
        dev: false,
        requires: Requirement::DynamicView,
    },
    PackageDef {
        name: "mongoose",
        version: "^7.5.0",
        dev: false,
        requires: Requirement::Database,
    },
    PackageDef {
        name: "bcryptjs",
        version: "^2.4.3",
        dev: false,
        requires: Requirement::Auth,
    },
    PackageDef {
        name: "jsonwebtoken",
        version: "^9.0.2",
        dev: false,
        requires: Requirement::Auth,
    },
    PackageDef {
        name: "nodemon",
        version: "^3.0.1",
        dev: true,
        requires: Requirement::Always,
    },
];

/// Version range for `name`; unknown packages resolve to `latest`.
pub fn pinned_version(name: &str) -> &'static str {
    PACKAGE_REGISTRY
        .iter()
        .find(|def| def.name == name)
        .map_or("latest", |def| def.version)
}

// ── Derived facts ────────────────────────────────────────────────────────────

/// Optional top-level directories of the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutFlags {
    pub views: bool,
    pub routes: bool,
    pub controllers: bool,
    pub models: bool,
    pub config: bool,
    pub middleware: bool,
}

impl LayoutFlags {
    /// Enabled directory names in the order the README lists them.
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            (self.views, "views"),
            (self.routes, "routes"),
            (self.controllers, "controllers"),
            (self.models, "models"),
            (self.config, "config"),
            (self.middleware, "middleware"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// How requests reach the home page handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteWiring {
    /// `server.js` mounts the routers under `routes/`.
    Routers,
    /// `server.js` defines the `/` handler itself.
    Inline,
}

/// The one file holding the register/login/getMe handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthHandlersHome {
    /// `controllers/authController.js`, imported by whoever mounts `/auth`.
    Controller,
    /// Defined inside `routes/auth.js`.
    Router,
    /// Defined inside the entry file.
    Entry,
}

/// Everything generation needs beyond the raw config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFacts {
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
    pub layout: LayoutFlags,
    pub routing: RouteWiring,
    pub auth_handlers: Option<AuthHandlersHome>,
}

/// Derive facts from a validated config. Pure and total.
pub fn resolve(config: &ProjectConfig) -> DerivedFacts {
    let select = |dev: bool| -> Vec<&'static str> {
        PACKAGE_REGISTRY
            .iter()
            .filter(|def| def.dev == dev && def.requires.is_met_by(config))
            .map(|def| def.name)
            .collect()
    };

    let layout = LayoutFlags {
        views: config.template().is_dynamic(),
        routes: config.use_routes(),
        controllers: config.use_controllers(),
        models: config.use_database(),
        config: config.use_database(),
        middleware: config.use_auth(),
    };

    let routing = if config.use_routes() {
        RouteWiring::Routers
    } else {
        RouteWiring::Inline
    };

    let auth_handlers = config.use_auth().then(|| {
        if config.use_controllers() {
            AuthHandlersHome::Controller
        } else if config.use_routes() {
            AuthHandlersHome::Router
        } else {
            AuthHandlersHome::Entry
        }
    });

    DerivedFacts {
        dependencies: select(false),
        dev_dependencies: select(true),
        layout,
        routing,
        auth_handlers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::TemplateKind;

    fn config(template: TemplateKind, routes: bool, controllers: bool, db: bool, auth: bool) -> ProjectConfig {
        ProjectConfig::builder("app")
            .template(template)
            .routes(routes)
            .controllers(controllers)
            .database(db)
            .auth(auth)
            .build()
            .unwrap()
    }

    #[test]
    fn dependency_order_is_exact() {
        let facts = resolve(&config(TemplateKind::DynamicView, true, true, true, true));
        assert_eq!(
            facts.dependencies,
            vec!["express", "dotenv", "ejs", "mongoose", "bcryptjs", "jsonwebtoken"]
        );
        assert_eq!(facts.dev_dependencies, vec!["nodemon"]);
    }

    #[test]
    fn static_html_without_features_is_baseline() {
        let facts = resolve(&config(TemplateKind::StaticHtml, false, false, false, false));
        assert_eq!(facts.dependencies, vec!["express", "dotenv"]);
        assert_eq!(facts.layout, LayoutFlags::default());
        assert_eq!(facts.routing, RouteWiring::Inline);
        assert_eq!(facts.auth_handlers, None);
    }

    #[test]
    fn dependencies_always_start_with_baseline() {
        for template in [TemplateKind::DynamicView, TemplateKind::StaticHtml] {
            for db in [false, true] {
                let facts = resolve(&config(template, true, false, db, db));
                assert_eq!(&facts.dependencies[..2], &["express", "dotenv"]);
            }
        }
    }

    #[test]
    fn auth_handlers_home_follows_layout() {
        let home = |routes, controllers| {
            resolve(&config(TemplateKind::DynamicView, routes, controllers, true, true)).auth_handlers
        };
        assert_eq!(home(true, true), Some(AuthHandlersHome::Controller));
        assert_eq!(home(false, true), Some(AuthHandlersHome::Controller));
        assert_eq!(home(true, false), Some(AuthHandlersHome::Router));
        assert_eq!(home(false, false), Some(AuthHandlersHome::Entry));
    }

    #[test]
    fn auth_requires_database() {
        let with = resolve(&config(TemplateKind::DynamicView, true, true, false, true));
        let without = resolve(&config(TemplateKind::DynamicView, true, true, false, false));
        assert_eq!(with, without);
        assert!(!with.layout.middleware);
    }

    #[test]
    fn layout_flags_mirror_config() {
        let facts = resolve(&config(TemplateKind::DynamicView, true, false, true, false));
        assert!(facts.layout.views);
        assert!(facts.layout.routes);
        assert!(!facts.layout.controllers);
        assert!(facts.layout.models && facts.layout.config);
        assert!(!facts.layout.middleware);
        assert_eq!(facts.layout.enabled(), vec!["views", "routes", "models", "config"]);
    }

    #[test]
    fn pinned_versions() {
        assert_eq!(pinned_version("express"), "^4.18.2");
        assert_eq!(pinned_version("nodemon"), "^3.0.1");
        assert_eq!(pinned_version("left-pad"), "latest");
    }

    #[test]
    fn resolve_is_deterministic() {
        let cfg = config(TemplateKind::StaticHtml, true, true, true, true);
        assert_eq!(resolve(&cfg), resolve(&cfg));
    }
}
