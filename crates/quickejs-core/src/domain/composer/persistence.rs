use crate::domain::{
    catalog::{Fragment, RenderContext},
    entities::{ProjectConfig, ProjectTree},
    error::DomainError,
};

use super::module::{JsModule, Location};

/// `config/db.js`, `models/User.js` and, with auth, `middleware/auth.js`.
pub(super) fn add_persistence(
    tree: &mut ProjectTree,
    config: &ProjectConfig,
) -> Result<(), DomainError> {
    if !config.use_database() {
        return Ok(());
    }
    let empty = RenderContext::empty();
    let mongoose = "import mongoose from 'mongoose';";

    let db = JsModule::new().import(mongoose);
    tree.add_file("config/db.js", db.finish(&Fragment::DatabaseConnector.render(&empty)))?;

    let mut model = JsModule::new().import(mongoose);
    let mut fields = Fragment::UserFields.source().to_string();
    let mut methods = String::new();
    if config.use_auth() {
        model = model
            .import("import bcrypt from 'bcryptjs';")
            .import("import jwt from 'jsonwebtoken';");
        fields.push_str(Fragment::UserAuthFields.source());
        methods.push_str(Fragment::UserAuthMethods.source());
    }
    let ctx = RenderContext::empty()
        .with_variable("FIELDS", fields)
        .with_variable("METHODS", methods);
    tree.add_file("models/User.js", model.finish(&Fragment::UserModel.render(&ctx)))?;

    if config.use_auth() {
        let middleware = JsModule::new()
            .import("import jwt from 'jsonwebtoken';")
            .import_local("User", "models/User.js", Location::Nested);
        tree.add_file(
            "middleware/auth.js",
            middleware.finish(&Fragment::AuthMiddleware.render(&empty)),
        )?;
    }
    Ok(())
}
