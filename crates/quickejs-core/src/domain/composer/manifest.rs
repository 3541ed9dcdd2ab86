//! Project metadata files: `package.json`, `.env.example`, `.gitignore`
//! and the deployment descriptor.

use serde_json::{Map, Value, json};

use crate::domain::{
    entities::ProjectConfig,
    resolver::{DerivedFacts, pinned_version},
    value_objects::DeployTarget,
};

use super::ENTRY_FILE;

pub(super) const DESCRIPTION: &str = "Express application created with quick-ejs";

fn pinned(names: &[&'static str]) -> Value {
    let map: Map<String, Value> = names
        .iter()
        .map(|name| ((*name).to_string(), Value::from(pinned_version(name))))
        .collect();
    Value::Object(map)
}

fn pretty(value: &Value) -> String {
    format!("{value:#}\n")
}

/// `package.json`, dependency blocks in resolver order.
pub(super) fn package_json(config: &ProjectConfig, facts: &DerivedFacts) -> String {
    let manifest = json!({
        "name": config.project_name().as_str(),
        "version": "1.0.0",
        "description": DESCRIPTION,
        "type": "module",
        "main": ENTRY_FILE,
        "scripts": {
            "start": format!("node {ENTRY_FILE}"),
            "dev": format!("nodemon {ENTRY_FILE}"),
        },
        "keywords": ["express", config.template().as_str()],
        "author": "",
        "license": "ISC",
        "dependencies": pinned(&facts.dependencies),
        "devDependencies": pinned(&facts.dev_dependencies),
    });
    pretty(&manifest)
}

pub(super) fn env_sample(config: &ProjectConfig) -> String {
    let mut lines = vec!["PORT=3000", "NODE_ENV=development"];
    if config.use_database() {
        lines.push("MONGO_URI=mongodb://127.0.0.1:27017/yourdb");
    }
    if config.use_auth() {
        lines.push("JWT_SECRET=your-secret-key-here");
        lines.push("JWT_EXPIRE=7d");
    }
    lines.join("\n") + "\n"
}

pub(super) fn ignore_list(config: &ProjectConfig) -> String {
    let mut lines = vec!["node_modules/", ".env", "*.log", ".DS_Store", "dist/", "build/"];
    if let Some(target) = config.deploy_target() {
        lines.push(target.ignore_entry());
    }
    lines.join("\n") + "\n"
}

/// File name and content of the descriptor for `target`.
pub(super) fn deploy_descriptor(target: DeployTarget) -> (&'static str, String) {
    match target {
        DeployTarget::Vercel => {
            let methods = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"];
            let descriptor = json!({
                "version": 2,
                "builds": [
                    { "src": ENTRY_FILE, "use": "@vercel/node" }
                ],
                "routes": [
                    {
                        "src": "/(.*)",
                        "dest": format!("/{ENTRY_FILE}"),
                        "methods": methods,
                        "headers": {
                            "Access-Control-Allow-Origin": "*",
                            "Access-Control-Allow-Methods": methods.join(","),
                            "Access-Control-Allow-Headers": "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version, Authorization",
                        }
                    }
                ]
            });
            ("vercel.json", pretty(&descriptor))
        }
    }
}
