use crate::domain::{
    catalog::{Fragment, RenderContext},
    entities::ProjectConfig,
    resolver::DerivedFacts,
    value_objects::DeployTarget,
};

use super::ENTRY_FILE;

fn directory_note(name: &str) -> &'static str {
    match name {
        "views" => "EJS templates",
        "routes" => "Route definitions",
        "controllers" => "Request handlers",
        "models" => "Database models",
        "config" => "Configuration files",
        "middleware" => "Custom middleware",
        _ => "",
    }
}

fn tree_line(branch: &str, name: &str, note: Option<&str>) -> String {
    match note {
        Some(note) => format!("{branch} {name:<17}# {note}"),
        None => format!("{branch} {name}"),
    }
}

fn features(config: &ProjectConfig) -> String {
    let mut items = vec![if config.template().is_dynamic() {
        "EJS templating engine"
    } else {
        "Static HTML files"
    }];
    for (on, item) in [
        (config.use_routes(), "Organized route structure"),
        (config.use_controllers(), "MVC pattern with controllers"),
        (config.use_database(), "MongoDB integration"),
        (config.use_auth(), "JWT authentication"),
        (config.deploy_target().is_some(), "Vercel deployment config"),
    ] {
        if on {
            items.push(item);
        }
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn steps(config: &ProjectConfig) -> String {
    let pm = config.package_manager();
    let mut steps = vec![format!(
        "Install dependencies:\n```bash\n{pm} install\n```"
    )];
    if config.use_database() {
        steps.push(
            "Copy `.env.example` to `.env` and set your MongoDB URI:\n```\nMONGO_URI=mongodb://127.0.0.1:27017/yourdb\n```"
                .to_string(),
        );
    }
    steps.push(format!(
        "Run the development server:\n```bash\n{}\n```",
        pm.run_script("dev")
    ));
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn structure(config: &ProjectConfig, facts: &DerivedFacts) -> String {
    let mut lines = vec![
        format!("{}/", config.project_name()),
        tree_line("├──", "public/", Some("Static files")),
        "│   ├── css/".to_string(),
        "│   ├── js/".to_string(),
        "│   └── assets/".to_string(),
    ];
    for dir in facts.layout.enabled() {
        lines.push(tree_line("├──", &format!("{dir}/"), Some(directory_note(dir))));
    }
    lines.push(tree_line("├──", ".env.example", Some("Environment variables template")));
    lines.push(tree_line("├──", "package.json", None));
    if let Some(DeployTarget::Vercel) = config.deploy_target() {
        lines.push(tree_line("├──", "vercel.json", Some("Deployment config")));
    }
    lines.push(tree_line("└──", ENTRY_FILE, Some("Entry point")));
    lines.join("\n")
}

fn links(config: &ProjectConfig) -> String {
    let mut links = vec!["- [Express.js Documentation](https://expressjs.com/)"];
    if config.template().is_dynamic() {
        links.push("- [EJS Documentation](https://ejs.co/)");
    }
    if config.use_database() {
        links.push("- [MongoDB Documentation](https://docs.mongodb.com/)");
    }
    links.join("\n")
}

pub(super) fn render(config: &ProjectConfig, facts: &DerivedFacts) -> String {
    let ctx = RenderContext::new(config.project_name().as_str())
        .with_variable("FEATURES", features(config))
        .with_variable("STEPS", steps(config))
        .with_variable("STRUCTURE", structure(config, facts))
        .with_variable("LINKS", links(config));
    Fragment::Readme.render(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolver::resolve;
    use crate::domain::value_objects::PackageManager;

    #[test]
    fn dev_command_follows_package_manager() {
        for (pm, cmd) in [
            (PackageManager::Npm, "npm run dev"),
            (PackageManager::Yarn, "yarn dev"),
            (PackageManager::Pnpm, "pnpm dev"),
        ] {
            let cfg = ProjectConfig::builder("a").package_manager(pm).build().unwrap();
            let text = render(&cfg, &resolve(&cfg));
            assert!(text.contains(&format!("```bash\n{cmd}\n```")), "{pm}");
            assert!(text.contains(&format!("```bash\n{pm} install\n```")));
        }
    }

    #[test]
    fn mongo_step_only_with_database() {
        let plain = ProjectConfig::builder("a").build().unwrap();
        let text = render(&plain, &resolve(&plain));
        assert!(!text.contains("MONGO_URI"));
        assert!(text.contains("2. Run the development server"));

        let db = ProjectConfig::builder("a").database(true).build().unwrap();
        let text = render(&db, &resolve(&db));
        assert!(text.contains("2. Copy `.env.example`"));
        assert!(text.contains("3. Run the development server"));
        assert!(text.contains("MongoDB Documentation"));
    }

    #[test]
    fn structure_lines_are_aligned() {
        let cfg = ProjectConfig::builder("a").build().unwrap();
        let text = structure(&cfg, &resolve(&cfg));
        assert!(text.contains("├── public/          # Static files"));
        assert!(text.contains("├── controllers/     # Request handlers"));
        assert!(text.ends_with("└── server.js        # Entry point"));
    }
}
