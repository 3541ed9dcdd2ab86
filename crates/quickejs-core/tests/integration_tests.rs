//! Integration tests for quickejs-core.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use quickejs_core::application::{ApplicationError, ports::*};
use quickejs_core::domain::{
    DeployTarget, PackageManager, ProjectConfig, ProjectPlan, ProjectTree, TemplateKind, compose,
    resolve,
};
use quickejs_core::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn config(
    template: TemplateKind,
    routes: bool,
    controllers: bool,
    db: bool,
    auth: bool,
) -> ProjectConfig {
    ProjectConfig::builder("test-app")
        .template(template)
        .routes(routes)
        .controllers(controllers)
        .database(db)
        .auth(auth)
        .package_manager(PackageManager::Npm)
        .build()
        .unwrap()
}

fn tree(config: &ProjectConfig) -> ProjectTree {
    compose(config, &resolve(config)).unwrap()
}

/// Every configuration the flags can express.
fn all_configs() -> Vec<ProjectConfig> {
    let mut out = Vec::new();
    for template in [TemplateKind::DynamicView, TemplateKind::StaticHtml] {
        for bits in 0..16u8 {
            for pm in PackageManager::ALL {
                for deploy in [None, Some(DeployTarget::Vercel)] {
                    out.push(
                        ProjectConfig::builder("matrix")
                            .template(template)
                            .routes(bits & 1 != 0)
                            .controllers(bits & 2 != 0)
                            .database(bits & 4 != 0)
                            .auth(bits & 8 != 0)
                            .package_manager(pm)
                            .deploy_target(deploy)
                            .build()
                            .unwrap(),
                    );
                }
            }
        }
    }
    out
}

fn manifest_deps(tree: &ProjectTree, key: &str) -> Vec<String> {
    let manifest: serde_json::Value =
        serde_json::from_str(tree.file("package.json").unwrap()).unwrap();
    manifest[key]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect()
}

/// Relative module specifiers imported by a JS file.
fn local_imports(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|line| line.starts_with("import "))
        .filter_map(|line| {
            let start = line.find(" from '")? + " from '".len();
            let rest = &line[start..];
            let specifier = &rest[..rest.find('\'')?];
            specifier.starts_with('.').then_some(specifier)
        })
        .collect()
}

fn resolve_import(importer: &str, specifier: &str) -> String {
    let mut parts: Vec<&str> = importer.split('/').collect();
    parts.pop();
    for segment in specifier.split('/') {
        match segment {
            "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `ident` appears as a code identifier (not inside a path or string).
fn uses_identifier(line: &str, ident: &str) -> bool {
    line.match_indices(ident).any(|(i, _)| {
        let before = line[..i].chars().next_back();
        let after = line[i + ident.len()..].chars().next();
        !before.is_some_and(|c| is_word_char(c) || c == '\'' || c == '/')
            && !after.is_some_and(is_word_char)
    })
}

fn defines(content: &str, ident: &str) -> bool {
    content.lines().any(|line| {
        (line.starts_with("import ") && uses_identifier(line, ident))
            || line.contains(&format!("const {ident} ="))
    })
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_ejs_with_routes_and_controllers() {
    let tree = tree(&config(TemplateKind::DynamicView, true, true, false, false));

    for path in [
        "views/index.ejs",
        "views/error.ejs",
        "views/partials/header.ejs",
        "views/partials/footer.ejs",
        "routes/index.js",
        "controllers/homeController.js",
    ] {
        assert!(tree.contains_file(path), "missing {path}");
    }
    for dir in ["models", "config", "middleware"] {
        assert!(tree.get(dir).is_none(), "unexpected {dir}");
    }
    assert_eq!(manifest_deps(&tree, "dependencies"), ["express", "dotenv", "ejs"]);
}

#[test]
fn scenario_b_static_without_routing() {
    let tree = tree(&config(TemplateKind::StaticHtml, false, false, false, false));

    assert!(tree.get("views").is_none());
    assert!(tree.get("routes").is_none());
    let home = tree.file("public/index.html").unwrap();
    assert!(home.contains("<title>test-app</title>"));

    let server = tree.file("server.js").unwrap();
    assert!(server.contains("app.get('/', (req, res) => {"));
    assert!(server.contains("res.sendFile(path.join(__dirname, 'public', 'index.html'));"));
    assert_eq!(manifest_deps(&tree, "dependencies"), ["express", "dotenv"]);
}

#[test]
fn scenario_c_everything_enabled() {
    let tree = tree(&config(TemplateKind::DynamicView, true, true, true, true));

    let model = tree.file("models/User.js").unwrap();
    assert!(model.contains("getSignedJwtToken"));
    assert!(tree.contains_file("config/db.js"));
    assert!(tree.contains_file("middleware/auth.js"));
    assert!(tree.contains_file("views/auth/login.ejs"));
    assert!(tree.contains_file("views/auth/register.ejs"));

    let auth = tree.file("routes/auth.js").unwrap();
    for endpoint in [
        "router.get('/login'",
        "router.get('/register'",
        "router.post('/register', register);",
        "router.post('/login', login);",
        "router.get('/me', protect, getMe);",
    ] {
        assert!(auth.contains(endpoint), "missing {endpoint}");
    }

    assert_eq!(
        manifest_deps(&tree, "dependencies"),
        ["express", "dotenv", "ejs", "mongoose", "bcryptjs", "jsonwebtoken"]
    );
    assert_eq!(manifest_deps(&tree, "devDependencies"), ["nodemon"]);
}

// ============================================================================
// Properties over every configuration
// ============================================================================

#[test]
fn every_configuration_composes_cleanly() {
    for config in all_configs() {
        let tree = compose(&config, &resolve(&config))
            .unwrap_or_else(|e| panic!("{config}: {e}"));
        for (path, content) in tree.files() {
            assert!(!content.contains("{{"), "{config}: unresolved slot in {path}");
        }
    }
}

#[test]
fn every_relative_import_points_into_the_tree() {
    for config in all_configs() {
        let tree = tree(&config);
        for (path, content) in tree.files() {
            if !path.ends_with(".js") || path.starts_with("public/") {
                continue;
            }
            for specifier in local_imports(content) {
                let target = resolve_import(&path, specifier);
                assert!(
                    tree.contains_file(&target),
                    "{config}: {path} imports {specifier} but {target} is missing"
                );
            }
        }
    }
}

#[test]
fn every_used_binding_is_defined() {
    let idents = [
        "protect",
        "User",
        "getMe",
        "getHome",
        "connectDB",
        "indexRouter",
        "authRouter",
        "jwt",
        "bcrypt",
        "mongoose",
        "register",
        "login",
        "fileURLToPath",
    ];
    for config in all_configs() {
        let tree = tree(&config);
        for (path, content) in tree.files() {
            if !path.ends_with(".js") || path.starts_with("public/") {
                continue;
            }
            for ident in idents {
                let used = content
                    .lines()
                    .filter(|line| !line.starts_with("import "))
                    .any(|line| uses_identifier(line, ident));
                if used {
                    assert!(
                        defines(content, ident),
                        "{config}: {path} uses {ident} without defining it"
                    );
                }
            }
        }
    }
}

#[test]
fn views_and_static_home_are_exclusive() {
    for config in all_configs() {
        let tree = tree(&config);
        let views = tree.contains_file("views/index.ejs");
        let static_home = tree.contains_file("public/index.html");
        assert!(views ^ static_home, "{config}");
        assert_eq!(views, config.template() == TemplateKind::DynamicView);
    }
}

#[test]
fn router_wiring_and_inline_handler_are_exclusive() {
    for config in all_configs() {
        let server = tree(&config).file("server.js").unwrap().to_string();
        let routers = server.contains("app.use('/', indexRouter);");
        let inline = server.contains("app.get('/',");
        assert!(routers ^ inline, "{config}");
        assert_eq!(routers, config.use_routes());
    }
}

#[test]
fn auth_handlers_exist_once_and_are_mounted() {
    for config in all_configs() {
        let tree = tree(&config);
        let homes: Vec<String> = tree
            .files()
            .into_iter()
            .filter(|(_, content)| content.contains("const register = async"))
            .map(|(path, _)| path)
            .collect();

        if !config.use_auth() {
            assert!(homes.is_empty(), "{config}: {homes:?}");
            continue;
        }
        assert_eq!(homes.len(), 1, "{config}: {homes:?}");

        let mounted = tree
            .files()
            .into_iter()
            .any(|(_, content)| content.contains("/me', protect, getMe)"));
        assert!(mounted, "{config}: /me not mounted");

        if homes[0] == "controllers/authController.js" {
            let importer = if config.use_routes() {
                "routes/auth.js"
            } else {
                "server.js"
            };
            assert!(
                tree.file(importer).unwrap().contains("controllers/authController.js"),
                "{config}: controller not imported by {importer}"
            );
        }
    }
}

#[test]
fn manifest_dependencies_match_resolver_order() {
    for config in all_configs() {
        let facts = resolve(&config);
        let tree = tree(&config);
        assert_eq!(manifest_deps(&tree, "dependencies"), facts.dependencies);
        assert_eq!(manifest_deps(&tree, "devDependencies"), facts.dev_dependencies);
    }
}

#[test]
fn readme_structure_lists_exactly_the_layout_dirs() {
    let all_dirs = ["views", "routes", "controllers", "models", "config", "middleware"];
    for config in all_configs() {
        let facts = resolve(&config);
        let tree = tree(&config);
        let readme = tree.file("README.md").unwrap();
        let listed: BTreeSet<&str> = all_dirs
            .iter()
            .copied()
            .filter(|dir| readme.contains(&format!("├── {dir}/")))
            .collect();
        let expected: BTreeSet<&str> = facts.layout.enabled().into_iter().collect();
        assert_eq!(listed, expected, "{config}");
        for dir in &expected {
            assert!(tree.contains_dir(dir), "{config}: {dir} listed but absent");
        }
    }
}

#[test]
fn composition_is_deterministic() {
    for config in all_configs() {
        assert_eq!(tree(&config), tree(&config));
    }
}

#[test]
fn auth_without_database_matches_plain_config() {
    let with_auth = ProjectConfig::builder("x").database(false).auth(true).build().unwrap();
    let without = ProjectConfig::builder("x").database(false).auth(false).build().unwrap();
    assert_eq!(resolve(&with_auth), resolve(&without));
    assert_eq!(tree(&with_auth), tree(&without));
}

#[test]
fn entry_file_name_is_consistent() {
    let tree = tree(&config(TemplateKind::DynamicView, true, true, false, false));
    let manifest: serde_json::Value =
        serde_json::from_str(tree.file("package.json").unwrap()).unwrap();
    assert_eq!(manifest["main"], "server.js");
    assert_eq!(manifest["scripts"]["start"], "node server.js");
    assert!(tree.file("README.md").unwrap().contains("└── server.js"));
    assert!(tree.file("vercel.json").unwrap().contains("\"src\": \"server.js\""));
}

// ============================================================================
// Service against an in-memory filesystem
// ============================================================================

#[derive(Clone, Default)]
struct RecordingFs {
    ops: Arc<Mutex<Vec<String>>>,
    existing: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> QuickResult<()> {
        self.ops.lock().unwrap().push(format!("mkdir {}", path.display()));
        self.existing.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, _content: &str) -> QuickResult<()> {
        self.ops.lock().unwrap().push(format!("write {}", path.display()));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.existing.lock().unwrap().contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> QuickResult<()> {
        self.ops.lock().unwrap().push(format!("rm {}", path.display()));
        Ok(())
    }
}

struct NoInstall;

impl PackageInstaller for NoInstall {
    fn run(&self, _command: &InstallCommand, _project_dir: &Path) -> QuickResult<()> {
        Ok(())
    }
}

#[test]
fn existing_target_fails_before_any_write() {
    let fs = RecordingFs::default();
    fs.existing.lock().unwrap().insert(PathBuf::from("/work/test-app"));

    let service = ScaffoldService::new(Box::new(fs.clone()), Box::new(NoInstall));
    let err = service
        .scaffold(
            config(TemplateKind::DynamicView, true, true, false, false),
            Path::new("/work"),
            true,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        QuickError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(err.phase(), Phase::Generation);
    assert!(fs.ops.lock().unwrap().is_empty());
}

#[test]
fn parents_are_created_before_children() {
    let fs = RecordingFs::default();
    let service = ScaffoldService::new(Box::new(fs.clone()), Box::new(NoInstall));
    let plan = ProjectPlan::build(config(TemplateKind::DynamicView, true, true, true, true)).unwrap();
    service.generate(&plan, Path::new("/work")).unwrap();

    let ops = fs.ops.lock().unwrap();
    assert_eq!(ops[0], "mkdir /work/test-app");
    let position = |op: &str| ops.iter().position(|o| o == op).unwrap();
    assert!(position("mkdir /work/test-app/views") < position("write /work/test-app/views/index.ejs"));
    assert!(
        position("mkdir /work/test-app/views/partials")
            < position("write /work/test-app/views/partials/footer.ejs")
    );
}
