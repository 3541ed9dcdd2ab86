use crate::domain::{
    catalog::{Fragment, RenderContext},
    entities::{ProjectConfig, ProjectTree},
    error::DomainError,
    value_objects::TemplateKind,
};

/// `public/` assets present in every project.
pub(super) fn add_static_assets(tree: &mut ProjectTree) -> Result<(), DomainError> {
    let ctx = RenderContext::empty();
    tree.add_file("public/css/style.css", Fragment::Stylesheet.render(&ctx))?;
    tree.add_file("public/js/app.js", Fragment::ClientScript.render(&ctx))?;
    tree.add_dir("public/assets/images")?;
    tree.add_dir("public/assets/fonts")?;
    Ok(())
}

/// Home, error and auth pages for the selected template kind.
pub(super) fn add_pages(tree: &mut ProjectTree, config: &ProjectConfig) -> Result<(), DomainError> {
    let ctx = RenderContext::new(config.project_name().as_str());
    match config.template() {
        TemplateKind::DynamicView => {
            tree.add_file("views/index.ejs", Fragment::IndexView.render(&ctx))?;
            tree.add_file("views/error.ejs", Fragment::ErrorView.render(&ctx))?;
            tree.add_file("views/partials/header.ejs", Fragment::HeaderPartial.render(&ctx))?;
            tree.add_file("views/partials/footer.ejs", Fragment::FooterPartial.render(&ctx))?;
            if config.use_auth() {
                tree.add_file("views/auth/login.ejs", Fragment::LoginPage.render(&ctx))?;
                tree.add_file("views/auth/register.ejs", Fragment::RegisterPage.render(&ctx))?;
            }
        }
        TemplateKind::StaticHtml => {
            tree.add_file("public/index.html", Fragment::StaticIndex.render(&ctx))?;
            if config.use_auth() {
                tree.add_file("public/auth/login.html", Fragment::LoginPage.render(&ctx))?;
                tree.add_file("public/auth/register.html", Fragment::RegisterPage.render(&ctx))?;
            }
        }
    }
    Ok(())
}
