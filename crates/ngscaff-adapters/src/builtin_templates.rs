//! Built-in template sets.
//!
//! Three sets ship inside the binary:
//!
//! | id      | Used by                    | Renders                                   |
//! |---------|----------------------------|-------------------------------------------|
//! | `app`   | `ScaffoldService`          | the project skeleton                      |
//! | `karma` | [`KarmaConfigurator`]      | `test/karma.conf.{js,coffee}`             |
//! | `route` | [`TemplateRouteGenerator`] | controller, view and spec for one route   |
//!
//! Sources live under `templates/` next to this crate and are embedded with
//! `include_str!`. A directory passed to the template loader can replace any
//! of them by id.
//!
//! [`KarmaConfigurator`]: crate::test_runner::KarmaConfigurator
//! [`TemplateRouteGenerator`]: crate::route::TemplateRouteGenerator

use ngscaff_core::{
    application::services::APP_TEMPLATE,
    domain::{FileCondition, Preprocessor, ScriptLanguage, Template, TemplateFile},
};

pub const KARMA_TEMPLATE: &str = "karma";
pub const ROUTE_TEMPLATE: &str = "route";

const JS: FileCondition = FileCondition::Script(ScriptLanguage::JavaScript);
const COFFEE: FileCondition = FileCondition::Script(ScriptLanguage::CoffeeScript);

macro_rules! source {
    ($path:literal) => {
        include_str!(concat!("../templates/", $path))
    };
}

/// Every built-in template set.
pub fn all_templates() -> Vec<Template> {
    vec![app(), karma(), route()]
}

pub fn app() -> Template {
    Template::new(APP_TEMPLATE, "AngularJS application skeleton")
        .with_file(TemplateFile::new("bower.json", source!("app/bower.json.hbs")))
        .with_file(TemplateFile::new(".bowerrc", source!("app/bowerrc.hbs")))
        .with_file(TemplateFile::new("package.json", source!("app/package.json.hbs")))
        .with_file(TemplateFile::new("Gruntfile.js", source!("app/Gruntfile.js.hbs")))
        .with_file(TemplateFile::new(".gitignore", source!("app/gitignore.hbs")))
        .with_file(TemplateFile::new(
            "{{appPath}}/index.html",
            source!("app/index.html.hbs"),
        ))
        .with_file(
            TemplateFile::new("{{appPath}}/styles/main.css", source!("app/main.css.hbs"))
                .when(FileCondition::Style(Preprocessor::None)),
        )
        .with_file(
            TemplateFile::new("{{appPath}}/styles/main.scss", source!("app/main.scss.hbs"))
                .when(FileCondition::Style(Preprocessor::Compass)),
        )
        .with_file(
            TemplateFile::new("{{appPath}}/styles/main.less", source!("app/main.less.hbs"))
                .when(FileCondition::Style(Preprocessor::Less)),
        )
        .with_file(
            TemplateFile::new("{{appPath}}/scripts/app.js", source!("app/app.js.hbs")).when(JS),
        )
        .with_file(
            TemplateFile::new("{{appPath}}/scripts/app.coffee", source!("app/app.coffee.hbs"))
                .when(COFFEE),
        )
        .with_file(
            TemplateFile::new(
                "{{appPath}}/scripts/controllers/main.js",
                source!("app/main-controller.js.hbs"),
            )
            .when(JS),
        )
        .with_file(
            TemplateFile::new(
                "{{appPath}}/scripts/controllers/main.coffee",
                source!("app/main-controller.coffee.hbs"),
            )
            .when(COFFEE),
        )
        .with_file(TemplateFile::new(
            "{{appPath}}/views/main.html",
            source!("app/main.html.hbs"),
        ))
        .with_file(
            TemplateFile::new(
                "test/spec/controllers/main.js",
                source!("app/main-spec.js.hbs"),
            )
            .when(JS),
        )
        .with_file(
            TemplateFile::new(
                "test/spec/controllers/main.coffee",
                source!("app/main-spec.coffee.hbs"),
            )
            .when(COFFEE),
        )
}

pub fn karma() -> Template {
    Template::new(KARMA_TEMPLATE, "Karma test-runner configuration")
        .with_file(
            TemplateFile::new("test/karma.conf.js", source!("karma/karma.conf.js.hbs")).when(JS),
        )
        .with_file(
            TemplateFile::new(
                "test/karma.conf.coffee",
                source!("karma/karma.conf.coffee.hbs"),
            )
            .when(COFFEE),
        )
}

pub fn route() -> Template {
    Template::new(ROUTE_TEMPLATE, "Route controller, view and spec")
        .with_file(
            TemplateFile::new(
                "{{appPath}}/scripts/controllers/{{route}}.js",
                source!("route/controller.js.hbs"),
            )
            .when(JS),
        )
        .with_file(
            TemplateFile::new(
                "{{appPath}}/scripts/controllers/{{route}}.coffee",
                source!("route/controller.coffee.hbs"),
            )
            .when(COFFEE),
        )
        .with_file(TemplateFile::new(
            "{{appPath}}/views/{{route}}.html",
            source!("route/view.html.hbs"),
        ))
        .with_file(
            TemplateFile::new(
                "test/spec/controllers/{{route}}.js",
                source!("route/spec.js.hbs"),
            )
            .when(JS),
        )
        .with_file(
            TemplateFile::new(
                "test/spec/controllers/{{route}}.coffee",
                source!("route/spec.coffee.hbs"),
            )
            .when(COFFEE),
        )
}
