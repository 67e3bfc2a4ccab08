//! End-to-end generation with the real renderer, built-in templates and the
//! post-generation writers, against an in-memory filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use ngscaff_adapters::{
    FilesystemTemplateLoader, HandlebarsRenderer, InMemoryStore, KarmaConfigurator,
    MemoryFilesystem, ProcessInstaller, TemplateRouteGenerator,
};
use ngscaff_core::{
    application::{ApplicationError, services::ActionOutcome},
    prelude::*,
};

/// Registry that must never be reached: the version is preset and the
/// component loop is skipped when non-interactive.
struct OfflineRegistry;

#[async_trait]
impl RegistryClient for OfflineRegistry {
    async fn info(&self, name: &str) -> ScaffoldResult<PackageInfo> {
        Err(ApplicationError::Registry {
            package: name.into(),
            reason: "offline".into(),
        }
        .into())
    }

    async fn search(&self, _term: &str) -> ScaffoldResult<Vec<SearchHit>> {
        Ok(vec![])
    }
}

fn generator(fs: &MemoryFilesystem, store: InMemoryStore) -> Generator {
    let store = Arc::new(store);
    let renderer = Arc::new(HandlebarsRenderer::new());
    let filesystem = Arc::new(fs.clone());

    Generator::new(
        GeneratorPorts {
            registry: Arc::new(OfflineRegistry),
            prompter: Arc::new(DefaultAnswers),
            progress: Arc::new(NoProgress),
            store: store.clone(),
            renderer: renderer.clone(),
            filesystem: filesystem.clone(),
            installer: Arc::new(ProcessInstaller::new(vec![])),
            test_runner: Arc::new(KarmaConfigurator::new(
                store.clone(),
                renderer.clone(),
                filesystem.clone(),
            )),
            routes: Arc::new(TemplateRouteGenerator::new(store, renderer, filesystem)),
        },
        None,
    )
}

fn request(out: &Path, language: ScriptLanguage) -> GenerationRequest {
    GenerationRequest {
        app_name: "my-cool app".into(),
        app_suffix: "App".into(),
        app_path: "app".into(),
        output_dir: out.to_path_buf(),
        script_language: language,
        angular_version: Some("1.3.0".into()),
        options: GenerationOptions {
            skip_install: true,
            skip_message: false,
        },
        force: false,
    }
}

fn read(fs: &MemoryFilesystem, out: &Path, rel: &str) -> String {
    fs.contents(out.join(rel))
        .unwrap_or_else(|| panic!("{rel} was not written"))
}

#[tokio::test]
async fn defaults_generate_a_complete_javascript_project() {
    let fs = MemoryFilesystem::new();
    let out = PathBuf::from("/work/my-app");

    let outcome = generator(&fs, InMemoryStore::with_builtin().unwrap())
        .generate(request(&out, ScriptLanguage::JavaScript))
        .await
        .unwrap();

    assert_eq!(outcome.context.app_name(), "myCoolApp");
    assert!(outcome.warnings().is_empty(), "{:?}", outcome.warnings());

    let bower = read(&fs, &out, "bower.json");
    assert!(bower.contains(r#""name": "my-cool-app""#));
    assert!(bower.contains(r#""angular": "1.3.0""#));
    assert!(bower.contains(r#""angular-route": "1.3.0""#));
    assert!(bower.contains(r#""bootstrap": "~3.2.0""#));

    let app = read(&fs, &out, "app/scripts/app.js");
    assert!(app.contains(".module('myCoolAppApp', ["));
    assert!(app.contains("'ngRoute'"));
    assert!(app.contains(".when('/about', {"));

    assert!(!read(&fs, &out, "app/styles/main.css").is_empty());
    assert!(fs.contents(out.join("app/scripts/app.coffee")).is_none());

    let karma = read(&fs, &out, "test/karma.conf.js");
    assert!(karma.contains("'bower_components/angular-mocks/angular-mocks.js',"));
    assert!(karma.contains("'app/scripts/**/*.js',"));

    assert!(read(&fs, &out, "app/scripts/controllers/about.js").contains("AboutCtrl"));
    assert!(read(&fs, &out, "app/index.html").contains("scripts/controllers/about.js"));

    assert!(matches!(outcome.post.install, ActionOutcome::Skipped { .. }));
    assert!(matches!(outcome.post.route, ActionOutcome::Completed { .. }));
    assert!(matches!(outcome.post.test_runner, ActionOutcome::Completed { .. }));
}

#[tokio::test]
async fn coffee_projects_get_coffee_sources_and_route() {
    let fs = MemoryFilesystem::new();
    let out = PathBuf::from("/work/coffee");

    generator(&fs, InMemoryStore::with_builtin().unwrap())
        .generate(request(&out, ScriptLanguage::CoffeeScript))
        .await
        .unwrap();

    let app = read(&fs, &out, "app/scripts/app.coffee");
    assert!(app.contains(".when '/about',"));
    assert!(fs.contents(out.join("app/scripts/app.js")).is_none());
    assert!(read(&fs, &out, "test/karma.conf.coffee").contains("app/scripts/**/*.coffee"));
    assert!(fs.contents(out.join("app/scripts/controllers/about.coffee")).is_some());
}

#[tokio::test]
async fn local_override_replaces_the_builtin_app_set() {
    let temp = tempfile::TempDir::new().unwrap();
    let app_dir = temp.path().join("app");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(
        app_dir.join("template.toml"),
        "[template]\nid = \"app\"\ndescription = \"minimal\"\n",
    )
    .unwrap();
    std::fs::write(app_dir.join("README.md.hbs"), "# {{appname}}\n").unwrap();

    let store = InMemoryStore::with_builtin().unwrap();
    let loaded = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
    let applied = TemplateService::new(Arc::new(store.clone()))
        .apply_overrides(loaded)
        .unwrap();
    assert_eq!(applied, 1);

    let fs = MemoryFilesystem::new();
    let out = PathBuf::from("/work/custom");
    let mut req = request(&out, ScriptLanguage::JavaScript);
    req.app_name = "custom".into();
    let outcome = generator(&fs, store).generate(req).await.unwrap();

    assert_eq!(outcome.files_written, 1);
    assert_eq!(read(&fs, &out, "README.md"), "# custom\n");
    // The route writer needs app.js, which the override does not provide.
    assert!(outcome.post.route.is_failed());
}
