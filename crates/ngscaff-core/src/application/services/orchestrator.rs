//! Post-Generation Orchestrator.
//!
//! Runs three independent actions once the generation context is final:
//!
//! 1. test-runner configuration (manifest, globs, plugins)
//! 2. dependency installation, then reference injection into the main document
//! 3. the `about` route, only when the routing module is enabled
//!
//! The actions run concurrently via `tokio::join!` and every one is attempted
//! regardless of the others. Each outcome is collected into a
//! [`PostGenerationReport`]; nothing here aborts the generation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::ports::{
        DependencyInstaller, Filesystem, RouteGenerator, RouteRequest, TestRunnerConfigurator,
        TestRunnerOptions,
    },
    domain::{GenerationContext, ReferenceBlock, inject_references},
    error::{ScaffoldError, ScaffoldResult},
};

/// Route generated when the routing module is enabled.
pub const DEFAULT_ROUTE: &str = "about";

/// Printed when installation is skipped or fails.
pub const MANUAL_INSTALL_HINT: &str = "After running `npm install & bower install`, inject your front end dependencies\n\
     into your source code by running:\n\n    grunt wiredep";

/// Result of one post-generation action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Completed { detail: String },
    Skipped { reason: String },
    Failed {
        error: ScaffoldError,
        fallback: Option<String>,
    },
}

impl ActionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostGenerationReport {
    pub test_runner: ActionOutcome,
    pub install: ActionOutcome,
    pub route: ActionOutcome,
    /// Messages for the user that are not failures (manual next steps).
    pub notices: Vec<String>,
}

impl PostGenerationReport {
    /// One warning line per failed action, with its fallback if any.
    pub fn warnings(&self) -> Vec<String> {
        [
            ("test runner", &self.test_runner),
            ("install", &self.install),
            ("route", &self.route),
        ]
        .into_iter()
        .filter_map(|(name, outcome)| match outcome {
            ActionOutcome::Failed { error, fallback } => Some(match fallback {
                Some(f) => format!("{name}: {error}\n{f}"),
                None => format!("{name}: {error}"),
            }),
            _ => None,
        })
        .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.test_runner.is_failed() || self.install.is_failed() || self.route.is_failed()
    }
}

pub struct PostGenerationOrchestrator {
    test_runner: Arc<dyn TestRunnerConfigurator>,
    installer: Arc<dyn DependencyInstaller>,
    routes: Arc<dyn RouteGenerator>,
    filesystem: Arc<dyn Filesystem>,
}

impl PostGenerationOrchestrator {
    pub fn new(
        test_runner: Arc<dyn TestRunnerConfigurator>,
        installer: Arc<dyn DependencyInstaller>,
        routes: Arc<dyn RouteGenerator>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            test_runner,
            installer,
            routes,
            filesystem,
        }
    }

    #[instrument(skip_all, fields(root = %ctx.output_dir().display()))]
    pub async fn run(&self, ctx: &GenerationContext) -> PostGenerationReport {
        let (test_runner, (install, notices), route) = tokio::join!(
            self.configure_test_runner(ctx),
            self.install_dependencies(ctx),
            self.generate_route(ctx),
        );

        let report = PostGenerationReport {
            test_runner,
            install,
            route,
            notices,
        };
        for warning in report.warnings() {
            warn!(%warning, "post-generation action failed");
        }
        info!(failures = report.has_failures(), "post-generation finished");
        report
    }

    async fn configure_test_runner(&self, ctx: &GenerationContext) -> ActionOutcome {
        let options = TestRunnerOptions::from_context(ctx);
        info!(manifest = %options.manifest, "configuring test runner");
        match self.test_runner.configure(ctx.output_dir(), &options).await {
            Ok(path) => ActionOutcome::Completed {
                detail: format!("wrote {}", path.display()),
            },
            Err(error) => ActionOutcome::Failed {
                error,
                fallback: None,
            },
        }
    }

    async fn install_dependencies(&self, ctx: &GenerationContext) -> (ActionOutcome, Vec<String>) {
        let options = ctx.options();
        if options.skip_install {
            info!("dependency installation skipped");
            return (
                ActionOutcome::Skipped {
                    reason: "--skip-install".into(),
                },
                vec![MANUAL_INSTALL_HINT.to_string()],
            );
        }

        info!("installing dependencies");
        if let Err(error) = self.installer.install(ctx.output_dir()).await {
            return (
                ActionOutcome::Failed {
                    error,
                    fallback: Some(MANUAL_INSTALL_HINT.to_string()),
                },
                vec![],
            );
        }

        let mut notices = Vec::new();
        if !options.skip_message {
            notices.push("Dependencies installed with npm and bower.".to_string());
        }

        match self.inject(ctx) {
            Ok(path) => (
                ActionOutcome::Completed {
                    detail: format!("installed, references injected into {}", path.display()),
                },
                notices,
            ),
            Err(error) => (
                ActionOutcome::Failed {
                    error,
                    fallback: Some("Inject references manually with `grunt wiredep`".into()),
                },
                notices,
            ),
        }
    }

    /// Rewrite the marker blocks of the main document. The read and write
    /// happen without a suspension point in between.
    fn inject(&self, ctx: &GenerationContext) -> ScaffoldResult<PathBuf> {
        let index = ctx.output_dir().join(ctx.app_path()).join("index.html");
        let refs = ctx.asset_references();

        let document = self.filesystem.read_file(&index)?;
        let document = inject_references(&document, ReferenceBlock::Css, &refs.css)?;
        let document = inject_references(&document, ReferenceBlock::Js, &refs.js)?;
        self.filesystem.write_file(&index, &document)?;

        info!(css = refs.css.len(), js = refs.js.len(), "references injected");
        Ok(index)
    }

    async fn generate_route(&self, ctx: &GenerationContext) -> ActionOutcome {
        if !ctx.selection().route_enabled() {
            return ActionOutcome::Skipped {
                reason: "routing module not selected".into(),
            };
        }

        let request = RouteRequest {
            name: DEFAULT_ROUTE.into(),
            app_path: ctx.app_path().into(),
            script_app_name: ctx.script_app_name().into(),
            script_language: ctx.selection().script_language(),
        };
        info!(route = DEFAULT_ROUTE, "generating route");
        match self.routes.generate(ctx.output_dir(), &request).await {
            Ok(()) => ActionOutcome::Completed {
                detail: format!("route '{DEFAULT_ROUTE}' generated"),
            },
            Err(error) => ActionOutcome::Failed {
                error,
                fallback: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{
            MockDependencyInstaller, MockFilesystem, MockRouteGenerator,
            MockTestRunnerConfigurator,
        },
    };
    use crate::domain::{AngularModule, FeatureSelection, GenerationOptions};
    use std::sync::Mutex;

    const INDEX: &str = "<head>\n  <!-- bower:css -->\n  <!-- endbower -->\n</head>\n<body>\n  <!-- bower:js -->\n  <!-- endbower -->\n</body>\n";

    fn ctx(route: bool, options: GenerationOptions) -> GenerationContext {
        let mut builder = FeatureSelection::builder()
            .angular_version("1.3.0")
            .module(AngularModule::Animate);
        if route {
            builder = builder.module(AngularModule::Route);
        }
        let selection = builder.build().unwrap();
        let injection = selection.injection();
        GenerationContext::new(
            "myApp",
            "myAppApp",
            "app",
            "/tmp/out",
            selection,
            injection,
            vec![],
            options,
        )
    }

    fn ok_test_runner() -> MockTestRunnerConfigurator {
        let mut m = MockTestRunnerConfigurator::new();
        m.expect_configure()
            .returning(|root, _| Ok(root.join("test/karma.conf.js")));
        m
    }

    fn memory_fs(written: Arc<Mutex<Option<String>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file().returning(|_| Ok(INDEX.to_string()));
        fs.expect_write_file().returning(move |_, content| {
            *written.lock().unwrap() = Some(content.to_string());
            Ok(())
        });
        fs
    }

    fn orchestrator(
        test_runner: MockTestRunnerConfigurator,
        installer: MockDependencyInstaller,
        routes: MockRouteGenerator,
        fs: MockFilesystem,
    ) -> PostGenerationOrchestrator {
        PostGenerationOrchestrator::new(
            Arc::new(test_runner),
            Arc::new(installer),
            Arc::new(routes),
            Arc::new(fs),
        )
    }

    #[tokio::test]
    async fn route_generator_not_invoked_without_route_module() {
        let mut routes = MockRouteGenerator::new();
        routes.expect_generate().never();
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().never();

        let report = orchestrator(ok_test_runner(), installer, routes, MockFilesystem::new())
            .run(&ctx(
                false,
                GenerationOptions {
                    skip_install: true,
                    skip_message: false,
                },
            ))
            .await;

        assert!(report.route.is_skipped());
        assert!(report.install.is_skipped());
        assert_eq!(report.notices, vec![MANUAL_INSTALL_HINT.to_string()]);
    }

    #[tokio::test]
    async fn route_generator_gets_about() {
        let mut routes = MockRouteGenerator::new();
        routes
            .expect_generate()
            .withf(|_, req| req.name == "about" && req.script_app_name == "myAppApp")
            .times(1)
            .returning(|_, _| Ok(()));
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().never();

        let report = orchestrator(ok_test_runner(), installer, routes, MockFilesystem::new())
            .run(&ctx(
                true,
                GenerationOptions {
                    skip_install: true,
                    skip_message: true,
                },
            ))
            .await;

        assert!(matches!(report.route, ActionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn test_runner_receives_manifest() {
        let mut test_runner = MockTestRunnerConfigurator::new();
        test_runner
            .expect_configure()
            .withf(|_, opts| {
                opts.manifest
                    == "angular/angular.js,angular-mocks/angular-mocks.js,angular-animate/angular-animate.js"
                    && opts.app_files == "app/scripts/**/*.js"
                    && opts.base_path == "../"
            })
            .times(1)
            .returning(|root, _| Ok(root.join("test/karma.conf.js")));
        let mut routes = MockRouteGenerator::new();
        routes.expect_generate().never();

        let report = orchestrator(
            test_runner,
            MockDependencyInstaller::new(),
            routes,
            MockFilesystem::new(),
        )
        .run(&ctx(
            false,
            GenerationOptions {
                skip_install: true,
                skip_message: false,
            },
        ))
        .await;

        assert!(matches!(report.test_runner, ActionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn install_failure_does_not_stop_other_actions() {
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().times(1).returning(|_| {
            Err(ApplicationError::InstallFailed {
                reason: "npm exited with 1".into(),
            }
            .into())
        });
        let mut routes = MockRouteGenerator::new();
        routes.expect_generate().times(1).returning(|_, _| Ok(()));

        let report = orchestrator(ok_test_runner(), installer, routes, MockFilesystem::new())
            .run(&ctx(true, GenerationOptions::default()))
            .await;

        assert!(report.install.is_failed());
        assert!(matches!(report.test_runner, ActionOutcome::Completed { .. }));
        assert!(matches!(report.route, ActionOutcome::Completed { .. }));
        let warnings = report.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("grunt wiredep"));
    }

    #[tokio::test]
    async fn test_runner_failure_is_isolated() {
        let mut test_runner = MockTestRunnerConfigurator::new();
        test_runner.expect_configure().returning(|_, _| {
            Err(ApplicationError::TestRunnerFailed {
                reason: "template missing".into(),
            }
            .into())
        });
        let mut routes = MockRouteGenerator::new();
        routes.expect_generate().times(1).returning(|_, _| Ok(()));

        let report = orchestrator(
            test_runner,
            MockDependencyInstaller::new(),
            routes,
            MockFilesystem::new(),
        )
        .run(&ctx(
            true,
            GenerationOptions {
                skip_install: true,
                skip_message: false,
            },
        ))
        .await;

        assert!(report.test_runner.is_failed());
        assert!(matches!(report.route, ActionOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn successful_install_injects_references() {
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().times(1).returning(|_| Ok(()));
        let mut routes = MockRouteGenerator::new();
        routes.expect_generate().never();
        let written = Arc::new(Mutex::new(None));

        let report = orchestrator(
            ok_test_runner(),
            installer,
            routes,
            memory_fs(written.clone()),
        )
        .run(&ctx(false, GenerationOptions::default()))
        .await;

        assert!(matches!(report.install, ActionOutcome::Completed { .. }));
        let html = written.lock().unwrap().clone().unwrap();
        assert!(html.contains(r#"<script src="bower_components/angular/angular.js"></script>"#));
        assert!(html.contains(
            r#"<script src="bower_components/angular-animate/angular-animate.js"></script>"#
        ));
        assert_eq!(report.notices.len(), 1);
    }
}
