//! Prompt Sequencer - ordered, conditional questions.
//!
//! Steps are declared in [`STEPS`], each paired with a predicate over the
//! answers collected so far. The sequencer walks the table once, in order,
//! skipping steps whose predicate is false.
//!
//! The extra-component step is an explicit state machine:
//!
//! ```text
//!            yes                 hits
//!   Idle ──────────▶ Searching ────────▶ ShowingResults
//!    ▲ │ no            │  ▲  │ empty term     │ │ │
//!    │ ▼               │  │  ▼                │ │ └─ "Abort" ──▶ Aborted
//!   Done   not found ──┘  └──── "Search again" ┘ │
//!    ▲                                           │
//!    └──────────── Idle ◀── pick (appended) ─────┘
//! ```
//!
//! A search with no results reports "not found" and asks for a new term
//! without touching the collected names.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ProgressIndicator, Prompter, RegistryClient},
    },
    domain::{AngularModule, ExtraComponentRequest, Preprocessor, SearchHit},
    error::ScaffoldResult,
};

/// Framework package queried for the version list.
pub const FRAMEWORK_PACKAGE: &str = "angular";

/// Question texts, shared with test prompters.
pub mod questions {
    pub const VERSION: &str = "Choose angular version:";
    pub const PREPROCESSOR: &str =
        "Would you like to use a CSS preprocessor like Sass (with Compass) or Less?";
    pub const BOOTSTRAP: &str = "Would you like to include Bootstrap?";
    pub const COMPASS_BOOTSTRAP: &str = "Would you like to use the Sass version of Bootstrap?";
    pub const LESS_BOOTSTRAP: &str = "Would you like to use the Less version of Bootstrap?";
    pub const MODULES: &str = "Which components would you like to include?";
    pub const ADD_MORE: &str = "Would you like to add some more bower components?";
    pub const SEARCH_TERM: &str = "Bower component name:";
    pub const SEARCH_AGAIN: &str = "Search again";
    pub const ABORT: &str = "Abort";

    pub fn found(count: usize) -> String {
        format!("Found bower components ({count}):")
    }

    pub fn not_found(term: &str) -> String {
        format!("bower module \"{term}\" doesn't exist.")
    }
}

// ── Answers ──────────────────────────────────────────────────────────────────

/// Raw answers, before resolution into a `FeatureSelection`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub angular_version: Option<String>,
    pub preprocessor: Preprocessor,
    /// Dependency markers added by the preprocessor step.
    pub node_modules: Vec<&'static str>,
    pub bootstrap: bool,
    /// `None` when the question was not asked.
    pub compass_bootstrap: Option<bool>,
    pub less_bootstrap: Option<bool>,
    /// Checked modules, in checklist order.
    pub modules: Vec<AngularModule>,
    pub extra_components: ExtraComponentRequest,
}

/// Pre-answered questions.
#[derive(Debug, Clone, Default)]
pub struct PromptPreset {
    pub angular_version: Option<String>,
}

/// Running state the step predicates look at.
#[derive(Debug, Clone)]
pub struct PromptState {
    pub answers: Answers,
    pub interactive: bool,
}

// ── Step table ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AngularVersion,
    Preprocessor,
    Bootstrap,
    CompassBootstrap,
    LessBootstrap,
    Modules,
    ExtraComponents,
}

pub struct StepSpec {
    pub step: Step,
    pub when: fn(&PromptState) -> bool,
}

pub const STEPS: &[StepSpec] = &[
    StepSpec {
        step: Step::AngularVersion,
        when: version_not_preset,
    },
    StepSpec {
        step: Step::Preprocessor,
        when: always,
    },
    StepSpec {
        step: Step::Bootstrap,
        when: always,
    },
    StepSpec {
        step: Step::CompassBootstrap,
        when: wants_compass_variant,
    },
    StepSpec {
        step: Step::LessBootstrap,
        when: wants_less_variant,
    },
    StepSpec {
        step: Step::Modules,
        when: always,
    },
    StepSpec {
        step: Step::ExtraComponents,
        when: interactive,
    },
];

fn always(_: &PromptState) -> bool {
    true
}

fn version_not_preset(state: &PromptState) -> bool {
    state.answers.angular_version.is_none()
}

fn wants_compass_variant(state: &PromptState) -> bool {
    state.answers.bootstrap && state.answers.node_modules.contains(&"compass")
}

fn wants_less_variant(state: &PromptState) -> bool {
    state.answers.bootstrap && state.answers.node_modules.contains(&"less")
}

fn interactive(state: &PromptState) -> bool {
    state.interactive
}

// ── Component loop ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Searching,
    ShowingResults(Vec<SearchHit>),
    Aborted,
    Done,
}

// ── Sequencer ────────────────────────────────────────────────────────────────

pub struct PromptSequencer {
    registry: Arc<dyn RegistryClient>,
    prompter: Arc<dyn Prompter>,
    progress: Arc<dyn ProgressIndicator>,
}

impl PromptSequencer {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        prompter: Arc<dyn Prompter>,
        progress: Arc<dyn ProgressIndicator>,
    ) -> Self {
        Self {
            registry,
            prompter,
            progress,
        }
    }

    /// Run every applicable step and return the collected answers.
    #[instrument(skip_all, fields(preset_version = preset.angular_version.as_deref()))]
    pub async fn run(&self, preset: PromptPreset) -> ScaffoldResult<Answers> {
        let mut state = PromptState {
            answers: Answers {
                angular_version: preset.angular_version,
                ..Answers::default()
            },
            interactive: self.prompter.is_interactive(),
        };

        for spec in STEPS {
            if !(spec.when)(&state) {
                debug!(step = ?spec.step, "step skipped");
                continue;
            }
            debug!(step = ?spec.step, "asking");
            self.ask(spec.step, &mut state).await?;
        }

        info!(
            preprocessor = %state.answers.preprocessor,
            bootstrap = state.answers.bootstrap,
            modules = state.answers.modules.len(),
            extra = state.answers.extra_components.len(),
            "prompts completed"
        );
        Ok(state.answers)
    }

    async fn ask(&self, step: Step, state: &mut PromptState) -> ScaffoldResult<()> {
        let answers = &mut state.answers;
        match step {
            Step::AngularVersion => {
                answers.angular_version = Some(self.ask_version().await?);
            }
            Step::Preprocessor => {
                let labels: Vec<String> = Preprocessor::ALL
                    .iter()
                    .map(|p| p.label().to_string())
                    .collect();
                let idx = self.prompter.select(questions::PREPROCESSOR, &labels, 0)?;
                let preprocessor = pick(&Preprocessor::ALL, idx)?;
                answers.preprocessor = preprocessor;
                answers.node_modules.extend(preprocessor.node_module());
            }
            Step::Bootstrap => {
                answers.bootstrap = self.prompter.confirm(questions::BOOTSTRAP, true)?;
            }
            Step::CompassBootstrap => {
                answers.compass_bootstrap =
                    Some(self.prompter.confirm(questions::COMPASS_BOOTSTRAP, true)?);
            }
            Step::LessBootstrap => {
                answers.less_bootstrap =
                    Some(self.prompter.confirm(questions::LESS_BOOTSTRAP, true)?);
            }
            Step::Modules => {
                let labels: Vec<String> = AngularModule::ALL
                    .iter()
                    .map(|m| format!("{} {}", m.package(), m.description()))
                    .collect();
                let defaults = vec![true; labels.len()];
                let checked = self
                    .prompter
                    .multi_select(questions::MODULES, &labels, &defaults)?;
                answers.modules = checked
                    .into_iter()
                    .map(|i| pick(&AngularModule::ALL, i))
                    .collect::<ScaffoldResult<_>>()?;
            }
            Step::ExtraComponents => {
                self.component_loop(&mut answers.extra_components).await?;
            }
        }
        Ok(())
    }

    async fn ask_version(&self) -> ScaffoldResult<String> {
        let info = {
            let _progress = self.progress.start("Fetching AngularJS versions");
            self.registry.info(FRAMEWORK_PACKAGE).await?
        };

        let versions = info.selectable_versions();
        let labels: Vec<String> = versions
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == 0 {
                    format!("Latest AngularJS version: {v}")
                } else {
                    v.clone()
                }
            })
            .collect();

        let idx = self.prompter.select(questions::VERSION, &labels, 0)?;
        pick(&versions, idx)
    }

    /// Collect extra component names until the user declines or aborts.
    pub async fn component_loop(&self, request: &mut ExtraComponentRequest) -> ScaffoldResult<()> {
        let mut state = LoopState::Idle;
        loop {
            state = match state {
                LoopState::Idle => {
                    if self.prompter.confirm(questions::ADD_MORE, true)? {
                        LoopState::Searching
                    } else {
                        LoopState::Done
                    }
                }
                LoopState::Searching => self.search_step().await?,
                LoopState::ShowingResults(hits) => {
                    let mut items = vec![
                        questions::SEARCH_AGAIN.to_string(),
                        questions::ABORT.to_string(),
                    ];
                    items.extend(hits.iter().map(|h| format!("{} {}", h.name, h.url)));

                    match self
                        .prompter
                        .select(&questions::found(hits.len()), &items, 0)?
                    {
                        0 => LoopState::Searching,
                        1 => LoopState::Aborted,
                        i => {
                            let hit = pick(&hits, i - 2)?;
                            info!(component = %hit.name, "component added");
                            request.push(hit.name);
                            LoopState::Idle
                        }
                    }
                }
                LoopState::Aborted => {
                    debug!(collected = request.len(), "component loop aborted");
                    return Ok(());
                }
                LoopState::Done => {
                    debug!(collected = request.len(), "component loop finished");
                    return Ok(());
                }
            };
        }
    }

    async fn search_step(&self) -> ScaffoldResult<LoopState> {
        let term = self.prompter.input(questions::SEARCH_TERM)?;
        let term = term.trim();
        if term.is_empty() {
            return Ok(LoopState::Idle);
        }

        let result = {
            let _progress = self.progress.start("Searching");
            self.registry.search(term).await
        };

        Ok(match result {
            Ok(hits) if hits.is_empty() => {
                let not_found = ApplicationError::NotFound { term: term.into() };
                debug!(error = %not_found, "search returned no results");
                self.prompter.notice(&questions::not_found(term));
                LoopState::Searching
            }
            Ok(hits) => LoopState::ShowingResults(hits),
            Err(e) => {
                warn!(term, error = %e, "search failed");
                self.prompter.notice(&format!("Search failed: {e}"));
                LoopState::Idle
            }
        })
    }
}

fn pick<T: Clone>(items: &[T], idx: usize) -> ScaffoldResult<T> {
    items.get(idx).cloned().ok_or_else(|| {
        ApplicationError::Prompt {
            reason: format!("answer {idx} is out of range"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockRegistryClient, NoProgress};
    use crate::domain::PackageInfo;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Prompter replaying scripted answers and recording every question.
    #[derive(Default)]
    struct Scripted {
        confirms: Mutex<VecDeque<bool>>,
        selects: Mutex<VecDeque<usize>>,
        inputs: Mutex<VecDeque<String>>,
        checked: Mutex<Option<Vec<usize>>>,
        asked: Mutex<Vec<String>>,
        notices: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn confirms(self, v: &[bool]) -> Self {
            self.confirms.lock().unwrap().extend(v);
            self
        }
        fn selects(self, v: &[usize]) -> Self {
            self.selects.lock().unwrap().extend(v);
            self
        }
        fn inputs(self, v: &[&str]) -> Self {
            self.inputs
                .lock()
                .unwrap()
                .extend(v.iter().map(|s| s.to_string()));
            self
        }
        fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    impl Prompter for Scripted {
        fn select(&self, prompt: &str, _: &[String], default: usize) -> ScaffoldResult<usize> {
            self.asked.lock().unwrap().push(prompt.into());
            Ok(self.selects.lock().unwrap().pop_front().unwrap_or(default))
        }
        fn confirm(&self, prompt: &str, default: bool) -> ScaffoldResult<bool> {
            self.asked.lock().unwrap().push(prompt.into());
            Ok(self.confirms.lock().unwrap().pop_front().unwrap_or(default))
        }
        fn multi_select(
            &self,
            prompt: &str,
            _: &[String],
            defaults: &[bool],
        ) -> ScaffoldResult<Vec<usize>> {
            self.asked.lock().unwrap().push(prompt.into());
            Ok(self
                .checked
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| (0..defaults.len()).collect()))
        }
        fn input(&self, prompt: &str) -> ScaffoldResult<String> {
            self.asked.lock().unwrap().push(prompt.into());
            Ok(self.inputs.lock().unwrap().pop_front().unwrap_or_default())
        }
        fn notice(&self, message: &str) {
            self.notices.lock().unwrap().push(message.into());
        }
    }

    fn hit(name: &str) -> SearchHit {
        SearchHit {
            name: name.into(),
            url: format!("https://github.com/x/{name}"),
        }
    }

    fn sequencer(registry: MockRegistryClient, prompter: Arc<Scripted>) -> PromptSequencer {
        PromptSequencer::new(Arc::new(registry), prompter, Arc::new(NoProgress))
    }

    fn preset() -> PromptPreset {
        PromptPreset {
            angular_version: Some("1.3.0".into()),
        }
    }

    // ========================================================================
    // Step table
    // ========================================================================

    #[tokio::test]
    async fn version_step_offers_latest_first() {
        let mut registry = MockRegistryClient::new();
        registry.expect_info().times(1).returning(|_| {
            Ok(PackageInfo {
                name: "angular".into(),
                latest_version: "1.3.2".into(),
                versions: vec!["1.3.2".into(), "1.3.1".into(), "1.2.0-build.1".into()],
                main: None,
            })
        });
        // pick the second entry, i.e. 1.3.1
        let prompter = Arc::new(Scripted::default().selects(&[1]).confirms(&[true, false]));

        let answers = sequencer(registry, prompter)
            .run(PromptPreset::default())
            .await
            .unwrap();

        assert_eq!(answers.angular_version.as_deref(), Some("1.3.1"));
    }

    #[tokio::test]
    async fn registry_failure_on_version_lookup_is_an_error() {
        let mut registry = MockRegistryClient::new();
        registry.expect_info().returning(|name| {
            Err(ApplicationError::Registry {
                package: name.into(),
                reason: "offline".into(),
            }
            .into())
        });
        let prompter = Arc::new(Scripted::default());

        assert!(
            sequencer(registry, prompter)
                .run(PromptPreset::default())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn preset_version_skips_registry() {
        let mut registry = MockRegistryClient::new();
        registry.expect_info().never();
        let prompter = Arc::new(Scripted::default().confirms(&[true, false]));

        let answers = sequencer(registry, prompter.clone())
            .run(preset())
            .await
            .unwrap();

        assert_eq!(answers.angular_version.as_deref(), Some("1.3.0"));
        assert!(!prompter.asked().iter().any(|q| q == questions::VERSION));
    }

    #[tokio::test]
    async fn no_preprocessor_never_asks_variant() {
        // preprocessor: None (0); bootstrap yes; add more: no
        let prompter = Arc::new(Scripted::default().selects(&[0]).confirms(&[true, false]));

        let answers = sequencer(MockRegistryClient::new(), prompter.clone())
            .run(preset())
            .await
            .unwrap();

        let asked = prompter.asked();
        assert!(!asked.iter().any(|q| q == questions::COMPASS_BOOTSTRAP));
        assert!(!asked.iter().any(|q| q == questions::LESS_BOOTSTRAP));
        assert!(answers.node_modules.is_empty());
        assert_eq!(answers.compass_bootstrap, None);
        assert_eq!(answers.less_bootstrap, None);
    }

    #[tokio::test]
    async fn less_asks_only_the_less_variant() {
        // preprocessor: Less (2); bootstrap yes; less variant: yes; add more: no
        let prompter = Arc::new(Scripted::default().selects(&[2]).confirms(&[true, true, false]));

        let answers = sequencer(MockRegistryClient::new(), prompter.clone())
            .run(preset())
            .await
            .unwrap();

        let asked = prompter.asked();
        assert!(asked.iter().any(|q| q == questions::LESS_BOOTSTRAP));
        assert!(!asked.iter().any(|q| q == questions::COMPASS_BOOTSTRAP));
        assert_eq!(answers.preprocessor, Preprocessor::Less);
        assert_eq!(answers.less_bootstrap, Some(true));
        assert_eq!(answers.node_modules, vec!["less"]);
    }

    #[tokio::test]
    async fn declined_bootstrap_skips_variants() {
        let prompter = Arc::new(Scripted::default().selects(&[1]).confirms(&[false, false]));

        let answers = sequencer(MockRegistryClient::new(), prompter.clone())
            .run(preset())
            .await
            .unwrap();

        assert!(!prompter.asked().iter().any(|q| q == questions::COMPASS_BOOTSTRAP));
        assert!(!answers.bootstrap);
    }

    #[tokio::test]
    async fn checklist_maps_indices_to_modules() {
        let prompter = Scripted::default().confirms(&[true, false]);
        *prompter.checked.lock().unwrap() = Some(vec![3, 0]);

        let answers = sequencer(MockRegistryClient::new(), Arc::new(prompter))
            .run(preset())
            .await
            .unwrap();

        assert_eq!(
            answers.modules,
            vec![AngularModule::Route, AngularModule::Animate]
        );
    }

    // ========================================================================
    // Component loop
    // ========================================================================

    #[tokio::test]
    async fn picks_two_components_then_declines() {
        let mut registry = MockRegistryClient::new();
        registry
            .expect_search()
            .returning(|term| Ok(vec![hit(term), hit(&format!("{term}-extra"))]));

        // add more? yes, pick first; add more? yes, pick first; add more? no
        let prompter = Arc::new(
            Scripted::default()
                .confirms(&[true, true, false])
                .inputs(&["foo", "bar"])
                .selects(&[2, 2]),
        );

        let mut request = ExtraComponentRequest::new();
        sequencer(registry, prompter)
            .component_loop(&mut request)
            .await
            .unwrap();

        assert_eq!(request.names(), &["foo".to_string(), "bar".to_string()]);
    }

    #[tokio::test]
    async fn not_found_reprompts_for_term_without_touching_request() {
        let mut registry = MockRegistryClient::new();
        registry.expect_search().returning(|term| {
            if term == "nope" {
                Ok(vec![])
            } else {
                Ok(vec![hit(term)])
            }
        });

        let prompter = Arc::new(
            Scripted::default()
                .confirms(&[true, false])
                .inputs(&["nope", "foo"])
                .selects(&[2]),
        );

        let mut request = ExtraComponentRequest::new();
        sequencer(registry, prompter.clone())
            .component_loop(&mut request)
            .await
            .unwrap();

        assert_eq!(request.names(), &["foo".to_string()]);
        assert_eq!(
            *prompter.notices.lock().unwrap(),
            vec![questions::not_found("nope")]
        );
        // second term prompt follows the not-found notice directly
        let asked = prompter.asked();
        assert_eq!(&asked[..3], &[
            questions::ADD_MORE.to_string(),
            questions::SEARCH_TERM.to_string(),
            questions::SEARCH_TERM.to_string(),
        ]);
    }

    #[tokio::test]
    async fn abort_ends_loop_without_asking_again() {
        let mut registry = MockRegistryClient::new();
        registry.expect_search().returning(|term| Ok(vec![hit(term)]));

        let prompter = Arc::new(
            Scripted::default()
                .confirms(&[true])
                .inputs(&["foo"])
                .selects(&[1]),
        );

        let mut request = ExtraComponentRequest::new();
        sequencer(registry, prompter.clone())
            .component_loop(&mut request)
            .await
            .unwrap();

        assert!(request.is_empty());
        let add_more = prompter
            .asked()
            .iter()
            .filter(|q| *q == questions::ADD_MORE)
            .count();
        assert_eq!(add_more, 1);
    }

    #[tokio::test]
    async fn search_again_returns_to_term_prompt() {
        let mut registry = MockRegistryClient::new();
        registry.expect_search().times(2).returning(|term| Ok(vec![hit(term)]));

        let prompter = Arc::new(
            Scripted::default()
                .confirms(&[true, false])
                .inputs(&["fo", "foo"])
                .selects(&[0, 2]),
        );

        let mut request = ExtraComponentRequest::new();
        sequencer(registry, prompter)
            .component_loop(&mut request)
            .await
            .unwrap();

        assert_eq!(request.names(), &["foo".to_string()]);
    }

    #[tokio::test]
    async fn search_error_returns_to_gate() {
        let mut registry = MockRegistryClient::new();
        registry.expect_search().returning(|term| {
            Err(ApplicationError::Registry {
                package: term.into(),
                reason: "503".into(),
            }
            .into())
        });

        let prompter = Arc::new(
            Scripted::default()
                .confirms(&[true, false])
                .inputs(&["foo"]),
        );

        let mut request = ExtraComponentRequest::new();
        sequencer(registry, prompter.clone())
            .component_loop(&mut request)
            .await
            .unwrap();

        assert!(request.is_empty());
        assert_eq!(prompter.notices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_interactive_skips_component_loop() {
        let mut registry = MockRegistryClient::new();
        registry.expect_search().never();

        let answers = PromptSequencer::new(
            Arc::new(registry),
            Arc::new(crate::application::ports::DefaultAnswers),
            Arc::new(NoProgress),
        )
        .run(preset())
        .await
        .unwrap();

        assert!(answers.extra_components.is_empty());
        assert_eq!(answers.modules.len(), AngularModule::ALL.len());
        assert!(answers.bootstrap);
    }
}
