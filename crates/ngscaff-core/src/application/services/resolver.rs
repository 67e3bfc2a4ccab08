//! Selection Resolver - raw answers to a validated `FeatureSelection`.
//!
//! Pure transform, no I/O.

use tracing::debug;

use crate::application::services::sequencer::Answers;
use crate::domain::{
    DomainError, FeatureSelection, ModuleInjection, Preprocessor, ScriptLanguage,
};

/// Output of [`SelectionResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub selection: FeatureSelection,
    pub injection: ModuleInjection,
}

pub struct SelectionResolver;

impl SelectionResolver {
    /// Build the feature selection and the derived injection tokens.
    ///
    /// A variant answer that does not match the chosen preprocessor is
    /// rejected; the prompt table never produces one.
    pub fn resolve(
        answers: &Answers,
        script_language: ScriptLanguage,
    ) -> Result<Resolution, DomainError> {
        let version = answers
            .angular_version
            .clone()
            .ok_or(DomainError::MissingRequiredField {
                field: "angular_version",
            })?;

        let compass = answers.compass_bootstrap.unwrap_or(false);
        let less = answers.less_bootstrap.unwrap_or(false);

        if compass && answers.preprocessor != Preprocessor::Compass {
            return Err(DomainError::InvalidSelection(
                "Sass Bootstrap requires the Compass preprocessor".into(),
            ));
        }
        if less && answers.preprocessor != Preprocessor::Less {
            return Err(DomainError::InvalidSelection(
                "Less Bootstrap requires the Less preprocessor".into(),
            ));
        }

        let selection = FeatureSelection::builder()
            .angular_version(version)
            .preprocessor(answers.preprocessor)
            .bootstrap(answers.bootstrap)
            .bootstrap_variant(compass || less)
            .modules(answers.modules.iter().copied())
            .script_language(script_language)
            .build()?;

        let injection = ModuleInjection::from_selection(&selection);
        debug!(tokens = ?injection.tokens(), route = injection.route(), "selection resolved");

        Ok(Resolution {
            selection,
            injection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AngularModule;

    fn answers() -> Answers {
        Answers {
            angular_version: Some("1.3.0".into()),
            ..Answers::default()
        }
    }

    #[test]
    fn less_with_bootstrap_and_default_variant() {
        let a = Answers {
            preprocessor: Preprocessor::Less,
            node_modules: vec!["less"],
            bootstrap: true,
            less_bootstrap: Some(true),
            ..answers()
        };

        let r = SelectionResolver::resolve(&a, ScriptLanguage::JavaScript).unwrap();
        assert_eq!(r.selection.preprocessor(), Preprocessor::Less);
        assert!(r.selection.less_bootstrap());
        assert!(!r.selection.compass_bootstrap());
    }

    #[test]
    fn tokens_follow_fixed_order() {
        let a = Answers {
            modules: vec![
                AngularModule::Touch,
                AngularModule::Sanitize,
                AngularModule::Route,
                AngularModule::Resource,
                AngularModule::Cookies,
                AngularModule::Animate,
            ],
            ..answers()
        };

        let r = SelectionResolver::resolve(&a, ScriptLanguage::JavaScript).unwrap();
        assert_eq!(
            r.injection.quoted(),
            vec![
                "'ngAnimate'",
                "'ngCookies'",
                "'ngResource'",
                "'ngRoute'",
                "'ngSanitize'",
                "'ngTouch'"
            ]
        );
        assert!(r.injection.route());
    }

    #[test]
    fn mismatched_variant_is_rejected() {
        let a = Answers {
            preprocessor: Preprocessor::Less,
            bootstrap: true,
            compass_bootstrap: Some(true),
            ..answers()
        };
        assert!(matches!(
            SelectionResolver::resolve(&a, ScriptLanguage::JavaScript),
            Err(DomainError::InvalidSelection(_))
        ));
    }

    #[test]
    fn variant_without_bootstrap_is_rejected() {
        let a = Answers {
            preprocessor: Preprocessor::Compass,
            bootstrap: false,
            compass_bootstrap: Some(true),
            ..answers()
        };
        assert!(SelectionResolver::resolve(&a, ScriptLanguage::JavaScript).is_err());
    }

    #[test]
    fn script_language_is_carried() {
        let r = SelectionResolver::resolve(&answers(), ScriptLanguage::CoffeeScript).unwrap();
        assert_eq!(r.selection.script_language(), ScriptLanguage::CoffeeScript);
    }
}
