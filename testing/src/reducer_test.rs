//! Given-When-Then harness for reducers.
//!
//! A test states the view it starts from, the single action that arrives,
//! and what the view and the described effects must look like afterwards.
//! Nothing is executed: effects are only inspected, unless the test hands
//! them to [`run_effects`].

#![allow(clippy::module_name_repetitions)]

use composable_todo_core::{effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;
type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// One reducer step under test
///
/// ```ignore
/// ReducerTest::new(ViewReducer::new())
///     .with_env(ViewEnvironment::new(api))
///     .given_state(ViewState { draft: "   ".into(), ..ViewState::new() })
///     .when_action(ViewAction::Add)
///     .then_state(|view| assert_eq!(view.draft, "   "))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    env: Option<E>,
    given: Option<S>,
    when: Option<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Start a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            given: None,
            when: None,
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Dependencies the reducer captures into its effects
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.env = Some(env);
        self
    }

    /// Starting state
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.given = Some(state);
        self
    }

    /// The action being reduced
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.when = Some(action);
        self
    }

    /// Check the state after the step; may be called more than once
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Check the effects returned by the step; may be called more than once
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduce once and run every check
    ///
    /// # Panics
    ///
    /// Panics when the environment, state or action is missing, or when a
    /// check fails.
    #[allow(clippy::expect_used)]
    pub fn run(self) {
        let env = self.env.expect("with_env() was not called");
        let mut state = self.given.expect("given_state() was not called");
        let action = self.when.expect("when_action() was not called");

        let effects = self.reducer.reduce(&mut state, action, &env);

        self.state_checks.into_iter().for_each(|check| check(&state));
        self.effect_checks.into_iter().for_each(|check| check(&effects));
    }
}

/// Execute effects outside the runtime and collect the actions they produce
///
/// Futures are awaited in order and `Effect::None` yields nothing, so a test
/// can deliver the results back to the reducer in whatever order it wants,
/// for example a slow reload arriving after a newer one.
pub async fn run_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut actions = Vec::new();
    for effect in effects {
        if let Effect::Future(fut) = effect {
            actions.extend(fut.await);
        }
    }
    actions
}

/// Checks for use with [`ReducerTest::then_effects`]
pub mod assertions {
    use composable_todo_core::effect::Effect;

    /// Nothing to execute: the slice is empty or holds only `Effect::None`
    ///
    /// # Panics
    ///
    /// Panics when any effect is a future.
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected no work, got {effects:?}"
        );
    }

    /// Exactly `expected` effects were described
    ///
    /// # Panics
    ///
    /// Panics on a different count.
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "effects: {effects:?}");
    }

    /// At least one request was described
    ///
    /// # Panics
    ///
    /// Panics when no effect is a future.
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|effect| matches!(effect, Effect::Future(_))),
            "expected a future effect, got {effects:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composable_todo_core::{SmallVec, smallvec};

    /// Text being typed and the titles submitted so far
    #[derive(Debug, Default)]
    struct Draft {
        text: String,
        submitted: Vec<String>,
    }

    #[derive(Debug, PartialEq)]
    enum DraftAction {
        Type(String),
        Submit,
        Saved(String),
    }

    struct DraftReducer;

    impl Reducer for DraftReducer {
        type State = Draft;
        type Action = DraftAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Draft,
            action: DraftAction,
            _env: &(),
        ) -> SmallVec<[Effect<DraftAction>; 4]> {
            match action {
                DraftAction::Type(text) => {
                    state.text = text;
                    smallvec![Effect::None]
                },
                DraftAction::Submit => {
                    let title = std::mem::take(&mut state.text);
                    smallvec![Effect::future(async move { Some(DraftAction::Saved(title)) })]
                },
                DraftAction::Saved(title) => {
                    state.submitted.push(title);
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn typing_updates_draft_without_work() {
        ReducerTest::new(DraftReducer)
            .with_env(())
            .given_state(Draft::default())
            .when_action(DraftAction::Type("Buy milk".to_string()))
            .then_state(|draft| assert_eq!(draft.text, "Buy milk"))
            .then_state(|draft| assert!(draft.submitted.is_empty()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_describes_a_save() {
        ReducerTest::new(DraftReducer)
            .with_env(())
            .given_state(Draft {
                text: "Buy milk".to_string(),
                ..Draft::default()
            })
            .when_action(DraftAction::Submit)
            .then_state(|draft| assert!(draft.text.is_empty()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "given_state() was not called")]
    fn missing_state_is_reported() {
        ReducerTest::new(DraftReducer)
            .with_env(())
            .when_action(DraftAction::Submit)
            .run();
    }

    #[tokio::test]
    async fn run_effects_feeds_results_back() {
        let mut draft = Draft {
            text: "Walk dog".to_string(),
            ..Draft::default()
        };
        let effects = DraftReducer.reduce(&mut draft, DraftAction::Submit, &());

        for action in run_effects(effects).await {
            let _ = DraftReducer.reduce(&mut draft, action, &());
        }

        assert_eq!(draft.submitted, vec!["Walk dog".to_string()]);
    }

    #[tokio::test]
    async fn run_effects_skips_none() {
        let actions = run_effects(vec![Effect::<DraftAction>::None]).await;
        assert!(actions.is_empty());
    }
}
