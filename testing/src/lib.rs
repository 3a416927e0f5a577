//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the Composable Todo architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`run_effects`]: Drive effects by hand and collect the actions they produce
//! - [`InMemoryTodoStore`]: Document store double for service and client tests
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{InMemoryTodoStore, ReducerTest, assertions};
//!
//! ReducerTest::new(ViewReducer::new())
//!     .with_env(environment)
//!     .given_state(ViewState::new())
//!     .when_action(ViewAction::Load)
//!     .then_effects(assertions::assert_has_future_effect)
//!     .run();
//! ```

pub mod reducer_test;
pub mod todo_store_mocks;

pub use reducer_test::{ReducerTest, assertions, run_effects};
pub use todo_store_mocks::InMemoryTodoStore;
