//! Contract-test harness for the Cloud Foundry client.
//!
//! # Overview
//! A case declares the one HTTP request a resource-client call must send and
//! the response to replay for it. The harness binds a client to a
//! [`StubTransport`], runs the call, fails on any request mismatch, then
//! checks the decoded result against an [`Expectation`].
//!
//! # Design
//! - Cases are data: a [`ContractSuite`] is a table of [`ContractCase`]
//!   rows driven by one runner.
//! - "Completed with no value" is its own expectation, only constructible
//!   for operations that can return no value.
//! - Fixture bodies live under the workspace `fixtures/` directory.

pub mod error;
pub mod expectation;
pub mod interaction;
pub mod runner;
pub mod stub;

pub use error::ContractMismatch;
pub use expectation::{Completion, Expectation, NoValue};
pub use interaction::{
    fixtures_dir, load_fixture, load_json, ExpectedRequest, InteractionContext, ScriptedResponse,
};
pub use runner::{ContractCase, ContractSuite, Invoke, Scenario};
pub use stub::{StubTransport, TEST_ACCESS_TOKEN};
