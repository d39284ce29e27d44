//! Table-driven execution of contract cases.
//!
//! Each row of a [`ContractSuite`] is a [`ContractCase`]: the interaction,
//! the typed request, the expectation and the client call to make. One
//! runner drives every row and reports all failing rows together.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cf_core::{ApiError, CloudFoundryClient, StaticToken};
use futures::future::BoxFuture;
use tracing::debug;

use crate::error::ContractMismatch;
use crate::expectation::Expectation;
use crate::interaction::InteractionContext;
use crate::stub::{StubTransport, TEST_ACCESS_TOKEN};

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(5);

/// The client call under test.
pub type Invoke<Req, Resp> =
    fn(CloudFoundryClient, Req) -> BoxFuture<'static, Result<Resp, ApiError>>;

pub struct ContractCase<Req, Resp> {
    pub name: &'static str,
    pub interaction: InteractionContext,
    pub request: Req,
    pub expectation: Expectation<Resp>,
    pub invoke: Invoke<Req, Resp>,
}

impl<Req, Resp> ContractCase<Req, Resp>
where
    Req: Clone + Send + 'static,
    Resp: Debug + PartialEq + Send + 'static,
{
    pub async fn run(&self) -> Result<(), ContractMismatch> {
        let stub = Arc::new(StubTransport::new(self.interaction.clone())?);
        let client = CloudFoundryClient::new(
            stub.clone(),
            Arc::new(StaticToken::new(TEST_ACCESS_TOKEN)),
        );

        debug!(case = self.name, "invoking");
        let outcome = tokio::time::timeout(
            COMPLETION_TIMEOUT,
            (self.invoke)(client, self.request.clone()),
        )
        .await
        .map_err(|_| ContractMismatch::NoCompletion)?;

        stub.verify()?;
        self.expectation.check(outcome)
    }
}

/// Object-safe view of a case, so rows of different types share a table.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self) -> Result<(), ContractMismatch>;
}

#[async_trait]
impl<Req, Resp> Scenario for ContractCase<Req, Resp>
where
    Req: Clone + Send + Sync + 'static,
    Resp: Debug + PartialEq + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn execute(&self) -> Result<(), ContractMismatch> {
        self.run().await
    }
}

#[derive(Default)]
pub struct ContractSuite {
    cases: Vec<Box<dyn Scenario>>,
}

impl ContractSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case(mut self, case: impl Scenario + 'static) -> Self {
        self.cases.push(Box::new(case));
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run every case; returns the failing ones by name.
    pub async fn run(&self) -> Vec<(String, ContractMismatch)> {
        let mut failures = Vec::new();
        for case in &self.cases {
            if let Err(mismatch) = case.execute().await {
                failures.push((case.name().to_string(), mismatch));
            }
        }
        failures
    }

    /// Run every case and panic with a report if any failed.
    pub async fn assert_passes(&self) {
        let failures = self.run().await;
        if !failures.is_empty() {
            let report = failures
                .iter()
                .map(|(name, mismatch)| format!("  {name}: {mismatch}"))
                .collect::<Vec<_>>()
                .join("\n");
            panic!("{} of {} contract cases failed:\n{report}", failures.len(), self.len());
        }
    }
}
