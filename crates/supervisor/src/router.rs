//! Routing state machine.
//!
//! A two-level tree: the classifier node at the root and one terminal per
//! domain. Exactly one terminal runs per invocation.
//!
//! ```text
//!              Classifying
//!                   │ classify()
//!                   ▼
//!          Dispatching(domain)
//!   ┌──────┬──────┬─┴────┬──────┬──────┐
//!   ▼      ▼      ▼      ▼      ▼      ▼
//! research finance travel shopping jobs recipes   (Done)
//! ```

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::classifier::Classifier;
use crate::domain::Domain;
use crate::error::{ClassificationError, RoutingError};
use crate::state::RoutingState;

/// Where a single invocation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingPhase {
    Classifying,
    Dispatching(Domain),
    Done(Domain),
}

impl RoutingPhase {
    /// Pure transition out of `Classifying`.
    ///
    /// A missing domain selects the default terminal; the returned flag
    /// reports that substitution.
    pub fn dispatch(next_agent: Option<Domain>) -> (Self, bool) {
        match next_agent {
            Some(domain) => (Self::Dispatching(domain), false),
            None => (Self::Dispatching(Domain::DEFAULT), true),
        }
    }

    /// Pure transition out of `Dispatching`. Other phases are unchanged.
    pub fn finish(self) -> Self {
        match self {
            Self::Dispatching(domain) => Self::Done(domain),
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// A leaf of the routing tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    /// Domain this terminal serves.
    pub domain: Domain,
    /// Node label written to the state, distinct from the domain value.
    pub node: &'static str,
}

/// Terminal for a domain, labelled by [`Domain::agent_node`].
pub fn terminal(domain: Domain) -> Terminal {
    Terminal {
        domain,
        node: domain.agent_node(),
    }
}

/// Check that every registered domain reaches its own terminal.
pub fn verify_terminals() -> Result<(), RoutingError> {
    check_terminals(terminal)
}

fn check_terminals(leaf_of: impl Fn(Domain) -> Terminal) -> Result<(), RoutingError> {
    let mut domains = HashSet::new();
    let mut nodes = HashSet::new();

    for domain in Domain::ALL {
        if !domains.insert(domain) {
            return Err(RoutingError::Registry(format!(
                "domain {} is registered twice",
                domain
            )));
        }

        let leaf = leaf_of(domain);
        if leaf.domain != domain {
            return Err(RoutingError::Registry(format!(
                "terminal {} serves {} instead of {}",
                leaf.node, leaf.domain, domain
            )));
        }
        if leaf.node.is_empty() || leaf.node == domain.as_str() {
            return Err(RoutingError::Registry(format!(
                "terminal for {} needs a label distinct from the domain value",
                domain
            )));
        }
        if !nodes.insert(leaf.node) {
            return Err(RoutingError::Registry(format!(
                "terminal {} is registered twice",
                leaf.node
            )));
        }
    }

    Ok(())
}

/// Drives a [`RoutingState`] from the classifier to exactly one terminal.
pub struct Router {
    classifier: Classifier,
}

impl Router {
    /// Create a router, verifying registry/terminal lock-step first.
    pub fn new(classifier: Classifier) -> Result<Self, RoutingError> {
        verify_terminals()?;
        Ok(Self { classifier })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Run the state machine to completion and return the terminal domain.
    pub async fn run(&self, state: &mut RoutingState) -> Result<Domain, ClassificationError> {
        let mut phase = RoutingPhase::Classifying;

        loop {
            trace!(phase = ?phase, "ROUTER_PHASE");
            phase = match phase {
                RoutingPhase::Classifying => {
                    let classification = self
                        .classifier
                        .classify(state.last_message(), state.prior_turns())
                        .await?;
                    state.record_classification(classification.domain, classification.fallback_applied);

                    let (next, fell_back) = RoutingPhase::dispatch(state.next_agent());
                    if fell_back {
                        warn!("ROUTER_DISPATCH_FALLBACK");
                        state.record_dispatch_fallback();
                    }
                    next
                }
                RoutingPhase::Dispatching(domain) => {
                    let leaf = terminal(domain);
                    state.record_terminal(leaf.domain, leaf.node);
                    debug!(node = leaf.node, "Reached terminal");
                    phase.finish()
                }
                RoutingPhase::Done(domain) => return Ok(domain),
            };
        }
    }
}
