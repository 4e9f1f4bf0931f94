// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The endpoint node and its session lifecycle.
//!
//! A [`Node`] owns the resource state (store, registry, step counter) for
//! the life of the process. A [`Session`] owns the transport state (stack,
//! wait budget, port reservation) for one run of the dispatch loop. Hard
//! transport errors condemn the session, never the node: `serve` rebuilds
//! sessions forever and attribute values carry across rebuilds.

use crate::config::NodeConfig;
use crate::core::{ResourceStore, StepCounter};
use crate::discovery::{generate_hostname, Advertiser, DiscoveryError, ServiceRegistration};
use crate::engine::WaitBudget;
use crate::resource::{shoe, Registry, RegistryError};
use crate::transport::{
    EndpointPlan, PortReservation, ProtocolStack, StackFactory, TransportError,
};
use std::sync::Arc;
use std::thread;

/// mDNS service label for the CoAP endpoint.
const SERVICE: &str = "_coap";
/// mDNS protocol label.
const PROTO: &str = "_udp";

/// Transport-scoped state for one run of the dispatch loop.
pub struct Session<S: ProtocolStack> {
    stack: S,
    budget: WaitBudget,
    reservation: Option<PortReservation>,
}

impl<S: ProtocolStack> Session<S> {
    /// Wait window the next poll will be given.
    #[must_use]
    pub fn wait_budget(&self) -> std::time::Duration {
        self.budget.current()
    }

    /// `true` when this session holds the advertised port.
    #[must_use]
    pub fn holds_reservation(&self) -> bool {
        self.reservation.is_some()
    }
}

/// The smart-shoe endpoint.
pub struct Node<F: StackFactory> {
    config: NodeConfig,
    factory: F,
    store: ResourceStore,
    registry: Registry,
    steps: Arc<StepCounter>,
}

impl<F: StackFactory> Node<F> {
    /// Build a node with the shoe attribute catalog registered.
    ///
    /// Registration completes here, before any session exists, so no
    /// request can race a half-built registry.
    ///
    /// # Errors
    /// Duplicate resource names in the catalog.
    pub fn new(config: NodeConfig, factory: F) -> Result<Self, RegistryError> {
        let steps = Arc::new(StepCounter::new());
        let mut store = ResourceStore::new();
        let mut registry = Registry::new();
        for spec in shoe::catalog(&steps) {
            registry.register(spec, &mut store)?;
        }
        log::info!("[node] {} resources registered", registry.len());

        Ok(Self {
            config,
            factory,
            store,
            registry,
            steps,
        })
    }

    /// Node configuration.
    #[must_use]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Current step-counter value.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps.value()
    }

    /// The service registration this node announces.
    #[must_use]
    pub fn registration(&self) -> ServiceRegistration {
        ServiceRegistration {
            hostname: generate_hostname(&self.config.hostname, self.config.hostname_suffix),
            instance: self.config.instance.clone(),
            service: SERVICE.to_string(),
            proto: PROTO.to_string(),
            port: self.config.port,
            txt: vec![
                ("model".to_string(), "strider-one".to_string()),
                ("fw".to_string(), env!("CARGO_PKG_VERSION").to_string()),
            ],
        }
    }

    /// Register this node with the discovery responder.
    ///
    /// Callers treat failure as startup-fatal: an endpoint nobody can
    /// discover must not start serving.
    ///
    /// # Errors
    /// Registration or record-update failure from the responder.
    pub fn advertise<A: Advertiser>(&self, advertiser: &mut A) -> Result<(), DiscoveryError> {
        let registration = self.registration();
        advertiser.register(&registration)?;
        // Descriptive records may change after registration; publish the
        // resource root as one such update.
        advertiser.set_txt(SERVICE, PROTO, "path", "/shoe")?;
        log::info!(
            "[node] advertised {} as '{}' on port {}",
            registration.hostname,
            registration.instance,
            registration.port
        );
        Ok(())
    }

    /// Build transport state for a fresh session.
    ///
    /// # Errors
    /// Endpoint reservation or stack construction failure; both are
    /// session-fatal and retried by [`Node::serve`].
    pub fn open_session(&mut self) -> Result<Session<F::Stack>, TransportError> {
        let plan = EndpointPlan::dual(self.config.port);

        let reservation = if self.config.reserve_port {
            let reservation =
                PortReservation::bind(&plan).map_err(|err| TransportError::Endpoint {
                    reason: err.to_string(),
                })?;
            Some(reservation)
        } else {
            None
        };

        let stack = self.factory.open(&plan)?;
        log::info!("[node] session open, port {} (udp+tcp)", plan.port);

        Ok(Session {
            stack,
            budget: WaitBudget::new(self.config.base_wait),
            reservation,
        })
    }

    /// One dispatch-loop iteration.
    ///
    /// Ticks the step counter, polls the stack for up to the current wait
    /// budget, serves every request the poll parsed, re-arms the budget
    /// from the elapsed time, then yields the processor briefly.
    ///
    /// # Errors
    /// A hard transport error; the caller must drop the session.
    pub fn step(&mut self, session: &mut Session<F::Stack>) -> Result<(), TransportError> {
        self.steps.tick();

        let elapsed = session.stack.process(session.budget.current())?;

        while let Some(request) = session.stack.take_request() {
            let token = request.token;
            let response = self.registry.dispatch(&mut self.store, &request);
            session.stack.respond(token, response)?;
        }

        session.budget.consume(elapsed);

        if !self.config.yield_slice.is_zero() {
            thread::sleep(self.config.yield_slice);
        }
        Ok(())
    }

    /// Drive `session` until the transport reports a hard error.
    ///
    /// Returns the error that ended the session.
    pub fn run_session(&mut self, session: &mut Session<F::Stack>) -> TransportError {
        loop {
            if let Err(err) = self.step(session) {
                return err;
            }
        }
    }

    /// Serve forever.
    ///
    /// Session setup failures and hard transport errors both tear the
    /// session down and rebuild from scratch; attribute values and the
    /// step counter survive every rebuild. This function never returns.
    pub fn serve(&mut self) -> ! {
        loop {
            let mut session = match self.open_session() {
                Ok(session) => session,
                Err(err) => {
                    log::error!("[node] session setup failed: {}", err);
                    thread::sleep(self.config.yield_slice);
                    continue;
                }
            };

            let err = self.run_session(&mut session);
            log::warn!("[node] session aborted: {}; rebuilding", err);
        }
    }
}
