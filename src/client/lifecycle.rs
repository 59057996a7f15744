//! Client lifecycle
//!
//! ```text
//!  Uninitialized ──init()──► Initializing ──(synchronous)──► Ready
//!        │                                                     │
//!        └──────────────teardown()──────► TornDown ◄───────────┘
//!                                            │
//!                                            └──init()──► Initializing
//! ```
//!
//! Before `init()` pushes and consent commands are buffered; after it they go
//! straight to the data layer. Script loading continues in the background
//! and is observed through `when_ready`/`on_ready`, never awaited here.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::future::Future;
use std::rc::Rc;

use crate::client::config::ClientConfig;
use crate::client::error::GtmResult;
use crate::consent::api::{build_consent_command, ConsentKind, ConsentOptions, ConsentState};
use crate::core::logger::{Logger, NoopLogger};
use crate::core::time::{Clock, SystemClock};
use crate::host::traits::{Document, GlobalScope};
use crate::loader::api::{ContainerDescriptor, ReadySubscription, ScriptLoadState, ScriptLoader};
use crate::queue::api::{PendingQueue, QueueEntry, QueueStore};

/// Name of the bootstrap event, always the first entry delivered by `init`
pub const BOOTSTRAP_EVENT: &str = "gtm.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Ready,
    TornDown,
}

/// `{"gtm.start": <ms>, "event": "gtm.js"}`
pub fn bootstrap_event(start_millis: i64) -> QueueEntry {
    let mut record = Map::new();
    record.insert("gtm.start".to_string(), json!(start_millis));
    record.insert("event".to_string(), Value::String(BOOTSTRAP_EVENT.to_string()));
    QueueEntry::Record(record)
}

pub struct Client {
    config: ClientConfig,
    store: QueueStore,
    pending: PendingQueue,
    loader: ScriptLoader,
    logger: Rc<dyn Logger>,
    clock: Rc<dyn Clock>,
    state: LifecycleState,
}

impl Client {
    /// Validate `config` and wire a client to the given page
    pub fn new(
        config: ClientConfig,
        scope: Rc<dyn GlobalScope>,
        document: Rc<dyn Document>,
    ) -> GtmResult<Self> {
        let loader_config = config.validate()?;
        let logger: Rc<dyn Logger> = Rc::new(NoopLogger);

        Ok(Self {
            store: QueueStore::new(loader_config.data_layer_name.clone(), scope),
            pending: PendingQueue::new(),
            loader: ScriptLoader::new(
                document,
                loader_config,
                config.containers.clone(),
                Rc::clone(&logger),
            ),
            config,
            logger,
            clock: Rc::new(SystemClock),
            state: LifecycleState::Uninitialized,
        })
    }

    /// Replace the log sink
    ///
    /// Scripts already injected keep reporting to the previous sink.
    pub fn with_logger(mut self, logger: Rc<dyn Logger>) -> Self {
        self.loader.set_logger(Rc::clone(&logger));
        self.logger = logger;
        self
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Claim the data layer, deliver buffered operations and inject scripts
    ///
    /// Repeated calls are no-ops. After `teardown` the full sequence runs
    /// again. Fails when the host cannot provide the data layer or refuses a
    /// push; the claim is then released and buffered operations stay queued
    /// for the next attempt.
    pub fn init(&mut self) -> GtmResult<()> {
        match self.state {
            LifecycleState::Initializing | LifecycleState::Ready => {
                self.logger
                    .debug("init() called on an initialised client; ignoring");
                return Ok(());
            }
            LifecycleState::Uninitialized | LifecycleState::TornDown => {}
        }

        let previous = self.state;
        self.state = LifecycleState::Initializing;

        if let Err(error) = self.run_initialization() {
            self.logger
                .error(&format!("Client initialisation failed: {}", error));
            self.state = previous;
            return Err(error);
        }

        self.state = LifecycleState::Ready;
        Ok(())
    }

    fn run_initialization(&mut self) -> GtmResult<()> {
        let existed = self.store.claim()?.existed;
        let flushed = match self.deliver_buffered() {
            Ok(flushed) => flushed,
            Err(error) => {
                // Next init starts from a fresh claim with the buffer intact
                self.store.restore();
                return Err(error);
            }
        };
        self.loader.ensure();

        self.logger.info(&format!(
            "Initialised data layer '{}' ({}) with {} buffered operation(s) and {} container(s)",
            self.store.name(),
            if existed { "existing" } else { "created" },
            flushed,
            self.config.containers.len()
        ));
        Ok(())
    }

    fn deliver_buffered(&mut self) -> GtmResult<usize> {
        self.store.push(bootstrap_event(self.clock.now_millis()))?;
        Ok(self.pending.flush(&self.store)?)
    }

    /// Push an event record, command tuple or callback
    ///
    /// Buffered before `init`, delivered directly after it, dropped with a
    /// warning after `teardown` or when empty.
    pub fn push(&mut self, entry: impl Into<QueueEntry>) {
        let entry = entry.into();
        if entry.is_empty() {
            self.logger.warn("Ignoring empty data layer push");
            return;
        }

        match self.state {
            LifecycleState::TornDown => {
                self.logger
                    .warn("Dropping data layer push: client has been torn down");
            }
            LifecycleState::Uninitialized | LifecycleState::Initializing => {
                self.pending.enqueue(entry);
            }
            LifecycleState::Ready => self.deliver(entry),
        }
    }

    /// Queue or send `["consent", "default", state, options?]`
    pub fn set_consent_defaults(&mut self, state: &ConsentState, options: Option<&ConsentOptions>) {
        self.consent(ConsentKind::Default, state, options);
    }

    /// Queue or send `["consent", "update", state, options?]`
    ///
    /// Only the categories present in `state` are sent.
    pub fn update_consent(&mut self, state: &ConsentState, options: Option<&ConsentOptions>) {
        self.consent(ConsentKind::Update, state, options);
    }

    fn consent(&mut self, kind: ConsentKind, state: &ConsentState, options: Option<&ConsentOptions>) {
        if state.is_empty() {
            self.logger.warn(&format!(
                "Ignoring consent {} command without categories",
                kind.as_str()
            ));
            return;
        }

        let command = build_consent_command(kind, state, options);
        match self.state {
            LifecycleState::TornDown => {
                self.logger.warn(&format!(
                    "Dropping consent {} command: client has been torn down",
                    kind.as_str()
                ));
            }
            LifecycleState::Uninitialized | LifecycleState::Initializing => {
                if self.pending.enqueue_consent(command) {
                    self.logger.debug(&format!(
                        "Replaced queued consent {} command",
                        kind.as_str()
                    ));
                }
            }
            LifecycleState::Ready => self.deliver(command.into_entry()),
        }
    }

    fn deliver(&self, entry: QueueEntry) {
        if let Err(error) = self.store.push(entry) {
            self.logger
                .error(&format!("Dropping data layer push: {}", error));
        }
    }

    /// Resolves once every container's script is loaded or failed
    ///
    /// After `teardown` this resolves immediately with the states the
    /// scripts had when they were removed.
    pub fn when_ready(&self) -> impl Future<Output = Vec<ScriptLoadState>> + 'static {
        self.loader.when_ready()
    }

    /// Run `callback` once every container's script is loaded or failed
    pub fn on_ready(
        &self,
        callback: impl FnOnce(&[ScriptLoadState]) + 'static,
    ) -> ReadySubscription {
        self.loader.on_ready(callback)
    }

    /// Remove the scripts this client injected or adopted, restore the data
    /// layer and drop anything still buffered
    pub fn teardown(&mut self) {
        if self.state == LifecycleState::TornDown {
            self.logger.debug("teardown() called twice; ignoring");
            return;
        }

        let removed = self.loader.remove_all();
        let restored = self.store.restore();
        let discarded = self.pending.len();
        self.pending.clear();
        self.state = LifecycleState::TornDown;

        let data_layer = match restored {
            Some(snapshot) if snapshot.existed => {
                format!("truncated to {} entries", snapshot.prior_length)
            }
            Some(_) => "deleted".to_string(),
            None => "never claimed".to_string(),
        };
        self.logger.info(&format!(
            "Tore down client: removed {} script(s), data layer {}, discarded {} buffered operation(s)",
            removed, data_layer, discarded
        ));
    }

    /// True once the synchronous part of `init` has completed
    ///
    /// Scripts may still be loading; use `when_ready` to wait for them.
    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn data_layer_name(&self) -> &str {
        self.store.name()
    }

    pub fn containers(&self) -> &[ContainerDescriptor] {
        &self.config.containers
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn script_state(&self, container_id: &str) -> Option<ScriptLoadState> {
        self.loader.get_state(container_id)
    }

    pub fn script_states(&self) -> Vec<ScriptLoadState> {
        self.loader.states()
    }

    /// Number of operations waiting for `init`
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Build a client whose global scope and document are the same host
pub fn create_client<H>(config: ClientConfig, host: Rc<H>) -> GtmResult<Client>
where
    H: GlobalScope + Document + 'static,
{
    let scope: Rc<dyn GlobalScope> = host.clone();
    let document: Rc<dyn Document> = host;
    Client::new(config, scope, document)
}
