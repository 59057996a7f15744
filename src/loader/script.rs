//! Script loader
//!
//! Injects one `<script>` element per container, at most one at a time per
//! container, and tracks each through `pending -> loading -> loaded|failed`.
//! Every transition is published to the readiness channel; callbacks
//! registered with [`ScriptLoader::on_ready`] run once the whole table is
//! terminal.
//!
//! Host events carry the epoch they were wired with. Removing or
//! re-injecting a container bumps its epoch, so late `load`/`error` events
//! from an element that is gone can never overwrite newer state.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::core::logger::Logger;
use crate::host::error::HostError;
use crate::host::traits::{Document, ScriptListener, ScriptMount, ScriptOutcome};
use crate::loader::container::{ContainerDescriptor, LoaderConfig};
use crate::loader::markup;
use crate::loader::readiness::{self, ReadyCallback, ReadyRegistry, ReadySubscription};
use crate::loader::state::{all_terminal, ScriptLoadState, ScriptStatus};

pub(crate) const REMOVED_BEFORE_LOAD: &str = "script removed before it finished loading";

struct Tracked {
    state: ScriptLoadState,
    epoch: u64,
}

type Completion = (Vec<ScriptLoadState>, Vec<ReadyCallback>);

struct LoaderShared {
    tracked: Vec<Tracked>,
    ready: ReadyRegistry,
}

impl LoaderShared {
    fn states(&self) -> Vec<ScriptLoadState> {
        self.tracked
            .iter()
            .map(|tracked| tracked.state.clone())
            .collect()
    }

    fn find(&self, container_id: &str) -> Option<&Tracked> {
        self.tracked
            .iter()
            .find(|tracked| tracked.state.container_id == container_id)
    }

    fn find_mut(&mut self, container_id: &str) -> Option<&mut Tracked> {
        self.tracked
            .iter_mut()
            .find(|tracked| tracked.state.container_id == container_id)
    }

    /// Publish the current table; hands back the drained callbacks when it
    /// is complete so they can run after the borrow is released
    fn publish(&mut self) -> Option<Completion> {
        let states = self.states();
        self.ready.publish(&states);
        if !all_terminal(&states) {
            return None;
        }
        let callbacks = self.ready.take_callbacks();
        if callbacks.is_empty() {
            None
        } else {
            Some((states, callbacks))
        }
    }
}

fn notify(completion: Option<Completion>) {
    if let Some((states, callbacks)) = completion {
        for callback in callbacks {
            callback(&states);
        }
    }
}

pub struct ScriptLoader {
    document: Rc<dyn Document>,
    config: LoaderConfig,
    containers: Vec<ContainerDescriptor>,
    logger: Rc<dyn Logger>,
    shared: Rc<RefCell<LoaderShared>>,
}

impl ScriptLoader {
    /// Track `containers` (already de-duplicated) as `pending`
    pub fn new(
        document: Rc<dyn Document>,
        config: LoaderConfig,
        containers: Vec<ContainerDescriptor>,
        logger: Rc<dyn Logger>,
    ) -> Self {
        let tracked: Vec<Tracked> = containers
            .iter()
            .map(|container| Tracked {
                state: ScriptLoadState::pending(container.id.clone()),
                epoch: 0,
            })
            .collect();
        let initial = tracked.iter().map(|t| t.state.clone()).collect();

        Self {
            document,
            config,
            containers,
            logger,
            shared: Rc::new(RefCell::new(LoaderShared {
                tracked,
                ready: ReadyRegistry::new(initial),
            })),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn containers(&self) -> &[ContainerDescriptor] {
        &self.containers
    }

    /// Sink for scripts injected from now on
    pub fn set_logger(&mut self, logger: Rc<dyn Logger>) {
        self.logger = logger;
    }

    /// Make sure every container has its script attached
    ///
    /// Containers whose marked element is already in the document are left
    /// alone. Safe to call repeatedly.
    pub fn ensure(&self) {
        for container in &self.containers {
            self.ensure_container(container);
        }
    }

    fn ensure_container(&self, container: &ContainerDescriptor) {
        let id = container.id.as_str();

        if self.document.has_script(id) {
            let status = self.shared.borrow().find(id).map(|t| t.state.status);
            if status == Some(ScriptStatus::Pending) {
                // Attached by someone else (server-rendered tag, earlier page code)
                self.logger
                    .debug(&format!("Adopting existing script for container {}", id));
                let completion = {
                    let mut shared = self.shared.borrow_mut();
                    if let Some(tracked) = shared.find_mut(id) {
                        tracked.state.status = ScriptStatus::Loaded;
                    }
                    shared.publish()
                };
                notify(completion);
            } else {
                log::trace!("Script for container {} already attached", id);
            }
            return;
        }

        let epoch = {
            let mut shared = self.shared.borrow_mut();
            let epoch = match shared.find_mut(id) {
                Some(tracked) => {
                    tracked.epoch += 1;
                    tracked.state.status = ScriptStatus::Loading;
                    tracked.state.error = None;
                    tracked.epoch
                }
                None => return,
            };
            // A loading entry can never complete the table
            let _ = shared.publish();
            epoch
        };

        let mount = if self.document.has_head() {
            ScriptMount::Head
        } else if self.document.has_body() {
            ScriptMount::Body
        } else {
            let message = HostError::NoMountPoint.to_string();
            Self::settle(
                &self.shared,
                self.logger.as_ref(),
                id,
                epoch,
                ScriptOutcome::Failed(message),
            );
            return;
        };

        let element = markup::script_element(container, &self.config);
        log::trace!("Injecting {} into {:?}", element.src, mount);

        if let Err(error) = self
            .document
            .append_script(element, mount, self.listener(id, epoch))
        {
            Self::settle(
                &self.shared,
                self.logger.as_ref(),
                id,
                epoch,
                ScriptOutcome::Failed(error.to_string()),
            );
        }
    }

    fn listener(&self, container_id: &str, epoch: u64) -> ScriptListener {
        let shared = Rc::downgrade(&self.shared);
        let logger = Rc::clone(&self.logger);
        let container_id = container_id.to_string();

        Box::new(move |outcome| {
            if let Some(shared) = shared.upgrade() {
                ScriptLoader::settle(&shared, logger.as_ref(), &container_id, epoch, outcome);
            }
        })
    }

    fn settle(
        shared: &RefCell<LoaderShared>,
        logger: &dyn Logger,
        container_id: &str,
        epoch: u64,
        outcome: ScriptOutcome,
    ) {
        let completion = {
            let mut inner = shared.borrow_mut();
            let Some(tracked) = inner.find_mut(container_id) else {
                return;
            };
            if tracked.epoch != epoch || tracked.state.is_terminal() {
                log::trace!("Ignoring stale script event for container {}", container_id);
                return;
            }

            match outcome {
                ScriptOutcome::Loaded => {
                    tracked.state.status = ScriptStatus::Loaded;
                    logger.debug(&format!("Container {} loaded", container_id));
                }
                ScriptOutcome::Failed(message) => {
                    logger.warn(&format!(
                        "Container {} failed to load: {}",
                        container_id, message
                    ));
                    tracked.state.status = ScriptStatus::Failed;
                    tracked.state.error = Some(message);
                }
            }
            inner.publish()
        };
        notify(completion);
    }

    /// Detach the script for `container_id`
    ///
    /// A container still loading is marked failed. Returns true when an
    /// element was actually removed from the document.
    pub fn remove(&self, container_id: &str) -> bool {
        let removed = self.document.remove_script(container_id);

        let completion = {
            let mut shared = self.shared.borrow_mut();
            let interrupted = match shared.find_mut(container_id) {
                Some(tracked) => {
                    tracked.epoch += 1;
                    if tracked.state.status == ScriptStatus::Loading {
                        tracked.state.status = ScriptStatus::Failed;
                        tracked.state.error = Some(REMOVED_BEFORE_LOAD.to_string());
                        true
                    } else {
                        false
                    }
                }
                None => false,
            };
            if interrupted {
                shared.publish()
            } else {
                None
            }
        };
        notify(completion);

        if removed {
            log::trace!("Removed script for container {}", container_id);
        }
        removed
    }

    /// Detach every script this loader injected or adopted; returns how
    /// many were removed
    ///
    /// Containers still `pending` were never touched, so a marked element
    /// the page rendered itself stays in place.
    pub fn remove_all(&self) -> usize {
        let owned: Vec<String> = self
            .shared
            .borrow()
            .tracked
            .iter()
            .filter(|tracked| tracked.state.status != ScriptStatus::Pending)
            .map(|tracked| tracked.state.container_id.clone())
            .collect();
        owned.iter().filter(|id| self.remove(id)).count()
    }

    pub fn get_state(&self, container_id: &str) -> Option<ScriptLoadState> {
        self.shared
            .borrow()
            .find(container_id)
            .map(|tracked| tracked.state.clone())
    }

    /// Every tracked state, in container order
    pub fn states(&self) -> Vec<ScriptLoadState> {
        self.shared.borrow().states()
    }

    pub fn is_ready(&self) -> bool {
        all_terminal(&self.states())
    }

    /// Resolves with the full table once every container is terminal
    ///
    /// The future does not borrow the loader and may outlive it. States are
    /// not reset by `remove`, so after a teardown this resolves at once with
    /// the last states seen, including `loaded` for scripts no longer in the
    /// document.
    pub fn when_ready(&self) -> impl Future<Output = Vec<ScriptLoadState>> + 'static {
        let receiver = self.shared.borrow().ready.subscribe();
        readiness::wait_until_ready(receiver)
    }

    /// Run `callback` once every container is terminal
    ///
    /// Runs immediately when that is already the case.
    pub fn on_ready(&self, callback: impl FnOnce(&[ScriptLoadState]) + 'static) -> ReadySubscription {
        let states = {
            let mut shared = self.shared.borrow_mut();
            let states = shared.states();
            if !all_terminal(&states) {
                return shared.ready.register(Box::new(callback));
            }
            states
        };
        callback(&states);
        ReadySubscription::inert()
    }
}
