// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle controller (C5, §4.5) — the core. Composes the config
//! store, the per-port lock manager, a supervisor client, and the template
//! renderer/parser into `create`/`update`/`delete`/`get`/`list`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use gowa_confstore::{ConfigStore, PortLocks};
use gowa_core::{AdminError, Divergence, Instance, InstanceConfig, InstanceState, PartialInstanceConfig, Port};
use gowa_supervisor::{ProcessInfo, SupervisorClient, SupervisorError, SupervisorFault};
use gowa_template::RenderPaths;
use tracing::{info, warn};

use crate::backoff::BackoffPolicy;
use crate::state_map;

/// Bounds how long compensation/restoration may run past a failed mutation
/// (§5 "Cancellation and timeouts"): best-effort cleanup always gets this
/// much time even if the original caller's budget is already spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensationBudget(pub Duration);

impl Default for CompensationBudget {
    fn default() -> Self {
        CompensationBudget(Duration::from_secs(10))
    }
}

pub struct LifecycleController<S: SupervisorClient> {
    confstore: ConfigStore,
    locks: PortLocks,
    supervisor: S,
    paths: RenderPaths,
    backoff: BackoffPolicy,
    rpc_timeout: Duration,
    compensation_budget: CompensationBudget,
}

impl<S: SupervisorClient> LifecycleController<S> {
    pub fn new(confstore: ConfigStore, locks: PortLocks, supervisor: S, paths: RenderPaths) -> Self {
        LifecycleController {
            confstore,
            locks,
            supervisor,
            paths,
            backoff: BackoffPolicy::default(),
            rpc_timeout: Duration::from_secs(5),
            compensation_budget: CompensationBudget::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    pub fn with_compensation_budget(mut self, budget: CompensationBudget) -> Self {
        self.compensation_budget = budget;
        self
    }

    /// Passthrough readiness probe for the HTTP surface's `/readyz` (§6:
    /// "200 if C1.ping = ok; else 503").
    pub async fn ping(&self, deadline: Duration) -> Result<(), SupervisorError> {
        self.supervisor.ping(deadline).await
    }

    /// Create `(port, partial_config)` → Instance (§4.5 Create).
    pub async fn create(&self, port: Port, partial: &PartialInstanceConfig) -> Result<Instance, AdminError> {
        let _guard = self.locks.acquire(port).await?;
        let group = port.group_name();

        // Step 3: reject if either store already knows this port.
        if self.confstore.exists(port).await? {
            return Err(AdminError::already_exists(port));
        }
        match self.supervisor.info(&group, self.rpc_timeout).await {
            Ok(_) => return Err(AdminError::already_exists(port)),
            Err(SupervisorError::Fault(SupervisorFault::NotFound(_))) => {}
            Err(other) => return Err(other.into()),
        }

        // Step 4: merge defaults + partial, deriving db_uri from the port.
        let config = InstanceConfig::new_for_create(port, partial);
        let rendered = gowa_template::render(port, &config, &self.paths);

        match self.write_reload_start(port, &group, &rendered).await {
            Ok(info) => {
                info!(port = port.get(), "instance created");
                Ok(self.project(port, &config, Some(&info)))
            }
            Err(err) => {
                warn!(port = port.get(), error = %err, "create failed, compensating");
                self.compensate_create(port, &group).await;
                Err(err)
            }
        }
    }

    async fn write_reload_start(&self, port: Port, group: &str, rendered: &str) -> Result<ProcessInfo, AdminError> {
        self.confstore.write(port, rendered).await?;
        self.supervisor.reload(self.rpc_timeout).await?;
        self.supervisor.start(group, self.rpc_timeout).await?;
        self.poll_until_running(group).await
    }

    /// Step 10: best-effort `stop` → `remove` → `C3.remove`, swallowing
    /// every error except logging it — the original failure is what the
    /// caller sees.
    async fn compensate_create(&self, port: Port, group: &str) {
        let budget = self.compensation_budget.0;
        if let Err(e) = self.supervisor.stop(group, budget).await {
            warn!(port = port.get(), error = %e, "compensation: stop failed");
        }
        if let Err(e) = self.supervisor.remove(group, budget).await {
            warn!(port = port.get(), error = %e, "compensation: remove failed");
        }
        if let Err(e) = self.confstore.remove(port).await {
            warn!(port = port.get(), error = %e, "compensation: failed to remove config file");
        }
    }

    /// Update `(port, partial_config)` → Instance (§4.5 Update).
    pub async fn update(&self, port: Port, partial: &PartialInstanceConfig) -> Result<Instance, AdminError> {
        let _guard = self.locks.acquire(port).await?;
        let group = port.group_name();

        let existing_text = self.confstore.read(port).await?.ok_or_else(|| AdminError::not_found(port))?;
        let (_, current_config) = gowa_template::parse(&existing_text)?;
        let merged = current_config.merged_with(partial);
        let rendered = gowa_template::render(port, &merged, &self.paths);

        // Step 5: content-equal render is a no-op (§9 "Dynamic partial updates").
        if rendered == existing_text {
            let info = self.supervisor.info(&group, self.rpc_timeout).await?;
            return Ok(self.project(port, &merged, Some(&info)));
        }

        match self.supervisor.stop(&group, self.rpc_timeout).await {
            Ok(()) => {}
            Err(SupervisorError::Fault(SupervisorFault::NotRunning(_))) => {}
            Err(other) => return Err(other.into()),
        }

        self.confstore.write(port, &rendered).await?;
        self.supervisor.reload(self.rpc_timeout).await?;

        let started = async {
            self.supervisor.start(&group, self.rpc_timeout).await?;
            self.poll_until_running(&group).await
        }
        .await;

        match started {
            Ok(info) => {
                info!(port = port.get(), "instance updated");
                Ok(self.project(port, &merged, Some(&info)))
            }
            Err(original_err) => {
                warn!(port = port.get(), error = %original_err, "update failed, restoring previous config");
                match self.restore_previous(port, &group, &existing_text).await {
                    Ok(()) => Err(original_err),
                    Err(restore_err) => Err(AdminError::restore_failed(format!(
                        "update failed ({original_err}) and restoring the previous config also failed ({restore_err})"
                    ))),
                }
            }
        }
    }

    /// Restore the prior program file and try to bring the instance back up
    /// with it, within the compensation budget (§4.5 Update step 9).
    async fn restore_previous(&self, port: Port, group: &str, previous_text: &str) -> Result<(), AdminError> {
        let budget = self.compensation_budget.0;
        self.confstore.write(port, previous_text).await?;
        self.supervisor.reload(budget).await?;
        self.supervisor.start(group, budget).await?;
        Ok(())
    }

    /// Delete `(port)` (§4.5 Delete).
    pub async fn delete(&self, port: Port, purge: bool) -> Result<(), AdminError> {
        let _guard = self.locks.acquire(port).await?;
        let group = port.group_name();

        let config_exists = self.confstore.exists(port).await?;
        let supervisor_exists = match self.supervisor.info(&group, self.rpc_timeout).await {
            Ok(_) => true,
            Err(SupervisorError::Fault(SupervisorFault::NotFound(_))) => false,
            Err(other) => return Err(other.into()),
        };

        if !config_exists && !supervisor_exists {
            return Err(AdminError::not_found(port));
        }

        match self.supervisor.stop(&group, self.rpc_timeout).await {
            Ok(())
            | Err(SupervisorError::Fault(SupervisorFault::NotFound(_)))
            | Err(SupervisorError::Fault(SupervisorFault::NotRunning(_))) => {}
            Err(other) => return Err(other.into()),
        }

        match self.supervisor.remove(&group, self.rpc_timeout).await {
            Ok(()) | Err(SupervisorError::Fault(SupervisorFault::NotFound(_))) => {}
            Err(other) => return Err(other.into()),
        }

        self.confstore.remove(port).await?;

        if purge {
            self.purge_instance_dir(port).await;
        }

        info!(port = port.get(), purge, "instance deleted");
        Ok(())
    }

    async fn purge_instance_dir(&self, port: Port) {
        let dir: PathBuf = self.paths.instances_dir.join(port.to_string());
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(port = port.get(), path = %dir.display(), error = %e, "purge: failed to remove instance directory"),
        }
    }

    /// Get `(port)` → Instance (§4.5 Get). Never locks.
    pub async fn get(&self, port: Port) -> Result<Instance, AdminError> {
        let config_text = self.confstore.read(port).await?;
        let group = port.group_name();
        let supervisor_info = match self.supervisor.info(&group, self.rpc_timeout).await {
            Ok(info) => Some(info),
            Err(SupervisorError::Fault(SupervisorFault::NotFound(_))) => None,
            Err(other) => return Err(other.into()),
        };

        match (config_text, supervisor_info) {
            (None, None) => Err(AdminError::not_found(port)),
            (Some(text), Some(info)) => {
                let (_, config) = gowa_template::parse(&text)?;
                Ok(self.project(port, &config, Some(&info)))
            }
            (Some(text), None) => {
                let (_, config) = gowa_template::parse(&text)?;
                Ok(self.diverged(port, config, false, true))
            }
            (None, Some(_)) => Ok(self.diverged(port, InstanceConfig::default(), true, false)),
        }
    }

    /// List `()` → [Instance] (§4.5 List).
    pub async fn list(&self) -> Result<Vec<Instance>, AdminError> {
        let config_ports = self.confstore.list_ports().await?;
        let all_info = self.supervisor.info_all(self.rpc_timeout).await?;
        let mut by_group: HashMap<String, ProcessInfo> =
            all_info.into_iter().map(|info| (info.group.clone(), info)).collect();

        let mut instances = Vec::with_capacity(config_ports.len());
        for port in config_ports {
            let Some(text) = self.confstore.read(port).await? else {
                // Raced with a concurrent delete; this entry is gone now.
                continue;
            };
            let (_, config) = gowa_template::parse(&text)?;
            let group = port.group_name();
            match by_group.remove(&group) {
                Some(info) => instances.push(self.project(port, &config, Some(&info))),
                None => instances.push(self.diverged(port, config, false, true)),
            }
        }

        for group in by_group.into_keys() {
            if let Some(port) = Port::from_group_name(&group) {
                instances.push(self.diverged(port, InstanceConfig::default(), true, false));
            }
        }

        instances.sort_by_key(|instance| instance.port);
        Ok(instances)
    }

    fn diverged(&self, port: Port, config: InstanceConfig, supervisor_group_present: bool, config_file_present: bool) -> Instance {
        Instance {
            port,
            state: InstanceState::Unknown,
            pid: None,
            started_at: None,
            exit_status: None,
            last_error: None,
            config,
            divergence: Some(Divergence { config_file_present, supervisor_group_present }),
        }
    }

    fn project(&self, port: Port, config: &InstanceConfig, info: Option<&ProcessInfo>) -> Instance {
        let Some(info) = info else {
            return Instance::absent(port, config.clone());
        };
        let state = state_map::state_from_name(&info.statename);
        Instance {
            port,
            state,
            pid: if state.carries_pid() { info.pid } else { None },
            started_at: state_map::started_at(info),
            exit_status: info.exit_status,
            last_error: state_map::last_error(info),
            config: config.clone(),
            divergence: None,
        }
    }

    /// Poll `info(group)` with a bounded exponential backoff until it
    /// reaches `Running`, or a terminal failure is observed, or the budget
    /// is exhausted (§4.5 Create step 8 / Update step 9).
    async fn poll_until_running(&self, group: &str) -> Result<ProcessInfo, AdminError> {
        let mut last_statename = "UNKNOWN".to_string();
        for attempt in 0..self.backoff.attempts {
            let delay = self.backoff.delay_for(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let info = self.supervisor.info(group, self.rpc_timeout).await?;
            let state = state_map::state_from_name(&info.statename);
            last_statename = info.statename.clone();

            match state {
                InstanceState::Running => return Ok(info),
                InstanceState::Fatal => {
                    return Err(AdminError::start_failed(format!("{group} entered FATAL during startup")));
                }
                // §4.5 step 8 lists Backoff alongside Fatal/Exited(non-zero) as an
                // observed terminal failure, not a state worth continuing to poll.
                InstanceState::Backoff => {
                    return Err(AdminError::start_failed(format!(
                        "{group} entered BACKOFF during startup"
                    )));
                }
                InstanceState::Exited if info.exit_status.is_some_and(|code| code != 0) => {
                    return Err(AdminError::start_failed(format!(
                        "{group} exited with status {:?} during startup",
                        info.exit_status
                    )));
                }
                _ => {}
            }
        }

        Err(AdminError::start_failed(format!(
            "{group} did not reach Running within the poll budget (last observed state: {last_statename})"
        )))
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
