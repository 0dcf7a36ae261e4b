// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The real `SupervisorClient`, speaking XML-RPC over HTTP (§4.1).
//!
//! The `xmlrpc` crate only encodes/decodes the wire format; transport is
//! ours, so basic auth and per-call deadlines go through `reqwest` the same
//! way every other outbound HTTP call in this workspace does.

use std::time::Duration;

use async_trait::async_trait;
use xmlrpc::{Fault, Value};

use crate::client::{ProcessInfo, SupervisorClient};
use crate::error::{SupervisorError, SupervisorFault, SupervisorTransportError};

// supervisord's own RPC interface fault codes (http://supervisord.org/api.html).
const FAULT_BAD_NAME: i32 = 10;
const FAULT_FAILED: i32 = 30;
const FAULT_ABNORMAL_TERMINATION: i32 = 40;
const FAULT_SPAWN_ERROR: i32 = 50;
const FAULT_ALREADY_STARTED: i32 = 60;
const FAULT_NOT_RUNNING: i32 = 70;
const FAULT_STILL_RUNNING: i32 = 91;

pub struct XmlRpcSupervisorClient {
    http: reqwest::Client,
    url: String,
    user: String,
    pass: String,
}

impl XmlRpcSupervisorClient {
    pub fn new(url: impl Into<String>, user: impl Into<String>, pass: impl Into<String>) -> Self {
        XmlRpcSupervisorClient {
            http: reqwest::Client::new(),
            url: url.into(),
            user: user.into(),
            pass: pass.into(),
        }
    }

    async fn call(&self, method: &str, args: Vec<Value>, deadline: Duration) -> Result<Value, SupervisorError> {
        tracing::debug!(method, ?deadline, "calling supervisor RPC");
        let mut request = xmlrpc::Request::new(method);
        for arg in args {
            request = request.arg(arg);
        }

        let mut body = Vec::new();
        request
            .write_as_xml(&mut body)
            .map_err(|e| SupervisorTransportError::MalformedResponse(e.to_string()))?;

        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.pass))
            .header("Content-Type", "text/xml")
            .timeout(deadline)
            .body(body)
            .send()
            .await
            .map_err(|e| SupervisorTransportError::Unreachable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SupervisorTransportError::Unauthenticated.into());
        }
        if !response.status().is_success() {
            return Err(SupervisorTransportError::Unreachable(format!(
                "supervisor returned HTTP {}",
                response.status()
            ))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SupervisorTransportError::Unreachable(e.to_string()))?;

        match xmlrpc::parse::value(&bytes[..]) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(fault)) => {
                tracing::warn!(method, code = fault.code, message = %fault.message, "supervisor reported a fault");
                Err(fault_to_error(method, fault).into())
            }
            Err(e) => Err(SupervisorTransportError::MalformedResponse(e.to_string()).into()),
        }
    }
}

fn fault_to_error(method: &str, fault: Fault) -> SupervisorFault {
    let group = method.to_string();
    match fault.code {
        FAULT_BAD_NAME => SupervisorFault::NotFound(group),
        FAULT_ALREADY_STARTED => SupervisorFault::AlreadyStarted(group),
        FAULT_SPAWN_ERROR => SupervisorFault::SpawnError(group, fault.message),
        FAULT_ABNORMAL_TERMINATION => SupervisorFault::AbnormalTermination(group),
        FAULT_NOT_RUNNING => SupervisorFault::NotRunning(group),
        FAULT_FAILED => SupervisorFault::Failed(group),
        FAULT_STILL_RUNNING => SupervisorFault::StillRunning(group),
        _ => SupervisorFault::Failed(format!("{group}: fault {} {}", fault.code, fault.message)),
    }
}

/// `reloadConfig` replies with `[[added, changed, removed]]`: the names of
/// process groups the on-disk configuration gained, changed, or lost since
/// the last reload. It does not itself add or remove anything.
fn parse_reload_result(value: Value) -> Result<(Vec<String>, Vec<String>, Vec<String>), SupervisorError> {
    let Value::Array(outer) = value else {
        return Err(SupervisorTransportError::MalformedResponse("reloadConfig: expected an array".into()).into());
    };
    let Some(Value::Array(triple)) = outer.into_iter().next() else {
        return Err(
            SupervisorTransportError::MalformedResponse("reloadConfig: expected [[added, changed, removed]]".into())
                .into(),
        );
    };
    let mut fields = triple.into_iter();
    let added = as_string_array(fields.next())?;
    let changed = as_string_array(fields.next())?;
    let removed = as_string_array(fields.next())?;
    Ok((added, changed, removed))
}

fn as_string_array(value: Option<Value>) -> Result<Vec<String>, SupervisorError> {
    let Some(Value::Array(items)) = value else {
        return Err(SupervisorTransportError::MalformedResponse("reloadConfig: expected a string array".into()).into());
    };
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        let Some(name) = item.as_str() else {
            return Err(SupervisorTransportError::MalformedResponse("reloadConfig: expected a string".into()).into());
        };
        names.push(name.to_string());
    }
    Ok(names)
}

fn as_bool(value: Value) -> Result<bool, SupervisorError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(SupervisorTransportError::MalformedResponse(format!("expected bool, got {other:?}")).into()),
    }
}

fn as_struct(value: Value) -> Result<std::collections::BTreeMap<String, Value>, SupervisorError> {
    match value {
        Value::Struct(map) => Ok(map),
        other => Err(SupervisorTransportError::MalformedResponse(format!("expected struct, got {other:?}")).into()),
    }
}

fn field_i32(map: &std::collections::BTreeMap<String, Value>, key: &str) -> Option<i32> {
    map.get(key).and_then(|v| v.as_i32())
}

fn field_str<'a>(map: &'a std::collections::BTreeMap<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(|v| v.as_str())
}

fn process_info_from_struct(map: std::collections::BTreeMap<String, Value>) -> ProcessInfo {
    let pid = field_i32(&map, "pid").filter(|p| *p > 0).map(|p| p as u32);
    let exit_status = field_i32(&map, "exitstatus").filter(|_| pid.is_none());
    ProcessInfo {
        group: field_str(&map, "group").unwrap_or_default().to_string(),
        statename: field_str(&map, "statename").unwrap_or("UNKNOWN").to_string(),
        pid,
        start_unix: field_i32(&map, "start").map(i64::from),
        exit_status,
        spawn_error: field_str(&map, "spawnerr").filter(|s| !s.is_empty()).map(str::to_string),
    }
}

#[async_trait]
impl SupervisorClient for XmlRpcSupervisorClient {
    async fn ping(&self, deadline: Duration) -> Result<(), SupervisorError> {
        self.call("supervisor.getPID", vec![], deadline).await?;
        Ok(())
    }

    async fn reload(&self, deadline: Duration) -> Result<(), SupervisorError> {
        let value = self.call("supervisor.reloadConfig", vec![], deadline).await?;
        let (added, changed, removed) = parse_reload_result(value)?;

        // `reloadConfig` only computes the delta; the controller relies on
        // `reload()` actually applying it so a just-written config file (or
        // a just-removed one) becomes a real process group (§4.1, §9:
        // "after reload(), subsequently-written config files are
        // discoverable as process groups"). A changed group is removed and
        // re-added, mirroring `supervisorctl update`.
        for name in removed.iter().chain(changed.iter()) {
            match self
                .call("supervisor.removeProcessGroup", vec![Value::from(name.as_str())], deadline)
                .await
            {
                Ok(_) | Err(SupervisorError::Fault(SupervisorFault::NotFound(_))) => {}
                Err(other) => return Err(other),
            }
        }
        for name in added.iter().chain(changed.iter()) {
            self.call("supervisor.addProcessGroup", vec![Value::from(name.as_str())], deadline).await?;
        }
        Ok(())
    }

    async fn start(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError> {
        let value = self
            .call("supervisor.startProcess", vec![Value::from(group)], deadline)
            .await?;
        as_bool(value)?;
        Ok(())
    }

    async fn stop(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError> {
        let value = self
            .call("supervisor.stopProcess", vec![Value::from(group)], deadline)
            .await?;
        as_bool(value)?;
        Ok(())
    }

    async fn remove(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError> {
        let value = self
            .call("supervisor.removeProcessGroup", vec![Value::from(group)], deadline)
            .await?;
        as_bool(value)?;
        Ok(())
    }

    async fn info(&self, group: &str, deadline: Duration) -> Result<ProcessInfo, SupervisorError> {
        let value = self
            .call("supervisor.getProcessInfo", vec![Value::from(group)], deadline)
            .await?;
        Ok(process_info_from_struct(as_struct(value)?))
    }

    async fn info_all(&self, deadline: Duration) -> Result<Vec<ProcessInfo>, SupervisorError> {
        let value = self.call("supervisor.getAllProcessInfo", vec![], deadline).await?;
        let Value::Array(items) = value else {
            return Err(SupervisorTransportError::MalformedResponse("expected array".into()).into());
        };
        items.into_iter().map(|item| as_struct(item).map(process_info_from_struct)).collect()
    }
}

#[cfg(test)]
#[path = "xmlrpc_client_tests.rs"]
mod tests;
