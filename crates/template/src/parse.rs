// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The config template parser — [`render`](crate::render::render)'s exact
//! inverse over the recognized field set (§4.5 Update step 4, §9).

use gowa_core::{InstanceConfig, Port};

use crate::env_codec;
use crate::error::TemplateError;
use crate::fields::from_pairs;

/// Parse a program file written by [`render`](crate::render::render) back
/// into `(Port, InstanceConfig)`.
///
/// Only the `environment=` line is authoritative; the command line is a
/// derived, human-readable rendering of the non-default flags and is not
/// consulted here (documented in DESIGN.md).
pub fn parse(text: &str) -> Result<(Port, InstanceConfig), TemplateError> {
    let env_line = text
        .lines()
        .find_map(|line| line.strip_prefix("environment="))
        .ok_or(TemplateError::MissingEnvironmentLine)?;

    let pairs = env_codec::decode(env_line)
        .ok_or_else(|| TemplateError::MalformedEnvironment(env_line.to_string()))?;

    from_pairs(pairs)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
