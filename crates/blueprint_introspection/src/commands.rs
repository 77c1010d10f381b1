// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command dispatch.
//!
//! Commands arrive as a name plus a JSON parameter object and always answer
//! with a JSON value: the document on success, or
//! `{ "success": false, "error": "<message>" }`.

use crate::document::BlueprintIntrospector;
use crate::error::IntrospectionError;
use blueprint_model::UnitSource;
use serde_json::{json, Value};

/// Command returning the full document for one unit
pub const GET_BLUEPRINT_DATA: &str = "get_blueprint_data";

/// Parameter naming the unit to document
pub const BLUEPRINT_NAME_PARAM: &str = "blueprint_name";

/// Handles introspection commands against a unit source
pub struct CommandHandler<'a, S: UnitSource + ?Sized> {
    source: &'a S,
    introspector: BlueprintIntrospector,
}

impl<'a, S: UnitSource + ?Sized> CommandHandler<'a, S> {
    /// Create a handler over `source`
    pub fn new(source: &'a S, introspector: BlueprintIntrospector) -> Self {
        Self { source, introspector }
    }

    /// Run a command and build the response envelope
    pub fn handle(&self, command_type: &str, params: &Value) -> Value {
        match self.dispatch(command_type, params) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Command {} failed: {}", command_type, e);
                error_response(&e)
            }
        }
    }

    fn dispatch(&self, command_type: &str, params: &Value) -> Result<Value, IntrospectionError> {
        match command_type {
            GET_BLUEPRINT_DATA => self.get_blueprint_data(params),
            other => Err(IntrospectionError::UnknownCommand(other.to_string())),
        }
    }

    fn get_blueprint_data(&self, params: &Value) -> Result<Value, IntrospectionError> {
        let name = params
            .get(BLUEPRINT_NAME_PARAM)
            .and_then(Value::as_str)
            .ok_or(IntrospectionError::MissingParameter(BLUEPRINT_NAME_PARAM))?;
        let document = self.introspector.extract(self.source, name)?;
        serde_json::to_value(document).map_err(|e| IntrospectionError::Serialization(e.to_string()))
    }
}

/// Failure envelope for an error
pub fn error_response(error: &IntrospectionError) -> Value {
    json!({
        "success": false,
        "error": error.to_string(),
    })
}
