//
//  scribe-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw API access through the adaptive client.
//!
//! Requests go through the same interceptors as every other command: the
//! remembered prefix is applied, the token is attached and a 404 is retried
//! under the other prefixes.
//!
//! ```text
//! scribe api /transcriptions
//! scribe api /form-fills -X POST -F title=Lease -F field_values.tenant=Ada
//! scribe api /api/v1/health --no-prefix-fallback
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::ApiRequest;
use crate::context::AppContext;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path to request, e.g. /form-fills or /api/v1/health
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Add a header (Name: Value)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Add a typed body field (key=value; nested keys use dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Add a string body field (key=value)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Add a query parameter (key=value)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Read the JSON body from a file ("-" for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Do not retry 404s under other path prefixes
    #[arg(long)]
    pub no_prefix_fallback: bool,

    /// Print nothing on success
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        let request = self.build_request()?;

        let response = ctx.client.execute(&request).await?;

        if !self.silent {
            ctx.output.write_value(&response.body)?;
        }
        Ok(())
    }

    fn build_request(&self) -> Result<ApiRequest> {
        let mut request = ApiRequest::new(self.parse_method()?, self.endpoint.clone())
            .headers(self.build_headers()?);

        for pair in &self.query {
            let (key, value) = split_pair(pair)?;
            request = request.query(key, value);
        }
        if let Some(body) = self.build_body()? {
            request = request.json_body(body);
        }
        if self.no_prefix_fallback {
            request = request.without_prefix_fallback();
        }
        Ok(request)
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
            };
            let value: Value = serde_json::from_str(&content).context("Body is not valid JSON")?;
            return Ok(Some(value));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = parse_fields(&self.field)?;
        for field in &self.raw_field {
            let (key, value) = split_pair(field)?;
            set_nested_value(&mut body, key, Value::String(value.to_string()));
        }
        Ok(Some(Value::Object(body)))
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for header in &self.header {
            let Some((name, value)) = header.split_once(':') else {
                bail!("Invalid header format: {}. Expected 'Name: Value'", header);
            };
            let name = HeaderName::from_bytes(name.trim().as_bytes())?;
            let value = HeaderValue::from_str(value.trim())?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Builds a JSON object from `key=value` arguments.
///
/// Values are typed: `true`, `false`, `null`, numbers and JSON arrays or
/// objects are parsed; everything else is a string. Dotted keys nest
/// (`field_values.tenant=Ada`).
pub(crate) fn parse_fields(fields: &[String]) -> Result<Map<String, Value>> {
    let mut body = Map::new();
    for field in fields {
        let (key, raw) = split_pair(field)?;
        set_nested_value(&mut body, key, typed_value(raw));
    }
    Ok(body)
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Invalid field format: {}. Expected key=value", pair),
    }
}

fn typed_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::Number(n.into())
            } else if let Some(n) = raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Value::Number(n)
            } else if raw.starts_with('[') || raw.starts_with('{') {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
