//! Recording parser.
//!
//! Turns raw recording JSON into [`Event`] records for the tree model.
//! Frame identities are interned so every distinct package, type and method
//! is allocated once and shared by all frames referring to it.

use super::schema::{RawEvent, RawFrame, RawStackTrace};
use crate::model::{Frame, FrameType, Method, Package, Record, StackTrace, TypeRef};
use crate::utils::config::EVENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// A recorded event, the record type of recording-backed models
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Event {
    pub stack_trace: Option<StackTrace>,
}

impl Record for Event {
    fn stack_trace(&self) -> Option<&StackTrace> {
        self.stack_trace.as_ref()
    }
}

/// Parsed recording (internal representation)
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub events: Vec<Event>,
    pub package_count: usize,
    pub type_count: usize,
    pub method_count: usize,
}

impl Recording {
    /// Number of events carrying a stack trace
    pub fn events_with_trace(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.stack_trace.is_some())
            .count()
    }
}

/// Shares identity objects between frames
#[derive(Debug, Default)]
struct Interner {
    packages: HashMap<String, Rc<Package>>,
    types: HashMap<(String, String), Rc<TypeRef>>,
    methods: HashMap<(String, String, String, String), Rc<Method>>,
}

impl Interner {
    fn package(&mut self, name: &str) -> Rc<Package> {
        self.packages
            .entry(name.to_string())
            .or_insert_with(|| Rc::new(Package::new(name)))
            .clone()
    }

    fn type_ref(&mut self, package: &str, name: &str) -> Rc<TypeRef> {
        let key = (package.to_string(), name.to_string());
        if let Some(existing) = self.types.get(&key) {
            return existing.clone();
        }
        let type_ref = Rc::new(TypeRef::new(self.package(package), name));
        self.types.insert(key, type_ref.clone());
        type_ref
    }

    fn method(&mut self, raw: &RawFrame) -> Rc<Method> {
        let key = (
            raw.package.clone(),
            raw.type_name.clone(),
            raw.method.clone(),
            raw.descriptor.clone(),
        );
        if let Some(existing) = self.methods.get(&key) {
            return existing.clone();
        }
        let declaring_type = self.type_ref(&raw.package, &raw.type_name);
        let method = Rc::new(Method::new(declaring_type, &raw.method, &raw.descriptor));
        self.methods.insert(key, method.clone());
        method
    }

    fn frame(&mut self, raw: &RawFrame) -> Frame {
        let frame_type = raw
            .frame_type
            .as_deref()
            .map(FrameType::from_name)
            .unwrap_or_default();
        Frame::new(self.method(raw), raw.line, raw.bci, frame_type)
    }

    fn stack_trace(&mut self, raw: &RawStackTrace) -> StackTrace {
        let frames = raw.frames.iter().map(|frame| self.frame(frame)).collect();
        StackTrace::new(frames, raw.truncated)
    }
}

/// Parse raw recording JSON
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Either an object holding an event array or a bare event array
///
/// # Errors
/// * `ParseError::InvalidFormat` - Not an object/array, or no event parses
pub fn parse_recording(raw: &serde_json::Value) -> Result<Recording, ParseError> {
    let raw_events = extract_events(raw)?;
    debug!("Parsing {} raw events", raw_events.len());

    let mut interner = Interner::default();
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, value) in raw_events.iter().enumerate() {
        match RawEvent::deserialize(value) {
            Ok(raw_event) => events.push(Event {
                stack_trace: raw_event
                    .stack_trace
                    .as_ref()
                    .map(|trace| interner.stack_trace(trace)),
            }),
            Err(e) => {
                // Log but don't fail - some exporters emit partial events
                warn!("Failed to parse event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !raw_events.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All events failed to parse".to_string(),
        ));
    }

    let recording = Recording {
        events,
        package_count: interner.packages.len(),
        type_count: interner.types.len(),
        method_count: interner.methods.len(),
    };

    debug!(
        "Parsed {} events ({} methods, {} types, {} packages)",
        recording.events.len(),
        recording.method_count,
        recording.type_count,
        recording.package_count
    );

    Ok(recording)
}

/// Read and parse a recording file
///
/// **Public** - used by commands
pub fn read_recording(path: impl AsRef<Path>) -> Result<Recording, ParseError> {
    let path = path.as_ref();
    info!("Reading recording from: {}", path.display());

    let content = std::fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    parse_recording(&raw)
}

/// Locate the event array in a recording document
///
/// **Private** - internal helper for parse_recording
fn extract_events(raw: &serde_json::Value) -> Result<&[serde_json::Value], ParseError> {
    match raw {
        serde_json::Value::Array(events) => Ok(events.as_slice()),

        serde_json::Value::Object(obj) => {
            for field in EVENT_FIELD_NAMES {
                if let Some(events) = obj.get(*field).and_then(|v| v.as_array()) {
                    return Ok(events.as_slice());
                }
            }

            // An empty recording is valid, it just yields an empty tree
            warn!("No event array found in recording");
            Ok(&[])
        }

        _ => Err(ParseError::InvalidFormat(
            "Recording must be a JSON object or array".to_string(),
        )),
    }
}
