use std::fmt;

use serde_json::Value;

use super::sequence::{Sequence, SequenceEvent, Voice};

/*
JSON Sequences
==============

A sequence document is a JSON array. Each element becomes one step:

    "a4"                          note, one beat
    "a4_cs4_e4"                   several pitches, one beat
    0.5                           rest for half a beat
    { "a3": 0.5, "d4": 0.25 }     chord; each key plays for its own beats
    { "a3_cs3_e3": [0.25, 0.0625] }   chord voice with [beats, delay]
    ["a4", 0.5]                   one token for 0.5 beats
    ["a4", 0.5, 0.25]             ... delayed by a quarter beat
    [["a3", "cs3", "e3"], 0.25, 0.0625]   token list, joined with "_"
    [0, 0.5]                      rest for half a beat

Anything else (null, booleans, wrongly shaped arrays, object values that
are neither a number nor a [beats, delay] pair) is logged and skipped.
Chord voices come out in key order.

Only a document that is not an array at all is an error.
*/

#[derive(Debug)]
pub enum ParseError {
    /// Not valid JSON
    Json(serde_json::Error),
    /// Valid JSON, but the top level is not an array
    NotAnArray { found: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Json(e) => write!(f, "invalid sequence JSON: {}", e),
            ParseError::NotAnArray { found } => {
                write!(f, "sequence must be a JSON array, found {}", found)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Json(e) => Some(e),
            ParseError::NotAnArray { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json(e)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a JSON document into a sequence.
pub fn parse_sequence(json: &str) -> Result<Sequence, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    from_value(&value)
}

/// Canonicalize an already-parsed JSON array.
pub fn from_value(value: &Value) -> Result<Sequence, ParseError> {
    let elements = value
        .as_array()
        .ok_or(ParseError::NotAnArray { found: kind(value) })?;

    Ok(elements
        .iter()
        .enumerate()
        .filter_map(|(i, element)| {
            let event = event_from_value(element);
            if event.is_none() {
                log::warn!("skipping sequence element {}: {}", i, element);
            }
            event
        })
        .collect())
}

/// One array element to one step, if it has a known shape.
pub fn event_from_value(value: &Value) -> Option<SequenceEvent> {
    match value {
        Value::String(token) => Some(SequenceEvent::note(token.as_str())),
        Value::Number(beats) => beats.as_f64().map(SequenceEvent::Rest),
        Value::Object(voices) => {
            let voices = voices
                .iter()
                .filter_map(|(token, shape)| {
                    let voice = voice_from_value(token, shape);
                    if voice.is_none() {
                        log::warn!("skipping chord voice '{}': {}", token, shape);
                    }
                    voice
                })
                .collect();
            Some(SequenceEvent::Chord(voices))
        }
        Value::Array(parts) => array_event(parts),
        Value::Null | Value::Bool(_) => None,
    }
}

/// `beats` or `[beats, delay]`
fn voice_from_value(token: &str, shape: &Value) -> Option<Voice> {
    match shape {
        Value::Number(beats) => Some(Voice::new(token, beats.as_f64()?)),
        Value::Array(pair) => match pair.as_slice() {
            [beats, delay] => Some(Voice::new(token, beats.as_f64()?).delayed(delay.as_f64()?)),
            _ => None,
        },
        _ => None,
    }
}

fn array_event(parts: &[Value]) -> Option<SequenceEvent> {
    let (head, beats, delay) = match parts {
        [head, beats] => (head, beats.as_f64()?, 0.0),
        [head, beats, delay] => (head, beats.as_f64()?, delay.as_f64()?),
        _ => return None,
    };

    let token = match head {
        Value::String(token) => token.clone(),
        Value::Array(tokens) => tokens
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()?
            .join("_"),
        Value::Number(n) if n.as_f64() == Some(0.0) && delay == 0.0 => {
            return Some(SequenceEvent::Rest(beats));
        }
        _ => return None,
    };

    Some(SequenceEvent::Scaled(Voice::new(token, beats).delayed(delay)))
}
