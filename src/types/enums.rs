//! Enumeration types for the appointment simulator
//!
//! This module contains the request classes served by the two scan machines and
//! the output formats supported by the command line front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of an incoming service request
///
/// Each class is served by its own dedicated machine, so the class also
/// identifies the resource an appointment is booked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RequestClass {
    /// Requests with short, normally distributed service times (machine A)
    ClassA,
    /// Requests with longer, gamma distributed service times (machine B)
    ClassB,
}

impl RequestClass {
    /// Both request classes, in reporting order
    pub const ALL: [RequestClass; 2] = [RequestClass::ClassA, RequestClass::ClassB];

    /// Label of the machine dedicated to this class
    pub fn resource_label(&self) -> &'static str {
        match self {
            RequestClass::ClassA => "Resource A",
            RequestClass::ClassB => "Resource B",
        }
    }
}

impl fmt::Display for RequestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestClass::ClassA => write!(f, "Class A"),
            RequestClass::ClassB => write!(f, "Class B"),
        }
    }
}

impl FromStr for RequestClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class a" | "classa" | "a" | "type 1" | "type1" => Ok(RequestClass::ClassA),
            "class b" | "classb" | "b" | "type 2" | "type2" => Ok(RequestClass::ClassB),
            _ => Err(format!("Unknown request class: {}", s)),
        }
    }
}

/// Output format for the performance report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// Pretty-printed JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_class_display() {
        assert_eq!(RequestClass::ClassA.to_string(), "Class A");
        assert_eq!(RequestClass::ClassB.to_string(), "Class B");
    }

    #[test]
    fn test_request_class_from_str() {
        assert_eq!("class a".parse::<RequestClass>().unwrap(), RequestClass::ClassA);
        assert_eq!("ClassB".parse::<RequestClass>().unwrap(), RequestClass::ClassB);
        assert_eq!("Type 1".parse::<RequestClass>().unwrap(), RequestClass::ClassA);
        assert!("class c".parse::<RequestClass>().is_err());
    }

    #[test]
    fn test_request_class_ordering() {
        assert!(RequestClass::ClassA < RequestClass::ClassB);
        assert_eq!(RequestClass::ALL, [RequestClass::ClassA, RequestClass::ClassB]);
    }

    #[test]
    fn test_resource_labels() {
        assert_eq!(RequestClass::ClassA.resource_label(), "Resource A");
        assert_eq!(RequestClass::ClassB.resource_label(), "Resource B");
    }

    #[test]
    fn test_output_format_round_trip() {
        for format in [OutputFormat::Text, OutputFormat::Json] {
            let parsed: OutputFormat = format.to_string().parse().unwrap();
            assert_eq!(parsed, format);
        }
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
