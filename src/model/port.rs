// ABOUTME: Port declarations for a service.
// ABOUTME: Parses "[ip:][host:]container[/proto]" strings, bare numbers, and detailed maps.

use serde::Deserialize;
use serde::de::{self, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Network protocol of a declared port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Sctp => "SCTP",
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            "sctp" => Ok(Protocol::Sctp),
            _ => Err(format!("unknown protocol: {}", s)),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Protocol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One declared port: the container-facing port and an optional published port.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortMapping {
    pub container_port: u16,
    #[serde(default)]
    pub host_port: Option<u16>,
    #[serde(default)]
    pub protocol: Protocol,
}

impl PortMapping {
    pub fn new(container_port: u16) -> Self {
        PortMapping {
            container_port,
            host_port: None,
            protocol: Protocol::Tcp,
        }
    }

    pub fn published(mut self, host_port: u16) -> Self {
        self.host_port = Some(host_port);
        self
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Parse formats like "80", "8080:80", "127.0.0.1:8080:80/udp".
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("port cannot be empty".to_string());
        }

        let (addr, protocol) = match s.split_once('/') {
            Some((addr, proto)) => (addr, proto.parse::<Protocol>()?),
            None => (s, Protocol::Tcp),
        };

        let (rest, container) = match addr.rsplit_once(':') {
            Some((rest, container)) => (Some(rest), container),
            None => (None, addr),
        };
        let container_port = parse_port(container)?;

        // Anything before the host port is a bind address and is not carried over.
        let host_port = match rest.map(|r| r.rsplit_once(':').map_or(r, |(_, host)| host)) {
            Some("") | None => None,
            Some(host) => Some(parse_port(host)?),
        };

        Ok(PortMapping {
            container_port,
            host_port,
            protocol,
        })
    }
}

fn parse_port(s: &str) -> Result<u16, String> {
    s.parse::<u16>()
        .map_err(|_| format!("invalid port: {}", s))
        .and_then(check_port)
}

/// Port 0 is never a valid container or published port.
fn check_port(port: u16) -> Result<u16, String> {
    match port {
        0 => Err(format!("invalid port: {}", port)),
        port => Ok(port),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortEntry {
    Number(u16),
    Short(String),
    Detailed(PortMapping),
}

impl PortEntry {
    fn into_port_mapping(self) -> Result<PortMapping, String> {
        match self {
            PortEntry::Number(port) => Ok(PortMapping::new(check_port(port)?)),
            PortEntry::Short(s) => PortMapping::parse(&s),
            PortEntry::Detailed(p) => {
                check_port(p.container_port)?;
                if let Some(host) = p.host_port {
                    check_port(host)?;
                }
                Ok(p)
            }
        }
    }
}

pub(super) fn deserialize_ports<'de, D>(deserializer: D) -> Result<Vec<PortMapping>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<PortEntry> = Vec::deserialize(deserializer)?;
    entries
        .into_iter()
        .map(PortEntry::into_port_mapping)
        .collect::<Result<Vec<_>, _>>()
        .map_err(de::Error::custom)
}
