//! NNTP capabilities parsing and storage (RFC 3977 Section 5.2)
//!
//! The CAPABILITIES command returns a list of capabilities supported by the server.
//! Each capability may have optional arguments.

use std::collections::HashMap;

/// Represents the capabilities supported by an NNTP server
#[must_use]
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Map of capability name to its arguments
    /// Example: "COMPRESS" -> ["DEFLATE", "GZIP"]
    capabilities: HashMap<String, Vec<String>>,
}

impl Capabilities {
    /// Create an empty Capabilities instance
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    /// Parse capabilities from NNTP response lines
    ///
    /// # Format
    /// Each line is: `CAPABILITY [arg1 arg2 ...]`
    ///
    /// # Example
    /// ```text
    /// VERSION 2
    /// READER
    /// POST
    /// IHAVE
    /// COMPRESS DEFLATE GZIP
    /// ```
    pub fn parse(lines: &[String]) -> Self {
        let mut capabilities = HashMap::new();

        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let capability = parts[0].to_uppercase();
            let args: Vec<String> = parts[1..].iter().map(|s| s.to_string()).collect();
            capabilities.insert(capability, args);
        }

        Self { capabilities }
    }

    /// Check if a capability is supported
    #[must_use]
    pub fn has(&self, capability: &str) -> bool {
        self.capabilities.contains_key(&capability.to_uppercase())
    }

    /// Get arguments for a capability
    ///
    /// Returns None if the capability is not supported
    #[must_use]
    pub fn get_args(&self, capability: &str) -> Option<&Vec<String>> {
        self.capabilities.get(&capability.to_uppercase())
    }

    /// Get all capability names
    pub fn list(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }

    /// Check if the server supports a specific capability with a specific argument
    ///
    /// # Example
    /// ```no_run
    /// # use newsflow_engine::Capabilities;
    /// # let caps = Capabilities::new();
    /// if caps.has_arg("COMPRESS", "DEFLATE") {
    ///     println!("Server supports DEFLATE compression");
    /// }
    /// ```
    pub fn has_arg(&self, capability: &str, arg: &str) -> bool {
        self.get_args(capability)
            .map(|args| args.iter().any(|a| a.eq_ignore_ascii_case(arg)))
            .unwrap_or(false)
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}
