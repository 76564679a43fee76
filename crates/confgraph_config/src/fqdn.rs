//! Fully qualified resource addresses.
//!
//! Every resource, module and output has a canonical dot separated address:
//!
//! ```text
//! address      := module_ref? (resource_ref | output_ref)?
//! module_ref   := "module" "." module_path
//! resource_ref := "resource" "." type "." name attribute?
//! output_ref   := "output" "." name attribute?
//! attribute    := "." attr_name
//! ```
//!
//! A module path runs greedily up to the first literal `resource` or
//! `output` segment. Parsing and [`Display`](core::fmt::Display) are exact
//! inverses for every canonical address.

use confgraph_types::{ResourceMetadata, TYPE_OUTPUT};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MODULE_TOKEN: &str = "module";
const RESOURCE_TOKEN: &str = "resource";
const OUTPUT_TOKEN: &str = "output";

/// Attribute implied by an output reference without an explicit attribute.
pub const DEFAULT_OUTPUT_ATTRIBUTE: &str = "value";

/// Error parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FqdnError {
    /// The address does not follow the address grammar.
    #[error("malformed address '{address}': {reason}")]
    Malformed {
        /// The offending address, verbatim.
        address: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl FqdnError {
    fn malformed(address: &str, reason: &'static str) -> Self {
        Self::Malformed {
            address: address.to_string(),
            reason,
        }
    }
}

/// A parsed address.
///
/// Empty strings mark absent components: a module reference has an empty
/// `resource_type`, `resource` and `attribute`, and a top level resource has
/// an empty `module`.
///
/// # Example
///
/// ```
/// use confgraph_config::Fqdn;
///
/// let fqdn = Fqdn::parse("module.module1.module2.resource.container.mine.attr").unwrap();
/// assert_eq!(fqdn.module, "module1.module2");
/// assert_eq!(fqdn.resource_type, "container");
/// assert_eq!(fqdn.resource, "mine");
/// assert_eq!(fqdn.attribute, "attr");
///
/// assert_eq!(fqdn.to_string(), "module.module1.module2.resource.container.mine.attr");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fqdn {
    /// Dot separated module path, outermost first.
    pub module: String,
    /// Resource type, `output` for output references.
    pub resource_type: String,
    /// Resource or output name.
    pub resource: String,
    /// Attribute of the resource being referenced.
    pub attribute: String,
}

impl Fqdn {
    /// Parses an address string.
    ///
    /// # Errors
    ///
    /// Returns [`FqdnError::Malformed`] if `address` is empty, contains an
    /// empty segment, starts with anything other than `module`, `resource`
    /// or `output`, or has missing or dangling segments.
    pub fn parse(address: &str) -> Result<Self, FqdnError> {
        if address.is_empty() {
            return Err(FqdnError::malformed(address, "address is empty"));
        }

        let tokens: Vec<&str> = address.split('.').collect();
        if tokens.iter().any(|token| token.is_empty()) {
            return Err(FqdnError::malformed(address, "address contains an empty segment"));
        }

        let mut fqdn = Fqdn::default();
        let rest = match tokens[0] {
            MODULE_TOKEN => {
                let end = tokens[1..]
                    .iter()
                    .position(|token| *token == RESOURCE_TOKEN || *token == OUTPUT_TOKEN)
                    .map_or(tokens.len(), |index| index + 1);

                if end == 1 {
                    return Err(FqdnError::malformed(address, "module reference has no path"));
                }

                fqdn.module = tokens[1..end].join(".");
                &tokens[end..]
            }
            RESOURCE_TOKEN | OUTPUT_TOKEN => &tokens[..],
            _ => {
                return Err(FqdnError::malformed(
                    address,
                    "expected 'module', 'resource' or 'output' as the first segment",
                ));
            }
        };

        match rest {
            [] => {}
            [RESOURCE_TOKEN, OUTPUT_TOKEN, ..] => {
                return Err(FqdnError::malformed(
                    address,
                    "outputs are addressed as 'output.<name>'",
                ));
            }
            [RESOURCE_TOKEN, resource_type, name, attribute @ ..] => {
                fqdn.resource_type = (*resource_type).to_string();
                fqdn.resource = (*name).to_string();
                fqdn.attribute = single_attribute(address, attribute)?;
            }
            [RESOURCE_TOKEN, ..] => {
                return Err(FqdnError::malformed(
                    address,
                    "resource reference must have a type and a name",
                ));
            }
            [OUTPUT_TOKEN, name, attribute @ ..] => {
                fqdn.resource_type = TYPE_OUTPUT.to_string();
                fqdn.resource = (*name).to_string();
                fqdn.attribute = match single_attribute(address, attribute)? {
                    attribute if attribute.is_empty() => DEFAULT_OUTPUT_ATTRIBUTE.to_string(),
                    attribute => attribute,
                };
            }
            [OUTPUT_TOKEN] => {
                return Err(FqdnError::malformed(address, "output reference must have a name"));
            }
            // The module scan stops only at `resource` or `output`.
            [_, ..] => unreachable!("module path ends at a resource or output segment"),
        }

        Ok(fqdn)
    }

    /// Creates a reference to the module at `path`.
    pub fn module_ref(path: impl Into<String>) -> Self {
        Self {
            module: path.into(),
            ..Self::default()
        }
    }

    /// Returns the address of the resource described by `meta`.
    ///
    /// Outputs are addressed as `output.<name>`, everything else as
    /// `resource.<type>.<name>`.
    #[must_use]
    pub fn for_resource(meta: &ResourceMetadata) -> Self {
        let attribute = if meta.resource_type() == TYPE_OUTPUT {
            DEFAULT_OUTPUT_ATTRIBUTE.to_string()
        } else {
            String::new()
        };

        Self {
            module: meta.module.clone(),
            resource_type: meta.resource_type().to_string(),
            resource: meta.name().to_string(),
            attribute,
        }
    }

    /// Returns `true` if this address refers to a whole module.
    #[must_use]
    pub fn is_module(&self) -> bool {
        self.resource_type.is_empty() && self.resource.is_empty()
    }

    /// Returns `true` if this address refers to an output.
    #[must_use]
    pub fn is_output(&self) -> bool {
        self.resource_type == TYPE_OUTPUT
    }

    /// Returns `true` if `meta` is the resource this address points at.
    ///
    /// The attribute is ignored: `resource.container.web.id` matches the
    /// container `web`.
    #[must_use]
    pub fn matches(&self, meta: &ResourceMetadata) -> bool {
        self.resource_type == meta.resource_type()
            && self.resource == meta.name()
            && self.module == meta.module
    }

    /// Returns this address without its attribute.
    #[must_use]
    pub fn without_attribute(&self) -> Self {
        let attribute = if self.is_output() {
            DEFAULT_OUTPUT_ATTRIBUTE.to_string()
        } else {
            String::new()
        };

        Self {
            attribute,
            ..self.clone()
        }
    }
}

fn single_attribute(address: &str, segments: &[&str]) -> Result<String, FqdnError> {
    match segments {
        [] => Ok(String::new()),
        [attribute] => Ok((*attribute).to_string()),
        _ => Err(FqdnError::malformed(
            address,
            "unexpected segments after the attribute",
        )),
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";

        if !self.module.is_empty() {
            write!(f, "{MODULE_TOKEN}.{}", self.module)?;
            sep = ".";
        }

        if self.is_module() {
            return Ok(());
        }

        if self.is_output() {
            write!(f, "{sep}{OUTPUT_TOKEN}.{}", self.resource)?;
            if !self.attribute.is_empty() && self.attribute != DEFAULT_OUTPUT_ATTRIBUTE {
                write!(f, ".{}", self.attribute)?;
            }
            return Ok(());
        }

        write!(
            f,
            "{sep}{RESOURCE_TOKEN}.{}.{}",
            self.resource_type, self.resource
        )?;
        if !self.attribute.is_empty() {
            write!(f, ".{}", self.attribute)?;
        }

        Ok(())
    }
}

impl FromStr for Fqdn {
    type Err = FqdnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Fqdn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fqdn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;
        Self::parse(&address).map_err(serde::de::Error::custom)
    }
}
