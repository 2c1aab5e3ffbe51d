//! Discovery payload decoding
//!
//! `jmx.discovery[beans,...]` keys return a JSON document as the item value.
//! The gateway escapes the quotes of that document one extra time, so the
//! value text contains `\"` where plain JSON would contain `"`.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// One discovered MBean
///
/// Field names follow the Zabbix low-level discovery macros.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDescriptor {
    #[serde(rename = "{#JMXDOMAIN}")]
    pub domain: String,
    #[serde(rename = "{#JMXTYPE}")]
    pub bean_type: String,
    #[serde(rename = "{#JMXOBJ}")]
    pub object: String,
    #[serde(rename = "{#JMXNAME}")]
    pub name: String,
}

#[derive(Deserialize)]
struct Discovery {
    #[serde(default)]
    data: Option<Vec<BeanDescriptor>>,
}

/// Parse the value of a discovery key into bean descriptors
pub fn parse_beans(text: &str) -> Result<Vec<BeanDescriptor>, ProtocolError> {
    let text = text.replace("\\\"", "\"");
    let discovery: Discovery = serde_json::from_str(&text).map_err(ProtocolError::BeanParse)?;
    Ok(discovery.data.unwrap_or_default())
}
