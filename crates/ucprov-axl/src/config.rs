//! AXL target configuration.

use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    10
}

/// Connection settings for one AXL endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AxlTarget {
    /// Full endpoint URL, e.g. `https://cucm.example.com/axl`.
    pub endpoint: String,

    /// Verify the endpoint's TLS certificate. CUCM installations commonly
    /// present self-signed certificates, so this defaults to `false`.
    #[serde(default)]
    pub tls_verify: bool,

    /// Fixed per-request timeout. A timeout is treated like any other
    /// transport failure.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Template applied to every created CSF device.
    #[serde(default)]
    pub device_template: DeviceTemplate,
}

/// Fixed template/profile configuration for created CSF devices.
///
/// The defaults match the standard Client Services Framework phone
/// configuration; deployments with renamed device pools or profiles can
/// override individual fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceTemplate {
    pub product: String,
    pub model: String,
    pub class: String,
    pub protocol: String,
    pub device_pool: String,
    pub phone_template: String,
    pub common_phone_config: String,
    pub security_profile: String,
    pub sip_profile: String,
}

impl Default for DeviceTemplate {
    fn default() -> Self {
        Self {
            product: "Cisco Unified Client Services Framework".to_string(),
            model: "Cisco Unified Client Services Framework".to_string(),
            class: "Phone".to_string(),
            protocol: "SIP".to_string(),
            device_pool: "Device Pool".to_string(),
            phone_template: "Standard Client Services Framework".to_string(),
            common_phone_config: "Standard Common Phone Profile".to_string(),
            security_profile:
                "Cisco Unified Client Services Framework - Standard SIP Non-Secure Profile"
                    .to_string(),
            sip_profile: "Standard SIP Profile".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_defaults() {
        let target: AxlTarget =
            toml::from_str("endpoint = \"https://cucm.example.com/axl\"").unwrap();
        assert!(!target.tls_verify);
        assert_eq!(target.request_timeout_secs, 10);
        assert_eq!(target.device_template.protocol, "SIP");
    }

    #[test]
    fn template_fields_can_be_overridden() {
        let target: AxlTarget = toml::from_str(
            "endpoint = \"https://cucm.example.com/axl\"\n\
             [device_template]\n\
             device_pool = \"HQ Pool\"\n",
        )
        .unwrap();
        assert_eq!(target.device_template.device_pool, "HQ Pool");
        assert_eq!(target.device_template.class, "Phone");
    }
}
