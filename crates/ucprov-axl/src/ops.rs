//! The remote operation library: one narrow function per AXL call.
//!
//! Each operation builds one request body and interprets its one expected
//! response shape. None of them retry. Identifiers are expected to be
//! pre-sanitized; values are still escaped for the SQL literal and XML
//! contexts they are interpolated into.

use std::collections::BTreeSet;

use async_trait::async_trait;

use ucprov_core::{DirectoryOps, OpsError, OpsFailureKind, UserRecord};

use crate::client::AxlClient;
use crate::envelope::{sql_literal, xml_text};

/// Escape a value for interpolation inside a single-quoted SQL literal that
/// itself sits in XML text content.
fn sql_value(value: &str) -> String {
    xml_text(&sql_literal(value)).into_owned()
}

/// Strip the `{}` delimiters AXL wraps around returned pkids.
fn strip_key_delimiters(raw: &str) -> &str {
    raw.trim_matches(|c| c == '{' || c == '}')
}

#[async_trait]
impl DirectoryOps for AxlClient {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, OpsError> {
        let body = format!(
            "<ns:executeSQLQuery><sql>SELECT firstname, lastname, telephonenumber, pkid \
             FROM enduser WHERE userid = '{}'</sql></ns:executeSQLQuery>",
            sql_value(user_id)
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("find_user"))?;

        let Some(row) = response.rows.first() else {
            return Ok(None);
        };
        let Some(user_key) = row.get("pkid") else {
            return Err(OpsError::new(
                "find_user",
                OpsFailureKind::MalformedResponse,
                "user row is missing the pkid column",
            ));
        };

        let first = row.get("firstname").map(String::as_str).unwrap_or_default();
        let last = row.get("lastname").map(String::as_str).unwrap_or_default();
        Ok(Some(UserRecord {
            full_name: format!("{first} {last}").trim().to_string(),
            phone_number: row
                .get("telephonenumber")
                .cloned()
                .unwrap_or_default(),
            user_key: user_key.clone(),
        }))
    }

    async fn find_device(&self, user_id: &str) -> Result<Option<String>, OpsError> {
        let body = format!(
            "<ns:executeSQLQuery><sql>SELECT pkid FROM device WHERE name = 'CSF{}'\
             </sql></ns:executeSQLQuery>",
            sql_value(user_id)
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("find_device"))?;
        Ok(response.first_row_value("pkid").map(str::to_string))
    }

    async fn create_device(
        &self,
        user_id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<Option<String>, OpsError> {
        let template = &self.target().device_template;
        let name = xml_text(full_name);
        let body = format!(
            "<ns:addPhone><phone>\
             <name>CSF{id}</name><description>{name}</description>\
             <product>{product}</product><model>{model}</model>\
             <class>{class}</class><protocol>{protocol}</protocol>\
             <devicePoolName>{pool}</devicePoolName>\
             <phoneTemplateName>{phone_template}</phoneTemplateName>\
             <commonPhoneConfigName>{common}</commonPhoneConfigName>\
             <securityProfileName>{security}</securityProfileName>\
             <sipProfileName>{sip}</sipProfileName>\
             <lines><line><index>1</index><label>{name}</label><display>{name}</display>\
             <dirn><pattern>{pattern}</pattern></dirn></line></lines>\
             <ownerUserName>{id}</ownerUserName>\
             </phone></ns:addPhone>",
            id = xml_text(user_id),
            name = name,
            product = xml_text(&template.product),
            model = xml_text(&template.model),
            class = xml_text(&template.class),
            protocol = xml_text(&template.protocol),
            pool = xml_text(&template.device_pool),
            phone_template = xml_text(&template.phone_template),
            common = xml_text(&template.common_phone_config),
            security = xml_text(&template.security_profile),
            sip = xml_text(&template.sip_profile),
            pattern = xml_text(phone_number),
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("create_device"))?;

        Ok(response
            .return_text
            .as_deref()
            .map(strip_key_delimiters)
            .filter(|key| !key.is_empty())
            .map(str::to_string))
    }

    async fn list_group_memberships(&self, user_key: &str) -> Result<BTreeSet<String>, OpsError> {
        let body = format!(
            "<ns:executeSQLQuery><sql>SELECT fkdirgroup FROM enduserdirgroupmap \
             WHERE fkenduser = '{}'</sql></ns:executeSQLQuery>",
            sql_value(user_key)
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("list_group_memberships"))?;
        Ok(response
            .column_values("fkdirgroup")
            .map(str::to_string)
            .collect())
    }

    async fn add_group_membership(&self, user_key: &str, group_key: &str) -> Result<bool, OpsError> {
        let body = format!(
            "<ns:executeSQLUpdate><sql>INSERT INTO enduserdirgroupmap \
             (fkenduser, fkdirgroup) VALUES ('{}', '{}')</sql></ns:executeSQLUpdate>",
            sql_value(user_key),
            sql_value(group_key)
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("add_group_membership"))?;
        Ok(response.rows_updated == Some(1))
    }

    async fn add_device_association(&self, user_key: &str, device_key: &str) -> Result<bool, OpsError> {
        let body = format!(
            "<ns:executeSQLUpdate><sql>INSERT INTO enduserdevicemap \
             (fkenduser, fkdevice, tkuserassociation) VALUES ('{}', '{}', '1')\
             </sql></ns:executeSQLUpdate>",
            sql_value(user_key),
            sql_value(device_key)
        );
        let response = self
            .execute(&body)
            .await
            .map_err(|e| e.into_ops_error("add_device_association"))?;
        Ok(response.rows_updated == Some(1))
    }
}
