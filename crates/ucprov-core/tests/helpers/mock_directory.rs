//! In-memory recording implementation of `DirectoryOps` for orchestrator
//! tests. Records every call in order and simulates the remote directory's
//! state transitions (created devices become findable on later lookups).

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use ucprov_core::{DirectoryOps, OpsError, OpsFailureKind, UserRecord};

/// One recorded remote call, with the arguments it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindUser(String),
    FindDevice(String),
    CreateDevice(String),
    ListGroups(String),
    AddGroup(String, String),
    AddAssociation(String, String),
}

#[derive(Default)]
pub struct MockDirectory {
    users: HashMap<String, UserRecord>,
    devices: Mutex<HashMap<String, String>>,
    groups: Mutex<HashMap<String, BTreeSet<String>>>,
    failing_groups: BTreeSet<String>,
    create_key: Option<String>,
    fail_create: bool,
    fail_user_lookup: bool,
    fail_association: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: &str, full_name: &str, phone: &str, user_key: &str) -> Self {
        self.users.insert(
            user_id.to_string(),
            UserRecord {
                full_name: full_name.to_string(),
                phone_number: phone.to_string(),
                user_key: user_key.to_string(),
            },
        );
        self
    }

    pub fn with_device(self, user_id: &str, device_key: &str) -> Self {
        self.devices
            .lock()
            .unwrap()
            .insert(user_id.to_string(), device_key.to_string());
        self
    }

    pub fn with_current_groups(self, user_key: &str, group_keys: &[&str]) -> Self {
        self.groups.lock().unwrap().insert(
            user_key.to_string(),
            group_keys.iter().map(|g| (*g).to_string()).collect(),
        );
        self
    }

    /// Group inserts for these keys report zero rows affected.
    pub fn with_failing_groups(mut self, group_keys: &[&str]) -> Self {
        self.failing_groups = group_keys.iter().map(|g| (*g).to_string()).collect();
        self
    }

    /// Fix the device key returned by the next successful create.
    pub fn with_create_key(mut self, key: &str) -> Self {
        self.create_key = Some(key.to_string());
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_user_lookup(mut self) -> Self {
        self.fail_user_lookup = true;
        self
    }

    pub fn failing_association(mut self) -> Self {
        self.fail_association = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count<F: Fn(&Call) -> bool>(&self, pred: F) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DirectoryOps for MockDirectory {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, OpsError> {
        self.record(Call::FindUser(user_id.to_string()));
        if self.fail_user_lookup {
            return Err(OpsError::new(
                "find_user",
                OpsFailureKind::Transport,
                "connection refused",
            ));
        }
        Ok(self.users.get(user_id).cloned())
    }

    async fn find_device(&self, user_id: &str) -> Result<Option<String>, OpsError> {
        self.record(Call::FindDevice(user_id.to_string()));
        Ok(self.devices.lock().unwrap().get(user_id).cloned())
    }

    async fn create_device(
        &self,
        user_id: &str,
        _full_name: &str,
        _phone_number: &str,
    ) -> Result<Option<String>, OpsError> {
        self.record(Call::CreateDevice(user_id.to_string()));
        if self.fail_create {
            return Err(OpsError::new(
                "create_device",
                OpsFailureKind::RemoteFault,
                "insufficient licenses",
            ));
        }
        let key = self
            .create_key
            .clone()
            .unwrap_or_else(|| format!("dev-{user_id}"));
        self.devices
            .lock()
            .unwrap()
            .insert(user_id.to_string(), key.clone());
        Ok(Some(key))
    }

    async fn list_group_memberships(&self, user_key: &str) -> Result<BTreeSet<String>, OpsError> {
        self.record(Call::ListGroups(user_key.to_string()));
        Ok(self
            .groups
            .lock()
            .unwrap()
            .get(user_key)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_group_membership(&self, user_key: &str, group_key: &str) -> Result<bool, OpsError> {
        self.record(Call::AddGroup(user_key.to_string(), group_key.to_string()));
        if self.failing_groups.contains(group_key) {
            return Ok(false);
        }
        self.groups
            .lock()
            .unwrap()
            .entry(user_key.to_string())
            .or_default()
            .insert(group_key.to_string());
        Ok(true)
    }

    async fn add_device_association(&self, user_key: &str, device_key: &str) -> Result<bool, OpsError> {
        self.record(Call::AddAssociation(
            user_key.to_string(),
            device_key.to_string(),
        ));
        Ok(!self.fail_association)
    }
}
