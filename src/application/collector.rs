//! One collection pass
//!
//! Fetches the three resources concurrently and encodes each independently.
//! A failing resource contributes no records and is reported separately;
//! it never aborts the others.

use crate::application::encoder::Resource;
use crate::domain::errors::CollectError;
use crate::domain::metric::{MetricRecord, now_ns};
use crate::domain::ports::NiceHashApi;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug)]
pub struct ResourceFailure {
    pub resource: Resource,
    pub error: CollectError,
}

/// Records of every successful resource, in [`Resource::ALL`] order, plus
/// the failures.
#[derive(Debug, Default)]
pub struct CollectionReport {
    pub records: Vec<MetricRecord>,
    pub failures: Vec<ResourceFailure>,
}

pub struct Collector {
    api: Arc<dyn NiceHashApi>,
    rig_group: Option<String>,
}

impl Collector {
    pub fn new(api: Arc<dyn NiceHashApi>) -> Self {
        Self {
            api,
            rig_group: None,
        }
    }

    /// Restricts the rig listing to one rig group.
    pub fn with_rig_group(mut self, rig_group: Option<String>) -> Self {
        self.rig_group = rig_group.filter(|g| !g.trim().is_empty());
        self
    }

    pub async fn collect(&self) -> CollectionReport {
        let (rigs, payouts, balance) = tokio::join!(
            self.collect_resource(Resource::Rigs),
            self.collect_resource(Resource::Payouts),
            self.collect_resource(Resource::Balance),
        );

        let mut report = CollectionReport::default();
        for (resource, result) in Resource::ALL.into_iter().zip([rigs, payouts, balance]) {
            match result {
                Ok(records) => {
                    info!(resource = %resource, records = records.len(), "Resource collected");
                    report.records.extend(records);
                }
                Err(e) => {
                    error!(resource = %resource, error = %e, "Failed to collect {}", resource);
                    report.failures.push(ResourceFailure { resource, error: e });
                }
            }
        }

        info!(
            records = report.records.len(),
            failures = report.failures.len(),
            "Collection finished"
        );
        report
    }

    pub async fn collect_resource(
        &self,
        resource: Resource,
    ) -> Result<Vec<MetricRecord>, CollectError> {
        let query = resource.query(self.rig_group.as_deref());
        let doc = self.api.get(resource.path(), &query).await?;
        Ok(resource.encode(&doc, now_ns())?)
    }
}
