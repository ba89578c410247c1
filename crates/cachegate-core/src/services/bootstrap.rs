//! Single bootstrap pass over gates, security, properties and indexes.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::domain::{IndexHandle, ManagedIndexSpec};
use crate::error::{ConfigurationError, CoreError};
use crate::ports::{CapabilityProbePort, SecurityEnablementPort};
use crate::properties::{PropertyAssembler, PropertyConfigurer, PropertySet, SecurityAttributes};
use crate::security::{Realm, RealmSet, SecurityManager, SecurityManagerRegistry};

use super::{
    Collaborators, ConditionGate, GateDecision, IndexFactory, IndexRegistry, LifecycleProcessor,
    SecurityActivation,
};

/// Outcome of [`Bootstrap::run`].
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub gates: GateDecision,
    pub properties: PropertySet,
    pub security_manager: Option<Arc<SecurityManager>>,
    pub indexes: Vec<IndexHandle>,
}

/// Composition of every bootstrap service for one cache component.
///
/// The gates are evaluated when [`run`](Self::run) is called, not when the
/// bootstrap is built, so realms added in between are honored.
pub struct Bootstrap {
    gate: ConditionGate,
    realms: RealmSet,
    attributes: SecurityAttributes,
    assembler: PropertyAssembler,
    activation: SecurityActivation,
    indexes: IndexRegistry,
    lifecycle: LifecycleProcessor,
    shut_down: AtomicBool,
}

impl Bootstrap {
    pub fn new(
        component_name: impl Into<String>,
        probe: Arc<dyn CapabilityProbePort>,
        enablement: Arc<dyn SecurityEnablementPort>,
        security_registry: Arc<SecurityManagerRegistry>,
        collaborators: Arc<Collaborators>,
    ) -> Self {
        Self {
            gate: ConditionGate::new(probe),
            realms: RealmSet::new(),
            attributes: SecurityAttributes::default(),
            assembler: PropertyAssembler::new(component_name),
            activation: SecurityActivation::new(security_registry, enablement),
            indexes: IndexRegistry::new(collaborators),
            lifecycle: LifecycleProcessor::new(),
            shut_down: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_gate(mut self, gate: ConditionGate) -> Self {
        self.gate = gate;
        self
    }

    #[must_use]
    pub fn with_realms(mut self, realms: RealmSet) -> Self {
        self.realms = realms;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: SecurityAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_configurer(mut self, configurer: Arc<dyn PropertyConfigurer>) -> Self {
        self.assembler = self.assembler.with_configurer(configurer);
        self
    }

    pub fn add_realm(&mut self, realm: Arc<dyn Realm>) {
        self.realms.push(realm);
    }

    /// Declare a managed index; see [`IndexRegistry::register`].
    pub fn register_index(
        &self,
        component_name: &str,
        spec: ManagedIndexSpec,
    ) -> Result<Arc<IndexFactory>, ConfigurationError> {
        self.indexes.register(component_name, spec)
    }

    pub fn realms(&self) -> &RealmSet {
        &self.realms
    }

    pub const fn indexes(&self) -> &IndexRegistry {
        &self.indexes
    }

    /// Current gate snapshot.
    pub fn gates(&self) -> GateDecision {
        self.gate.evaluate(&self.realms)
    }

    /// Assemble the engine properties without activating anything.
    pub fn properties(&self) -> PropertySet {
        self.assembler
            .assemble(&self.attributes, self.gate.realms_configured(&self.realms))
    }

    /// Run the bootstrap pass.
    ///
    /// Order: evaluate gates, initialize realms (integration gate), activate
    /// security (realm gate), assemble properties, ensure indexes. The first
    /// failure aborts the pass and rolls it back: realms initialized so far
    /// are destroyed again and a manager registered by this pass is withdrawn.
    ///
    /// Running again after success is a no-op apart from the report: realms,
    /// the manager and bound indexes are reused.
    pub async fn run(&self) -> Result<BootstrapReport, CoreError> {
        let gates = self.gates();
        info!(
            component = %self.assembler.component_name(),
            integration = gates.integration_present,
            realms = gates.realms_configured,
            "Bootstrapping"
        );

        let activated = if gates.integration_present {
            self.lifecycle.initialize(&self.realms)
        } else {
            Ok(())
        }
        .and_then(|()| self.activation.activate(&self.gate, &self.realms));

        let security_manager = match activated {
            Ok(manager) => manager,
            Err(err) => {
                self.lifecycle.shutdown();
                return Err(err.into());
            }
        };

        let properties = self.assembler.assemble(&self.attributes, gates.realms_configured);
        let indexes = match self.indexes.ensure_all().await {
            Ok(indexes) => indexes,
            Err(err) => {
                self.rollback().await;
                return Err(err);
            }
        };

        info!(indexes = indexes.len(), properties = properties.len(), "Bootstrap complete");
        Ok(BootstrapReport {
            gates,
            properties,
            security_manager,
            indexes,
        })
    }

    /// Undo a partial pass: destroy flagged indexes ensured so far, withdraw
    /// the security manager and tear realms down.
    async fn rollback(&self) {
        if let Err(err) = self.indexes.destroy_all().await {
            warn!(error = %err, "Index teardown incomplete during rollback");
        }
        self.activation.deactivate();
        self.lifecycle.shutdown();
    }

    /// Destroy flagged indexes and tear realms down. Runs once.
    pub async fn shutdown(&self) -> Result<(), CoreError> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let result = self.indexes.destroy_all().await;
        if let Err(err) = &result {
            warn!(error = %err, "Index teardown incomplete");
        }
        self.lifecycle.shutdown();
        result
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("gate", &self.gate)
            .field("realms", &self.realms.names())
            .field("assembler", &self.assembler)
            .field("indexes", &self.indexes.names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivationError;
    use crate::ports::NoCapabilities;
    use crate::properties::{SECURITY_MANAGER, TypeRef};
    use crate::security::{AuthError, Credentials, Principal};
    use crate::services::SECURITY_INTEGRATION;
    use crate::test_support::RecordingSearch;
    use std::sync::Mutex;

    struct Flag(bool);

    impl SecurityEnablementPort for Flag {
        fn enable_enforcement(&self) -> bool {
            self.0
        }
    }

    struct Present;

    impl CapabilityProbePort for Present {
        fn is_present(&self, name: &str) -> bool {
            name == SECURITY_INTEGRATION
        }
    }

    #[derive(Debug, Default)]
    struct TracedRealm {
        events: Mutex<Vec<&'static str>>,
    }

    impl Realm for TracedRealm {
        fn name(&self) -> &str {
            "traced"
        }

        fn authenticate(&self, _credentials: &Credentials) -> Result<Option<Principal>, AuthError> {
            Ok(None)
        }

        fn init(&self) -> Result<(), AuthError> {
            self.events.lock().unwrap().push("init");
            Ok(())
        }

        fn destroy(&self) {
            self.events.lock().unwrap().push("destroy");
        }
    }

    fn attributes() -> SecurityAttributes {
        SecurityAttributes {
            security_manager_class_name: "app::Manager".to_string(),
            security_post_processor_class: TypeRef::named("app::PostProcessor"),
            ..SecurityAttributes::default()
        }
    }

    fn bootstrap(search: Arc<RecordingSearch>, enforce: bool) -> Bootstrap {
        Bootstrap::new(
            "gemfireCache",
            Arc::new(NoCapabilities),
            Arc::new(Flag(enforce)),
            Arc::new(SecurityManagerRegistry::new()),
            Arc::new(Collaborators::new().with_search_service(search)),
        )
        .with_attributes(attributes())
    }

    #[tokio::test]
    async fn without_realms_no_manager_and_no_property() {
        let bootstrap = bootstrap(Arc::new(RecordingSearch::default()), true);
        let report = bootstrap.run().await.unwrap();

        assert!(!report.gates.realms_configured);
        assert!(report.security_manager.is_none());
        assert!(!report.properties.contains_key(SECURITY_MANAGER));
        assert_eq!(
            report.properties.get("security-post-processor"),
            Some("app::PostProcessor")
        );
    }

    #[tokio::test]
    async fn realm_activates_manager_and_property() {
        let realm = Arc::new(TracedRealm::default());
        let bootstrap = bootstrap(Arc::new(RecordingSearch::default()), true)
            .with_realms(RealmSet::new().with(realm.clone()));

        let report = bootstrap.run().await.unwrap();
        assert!(report.security_manager.is_some());
        assert_eq!(report.properties.get(SECURITY_MANAGER), Some("app::Manager"));
        // lifecycle hooks stay off without the integration
        assert!(realm.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn realm_added_after_construction_is_seen() {
        let mut bootstrap = bootstrap(Arc::new(RecordingSearch::default()), true);
        assert!(!bootstrap.gates().realms_configured);

        bootstrap.add_realm(Arc::new(TracedRealm::default()));
        assert!(bootstrap.run().await.unwrap().gates.realms_configured);
    }

    #[tokio::test]
    async fn refused_enforcement_aborts_before_indexes() {
        let search = Arc::new(RecordingSearch::default());
        let realm = Arc::new(TracedRealm::default());
        let bootstrap = bootstrap(search.clone(), false)
            .with_gate(ConditionGate::new(Arc::new(Present)))
            .with_realms(RealmSet::new().with(realm.clone()));
        bootstrap
            .register_index("orders", ManagedIndexSpec::new("OrdersIndex").with_region_path("/Orders"))
            .unwrap();

        let err = bootstrap.run().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Activation(ActivationError::EnforcementNotEnabled)
        ));
        assert_eq!(search.create_calls(), 0);
        assert_eq!(*realm.events.lock().unwrap(), vec!["init", "destroy"]);
    }

    #[tokio::test]
    async fn integration_gate_runs_realm_lifecycle() {
        let realm = Arc::new(TracedRealm::default());
        let bootstrap = bootstrap(Arc::new(RecordingSearch::default()), true)
            .with_gate(ConditionGate::new(Arc::new(Present)))
            .with_realms(RealmSet::new().with(realm.clone()));

        bootstrap.run().await.unwrap();
        assert_eq!(*realm.events.lock().unwrap(), vec!["init"]);

        bootstrap.shutdown().await.unwrap();
        bootstrap.shutdown().await.unwrap();
        assert_eq!(*realm.events.lock().unwrap(), vec!["init", "destroy"]);
    }

    #[tokio::test]
    async fn failed_index_rolls_back_realms_and_manager() {
        let search = Arc::new(RecordingSearch {
            fail_create: true,
            ..RecordingSearch::default()
        });
        let realm = Arc::new(TracedRealm::default());
        let registry = Arc::new(SecurityManagerRegistry::new());
        let bootstrap = Bootstrap::new(
            "gemfireCache",
            Arc::new(Present),
            Arc::new(Flag(true)),
            registry.clone(),
            Arc::new(Collaborators::new().with_search_service(search.clone())),
        )
        .with_realms(RealmSet::new().with(realm.clone()));
        bootstrap
            .register_index("orders", ManagedIndexSpec::new("OrdersIndex").with_region_path("/Orders"))
            .unwrap();

        let err = bootstrap.run().await.unwrap_err();
        assert!(matches!(err, CoreError::Search(_)));
        assert_eq!(*realm.events.lock().unwrap(), vec!["init", "destroy"]);
        assert!(!registry.is_registered());
    }

    #[tokio::test]
    async fn second_run_reuses_initialized_realms() {
        let realm = Arc::new(TracedRealm::default());
        let bootstrap = bootstrap(Arc::new(RecordingSearch::default()), true)
            .with_gate(ConditionGate::new(Arc::new(Present)))
            .with_realms(RealmSet::new().with(realm.clone()));

        let first = bootstrap.run().await.unwrap();
        let second = bootstrap.run().await.unwrap();
        assert!(Arc::ptr_eq(
            first.security_manager.as_ref().unwrap(),
            second.security_manager.as_ref().unwrap()
        ));

        bootstrap.shutdown().await.unwrap();
        assert_eq!(*realm.events.lock().unwrap(), vec!["init", "destroy"]);
    }

    #[tokio::test]
    async fn shutdown_destroys_flagged_indexes_once() {
        let search = Arc::new(RecordingSearch::default());
        let bootstrap = bootstrap(search.clone(), true);
        bootstrap
            .register_index(
                "orders",
                ManagedIndexSpec::new("OrdersIndex")
                    .with_region_path("/Orders")
                    .with_destroy_on_shutdown(true),
            )
            .unwrap();
        bootstrap
            .register_index("customers", ManagedIndexSpec::new("").with_region_path("/Customers"))
            .unwrap();

        let report = bootstrap.run().await.unwrap();
        let names: Vec<_> = report.indexes.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["OrdersIndex", "customers"]);

        bootstrap.shutdown().await.unwrap();
        bootstrap.shutdown().await.unwrap();
        assert_eq!(search.destroy_calls(), 1);
    }
}
