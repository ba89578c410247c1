//! Create-or-fetch lifecycle of one managed search index.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{IndexHandle, ManagedIndexSpec};
use crate::error::{ConfigurationError, CoreError};
use crate::ports::{SearchError, SearchServicePort};

use super::Collaborators;

/// An index this factory resolved or created, with the service that owns it.
struct Binding {
    handle: IndexHandle,
    service: Arc<dyn SearchServicePort>,
}

/// Idempotent create-or-fetch plus guarded destroy for one managed index.
///
/// The bound-handle slot is guarded by an async mutex held for the whole of
/// [`ensure`](Self::ensure), so concurrent callers observe at most one create
/// call per factory.
pub struct IndexFactory {
    spec: ManagedIndexSpec,
    component_name: Option<String>,
    collaborators: Arc<Collaborators>,
    binding: Mutex<Option<Binding>>,
}

impl IndexFactory {
    pub fn new(spec: ManagedIndexSpec, collaborators: Arc<Collaborators>) -> Self {
        Self {
            spec,
            component_name: None,
            collaborators,
            binding: Mutex::new(None),
        }
    }

    /// Name this factory was registered under; used when the index spec has no
    /// index name of its own.
    #[must_use]
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }

    pub const fn spec(&self) -> &ManagedIndexSpec {
        &self.spec
    }

    pub fn index_name(&self) -> Result<String, ConfigurationError> {
        self.spec.resolve_index_name(self.component_name.as_deref())
    }

    /// Resolved index name for log output; blank when no name resolves.
    pub fn display_name(&self) -> String {
        self.index_name().unwrap_or_default()
    }

    /// Return the bound index, fetching or creating it on first use.
    ///
    /// 1. A bound handle is returned unchanged.
    /// 2. The index name and region path are resolved; both are required.
    /// 3. A search service must resolve.
    /// 4. An existing index is reused, otherwise one is created.
    ///
    /// Creation failures are returned unchanged and leave nothing bound.
    pub async fn ensure(&self) -> Result<IndexHandle, CoreError> {
        let mut binding = self.binding.lock().await;
        if let Some(bound) = binding.as_ref() {
            debug!(index = %bound.handle.name, "Index already bound");
            return Ok(bound.handle.clone());
        }

        let name = self.index_name()?;
        let region_path = self.collaborators.resolve_region_path(&self.spec)?.into_value();
        let service = self
            .collaborators
            .resolve_search_service()
            .ok_or(ConfigurationError::Unresolved {
                what: "search service",
            })?
            .into_value();

        let handle = if let Some(existing) = service.get_index(&name, &region_path).await {
            info!(index = %name, region = %region_path, "Reusing existing index");
            existing
        } else {
            let fields = self.spec.resolve_fields();
            info!(
                index = %name,
                region = %region_path,
                fields = ?fields.field_names(),
                "Creating index"
            );
            service.create_index(&name, &region_path, &fields).await?;
            service
                .get_index(&name, &region_path)
                .await
                .ok_or_else(|| SearchError::NotVisible {
                    name: name.clone(),
                    region_path: region_path.clone(),
                })?
        };

        *binding = Some(Binding {
            handle: handle.clone(),
            service,
        });
        Ok(handle)
    }

    /// The bound index, if [`ensure`](Self::ensure) has succeeded.
    pub async fn bound(&self) -> Option<IndexHandle> {
        self.binding
            .lock()
            .await
            .as_ref()
            .map(|bound| bound.handle.clone())
    }

    /// Destroy the bound index when `destroy_on_shutdown` is set.
    ///
    /// No-op unless `destroy_on_shutdown` is set and an index is bound. The
    /// binding is cleared after a successful destroy, so repeated calls are
    /// no-ops. A failed destroy keeps the binding.
    pub async fn destroy(&self) -> Result<(), CoreError> {
        if !self.spec.destroy_on_shutdown {
            debug!(index = %self.display_name(), "Index kept on shutdown");
            return Ok(());
        }

        let mut binding = self.binding.lock().await;
        let Some(bound) = binding.as_ref() else {
            return Ok(());
        };

        bound.service.destroy_index(&bound.handle).await?;
        info!(index = %bound.handle.name, region = %bound.handle.region_path, "Destroyed index");
        *binding = None;
        Ok(())
    }
}

impl fmt::Debug for IndexFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexFactory")
            .field("spec", &self.spec)
            .field("component_name", &self.component_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalyzerRef, IndexFields, REGION_VALUE_FIELD};
    use crate::ports::MockSearchServicePort;
    use crate::test_support::{RecordingSearch, StubRegion};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn handle(name: &str, path: &str, fields: IndexFields) -> IndexHandle {
        IndexHandle {
            name: name.to_string(),
            region_path: path.to_string(),
            fields,
        }
    }

    fn factory_with(spec: ManagedIndexSpec, service: Arc<dyn SearchServicePort>) -> IndexFactory {
        IndexFactory::new(
            spec,
            Arc::new(Collaborators::new().with_search_service(service)),
        )
    }

    /// Mock whose `get_index` misses until `create_index` has run once.
    fn creating_mock(expected: IndexFields) -> MockSearchServicePort {
        let created = Arc::new(AtomicBool::new(false));
        let mut mock = MockSearchServicePort::new();

        let flag = Arc::clone(&created);
        let expected_fields = expected.clone();
        mock.expect_create_index()
            .withf(move |name, path, fields| {
                name == "OrdersIndex" && path == "/Orders" && *fields == expected_fields
            })
            .times(1)
            .returning(move |_, _, _| {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            });

        mock.expect_get_index().returning(move |name, path| {
            created
                .load(Ordering::SeqCst)
                .then(|| handle(name, path, expected.clone()))
        });
        mock.expect_destroy_index().never();
        mock
    }

    #[tokio::test]
    async fn creates_with_field_list_once() {
        let fields = IndexFields::Fields(vec!["sku".to_string(), "qty".to_string()]);
        let factory = factory_with(
            ManagedIndexSpec::new("OrdersIndex")
                .with_region_path("/Orders")
                .with_fields(["sku", "qty"]),
            Arc::new(creating_mock(fields)),
        );

        let first = factory.ensure().await.unwrap();
        let second = factory.ensure().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name, "OrdersIndex");
        assert_eq!(first.region_path, "/Orders");
    }

    #[tokio::test]
    async fn fresh_factory_uses_analyzer_map() {
        let analyzers = BTreeMap::from([("sku".to_string(), AnalyzerRef::new("keyword"))]);
        let factory = factory_with(
            ManagedIndexSpec::new("OrdersIndex")
                .with_region_path("/Orders")
                .with_fields(["sku", "qty"])
                .with_field_analyzer("sku", AnalyzerRef::new("keyword")),
            Arc::new(creating_mock(IndexFields::Analyzers(analyzers))),
        );

        let index = factory.ensure().await.unwrap();
        assert_eq!(index.fields.field_names(), vec!["sku"]);
    }

    #[tokio::test]
    async fn existing_index_is_reused_without_create() {
        let mut mock = MockSearchServicePort::new();
        mock.expect_get_index()
            .times(1)
            .returning(|name, path| Some(handle(name, path, IndexFields::Fields(vec![]))));
        mock.expect_create_index().never();

        let factory = factory_with(
            ManagedIndexSpec::new("ExampleIndex").with_region_path("/Example"),
            Arc::new(mock),
        );

        factory.ensure().await.unwrap();
        let again = factory.ensure().await.unwrap();
        assert_eq!(again.name, "ExampleIndex");
    }

    #[tokio::test]
    async fn default_fields_index_whole_value() {
        let search = Arc::new(RecordingSearch::default());
        let factory = factory_with(
            ManagedIndexSpec::new("ExampleIndex").with_region_path("/Example"),
            search.clone(),
        );

        factory.ensure().await.unwrap();
        let created = search.created.lock().unwrap().clone();
        assert_eq!(
            created,
            vec![(
                "ExampleIndex".to_string(),
                "/Example".to_string(),
                IndexFields::Fields(vec![REGION_VALUE_FIELD.to_string()]),
            )]
        );
    }

    #[tokio::test]
    async fn concurrent_ensure_creates_once() {
        let search = Arc::new(RecordingSearch::default());
        let factory = Arc::new(factory_with(
            ManagedIndexSpec::new("OrdersIndex").with_region_path("/Orders"),
            search.clone(),
        ));

        let (a, b) = tokio::join!(factory.ensure(), factory.ensure());
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(search.create_calls(), 1);
    }

    #[tokio::test]
    async fn region_reference_path_is_used_for_create() {
        let search = Arc::new(RecordingSearch::default());
        let factory = factory_with(
            ManagedIndexSpec::new("ChildIndex")
                .with_region(StubRegion::at("/Grandparent/Parent/Child"))
                .with_region_path("/Ignored"),
            search.clone(),
        );

        let index = factory.ensure().await.unwrap();
        assert_eq!(index.region_path, "/Grandparent/Parent/Child");
    }

    #[tokio::test]
    async fn blank_name_fails_before_resolution() {
        let mut mock = MockSearchServicePort::new();
        mock.expect_get_index().never();
        mock.expect_create_index().never();

        let factory = factory_with(ManagedIndexSpec::new(" ").with_region_path("/Example"), Arc::new(mock));
        let err = factory.ensure().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration(ConfigurationError::MissingField { field: "index_name" })
        ));
    }

    #[test]
    fn display_name_uses_component_fallback() {
        let factory = IndexFactory::new(ManagedIndexSpec::default(), Arc::new(Collaborators::new()))
            .with_component_name("ordersIndexBean");
        assert_eq!(factory.display_name(), "ordersIndexBean");
        assert_eq!(
            IndexFactory::new(ManagedIndexSpec::default(), Arc::new(Collaborators::new())).display_name(),
            ""
        );
    }

    #[tokio::test]
    async fn component_name_stands_in_for_index_name() {
        let search = Arc::new(RecordingSearch::default());
        let factory = factory_with(ManagedIndexSpec::default().with_region_path("/Example"), search)
            .with_component_name("exampleIndex");

        assert_eq!(factory.ensure().await.unwrap().name, "exampleIndex");
    }

    #[tokio::test]
    async fn missing_search_service_is_fatal() {
        let factory = IndexFactory::new(
            ManagedIndexSpec::new("Idx").with_region_path("/Example"),
            Arc::new(Collaborators::new()),
        );
        let err = factory.ensure().await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration(ConfigurationError::Unresolved { what: "search service" })
        ));
    }

    #[tokio::test]
    async fn create_failure_propagates_and_binds_nothing() {
        let search = Arc::new(RecordingSearch {
            fail_create: true,
            ..RecordingSearch::default()
        });
        let factory = factory_with(
            ManagedIndexSpec::new("Idx").with_region_path("/Example"),
            search.clone(),
        );

        let err = factory.ensure().await.unwrap_err();
        assert!(matches!(err, CoreError::Search(SearchError::CreateFailed { .. })));
        assert!(factory.bound().await.is_none());
    }

    #[tokio::test]
    async fn destroy_skipped_when_not_requested() {
        let search = Arc::new(RecordingSearch::default());
        let factory = factory_with(
            ManagedIndexSpec::new("Idx")
                .with_region_path("/Example")
                .with_destroy_on_shutdown(false),
            search.clone(),
        );

        factory.ensure().await.unwrap();
        factory.destroy().await.unwrap();
        assert_eq!(search.destroy_calls(), 0);
        assert!(factory.bound().await.is_some());
    }

    #[tokio::test]
    async fn destroy_without_binding_makes_no_calls() {
        let mut mock = MockSearchServicePort::new();
        mock.expect_get_index().never();
        mock.expect_create_index().never();
        mock.expect_destroy_index().never();

        let factory = factory_with(
            ManagedIndexSpec::new("Idx")
                .with_region_path("/Example")
                .with_destroy_on_shutdown(true),
            Arc::new(mock),
        );
        factory.destroy().await.unwrap();
    }

    #[tokio::test]
    async fn destroy_runs_once() {
        let search = Arc::new(RecordingSearch::default());
        let factory = factory_with(
            ManagedIndexSpec::new("Idx")
                .with_region_path("/Example")
                .with_destroy_on_shutdown(true),
            search.clone(),
        );

        factory.ensure().await.unwrap();
        factory.destroy().await.unwrap();
        factory.destroy().await.unwrap();
        assert_eq!(search.destroy_calls(), 1);
        assert!(factory.bound().await.is_none());
    }
}
