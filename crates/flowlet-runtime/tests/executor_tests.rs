//! Executor flows, end to end, through the emission-recording harness.
//!
//! Every scenario drives a full invocation (resolve → instantiate →
//! execute) and asserts on the recorded emissions only, the same way an
//! embedding host would observe a component.

use flowlet_api::testing::EmitterHarness;
use flowlet_api::{
    Component, ComponentError, ErrorCode, EventKind, ExecutionParameters, InvocationError, Message,
};
use flowlet_runtime::{ComponentRegistry, EchoComponent, Executor, NoopComponent};
use serde_json::json;
use std::sync::Arc;

/// Registry with the two builtins under their canonical names.
fn builtin_registry() -> Arc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    registry.register("echo", Box::new(|| Ok(Box::new(EchoComponent::new()))));
    registry.register("noop", Box::new(|| Ok(Box::new(NoopComponent::new()))));
    Arc::new(registry)
}

fn message(body: serde_json::Value) -> Message {
    Message::builder().body(body).build()
}

// =============================================================================
// Happy path
// =============================================================================

mod happy_path {
    use super::*;

    #[test]
    fn echo_emits_snapshot_then_data_without_error() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("echo", builtin_registry(), harness.emitter());

        executor.execute(Some(harness.parameters_with(
            message(json!({ "greeting": "hello" })),
            json!({ "mode": "loud" }),
            json!({ "cursor": 41 }),
        )));

        let kinds: Vec<EventKind> = harness.emissions().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Snapshot, EventKind::Data]);

        assert_eq!(harness.snapshots(), vec![json!({ "echo": { "cursor": 41 } })]);

        let data = harness.data_messages();
        assert_eq!(data[0].body()["echo"], json!({ "greeting": "hello" }));
        assert_eq!(data[0].body()["config"], json!({ "mode": "loud" }));
        assert!(harness.errors().is_empty());
    }

    #[test]
    fn noop_completes_with_zero_emissions() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("noop", builtin_registry(), harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({ "any": "thing" })))));

        assert!(harness.emissions().is_empty());
    }

    #[test]
    fn executor_is_reusable_across_invocations() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("echo", builtin_registry(), harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({ "n": 1 })))));
        executor.execute(Some(harness.parameters(message(json!({ "n": 2 })))));

        let data = harness.data_messages();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].body()["echo"], json!({ "n": 1 }));
        assert_eq!(data[1].body()["echo"], json!({ "n": 2 }));
        assert!(harness.errors().is_empty());
    }
}

// =============================================================================
// Missing parameters
// =============================================================================

mod missing_parameters {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn rejected_with_exactly_one_validation_error() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("echo", builtin_registry(), harness.emitter());

        executor.execute(None);

        let errors = harness.errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], InvocationError::Validation(_)));
        assert_eq!(errors[0].code(), "INVOCATION_VALIDATION");
        assert_eq!(harness.emissions().len(), 1);
    }

    #[test]
    fn resolution_is_never_attempted() {
        // The name is unknown; with absent parameters the failure must
        // still be validation, proving the registry was never consulted.
        let harness = EmitterHarness::new();
        let executor = Executor::new(
            "no-such-component",
            Arc::new(ComponentRegistry::new()),
            harness.emitter(),
        );

        executor.execute(None);

        let errors = harness.errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], InvocationError::Validation(_)));
    }

    #[test]
    fn factory_is_never_called() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&constructed);

        let mut registry = ComponentRegistry::new();
        registry.register(
            "counting",
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(NoopComponent::new()))
            }),
        );

        let harness = EmitterHarness::new();
        let executor = Executor::new("counting", Arc::new(registry), harness.emitter());

        executor.execute(None);

        assert_eq!(constructed.load(Ordering::SeqCst), 0);
    }
}

// =============================================================================
// Resolution failures
// =============================================================================

mod resolution {
    use super::*;

    #[test]
    fn unknown_name_yields_exactly_one_resolution_error() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("missing", builtin_registry(), harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({})))));

        let errors = harness.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], InvocationError::Resolution("missing".into()));
        assert_eq!(errors[0].to_string(), "component not found: missing");
        assert_eq!(harness.emissions().len(), 1);
    }

    #[test]
    fn failure_lands_on_the_parameters_emitter() {
        // The executor's own emitter is only the fallback for absent
        // parameters; with parameters present, their emitter gets the error.
        let fallback = EmitterHarness::new();
        let invocation = EmitterHarness::new();
        let executor = Executor::new("missing", builtin_registry(), fallback.emitter());

        executor.execute(Some(invocation.parameters(message(json!({})))));

        assert!(fallback.emissions().is_empty());
        assert_eq!(invocation.errors().len(), 1);
    }
}

// =============================================================================
// Instantiation failures
// =============================================================================

mod instantiation {
    use super::*;

    fn refusing_registry() -> Arc<ComponentRegistry> {
        let mut registry = ComponentRegistry::new();
        registry.register(
            "refusing",
            Box::new(|| Err(ComponentError::MissingConfiguration("credentials".into()))),
        );
        Arc::new(registry)
    }

    #[test]
    fn failing_factory_yields_exactly_one_instantiation_error() {
        let harness = EmitterHarness::new();
        let executor = Executor::new("refusing", refusing_registry(), harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({})))));

        let errors = harness.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            InvocationError::Instantiation {
                component: "refusing".into(),
                source: ComponentError::MissingConfiguration("credentials".into()),
            }
        );
        assert!(errors[0].to_string().contains("refusing"));
        assert_eq!(errors[0].code(), "INVOCATION_INSTANTIATION");
    }

    #[test]
    fn replacement_factory_wins() {
        let mut registry = ComponentRegistry::new();
        registry.register(
            "flaky",
            Box::new(|| Err(ComponentError::InitFailed("first wiring".into()))),
        );
        registry.register("flaky", Box::new(|| Ok(Box::new(EchoComponent::new()))));

        let harness = EmitterHarness::new();
        let executor = Executor::new("flaky", Arc::new(registry), harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({ "ok": true })))));

        assert!(harness.errors().is_empty());
        assert_eq!(harness.data_messages().len(), 1);
    }
}

// =============================================================================
// Execution failures
// =============================================================================

mod execution_failures {
    use super::*;

    struct Grumpy;

    impl Component for Grumpy {
        fn execute(&mut self, _parameters: ExecutionParameters) -> Result<(), ComponentError> {
            Err(ComponentError::ExecutionFailed("Ouch".into()))
        }
    }

    struct SelfReporting;

    impl Component for SelfReporting {
        fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
            parameters
                .emitter()
                .emit_exception(ComponentError::ExecutionFailed("Ouch".into()));
            Ok(())
        }
    }

    struct PartialThenFail;

    impl Component for PartialThenFail {
        fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
            parameters
                .emitter()
                .emit_data(Message::builder().body(json!({ "page": 1 })).build());
            Err(ComponentError::ExecutionFailed("page 2 unavailable".into()))
        }
    }

    fn single_registry(
        name: &'static str,
        factory: flowlet_runtime::ComponentFactory,
    ) -> Arc<ComponentRegistry> {
        let mut registry = ComponentRegistry::new();
        registry.register(name, factory);
        Arc::new(registry)
    }

    #[test]
    fn raised_failure_becomes_exactly_one_error_emission() {
        let harness = EmitterHarness::new();
        let registry = single_registry("grumpy", Box::new(|| Ok(Box::new(Grumpy))));
        let executor = Executor::new("grumpy", registry, harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({})))));

        let errors = harness.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            InvocationError::Execution(ComponentError::ExecutionFailed("Ouch".into()))
        );
        assert!(harness.data_messages().is_empty());
        assert!(harness.snapshots().is_empty());
        assert_eq!(harness.emissions().len(), 1);
    }

    #[test]
    fn raised_and_emitted_failures_are_indistinguishable() {
        let raised = EmitterHarness::new();
        let registry = single_registry("grumpy", Box::new(|| Ok(Box::new(Grumpy))));
        Executor::new("grumpy", registry, raised.emitter())
            .execute(Some(raised.parameters(message(json!({})))));

        let emitted = EmitterHarness::new();
        let registry = single_registry("reporting", Box::new(|| Ok(Box::new(SelfReporting))));
        Executor::new("reporting", registry, emitted.emitter())
            .execute(Some(emitted.parameters(message(json!({})))));

        assert_eq!(raised.errors(), emitted.errors());
        assert_eq!(raised.errors()[0].code(), "INVOCATION_EXECUTION");
    }

    #[test]
    fn emissions_before_the_failure_are_kept() {
        let harness = EmitterHarness::new();
        let registry = single_registry("partial", Box::new(|| Ok(Box::new(PartialThenFail))));
        let executor = Executor::new("partial", registry, harness.emitter());

        executor.execute(Some(harness.parameters(message(json!({})))));

        let kinds: Vec<EventKind> = harness.emissions().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Data, EventKind::Error]);
        assert_eq!(harness.data_messages()[0].body(), &json!({ "page": 1 }));
    }
}

// =============================================================================
// Optional channels
// =============================================================================

mod optional_channels {
    use super::*;

    struct ReboundHappy;

    impl Component for ReboundHappy {
        fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
            parameters
                .emitter()
                .emit_rebound("queue still warming up")
                .emit_data(Message::builder().body(json!({ "sent": true })).build());
            Ok(())
        }
    }

    #[test]
    fn unregistered_rebound_is_dropped_and_nothing_else_fires() {
        let harness = EmitterHarness::required_only();
        let mut registry = ComponentRegistry::new();
        registry.register("rebounding", Box::new(|| Ok(Box::new(ReboundHappy))));

        let executor = Executor::new("rebounding", Arc::new(registry), harness.emitter());
        executor.execute(Some(harness.parameters(message(json!({})))));

        // The rebound vanished; the data emission went through untouched.
        let kinds: Vec<EventKind> = harness.emissions().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Data]);
        assert!(harness.errors().is_empty());
    }

    #[test]
    fn registered_rebound_is_delivered() {
        let harness = EmitterHarness::new();
        let mut registry = ComponentRegistry::new();
        registry.register("rebounding", Box::new(|| Ok(Box::new(ReboundHappy))));

        let executor = Executor::new("rebounding", Arc::new(registry), harness.emitter());
        executor.execute(Some(harness.parameters(message(json!({})))));

        assert_eq!(harness.rebounds(), vec!["queue still warming up".to_string()]);
    }
}

// =============================================================================
// Lifecycle hooks
// =============================================================================

mod lifecycle_hooks {
    use super::*;
    use flowlet_api::{InitParameters, ShutdownParameters, StartupParameters};
    use serde_json::Value;

    struct Subscribing {
        webhook: Option<String>,
    }

    impl Component for Subscribing {
        fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
            parameters.emitter().emit_data(
                Message::builder()
                    .body(json!({ "webhook": self.webhook }))
                    .build(),
            );
            Ok(())
        }

        fn startup(&mut self, parameters: StartupParameters) -> Result<Value, ComponentError> {
            let url = parameters.configuration()["url"]
                .as_str()
                .ok_or_else(|| ComponentError::MissingConfiguration("url".into()))?
                .to_string();
            Ok(json!({ "subscription": format!("{url}/hook") }))
        }

        fn init(&mut self, parameters: InitParameters) -> Result<(), ComponentError> {
            self.webhook = parameters.configuration()["url"].as_str().map(String::from);
            Ok(())
        }

        fn shutdown(&mut self, parameters: ShutdownParameters) -> Result<(), ComponentError> {
            if parameters.state()["subscription"].is_null() {
                return Err(ComponentError::ExecutionFailed(
                    "nothing to unsubscribe".into(),
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn default_hooks_do_nothing() {
        let mut component = NoopComponent::new();

        let state = component
            .startup(StartupParameters::new(json!({})))
            .expect("default startup should succeed");
        assert_eq!(state, json!({}));

        assert!(component.init(InitParameters::new(json!({}))).is_ok());
        assert!(component
            .shutdown(ShutdownParameters::new(json!({}), json!({})))
            .is_ok());
    }

    #[test]
    fn host_driven_flow_lifecycle() {
        // A host starts the flow, runs one invocation, then stops it,
        // threading the startup state into shutdown.
        let configuration = json!({ "url": "https://calls.example" });
        let mut component = Subscribing { webhook: None };

        let state = component
            .startup(StartupParameters::new(configuration.clone()))
            .expect("startup should subscribe");
        assert_eq!(state["subscription"], "https://calls.example/hook");

        component
            .init(InitParameters::new(configuration.clone()))
            .expect("init should cache the url");

        let harness = EmitterHarness::new();
        component
            .execute(harness.parameters(message(json!({}))))
            .expect("execution should succeed");
        assert_eq!(
            harness.data_messages()[0].body()["webhook"],
            "https://calls.example"
        );

        component
            .shutdown(ShutdownParameters::new(configuration, state))
            .expect("shutdown should accept the startup state");
    }
}

// =============================================================================
// Concurrency
// =============================================================================

mod concurrency {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_invocations_are_isolated() {
        let executor = Arc::new(Executor::new(
            "echo",
            builtin_registry(),
            EmitterHarness::new().emitter(),
        ));

        let mut handles = Vec::new();
        for n in 0..4 {
            let executor = Arc::clone(&executor);
            handles.push(thread::spawn(move || {
                let harness = EmitterHarness::new();
                executor.execute(Some(harness.parameters(message(json!({ "n": n })))));
                (n, harness)
            }));
        }

        for handle in handles {
            let (n, harness) = handle.join().expect("invocation thread should not panic");
            let data = harness.data_messages();
            assert_eq!(data.len(), 1, "each invocation sees only its own emission");
            assert_eq!(data[0].body()["echo"], json!({ "n": n }));
            assert!(harness.errors().is_empty());
        }
    }
}
