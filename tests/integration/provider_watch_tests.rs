//! Docker provider integration tests

#[cfg(test)]
mod tests {
    use crate::common::{ScriptedConnector, ScriptedRuntime};
    use gateway_hooks::config::Config;
    use gateway_hooks::core::provider::{
        ContainerEvent, DockerProvider, Provider, ProviderData, ProviderState,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    const CONFIG: &str = r#"
providers:
  docker:
    labelPrefix: "gateway."
    endpoint: "unix:///var/run/docker.sock"
    network: minecraft
    watch: true
"#;

    async fn next(rx: &mut mpsc::Receiver<ProviderData>) -> ProviderData {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for snapshot")
            .expect("provider channel closed")
    }

    #[tokio::test]
    async fn test_snapshots_follow_container_lifecycle() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let (runtime, events) = ScriptedRuntime::new();
        runtime.run(
            "lobby",
            &[
                ("gateway.servers.lobby.domains", "lobby.example.com"),
                ("gateway.servers.lobby.address", "lobby:25565"),
            ],
        );

        let mut provider = DockerProvider::new(
            config.providers.docker.clone(),
            Arc::new(ScriptedConnector(runtime.clone())),
        );
        let (tx, mut rx) = mpsc::channel(8);

        let initial = provider.provide(tx).await.unwrap();
        assert_eq!(
            initial.to_value(),
            serde_json::json!({
                "servers": {
                    "lobby": {"domains": "lobby.example.com", "address": "lobby:25565"}
                }
            })
        );

        runtime.run(
            "survival",
            &[("gateway.servers.survival.domains", "survival.example.com,smp.example.com")],
        );
        events
            .unbounded_send(Ok(ContainerEvent::container("start", "survival")))
            .unwrap();
        let started = next(&mut rx).await;
        assert_eq!(
            started.to_value()["servers"]["survival"]["domains"],
            serde_json::json!(["survival.example.com", "smp.example.com"])
        );

        runtime.stop("lobby");
        events
            .unbounded_send(Ok(ContainerEvent::container("die", "lobby")))
            .unwrap();
        let stopped = next(&mut rx).await;
        let servers = stopped.config["servers"].as_map().unwrap();
        assert!(!servers.contains_key("lobby"));
        assert!(servers.contains_key("survival"));

        assert_eq!(runtime.lists(), 3);

        provider.close().await.unwrap();
        assert_eq!(provider.state(), ProviderState::Closed);
        assert!(runtime.is_closed());
    }

    #[tokio::test]
    async fn test_watch_disabled_sends_nothing() {
        let mut config = Config::from_yaml_str(CONFIG).unwrap();
        config.providers.docker.watch = false;
        let (runtime, events) = ScriptedRuntime::new();

        let mut provider = DockerProvider::new(
            config.providers.docker.clone(),
            Arc::new(ScriptedConnector(runtime.clone())),
        );
        let (tx, mut rx) = mpsc::channel(8);

        let initial = provider.provide(tx).await.unwrap();
        assert!(initial.is_empty());

        events
            .unbounded_send(Ok(ContainerEvent::container("start", "lobby")))
            .unwrap();
        // watch disabled: provide dropped the sender
        assert!(rx.recv().await.is_none());
        assert_eq!(runtime.lists(), 1);
    }
}
