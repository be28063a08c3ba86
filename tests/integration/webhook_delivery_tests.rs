//! Webhook delivery integration tests
//!
//! Webhooks post to a local wiremock server.

#[cfg(test)]
mod tests {
    use crate::common::{EventFactory, MemoryBus, webhook_config};
    use chrono::Utc;
    use gateway_hooks::core::events::{Event, EventPayload};
    use gateway_hooks::core::webhooks::{
        ClientData, EventData, ServerData, WebhookError, WebhookPlugin,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn enabled_plugin(server: &MockServer, format: &str) -> (WebhookPlugin, Arc<MemoryBus>) {
        let plugin = WebhookPlugin::new();
        plugin
            .load(&webhook_config(&format!("{}/hook", server.uri()), format))
            .unwrap();
        let bus = Arc::new(MemoryBus::default());
        plugin.enable(bus.clone()).unwrap();
        (plugin, bus)
    }

    fn received_bodies(requests: &[wiremock::Request]) -> Vec<serde_json::Value> {
        requests
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_player_join_is_posted_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (_plugin, bus) = enabled_plugin(&server, "").await;
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;

        let requests = server.received_requests().await.unwrap();
        let bodies = received_bodies(&requests);
        assert_eq!(bodies.len(), 1);

        let body = &bodies[0];
        assert_eq!(body["edition"], "java");
        assert_eq!(body["gatewayId"], "default");
        assert_eq!(body["client"]["username"], "Notch");
        assert_eq!(body["client"]["remoteAddress"], "198.51.100.7:51234");
        assert_eq!(body["server"]["serverId"], "srv1");
        assert_eq!(body["server"]["domains"], serde_json::json!(["srv1.example.com"]));
        assert_eq!(body["isLoginRequest"], true);
    }

    #[tokio::test]
    async fn test_other_server_is_not_posted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (_plugin, bus) = enabled_plugin(&server, "").await;
        bus.publish(EventFactory::player_join("default", "srv2", "Notch")).await;
        bus.publish(EventFactory::player_join("other-gateway", "srv1", "Notch")).await;
    }

    #[tokio::test]
    async fn test_unprojected_events_are_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (_plugin, bus) = enabled_plugin(&server, "").await;
        bus.publish(Event::new(
            ["PlayerJoin"],
            EventPayload::Custom {
                name: "ServerStatus".to_string(),
                payload: serde_json::json!({"online": 3}),
            },
        ))
        .await;
    }

    #[tokio::test]
    async fn test_discord_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let (_plugin, bus) = enabled_plugin(&server, "discord").await;
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;
        bus.publish(EventFactory::player_leave("default", "srv1", "Notch")).await;

        let bodies = received_bodies(&server.received_requests().await.unwrap());
        assert_eq!(bodies[0], serde_json::json!({"content": "Notch joined srv1"}));
        // no template for PlayerLeave: generic JSON
        assert_eq!(bodies[1]["edition"], "java");
        assert_eq!(bodies[1]["server"]["serverId"], "srv1");
    }

    #[tokio::test]
    async fn test_slack_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (_plugin, bus) = enabled_plugin(&server, "slack").await;
        bus.publish(EventFactory::player_join("default", "srv1", "Alex")).await;

        let bodies = received_bodies(&server.received_requests().await.unwrap());
        assert_eq!(bodies[0], serde_json::json!({"text": "Alex joined srv1"}));
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (plugin, _bus) = enabled_plugin(&server, "").await;
        let failures = plugin
            .router()
            .dispatch("PlayerJoin", vec!["PlayerJoin".to_string()], Utc::now(), event_data("srv1"))
            .await;

        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let plugin = WebhookPlugin::new();
        let mut config = webhook_config(&format!("{}/hook", server.uri()), "");
        config["defaults"]["webhook"]["dialTimeout"] = serde_json::json!("100ms");
        plugin.load(&config).unwrap();

        let failures = plugin
            .router()
            .dispatch("PlayerJoin", vec!["PlayerJoin".to_string()], Utc::now(), event_data("srv1"))
            .await;

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].webhook_id, "events");
        assert!(matches!(failures[0].error, WebhookError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_disable_stops_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (plugin, bus) = enabled_plugin(&server, "").await;
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;

        plugin.disable().unwrap();
        assert_eq!(bus.subscribers(), 0);
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;
    }

    #[tokio::test]
    async fn test_reload_switches_destination() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&first)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&second)
            .await;

        let (plugin, bus) = enabled_plugin(&first, "").await;
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;

        plugin
            .reload(&webhook_config(&format!("{}/hook", second.uri()), ""))
            .unwrap();
        bus.publish(EventFactory::player_join("default", "srv1", "Notch")).await;
    }

    fn event_data(server_id: &str) -> EventData {
        EventData {
            edition: "java".to_string(),
            gateway_id: "default".to_string(),
            conn: ClientData {
                network: "tcp".to_string(),
                local_addr: "0.0.0.0:25565".to_string(),
                remote_addr: "198.51.100.7:51234".to_string(),
                username: "Notch".to_string(),
            },
            server: ServerData {
                server_id: server_id.to_string(),
                ..ServerData::default()
            },
            is_login_request: None,
        }
    }
}
