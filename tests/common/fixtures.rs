//! Test fixtures and data factories

use gateway_hooks::core::events::{
    Conn, Edition, Event, EventBus, EventHandler, EventPayload, Player, Server, SubscriptionId,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Factory for host events
pub struct EventFactory;

impl EventFactory {
    pub fn conn(gateway_id: &str) -> Conn {
        Conn {
            edition: Edition::Java,
            gateway_id: gateway_id.to_string(),
            network: "tcp".to_string(),
            local_addr: "0.0.0.0:25565".parse().unwrap(),
            remote_addr: "198.51.100.7:51234".parse().unwrap(),
        }
    }

    pub fn player(gateway_id: &str, username: &str) -> Player {
        Player {
            conn: Self::conn(gateway_id),
            username: username.to_string(),
            matched_addr: "lobby.example.com".to_string(),
            is_login_request: true,
        }
    }

    pub fn server(id: &str) -> Server {
        Server {
            id: id.to_string(),
            domains: vec![format!("{}.example.com", id)],
        }
    }

    /// `PlayerJoin` of `username` to `server_id` through `gateway_id`
    pub fn player_join(gateway_id: &str, server_id: &str, username: &str) -> Event {
        Event::new(
            ["PlayerJoin"],
            EventPayload::PlayerJoin {
                player: Self::player(gateway_id, username),
                server: Self::server(server_id),
            },
        )
    }

    pub fn player_leave(gateway_id: &str, server_id: &str, username: &str) -> Event {
        Event::new(
            ["PlayerLeave"],
            EventPayload::PlayerLeave {
                player: Self::player(gateway_id, username),
                server: Self::server(server_id),
            },
        )
    }
}

/// Plugin configuration with one webhook posting to `url`
pub fn webhook_config(url: &str, format: &str) -> serde_json::Value {
    serde_json::json!({
        "webhook": {
            "enable": true,
            "webhooks": {
                "events": {
                    "url": url,
                    "gatewayIds": ["default"],
                    "serverIds": ["srv1"],
                    "format": {
                        "type": format,
                        "messageMap": {
                            "PlayerJoin": "{{conn.username}} joined {{server.serverId}}"
                        }
                    }
                }
            }
        },
        "defaults": {
            "webhook": {
                "dialTimeout": "2s",
                "events": ["PlayerJoin", "PlayerLeave"]
            }
        }
    })
}

/// Event bus delivering synchronously to every attached handler
#[derive(Default)]
pub struct MemoryBus {
    handlers: Mutex<Vec<(SubscriptionId, Arc<dyn EventHandler>)>>,
}

impl MemoryBus {
    pub async fn publish(&self, event: Event) {
        let handlers: Vec<_> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler.handle(event.clone()).await;
        }
    }

    pub fn subscribers(&self) -> usize {
        self.handlers.lock().len()
    }
}

impl EventBus for MemoryBus {
    fn attach(&self, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        let id = uuid::Uuid::new_v4();
        self.handlers.lock().push((id, handler));
        id
    }

    fn detach(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }
}
