//! Host event to webhook event projection

use super::types::EventData;
use crate::core::events::{Conn, EventPayload, Player, Server};

fn apply_conn(data: &mut EventData, conn: &Conn) {
    data.edition = conn.edition.to_string();
    data.gateway_id = conn.gateway_id.clone();
    data.conn.network = conn.network.clone();
    data.conn.local_addr = conn.local_addr.to_string();
    data.conn.remote_addr = conn.remote_addr.to_string();
}

fn apply_player(data: &mut EventData, player: &Player) {
    apply_conn(data, &player.conn);
    data.server.server_addr = player.matched_addr.clone();
    data.conn.username = player.username.clone();
    data.is_login_request = Some(player.is_login_request);
}

fn apply_server(data: &mut EventData, server: &Server) {
    data.server.server_id = server.id.clone();
    data.server.domains = server.domains.clone();
}

/// Project a host event payload into its webhook type name and data.
///
/// Returns `None` for payloads webhooks do not report.
pub fn event_data(payload: &EventPayload) -> Option<(&'static str, EventData)> {
    let mut data = EventData::default();

    let event_type = match payload {
        EventPayload::AcceptedConn { conn } => {
            apply_conn(&mut data, conn);
            "AcceptedConn"
        }
        EventPayload::PreConnProcessing { conn } => {
            apply_conn(&mut data, conn);
            "PreProcessing"
        }
        EventPayload::PostConnProcessing { player } => {
            apply_player(&mut data, player);
            "PostProcessing"
        }
        EventPayload::PrePlayerJoin { player, server } => {
            apply_player(&mut data, player);
            apply_server(&mut data, server);
            "PrePlayerJoin"
        }
        EventPayload::PlayerJoin { player, server } => {
            apply_player(&mut data, player);
            apply_server(&mut data, server);
            "PlayerJoin"
        }
        EventPayload::PlayerLeave { player, server } => {
            apply_player(&mut data, player);
            apply_server(&mut data, server);
            "PlayerLeave"
        }
        _ => return None,
    };

    Some((event_type, data))
}
