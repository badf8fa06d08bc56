//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! the dashboard page and the server.

use serde::{Deserialize, Serialize};

use crate::api::dto::SelectionDto;
use crate::view::Series;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A control changed; re-render with the full current selection
    Render(SelectionDto),
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Series for the most recent selection
    Chart {
        series: Series,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AxisScale, Metric, ViewMode};

    #[test]
    fn test_client_message_deserialization() {
        let json = r#"{"type": "render", "country": "Chile", "metric": "new_deaths", "log_scale": true}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        match msg {
            ClientMessage::Render(selection) => {
                assert_eq!(selection.country.as_deref(), Some("Chile"));
                assert_eq!(selection.metric.as_deref(), Some("new_deaths"));
                assert_eq!(selection.log_scale, Some(true));
                assert!(selection.view.is_none());
            }
            _ => panic!("Expected Render"),
        }

        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_serialization() {
        let msg = ServerMessage::Chart {
            series: Series {
                title: "New Deaths in Chile".to_string(),
                country: "Chile".to_string(),
                metric: Metric::NewDeaths,
                view_mode: ViewMode::Cumulative,
                y_axis: AxisScale::Log,
                points: Vec::new(),
            },
        };
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "chart");
        assert_eq!(json["series"]["title"], "New Deaths in Chile");
        assert_eq!(json["series"]["y_axis"], "log");

        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }
}
