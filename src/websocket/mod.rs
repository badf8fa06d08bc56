//! WebSocket Selection Channel
//!
//! Lets the dashboard push every control change over one connection and
//! receive the re-rendered series back, instead of issuing a request per
//! change.
//!
//! ## Architecture
//!
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! Each connection is an independent session reading the shared base
//! table; there is no cross-connection state.
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'render', country: 'India', metric: 'new_cases'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'chart') console.log(msg.series.points.length);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
