//! WebSocket Real-Time Streaming
//!
//! Pushes every dashboard refresh to connected clients.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Manages all active connections and subscriptions
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Topics
//!
//! - `clock` - One-second clock ticks
//! - `kpi` - Key business metrics
//! - `pipeline` - Pipeline chart and gauges
//! - `engineering` - Engineering metrics and real-time series
//! - `aggregates` - Order aggregate snapshots
//! - `system` - System notices
//! - `*` - Everything
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8000/ws');
//! ws.onopen = () => ws.send(JSON.stringify({type: 'subscribe', topics: ['kpi', 'aggregates']}));
//! ws.onmessage = (event) => console.log(JSON.parse(event.data));
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{topics, ClientMessage, ServerMessage, WsEvent};
