/*
[INPUT]:  WebSocket connection parameters
[OUTPUT]: Parsed notification events
[POS]:    WebSocket layer - realtime notification stream
[UPDATE]: When the notification frame format or connection logic changes
*/

pub mod client;

pub use client::NotificationSocket;
