//! JSON-RPC 2.0 bridge between a host page and the viewer.
//!
//! The viewer runs in an iframe and talks to its parent over `postMessage`.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Parse into a WarehouseCommand
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Command methods only acknowledge receipt. The command itself runs later in the same
//! frame through `apply_warehouse_commands`, and its outcome comes back as a notification
//! (`selection_changed`, `animation_started`, `animation_finished`,
//! `suggested_object_added`).
//!
//! ## Methods
//!
//! - `regenerate`, `animate_pallet`, `clear_scene`: no params
//! - `search`: `{ "query": string }`
//! - `select_pallet`: `{ "id": string | null }`
//! - `add_suggested_object`: `{ "label": string, "kind"?: string }`
//! - `suggest`: `{ "prompt": string }`, answered synchronously with a scene suggestion
//! - `get_status`: dimensions, counts, selection and search term
//! - `get_fps`: smoothed frame rate
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including a prompt below the minimum length)
//! - `-32603`: Internal error (session not ready, suggestion service failed)

/// Message plumbing, request parsing and handlers.
pub mod web_rpc;
