// crates/lumacut-suggest/src/lib.rs
//
// Remote Suggestion Adapter. No UI dependency: editors hand a request to
// `SuggestWorker` and drain outcomes from its channel, the same way they
// would drain any other background result.
//
//   transport: one HTTP POST, abstracted so tests never touch the network
//   wire:      the JSON response envelope shared by client and gateway
//   client:    validate → POST → map status → parse suggestion
//   worker:    one background thread per request, results over a channel
//   gateway:   the server side: prompt templates, upstream call, JSON extraction

pub mod client;
pub mod gateway;
pub mod transport;
pub mod wire;
pub mod worker;

pub use client::{SuggestClient, SuggestConfig};
pub use gateway::{GatewayConfig, GatewayKind, GatewayRequest, GatewayResponse};
pub use transport::{HttpReply, Transport, TransportError, UreqTransport};
pub use worker::{apply_outcome, SuggestOutcome, SuggestWorker};
